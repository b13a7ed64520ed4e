//! Instrumented sources shared by the integration tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

/// Counters shared between a counted source and the test body.
#[derive(Debug, Default)]
pub struct Stats {
    pub opened: Cell<usize>,
    pub pulled: Cell<usize>,
    pub released: Cell<usize>,
}

/// Re-iterable source that records cursor opens, pulls, and releases.
///
/// `len == None` yields the natural numbers forever.
#[derive(Debug, Clone)]
pub struct Counted {
    len: Option<u64>,
    pub stats: Rc<Stats>,
}

impl Counted {
    pub fn finite(len: u64) -> Self {
        Self {
            len: Some(len),
            stats: Rc::default(),
        }
    }

    pub fn infinite() -> Self {
        Self {
            len: None,
            stats: Rc::default(),
        }
    }

    pub fn opened(&self) -> usize {
        self.stats.opened.get()
    }

    pub fn pulled(&self) -> usize {
        self.stats.pulled.get()
    }

    pub fn released(&self) -> usize {
        self.stats.released.get()
    }
}

impl IntoIterator for Counted {
    type Item = u64;
    type IntoIter = CountedIter;

    fn into_iter(self) -> CountedIter {
        self.stats.opened.set(self.stats.opened.get() + 1);
        CountedIter {
            next: 1,
            len: self.len,
            stats: self.stats,
        }
    }
}

pub struct CountedIter {
    next: u64,
    len: Option<u64>,
    stats: Rc<Stats>,
}

impl Iterator for CountedIter {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        self.stats.pulled.set(self.stats.pulled.get() + 1);
        if matches!(self.len, Some(len) if self.next > len) {
            return None;
        }
        let value = self.next;
        self.next += 1;
        Some(value)
    }
}

impl Drop for CountedIter {
    fn drop(&mut self) {
        self.stats.released.set(self.stats.released.get() + 1);
    }
}
