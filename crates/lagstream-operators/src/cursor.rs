//! Scoped ownership of the source cursor for one traversal.
//!
//! A traversal starts with the source still unopened. The first pull turns
//! it into a `CursorGuard`; the guard is the only owner of the live cursor
//! and dropping it releases the cursor, whichever way the traversal ends
//! (exhaustion, a yielded error, a panicking selector, or the consumer
//! simply dropping the iterator).

use std::mem;

use crate::metrics;

/// Where a traversal is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Nothing has been pulled; the source cursor is not acquired yet.
    NotStarted,
    /// Fewer than `offset` elements seen; partners are the default lag value.
    Filling,
    /// The window is full; partners come from the window.
    Steady,
    /// Terminal. The cursor has been released.
    Exhausted,
}

/// RAII owner of a live source cursor. Dropping it releases the cursor.
pub(crate) struct CursorGuard<I> {
    inner: I,
    pulled: usize,
    op: &'static str,
}

impl<I: Iterator> CursorGuard<I> {
    fn acquire<S>(source: S, op: &'static str, offset: usize) -> Self
    where
        S: IntoIterator<IntoIter = I>,
    {
        metrics::cursor_acquired(op, offset);
        Self {
            inner: source.into_iter(),
            pulled: 0,
            op,
        }
    }

    /// Pull one element from the source.
    pub(crate) fn pull(&mut self) -> Option<I::Item> {
        let item = self.inner.next();
        if item.is_some() {
            self.pulled += 1;
        }
        item
    }
}

impl<I> Drop for CursorGuard<I> {
    fn drop(&mut self) {
        metrics::cursor_released(self.op, self.pulled);
    }
}

/// Source state for one traversal: unopened, open, or released.
pub(crate) enum Cursor<S: IntoIterator> {
    Pending(S),
    Open(CursorGuard<S::IntoIter>),
    Closed,
}

impl<S: IntoIterator> Cursor<S> {
    pub(crate) fn is_pending(&self) -> bool {
        matches!(self, Cursor::Pending(_))
    }

    /// Take the live cursor out, opening the source on first use.
    ///
    /// The state is left `Closed` until [`Cursor::restore`] puts the guard
    /// back, so any early return or unwind in between releases the cursor
    /// and terminates the traversal.
    pub(crate) fn take(
        &mut self,
        op: &'static str,
        offset: usize,
    ) -> Option<CursorGuard<S::IntoIter>> {
        match mem::replace(self, Cursor::Closed) {
            Cursor::Pending(source) => Some(CursorGuard::acquire(source, op, offset)),
            Cursor::Open(guard) => Some(guard),
            Cursor::Closed => None,
        }
    }

    pub(crate) fn restore(&mut self, guard: CursorGuard<S::IntoIter>) {
        *self = Cursor::Open(guard);
    }

    pub(crate) fn phase(&self, window_full: bool) -> Phase {
        match self {
            Cursor::Pending(_) => Phase::NotStarted,
            Cursor::Open(_) if window_full => Phase::Steady,
            Cursor::Open(_) => Phase::Filling,
            Cursor::Closed => Phase::Exhausted,
        }
    }

    pub(crate) fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Cursor::Pending(_) => (0, None),
            Cursor::Open(guard) => guard.inner.size_hint(),
            Cursor::Closed => (0, Some(0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Tracked {
        next: u32,
        released: Rc<Cell<bool>>,
    }

    impl Iterator for Tracked {
        type Item = u32;
        fn next(&mut self) -> Option<u32> {
            self.next += 1;
            (self.next <= 3).then_some(self.next)
        }
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.released.set(true);
        }
    }

    #[test]
    fn source_is_opened_lazily_and_released_on_drop() {
        let released = Rc::new(Cell::new(false));
        let mut cursor = Cursor::Pending(Tracked {
            next: 0,
            released: Rc::clone(&released),
        });
        assert_eq!(cursor.phase(false), Phase::NotStarted);

        let mut guard = cursor.take("test", 1).expect("pending source opens");
        assert_eq!(guard.pull(), Some(1));
        assert_eq!(guard.pulled, 1);
        cursor.restore(guard);
        assert_eq!(cursor.phase(false), Phase::Filling);
        assert_eq!(cursor.phase(true), Phase::Steady);
        assert!(!released.get());

        let guard = cursor.take("test", 1).expect("open cursor is returned");
        drop(guard);
        assert!(released.get());
        assert_eq!(cursor.phase(true), Phase::Exhausted);
        assert!(cursor.take("test", 1).is_none());
    }

    #[test]
    fn pull_count_ignores_end_of_sequence() {
        let mut cursor = Cursor::Pending(vec![7, 8]);
        let mut guard = cursor.take("test", 1).unwrap();
        while guard.pull().is_some() {}
        assert_eq!(guard.pull(), None);
        assert_eq!(guard.pulled, 2);
    }
}
