//! Lag over fallible sources.
//!
//! The source yields `Result<T, E>` and the selector returns `Result<R, E>`.
//! The first `Err` from either side is handed to the consumer unchanged,
//! after the source cursor has been released; the traversal is over from
//! then on and every later pull yields `None`.

use std::fmt;
use std::iter::FusedIterator;

use lagstream_core::LagConfig;

use crate::cursor::{Cursor, Phase};
use crate::metrics;
use crate::plan::Footprint;
use crate::traits::SequenceOperator;
use crate::window::LagWindow;

const OP_NAME: &str = "try_lag";

/// A validated lag construction over a fallible source.
pub struct TryLag<S, T, F> {
    source: S,
    offset: usize,
    default_lag: T,
    selector: F,
    config: LagConfig,
}

pub fn try_lag<S, T, E, F, R>(
    source: S,
    offset: i64,
    selector: F,
) -> lagstream_core::Result<TryLag<S, T, F>>
where
    S: IntoIterator<Item = Result<T, E>>,
    T: Clone + Default,
    F: FnMut(T, T) -> Result<R, E>,
{
    try_lag_with_default(source, offset, T::default(), selector)
}

pub fn try_lag_with_default<S, T, E, F, R>(
    source: S,
    offset: i64,
    default_lag: T,
    selector: F,
) -> lagstream_core::Result<TryLag<S, T, F>>
where
    S: IntoIterator<Item = Result<T, E>>,
    T: Clone,
    F: FnMut(T, T) -> Result<R, E>,
{
    TryLag::with_config(source, offset, default_lag, selector, LagConfig::default())
}

impl<S, T, F> TryLag<S, T, F> {
    pub fn with_config(
        source: S,
        offset: i64,
        default_lag: T,
        selector: F,
        config: LagConfig,
    ) -> lagstream_core::Result<Self> {
        let offset = config.check_offset(offset)?;
        Ok(Self {
            source,
            offset,
            default_lag,
            selector,
            config,
        })
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn default_lag(&self) -> &T {
        &self.default_lag
    }

    /// Start a new traversal over clones of the source and the selector.
    pub fn iter<E, R>(&self) -> TryLagIter<S, T, F>
    where
        S: IntoIterator<Item = Result<T, E>> + Clone,
        T: Clone,
        F: FnMut(T, T) -> Result<R, E> + Clone,
    {
        TryLagIter::new(
            self.source.clone(),
            self.offset,
            self.default_lag.clone(),
            self.selector.clone(),
            &self.config,
        )
    }
}

impl<S, T, E, F, R> IntoIterator for TryLag<S, T, F>
where
    S: IntoIterator<Item = Result<T, E>>,
    T: Clone,
    F: FnMut(T, T) -> Result<R, E>,
{
    type Item = Result<R, E>;
    type IntoIter = TryLagIter<S, T, F>;

    fn into_iter(self) -> Self::IntoIter {
        TryLagIter::new(
            self.source,
            self.offset,
            self.default_lag,
            self.selector,
            &self.config,
        )
    }
}

impl<S, T, F> SequenceOperator for TryLag<S, T, F> {
    fn name(&self) -> &'static str {
        OP_NAME
    }

    fn footprint(&self) -> Footprint {
        Footprint::window_of::<T>(self.offset)
    }
}

impl<S, T: fmt::Debug, F> fmt::Debug for TryLag<S, T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryLag")
            .field("offset", &self.offset)
            .field("default_lag", &self.default_lag)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// One traversal of a [`TryLag`].
pub struct TryLagIter<S: IntoIterator, T, F> {
    cursor: Cursor<S>,
    window: LagWindow<T>,
    default_lag: T,
    selector: F,
    offset: usize,
    preallocate: bool,
}

impl<S: IntoIterator, T, F> TryLagIter<S, T, F> {
    pub(crate) fn new(
        source: S,
        offset: usize,
        default_lag: T,
        selector: F,
        config: &LagConfig,
    ) -> Self {
        Self {
            cursor: Cursor::Pending(source),
            window: LagWindow::new(offset),
            default_lag,
            selector,
            offset,
            preallocate: config.preallocate_window,
        }
    }

    pub fn phase(&self) -> Phase {
        self.cursor.phase(self.window.is_full())
    }

    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    /// Buffered elements, oldest first.
    pub fn window(&self) -> impl Iterator<Item = &T> + '_ {
        self.window.iter()
    }
}

impl<S, T, E, F, R> Iterator for TryLagIter<S, T, F>
where
    S: IntoIterator<Item = Result<T, E>>,
    T: Clone,
    F: FnMut(T, T) -> Result<R, E>,
{
    type Item = Result<R, E>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.preallocate && self.cursor.is_pending() {
            self.window.reserve_all();
        }
        let Some(mut guard) = self.cursor.take(OP_NAME, self.offset) else {
            self.window.clear();
            return None;
        };
        let current = match guard.pull() {
            Some(Ok(value)) => value,
            Some(Err(e)) => {
                drop(guard);
                self.window.clear();
                return Some(Err(e));
            }
            None => {
                self.window.clear();
                return None;
            }
        };

        let was_filling = !self.window.is_full();
        let lagged = self.window.advance(&current, &self.default_lag);
        if was_filling && self.window.is_full() {
            metrics::steady_entered(OP_NAME, self.offset);
        }

        match (self.selector)(current, lagged) {
            Ok(output) => {
                self.cursor.restore(guard);
                Some(Ok(output))
            }
            Err(e) => {
                drop(guard);
                self.window.clear();
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // An error may end the traversal early.
        let (_, upper) = self.cursor.size_hint();
        (0, upper)
    }
}

impl<S, T, E, F, R> FusedIterator for TryLagIter<S, T, F>
where
    S: IntoIterator<Item = Result<T, E>>,
    T: Clone,
    F: FnMut(T, T) -> Result<R, E>,
{
}

impl<S: IntoIterator, T, F> fmt::Debug for TryLagIter<S, T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryLagIter")
            .field("phase", &self.phase())
            .field("offset", &self.offset)
            .field("window_len", &self.window.len())
            .finish_non_exhaustive()
    }
}
