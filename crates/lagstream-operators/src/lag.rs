//! The lag operator.
//!
//! `lag(source, offset, selector)` pairs every source element with the one
//! `offset` positions before it and maps each pair through `selector`. The
//! first `offset` elements have no real predecessor and are paired with a
//! default lag value instead.
//!
//! Construction validates its arguments immediately and does nothing else.
//! The source is opened on the first pull of the returned iterator, pulled
//! one element per output, and released as soon as the traversal ends.
//!
//! ```
//! use lagstream_operators::lag;
//!
//! let pairs: Vec<_> = lag(vec![1, 2, 3, 4, 5], 2, |cur, lag| (cur, lag))
//!     .unwrap()
//!     .into_iter()
//!     .collect();
//! assert_eq!(pairs, vec![(1, 0), (2, 0), (3, 1), (4, 2), (5, 3)]);
//! ```

use std::fmt;
use std::iter::FusedIterator;

use lagstream_core::prelude::*;

use crate::cursor::{Cursor, Phase};
use crate::metrics;
use crate::plan::Footprint;
use crate::traits::SequenceOperator;
use crate::window::LagWindow;

pub(crate) const OP_NAME: &str = "lag";

/// A validated lag construction.
///
/// Holds no traversal state: every call to [`Lag::iter`] starts from a fresh
/// source cursor and an empty window.
pub struct Lag<S: IntoIterator, F> {
    source: S,
    offset: usize,
    default_lag: S::Item,
    selector: F,
    config: LagConfig,
}

/// Lag with `T::default()` as the partner of the first `offset` elements.
///
/// Fails with `OutOfRange` if `offset <= 0`.
pub fn lag<S, F, R>(source: S, offset: i64, selector: F) -> Result<Lag<S, F>>
where
    S: IntoIterator,
    S::Item: Clone + Default,
    F: FnMut(S::Item, S::Item) -> R,
{
    lag_with_default(source, offset, S::Item::default(), selector)
}

/// Lag with an explicit partner for the first `offset` elements.
pub fn lag_with_default<S, F, R>(
    source: S,
    offset: i64,
    default_lag: S::Item,
    selector: F,
) -> Result<Lag<S, F>>
where
    S: IntoIterator,
    S::Item: Clone,
    F: FnMut(S::Item, S::Item) -> R,
{
    Lag::from_parts(source, offset, default_lag, selector, LagConfig::default())
}

impl<S: IntoIterator, F> Lag<S, F> {
    pub fn builder() -> LagBuilder<S, F> {
        LagBuilder::new()
    }

    fn from_parts(
        source: S,
        offset: i64,
        default_lag: S::Item,
        selector: F,
        config: LagConfig,
    ) -> Result<Self> {
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

    pub fn default_lag(&self) -> &S::Item {
        &self.default_lag
    }

    pub fn config(&self) -> &LagConfig {
        &self.config
    }

    /// Start a new traversal over a clone of the source.
    ///
    /// The selector is cloned too, so state it captures by value starts over
    /// with every traversal.
    pub fn iter<R>(&self) -> LagIter<S, F>
    where
        S: Clone,
        S::Item: Clone,
        F: FnMut(S::Item, S::Item) -> R + Clone,
    {
        LagIter::new(
            self.source.clone(),
            self.offset,
            self.default_lag.clone(),
            self.selector.clone(),
            &self.config,
        )
    }
}

impl<S, F, R> IntoIterator for Lag<S, F>
where
    S: IntoIterator,
    S::Item: Clone,
    F: FnMut(S::Item, S::Item) -> R,
{
    type Item = R;
    type IntoIter = LagIter<S, F>;

    fn into_iter(self) -> Self::IntoIter {
        LagIter::new(
            self.source,
            self.offset,
            self.default_lag,
            self.selector,
            &self.config,
        )
    }
}

impl<S, F, R> IntoIterator for &Lag<S, F>
where
    S: IntoIterator + Clone,
    S::Item: Clone,
    F: FnMut(S::Item, S::Item) -> R + Clone,
{
    type Item = R;
    type IntoIter = LagIter<S, F>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<S: IntoIterator, F> SequenceOperator for Lag<S, F> {
    fn name(&self) -> &'static str {
        OP_NAME
    }

    fn footprint(&self) -> Footprint {
        Footprint::window_of::<S::Item>(self.offset)
    }
}

impl<S: IntoIterator, F> fmt::Debug for Lag<S, F>
where
    S::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lag")
            .field("offset", &self.offset)
            .field("default_lag", &self.default_lag)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Step-by-step construction of a [`Lag`].
///
/// Unlike the free functions, every argument here may be left out; `build`
/// reports a missing source, selector or offset as `InvalidArgument`.
pub struct LagBuilder<S: IntoIterator, F> {
    source: Option<S>,
    offset: Option<i64>,
    default_lag: Option<S::Item>,
    selector: Option<F>,
    config: LagConfig,
}

impl<S: IntoIterator, F> Default for LagBuilder<S, F> {
    fn default() -> Self {
        Self {
            source: None,
            offset: None,
            default_lag: None,
            selector: None,
            config: LagConfig::default(),
        }
    }
}

impl<S: IntoIterator, F> LagBuilder<S, F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(mut self, source: S) -> Self {
        self.source = Some(source);
        self
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn default_lag(mut self, default_lag: S::Item) -> Self {
        self.default_lag = Some(default_lag);
        self
    }

    pub fn selector<R>(mut self, selector: F) -> Self
    where
        F: FnMut(S::Item, S::Item) -> R,
    {
        self.selector = Some(selector);
        self
    }

    pub fn config(mut self, config: LagConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate in order: source, selector, offset. Without an explicit
    /// default lag value, `S::Item::default()` is used.
    pub fn build(self) -> Result<Lag<S, F>>
    where
        S::Item: Default,
    {
        let source = self.source.ok_or_else(|| Error::missing("source"))?;
        let selector = self.selector.ok_or_else(|| Error::missing("selector"))?;
        let offset = self.offset.ok_or_else(|| Error::missing("offset"))?;
        let default_lag = self.default_lag.unwrap_or_default();
        Lag::from_parts(source, offset, default_lag, selector, self.config)
    }
}

/// One traversal of a lag construction.
///
/// Yields exactly one output per source element, pulling the source only
/// when an output is requested.
pub struct LagIter<S: IntoIterator, F> {
    cursor: Cursor<S>,
    window: LagWindow<S::Item>,
    default_lag: S::Item,
    selector: F,
    offset: usize,
    preallocate: bool,
}

impl<S: IntoIterator, F> LagIter<S, F> {
    pub(crate) fn new(
        source: S,
        offset: usize,
        default_lag: S::Item,
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

    /// Number of buffered elements: `min(pulled so far, offset)` while the
    /// traversal runs, 0 once it is exhausted.
    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    /// Buffered elements, oldest first.
    pub fn window(&self) -> impl Iterator<Item = &S::Item> + '_ {
        self.window.iter()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl<S, F, R> Iterator for LagIter<S, F>
where
    S: IntoIterator,
    S::Item: Clone,
    F: FnMut(S::Item, S::Item) -> R,
{
    type Item = R;

    fn next(&mut self) -> Option<R> {
        if self.preallocate && self.cursor.is_pending() {
            self.window.reserve_all();
        }
        let Some(mut guard) = self.cursor.take(OP_NAME, self.offset) else {
            self.window.clear();
            return None;
        };
        // Exhaustion drops the guard here and leaves the cursor closed.
        let Some(current) = guard.pull() else {
            self.window.clear();
            return None;
        };

        let was_filling = !self.window.is_full();
        let lagged = self.window.advance(&current, &self.default_lag);
        if was_filling && self.window.is_full() {
            metrics::steady_entered(OP_NAME, self.offset);
        }

        // The guard stays out of `self` while the selector runs so a panic
        // releases the cursor on the way out.
        let output = (self.selector)(current, lagged);
        self.cursor.restore(guard);
        Some(output)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cursor.size_hint()
    }
}

impl<S, F, R> FusedIterator for LagIter<S, F>
where
    S: IntoIterator,
    S::Item: Clone,
    F: FnMut(S::Item, S::Item) -> R,
{
}

impl<S: IntoIterator, F> fmt::Debug for LagIter<S, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LagIter")
            .field("phase", &self.phase())
            .field("offset", &self.offset)
            .field("window_len", &self.window.len())
            .finish_non_exhaustive()
    }
}
