//! Method-call syntax for the lag operators on any iterator.

use crate::lag::{lag, lag_with_default, LagIter};
use crate::try_lag::{try_lag, TryLagIter};

/// Adds `lag_by` and friends to every [`Iterator`].
///
/// The offset is validated when the method is called, before anything is
/// pulled from `self`.
///
/// ```
/// use lagstream_operators::LagIteratorExt;
///
/// let deltas: Vec<i64> = [3, 5, 9, 10]
///     .into_iter()
///     .lag_by(1, |cur, prev| cur - prev)
///     .unwrap()
///     .skip(1)
///     .collect();
/// assert_eq!(deltas, vec![2, 4, 1]);
/// ```
pub trait LagIteratorExt: Iterator + Sized {
    fn lag_by<F, R>(self, offset: i64, selector: F) -> lagstream_core::Result<LagIter<Self, F>>
    where
        Self::Item: Clone + Default,
        F: FnMut(Self::Item, Self::Item) -> R,
    {
        Ok(lag(self, offset, selector)?.into_iter())
    }

    fn lag_by_or<F, R>(
        self,
        offset: i64,
        default_lag: Self::Item,
        selector: F,
    ) -> lagstream_core::Result<LagIter<Self, F>>
    where
        Self::Item: Clone,
        F: FnMut(Self::Item, Self::Item) -> R,
    {
        Ok(lag_with_default(self, offset, default_lag, selector)?.into_iter())
    }

    fn try_lag_by<T, E, F, R>(
        self,
        offset: i64,
        selector: F,
    ) -> lagstream_core::Result<TryLagIter<Self, T, F>>
    where
        Self: Iterator<Item = Result<T, E>>,
        T: Clone + Default,
        F: FnMut(T, T) -> Result<R, E>,
    {
        Ok(try_lag(self, offset, selector)?.into_iter())
    }
}

impl<I: Iterator> LagIteratorExt for I {}
