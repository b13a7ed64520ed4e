#![forbid(unsafe_code)]
//! lagstream: a lazy lag operator for iterator pipelines.
//!
//! Facade over `lagstream-core` (errors, configuration) and
//! `lagstream-operators` (the operator itself).

pub use lagstream_core::{Error, ErrorKind, LagConfig, Result};
pub use lagstream_operators::{
    lag, lag_with_default, try_lag, try_lag_with_default, Footprint, Lag, LagBuilder,
    LagIter, LagIteratorExt, LagWindow, Phase, SequenceOperator, TryLag, TryLagIter,
};
