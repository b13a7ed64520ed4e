#![forbid(unsafe_code)]
//! lagstream-operators: the streaming lag operator.
//!
//! Design intent:
//! - Pull-based and synchronous. Nothing is read from a source until the
//!   consumer asks for an output, and one output costs exactly one pull.
//! - Auxiliary memory is a ring buffer of `offset` elements (`window`).
//! - The source cursor is scoped to one traversal (`cursor`) and released
//!   on every exit path.

mod cursor;
pub mod ext;
pub mod lag;
pub mod metrics;
pub mod plan;
pub mod traits;
pub mod try_lag;
pub mod window;

pub use cursor::Phase;
pub use ext::LagIteratorExt;
pub use lag::{lag, lag_with_default, Lag, LagBuilder, LagIter};
pub use plan::Footprint;
pub use traits::SequenceOperator;
pub use try_lag::{try_lag, try_lag_with_default, TryLag, TryLagIter};
pub use window::LagWindow;

pub use lagstream_core::{Error, ErrorKind, LagConfig, Result};
