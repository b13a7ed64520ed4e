//! Convenient re-exports for downstream crates.

pub use crate::config::LagConfig;
pub use crate::error::{Error, ErrorKind, Result};
