#![forbid(unsafe_code)]
//! lagstream-core: errors, configuration, and re-exports shared by the
//! lagstream operator crates.
//!
//! Nothing in here pulls from a source. The operators crate owns all
//! iteration state.

pub mod config;
pub mod error;
pub mod prelude;

pub use config::LagConfig;
pub use error::{Error, ErrorKind, Result};
