//! Operator trait shared by the lag constructions.
//!
//! Pipelines that assemble several operators use this to label them and to
//! sum up how much memory a traversal will hold before running anything.

use crate::plan::Footprint;

pub trait SequenceOperator {
    /// Human-readable operator name (stable).
    fn name(&self) -> &'static str;

    /// Memory one traversal holds at most.
    fn footprint(&self) -> Footprint;
}
