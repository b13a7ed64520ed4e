//! Operator planning surface: a coarse memory `Footprint`.

use serde::{Deserialize, Serialize};

/// Auxiliary memory held by one traversal of an operator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footprint {
    /// Elements the window holds once full.
    pub window_slots: usize,
    /// In-memory size of one buffered element.
    pub bytes_per_slot: usize,
}

impl Footprint {
    /// Footprint of a window of `slots` elements of type `T`.
    pub fn window_of<T>(slots: usize) -> Self {
        Self {
            window_slots: slots,
            bytes_per_slot: std::mem::size_of::<T>(),
        }
    }

    /// Estimated live bytes once the window is full. Heap data owned by the
    /// elements themselves is not counted.
    pub fn estimate_live_bytes(&self) -> usize {
        self.window_slots.saturating_mul(self.bytes_per_slot)
    }
}
