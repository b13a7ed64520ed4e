//! Tracing hooks for traversal lifecycle events.
//!
//! Compiled to no-ops unless the `tracing` feature is enabled.

#[cfg(feature = "tracing")]
pub fn cursor_acquired(op: &'static str, offset: usize) {
    tracing::trace!(op, offset, "source cursor acquired");
}

#[cfg(not(feature = "tracing"))]
pub fn cursor_acquired(_op: &'static str, _offset: usize) { /* no-op */
}

#[cfg(feature = "tracing")]
pub fn steady_entered(op: &'static str, offset: usize) {
    tracing::trace!(op, offset, "lag window full; entering steady phase");
}

#[cfg(not(feature = "tracing"))]
pub fn steady_entered(_op: &'static str, _offset: usize) { /* no-op */
}

#[cfg(feature = "tracing")]
pub fn cursor_released(op: &'static str, pulled: usize) {
    tracing::trace!(op, pulled, "source cursor released");
}

#[cfg(not(feature = "tracing"))]
pub fn cursor_released(_op: &'static str, _pulled: usize) { /* no-op */
}
