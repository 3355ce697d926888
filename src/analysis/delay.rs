//! Bound result type.

use serde::Serialize;

/// A worst-case queuing delay in integer nanoseconds.
///
/// Bound formulas work in fractional nanoseconds internally and round up on
/// the way out, so a `Delay` is always a safe upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
pub struct Delay(pub u64);

impl Delay {
    /// The zero-load sentinel: no registered stream at the queried priority.
    pub const ZERO: Delay = Delay(0);

    pub fn as_nanos(self) -> u64 {
        self.0
    }

    /// Ceiling-rounds fractional nanoseconds. The cast saturates, so a
    /// degenerate negative intermediate clamps to zero instead of wrapping.
    pub(crate) fn from_ns_ceil(ns: f64) -> Delay {
        Delay(ns.ceil() as u64)
    }
}
