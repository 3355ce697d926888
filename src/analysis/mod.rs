//! Latency-bound engine.
//!
//! Two pure query functions over a topology snapshot: the worst-case
//! queuing-delay bound at a directed link for a priority class under strict
//! priority (SP) and under per-flow asynchronous traffic shaping (ATS). Both
//! return integral ceiling-rounded nanoseconds, and both return
//! [`Delay::ZERO`] when no registered stream on the link carries the queried
//! priority.

mod ats;
mod delay;
mod frame;
mod sp;

pub use ats::{latency_bound_ats, latency_bound_ats_with};
pub use delay::Delay;
pub use frame::{BoundPolicy, INTER_PACKET_GAP_BITS, MAX_BE_FRAME_BITS, PREAMBLE_BITS};
pub use sp::{latency_bound_sp, latency_bound_sp_with};
