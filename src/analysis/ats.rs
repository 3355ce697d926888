//! Worst-case bound under per-flow Asynchronous Traffic Shaping.
//!
//! With token-bucket reshaping in front of the priority queue, upstream
//! jitter cannot amplify bursts, so the interference a stream of priority
//! `p` sees on a link is bounded by the declared arrival curves alone:
//! every higher- or equal-priority burst once, plus one lower-priority
//! frame already in transmission.

use tracing::debug;

use super::delay::Delay;
use super::frame::BoundPolicy;
use crate::error::{Error, Result};
use crate::net::{Priority, Topology};

/// Worst-case queuing delay (ns) a stream of `priority` can suffer crossing
/// the directed link `link`, with the default policy.
pub fn latency_bound_ats(topology: &Topology, link: &str, priority: Priority) -> Result<Delay> {
    latency_bound_ats_with(topology, link, priority, &BoundPolicy::default())
}

/// Same as [`latency_bound_ats`] with an explicit policy.
pub fn latency_bound_ats_with(
    topology: &Topology,
    link: &str,
    priority: Priority,
    policy: &BoundPolicy,
) -> Result<Delay> {
    let link_rate = topology.link_by_directed_name(link)?.bits_per_ns();

    // Zero-load sentinel: nothing registered at exactly this priority.
    if !topology
        .streams_on_link(link)
        .any(|s| s.priority() == priority)
    {
        return Ok(Delay::ZERO);
    }

    let mut sum_burst: u64 = 0;
    let mut sum_rate_bps: u64 = 0;
    let mut min_equal_frame: Option<u64> = None;
    let mut max_lower_frame: Option<u64> = None;

    for stream in topology.streams_on_link(link) {
        if stream.priority() > priority {
            sum_burst += stream.burst_bits();
            sum_rate_bps += stream.rate_bps();
        } else if stream.priority() == priority {
            sum_burst += stream.burst_bits();
            min_equal_frame = Some(match min_equal_frame {
                Some(cur) => cur.min(stream.min_frame_bits()),
                None => stream.min_frame_bits(),
            });
        } else {
            max_lower_frame = Some(match max_lower_frame {
                Some(cur) => cur.max(stream.max_frame_bits()),
                None => stream.max_frame_bits(),
            });
        }
    }

    // Empty partitions fall back to the best-effort frame bound. The EQUAL
    // case cannot actually be empty past the zero-load check above.
    let min_equal_frame = min_equal_frame.unwrap_or(policy.max_be_frame_bits);
    let max_lower_frame = max_lower_frame.unwrap_or(policy.max_be_frame_bits);

    let refined_burst = sum_burst as f64 - min_equal_frame as f64 + max_lower_frame as f64;
    let remaining_capacity = link_rate - sum_rate_bps as f64 / 1e9;
    if remaining_capacity <= 0.0 {
        // Unschedulable, must never read as a lightly-loaded link.
        return Err(Error::Oversubscribed {
            link: link.to_string(),
            priority,
        });
    }

    let bound = Delay::from_ns_ceil(refined_burst / remaining_capacity + min_equal_frame as f64 / link_rate);
    debug!(
        link,
        priority,
        sum_burst,
        sum_rate_bps,
        refined_burst,
        remaining_capacity,
        bound_ns = bound.as_nanos(),
        "ats bound"
    );
    Ok(bound)
}
