//! Worst-case bound under pure strict-priority queuing.
//!
//! Without reshaping, upstream jitter widens the window in which a stream's
//! bursts can pile into one hop. The interference each stream contributes
//! is its burst size times how many bursts can physically arrive within a
//! busy-period window derived from that stream's accumulated best/worst-case
//! latency spread at this hop.

use tracing::debug;

use super::delay::Delay;
use super::frame::BoundPolicy;
use crate::error::{Error, Result};
use crate::net::{Priority, Stream, Topology};

/// Worst-case queuing delay (ns) a stream of `priority` can suffer crossing
/// the directed link `link`, with the default policy.
pub fn latency_bound_sp(topology: &Topology, link: &str, priority: Priority) -> Result<Delay> {
    latency_bound_sp_with(topology, link, priority, &BoundPolicy::default())
}

/// Same as [`latency_bound_sp`] with an explicit policy.
pub fn latency_bound_sp_with(
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
    // The windows below are built from accumulated latencies, which are only
    // computable once a guarantee table exists.
    if !topology.has_guarantees() {
        return Err(Error::GuaranteesNotSet);
    }

    let mut sum_bursts = 0.0;
    let mut max_lower_frame: Option<u64> = None;
    for stream in topology.streams_on_link(link) {
        let bursts = max_bursts(topology, link, priority, stream, link_rate)?;
        sum_bursts += bursts as f64 * stream.burst_bits() as f64;
        if stream.priority() < priority {
            max_lower_frame = Some(match max_lower_frame {
                Some(cur) => cur.max(stream.max_frame_bits()),
                None => stream.max_frame_bits(),
            });
        }
    }
    let max_lower_frame = max_lower_frame.unwrap_or(policy.max_be_frame_bits);

    let bound = Delay::from_ns_ceil((sum_bursts + max_lower_frame as f64) / link_rate);
    debug!(
        link,
        priority,
        sum_bursts,
        max_lower_frame,
        bound_ns = bound.as_nanos(),
        "sp bound"
    );
    Ok(bound)
}

/// How many bursts of `stream` can arrive at `link` within the busy-period
/// window relevant to target priority `p`.
///
/// Streams at the target priority get the raw latency-spread window; streams
/// below it get the window extended by the hop's guarantee for `p` (note the
/// guarantee is looked up at the *query* priority, not the stream's); streams
/// above it contribute nothing.
fn max_bursts(
    topology: &Topology,
    link: &str,
    p: Priority,
    stream: &Stream,
    link_rate: f64,
) -> Result<u64> {
    if stream.priority() > p {
        return Ok(0);
    }

    let inter_burst_interval = stream.burst_bits() as f64 / (stream.rate_bps() as f64 / 1e9);
    let hop_min = stream.min_frame_bits() as f64 / link_rate;
    // Registered streams have both maps for every hop they are indexed
    // under whenever a guarantee table is set, which the caller checked.
    let acc_max = stream
        .acc_max_latency(link)
        .expect("accumulated latencies exist for indexed streams");
    let acc_min = stream
        .acc_min_latency(link)
        .expect("accumulated latencies exist for indexed streams");

    let mut window = acc_max - (acc_min - hop_min);
    if stream.priority() < p {
        window += topology
            .guarantee(link, p)
            .ok_or_else(|| Error::MissingGuarantee {
                link: link.to_string(),
                priority: p,
            })?;
    }
    Ok((window / inter_burst_interval).ceil() as u64)
}
