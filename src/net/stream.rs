//! Stream descriptors.
//!
//! A stream is a real-time flow with a fixed path, a priority, and a
//! token-bucket arrival curve. Once the owning topology has a per-hop
//! guarantee table, the stream additionally carries two maps of accumulated
//! best-case / worst-case latency up to each hop on its path; those maps are
//! derived bookkeeping, recomputed by the topology, never set by hand.

use std::collections::BTreeMap;

use serde::Serialize;

use super::id::Priority;
use super::link::directed_name;
use crate::error::{Error, Result};

/// A flow descriptor plus its accumulated-latency bookkeeping.
///
/// Deliberately not `Clone`: duplicating a stream goes through
/// [`Stream::detached_clone`], which copies the shaping parameters and path
/// but never the accumulated maps.
#[derive(Debug, Serialize)]
pub struct Stream {
    label: String,
    /// Ordered node names, at least two.
    path: Vec<String>,
    priority: Priority,
    /// Token-bucket rate in bits per second.
    rate_bps: u64,
    /// Token-bucket depth in bits, including per-frame overhead.
    burst_bits: u64,
    /// Smallest frame in bits, excluding overhead.
    min_frame_bits: u64,
    /// Largest frame in bits, excluding overhead.
    max_frame_bits: u64,
    /// Directed-link name -> cumulative best-case latency (ns) through that hop.
    acc_min_ns: BTreeMap<String, f64>,
    /// Directed-link name -> cumulative worst-case latency (ns) through that hop.
    acc_max_ns: BTreeMap<String, f64>,
}

impl Stream {
    /// Creates a detached stream. Fails when the path has fewer than two
    /// nodes or the rate is zero (the inter-burst interval would be
    /// undefined).
    pub fn new(
        label: impl Into<String>,
        path: Vec<String>,
        priority: Priority,
        rate_bps: u64,
        burst_bits: u64,
        min_frame_bits: u64,
        max_frame_bits: u64,
    ) -> Result<Self> {
        let label = label.into();
        if path.len() < 2 {
            return Err(Error::InvalidStream(format!(
                "stream '{label}' has a path of {} node(s), need at least 2",
                path.len()
            )));
        }
        if rate_bps == 0 {
            return Err(Error::InvalidStream(format!(
                "stream '{label}' has a zero token-bucket rate"
            )));
        }
        Ok(Self {
            label,
            path,
            priority,
            rate_bps,
            burst_bits,
            min_frame_bits,
            max_frame_bits,
            acc_min_ns: BTreeMap::new(),
            acc_max_ns: BTreeMap::new(),
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn rate_bps(&self) -> u64 {
        self.rate_bps
    }

    pub fn burst_bits(&self) -> u64 {
        self.burst_bits
    }

    pub fn min_frame_bits(&self) -> u64 {
        self.min_frame_bits
    }

    pub fn max_frame_bits(&self) -> u64 {
        self.max_frame_bits
    }

    /// The directed-link names along the path, in traversal order.
    pub fn directed_links(&self) -> Vec<String> {
        self.path
            .windows(2)
            .map(|pair| directed_name(&pair[0], &pair[1]))
            .collect()
    }

    /// Cumulative best-case latency (ns) from the source through `link`, if
    /// a guarantee table has been applied.
    pub fn acc_min_latency(&self, link: &str) -> Option<f64> {
        self.acc_min_ns.get(link).copied()
    }

    /// Cumulative worst-case latency (ns) from the source through `link`, if
    /// a guarantee table has been applied.
    pub fn acc_max_latency(&self, link: &str) -> Option<f64> {
        self.acc_max_ns.get(link).copied()
    }

    /// The full best-case map, keyed by directed-link name. Empty until a
    /// guarantee table is set on the owning topology.
    pub fn acc_min_latencies(&self) -> &BTreeMap<String, f64> {
        &self.acc_min_ns
    }

    /// The full worst-case map, keyed by directed-link name.
    pub fn acc_max_latencies(&self) -> &BTreeMap<String, f64> {
        &self.acc_max_ns
    }

    /// Copies the shaping parameters and path into a fresh detached stream.
    /// The accumulated maps start empty; registering the copy assigns a new
    /// id and recomputes them.
    pub fn detached_clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            path: self.path.clone(),
            priority: self.priority,
            rate_bps: self.rate_bps,
            burst_bits: self.burst_bits,
            min_frame_bits: self.min_frame_bits,
            max_frame_bits: self.max_frame_bits,
            acc_min_ns: BTreeMap::new(),
            acc_max_ns: BTreeMap::new(),
        }
    }

    pub(crate) fn set_acc_latencies(
        &mut self,
        acc_min_ns: BTreeMap<String, f64>,
        acc_max_ns: BTreeMap<String, f64>,
    ) {
        self.acc_min_ns = acc_min_ns;
        self.acc_max_ns = acc_max_ns;
    }
}
