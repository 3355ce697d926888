//! Link types.
//!
//! An undirected link joins two distinct nodes and is canonicalized by
//! sorting the endpoint names, so the same pair always yields one
//! identifier. The directed names `"A-B"` and `"B-A"` resolve to the same
//! link and capacity but index independent stream sets in the topology.

use serde::Serialize;

use super::id::Port;
use super::node::LINK_NAME_SEPARATOR;
use crate::error::{Error, Result};

/// An undirected link with its capacity and the egress port assigned to
/// each endpoint at attach time.
#[derive(Debug, Serialize)]
pub struct Link {
    /// Endpoint names in canonical (sorted) order.
    nodes: [String; 2],
    /// Ports aligned with `nodes`.
    ports: [Port; 2],
    /// Canonical undirected identifier, `"<nodes[0]>-<nodes[1]>"`.
    name: String,
    /// Capacity in bits per second.
    bandwidth_bps: u64,
}

impl Link {
    pub(crate) fn new(a: &str, b: &str, ports: [Port; 2], bandwidth_bps: u64) -> Self {
        debug_assert!(a < b, "endpoints must arrive in canonical order");
        Self {
            nodes: [a.to_string(), b.to_string()],
            ports,
            name: directed_name(a, b),
            bandwidth_bps,
        }
    }

    /// Canonical undirected identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Endpoint names in canonical order.
    pub fn nodes(&self) -> [&str; 2] {
        [&self.nodes[0], &self.nodes[1]]
    }

    /// Capacity in bits per second.
    pub fn bandwidth_bps(&self) -> u64 {
        self.bandwidth_bps
    }

    /// Capacity in bits per nanosecond (equivalently Gbit/s), the unit all
    /// latency arithmetic is carried out in.
    pub fn bits_per_ns(&self) -> f64 {
        self.bandwidth_bps as f64 / 1e9
    }

    /// The endpoint opposite to `name`.
    pub fn other_end(&self, name: &str) -> &str {
        if self.nodes[0] == name {
            &self.nodes[1]
        } else {
            &self.nodes[0]
        }
    }

    /// The port this link occupies on endpoint `name`.
    pub fn port_of(&self, name: &str) -> Result<Port> {
        if self.nodes[0] == name {
            Ok(self.ports[0])
        } else if self.nodes[1] == name {
            Ok(self.ports[1])
        } else {
            Err(Error::InvalidTopologyConstruction(format!(
                "node '{name}' is not an endpoint of link '{}'",
                self.name
            )))
        }
    }
}

impl PartialEq for Link {
    /// Identity is the canonical name.
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Link {}

/// Joins two node names into a directed-link identifier.
pub fn directed_name(from: &str, to: &str) -> String {
    format!("{from}{LINK_NAME_SEPARATOR}{to}")
}

/// Splits a directed-link identifier back into its endpoints. Fails when the
/// string is not exactly two non-empty names joined by the separator.
pub fn split_directed_name(name: &str) -> Result<(&str, &str)> {
    match name.split_once(LINK_NAME_SEPARATOR) {
        Some((from, to))
            if !from.is_empty() && !to.is_empty() && !to.contains(LINK_NAME_SEPARATOR) =>
        {
            Ok((from, to))
        }
        _ => Err(Error::UnknownDirectedLink(name.to_string())),
    }
}

/// Canonical undirected identifier for a node pair, independent of order.
pub fn canonical_name(a: &str, b: &str) -> String {
    if a <= b {
        directed_name(a, b)
    } else {
        directed_name(b, a)
    }
}
