//! Crate-wide error type.
//!
//! Latency bounds are safety-relevant, so every failure surfaces to the
//! caller as a typed variant; nothing is retried, defaulted, or approximated.

use thiserror::Error;

use crate::net::{Priority, StreamId};

#[derive(Debug, Error)]
pub enum Error {
    /// Malformed node name, self-link, duplicate node/link, or an endpoint
    /// that was never registered. The topology is never left partially built.
    #[error("invalid topology construction: {0}")]
    InvalidTopologyConstruction(String),

    /// A node-name lookup that does not resolve.
    #[error("unknown node '{0}'")]
    UnknownNode(String),

    /// Shortest-path query between disconnected nodes.
    #[error("no path from '{src}' to '{dst}'")]
    NoPathFound { src: String, dst: String },

    /// A directed-link name that does not parse into two registered
    /// endpoints joined by a registered link.
    #[error("unknown directed link '{0}'")]
    UnknownDirectedLink(String),

    /// Removal of a stream id that is not registered.
    #[error("unknown stream {0:?}")]
    UnknownStream(StreamId),

    /// A stream descriptor that cannot be analyzed (path shorter than two
    /// nodes, or a zero token-bucket rate).
    #[error("invalid stream: {0}")]
    InvalidStream(String),

    /// A query that needs per-hop guarantees while no table is set.
    /// Accumulated latencies are "not computable" in this state, never zero.
    #[error("per-hop guarantee table is not set")]
    GuaranteesNotSet,

    /// A set guarantee table that lacks a required (link, priority) entry.
    #[error("no per-hop guarantee for priority {priority} on link '{link}'")]
    MissingGuarantee { link: String, priority: Priority },

    /// ATS remaining capacity is zero or negative: the configuration is
    /// unschedulable. Distinct from the zero-load sentinel by design.
    #[error("link '{link}' is oversubscribed for priority {priority}")]
    Oversubscribed { link: String, priority: Priority },
}

pub type Result<T> = std::result::Result<T, Error>;
