//! Graph and stream data model.
//!
//! Nodes, undirected capacity-carrying links with auto-assigned ports,
//! unweighted shortest-path routing, stream descriptors with token-bucket
//! arrival curves, and the per-hop guarantee table feeding the
//! accumulated-latency bookkeeping.

mod id;
mod link;
mod node;
mod stream;
mod topology;

pub use id::{Port, Priority, StreamId};
pub use link::{Link, canonical_name, directed_name, split_directed_name};
pub use node::{LINK_NAME_SEPARATOR, Node, NodeKind};
pub use stream::Stream;
pub use topology::{GuaranteeTable, Topology};
