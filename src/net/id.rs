//! Identifier types.

use serde::Serialize;

/// Stream identifier, assigned by the owning topology at registration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct StreamId(pub u64);

/// Egress port number on a node, assigned when a link is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Port(pub u32);

/// Traffic-class priority. Numerically greater means higher priority and is
/// served preferentially.
pub type Priority = u8;
