//! Node types.
//!
//! A node is a switch or a host. Directed-link identifiers are formed by
//! joining two node names with `-` and split back later, so node names may
//! not contain that separator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::id::Port;
use crate::error::{Error, Result};

/// Separator between the two endpoint names of a directed-link identifier.
pub const LINK_NAME_SEPARATOR: char = '-';

/// Node role in the switched network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Switch,
    Host,
}

/// A network node: a name, a role, the undirected adjacency to its
/// neighbors, and a monotonically-increasing port counter.
#[derive(Debug)]
pub struct Node {
    kind: NodeKind,
    name: String,
    /// Neighbor name -> canonical undirected link name.
    neighbors: BTreeMap<String, String>,
    last_port: u32,
}

impl Node {
    /// Creates a detached node. Fails if `name` contains the reserved
    /// link-name separator, which would break identifier round-tripping.
    pub fn new(kind: NodeKind, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.contains(LINK_NAME_SEPARATOR) {
            return Err(Error::InvalidTopologyConstruction(format!(
                "node name '{name}' contains reserved separator '{LINK_NAME_SEPARATOR}'"
            )));
        }
        if name.is_empty() {
            return Err(Error::InvalidTopologyConstruction(
                "node name is empty".to_string(),
            ));
        }
        Ok(Self {
            kind,
            name,
            neighbors: BTreeMap::new(),
            last_port: 0,
        })
    }

    /// Creates a switch node.
    pub fn switch(name: impl Into<String>) -> Result<Self> {
        Self::new(NodeKind::Switch, name)
    }

    /// Creates a host node.
    pub fn host(name: impl Into<String>) -> Result<Self> {
        Self::new(NodeKind::Host, name)
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Neighbor names and the undirected link leading to each, in lexical
    /// neighbor order.
    pub fn neighbors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.neighbors
            .iter()
            .map(|(n, l)| (n.as_str(), l.as_str()))
    }

    pub(crate) fn register_neighbor(&mut self, neighbor: &str, link_name: &str) {
        self.neighbors
            .insert(neighbor.to_string(), link_name.to_string());
    }

    /// Bumps the port counter and returns the freshly assigned port.
    pub(crate) fn next_port(&mut self) -> Port {
        self.last_port += 1;
        Port(self.last_port)
    }
}

impl PartialEq for Node {
    /// Identity is `(kind, name)`; adjacency and port state do not take part.
    fn eq(&self, other: &Self) -> bool {
        (self.kind, &self.name) == (other.kind, &other.name)
    }
}

impl Eq for Node {}
