//! Topology graph.
//!
//! Owns the nodes, links, and registered streams, the index of which
//! streams traverse which directed link, and the per-hop guarantee table.
//! Whenever the guarantee table changes, every registered stream's
//! accumulated-latency maps are recomputed before the mutator returns, so a
//! bound query never observes stale bookkeeping.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use tracing::{debug, trace};

use super::id::{Priority, StreamId};
use super::link::{Link, canonical_name, split_directed_name};
use super::node::Node;
use super::stream::Stream;
use crate::error::{Error, Result};

/// Per-hop guarantee table: directed-link name -> priority -> additional
/// deterministic delay (ns) that class experiences crossing the hop.
pub type GuaranteeTable = BTreeMap<String, BTreeMap<Priority, f64>>;

#[derive(Debug, Default)]
pub struct Topology {
    /// Nodes keyed by name.
    nodes: BTreeMap<String, Node>,
    /// Links keyed by canonical undirected name.
    links: BTreeMap<String, Link>,
    /// Registered streams keyed by id.
    streams: BTreeMap<StreamId, Stream>,
    /// Directed-link name -> streams traversing it in that direction.
    streams_per_link: BTreeMap<String, BTreeSet<StreamId>>,
    /// Set only through `update_guarantees`, which recomputes all
    /// accumulated-latency maps in the same logical unit.
    per_hop_guarantees: Option<GuaranteeTable>,
    next_stream_id: u64,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a node. Duplicate names are rejected: ownership maps are
    /// keyed by name, so a second registration would replace a node that
    /// links already reference.
    pub fn add_node(&mut self, node: Node) -> Result<()> {
        if self.nodes.contains_key(node.name()) {
            return Err(Error::InvalidTopologyConstruction(format!(
                "node '{}' is already registered",
                node.name()
            )));
        }
        debug!(node = node.name(), kind = ?node.kind(), "add node");
        self.nodes.insert(node.name().to_string(), node);
        Ok(())
    }

    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    /// Creates the undirected link between two registered nodes, assigns one
    /// fresh port per endpoint, and registers bidirectional adjacency.
    /// Fails on a self-link, an unregistered endpoint, or a pair that is
    /// already linked (re-linking would burn further ports).
    pub fn add_link(&mut self, a: &str, b: &str, bandwidth_bps: u64) -> Result<&Link> {
        if a == b {
            return Err(Error::InvalidTopologyConstruction(format!(
                "self-link on node '{a}'"
            )));
        }
        for endpoint in [a, b] {
            if !self.nodes.contains_key(endpoint) {
                return Err(Error::InvalidTopologyConstruction(format!(
                    "link endpoint '{endpoint}' is not a registered node"
                )));
            }
        }
        let name = canonical_name(a, b);
        if self.links.contains_key(&name) {
            return Err(Error::InvalidTopologyConstruction(format!(
                "link '{name}' already exists"
            )));
        }
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

        // Ports are assigned in canonical endpoint order, one per endpoint.
        let lo_port = self.nodes.get_mut(lo).expect("endpoint checked").next_port();
        let hi_port = self.nodes.get_mut(hi).expect("endpoint checked").next_port();
        let link = Link::new(lo, hi, [lo_port, hi_port], bandwidth_bps);

        self.nodes
            .get_mut(lo)
            .expect("endpoint checked")
            .register_neighbor(hi, &name);
        self.nodes
            .get_mut(hi)
            .expect("endpoint checked")
            .register_neighbor(lo, &name);
        debug!(link = %name, bandwidth_bps, "add link");
        Ok(self.links.entry(name).or_insert(link))
    }

    /// Registers `node` and links it to the already registered `existing`.
    pub fn add_neighbor(&mut self, existing: &str, node: Node, bandwidth_bps: u64) -> Result<()> {
        if !self.nodes.contains_key(existing) {
            return Err(Error::UnknownNode(existing.to_string()));
        }
        let name = node.name().to_string();
        self.add_node(node)?;
        match self.add_link(existing, &name, bandwidth_bps) {
            Ok(_) => Ok(()),
            Err(e) => {
                // Keep "never partially built": drop the node again.
                self.nodes.remove(&name);
                Err(e)
            }
        }
    }

    /// Canonical undirected lookup: the same link regardless of argument order.
    pub fn link_between(&self, a: &str, b: &str) -> Option<&Link> {
        self.links.get(&canonical_name(a, b))
    }

    /// Resolves a directed-link name. Fails with `UnknownDirectedLink` when
    /// the string does not parse into two names joined by the separator or
    /// no registered link joins the endpoints.
    pub fn link_by_directed_name(&self, name: &str) -> Result<&Link> {
        let (from, to) = split_directed_name(name)?;
        self.link_between(from, to)
            .ok_or_else(|| Error::UnknownDirectedLink(name.to_string()))
    }

    /// Both directions of every registered link.
    pub fn directed_link_names(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.links.len() * 2);
        for link in self.links.values() {
            let [a, b] = link.nodes();
            out.push(super::link::directed_name(a, b));
            out.push(super::link::directed_name(b, a));
        }
        out
    }

    /// Unweighted breadth-first search over the undirected adjacency graph,
    /// returning a node-name sequence with the fewest hops.
    ///
    /// Ties between equal-length paths are broken by lexical neighbor order
    /// as an implementation accident; callers must not rely on a canonical
    /// choice among shortest paths.
    pub fn shortest_path(&self, src: &str, dst: &str) -> Result<Vec<String>> {
        for endpoint in [src, dst] {
            if !self.nodes.contains_key(endpoint) {
                return Err(Error::UnknownNode(endpoint.to_string()));
            }
        }

        let mut predecessor: BTreeMap<&str, Option<&str>> = BTreeMap::new();
        predecessor.insert(src, None);
        let mut queue: VecDeque<&str> = VecDeque::new();
        queue.push_back(src);

        while let Some(current) = queue.pop_front() {
            if current == dst {
                let mut path = Vec::new();
                let mut cursor = Some(current);
                while let Some(name) = cursor {
                    path.push(name.to_string());
                    cursor = predecessor[name];
                }
                path.reverse();
                trace!(src, dst, hops = path.len() - 1, "shortest path found");
                return Ok(path);
            }
            let node = &self.nodes[current];
            for (neighbor, _) in node.neighbors() {
                if !predecessor.contains_key(neighbor) {
                    predecessor.insert(neighbor, Some(current));
                    queue.push_back(neighbor);
                }
            }
        }

        Err(Error::NoPathFound {
            src: src.to_string(),
            dst: dst.to_string(),
        })
    }

    /// Registers a detached stream: validates its path against the graph,
    /// assigns the next id, indexes it under every directed link on the
    /// path, and computes its accumulated-latency maps if a guarantee table
    /// is set. Nothing is registered when any step fails.
    pub fn add_stream(&mut self, mut stream: Stream) -> Result<StreamId> {
        let hops = stream.directed_links();
        for hop in &hops {
            self.link_by_directed_name(hop)?;
        }
        if let Some(table) = &self.per_hop_guarantees {
            let (acc_min, acc_max) = self.compute_acc_latencies(&stream, table)?;
            stream.set_acc_latencies(acc_min, acc_max);
        }

        let id = StreamId(self.next_stream_id);
        self.next_stream_id += 1;
        for hop in hops {
            self.streams_per_link.entry(hop).or_default().insert(id);
        }
        debug!(
            stream = stream.label(),
            id = id.0,
            priority = stream.priority(),
            "add stream"
        );
        self.streams.insert(id, stream);
        Ok(id)
    }

    /// Removes a registered stream and un-indexes it from every directed
    /// link on its path. Returns the detached stream.
    pub fn remove_stream(&mut self, id: StreamId) -> Result<Stream> {
        let stream = self.streams.remove(&id).ok_or(Error::UnknownStream(id))?;
        for hop in stream.directed_links() {
            if let Some(ids) = self.streams_per_link.get_mut(&hop) {
                ids.remove(&id);
                if ids.is_empty() {
                    self.streams_per_link.remove(&hop);
                }
            }
        }
        debug!(stream = stream.label(), id = id.0, "remove stream");
        Ok(stream)
    }

    /// Drops every registered stream and the whole directed-link index.
    pub fn remove_all_streams(&mut self) {
        self.streams.clear();
        self.streams_per_link.clear();
    }

    pub fn stream(&self, id: StreamId) -> Option<&Stream> {
        self.streams.get(&id)
    }

    pub fn streams(&self) -> impl Iterator<Item = (StreamId, &Stream)> {
        self.streams.iter().map(|(id, s)| (*id, s))
    }

    /// The streams traversing `link` in that direction. Empty for links with
    /// no registered streams (including unknown names; bound queries resolve
    /// the link first and fail loudly on bad names).
    pub fn streams_on_link(&self, link: &str) -> impl Iterator<Item = &Stream> {
        self.streams_per_link
            .get(link)
            .into_iter()
            .flatten()
            .filter_map(|id| self.streams.get(id))
    }

    pub fn has_guarantees(&self) -> bool {
        self.per_hop_guarantees.is_some()
    }

    /// Read access to one guarantee entry. The table itself is never exposed
    /// mutably; replacing it goes through `update_guarantees`.
    pub fn guarantee(&self, link: &str, priority: Priority) -> Option<f64> {
        self.per_hop_guarantees
            .as_ref()?
            .get(link)?
            .get(&priority)
            .copied()
    }

    /// Replaces the per-hop guarantee table and synchronously recomputes
    /// every registered stream's accumulated-latency maps.
    ///
    /// The update is two-phase: all maps are computed against the new table
    /// before any stream is touched, so a failing update (for example a
    /// `MissingGuarantee`) leaves the previous table and maps intact.
    pub fn update_guarantees(&mut self, table: GuaranteeTable) -> Result<()> {
        let mut recomputed = Vec::with_capacity(self.streams.len());
        for (id, stream) in &self.streams {
            let maps = self.compute_acc_latencies(stream, &table)?;
            recomputed.push((*id, maps));
        }

        self.per_hop_guarantees = Some(table);
        for (id, (acc_min, acc_max)) in recomputed {
            self.streams
                .get_mut(&id)
                .expect("stream ids collected above")
                .set_acc_latencies(acc_min, acc_max);
        }
        debug!(streams = self.streams.len(), "guarantee table updated");
        Ok(())
    }

    /// Broadcasts one per-priority guarantee table to every directed link of
    /// every registered link, then applies it like `update_guarantees`.
    pub fn update_guarantees_all_links(
        &mut self,
        per_priority: BTreeMap<Priority, f64>,
    ) -> Result<()> {
        let table: GuaranteeTable = self
            .directed_link_names()
            .into_iter()
            .map(|name| (name, per_priority.clone()))
            .collect();
        self.update_guarantees(table)
    }

    /// Accumulated-latency maps for one stream under `table`.
    ///
    /// Best case: running sum of `min_frame / capacity` per hop. Worst case:
    /// `max_frame / C1` charged once at entry, then each hop's guarantee
    /// added starting at the *next* hop's entry (forwarding delay is
    /// incurred after the current hop, before reaching the next). A
    /// single-hop path therefore carries no guarantee term at all. The table
    /// must still cover every traversed hop at the stream's priority.
    fn compute_acc_latencies(
        &self,
        stream: &Stream,
        table: &GuaranteeTable,
    ) -> Result<(BTreeMap<String, f64>, BTreeMap<String, f64>)> {
        let hops = stream.directed_links();
        let priority = stream.priority();

        let mut capacities = Vec::with_capacity(hops.len());
        let mut guarantees = Vec::with_capacity(hops.len());
        for hop in &hops {
            capacities.push(self.link_by_directed_name(hop)?.bits_per_ns());
            let guarantee = table
                .get(hop)
                .and_then(|per_priority| per_priority.get(&priority))
                .copied()
                .ok_or_else(|| Error::MissingGuarantee {
                    link: hop.clone(),
                    priority,
                })?;
            guarantees.push(guarantee);
        }

        let mut acc_min = BTreeMap::new();
        let mut acc_max = BTreeMap::new();
        let mut min_sum = 0.0;
        let mut max_sum = stream.max_frame_bits() as f64 / capacities[0];
        for (i, hop) in hops.iter().enumerate() {
            min_sum += stream.min_frame_bits() as f64 / capacities[i];
            if i > 0 {
                max_sum += guarantees[i - 1];
            }
            trace!(
                stream = stream.label(),
                hop = %hop,
                acc_min_ns = min_sum,
                acc_max_ns = max_sum,
                "accumulated latency"
            );
            acc_min.insert(hop.clone(), min_sum);
            acc_max.insert(hop.clone(), max_sum);
        }
        Ok((acc_min, acc_max))
    }
}
