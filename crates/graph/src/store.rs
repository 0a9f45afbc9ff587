//! # Graph Store
//!
//! Canonical, ordered node and edge collections for one editing session.
//!
//! Every mutation takes `&mut self` and completes before returning, so no
//! caller can observe an edge whose endpoint has already been removed.

use std::collections::HashSet;

use mindmap_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{
    ConnectorShape, Edge, EdgeId, LineMode, Node, NodeDataPatch, NodeId, Position,
    UnknownFieldPolicy,
};

/// Store behaviour switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Policy for unrecognised keys in JSON node data patches.
    #[serde(default)]
    pub unknown_fields: UnknownFieldPolicy,
}

/// Counts returned by [`GraphStore::remove_nodes`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Removal {
    pub nodes: usize,
    pub edges: usize,
}

/// Owns the authoritative node and edge sequences.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    config: StoreConfig,
}

impl GraphStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with explicit configuration.
    #[must_use]
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub const fn config(&self) -> StoreConfig {
        self.config
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Look up a node by id.
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.node(id).is_some()
    }

    /// The first node in insertion order (the session root unless deleted).
    pub fn first_node(&self) -> Option<&Node> {
        self.nodes.first()
    }

    pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id() == id)
    }

    /// True if an edge already runs `source -> target`.
    pub fn has_edge_between(&self, source: &NodeId, target: &NodeId) -> bool {
        self.edges.iter().any(|e| e.connects(source, target))
    }

    /// Number of edges whose target is `id`.
    pub fn in_degree(&self, id: &NodeId) -> usize {
        self.edges.iter().filter(|e| e.target() == id).count()
    }

    /// Append a node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateNode`] if the id is already taken.
    pub fn add_node(&mut self, node: Node) -> Result<()> {
        if self.contains(node.id()) {
            return Err(Error::duplicate_node(node.id().as_str()));
        }
        debug!(node_id = %node.id(), label = node.label(), "Adding node");
        self.nodes.push(node);
        Ok(())
    }

    /// Append an edge whose endpoints are both present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DanglingEdge`] when an endpoint is missing,
    /// [`Error::DuplicateEdge`] when the pair is already linked or the id is
    /// taken, and
    /// [`Error::InvalidRecord`] for a self-referencing edge.
    pub fn add_edge(&mut self, edge: Edge) -> Result<()> {
        if edge.source() == edge.target() {
            return Err(Error::invalid_record(format!(
                "edge '{}' connects a node to itself",
                edge.id()
            )));
        }
        for endpoint in [edge.source(), edge.target()] {
            if !self.contains(endpoint) {
                return Err(Error::dangling_edge(edge.id().as_str(), endpoint.as_str()));
            }
        }
        if self.has_edge_between(edge.source(), edge.target()) || self.edge(edge.id()).is_some() {
            return Err(Error::duplicate_edge(edge.id().as_str()));
        }
        debug!(edge_id = %edge.id(), source = %edge.source(), target = %edge.target(), "Adding edge");
        self.edges.push(edge);
        Ok(())
    }

    /// Merge `patch` into a node's data by replacing the stored record.
    ///
    /// Returns `false` when no node has the id.
    pub fn update_node_data(&mut self, id: &NodeId, patch: &NodeDataPatch) -> bool {
        let Some(slot) = self.nodes.iter_mut().find(|n| n.id() == id) else {
            debug!(node_id = %id, "Ignoring update for unknown node");
            return false;
        };
        let updated = slot.with_data(patch.apply(slot.data()));
        *slot = updated;
        debug!(node_id = %id, "Updated node data");
        true
    }

    /// Apply a JSON patch, honouring the configured unknown-field policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the patch cannot be parsed under the policy.
    pub fn update_node_data_json(&mut self, id: &NodeId, patch: &serde_json::Value) -> Result<bool> {
        let patch = NodeDataPatch::from_json(patch, self.config.unknown_fields)?;
        Ok(self.update_node_data(id, &patch))
    }

    /// Record a renderer-driven move. Returns `false` for unknown nodes.
    pub fn move_node(&mut self, id: &NodeId, position: Position) -> bool {
        match self.nodes.iter_mut().find(|n| n.id() == id) {
            Some(slot) => {
                *slot = slot.with_position(position);
                true
            }
            None => false,
        }
    }

    /// Remove every node in `ids` together with each edge touching one of them.
    pub fn remove_nodes(&mut self, ids: &HashSet<NodeId>) -> Removal {
        let nodes_before = self.nodes.len();
        let edges_before = self.edges.len();

        self.nodes.retain(|n| !ids.contains(n.id()));
        self.edges
            .retain(|e| !ids.contains(e.source()) && !ids.contains(e.target()));

        let removal = Removal {
            nodes: nodes_before.saturating_sub(self.nodes.len()),
            edges: edges_before.saturating_sub(self.edges.len()),
        };
        debug!(nodes = removal.nodes, edges = removal.edges, "Removed nodes");
        removal
    }

    /// `ids` plus every node left without a surviving parent once they are gone.
    ///
    /// A node is pulled in when it has at least one incoming edge and all of
    /// its incoming edges originate inside the growing set. Nodes with no
    /// incoming edges are never pulled in.
    pub fn with_orphaned_descendants(&self, ids: &HashSet<NodeId>) -> HashSet<NodeId> {
        let mut doomed = ids.clone();
        loop {
            let newly_orphaned: Vec<NodeId> = self
                .nodes
                .iter()
                .map(Node::id)
                .filter(|id| !doomed.contains(*id))
                .filter(|id| {
                    let mut parents = self
                        .edges
                        .iter()
                        .filter(|e| e.target() == *id)
                        .map(Edge::source)
                        .peekable();
                    parents.peek().is_some() && parents.all(|p| doomed.contains(p))
                })
                .cloned()
                .collect();

            if newly_orphaned.is_empty() {
                return doomed;
            }
            doomed.extend(newly_orphaned);
        }
    }

    /// Set the connector shape of every edge.
    pub fn reapply_edge_style(&mut self, style: ConnectorShape) {
        for edge in &mut self.edges {
            edge.set_style(style);
        }
        debug!(style = %style, edges = self.edges.len(), "Reapplied edge style");
    }

    /// Set the animation flag and dash hint of every edge.
    pub fn reapply_line_mode(&mut self, mode: LineMode) {
        for edge in &mut self.edges {
            edge.set_line_mode(mode);
        }
        debug!(mode = %mode, edges = self.edges.len(), "Reapplied line mode");
    }
}
