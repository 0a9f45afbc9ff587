//! Session snapshots: the `{ "nodes": [...], "edges": [...] }` document.

use mindmap_core::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{Edge, Node};
use crate::store::{GraphStore, StoreConfig};

/// A full copy of the graph, in store order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Session {
    /// Pretty-printed JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a document produced by [`Session::to_json_pretty`].
    ///
    /// # Errors
    ///
    /// Returns [`mindmap_core::Error::JsonParseFailed`] for malformed input.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl GraphStore {
    /// Snapshot the current graph.
    pub fn export(&self) -> Session {
        Session {
            nodes: self.nodes().to_vec(),
            edges: self.edges().to_vec(),
        }
    }

    /// Rebuild a store from a snapshot.
    ///
    /// Records go through [`GraphStore::add_node`] and [`GraphStore::add_edge`],
    /// so a snapshot with duplicates or dangling edges is rejected whole.
    /// Edge ids are re-derived from their endpoints.
    ///
    /// # Errors
    ///
    /// Returns the first validation error encountered.
    pub fn from_session(session: Session, config: StoreConfig) -> Result<Self> {
        let mut store = Self::with_config(config);
        for node in session.nodes {
            store.add_node(node)?;
        }
        for edge in session.edges {
            store.add_edge(edge.with_derived_id())?;
        }
        debug!(
            nodes = store.len(),
            edges = store.edge_count(),
            "Loaded session"
        );
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;
    use crate::model::{EdgeOptions, NodeData, NodeId, NodeSize, Position};
    use mindmap_core::Error;

    fn id(s: &str) -> NodeId {
        NodeId::new(s).unwrap()
    }

    fn sample() -> GraphStore {
        let mut store = GraphStore::new();
        store
            .add_node(Node::new(id("1"), Position::origin(), NodeData::new("Root", NodeSize::Large)))
            .unwrap();
        store
            .add_node(Node::new(id("2"), Position::origin(), NodeData::new("Leaf", NodeSize::Medium)))
            .unwrap();
        store
            .add_edge(Edge::new(id("1"), id("2"), EdgeOptions::default()).unwrap())
            .unwrap();
        store
    }

    #[test]
    fn test_export_document_shape() {
        let json = sample().export().to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["nodes"].as_array().unwrap().len(), 2);
        assert_eq!(value["edges"][0]["id"], "e1-2");
        assert!(json.contains('\n'), "expected pretty output");
    }

    #[test]
    fn test_reload_preserves_order() {
        let original = sample();
        let json = original.export().to_json_pretty().unwrap();

        let reloaded =
            GraphStore::from_session(Session::from_json(&json).unwrap(), StoreConfig::default())
                .unwrap();

        assert_eq!(reloaded.export(), original.export());
    }

    #[test]
    fn test_dangling_edge_rejected_on_load() {
        let mut session = sample().export();
        session.nodes.pop();

        let result = GraphStore::from_session(session, StoreConfig::default());
        assert!(matches!(result, Err(Error::DanglingEdge { .. })));
    }

    #[test]
    fn test_loaded_edge_ids_follow_their_endpoints() {
        let mut session = sample().export();
        let mut value = serde_json::to_value(&session.edges[0]).unwrap();
        value["id"] = "stale".into();
        session.edges[0] = serde_json::from_value(value).unwrap();

        let store = GraphStore::from_session(session.clone(), StoreConfig::default()).unwrap();
        assert_eq!(store.edges()[0].id().as_str(), "e1-2");

        // A second copy of the same pair under another id is still a duplicate.
        let mut value = serde_json::to_value(&session.edges[0]).unwrap();
        value["id"] = "other".into();
        session.edges.push(serde_json::from_value(value).unwrap());
        let result = GraphStore::from_session(session, StoreConfig::default());
        assert!(matches!(result, Err(Error::DuplicateEdge { .. })));
    }

    #[test]
    fn test_malformed_json() {
        let result = Session::from_json("{\"nodes\": 3}");
        assert!(matches!(result, Err(Error::JsonParseFailed { .. })));
    }
}
