//! # Edge Style Manager
//!
//! Holds the connector shape and line mode used for new edges. Changing
//! either one restyles every existing edge as well.

use mindmap_core::Result;
use tracing::info;

use crate::model::{ConnectorShape, Edge, EdgeOptions, LineMode, NodeId};
use crate::store::GraphStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeStyleManager {
    connector: ConnectorShape,
    line_mode: LineMode,
}

impl EdgeStyleManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue in the style of an existing graph: the first edge's connector
    /// and line mode, or the defaults when there are no edges.
    pub fn adopt(edges: &[Edge]) -> Self {
        edges.first().map_or_else(Self::default, |edge| Self {
            connector: edge.style(),
            line_mode: edge.line_mode(),
        })
    }

    pub const fn connector(&self) -> ConnectorShape {
        self.connector
    }

    pub const fn line_mode(&self) -> LineMode {
        self.line_mode
    }

    /// Defaults for edges created from now on.
    pub const fn edge_options(&self) -> EdgeOptions {
        EdgeOptions::new(self.connector, self.line_mode)
    }

    /// Set the connector shape and restyle every edge in `store`.
    pub fn set_connector(&mut self, connector: ConnectorShape, store: &mut GraphStore) {
        info!(connector = %connector, "Changing connector shape");
        self.connector = connector;
        store.reapply_edge_style(connector);
    }

    /// Set the line mode and restyle every edge in `store`.
    pub fn set_line_mode(&mut self, line_mode: LineMode, store: &mut GraphStore) {
        info!(line_mode = %line_mode, "Changing line mode");
        self.line_mode = line_mode;
        store.reapply_line_mode(line_mode);
    }

    /// An edge `source -> target` in the current style.
    ///
    /// # Errors
    ///
    /// Returns an error for a self-referencing edge.
    pub fn new_edge(&self, source: NodeId, target: NodeId) -> Result<Edge> {
        Edge::new(source, target, self.edge_options())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;
    use crate::model::{Node, NodeData, NodeSize, Position};

    fn id(s: &str) -> NodeId {
        NodeId::new(s).unwrap()
    }

    fn graph() -> GraphStore {
        let mut store = GraphStore::new();
        for s in ["1", "2", "3"] {
            store
                .add_node(Node::new(id(s), Position::origin(), NodeData::new(s, NodeSize::Small)))
                .unwrap();
        }
        store
    }

    #[test]
    fn test_adopt_follows_first_edge() {
        let mut store = graph();
        let mut styles = EdgeStyleManager::new();
        store.add_edge(styles.new_edge(id("1"), id("2")).unwrap()).unwrap();
        styles.set_connector(ConnectorShape::Bezier, &mut store);
        styles.set_line_mode(LineMode::Dotted, &mut store);

        let adopted = EdgeStyleManager::adopt(store.edges());
        assert_eq!(adopted, styles);
        assert_eq!(EdgeStyleManager::adopt(&[]), EdgeStyleManager::default());
    }

    #[test]
    fn test_defaults() {
        let manager = EdgeStyleManager::new();
        assert_eq!(manager.connector(), ConnectorShape::Smoothstep);
        assert_eq!(manager.line_mode(), LineMode::Solid);
    }

    #[test]
    fn test_changes_are_retroactive_and_forward_looking() {
        let mut store = graph();
        let mut manager = EdgeStyleManager::new();
        store.add_edge(manager.new_edge(id("1"), id("2")).unwrap()).unwrap();

        manager.set_connector(ConnectorShape::Straight, &mut store);
        manager.set_line_mode(LineMode::Animated, &mut store);

        let existing = &store.edges()[0];
        assert_eq!(existing.style(), ConnectorShape::Straight);
        assert!(existing.animated());

        let fresh = manager.new_edge(id("1"), id("3")).unwrap();
        assert_eq!(fresh.style(), ConnectorShape::Straight);
        assert!(fresh.animated());
    }

    #[test]
    fn test_leaving_animated_mode_clears_flag() {
        let mut store = graph();
        let mut manager = EdgeStyleManager::new();
        manager.set_line_mode(LineMode::Animated, &mut store);
        store.add_edge(manager.new_edge(id("1"), id("2")).unwrap()).unwrap();

        manager.set_line_mode(LineMode::Dashed, &mut store);

        assert!(!store.edges()[0].animated());
        assert_eq!(manager.edge_options().stroke_dasharray, Some("6 4"));
    }
}
