//! Edge data structure with type-safe node references

use std::fmt;

use mindmap_core::{Error, Result};
use serde::{Deserialize, Serialize};

use super::node::NodeId;
use super::style::{ConnectorShape, EdgeOptions, LineMode};

/// Edge identifier, derived from its endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(String);

impl EdgeId {
    /// The id for the edge `source -> target`.
    ///
    /// `e{source}-{target}` unless an endpoint contains `-`; then the source
    /// length is prefixed (`e{len}:{source}-{target}`) so that no two ordered
    /// pairs share an id.
    pub fn for_pair(source: &NodeId, target: &NodeId) -> Self {
        let (source, target) = (source.as_str(), target.as_str());
        if source.contains('-') || target.contains('-') {
            Self(format!("e{}:{source}-{target}", source.len()))
        } else {
            Self(format!("e{source}-{target}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A directed link between two topics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    id: EdgeId,
    source: NodeId,
    target: NodeId,
    style: ConnectorShape,
    animated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stroke_dasharray: Option<String>,
}

impl Edge {
    /// Creates a new Edge with validation
    ///
    /// # Errors
    ///
    /// Returns an error if the source and target are the same (self-referencing edge)
    pub fn new(source: NodeId, target: NodeId, options: EdgeOptions) -> Result<Self> {
        if source == target {
            return Err(Error::invalid_record(format!(
                "edge cannot connect node '{source}' to itself"
            )));
        }

        Ok(Self {
            id: EdgeId::for_pair(&source, &target),
            source,
            target,
            style: options.style,
            animated: options.animated,
            stroke_dasharray: options.stroke_dasharray.map(str::to_string),
        })
    }

    /// Returns the edge ID
    pub const fn id(&self) -> &EdgeId {
        &self.id
    }

    /// Returns the source node ID
    pub const fn source(&self) -> &NodeId {
        &self.source
    }

    /// Returns the target node ID
    pub const fn target(&self) -> &NodeId {
        &self.target
    }

    /// Returns the connector shape
    pub const fn style(&self) -> ConnectorShape {
        self.style
    }

    pub const fn animated(&self) -> bool {
        self.animated
    }

    pub fn stroke_dasharray(&self) -> Option<&str> {
        self.stroke_dasharray.as_deref()
    }

    /// The line mode this edge is drawn in. Unrecognised dash hints read as solid.
    pub fn line_mode(&self) -> LineMode {
        if self.animated {
            return LineMode::Animated;
        }
        LineMode::ALL
            .into_iter()
            .find(|mode| mode.dash_array().is_some() && mode.dash_array() == self.stroke_dasharray())
            .unwrap_or_default()
    }

    /// True if this edge runs `source -> target`.
    pub fn connects(&self, source: &NodeId, target: &NodeId) -> bool {
        &self.source == source && &self.target == target
    }

    /// Replace whatever id was loaded with the one derived from the endpoints.
    #[must_use]
    pub(crate) fn with_derived_id(mut self) -> Self {
        self.id = EdgeId::for_pair(&self.source, &self.target);
        self
    }

    /// True if either endpoint is `node`.
    pub fn touches(&self, node: &NodeId) -> bool {
        &self.source == node || &self.target == node
    }

    pub(crate) const fn set_style(&mut self, style: ConnectorShape) {
        self.style = style;
    }

    pub(crate) fn set_line_mode(&mut self, mode: LineMode) {
        self.animated = mode.is_animated();
        self.stroke_dasharray = mode.dash_array().map(str::to_string);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    fn id(s: &str) -> NodeId {
        NodeId::new(s).unwrap()
    }

    #[test]
    fn test_edge_id_is_derived_from_pair() {
        let edge = Edge::new(id("1"), id("2"), EdgeOptions::default()).unwrap();
        assert_eq!(edge.id().as_str(), "e1-2");
        assert_eq!(edge.id(), &EdgeId::for_pair(&id("1"), &id("2")));
    }

    #[test]
    fn test_edge_ids_distinguish_dashed_pairs() {
        let left = EdgeId::for_pair(&id("a-b"), &id("c"));
        let right = EdgeId::for_pair(&id("a"), &id("b-c"));
        assert_ne!(left, right);
        assert_eq!(left.as_str(), "e3:a-b-c");
        assert_eq!(right.as_str(), "e1:a-b-c");
    }

    #[test]
    fn test_derived_id_replaces_loaded_id() {
        let edge: Edge = serde_json::from_value(serde_json::json!({
            "id": "custom",
            "source": "1",
            "target": "2",
            "style": "smoothstep",
            "animated": false
        }))
        .unwrap();
        assert_eq!(edge.id().as_str(), "custom");
        assert_eq!(edge.with_derived_id().id().as_str(), "e1-2");
    }

    #[test]
    fn test_self_referencing_edge_rejected() {
        let result = Edge::new(id("1"), id("1"), EdgeOptions::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_edge_carries_options() {
        let options = EdgeOptions::new(ConnectorShape::Bezier, LineMode::Animated);
        let edge = Edge::new(id("a"), id("b"), options).unwrap();
        assert_eq!(edge.style(), ConnectorShape::Bezier);
        assert!(edge.animated());
        assert_eq!(edge.stroke_dasharray(), None);
    }

    #[test]
    fn test_line_mode_update() {
        let mut edge = Edge::new(id("a"), id("b"), EdgeOptions::default()).unwrap();
        edge.set_line_mode(LineMode::Dashed);
        assert!(!edge.animated());
        assert_eq!(edge.stroke_dasharray(), Some("6 4"));

        edge.set_line_mode(LineMode::Animated);
        assert!(edge.animated());
        assert_eq!(edge.stroke_dasharray(), None);
    }

    #[test]
    fn test_edge_serialization_field_names() {
        let edge = Edge::new(id("1"), id("2"), EdgeOptions::default()).unwrap();
        let json = serde_json::to_value(&edge).unwrap();
        assert_eq!(json["id"], "e1-2");
        assert_eq!(json["source"], "1");
        assert_eq!(json["target"], "2");
        assert_eq!(json["style"], "smoothstep");
        assert_eq!(json["animated"], false);
        assert!(json.get("strokeDasharray").is_none());
    }

    #[test]
    fn test_line_mode_read_back() {
        for mode in LineMode::ALL {
            let edge = Edge::new(id("a"), id("b"), EdgeOptions::new(ConnectorShape::Step, mode)).unwrap();
            assert_eq!(edge.line_mode(), mode);
        }
    }

    #[test]
    fn test_touches() {
        let edge = Edge::new(id("a"), id("b"), EdgeOptions::default()).unwrap();
        assert!(edge.touches(&id("a")));
        assert!(edge.touches(&id("b")));
        assert!(!edge.touches(&id("c")));
    }
}
