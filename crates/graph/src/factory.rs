//! # Node Factory
//!
//! Derives new topics from their parent: size tier, default styling and an
//! initial placement to the right of the parent.
//!
//! ## Depth policy
//!
//! The depth passed in is the parent's **in-degree** (number of edges
//! targeting it), not its distance from the root. A parent reached through
//! several links therefore yields a smaller tier than its hierarchy position
//! suggests. Tiers are assigned once and never recomputed.

use crate::model::{Node, NodeData, NodeId, NodeSize, Position};

/// Label given to topics created without explicit text.
pub const DEFAULT_LABEL: &str = "New Topic";

/// Label of the seeded root topic.
pub const ROOT_LABEL: &str = "Main Topic";

/// Id of the seeded root topic.
pub const ROOT_ID: &str = "1";

/// Horizontal distance between a parent and a newly created child.
pub const CHILD_SPACING: f64 = 250.0;

const ROOT_POSITION: Position = Position { x: 250.0, y: 250.0 };

/// Size tier for a node at `depth`: 0 → large, 1 → medium, deeper → small.
pub const fn size_for_depth(depth: usize) -> NodeSize {
    match depth {
        0 => NodeSize::Large,
        1 => NodeSize::Medium,
        _ => NodeSize::Small,
    }
}

/// Builds child topics relative to a parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeFactory {
    spacing: f64,
}

impl Default for NodeFactory {
    fn default() -> Self {
        Self {
            spacing: CHILD_SPACING,
        }
    }
}

impl NodeFactory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different horizontal offset for new children.
    #[must_use]
    pub const fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    /// The seeded root topic: id "1", large, at (250, 250).
    pub fn root(label: impl Into<String>) -> Node {
        Node::new(
            NodeId::from_trusted(ROOT_ID.to_string()),
            ROOT_POSITION,
            NodeData::new(label, size_for_depth(0)),
        )
    }

    /// A "New Topic" child of `parent`.
    pub fn create_child(&self, parent: &Node, parent_depth: usize) -> Node {
        self.create_child_labeled(parent, parent_depth, DEFAULT_LABEL)
    }

    /// A child of `parent` carrying `label`.
    pub fn create_child_labeled(
        &self,
        parent: &Node,
        parent_depth: usize,
        label: impl Into<String>,
    ) -> Node {
        Node::new(
            NodeId::generate(),
            parent.position().offset_x(self.spacing),
            NodeData::new(label, size_for_depth(parent_depth.saturating_add(1))),
        )
    }
}
