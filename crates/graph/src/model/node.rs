//! Node data structure with type-safe validation

use std::fmt;
use std::str::FromStr;

use mindmap_core::{Error, Result};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Type-safe wrapper for node identifiers
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeId(String);

impl NodeId {
    /// Creates a new NodeId with validation
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(Error::invalid_record("node id cannot be empty"));
        }
        Ok(Self(id))
    }

    /// Generates a fresh, lexicographically sortable id.
    pub fn generate() -> Self {
        Self(Ulid::new().to_string())
    }

    /// Wraps an id known to be non-empty.
    pub(crate) const fn from_trusted(id: String) -> Self {
        Self(id)
    }

    /// Returns the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NodeId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

impl FromStr for NodeId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Position in 2D canvas space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Creates a new Position with validation
    ///
    /// # Errors
    ///
    /// Returns an error if either coordinate is NaN or infinite.
    pub fn new(x: f64, y: f64) -> Result<Self> {
        if !x.is_finite() {
            return Err(Error::invalid_record(format!(
                "x coordinate must be finite, got: {x}"
            )));
        }
        if !y.is_finite() {
            return Err(Error::invalid_record(format!(
                "y coordinate must be finite, got: {y}"
            )));
        }
        Ok(Self { x, y })
    }

    /// Creates a position at the origin
    pub const fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Returns this position shifted horizontally by `dx`.
    #[must_use]
    pub fn offset_x(self, dx: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y,
        }
    }
}

/// Shape for rendering the node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NodeShape {
    #[default]
    Rectangle,
    Circle,
    Diamond,
    Hexagon,
}

impl NodeShape {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Diamond => "diamond",
            Self::Hexagon => "hexagon",
        }
    }
}

impl FromStr for NodeShape {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "rectangle" => Ok(Self::Rectangle),
            "circle" => Ok(Self::Circle),
            "diamond" => Ok(Self::Diamond),
            "hexagon" => Ok(Self::Hexagon),
            other => Err(Error::invalid_field(
                "shape",
                format!("expected rectangle, circle, diamond or hexagon, got '{other}'"),
            )),
        }
    }
}

/// Size tier of a node, fixed when the node is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NodeSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl NodeSize {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl FromStr for NodeSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            other => Err(Error::invalid_field(
                "size",
                format!("expected small, medium or large, got '{other}'"),
            )),
        }
    }
}

/// Label and rendering hints carried by a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    pub label: String,
    pub shape: NodeShape,
    pub background_color: String,
    pub text_color: String,
    pub size: NodeSize,
    /// Embedded image as a `data:` URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl NodeData {
    pub const DEFAULT_BACKGROUND: &'static str = "white";
    pub const DEFAULT_TEXT: &'static str = "black";

    /// Default styling with the given label and size tier.
    pub fn new(label: impl Into<String>, size: NodeSize) -> Self {
        Self {
            label: label.into(),
            shape: NodeShape::default(),
            background_color: Self::DEFAULT_BACKGROUND.to_string(),
            text_color: Self::DEFAULT_TEXT.to_string(),
            size,
            image: None,
        }
    }
}

/// A topic in the mind map.
///
/// Records are replaced, never mutated in place, once they are in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,
    position: Position,
    data: NodeData,
}

impl Node {
    /// Creates a Node with all fields
    pub const fn new(id: NodeId, position: Position, data: NodeData) -> Self {
        Self { id, position, data }
    }

    /// Returns the node's ID
    pub const fn id(&self) -> &NodeId {
        &self.id
    }

    /// Returns the node's position
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns the node's data
    pub const fn data(&self) -> &NodeData {
        &self.data
    }

    /// Returns the node's label
    pub fn label(&self) -> &str {
        &self.data.label
    }

    /// Returns a copy of this node carrying `data`.
    #[must_use]
    pub fn with_data(&self, data: NodeData) -> Self {
        Self {
            id: self.id.clone(),
            position: self.position,
            data,
        }
    }

    /// Returns a copy of this node placed at `position`.
    #[must_use]
    pub fn with_position(&self, position: Position) -> Self {
        Self {
            id: self.id.clone(),
            position,
            data: self.data.clone(),
        }
    }
}
