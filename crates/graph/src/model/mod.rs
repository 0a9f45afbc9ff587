//! Data model for mind map topics and links

pub mod edge;
pub mod node;
pub mod patch;
pub mod style;

pub use edge::{Edge, EdgeId};
pub use node::{Node, NodeData, NodeId, NodeShape, NodeSize, Position};
pub use patch::{NodeDataPatch, UnknownFieldPolicy};
pub use style::{ConnectorShape, EdgeOptions, LineMode};
