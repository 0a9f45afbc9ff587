#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! # mindmap-graph
//!
//! The in-memory mind map: topics (nodes), directed parent links (edges),
//! the current selection and the edge styling defaults.
//!
//! The [`GraphStore`] is the single owner of node and edge records. All
//! other components either read it or hand it a complete mutation.
//!
//! ```
//! use mindmap_graph::{EdgeStyleManager, GraphStore, NodeFactory, ROOT_LABEL};
//!
//! let mut store = GraphStore::new();
//! let root = NodeFactory::root(ROOT_LABEL);
//! let child = NodeFactory::new().create_child(&root, store.in_degree(root.id()));
//! let edge = EdgeStyleManager::new().new_edge(root.id().clone(), child.id().clone());
//!
//! store.add_node(root).ok();
//! store.add_node(child).ok();
//! if let Ok(edge) = edge {
//!     store.add_edge(edge).ok();
//! }
//! assert_eq!(store.edge_count(), 1);
//! ```

pub mod context;
pub mod edge_style;
pub mod export;
pub mod factory;
pub mod model;
pub mod selection;
pub mod store;

pub use context::{TopicContext, build_context};
pub use edge_style::EdgeStyleManager;
pub use export::Session;
pub use factory::{DEFAULT_LABEL, NodeFactory, ROOT_LABEL, size_for_depth};
pub use model::{
    ConnectorShape, Edge, EdgeId, EdgeOptions, LineMode, Node, NodeData, NodeDataPatch, NodeId,
    NodeShape, NodeSize, Position, UnknownFieldPolicy,
};
pub use selection::{SelectionManager, SelectionState};
pub use store::{GraphStore, Removal, StoreConfig};
