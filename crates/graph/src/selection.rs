//! # Selection Manager
//!
//! Tracks the selected topics reported by the renderer and resolves the
//! target of single-target operations.

use tracing::debug;

use crate::model::{Node, NodeId};
use crate::store::GraphStore;

/// Shape of the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionState {
    Empty,
    Single(NodeId),
    Multi(Vec<NodeId>),
}

/// Selected node ids plus the selection-dependent style panel flag.
#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    selected: Vec<NodeId>,
    style_panel_open: bool,
}

impl SelectionManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        match self.selected.as_slice() {
            [] => SelectionState::Empty,
            [only] => SelectionState::Single(only.clone()),
            many => SelectionState::Multi(many.to_vec()),
        }
    }

    pub fn ids(&self) -> &[NodeId] {
        &self.selected
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.selected.contains(id)
    }

    /// The selected nodes, in selection order.
    pub fn current<'a>(&self, store: &'a GraphStore) -> Vec<&'a Node> {
        self.selected.iter().filter_map(|id| store.node(id)).collect()
    }

    /// Replace the selection. Ids missing from `store` and repeats are dropped.
    pub fn set(&mut self, ids: impl IntoIterator<Item = NodeId>, store: &GraphStore) {
        let mut selected: Vec<NodeId> = Vec::new();
        for id in ids {
            if store.contains(&id) && !selected.contains(&id) {
                selected.push(id);
            }
        }
        self.selected = selected;
        self.on_changed();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.on_changed();
    }

    /// Drop ids whose nodes are no longer in `store`.
    pub fn retain_existing(&mut self, store: &GraphStore) {
        self.selected.retain(|id| store.contains(id));
        self.on_changed();
    }

    /// First selected node, else the graph's first node.
    pub fn effective_target(&self, store: &GraphStore) -> Option<NodeId> {
        self.selected
            .iter()
            .find(|id| store.contains(id))
            .or_else(|| store.first_node().map(Node::id))
            .cloned()
    }

    pub const fn is_style_panel_open(&self) -> bool {
        self.style_panel_open
    }

    /// Flip the style panel. It stays closed while nothing is selected.
    pub fn toggle_style_panel(&mut self) -> bool {
        self.style_panel_open = !self.style_panel_open && !self.selected.is_empty();
        self.style_panel_open
    }

    pub fn close_style_panel(&mut self) {
        self.style_panel_open = false;
    }

    fn on_changed(&mut self) {
        if self.selected.is_empty() && self.style_panel_open {
            debug!("Selection emptied, closing style panel");
            self.style_panel_open = false;
        }
    }
}
