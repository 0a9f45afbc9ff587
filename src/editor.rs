//! # Editor workflow
//!
//! [`MindMapEditor`] ties the store, selection, styling and suggestion
//! strategies together behind the operations a user (or renderer) drives:
//! add a child, ask for a suggestion, delete, restyle, paste, key presses.
//!
//! ## Suggestions
//!
//! A suggestion is split in three so the editor stays usable while the
//! request is in flight:
//!
//! 1. [`MindMapEditor::begin_suggestion`] resolves the target, marks it
//!    pending and snapshots the graph.
//! 2. The caller runs a [`SuggestionStrategy`] on the snapshot.
//! 3. [`MindMapEditor::finish_suggestion`] applies or discards the result and
//!    always clears the pending mark.
//!
//! [`MindMapEditor::add_ai_node`] does all three in one call.

use std::collections::HashSet;
use std::str::FromStr;

use mindmap_core::ResultExt;
use mindmap_graph::{
    ConnectorShape, Edge, EdgeOptions, EdgeStyleManager, GraphStore, LineMode, Node,
    NodeDataPatch, NodeFactory, NodeId, Position, ROOT_LABEL, Removal, SelectionManager,
    Session, StoreConfig, build_context,
};
use mindmap_suggest::{SuggestError, SuggestionStrategy};
use tracing::{debug, info, warn};

use crate::clipboard::{ClipboardItem, first_image_data_uri};
use crate::error::{Error, Result};
use crate::notify::Notifier;

/// Shown when a suggestion request fails for any reason.
pub const AI_FAILURE_MESSAGE: &str = "Failed to generate AI suggestion. Please try again.";

/// Shown when the target topic was deleted while its suggestion was in flight.
pub const AI_TARGET_GONE_MESSAGE: &str =
    "The topic was removed before its AI suggestion arrived; the suggestion was discarded.";

/// Keys with editor shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Tab,
    Delete,
    Backspace,
}

impl FromStr for Key {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "enter" | "return" => Ok(Self::Enter),
            "tab" => Ok(Self::Tab),
            "delete" | "del" => Ok(Self::Delete),
            "backspace" => Ok(Self::Backspace),
            other => Err(Error::invalid_command(
                other,
                "expected enter, tab, delete or backspace",
            )),
        }
    }
}

/// What a key press did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    Ignored,
    AddedChild(NodeId),
    Deleted(Removal),
}

/// Snapshot handed to a strategy while the target is marked pending.
#[derive(Debug, Clone)]
pub struct SuggestionRequest {
    target: NodeId,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl SuggestionRequest {
    pub const fn target(&self) -> &NodeId {
        &self.target
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

/// One in-memory editing session.
#[derive(Debug)]
pub struct MindMapEditor {
    store: GraphStore,
    selection: SelectionManager,
    styles: EdgeStyleManager,
    factory: NodeFactory,
    notifier: Notifier,
    pending: HashSet<NodeId>,
}

impl Default for MindMapEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl MindMapEditor {
    /// A session seeded with the "Main Topic" root.
    pub fn new() -> Self {
        Self::with_root(ROOT_LABEL)
    }

    /// A session seeded with a root carrying `label`.
    pub fn with_root(label: impl Into<String>) -> Self {
        let mut store = GraphStore::new();
        store.add_node(NodeFactory::root(label)).or_log("seed root");
        Self::from_store(store)
    }

    /// Adopt a previously exported session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session violates the graph contract.
    pub fn from_session(session: Session, config: StoreConfig) -> Result<Self> {
        let store = GraphStore::from_session(session, config)
            .inspect_err(|e| warn!(error = %e, contract = e.is_contract_violation(), "Session rejected"))?;
        let styles = EdgeStyleManager::adopt(store.edges());
        info!(
            nodes = store.len(),
            edges = store.edge_count(),
            connector = %styles.connector(),
            line_mode = %styles.line_mode(),
            "Session loaded"
        );
        Ok(Self {
            styles,
            ..Self::from_store(store)
        })
    }

    fn from_store(store: GraphStore) -> Self {
        Self {
            store,
            selection: SelectionManager::new(),
            styles: EdgeStyleManager::new(),
            factory: NodeFactory::new(),
            notifier: Notifier::new(),
            pending: HashSet::new(),
        }
    }

    /// Publish through `notifier` instead of a private one.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Notifier) -> Self {
        self.notifier = notifier;
        self
    }

    pub const fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn nodes(&self) -> &[Node] {
        self.store.nodes()
    }

    pub fn edges(&self) -> &[Edge] {
        self.store.edges()
    }

    pub const fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    pub const fn edge_style(&self) -> &EdgeStyleManager {
        &self.styles
    }

    /// Render defaults for edges.
    pub const fn edge_options(&self) -> EdgeOptions {
        self.styles.edge_options()
    }

    pub const fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Renderer selection callback.
    pub fn set_selection(&mut self, ids: impl IntoIterator<Item = NodeId>) {
        self.selection.set(ids, &self.store);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn toggle_style_panel(&mut self) -> bool {
        self.selection.toggle_style_panel()
    }

    pub const fn is_style_panel_open(&self) -> bool {
        self.selection.is_style_panel_open()
    }

    // ------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------

    /// Add a "New Topic" under the effective target and select it.
    ///
    /// Returns `None` when the graph is empty.
    pub fn add_child(&mut self) -> Option<NodeId> {
        let parent = self.target_node()?;
        let depth = self.store.in_degree(parent.id());
        let child = self.factory.create_child(&parent, depth);

        let id = self.attach(&parent, child).or_log("add child")?;
        self.selection.set([id.clone()], &self.store);
        info!(node_id = %id, parent = %parent.id(), "Added child topic");
        Some(id)
    }

    /// Insert `child` and the edge from `parent`. Nothing is kept on failure.
    fn attach(&mut self, parent: &Node, child: Node) -> mindmap_core::Result<NodeId> {
        let id = child.id().clone();
        let edge = self.styles.new_edge(parent.id().clone(), id.clone())?;
        self.store.add_node(child)?;
        if let Err(e) = self.store.add_edge(edge) {
            self.store.remove_nodes(&HashSet::from([id]));
            return Err(e);
        }
        Ok(id)
    }

    fn target_node(&self) -> Option<Node> {
        let target = self.selection.effective_target(&self.store)?;
        self.store.node(&target).cloned()
    }

    /// Delete the selection together with descendants it leaves parentless.
    pub fn delete_selected(&mut self) -> Removal {
        if self.selection.is_empty() {
            return Removal::default();
        }
        let selected: HashSet<NodeId> = self.selection.ids().iter().cloned().collect();
        let doomed = self.store.with_orphaned_descendants(&selected);

        let removal = self.store.remove_nodes(&doomed);
        self.selection.clear();
        self.selection.close_style_panel();
        info!(nodes = removal.nodes, edges = removal.edges, "Deleted selection");
        removal
    }

    /// Renderer connect gesture.
    ///
    /// Returns `Ok(false)` when the pair is already linked.
    ///
    /// # Errors
    ///
    /// Returns an error for a missing endpoint or a self-link.
    pub fn connect(&mut self, source: &NodeId, target: &NodeId) -> Result<bool> {
        if self.store.has_edge_between(source, target) {
            debug!(source = %source, target = %target, "Connection already exists");
            return Ok(false);
        }
        let edge = self.styles.new_edge(source.clone(), target.clone())?;
        self.store.add_edge(edge)?;
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Node data
    // ------------------------------------------------------------------

    /// Merge `patch` into every selected node. Returns how many were updated.
    pub fn update_selected(&mut self, patch: &NodeDataPatch) -> usize {
        if patch.is_empty() {
            return 0;
        }
        let ids = self.selection.ids().to_vec();
        let updated = ids
            .iter()
            .filter(|id| self.store.update_node_data(id, patch))
            .count();
        debug!(updated, "Updated selected nodes");
        updated
    }

    /// [`MindMapEditor::update_selected`] from a JSON object such as
    /// `{"backgroundColor": "red"}`.
    ///
    /// # Errors
    ///
    /// Returns an error for fields the store's policy rejects.
    pub fn update_selected_json(&mut self, patch: &serde_json::Value) -> Result<usize> {
        let patch = NodeDataPatch::from_json(patch, self.store.config().unknown_fields)?;
        Ok(self.update_selected(&patch))
    }

    /// Renderer label-edit callback. Returns `false` for unknown nodes.
    pub fn rename_node(&mut self, id: &NodeId, label: impl Into<String>) -> bool {
        self.store.update_node_data(id, &NodeDataPatch::label(label))
    }

    /// Renderer drag callback. Returns `false` for unknown nodes.
    pub fn move_node(&mut self, id: &NodeId, position: Position) -> bool {
        self.store.move_node(id, position)
    }

    /// Attach the first image in `items` to every selected node.
    pub fn paste(&mut self, items: &[ClipboardItem]) -> usize {
        if self.selection.is_empty() {
            return 0;
        }
        let Some(uri) = first_image_data_uri(items) else {
            debug!(items = items.len(), "Paste contained no image");
            return 0;
        };
        self.update_selected(&NodeDataPatch::image(uri))
    }

    // ------------------------------------------------------------------
    // Styling
    // ------------------------------------------------------------------

    pub fn set_connector(&mut self, connector: ConnectorShape) {
        self.styles.set_connector(connector, &mut self.store);
    }

    pub fn set_line_mode(&mut self, line_mode: LineMode) {
        self.styles.set_line_mode(line_mode, &mut self.store);
    }

    // ------------------------------------------------------------------
    // Keyboard
    // ------------------------------------------------------------------

    /// Shortcuts apply only with a selection and while no text field is being edited.
    pub fn handle_key(&mut self, key: Key, editing_text: bool) -> KeyOutcome {
        if editing_text || self.selection.is_empty() {
            return KeyOutcome::Ignored;
        }
        match key {
            Key::Enter | Key::Tab => self
                .add_child()
                .map_or(KeyOutcome::Ignored, KeyOutcome::AddedChild),
            Key::Delete | Key::Backspace => KeyOutcome::Deleted(self.delete_selected()),
        }
    }

    // ------------------------------------------------------------------
    // Suggestions
    // ------------------------------------------------------------------

    /// True while any suggestion is in flight.
    pub fn is_loading(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn is_pending(&self, id: &NodeId) -> bool {
        self.pending.contains(id)
    }

    /// Mark the effective target pending and snapshot the graph.
    ///
    /// Returns `None` for an empty graph or a target that is already pending.
    pub fn begin_suggestion(&mut self) -> Option<SuggestionRequest> {
        let target = self.selection.effective_target(&self.store)?;
        if !self.pending.insert(target.clone()) {
            debug!(target = %target, "Suggestion already pending");
            return None;
        }
        Some(SuggestionRequest {
            target,
            nodes: self.store.nodes().to_vec(),
            edges: self.store.edges().to_vec(),
        })
    }

    /// Apply the outcome of `request`. The pending mark is always cleared.
    ///
    /// Failures publish exactly one error notification and leave the graph
    /// as it is.
    pub fn finish_suggestion(
        &mut self,
        request: SuggestionRequest,
        result: std::result::Result<String, SuggestError>,
    ) -> Option<NodeId> {
        self.pending.remove(&request.target);

        let label = match result {
            Ok(label) => label,
            Err(e) => {
                warn!(target = %request.target, error = %e, "Suggestion failed");
                self.notifier.error(AI_FAILURE_MESSAGE);
                return None;
            }
        };

        let Some(parent) = self.store.node(&request.target).cloned() else {
            warn!(target = %request.target, "Suggestion target removed, discarding");
            self.notifier.error(AI_TARGET_GONE_MESSAGE);
            return None;
        };

        let depth = self.store.in_degree(parent.id());
        let child = self.factory.create_child_labeled(&parent, depth, label);
        match self.attach(&parent, child) {
            Ok(id) => {
                info!(node_id = %id, parent = %parent.id(), "Added suggested topic");
                self.notifier.success(format!(
                    "Added \"{}\"",
                    self.store.node(&id).map(Node::label).unwrap_or_default()
                ));
                Some(id)
            }
            Err(e) => {
                warn!(error = %e, "Could not insert suggested topic");
                self.notifier.error(AI_FAILURE_MESSAGE);
                None
            }
        }
    }

    /// Ask `strategy` for a subtopic of the effective target and add it.
    pub async fn add_ai_node(&mut self, strategy: &dyn SuggestionStrategy) -> Option<NodeId> {
        let request = self.begin_suggestion()?;
        info!(target = %request.target, strategy = strategy.name(), "Requesting AI topic");
        let result = strategy
            .suggest(&request.nodes, &request.edges, &request.target)
            .await;
        self.finish_suggestion(request, result)
    }

    // ------------------------------------------------------------------
    // Queries and export
    // ------------------------------------------------------------------

    /// The context blob a contextual suggestion for `id` would send.
    pub fn context_for(&self, id: &NodeId) -> String {
        build_context(self.store.nodes(), self.store.edges(), id)
    }

    pub fn export(&self) -> Session {
        self.store.export()
    }

    /// Pretty-printed `{nodes, edges}` JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn export_json(&self) -> Result<String> {
        Ok(self.store.export().to_json_pretty()?)
    }
}
