//! The canvas document store.
//!
//! [`CanvasStore`] is the single owner of the editor document. Every
//! mutation goes through it so that history, selection and subscribers stay
//! consistent. Operations on targets that do not exist are logged with
//! `tracing::warn!` and ignored.

use serde_json::Value;

use crate::document::{CanvasDocument, DeviceMode};
use crate::error::BuilderResult;
use crate::history::{History, MutationKind, DEFAULT_HISTORY_LIMIT};
use crate::node::{ComponentId, ComponentNode, ComponentType, PropMap, StyleMap, CUSTOM_CSS_KEY};
use crate::style::{project_parameters_to_css, sync_css_to_parameters, StructuredParams};
use crate::tree;

/// Something observable happened to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    /// `components` changed and a history entry was recorded.
    ComponentsChanged {
        /// The operation that changed them.
        kind: MutationKind,
    },
    /// The selection moved.
    SelectionChanged {
        /// New selection.
        selected: Option<ComponentId>,
    },
    /// The active breakpoint changed.
    DeviceModeChanged {
        /// New device mode.
        mode: DeviceMode,
    },
    /// An undo step was applied.
    Undo,
    /// A redo step was applied.
    Redo,
    /// The document was replaced by [`CanvasStore::load_components`].
    Hydrated,
}

impl StoreEvent {
    /// Whether the persisted component list may differ after this event.
    #[must_use]
    pub fn touches_components(&self) -> bool {
        matches!(
            self,
            Self::ComponentsChanged { .. } | Self::Undo | Self::Redo | Self::Hydrated
        )
    }
}

/// Handle returned by [`CanvasStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Callback type for store notifications.
pub type StoreListener = Box<dyn FnMut(&StoreEvent, &CanvasDocument) + Send>;

/// Owner of the canvas document and its undo history.
///
/// # Example
///
/// ```
/// use builder_core::{CanvasStore, ComponentType};
///
/// let mut store = CanvasStore::new();
/// let section = store.add_component(ComponentType::Section, None).unwrap();
/// let text = store.add_component(ComponentType::Text, Some(section)).unwrap();
///
/// assert_eq!(store.document().component_count(), 2);
/// assert!(store.undo());
/// assert!(store.get_component(text).is_none());
/// ```
pub struct CanvasStore {
    document: CanvasDocument,
    history: History,
    listeners: Vec<(SubscriptionId, StoreListener)>,
    next_subscription: u64,
}

impl std::fmt::Debug for CanvasStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasStore")
            .field("document", &self.document)
            .field("history", &self.history)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for CanvasStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Shallow merge where `null` removes a key.
fn merge_partial(target: &mut serde_json::Map<String, Value>, partial: serde_json::Map<String, Value>) {
    for (key, value) in partial {
        if value.is_null() {
            target.remove(&key);
        } else {
            target.insert(key, value);
        }
    }
}

impl CanvasStore {
    /// Create a store with an empty canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::with_history_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// Create a store keeping at most `limit` undo steps.
    #[must_use]
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            document: CanvasDocument::new(),
            history: History::with_limit(Vec::new(), limit),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Create a store hydrated from a persisted component list.
    ///
    /// # Errors
    ///
    /// Returns an error if the list violates the tree invariants.
    pub fn from_components(components: Vec<ComponentNode>) -> BuilderResult<Self> {
        let mut store = Self::new();
        store.load_components(components)?;
        Ok(store)
    }

    // ===== Queries =====

    /// The live document.
    #[must_use]
    pub fn document(&self) -> &CanvasDocument {
        &self.document
    }

    /// Top-level components.
    #[must_use]
    pub fn components(&self) -> &[ComponentNode] {
        &self.document.components
    }

    /// Look a component up anywhere in the tree.
    #[must_use]
    pub fn get_component(&self, id: ComponentId) -> Option<&ComponentNode> {
        self.document.get(id)
    }

    /// The undo history.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Whether an undo step is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether a redo step is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// The persisted form of the document.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn components_json(&self) -> BuilderResult<String> {
        self.document.to_json()
    }

    // ===== Tree mutations =====

    /// Append a new component, built from its type's template, to `parent`
    /// (or the top level). The new component becomes the selection.
    ///
    /// Returns `None` when the parent does not exist or cannot have children.
    pub fn add_component(
        &mut self,
        component_type: ComponentType,
        parent: Option<ComponentId>,
    ) -> Option<ComponentId> {
        self.place_component(component_type, parent, None)
    }

    /// Like [`add_component`](Self::add_component) but at a sibling
    /// position (clamped to the number of siblings).
    pub fn insert_component(
        &mut self,
        component_type: ComponentType,
        parent: Option<ComponentId>,
        index: usize,
    ) -> Option<ComponentId> {
        self.place_component(component_type, parent, Some(index))
    }

    fn place_component(
        &mut self,
        component_type: ComponentType,
        parent: Option<ComponentId>,
        index: Option<usize>,
    ) -> Option<ComponentId> {
        let node = ComponentNode::from_template(component_type);
        let id = node.id();
        if let Err(err) = tree::insert(&mut self.document.components, parent, index, node) {
            tracing::warn!(%component_type, error = %err, "add_component ignored");
            return None;
        }
        self.commit(MutationKind::AddComponent);
        self.set_selection(Some(id));
        Some(id)
    }

    /// Shallow-merge `partial` into a component's props. `null` values
    /// remove keys.
    pub fn update_component_props(&mut self, id: ComponentId, partial: PropMap) -> bool {
        let Some(node) = tree::find_by_id_mut(&mut self.document.components, id) else {
            tracing::warn!(%id, "update_component_props: component not found");
            return false;
        };
        merge_partial(&mut node.props, partial);
        self.commit(MutationKind::UpdateProps)
    }

    /// Shallow-merge `partial` into the style layer for `mode`. `null`
    /// values remove keys; override layers left empty are dropped.
    pub fn update_responsive_style(
        &mut self,
        id: ComponentId,
        mode: DeviceMode,
        partial: StyleMap,
    ) -> bool {
        let Some(node) = tree::find_by_id_mut(&mut self.document.components, id) else {
            tracing::warn!(%id, ?mode, "update_responsive_style: component not found");
            return false;
        };
        merge_partial(node.style.layer_mut(mode), partial);
        node.style.collapse_empty_layers();
        self.commit(MutationKind::UpdateStyle)
    }

    /// [`update_responsive_style`](Self::update_responsive_style) on the
    /// current device mode's layer.
    pub fn update_component_style(&mut self, id: ComponentId, partial: StyleMap) -> bool {
        let mode = self.document.device_mode;
        self.update_responsive_style(id, mode, partial)
    }

    /// Remove a component and its subtree.
    pub fn delete_component(&mut self, id: ComponentId) -> bool {
        let Some(removed) = tree::remove(&mut self.document.components, id) else {
            tracing::warn!(%id, "delete_component: component not found");
            return false;
        };
        self.commit(MutationKind::DeleteComponent);
        if let Some(selected) = self.document.selected_component_id {
            if selected == id || tree::is_descendant(&removed, selected) {
                self.set_selection(None);
            }
        }
        true
    }

    /// Reorder or reparent a component. `index` is the position among the
    /// new siblings, clamped.
    ///
    /// Moves into the component's own subtree or under a leaf are refused.
    pub fn move_component(
        &mut self,
        id: ComponentId,
        new_parent: Option<ComponentId>,
        index: usize,
    ) -> bool {
        let Some(node) = self.document.get(id) else {
            tracing::warn!(%id, "move_component: component not found");
            return false;
        };
        if let Some(parent_id) = new_parent {
            if parent_id == id || tree::is_descendant(node, parent_id) {
                tracing::warn!(%id, parent = %parent_id, "move_component: target is inside the moved subtree");
                return false;
            }
            match self.document.get(parent_id) {
                None => {
                    tracing::warn!(parent = %parent_id, "move_component: parent not found");
                    return false;
                }
                Some(parent) if !parent.component_type().is_container() => {
                    tracing::warn!(parent = %parent_id, component_type = %parent.component_type(), "move_component: parent cannot have children");
                    return false;
                }
                Some(_) => {}
            }
        }

        let Some(node) = tree::remove(&mut self.document.components, id) else {
            return false;
        };
        if let Err(err) = tree::insert(&mut self.document.components, new_parent, Some(index), node) {
            tracing::warn!(%id, error = %err, "move_component failed, restoring");
            self.document.components = self.history.current().components.clone();
            return false;
        }
        self.commit(MutationKind::MoveComponent)
    }

    /// Insert a deep copy (fresh ids throughout) right after a component.
    /// The copy becomes the selection.
    pub fn duplicate_component(&mut self, id: ComponentId) -> Option<ComponentId> {
        let Some(location) = tree::locate(&self.document.components, id) else {
            tracing::warn!(%id, "duplicate_component: component not found");
            return None;
        };
        let copy = tree::clone_subtree(self.document.get(id)?);
        let copy_id = copy.id();
        if let Err(err) = tree::insert(
            &mut self.document.components,
            location.parent,
            Some(location.index + 1),
            copy,
        ) {
            tracing::warn!(%id, error = %err, "duplicate_component ignored");
            return None;
        }
        self.commit(MutationKind::DuplicateComponent);
        self.set_selection(Some(copy_id));
        Some(copy_id)
    }

    // ===== Style sync =====

    /// Store hand-edited CSS and pull the structured parameters it
    /// expresses into props, as one undo step.
    pub fn apply_custom_css(&mut self, id: ComponentId, css: &str) -> bool {
        let Some(node) = tree::find_by_id_mut(&mut self.document.components, id) else {
            tracing::warn!(%id, "apply_custom_css: component not found");
            return false;
        };
        let params = sync_css_to_parameters(css, &StructuredParams::from_props(&node.props));
        params.write_props(&mut node.props);
        node.props
            .insert(CUSTOM_CSS_KEY.to_string(), Value::String(css.to_string()));
        self.commit(MutationKind::ApplyCustomCss)
    }

    /// Apply structured parameter edits and project them into the
    /// component's CSS, as one undo step. Unset fields of `params` keep
    /// their current values.
    pub fn apply_structured_params(&mut self, id: ComponentId, params: &StructuredParams) -> bool {
        let Some(node) = tree::find_by_id_mut(&mut self.document.components, id) else {
            tracing::warn!(%id, "apply_structured_params: component not found");
            return false;
        };
        let next = StructuredParams::from_props(&node.props).merged_with(params);
        let css = project_parameters_to_css(&next, node.custom_css());
        next.write_props(&mut node.props);
        if !css.is_empty() || node.props.contains_key(CUSTOM_CSS_KEY) {
            node.props.insert(CUSTOM_CSS_KEY.to_string(), Value::String(css));
        }
        self.commit(MutationKind::ApplyStructuredParams)
    }

    // ===== UI state =====

    /// Change the selection. Not recorded in history.
    ///
    /// Returns `false` if nothing changed or the id does not resolve.
    pub fn select_component(&mut self, id: Option<ComponentId>) -> bool {
        if let Some(id) = id {
            if self.document.get(id).is_none() {
                tracing::warn!(%id, "select_component: component not found");
                return false;
            }
        }
        self.set_selection(id)
    }

    /// Change the active breakpoint. Not recorded in history.
    pub fn set_device_mode(&mut self, mode: DeviceMode) -> bool {
        if self.document.device_mode == mode {
            return false;
        }
        self.document.device_mode = mode;
        self.emit(&StoreEvent::DeviceModeChanged { mode });
        true
    }

    /// Remove every component.
    pub fn clear_canvas(&mut self) -> bool {
        if self.document.components.is_empty() {
            return false;
        }
        self.document.components.clear();
        self.commit(MutationKind::ClearCanvas);
        self.set_selection(None);
        true
    }

    /// Replace the document with a persisted component list and start a
    /// fresh history from it.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate ids or children under a leaf type; the
    /// store is left unchanged.
    pub fn load_components(&mut self, components: Vec<ComponentNode>) -> BuilderResult<()> {
        tree::validate(&components)?;
        self.history.reset(components.clone());
        self.document.components = components;
        self.document.selected_component_id = None;
        tracing::info!(
            components = self.document.component_count(),
            "canvas hydrated"
        );
        self.emit(&StoreEvent::Hydrated);
        Ok(())
    }

    // ===== History =====

    /// Step back one history entry.
    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.history.undo() else {
            return false;
        };
        self.document.components = entry.components.clone();
        tracing::debug!(undo_depth = self.history.past_len(), "undo");
        self.emit(&StoreEvent::Undo);
        self.prune_selection();
        true
    }

    /// Step forward one history entry.
    pub fn redo(&mut self) -> bool {
        let Some(entry) = self.history.redo() else {
            return false;
        };
        self.document.components = entry.components.clone();
        tracing::debug!(redo_depth = self.history.future_len(), "redo");
        self.emit(&StoreEvent::Redo);
        self.prune_selection();
        true
    }

    // ===== Subscriptions =====

    /// Register a listener called after every observable change.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent, &CanvasDocument) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    // ===== Internals =====

    /// Record a history entry if the live components differ from the
    /// current snapshot.
    fn commit(&mut self, kind: MutationKind) -> bool {
        if self.history.current().components == self.document.components {
            tracing::debug!(?kind, "no observable change, history untouched");
            return false;
        }
        self.history.record(kind, self.document.components.clone());
        self.emit(&StoreEvent::ComponentsChanged { kind });
        true
    }

    fn set_selection(&mut self, selected: Option<ComponentId>) -> bool {
        if self.document.selected_component_id == selected {
            return false;
        }
        self.document.selected_component_id = selected;
        self.emit(&StoreEvent::SelectionChanged { selected });
        true
    }

    fn prune_selection(&mut self) {
        if self.document.selected_component_id.is_some() && self.document.selected().is_none() {
            self.set_selection(None);
        }
    }

    fn emit(&mut self, event: &StoreEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event, &self.document);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::document::DocumentState;
    use serde_json::json;

    fn map(value: Value) -> serde_json::Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => serde_json::Map::new(),
        }
    }

    #[test]
    fn test_add_selects_and_records() {
        let mut store = CanvasStore::new();
        let id = store
            .add_component(ComponentType::Button, None)
            .expect("added");
        assert_eq!(store.document().selected_component_id, Some(id));
        assert_eq!(store.document().state(), DocumentState::Populated);
        assert_eq!(store.history().past_len(), 1);
        assert_eq!(
            store.get_component(id).and_then(|n| n.props.get("text")),
            Some(&json!("Click Me"))
        );
    }

    #[test]
    fn test_add_under_leaf_is_ignored() {
        let mut store = CanvasStore::new();
        let button = store
            .add_component(ComponentType::Button, None)
            .expect("added");
        assert!(store.add_component(ComponentType::Text, Some(button)).is_none());
        assert!(store
            .add_component(ComponentType::Text, Some(ComponentId::new()))
            .is_none());
        assert_eq!(store.history().past_len(), 1);
    }

    #[test]
    fn test_insert_at_index() {
        let mut store = CanvasStore::new();
        let a = store.add_component(ComponentType::Text, None).expect("a");
        let b = store
            .insert_component(ComponentType::Image, None, 0)
            .expect("b");
        let ids: Vec<_> = store.components().iter().map(ComponentNode::id).collect();
        assert_eq!(ids, vec![b, a]);
    }

    #[test]
    fn test_props_merge_and_null_removal() {
        let mut store = CanvasStore::new();
        let id = store.add_component(ComponentType::Text, None).expect("added");
        assert!(store.update_component_props(id, map(json!({ "text": "Hi", "extra": 1 }))));
        assert!(store.update_component_props(id, map(json!({ "extra": null }))));
        let node = store.get_component(id).expect("node");
        assert_eq!(node.props.get("text"), Some(&json!("Hi")));
        assert!(node.props.get("extra").is_none());
    }

    #[test]
    fn test_noop_updates_do_not_record() {
        let mut store = CanvasStore::new();
        let id = store.add_component(ComponentType::Text, None).expect("added");
        let depth = store.history().past_len();

        assert!(!store.update_component_props(id, PropMap::new()));
        assert!(!store.update_component_props(id, map(json!({ "text": "Edit this text" }))));
        assert!(!store.update_component_style(id, map(json!({ "color": "#000000" }))));
        assert!(!store.update_component_props(ComponentId::new(), map(json!({ "a": 1 }))));
        assert!(!store.update_responsive_style(id, DeviceMode::Tablet, map(json!({ "gap": null }))));
        assert!(store.get_component(id).expect("node").style.tablet.is_none());
        assert_eq!(store.history().past_len(), depth);
    }

    #[test]
    fn test_style_targets_device_layer() {
        let mut store = CanvasStore::new();
        let id = store.add_component(ComponentType::Text, None).expect("added");
        store.set_device_mode(DeviceMode::Mobile);
        assert!(store.update_component_style(id, map(json!({ "fontSize": "0.75rem" }))));

        let node = store.get_component(id).expect("node");
        assert_eq!(node.style.base.get("fontSize"), Some(&json!("1rem")));
        assert_eq!(
            node.style.mobile.as_ref().and_then(|m| m.get("fontSize")),
            Some(&json!("0.75rem"))
        );

        assert!(store.update_component_style(id, map(json!({ "fontSize": null }))));
        assert!(store.get_component(id).expect("node").style.mobile.is_none());
    }

    #[test]
    fn test_delete_clears_nested_selection() {
        let mut store = CanvasStore::new();
        let section = store.add_component(ComponentType::Section, None).expect("section");
        let text = store
            .add_component(ComponentType::Text, Some(section))
            .expect("text");
        assert_eq!(store.document().selected_component_id, Some(text));

        assert!(store.delete_component(section));
        assert_eq!(store.document().selected_component_id, None);
        assert_eq!(store.document().state(), DocumentState::Empty);
        assert!(!store.delete_component(section));
    }

    #[test]
    fn test_move_component() {
        let mut store = CanvasStore::new();
        let section = store.add_component(ComponentType::Section, None).expect("section");
        let inner = store
            .add_component(ComponentType::Container, Some(section))
            .expect("inner");
        let text = store.add_component(ComponentType::Text, None).expect("text");

        assert!(store.move_component(text, Some(inner), 0));
        let location = tree::locate(store.components(), text).expect("located");
        assert_eq!(location.parent, Some(inner));

        assert!(!store.move_component(section, Some(inner), 0));
        assert!(!store.move_component(section, Some(section), 0));
        assert!(!store.move_component(inner, Some(text), 0));
        assert!(!store.move_component(text, Some(inner), 5));
    }

    #[test]
    fn test_duplicate_inserts_after_original() {
        let mut store = CanvasStore::new();
        let card = store.add_component(ComponentType::Card, None).expect("card");
        store.add_component(ComponentType::Text, Some(card));
        let copy = store.duplicate_component(card).expect("copy");

        assert_eq!(store.components().len(), 2);
        assert_eq!(store.components()[1].id(), copy);
        assert_eq!(store.components()[1].children.len(), 1);
        assert!(tree::duplicate_ids(store.components()).is_empty());
        assert_eq!(store.document().selected_component_id, Some(copy));
    }

    #[test]
    fn test_apply_custom_css_syncs_params() {
        let mut store = CanvasStore::new();
        let id = store.add_component(ComponentType::Text, None).expect("added");
        assert!(store.apply_custom_css(id, "opacity: 0.5; margin: 0 auto;"));
        let node = store.get_component(id).expect("node");
        assert_eq!(node.custom_css(), "opacity: 0.5; margin: 0 auto;");
        assert_eq!(node.props.get("opacity"), Some(&json!(50.0)));

        assert!(store.undo());
        assert_eq!(store.get_component(id).expect("node").custom_css(), "");
    }

    #[test]
    fn test_apply_structured_params_projects_css() {
        let mut store = CanvasStore::new();
        let id = store.add_component(ComponentType::Text, None).expect("added");
        store.apply_custom_css(id, "margin: 0 auto;");
        let params = StructuredParams {
            opacity: Some(80.0),
            ..StructuredParams::default()
        };
        assert!(store.apply_structured_params(id, &params));
        assert_eq!(
            store.get_component(id).expect("node").custom_css(),
            "margin: 0 auto;\nopacity: 0.8;"
        );
        assert!(!store.apply_structured_params(id, &params));
    }

    #[test]
    fn test_clear_canvas() {
        let mut store = CanvasStore::new();
        assert!(!store.clear_canvas());
        store.add_component(ComponentType::Text, None);
        assert!(store.clear_canvas());
        assert!(store.document().selected_component_id.is_none());
        assert!(store.undo());
        assert_eq!(store.components().len(), 1);
    }

    #[test]
    fn test_undo_prunes_stale_selection() {
        let mut store = CanvasStore::new();
        let id = store.add_component(ComponentType::Text, None).expect("added");
        assert!(store.undo());
        assert!(store.get_component(id).is_none());
        assert!(store.document().selected_component_id.is_none());
        assert!(store.redo());
        assert!(store.get_component(id).is_some());
    }

    #[test]
    fn test_selection_and_device_mode_not_recorded() {
        let mut store = CanvasStore::new();
        let id = store.add_component(ComponentType::Text, None).expect("added");
        let depth = store.history().past_len();
        assert!(store.select_component(None));
        assert!(store.select_component(Some(id)));
        assert!(!store.select_component(Some(ComponentId::new())));
        assert!(store.set_device_mode(DeviceMode::Tablet));
        assert!(!store.set_device_mode(DeviceMode::Tablet));
        assert_eq!(store.history().past_len(), depth);
    }

    #[test]
    fn test_load_components_resets_history() {
        let mut store = CanvasStore::new();
        store.add_component(ComponentType::Text, None);
        let nodes = vec![ComponentNode::from_template(ComponentType::Heading)];
        store.load_components(nodes.clone()).expect("valid");
        assert_eq!(store.components(), nodes.as_slice());
        assert!(!store.can_undo());

        let dup = vec![nodes[0].clone(), nodes[0].clone()];
        assert!(store.load_components(dup).is_err());
        assert_eq!(store.components(), nodes.as_slice());
    }

    #[test]
    fn test_subscribers_see_events() {
        let mut store = CanvasStore::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let sub = store.subscribe(move |event, doc| {
            sink.lock()
                .expect("lock")
                .push((event.clone(), doc.component_count()));
        });

        let id = store.add_component(ComponentType::Text, None).expect("added");
        store.undo();
        assert!(store.unsubscribe(sub));
        store.redo();

        let events = seen.lock().expect("lock").clone();
        assert_eq!(
            events,
            vec![
                (
                    StoreEvent::ComponentsChanged {
                        kind: MutationKind::AddComponent
                    },
                    1
                ),
                (StoreEvent::SelectionChanged { selected: Some(id) }, 1),
                (StoreEvent::Undo, 0),
                (StoreEvent::SelectionChanged { selected: None }, 0),
            ]
        );
    }
}
