//! The canvas document: the component forest plus UI-only editor state.

use serde::{Deserialize, Serialize};

use crate::error::{BuilderError, BuilderResult};
use crate::node::{ComponentId, ComponentNode};
use crate::tree;

/// Responsive breakpoint the editor is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceMode {
    /// Full-width layout; style edits target the base layer.
    #[default]
    Desktop,
    /// Tablet layout.
    Tablet,
    /// Mobile layout.
    Mobile,
}

/// Coarse lifecycle state of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentState {
    /// No components.
    Empty,
    /// At least one component.
    Populated,
}

/// The complete editor document.
///
/// Only `components` is persisted and undoable. Selection and device mode
/// are UI state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanvasDocument {
    /// Top-level components in render order.
    pub components: Vec<ComponentNode>,
    /// Currently selected component, anywhere in the tree.
    pub selected_component_id: Option<ComponentId>,
    /// Active breakpoint.
    pub device_mode: DeviceMode,
}

impl CanvasDocument {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrate a document from a persisted component list.
    ///
    /// # Errors
    ///
    /// Returns an error if the list violates id uniqueness or puts children
    /// under a leaf component.
    pub fn from_components(components: Vec<ComponentNode>) -> BuilderResult<Self> {
        tree::validate(&components)?;
        Ok(Self {
            components,
            ..Self::default()
        })
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> DocumentState {
        if self.components.is_empty() {
            DocumentState::Empty
        } else {
            DocumentState::Populated
        }
    }

    /// Look a component up anywhere in the tree.
    #[must_use]
    pub fn get(&self, id: ComponentId) -> Option<&ComponentNode> {
        tree::find_by_id(&self.components, id)
    }

    /// The selected component, if the selection still resolves.
    #[must_use]
    pub fn selected(&self) -> Option<&ComponentNode> {
        self.selected_component_id.and_then(|id| self.get(id))
    }

    /// Total number of components in the tree.
    #[must_use]
    pub fn component_count(&self) -> usize {
        tree::count(&self.components)
    }

    /// Serialize the component list (the persisted unit) to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> BuilderResult<String> {
        serde_json::to_string(&self.components).map_err(BuilderError::Serialization)
    }

    /// Deserialize and validate a component list from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the tree is invalid.
    pub fn from_json(json: &str) -> BuilderResult<Self> {
        let components: Vec<ComponentNode> = serde_json::from_str(json)?;
        Self::from_components(components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::ComponentType;

    #[test]
    fn test_state_transitions_with_content() {
        let mut doc = CanvasDocument::new();
        assert_eq!(doc.state(), DocumentState::Empty);
        doc.components.push(ComponentNode::new(ComponentType::Text));
        assert_eq!(doc.state(), DocumentState::Populated);
    }

    #[test]
    fn test_json_round_trip() {
        let doc = CanvasDocument::from_components(vec![ComponentNode::from_template(
            ComponentType::Card,
        )
        .with_child(ComponentNode::from_template(ComponentType::Text))])
        .expect("valid tree");

        let json = doc.to_json().expect("serialize");
        let restored = CanvasDocument::from_json(&json).expect("deserialize");
        assert_eq!(restored.components, doc.components);
        assert_eq!(restored.component_count(), 2);
    }

    #[test]
    fn test_from_json_rejects_duplicate_ids() {
        let node = ComponentNode::new(ComponentType::Text);
        let json = serde_json::to_string(&vec![node.clone(), node]).expect("serialize");
        assert!(matches!(
            CanvasDocument::from_json(&json),
            Err(BuilderError::DuplicateId(_))
        ));
    }

    #[test]
    fn test_device_mode_wire_names() {
        assert_eq!(
            serde_json::to_string(&DeviceMode::Tablet).expect("serialize"),
            "\"tablet\""
        );
    }
}
