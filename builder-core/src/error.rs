//! Error types for editor operations.

use thiserror::Error;

use crate::node::{ComponentId, ComponentType};

/// Result type for editor operations.
pub type BuilderResult<T> = Result<T, BuilderError>;

/// Errors that can occur in editor operations.
///
/// Store mutations never surface these to their callers: a missing target
/// is logged and ignored. They are returned by hydration, serialization and
/// the lower-level tree helpers.
#[derive(Debug, Error)]
pub enum BuilderError {
    /// Component not found in the tree.
    #[error("Component not found: {0}")]
    ComponentNotFound(ComponentId),

    /// The same id appears more than once in a component tree.
    #[error("Duplicate component id: {0}")]
    DuplicateId(ComponentId),

    /// A leaf component was given children.
    #[error("Component {id} of type {component_type} cannot have children")]
    LeafWithChildren {
        /// Offending component.
        id: ComponentId,
        /// Its (leaf) type.
        component_type: ComponentType,
    },

    /// Snapshot serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
