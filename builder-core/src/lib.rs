//! # Page Builder Core
//!
//! Editor-side logic for a visual page builder: the component tree, the
//! CSS/structured-parameter sync engine and the undoable document store.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 CanvasStore                 │
//! ├─────────────────────────────────────────────┤
//! │  Document          │  History               │
//! │  - Component tree  │  - Snapshots           │
//! │  - Selection       │  - Undo / redo cursor  │
//! │  - Device mode     │  - Depth limit         │
//! ├─────────────────────────────────────────────┤
//! │  Style sync                                 │
//! │  - Declaration parsing   - Extractors       │
//! │  - CSS <-> parameters    - Style merging    │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod document;
pub mod error;
pub mod history;
pub mod node;
pub mod store;
pub mod style;
pub mod tree;

pub use document::{CanvasDocument, DeviceMode, DocumentState};
pub use error::{BuilderError, BuilderResult};
pub use history::{History, HistoryEntry, MutationKind, DEFAULT_HISTORY_LIMIT};
pub use node::{
    ComponentId, ComponentNode, ComponentType, PropMap, ResponsiveStyle, StyleMap, CUSTOM_CSS_KEY,
};
pub use store::{CanvasStore, StoreEvent, StoreListener, SubscriptionId};
pub use style::{
    merge_styles, parse_all_properties, parse_declaration_block, project_parameters_to_css,
    resolve_node_style, sync_css_to_parameters, StructuredParams,
};
pub use tree::{FlatNode, NodeLocation};

/// Builder core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Milliseconds since the Unix epoch, or 0 if the clock is before it.
#[must_use]
pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}
