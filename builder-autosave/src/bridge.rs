//! Wiring between a [`CanvasStore`] and an auto-save handle.

use builder_core::{CanvasStore, ComponentNode, StoreEvent, SubscriptionId};

use crate::controller::AutoSaveHandle;

/// Feed component snapshots from `store` into `handle`.
///
/// Component mutations, undo and redo report a change. Hydration marks the
/// loaded tree as saved. Selection and device changes are ignored.
pub fn attach_store(
    store: &mut CanvasStore,
    handle: &AutoSaveHandle<Vec<ComponentNode>>,
) -> SubscriptionId {
    let handle = handle.clone();
    store.subscribe(move |event, document| {
        let sent = match event {
            StoreEvent::Hydrated => handle.mark_saved(document.components.clone()),
            event if event.touches_components() => {
                handle.notify_change(document.components.clone())
            }
            _ => Ok(()),
        };
        if let Err(err) = sent {
            tracing::debug!(error = %err, "Auto-save handle closed");
        }
    })
}
