//! Linear undo/redo history of component snapshots.
//!
//! Entry 0 is the baseline (an empty canvas or the hydrated page). Every
//! recorded mutation appends a full snapshot taken right after it
//! completed, and the cursor always points at the snapshot matching the
//! live document. Recording while the cursor is behind the newest entry
//! discards the redo tail: branching history is not kept.

use crate::node::ComponentNode;

/// Default number of undo steps kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// The store operation that produced a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// Initial state (empty canvas or hydrated page).
    Baseline,
    /// `add_component` / `insert_component`.
    AddComponent,
    /// `update_component_props`.
    UpdateProps,
    /// `update_responsive_style` / `update_component_style`.
    UpdateStyle,
    /// `delete_component`.
    DeleteComponent,
    /// `move_component`.
    MoveComponent,
    /// `duplicate_component`.
    DuplicateComponent,
    /// `apply_custom_css`.
    ApplyCustomCss,
    /// `apply_structured_params`.
    ApplyStructuredParams,
    /// `clear_canvas`.
    ClearCanvas,
}

/// One undoable checkpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Operation that produced this snapshot.
    pub kind: MutationKind,
    /// The component forest right after the operation.
    pub components: Vec<ComponentNode>,
}

/// Snapshot history with a cursor.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,
    cursor: usize,
    limit: usize,
}

impl History {
    /// Create a history whose baseline is `components`.
    #[must_use]
    pub fn new(components: Vec<ComponentNode>) -> Self {
        Self::with_limit(components, DEFAULT_HISTORY_LIMIT)
    }

    /// Create a history keeping at most `limit` undo steps (at least one).
    #[must_use]
    pub fn with_limit(components: Vec<ComponentNode>, limit: usize) -> Self {
        Self {
            entries: vec![HistoryEntry {
                kind: MutationKind::Baseline,
                components,
            }],
            cursor: 0,
            limit: limit.max(1),
        }
    }

    /// Drop everything and start over from a new baseline.
    pub fn reset(&mut self, components: Vec<ComponentNode>) {
        self.entries.clear();
        self.entries.push(HistoryEntry {
            kind: MutationKind::Baseline,
            components,
        });
        self.cursor = 0;
    }

    /// The entry matching the live document.
    #[must_use]
    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.cursor]
    }

    /// Append a checkpoint, truncating any redo tail first.
    pub fn record(&mut self, kind: MutationKind, components: Vec<ComponentNode>) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(HistoryEntry { kind, components });
        if self.entries.len() > self.limit + 1 {
            let overflow = self.entries.len() - (self.limit + 1);
            self.entries.drain(..overflow);
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Step back one entry. Returns the new current entry, or `None` when
    /// already at the oldest one.
    pub fn undo(&mut self) -> Option<&HistoryEntry> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Step forward one entry. Returns the new current entry, or `None` when
    /// already at the newest one.
    pub fn redo(&mut self) -> Option<&HistoryEntry> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor])
    }

    /// Whether an undo step is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether a redo step is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Number of undo steps available.
    #[must_use]
    pub fn past_len(&self) -> usize {
        self.cursor
    }

    /// Number of redo steps available.
    #[must_use]
    pub fn future_len(&self) -> usize {
        self.entries.len() - self.cursor - 1
    }

    /// Maximum number of undo steps kept.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::ComponentType;

    fn snapshot(n: usize) -> Vec<ComponentNode> {
        (0..n).map(|_| ComponentNode::new(ComponentType::Text)).collect()
    }

    #[test]
    fn test_undo_redo_walks_cursor() {
        let mut history = History::new(Vec::new());
        let one = snapshot(1);
        let two = snapshot(2);
        history.record(MutationKind::AddComponent, one.clone());
        history.record(MutationKind::AddComponent, two.clone());

        assert_eq!(history.undo().map(|e| e.components.clone()), Some(one.clone()));
        assert_eq!(history.undo().map(|e| e.components.len()), Some(0));
        assert!(history.undo().is_none());

        assert_eq!(history.redo().map(|e| e.components.clone()), Some(one));
        assert_eq!(history.redo().map(|e| e.components.clone()), Some(two));
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_record_truncates_redo_tail() {
        let mut history = History::new(Vec::new());
        history.record(MutationKind::AddComponent, snapshot(1));
        history.record(MutationKind::AddComponent, snapshot(2));
        history.undo();
        history.undo();
        assert_eq!(history.future_len(), 2);

        history.record(MutationKind::AddComponent, snapshot(3));
        assert!(!history.can_redo());
        assert_eq!(history.past_len(), 1);
        assert_eq!(history.current().components.len(), 3);
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::with_limit(Vec::new(), 3);
        for n in 1..=5 {
            history.record(MutationKind::AddComponent, snapshot(n));
        }
        assert_eq!(history.past_len(), 3);
        while history.undo().is_some() {}
        assert_eq!(history.current().components.len(), 2);
    }

    #[test]
    fn test_reset_starts_new_baseline() {
        let mut history = History::new(Vec::new());
        history.record(MutationKind::AddComponent, snapshot(1));
        history.reset(snapshot(4));
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.current().kind, MutationKind::Baseline);
        assert_eq!(history.current().components.len(), 4);
    }
}
