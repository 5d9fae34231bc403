use crate::models::SlotRegistry;

/// Kind of action that produced a history entry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionType {
    /// State the session started from (new or loaded document)
    Baseline,
    AddSlot,
    SetGlyph,
    RemoveSlot,
    Cut,
    Paste,
}

/// Immutable copy of the whole slot registry at one point in time
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    pub action_type: ActionType,
    state: SlotRegistry,
}

impl HistoryEntry {
    pub fn state(&self) -> &SlotRegistry {
        &self.state
    }
}

/// Linear undo/redo over registry snapshots
///
/// The cursor points at the entry matching what the caller last applied to
/// the registry; `None` means no entry has been recorded yet. The manager
/// never derives state itself, it only hands back snapshots it was given.
///
/// There is no capacity limit: every recorded entry is kept until it is
/// truncated away by a new action after an undo.
#[derive(Clone, Debug, Default)]
pub struct HistoryManager {
    entries: Vec<HistoryEntry>,
    cursor: Option<usize>,
}

impl HistoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a snapshot, discarding any redo-able future first
    pub fn record(&mut self, action_type: ActionType, state: SlotRegistry) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        if keep < self.entries.len() {
            log::debug!(
                "Discarding {} redo entries",
                self.entries.len() - keep
            );
            self.entries.truncate(keep);
        }

        self.entries.push(HistoryEntry { action_type, state });
        self.cursor = Some(self.entries.len() - 1);
    }

    /// Step back one entry and return it, or `None` at the first entry
    pub fn undo(&mut self) -> Option<&HistoryEntry> {
        let current = self.cursor?;
        if current == 0 {
            return None;
        }
        self.cursor = Some(current - 1);
        self.entries.get(current - 1)
    }

    /// Step forward one entry and return it, or `None` at the tail
    pub fn redo(&mut self) -> Option<&HistoryEntry> {
        if !self.can_redo() {
            return None;
        }
        let next = self.cursor.map_or(0, |c| c + 1);
        self.cursor = Some(next);
        self.entries.get(next)
    }

    /// Entry the cursor points at
    pub fn current(&self) -> Option<&HistoryEntry> {
        self.cursor.and_then(|c| self.entries.get(c))
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(c) if c > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.cursor.map_or(0, |c| c + 1) < self.entries.len()
    }

    /// Number of available undo steps
    pub fn undo_count(&self) -> usize {
        self.cursor.unwrap_or(0)
    }

    /// Number of available redo steps
    pub fn redo_count(&self) -> usize {
        self.entries.len() - self.cursor.map_or(0, |c| c + 1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all history
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RasterSnapshot;

    fn raster(value: u8) -> RasterSnapshot {
        RasterSnapshot::from_rgba(1, 1, vec![value, 0, 0, 255]).unwrap()
    }

    /// States S0..=Sn where each step sets one more glyph
    fn build_states(n: u8) -> Vec<SlotRegistry> {
        let mut registry = SlotRegistry::new();
        let mut states = vec![registry.clone()];
        for i in 0..n {
            registry.set_glyph(&format!("c{}", i), raster(i));
            states.push(registry.clone());
        }
        states
    }

    fn recorded(states: &[SlotRegistry]) -> HistoryManager {
        let mut history = HistoryManager::new();
        history.record(ActionType::Baseline, states[0].clone());
        for state in &states[1..] {
            history.record(ActionType::SetGlyph, state.clone());
        }
        history
    }

    #[test]
    fn test_initial_state() {
        let mut history = HistoryManager::new();
        assert_eq!(history.cursor(), None);
        assert!(history.is_empty());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert_eq!(history.cursor(), None);
    }

    #[test]
    fn test_undo_at_first_entry_is_noop() {
        let mut history = HistoryManager::new();
        history.record(ActionType::Baseline, SlotRegistry::new());
        assert_eq!(history.cursor(), Some(0));
        assert!(history.undo().is_none());
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn test_undo_redo_walks_every_state() {
        let states = build_states(4);
        let mut history = recorded(&states);

        for i in (0..4).rev() {
            let entry = history.undo().unwrap();
            assert_eq!(entry.state(), &states[i]);
        }
        assert!(history.undo().is_none());

        for i in 1..=4 {
            let entry = history.redo().unwrap();
            assert_eq!(entry.state(), &states[i]);
        }
        assert!(history.redo().is_none());
        assert_eq!(history.current().unwrap().state(), &states[4]);
    }

    #[test]
    fn test_record_after_undo_truncates_future() {
        let states = build_states(4);
        let mut history = recorded(&states);

        history.undo();
        history.undo();
        assert_eq!(history.redo_count(), 2);

        let mut branch = states[2].clone();
        branch.add_slot("new");
        history.record(ActionType::AddSlot, branch.clone());

        assert_eq!(history.len(), 4);
        assert!(!history.can_redo());
        assert!(history.redo().is_none());
        assert_eq!(history.current().unwrap().state(), &branch);
        assert!(history
            .entries
            .iter()
            .all(|e| e.state() != &states[3] && e.state() != &states[4]));
    }

    #[test]
    fn test_counts() {
        let states = build_states(3);
        let mut history = recorded(&states);
        assert_eq!(history.undo_count(), 3);
        assert_eq!(history.redo_count(), 0);

        history.undo();
        assert_eq!(history.undo_count(), 2);
        assert_eq!(history.redo_count(), 1);

        history.clear();
        assert_eq!(history.undo_count(), 0);
        assert_eq!(history.redo_count(), 0);
        assert_eq!(history.cursor(), None);
    }

    #[test]
    fn test_no_capacity_limit() {
        let mut history = HistoryManager::new();
        for _ in 0..500 {
            history.record(ActionType::AddSlot, SlotRegistry::new());
        }
        assert_eq!(history.len(), 500);
        assert_eq!(history.undo_count(), 499);
    }
}
