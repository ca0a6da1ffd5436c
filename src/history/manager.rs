//! History manager: snapshots plus a cursor.

use super::snapshot::Snapshot;

/// Snapshot stack with undo/redo semantics.
///
/// `cursor` is `None` until the first push. Every index up to the cursor was
/// live at some point; anything after it is a redo branch that disappears on
/// the next push.
#[derive(Debug, Clone)]
pub struct HistoryManager<S> {
    snapshots: Vec<Snapshot<S>>,
    cursor: Option<usize>,
}

impl<S> Default for HistoryManager<S> {
    fn default() -> Self {
        Self {
            snapshots: Vec::new(),
            cursor: None,
        }
    }
}

impl<S: Clone> HistoryManager<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Index of the snapshot matching the live state
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Snapshot under the cursor
    pub fn current(&self) -> Option<&Snapshot<S>> {
        self.cursor.and_then(|idx| self.snapshots.get(idx))
    }

    pub fn get(&self, index: usize) -> Option<&Snapshot<S>> {
        self.snapshots.get(index)
    }

    /// True when there is nothing to replay forward
    pub fn is_at_latest(&self) -> bool {
        match self.cursor {
            Some(idx) => idx + 1 == self.snapshots.len(),
            None => self.snapshots.is_empty(),
        }
    }

    pub fn can_back(&self) -> bool {
        self.cursor.is_some_and(|idx| idx > 0)
    }

    pub fn can_forward(&self) -> bool {
        !self.is_at_latest()
    }

    /// Store `state` after the cursor and move onto it.
    ///
    /// Any snapshots beyond the cursor are discarded first. The step number
    /// continues from the snapshot under the cursor.
    pub fn push(&mut self, state: S) -> &Snapshot<S> {
        let discarded = self.truncate_after_cursor();
        let step = self.current().map(|s| s.step + 1).unwrap_or(0);

        self.snapshots.push(Snapshot::new(step, state));
        let idx = self.snapshots.len() - 1;
        self.cursor = Some(idx);

        tracing::debug!(step, index = idx, discarded, "Pushed snapshot");
        &self.snapshots[idx]
    }

    /// Move the cursor to `index` without touching the stored sequence.
    pub fn goto(&mut self, index: usize) -> Option<&Snapshot<S>> {
        if index >= self.snapshots.len() {
            return None;
        }
        self.cursor = Some(index);
        tracing::debug!(index, "Moved history cursor");
        self.snapshots.get(index)
    }

    /// Step the cursor back one snapshot; `None` at the earliest one.
    pub fn back(&mut self) -> Option<&Snapshot<S>> {
        let cursor = self.cursor;
        match cursor {
            Some(idx) if idx > 0 => self.goto(idx - 1),
            _ => None,
        }
    }

    /// Step the cursor forward through stored snapshots; `None` at the latest.
    pub fn forward(&mut self) -> Option<&Snapshot<S>> {
        let next = self.cursor.map(|idx| idx + 1)?;
        self.goto(next)
    }

    /// Drop the redo branch, returning how many snapshots were discarded.
    pub fn truncate_after_cursor(&mut self) -> usize {
        let keep = self.cursor.map(|idx| idx + 1).unwrap_or(0);
        let discarded = self.snapshots.len().saturating_sub(keep);
        self.snapshots.truncate(keep);
        discarded
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.cursor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_with(states: &[u32]) -> HistoryManager<u32> {
        let mut history = HistoryManager::new();
        for &s in states {
            history.push(s);
        }
        history
    }

    #[test]
    fn test_new_history_is_empty() {
        let history: HistoryManager<u32> = HistoryManager::new();
        assert!(history.is_empty());
        assert_eq!(history.cursor(), None);
        assert!(history.is_at_latest());
        assert!(!history.can_back());
        assert!(!history.can_forward());
    }

    #[test]
    fn test_push_advances_cursor_and_numbers_steps() {
        let history = history_with(&[10, 11, 12]);
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), Some(2));
        let steps: Vec<_> = (0..3).map(|i| history.get(i).unwrap().step).collect();
        assert_eq!(steps, vec![0, 1, 2]);
    }

    #[test]
    fn test_back_and_forward_do_not_change_len() {
        let mut history = history_with(&[10, 11, 12]);

        assert_eq!(history.back().map(|s| *s.state()), Some(11));
        assert_eq!(history.back().map(|s| *s.state()), Some(10));
        assert!(history.back().is_none());
        assert_eq!(history.cursor(), Some(0));

        assert_eq!(history.forward().map(|s| *s.state()), Some(11));
        assert_eq!(history.len(), 3);
        assert!(history.can_forward());
    }

    #[test]
    fn test_forward_at_latest_is_none() {
        let mut history = history_with(&[1, 2]);
        assert!(history.forward().is_none());
        assert_eq!(history.cursor(), Some(1));
    }

    #[test]
    fn test_push_after_back_truncates_redo_branch() {
        let mut history = history_with(&[0, 1, 2, 3, 4]);
        history.back();
        history.back();
        assert_eq!(history.cursor(), Some(2));

        let snap = history.push(99);
        assert_eq!(snap.step, 3);
        assert_eq!(*snap.state(), 99);
        assert_eq!(history.len(), 4);
        assert_eq!(history.cursor(), Some(3));
        assert!(history.is_at_latest());
    }

    #[test]
    fn test_goto_out_of_range() {
        let mut history = history_with(&[0, 1]);
        assert!(history.goto(5).is_none());
        assert_eq!(history.cursor(), Some(1));
        assert_eq!(history.goto(0).map(|s| s.step), Some(0));
    }

    #[test]
    fn test_truncate_after_cursor_reports_count() {
        let mut history = history_with(&[0, 1, 2, 3]);
        history.goto(1);
        assert_eq!(history.truncate_after_cursor(), 2);
        assert_eq!(history.len(), 2);
        assert_eq!(history.truncate_after_cursor(), 0);
    }

    #[test]
    fn test_restore_returns_independent_copy() {
        let mut history: HistoryManager<Vec<u32>> = HistoryManager::new();
        history.push(vec![1, 2]);

        let mut live = history.current().unwrap().restore();
        live.push(3);

        assert_eq!(history.current().unwrap().state(), &vec![1, 2]);
    }

    #[test]
    fn test_clear_resets_cursor() {
        let mut history = history_with(&[0, 1]);
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.cursor(), None);
    }
}
