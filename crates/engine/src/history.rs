//! Modeled session history.
//!
//! A linear stack of entries with a cursor, matching the browser contract
//! the navigation layer relies on: `replace` rewrites the current entry,
//! `push` drops the forward tail and appends, and moving the cursor yields
//! a pop event carrying whatever state the target entry holds. Entries
//! created outside the navigation layer carry no state (`None`), which is
//! exactly the case the orchestrator must treat as recoverable only by a
//! full reload.

use serde::{Deserialize, Serialize};

/// State attached to a history entry by the navigation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryState {
    pub route: String,
}

impl HistoryState {
    pub fn new(route: impl Into<String>) -> Self {
        Self { route: route.into() }
    }
}

/// Delivered when the cursor moves onto an existing entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopEvent {
    /// `None` when the entry was created outside the navigation layer.
    pub state: Option<HistoryState>,
}

/// A session history stack. Starts with one state-less entry, the way a
/// freshly loaded document does.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Option<HistoryState>>,
    index: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self { entries: vec![None], index: 0 }
    }

    /// Rewrite the current entry's state without moving the cursor.
    pub fn replace(&mut self, state: HistoryState) {
        self.entries[self.index] = Some(state);
    }

    /// Drop any forward entries, append a new one, and move onto it.
    pub fn push(&mut self, state: HistoryState) {
        self.entries.truncate(self.index + 1);
        self.entries.push(Some(state));
        self.index += 1;
    }

    /// Move the cursor back one entry. `None` when already at the oldest.
    pub fn back(&mut self) -> Option<PopEvent> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(PopEvent { state: self.entries[self.index].clone() })
    }

    /// Move the cursor forward one entry. `None` when already at the newest.
    pub fn forward(&mut self) -> Option<PopEvent> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(PopEvent { state: self.entries[self.index].clone() })
    }

    /// State of the entry under the cursor.
    pub fn current(&self) -> Option<&HistoryState> {
        self.entries[self.index].as_ref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
