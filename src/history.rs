//! Undo/redo history
//!
//! Two bounded stacks of buffer snapshots. Simpler than a branching undo
//! tree: every mutating action pushes exactly one snapshot and clears redo,
//! which is all this buffer's undo/redo needs to support.

use crate::position::Position;

/// Maximum number of undo entries retained; the oldest is dropped on overflow.
pub const UNDO_CAPACITY: usize = 100;

/// A captured `{lines, cursor}` state for undo/redo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub lines: Vec<String>,
    pub cursor: Position,
}

impl Snapshot {
    #[must_use]
    pub fn new(lines: Vec<String>, cursor: Position) -> Self {
        Self { lines, cursor }
    }
}

/// Bounded undo/redo history.
#[derive(Debug, Clone)]
pub struct History {
    undo: Vec<Snapshot>,
    redo: Vec<Snapshot>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(UNDO_CAPACITY)
    }
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A history bounded to `capacity` undo entries rather than the default
    /// [`UNDO_CAPACITY`] (see [`crate::config::BufferConfig::undo_capacity`]).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            capacity,
        }
    }

    /// Push a snapshot onto the undo stack, dropping the oldest entries if
    /// the stack is at (or over, for a shrunk capacity) capacity, and clear
    /// the redo stack.
    pub fn push(&mut self, snapshot: Snapshot) {
        self.undo.push(snapshot);
        while self.undo.len() > self.capacity {
            self.undo.remove(0);
        }
        self.redo.clear();
    }

    /// Pop the most recent undo snapshot, pushing `current` onto redo.
    /// Returns `None` (no-op) if the undo stack is empty.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let snapshot = self.undo.pop()?;
        self.redo.push(current);
        Some(snapshot)
    }

    /// Pop the most recent redo snapshot, pushing `current` onto undo.
    /// Returns `None` (no-op) if the redo stack is empty.
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let snapshot = self.redo.pop()?;
        self.undo.push(current);
        Some(snapshot)
    }

    #[must_use]
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    #[must_use]
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
