use crate::graph::Graph;
use std::collections::VecDeque;

pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Bounded undo/redo stacks of whole-graph snapshots.
///
/// Snapshots are plain `Graph` values; node metadata is shared through `Arc`s
/// so a snapshot costs one copy of the per-node values.
#[derive(Debug, Clone)]
pub struct History {
    undo: VecDeque<Graph>,
    redo: Vec<Graph>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Records the state as it was *before* a mutation. Drops the oldest
    /// snapshot past capacity and invalidates the redo stack.
    pub fn record(&mut self, before: Graph) {
        self.undo.push_back(before);
        if self.undo.len() > self.capacity {
            self.undo.pop_front();
        }
        self.redo.clear();
    }

    /// Swaps `current` for the most recent undo snapshot.
    pub fn undo(&mut self, current: &Graph) -> Option<Graph> {
        let previous = self.undo.pop_back()?;
        self.redo.push(current.clone());
        Some(previous)
    }

    /// Swaps `current` for the most recent redo snapshot.
    pub fn redo(&mut self, current: &Graph) -> Option<Graph> {
        let next = self.redo.pop()?;
        self.undo.push_back(current.clone());
        if self.undo.len() > self.capacity {
            self.undo.pop_front();
        }
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
