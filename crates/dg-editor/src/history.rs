//! Undo/redo history.
//!
//! A single linear timeline of graph snapshots plus a cursor. Capturing
//! after an undo truncates the redo-able future before appending, so the
//! timeline never branches.
//!
//! Invariant: when `entries` is non-empty, `cursor < entries.len()`.

use dg_core::GraphSnapshot;

pub struct History {
    entries: Vec<GraphSnapshot>,
    cursor: usize,
    /// Maximum number of retained snapshots.
    max_depth: usize,
}

impl History {
    pub fn new(max_depth: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            max_depth: max_depth.max(1),
        }
    }

    /// Append a copy of `snapshot` after the cursor, discarding any
    /// redo-able entries, and move the cursor onto it.
    pub fn capture(&mut self, snapshot: &GraphSnapshot) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(snapshot.clone());
        if self.entries.len() > self.max_depth {
            self.entries.remove(0);
        }
        self.cursor = self.entries.len() - 1;
        log::debug!(
            "history: captured entry {} ({} nodes, {} edges)",
            self.cursor,
            snapshot.nodes.len(),
            snapshot.edges.len()
        );
    }

    /// Step back one entry. Returns the snapshot to install, or `None` at
    /// the start of the timeline.
    pub fn undo(&mut self) -> Option<GraphSnapshot> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        log::debug!("history: undo to entry {}", self.cursor);
        Some(self.entries[self.cursor].clone())
    }

    /// Step forward one entry. Returns the snapshot to install, or `None`
    /// when already at the newest entry.
    pub fn redo(&mut self) -> Option<GraphSnapshot> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        log::debug!("history: redo to entry {}", self.cursor);
        Some(self.entries[self.cursor].clone())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        !self.entries.is_empty() && self.cursor < self.entries.len() - 1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The snapshot under the cursor.
    pub fn current(&self) -> Option<&GraphSnapshot> {
        self.entries.get(self.cursor)
    }

    pub fn entries(&self) -> &[GraphSnapshot] {
        &self.entries
    }
}
