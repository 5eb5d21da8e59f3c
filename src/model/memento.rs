// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Bounded linear undo/redo history of curve snapshots

use std::collections::VecDeque;
use std::sync::Arc;

/// Default number of snapshots kept per surface
pub const DEFAULT_HISTORY_CAPACITY: usize = 64;

/// Immutable committed state of a surface boundary
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CurveSnapshot {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl CurveSnapshot {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self { x, y }
    }
}

/// Arena of snapshots plus a cursor pointing at the live state.
///
/// Committing after stepping back discards everything past the cursor.
/// When the arena is full the oldest snapshot is dropped.
#[derive(Debug, Clone)]
pub struct Memento {
    snapshots: VecDeque<Arc<CurveSnapshot>>,
    cursor: usize,
    capacity: usize,
}

impl Memento {
    /// History seeded with the initial state
    pub fn new(initial: CurveSnapshot, capacity: usize) -> Self {
        let mut snapshots = VecDeque::with_capacity(capacity.max(1));
        snapshots.push_back(Arc::new(initial));
        Self {
            snapshots,
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    pub fn with_default_capacity(initial: CurveSnapshot) -> Self {
        Self::new(initial, DEFAULT_HISTORY_CAPACITY)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn current(&self) -> &CurveSnapshot {
        &self.snapshots[self.cursor]
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Record a new committed state. Returns `false` if it equals the
    /// current one and nothing was recorded.
    pub fn push(&mut self, snapshot: CurveSnapshot) -> bool {
        if *self.current() == snapshot {
            return false;
        }

        let stale = self.snapshots.len() - self.cursor - 1;
        if stale > 0 {
            tracing::debug!(discarded = stale, "truncating redo history");
            self.snapshots.truncate(self.cursor + 1);
        }

        self.snapshots.push_back(Arc::new(snapshot));
        if self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
        }
        self.cursor = self.snapshots.len() - 1;
        true
    }

    /// Step back and return the snapshot to restore
    pub fn get_prev(&mut self) -> Option<Arc<CurveSnapshot>> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(Arc::clone(&self.snapshots[self.cursor]))
    }

    /// Step forward and return the snapshot to restore
    pub fn get_next(&mut self) -> Option<Arc<CurveSnapshot>> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(Arc::clone(&self.snapshots[self.cursor]))
    }
}

impl Default for Memento {
    fn default() -> Self {
        Self::with_default_capacity(CurveSnapshot::default())
    }
}
