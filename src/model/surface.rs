// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Editable layer boundary with split planes and undo history

use super::command::{Outcome, SurfaceCommand};
use super::memento::{CurveSnapshot, Memento, DEFAULT_HISTORY_CAPACITY};
use super::split::Split;
use crate::geometry::{
    self, clamp_to_border, nearest_edge, nearest_vertex_within, Edge, LineSegment, Point, Size,
    DEFAULT_PICK_RADIUS,
};
use serde::{Deserialize, Serialize};

/// A surface owns at most this many splits
pub const MAX_SPLITS: usize = 2;

/// Side of the square drawing area in plot units
pub const DEFAULT_PLOT_SCALE: f64 = 100.0;

/// Editor parameters a surface needs at runtime. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSettings {
    pub plot_scale: f64,
    pub pick_radius: f64,
    pub history_capacity: usize,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            plot_scale: DEFAULT_PLOT_SCALE,
            pick_radius: DEFAULT_PICK_RADIUS,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
enum DrawState {
    #[default]
    Idle,
    Drawing {
        start: (f64, f64),
        stroke: Vec<(f64, f64)>,
    },
}

/// Split with only some endpoints placed so far
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingSplit {
    pub a: Option<Point>,
    pub b: Option<Point>,
    pub from_start: bool,
}

/// Persisted layout of a surface
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceRecord {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub size: Size,
    pub splits: Vec<Split>,
    pub primary: bool,
    pub z: f64,
}

impl Default for SurfaceRecord {
    fn default() -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
            size: Size::default(),
            splits: Vec::new(),
            primary: true,
            z: 0.0,
        }
    }
}

/// One geological layer boundary: an implicitly closed polyline stored as
/// parallel `x`/`y` sequences.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "SurfaceRecord", into = "SurfaceRecord")]
pub struct Surface {
    x: Vec<f64>,
    y: Vec<f64>,
    pub size: Size,
    splits: Vec<Split>,
    /// `false` for layers synthesized between user-authored ones
    pub primary: bool,
    /// Layer elevation
    pub z: f64,
    memento: Memento,
    draw: DrawState,
    pending_split: Option<PendingSplit>,
    settings: SurfaceSettings,
}

impl Surface {
    pub fn new(size: Size) -> Self {
        Self::with_settings(size, SurfaceSettings::default())
    }

    pub fn with_settings(size: Size, settings: SurfaceSettings) -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
            size,
            splits: Vec::new(),
            primary: true,
            z: 0.0,
            memento: Memento::new(CurveSnapshot::default(), settings.history_capacity),
            draw: DrawState::Idle,
            pending_split: None,
            settings,
        }
    }

    /// New primary surface with the boundary, size, elevation and settings
    /// of `other`. Splits and history are not carried over.
    pub fn derived_from(other: &Surface) -> Self {
        let mut surface = Self::with_settings(other.size, other.settings);
        surface.x = other.x.clone();
        surface.y = other.y.clone();
        surface.z = other.z;
        surface.reset_history();
        surface
    }

    pub fn settings(&self) -> SurfaceSettings {
        self.settings
    }

    /// Replace runtime settings. A changed history capacity restarts the
    /// history from the current curve.
    pub fn set_settings(&mut self, settings: SurfaceSettings) {
        let capacity_changed = settings.history_capacity != self.settings.history_capacity;
        self.settings = settings;
        if capacity_changed {
            self.reset_history();
        }
    }

    pub fn curve(&self) -> (&[f64], &[f64]) {
        (&self.x, &self.y)
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.x.iter().zip(&self.y).map(|(&x, &y)| Point::new(x, y))
    }

    pub fn splits(&self) -> &[Split] {
        &self.splits
    }

    pub fn split_mut(&mut self, index: usize) -> Option<&mut Split> {
        self.splits.get_mut(index)
    }

    pub fn pending_split(&self) -> Option<&PendingSplit> {
        self.pending_split.as_ref()
    }

    pub fn memento(&self) -> &Memento {
        &self.memento
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.draw, DrawState::Drawing { .. })
    }

    /// Last pointer position of the stroke in progress
    pub fn pre_point(&self) -> Option<(f64, f64)> {
        match &self.draw {
            DrawState::Drawing { start, stroke } => Some(*stroke.last().unwrap_or(start)),
            DrawState::Idle => None,
        }
    }

    /// Pointer positions recorded since `start_draw`, for live preview
    pub fn stroke(&self) -> &[(f64, f64)] {
        match &self.draw {
            DrawState::Drawing { stroke, .. } => stroke.as_slice(),
            DrawState::Idle => &[],
        }
    }

    pub fn pick_vertex(&self, x: f64, y: f64) -> Option<usize> {
        nearest_vertex_within(&self.x, &self.y, x, y, self.settings.pick_radius)
    }

    pub fn pick_edge(&self, x: f64, y: f64) -> Option<Edge> {
        nearest_edge(&self.x, &self.y, x, y)
    }

    /// Clear the curve and begin a stroke at `(x, y)`
    pub fn start_draw(&mut self, x: Option<f64>, y: Option<f64>) -> bool {
        let (Some(x), Some(y)) = (x, y) else {
            return false;
        };
        self.x = vec![x];
        self.y = vec![y];
        self.draw = DrawState::Drawing {
            start: (x, y),
            stroke: Vec::new(),
        };
        true
    }

    /// Record the pointer position of the stroke in progress
    pub fn continue_draw(&mut self, x: Option<f64>, y: Option<f64>) -> bool {
        let (Some(x), Some(y)) = (x, y) else {
            return false;
        };
        match &mut self.draw {
            DrawState::Drawing { stroke, .. } => {
                stroke.push((x, y));
                true
            }
            DrawState::Idle => false,
        }
    }

    /// Close the stroke back onto its start point and commit it
    pub fn end_draw(&mut self) -> bool {
        let DrawState::Drawing { start, stroke } = std::mem::take(&mut self.draw) else {
            return false;
        };
        let mut x = Vec::with_capacity(stroke.len() + 2);
        let mut y = Vec::with_capacity(stroke.len() + 2);
        x.push(start.0);
        y.push(start.1);
        for (px, py) in stroke {
            x.push(px);
            y.push(py);
        }
        x.push(start.0);
        y.push(start.1);
        self.x = x;
        self.y = y;
        self.commit();
        true
    }

    /// Abandon the stroke in progress and restore the last committed curve
    pub fn cancel_draw(&mut self) -> bool {
        if !self.is_drawing() {
            return false;
        }
        self.draw = DrawState::Idle;
        let current = self.memento.current().clone();
        self.restore(&current);
        true
    }

    /// Insert a vertex into `edge`. On an empty curve this bootstraps a
    /// single-point closed curve at `(x, y)` instead.
    pub fn insert_at_edge(&mut self, edge: Option<Edge>, x: Option<f64>, y: Option<f64>) -> bool {
        if self.is_drawing() {
            return false;
        }
        let (Some(x), Some(y)) = (x, y) else {
            return false;
        };
        if self.is_empty() {
            self.start_draw(Some(x), Some(y));
            return self.end_draw();
        }
        let Some(edge) = edge else {
            return false;
        };
        if edge.start >= self.len() || edge.end >= self.len() {
            return false;
        }
        let index = edge.insertion_index();
        self.x.insert(index, x);
        self.y.insert(index, y);
        self.commit();
        true
    }

    pub fn move_vertex(&mut self, index: Option<usize>, x: Option<f64>, y: Option<f64>) -> bool {
        if self.is_drawing() {
            return false;
        }
        let (Some(index), Some(x), Some(y)) = (index, x, y) else {
            return false;
        };
        if index >= self.len() {
            return false;
        }
        self.x[index] = x;
        self.y[index] = y;
        self.commit();
        true
    }

    pub fn delete_vertex(&mut self, index: Option<usize>) -> bool {
        if self.is_drawing() {
            return false;
        }
        let Some(index) = index.filter(|&i| i < self.len()) else {
            return false;
        };
        self.x.remove(index);
        self.y.remove(index);
        self.commit();
        true
    }

    /// Replace the whole curve. Rejected if the sequences differ in length.
    pub fn set_curve(&mut self, x: Vec<f64>, y: Vec<f64>) -> bool {
        if x.len() != y.len() || self.is_drawing() {
            return false;
        }
        self.x = x;
        self.y = y;
        self.commit();
        true
    }

    pub fn clear(&mut self) -> bool {
        if self.is_drawing() || self.is_empty() {
            return false;
        }
        self.x.clear();
        self.y.clear();
        self.commit();
        true
    }

    /// Decimate the curve to about `target` vertices
    pub fn simplify(&mut self, target: usize) -> bool {
        if self.is_drawing() {
            return false;
        }
        let (x, y) = geometry::simplify(&self.x, &self.y, target);
        if x.len() == self.x.len() {
            return false;
        }
        self.x = x;
        self.y = y;
        self.commit()
    }

    pub fn halve_vertices(&mut self) -> bool {
        self.simplify(self.len() / 2)
    }

    /// Place one endpoint of a split at plot position `(x, y)`.
    ///
    /// The position is clamped onto the drawing area and normalized to
    /// `[0, 1]`. The first click of a new split may place either endpoint;
    /// once both exist a fresh [`Split`] is appended. Starting a third
    /// split is rejected.
    pub fn set_split_endpoint(&mut self, x: Option<f64>, y: Option<f64>, first: bool) -> bool {
        let (Some(x), Some(y)) = (x, y) else {
            return false;
        };
        if self.pending_split.is_none() && self.splits.len() >= MAX_SPLITS {
            tracing::debug!(splits = self.splits.len(), "split limit reached, endpoint ignored");
            return false;
        }

        let scale = self.settings.plot_scale;
        let (cx, cy) = clamp_to_border(x, y, scale);
        let point = Point::new(cx / scale, cy / scale);

        let pending = self.pending_split.get_or_insert(PendingSplit {
            a: None,
            b: None,
            from_start: first,
        });
        if first {
            pending.a = Some(point);
        } else {
            pending.b = Some(point);
        }

        if let PendingSplit {
            a: Some(a),
            b: Some(b),
            from_start,
        } = *pending
        {
            let mut split = Split::from_line(LineSegment::new(a, b));
            split.from_start = from_start;
            self.splits.push(split);
            self.pending_split = None;
        }
        true
    }

    pub fn pop_split(&mut self, index: usize) -> Option<Split> {
        (index < self.splits.len()).then(|| self.splits.remove(index))
    }

    pub fn clear_splits(&mut self) {
        self.splits.clear();
        self.pending_split = None;
    }

    pub fn undo(&mut self) -> bool {
        if self.is_drawing() {
            return false;
        }
        match self.memento.get_prev() {
            Some(snapshot) => {
                self.restore(&snapshot);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        if self.is_drawing() {
            return false;
        }
        match self.memento.get_next() {
            Some(snapshot) => {
                self.restore(&snapshot);
                true
            }
            None => false,
        }
    }

    fn commit(&mut self) -> bool {
        self.memento
            .push(CurveSnapshot::new(self.x.clone(), self.y.clone()))
    }

    fn restore(&mut self, snapshot: &CurveSnapshot) {
        self.x = snapshot.x.clone();
        self.y = snapshot.y.clone();
    }

    fn reset_history(&mut self) {
        self.memento = Memento::new(
            CurveSnapshot::new(self.x.clone(), self.y.clone()),
            self.settings.history_capacity,
        );
    }

    /// Apply one gesture-level command
    pub fn apply(&mut self, command: SurfaceCommand) -> Outcome {
        let applied = match command {
            SurfaceCommand::StartDraw { x, y } => self.start_draw(x, y),
            SurfaceCommand::ContinueDraw { x, y } => self.continue_draw(x, y),
            SurfaceCommand::EndDraw => self.end_draw(),
            SurfaceCommand::CancelDraw => self.cancel_draw(),
            SurfaceCommand::InsertAtEdge { edge, x, y } => self.insert_at_edge(edge, x, y),
            SurfaceCommand::MoveVertex { index, x, y } => self.move_vertex(index, x, y),
            SurfaceCommand::DeleteVertex { index } => self.delete_vertex(index),
            SurfaceCommand::SetSplitEndpoint { x, y, first } => self.set_split_endpoint(x, y, first),
            SurfaceCommand::Simplify { target } => {
                self.simplify(target.unwrap_or(geometry::DEFAULT_TARGET_COUNT))
            }
            SurfaceCommand::HalveVertices => self.halve_vertices(),
            SurfaceCommand::Clear => self.clear(),
            SurfaceCommand::Undo => self.undo(),
            SurfaceCommand::Redo => self.redo(),
        };
        Outcome::from(applied)
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(Size::default())
    }
}

impl From<SurfaceRecord> for Surface {
    fn from(record: SurfaceRecord) -> Self {
        let mut surface = Surface::new(record.size);
        let n = record.x.len().min(record.y.len());
        surface.x = record.x[..n].to_vec();
        surface.y = record.y[..n].to_vec();
        surface.splits = record.splits.into_iter().take(MAX_SPLITS).collect();
        surface.primary = record.primary;
        surface.z = record.z;
        surface.reset_history();
        surface
    }
}

impl From<Surface> for SurfaceRecord {
    fn from(surface: Surface) -> Self {
        SurfaceRecord {
            x: surface.x,
            y: surface.y,
            size: surface.size,
            splits: surface.splits,
            primary: surface.primary,
            z: surface.z,
        }
    }
}
