// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Editor API: one lithology, one active layer

use crate::config::EditorConfig;
use crate::geometry::{build_split_path_with_steps, snap_to_grid, Point, Size};
use crate::interpolation::HeightGrid;
use crate::model::{
    LayerEdit, Lithology, Outcome, RoofExportLayer, Split, Surface, SurfaceCommand,
};

/// Routes edit commands to the active layer of a lithology
pub struct Editor {
    lithology: Lithology,
    active: usize,
    config: EditorConfig,
}

impl Editor {
    /// Create an editor over a fresh single-layer lithology
    pub fn new(config: EditorConfig) -> Self {
        let mut lithology = Lithology::with_settings(config.surface_size, config.surface_settings());
        lithology.roof_profile.set_method(config.interpolation);
        Self {
            lithology,
            active: 0,
            config,
        }
    }

    /// Take over an existing lithology, e.g. one loaded from disk
    pub fn with_lithology(mut lithology: Lithology, config: EditorConfig) -> Self {
        lithology.apply_settings(config.surface_settings());
        Self {
            lithology,
            active: 0,
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn lithology(&self) -> &Lithology {
        &self.lithology
    }

    pub fn lithology_mut(&mut self) -> &mut Lithology {
        &mut self.lithology
    }

    pub fn into_lithology(self) -> Lithology {
        self.lithology
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_layer(&self) -> Option<&Surface> {
        self.lithology.layer(self.active)
    }

    pub fn active_layer_mut(&mut self) -> Option<&mut Surface> {
        self.lithology.layer_mut(self.active)
    }

    /// Make layer `index` the target of subsequent commands
    pub fn select_layer(&mut self, index: usize) -> bool {
        if index >= self.lithology.len() {
            return false;
        }
        self.active = index;
        true
    }

    /// Apply a command to the active layer
    pub fn apply(&mut self, command: SurfaceCommand) -> Outcome {
        let command = match command {
            SurfaceCommand::Simplify { target: None } => SurfaceCommand::Simplify {
                target: Some(self.config.simplify_target),
            },
            other => other,
        };
        match self.active_layer_mut() {
            Some(layer) => layer.apply(command),
            None => Outcome::Ignored,
        }
    }

    pub fn undo(&mut self) -> Outcome {
        self.apply(SurfaceCommand::Undo)
    }

    pub fn redo(&mut self) -> Outcome {
        self.apply(SurfaceCommand::Redo)
    }

    /// Apply a stack edit to the active layer and move focus accordingly
    pub fn edit_layer(&mut self, edit: LayerEdit) -> Outcome {
        match self.lithology.edit_layer(self.active, edit) {
            Some(focus) => {
                self.active = focus;
                Outcome::Applied
            }
            None => Outcome::Ignored,
        }
    }

    /// Rebuild secondary layers, keeping focus on the same primary layer
    pub fn calc_intermediate_layers(&mut self) -> usize {
        let rank = self.primary_rank();
        let created = self
            .lithology
            .calc_intermediate_layers_with(self.config.intermediate_layers);
        self.active = self.primary_index(rank).unwrap_or(0);
        created
    }

    pub fn delete_secondary_surface(&mut self) -> usize {
        let rank = self.primary_rank();
        let removed = self.lithology.delete_secondary_surface();
        self.active = self.primary_index(rank).unwrap_or(0);
        removed
    }

    /// Neighbours of the active layer for context rendering
    pub fn adjacent_layers(&self) -> (Option<&Surface>, Option<&Surface>) {
        self.lithology
            .adjacent_layers(self.active)
            .unwrap_or((None, None))
    }

    /// Splits of the active layer in plot coordinates
    pub fn split_overlay(&self) -> Vec<Split> {
        self.lithology.split_overlay(self.active, self.config.plot_scale)
    }

    /// Plot-space polylines of the active layer's splits. Endpoints are
    /// rounded to the layer's cell grid and each path carries one sample per
    /// cell crossed.
    pub fn split_paths(&self) -> Vec<(Vec<f64>, Vec<f64>)> {
        let Some(layer) = self.active_layer() else {
            return Vec::new();
        };
        let scale = self.config.plot_scale;
        layer
            .splits()
            .iter()
            .map(|split| {
                let line = split.line();
                let a = snap_to_cells(&line.a, &layer.size);
                let b = snap_to_cells(&line.b, &layer.size);
                let cells = ((b.x - a.x) * layer.size.x)
                    .abs()
                    .max(((b.y - a.y) * layer.size.y).abs());
                let steps = if cells.is_finite() { cells.round() as usize } else { 1 };
                build_split_path_with_steps(&a, &b, scale, scale, steps)
            })
            .collect()
    }

    pub fn height_grid(&self) -> HeightGrid {
        self.lithology
            .roof_profile
            .height_grid(self.config.grid_resolution, self.config.plot_scale)
    }

    pub fn export_roof(&self, initial_depth: f64, step_depth: f64) -> Vec<RoofExportLayer> {
        self.lithology.export_roof(
            initial_depth,
            step_depth,
            self.config.grid_resolution,
            self.config.plot_scale,
        )
    }

    /// Number of primary layers up to and including the active one
    fn primary_rank(&self) -> usize {
        self.lithology
            .layers()
            .iter()
            .take(self.active + 1)
            .filter(|layer| layer.primary)
            .count()
    }

    fn primary_index(&self, rank: usize) -> Option<usize> {
        self.lithology
            .layers()
            .iter()
            .enumerate()
            .filter(|(_, layer)| layer.primary)
            .nth(rank.checked_sub(1)?)
            .map(|(i, _)| i)
    }
}

fn snap_to_cells(point: &Point, size: &Size) -> Point {
    let snap = |value: f64, cells: f64| {
        if cells > 0.0 {
            snap_to_grid(value * cells, 1.0) / cells
        } else {
            value
        }
    };
    Point::new(snap(point.x, size.x), snap(point.y, size.y))
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}
