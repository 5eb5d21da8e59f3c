// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Layer stack: surfaces ordered by insertion, plus the roof profile

use super::roof_profile::RoofProfile;
use super::split::Split;
use super::surface::{Surface, SurfaceRecord, SurfaceSettings};
use crate::geometry::{blend_curves, Size};
use crate::interpolation::HeightGrid;
use crate::utils::lerp;
use serde::{Deserialize, Serialize};

/// Secondary layers synthesized per gap between primary layers
pub const DEFAULT_INTERMEDIATE_LAYERS: usize = 1;

/// Stack edit requested from a layer's context menu
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum LayerEdit {
    AddBefore,
    AddAfter,
    Delete,
    MoveUp,
    MoveDown,
    ChangeHeight(f64),
}

/// Split endpoint positions of one export record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSplit {
    pub a: [f64; 3],
    pub b: [f64; 3],
    pub angle: i32,
}

/// One depth step of the roof export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoofExportLayer {
    /// Position of the source layer in the stack
    pub layer: usize,
    pub z: f64,
    pub depth: f64,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub heights: HeightGrid,
    pub splits: Vec<ExportSplit>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct LithologyRecord {
    layers: Vec<Surface>,
    roof_profile: RoofProfile,
    size: Size,
}

/// The full model. `layers` is never empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "LithologyRecord", into = "LithologyRecord")]
pub struct Lithology {
    layers: Vec<Surface>,
    pub roof_profile: RoofProfile,
    pub size: Size,
    settings: SurfaceSettings,
}

impl Lithology {
    pub fn new(size: Size) -> Self {
        Self::with_settings(size, SurfaceSettings::default())
    }

    pub fn with_settings(size: Size, settings: SurfaceSettings) -> Self {
        Self {
            layers: vec![Surface::with_settings(size, settings)],
            roof_profile: RoofProfile::default(),
            size,
            settings,
        }
    }

    pub fn settings(&self) -> SurfaceSettings {
        self.settings
    }

    /// Push runtime settings down to every layer
    pub fn apply_settings(&mut self, settings: SurfaceSettings) {
        self.settings = settings;
        for layer in &mut self.layers {
            layer.set_settings(settings);
        }
    }

    pub fn layers(&self) -> &[Surface] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layer(&self, index: usize) -> Option<&Surface> {
        self.layers.get(index)
    }

    pub fn layer_mut(&mut self, index: usize) -> Option<&mut Surface> {
        self.layers.get_mut(index)
    }

    /// Stack neighbours of layer `index`, used to draw adjacent context
    pub fn adjacent_layers(&self, index: usize) -> Option<(Option<&Surface>, Option<&Surface>)> {
        if index >= self.layers.len() {
            return None;
        }
        let prev = index.checked_sub(1).and_then(|i| self.layers.get(i));
        Some((prev, self.layers.get(index + 1)))
    }

    /// Insert a copy of layer `at` directly after it
    pub fn insert_layer(&mut self, at: usize) -> Option<&mut Surface> {
        let surface = Surface::derived_from(self.layers.get(at)?);
        self.layers.insert(at + 1, surface);
        self.layers.get_mut(at + 1)
    }

    /// Remove layer `index`. The last remaining layer is never removed.
    pub fn pop_layer(&mut self, index: usize) -> Option<Surface> {
        if index >= self.layers.len() {
            return None;
        }
        if self.layers.len() == 1 {
            tracing::debug!("refusing to remove the last layer");
            return None;
        }
        Some(self.layers.remove(index))
    }

    pub fn swap_layer(&mut self, i: usize, j: usize) -> bool {
        if i >= self.layers.len() || j >= self.layers.len() {
            return false;
        }
        self.layers.swap(i, j);
        true
    }

    pub fn set_layer_z(&mut self, index: usize, z: f64) -> bool {
        match self.layers.get_mut(index) {
            Some(layer) => {
                layer.z = z;
                true
            }
            None => false,
        }
    }

    /// Stack indices ordered by elevation, ties kept in stack order
    pub fn sorted_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.layers.len()).collect();
        indices.sort_by(|&a, &b| self.layers[a].z.total_cmp(&self.layers[b].z));
        indices
    }

    pub fn sorted_layers(&self) -> Vec<&Surface> {
        self.sorted_indices()
            .into_iter()
            .map(|i| &self.layers[i])
            .collect()
    }

    /// Apply a stack edit to layer `index` and return the layer that should
    /// take focus afterwards, or `None` if nothing changed.
    pub fn edit_layer(&mut self, index: usize, edit: LayerEdit) -> Option<usize> {
        if index >= self.layers.len() {
            return None;
        }
        match edit {
            LayerEdit::AddBefore => {
                let surface = Surface::derived_from(&self.layers[index]);
                self.layers.insert(index, surface);
                Some(index)
            }
            LayerEdit::AddAfter => self.insert_layer(index).map(|_| index + 1),
            LayerEdit::Delete => self
                .pop_layer(index)
                .map(|_| if index < self.layers.len() { index } else { 0 }),
            LayerEdit::MoveUp => {
                let above = index.checked_sub(1)?;
                self.swap_layer(index, above).then_some(above)
            }
            LayerEdit::MoveDown => self.swap_layer(index, index + 1).then_some(index + 1),
            LayerEdit::ChangeHeight(z) => self.set_layer_z(index, z).then_some(index),
        }
    }

    /// Splits of layer `index` projected from normalized coordinates onto a
    /// plot of side `plot_scale`
    pub fn split_overlay(&self, index: usize, plot_scale: f64) -> Vec<Split> {
        self.layers
            .get(index)
            .map(|layer| layer.splits().iter().map(|s| s.scale(plot_scale)).collect())
            .unwrap_or_default()
    }

    pub fn calc_intermediate_layers(&mut self) -> usize {
        self.calc_intermediate_layers_with(DEFAULT_INTERMEDIATE_LAYERS)
    }

    /// Rebuild the secondary layers: `count` blended surfaces between each
    /// pair of elevation-adjacent primary layers. Each new layer follows its
    /// lower neighbour in the stack. Returns the number of layers created.
    pub fn calc_intermediate_layers_with(&mut self, count: usize) -> usize {
        self.delete_secondary_surface();

        let primary: Vec<usize> = self
            .sorted_indices()
            .into_iter()
            .filter(|&i| self.layers[i].primary)
            .collect();

        let mut synthesized: Vec<Vec<Surface>> = vec![Vec::new(); self.layers.len()];
        for pair in primary.windows(2) {
            let (lower, upper) = (&self.layers[pair[0]], &self.layers[pair[1]]);
            if lower.is_empty() && upper.is_empty() {
                continue;
            }
            for j in 1..=count {
                let t = j as f64 / (count + 1) as f64;
                let (x, y) = blend_curves(lower.curve(), upper.curve(), t);
                let mut surface = Surface::from(SurfaceRecord {
                    x,
                    y,
                    size: lower.size,
                    splits: Vec::new(),
                    primary: false,
                    z: lerp(lower.z, upper.z, t),
                });
                surface.set_settings(self.settings);
                synthesized[pair[0]].push(surface);
            }
        }

        let created: usize = synthesized.iter().map(Vec::len).sum();
        let mut layers = Vec::with_capacity(self.layers.len() + created);
        for (layer, extra) in self.layers.drain(..).zip(synthesized) {
            layers.push(layer);
            layers.extend(extra);
        }
        self.layers = layers;

        tracing::info!(created, per_gap = count, "synthesized intermediate layers");
        created
    }

    /// Drop every synthesized layer. Returns the number removed.
    pub fn delete_secondary_surface(&mut self) -> usize {
        if !self.layers.iter().any(|layer| layer.primary) {
            return 0;
        }
        let before = self.layers.len();
        self.layers.retain(|layer| layer.primary);
        before - self.layers.len()
    }

    /// One export record per layer in elevation order. Record `k` carries the
    /// roof grid lowered by `initial_depth + k * step_depth` and the splits
    /// whose stack position has been reached at that step.
    pub fn export_roof(
        &self,
        initial_depth: f64,
        step_depth: f64,
        resolution: usize,
        extent: f64,
    ) -> Vec<RoofExportLayer> {
        let roof = self.roof_profile.height_grid(resolution, extent);
        let order = self.sorted_indices();
        let steps = order.len();
        tracing::debug!(layers = steps, resolution, extent, "exporting roof");

        order
            .into_iter()
            .enumerate()
            .map(|(k, index)| {
                let layer = &self.layers[index];
                let depth = initial_depth + k as f64 * step_depth;
                let position = if steps > 1 {
                    k as f64 / (steps - 1) as f64
                } else {
                    0.0
                };
                let splits = layer
                    .splits()
                    .iter()
                    .filter(|split| split.depth <= position)
                    .map(|split| {
                        let line = split.scale(extent).line();
                        ExportSplit {
                            a: [line.a.x, line.a.y, depth + split.offset_at(0.0)],
                            b: [line.b.x, line.b.y, depth + split.offset_at(1.0)],
                            angle: split.angle,
                        }
                    })
                    .collect();

                RoofExportLayer {
                    layer: index,
                    z: layer.z,
                    depth,
                    x: layer.x().to_vec(),
                    y: layer.y().to_vec(),
                    heights: roof.offset(depth),
                    splits,
                }
            })
            .collect()
    }
}

impl Default for Lithology {
    fn default() -> Self {
        Self::new(Size::default())
    }
}

impl From<LithologyRecord> for Lithology {
    fn from(record: LithologyRecord) -> Self {
        let mut layers = record.layers;
        if layers.is_empty() {
            layers.push(Surface::new(record.size));
        }
        Lithology {
            layers,
            roof_profile: record.roof_profile,
            size: record.size,
            settings: SurfaceSettings::default(),
        }
    }
}

impl From<Lithology> for LithologyRecord {
    fn from(lithology: Lithology) -> Self {
        LithologyRecord {
            layers: lithology.layers,
            roof_profile: lithology.roof_profile,
            size: lithology.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ring(x0: f64, y0: f64, side: f64) -> (Vec<f64>, Vec<f64>) {
        (
            vec![x0, x0 + side, x0 + side, x0, x0],
            vec![y0, y0, y0 + side, y0 + side, y0],
        )
    }

    fn two_layers() -> Lithology {
        let mut lithology = Lithology::new(Size::new(50.0, 50.0));
        let (x, y) = ring(20.0, 20.0, 60.0);
        lithology.layer_mut(0).unwrap().set_curve(x, y);

        let upper = lithology.insert_layer(0).unwrap();
        let (x, y) = ring(40.0, 40.0, 20.0);
        upper.set_curve(x, y);
        upper.z = 10.0;
        lithology
    }

    #[test]
    fn test_new_has_one_layer() {
        let lithology = Lithology::default();
        assert_eq!(lithology.len(), 1);
        assert!(lithology.layer(0).unwrap().primary);
    }

    #[test]
    fn test_insert_layer_copies_shape_after_source() {
        let mut lithology = two_layers();
        let copy = lithology.insert_layer(0).unwrap();
        assert!(copy.primary);
        assert!(!copy.memento().can_undo());
        assert_eq!(lithology.len(), 3);
        assert_eq!(lithology.layer(1).unwrap().curve(), lithology.layer(0).unwrap().curve());
        assert!(lithology.insert_layer(7).is_none());
    }

    #[test]
    fn test_pop_last_layer_is_refused() {
        let mut lithology = Lithology::default();
        assert!(lithology.pop_layer(0).is_none());
        assert_eq!(lithology.len(), 1);

        let mut lithology = two_layers();
        assert!(lithology.pop_layer(5).is_none());
        assert!(lithology.pop_layer(0).is_some());
        assert_eq!(lithology.len(), 1);
        assert_eq!(lithology.layer(0).unwrap().z, 10.0);
    }

    #[test]
    fn test_swap_and_sorted_view() {
        let mut lithology = two_layers();
        assert!(!lithology.swap_layer(0, 2));
        assert!(lithology.swap_layer(0, 1));
        assert_eq!(lithology.layer(0).unwrap().z, 10.0);

        let sorted: Vec<f64> = lithology.sorted_layers().iter().map(|l| l.z).collect();
        assert_eq!(sorted, vec![0.0, 10.0]);
        // the stack itself is untouched
        assert_eq!(lithology.layer(0).unwrap().z, 10.0);

        assert!(lithology.set_layer_z(0, -5.0));
        assert!(!lithology.set_layer_z(9, 1.0));
        assert_eq!(lithology.sorted_indices(), vec![0, 1]);
    }

    #[test]
    fn test_adjacent_layers() {
        let lithology = two_layers();
        let (prev, next) = lithology.adjacent_layers(0).unwrap();
        assert!(prev.is_none());
        assert_eq!(next.map(|l| l.z), Some(10.0));
        assert!(lithology.adjacent_layers(2).is_none());
    }

    #[test]
    fn test_edit_layer_focus() {
        let mut lithology = two_layers();
        assert_eq!(lithology.edit_layer(0, LayerEdit::AddBefore), Some(0));
        assert_eq!(lithology.len(), 3);
        assert_eq!(lithology.edit_layer(2, LayerEdit::AddAfter), Some(3));
        assert_eq!(lithology.edit_layer(3, LayerEdit::MoveDown), None);
        assert_eq!(lithology.edit_layer(0, LayerEdit::MoveUp), None);
        assert_eq!(lithology.edit_layer(1, LayerEdit::MoveUp), Some(0));
        assert_eq!(lithology.edit_layer(1, LayerEdit::ChangeHeight(3.0)), Some(1));
        assert_eq!(lithology.layer(1).unwrap().z, 3.0);
        assert_eq!(lithology.edit_layer(3, LayerEdit::Delete), Some(0));
        assert_eq!(lithology.edit_layer(1, LayerEdit::Delete), Some(1));
        assert_eq!(lithology.edit_layer(9, LayerEdit::Delete), None);
    }

    #[test]
    fn test_move_up_swaps_toward_first_layer() {
        let mut lithology = two_layers();
        let top_z = lithology.layer(1).unwrap().z;

        assert_eq!(lithology.edit_layer(1, LayerEdit::MoveUp), Some(0));
        assert_eq!(lithology.layer(0).unwrap().z, top_z);
        assert_eq!(lithology.edit_layer(0, LayerEdit::MoveDown), Some(1));
        assert_eq!(lithology.layer(1).unwrap().z, top_z);
    }

    #[test]
    fn test_intermediate_layers_blend_between_primaries() {
        let mut lithology = two_layers();
        let created = lithology.calc_intermediate_layers();
        assert_eq!(created, 1);
        assert_eq!(lithology.len(), 3);

        let middle = lithology.layer(1).unwrap();
        assert!(!middle.primary);
        assert_relative_eq!(middle.z, 5.0);
        let (xs, ys) = middle.curve();
        assert_eq!(xs.first(), xs.last());
        assert_eq!(ys.first(), ys.last());
        let min_x = xs.iter().copied().fold(f64::INFINITY, f64::min);
        assert_relative_eq!(min_x, 30.0, epsilon = 1e-9);
    }

    #[test]
    fn test_recompute_replaces_secondary_layers() {
        let mut lithology = two_layers();
        lithology.calc_intermediate_layers_with(3);
        assert_eq!(lithology.len(), 5);
        lithology.calc_intermediate_layers_with(2);
        assert_eq!(lithology.len(), 4);

        let zs: Vec<f64> = lithology.sorted_layers().iter().map(|l| l.z).collect();
        assert_relative_eq!(zs[1], 10.0 / 3.0, epsilon = 1e-12);

        assert_eq!(lithology.delete_secondary_surface(), 2);
        assert!(lithology.layers().iter().all(|l| l.primary));
    }

    #[test]
    fn test_export_roof_steps_depth() {
        let mut lithology = two_layers();
        lithology.roof_profile.set_corner(crate::model::Corner::UpperLeft, 10.0);

        let layer = lithology.layer_mut(1).unwrap();
        layer.set_split_endpoint(Some(0.0), Some(0.0), true);
        layer.set_split_endpoint(Some(100.0), Some(50.0), false);
        layer.split_mut(0).unwrap().set_depth(1.0);
        layer.split_mut(0).unwrap().b_offset_z = 2.0;

        let records = lithology.export_roof(1.0, 5.0, 3, 100.0);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].depth, 1.0);
        assert_eq!(records[1].depth, 6.0);
        assert_eq!(records[1].layer, 1);
        assert_relative_eq!(records[1].heights.get(0, 0).unwrap(), 6.0, epsilon = 1e-9);
        assert_relative_eq!(records[1].heights.get(0, 2).unwrap(), 16.0, epsilon = 1e-9);

        let split = &records[1].splits[0];
        assert_eq!(split.a, [0.0, 0.0, 6.0]);
        assert_eq!(split.b, [100.0, 50.0, 8.0]);
        assert!(records[0].splits.is_empty());
    }

    #[test]
    fn test_split_overlay() {
        let mut lithology = Lithology::default();
        let layer = lithology.layer_mut(0).unwrap();
        layer.set_split_endpoint(Some(10.0), Some(20.0), true);
        layer.set_split_endpoint(Some(30.0), Some(40.0), false);

        let overlay = lithology.split_overlay(0, 200.0);
        assert_eq!(overlay[0].line().a.x, 20.0);
        assert_eq!(overlay[0].line().b.y, 80.0);
        assert!(lithology.split_overlay(4, 200.0).is_empty());
    }

    #[test]
    fn test_record_without_layers_gets_default_layer() {
        let lithology: Lithology = serde_json::from_str(r#"{"size": {"x": 5, "y": 7}}"#).unwrap();
        assert_eq!(lithology.len(), 1);
        assert_eq!(lithology.layer(0).unwrap().size, Size::new(5.0, 7.0));
    }

    #[test]
    fn test_apply_settings_reaches_layers() {
        let mut lithology = two_layers();
        let settings = SurfaceSettings {
            pick_radius: 1.0,
            ..SurfaceSettings::default()
        };
        lithology.apply_settings(settings);
        assert!(lithology.layers().iter().all(|l| l.settings().pick_radius == 1.0));
    }
}
