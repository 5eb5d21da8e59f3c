// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Model file operations behind the CLI subcommands

use crate::config::EditorConfig;
use crate::editor::Editor;
use crate::interpolation::{HeightGrid, InterpolationMethod};
use crate::io::{load_lithology, save_lithology, write_roof_export};
use crate::model::{LayerEdit, Lithology};
use anyhow::{bail, Context, Result};
use std::path::Path;

/// Overview of a model for reporting
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSummary {
    pub layers: usize,
    pub primary: usize,
    pub vertices: Vec<usize>,
    pub elevations: Vec<f64>,
    pub splits: usize,
    pub roof_points: usize,
    pub method: InterpolationMethod,
}

impl ModelSummary {
    pub fn secondary(&self) -> usize {
        self.layers - self.primary
    }
}

/// Vertex counts of one simplified layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimplifiedLayer {
    pub index: usize,
    pub before: usize,
    pub after: usize,
}

pub fn summarize(lithology: &Lithology) -> ModelSummary {
    let layers = lithology.layers();
    ModelSummary {
        layers: layers.len(),
        primary: layers.iter().filter(|l| l.primary).count(),
        vertices: layers.iter().map(|l| l.len()).collect(),
        elevations: layers.iter().map(|l| l.z).collect(),
        splits: layers.iter().map(|l| l.splits().len()).sum(),
        roof_points: lithology.roof_profile.len(),
        method: lithology.roof_profile.interpolate_method,
    }
}

fn load(input: &Path) -> Result<Lithology> {
    load_lithology(input).with_context(|| format!("Failed to load model: {}", input.display()))
}

fn save(output: &Path, lithology: &Lithology) -> Result<()> {
    save_lithology(output, lithology)
        .with_context(|| format!("Failed to save model: {}", output.display()))
}

/// Write a new model with `layers` empty layers spaced `spacing` apart
pub fn create_model(output: &Path, config: &EditorConfig, layers: usize, spacing: f64) -> Result<Lithology> {
    if layers == 0 {
        bail!("A model needs at least one layer");
    }
    let mut editor = Editor::new(config.clone());
    for k in 1..layers {
        editor.edit_layer(LayerEdit::AddAfter);
        editor.edit_layer(LayerEdit::ChangeHeight(k as f64 * spacing));
    }
    let lithology = editor.into_lithology();
    save(output, &lithology)?;
    Ok(lithology)
}

/// Simplify one layer, or all of them, and write the result to `output`
pub fn simplify_model(
    input: &Path,
    output: &Path,
    target: usize,
    layer: Option<usize>,
) -> Result<Vec<SimplifiedLayer>> {
    let mut lithology = load(input)?;
    let indices: Vec<usize> = match layer {
        Some(index) if index >= lithology.len() => {
            bail!("Layer {} out of range (model has {})", index, lithology.len())
        }
        Some(index) => vec![index],
        None => (0..lithology.len()).collect(),
    };

    let mut report = Vec::with_capacity(indices.len());
    for index in indices {
        if let Some(surface) = lithology.layer_mut(index) {
            let before = surface.len();
            surface.simplify(target);
            report.push(SimplifiedLayer {
                index,
                before,
                after: surface.len(),
            });
        }
    }
    save(output, &lithology)?;
    Ok(report)
}

/// Rebuild secondary layers and write the result to `output`
pub fn intermediate_model(input: &Path, output: &Path, count: usize) -> Result<usize> {
    let mut lithology = load(input)?;
    let created = lithology.calc_intermediate_layers_with(count);
    save(output, &lithology)?;
    Ok(created)
}

/// Interpolate the roof of a saved model
pub fn roof_grid(input: &Path, config: &EditorConfig, method: Option<InterpolationMethod>) -> Result<HeightGrid> {
    let mut lithology = load(input)?;
    if let Some(method) = method {
        lithology.roof_profile.set_method(method);
    }
    Ok(lithology
        .roof_profile
        .height_grid(config.grid_resolution, config.plot_scale))
}

/// Write the depth-stepped roof export of a saved model
pub fn export_model(
    input: &Path,
    output: &Path,
    config: &EditorConfig,
    initial_depth: f64,
    step_depth: f64,
) -> Result<usize> {
    let editor = Editor::with_lithology(load(input)?, config.clone());
    let records = editor.export_roof(initial_depth, step_depth);
    write_roof_export(output, &records)
        .with_context(|| format!("Failed to write export: {}", output.display()))?;
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_create_and_summarize() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("model.json");
        create_model(&path, &EditorConfig::default(), 3, 5.0)?;

        let summary = summarize(&load_lithology(&path)?);
        assert_eq!(summary.layers, 3);
        assert_eq!(summary.secondary(), 0);
        assert_eq!(summary.elevations, vec![0.0, 5.0, 10.0]);
        assert!(create_model(&path, &EditorConfig::default(), 0, 1.0).is_err());
        Ok(())
    }

    #[test]
    fn test_simplify_out_of_range_layer() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("model.json");
        create_model(&path, &EditorConfig::default(), 1, 1.0)?;
        assert!(simplify_model(&path, &path, 10, Some(4)).is_err());

        let report = simplify_model(&path, &path, 10, None)?;
        assert_eq!(report, vec![SimplifiedLayer { index: 0, before: 0, after: 0 }]);
        Ok(())
    }

    #[test]
    fn test_grid_and_export() -> Result<()> {
        let dir = tempdir()?;
        let model = dir.path().join("model.json");
        let export = dir.path().join("roof.json");
        let config = EditorConfig {
            grid_resolution: 5,
            ..EditorConfig::default()
        };
        create_model(&model, &config, 2, 1.0)?;

        let grid = roof_grid(&model, &config, Some(InterpolationMethod::Cubic))?;
        assert_eq!(grid.values.len(), 25);
        assert_eq!(export_model(&model, &export, &config, 0.0, 1.0)?, 2);
        assert!(export.exists());
        Ok(())
    }

    #[test]
    fn test_missing_model_reports_path() {
        let err = intermediate_model(Path::new("/nonexistent/m.json"), Path::new("/tmp/x.json"), 1)
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/m.json"));
    }
}
