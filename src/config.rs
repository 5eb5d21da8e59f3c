// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Editor configuration

use crate::geometry::{Size, DEFAULT_PICK_RADIUS, DEFAULT_TARGET_COUNT};
use crate::interpolation::InterpolationMethod;
use crate::model::{
    SurfaceSettings, DEFAULT_HISTORY_CAPACITY, DEFAULT_INTERMEDIATE_LAYERS, DEFAULT_PLOT_SCALE,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Name of the configuration file picked up from the working directory
pub const CONFIG_FILE: &str = "lithoframe.toml";

/// Editor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Side of the square drawing area in plot units
    pub plot_scale: f64,
    /// Maximal distance for vertex picks, plot units
    pub pick_radius: f64,
    /// Roof height grid resolution
    pub grid_resolution: usize,
    /// Undo history bound per surface
    pub history_capacity: usize,
    /// Default decimation target
    pub simplify_target: usize,
    /// Secondary layers synthesized per gap
    pub intermediate_layers: usize,
    /// Grid dimensions of new surfaces
    pub surface_size: Size,
    pub interpolation: InterpolationMethod,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            plot_scale: DEFAULT_PLOT_SCALE,
            pick_radius: DEFAULT_PICK_RADIUS,
            grid_resolution: 25,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            simplify_target: DEFAULT_TARGET_COUNT,
            intermediate_layers: DEFAULT_INTERMEDIATE_LAYERS,
            surface_size: Size::new(50.0, 50.0),
            interpolation: InterpolationMethod::default(),
        }
    }
}

impl EditorConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: EditorConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load `lithoframe.toml` if present, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `LITHOFRAME_*` overrides read through `lookup`
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        override_from(&lookup, "LITHOFRAME_PLOT_SCALE", &mut self.plot_scale)?;
        override_from(&lookup, "LITHOFRAME_PICK_RADIUS", &mut self.pick_radius)?;
        override_from(&lookup, "LITHOFRAME_GRID_RESOLUTION", &mut self.grid_resolution)?;
        override_from(&lookup, "LITHOFRAME_HISTORY_CAPACITY", &mut self.history_capacity)?;
        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    pub fn surface_settings(&self) -> SurfaceSettings {
        SurfaceSettings {
            plot_scale: self.plot_scale,
            pick_radius: self.pick_radius,
            history_capacity: self.history_capacity,
        }
    }
}

fn override_from<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, slot: &mut T) -> Result<()>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    if let Some(raw) = lookup(key) {
        *slot = raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid value for {}: {:?}", key, raw))?;
    }
    Ok(())
}
