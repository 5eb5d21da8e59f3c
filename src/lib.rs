// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Lithoframe
//!
//! Editing model for stacked geological layer boundaries. Surfaces are
//! closed polylines with undo history and split planes, stacked into a
//! lithology under an interpolated roof profile.

pub mod cli;
pub mod config;
pub mod editor;
pub mod geometry;
pub mod interpolation;
pub mod io;
pub mod model;
pub mod utils;

pub use config::EditorConfig;
pub use editor::Editor;
pub use geometry::{LineSegment, Point, Size};
pub use interpolation::{HeightGrid, InterpolationMethod};
pub use io::{load_lithology, save_lithology, RecordError};
pub use model::{
    Corner, LayerEdit, Lithology, Memento, Outcome, RoofExportLayer, RoofProfile, Split, Surface,
    SurfaceCommand,
};
