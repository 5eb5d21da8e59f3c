// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Layer model - surfaces, splits, roof profile and the layer stack

mod command;
mod lithology;
mod memento;
mod roof_profile;
mod split;
mod surface;

pub use command::{Outcome, SurfaceCommand};
pub use lithology::{
    ExportSplit, LayerEdit, Lithology, RoofExportLayer, DEFAULT_INTERMEDIATE_LAYERS,
};
pub use memento::{CurveSnapshot, Memento, DEFAULT_HISTORY_CAPACITY};
pub use roof_profile::{Corner, CornerValues, RoofProfile};
pub use split::Split;
pub use surface::{
    PendingSplit, Surface, SurfaceRecord, SurfaceSettings, DEFAULT_PLOT_SCALE, MAX_SPLITS,
};
