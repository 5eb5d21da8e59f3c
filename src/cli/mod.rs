// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI subsystem for working with saved models

pub mod commands;
pub mod reporter;

pub use commands::{
    create_model, export_model, intermediate_model, roof_grid, simplify_model, summarize,
    ModelSummary, SimplifiedLayer,
};
pub use reporter::Reporter;
