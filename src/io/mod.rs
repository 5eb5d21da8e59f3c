// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - model records and roof export files

mod error;
mod export;
mod record;

pub use error::RecordError;
pub use export::{roof_export_to_string, write_roof_export};
pub use record::{lithology_from_str, lithology_to_string, load_lithology, save_lithology};
