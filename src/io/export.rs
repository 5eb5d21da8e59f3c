// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Roof export files

use super::RecordError;
use crate::model::RoofExportLayer;
use std::fs;
use std::path::Path;

pub fn roof_export_to_string(records: &[RoofExportLayer]) -> Result<String, RecordError> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Write export records as a JSON array
pub fn write_roof_export(path: impl AsRef<Path>, records: &[RoofExportLayer]) -> Result<(), RecordError> {
    let path = path.as_ref();
    fs::write(path, roof_export_to_string(records)?)?;
    tracing::info!(path = %path.display(), records = records.len(), "wrote roof export");
    Ok(())
}
