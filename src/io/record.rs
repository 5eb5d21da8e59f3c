// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Lithology records on disk

use super::RecordError;
use crate::model::Lithology;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Parse a lithology record. Missing fields take their defaults.
pub fn lithology_from_str(source: &str) -> Result<Lithology, RecordError> {
    let value: Value = serde_json::from_str(source)?;
    if !value.is_object() {
        return Err(RecordError::InvalidRecord(
            "lithology record must be a mapping".into(),
        ));
    }
    serde_json::from_value(value).map_err(|e| RecordError::InvalidRecord(e.to_string()))
}

pub fn lithology_to_string(lithology: &Lithology) -> Result<String, RecordError> {
    Ok(serde_json::to_string_pretty(lithology)?)
}

/// Read a lithology record file
pub fn load_lithology(path: impl AsRef<Path>) -> Result<Lithology, RecordError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)?;
    let lithology = lithology_from_str(&source)?;
    tracing::info!(path = %path.display(), layers = lithology.len(), "loaded lithology");
    Ok(lithology)
}

/// Write a lithology record file, replacing any existing one
pub fn save_lithology(path: impl AsRef<Path>, lithology: &Lithology) -> Result<(), RecordError> {
    let path = path.as_ref();
    fs::write(path, lithology_to_string(lithology)?)?;
    tracing::info!(path = %path.display(), layers = lithology.len(), "saved lithology");
    Ok(())
}
