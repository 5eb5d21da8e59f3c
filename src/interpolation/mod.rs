// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Scattered-data interpolation onto regular height grids
//!
//! Samples are triangulated once (Delaunay, XY plane) and then evaluated
//! with one of three kernels:
//!
//! - `linear`: barycentric interpolation inside the containing triangle
//! - `nearest`: value of the closest sample
//! - `cubic`: cubic Bezier triangles driven by estimated vertex gradients

mod grid;
mod triangulation;

pub use grid::{sample_grid, HeightGrid, Interpolator};
pub use triangulation::SampleMesh;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Interpolation kernel used to sample a height grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationMethod {
    #[default]
    Linear,
    Nearest,
    Cubic,
}

impl InterpolationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterpolationMethod::Linear => "linear",
            InterpolationMethod::Nearest => "nearest",
            InterpolationMethod::Cubic => "cubic",
        }
    }

    pub fn all() -> [InterpolationMethod; 3] {
        [
            InterpolationMethod::Linear,
            InterpolationMethod::Nearest,
            InterpolationMethod::Cubic,
        ]
    }
}

impl fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterpolationMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linear" => Ok(InterpolationMethod::Linear),
            "nearest" => Ok(InterpolationMethod::Nearest),
            "cubic" => Ok(InterpolationMethod::Cubic),
            other => Err(format!("unknown interpolation method: {}", other)),
        }
    }
}
