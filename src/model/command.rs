// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Edit commands produced by the presentation layer

use crate::geometry::Edge;
use serde::{Deserialize, Serialize};

/// One gesture-level edit of a surface. Cursor coordinates are optional:
/// `None` stands for a pointer outside the drawable area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SurfaceCommand {
    StartDraw { x: Option<f64>, y: Option<f64> },
    ContinueDraw { x: Option<f64>, y: Option<f64> },
    EndDraw,
    CancelDraw,
    InsertAtEdge { edge: Option<Edge>, x: Option<f64>, y: Option<f64> },
    MoveVertex { index: Option<usize>, x: Option<f64>, y: Option<f64> },
    DeleteVertex { index: Option<usize> },
    SetSplitEndpoint { x: Option<f64>, y: Option<f64>, first: bool },
    Simplify { target: Option<usize> },
    HalveVertices,
    Clear,
    Undo,
    Redo,
}

/// Result of applying a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Applied,
    Ignored,
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

impl From<bool> for Outcome {
    fn from(applied: bool) -> Self {
        if applied {
            Outcome::Applied
        } else {
            Outcome::Ignored
        }
    }
}
