// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - planar primitives and polyline utilities

mod bbox;
mod blend;
mod path;
mod primitives;
mod query;
mod simplify;

pub use bbox::BoundingBox;
pub use blend::{blend_curves, resample_closed};
pub use path::{build_split_path, build_split_path_with_steps};
pub use primitives::{LineSegment, Point, Size};
pub use query::{
    clamp_to_border, nearest_edge, nearest_vertex, nearest_vertex_within, snap_to_grid, Edge,
    DEFAULT_PICK_RADIUS,
};
pub use simplify::{simplify, simplify_default, DEFAULT_TARGET_COUNT, MIN_CLOSED_POINTS};
