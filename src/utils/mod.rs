// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Small numeric helpers shared across modules

pub mod math;

pub use math::{approx_eq, lerp, linspace};
