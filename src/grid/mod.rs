/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Adaptive grid generation and union grid construction
//!
//! This module provides the interpolation policies, the adaptive
//! [`GridGenerator`] and the [`UnionGridBuilder`] that merges per-process
//! grids into one union energy grid.

pub mod errors;
pub mod generator;
pub mod interpolation;
pub mod union;

pub use errors::{GridError, Result};
pub use generator::{
    validate_grid, DirtyConvergencePolicy, GridConvergenceParameters, GridGenerator,
};
pub use interpolation::InterpolationType;
pub use union::UnionGridBuilder;
