/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Utility functions shared by the grid, cross section and generator modules
//!
//! This module provides physical constants, unit conversions and the small
//! numerical helpers (relative error and quadrature) used
//! throughout the crate.

pub mod constants;
pub mod conversions;
pub mod errors;
pub mod math;

pub use conversions::{
    atomic_momentum_to_me_c, inverse_angstrom_to_inverse_cm, me_c_to_atomic_momentum,
};
pub use errors::{Result, UtilsError};
pub use math::{
    cumulative_trapezoid, integrate_adaptive_simpson, relative_error,
};
