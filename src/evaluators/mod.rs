/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Composite evaluators built from source tables
//!
//! Compton profiles, occupation numbers, scattering functions and form
//! factors are refined on their own momentum grids. The impulse
//! approximation subshell incoherent cross section is an integrated
//! evaluator that is refined on the photon union grid.

pub mod compton_profile;
pub mod errors;
pub mod form_factor;
pub mod occupation_number;
pub mod subshell_incoherent;

pub use compton_profile::{
    full_profile_from_half_profile, generate_optimized_compton_profile, MOMENTUM_ANCHOR_GRID,
};
pub use errors::{EvaluatorError, Result};
pub use form_factor::{
    generate_optimized_form_factor, generate_optimized_scattering_function,
    generate_optimized_squared_form_factor,
};
pub use occupation_number::{generate_optimized_occupation_number, OccupationNumber};
pub use subshell_incoherent::{
    max_electron_momentum_projection, ImpulseApproxSubshellIncoherentCrossSection,
};
