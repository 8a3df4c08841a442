/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Physical constants used in electron-photon-relaxation data generation

/// Electron rest mass energy in MeV
pub const ELECTRON_REST_MASS_ENERGY: f64 = 0.51099895069;

/// Inverse fine structure constant (speed of light in atomic units)
pub const INVERSE_FINE_STRUCTURE_CONSTANT: f64 = 137.035999084;

/// Classical electron radius in cm
pub const CLASSICAL_ELECTRON_RADIUS: f64 = 2.8179403262e-13;

/// Number of barns in one square centimeter
pub const BARNS_PER_SQUARE_CM: f64 = 1.0e24;

/// Number of inverse centimeters in one inverse Angstrom
pub const INVERSE_CM_PER_INVERSE_ANGSTROM: f64 = 1.0e8;

/// Pair production threshold (2 m_e c^2) in MeV
pub const PAIR_PRODUCTION_THRESHOLD: f64 = 2.0 * ELECTRON_REST_MASS_ENERGY;

/// Triplet production threshold (4 m_e c^2) in MeV
pub const TRIPLET_PRODUCTION_THRESHOLD: f64 = 4.0 * ELECTRON_REST_MASS_ENERGY;

/// Default multiplicative nudge applied to grid discontinuities
pub const DEFAULT_NUDGE_FACTOR: f64 = 1.0001;

/// Default shift placed below a binding energy to resolve the jump
pub const DEFAULT_DISCONTINUITY_SHIFT: f64 = 1.0e-9;

/// pi * r_e^2 in barns
pub fn pi_classical_electron_radius_squared() -> f64 {
    std::f64::consts::PI * CLASSICAL_ELECTRON_RADIUS * CLASSICAL_ELECTRON_RADIUS * BARNS_PER_SQUARE_CM
}
