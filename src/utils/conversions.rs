/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Unit conversion utilities

use super::constants;

/// Convert an electron momentum from atomic units to units of m_e c
pub fn atomic_momentum_to_me_c(momentum: f64) -> f64 {
    momentum / constants::INVERSE_FINE_STRUCTURE_CONSTANT
}

/// Convert an electron momentum from units of m_e c to atomic units
pub fn me_c_to_atomic_momentum(momentum: f64) -> f64 {
    momentum * constants::INVERSE_FINE_STRUCTURE_CONSTANT
}

/// Convert a recoil momentum from inverse Angstroms to inverse centimeters
pub fn inverse_angstrom_to_inverse_cm(recoil_momentum: f64) -> f64 {
    recoil_momentum * constants::INVERSE_CM_PER_INVERSE_ANGSTROM
}
