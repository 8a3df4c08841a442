/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Impulse approximation subshell incoherent cross section
//!
//! The Klein-Nishina cross section of each subshell is weighted by the
//! subshell occupancy and by the occupation number at the largest electron
//! momentum projection that still allows the subshell to be ionized:
//!
//! ```text
//! sigma_s(E) = int_{-1}^{1} pi r_e^2 (E'/E)^2 (E'/E + E/E' - 1 + mu^2) Z_s n_s(p_max(E, mu)) dmu
//! ```
//!
//! The cross section vanishes at and below the binding energy.

use super::errors::{EvaluatorError, Result};
use crate::data::TabulatedData;
use crate::distribution::{self, Evaluable, TabularDistribution};
use crate::grid::InterpolationType;
use crate::utils::constants::{pi_classical_electron_radius_squared, ELECTRON_REST_MASS_ENERGY};
use crate::utils::integrate_adaptive_simpson;

/// Largest electron momentum projection (m_e c units) for which a photon of
/// energy `energy` scattered through `mu = cos(theta)` can ionize a subshell
pub fn max_electron_momentum_projection(energy: f64, binding_energy: f64, mu: f64) -> f64 {
    let arg = energy * (energy - binding_energy) * (1.0 - mu);

    (arg - binding_energy * ELECTRON_REST_MASS_ENERGY)
        / (ELECTRON_REST_MASS_ENERGY * (2.0 * arg + binding_energy * binding_energy).sqrt())
}

/// Impulse approximation incoherent cross section of one subshell
#[derive(Debug, Clone)]
pub struct ImpulseApproxSubshellIncoherentCrossSection {
    binding_energy: f64,
    occupancy: f64,
    occupation_number: TabularDistribution,
    tolerance: f64,
}

impl ImpulseApproxSubshellIncoherentCrossSection {
    /// Create the evaluator
    ///
    /// # Arguments
    ///
    /// * `binding_energy` - Subshell binding energy in MeV
    /// * `occupancy` - Number of electrons in the subshell
    /// * `occupation_number` - Occupation number against momentum projection (m_e c units)
    /// * `tolerance` - Relative tolerance of the angular integration
    pub fn new(
        binding_energy: f64,
        occupancy: f64,
        occupation_number: &TabulatedData,
        tolerance: f64,
    ) -> Result<Self> {
        if !(binding_energy > 0.0 && occupancy > 0.0 && tolerance > 0.0) {
            return Err(EvaluatorError::InvalidInput(format!(
                "binding energy ({}), occupancy ({}) and integration tolerance ({}) must be positive",
                binding_energy, occupancy, tolerance
            )));
        }

        Ok(Self {
            binding_energy,
            occupancy,
            occupation_number: occupation_number.to_distribution(InterpolationType::LinLin)?,
            tolerance,
        })
    }

    pub fn binding_energy(&self) -> f64 {
        self.binding_energy
    }

    /// Occupation-weighted Klein-Nishina cross section differential in mu
    fn differential(&self, energy: f64, mu: f64) -> f64 {
        let ratio = 1.0 / (1.0 + energy / ELECTRON_REST_MASS_ENERGY * (1.0 - mu));
        let klein_nishina = pi_classical_electron_radius_squared()
            * ratio
            * ratio
            * (ratio + 1.0 / ratio - 1.0 + mu * mu);

        let momentum = max_electron_momentum_projection(energy, self.binding_energy, mu);

        klein_nishina * self.occupancy * self.occupation_number.evaluate_saturated(momentum)
    }
}

impl Evaluable for ImpulseApproxSubshellIncoherentCrossSection {
    fn evaluate(&self, energy: f64) -> distribution::Result<f64> {
        if energy <= self.binding_energy {
            return Ok(0.0);
        }

        Ok(integrate_adaptive_simpson(
            |mu| self.differential(energy, mu),
            -1.0,
            1.0,
            self.tolerance,
        )?)
    }

    fn lower_bound(&self) -> f64 {
        self.binding_energy
    }
}
