/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Generator configuration
//!
//! Energy limits, grid convergence parameters and evaluation tolerances
//! shared by all data generators.

use super::errors::{GeneratorError, Result};
use crate::data::GenerationParameters;
use crate::grid::{DirtyConvergencePolicy, GridConvergenceParameters, GridGenerator};
use crate::utils::constants::{DEFAULT_DISCONTINUITY_SHIFT, DEFAULT_NUDGE_FACTOR};
use log::warn;
use serde::{Deserialize, Serialize};

/// Configuration of an electron-photon-relaxation data generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Lowest photon energy of the photon union grid (MeV)
    pub min_photon_energy: f64,

    /// Highest photon energy of the photon union grid (MeV)
    pub max_photon_energy: f64,

    /// Lowest electron energy of the electron union grid (MeV)
    pub min_electron_energy: f64,

    /// Highest electron energy of the electron union grid (MeV)
    pub max_electron_energy: f64,

    /// Convergence parameters of the photon union grid and momentum grids
    pub photon_grid: GridConvergenceParameters,

    /// Convergence parameters of the electron union grid
    pub electron_grid: GridConvergenceParameters,

    /// Multiplicative nudge placed above thresholds and binding energies
    pub nudge_factor: f64,

    /// Shift placed below binding energies
    pub discontinuity_shift: f64,

    /// Tolerance of the occupation number evaluation
    pub occupation_number_evaluation_tolerance: f64,

    /// Tolerance of the subshell impulse approximation incoherent integration
    pub subshell_incoherent_evaluation_tolerance: f64,

    /// What to do when a grid bracket converges on a tolerance other than
    /// the convergence tolerance
    pub dirty_convergence_policy: DirtyConvergencePolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_photon_energy: 1e-3,
            max_photon_energy: 20.0,
            min_electron_energy: 1e-5,
            max_electron_energy: 1e5,
            photon_grid: GridConvergenceParameters::default(),
            electron_grid: GridConvergenceParameters::default(),
            nudge_factor: DEFAULT_NUDGE_FACTOR,
            discontinuity_shift: DEFAULT_DISCONTINUITY_SHIFT,
            occupation_number_evaluation_tolerance: 1e-3,
            subshell_incoherent_evaluation_tolerance: 1e-3,
            dirty_convergence_policy: DirtyConvergencePolicy::Warn,
        }
    }
}

impl GeneratorConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the photon energy limits
    pub fn with_photon_energy_limits(&mut self, min: f64, max: f64) -> &mut Self {
        self.min_photon_energy = min;
        self.max_photon_energy = max;
        self
    }

    /// Set the electron energy limits
    pub fn with_electron_energy_limits(&mut self, min: f64, max: f64) -> &mut Self {
        self.min_electron_energy = min;
        self.max_electron_energy = max;
        self
    }

    pub fn with_photon_grid(&mut self, parameters: GridConvergenceParameters) -> &mut Self {
        self.photon_grid = parameters;
        self
    }

    pub fn with_electron_grid(&mut self, parameters: GridConvergenceParameters) -> &mut Self {
        self.electron_grid = parameters;
        self
    }

    pub fn with_nudge_factor(&mut self, nudge_factor: f64) -> &mut Self {
        self.nudge_factor = nudge_factor;
        self
    }

    pub fn with_discontinuity_shift(&mut self, shift: f64) -> &mut Self {
        self.discontinuity_shift = shift;
        self
    }

    pub fn with_occupation_number_evaluation_tolerance(&mut self, tolerance: f64) -> &mut Self {
        self.occupation_number_evaluation_tolerance = tolerance;
        self
    }

    pub fn with_subshell_incoherent_evaluation_tolerance(&mut self, tolerance: f64) -> &mut Self {
        self.subshell_incoherent_evaluation_tolerance = tolerance;
        self
    }

    pub fn with_dirty_convergence_policy(&mut self, policy: DirtyConvergencePolicy) -> &mut Self {
        self.dirty_convergence_policy = policy;
        self
    }

    /// Check the configuration for values no generator can work with
    pub fn validate(&self) -> Result<()> {
        check_energy_limits("photon", self.min_photon_energy, self.max_photon_energy)?;
        check_energy_limits("electron", self.min_electron_energy, self.max_electron_energy)?;

        if !(self.nudge_factor > 1.0 && self.nudge_factor.is_finite()) {
            return Err(GeneratorError::InvalidConfig(format!(
                "the nudge factor must be greater than 1, got {}",
                self.nudge_factor
            )));
        }

        if !(self.discontinuity_shift > 0.0 && self.discontinuity_shift.is_finite()) {
            return Err(GeneratorError::InvalidConfig(format!(
                "the discontinuity shift must be positive, got {}",
                self.discontinuity_shift
            )));
        }

        for (name, tolerance) in [
            (
                "occupation number evaluation",
                self.occupation_number_evaluation_tolerance,
            ),
            (
                "subshell incoherent evaluation",
                self.subshell_incoherent_evaluation_tolerance,
            ),
        ] {
            if !(tolerance > 0.0 && tolerance < 1.0) {
                return Err(GeneratorError::InvalidConfig(format!(
                    "the {} tolerance must be in (0, 1), got {}",
                    name, tolerance
                )));
            }
        }

        self.photon_grid_generator()?;
        self.electron_grid_generator()?;

        Ok(())
    }

    /// Grid generator for the photon union grid and the momentum grids
    pub fn photon_grid_generator(&self) -> Result<GridGenerator> {
        self.grid_generator(&self.photon_grid)
    }

    /// Grid generator for the electron union grid
    pub fn electron_grid_generator(&self) -> Result<GridGenerator> {
        self.grid_generator(&self.electron_grid)
    }

    /// Settings recorded in the generated data container
    pub fn generation_parameters(&self, electron_interpolation: &str) -> GenerationParameters {
        GenerationParameters {
            photon_grid: self.photon_grid,
            electron_grid: self.electron_grid,
            nudge_factor: self.nudge_factor,
            discontinuity_shift: self.discontinuity_shift,
            occupation_number_evaluation_tolerance: self.occupation_number_evaluation_tolerance,
            subshell_incoherent_evaluation_tolerance: self.subshell_incoherent_evaluation_tolerance,
            electron_cross_section_interpolation: electron_interpolation.to_string(),
        }
    }

    /// Clamp the photon limits to the range covered by a source table
    pub(crate) fn clamp_photon_energy_limits(&mut self, table: &str, table_min: f64, table_max: f64) {
        let (min, max) = clamp_energy_limits(
            "photon",
            table,
            (self.min_photon_energy, self.max_photon_energy),
            (table_min, table_max),
        );
        self.min_photon_energy = min;
        self.max_photon_energy = max;
    }

    /// Clamp the electron limits to the range covered by a source table
    pub(crate) fn clamp_electron_energy_limits(
        &mut self,
        table: &str,
        table_min: f64,
        table_max: f64,
    ) {
        let (min, max) = clamp_energy_limits(
            "electron",
            table,
            (self.min_electron_energy, self.max_electron_energy),
            (table_min, table_max),
        );
        self.min_electron_energy = min;
        self.max_electron_energy = max;
    }

    fn grid_generator(&self, parameters: &GridConvergenceParameters) -> Result<GridGenerator> {
        let mut generator = GridGenerator::from_parameters(parameters)?;
        generator.with_dirty_convergence_policy(self.dirty_convergence_policy);
        Ok(generator)
    }
}

fn check_energy_limits(particle: &str, min: f64, max: f64) -> Result<()> {
    if min > 0.0 && min < max && max.is_finite() {
        Ok(())
    } else {
        Err(GeneratorError::InvalidConfig(format!(
            "the {} energy limits must satisfy 0 < min ({}) < max ({})",
            particle, min, max
        )))
    }
}

fn clamp_energy_limits(
    particle: &str,
    table: &str,
    (requested_min, requested_max): (f64, f64),
    (table_min, table_max): (f64, f64),
) -> (f64, f64) {
    let mut min = requested_min;
    let mut max = requested_max;

    if requested_min < table_min {
        min = table_min;
        warn!(
            "the min {particle} energy requested ({requested_min}) is below the {table} table min \
             {particle} energy! The {table} table's min {particle} energy ({table_min}) will be \
             used instead."
        );
    }

    if requested_max > table_max {
        max = table_max;
        warn!(
            "the max {particle} energy requested ({requested_max}) is above the {table} table max \
             {particle} energy! The {table} table's max {particle} energy ({table_max}) will be \
             used instead."
        );
    }

    (min, max)
}
