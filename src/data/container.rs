/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Native electron-photon-relaxation data container
//!
//! The container is the output of the data generators. Every setter checks
//! the data against what is already stored: cross sections must end at the
//! end of their energy grid and subshell data may only be attached to known
//! subshells. The container is persisted as JSON.

use super::errors::{DataError, Result};
use super::secondary::SecondaryDistributionTable;
use super::subshell::{subshell_name, Subshell};
use super::tabulated::TabulatedData;
use super::{read_json, write_json};
use crate::cross_section::CrossSectionOnGrid;
use crate::grid::{validate_grid, GridConvergenceParameters};
use crate::utils::constants::{DEFAULT_DISCONTINUITY_SHIFT, DEFAULT_NUDGE_FACTOR};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Photon cross sections stored on the photon energy grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PhotonCrossSectionType {
    WallerHartreeIncoherent,
    WallerHartreeCoherent,
    PairProduction,
    TripletProduction,
    TotalPhotoelectric,
    ImpulseApproxTotalIncoherent,
}

/// Electron cross sections stored on the electron energy grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ElectronCrossSectionType {
    CutoffElastic,
    TotalElastic,
    ScreenedRutherfordElastic,
    Bremsstrahlung,
    AtomicExcitation,
}

/// Relaxation transitions that fill a vacancy in one subshell
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubshellRelaxationData {
    /// (primary, secondary) subshells; the secondary is 0 for radiative transitions
    pub vacancies: Vec<(u32, u32)>,
    /// Energy of the emitted photon or electron in MeV
    pub particle_energies: Vec<f64>,
    pub probabilities: Vec<f64>,
}

impl SubshellRelaxationData {
    pub fn number_of_transitions(&self) -> usize {
        self.vacancies.len()
    }
}

/// Settings the data were generated with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParameters {
    pub photon_grid: GridConvergenceParameters,
    pub electron_grid: GridConvergenceParameters,
    pub nudge_factor: f64,
    pub discontinuity_shift: f64,
    pub occupation_number_evaluation_tolerance: f64,
    pub subshell_incoherent_evaluation_tolerance: f64,
    pub electron_cross_section_interpolation: String,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            photon_grid: GridConvergenceParameters::default(),
            electron_grid: GridConvergenceParameters::default(),
            nudge_factor: DEFAULT_NUDGE_FACTOR,
            discontinuity_shift: DEFAULT_DISCONTINUITY_SHIFT,
            occupation_number_evaluation_tolerance: 1e-3,
            subshell_incoherent_evaluation_tolerance: 1e-3,
            electron_cross_section_interpolation: "LogLog".to_string(),
        }
    }
}

/// Electron-photon-relaxation data for one element
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElectronPhotonRelaxationDataContainer {
    atomic_number: u32,
    atomic_weight: f64,
    min_photon_energy: f64,
    max_photon_energy: f64,
    min_electron_energy: f64,
    max_electron_energy: f64,
    generation_parameters: GenerationParameters,

    subshells: BTreeSet<u32>,
    subshell_occupancies: BTreeMap<u32, f64>,
    subshell_binding_energies: BTreeMap<u32, f64>,
    subshell_relaxation_data: BTreeMap<u32, SubshellRelaxationData>,

    compton_profiles: BTreeMap<u32, TabulatedData>,
    occupation_numbers: BTreeMap<u32, TabulatedData>,
    waller_hartree_scattering_function: TabulatedData,
    waller_hartree_atomic_form_factor: TabulatedData,
    waller_hartree_squared_atomic_form_factor: TabulatedData,

    photon_energy_grid: Vec<f64>,
    average_photon_heating_numbers: Vec<f64>,
    photon_cross_sections: BTreeMap<PhotonCrossSectionType, CrossSectionOnGrid>,
    subshell_photoelectric_cross_sections: BTreeMap<u32, CrossSectionOnGrid>,
    subshell_impulse_approx_incoherent_cross_sections: BTreeMap<u32, CrossSectionOnGrid>,
    waller_hartree_total_cross_section: Vec<f64>,
    impulse_approx_total_cross_section: Vec<f64>,

    electron_energy_grid: Vec<f64>,
    electron_cross_sections: BTreeMap<ElectronCrossSectionType, CrossSectionOnGrid>,
    electroionization_cross_sections: BTreeMap<u32, CrossSectionOnGrid>,
    total_electron_cross_section: Vec<f64>,

    #[serde(default)]
    cutoff_elastic_angular_distributions: SecondaryDistributionTable,
    #[serde(default)]
    bremsstrahlung_photon_distributions: SecondaryDistributionTable,
    #[serde(default)]
    electroionization_recoil_distributions: BTreeMap<u32, SecondaryDistributionTable>,
    #[serde(default)]
    atomic_excitation_energy_loss: TabulatedData,
}

impl ElectronPhotonRelaxationDataContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a container from a JSON file
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        read_json(path)
    }

    /// Save the container to a JSON file
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_json(self, path)
    }

    // ---- Table information ----

    pub fn set_atomic_number(&mut self, atomic_number: u32) -> Result<()> {
        if !(1..=100).contains(&atomic_number) {
            return Err(DataError::InvalidTable(format!(
                "atomic number {} is outside [1, 100]",
                atomic_number
            )));
        }
        self.atomic_number = atomic_number;
        Ok(())
    }

    pub fn set_atomic_weight(&mut self, atomic_weight: f64) -> Result<()> {
        require_positive(atomic_weight, "atomic weight")?;
        self.atomic_weight = atomic_weight;
        Ok(())
    }

    /// Set the photon energy limits the data were generated for
    pub fn set_photon_energy_limits(&mut self, min: f64, max: f64) -> Result<()> {
        require_energy_limits(min, max, "photon")?;
        self.min_photon_energy = min;
        self.max_photon_energy = max;
        Ok(())
    }

    /// Set the electron energy limits the data were generated for
    pub fn set_electron_energy_limits(&mut self, min: f64, max: f64) -> Result<()> {
        require_energy_limits(min, max, "electron")?;
        self.min_electron_energy = min;
        self.max_electron_energy = max;
        Ok(())
    }

    pub fn set_generation_parameters(&mut self, parameters: GenerationParameters) {
        self.generation_parameters = parameters;
    }

    pub fn atomic_number(&self) -> u32 {
        self.atomic_number
    }

    pub fn atomic_weight(&self) -> f64 {
        self.atomic_weight
    }

    pub fn min_photon_energy(&self) -> f64 {
        self.min_photon_energy
    }

    pub fn max_photon_energy(&self) -> f64 {
        self.max_photon_energy
    }

    pub fn min_electron_energy(&self) -> f64 {
        self.min_electron_energy
    }

    pub fn max_electron_energy(&self) -> f64 {
        self.max_electron_energy
    }

    pub fn generation_parameters(&self) -> &GenerationParameters {
        &self.generation_parameters
    }

    // ---- Relaxation ----

    /// Set the subshells (ENDF designators) of the element
    pub fn set_subshells(&mut self, subshells: BTreeSet<u32>) -> Result<()> {
        for &subshell in &subshells {
            Subshell::from_endf_designator(subshell)?;
        }
        self.subshells = subshells;
        Ok(())
    }

    pub fn set_subshell_occupancy(&mut self, subshell: u32, occupancy: f64) -> Result<()> {
        self.require_subshell(subshell)?;
        require_positive(occupancy, "subshell occupancy")?;
        self.subshell_occupancies.insert(subshell, occupancy);
        Ok(())
    }

    pub fn set_subshell_binding_energy(&mut self, subshell: u32, binding_energy: f64) -> Result<()> {
        self.require_subshell(subshell)?;
        require_positive(binding_energy, "subshell binding energy")?;
        self.subshell_binding_energies.insert(subshell, binding_energy);
        Ok(())
    }

    pub fn set_subshell_relaxation_data(
        &mut self,
        subshell: u32,
        data: SubshellRelaxationData,
    ) -> Result<()> {
        self.require_subshell(subshell)?;

        let n = data.vacancies.len();
        if data.particle_energies.len() != n || data.probabilities.len() != n {
            return Err(DataError::SizeMismatch(format!(
                "subshell {} relaxation data has {} vacancies, {} energies and {} probabilities",
                subshell_name(subshell),
                n,
                data.particle_energies.len(),
                data.probabilities.len()
            )));
        }

        if data.probabilities.iter().any(|&p| !(p > 0.0 && p <= 1.0)) {
            return Err(DataError::InvalidTable(format!(
                "subshell {} relaxation probabilities must be in (0, 1]",
                subshell_name(subshell)
            )));
        }

        self.subshell_relaxation_data.insert(subshell, data);
        Ok(())
    }

    pub fn subshells(&self) -> &BTreeSet<u32> {
        &self.subshells
    }

    pub fn subshell_occupancy(&self, subshell: u32) -> Option<f64> {
        self.subshell_occupancies.get(&subshell).copied()
    }

    pub fn subshell_binding_energy(&self, subshell: u32) -> Option<f64> {
        self.subshell_binding_energies.get(&subshell).copied()
    }

    pub fn subshell_relaxation_data(&self, subshell: u32) -> Option<&SubshellRelaxationData> {
        self.subshell_relaxation_data.get(&subshell)
    }

    pub fn has_relaxation_data(&self) -> bool {
        self.subshell_relaxation_data
            .values()
            .any(|data| data.number_of_transitions() > 0)
    }

    // ---- Photon momentum tables ----

    pub fn set_compton_profile(&mut self, subshell: u32, profile: TabulatedData) -> Result<()> {
        self.require_subshell(subshell)?;
        profile.validate("Compton profile momentum")?;
        self.compton_profiles.insert(subshell, profile);
        Ok(())
    }

    pub fn set_occupation_number(&mut self, subshell: u32, occupation: TabulatedData) -> Result<()> {
        self.require_subshell(subshell)?;
        occupation.validate("occupation number momentum")?;
        self.occupation_numbers.insert(subshell, occupation);
        Ok(())
    }

    pub fn set_waller_hartree_scattering_function(&mut self, data: TabulatedData) -> Result<()> {
        data.validate("scattering function recoil momentum")?;
        self.waller_hartree_scattering_function = data;
        Ok(())
    }

    pub fn set_waller_hartree_atomic_form_factor(&mut self, data: TabulatedData) -> Result<()> {
        data.validate("atomic form factor recoil momentum")?;
        self.waller_hartree_atomic_form_factor = data;
        Ok(())
    }

    pub fn set_waller_hartree_squared_atomic_form_factor(
        &mut self,
        data: TabulatedData,
    ) -> Result<()> {
        data.validate("squared atomic form factor squared recoil momentum")?;
        self.waller_hartree_squared_atomic_form_factor = data;
        Ok(())
    }

    pub fn compton_profile(&self, subshell: u32) -> Option<&TabulatedData> {
        self.compton_profiles.get(&subshell)
    }

    pub fn occupation_number(&self, subshell: u32) -> Option<&TabulatedData> {
        self.occupation_numbers.get(&subshell)
    }

    pub fn waller_hartree_scattering_function(&self) -> &TabulatedData {
        &self.waller_hartree_scattering_function
    }

    pub fn waller_hartree_atomic_form_factor(&self) -> &TabulatedData {
        &self.waller_hartree_atomic_form_factor
    }

    pub fn waller_hartree_squared_atomic_form_factor(&self) -> &TabulatedData {
        &self.waller_hartree_squared_atomic_form_factor
    }

    // ---- Photon cross sections ----

    /// Set the photon union energy grid
    ///
    /// Cross sections already stored for a previous grid are discarded.
    pub fn set_photon_energy_grid(&mut self, grid: Vec<f64>) -> Result<()> {
        validate_grid(&grid).map_err(|e| DataError::InvalidGrid(format!("photon energy grid: {}", e)))?;
        self.photon_energy_grid = grid;
        self.average_photon_heating_numbers.clear();
        self.photon_cross_sections.clear();
        self.subshell_photoelectric_cross_sections.clear();
        self.subshell_impulse_approx_incoherent_cross_sections.clear();
        self.waller_hartree_total_cross_section.clear();
        self.impulse_approx_total_cross_section.clear();
        Ok(())
    }

    pub fn set_average_photon_heating_numbers(&mut self, values: Vec<f64>) -> Result<()> {
        require_full_grid(&values, &self.photon_energy_grid, "average photon heating numbers")?;
        self.average_photon_heating_numbers = values;
        Ok(())
    }

    pub fn set_photon_cross_section(
        &mut self,
        kind: PhotonCrossSectionType,
        cross_section: CrossSectionOnGrid,
    ) -> Result<()> {
        require_fits(&cross_section, &self.photon_energy_grid, &format!("{:?}", kind))?;
        self.photon_cross_sections.insert(kind, cross_section);
        Ok(())
    }

    pub fn set_subshell_photoelectric_cross_section(
        &mut self,
        subshell: u32,
        cross_section: CrossSectionOnGrid,
    ) -> Result<()> {
        self.require_subshell(subshell)?;
        require_fits(
            &cross_section,
            &self.photon_energy_grid,
            &format!("subshell {} photoelectric", subshell_name(subshell)),
        )?;
        self.subshell_photoelectric_cross_sections
            .insert(subshell, cross_section);
        Ok(())
    }

    pub fn set_subshell_impulse_approx_incoherent_cross_section(
        &mut self,
        subshell: u32,
        cross_section: CrossSectionOnGrid,
    ) -> Result<()> {
        self.require_subshell(subshell)?;
        require_fits(
            &cross_section,
            &self.photon_energy_grid,
            &format!("subshell {} impulse approx. incoherent", subshell_name(subshell)),
        )?;
        self.subshell_impulse_approx_incoherent_cross_sections
            .insert(subshell, cross_section);
        Ok(())
    }

    pub fn set_waller_hartree_total_cross_section(&mut self, values: Vec<f64>) -> Result<()> {
        require_full_grid(&values, &self.photon_energy_grid, "Waller-Hartree total")?;
        self.waller_hartree_total_cross_section = values;
        Ok(())
    }

    pub fn set_impulse_approx_total_cross_section(&mut self, values: Vec<f64>) -> Result<()> {
        require_full_grid(&values, &self.photon_energy_grid, "impulse approx. total")?;
        self.impulse_approx_total_cross_section = values;
        Ok(())
    }

    pub fn photon_energy_grid(&self) -> &[f64] {
        &self.photon_energy_grid
    }

    pub fn average_photon_heating_numbers(&self) -> &[f64] {
        &self.average_photon_heating_numbers
    }

    pub fn photon_cross_section(&self, kind: PhotonCrossSectionType) -> Option<&CrossSectionOnGrid> {
        self.photon_cross_sections.get(&kind)
    }

    pub fn subshell_photoelectric_cross_section(&self, subshell: u32) -> Option<&CrossSectionOnGrid> {
        self.subshell_photoelectric_cross_sections.get(&subshell)
    }

    pub fn subshell_impulse_approx_incoherent_cross_section(
        &self,
        subshell: u32,
    ) -> Option<&CrossSectionOnGrid> {
        self.subshell_impulse_approx_incoherent_cross_sections
            .get(&subshell)
    }

    pub fn waller_hartree_total_cross_section(&self) -> &[f64] {
        &self.waller_hartree_total_cross_section
    }

    pub fn impulse_approx_total_cross_section(&self) -> &[f64] {
        &self.impulse_approx_total_cross_section
    }

    // ---- Electron cross sections ----

    /// Set the electron union energy grid
    ///
    /// Cross sections already stored for a previous grid are discarded.
    pub fn set_electron_energy_grid(&mut self, grid: Vec<f64>) -> Result<()> {
        validate_grid(&grid)
            .map_err(|e| DataError::InvalidGrid(format!("electron energy grid: {}", e)))?;
        self.electron_energy_grid = grid;
        self.electron_cross_sections.clear();
        self.electroionization_cross_sections.clear();
        self.total_electron_cross_section.clear();
        Ok(())
    }

    pub fn set_electron_cross_section(
        &mut self,
        kind: ElectronCrossSectionType,
        cross_section: CrossSectionOnGrid,
    ) -> Result<()> {
        require_fits(&cross_section, &self.electron_energy_grid, &format!("{:?}", kind))?;
        self.electron_cross_sections.insert(kind, cross_section);
        Ok(())
    }

    pub fn set_electroionization_cross_section(
        &mut self,
        subshell: u32,
        cross_section: CrossSectionOnGrid,
    ) -> Result<()> {
        self.require_subshell(subshell)?;
        require_fits(
            &cross_section,
            &self.electron_energy_grid,
            &format!("subshell {} electroionization", subshell_name(subshell)),
        )?;
        self.electroionization_cross_sections
            .insert(subshell, cross_section);
        Ok(())
    }

    pub fn set_total_electron_cross_section(&mut self, values: Vec<f64>) -> Result<()> {
        require_full_grid(&values, &self.electron_energy_grid, "total electron")?;
        self.total_electron_cross_section = values;
        Ok(())
    }

    pub fn electron_energy_grid(&self) -> &[f64] {
        &self.electron_energy_grid
    }

    pub fn electron_cross_section(
        &self,
        kind: ElectronCrossSectionType,
    ) -> Option<&CrossSectionOnGrid> {
        self.electron_cross_sections.get(&kind)
    }

    pub fn electroionization_cross_section(&self, subshell: u32) -> Option<&CrossSectionOnGrid> {
        self.electroionization_cross_sections.get(&subshell)
    }

    pub fn total_electron_cross_section(&self) -> &[f64] {
        &self.total_electron_cross_section
    }

    // ---- Electron secondary distributions ----

    /// Set the cutoff elastic angular distributions
    ///
    /// Outgoing values are scattering angle cosines and must lie in [-1, 1].
    pub fn set_cutoff_elastic_angular_distributions(
        &mut self,
        table: SecondaryDistributionTable,
    ) -> Result<()> {
        table.validate("cutoff elastic angular")?;

        let out_of_range = table
            .outgoing_values
            .iter()
            .flatten()
            .any(|&mu| !(-1.0..=1.0).contains(&mu));
        if out_of_range {
            return Err(DataError::InvalidTable(
                "cutoff elastic angle cosines must lie in [-1, 1]".to_string(),
            ));
        }

        self.cutoff_elastic_angular_distributions = table;
        Ok(())
    }

    pub fn set_bremsstrahlung_photon_distributions(
        &mut self,
        table: SecondaryDistributionTable,
    ) -> Result<()> {
        table.validate("bremsstrahlung photon energy")?;
        self.bremsstrahlung_photon_distributions = table;
        Ok(())
    }

    pub fn set_electroionization_recoil_distributions(
        &mut self,
        subshell: u32,
        table: SecondaryDistributionTable,
    ) -> Result<()> {
        self.require_subshell(subshell)?;
        table.validate(&format!(
            "subshell {} electroionization recoil energy",
            subshell_name(subshell)
        ))?;
        self.electroionization_recoil_distributions
            .insert(subshell, table);
        Ok(())
    }

    pub fn set_atomic_excitation_energy_loss(&mut self, energy_loss: TabulatedData) -> Result<()> {
        energy_loss.validate("atomic excitation energy loss")?;
        self.atomic_excitation_energy_loss = energy_loss;
        Ok(())
    }

    pub fn cutoff_elastic_angular_distributions(&self) -> &SecondaryDistributionTable {
        &self.cutoff_elastic_angular_distributions
    }

    pub fn bremsstrahlung_photon_distributions(&self) -> &SecondaryDistributionTable {
        &self.bremsstrahlung_photon_distributions
    }

    pub fn electroionization_recoil_distributions(
        &self,
        subshell: u32,
    ) -> Option<&SecondaryDistributionTable> {
        self.electroionization_recoil_distributions.get(&subshell)
    }

    pub fn atomic_excitation_energy_loss(&self) -> &TabulatedData {
        &self.atomic_excitation_energy_loss
    }

    fn require_subshell(&self, subshell: u32) -> Result<()> {
        if self.subshells.contains(&subshell) {
            Ok(())
        } else {
            Err(DataError::UnknownSubshell(format!(
                "subshell {} has not been set",
                subshell_name(subshell)
            )))
        }
    }
}

fn require_positive(value: f64, what: &str) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(DataError::InvalidTable(format!(
            "the {} must be positive, got {}",
            what, value
        )))
    }
}

fn require_energy_limits(min: f64, max: f64, particle: &str) -> Result<()> {
    require_positive(min, &format!("min {} energy", particle))?;
    if !(min < max) || !max.is_finite() {
        return Err(DataError::InvalidTable(format!(
            "the min {} energy ({}) must be less than the max {} energy ({})",
            particle, min, particle, max
        )));
    }
    Ok(())
}

fn require_fits(cross_section: &CrossSectionOnGrid, grid: &[f64], what: &str) -> Result<()> {
    if grid.is_empty() {
        return Err(DataError::MissingData(format!(
            "the energy grid must be set before the {} cross section",
            what
        )));
    }

    if !cross_section.fits_grid(grid.len()) {
        return Err(DataError::SizeMismatch(format!(
            "the {} cross section ({} values from index {}) does not end at the end of the \
             energy grid ({} points)",
            what,
            cross_section.len(),
            cross_section.threshold_index,
            grid.len()
        )));
    }

    Ok(())
}

fn require_full_grid(values: &[f64], grid: &[f64], what: &str) -> Result<()> {
    if grid.is_empty() || values.len() != grid.len() {
        return Err(DataError::SizeMismatch(format!(
            "the {} values ({}) must cover the whole energy grid ({} points)",
            what,
            values.len(),
            grid.len()
        )));
    }
    Ok(())
}
