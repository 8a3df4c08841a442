/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! ENDL source tables
//!
//! Holds the evaluated photon (EPDL), electron (EEDL) and atomic relaxation
//! (EADL) data of one element after extraction from the native ENDL files.
//! Subshells are keyed by ENDF designator. Photon energies are in MeV, cross
//! sections in barns and recoil momenta in inverse centimeters. Half Compton
//! profiles are in atomic units.

use super::errors::{DataError, Result};
use super::secondary::SecondaryDistributionTable;
use super::tabulated::TabulatedData;
use super::{read_json, write_json};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// ENDL data for one element
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndlDataContainer {
    pub atomic_number: u32,
    pub atomic_weight: f64,

    // Relaxation
    pub subshells: BTreeSet<u32>,
    pub subshell_occupancies: BTreeMap<u32, f64>,
    pub subshell_binding_energies: BTreeMap<u32, f64>,
    /// Radiative transition probabilities: vacancy subshell -> filling subshell -> probability
    pub radiative_transition_probabilities: BTreeMap<u32, BTreeMap<u32, f64>>,
    /// Radiative transition energies: vacancy subshell -> filling subshell -> photon energy
    pub radiative_transition_energies: BTreeMap<u32, BTreeMap<u32, f64>>,
    /// Non-radiative transition probabilities: vacancy -> filling -> emitting -> probability
    pub nonradiative_transition_probabilities: BTreeMap<u32, BTreeMap<u32, BTreeMap<u32, f64>>>,
    /// Non-radiative transition energies: vacancy -> filling -> emitting -> electron energy
    pub nonradiative_transition_energies: BTreeMap<u32, BTreeMap<u32, BTreeMap<u32, f64>>>,

    // Photon
    pub coherent_cross_section: TabulatedData,
    pub incoherent_cross_section: TabulatedData,
    pub form_factor: TabulatedData,
    pub scattering_function: TabulatedData,
    pub pair_production_cross_section: TabulatedData,
    pub triplet_production_cross_section: TabulatedData,
    pub photoelectric_cross_sections: BTreeMap<u32, TabulatedData>,
    pub compton_profiles: BTreeMap<u32, TabulatedData>,

    // Electron
    pub elastic_energy_grid: Vec<f64>,
    pub cutoff_elastic_cross_section: Vec<f64>,
    pub total_elastic_cross_section: Vec<f64>,
    pub electroionization_cross_sections: BTreeMap<u32, TabulatedData>,
    pub bremsstrahlung_cross_section: TabulatedData,
    pub atomic_excitation_cross_section: TabulatedData,

    // Electron secondary distributions
    /// Cutoff elastic scattering angle cosines and PDFs
    pub cutoff_elastic_angular_distributions: SecondaryDistributionTable,
    /// Bremsstrahlung photon energies and PDFs
    pub bremsstrahlung_photon_distributions: SecondaryDistributionTable,
    /// Electroionization recoil energies and PDFs per subshell
    pub electroionization_recoil_distributions: BTreeMap<u32, SecondaryDistributionTable>,
    /// Mean energy lost to atomic excitation
    pub atomic_excitation_energy_loss: TabulatedData,
}

impl EndlDataContainer {
    /// Load the tables from a JSON file
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        read_json(path)
    }

    /// Save the tables to a JSON file
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_json(self, path)
    }

    /// Photon energy range covered by the coherent and incoherent tables
    pub fn table_photon_energy_range(&self) -> Result<(f64, f64)> {
        let grids = [
            &self.coherent_cross_section.grid,
            &self.incoherent_cross_section.grid,
        ];

        if grids.iter().any(|grid| grid.is_empty()) {
            return Err(DataError::MissingData(
                "the ENDL coherent and incoherent cross sections are required".to_string(),
            ));
        }

        let min = grids.iter().map(|grid| grid[0]).fold(f64::INFINITY, f64::min);
        let max = grids
            .iter()
            .map(|grid| grid[grid.len() - 1])
            .fold(f64::NEG_INFINITY, f64::max);

        Ok((min, max))
    }

    /// Electron energy range covered by the elastic tables
    pub fn table_electron_energy_range(&self) -> Result<(f64, f64)> {
        match (self.elastic_energy_grid.first(), self.elastic_energy_grid.last()) {
            (Some(&min), Some(&max)) => Ok((min, max)),
            _ => Err(DataError::MissingData(
                "the ENDL elastic energy grid is empty".to_string(),
            )),
        }
    }

    /// Cutoff elastic cross section on the elastic energy grid
    pub fn cutoff_elastic(&self) -> Result<TabulatedData> {
        self.elastic_table(&self.cutoff_elastic_cross_section, "cutoff elastic")
    }

    /// Total elastic cross section on the elastic energy grid
    pub fn total_elastic(&self) -> Result<TabulatedData> {
        self.elastic_table(&self.total_elastic_cross_section, "total elastic")
    }

    pub fn subshell_binding_energy(&self, subshell: u32) -> Result<f64> {
        self.subshell_binding_energies
            .get(&subshell)
            .copied()
            .ok_or_else(|| missing_subshell_data("binding energy", subshell))
    }

    pub fn subshell_occupancy(&self, subshell: u32) -> Result<f64> {
        self.subshell_occupancies
            .get(&subshell)
            .copied()
            .ok_or_else(|| missing_subshell_data("occupancy", subshell))
    }

    fn elastic_table(&self, values: &[f64], name: &str) -> Result<TabulatedData> {
        let table = TabulatedData::new(self.elastic_energy_grid.clone(), values.to_vec());
        table.validate(&format!("ENDL {} cross section", name))?;
        Ok(table)
    }
}

fn missing_subshell_data(what: &str, subshell: u32) -> DataError {
    DataError::MissingData(format!(
        "the ENDL tables have no {} for subshell {}",
        what,
        super::subshell::subshell_name(subshell)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn container() -> EndlDataContainer {
        EndlDataContainer {
            atomic_number: 1,
            atomic_weight: 1.008,
            subshells: [1].into_iter().collect(),
            subshell_occupancies: [(1, 1.0)].into_iter().collect(),
            subshell_binding_energies: [(1, 1.361e-5)].into_iter().collect(),
            coherent_cross_section: TabulatedData::new(vec![1e-6, 1e5], vec![1.0, 1e-8]),
            incoherent_cross_section: TabulatedData::new(vec![1e-7, 1e4], vec![1e-3, 1e-2]),
            elastic_energy_grid: vec![1e-5, 1.0, 1e5],
            cutoff_elastic_cross_section: vec![3.0, 2.0, 1.0],
            total_elastic_cross_section: vec![4.0, 2.5, 1.0],
            ..Default::default()
        }
    }

    #[test]
    fn test_energy_ranges() {
        let endl = container();
        assert_eq!(endl.table_photon_energy_range().unwrap(), (1e-7, 1e5));
        assert_eq!(endl.table_electron_energy_range().unwrap(), (1e-5, 1e5));
        assert!(EndlDataContainer::default()
            .table_photon_energy_range()
            .is_err());
        assert!(EndlDataContainer::default()
            .table_electron_energy_range()
            .is_err());
    }

    #[test]
    fn test_elastic_tables() {
        let endl = container();
        assert_eq!(endl.total_elastic().unwrap().values, vec![4.0, 2.5, 1.0]);

        let mut broken = container();
        broken.cutoff_elastic_cross_section.pop();
        assert!(broken.cutoff_elastic().is_err());
    }

    #[test]
    fn test_subshell_lookup() {
        let endl = container();
        assert_eq!(endl.subshell_binding_energy(1).unwrap(), 1.361e-5);
        assert_eq!(endl.subshell_occupancy(1).unwrap(), 1.0);
        assert!(endl.subshell_binding_energy(2).is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("endl.json");

        let endl = container();
        endl.save_json(&path).unwrap();
        let loaded = EndlDataContainer::load_json(&path).unwrap();
        assert_eq!(loaded, endl);
    }
}
