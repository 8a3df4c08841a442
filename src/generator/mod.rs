/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Electron-photon-relaxation data generators
//!
//! Each generator turns source tables into an
//! [`ElectronPhotonRelaxationDataContainer`] in the same order: table
//! information, relaxation data, Compton profiles, occupation numbers,
//! Waller-Hartree scattering function and form factors, photon cross
//! sections and finally electron cross sections.

pub mod ace_and_endl;
pub mod config;
pub mod electron;
pub mod endl;
pub mod errors;
pub mod momentum;
pub mod photon;
pub mod relaxation;
pub mod standard;

pub use ace_and_endl::AceAndEndlElectronPhotonRelaxationDataGenerator;
pub use config::GeneratorConfig;
pub use electron::{
    set_electron_cross_sections, set_electron_secondary_distributions, ElectronCrossSectionPolicy,
};
pub use endl::EndlElectronPhotonRelaxationDataGenerator;
pub use errors::{GeneratorError, Result};
pub use photon::{set_photon_cross_sections, PhotonProcessTables};
pub use relaxation::{set_ace_relaxation_data, set_endl_relaxation_data};
pub use standard::StandardElectronPhotonRelaxationDataGenerator;

use crate::data::ElectronPhotonRelaxationDataContainer;

/// Create a container holding the table information
fn initialize_container(
    atomic_number: u32,
    atomic_weight: f64,
    config: &GeneratorConfig,
    policy: ElectronCrossSectionPolicy,
) -> Result<ElectronPhotonRelaxationDataContainer> {
    let mut container = ElectronPhotonRelaxationDataContainer::new();

    container.set_atomic_number(atomic_number)?;
    container.set_atomic_weight(atomic_weight)?;
    container.set_photon_energy_limits(config.min_photon_energy, config.max_photon_energy)?;
    container.set_electron_energy_limits(config.min_electron_energy, config.max_electron_energy)?;
    container.set_generation_parameters(config.generation_parameters(policy.label()));

    Ok(container)
}
