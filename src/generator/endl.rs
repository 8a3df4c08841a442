/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Data generator that uses the ENDL tables only

use super::config::GeneratorConfig;
use super::electron::{set_electron_cross_sections, ElectronCrossSectionPolicy};
use super::errors::{GeneratorError, Result};
use super::momentum::{
    set_compton_profiles, set_occupation_numbers, set_waller_hartree_form_factors,
    set_waller_hartree_scattering_function,
};
use super::photon::{set_photon_cross_sections, PhotonProcessTables};
use super::initialize_container;
use super::relaxation::set_endl_relaxation_data;
use crate::data::{
    subshell_name, DataError, ElectronPhotonRelaxationDataContainer, EndlDataContainer,
};
use log::info;

/// Generates electron-photon-relaxation data from the ENDL (EADL, EPDL and
/// EEDL) tables of one element
#[derive(Debug, Clone)]
pub struct EndlElectronPhotonRelaxationDataGenerator<'a> {
    endl: &'a EndlDataContainer,
    config: GeneratorConfig,
}

impl<'a> EndlElectronPhotonRelaxationDataGenerator<'a> {
    /// Create the generator
    ///
    /// Requested energy limits outside the tabulated ranges are clamped to
    /// the table limits with a warning.
    ///
    /// # Arguments
    ///
    /// * `endl` - The ENDL source tables
    /// * `config` - The generator configuration
    pub fn new(endl: &'a EndlDataContainer, mut config: GeneratorConfig) -> Result<Self> {
        config.validate()?;

        let (min_photon, max_photon) = endl.table_photon_energy_range()?;
        config.clamp_photon_energy_limits("ENDL", min_photon, max_photon);

        let (min_electron, max_electron) = endl.table_electron_energy_range()?;
        config.clamp_electron_energy_limits("ENDL", min_electron, max_electron);

        config.validate()?;

        Ok(Self { endl, config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn atomic_number(&self) -> u32 {
        self.endl.atomic_number
    }

    /// Generate the full data container
    pub fn populate_epr_data_container(&self) -> Result<ElectronPhotonRelaxationDataContainer> {
        let policy = ElectronCrossSectionPolicy::log_log();
        let photon_generator = self.config.photon_grid_generator()?;

        info!(
            "Generating electron-photon-relaxation data for Z={} from the ENDL tables",
            self.endl.atomic_number
        );

        let mut container = initialize_container(
            self.endl.atomic_number,
            self.endl.atomic_weight,
            &self.config,
            policy,
        )?;

        info!("Setting the relaxation data");
        set_endl_relaxation_data(&mut container, self.endl)?;

        set_compton_profiles(&mut container, &photon_generator, |subshell| {
            self.endl
                .compton_profiles
                .get(&subshell)
                .cloned()
                .ok_or_else(|| {
                    GeneratorError::from(DataError::MissingData(format!(
                        "the ENDL tables have no Compton profile for subshell {}",
                        subshell_name(subshell)
                    )))
                })
        })?;
        set_occupation_numbers(&mut container, &photon_generator)?;
        set_waller_hartree_scattering_function(
            &mut container,
            &photon_generator,
            &self.endl.scattering_function,
        )?;
        set_waller_hartree_form_factors(&mut container, &photon_generator, &self.endl.form_factor)?;

        set_photon_cross_sections(&mut container, &self.photon_process_tables()?, &self.config)?;
        set_electron_cross_sections(&mut container, self.endl, policy, &self.config)?;

        Ok(container)
    }

    fn photon_process_tables(&self) -> Result<PhotonProcessTables> {
        let subshell_photoelectric = self
            .endl
            .subshells
            .iter()
            .map(|&subshell| {
                self.endl
                    .photoelectric_cross_sections
                    .get(&subshell)
                    .map(|table| (subshell, table.clone()))
                    .ok_or_else(|| {
                        GeneratorError::from(DataError::MissingData(format!(
                            "the ENDL tables have no photoelectric cross section for subshell {}",
                            subshell_name(subshell)
                        )))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(PhotonProcessTables {
            heating_numbers: None,
            waller_hartree_incoherent: self.endl.incoherent_cross_section.clone(),
            waller_hartree_coherent: self.endl.coherent_cross_section.clone(),
            pair_production: self.endl.pair_production_cross_section.clone(),
            triplet_production: self.endl.triplet_production_cross_section.clone(),
            subshell_photoelectric,
        })
    }
}
