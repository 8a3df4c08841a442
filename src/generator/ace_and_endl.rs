/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Data generator that combines an ACE EPR table with the ENDL tables
//!
//! Relaxation, Compton profiles, form factors, heating numbers and the
//! incoherent, coherent and photoelectric cross sections come from the ACE
//! table. Pair and triplet production and all electron data come from the
//! ENDL tables.

use super::config::GeneratorConfig;
use super::electron::{set_electron_cross_sections, ElectronCrossSectionPolicy};
use super::errors::{GeneratorError, Result};
use super::initialize_container;
use super::momentum::{
    set_compton_profiles, set_occupation_numbers, set_waller_hartree_form_factors,
    set_waller_hartree_scattering_function,
};
use super::photon::{set_photon_cross_sections, PhotonProcessTables};
use super::relaxation::set_ace_relaxation_data;
use crate::data::{
    subshell_name, AceEprTable, DataError, ElectronPhotonRelaxationDataContainer,
    EndlDataContainer,
};
use log::info;

/// Generates electron-photon-relaxation data from an ACE EPR table and the
/// ENDL tables of the same element
#[derive(Debug, Clone)]
pub struct AceAndEndlElectronPhotonRelaxationDataGenerator<'a> {
    ace: &'a AceEprTable,
    endl: &'a EndlDataContainer,
    config: GeneratorConfig,
}

impl<'a> AceAndEndlElectronPhotonRelaxationDataGenerator<'a> {
    /// Create the generator
    ///
    /// # Arguments
    ///
    /// * `ace` - The ACE EPR table
    /// * `endl` - The ENDL source tables
    /// * `config` - The generator configuration
    ///
    /// # Returns
    ///
    /// The generator, or an error if the tables are for different elements
    pub fn new(
        ace: &'a AceEprTable,
        endl: &'a EndlDataContainer,
        config: GeneratorConfig,
    ) -> Result<Self> {
        let config = prepare_ace_and_endl_config(ace, endl, config)?;
        Ok(Self { ace, endl, config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn atomic_number(&self) -> u32 {
        self.ace.atomic_number
    }

    /// Generate the full data container
    pub fn populate_epr_data_container(&self) -> Result<ElectronPhotonRelaxationDataContainer> {
        info!(
            "Generating electron-photon-relaxation data for Z={} from the ACE table {} and the ENDL tables",
            self.ace.atomic_number, self.ace.table_name
        );

        populate_from_ace_and_endl(
            self.ace,
            self.endl,
            &self.config,
            ElectronCrossSectionPolicy::log_log(),
        )
    }
}

/// Check that the tables describe the same element and clamp the energy
/// limits to the tabulated ranges
pub(super) fn prepare_ace_and_endl_config(
    ace: &AceEprTable,
    endl: &EndlDataContainer,
    mut config: GeneratorConfig,
) -> Result<GeneratorConfig> {
    if ace.atomic_number != endl.atomic_number {
        return Err(GeneratorError::IncompatibleTables {
            ace: ace.atomic_number,
            endl: endl.atomic_number,
        });
    }

    config.validate()?;

    let (min_photon, max_photon) = ace.table_photon_energy_range()?;
    config.clamp_photon_energy_limits("ACE", min_photon, max_photon);

    let (min_electron, max_electron) = endl.table_electron_energy_range()?;
    config.clamp_electron_energy_limits("ENDL", min_electron, max_electron);

    config.validate()?;
    Ok(config)
}

/// Pipeline shared by the generators that take their photon data from an
/// ACE table
pub(super) fn populate_from_ace_and_endl(
    ace: &AceEprTable,
    endl: &EndlDataContainer,
    config: &GeneratorConfig,
    policy: ElectronCrossSectionPolicy,
) -> Result<ElectronPhotonRelaxationDataContainer> {
    let photon_generator = config.photon_grid_generator()?;

    let mut container =
        initialize_container(ace.atomic_number, endl.atomic_weight, config, policy)?;

    info!("Setting the relaxation data");
    set_ace_relaxation_data(&mut container, ace)?;

    let designators = ace.extract_subshell_endf_designators()?;
    set_compton_profiles(&mut container, &photon_generator, |subshell| {
        let index = designators
            .iter()
            .position(|&designator| designator == subshell)
            .ok_or_else(|| {
                GeneratorError::from(DataError::MissingData(format!(
                    "the ACE table has no Compton profile for subshell {}",
                    subshell_name(subshell)
                )))
            })?;
        Ok(ace.extract_half_compton_profile(index)?)
    })?;
    set_occupation_numbers(&mut container, &photon_generator)?;
    set_waller_hartree_scattering_function(
        &mut container,
        &photon_generator,
        &ace.extract_scattering_function()?,
    )?;
    set_waller_hartree_form_factors(
        &mut container,
        &photon_generator,
        &ace.extract_form_factor()?,
    )?;

    let tables = PhotonProcessTables {
        heating_numbers: Some(ace.extract_heating_numbers()?),
        waller_hartree_incoherent: ace.extract_incoherent_cross_section()?,
        waller_hartree_coherent: ace.extract_coherent_cross_section()?,
        pair_production: endl.pair_production_cross_section.clone(),
        triplet_production: endl.triplet_production_cross_section.clone(),
        subshell_photoelectric: ace.extract_subshell_photoelectric_cross_sections()?,
    };
    set_photon_cross_sections(&mut container, &tables, config)?;

    set_electron_cross_sections(&mut container, endl, policy, config)?;

    Ok(container)
}
