/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! The standard ACE and ENDL data generator
//!
//! Takes its data from the same tables as
//! [`AceAndEndlElectronPhotonRelaxationDataGenerator`](super::AceAndEndlElectronPhotonRelaxationDataGenerator)
//! but keeps the lin-lin bremsstrahlung, excitation and electroionization
//! cross sections and refines them over the whole electron union grid.

use super::ace_and_endl::{populate_from_ace_and_endl, prepare_ace_and_endl_config};
use super::config::GeneratorConfig;
use super::electron::ElectronCrossSectionPolicy;
use super::errors::Result;
use crate::data::{AceEprTable, ElectronPhotonRelaxationDataContainer, EndlDataContainer};
use log::info;

#[derive(Debug, Clone)]
pub struct StandardElectronPhotonRelaxationDataGenerator<'a> {
    ace: &'a AceEprTable,
    endl: &'a EndlDataContainer,
    config: GeneratorConfig,
}

impl<'a> StandardElectronPhotonRelaxationDataGenerator<'a> {
    /// Create the generator; the tables must be for the same element
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

    pub fn populate_epr_data_container(&self) -> Result<ElectronPhotonRelaxationDataContainer> {
        info!(
            "Generating electron-photon-relaxation data for Z={} (standard generator)",
            self.ace.atomic_number
        );

        populate_from_ace_and_endl(
            self.ace,
            self.endl,
            &self.config,
            ElectronCrossSectionPolicy::legacy(),
        )
    }
}
