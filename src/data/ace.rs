/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! ACE electron-photon-relaxation tables
//!
//! Holds the XSS blocks of an ACE EPR table (the `eprdata12` layout) after
//! they have been split out of the raw table. Offsets stored in the locator
//! blocks (RELO, LSWD) are zero-based indices into their data blocks.
//!
//! Cross sections in ESZG and SPHEL are stored as natural logarithms. A zero
//! entry marks an energy below the process threshold.

use super::errors::{DataError, Result};
use super::tabulated::TabulatedData;
use super::{read_json, write_json};
use crate::utils::inverse_angstrom_to_inverse_cm;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Number of sub-blocks in the ESZG block
const ESZG_SUB_BLOCKS: usize = 5;

/// Number of sub-blocks in the SUBSH block
const SUBSH_SUB_BLOCKS: usize = 5;

/// Values per transition in the XPROB block
const XPROB_ENTRIES_PER_TRANSITION: usize = 4;

/// One relaxation transition read from the XPROB block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AceTransition {
    /// ENDF designator of the subshell that fills the vacancy
    pub primary: u32,
    /// ENDF designator of the subshell that emits the Auger electron (0 for radiative)
    pub secondary: u32,
    /// Energy of the emitted particle in MeV
    pub energy: f64,
    /// Cumulative transition probability
    pub cdf: f64,
}

/// The XSS blocks of an ACE EPR table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AceEprTable {
    pub table_name: String,
    pub atomic_number: u32,
    /// ln(E), ln(incoherent), ln(coherent), ln(photoelectric), ln(pair)
    pub eszg_block: Vec<f64>,
    /// Recoil momentum (inverse Angstroms) then scattering function
    pub jince_block: Vec<f64>,
    /// Recoil momentum (inverse Angstroms), integrated form factor squared, form factor
    pub jcohe_block: Vec<f64>,
    /// Average heating numbers (MeV) on the photon energy grid
    pub lhnm_block: Vec<f64>,
    /// Designators, occupancies, binding energies, interaction probabilities, transition counts
    pub subsh_block: Vec<f64>,
    /// Offsets of the Compton profiles in SWD
    pub lswd_block: Vec<f64>,
    /// Compton profiles: interpolation flag, size, momentum, profile, cdf
    pub swd_block: Vec<f64>,
    /// ln subshell photoelectric cross sections, subshell-major
    pub sphel_block: Vec<f64>,
    /// Offsets of the transition data in XPROB
    pub relo_block: Vec<f64>,
    /// Transition data: primary, secondary, energy, cdf
    pub xprob_block: Vec<f64>,
}

impl AceEprTable {
    /// Load the table blocks from a JSON file
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        read_json(path)
    }

    /// Save the table blocks to a JSON file
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_json(self, path)
    }

    pub fn number_of_energies(&self) -> usize {
        self.eszg_block.len() / ESZG_SUB_BLOCKS
    }

    pub fn number_of_subshells(&self) -> usize {
        self.subsh_block.len() / SUBSH_SUB_BLOCKS
    }

    /// Photon energy grid in MeV
    pub fn extract_photon_energy_grid(&self) -> Result<Vec<f64>> {
        Ok(self.eszg_sub_block(0)?.iter().map(|e| e.exp()).collect())
    }

    /// Lowest and highest tabulated photon energy
    pub fn table_photon_energy_range(&self) -> Result<(f64, f64)> {
        let log_grid = self.eszg_sub_block(0)?;
        Ok((log_grid[0].exp(), log_grid[log_grid.len() - 1].exp()))
    }

    pub fn extract_incoherent_cross_section(&self) -> Result<TabulatedData> {
        self.extract_log_cross_section(self.eszg_sub_block(1)?, "incoherent")
    }

    pub fn extract_coherent_cross_section(&self) -> Result<TabulatedData> {
        self.extract_log_cross_section(self.eszg_sub_block(2)?, "coherent")
    }

    pub fn extract_photoelectric_cross_section(&self) -> Result<TabulatedData> {
        self.extract_log_cross_section(self.eszg_sub_block(3)?, "photoelectric")
    }

    pub fn extract_pair_production_cross_section(&self) -> Result<TabulatedData> {
        self.extract_log_cross_section(self.eszg_sub_block(4)?, "pair production")
    }

    /// Subshell photoelectric cross sections in subshell order
    pub fn extract_subshell_photoelectric_cross_sections(&self) -> Result<Vec<(u32, TabulatedData)>> {
        let designators = self.extract_subshell_endf_designators()?;
        let n_energies = self.number_of_energies();

        if self.sphel_block.len() != n_energies * designators.len() {
            return Err(DataError::SizeMismatch(format!(
                "the SPHEL block has {} values but {} subshells on {} energies were expected",
                self.sphel_block.len(),
                designators.len(),
                n_energies
            )));
        }

        designators
            .iter()
            .enumerate()
            .map(|(i, &designator)| {
                let block = &self.sphel_block[i * n_energies..(i + 1) * n_energies];
                let name = format!(
                    "subshell {} photoelectric",
                    super::subshell::subshell_name(designator)
                );
                Ok((designator, self.extract_log_cross_section(block, &name)?))
            })
            .collect()
    }

    /// Average photon heating numbers on the photon energy grid
    pub fn extract_heating_numbers(&self) -> Result<TabulatedData> {
        let grid = self.extract_photon_energy_grid()?;

        if self.lhnm_block.len() != grid.len() {
            return Err(DataError::SizeMismatch(format!(
                "the LHNM block has {} values but the energy grid has {} points",
                self.lhnm_block.len(),
                grid.len()
            )));
        }

        Ok(TabulatedData::new(grid, self.lhnm_block.clone()))
    }

    /// Waller-Hartree scattering function with recoil momentum in inverse cm
    pub fn extract_scattering_function(&self) -> Result<TabulatedData> {
        let blocks = split_block(&self.jince_block, 2, "JINCE")?;
        Ok(TabulatedData::new(
            blocks[0].iter().map(|&q| inverse_angstrom_to_inverse_cm(q)).collect(),
            blocks[1].to_vec(),
        ))
    }

    /// Atomic form factor with recoil momentum in inverse cm
    pub fn extract_form_factor(&self) -> Result<TabulatedData> {
        let blocks = split_block(&self.jcohe_block, 3, "JCOHE")?;
        Ok(TabulatedData::new(
            blocks[0].iter().map(|&q| inverse_angstrom_to_inverse_cm(q)).collect(),
            blocks[2].to_vec(),
        ))
    }

    pub fn extract_subshell_endf_designators(&self) -> Result<Vec<u32>> {
        Ok(self
            .subsh_sub_block(0)?
            .iter()
            .map(|&d| d.round() as u32)
            .collect())
    }

    pub fn extract_subshell_occupancies(&self) -> Result<Vec<f64>> {
        Ok(self.subsh_sub_block(1)?.to_vec())
    }

    pub fn extract_subshell_binding_energies(&self) -> Result<Vec<f64>> {
        Ok(self.subsh_sub_block(2)?.to_vec())
    }

    pub fn extract_subshell_vacancy_transition_counts(&self) -> Result<Vec<usize>> {
        Ok(self
            .subsh_sub_block(4)?
            .iter()
            .map(|&n| n.round() as usize)
            .collect())
    }

    /// Half Compton profile of a subshell (momentum and profile in atomic units)
    pub fn extract_half_compton_profile(&self, subshell_index: usize) -> Result<TabulatedData> {
        let offset = locator(&self.lswd_block, subshell_index, "LSWD")?;
        let size = self
            .swd_block
            .get(offset + 1)
            .map(|&n| n.round() as usize)
            .ok_or_else(|| truncated_block("SWD", subshell_index))?;

        let start = offset + 2;
        let end = start + 2 * size;
        if end > self.swd_block.len() {
            return Err(truncated_block("SWD", subshell_index));
        }

        Ok(TabulatedData::new(
            self.swd_block[start..start + size].to_vec(),
            self.swd_block[start + size..end].to_vec(),
        ))
    }

    /// Relaxation transitions of a subshell
    pub fn extract_subshell_transitions(&self, subshell_index: usize) -> Result<Vec<AceTransition>> {
        let counts = self.extract_subshell_vacancy_transition_counts()?;
        let count = counts
            .get(subshell_index)
            .copied()
            .ok_or_else(|| truncated_block("SUBSH", subshell_index))?;

        if count == 0 {
            return Ok(Vec::new());
        }

        let offset = locator(&self.relo_block, subshell_index, "RELO")?;
        let end = offset + count * XPROB_ENTRIES_PER_TRANSITION;
        if end > self.xprob_block.len() {
            return Err(truncated_block("XPROB", subshell_index));
        }

        Ok(self.xprob_block[offset..end]
            .chunks_exact(XPROB_ENTRIES_PER_TRANSITION)
            .map(|entry| AceTransition {
                primary: entry[0].round() as u32,
                secondary: entry[1].round() as u32,
                energy: entry[2],
                cdf: entry[3],
            })
            .collect())
    }

    fn eszg_sub_block(&self, index: usize) -> Result<&[f64]> {
        let blocks = split_block(&self.eszg_block, ESZG_SUB_BLOCKS, "ESZG")?;
        Ok(blocks[index])
    }

    fn subsh_sub_block(&self, index: usize) -> Result<&[f64]> {
        let blocks = split_block(&self.subsh_block, SUBSH_SUB_BLOCKS, "SUBSH")?;
        Ok(blocks[index])
    }

    /// Exponentiate a log cross section from its first nonzero entry
    fn extract_log_cross_section(&self, log_values: &[f64], name: &str) -> Result<TabulatedData> {
        let log_grid = self.eszg_sub_block(0)?;
        let start = log_values
            .iter()
            .position(|&v| v != 0.0)
            .ok_or_else(|| {
                DataError::MissingData(format!(
                    "the ACE {} cross section of table {} is empty",
                    name, self.table_name
                ))
            })?;

        Ok(TabulatedData::new(
            log_grid[start..].iter().map(|e| e.exp()).collect(),
            log_values[start..].iter().map(|s| s.exp()).collect(),
        ))
    }
}

/// Split a block into `parts` equal, non-empty sub-blocks
fn split_block<'a>(block: &'a [f64], parts: usize, name: &str) -> Result<Vec<&'a [f64]>> {
    if block.is_empty() || block.len() % parts != 0 {
        return Err(DataError::InvalidTable(format!(
            "the {} block has {} values, which is not a positive multiple of {}",
            name,
            block.len(),
            parts
        )));
    }

    Ok(block.chunks_exact(block.len() / parts).collect())
}

fn locator(block: &[f64], index: usize, name: &str) -> Result<usize> {
    block
        .get(index)
        .map(|&offset| offset.round() as usize)
        .ok_or_else(|| truncated_block(name, index))
}

fn truncated_block(name: &str, subshell_index: usize) -> DataError {
    DataError::InvalidTable(format!(
        "the {} block has no entry for subshell index {}",
        name, subshell_index
    ))
}
