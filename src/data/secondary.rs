/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Secondary distributions tabulated on an incoming energy grid

use super::errors::{DataError, Result};
use serde::{Deserialize, Serialize};

/// Outgoing distributions at each energy of an incoming energy grid
///
/// Holds the cutoff elastic angular distributions (scattering angle
/// cosines), the bremsstrahlung photon energy distributions and the
/// electroionization recoil energy distributions. Distribution `i` belongs
/// to `energy_grid[i]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecondaryDistributionTable {
    pub energy_grid: Vec<f64>,
    pub outgoing_values: Vec<Vec<f64>>,
    pub pdfs: Vec<Vec<f64>>,
}

impl SecondaryDistributionTable {
    pub fn new(energy_grid: Vec<f64>, outgoing_values: Vec<Vec<f64>>, pdfs: Vec<Vec<f64>>) -> Self {
        Self {
            energy_grid,
            outgoing_values,
            pdfs,
        }
    }

    /// Number of incoming energies
    pub fn len(&self) -> usize {
        self.energy_grid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energy_grid.is_empty()
    }

    /// Outgoing values and PDF tabulated at exactly `energy`
    pub fn distribution_at(&self, energy: f64) -> Option<(&[f64], &[f64])> {
        let index = self.energy_grid.iter().position(|&e| e == energy)?;
        Some((
            self.outgoing_values.get(index)?.as_slice(),
            self.pdfs.get(index)?.as_slice(),
        ))
    }

    /// Check the table layout
    ///
    /// The energy grid must be strictly increasing with one distribution per
    /// energy. Every distribution needs at least two strictly increasing
    /// outgoing values and a finite, non-negative PDF of the same length.
    pub fn validate(&self, what: &str) -> Result<()> {
        if self.is_empty() {
            return Err(DataError::MissingData(format!(
                "the {} energy grid is empty",
                what
            )));
        }

        if self.outgoing_values.len() != self.len() || self.pdfs.len() != self.len() {
            return Err(DataError::SizeMismatch(format!(
                "the {} table has {} energies, {} outgoing grids and {} PDFs",
                what,
                self.len(),
                self.outgoing_values.len(),
                self.pdfs.len()
            )));
        }

        if self.energy_grid.windows(2).any(|w| !(w[0] < w[1])) {
            return Err(DataError::InvalidGrid(format!(
                "the {} energy grid is not strictly increasing",
                what
            )));
        }

        for ((&energy, outgoing), pdf) in self
            .energy_grid
            .iter()
            .zip(&self.outgoing_values)
            .zip(&self.pdfs)
        {
            if outgoing.len() < 2 || outgoing.len() != pdf.len() {
                return Err(DataError::SizeMismatch(format!(
                    "the {} distribution at {:e} MeV has {} outgoing values and {} PDF values",
                    what,
                    energy,
                    outgoing.len(),
                    pdf.len()
                )));
            }

            if outgoing.windows(2).any(|w| !(w[0] < w[1])) {
                return Err(DataError::InvalidGrid(format!(
                    "the {} outgoing grid at {:e} MeV is not strictly increasing",
                    what, energy
                )));
            }

            if pdf.iter().any(|&p| !(p.is_finite() && p >= 0.0)) {
                return Err(DataError::InvalidTable(format!(
                    "the {} PDF at {:e} MeV must be finite and non-negative",
                    what, energy
                )));
            }
        }

        Ok(())
    }

    /// Drop the distributions above `max_energy`
    ///
    /// The first distribution at or above `max_energy` is kept so that the
    /// table can still be interpolated up to it.
    pub fn truncate_above(&self, max_energy: f64) -> Self {
        let end = self
            .energy_grid
            .partition_point(|&e| e < max_energy)
            .saturating_add(1)
            .min(self.len());

        Self::new(
            self.energy_grid[..end].to_vec(),
            self.outgoing_values.iter().take(end).cloned().collect(),
            self.pdfs.iter().take(end).cloned().collect(),
        )
    }
}
