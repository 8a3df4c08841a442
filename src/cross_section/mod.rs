/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Cross sections on a union energy grid
//!
//! A cross section resolved on a union grid is stored from its threshold
//! onward: the values start at `threshold_index` and run to the end of the
//! grid. [`threshold`] resolves processes onto a grid and [`aggregate`]
//! sums resolved cross sections back into full-length arrays.

pub mod aggregate;
pub mod errors;
pub mod rutherford;
pub mod threshold;

use serde::{Deserialize, Serialize};

pub use aggregate::{aggregate, expand_to_grid};
pub use errors::{CrossSectionError, Result};
pub use rutherford::create_screened_rutherford_cross_section;
pub use threshold::{
    create_cross_section_on_union_energy_grid, create_zero_at_threshold_cross_section,
    populate_cross_section, Threshold,
};

/// Cross section aligned to a suffix of an energy grid
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrossSectionOnGrid {
    /// Values from the threshold index to the end of the grid
    pub values: Vec<f64>,
    /// Index of the first grid point covered by `values`
    pub threshold_index: usize,
}

impl CrossSectionOnGrid {
    pub fn new(values: Vec<f64>, threshold_index: usize) -> Self {
        Self {
            values,
            threshold_index,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check that the cross section ends exactly at the end of a grid
    pub fn fits_grid(&self, grid_len: usize) -> bool {
        self.threshold_index + self.values.len() == grid_len
    }

    /// Energy at the threshold index, if the cross section is not empty
    pub fn threshold_energy(&self, grid: &[f64]) -> Option<f64> {
        if self.is_empty() {
            None
        } else {
            grid.get(self.threshold_index).copied()
        }
    }

    /// Re-expand to a full-length array with zeros below the threshold
    pub fn to_full_grid(&self, grid_len: usize) -> Result<Vec<f64>> {
        expand_to_grid(grid_len, &self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_section_on_grid() {
        let grid = [1.0, 2.0, 3.0, 4.0];
        let cross_section = CrossSectionOnGrid::new(vec![5.0, 6.0], 2);

        assert!(cross_section.fits_grid(grid.len()));
        assert!(!cross_section.fits_grid(5));
        assert_eq!(cross_section.threshold_energy(&grid), Some(3.0));
        assert_eq!(
            cross_section.to_full_grid(grid.len()).unwrap(),
            vec![0.0, 0.0, 5.0, 6.0]
        );
        assert_eq!(CrossSectionOnGrid::default().threshold_energy(&grid), None);
    }
}
