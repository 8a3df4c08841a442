/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Paired grid and value arrays

use super::errors::{DataError, Result};
use crate::distribution::TabularDistribution;
use crate::grid::InterpolationType;
use serde::{Deserialize, Serialize};

/// Grid with one value per grid point
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabulatedData {
    pub grid: Vec<f64>,
    pub values: Vec<f64>,
}

impl TabulatedData {
    pub fn new(grid: Vec<f64>, values: Vec<f64>) -> Self {
        Self { grid, values }
    }

    pub fn len(&self) -> usize {
        self.grid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// Check that the grid is strictly increasing and matches the values
    ///
    /// `what` names the data in the error message.
    pub fn validate(&self, what: &str) -> Result<()> {
        if self.grid.len() != self.values.len() {
            return Err(DataError::SizeMismatch(format!(
                "the {} grid has {} points but {} values",
                what,
                self.grid.len(),
                self.values.len()
            )));
        }

        if self.grid.len() < 2 {
            return Err(DataError::InvalidGrid(format!(
                "the {} grid needs at least two points",
                what
            )));
        }

        if self.grid.windows(2).any(|w| !(w[0] < w[1])) {
            return Err(DataError::InvalidGrid(format!(
                "the {} grid is not strictly increasing",
                what
            )));
        }

        Ok(())
    }

    /// Build a distribution over the tabulated data
    pub fn to_distribution(&self, interpolation: InterpolationType) -> Result<TabularDistribution> {
        Ok(TabularDistribution::new(
            self.grid.clone(),
            self.values.clone(),
            interpolation,
        )?)
    }

    /// Drop the first `skip` points
    pub fn skip_leading(&self, skip: usize) -> Self {
        let skip = skip.min(self.grid.len());
        Self::new(self.grid[skip..].to_vec(), self.values[skip..].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(TabulatedData::new(vec![0.0, 1.0], vec![1.0, 2.0])
            .validate("test")
            .is_ok());
        assert!(TabulatedData::new(vec![0.0, 1.0], vec![1.0])
            .validate("test")
            .is_err());
        assert!(TabulatedData::new(vec![1.0, 1.0], vec![1.0, 2.0])
            .validate("test")
            .is_err());
        assert!(TabulatedData::default().validate("test").is_err());
    }

    #[test]
    fn test_skip_leading() {
        let data = TabulatedData::new(vec![0.0, 1.0, 2.0], vec![0.0, 5.0, 6.0]);
        let skipped = data.skip_leading(1);
        assert_eq!(skipped.grid, vec![1.0, 2.0]);
        assert_eq!(skipped.values, vec![5.0, 6.0]);
        assert!(data.skip_leading(5).is_empty());
    }
}
