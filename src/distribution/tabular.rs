/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Tabulated distribution with a selectable interpolation policy

use super::errors::{DistributionError, Result};
use super::Evaluable;
use crate::grid::InterpolationType;
use serde::{Deserialize, Serialize};

/// Tabulated function of one variable
///
/// The distribution evaluates to zero outside its tabulated domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabularDistribution {
    independent_values: Vec<f64>,
    dependent_values: Vec<f64>,
    interpolation: InterpolationType,
}

impl TabularDistribution {
    /// Create a tabulated distribution
    ///
    /// # Arguments
    ///
    /// * `independent_values` - Strictly increasing independent values (at least two)
    /// * `dependent_values` - Dependent values, one per independent value
    /// * `interpolation` - Interpolation policy between tabulated points
    ///
    /// # Returns
    ///
    /// The distribution or an error if the table is invalid
    pub fn new(
        independent_values: Vec<f64>,
        dependent_values: Vec<f64>,
        interpolation: InterpolationType,
    ) -> Result<Self> {
        if independent_values.len() != dependent_values.len() {
            return Err(DistributionError::InvalidTable(format!(
                "independent ({}) and dependent ({}) values must have the same length",
                independent_values.len(),
                dependent_values.len()
            )));
        }

        if independent_values.len() < 2 {
            return Err(DistributionError::InvalidTable(
                "at least two tabulated points are required".to_string(),
            ));
        }

        if independent_values
            .iter()
            .chain(dependent_values.iter())
            .any(|v| !v.is_finite())
        {
            return Err(DistributionError::InvalidTable(
                "tabulated values must be finite".to_string(),
            ));
        }

        if independent_values.windows(2).any(|w| w[0] >= w[1]) {
            return Err(DistributionError::InvalidTable(
                "independent values must be strictly increasing".to_string(),
            ));
        }

        Ok(Self {
            independent_values,
            dependent_values,
            interpolation,
        })
    }

    pub fn independent_values(&self) -> &[f64] {
        &self.independent_values
    }

    pub fn dependent_values(&self) -> &[f64] {
        &self.dependent_values
    }

    pub fn interpolation(&self) -> InterpolationType {
        self.interpolation
    }

    /// Evaluate, holding the end values outside the tabulated domain
    pub fn evaluate_saturated(&self, x: f64) -> f64 {
        if x <= self.independent_values[0] {
            self.dependent_values[0]
        } else {
            self.interpolate(x)
        }
    }

    fn interpolate(&self, x: f64) -> f64 {
        let n = self.independent_values.len();
        let upper = self.independent_values.partition_point(|&p| p <= x);

        if upper >= n {
            return self.dependent_values[n - 1];
        }

        let lower = upper - 1;
        self.interpolation.interpolate(
            self.independent_values[lower],
            self.independent_values[upper],
            x,
            self.dependent_values[lower],
            self.dependent_values[upper],
        )
    }
}

impl Evaluable for TabularDistribution {
    fn evaluate(&self, x: f64) -> Result<f64> {
        if x < self.lower_bound() || x > self.upper_bound() {
            return Ok(0.0);
        }

        Ok(self.interpolate(x))
    }

    fn lower_bound(&self) -> f64 {
        self.independent_values[0]
    }

    fn upper_bound(&self) -> f64 {
        self.independent_values[self.independent_values.len() - 1]
    }
}
