/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Constant distribution over a bounded domain

use super::errors::{DistributionError, Result};
use super::Evaluable;

/// Constant value on `[lower, upper]`, zero elsewhere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformDistribution {
    lower: f64,
    upper: f64,
    value: f64,
}

impl UniformDistribution {
    pub fn new(lower: f64, upper: f64, value: f64) -> Result<Self> {
        if !(lower < upper) || !value.is_finite() {
            return Err(DistributionError::InvalidTable(format!(
                "uniform distribution requires lower < upper and a finite value \
                 (lower = {}, upper = {}, value = {})",
                lower, upper, value
            )));
        }

        Ok(Self {
            lower,
            upper,
            value,
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl Evaluable for UniformDistribution {
    fn evaluate(&self, x: f64) -> Result<f64> {
        if x >= self.lower && x <= self.upper {
            Ok(self.value)
        } else {
            Ok(0.0)
        }
    }

    fn lower_bound(&self) -> f64 {
        self.lower
    }

    fn upper_bound(&self) -> f64 {
        self.upper
    }
}
