/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Occupation numbers
//!
//! The occupation number n(p) of a subshell is the fraction of its electrons
//! with momentum projection below p, i.e. the running integral of the
//! Compton profile from -m_e c.

use super::compton_profile::MOMENTUM_ANCHOR_GRID;
use super::errors::Result;
use crate::data::TabulatedData;
use crate::distribution::{self, Evaluable};
use crate::grid::GridGenerator;
use crate::utils::cumulative_trapezoid;

/// Exact running integral of a lin-lin Compton profile
#[derive(Debug, Clone)]
pub struct OccupationNumber {
    momentum: Vec<f64>,
    profile: Vec<f64>,
    integral: Vec<f64>,
}

impl OccupationNumber {
    /// Create the occupation number of a Compton profile tabulated in m_e c units
    pub fn new(compton_profile: &TabulatedData) -> Result<Self> {
        compton_profile.validate("Compton profile momentum")?;
        let integral = cumulative_trapezoid(&compton_profile.grid, &compton_profile.values)
            .map_err(distribution::DistributionError::from)?;

        Ok(Self {
            momentum: compton_profile.grid.clone(),
            profile: compton_profile.values.clone(),
            integral,
        })
    }
}

impl Evaluable for OccupationNumber {
    fn evaluate(&self, x: f64) -> distribution::Result<f64> {
        let n = self.momentum.len();

        if x <= self.momentum[0] {
            return Ok(0.0);
        }
        if x >= self.momentum[n - 1] {
            return Ok(self.integral[n - 1]);
        }

        let i = self.momentum.partition_point(|&p| p <= x) - 1;
        let dx = x - self.momentum[i];
        let slope = (self.profile[i + 1] - self.profile[i]) / (self.momentum[i + 1] - self.momentum[i]);

        Ok(self.integral[i] + dx * (self.profile[i] + 0.5 * slope * dx))
    }

    fn lower_bound(&self) -> f64 {
        self.momentum[0]
    }

    fn upper_bound(&self) -> f64 {
        self.momentum[self.momentum.len() - 1]
    }
}

/// Refine the occupation number of a Compton profile on the momentum anchor grid
///
/// Once the occupation number reaches 1 it stays exactly 1.
pub fn generate_optimized_occupation_number(
    generator: &GridGenerator,
    compton_profile: &TabulatedData,
) -> Result<TabulatedData> {
    let evaluator = OccupationNumber::new(compton_profile)?;

    let mut grid = MOMENTUM_ANCHOR_GRID.to_vec();
    let mut values = generator.generate_and_evaluate_in_place(&mut grid, &evaluator)?;

    if let Some(first_full) = values.iter().position(|&n| n >= 1.0) {
        for value in &mut values[first_full..] {
            *value = 1.0;
        }
    }

    Ok(TabulatedData::new(grid, values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_occupation_number_of_uniform_profile() {
        // A uniform profile of 0.5 on [-1, 1] integrates to 1
        let profile = TabulatedData::new(vec![-1.0, 0.0, 1.0], vec![0.5, 0.5, 0.5]);
        let occupation = OccupationNumber::new(&profile).unwrap();

        assert_eq!(occupation.evaluate(-2.0).unwrap(), 0.0);
        assert_relative_eq!(occupation.evaluate(-0.5).unwrap(), 0.25);
        assert_relative_eq!(occupation.evaluate(0.0).unwrap(), 0.5);
        assert_relative_eq!(occupation.evaluate(0.5).unwrap(), 0.75);
        assert_relative_eq!(occupation.evaluate(2.0).unwrap(), 1.0);
    }

    #[test]
    fn test_occupation_number_of_triangular_profile() {
        let profile = TabulatedData::new(vec![-1.0, 0.0, 1.0], vec![0.0, 1.0, 0.0]);
        let occupation = OccupationNumber::new(&profile).unwrap();

        // Integral of (1 + p) from -1 to -0.5
        assert_relative_eq!(occupation.evaluate(-0.5).unwrap(), 0.125, epsilon = 1e-15);
        assert_relative_eq!(occupation.evaluate(0.5).unwrap(), 0.875, epsilon = 1e-15);
    }

    #[test]
    fn test_optimized_occupation_number_saturates() {
        // Slightly over-normalized profile
        let profile = TabulatedData::new(vec![-1.0, 0.0, 1.0], vec![0.0, 1.1, 0.0]);
        let generator = GridGenerator::new(1e-4, 1e-42, 1e-15).unwrap();
        let occupation = generate_optimized_occupation_number(&generator, &profile).unwrap();

        assert!(occupation.len() > MOMENTUM_ANCHOR_GRID.len());
        assert_eq!(occupation.values[0], 0.0);
        assert_eq!(*occupation.values.last().unwrap(), 1.0);
        assert!(occupation.values.iter().all(|&n| (0.0..=1.0).contains(&n)));
        assert!(occupation.values.windows(2).all(|w| w[0] <= w[1]));
    }
}
