/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Waller-Hartree scattering function and atomic form factors
//!
//! Both are tabulated against recoil momentum with a leading point at zero
//! momentum. That point is set aside while the table is refined on a
//! log-log scale and put back afterwards.

use super::errors::{EvaluatorError, Result};
use crate::data::TabulatedData;
use crate::distribution::{Evaluable, TabularDistribution};
use crate::grid::{GridGenerator, InterpolationType};

/// Refine the Waller-Hartree scattering function
///
/// # Arguments
///
/// * `generator` - Grid generator
/// * `raw` - Scattering function table starting at zero recoil momentum
///
/// # Returns
///
/// The refined table with its zero-momentum point restored
pub fn generate_optimized_scattering_function(
    generator: &GridGenerator,
    raw: &TabulatedData,
) -> Result<TabulatedData> {
    refine_without_first_point(generator, raw, "scattering function")
}

/// Refine the Waller-Hartree atomic form factor
pub fn generate_optimized_form_factor(
    generator: &GridGenerator,
    raw: &TabulatedData,
) -> Result<TabulatedData> {
    refine_without_first_point(generator, raw, "atomic form factor")
}

/// Refine the squared atomic form factor F(sqrt(x))^2
///
/// The form factor table, zero-momentum point included, is interpolated
/// lin-lin.
pub fn generate_optimized_squared_form_factor(
    generator: &GridGenerator,
    form_factor: &TabulatedData,
) -> Result<TabulatedData> {
    let form_factor = form_factor.to_distribution(InterpolationType::LinLin)?;
    let squared = SquaredFormFactor { form_factor };

    let lower = squared.form_factor.lower_bound();
    let upper = squared.form_factor.upper_bound();
    let mut grid = vec![lower * lower, upper * upper];
    let values = generator.generate_and_evaluate_in_place(&mut grid, &squared)?;

    Ok(TabulatedData::new(grid, values))
}

/// F(sqrt(x))^2 for a tabulated form factor F
struct SquaredFormFactor {
    form_factor: TabularDistribution,
}

impl Evaluable for SquaredFormFactor {
    fn evaluate(&self, x: f64) -> crate::distribution::Result<f64> {
        let value = self.form_factor.evaluate(x.max(0.0).sqrt())?;
        Ok(value * value)
    }
}

fn refine_without_first_point(
    generator: &GridGenerator,
    raw: &TabulatedData,
    name: &str,
) -> Result<TabulatedData> {
    raw.validate(name)?;

    if raw.len() < 3 {
        return Err(EvaluatorError::InvalidInput(format!(
            "the {} needs at least three tabulated points",
            name
        )));
    }

    let evaluator = raw.skip_leading(1).to_distribution(InterpolationType::LogLog)?;

    let mut grid = vec![evaluator.lower_bound(), evaluator.upper_bound()];
    let mut values = generator.generate_and_evaluate_in_place(&mut grid, &evaluator)?;

    grid.insert(0, raw.grid[0]);
    values.insert(0, raw.values[0]);

    Ok(TabulatedData::new(grid, values))
}
