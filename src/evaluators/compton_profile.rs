/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Compton profiles
//!
//! Source tables give half profiles J(p) for p >= 0 in atomic units. The
//! full profile is symmetric, so it is rebuilt by mirroring, extended to the
//! momentum limit |p| = m_e c, and converted to m_e c units.

use super::errors::{EvaluatorError, Result};
use crate::data::TabulatedData;
use crate::distribution::TabularDistribution;
use crate::grid::{GridGenerator, InterpolationType};
use crate::utils::constants::INVERSE_FINE_STRUCTURE_CONSTANT;
use crate::utils::atomic_momentum_to_me_c;

/// Anchor grid (m_e c units) that profile refinement starts from
pub const MOMENTUM_ANCHOR_GRID: [f64; 5] = [-1.0, -0.5, 0.0, 0.5, 1.0];

/// Build the full Compton profile in m_e c units from a half profile in atomic units
///
/// # Arguments
///
/// * `half_profile` - Momentum grid starting at 0 and ending below m_e c, with J(p)
///
/// # Returns
///
/// The mirrored profile on [-1, 1] (m_e c units) or an error if the half
/// profile is malformed
pub fn full_profile_from_half_profile(half_profile: &TabulatedData) -> Result<TabulatedData> {
    half_profile.validate("half Compton profile momentum")?;

    let grid = &half_profile.grid;
    let last = grid[grid.len() - 1];
    if grid[0] != 0.0 || last >= INVERSE_FINE_STRUCTURE_CONSTANT {
        return Err(EvaluatorError::InvalidInput(format!(
            "a half Compton profile momentum grid must start at 0 and end below {} \
             (found [{}, {}])",
            INVERSE_FINE_STRUCTURE_CONSTANT, grid[0], last
        )));
    }

    if half_profile.values.iter().any(|&j| j < 0.0) {
        return Err(EvaluatorError::InvalidInput(
            "a Compton profile cannot be negative".to_string(),
        ));
    }

    // Flat tail out to the momentum limit
    let tail = half_profile.values[half_profile.values.len() - 1];
    let mut half_grid = grid.clone();
    let mut half_values = half_profile.values.clone();
    half_grid.push(INVERSE_FINE_STRUCTURE_CONSTANT);
    half_values.push(tail);

    let n = half_grid.len();
    let mut full_grid = Vec::with_capacity(2 * n - 1);
    let mut full_values = Vec::with_capacity(2 * n - 1);

    for i in (1..n).rev() {
        full_grid.push(-atomic_momentum_to_me_c(half_grid[i]));
        full_values.push(half_values[i] * INVERSE_FINE_STRUCTURE_CONSTANT);
    }
    for i in 0..n {
        full_grid.push(atomic_momentum_to_me_c(half_grid[i]));
        full_values.push(half_values[i] * INVERSE_FINE_STRUCTURE_CONSTANT);
    }

    Ok(TabulatedData::new(full_grid, full_values))
}

/// Refine a Compton profile on the momentum anchor grid
///
/// The profile is interpolated log-lin between its tabulated points.
pub fn generate_optimized_compton_profile(
    generator: &GridGenerator,
    half_profile: &TabulatedData,
) -> Result<TabulatedData> {
    let full_profile = full_profile_from_half_profile(half_profile)?;
    let evaluator = TabularDistribution::new(
        full_profile.grid,
        full_profile.values,
        InterpolationType::LogLin,
    )?;

    let mut grid = MOMENTUM_ANCHOR_GRID.to_vec();
    let values = generator.generate_and_evaluate_in_place(&mut grid, &evaluator)?;

    Ok(TabulatedData::new(grid, values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn half_profile() -> TabulatedData {
        let grid: Vec<f64> = (0..=20).map(|i| i as f64 * 5.0).collect();
        let values = grid.iter().map(|p| 0.6 * (-p / 2.0).exp() + 1e-6).collect();
        TabulatedData::new(grid, values)
    }

    #[test]
    fn test_full_profile_is_symmetric() {
        let full = full_profile_from_half_profile(&half_profile()).unwrap();
        let n = full.len();

        assert_eq!(n, 2 * 22 - 1);
        assert_relative_eq!(full.grid[0], -1.0);
        assert_relative_eq!(full.grid[n - 1], 1.0);
        assert_eq!(full.grid[n / 2], 0.0);
        for i in 0..n {
            assert_relative_eq!(full.grid[i], -full.grid[n - 1 - i]);
            assert_relative_eq!(full.values[i], full.values[n - 1 - i]);
        }
        assert_relative_eq!(
            full.values[n / 2],
            0.600001 * INVERSE_FINE_STRUCTURE_CONSTANT,
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_invalid_half_profiles() {
        let shifted = TabulatedData::new(vec![1.0, 2.0], vec![1.0, 0.5]);
        assert!(full_profile_from_half_profile(&shifted).is_err());

        let too_wide = TabulatedData::new(vec![0.0, 200.0], vec![1.0, 0.5]);
        assert!(full_profile_from_half_profile(&too_wide).is_err());

        let negative = TabulatedData::new(vec![0.0, 2.0], vec![1.0, -0.5]);
        assert!(full_profile_from_half_profile(&negative).is_err());
    }

    #[test]
    fn test_optimized_profile_keeps_anchors() {
        let generator = GridGenerator::new(1e-3, 1e-42, 1e-15).unwrap();
        let profile = generate_optimized_compton_profile(&generator, &half_profile()).unwrap();

        assert!(profile.len() > MOMENTUM_ANCHOR_GRID.len());
        for anchor in MOMENTUM_ANCHOR_GRID {
            assert!(profile.grid.contains(&anchor));
        }
        assert!(profile.grid.windows(2).all(|w| w[0] < w[1]));
        assert!(profile.values.iter().all(|&j| j > 0.0));
    }
}
