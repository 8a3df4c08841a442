/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Threshold-aware evaluation of processes on a union energy grid
//!
//! Tabulated data often start above the physical threshold of a process.
//! The gap between the true threshold and the first tabulated energy is
//! filled by a lin-lin bridge, and the resulting array is trimmed to start
//! at the threshold.

use super::errors::Result;
use super::CrossSectionOnGrid;
use crate::distribution::{Evaluable, TabularDistribution};
use crate::grid::InterpolationType;

/// Physical threshold of a process
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threshold {
    /// True threshold energy
    pub energy: f64,
    /// Whether the cross section vanishes at the true threshold
    pub zero_at_threshold: bool,
}

impl Threshold {
    pub fn new(energy: f64, zero_at_threshold: bool) -> Self {
        Self {
            energy,
            zero_at_threshold,
        }
    }
}

/// Resolve a process on a union energy grid
///
/// The current threshold of the process is its lowest tabulated energy.
/// Grid points below the true threshold are zero. Points between the true
/// and current thresholds use a lin-lin bridge that starts at zero when
/// `zero_at_threshold` is set and at the value at the current threshold
/// otherwise. Points at or above the current threshold use the process.
///
/// # Arguments
///
/// * `grid` - Union energy grid
/// * `process` - Process to resolve
/// * `threshold` - True threshold of the process
///
/// # Returns
///
/// The trimmed cross section and its threshold index
pub fn create_cross_section_on_union_energy_grid<E>(
    grid: &[f64],
    process: &E,
    threshold: Threshold,
) -> Result<CrossSectionOnGrid>
where
    E: Evaluable + ?Sized,
{
    let current_threshold = process.lower_bound();

    let bridge = if current_threshold.is_finite() && threshold.energy < current_threshold {
        let value_at_current = process.evaluate(current_threshold)?;
        let value_at_true = if threshold.zero_at_threshold {
            0.0
        } else {
            value_at_current
        };

        Some(TabularDistribution::new(
            vec![threshold.energy, current_threshold],
            vec![value_at_true, value_at_current],
            InterpolationType::LinLin,
        )?)
    } else {
        None
    };

    let mut raw = Vec::with_capacity(grid.len());
    for &energy in grid {
        let value = if energy < threshold.energy {
            0.0
        } else if energy < current_threshold {
            match &bridge {
                Some(bridge) => bridge.evaluate(energy)?,
                None => process.evaluate(energy)?,
            }
        } else {
            process.evaluate(energy)?
        };
        raw.push(value);
    }

    Ok(populate_cross_section(raw, threshold.zero_at_threshold))
}

/// Resolve an evaluator that vanishes at its own threshold
///
/// Used for integrated evaluators such as the subshell impulse approximation
/// incoherent cross section. No bridge is built.
pub fn create_zero_at_threshold_cross_section<E>(grid: &[f64], process: &E) -> Result<CrossSectionOnGrid>
where
    E: Evaluable + ?Sized,
{
    let raw = grid
        .iter()
        .map(|&energy| process.evaluate(energy))
        .collect::<std::result::Result<Vec<f64>, _>>()?;

    Ok(populate_cross_section(raw, true))
}

/// Trim a full-grid array to start at its threshold
///
/// The threshold is the first value that is not exactly zero. With
/// `zero_at_threshold` the preceding zero is kept as well. An all-zero
/// array keeps only its last zero when `zero_at_threshold` is set and
/// becomes empty otherwise.
pub fn populate_cross_section(raw: Vec<f64>, zero_at_threshold: bool) -> CrossSectionOnGrid {
    let mut start = raw.iter().position(|&v| v != 0.0).unwrap_or(raw.len());

    if zero_at_threshold && start > 0 {
        start -= 1;
    }

    CrossSectionOnGrid::new(raw[start..].to_vec(), start)
}
