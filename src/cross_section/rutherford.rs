/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Screened Rutherford elastic cross section

use super::errors::Result;
use super::CrossSectionOnGrid;
use crate::utils::relative_error;

/// Relative difference below which total and cutoff elastic are equal
pub const SCREENED_RUTHERFORD_RELATIVE_DIFFERENCE: f64 = 1e-6;

/// Create the screened Rutherford cross section as total minus cutoff elastic
///
/// Wherever the two agree to within
/// [`SCREENED_RUTHERFORD_RELATIVE_DIFFERENCE`] the difference is round-off
/// and is set to zero, and the threshold moves past that point.
pub fn create_screened_rutherford_cross_section(
    grid_len: usize,
    total_elastic: &CrossSectionOnGrid,
    cutoff_elastic: &CrossSectionOnGrid,
) -> Result<CrossSectionOnGrid> {
    let total = total_elastic.to_full_grid(grid_len)?;
    let cutoff = cutoff_elastic.to_full_grid(grid_len)?;

    let mut raw = Vec::with_capacity(grid_len);
    let mut threshold_index = 0;

    for (i, (&total, &cutoff)) in total.iter().zip(cutoff.iter()).enumerate() {
        if relative_error(total, cutoff) < SCREENED_RUTHERFORD_RELATIVE_DIFFERENCE {
            raw.push(0.0);
            threshold_index = i + 1;
        } else {
            raw.push(total - cutoff);
        }
    }

    Ok(CrossSectionOnGrid::new(
        raw[threshold_index..].to_vec(),
        threshold_index,
    ))
}
