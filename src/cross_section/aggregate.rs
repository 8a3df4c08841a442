/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Summation of cross sections that start at different thresholds

use super::errors::{CrossSectionError, Result};

/// Expand a suffix-aligned array to the full grid length
pub fn expand_to_grid(grid_len: usize, part: &[f64]) -> Result<Vec<f64>> {
    aggregate(grid_len, &[part])
}

/// Sum suffix-aligned arrays into one full-length array
///
/// Each part is aligned to the end of the grid, i.e. added starting at
/// offset `grid_len - part.len()`. The result does not depend on the order
/// of the parts.
///
/// # Arguments
///
/// * `grid_len` - Length of the energy grid
/// * `parts` - Cross sections to add
///
/// # Returns
///
/// The full-length sum or an error if a part is longer than the grid
pub fn aggregate(grid_len: usize, parts: &[&[f64]]) -> Result<Vec<f64>> {
    let mut total = vec![0.0; grid_len];

    for part in parts {
        if part.len() > grid_len {
            return Err(CrossSectionError::SizeMismatch(format!(
                "a cross section with {} values does not fit an energy grid with {} points",
                part.len(),
                grid_len
            )));
        }

        let offset = grid_len - part.len();
        for (sum, value) in total[offset..].iter_mut().zip(part.iter()) {
            *sum += value;
        }
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_offsets() {
        let a: &[f64] = &[1.0, 1.0, 1.0, 1.0, 1.0];
        let b: &[f64] = &[2.0, 2.0, 2.0];
        let c: &[f64] = &[4.0];

        let total = aggregate(5, &[a, b, c]).unwrap();
        assert_eq!(total, vec![1.0, 1.0, 3.0, 3.0, 7.0]);
    }

    #[test]
    fn test_aggregate_is_order_independent() {
        let a: &[f64] = &[0.5, 1.5, 2.5, 3.5];
        let b: &[f64] = &[10.0, 20.0];
        let c: &[f64] = &[0.25, 0.75, 1.25];

        let abc = aggregate(4, &[a, b, c]).unwrap();
        let cab = aggregate(4, &[c, a, b]).unwrap();
        let bca = aggregate(4, &[b, c, a]).unwrap();

        assert_eq!(abc, cab);
        assert_eq!(abc, bca);
    }

    #[test]
    fn test_aggregate_rejects_oversized_parts() {
        let oversized: &[f64] = &[1.0, 2.0, 3.0];
        assert!(aggregate(2, &[oversized]).is_err());
        assert_eq!(aggregate(2, &[]).unwrap(), vec![0.0, 0.0]);
        assert_eq!(expand_to_grid(3, &[1.0]).unwrap(), vec![0.0, 0.0, 1.0]);
    }
}
