/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Numerical helpers for grid refinement and cross section evaluation
//!
//! The convergence test used by the grid generator is built on
//! [`relative_error`]; the composite evaluators integrate with
//! [`integrate_adaptive_simpson`] and [`cumulative_trapezoid`].

use super::errors::{Result, UtilsError};

/// Maximum bisection depth of the adaptive Simpson quadrature
const MAX_SIMPSON_DEPTH: usize = 40;

/// Relative error between two values
///
/// # Arguments
///
/// * `a` - The first value
/// * `b` - The second value
///
/// # Returns
///
/// `|a - b| / max(|a|, |b|)`, or 0 when both values are 0
pub fn relative_error(a: f64, b: f64) -> f64 {
    if a == 0.0 && b == 0.0 {
        return 0.0;
    }

    (a - b).abs() / a.abs().max(b.abs())
}

/// Adaptive Simpson quadrature
///
/// Intervals are bisected until the Richardson estimate of the local error
/// drops below `tolerance` times the magnitude of the running estimate, or
/// until the maximum depth is reached.
///
/// # Arguments
///
/// * `f` - The function to integrate
/// * `a` - The lower bound of integration
/// * `b` - The upper bound of integration
/// * `tolerance` - The relative tolerance (must be positive)
///
/// # Returns
///
/// The approximate value of the integral or an error if the inputs are invalid
/// or the integrand is not finite
pub fn integrate_adaptive_simpson<F>(f: F, a: f64, b: f64, tolerance: f64) -> Result<f64>
where
    F: Fn(f64) -> f64,
{
    if tolerance.is_nan() || tolerance <= 0.0 {
        return Err(UtilsError::InvalidQuadrature(format!(
            "the tolerance must be positive, got {}",
            tolerance
        )));
    }

    if a > b {
        return Err(UtilsError::InvalidQuadrature(format!(
            "the lower bound {} exceeds the upper bound {}",
            a, b
        )));
    }

    if a == b {
        return Ok(0.0);
    }

    let eval = |x: f64| -> Result<f64> {
        let value = f(x);
        if value.is_finite() {
            Ok(value)
        } else {
            Err(UtilsError::NonFiniteIntegrand(x))
        }
    };

    let fa = eval(a)?;
    let fb = eval(b)?;
    let m = 0.5 * (a + b);
    let fm = eval(m)?;
    let whole = (b - a) / 6.0 * (fa + 4.0 * fm + fb);

    // (a, b, fa, fm, fb, estimate, depth)
    let mut stack = vec![(a, b, fa, fm, fb, whole, 0usize)];
    let mut total = 0.0;

    while let Some((a, b, fa, fm, fb, estimate, depth)) = stack.pop() {
        let m = 0.5 * (a + b);
        let lm = 0.5 * (a + m);
        let rm = 0.5 * (m + b);
        let flm = eval(lm)?;
        let frm = eval(rm)?;

        let left = (m - a) / 6.0 * (fa + 4.0 * flm + fm);
        let right = (b - m) / 6.0 * (fm + 4.0 * frm + fb);
        let refined = left + right;
        let delta = refined - estimate;

        let scale = refined.abs().max(whole.abs());
        if depth >= MAX_SIMPSON_DEPTH || delta.abs() <= 15.0 * tolerance * scale {
            total += refined + delta / 15.0;
        } else {
            stack.push((a, m, fa, flm, fm, left, depth + 1));
            stack.push((m, b, fm, frm, fb, right, depth + 1));
        }
    }

    Ok(total)
}

/// Cumulative trapezoidal integral of a tabulated function
///
/// # Arguments
///
/// * `x_values` - Array of x coordinates (must be sorted in ascending order)
/// * `y_values` - Array of corresponding y coordinates
///
/// # Returns
///
/// The running integral from the first x value to every tabulated x value
pub fn cumulative_trapezoid(x_values: &[f64], y_values: &[f64]) -> Result<Vec<f64>> {
    if x_values.len() != y_values.len() {
        return Err(UtilsError::InvalidTable(
            "x and y values must have the same length".to_string(),
        ));
    }

    if x_values.is_empty() {
        return Err(UtilsError::InvalidTable(
            "at least one tabulated point is required".to_string(),
        ));
    }

    let mut integral = Vec::with_capacity(x_values.len());
    integral.push(0.0);

    for i in 1..x_values.len() {
        let width = x_values[i] - x_values[i - 1];
        if width < 0.0 {
            return Err(UtilsError::InvalidTable(
                "x values must be in ascending order".to_string(),
            ));
        }
        let previous = integral[i - 1];
        integral.push(previous + 0.5 * width * (y_values[i] + y_values[i - 1]));
    }

    Ok(integral)
}
