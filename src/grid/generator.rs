/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Adaptive grid generation
//!
//! [`GridGenerator`] inserts points into a grid until interpolating between
//! neighbouring points reproduces the function being resolved. Every bracket
//! is bisected in the processed independent variable of the configured
//! [`InterpolationType`] and accepted once the exact and interpolated
//! midpoint values agree.
//!
//! A bracket is accepted when any of the following holds:
//!
//! 1. the relative error at the midpoint is within the convergence tolerance
//! 2. the absolute difference at the midpoint is within the absolute
//!    difference tolerance
//! 3. the bracket is narrower than the distance tolerance
//! 4. the midpoint can no longer be represented between the endpoints
//!
//! Only the first is a clean convergence. The others are reported according
//! to the generator's [`DirtyConvergencePolicy`].

use super::errors::{GridError, Result};
use super::interpolation::InterpolationType;
use crate::distribution::Evaluable;
use crate::utils::relative_error;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Handling of brackets that converged on a tolerance other than the
/// convergence tolerance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DirtyConvergencePolicy {
    /// Log a warning and accept the bracket
    #[default]
    Warn,
    /// Fail the generation
    Error,
}

/// Tolerances of a grid generator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConvergenceParameters {
    pub convergence_tolerance: f64,
    pub absolute_difference_tolerance: f64,
    pub distance_tolerance: f64,
}

impl Default for GridConvergenceParameters {
    fn default() -> Self {
        Self {
            convergence_tolerance: 1e-3,
            absolute_difference_tolerance: 1e-42,
            distance_tolerance: 1e-16,
        }
    }
}

/// Reason a bracket was accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Convergence {
    Clean,
    AbsoluteDifference,
    Distance,
    MachinePrecision,
}

/// Adaptive grid generator
#[derive(Debug, Clone)]
pub struct GridGenerator {
    convergence_tolerance: f64,
    absolute_difference_tolerance: f64,
    distance_tolerance: f64,
    interpolation: InterpolationType,
    dirty_convergence_policy: DirtyConvergencePolicy,
}

impl Default for GridGenerator {
    fn default() -> Self {
        Self {
            convergence_tolerance: 1e-3,
            absolute_difference_tolerance: 1e-13,
            distance_tolerance: 1e-13,
            interpolation: InterpolationType::LinLin,
            dirty_convergence_policy: DirtyConvergencePolicy::Warn,
        }
    }
}

impl GridGenerator {
    /// Create a lin-lin grid generator
    ///
    /// # Arguments
    ///
    /// * `convergence_tolerance` - Relative error tolerance, in (0, 1]
    /// * `absolute_difference_tolerance` - Absolute difference tolerance, in [0, 1]
    /// * `distance_tolerance` - Bracket distance tolerance, in [0, 1]
    ///
    /// # Returns
    ///
    /// The generator or an error if a tolerance is out of range
    pub fn new(
        convergence_tolerance: f64,
        absolute_difference_tolerance: f64,
        distance_tolerance: f64,
    ) -> Result<Self> {
        let mut generator = Self::default();
        generator.set_convergence_tolerance(convergence_tolerance)?;
        generator.set_absolute_difference_tolerance(absolute_difference_tolerance)?;
        generator.set_distance_tolerance(distance_tolerance)?;
        Ok(generator)
    }

    /// Create a lin-lin grid generator from a set of tolerances
    pub fn from_parameters(parameters: &GridConvergenceParameters) -> Result<Self> {
        Self::new(
            parameters.convergence_tolerance,
            parameters.absolute_difference_tolerance,
            parameters.distance_tolerance,
        )
    }

    /// Tolerances of this generator
    pub fn parameters(&self) -> GridConvergenceParameters {
        GridConvergenceParameters {
            convergence_tolerance: self.convergence_tolerance,
            absolute_difference_tolerance: self.absolute_difference_tolerance,
            distance_tolerance: self.distance_tolerance,
        }
    }

    /// Set the interpolation policy used for midpoints and estimates
    pub fn with_interpolation(&mut self, interpolation: InterpolationType) -> &mut Self {
        self.interpolation = interpolation;
        self
    }

    /// Set the dirty convergence policy
    pub fn with_dirty_convergence_policy(&mut self, policy: DirtyConvergencePolicy) -> &mut Self {
        self.dirty_convergence_policy = policy;
        self
    }

    /// Set the relative error tolerance
    pub fn set_convergence_tolerance(&mut self, tolerance: f64) -> Result<()> {
        if !(tolerance > 0.0 && tolerance <= 1.0) {
            return Err(GridError::InvalidTolerance(format!(
                "convergence tolerance must be in (0, 1], got {}",
                tolerance
            )));
        }
        self.convergence_tolerance = tolerance;
        Ok(())
    }

    /// Set the absolute difference tolerance
    pub fn set_absolute_difference_tolerance(&mut self, tolerance: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&tolerance) {
            return Err(GridError::InvalidTolerance(format!(
                "absolute difference tolerance must be in [0, 1], got {}",
                tolerance
            )));
        }
        self.absolute_difference_tolerance = tolerance;
        Ok(())
    }

    /// Set the bracket distance tolerance
    pub fn set_distance_tolerance(&mut self, tolerance: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&tolerance) {
            return Err(GridError::InvalidTolerance(format!(
                "distance tolerance must be in [0, 1], got {}",
                tolerance
            )));
        }
        self.distance_tolerance = tolerance;
        Ok(())
    }

    pub fn convergence_tolerance(&self) -> f64 {
        self.convergence_tolerance
    }

    pub fn absolute_difference_tolerance(&self) -> f64 {
        self.absolute_difference_tolerance
    }

    pub fn distance_tolerance(&self) -> f64 {
        self.distance_tolerance
    }

    pub fn interpolation(&self) -> InterpolationType {
        self.interpolation
    }

    pub fn dirty_convergence_policy(&self) -> DirtyConvergencePolicy {
        self.dirty_convergence_policy
    }

    /// Refine the whole grid and return the function values at every point
    pub fn generate_and_evaluate_in_place<E>(&self, grid: &mut Vec<f64>, f: &E) -> Result<Vec<f64>>
    where
        E: Evaluable + ?Sized,
    {
        self.refine_and_evaluate_in_place(grid, f, f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Refine the whole grid
    pub fn generate_in_place<E>(&self, grid: &mut Vec<f64>, f: &E) -> Result<()>
    where
        E: Evaluable + ?Sized,
    {
        self.refine_and_evaluate_in_place(grid, f, f64::NEG_INFINITY, f64::INFINITY)
            .map(|_| ())
    }

    /// Refine the grid only inside `[lower, upper]`
    ///
    /// Points outside the window are kept as they are.
    pub fn refine_in_place<E>(&self, grid: &mut Vec<f64>, f: &E, lower: f64, upper: f64) -> Result<()>
    where
        E: Evaluable + ?Sized,
    {
        self.refine_and_evaluate_in_place(grid, f, lower, upper)
            .map(|_| ())
    }

    /// Refine the grid inside `[lower, upper]` and evaluate the function on it
    ///
    /// The window is clamped to the grid's own range and its bounds become
    /// grid points. Only brackets inside the clamped window are refined; when
    /// the clamped window is empty the grid is left unchanged.
    ///
    /// # Arguments
    ///
    /// * `grid` - Strictly increasing grid with at least two points
    /// * `f` - Function to resolve
    /// * `lower` - Lower bound of the refinement window
    /// * `upper` - Upper bound of the refinement window
    ///
    /// # Returns
    ///
    /// The function values at every point of the refined grid
    pub fn refine_and_evaluate_in_place<E>(
        &self,
        grid: &mut Vec<f64>,
        f: &E,
        lower: f64,
        upper: f64,
    ) -> Result<Vec<f64>>
    where
        E: Evaluable + ?Sized,
    {
        validate_grid(grid)?;

        if !(lower < upper) {
            return Err(GridError::InvalidBounds(format!(
                "lower bound ({}) must be less than upper bound ({})",
                lower, upper
            )));
        }

        let window_min = lower.max(grid[0]);
        let window_max = upper.min(grid[grid.len() - 1]);

        if window_min < window_max {
            insert_grid_point(grid, window_min);
            insert_grid_point(grid, window_max);
        }

        let values = grid
            .iter()
            .map(|&x| evaluate_finite(f, x))
            .collect::<Result<Vec<f64>>>()?;

        let mut refined_grid = Vec::with_capacity(grid.len());
        let mut refined_values = Vec::with_capacity(grid.len());
        refined_grid.push(grid[0]);
        refined_values.push(values[0]);

        for i in 1..grid.len() {
            let lower_point = (grid[i - 1], values[i - 1]);
            let upper_point = (grid[i], values[i]);

            if window_min < window_max && lower_point.0 >= window_min && upper_point.0 <= window_max
            {
                self.refine_bracket(
                    f,
                    lower_point,
                    upper_point,
                    &mut refined_grid,
                    &mut refined_values,
                )?;
            } else {
                refined_grid.push(upper_point.0);
                refined_values.push(upper_point.1);
            }
        }

        debug!(
            "Grid refined from {} to {} points ({} interpolation)",
            grid.len(),
            refined_grid.len(),
            self.interpolation
        );

        *grid = refined_grid;
        Ok(refined_values)
    }

    /// Bisect one bracket, appending the interior points and its upper
    /// endpoint to the output in increasing order
    fn refine_bracket<E>(
        &self,
        f: &E,
        lower_point: (f64, f64),
        upper_point: (f64, f64),
        grid: &mut Vec<f64>,
        values: &mut Vec<f64>,
    ) -> Result<()>
    where
        E: Evaluable + ?Sized,
    {
        // Brackets are popped left to right
        let mut stack = vec![(lower_point, upper_point)];

        while let Some(((x0, y0), (x1, y1))) = stack.pop() {
            let x_mid = self.interpolation.midpoint(x0, x1);

            let convergence = if !(x_mid > x0 && x_mid < x1) {
                Some((Convergence::MachinePrecision, None))
            } else {
                let y_mid = evaluate_finite(f, x_mid)?;
                let y_estimate = self.interpolation.interpolate(x0, x1, x_mid, y0, y1);

                match self.check_convergence(x0, x1, y_mid, y_estimate) {
                    Some(convergence) => Some((convergence, Some(y_mid))),
                    None => {
                        stack.push(((x_mid, y_mid), (x1, y1)));
                        stack.push(((x0, y0), (x_mid, y_mid)));
                        None
                    }
                }
            };

            if let Some((convergence, y_mid)) = convergence {
                if convergence != Convergence::Clean {
                    self.report_dirty_convergence(convergence, x0, x1, y_mid)?;
                }
                grid.push(x1);
                values.push(y1);
            }
        }

        Ok(())
    }

    fn check_convergence(&self, x0: f64, x1: f64, exact: f64, estimate: f64) -> Option<Convergence> {
        if relative_error(exact, estimate) <= self.convergence_tolerance {
            Some(Convergence::Clean)
        } else if (exact - estimate).abs() <= self.absolute_difference_tolerance {
            Some(Convergence::AbsoluteDifference)
        } else if bracket_distance(x0, x1) <= self.distance_tolerance {
            Some(Convergence::Distance)
        } else {
            None
        }
    }

    fn report_dirty_convergence(
        &self,
        convergence: Convergence,
        x0: f64,
        x1: f64,
        y_mid: Option<f64>,
    ) -> Result<()> {
        let reason = match convergence {
            Convergence::AbsoluteDifference => "the absolute difference tolerance",
            Convergence::Distance => "the distance tolerance",
            Convergence::MachinePrecision => "machine precision",
            Convergence::Clean => return Ok(()),
        };

        let message = match y_mid {
            Some(y) => format!(
                "bracket [{:e}, {:e}] (midpoint value {:e}) converged on {} instead of the convergence tolerance",
                x0, x1, y, reason
            ),
            None => format!(
                "bracket [{:e}, {:e}] converged on {} instead of the convergence tolerance",
                x0, x1, reason
            ),
        };

        match self.dirty_convergence_policy {
            DirtyConvergencePolicy::Warn => {
                warn!("Dirty grid convergence: {}", message);
                Ok(())
            }
            DirtyConvergencePolicy::Error => Err(GridError::DirtyConvergence(message)),
        }
    }
}

/// Width of a bracket relative to its endpoints, or its absolute width when
/// an endpoint is zero
fn bracket_distance(x0: f64, x1: f64) -> f64 {
    if x0 == 0.0 || x1 == 0.0 {
        (x1 - x0).abs()
    } else {
        relative_error(x0, x1)
    }
}

/// Insert a point into a sorted grid unless it is already present
fn insert_grid_point(grid: &mut Vec<f64>, x: f64) {
    let index = grid.partition_point(|&point| point < x);
    if grid.get(index) != Some(&x) {
        grid.insert(index, x);
    }
}

fn evaluate_finite<E>(f: &E, x: f64) -> Result<f64>
where
    E: Evaluable + ?Sized,
{
    let value = f.evaluate(x)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GridError::NonFiniteValue { x, value })
    }
}

/// Check that a grid has at least two points and is strictly increasing
pub fn validate_grid(grid: &[f64]) -> Result<()> {
    if grid.len() < 2 {
        return Err(GridError::InvalidGrid(format!(
            "at least two points are required, got {}",
            grid.len()
        )));
    }

    if let Some(w) = grid.windows(2).find(|w| !(w[0] < w[1])) {
        return Err(GridError::InvalidGrid(format!(
            "grid must be strictly increasing ({} is followed by {})",
            w[0], w[1]
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_strictly_increasing(grid: &[f64]) {
        assert!(grid.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_tolerance_validation() {
        assert!(GridGenerator::new(0.0, 0.0, 0.0).is_err());
        assert!(GridGenerator::new(1.5, 0.0, 0.0).is_err());
        assert!(GridGenerator::new(1e-3, -1.0, 0.0).is_err());
        assert!(GridGenerator::new(1e-3, 0.0, 2.0).is_err());
        assert!(GridGenerator::new(1e-3, f64::NAN, 0.0).is_err());
        assert!(GridGenerator::new(1.0, 1.0, 1.0).is_ok());
    }

    #[test]
    fn test_parameters() {
        let parameters = GridConvergenceParameters::default();
        let generator = GridGenerator::from_parameters(&parameters).unwrap();
        assert_eq!(generator.parameters(), parameters);
        assert_eq!(generator.interpolation(), InterpolationType::LinLin);
        assert_eq!(
            generator.dirty_convergence_policy(),
            DirtyConvergencePolicy::Warn
        );
    }

    #[test]
    fn test_grid_preconditions() {
        let generator = GridGenerator::default();
        let f = |x: f64| x;

        let mut grid = vec![1.0];
        assert!(generator.generate_in_place(&mut grid, &f).is_err());

        let mut grid = vec![1.0, 1.0, 2.0];
        assert!(generator.generate_in_place(&mut grid, &f).is_err());

        let mut grid = vec![2.0, 1.0];
        assert!(generator.generate_in_place(&mut grid, &f).is_err());

        let mut grid = vec![0.0, 1.0];
        assert!(generator.refine_in_place(&mut grid, &f, 1.0, 0.5).is_err());
    }

    #[test]
    fn test_linear_function_needs_no_points() {
        let generator = GridGenerator::new(1e-6, 0.0, 1e-12).unwrap();
        let mut grid = vec![0.0, 10.0];
        let values = generator
            .generate_and_evaluate_in_place(&mut grid, &|x: f64| 3.0 * x + 1.0)
            .unwrap();

        assert_eq!(grid, vec![0.0, 10.0]);
        assert_relative_eq!(values[0], 1.0);
        assert_relative_eq!(values[1], 31.0);
    }

    #[test]
    fn test_quadratic_function() {
        let tolerance = 1e-3;
        let generator = GridGenerator::new(tolerance, 1e-12, 1e-12).unwrap();
        let mut grid = vec![0.0, 1.0];
        let f = |x: f64| x * x;
        let values = generator.generate_and_evaluate_in_place(&mut grid, &f).unwrap();

        assert!(grid.len() > 2);
        assert_eq!(grid.len(), values.len());
        assert_strictly_increasing(&grid);

        for (x, y) in grid.iter().zip(values.iter()) {
            assert_relative_eq!(*y, x * x);
        }

        for w in grid.windows(2) {
            let mid = 0.5 * (w[0] + w[1]);
            let estimate = 0.5 * (w[0] * w[0] + w[1] * w[1]);
            let exact = mid * mid;
            assert!(
                relative_error(exact, estimate) <= tolerance
                    || (exact - estimate).abs() <= 1e-12
            );
        }
    }

    #[test]
    fn test_log_log_policy_is_exact_for_power_laws() {
        let mut generator = GridGenerator::new(1e-8, 0.0, 1e-12).unwrap();
        generator.with_interpolation(InterpolationType::LogLog);

        let mut grid = vec![1e-3, 1.0, 20.0];
        generator
            .generate_in_place(&mut grid, &|x: f64| x.powf(-2.5))
            .unwrap();

        assert_eq!(grid, vec![1e-3, 1.0, 20.0]);
    }

    #[test]
    fn test_refine_in_place_only_inside_window() {
        let generator = GridGenerator::new(1e-4, 0.0, 1e-12).unwrap();
        let mut grid = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        let f = |x: f64| x.exp();

        generator.refine_in_place(&mut grid, &f, 1.0, 2.0).unwrap();

        assert_strictly_increasing(&grid);
        assert!(grid.len() > 5);
        assert!(grid.iter().filter(|&&x| x < 1.0).count() == 1);
        assert!(grid.iter().filter(|&&x| x > 2.0).count() == 2);
        for x in [0.0, 1.0, 2.0, 3.0, 4.0] {
            assert!(grid.contains(&x));
        }
    }

    #[test]
    fn test_refine_in_place_unaligned_window() {
        let generator = GridGenerator::new(1e-3, 0.0, 1e-12).unwrap();
        let f = |x: f64| x * x;

        let mut grid = vec![0.0, 10.0];
        generator.refine_in_place(&mut grid, &f, 0.0, 5.0).unwrap();
        assert_strictly_increasing(&grid);
        assert!(grid.len() > 3);
        assert!(grid.contains(&5.0));
        // Nothing between the window edge and the old end point
        assert_eq!(grid[grid.len() - 2], 5.0);
        assert_eq!(grid[grid.len() - 1], 10.0);

        let mut grid = vec![1.0, 3.0, 10.0];
        generator.refine_in_place(&mut grid, &f, 2.0, 9.0).unwrap();
        assert_strictly_increasing(&grid);
        assert!(grid.len() > 5);
        assert!(grid.contains(&2.0));
        assert!(grid.contains(&9.0));
        assert_eq!(&grid[..2], &[1.0, 2.0]);
        assert!(grid.iter().filter(|&&x| x > 9.0).count() == 1);
    }

    #[test]
    fn test_refine_in_place_outside_grid_is_noop() {
        let generator = GridGenerator::default();
        let mut grid = vec![1.0, 2.0];
        generator
            .refine_in_place(&mut grid, &|x: f64| x.sin(), 5.0, 6.0)
            .unwrap();
        assert_eq!(grid, vec![1.0, 2.0]);
    }

    #[test]
    fn test_discontinuity_terminates_on_distance() {
        let generator = GridGenerator::new(1e-3, 0.0, 1e-10).unwrap();
        let mut grid = vec![0.0, 1.0];
        let step = |x: f64| if x < 0.3 { 0.0 } else { 5.0 };

        generator.generate_in_place(&mut grid, &step).unwrap();

        assert_strictly_increasing(&grid);
        let jump = grid
            .windows(2)
            .find(|w| w[0] < 0.3 && w[1] >= 0.3)
            .unwrap();
        assert!(bracket_distance(jump[0], jump[1]) <= 2e-10);
    }

    #[test]
    fn test_dirty_convergence_error_policy() {
        let mut generator = GridGenerator::new(1e-3, 0.0, 1e-6).unwrap();
        generator.with_dirty_convergence_policy(DirtyConvergencePolicy::Error);

        let mut grid = vec![0.0, 1.0];
        let step = |x: f64| if x < 0.3 { 0.0 } else { 5.0 };
        let result = generator.generate_in_place(&mut grid, &step);

        assert!(matches!(result, Err(GridError::DirtyConvergence(_))));
    }

    #[test]
    fn test_non_finite_value_is_fatal() {
        let generator = GridGenerator::default();
        let mut grid = vec![-1.0, 1.0];
        let result = generator.generate_in_place(&mut grid, &|x: f64| 1.0 / x);
        assert!(matches!(result, Err(GridError::NonFiniteValue { .. })));
    }

    #[test]
    fn test_validate_grid() {
        assert!(validate_grid(&[0.0, 1.0, 2.0]).is_ok());
        assert!(validate_grid(&[0.0]).is_err());
        assert!(validate_grid(&[0.0, f64::NAN]).is_err());
    }
}
