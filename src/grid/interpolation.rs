/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Interpolation policies
//!
//! A policy is named dependent-then-independent: `LinLog` interpolates the
//! dependent variable linearly against the logarithm of the independent
//! variable. Logarithmic axes fall back to linear treatment wherever a value
//! is not strictly positive, so every policy is total over finite inputs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Two-point interpolation scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InterpolationType {
    /// Linear dependent, linear independent
    #[default]
    LinLin,
    /// Linear dependent, logarithmic independent
    LinLog,
    /// Logarithmic dependent, linear independent
    LogLin,
    /// Logarithmic dependent, logarithmic independent
    LogLog,
}

impl InterpolationType {
    /// Whether the independent variable is processed on a log scale
    pub fn is_independent_log(self) -> bool {
        matches!(self, InterpolationType::LinLog | InterpolationType::LogLog)
    }

    /// Whether the dependent variable is processed on a log scale
    pub fn is_dependent_log(self) -> bool {
        matches!(self, InterpolationType::LogLin | InterpolationType::LogLog)
    }

    /// Midpoint of a bracket in the processed independent variable
    ///
    /// Arithmetic for linear independent axes and geometric for logarithmic
    /// ones.
    pub fn midpoint(self, x0: f64, x1: f64) -> f64 {
        if self.is_independent_log() && x0 > 0.0 && x1 > 0.0 {
            (0.5 * (x0.ln() + x1.ln())).exp()
        } else {
            0.5 * (x0 + x1)
        }
    }

    /// Interpolate between (x0, y0) and (x1, y1) at x
    ///
    /// # Arguments
    ///
    /// * `x0` - Lower independent value of the bracket
    /// * `x1` - Upper independent value of the bracket
    /// * `x` - Independent value to interpolate at
    /// * `y0` - Dependent value at `x0`
    /// * `y1` - Dependent value at `x1`
    ///
    /// # Returns
    ///
    /// The interpolated dependent value
    pub fn interpolate(self, x0: f64, x1: f64, x: f64, y0: f64, y1: f64) -> f64 {
        let (p0, p1, p) = if self.is_independent_log() && x0 > 0.0 && x1 > 0.0 && x > 0.0 {
            (x0.ln(), x1.ln(), x.ln())
        } else {
            (x0, x1, x)
        };

        if p1 == p0 {
            return y0;
        }

        let t = (p - p0) / (p1 - p0);

        // Bracket ends reproduce the tabulated values exactly
        if t == 0.0 {
            return y0;
        }
        if t == 1.0 {
            return y1;
        }

        if self.is_dependent_log() && y0 > 0.0 && y1 > 0.0 {
            (y0.ln() + t * (y1.ln() - y0.ln())).exp()
        } else {
            y0 + t * (y1 - y0)
        }
    }

    /// Short name of the policy
    pub fn name(self) -> &'static str {
        match self {
            InterpolationType::LinLin => "LinLin",
            InterpolationType::LinLog => "LinLog",
            InterpolationType::LogLin => "LogLin",
            InterpolationType::LogLog => "LogLog",
        }
    }
}

impl fmt::Display for InterpolationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
