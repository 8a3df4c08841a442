/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! One-dimensional evaluators
//!
//! Every process resolved on a grid implements [`Evaluable`]. Tabulated
//! source data are wrapped in a [`TabularDistribution`], constant data in a
//! [`UniformDistribution`], and plain closures implement the trait directly.

pub mod errors;
pub mod tabular;
pub mod uniform;

use std::sync::Arc;

pub use errors::{DistributionError, Result};
pub use tabular::TabularDistribution;
pub use uniform::UniformDistribution;

/// A function of one variable with an optional tabulated domain
pub trait Evaluable {
    /// Evaluate the function at `x`
    fn evaluate(&self, x: f64) -> Result<f64>;

    /// Lowest tabulated independent value
    fn lower_bound(&self) -> f64 {
        f64::NEG_INFINITY
    }

    /// Highest tabulated independent value
    fn upper_bound(&self) -> f64 {
        f64::INFINITY
    }
}

impl<F> Evaluable for F
where
    F: Fn(f64) -> f64 + ?Sized,
{
    fn evaluate(&self, x: f64) -> Result<f64> {
        Ok(self(x))
    }
}

/// Evaluator shared between the grid builder and the cross section resolver
pub type SharedEvaluable = Arc<dyn Evaluable + Send + Sync>;
