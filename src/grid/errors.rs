/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for the grid module

use crate::distribution::DistributionError;
use thiserror::Error;

/// Errors that can occur while generating or merging grids
#[derive(Error, Debug)]
pub enum GridError {
    /// A convergence tolerance is outside its allowed range
    #[error("Invalid tolerance: {0}")]
    InvalidTolerance(String),

    /// The grid violates a precondition (size, ordering)
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// The refinement bounds are invalid
    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),

    /// The function being resolved returned a value that is not finite
    #[error("Non-finite value {value} encountered at {x}")]
    NonFiniteValue { x: f64, value: f64 },

    /// A bracket converged on a tolerance other than the convergence tolerance
    #[error("Dirty convergence: {0}")]
    DirtyConvergence(String),

    /// Evaluation of the function failed
    #[error("Evaluation error: {0}")]
    Evaluation(#[from] DistributionError),

    /// Grid generation failed for a named process
    #[error(
        "Could not generate an optimized {particle} energy grid for the {process} with the provided convergence parameters!"
    )]
    ProcessGridGeneration {
        particle: String,
        process: String,
        #[source]
        source: Box<GridError>,
    },
}

/// A specialized Result type for grid operations
pub type Result<T> = std::result::Result<T, GridError>;
