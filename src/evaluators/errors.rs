/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for the evaluators module

use crate::data::DataError;
use crate::distribution::DistributionError;
use crate::grid::GridError;
use thiserror::Error;

/// Errors that can occur while building or refining composite evaluators
#[derive(Error, Debug)]
pub enum EvaluatorError {
    /// The input table violates a physical constraint
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Grid generation failed
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    /// Distribution construction or evaluation failed
    #[error("Distribution error: {0}")]
    Distribution(#[from] DistributionError),

    /// Tabulated data are inconsistent
    #[error("Data error: {0}")]
    Data(#[from] DataError),
}

/// A specialized Result type for evaluator operations
pub type Result<T> = std::result::Result<T, EvaluatorError>;
