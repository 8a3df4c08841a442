/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for the distribution module

use crate::utils::UtilsError;
use thiserror::Error;

/// Errors that can occur while building or evaluating distributions
#[derive(Error, Debug)]
pub enum DistributionError {
    /// The tabulated data are not usable
    #[error("Invalid table: {0}")]
    InvalidTable(String),

    /// Evaluation of a composite evaluator failed
    #[error("Evaluation error: {0}")]
    Evaluation(String),

    /// Errors from the numerical helpers
    #[error("Numerical error: {0}")]
    Utils(#[from] UtilsError),
}

/// A specialized Result type for distribution operations
pub type Result<T> = std::result::Result<T, DistributionError>;
