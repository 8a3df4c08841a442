/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for the data module

use crate::distribution::DistributionError;
use thiserror::Error;

/// Errors that can occur while reading source tables or filling the data container
#[derive(Error, Debug)]
pub enum DataError {
    /// Grid is not strictly increasing or too short
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// An array does not fit its grid
    #[error("Size mismatch: {0}")]
    SizeMismatch(String),

    /// A subshell designator is unknown or not present in the table
    #[error("Unknown subshell: {0}")]
    UnknownSubshell(String),

    /// The table contents are inconsistent
    #[error("Invalid table: {0}")]
    InvalidTable(String),

    /// Required data are missing from the table
    #[error("Missing data: {0}")]
    MissingData(String),

    /// Error building a distribution from tabulated data
    #[error("Distribution error: {0}")]
    Distribution(#[from] DistributionError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for data operations
pub type Result<T> = std::result::Result<T, DataError>;
