/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for the cross section module

use crate::distribution::DistributionError;
use thiserror::Error;

/// Errors that can occur while resolving or combining cross sections
#[derive(Error, Debug)]
pub enum CrossSectionError {
    /// A cross section does not fit the energy grid
    #[error("Size mismatch: {0}")]
    SizeMismatch(String),

    /// Evaluation of a process failed
    #[error("Distribution error: {0}")]
    Distribution(#[from] DistributionError),
}

/// A specialized Result type for cross section operations
pub type Result<T> = std::result::Result<T, CrossSectionError>;
