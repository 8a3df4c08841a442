/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for the utils module

use thiserror::Error;

/// Errors raised by the numerical helpers
#[derive(Error, Debug)]
pub enum UtilsError {
    /// Integration bounds or tolerance are unusable
    #[error("Invalid quadrature input: {0}")]
    InvalidQuadrature(String),

    /// The integrand produced a NaN or infinite value
    #[error("Integrand is not finite at x = {0}")]
    NonFiniteIntegrand(f64),

    /// A tabulated integrand is malformed
    #[error("Invalid tabulated integrand: {0}")]
    InvalidTable(String),
}

/// A specialized Result type for utils operations
pub type Result<T> = std::result::Result<T, UtilsError>;
