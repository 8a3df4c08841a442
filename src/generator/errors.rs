/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for the generator module

use crate::cross_section::CrossSectionError;
use crate::data::DataError;
use crate::distribution::DistributionError;
use crate::evaluators::EvaluatorError;
use crate::grid::GridError;
use thiserror::Error;

/// Errors that can occur while generating an electron-photon-relaxation table
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// The ACE and ENDL source tables describe different elements
    #[error("The ACE and ENDL data tables are not compatible (Z-ACE={ace}, Z-ENDL={endl})!")]
    IncompatibleTables { ace: u32, endl: u32 },

    /// Relaxation transitions are incomplete
    #[error("Missing transition data: {0}")]
    MissingTransitionData(String),

    /// The generator configuration is invalid
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An optimized momentum or recoil grid could not be generated
    #[error("Could not generate an optimized {description} with the provided convergence parameters!")]
    OptimizedGrid {
        description: String,
        #[source]
        source: EvaluatorError,
    },

    /// Union grid generation failed
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    /// Cross section resolution or aggregation failed
    #[error("Cross section error: {0}")]
    CrossSection(#[from] CrossSectionError),

    /// Source or output data are inconsistent
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// A source table could not be turned into an evaluator
    #[error("Distribution error: {0}")]
    Distribution(#[from] DistributionError),

    /// A composite evaluator could not be built
    #[error("Evaluator error: {0}")]
    Evaluator(#[from] EvaluatorError),
}

/// A specialized Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;
