/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! # epr-gen
//!
//! Generation of electron-photon-relaxation data tables for Monte Carlo
//! particle transport.
//!
//! Evaluated source tables (an ACE EPR table and the ENDL tables of an
//! element) are converted into one [`data::ElectronPhotonRelaxationDataContainer`].
//! The core of the crate is the adaptive grid engine: a bisection grid
//! generator, a union energy grid builder per particle type, and the
//! resolution of every process onto the union grid with its threshold.

pub mod cli;
pub mod cross_section;
pub mod data;
pub mod distribution;
pub mod evaluators;
pub mod generator;
pub mod grid;
pub mod utils;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
