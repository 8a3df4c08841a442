/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Command Line Interface (CLI) module
//!
//! Loads the source tables, runs the selected generator and writes the
//! resulting data container as JSON.

use crate::data::{AceEprTable, EndlDataContainer};
use crate::generator::{
    AceAndEndlElectronPhotonRelaxationDataGenerator, EndlElectronPhotonRelaxationDataGenerator,
    GeneratorConfig, StandardElectronPhotonRelaxationDataGenerator,
};
use crate::grid::DirtyConvergencePolicy;
use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use log::info;
use std::path::PathBuf;

/// Which data generator to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GeneratorKind {
    /// ENDL tables only
    Endl,
    /// ACE photon and relaxation data with ENDL electron data
    AceEndl,
    /// ACE and ENDL with the lin-lin electron cross sections
    Standard,
}

/// Generate an electron-photon-relaxation data table
#[derive(Debug, Parser)]
#[command(name = "epr-gen", version, about)]
pub struct Args {
    /// ENDL tables (JSON)
    #[arg(long)]
    pub endl: PathBuf,

    /// ACE EPR table (JSON), required by the ace-endl and standard generators
    #[arg(long)]
    pub ace: Option<PathBuf>,

    /// Data generator
    #[arg(long, value_enum, default_value = "endl")]
    pub generator: GeneratorKind,

    /// Output data container (JSON)
    #[arg(long, short)]
    pub output: PathBuf,

    /// Min photon energy (MeV)
    #[arg(long, default_value = "1e-3")]
    pub min_photon_energy: f64,

    /// Max photon energy (MeV)
    #[arg(long, default_value = "20.0")]
    pub max_photon_energy: f64,

    /// Min electron energy (MeV)
    #[arg(long, default_value = "1e-5")]
    pub min_electron_energy: f64,

    /// Max electron energy (MeV)
    #[arg(long, default_value = "1e5")]
    pub max_electron_energy: f64,

    /// Grid convergence tolerance
    #[arg(long, default_value = "1e-3")]
    pub convergence_tolerance: f64,

    /// Grid absolute difference tolerance
    #[arg(long, default_value = "1e-42")]
    pub absolute_difference_tolerance: f64,

    /// Grid distance tolerance
    #[arg(long, default_value = "1e-16")]
    pub distance_tolerance: f64,

    /// Multiplicative nudge placed above thresholds
    #[arg(long, default_value = "1.0001")]
    pub nudge_factor: f64,

    /// Treat dirty grid convergence as an error
    #[arg(long)]
    pub strict: bool,
}

impl Args {
    /// Generator configuration described by the arguments
    pub fn config(&self) -> GeneratorConfig {
        let mut config = GeneratorConfig::new();
        config
            .with_photon_energy_limits(self.min_photon_energy, self.max_photon_energy)
            .with_electron_energy_limits(self.min_electron_energy, self.max_electron_energy)
            .with_nudge_factor(self.nudge_factor);

        for parameters in [&mut config.photon_grid, &mut config.electron_grid] {
            parameters.convergence_tolerance = self.convergence_tolerance;
            parameters.absolute_difference_tolerance = self.absolute_difference_tolerance;
            parameters.distance_tolerance = self.distance_tolerance;
        }

        if self.strict {
            config.with_dirty_convergence_policy(DirtyConvergencePolicy::Error);
        }

        config
    }
}

/// Run the selected generator and write the data container
pub fn run(args: &Args) -> anyhow::Result<()> {
    let ace_path = match (args.generator, &args.ace) {
        (GeneratorKind::Endl, _) => None,
        (_, Some(path)) => Some(path),
        (generator, None) => {
            bail!("the {:?} generator requires an ACE table (--ace)", generator)
        }
    };

    let endl = EndlDataContainer::load_json(&args.endl)
        .with_context(|| format!("failed to load the ENDL tables from {}", args.endl.display()))?;
    let config = args.config();

    let container = match ace_path {
        None => EndlElectronPhotonRelaxationDataGenerator::new(&endl, config)?
            .populate_epr_data_container()?,
        Some(ace_path) => {
            let ace = AceEprTable::load_json(ace_path).with_context(|| {
                format!("failed to load the ACE table from {}", ace_path.display())
            })?;

            if args.generator == GeneratorKind::AceEndl {
                AceAndEndlElectronPhotonRelaxationDataGenerator::new(&ace, &endl, config)?
                    .populate_epr_data_container()?
            } else {
                StandardElectronPhotonRelaxationDataGenerator::new(&ace, &endl, config)?
                    .populate_epr_data_container()?
            }
        }
    };

    container
        .save_json(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    info!(
        "Wrote {} photon and {} electron energies to {}",
        container.photon_energy_grid().len(),
        container.electron_energy_grid().len(),
        args.output.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_arguments() {
        let args = Args::try_parse_from([
            "epr-gen",
            "--endl",
            "h.json",
            "--output",
            "out.json",
            "--generator",
            "ace-endl",
            "--ace",
            "h.ace.json",
            "--strict",
            "--convergence-tolerance",
            "1e-4",
        ])
        .unwrap();

        assert_eq!(args.generator, GeneratorKind::AceEndl);
        assert!(args.ace.is_some());

        let config = args.config();
        assert_relative_eq!(config.photon_grid.convergence_tolerance, 1e-4);
        assert_relative_eq!(config.electron_grid.convergence_tolerance, 1e-4);
        assert_eq!(config.dirty_convergence_policy, DirtyConvergencePolicy::Error);
        assert_relative_eq!(config.max_photon_energy, 20.0);
    }

    #[test]
    fn test_ace_required() {
        for generator in ["ace-endl", "standard"] {
            let args = Args::try_parse_from([
                "epr-gen",
                "--endl",
                "/nonexistent/endl.json",
                "--output",
                "out.json",
                "--generator",
                generator,
            ])
            .unwrap();

            let message = run(&args).unwrap_err().to_string();
            assert!(message.contains("--ace"), "{}", message);
        }
    }

    #[test]
    fn test_missing_endl_file() {
        let args = Args::try_parse_from([
            "epr-gen",
            "--endl",
            "/nonexistent/endl.json",
            "--output",
            "out.json",
        ])
        .unwrap();
        assert_eq!(args.generator, GeneratorKind::Endl);

        let message = run(&args).unwrap_err().to_string();
        assert!(message.contains("failed to load the ENDL tables"), "{}", message);
    }
}
