/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Electron union energy grid and electron cross sections
//!
//! All electron data come from the ENDL (EEDL) tables. The raw energy grid
//! of every process is merged into the union grid before refinement.

use super::config::GeneratorConfig;
use super::errors::{GeneratorError, Result};
use crate::cross_section::{
    aggregate, create_cross_section_on_union_energy_grid, create_screened_rutherford_cross_section,
    CrossSectionOnGrid, Threshold,
};
use crate::data::{
    subshell_name, DataError, ElectronCrossSectionType, ElectronPhotonRelaxationDataContainer,
    EndlDataContainer,
};
use crate::distribution::{Evaluable, TabularDistribution};
use crate::grid::{InterpolationType, UnionGridBuilder};
use log::{debug, info, warn};
use rayon::prelude::*;

/// Interpolation and refinement choices for the electron cross sections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElectronCrossSectionPolicy {
    pub elastic: InterpolationType,
    pub bremsstrahlung: InterpolationType,
    pub atomic_excitation: InterpolationType,
    pub electroionization: InterpolationType,
    /// Refine the excitation and electroionization cross sections only
    /// over their tabulated energies
    pub refine_within_table_domain: bool,
}

impl ElectronCrossSectionPolicy {
    /// Log-log interpolation for every electron cross section
    pub fn log_log() -> Self {
        Self {
            elastic: InterpolationType::LogLog,
            bremsstrahlung: InterpolationType::LogLog,
            atomic_excitation: InterpolationType::LogLog,
            electroionization: InterpolationType::LogLog,
            refine_within_table_domain: true,
        }
    }

    /// Lin-lin bremsstrahlung and excitation with refinement over the whole
    /// union grid
    pub fn legacy() -> Self {
        Self {
            elastic: InterpolationType::LogLog,
            bremsstrahlung: InterpolationType::LinLin,
            atomic_excitation: InterpolationType::LinLin,
            electroionization: InterpolationType::LogLog,
            refine_within_table_domain: false,
        }
    }

    /// Label recorded in the data container
    pub fn label(&self) -> &'static str {
        if *self == Self::log_log() {
            "LogLog"
        } else {
            "LinLin"
        }
    }
}

/// Build the electron union grid and set every electron cross section
///
/// The container must already hold the subshells and their binding
/// energies.
///
/// # Arguments
///
/// * `container` - The output container
/// * `endl` - The ENDL source tables
/// * `policy` - Interpolation and refinement choices
/// * `config` - The generator configuration
pub fn set_electron_cross_sections(
    container: &mut ElectronPhotonRelaxationDataContainer,
    endl: &EndlDataContainer,
    policy: ElectronCrossSectionPolicy,
    config: &GeneratorConfig,
) -> Result<()> {
    info!("Setting the electron cross section data");

    let mut builder = UnionGridBuilder::new(
        "electron",
        container.min_electron_energy(),
        container.max_electron_energy(),
        config.electron_grid_generator()?,
    )?;
    builder
        .with_nudge_factor(config.nudge_factor)
        .with_discontinuity_shift(config.discontinuity_shift);

    let mut binding_energies = Vec::with_capacity(container.subshells().len());
    for &subshell in container.subshells() {
        let binding_energy = container.subshell_binding_energy(subshell).ok_or_else(|| {
            missing(format!(
                "subshell {} has no binding energy",
                subshell_name(subshell)
            ))
        })?;
        builder.add_binding_energy(binding_energy, true);
        binding_energies.push((subshell, binding_energy));
    }

    // Elastic
    let cutoff_elastic = endl.cutoff_elastic()?.to_distribution(policy.elastic)?;
    let total_elastic = endl.total_elastic()?.to_distribution(policy.elastic)?;
    builder.merge(&endl.elastic_energy_grid);

    // Electroionization
    let mut electroionization = Vec::with_capacity(binding_energies.len());
    for &(subshell, binding_energy) in &binding_energies {
        let table = endl
            .electroionization_cross_sections
            .get(&subshell)
            .ok_or_else(|| {
                missing(format!(
                    "the ENDL tables have no electroionization cross section for subshell {}",
                    subshell_name(subshell)
                ))
            })?;

        builder.merge(&table.grid);
        electroionization.push((
            subshell,
            binding_energy,
            table.to_distribution(policy.electroionization)?,
        ));
    }

    // Bremsstrahlung
    let bremsstrahlung = endl
        .bremsstrahlung_cross_section
        .to_distribution(policy.bremsstrahlung)?;
    builder.merge(&endl.bremsstrahlung_cross_section.grid);

    // Atomic excitation
    let atomic_excitation = endl
        .atomic_excitation_cross_section
        .to_distribution(policy.atomic_excitation)?;
    let atomic_excitation_threshold = atomic_excitation.lower_bound();
    builder.merge(&endl.atomic_excitation_cross_section.grid);

    info!("Creating the electron union energy grid");
    builder.refine("cutoff elastic cross section", &cutoff_elastic)?;
    builder.refine("total elastic cross section", &total_elastic)?;
    builder.refine("bremsstrahlung cross section", &bremsstrahlung)?;
    refine_tabulated(
        &mut builder,
        "atomic excitation cross section",
        &atomic_excitation,
        policy,
    )?;
    for (subshell, _, cross_section) in &electroionization {
        refine_tabulated(
            &mut builder,
            &format!(
                "subshell {} electroionization cross section",
                subshell_name(*subshell)
            ),
            cross_section,
            policy,
        )?;
    }

    let grid = builder.finalize();
    info!("Electron union energy grid: {} points", grid.len());
    container.set_electron_energy_grid(grid.clone())?;

    let cutoff_elastic = create_cross_section_on_union_energy_grid(
        &grid,
        &cutoff_elastic,
        Threshold::new(cutoff_elastic.lower_bound(), false),
    )?;
    let total_elastic = create_cross_section_on_union_energy_grid(
        &grid,
        &total_elastic,
        Threshold::new(total_elastic.lower_bound(), false),
    )?;
    let screened_rutherford =
        create_screened_rutherford_cross_section(grid.len(), &total_elastic, &cutoff_elastic)?;
    let bremsstrahlung = create_cross_section_on_union_energy_grid(
        &grid,
        &bremsstrahlung,
        Threshold::new(bremsstrahlung.lower_bound(), false),
    )?;
    let atomic_excitation = create_cross_section_on_union_energy_grid(
        &grid,
        &atomic_excitation,
        Threshold::new(atomic_excitation_threshold, true),
    )?;

    let electroionization = electroionization
        .par_iter()
        .map(
            |(subshell, binding_energy, cross_section)| -> Result<(u32, CrossSectionOnGrid)> {
                let resolved = create_cross_section_on_union_energy_grid(
                    &grid,
                    cross_section,
                    Threshold::new(*binding_energy, true),
                )?;
                Ok((*subshell, resolved))
            },
        )
        .collect::<Result<Vec<(u32, CrossSectionOnGrid)>>>()?;

    let mut parts: Vec<&[f64]> = vec![
        total_elastic.values.as_slice(),
        atomic_excitation.values.as_slice(),
        bremsstrahlung.values.as_slice(),
    ];
    parts.extend(
        electroionization
            .iter()
            .map(|(_, cross_section)| cross_section.values.as_slice()),
    );
    let total = aggregate(grid.len(), &parts)?;

    container.set_electron_cross_section(ElectronCrossSectionType::CutoffElastic, cutoff_elastic)?;
    container.set_electron_cross_section(ElectronCrossSectionType::TotalElastic, total_elastic)?;
    container.set_electron_cross_section(
        ElectronCrossSectionType::ScreenedRutherfordElastic,
        screened_rutherford,
    )?;
    container.set_electron_cross_section(ElectronCrossSectionType::Bremsstrahlung, bremsstrahlung)?;
    container.set_electron_cross_section(
        ElectronCrossSectionType::AtomicExcitation,
        atomic_excitation,
    )?;
    for (subshell, cross_section) in electroionization {
        container.set_electroionization_cross_section(subshell, cross_section)?;
    }
    container.set_total_electron_cross_section(total)?;

    set_electron_secondary_distributions(container, endl)
}

/// Copy the ENDL electron secondary distributions into the container
///
/// Elastic angular distributions above the max electron energy are dropped,
/// keeping the first one at or above it. Missing tables are skipped with a
/// warning.
pub fn set_electron_secondary_distributions(
    container: &mut ElectronPhotonRelaxationDataContainer,
    endl: &EndlDataContainer,
) -> Result<()> {
    info!("Setting the electron secondary distribution data");

    if endl.cutoff_elastic_angular_distributions.is_empty() {
        warn!("The ENDL tables have no cutoff elastic angular distributions");
    } else {
        let angular = endl
            .cutoff_elastic_angular_distributions
            .truncate_above(container.max_electron_energy());
        debug!(
            "Cutoff elastic angular distributions at {} of {} energies",
            angular.len(),
            endl.cutoff_elastic_angular_distributions.len()
        );
        container.set_cutoff_elastic_angular_distributions(angular)?;
    }

    if endl.bremsstrahlung_photon_distributions.is_empty() {
        warn!("The ENDL tables have no bremsstrahlung photon distributions");
    } else {
        container
            .set_bremsstrahlung_photon_distributions(endl.bremsstrahlung_photon_distributions.clone())?;
    }

    let subshells: Vec<u32> = container.subshells().iter().copied().collect();
    for subshell in subshells {
        match endl.electroionization_recoil_distributions.get(&subshell) {
            Some(table) => container.set_electroionization_recoil_distributions(subshell, table.clone())?,
            None => warn!(
                "The ENDL tables have no electroionization recoil distributions for subshell {}",
                subshell_name(subshell)
            ),
        }
    }

    if endl.atomic_excitation_energy_loss.is_empty() {
        warn!("The ENDL tables have no atomic excitation energy loss");
    } else {
        container.set_atomic_excitation_energy_loss(endl.atomic_excitation_energy_loss.clone())?;
    }

    Ok(())
}

fn refine_tabulated(
    builder: &mut UnionGridBuilder,
    process: &str,
    cross_section: &TabularDistribution,
    policy: ElectronCrossSectionPolicy,
) -> Result<()> {
    if policy.refine_within_table_domain {
        builder.refine_between(
            process,
            cross_section,
            cross_section.lower_bound(),
            cross_section.upper_bound(),
        )?;
    } else {
        builder.refine(process, cross_section)?;
    }
    Ok(())
}

fn missing(message: String) -> GeneratorError {
    GeneratorError::Data(DataError::MissingData(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{SecondaryDistributionTable, TabulatedData};
    use std::collections::BTreeMap;

    fn energy_distributions(energies: Vec<f64>) -> SecondaryDistributionTable {
        let n = energies.len();
        SecondaryDistributionTable::new(energies, vec![vec![-1.0, 0.999999]; n], vec![vec![0.5, 0.5]; n])
    }

    fn hydrogen_container() -> ElectronPhotonRelaxationDataContainer {
        let mut container = ElectronPhotonRelaxationDataContainer::new();
        container.set_electron_energy_limits(1e-5, 1e3).unwrap();
        container.set_subshells([1].into_iter().collect()).unwrap();
        container
    }

    #[test]
    fn test_policies() {
        let log_log = ElectronCrossSectionPolicy::log_log();
        assert_eq!(log_log.bremsstrahlung, InterpolationType::LogLog);
        assert!(log_log.refine_within_table_domain);
        assert_eq!(log_log.label(), "LogLog");

        let legacy = ElectronCrossSectionPolicy::legacy();
        assert_eq!(legacy.elastic, InterpolationType::LogLog);
        assert_eq!(legacy.bremsstrahlung, InterpolationType::LinLin);
        assert_eq!(legacy.atomic_excitation, InterpolationType::LinLin);
        assert_eq!(legacy.electroionization, InterpolationType::LogLog);
        assert!(!legacy.refine_within_table_domain);
        assert_eq!(legacy.label(), "LinLin");
    }

    #[test]
    fn test_secondary_distributions_are_copied() {
        let endl = EndlDataContainer {
            cutoff_elastic_angular_distributions: energy_distributions(vec![1e-5, 1.0, 1e4, 1e5]),
            bremsstrahlung_photon_distributions: SecondaryDistributionTable::new(
                vec![1e-5, 1e5],
                vec![vec![1e-7, 1e-5], vec![1e-7, 1e5]],
                vec![vec![1e5, 1.0], vec![1e3, 1e-8]],
            ),
            electroionization_recoil_distributions: BTreeMap::from([(
                1,
                SecondaryDistributionTable::new(
                    vec![1.361e-5, 1e5],
                    vec![vec![1e-8, 1e-7], vec![1e-8, 5e4]],
                    vec![vec![1e7, 1e6], vec![1e4, 1e-9]],
                ),
            )]),
            atomic_excitation_energy_loss: TabulatedData::new(vec![2e-5, 1e5], vec![1e-5, 2e-5]),
            ..Default::default()
        };

        let mut container = hydrogen_container();
        set_electron_secondary_distributions(&mut container, &endl).unwrap();

        // One distribution above the 1e3 MeV limit is kept
        assert_eq!(
            container.cutoff_elastic_angular_distributions().energy_grid,
            vec![1e-5, 1.0, 1e4]
        );
        assert_eq!(
            container.bremsstrahlung_photon_distributions(),
            &endl.bremsstrahlung_photon_distributions
        );
        assert_eq!(
            container.electroionization_recoil_distributions(1),
            endl.electroionization_recoil_distributions.get(&1)
        );
        assert_eq!(
            container.atomic_excitation_energy_loss(),
            &endl.atomic_excitation_energy_loss
        );
    }

    #[test]
    fn test_missing_secondary_distributions_are_skipped() {
        let mut container = hydrogen_container();
        set_electron_secondary_distributions(&mut container, &EndlDataContainer::default()).unwrap();

        assert!(container.cutoff_elastic_angular_distributions().is_empty());
        assert!(container.bremsstrahlung_photon_distributions().is_empty());
        assert!(container.electroionization_recoil_distributions(1).is_none());
        assert!(container.atomic_excitation_energy_loss().is_empty());
    }

    #[test]
    fn test_invalid_secondary_distributions_are_rejected() {
        let mut endl = EndlDataContainer {
            cutoff_elastic_angular_distributions: energy_distributions(vec![1e-5, 1.0]),
            ..Default::default()
        };
        endl.cutoff_elastic_angular_distributions.pdfs.pop();

        let mut container = hydrogen_container();
        assert!(set_electron_secondary_distributions(&mut container, &endl).is_err());
    }
}
