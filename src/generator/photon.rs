/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Photon union energy grid and photon cross sections
//!
//! The photon union grid starts from the energy limits, the subshell
//! binding energies and the pair and triplet production thresholds. It is
//! then refined for every photon process in a fixed order, after which each
//! process is resolved on the final grid and the totals are aggregated.

use super::config::GeneratorConfig;
use super::errors::{GeneratorError, Result};
use crate::cross_section::{
    aggregate, create_cross_section_on_union_energy_grid, create_zero_at_threshold_cross_section,
    populate_cross_section, CrossSectionOnGrid, Threshold,
};
use crate::data::{
    subshell_name, DataError, ElectronPhotonRelaxationDataContainer, PhotonCrossSectionType,
    TabulatedData,
};
use crate::distribution::{
    Evaluable, SharedEvaluable, TabularDistribution, UniformDistribution,
};
use crate::evaluators::ImpulseApproxSubshellIncoherentCrossSection;
use crate::grid::{InterpolationType, UnionGridBuilder};
use crate::utils::constants::{PAIR_PRODUCTION_THRESHOLD, TRIPLET_PRODUCTION_THRESHOLD};
use log::{debug, info, warn};
use rayon::prelude::*;
use std::sync::Arc;

/// Tabulated photon processes taken from the source tables
#[derive(Debug, Clone, Default)]
pub struct PhotonProcessTables {
    /// Average photon heating numbers, when the source provides them
    pub heating_numbers: Option<TabulatedData>,
    pub waller_hartree_incoherent: TabulatedData,
    pub waller_hartree_coherent: TabulatedData,
    pub pair_production: TabulatedData,
    pub triplet_production: TabulatedData,
    /// Photoelectric cross section of each subshell (ENDF designator)
    pub subshell_photoelectric: Vec<(u32, TabulatedData)>,
}

/// Build the photon union grid and set every photon cross section
///
/// The container must already hold the subshell binding energies,
/// occupancies and occupation numbers.
///
/// # Arguments
///
/// * `container` - The output container
/// * `tables` - The tabulated photon processes
/// * `config` - The generator configuration
pub fn set_photon_cross_sections(
    container: &mut ElectronPhotonRelaxationDataContainer,
    tables: &PhotonProcessTables,
    config: &GeneratorConfig,
) -> Result<()> {
    info!("Setting the photon cross section data");

    let min_energy = container.min_photon_energy();
    let max_energy = container.max_photon_energy();

    let heating_numbers: SharedEvaluable = match &tables.heating_numbers {
        Some(table) => Arc::new(table.to_distribution(InterpolationType::LinLog)?),
        None => {
            warn!(
                "the average photon heating numbers are not available from the source tables \
                 and will be set to zero!"
            );
            Arc::new(UniformDistribution::new(min_energy, max_energy, 1.0)?)
        }
    };

    let log_log = InterpolationType::LogLog;
    let incoherent = tables.waller_hartree_incoherent.to_distribution(log_log)?;
    let coherent = tables.waller_hartree_coherent.to_distribution(log_log)?;
    let pair_production = tables.pair_production.to_distribution(log_log)?;
    let triplet_production = tables.triplet_production.to_distribution(log_log)?;

    let photoelectric = tables
        .subshell_photoelectric
        .iter()
        .map(|(subshell, table)| -> Result<(u32, TabularDistribution)> {
            Ok((*subshell, table.to_distribution(log_log)?))
        })
        .collect::<Result<Vec<(u32, TabularDistribution)>>>()?;

    let impulse_approx_incoherent = subshell_incoherent_evaluators(container, config)?;

    // Union grid
    info!("Creating the photon union energy grid");
    let mut builder = UnionGridBuilder::new(
        "photon",
        min_energy,
        max_energy,
        config.photon_grid_generator()?,
    )?;
    builder
        .with_nudge_factor(config.nudge_factor)
        .with_discontinuity_shift(config.discontinuity_shift);

    for &subshell in container.subshells() {
        builder.add_binding_energy(binding_energy(container, subshell)?, true);
    }
    builder.add_threshold(PAIR_PRODUCTION_THRESHOLD);
    builder.add_threshold(TRIPLET_PRODUCTION_THRESHOLD);

    if tables.heating_numbers.is_some() {
        refine_process(&mut builder, "average heating numbers", &*heating_numbers)?;
    }
    refine_process(&mut builder, "Waller-Hartree incoherent cross section", &incoherent)?;
    refine_process(&mut builder, "Waller-Hartree coherent cross section", &coherent)?;
    refine_process(&mut builder, "pair production cross section", &pair_production)?;
    refine_process(&mut builder, "triplet production cross section", &triplet_production)?;

    for (subshell, cross_section) in &photoelectric {
        refine_process(
            &mut builder,
            &format!("subshell {} photoelectric cross section", subshell_name(*subshell)),
            cross_section,
        )?;
    }

    for (subshell, cross_section) in &impulse_approx_incoherent {
        refine_process(
            &mut builder,
            &format!(
                "subshell {} impulse approx. incoherent cross section",
                subshell_name(*subshell)
            ),
            cross_section,
        )?;
    }

    let grid = builder.finalize();
    info!("Photon union energy grid: {} points", grid.len());
    container.set_photon_energy_grid(grid.clone())?;

    // Heating numbers
    let heating = if tables.heating_numbers.is_some() {
        grid.iter()
            .map(|&energy| heating_numbers.evaluate(energy))
            .collect::<std::result::Result<Vec<f64>, _>>()?
    } else {
        vec![0.0; grid.len()]
    };
    container.set_average_photon_heating_numbers(heating)?;

    // Waller-Hartree, pair and triplet
    let incoherent = create_cross_section_on_union_energy_grid(
        &grid,
        &incoherent,
        Threshold::new(0.0, false),
    )?;
    let coherent =
        create_cross_section_on_union_energy_grid(&grid, &coherent, Threshold::new(0.0, false))?;
    let pair_production = create_cross_section_on_union_energy_grid(
        &grid,
        &pair_production,
        Threshold::new(PAIR_PRODUCTION_THRESHOLD, true),
    )?;
    let triplet_production = create_cross_section_on_union_energy_grid(
        &grid,
        &triplet_production,
        Threshold::new(TRIPLET_PRODUCTION_THRESHOLD, true),
    )?;

    // Subshell photoelectric
    let binding_energies = photoelectric
        .iter()
        .map(|(subshell, _)| binding_energy(container, *subshell))
        .collect::<Result<Vec<f64>>>()?;

    let photoelectric = photoelectric
        .par_iter()
        .zip(binding_energies.par_iter())
        .map(|((subshell, cross_section), &binding_energy)| -> Result<(u32, CrossSectionOnGrid)> {
            let resolved = create_cross_section_on_union_energy_grid(
                &grid,
                cross_section,
                Threshold::new(binding_energy, false),
            )?;
            Ok((*subshell, resolved))
        })
        .collect::<Result<Vec<(u32, CrossSectionOnGrid)>>>()?;

    let total_photoelectric = populate_cross_section(
        aggregate(
            grid.len(),
            &photoelectric
                .iter()
                .map(|(_, cross_section)| cross_section.values.as_slice())
                .collect::<Vec<&[f64]>>(),
        )?,
        false,
    );

    // Subshell impulse approximation incoherent
    let impulse_approx_incoherent = impulse_approx_incoherent
        .par_iter()
        .map(|(subshell, cross_section)| -> Result<(u32, CrossSectionOnGrid)> {
            Ok((
                *subshell,
                create_zero_at_threshold_cross_section(&grid, cross_section)?,
            ))
        })
        .collect::<Result<Vec<(u32, CrossSectionOnGrid)>>>()?;

    let total_impulse_approx_incoherent = populate_cross_section(
        aggregate(
            grid.len(),
            &impulse_approx_incoherent
                .iter()
                .map(|(_, cross_section)| cross_section.values.as_slice())
                .collect::<Vec<&[f64]>>(),
        )?,
        true,
    );

    // Totals
    let waller_hartree_total = aggregate(
        grid.len(),
        &[
            incoherent.values.as_slice(),
            coherent.values.as_slice(),
            pair_production.values.as_slice(),
            triplet_production.values.as_slice(),
            total_photoelectric.values.as_slice(),
        ],
    )?;
    let impulse_approx_total = aggregate(
        grid.len(),
        &[
            total_impulse_approx_incoherent.values.as_slice(),
            coherent.values.as_slice(),
            pair_production.values.as_slice(),
            triplet_production.values.as_slice(),
            total_photoelectric.values.as_slice(),
        ],
    )?;

    debug!(
        "Photon thresholds: pair index {}, triplet index {}",
        pair_production.threshold_index, triplet_production.threshold_index
    );

    container.set_photon_cross_section(PhotonCrossSectionType::WallerHartreeIncoherent, incoherent)?;
    container.set_photon_cross_section(PhotonCrossSectionType::WallerHartreeCoherent, coherent)?;
    container.set_photon_cross_section(PhotonCrossSectionType::PairProduction, pair_production)?;
    container
        .set_photon_cross_section(PhotonCrossSectionType::TripletProduction, triplet_production)?;
    container.set_photon_cross_section(
        PhotonCrossSectionType::TotalPhotoelectric,
        total_photoelectric,
    )?;
    container.set_photon_cross_section(
        PhotonCrossSectionType::ImpulseApproxTotalIncoherent,
        total_impulse_approx_incoherent,
    )?;

    for (subshell, cross_section) in photoelectric {
        container.set_subshell_photoelectric_cross_section(subshell, cross_section)?;
    }
    for (subshell, cross_section) in impulse_approx_incoherent {
        container.set_subshell_impulse_approx_incoherent_cross_section(subshell, cross_section)?;
    }

    container.set_waller_hartree_total_cross_section(waller_hartree_total)?;
    container.set_impulse_approx_total_cross_section(impulse_approx_total)?;

    Ok(())
}

/// Refine the union grid over the domain of one process
///
/// The first and last tabulated energies of the process are inserted so
/// that the jumps at the ends of its table fall on grid points.
fn refine_process<E>(builder: &mut UnionGridBuilder, process: &str, cross_section: &E) -> Result<()>
where
    E: Evaluable + ?Sized,
{
    let lower = cross_section.lower_bound();
    let upper = cross_section.upper_bound();

    if lower.is_finite() {
        builder.add_point(lower);
    }
    if upper.is_finite() {
        builder.add_point(upper);
    }
    builder.refine_between(process, cross_section, lower, upper)?;
    Ok(())
}

fn subshell_incoherent_evaluators(
    container: &ElectronPhotonRelaxationDataContainer,
    config: &GeneratorConfig,
) -> Result<Vec<(u32, ImpulseApproxSubshellIncoherentCrossSection)>> {
    container
        .subshells()
        .iter()
        .map(|&subshell| -> Result<(u32, ImpulseApproxSubshellIncoherentCrossSection)> {
            let occupancy = container
                .subshell_occupancy(subshell)
                .ok_or_else(|| missing(subshell, "occupancy"))?;
            let occupation_number = container
                .occupation_number(subshell)
                .ok_or_else(|| missing(subshell, "occupation number"))?;

            let evaluator = ImpulseApproxSubshellIncoherentCrossSection::new(
                binding_energy(container, subshell)?,
                occupancy,
                occupation_number,
                config.subshell_incoherent_evaluation_tolerance,
            )?;
            Ok((subshell, evaluator))
        })
        .collect()
}

fn binding_energy(container: &ElectronPhotonRelaxationDataContainer, subshell: u32) -> Result<f64> {
    container
        .subshell_binding_energy(subshell)
        .ok_or_else(|| missing(subshell, "binding energy"))
}

fn missing(subshell: u32, what: &str) -> GeneratorError {
    GeneratorError::Data(DataError::MissingData(format!(
        "subshell {} has no {}",
        subshell_name(subshell),
        what
    )))
}
