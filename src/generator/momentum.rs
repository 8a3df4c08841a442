/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Momentum tables: Compton profiles, occupation numbers, scattering
//! function and atomic form factors

use super::errors::{GeneratorError, Result};
use crate::data::{
    subshell_name, DataError, ElectronPhotonRelaxationDataContainer, TabulatedData,
};
use crate::evaluators::{
    generate_optimized_compton_profile, generate_optimized_form_factor,
    generate_optimized_occupation_number, generate_optimized_scattering_function,
    generate_optimized_squared_form_factor, EvaluatorError,
};
use crate::grid::GridGenerator;
use log::{debug, info};

/// Set the optimized Compton profiles of every subshell
///
/// # Arguments
///
/// * `container` - The output container (subshells must already be set)
/// * `generator` - Grid generator for the momentum grids
/// * `half_profile` - Returns the half Compton profile of a subshell
pub fn set_compton_profiles<F>(
    container: &mut ElectronPhotonRelaxationDataContainer,
    generator: &GridGenerator,
    mut half_profile: F,
) -> Result<()>
where
    F: FnMut(u32) -> Result<TabulatedData>,
{
    info!("Setting the Compton profiles");

    let subshells: Vec<u32> = container.subshells().iter().copied().collect();
    for subshell in subshells {
        let half = half_profile(subshell)?;
        let profile = generate_optimized_compton_profile(generator, &half).map_err(|source| {
            optimized_grid_error(
                format!(
                    "Compton profile momentum grid for the {} subshell",
                    subshell_name(subshell)
                ),
                source,
            )
        })?;

        debug!(
            "Subshell {} Compton profile: {} momentum points",
            subshell_name(subshell),
            profile.len()
        );
        container.set_compton_profile(subshell, profile)?;
    }

    Ok(())
}

/// Set the optimized occupation number of every subshell from its Compton
/// profile
pub fn set_occupation_numbers(
    container: &mut ElectronPhotonRelaxationDataContainer,
    generator: &GridGenerator,
) -> Result<()> {
    info!("Setting the occupation numbers");

    let subshells: Vec<u32> = container.subshells().iter().copied().collect();
    for subshell in subshells {
        let profile = container.compton_profile(subshell).cloned().ok_or_else(|| {
            GeneratorError::Data(DataError::MissingData(format!(
                "subshell {} has no Compton profile",
                subshell_name(subshell)
            )))
        })?;

        let occupation = generate_optimized_occupation_number(generator, &profile).map_err(
            |source| {
                optimized_grid_error(
                    format!(
                        "occupation number momentum grid for the {} subshell",
                        subshell_name(subshell)
                    ),
                    source,
                )
            },
        )?;

        container.set_occupation_number(subshell, occupation)?;
    }

    Ok(())
}

/// Set the Waller-Hartree scattering function
pub fn set_waller_hartree_scattering_function(
    container: &mut ElectronPhotonRelaxationDataContainer,
    generator: &GridGenerator,
    raw: &TabulatedData,
) -> Result<()> {
    info!("Setting the Waller-Hartree scattering function");

    let scattering_function = generate_optimized_scattering_function(generator, raw)
        .map_err(|source| optimized_grid_error("scattering function recoil momentum grid", source))?;

    container.set_waller_hartree_scattering_function(scattering_function)?;
    Ok(())
}

/// Set the Waller-Hartree atomic form factor and squared atomic form factor
pub fn set_waller_hartree_form_factors(
    container: &mut ElectronPhotonRelaxationDataContainer,
    generator: &GridGenerator,
    raw: &TabulatedData,
) -> Result<()> {
    info!("Setting the Waller-Hartree atomic form factor");

    let form_factor = generate_optimized_form_factor(generator, raw)
        .map_err(|source| optimized_grid_error("form factor recoil momentum grid", source))?;

    let squared_form_factor = generate_optimized_squared_form_factor(generator, raw).map_err(
        |source| optimized_grid_error("squared form factor squared recoil momentum grid", source),
    )?;

    container.set_waller_hartree_atomic_form_factor(form_factor)?;
    container.set_waller_hartree_squared_atomic_form_factor(squared_form_factor)?;
    Ok(())
}

fn optimized_grid_error(description: impl Into<String>, source: EvaluatorError) -> GeneratorError {
    GeneratorError::OptimizedGrid {
        description: description.into(),
        source,
    }
}
