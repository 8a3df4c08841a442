/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Subshell and atomic relaxation data
//!
//! Fills the subshell set, occupancies, binding energies and relaxation
//! transitions of the output container from either the ENDL (EADL) tables
//! or the ACE SUBSH/RELO/XPROB blocks.

use super::errors::{GeneratorError, Result};
use crate::data::{
    subshell_name, AceEprTable, EndlDataContainer, ElectronPhotonRelaxationDataContainer,
    SubshellRelaxationData,
};
use crate::data::DataError;
use log::debug;
use std::collections::BTreeSet;

/// Set the subshell and relaxation data from the ENDL tables
///
/// A vacancy filled radiatively must also have non-radiative transitions
/// and vice versa. Radiative transitions leave a single vacancy in the
/// filling subshell, recorded as `(filling, 0)`.
///
/// # Arguments
///
/// * `container` - The output container
/// * `endl` - The ENDL source tables
pub fn set_endl_relaxation_data(
    container: &mut ElectronPhotonRelaxationDataContainer,
    endl: &EndlDataContainer,
) -> Result<()> {
    container.set_subshells(endl.subshells.clone())?;

    for &subshell in &endl.subshells {
        container.set_subshell_occupancy(subshell, endl.subshell_occupancy(subshell)?)?;
        container.set_subshell_binding_energy(subshell, endl.subshell_binding_energy(subshell)?)?;

        let radiative = endl
            .radiative_transition_probabilities
            .get(&subshell)
            .filter(|transitions| !transitions.is_empty());
        let nonradiative = endl
            .nonradiative_transition_probabilities
            .get(&subshell)
            .filter(|transitions| !transitions.is_empty());

        let (radiative, nonradiative) = match (radiative, nonradiative) {
            (None, None) => continue,
            (Some(_), None) => {
                return Err(GeneratorError::MissingTransitionData(
                    "There are radiative transitions and not non-radiative transitions!"
                        .to_string(),
                ))
            }
            (None, Some(_)) => {
                return Err(GeneratorError::MissingTransitionData(
                    "There are non-radiative transitions and not radiative transitions!"
                        .to_string(),
                ))
            }
            (Some(radiative), Some(nonradiative)) => (radiative, nonradiative),
        };

        let mut data = SubshellRelaxationData::default();

        for (&filling, &probability) in radiative {
            let energy = endl
                .radiative_transition_energies
                .get(&subshell)
                .and_then(|energies| energies.get(&filling))
                .copied()
                .ok_or_else(|| missing_energy(subshell, filling, None))?;

            data.vacancies.push((filling, 0));
            data.particle_energies.push(energy);
            data.probabilities.push(probability);
        }

        for (&filling, emitting_probabilities) in nonradiative {
            for (&emitting, &probability) in emitting_probabilities {
                let energy = endl
                    .nonradiative_transition_energies
                    .get(&subshell)
                    .and_then(|energies| energies.get(&filling))
                    .and_then(|energies| energies.get(&emitting))
                    .copied()
                    .ok_or_else(|| missing_energy(subshell, filling, Some(emitting)))?;

                data.vacancies.push((filling, emitting));
                data.particle_energies.push(energy);
                data.probabilities.push(probability);
            }
        }

        debug!(
            "Subshell {}: {} relaxation transitions",
            subshell_name(subshell),
            data.number_of_transitions()
        );
        container.set_subshell_relaxation_data(subshell, data)?;
    }

    Ok(())
}

/// Set the subshell and relaxation data from an ACE table
///
/// The XPROB block stores a cumulative distribution over the transitions of
/// each vacancy; it is converted back to per-transition probabilities.
pub fn set_ace_relaxation_data(
    container: &mut ElectronPhotonRelaxationDataContainer,
    ace: &AceEprTable,
) -> Result<()> {
    let designators = ace.extract_subshell_endf_designators()?;
    let occupancies = ace.extract_subshell_occupancies()?;
    let binding_energies = ace.extract_subshell_binding_energies()?;

    container.set_subshells(designators.iter().copied().collect::<BTreeSet<u32>>())?;

    for (index, &subshell) in designators.iter().enumerate() {
        container.set_subshell_occupancy(subshell, occupancies[index])?;
        container.set_subshell_binding_energy(subshell, binding_energies[index])?;

        let transitions = ace.extract_subshell_transitions(index)?;
        if transitions.is_empty() {
            continue;
        }

        let mut data = SubshellRelaxationData::default();
        let mut previous_cdf = 0.0;

        for transition in &transitions {
            data.vacancies.push((transition.primary, transition.secondary));
            data.particle_energies.push(transition.energy);
            data.probabilities.push(transition.cdf - previous_cdf);
            previous_cdf = transition.cdf;
        }

        debug!(
            "Subshell {}: {} relaxation transitions",
            subshell_name(subshell),
            data.number_of_transitions()
        );
        container.set_subshell_relaxation_data(subshell, data)?;
    }

    Ok(())
}

fn missing_energy(vacancy: u32, filling: u32, emitting: Option<u32>) -> GeneratorError {
    let message = match emitting {
        None => format!(
            "There is no radiative transition energy for vacancy {} transitioning to {}!",
            subshell_name(vacancy),
            subshell_name(filling)
        ),
        Some(emitting) => format!(
            "There are no non-radiative transition energies for vacancy {} transitioning to {} and {}!",
            subshell_name(vacancy),
            subshell_name(filling),
            subshell_name(emitting)
        ),
    };

    GeneratorError::Data(DataError::MissingData(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::BTreeMap;

    fn endl_with_k_shell() -> EndlDataContainer {
        let mut endl = EndlDataContainer {
            atomic_number: 8,
            ..Default::default()
        };
        endl.subshells = [1, 3].into_iter().collect();
        endl.subshell_occupancies = [(1, 2.0), (3, 2.0)].into_iter().collect();
        endl.subshell_binding_energies = [(1, 5.3e-4), (3, 2.4e-5)].into_iter().collect();
        endl
    }

    #[test]
    fn test_endl_relaxation() {
        let mut endl = endl_with_k_shell();
        endl.radiative_transition_probabilities
            .insert(1, [(3, 0.01)].into_iter().collect());
        endl.radiative_transition_energies
            .insert(1, [(3, 5.0e-4)].into_iter().collect());
        endl.nonradiative_transition_probabilities.insert(
            1,
            [(3, [(3, 0.99)].into_iter().collect::<BTreeMap<u32, f64>>())]
                .into_iter()
                .collect(),
        );
        endl.nonradiative_transition_energies.insert(
            1,
            [(3, [(3, 4.8e-4)].into_iter().collect::<BTreeMap<u32, f64>>())]
                .into_iter()
                .collect(),
        );

        let mut container = ElectronPhotonRelaxationDataContainer::new();
        set_endl_relaxation_data(&mut container, &endl).unwrap();

        assert_eq!(container.subshells().len(), 2);
        assert_relative_eq!(container.subshell_binding_energy(1).unwrap(), 5.3e-4);

        let data = container.subshell_relaxation_data(1).unwrap();
        assert_eq!(data.vacancies, vec![(3, 0), (3, 3)]);
        assert_relative_eq!(data.particle_energies[1], 4.8e-4);
        assert_relative_eq!(data.probabilities[0], 0.01);
        assert!(container.subshell_relaxation_data(3).is_none());
    }

    #[test]
    fn test_endl_radiative_without_nonradiative() {
        let mut endl = endl_with_k_shell();
        endl.radiative_transition_probabilities
            .insert(1, [(3, 1.0)].into_iter().collect());
        endl.radiative_transition_energies
            .insert(1, [(3, 5.0e-4)].into_iter().collect());

        let mut container = ElectronPhotonRelaxationDataContainer::new();
        let error = set_endl_relaxation_data(&mut container, &endl).unwrap_err();
        assert!(error
            .to_string()
            .contains("There are radiative transitions and not non-radiative transitions!"));
    }

    #[test]
    fn test_endl_missing_transition_energy() {
        let mut endl = endl_with_k_shell();
        endl.radiative_transition_probabilities
            .insert(1, [(3, 0.5)].into_iter().collect());
        endl.nonradiative_transition_probabilities.insert(
            1,
            [(3, [(3, 0.5)].into_iter().collect::<BTreeMap<u32, f64>>())]
                .into_iter()
                .collect(),
        );

        let mut container = ElectronPhotonRelaxationDataContainer::new();
        assert!(set_endl_relaxation_data(&mut container, &endl).is_err());
    }

    #[test]
    fn test_ace_relaxation_cdf_to_pdf() {
        let ace = AceEprTable {
            atomic_number: 8,
            // designators, occupancies, binding energies, interaction probabilities, transitions
            subsh_block: vec![1.0, 3.0, 2.0, 2.0, 5.3e-4, 2.4e-5, 0.5, 0.5, 2.0, 0.0],
            relo_block: vec![0.0, 8.0],
            xprob_block: vec![3.0, 0.0, 5.0e-4, 0.25, 3.0, 3.0, 4.8e-4, 1.0],
            ..Default::default()
        };

        let mut container = ElectronPhotonRelaxationDataContainer::new();
        set_ace_relaxation_data(&mut container, &ace).unwrap();

        let data = container.subshell_relaxation_data(1).unwrap();
        assert_eq!(data.vacancies, vec![(3, 0), (3, 3)]);
        assert_relative_eq!(data.probabilities[0], 0.25);
        assert_relative_eq!(data.probabilities[1], 0.75);
        assert!(container.subshell_relaxation_data(3).is_none());
        assert_relative_eq!(container.subshell_occupancy(3).unwrap(), 2.0);
    }
}
