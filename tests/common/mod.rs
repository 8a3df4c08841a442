/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Synthetic hydrogen-like source tables shared by the integration tests

#![allow(dead_code)]

use epr_gen::data::{AceEprTable, EndlDataContainer, SecondaryDistributionTable, TabulatedData};
use epr_gen::generator::GeneratorConfig;
use epr_gen::grid::GridConvergenceParameters;
use epr_gen::utils::constants::{PAIR_PRODUCTION_THRESHOLD, TRIPLET_PRODUCTION_THRESHOLD};
use std::collections::{BTreeMap, BTreeSet};
use std::f64::consts::PI;

pub const K_SHELL: u32 = 1;
pub const K_BINDING_ENERGY: f64 = 1.361e-5;

/// Logarithmically spaced points with exact endpoints
pub fn log_grid(start: f64, end: f64, n: usize) -> Vec<f64> {
    let step = (end / start).ln() / (n - 1) as f64;
    let mut grid: Vec<f64> = (0..n).map(|i| start * (step * i as f64).exp()).collect();
    grid[0] = start;
    grid[n - 1] = end;
    grid
}

fn table<F: Fn(f64) -> f64>(grid: Vec<f64>, f: F) -> TabulatedData {
    let values = grid.iter().map(|&x| f(x)).collect();
    TabulatedData::new(grid, values)
}

/// Hydrogen 1s Compton profile in atomic units
pub fn hydrogen_half_compton_profile() -> TabulatedData {
    let momentum: Vec<f64> = std::iter::once(0.0)
        .chain(log_grid(1e-2, 100.0, 60))
        .collect();
    table(momentum, |p| 8.0 / (3.0 * PI * (1.0 + p * p).powi(3)))
}

/// Form factor against recoil momentum in inverse cm
pub fn form_factor() -> TabulatedData {
    let momentum: Vec<f64> = std::iter::once(0.0)
        .chain(log_grid(1e6, 1e10, 40))
        .collect();
    table(momentum, |q| (1.0 + (q / 1e8).powi(2)).powi(-2))
}

/// Incoherent scattering function S = 1 - F^2
pub fn scattering_function() -> TabulatedData {
    let form_factor = form_factor();
    let values = form_factor.values.iter().map(|f| 1.0 - f * f).collect();
    TabulatedData::new(form_factor.grid, values)
}

pub fn incoherent(energy: f64) -> f64 {
    0.6 * energy / (1e-3 + energy) / (1.0 + energy)
}

pub fn coherent(energy: f64) -> f64 {
    1e-4 / (1e-4 + energy * energy)
}

pub fn pair_production(energy: f64) -> f64 {
    1e-3 * (energy / PAIR_PRODUCTION_THRESHOLD).ln().max(1e-3)
}

pub fn triplet_production(energy: f64) -> f64 {
    1e-4 * (energy / TRIPLET_PRODUCTION_THRESHOLD).ln().max(1e-3)
}

pub fn photoelectric(energy: f64) -> f64 {
    6e-3 * (K_BINDING_ENERGY / energy).powf(3.0)
}

/// ENDL tables of a hydrogen-like atom
pub fn hydrogen_endl() -> EndlDataContainer {
    let photon_grid = log_grid(1e-6, 1e5, 80);
    let elastic_grid = log_grid(1e-5, 1e5, 60);

    let cutoff_elastic: Vec<f64> = elastic_grid.iter().map(|e| 1e8 / (1.0 + e * 1e3)).collect();
    // Total and cutoff elastic agree at the lowest energies
    let total_elastic: Vec<f64> = elastic_grid
        .iter()
        .zip(cutoff_elastic.iter())
        .map(|(&e, &cutoff)| if e < 1e-4 { cutoff } else { cutoff * (1.0 + e.sqrt()) })
        .collect();

    EndlDataContainer {
        atomic_number: 1,
        atomic_weight: 1.00794,
        subshells: BTreeSet::from([K_SHELL]),
        subshell_occupancies: BTreeMap::from([(K_SHELL, 1.0)]),
        subshell_binding_energies: BTreeMap::from([(K_SHELL, K_BINDING_ENERGY)]),
        coherent_cross_section: table(photon_grid.clone(), coherent),
        incoherent_cross_section: table(photon_grid.clone(), incoherent),
        form_factor: form_factor(),
        scattering_function: scattering_function(),
        pair_production_cross_section: table(log_grid(1.03, 1e5, 30), pair_production),
        triplet_production_cross_section: table(log_grid(2.1, 1e5, 30), triplet_production),
        photoelectric_cross_sections: BTreeMap::from([(
            K_SHELL,
            table(log_grid(K_BINDING_ENERGY, 1e5, 50), photoelectric),
        )]),
        compton_profiles: BTreeMap::from([(K_SHELL, hydrogen_half_compton_profile())]),
        elastic_energy_grid: elastic_grid,
        cutoff_elastic_cross_section: cutoff_elastic,
        total_elastic_cross_section: total_elastic,
        electroionization_cross_sections: BTreeMap::from([(
            K_SHELL,
            table(log_grid(K_BINDING_ENERGY, 1e5, 40), |e| {
                1e7 * (e / K_BINDING_ENERGY).ln().max(1e-3) / e.max(1e-4) * 1e-4
            }),
        )]),
        bremsstrahlung_cross_section: table(log_grid(1e-5, 1e5, 30), |e| 10.0 + e.ln().abs()),
        atomic_excitation_cross_section: table(log_grid(2e-5, 1e5, 30), |e| 1e7 / (1.0 + e * 1e4)),
        cutoff_elastic_angular_distributions: cutoff_elastic_angular_distributions(),
        bremsstrahlung_photon_distributions: bremsstrahlung_photon_distributions(),
        electroionization_recoil_distributions: BTreeMap::from([(
            K_SHELL,
            electroionization_recoil_distributions(),
        )]),
        atomic_excitation_energy_loss: table(log_grid(2e-5, 1e5, 10), |e| {
            1.5e-5 * (1.0 + 0.01 * (e / 2e-5).ln())
        }),
        ..Default::default()
    }
}

pub const ANGULAR_ENERGY_GRID: [f64; 5] = [1e-5, 1e-3, 1.0, 1e4, 1e5];

/// Cutoff elastic angle cosines peaked forward at higher energies
fn cutoff_elastic_angular_distributions() -> SecondaryDistributionTable {
    let angles = vec![-1.0, 0.0, 0.9, 0.999999];
    let pdfs = ANGULAR_ENERGY_GRID
        .iter()
        .map(|&e| {
            let forward = 1.0 + e.log10().max(0.0);
            vec![0.1, 0.3, 2.0 * forward, 5.0 * forward]
        })
        .collect();

    SecondaryDistributionTable::new(
        ANGULAR_ENERGY_GRID.to_vec(),
        vec![angles; ANGULAR_ENERGY_GRID.len()],
        pdfs,
    )
}

/// Bremsstrahlung photon energies up to the incoming electron energy
fn bremsstrahlung_photon_distributions() -> SecondaryDistributionTable {
    let energies = vec![1e-5, 1e-2, 10.0, 1e5];
    let photon_energies: Vec<Vec<f64>> = energies.iter().map(|&e| log_grid(1e-7, e, 5)).collect();
    let pdfs = photon_energies
        .iter()
        .map(|k| k.iter().map(|&k| 1.0 / k).collect())
        .collect();

    SecondaryDistributionTable::new(energies, photon_energies, pdfs)
}

/// Electroionization recoil energies up to half the available energy
fn electroionization_recoil_distributions() -> SecondaryDistributionTable {
    let energies = vec![2.0 * K_BINDING_ENERGY, 1e-3, 1.0, 1e5];
    let recoil_energies: Vec<Vec<f64>> = energies
        .iter()
        .map(|&e| log_grid(1e-8, 0.5 * (e - K_BINDING_ENERGY), 5))
        .collect();
    let pdfs = recoil_energies
        .iter()
        .map(|w| w.iter().map(|&w| 1.0 / (w * w)).collect())
        .collect();

    SecondaryDistributionTable::new(energies, recoil_energies, pdfs)
}

fn ln(values: impl IntoIterator<Item = f64>) -> Vec<f64> {
    values.into_iter().map(f64::ln).collect()
}

/// Natural log of a cross section, zero below its threshold
fn ln_above(grid: &[f64], threshold: f64, f: fn(f64) -> f64) -> Vec<f64> {
    grid.iter()
        .map(|&e| if e < threshold { 0.0 } else { f(e).ln() })
        .collect()
}

/// ACE table of the same hydrogen-like atom
pub fn hydrogen_ace() -> AceEprTable {
    let grid = log_grid(1e-6, 1e5, 80);

    let mut eszg = ln(grid.iter().copied());
    eszg.extend(ln(grid.iter().map(|&e| incoherent(e))));
    eszg.extend(ln(grid.iter().map(|&e| coherent(e))));
    eszg.extend(ln_above(&grid, K_BINDING_ENERGY, photoelectric));
    eszg.extend(ln_above(&grid, 1.03, pair_production));

    // Recoil momenta are stored in inverse Angstroms
    let form_factor = form_factor();
    let scattering_function = scattering_function();
    let momentum: Vec<f64> = form_factor.grid.iter().map(|q| q * 1e-8).collect();

    let mut jince = momentum.clone();
    jince.extend(scattering_function.values.iter().copied());

    let mut jcohe = momentum.clone();
    jcohe.extend(form_factor.values.iter().map(|f| f * f));
    jcohe.extend(form_factor.values.iter().copied());

    let profile = hydrogen_half_compton_profile();
    let mut swd = vec![2.0, profile.len() as f64];
    swd.extend(profile.grid.iter().copied());
    swd.extend(profile.values.iter().copied());
    swd.extend(std::iter::repeat(1.0).take(profile.len()));

    AceEprTable {
        table_name: "1000.12p".to_string(),
        atomic_number: 1,
        eszg_block: eszg,
        jince_block: jince,
        jcohe_block: jcohe,
        lhnm_block: grid.iter().map(|&e| 0.5 * e).collect(),
        subsh_block: vec![K_SHELL as f64, 1.0, K_BINDING_ENERGY, 1.0, 0.0],
        lswd_block: vec![0.0],
        swd_block: swd,
        sphel_block: ln_above(&grid, K_BINDING_ENERGY, photoelectric),
        relo_block: vec![0.0],
        xprob_block: Vec::new(),
    }
}

/// Looser tolerances and narrower limits so that the generators run quickly
pub fn fast_config() -> GeneratorConfig {
    let parameters = GridConvergenceParameters {
        convergence_tolerance: 1e-2,
        absolute_difference_tolerance: 1e-42,
        distance_tolerance: 1e-14,
    };

    let mut config = GeneratorConfig::new();
    config
        .with_photon_energy_limits(1e-3, 20.0)
        .with_electron_energy_limits(1e-5, 1e3)
        .with_photon_grid(parameters)
        .with_electron_grid(parameters)
        .with_subshell_incoherent_evaluation_tolerance(1e-2);
    config
}
