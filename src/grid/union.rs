/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Union energy grid construction
//!
//! A [`UnionGridBuilder`] owns the grid shared by every process of one
//! particle type. Fixed discontinuities are inserted first, then each
//! process refines the accumulating grid in turn. The grid only ever grows.

use super::errors::{GridError, Result};
use super::generator::GridGenerator;
use crate::distribution::Evaluable;
use crate::utils::constants::{DEFAULT_DISCONTINUITY_SHIFT, DEFAULT_NUDGE_FACTOR};
use log::debug;

/// Accumulating union energy grid for one particle type
#[derive(Debug, Clone)]
pub struct UnionGridBuilder {
    particle: String,
    min_energy: f64,
    max_energy: f64,
    nudge_factor: f64,
    discontinuity_shift: f64,
    generator: GridGenerator,
    grid: Vec<f64>,
}

impl UnionGridBuilder {
    /// Start a union grid containing only the domain end points
    ///
    /// # Arguments
    ///
    /// * `particle` - Particle name used in error messages (e.g. "photon")
    /// * `min_energy` - Lower end of the domain
    /// * `max_energy` - Upper end of the domain
    /// * `generator` - Grid generator used to refine the grid
    pub fn new(
        particle: &str,
        min_energy: f64,
        max_energy: f64,
        generator: GridGenerator,
    ) -> Result<Self> {
        if !(min_energy.is_finite() && max_energy.is_finite() && min_energy < max_energy) {
            return Err(GridError::InvalidBounds(format!(
                "the {} union grid requires min energy ({}) < max energy ({})",
                particle, min_energy, max_energy
            )));
        }

        Ok(Self {
            particle: particle.to_string(),
            min_energy,
            max_energy,
            nudge_factor: DEFAULT_NUDGE_FACTOR,
            discontinuity_shift: DEFAULT_DISCONTINUITY_SHIFT,
            generator,
            grid: vec![min_energy, max_energy],
        })
    }

    /// Set the multiplicative nudge applied above discontinuities
    pub fn with_nudge_factor(&mut self, nudge_factor: f64) -> &mut Self {
        self.nudge_factor = nudge_factor;
        self
    }

    /// Set the shift placed below binding energies
    pub fn with_discontinuity_shift(&mut self, shift: f64) -> &mut Self {
        self.discontinuity_shift = shift;
        self
    }

    pub fn particle(&self) -> &str {
        &self.particle
    }

    pub fn min_energy(&self) -> f64 {
        self.min_energy
    }

    pub fn max_energy(&self) -> f64 {
        self.max_energy
    }

    pub fn nudge_factor(&self) -> f64 {
        self.nudge_factor
    }

    pub fn discontinuity_shift(&self) -> f64 {
        self.discontinuity_shift
    }

    pub fn generator(&self) -> &GridGenerator {
        &self.generator
    }

    /// Read-only view of the current grid
    pub fn grid(&self) -> &[f64] {
        &self.grid
    }

    /// Insert a point if it lies strictly inside the domain
    ///
    /// Returns whether the grid changed.
    pub fn add_point(&mut self, energy: f64) -> bool {
        if !(energy > self.min_energy && energy < self.max_energy) {
            return false;
        }

        match self.grid.binary_search_by(|point| point.total_cmp(&energy)) {
            Ok(_) => false,
            Err(index) => {
                self.grid.insert(index, energy);
                true
            }
        }
    }

    /// Insert a threshold and its nudged neighbour
    pub fn add_threshold(&mut self, energy: f64) {
        self.add_point(energy);
        self.add_point(energy * self.nudge_factor);
    }

    /// Insert a binding energy together with the point just below it
    ///
    /// When `add_nudged` is set the nudged point above the binding energy is
    /// inserted as well.
    pub fn add_binding_energy(&mut self, energy: f64, add_nudged: bool) {
        self.add_point(energy - self.discontinuity_shift);
        self.add_point(energy);

        if add_nudged {
            self.add_point(energy * self.nudge_factor);
        }
    }

    /// Merge an external grid, keeping only the points inside the domain
    pub fn merge(&mut self, points: &[f64]) {
        let before = self.grid.len();

        self.grid.extend(
            points
                .iter()
                .copied()
                .filter(|&x| x >= self.min_energy && x <= self.max_energy),
        );
        self.grid.sort_by(|a, b| a.total_cmp(b));
        self.grid.dedup();

        debug!(
            "Merged {} points into the {} union grid ({} new)",
            points.len(),
            self.particle,
            self.grid.len() - before
        );
    }

    /// Refine the whole union grid for a process
    pub fn refine<E>(&mut self, process: &str, f: &E) -> Result<()>
    where
        E: Evaluable + ?Sized,
    {
        let before = self.grid.len();

        self.generator
            .generate_in_place(&mut self.grid, f)
            .map_err(|source| self.process_error(process, source))?;

        debug!(
            "{} union grid: {} points after the {} ({} added)",
            self.particle,
            self.grid.len(),
            process,
            self.grid.len() - before
        );
        Ok(())
    }

    /// Refine the union grid for a process inside `[lower, upper]` only
    pub fn refine_between<E>(&mut self, process: &str, f: &E, lower: f64, upper: f64) -> Result<()>
    where
        E: Evaluable + ?Sized,
    {
        let before = self.grid.len();

        self.generator
            .refine_in_place(&mut self.grid, f, lower, upper)
            .map_err(|source| self.process_error(process, source))?;

        debug!(
            "{} union grid: {} points after the {} on [{:e}, {:e}] ({} added)",
            self.particle,
            self.grid.len(),
            process,
            lower,
            upper,
            self.grid.len() - before
        );
        Ok(())
    }

    /// Finish the union grid
    pub fn finalize(mut self) -> Vec<f64> {
        let (min, max) = (self.min_energy, self.max_energy);
        self.grid.retain(|&x| x >= min && x <= max);
        self.grid.sort_by(|a, b| a.total_cmp(b));
        self.grid.dedup();
        self.grid
    }

    fn process_error(&self, process: &str, source: GridError) -> GridError {
        GridError::ProcessGridGeneration {
            particle: self.particle.clone(),
            process: process.to_string(),
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::DirtyConvergencePolicy;

    fn builder() -> UnionGridBuilder {
        let generator = GridGenerator::new(1e-3, 1e-42, 1e-16).unwrap();
        UnionGridBuilder::new("photon", 1e-3, 20.0, generator).unwrap()
    }

    #[test]
    fn test_invalid_domain() {
        assert!(UnionGridBuilder::new("photon", 1.0, 1.0, GridGenerator::default()).is_err());
        assert!(UnionGridBuilder::new("photon", 2.0, 1.0, GridGenerator::default()).is_err());
    }

    #[test]
    fn test_add_point_inside_domain_only() {
        let mut union = builder();
        assert!(union.add_point(1.0));
        assert!(!union.add_point(1.0));
        assert!(!union.add_point(1e-3));
        assert!(!union.add_point(25.0));
        assert_eq!(union.grid(), &[1e-3, 1.0, 20.0]);
    }

    #[test]
    fn test_thresholds_and_binding_energies() {
        let mut union = builder();
        union.add_threshold(1.022);
        union.add_binding_energy(0.1, true);
        union.add_binding_energy(50.0, true);

        let grid = union.grid().to_vec();
        assert_eq!(grid.len(), 7);
        assert!(grid.contains(&1.022));
        assert!(grid.contains(&(1.022 * DEFAULT_NUDGE_FACTOR)));
        assert!(grid.contains(&(0.1 - DEFAULT_DISCONTINUITY_SHIFT)));
        assert!(grid.contains(&0.1));
        assert!(grid.contains(&(0.1 * DEFAULT_NUDGE_FACTOR)));
        assert!(grid.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_merge_trims_and_deduplicates() {
        let mut union = builder();
        union.merge(&[1e-4, 1e-3, 0.5, 0.5, 2.0, 30.0]);
        assert_eq!(union.grid(), &[1e-3, 0.5, 2.0, 20.0]);
    }

    #[test]
    fn test_refinement_grows_monotonically() {
        let mut union = builder();
        union.add_threshold(1.022);

        let mut previous = union.grid().to_vec();
        let processes: Vec<Box<dyn Fn(f64) -> f64>> = vec![
            Box::new(|x: f64| 1.0 / x),
            Box::new(|x: f64| x.sqrt()),
            Box::new(|x: f64| (x + 1.0).ln()),
        ];

        for (i, process) in processes.iter().enumerate() {
            union.refine(&format!("process {}", i), process.as_ref()).unwrap();
            let current = union.grid().to_vec();
            assert!(previous.iter().all(|x| current.contains(x)));
            assert!(current.windows(2).all(|w| w[0] < w[1]));
            previous = current;
        }

        let grid = union.finalize();
        assert_eq!(grid[0], 1e-3);
        assert_eq!(*grid.last().unwrap(), 20.0);
    }

    #[test]
    fn test_refine_between_keeps_outside_points() {
        let mut union = builder();
        union.merge(&[0.01, 0.1, 1.0, 10.0]);
        union
            .refine_between("excitation", &|x: f64| x.ln().sin(), 0.1, 1.0)
            .unwrap();

        let grid = union.grid();
        assert!(grid.iter().filter(|&&x| x > 0.1 && x < 1.0).count() > 0);
        assert_eq!(grid.iter().filter(|&&x| x < 0.1).count(), 2);
        assert_eq!(grid.iter().filter(|&&x| x > 1.0).count(), 2);
    }

    #[test]
    fn test_process_error_names_the_process() {
        let mut generator = GridGenerator::new(1e-3, 0.0, 1e-6).unwrap();
        generator.with_dirty_convergence_policy(DirtyConvergencePolicy::Error);
        let mut union = UnionGridBuilder::new("photon", 1e-3, 20.0, generator).unwrap();

        let error = union
            .refine("subshell K photoelectric cross section", &|x: f64| {
                if x < 0.5 {
                    0.0
                } else {
                    1.0
                }
            })
            .unwrap_err();

        assert_eq!(
            error.to_string(),
            "Could not generate an optimized photon energy grid for the subshell K photoelectric \
             cross section with the provided convergence parameters!"
        );
    }
}
