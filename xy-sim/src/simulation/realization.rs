use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

use crate::clusters::{wolff_update, ClusterBuffers, WolffStep};
use crate::config::SimConfig;
use crate::error::{check_temperature, Result};
use crate::geometry::SquareLattice;
use crate::spins::SpinField;
use crate::statistics::CorrelationSeries;

use super::run_sampling;

/// Mutable state of one fixed-temperature run.
///
/// Owns its copy of the spin field, its own PRNG and the cluster scratch
/// buffers, so runs at different temperatures never share state.
pub struct Realization {
    pub temperature: f64,
    pub spins: SpinField,
    pub rng: Xoshiro256StarStar,
    buffers: ClusterBuffers,
}

impl Realization {
    /// Clone `initial` and seed the PRNG with `seed`.
    pub fn new(initial: &SpinField, temperature: f64, seed: u64) -> Result<Self> {
        check_temperature(temperature)?;
        let n = initial.n();
        Ok(Self {
            temperature,
            spins: initial.clone(),
            rng: Xoshiro256StarStar::seed_from_u64(seed),
            buffers: ClusterBuffers::new(n * n),
        })
    }

    /// One Wolff update of the owned field.
    pub fn step(&mut self, lattice: &SquareLattice) -> Result<WolffStep> {
        wolff_update(
            lattice,
            &mut self.spins,
            self.temperature,
            &mut self.rng,
            &mut self.buffers,
        )
    }

    /// Run a full sampling schedule on the owned field.
    pub fn run(
        &mut self,
        lattice: &SquareLattice,
        config: &SimConfig,
        on_step: &dyn Fn(usize),
    ) -> Result<CorrelationSeries> {
        run_sampling(
            lattice,
            &mut self.spins,
            self.temperature,
            config,
            &mut self.rng,
            on_step,
        )
    }

    /// Restore the starting field and reseed.
    pub fn reset(&mut self, initial: &SpinField, seed: u64) {
        self.spins.clone_from(initial);
        self.rng = Xoshiro256StarStar::seed_from_u64(seed);
    }
}
