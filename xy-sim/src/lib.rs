pub mod clusters;
pub mod config;
pub mod error;
pub mod geometry;
pub mod simulation;
pub mod spins;
pub mod statistics;

pub use clusters::{wolff_update, ClusterBuffers, WolffStep};
pub use error::{Result, SimError};
pub use geometry::SquareLattice;
pub use simulation::{initial_spins, run_sampling, run_temperature_sweep, Realization};
pub use spins::{spin_correlation, SpinField};
pub use statistics::{CorrelationSeries, SweepResult};
