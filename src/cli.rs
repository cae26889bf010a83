use std::path::PathBuf;

use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};

/// Wolff cluster Monte Carlo for the 2D XY model
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Lattice side length
    #[arg(short = 'n', long, default_value_t = 50, global = true)]
    pub size: usize,

    /// Base seed; the initial field uses it, temperature k uses seed + 1 + k
    #[arg(short, long, default_value_t = 42, global = true)]
    pub seed: u64,

    /// Write the JSON report here instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Accept the initial field once |correlation| is below this
    #[arg(long, default_value_t = 0.05, global = true)]
    pub init_threshold: f64,

    /// Give up on the initial field after this many draws
    #[arg(long, default_value_t = 10_000, global = true)]
    pub init_attempts: usize,

    /// Hide the progress bar
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Spin correlation against Monte Carlo step for a few temperatures
    Series {
        /// Temperatures in units of J/k_B (default 0.5,1.0,1.5,2.0)
        #[arg(short, long, value_delimiter = ',')]
        temperatures: Vec<f64>,

        /// Number of cluster updates per temperature
        #[arg(long, default_value_t = 1500)]
        steps: usize,

        /// Sample every this many steps
        #[arg(long, default_value_t = 10)]
        interval: usize,

        /// Reference level from the last this many samples
        #[arg(long, default_value_t = 20)]
        tail: usize,

        /// Largest lag of the autocorrelation of each series
        #[arg(long)]
        max_lag: Option<usize>,
    },

    /// Equilibrium spin correlation against temperature
    Sweep {
        /// Temperatures in units of J/k_B (default: 0.4 .. 1.4 around T_BKT)
        #[arg(short, long, value_delimiter = ',')]
        temperatures: Vec<f64>,

        /// Number of cluster updates per temperature
        #[arg(long, default_value_t = 1000)]
        steps: usize,

        /// Number of samples at the end of each run
        #[arg(long, default_value_t = 10, value_parser = at_least_one())]
        window: usize,

        /// Spacing of the end-of-run samples
        #[arg(long, default_value_t = 10, value_parser = at_least_one())]
        spacing: usize,

        /// Record running averages at log-spaced steps
        #[arg(long)]
        equilibration: bool,
    },

    /// Final spin configuration at one temperature
    Snapshot {
        /// Temperature in units of J/k_B
        #[arg(short, long, default_value_t = 1.0)]
        temperature: f64,

        /// Number of cluster updates
        #[arg(long, default_value_t = 1000)]
        steps: usize,
    },
}

fn at_least_one() -> RangedU64ValueParser<usize> {
    RangedU64ValueParser::new().range(1..)
}
