use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use xy_sim::{CorrelationSeries, SweepResult};

/// Series and sweep output: one entry per temperature.
#[derive(Serialize)]
pub struct SweepReport<'a> {
    pub mode: &'static str,
    pub size: usize,
    pub seed: u64,
    pub initial_attempts: usize,
    pub initial_correlation: f64,
    /// `(temperature, mean correlation)` pairs.
    pub means: Vec<(f64, f64)>,
    pub runs: &'a [CorrelationSeries],
}

impl<'a> SweepReport<'a> {
    pub fn new(
        mode: &'static str,
        size: usize,
        seed: u64,
        initial: (usize, f64),
        result: &'a SweepResult,
    ) -> Self {
        Self {
            mode,
            size,
            seed,
            initial_attempts: initial.0,
            initial_correlation: initial.1,
            means: result.means(),
            runs: &result.runs,
        }
    }
}

/// Final spin field, angles reduced to [0, 2π) in row-major order.
#[derive(Serialize)]
pub struct SnapshotReport {
    pub mode: &'static str,
    pub size: usize,
    pub seed: u64,
    pub temperature: f64,
    pub steps: usize,
    pub correlation: f64,
    pub angles: Vec<f64>,
    /// `(cos θ, sin θ)` per site, for a quiver plot.
    pub vectors: Vec<(f64, f64)>,
}

pub fn write_json<T: Serialize>(report: &T, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            let mut w = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut w, report).context("cannot serialize report")?;
            w.flush()
                .with_context(|| format!("cannot write {}", path.display()))?;
        }
        None => {
            let stdout = io::stdout();
            let mut w = stdout.lock();
            serde_json::to_writer_pretty(&mut w, report).context("cannot serialize report")?;
            writeln!(w)?;
        }
    }
    Ok(())
}
