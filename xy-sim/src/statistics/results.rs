use serde::Serialize;

use super::EquilCheckpoint;

/// Correlation time series of one fixed-temperature run.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationSeries {
    pub temperature: f64,
    /// `(step, correlation)` in step order.
    pub samples: Vec<(usize, f64)>,
    /// ⟨c⟩ over the averaging window (the last `tail_samples` samples, or all).
    pub mean: f64,
    /// ⟨c²⟩ over the same window.
    pub mean2: f64,
    /// Mean number of spins reflected per update.
    pub mean_cluster_size: f64,
    /// Normalized autocorrelation Γ(δ) of the samples.
    /// Empty if autocorrelation_max_lag is None.
    pub autocorrelation: Vec<f64>,
    /// Integrated autocorrelation time in units of samples.
    pub tau_int: Option<f64>,
    /// Empty unless equilibration_diagnostic is set.
    pub equil_checkpoints: Vec<EquilCheckpoint>,
}

impl CorrelationSeries {
    pub fn steps(&self) -> Vec<usize> {
        self.samples.iter().map(|&(s, _)| s).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().map(|&(_, c)| c).collect()
    }

    /// Fluctuation ⟨c²⟩ − ⟨c⟩² over the averaging window.
    pub fn variance(&self) -> f64 {
        (self.mean2 - self.mean * self.mean).max(0.0)
    }
}

/// One [`CorrelationSeries`] per temperature, in input order.
#[derive(Debug, Clone, Serialize)]
pub struct SweepResult {
    pub runs: Vec<CorrelationSeries>,
}

impl SweepResult {
    pub fn temperatures(&self) -> Vec<f64> {
        self.runs.iter().map(|r| r.temperature).collect()
    }

    /// `(temperature, ⟨c⟩)` pairs.
    pub fn means(&self) -> Vec<(f64, f64)> {
        self.runs.iter().map(|r| (r.temperature, r.mean)).collect()
    }
}
