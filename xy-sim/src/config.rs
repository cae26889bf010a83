use validator::{Validate, ValidationError};

use crate::error::SimError;

/// Which Monte Carlo steps the correlation is sampled after.
///
/// Steps are 0-based: step `s` is the state right after the `(s + 1)`-th
/// cluster update.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleSchedule {
    /// Every step with `step % interval == 0`.
    Every { interval: usize },
    /// An explicit, strictly increasing list of steps.
    Steps(Vec<usize>),
}

impl SampleSchedule {
    /// Up to `count` steps spaced by `spacing`, ending at `last`.
    ///
    /// `tail_window(999, 10, 10)` gives `909, 919, ..., 999`. Steps that would
    /// fall before 0 are dropped, so a short run keeps fewer samples but still
    /// samples `last`. `count == 0` gives an empty list, which validation
    /// rejects; so does `spacing == 0` when `count > 1`.
    pub fn tail_window(last: usize, count: usize, spacing: usize) -> Self {
        let mut steps: Vec<usize> = (0..count)
            .map_while(|k| k.checked_mul(spacing).and_then(|d| last.checked_sub(d)))
            .collect();
        steps.reverse();
        Self::Steps(steps)
    }

    #[inline]
    pub fn selects(&self, step: usize) -> bool {
        match self {
            Self::Every { interval } => step % interval == 0,
            Self::Steps(steps) => steps.binary_search(&step).is_ok(),
        }
    }

    /// Number of samples taken in a run of `n_steps` updates.
    pub fn n_samples(&self, n_steps: usize) -> usize {
        match self {
            Self::Every { interval } => n_steps.div_ceil(*interval),
            Self::Steps(steps) => steps.iter().filter(|&&s| s < n_steps).count(),
        }
    }
}

fn validate_sim_config(cfg: &SimConfig) -> Result<(), ValidationError> {
    if cfg.n_steps < 1 {
        return Err(ValidationError::new("n_steps must be >= 1"));
    }
    match &cfg.schedule {
        SampleSchedule::Every { interval } => {
            if *interval < 1 {
                return Err(ValidationError::new("sampling interval must be >= 1"));
            }
        }
        SampleSchedule::Steps(steps) => {
            if steps.is_empty() {
                return Err(ValidationError::new("sample step list must not be empty"));
            }
            if steps.windows(2).any(|w| w[0] >= w[1]) {
                return Err(ValidationError::new(
                    "sample steps must be strictly increasing",
                ));
            }
            if steps.last().is_some_and(|&s| s >= cfg.n_steps) {
                return Err(ValidationError::new("sample steps must be < n_steps"));
            }
        }
    }
    if cfg.tail_samples == Some(0) {
        return Err(ValidationError::new("tail_samples must be >= 1"));
    }
    if cfg.autocorrelation_max_lag == Some(0) {
        return Err(ValidationError::new("autocorrelation_max_lag must be >= 1"));
    }
    Ok(())
}

/// Settings for one fixed-temperature sampling run.
#[derive(Debug, Clone, Validate)]
#[validate(schema(function = "validate_sim_config"))]
pub struct SimConfig {
    /// Number of Wolff updates.
    pub n_steps: usize,
    pub schedule: SampleSchedule,
    /// Average only the last `k` samples. `None` averages all of them.
    pub tail_samples: Option<usize>,
    /// Largest lag of the autocorrelation of the sampled series.
    pub autocorrelation_max_lag: Option<usize>,
    /// Record running averages of the correlation at log-spaced steps.
    pub equilibration_diagnostic: bool,
}

impl SimConfig {
    /// Correlation against Monte Carlo time: 1500 updates, a sample every
    /// 10 steps, reference level from the last 20 samples.
    pub fn correlation_series() -> Self {
        Self {
            n_steps: 1500,
            schedule: SampleSchedule::Every { interval: 10 },
            tail_samples: Some(20),
            autocorrelation_max_lag: None,
            equilibration_diagnostic: false,
        }
    }

    /// Equilibrium level: 1000 updates, samples at steps 909, 919, ..., 999.
    pub fn equilibrium() -> Self {
        Self {
            n_steps: 1000,
            schedule: SampleSchedule::tail_window(999, 10, 10),
            tail_samples: None,
            autocorrelation_max_lag: None,
            equilibration_diagnostic: false,
        }
    }

    pub fn check(&self) -> Result<(), SimError> {
        self.validate()
            .map_err(|e| SimError::InvalidConfig(format!("{e}")))
    }
}

fn validate_init_config(cfg: &InitConfig) -> Result<(), ValidationError> {
    if !(cfg.threshold > 0.0 && cfg.threshold.is_finite()) {
        return Err(ValidationError::new("init threshold must be finite and > 0"));
    }
    if cfg.max_attempts < 1 {
        return Err(ValidationError::new("max_attempts must be >= 1"));
    }
    Ok(())
}

/// Rejection search for a disordered starting field.
#[derive(Debug, Clone, Copy, Validate)]
#[validate(schema(function = "validate_init_config"))]
pub struct InitConfig {
    /// Accept a draw once `|correlation| < threshold`.
    pub threshold: f64,
    pub max_attempts: usize,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            threshold: 0.05,
            max_attempts: 10_000,
        }
    }
}

impl InitConfig {
    pub fn check(&self) -> Result<(), SimError> {
        self.validate()
            .map_err(|e| SimError::InvalidConfig(format!("{e}")))
    }
}
