pub mod init;
pub mod realization;

pub use init::initial_spins;
pub use realization::Realization;

use rand::Rng;
use tracing::{debug, info};

use crate::clusters::{wolff_update, ClusterBuffers};
use crate::config::SimConfig;
use crate::error::{check_temperature, Result, SimError};
use crate::geometry::SquareLattice;
use crate::spins::{spin_correlation, SpinField};
use crate::statistics::{
    sokal_tau, AutocorrAccum, CorrelationSeries, EquilDiagnosticAccum, Statistics, SweepResult,
};

/// Run `config.n_steps` Wolff updates at temperature `temp`, sampling the
/// spin correlation after every step the schedule selects.
///
/// `spins` is updated in place and holds the final state on return. Every
/// argument is validated before the first update. If an update fails the run
/// stops with that error; the field keeps all updates completed before it.
///
/// `on_step(step)` is called after each update (useful for progress bars).
pub fn run_sampling<R: Rng + ?Sized>(
    lattice: &SquareLattice,
    spins: &mut SpinField,
    temp: f64,
    config: &SimConfig,
    rng: &mut R,
    on_step: &dyn Fn(usize),
) -> Result<CorrelationSeries> {
    config.check()?;
    check_temperature(temp)?;
    if spins.n() != lattice.n {
        return Err(SimError::InvalidConfig(format!(
            "spin field is {0}x{0} but lattice is {1}x{1}",
            spins.n(),
            lattice.n
        )));
    }

    let n_steps = config.n_steps;
    let mut buffers = ClusterBuffers::new(lattice.n_sites);
    let mut samples = Vec::with_capacity(config.schedule.n_samples(n_steps));
    let mut cluster_stat = Statistics::new(1);
    let mut equil_accum = config
        .equilibration_diagnostic
        .then(|| EquilDiagnosticAccum::new(n_steps));

    for step in 0..n_steps {
        let outcome = wolff_update(lattice, spins, temp, rng, &mut buffers)?;
        cluster_stat.update(outcome.cluster_size as f64);

        let record = config.schedule.selects(step);
        if record || equil_accum.is_some() {
            let c = spin_correlation(spins);
            if let Some(acc) = equil_accum.as_mut() {
                acc.push(c);
            }
            if record {
                samples.push((step, c));
            }
        }
        on_step(step);
    }

    let window = match config.tail_samples {
        Some(k) => &samples[samples.len().saturating_sub(k)..],
        None => &samples[..],
    };
    let mut mean_stat = Statistics::new(1);
    let mut mean2_stat = Statistics::new(2);
    for &(_, c) in window {
        mean_stat.update(c);
        mean2_stat.update(c);
    }

    let (autocorrelation, tau_int) = match config.autocorrelation_max_lag {
        Some(max_lag) if !samples.is_empty() => {
            let max_lag = max_lag.min(samples.len() / 4).max(1);
            let mut acc = AutocorrAccum::new(max_lag);
            for &(_, c) in &samples {
                acc.push(c);
            }
            let gamma = acc.finish();
            let tau = sokal_tau(&gamma);
            (gamma, Some(tau))
        }
        _ => (Vec::new(), None),
    };

    let series = CorrelationSeries {
        temperature: temp,
        samples,
        mean: mean_stat.average(),
        mean2: mean2_stat.average(),
        mean_cluster_size: cluster_stat.average(),
        autocorrelation,
        tau_int,
        equil_checkpoints: equil_accum.map(|acc| acc.finish()).unwrap_or_default(),
    };
    debug!(
        temp,
        mean = series.mean,
        mean_cluster_size = series.mean_cluster_size,
        "sampling run finished"
    );
    Ok(series)
}

/// Run one independent [`Realization`] per temperature, in order.
///
/// Every run starts from its own clone of `initial`; temperature `k` uses a
/// PRNG seeded with `base_seed + 1 + k`, leaving `base_seed` for drawing the
/// initial field. All temperatures are checked before any run starts.
///
/// `on_step(temp_index, step)` is forwarded from each run.
pub fn run_temperature_sweep(
    lattice: &SquareLattice,
    initial: &SpinField,
    temperatures: &[f64],
    config: &SimConfig,
    base_seed: u64,
    on_step: &dyn Fn(usize, usize),
) -> Result<SweepResult> {
    config.check()?;
    if temperatures.is_empty() {
        return Err(SimError::InvalidConfig(
            "at least one temperature is required".to_string(),
        ));
    }
    for &t in temperatures {
        check_temperature(t)?;
    }

    let mut runs = Vec::with_capacity(temperatures.len());
    for (t_idx, &temp) in temperatures.iter().enumerate() {
        let seed = base_seed.wrapping_add(1 + t_idx as u64);
        let mut real = Realization::new(initial, temp, seed)?;
        let series = real.run(lattice, config, &|step| on_step(t_idx, step))?;
        info!(
            temp,
            mean = series.mean,
            samples = series.samples.len(),
            "temperature done"
        );
        runs.push(series);
    }

    Ok(SweepResult { runs })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{InitConfig, SampleSchedule};
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;
    use std::cell::Cell;

    fn small_config(n_steps: usize) -> SimConfig {
        SimConfig {
            n_steps,
            schedule: SampleSchedule::Every { interval: 10 },
            tail_samples: None,
            autocorrelation_max_lag: None,
            equilibration_diagnostic: false,
        }
    }

    fn start(n: usize, seed: u64) -> SpinField {
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        initial_spins(n, &mut rng, &InitConfig::default()).unwrap().0
    }

    #[test]
    fn test_every_schedule_steps() {
        let lattice = SquareLattice::new(6).unwrap();
        let mut spins = start(6, 1);
        let mut rng = Xoshiro256StarStar::seed_from_u64(1);
        let calls = Cell::new(0usize);
        let series = run_sampling(
            &lattice,
            &mut spins,
            1.0,
            &small_config(95),
            &mut rng,
            &|_| calls.set(calls.get() + 1),
        )
        .unwrap();

        assert_eq!(calls.get(), 95);
        assert_eq!(series.steps(), (0..95).step_by(10).collect::<Vec<_>>());
        assert!(series.values().iter().all(|c| (-1.0..=1.0).contains(c)));
        assert!(series.mean_cluster_size >= 1.0);
        // the last sample is the field after step 90; five more updates follow
        assert_eq!(series.samples.len(), 10);
    }

    #[test]
    fn test_last_sample_matches_final_state() {
        let lattice = SquareLattice::new(5).unwrap();
        let mut spins = start(5, 2);
        let mut rng = Xoshiro256StarStar::seed_from_u64(2);
        let mut config = small_config(50);
        config.schedule = SampleSchedule::Steps(vec![10, 49]);
        let series = run_sampling(&lattice, &mut spins, 0.7, &config, &mut rng, &|_| {}).unwrap();
        assert_eq!(series.steps(), vec![10, 49]);
        assert_eq!(series.samples[1].1, spin_correlation(&spins));
    }

    #[test]
    fn test_tail_mean() {
        let lattice = SquareLattice::new(5).unwrap();
        let mut spins = start(5, 3);
        let mut rng = Xoshiro256StarStar::seed_from_u64(3);
        let mut config = small_config(100);
        config.tail_samples = Some(3);
        let series = run_sampling(&lattice, &mut spins, 1.5, &config, &mut rng, &|_| {}).unwrap();
        let v = series.values();
        let expected = v[v.len() - 3..].iter().sum::<f64>() / 3.0;
        assert!((series.mean - expected).abs() < 1e-12);
        assert!(series.variance() >= 0.0);
    }

    #[test]
    fn test_end_to_end_deterministic() {
        // n = 4, T = 1, 100 updates from a fixed seed: identical bits twice.
        let run = || {
            let lattice = SquareLattice::new(4).unwrap();
            let mut spins = start(4, 2024);
            let mut rng = Xoshiro256StarStar::seed_from_u64(2024);
            let mut config = small_config(100);
            config.schedule = SampleSchedule::Steps(vec![99]);
            run_sampling(&lattice, &mut spins, 1.0, &config, &mut rng, &|_| {})
                .unwrap()
                .samples[0]
                .1
        };
        assert_eq!(run().to_bits(), run().to_bits());
    }

    #[test]
    fn test_low_temperature_orders() {
        let lattice = SquareLattice::new(8).unwrap();
        let mut spins = start(8, 4);
        let mut rng = Xoshiro256StarStar::seed_from_u64(4);
        let mut config = small_config(300);
        config.tail_samples = Some(5);
        let series = run_sampling(&lattice, &mut spins, 0.3, &config, &mut rng, &|_| {}).unwrap();
        assert!(series.mean > 0.6, "mean = {}", series.mean);
    }

    #[test]
    fn test_diagnostics() {
        let lattice = SquareLattice::new(6).unwrap();
        let mut spins = start(6, 5);
        let mut rng = Xoshiro256StarStar::seed_from_u64(5);
        let mut config = small_config(300);
        config.autocorrelation_max_lag = Some(100);
        config.equilibration_diagnostic = true;
        let series = run_sampling(&lattice, &mut spins, 1.0, &config, &mut rng, &|_| {}).unwrap();

        // 30 samples cap the lag at 30 / 4 = 7
        assert_eq!(series.autocorrelation.len(), 8);
        assert!((series.autocorrelation[0] - 1.0).abs() < 1e-9);
        assert!(series.tau_int.is_some());
        let steps: Vec<usize> = series.equil_checkpoints.iter().map(|c| c.step).collect();
        assert_eq!(steps, vec![128, 256, 300]);
    }

    #[test]
    fn test_invalid_run_leaves_field_untouched() {
        let lattice = SquareLattice::new(4).unwrap();
        let initial = start(4, 6);
        let mut spins = initial.clone();
        let mut rng = Xoshiro256StarStar::seed_from_u64(6);
        assert!(run_sampling(&lattice, &mut spins, -1.0, &small_config(10), &mut rng, &|_| {})
            .is_err());
        assert!(run_sampling(&lattice, &mut spins, 1.0, &small_config(0), &mut rng, &|_| {})
            .is_err());
        assert_eq!(spins, initial);
    }

    #[test]
    fn test_temperature_sweep() {
        let lattice = SquareLattice::new(6).unwrap();
        let initial = start(6, 7);
        let temps = [0.5, 1.0, 2.0];
        let last_temp = Cell::new(usize::MAX);
        let result = run_temperature_sweep(
            &lattice,
            &initial,
            &temps,
            &small_config(50),
            7,
            &|t_idx, _| last_temp.set(t_idx),
        )
        .unwrap();

        assert_eq!(result.temperatures(), temps.to_vec());
        assert_eq!(result.means().len(), 3);
        assert_eq!(last_temp.get(), 2);
        for run in &result.runs {
            assert_eq!(run.samples.len(), 5);
        }

        let again =
            run_temperature_sweep(&lattice, &initial, &temps, &small_config(50), 7, &|_, _| {})
                .unwrap();
        for (a, b) in result.runs.iter().zip(again.runs.iter()) {
            assert_eq!(a.samples, b.samples);
        }
    }

    #[test]
    fn test_temperature_sweep_rejects_before_running() {
        let lattice = SquareLattice::new(4).unwrap();
        let initial = start(4, 8);
        let calls = Cell::new(0usize);
        let res = run_temperature_sweep(
            &lattice,
            &initial,
            &[1.0, 0.0],
            &small_config(10),
            8,
            &|_, _| calls.set(calls.get() + 1),
        );
        assert!(matches!(res, Err(SimError::InvalidConfig(_))));
        assert_eq!(calls.get(), 0);
        assert!(run_temperature_sweep(&lattice, &initial, &[], &small_config(10), 8, &|_, _| {})
            .is_err());
    }
}
