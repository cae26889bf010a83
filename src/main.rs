use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use xy_sim::config::{InitConfig, SampleSchedule, SimConfig};
use xy_sim::{initial_spins, run_temperature_sweep, spin_correlation, Realization, SquareLattice};

mod cli;
mod report;

use cli::{Cli, Commands};
use report::{write_json, SnapshotReport, SweepReport};

const SERIES_TEMPS: [f64; 4] = [0.5, 1.0, 1.5, 2.0];

const SWEEP_TEMPS: [f64; 13] = [
    0.4,
    0.6,
    0.7,
    0.8,
    5.0 / 6.0,
    13.0 / 15.0,
    0.9,
    14.0 / 15.0,
    29.0 / 30.0,
    1.0,
    1.1,
    1.2,
    1.4,
];

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let lattice = SquareLattice::new(cli.size)?;
    let init = InitConfig {
        threshold: cli.init_threshold,
        max_attempts: cli.init_attempts,
    };
    let mut rng = Xoshiro256StarStar::seed_from_u64(cli.seed);
    let (initial, attempts) =
        initial_spins(cli.size, &mut rng, &init).context("cannot draw initial lattice")?;
    let initial_correlation = spin_correlation(&initial);
    info!(
        size = cli.size,
        attempts,
        correlation = initial_correlation,
        "initial lattice ready"
    );

    match cli.command {
        Commands::Series {
            temperatures,
            steps,
            interval,
            tail,
            max_lag,
        } => {
            let temps = or_default(temperatures, &SERIES_TEMPS);
            let config = SimConfig {
                n_steps: steps,
                schedule: SampleSchedule::Every { interval },
                tail_samples: Some(tail),
                autocorrelation_max_lag: max_lag,
                equilibration_diagnostic: false,
            };
            let pb = progress_bar(cli.quiet, temps.len() * steps, "series")?;
            let result = run_temperature_sweep(
                &lattice,
                &initial,
                &temps,
                &config,
                cli.seed,
                &|t_idx, step| on_step(&pb, &temps, t_idx, step),
            )?;
            pb.finish_and_clear();

            let report = SweepReport::new(
                "series",
                cli.size,
                cli.seed,
                (attempts, initial_correlation),
                &result,
            );
            write_json(&report, cli.output.as_deref())
        }
        Commands::Sweep {
            temperatures,
            steps,
            window,
            spacing,
            equilibration,
        } => {
            let temps = or_default(temperatures, &SWEEP_TEMPS);
            let config = SimConfig {
                n_steps: steps,
                schedule: SampleSchedule::tail_window(steps.saturating_sub(1), window, spacing),
                tail_samples: None,
                autocorrelation_max_lag: None,
                equilibration_diagnostic: equilibration,
            };
            let pb = progress_bar(cli.quiet, temps.len() * steps, "sweep")?;
            let result = run_temperature_sweep(
                &lattice,
                &initial,
                &temps,
                &config,
                cli.seed,
                &|t_idx, step| on_step(&pb, &temps, t_idx, step),
            )?;
            pb.finish_and_clear();

            for (t, c) in result.means() {
                info!("T = {t:.4}  <c> = {c:.4}");
            }
            let report = SweepReport::new(
                "sweep",
                cli.size,
                cli.seed,
                (attempts, initial_correlation),
                &result,
            );
            write_json(&report, cli.output.as_deref())
        }
        Commands::Snapshot { temperature, steps } => {
            let config = SimConfig {
                n_steps: steps,
                schedule: SampleSchedule::Steps(vec![steps.saturating_sub(1)]),
                tail_samples: None,
                autocorrelation_max_lag: None,
                equilibration_diagnostic: false,
            };
            let temps = [temperature];
            let pb = progress_bar(cli.quiet, steps, "snapshot")?;
            let mut real = Realization::new(&initial, temperature, cli.seed.wrapping_add(1))?;
            let series = real.run(&lattice, &config, &|step| on_step(&pb, &temps, 0, step))?;
            pb.finish_and_clear();

            let angles = real.spins.wrapped();
            let vectors = angles.iter().map(|t| (t.cos(), t.sin())).collect();
            let report = SnapshotReport {
                mode: "snapshot",
                size: cli.size,
                seed: cli.seed,
                temperature,
                steps,
                correlation: series.mean,
                angles,
                vectors,
            };
            write_json(&report, cli.output.as_deref())
        }
    }
}

fn or_default(temps: Vec<f64>, default: &[f64]) -> Vec<f64> {
    if temps.is_empty() {
        default.to_vec()
    } else {
        temps
    }
}

fn progress_bar(quiet: bool, len: usize, msg: &'static str) -> Result<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{msg} [{bar:40}] {pos}/{len} [{elapsed_precise} < {eta_precise}, {per_sec}]",
        )?
        .progress_chars("=> "),
    );
    pb.set_message(msg);
    Ok(pb)
}

fn on_step(pb: &ProgressBar, temps: &[f64], t_idx: usize, step: usize) {
    pb.inc(1);
    if step % 100 == 0 {
        debug!(step, temp = temps[t_idx], "progress");
    }
}
