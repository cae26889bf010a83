use std::time::Instant;

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use xy_sim::config::{InitConfig, SampleSchedule, SimConfig};
use xy_sim::{initial_spins, run_temperature_sweep, SquareLattice};

const L: usize = 128;
const N_TEMPS: usize = 8;
const N_STEPS: usize = 2000;

fn main() {
    let lattice = SquareLattice::new(L).unwrap();

    let temps: Vec<f64> = (0..N_TEMPS)
        .map(|i| 0.4 + 1.2 * i as f64 / (N_TEMPS - 1) as f64)
        .collect();

    let mut rng = Xoshiro256StarStar::seed_from_u64(42);
    let (initial, _) = initial_spins(L, &mut rng, &InitConfig::default()).unwrap();

    let config = SimConfig {
        n_steps: N_STEPS,
        schedule: SampleSchedule::Every { interval: 100 },
        tail_samples: Some(5),
        autocorrelation_max_lag: None,
        equilibration_diagnostic: false,
    };

    println!(
        "Lattice: {}x{}  |  Temps: {}  |  Steps: {}",
        L, L, N_TEMPS, N_STEPS
    );
    println!("{}", "-".repeat(70));

    let t0 = Instant::now();
    let result =
        run_temperature_sweep(&lattice, &initial, &temps, &config, 42, &|_, _| {}).unwrap();
    let elapsed = t0.elapsed().as_secs_f64();

    for run in &result.runs {
        println!(
            "T = {:.3}  <c> = {:.4}  <|C|> = {:.1}",
            run.temperature, run.mean, run.mean_cluster_size
        );
    }
    let per_step = elapsed / (N_STEPS * N_TEMPS) as f64 * 1e6;
    println!("Total: {:.3} s  |  {:.1} us/update", elapsed, per_step);
}
