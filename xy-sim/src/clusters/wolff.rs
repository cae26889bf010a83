use std::f64::consts::TAU;

use rand::Rng;

use super::utils::{grow_from_seed, ClusterBuffers};
use crate::error::{check_temperature, Result, SimError};
use crate::geometry::SquareLattice;
use crate::spins::SpinField;

/// Outcome of one Wolff update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WolffStep {
    /// Seed site as `(row, column)`.
    pub seed: (usize, usize),
    /// Number of reflected spins.
    pub cluster_size: usize,
    /// Reflection axis angle in `[0, 2π)`.
    pub theta0: f64,
}

/// Bond activation probability `1 - exp(-2 cos(θa - θb) / T)`.
///
/// Not clamped: anti-aligned bonds give a negative value, which never beats a
/// draw from `[0, 1)`, and strongly aligned bonds at tiny `T` approach 1.
#[inline]
pub fn bond_probability(theta_a: f64, theta_b: f64, temp: f64) -> f64 {
    1.0 - (-2.0 * (theta_a - theta_b).cos() / temp).exp()
}

/// Grow a Wolff cluster from `seed` without touching the spins.
///
/// For every unmarked neighbor of a newly marked site one uniform draw
/// `u ∈ [0, 1)` is consumed and the neighbor is pushed if
/// `bond_probability ≥ u`. The frontier is LIFO. Returns the cluster size;
/// the mask is left in `buffers`.
///
/// A non-finite seed angle is rejected up front. Any other corrupted site is
/// only reachable through a bond, whose probability is then NaN.
pub fn grow_cluster<R: Rng + ?Sized>(
    lattice: &SquareLattice,
    spins: &SpinField,
    temp: f64,
    seed: usize,
    rng: &mut R,
    buffers: &mut ClusterBuffers,
) -> Result<usize> {
    check_temperature(temp)?;
    check_shape(lattice, spins)?;
    if seed >= lattice.n_sites {
        return Err(SimError::InvalidConfig(format!(
            "seed site {seed} is outside a lattice of {} sites",
            lattice.n_sites
        )));
    }
    let angles = spins.angles();
    if !angles[seed].is_finite() {
        return Err(SimError::NonFiniteAngle {
            site: lattice.coords(seed),
        });
    }

    grow_from_seed(lattice, seed, buffers, |site, nb| {
        let p = bond_probability(angles[site], angles[nb], temp);
        if p.is_nan() {
            return Err(SimError::NonFiniteBond {
                site: lattice.coords(site),
                neighbor: lattice.coords(nb),
            });
        }
        Ok(p >= rng.gen::<f64>())
    })
}

/// Reflect every masked spin about the axis at `theta0`: `θ ← 2θ₀ − θ`.
///
/// Applying the same reflection twice restores the original angles.
/// `in_cluster` must cover every site of the field.
pub fn reflect_cluster(spins: &mut SpinField, in_cluster: &[bool], theta0: f64) {
    debug_assert_eq!(in_cluster.len(), spins.angles().len());
    let two_theta0 = 2.0 * theta0;
    for (theta, &marked) in spins.angles_mut().iter_mut().zip(in_cluster) {
        if marked {
            *theta = two_theta0 - *theta;
        }
    }
}

/// One Wolff single-cluster update, in place.
///
/// Draws the seed row and column, grows the cluster, draws `θ₀ = 2π·u` and
/// reflects the cluster. If growth fails the spins are left unchanged; invalid
/// arguments are rejected before any draw.
pub fn wolff_update<R: Rng + ?Sized>(
    lattice: &SquareLattice,
    spins: &mut SpinField,
    temp: f64,
    rng: &mut R,
    buffers: &mut ClusterBuffers,
) -> Result<WolffStep> {
    check_temperature(temp)?;
    check_shape(lattice, spins)?;
    let n = lattice.n;
    let i0 = rng.gen_range(0..n);
    let j0 = rng.gen_range(0..n);

    let cluster_size = grow_cluster(lattice, spins, temp, lattice.index(i0, j0), rng, buffers)?;

    let theta0 = rng.gen::<f64>() * TAU;
    reflect_cluster(spins, buffers.in_cluster(), theta0);

    Ok(WolffStep {
        seed: (i0, j0),
        cluster_size,
        theta0,
    })
}

fn check_shape(lattice: &SquareLattice, spins: &SpinField) -> Result<()> {
    if lattice.n != spins.n() {
        return Err(SimError::InvalidConfig(format!(
            "spin field is {0}x{0} but lattice is {1}x{1}",
            spins.n(),
            lattice.n
        )));
    }
    Ok(())
}
