use std::f64::consts::TAU;

use rand::Rng;

use crate::error::{Result, SimError};

/// Planar spin angles on an n×n periodic lattice, row-major.
///
/// Angles are plain reals and are never reduced mod 2π during a run; they
/// only enter the dynamics through cosines of differences.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinField {
    n: usize,
    angles: Vec<f64>,
}

impl SpinField {
    /// Wrap existing angles. `angles.len()` must equal `n * n`.
    pub fn from_angles(n: usize, angles: Vec<f64>) -> Result<Self> {
        if n == 0 {
            return Err(SimError::InvalidConfig(
                "lattice size must be >= 1".to_string(),
            ));
        }
        if Some(angles.len()) != n.checked_mul(n) {
            return Err(SimError::InvalidConfig(format!(
                "expected {n}x{n} = {} angles, got {}",
                n.saturating_mul(n),
                angles.len()
            )));
        }
        Ok(Self { n, angles })
    }

    /// Every spin at angle `theta`.
    pub fn aligned(n: usize, theta: f64) -> Result<Self> {
        Self::from_angles(n, vec![theta; n.saturating_mul(n)])
    }

    /// Independent uniform angles in `[0, 2π)`.
    pub fn random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<Self> {
        let mut field = Self::aligned(n, 0.0)?;
        field.randomize(rng);
        Ok(field)
    }

    /// Redraw every angle uniformly in `[0, 2π)`, in row-major order.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for theta in self.angles.iter_mut() {
            *theta = rng.gen::<f64>() * TAU;
        }
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.angles[i * self.n + j]
    }

    #[inline]
    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    #[inline]
    pub fn angles_mut(&mut self) -> &mut [f64] {
        &mut self.angles
    }

    /// Angles reduced to `[0, 2π)`, for export.
    pub fn wrapped(&self) -> Vec<f64> {
        self.angles.iter().map(|t| t.rem_euclid(TAU)).collect()
    }

    pub fn all_finite(&self) -> bool {
        self.angles.iter().all(|t| t.is_finite())
    }
}
