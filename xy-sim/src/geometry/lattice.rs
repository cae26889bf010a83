use crate::error::{Result, SimError};

/// Number of nearest neighbors of a square-lattice site.
pub const N_NEIGHBORS: usize = 4;

/// The four periodic nearest neighbors of `(i, j)` on an `n`×`n` torus.
///
/// Order: `(i, j+1)`, `(i, j-1)`, `(i+1, j)`, `(i-1, j)`, all taken mod `n`.
/// Requires `n > 0`.
#[inline]
pub fn periodic_neighbors(i: usize, j: usize, n: usize) -> [(usize, usize); N_NEIGHBORS] {
    let up = |x: usize| if x + 1 == n { 0 } else { x + 1 };
    let down = |x: usize| if x == 0 { n - 1 } else { x - 1 };
    [(i, up(j)), (i, down(j)), (up(i), j), (down(i), j)]
}

/// Periodic n×n square lattice with precomputed neighbor table.
///
/// Sites are indexed in row-major order: site `(i, j)` has flat index
/// `i * n + j`. The neighbor table stores, for every site, the flat indices of
/// its four neighbors in the order of [`periodic_neighbors`].
#[derive(Debug, Clone)]
pub struct SquareLattice {
    /// Side length.
    pub n: usize,
    /// Total number of sites (`n * n`).
    pub n_sites: usize,
    /// Layout: `neighbors[site * N_NEIGHBORS + k]`.
    neighbors: Vec<u32>,
}

impl SquareLattice {
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(SimError::InvalidConfig(
                "lattice size must be >= 1".to_string(),
            ));
        }
        let n_sites = n.checked_mul(n).filter(|&s| s <= u32::MAX as usize).ok_or_else(|| {
            SimError::InvalidConfig(format!("lattice size {n} is too large"))
        })?;

        let mut neighbors = vec![0u32; n_sites * N_NEIGHBORS];
        for i in 0..n {
            for j in 0..n {
                let site = i * n + j;
                for (k, (ni, nj)) in periodic_neighbors(i, j, n).into_iter().enumerate() {
                    neighbors[site * N_NEIGHBORS + k] = (ni * n + nj) as u32;
                }
            }
        }

        Ok(Self {
            n,
            n_sites,
            neighbors,
        })
    }

    #[inline]
    pub fn index(&self, i: usize, j: usize) -> usize {
        i * self.n + j
    }

    #[inline]
    pub fn coords(&self, site: usize) -> (usize, usize) {
        (site / self.n, site % self.n)
    }

    /// Flat indices of the four neighbors of `site`.
    #[inline]
    pub fn neighbors(&self, site: usize) -> [usize; N_NEIGHBORS] {
        let base = site * N_NEIGHBORS;
        let nb = &self.neighbors[base..base + N_NEIGHBORS];
        [nb[0] as usize, nb[1] as usize, nb[2] as usize, nb[3] as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_periodic_neighbors_wrap() {
        // 3x3, corner (0,0): right (0,1), left wraps to (0,2), down (1,0), up wraps to (2,0)
        assert_eq!(
            periodic_neighbors(0, 0, 3),
            [(0, 1), (0, 2), (1, 0), (2, 0)]
        );
        // opposite corner (2,2)
        assert_eq!(
            periodic_neighbors(2, 2, 3),
            [(2, 0), (2, 1), (0, 2), (1, 2)]
        );
    }

    #[test]
    fn test_neighbor_table() {
        // 4x4 lattice:
        //
        //    0  1  2  3
        //    4  5  6  7
        //    8  9 10 11
        //   12 13 14 15
        let lat = SquareLattice::new(4).unwrap();
        assert_eq!(lat.n_sites, 16);
        assert_eq!(lat.neighbors(0), [1, 3, 4, 12]);
        assert_eq!(lat.neighbors(5), [6, 4, 9, 1]);
        assert_eq!(lat.neighbors(15), [12, 14, 3, 11]);
        assert_eq!(lat.coords(7), (1, 3));
        assert_eq!(lat.index(1, 3), 7);
    }

    #[test]
    fn test_neighbors_in_range_distinct_symmetric() {
        for n in 1..=7 {
            let lat = SquareLattice::new(n).unwrap();
            for site in 0..lat.n_sites {
                let nbs = lat.neighbors(site);
                for &nb in &nbs {
                    assert!(nb < lat.n_sites);
                    assert!(
                        lat.neighbors(nb).contains(&site),
                        "n={n}: {site} -> {nb} not symmetric"
                    );
                }
                if n >= 3 {
                    let distinct: HashSet<usize> = nbs.into_iter().collect();
                    assert_eq!(distinct.len(), 4, "n={n}, site={site}");
                }
            }
        }
    }

    #[test]
    fn test_single_site_self_loops() {
        let lat = SquareLattice::new(1).unwrap();
        assert_eq!(lat.neighbors(0), [0, 0, 0, 0]);
        assert_eq!(periodic_neighbors(0, 0, 1), [(0, 0); 4]);
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(
            SquareLattice::new(0),
            Err(SimError::InvalidConfig(_))
        ));
    }
}
