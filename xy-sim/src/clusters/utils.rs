use crate::geometry::SquareLattice;

/// Reusable scratch space for single-cluster growth.
///
/// `in_cluster` is the membership mask of the most recently grown cluster;
/// `frontier` is the LIFO worklist. Both are reset at the start of every
/// growth, so nothing carries over between updates.
pub struct ClusterBuffers {
    in_cluster: Vec<bool>,
    frontier: Vec<usize>,
    size: usize,
}

impl ClusterBuffers {
    pub fn new(n_sites: usize) -> Self {
        Self {
            in_cluster: vec![false; n_sites],
            frontier: Vec::with_capacity(n_sites),
            size: 0,
        }
    }

    /// Membership mask of the last grown cluster, indexed by flat site.
    #[inline]
    pub fn in_cluster(&self) -> &[bool] {
        &self.in_cluster
    }

    /// Number of sites in the last grown cluster.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Flat indices of the last grown cluster, ascending.
    pub fn members(&self) -> Vec<usize> {
        (0..self.in_cluster.len())
            .filter(|&s| self.in_cluster[s])
            .collect()
    }

    fn reset(&mut self, n_sites: usize) {
        self.in_cluster.clear();
        self.in_cluster.resize(n_sites, false);
        self.frontier.clear();
        self.size = 0;
    }
}

/// Grow a single cluster from `seed` by depth-first flood fill.
///
/// Sites are marked when popped from the frontier, not when pushed, so a site
/// may sit on the frontier several times; duplicates are skipped on pop.
/// `should_add(site, neighbor)` is asked once per unmarked neighbor of every
/// newly marked site and may fail, in which case growth stops and the error
/// is returned with the mask left partially filled.
pub(super) fn grow_from_seed<E>(
    lattice: &SquareLattice,
    seed: usize,
    buffers: &mut ClusterBuffers,
    mut should_add: impl FnMut(usize, usize) -> Result<bool, E>,
) -> Result<usize, E> {
    buffers.reset(lattice.n_sites);
    buffers.frontier.push(seed);

    while let Some(site) = buffers.frontier.pop() {
        if buffers.in_cluster[site] {
            continue;
        }
        buffers.in_cluster[site] = true;
        buffers.size += 1;

        for nb in lattice.neighbors(site) {
            if !buffers.in_cluster[nb] && should_add(site, nb)? {
                buffers.frontier.push(nb);
            }
        }
    }

    Ok(buffers.size)
}
