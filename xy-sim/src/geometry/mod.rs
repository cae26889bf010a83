pub mod lattice;

pub use lattice::{periodic_neighbors, SquareLattice, N_NEIGHBORS};
