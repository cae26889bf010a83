mod utils;
pub mod wolff;

pub use utils::ClusterBuffers;
pub use wolff::{bond_probability, grow_cluster, reflect_cluster, wolff_update, WolffStep};
