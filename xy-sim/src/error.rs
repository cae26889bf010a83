//! Error types for xy-sim.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no initial lattice with |correlation| < {threshold} after {attempts} attempts")]
    InitExhausted { attempts: usize, threshold: f64 },

    #[error("non-finite bond probability between sites {site:?} and {neighbor:?}")]
    NonFiniteBond {
        site: (usize, usize),
        neighbor: (usize, usize),
    },

    #[error("non-finite spin angle at site {site:?}")]
    NonFiniteAngle { site: (usize, usize) },
}

pub type Result<T> = std::result::Result<T, SimError>;

/// Reject temperatures the bond probability cannot use.
pub fn check_temperature(temp: f64) -> Result<()> {
    if temp.is_finite() && temp > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidConfig(format!(
            "temperature must be finite and > 0, got {temp}"
        )))
    }
}
