use rand::Rng;
use tracing::{debug, trace};

use crate::config::InitConfig;
use crate::error::{Result, SimError};
use crate::spins::{spin_correlation, SpinField};

/// Draw a disordered starting field by rejection.
///
/// The whole field is redrawn (uniform angles in `[0, 2π)`) until its
/// correlation satisfies `|c| < threshold`. Returns the field and the number
/// of draws it took, or [`SimError::InitExhausted`] after `max_attempts`.
pub fn initial_spins<R: Rng + ?Sized>(
    n: usize,
    rng: &mut R,
    init: &InitConfig,
) -> Result<(SpinField, usize)> {
    init.check()?;
    let mut field = SpinField::aligned(n, 0.0)?;

    for attempt in 1..=init.max_attempts {
        field.randomize(rng);
        let c = spin_correlation(&field);
        trace!(attempt, correlation = c, "initial field draw");
        if c.abs() < init.threshold {
            debug!(n, attempt, correlation = c, "accepted initial field");
            return Ok((field, attempt));
        }
    }

    Err(SimError::InitExhausted {
        attempts: init.max_attempts,
        threshold: init.threshold,
    })
}
