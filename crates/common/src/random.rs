//! Random source construction for selection.
//!
//! Selection never reaches for a global generator; callers pass one in.
//! This module builds that generator from configuration.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Build a generator, seeded when a seed is given and from OS entropy otherwise.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
