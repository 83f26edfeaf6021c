use std::num::NonZeroUsize;

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

/// The knobs of a training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub epochs: NonZeroUsize,
    /// Makes the weights and the shuffling reproducible when set.
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            epochs: NonZeroUsize::new(100).unwrap_or(NonZeroUsize::MIN),
            seed: None,
        }
    }
}

/// Builds the random generator for a run, seeded if `seed` is given and from the OS otherwise.
pub fn generate_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
