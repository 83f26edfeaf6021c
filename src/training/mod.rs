mod config;
mod trainer;

pub use config::{TrainingConfig, generate_rng};
pub use trainer::Trainer;
