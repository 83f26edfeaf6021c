pub mod arch;
pub mod config;
pub mod dataset;
pub mod error;
pub mod persistence;
pub mod training;

pub use arch::{Archetype, Network};
pub use config::NetworkOptions;
pub use error::{NetErr, Result};
