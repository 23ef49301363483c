pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod types;

pub use color::*;
pub use config::{SimConfig, SpinLaw};
pub use constants::*;
pub use error::{ConfigError, SpawnError};
pub use types::*;

pub use glam::DVec2;
