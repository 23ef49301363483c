//! Error types for body creation and config loading.
//!
//! The simulation itself never fails: numerical trouble is recovered locally and
//! configuration values are clamped. The only rejected input is a body that
//! could not exist physically, or a config file that cannot be read.

use std::fmt;

/// Reasons a spawn request is refused
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnError {
    /// Mass must be strictly positive
    InvalidMass(f64),
    /// Position or velocity contained NaN or infinity
    NonFinite,
}

impl fmt::Display for SpawnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpawnError::InvalidMass(m) => {
                write!(f, "Body mass must be positive and finite, got {}", m)
            }
            SpawnError::NonFinite => write!(f, "Body position and velocity must be finite"),
        }
    }
}

impl std::error::Error for SpawnError {}

/// Reasons a config file could not be loaded
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_yaml::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "I/O error: {}", e),
            ConfigError::Parse(e) => write!(f, "YAML error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        ConfigError::Parse(e)
    }
}
