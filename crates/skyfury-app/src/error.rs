//! Error types for the runner binary.

use std::path::PathBuf;

use thiserror::Error;

use skyfury_sim::SimError;

/// Failure to load or validate the runner configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid frame rate {0} (must be between 1 and 1000)")]
    InvalidFrameRate(u32),
    #[error("Volume {name} = {value} is outside 0.0..=1.0")]
    InvalidVolume { name: &'static str, value: f64 },
}

/// Unrecoverable asset problems. A missing sprite is not one of them.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Asset root {0} is not a directory")]
    NotADirectory(PathBuf),
    #[error("Cannot read asset root {path}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error("Simulation setup failed: {0}")]
    Sim(#[from] SimError),
}
