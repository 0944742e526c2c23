//! Error types for the simulation crate.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    #[error("Unknown level {0} (levels are numbered 1 to {})", skyfury_core::constants::LEVEL_COUNT)]
    UnknownLevel(u32),
    #[error("Invalid simulation config: {0}")]
    InvalidConfig(String),
}
