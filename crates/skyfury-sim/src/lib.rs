//! Simulation engine for SKY FURY.
//!
//! Owns the hecs entity arena, runs the per-frame systems in a fixed
//! order, and produces GameStateSnapshots for the frontend.

pub mod context;
pub mod engine;
pub mod error;
pub mod levels;
pub mod systems;
pub mod world_setup;

pub use engine::{FrameReport, SimConfig, SimulationEngine};
pub use error::SimError;
pub use skyfury_core as core;
