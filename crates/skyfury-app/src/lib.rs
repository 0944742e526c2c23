//! Headless runner for SKY FURY: configuration, asset manifest, audio and
//! HUD plumbing, and the paced game loop around the simulation engine.

pub mod assets;
pub mod audio;
pub mod config;
pub mod error;
pub mod game_loop;
pub mod hud;
pub mod input;
pub mod logging;

pub use skyfury_core as core;
