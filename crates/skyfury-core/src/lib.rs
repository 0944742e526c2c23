//! Core types and definitions for the SKY FURY simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, components, commands, input, state snapshots, events, and
//! constants. It has no dependency on the ECS or any runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod input;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
