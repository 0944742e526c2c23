//! Enemy AI for SKY FURY.
//!
//! Implements the per-enemy behavior state machine, the boss phase
//! machine, and archetype-driven behavior profiles. Everything here is a
//! pure function over plain data; the simulation applies the results.

pub mod boss;
pub mod fsm;
pub mod profiles;

pub use skyfury_core as core;

#[cfg(test)]
mod tests;
