//! ECS systems that operate on the simulation context each frame.
//!
//! Systems are free functions over `&mut SimContext`. They keep no state of
//! their own apart from the wave director, which the engine owns.

pub mod aircraft;
pub mod cleanup;
pub mod collision;
pub mod enemy_ai;
pub mod particles;
pub mod pickups;
pub mod projectiles;
pub mod snapshot;
pub mod waves;
pub mod weapons;
