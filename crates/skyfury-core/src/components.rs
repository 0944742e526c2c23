//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::EntityId;

/// Identity and liveness shared by every simulated entity.
///
/// `alive` is cleared by whichever system kills the entity; the entity
/// stays in the world (and out of every later collision pass) until the
/// end-of-frame cull.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Lifecycle {
    pub id: EntityId,
    pub kind: EntityKind,
    pub alive: bool,
}

/// Collision box size, centered on the entity's position (pixels).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hitbox {
    pub width: f64,
    pub height: f64,
}

/// Hit points.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: f64,
    pub max: f64,
}

/// Marks the player's aircraft.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;

/// Flight state of the player aircraft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aircraft {
    pub mode: FlightMode,
    /// Throttle, 0..=100 percent.
    pub thrust: f64,
    /// Nose-up pitch in degrees.
    pub pitch_deg: f64,
    pub brakes: bool,
    /// Remaining fuel, 0..=100.
    pub fuel: f64,
    /// Seconds spent in the current flight mode.
    pub mode_secs: f64,
    /// Remaining seconds of the climb-to-combat glide.
    pub transition_secs: f64,
    /// Remaining seconds of damage immunity.
    pub invulnerable_secs: f64,
    /// Remaining seconds of active shield.
    pub shield_secs: f64,
}

/// Player weapon inventory and cooldowns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loadout {
    /// Primary gun level, 1..=3.
    pub primary_level: u8,
    pub missiles: u32,
    /// Plasma laser charge, 0..=100.
    pub laser_charge: f64,
    /// Whether the charge button was held last frame.
    pub laser_charging: bool,
    /// Shield energy, 0..=100.
    pub shield_energy: f64,
    pub primary_cooldown: f64,
    pub missile_cooldown: f64,
    pub laser_cooldown: f64,
    pub shield_cooldown: f64,
}

/// Enemy AI state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyBrain {
    pub archetype: EnemyArchetype,
    pub state: EnemyState,
    /// Seconds since the current state was entered.
    pub state_secs: f64,
    /// Seconds until the next shot is allowed.
    pub attack_cooldown: f64,
    /// Shots fired since entering Attack.
    pub shots_in_burst: u32,
    /// Set once the enemy has fled on low health; it will not flee again.
    pub fled: bool,
    /// Seconds since spawn (drives weave patterns).
    pub age_secs: f64,
}

/// Boss AI state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossBrain {
    pub archetype: BossArchetype,
    pub phase: BossPhase,
    /// Remaining seconds of a phase change. Bosses are immune and idle meanwhile.
    pub transition_secs: f64,
    /// Seconds until the next volley.
    pub attack_cooldown: f64,
    /// Seconds since the boss finished entering (drives movement and spirals).
    pub active_secs: f64,
    /// Volleys fired in the current phase.
    pub volleys: u32,
}

/// A projectile in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub faction: Faction,
    /// Firing entity. Held by id only; may no longer resolve.
    pub owner: Option<EntityId>,
    /// Damage per hit, or per second for piercing beams.
    pub damage: f64,
    pub lifetime_secs: f64,
    /// Piercing projectiles are not consumed on hit.
    pub piercing: bool,
    /// Homing target, if any.
    pub target: Option<EntityId>,
}

/// Visual-only particle. Never collides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub effect: ParticleEffect,
    pub age_secs: f64,
    pub max_age_secs: f64,
    pub size: f64,
    pub initial_size: f64,
    pub color: [u8; 3],
}

/// A collectible power-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: PickupKind,
    pub lifetime_secs: f64,
}
