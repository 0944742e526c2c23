//! Game state snapshot: the complete visible state handed to the frontend each frame.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{AudioEvent, GameEvent, HudMessage};
use crate::types::{EntityId, Position, SimTime, Velocity};

/// Complete game state published after each frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub player: Option<PlayerView>,
    pub enemies: Vec<EnemyView>,
    pub boss: Option<BossView>,
    pub projectiles: Vec<ProjectileView>,
    pub pickups: Vec<PickupView>,
    pub particles: Vec<ParticleView>,
    pub hud: HudView,
    pub events: Vec<GameEvent>,
    pub audio_events: Vec<AudioEvent>,
    pub messages: Vec<HudMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: EntityId,
    pub position: Position,
    pub velocity: Velocity,
    pub mode: FlightMode,
    pub pitch_deg: f64,
    pub thrust: f64,
    pub shield_active: bool,
    pub invulnerable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: EntityId,
    pub archetype: EnemyArchetype,
    pub state: EnemyState,
    pub position: Position,
    pub health: f64,
    pub max_health: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossView {
    pub id: EntityId,
    pub archetype: BossArchetype,
    pub phase: BossPhase,
    pub position: Position,
    pub health: f64,
    pub max_health: f64,
    /// True while the boss is changing phase and ignores damage.
    pub transitioning: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: EntityId,
    pub kind: ProjectileKind,
    pub faction: Faction,
    pub position: Position,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupView {
    pub id: EntityId,
    pub kind: PickupKind,
    pub position: Position,
    /// Remaining lifetime; frontends blink pickups that are about to expire.
    pub lifetime_secs: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleView {
    pub effect: ParticleEffect,
    pub position: Position,
    pub size: f64,
    pub color: [u8; 3],
}

/// Counters shown on the heads-up display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HudView {
    pub score: u64,
    pub high_score: u64,
    pub lives: u32,
    pub health: f64,
    pub max_health: f64,
    pub fuel: f64,
    pub missiles: u32,
    pub laser_charge: f64,
    pub shield_energy: f64,
    pub shield_active: bool,
    pub primary_level: u8,
    /// Current level (1-based), 0 in practice or menus.
    pub level: u32,
    /// Current wave (1-based), 0 before the first wave.
    pub wave: usize,
    pub waves_total: usize,
    pub kills: u32,
    /// Remaining boss health as a fraction, while a boss is alive.
    pub boss_health: Option<f64>,
}
