//! Events emitted by the simulation for audio, particle and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{EntityId, Position};

/// Gameplay side effects produced by one simulation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A projectile was launched.
    ProjectileFired {
        id: EntityId,
        kind: ProjectileKind,
        faction: Faction,
    },
    /// Damage was applied (or absorbed by the shield).
    Damage {
        target: EntityId,
        source: EntityId,
        amount: f64,
        remaining: f64,
        shielded: bool,
    },
    /// A combatant died this frame.
    Destroyed {
        id: EntityId,
        kind: EntityKind,
        position: Position,
    },
    /// A particle burst was spawned for a newly-dead combatant.
    ParticleBurst {
        source: EntityId,
        effect: ParticleEffect,
        position: Position,
    },
    PickupDropped {
        id: EntityId,
        kind: PickupKind,
        position: Position,
    },
    PickupCollected {
        id: EntityId,
        kind: PickupKind,
    },
    TookOff,
    Landed,
    Crashed,
    LifeLost {
        lives_remaining: u32,
    },
    WaveStarted {
        level: u32,
        wave: usize,
    },
    BossSpawned {
        id: EntityId,
        archetype: BossArchetype,
    },
    BossPhaseChanged {
        id: EntityId,
        phase: BossPhase,
    },
    LevelComplete {
        level: u32,
    },
    GameOver {
        score: u64,
    },
    Victory {
        score: u64,
    },
}

/// Audio requests for the frontend sound system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    PlaySound { cue: SoundCue },
    PlayMusic { track: MusicTrack, looped: bool },
    StopMusic,
}

/// Transient banner text for the HUD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudMessage {
    pub text: String,
    pub duration_secs: f64,
    /// Frame on which the message was raised.
    pub frame: u64,
}
