//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Broad category of a simulated entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Enemy,
    Boss,
    Projectile,
    Particle,
    Pickup,
}

/// Which side fired a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Enemy,
}

/// Regular enemy types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyArchetype {
    /// Light fighter, fires straight ahead.
    Drone,
    /// Slow heavy craft, drops bombs when above the player.
    Bomber,
    /// Armored craft that tracks the player's altitude and fires aimed shots.
    Gunship,
    /// Weaving ace with a three-way spread.
    Elite,
    /// Fragile suicide craft that rams the player.
    Kamikaze,
}

/// End-of-level boss types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossArchetype {
    HiveQueen,
    AegisDefender,
    FinalDestroyer,
}

/// Enemy behavior state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    #[default]
    Patrol,
    Attack,
    Retreat,
    /// Terminal. No transitions leave this state.
    Dead,
}

/// Boss phase. Phases advance with accumulated damage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BossPhase {
    /// Flying in from off-screen; cannot be damaged.
    #[default]
    Entering,
    One,
    Two,
    Three,
    /// Terminal.
    Dead,
}

/// Projectile types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    Bullet,
    HomingMissile,
    /// Charged beam; pierces and damages continuously while it lasts.
    PlasmaLaser,
    EnemyShot,
}

/// Power-up types dropped by destroyed enemies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    Health,
    WeaponUpgrade,
    Missiles,
    Shield,
    Score,
}

/// Visual particle effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticleEffect {
    Explosion,
    BossExplosion,
    PlayerExplosion,
    HitSpark,
    ShieldHit,
    EngineTrail,
    PickupCollect,
}

/// Flight mode of the player aircraft.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightMode {
    /// On the ground: taxiing, takeoff roll, or after landing.
    #[default]
    Runway,
    /// Airborne under lift and gravity, climbing away from the runway.
    Climbout,
    /// Arcade combat control.
    Combat,
}

/// Top-level game phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    MainMenu,
    Active,
    Paused,
    /// Boss defeated; short intermission before the next level.
    LevelComplete,
    GameOver,
    /// Final level cleared.
    Victory,
}

/// Sound effects the frontend may play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    Shoot,
    Missile,
    Laser,
    Explosion,
    PlayerExplosion,
    Hit,
    Powerup,
    ShieldHit,
    Shield,
    LevelComplete,
    GameOver,
}

/// Background music tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MusicTrack {
    Menu,
    Level,
    Boss,
}
