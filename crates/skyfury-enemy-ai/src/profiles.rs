//! Archetype-specific behavioral profiles.
//!
//! Consolidates per-archetype parameters for the enemy FSM and boss machine.

use skyfury_core::constants::{ENEMY_SIZE, KAMIKAZE_SIZE};
use skyfury_core::enums::{BossArchetype, EnemyArchetype};

/// Vertical weave applied on top of horizontal travel:
/// `vy = primary_amp * sin(t * primary_freq) + secondary_amp * cos(t * secondary_freq)`.
#[derive(Debug, Clone, Copy)]
pub struct Weave {
    pub primary_amp: f64,
    pub primary_freq: f64,
    pub secondary_amp: f64,
    pub secondary_freq: f64,
}

impl Weave {
    const NONE: Weave = Weave {
        primary_amp: 0.0,
        primary_freq: 0.0,
        secondary_amp: 0.0,
        secondary_freq: 0.0,
    };

    /// Vertical speed (px/s) at `t` seconds.
    pub fn vertical_speed(&self, t: f64) -> f64 {
        self.primary_amp * (t * self.primary_freq).sin()
            + self.secondary_amp * (t * self.secondary_freq).cos()
    }
}

/// Behavioral profile for an enemy archetype.
#[derive(Debug, Clone)]
pub struct EnemyProfile {
    pub max_health: f64,
    /// Cruise speed (px/s).
    pub speed: f64,
    /// Damage dealt to the player on contact.
    pub contact_damage: f64,
    /// Points awarded on kill.
    pub score: u64,
    /// Square hitbox edge (px).
    pub size: f64,
    /// Distance to the player at which Patrol becomes Attack (px).
    pub attack_range: f64,
    /// Seconds between shots while attacking.
    pub fire_cooldown: f64,
    /// Shots per attack run before backing off. `None` never retreats on ammo.
    pub burst_size: Option<u32>,
    /// Health fraction below which the enemy flees once. `None` never flees.
    pub retreat_health_fraction: Option<f64>,
    /// How long a retreat lasts before resuming patrol.
    pub retreat_secs: f64,
    /// Fraction of cruise speed used while retreating.
    pub retreat_speed_factor: f64,
    /// Speed of fired projectiles (px/s).
    pub shot_speed: f64,
    pub weave: Weave,
}

/// Get the behavioral profile for a given archetype.
pub fn get_profile(archetype: EnemyArchetype) -> EnemyProfile {
    match archetype {
        EnemyArchetype::Drone => EnemyProfile {
            max_health: 30.0,
            speed: 120.0,
            contact_damage: 10.0,
            score: 100,
            size: ENEMY_SIZE,
            attack_range: 650.0,
            fire_cooldown: 2.0,
            burst_size: Some(3),
            retreat_health_fraction: None,
            retreat_secs: 1.5,
            retreat_speed_factor: 0.5,
            shot_speed: 300.0,
            weave: Weave {
                primary_amp: 90.0,
                primary_freq: 2.0,
                ..Weave::NONE
            },
        },
        EnemyArchetype::Bomber => EnemyProfile {
            max_health: 60.0,
            speed: 90.0,
            contact_damage: 15.0,
            score: 200,
            size: ENEMY_SIZE,
            attack_range: 600.0,
            fire_cooldown: 2.5,
            burst_size: Some(2),
            retreat_health_fraction: Some(0.25),
            retreat_secs: 1.5,
            retreat_speed_factor: 0.5,
            shot_speed: 216.0,
            weave: Weave {
                primary_amp: 48.0,
                primary_freq: 1.5,
                ..Weave::NONE
            },
        },
        EnemyArchetype::Gunship => EnemyProfile {
            max_health: 100.0,
            speed: 108.0,
            contact_damage: 20.0,
            score: 300,
            size: ENEMY_SIZE,
            attack_range: 650.0,
            fire_cooldown: 1.8,
            burst_size: Some(4),
            retreat_health_fraction: Some(0.3),
            retreat_secs: 2.0,
            retreat_speed_factor: 0.5,
            shot_speed: 240.0,
            weave: Weave::NONE,
        },
        EnemyArchetype::Elite => EnemyProfile {
            max_health: 150.0,
            speed: 132.0,
            contact_damage: 25.0,
            score: 400,
            size: ENEMY_SIZE,
            attack_range: 700.0,
            fire_cooldown: 1.2,
            burst_size: Some(4),
            retreat_health_fraction: Some(0.35),
            retreat_secs: 1.0,
            retreat_speed_factor: 0.75,
            shot_speed: 300.0,
            weave: Weave {
                primary_amp: 120.0,
                primary_freq: 3.0,
                secondary_amp: 60.0,
                secondary_freq: 1.5,
            },
        },
        EnemyArchetype::Kamikaze => EnemyProfile {
            max_health: 20.0,
            speed: 240.0,
            contact_damage: 40.0,
            score: 150,
            size: KAMIKAZE_SIZE,
            attack_range: 900.0,
            fire_cooldown: 0.0,
            burst_size: None,
            retreat_health_fraction: None,
            retreat_secs: 0.0,
            retreat_speed_factor: 0.0,
            shot_speed: 0.0,
            weave: Weave::NONE,
        },
    }
}

/// Static parameters of a boss archetype.
#[derive(Debug, Clone)]
pub struct BossProfile {
    pub name: &'static str,
    pub max_health: f64,
    /// Square hitbox edge (px).
    pub size: f64,
    pub score: u64,
}

pub fn get_boss_profile(archetype: BossArchetype) -> BossProfile {
    match archetype {
        BossArchetype::HiveQueen => BossProfile {
            name: "HIVE QUEEN",
            max_health: 800.0,
            size: 300.0,
            score: 5000,
        },
        BossArchetype::AegisDefender => BossProfile {
            name: "AEGIS DEFENDER",
            max_health: 1200.0,
            size: 360.0,
            score: 8000,
        },
        BossArchetype::FinalDestroyer => BossProfile {
            name: "FINAL DESTROYER",
            max_health: 1800.0,
            size: 440.0,
            score: 15000,
        },
    }
}
