//! Entity spawn factories.
//!
//! Creates the player, enemies, bosses, projectiles and pickups with
//! appropriate component bundles.

use hecs::{Entity, EntityBuilder};

use skyfury_core::components::*;
use skyfury_core::constants::*;
use skyfury_core::enums::*;
use skyfury_core::events::GameEvent;
use skyfury_core::types::{EntityId, Position, Velocity};

use skyfury_enemy_ai::profiles::{get_boss_profile, get_profile};

use crate::context::SimContext;

/// Fresh aircraft parked on the runway.
pub fn runway_aircraft(invulnerable_secs: f64) -> Aircraft {
    Aircraft {
        mode: FlightMode::Runway,
        thrust: 0.0,
        pitch_deg: 0.0,
        brakes: false,
        fuel: PLAYER_MAX_FUEL,
        mode_secs: 0.0,
        transition_secs: 0.0,
        invulnerable_secs,
        shield_secs: 0.0,
    }
}

pub fn starting_loadout() -> Loadout {
    Loadout {
        primary_level: 1,
        missiles: MISSILE_START_AMMO,
        laser_charge: 0.0,
        laser_charging: false,
        shield_energy: SHIELD_START_ENERGY,
        primary_cooldown: 0.0,
        missile_cooldown: 0.0,
        laser_cooldown: 0.0,
        shield_cooldown: 0.0,
    }
}

/// Spawn the player at the start of the runway.
pub fn spawn_player(ctx: &mut SimContext, loadout: Loadout) -> EntityId {
    let mut builder = EntityBuilder::new();
    builder
        .add(Player)
        .add(Position::new(PLAYER_START_X, GROUND_LEVEL))
        .add(Velocity::default())
        .add(Hitbox {
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
        })
        .add(Health {
            current: PLAYER_MAX_HEALTH,
            max: PLAYER_MAX_HEALTH,
        })
        .add(runway_aircraft(0.0))
        .add(loadout);
    ctx.spawn(EntityKind::Player, &mut builder)
}

/// Put a downed player back on the runway with full health and a grace period.
pub fn respawn_player(ctx: &mut SimContext, entity: Entity) {
    if let Ok((life, pos, vel, health, aircraft)) = ctx.world.query_one_mut::<(
        &mut Lifecycle,
        &mut Position,
        &mut Velocity,
        &mut Health,
        &mut Aircraft,
    )>(entity)
    {
        life.alive = true;
        *pos = Position::new(PLAYER_START_X, GROUND_LEVEL);
        *vel = Velocity::default();
        health.current = health.max;
        *aircraft = runway_aircraft(RESPAWN_INVULNERABILITY_SECS);
    }
}

/// Spawn a regular enemy just off the right edge at row `y`.
pub fn spawn_enemy(ctx: &mut SimContext, archetype: EnemyArchetype, y: f64) -> EntityId {
    let profile = get_profile(archetype);
    let mut builder = EntityBuilder::new();
    builder
        .add(Position::new(ENEMY_SPAWN_X, y))
        .add(Velocity::new(-profile.speed, 0.0))
        .add(Hitbox {
            width: profile.size,
            height: profile.size,
        })
        .add(Health {
            current: profile.max_health,
            max: profile.max_health,
        })
        .add(EnemyBrain {
            archetype,
            state: EnemyState::Patrol,
            state_secs: 0.0,
            attack_cooldown: 0.5,
            shots_in_burst: 0,
            fled: false,
            age_secs: 0.0,
        });
    ctx.spawn(EntityKind::Enemy, &mut builder)
}

/// Spawn a boss at its entry point.
pub fn spawn_boss(ctx: &mut SimContext, archetype: BossArchetype) -> EntityId {
    let profile = get_boss_profile(archetype);
    let mut builder = EntityBuilder::new();
    builder
        .add(Position::new(BOSS_ENTRY_X, BOSS_CENTER_Y))
        .add(Velocity::default())
        .add(Hitbox {
            width: profile.size,
            height: profile.size,
        })
        .add(Health {
            current: profile.max_health,
            max: profile.max_health,
        })
        .add(BossBrain {
            archetype,
            phase: BossPhase::Entering,
            transition_secs: 0.0,
            attack_cooldown: 0.0,
            active_secs: 0.0,
            volleys: 0,
        });
    let id = ctx.spawn(EntityKind::Boss, &mut builder);
    ctx.emit(GameEvent::BossSpawned { id, archetype });
    id
}

/// Parameters of a projectile launch.
#[derive(Debug, Clone)]
pub struct ProjectileSpec {
    pub kind: ProjectileKind,
    pub faction: Faction,
    pub owner: Option<EntityId>,
    pub position: Position,
    pub velocity: Velocity,
    pub width: f64,
    pub height: f64,
    pub damage: f64,
    pub lifetime_secs: f64,
    pub piercing: bool,
    pub target: Option<EntityId>,
}

impl ProjectileSpec {
    /// Standard enemy round fired from `position`.
    pub fn enemy_shot(owner: EntityId, position: Position, velocity: Velocity) -> Self {
        Self {
            kind: ProjectileKind::EnemyShot,
            faction: Faction::Enemy,
            owner: Some(owner),
            position,
            velocity,
            width: ENEMY_SHOT_SIZE,
            height: ENEMY_SHOT_SIZE,
            damage: ENEMY_SHOT_DAMAGE,
            lifetime_secs: ENEMY_SHOT_LIFETIME_SECS,
            piercing: false,
            target: None,
        }
    }

    /// Primary-gun bullet.
    pub fn bullet(owner: EntityId, position: Position, velocity: Velocity) -> Self {
        Self {
            kind: ProjectileKind::Bullet,
            faction: Faction::Player,
            owner: Some(owner),
            position,
            velocity,
            width: BULLET_SIZE,
            height: BULLET_SIZE,
            damage: BULLET_DAMAGE,
            lifetime_secs: BULLET_LIFETIME_SECS,
            piercing: false,
            target: None,
        }
    }
}

pub fn spawn_projectile(ctx: &mut SimContext, spec: ProjectileSpec) -> EntityId {
    let mut builder = EntityBuilder::new();
    builder
        .add(spec.position)
        .add(spec.velocity)
        .add(Hitbox {
            width: spec.width,
            height: spec.height,
        })
        .add(Projectile {
            kind: spec.kind,
            faction: spec.faction,
            owner: spec.owner,
            damage: spec.damage,
            lifetime_secs: spec.lifetime_secs,
            piercing: spec.piercing,
            target: spec.target,
        });
    let id = ctx.spawn(EntityKind::Projectile, &mut builder);
    ctx.emit(GameEvent::ProjectileFired {
        id,
        kind: spec.kind,
        faction: spec.faction,
    });
    id
}

pub fn spawn_pickup(ctx: &mut SimContext, kind: PickupKind, position: Position) -> EntityId {
    let mut builder = EntityBuilder::new();
    builder
        .add(position)
        .add(Velocity::new(PICKUP_DRIFT_SPEED, 0.0))
        .add(Hitbox {
            width: PICKUP_SIZE,
            height: PICKUP_SIZE,
        })
        .add(Pickup {
            kind,
            lifetime_secs: PICKUP_LIFETIME_SECS,
        });
    let id = ctx.spawn(EntityKind::Pickup, &mut builder);
    ctx.emit(GameEvent::PickupDropped { id, kind, position });
    id
}
