//! Snapshot system: queries the world and builds a complete GameStateSnapshot.
//!
//! This system is read-only and never modifies the world.

use skyfury_core::components::*;
use skyfury_core::enums::*;
use skyfury_core::events::{AudioEvent, GameEvent, HudMessage};
use skyfury_core::state::*;
use skyfury_core::types::{Position, Velocity};

use skyfury_enemy_ai::boss::is_invulnerable;

use crate::context::SimContext;
use crate::systems::waves::WaveDirector;

/// Side effects of the frame being published.
#[derive(Debug, Default)]
pub struct FrameOutput {
    pub events: Vec<GameEvent>,
    pub audio: Vec<AudioEvent>,
    pub messages: Vec<HudMessage>,
}

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    ctx: &SimContext,
    phase: GamePhase,
    director: &WaveDirector,
    output: FrameOutput,
) -> GameStateSnapshot {
    let player = build_player(ctx);
    let boss = build_boss(ctx);

    let mut hud = build_hud(ctx, director);
    hud.boss_health = boss
        .as_ref()
        .filter(|b| b.max_health > 0.0)
        .map(|b| b.health / b.max_health);

    GameStateSnapshot {
        time: ctx.time,
        phase,
        player,
        enemies: build_enemies(ctx),
        boss,
        projectiles: build_projectiles(ctx),
        pickups: build_pickups(ctx),
        particles: build_particles(ctx),
        hud,
        events: output.events,
        audio_events: output.audio,
        messages: output.messages,
    }
}

fn build_player(ctx: &SimContext) -> Option<PlayerView> {
    ctx.world
        .query::<(&Lifecycle, &Player, &Position, &Velocity, &Aircraft)>()
        .iter()
        .find(|(_, (life, ..))| life.alive)
        .map(|(_, (life, _, pos, vel, aircraft))| PlayerView {
            id: life.id,
            position: *pos,
            velocity: *vel,
            mode: aircraft.mode,
            pitch_deg: aircraft.pitch_deg,
            thrust: aircraft.thrust,
            shield_active: aircraft.shield_secs > 0.0,
            invulnerable: aircraft.invulnerable_secs > 0.0,
        })
}

fn build_enemies(ctx: &SimContext) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = ctx
        .world
        .query::<(&Lifecycle, &Position, &Health, &EnemyBrain)>()
        .iter()
        .filter(|(_, (life, ..))| life.alive)
        .map(|(_, (life, pos, health, brain))| EnemyView {
            id: life.id,
            archetype: brain.archetype,
            state: brain.state,
            position: *pos,
            health: health.current,
            max_health: health.max,
        })
        .collect();
    enemies.sort_by_key(|e| e.id);
    enemies
}

fn build_boss(ctx: &SimContext) -> Option<BossView> {
    ctx.world
        .query::<(&Lifecycle, &Position, &Health, &BossBrain)>()
        .iter()
        .find(|(_, (life, ..))| life.alive)
        .map(|(_, (life, pos, health, brain))| BossView {
            id: life.id,
            archetype: brain.archetype,
            phase: brain.phase,
            position: *pos,
            health: health.current,
            max_health: health.max,
            transitioning: is_invulnerable(brain.phase, brain.transition_secs),
        })
}

fn build_projectiles(ctx: &SimContext) -> Vec<ProjectileView> {
    let mut projectiles: Vec<ProjectileView> = ctx
        .world
        .query::<(&Lifecycle, &Position, &Hitbox, &Projectile)>()
        .iter()
        .filter(|(_, (life, ..))| life.alive)
        .map(|(_, (life, pos, hitbox, projectile))| ProjectileView {
            id: life.id,
            kind: projectile.kind,
            faction: projectile.faction,
            position: *pos,
            width: hitbox.width,
            height: hitbox.height,
        })
        .collect();
    projectiles.sort_by_key(|p| p.id);
    projectiles
}

fn build_pickups(ctx: &SimContext) -> Vec<PickupView> {
    let mut pickups: Vec<PickupView> = ctx
        .world
        .query::<(&Lifecycle, &Position, &Pickup)>()
        .iter()
        .filter(|(_, (life, ..))| life.alive)
        .map(|(_, (life, pos, pickup))| PickupView {
            id: life.id,
            kind: pickup.kind,
            position: *pos,
            lifetime_secs: pickup.lifetime_secs,
        })
        .collect();
    pickups.sort_by_key(|p| p.id);
    pickups
}

fn build_particles(ctx: &SimContext) -> Vec<ParticleView> {
    let mut particles: Vec<(u64, ParticleView)> = ctx
        .world
        .query::<(&Lifecycle, &Position, &Particle)>()
        .iter()
        .filter(|(_, (life, ..))| life.alive)
        .map(|(_, (life, pos, particle))| {
            (
                life.id.0,
                ParticleView {
                    effect: particle.effect,
                    position: *pos,
                    size: particle.size,
                    color: particle.color,
                },
            )
        })
        .collect();
    particles.sort_by_key(|(id, _)| *id);
    particles.into_iter().map(|(_, view)| view).collect()
}

fn build_hud(ctx: &SimContext, director: &WaveDirector) -> HudView {
    let session = &ctx.session;
    let mut hud = HudView {
        score: session.score,
        high_score: session.high_score,
        lives: session.lives,
        level: director.level_number(),
        wave: director.wave_number(),
        waves_total: director.waves_total(),
        kills: session.kills,
        ..HudView::default()
    };

    // Counters stay readable while a downed player waits in the arena.
    let mut query = ctx
        .world
        .query::<(&Player, &Health, &Aircraft, &Loadout)>();
    if let Some((_, (_, health, aircraft, loadout))) = query.iter().next() {
        hud.health = health.current;
        hud.max_health = health.max;
        hud.fuel = aircraft.fuel;
        hud.missiles = loadout.missiles;
        hud.laser_charge = loadout.laser_charge;
        hud.shield_energy = loadout.shield_energy;
        hud.shield_active = aircraft.shield_secs > 0.0;
        hud.primary_level = loadout.primary_level;
    }
    hud
}
