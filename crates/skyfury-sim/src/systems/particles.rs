//! Particle system: spawns and ages visual-only particles.
//!
//! Particles never collide. They drift, slow down, shrink linearly with
//! age, and are culled when their lifetime runs out.

use std::f64::consts::{PI, TAU};

use hecs::EntityBuilder;
use rand::Rng;

use skyfury_core::components::{Lifecycle, Particle};
use skyfury_core::constants::{MAX_PARTICLES, REFERENCE_FPS};
use skyfury_core::enums::{EntityKind, ParticleEffect};
use skyfury_core::types::{Position, Velocity};

use crate::context::SimContext;

/// Per-reference-frame velocity damping.
const PARTICLE_DRAG: f64 = 0.95;

/// Shape of a particle burst.
struct BurstSpec {
    count: usize,
    size: (f64, f64),
    speed: (f64, f64),
    lifetime: (f64, f64),
    /// Emission cone: (center angle, half width) in radians.
    cone: (f64, f64),
    colors: &'static [[u8; 3]],
}

const FIRE: &[[u8; 3]] = &[[255, 200, 50], [255, 120, 0], [255, 60, 0], [200, 200, 200]];
const SPARK: &[[u8; 3]] = &[[255, 255, 150], [255, 220, 80]];
const SHIELD: &[[u8; 3]] = &[[100, 200, 255], [150, 230, 255]];
const EXHAUST: &[[u8; 3]] = &[[255, 180, 60], [255, 120, 40]];
const SPARKLE: &[[u8; 3]] = &[[120, 255, 120], [255, 255, 255]];

fn burst_spec(effect: ParticleEffect) -> BurstSpec {
    let full = (0.0, PI);
    match effect {
        ParticleEffect::Explosion | ParticleEffect::BossExplosion => BurstSpec {
            count: if effect == ParticleEffect::BossExplosion { 40 } else { 50 },
            size: (20.0, 50.0),
            speed: (180.0, 720.0),
            lifetime: (0.5, 1.5),
            cone: full,
            colors: FIRE,
        },
        ParticleEffect::PlayerExplosion => BurstSpec {
            count: 100,
            size: (20.0, 50.0),
            speed: (180.0, 720.0),
            lifetime: (0.5, 1.5),
            cone: full,
            colors: FIRE,
        },
        ParticleEffect::HitSpark => BurstSpec {
            count: 20,
            size: (2.0, 8.0),
            speed: (120.0, 360.0),
            lifetime: (0.2, 0.5),
            cone: full,
            colors: SPARK,
        },
        ParticleEffect::ShieldHit => BurstSpec {
            count: 25,
            size: (3.0, 8.0),
            speed: (300.0, 900.0),
            lifetime: (0.3, 0.7),
            cone: full,
            colors: SHIELD,
        },
        ParticleEffect::EngineTrail => BurstSpec {
            count: 1,
            size: (3.0, 6.0),
            speed: (60.0, 120.0),
            lifetime: (0.2, 0.5),
            cone: (PI, 0.35),
            colors: EXHAUST,
        },
        ParticleEffect::PickupCollect => BurstSpec {
            count: 20,
            size: (3.0, 6.0),
            speed: (120.0, 300.0),
            lifetime: (0.4, 0.8),
            cone: full,
            colors: SPARKLE,
        },
    }
}

/// Spawn the particles of `effect` at `position`. Returns how many were spawned.
pub fn spawn_effect(ctx: &mut SimContext, effect: ParticleEffect, position: Position) -> usize {
    if effect == ParticleEffect::BossExplosion {
        // Several explosions scattered over the hull.
        let mut spawned = 0;
        for _ in 0..8 {
            let offset = Position::new(
                position.x + ctx.rng.gen_range(-100.0..=100.0),
                position.y + ctx.rng.gen_range(-100.0..=100.0),
            );
            spawned += spawn_burst(ctx, effect, offset, burst_spec(effect).count);
        }
        return spawned;
    }
    let count = burst_spec(effect).count;
    spawn_burst(ctx, effect, position, count)
}

/// Spawn up to `count` particles of `effect`, respecting the live-particle cap.
pub fn spawn_burst(
    ctx: &mut SimContext,
    effect: ParticleEffect,
    position: Position,
    count: usize,
) -> usize {
    let live = ctx.world.query::<&Particle>().iter().count();
    let count = count.min(MAX_PARTICLES.saturating_sub(live));
    let spec = burst_spec(effect);

    for _ in 0..count {
        let angle = (spec.cone.0 + ctx.rng.gen_range(-spec.cone.1..=spec.cone.1)).rem_euclid(TAU);
        let speed = ctx.rng.gen_range(spec.speed.0..=spec.speed.1);
        let size = ctx.rng.gen_range(spec.size.0..=spec.size.1);
        let lifetime = ctx.rng.gen_range(spec.lifetime.0..=spec.lifetime.1);
        let color = spec.colors[ctx.rng.gen_range(0..spec.colors.len())];

        let mut builder = EntityBuilder::new();
        builder
            .add(position)
            .add(Velocity::from_angle(angle, speed))
            .add(Particle {
                effect,
                age_secs: 0.0,
                max_age_secs: lifetime,
                size,
                initial_size: size,
                color,
            });
        ctx.spawn(EntityKind::Particle, &mut builder);
    }
    count
}

/// Age, move and shrink all particles; expire the ones past their lifetime.
pub fn run(ctx: &mut SimContext, dt: f64) {
    let damping = PARTICLE_DRAG.powf(dt * REFERENCE_FPS);
    for (_entity, (life, pos, vel, particle)) in ctx
        .world
        .query_mut::<(&mut Lifecycle, &mut Position, &mut Velocity, &mut Particle)>()
    {
        if !life.alive {
            continue;
        }
        *pos = pos.advanced(vel, dt);
        vel.x *= damping;
        vel.y *= damping;
        particle.age_secs += dt;
        if particle.age_secs >= particle.max_age_secs {
            life.alive = false;
            particle.size = 0.0;
        } else {
            particle.size = particle.initial_size * (1.0 - particle.age_secs / particle.max_age_secs);
        }
    }
}
