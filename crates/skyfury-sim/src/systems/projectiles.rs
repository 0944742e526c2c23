//! Projectile system: homing guidance, integration, lifetime and off-screen culling.

use std::f64::consts::{PI, TAU};

use hecs::Entity;

use skyfury_core::components::{Lifecycle, Projectile};
use skyfury_core::constants::*;
use skyfury_core::enums::{EntityKind, ProjectileKind};
use skyfury_core::types::{EntityId, Position, Velocity};

use crate::context::SimContext;

/// Advance all live projectiles by one frame.
pub fn run(ctx: &mut SimContext, dt: f64) {
    steer_missiles(ctx, dt);

    for (_entity, (life, pos, vel, projectile)) in ctx
        .world
        .query_mut::<(&mut Lifecycle, &mut Position, &Velocity, &mut Projectile)>()
    {
        if !life.alive {
            continue;
        }
        *pos = pos.advanced(vel, dt);
        projectile.lifetime_secs -= dt;
        if projectile.lifetime_secs <= 0.0 || is_off_screen(pos) {
            life.alive = false;
        }
    }
}

fn is_off_screen(pos: &Position) -> bool {
    pos.x < -PROJECTILE_CULL_MARGIN
        || pos.x > SCREEN_WIDTH + PROJECTILE_CULL_MARGIN
        || pos.y < -PROJECTILE_CULL_MARGIN
        || pos.y > SCREEN_HEIGHT + PROJECTILE_CULL_MARGIN
}

/// Live enemies and bosses, sorted by id.
pub fn hostile_targets(ctx: &SimContext) -> Vec<(EntityId, Position)> {
    let mut targets: Vec<(EntityId, Position)> = ctx
        .world
        .query::<(&Lifecycle, &Position)>()
        .iter()
        .filter(|(_, (life, _))| {
            life.alive && matches!(life.kind, EntityKind::Enemy | EntityKind::Boss)
        })
        .map(|(_, (life, pos))| (life.id, *pos))
        .collect();
    targets.sort_by_key(|(id, _)| *id);
    targets
}

/// Nearest live hostile to `from`. Ties go to the earliest spawned.
pub fn nearest_target(targets: &[(EntityId, Position)], from: &Position) -> Option<EntityId> {
    targets
        .iter()
        .min_by(|a, b| from.distance_to(&a.1).total_cmp(&from.distance_to(&b.1)))
        .map(|(id, _)| *id)
}

/// Turn homing missiles toward their target at a bounded rate,
/// re-acquiring when the target no longer resolves.
fn steer_missiles(ctx: &mut SimContext, dt: f64) {
    let targets = hostile_targets(ctx);
    let max_turn = MISSILE_TURN_RATE_DEG.to_radians() * dt;

    let mut updates: Vec<(Entity, Option<EntityId>, Velocity)> = Vec::new();
    {
        let mut query = ctx
            .world
            .query::<(&Lifecycle, &Position, &Velocity, &Projectile)>();
        for (entity, (life, pos, vel, projectile)) in query.iter() {
            if !life.alive || projectile.kind != ProjectileKind::HomingMissile {
                continue;
            }
            let current = projectile
                .target
                .and_then(|id| targets.iter().find(|(t, _)| *t == id).copied());
            let target = current.or_else(|| {
                nearest_target(&targets, pos)
                    .and_then(|id| targets.iter().find(|(t, _)| *t == id).copied())
            });

            let new_vel = match target {
                Some((_, target_pos)) => {
                    let desired = (target_pos.y - pos.y).atan2(target_pos.x - pos.x);
                    let heading = vel.heading();
                    let delta = (desired - heading + PI).rem_euclid(TAU) - PI;
                    let turned = heading + delta.clamp(-max_turn, max_turn);
                    Velocity::from_angle(turned, vel.speed())
                }
                None => *vel,
            };
            updates.push((entity, target.map(|(id, _)| id), new_vel));
        }
    }

    for (entity, target, new_vel) in updates {
        if let Ok(mut projectile) = ctx.world.get::<&mut Projectile>(entity) {
            projectile.target = target;
        }
        if let Ok(mut vel) = ctx.world.get::<&mut Velocity>(entity) {
            *vel = new_vel;
        }
    }
}
