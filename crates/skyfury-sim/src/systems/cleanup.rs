//! Cleanup system: end-of-frame death effects and culling of dead entities.

use hecs::Entity;

use skyfury_core::components::{Health, Lifecycle};
use skyfury_core::enums::{EntityKind, ParticleEffect, SoundCue};
use skyfury_core::events::GameEvent;
use skyfury_core::types::{EntityId, Position};

use crate::context::SimContext;
use crate::systems::{particles, pickups};
use crate::world_setup;

/// What the cull pass found that the engine has to act on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub boss_defeated: bool,
    pub game_over: bool,
}

/// Spawn death effects for combatants killed this frame, then cull every
/// dead entity. The player is respawned on the runway while lives remain.
pub fn run(ctx: &mut SimContext) -> CleanupReport {
    let mut dead: Vec<(Entity, EntityId, EntityKind, Position, bool)> = ctx
        .world
        .query::<(&Lifecycle, Option<&Position>, Option<&Health>)>()
        .iter()
        .filter(|(_, (life, _, _))| !life.alive)
        .map(|(entity, (life, pos, health))| {
            let killed = health.is_some_and(|h| h.current <= 0.0);
            (entity, life.id, life.kind, pos.copied().unwrap_or_default(), killed)
        })
        .collect();
    dead.sort_by_key(|(_, id, ..)| *id);

    let mut report = CleanupReport::default();
    for (entity, id, kind, position, killed) in dead {
        match kind {
            EntityKind::Enemy if killed => {
                destroyed(ctx, id, kind, position, ParticleEffect::Explosion);
                ctx.sound(SoundCue::Explosion);
                pickups::maybe_drop(ctx, position);
                ctx.despawn(id);
            }
            EntityKind::Boss if killed => {
                destroyed(ctx, id, kind, position, ParticleEffect::BossExplosion);
                ctx.sound(SoundCue::Explosion);
                pickups::boss_drop(ctx, position);
                ctx.message("BOSS DEFEATED!", skyfury_core::constants::MESSAGE_LONG_SECS);
                ctx.despawn(id);
                report.boss_defeated = true;
            }
            EntityKind::Player => {
                destroyed(ctx, id, kind, position, ParticleEffect::PlayerExplosion);
                ctx.sound(SoundCue::PlayerExplosion);
                ctx.session.lives = ctx.session.lives.saturating_sub(1);
                let lives_remaining = ctx.session.lives;
                ctx.emit(GameEvent::LifeLost { lives_remaining });
                log::info!("Player down, {lives_remaining} lives remaining");
                if lives_remaining > 0 {
                    world_setup::respawn_player(ctx, entity);
                } else {
                    ctx.despawn(id);
                    report.game_over = true;
                }
            }
            _ => ctx.despawn(id),
        }
    }
    report
}

/// One `Destroyed` event, one `ParticleBurst` event and the burst itself.
fn destroyed(
    ctx: &mut SimContext,
    id: EntityId,
    kind: EntityKind,
    position: Position,
    effect: ParticleEffect,
) {
    ctx.emit(GameEvent::Destroyed { id, kind, position });
    ctx.emit(GameEvent::ParticleBurst {
        source: id,
        effect,
        position,
    });
    particles::spawn_effect(ctx, effect, position);
}
