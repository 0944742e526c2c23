//! Enemy AI system: evaluates FSMs for enemies and bosses, applies the
//! resulting motion and spawns their shots.

use hecs::Entity;

use skyfury_core::components::{BossBrain, EnemyBrain, Health, Hitbox, Lifecycle};
use skyfury_core::constants::*;
use skyfury_core::enums::{BossPhase, EnemyState};
use skyfury_core::events::GameEvent;
use skyfury_core::types::{EntityId, Position, Velocity};

use skyfury_enemy_ai::boss::{evaluate_boss, BossContext, BossUpdate};
use skyfury_enemy_ai::fsm::{evaluate, EnemyContext, EnemyUpdate};

use crate::context::SimContext;
use crate::world_setup::{self, ProjectileSpec};

/// Enemies pushed this far past the right edge by a retreat are dropped.
const OFFSCREEN_RIGHT_LIMIT: f64 = SCREEN_WIDTH + 200.0;

/// Run enemy and boss AI for one frame.
pub fn run(ctx: &mut SimContext, dt: f64) {
    let player_position = ctx.player_position();
    run_enemies(ctx, player_position, dt);
    run_bosses(ctx, player_position, dt);
}

fn run_enemies(ctx: &mut SimContext, player_position: Option<Position>, dt: f64) {
    // Collect decisions first, then apply, to keep world borrows short.
    let mut decisions: Vec<(Entity, EntityId, Position, f64, EnemyUpdate)> = Vec::new();
    {
        let mut query = ctx
            .world
            .query::<(&Lifecycle, &Position, &Health, &Hitbox, &EnemyBrain)>();
        for (entity, (life, pos, health, hitbox, brain)) in query.iter() {
            if !life.alive {
                continue;
            }
            let context = EnemyContext {
                archetype: brain.archetype,
                state: brain.state,
                position: *pos,
                player_position,
                health: health.current,
                max_health: health.max,
                state_secs: brain.state_secs,
                attack_cooldown: brain.attack_cooldown,
                shots_in_burst: brain.shots_in_burst,
                fled: brain.fled,
                age_secs: brain.age_secs,
                dt,
            };
            decisions.push((entity, life.id, *pos, hitbox.width, evaluate(&context)));
        }
    }

    for (entity, id, pos, width, update) in decisions {
        let Ok((life, position, velocity, brain)) = ctx.world.query_one_mut::<(
            &mut Lifecycle,
            &mut Position,
            &mut Velocity,
            &mut EnemyBrain,
        )>(entity) else {
            continue;
        };

        if update.state_changed {
            log::debug!("Enemy {id}: {:?} -> {:?}", brain.state, update.new_state);
            brain.state_secs = 0.0;
        } else {
            brain.state_secs += dt;
        }
        brain.state = update.new_state;
        brain.attack_cooldown = update.attack_cooldown;
        brain.shots_in_burst = update.shots_in_burst;
        brain.fled = update.fled;
        brain.age_secs += dt;

        if update.new_state == EnemyState::Dead {
            life.alive = false;
            continue;
        }

        *velocity = update.velocity;
        *position = position.advanced(velocity, dt);
        position.y = position.y.clamp(FIELD_MIN_Y, FIELD_MAX_Y);
        if position.x < -OFFSCREEN_LEFT_MARGIN || position.x > OFFSCREEN_RIGHT_LIMIT {
            life.alive = false;
            continue;
        }

        // Shots leave from the nose as it stood when the decision was made.
        let muzzle = Position::new(pos.x - width / 2.0, pos.y);
        for shot in update.shots {
            world_setup::spawn_projectile(ctx, ProjectileSpec::enemy_shot(id, muzzle, shot));
        }
    }
}

fn run_bosses(ctx: &mut SimContext, player_position: Option<Position>, dt: f64) {
    let mut decisions: Vec<(Entity, EntityId, Position, f64, BossUpdate)> = Vec::new();
    {
        let mut query = ctx
            .world
            .query::<(&Lifecycle, &Position, &Health, &Hitbox, &BossBrain)>();
        for (entity, (life, pos, health, hitbox, brain)) in query.iter() {
            if !life.alive {
                continue;
            }
            let context = BossContext {
                archetype: brain.archetype,
                phase: brain.phase,
                position: *pos,
                player_position,
                health: health.current,
                max_health: health.max,
                transition_secs: brain.transition_secs,
                attack_cooldown: brain.attack_cooldown,
                active_secs: brain.active_secs,
                volleys: brain.volleys,
                dt,
            };
            decisions.push((entity, life.id, *pos, hitbox.width, evaluate_boss(&context)));
        }
    }

    for (entity, id, pos, width, update) in decisions {
        {
            let Ok((life, position, velocity, brain)) = ctx.world.query_one_mut::<(
                &mut Lifecycle,
                &mut Position,
                &mut Velocity,
                &mut BossBrain,
            )>(entity) else {
                continue;
            };

            brain.phase = update.new_phase;
            brain.transition_secs = update.transition_secs;
            brain.attack_cooldown = update.attack_cooldown;
            brain.active_secs = update.active_secs;
            brain.volleys = update.volleys;

            if update.new_phase == BossPhase::Dead {
                life.alive = false;
                continue;
            }

            *velocity = update.velocity;
            *position = position.advanced(velocity, dt);
            if update.new_phase != BossPhase::Entering {
                position.y = position.y.clamp(BOSS_MIN_Y, BOSS_MAX_Y);
            }
        }

        if update.phase_changed {
            log::info!("Boss {id} entered phase {:?}", update.new_phase);
            ctx.emit(GameEvent::BossPhaseChanged {
                id,
                phase: update.new_phase,
            });
            match update.new_phase {
                BossPhase::Two => ctx.message("PHASE 2!", MESSAGE_SHORT_SECS),
                BossPhase::Three => ctx.message("PHASE 3!", MESSAGE_SHORT_SECS),
                _ => {}
            }
        }

        let muzzle = Position::new(pos.x - width / 4.0, pos.y);
        for shot in update.shots {
            world_setup::spawn_projectile(ctx, ProjectileSpec::enemy_shot(id, muzzle, shot));
        }
    }
}
