//! Boss phase machine.
//!
//! Bosses fly in, then escalate through three attack phases as their
//! health drops. Each phase change starts a short transition during which
//! the boss holds position, holds fire and ignores damage.

use skyfury_core::constants::*;
use skyfury_core::enums::{BossArchetype, BossPhase};
use skyfury_core::types::{Position, Velocity};

use crate::fsm::aimed;

/// Input to the boss machine.
#[derive(Debug, Clone)]
pub struct BossContext {
    pub archetype: BossArchetype,
    pub phase: BossPhase,
    pub position: Position,
    pub player_position: Option<Position>,
    pub health: f64,
    pub max_health: f64,
    pub transition_secs: f64,
    pub attack_cooldown: f64,
    pub active_secs: f64,
    pub volleys: u32,
    pub dt: f64,
}

/// Output from the boss machine.
#[derive(Debug, Clone)]
pub struct BossUpdate {
    pub new_phase: BossPhase,
    pub phase_changed: bool,
    pub velocity: Velocity,
    pub shots: Vec<Velocity>,
    pub transition_secs: f64,
    pub attack_cooldown: f64,
    pub active_secs: f64,
    pub volleys: u32,
}

/// Whether a boss in this situation ignores incoming damage.
pub fn is_invulnerable(phase: BossPhase, transition_secs: f64) -> bool {
    phase == BossPhase::Entering || transition_secs > 0.0
}

/// Evaluate the boss machine for one frame.
pub fn evaluate_boss(ctx: &BossContext) -> BossUpdate {
    let mut update = BossUpdate {
        new_phase: ctx.phase,
        phase_changed: false,
        velocity: Velocity::default(),
        shots: Vec::new(),
        transition_secs: ctx.transition_secs,
        attack_cooldown: ctx.attack_cooldown,
        active_secs: ctx.active_secs,
        volleys: ctx.volleys,
    };

    if ctx.phase == BossPhase::Dead {
        return update;
    }
    if ctx.health <= 0.0 {
        update.new_phase = BossPhase::Dead;
        update.phase_changed = true;
        return update;
    }

    if ctx.phase == BossPhase::Entering {
        if ctx.position.x > BOSS_STATION_X {
            update.velocity = Velocity::new(-BOSS_ENTRY_SPEED, 0.0);
        } else {
            enter_phase(&mut update, BossPhase::One, 0.0);
        }
        return update;
    }

    let fraction = if ctx.max_health > 0.0 {
        ctx.health / ctx.max_health
    } else {
        0.0
    };
    match ctx.phase {
        BossPhase::One if fraction <= BOSS_PHASE_TWO_FRACTION => {
            enter_phase(&mut update, BossPhase::Two, BOSS_TRANSITION_SECS);
            return update;
        }
        BossPhase::Two if fraction <= BOSS_PHASE_THREE_FRACTION => {
            enter_phase(&mut update, BossPhase::Three, BOSS_TRANSITION_SECS);
            return update;
        }
        _ => {}
    }

    if ctx.transition_secs > 0.0 {
        update.transition_secs = (ctx.transition_secs - ctx.dt).max(0.0);
        return update;
    }

    update.active_secs = ctx.active_secs + ctx.dt;
    update.velocity = sway_velocity(ctx.position, update.active_secs);

    update.attack_cooldown = ctx.attack_cooldown - ctx.dt;
    if update.attack_cooldown <= 0.0 {
        let (shots, interval) = volley(ctx, update.active_secs);
        update.shots = shots;
        update.attack_cooldown = interval;
        update.volleys += 1;
    }

    update
}

fn enter_phase(update: &mut BossUpdate, phase: BossPhase, transition_secs: f64) {
    update.new_phase = phase;
    update.phase_changed = true;
    update.transition_secs = transition_secs;
    update.attack_cooldown = 0.0;
    update.volleys = 0;
}

/// Steer toward the vertical sine track, kept inside the boss band.
fn sway_velocity(position: Position, t: f64) -> Velocity {
    let target_y = (BOSS_CENTER_Y + (t * BOSS_SWAY_RATE).sin() * BOSS_SWAY_AMPLITUDE)
        .clamp(BOSS_MIN_Y, BOSS_MAX_Y);
    Velocity::new(0.0, (target_y - position.y) * BOSS_FOLLOW_RATE)
}

/// Shots of the current phase's volley and the delay until the next one.
fn volley(ctx: &BossContext, t: f64) -> (Vec<Velocity>, f64) {
    let aim = |speed: f64| match ctx.player_position {
        Some(player) => aimed(ctx.position, player, speed),
        None => Velocity::new(-speed, 0.0),
    };

    match (ctx.archetype, ctx.phase) {
        (BossArchetype::HiveQueen, BossPhase::One) => (fan(5, 20.0, 240.0), 2.0),
        (BossArchetype::HiveQueen, BossPhase::Two) => {
            let mut shots = fan(7, 15.0, 300.0);
            shots.push(aim(360.0));
            (shots, 1.5)
        }
        (BossArchetype::HiveQueen, _) => (vec![spiral(t, 200.0, 300.0)], 0.1),

        (BossArchetype::AegisDefender, BossPhase::One) => (vec![aim(300.0)], 0.5),
        (BossArchetype::AegisDefender, BossPhase::Two) => (
            vec![
                aim(360.0),
                Velocity::new(0.0, 240.0),
                Velocity::new(0.0, -240.0),
            ],
            0.4,
        ),
        (BossArchetype::AegisDefender, _) => (fan(3, 10.0, 420.0), 0.15),

        (BossArchetype::FinalDestroyer, BossPhase::One) => (ring(12, 240.0), 1.5),
        (BossArchetype::FinalDestroyer, BossPhase::Two) => (ring(16, 300.0), 1.2),
        (BossArchetype::FinalDestroyer, _) => {
            let mut shots = vec![spiral(t, 300.0, 360.0)];
            // Every tenth volley adds a fast aimed round.
            if ctx.volleys % 10 == 9 {
                shots.push(aim(480.0));
            }
            (shots, 0.08)
        }
    }
}

/// `count` shots fanned around due left, `step_deg` apart.
fn fan(count: u32, step_deg: f64, speed: f64) -> Vec<Velocity> {
    let mid = (count as f64 - 1.0) / 2.0;
    (0..count)
        .map(|i| {
            let deg = 180.0 + (i as f64 - mid) * step_deg;
            Velocity::from_angle(deg.to_radians(), speed)
        })
        .collect()
}

/// `count` shots evenly spaced around the full circle.
fn ring(count: u32, speed: f64) -> Vec<Velocity> {
    let step = 360.0 / count as f64;
    (0..count)
        .map(|i| Velocity::from_angle((i as f64 * step).to_radians(), speed))
        .collect()
}

/// One shot along a spiral that turns `deg_per_sec`.
fn spiral(t: f64, deg_per_sec: f64, speed: f64) -> Velocity {
    let deg = (t * deg_per_sec).rem_euclid(360.0);
    Velocity::from_angle(deg.to_radians(), speed)
}
