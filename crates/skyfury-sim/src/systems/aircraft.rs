//! Aircraft controller: turns the frame's input into player motion.
//!
//! Three flight modes. On the runway the player manages throttle, brakes
//! and rotation; during climb-out lift, gravity and drag act on the
//! aircraft; in combat the aircraft moves directly under arcade control
//! inside the left portion of the screen.

use skyfury_core::components::{Aircraft, Health, Lifecycle};
use skyfury_core::constants::*;
use skyfury_core::enums::{FlightMode, ParticleEffect};
use skyfury_core::events::GameEvent;
use skyfury_core::input::InputState;
use skyfury_core::types::{Position, Velocity};

use crate::context::SimContext;
use crate::systems::particles;

/// Outcome of one controller step that other systems care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlightEvent {
    TookOff,
    EnteredCombat,
    Landed,
    Crashed,
}

/// Run the aircraft controller for the player.
pub fn run(ctx: &mut SimContext, input: &InputState, dt: f64) {
    let Some(entity) = ctx.player() else {
        return;
    };

    let (flight_event, trail) = {
        let Ok((life, pos, vel, health, aircraft)) = ctx.world.query_one_mut::<(
            &mut Lifecycle,
            &mut Position,
            &mut Velocity,
            &mut Health,
            &mut Aircraft,
        )>(entity) else {
            return;
        };

        aircraft.invulnerable_secs = (aircraft.invulnerable_secs - dt).max(0.0);
        aircraft.shield_secs = (aircraft.shield_secs - dt).max(0.0);
        aircraft.mode_secs += dt;

        let flight_event = match aircraft.mode {
            FlightMode::Runway => update_runway(aircraft, pos, vel, input, dt),
            FlightMode::Climbout => update_climbout(aircraft, pos, vel, input, dt),
            FlightMode::Combat => {
                update_combat(aircraft, pos, vel, input, dt);
                None
            }
        };

        if flight_event == Some(FlightEvent::Crashed) {
            health.current = 0.0;
            life.alive = false;
        }

        if aircraft.thrust > 0.0 {
            aircraft.fuel = (aircraft.fuel - aircraft.thrust * FUEL_BURN_RATE * dt).max(0.0);
            if aircraft.fuel <= 0.0 {
                aircraft.thrust = 0.0;
            }
        }

        // One exhaust puff per 25% throttle per reference frame.
        let puffs = (aircraft.thrust / 25.0 * dt * REFERENCE_FPS).round() as usize;
        let exhaust = Position::new(pos.x - PLAYER_WIDTH / 2.0, pos.y);
        (flight_event, (puffs > 0).then_some((exhaust, puffs)))
    };

    match flight_event {
        Some(FlightEvent::TookOff) => {
            log::info!("Player airborne at frame {}", ctx.time.frame);
            ctx.emit(GameEvent::TookOff);
            ctx.message("AIRBORNE!", MESSAGE_SHORT_SECS);
        }
        Some(FlightEvent::EnteredCombat) => {
            ctx.message("COMBAT ZONE - ENGAGE!", MESSAGE_LONG_SECS);
        }
        Some(FlightEvent::Landed) => {
            ctx.emit(GameEvent::Landed);
            ctx.message("LANDED", MESSAGE_SHORT_SECS);
        }
        Some(FlightEvent::Crashed) => {
            log::info!("Player crashed at frame {}", ctx.time.frame);
            ctx.emit(GameEvent::Crashed);
        }
        None => {}
    }

    if let Some((position, puffs)) = trail {
        particles::spawn_burst(ctx, ParticleEffect::EngineTrail, position, puffs);
    }
}

/// Multiplicative per-reference-frame factor scaled to `dt`.
fn per_frame(factor: f64, dt: f64) -> f64 {
    factor.powf(dt * REFERENCE_FPS)
}

fn update_runway(
    aircraft: &mut Aircraft,
    pos: &mut Position,
    vel: &mut Velocity,
    input: &InputState,
    dt: f64,
) -> Option<FlightEvent> {
    aircraft.brakes = input.down;
    if input.up {
        aircraft.thrust = (aircraft.thrust + THRUST_RATE * dt).min(100.0);
        let progress = ((pos.x - ROTATION_RAMP_START_X)
            / (ROTATION_RAMP_END_X - ROTATION_RAMP_START_X))
            .clamp(0.0, 1.0);
        let target = TAKEOFF_TARGET_PITCH * progress;
        aircraft.pitch_deg += (target - aircraft.pitch_deg) * (TAKEOFF_PITCH_RATE * dt).min(1.0);
    } else {
        aircraft.thrust = (aircraft.thrust - THRUST_DECAY_RATE * dt).max(0.0);
    }
    if input.down {
        aircraft.thrust = (aircraft.thrust - THRUST_RATE * dt).max(0.0);
        aircraft.pitch_deg -= BRAKE_PITCH_RATE * dt;
    }
    aircraft.pitch_deg = aircraft.pitch_deg.clamp(GROUND_PITCH_MIN, GROUND_PITCH_MAX);

    if aircraft.thrust > 0.0 && aircraft.fuel > 0.0 {
        vel.x += aircraft.thrust * GROUND_ACCEL_PER_THRUST * dt;
    }
    let drag = if aircraft.brakes { BRAKE_DRAG } else { GROUND_DRAG };
    vel.x = (vel.x * per_frame(drag, dt)).min(AIRCRAFT_MAX_SPEED);
    vel.y = 0.0;

    pos.x = (pos.x + vel.x * dt).clamp(TAKEOFF_MIN_FIELD_X, TAKEOFF_MAX_FIELD_X);
    pos.y = GROUND_LEVEL;

    if pos.x >= TAKEOFF_MIN_X && vel.x >= TAKEOFF_MIN_SPEED && aircraft.pitch_deg >= TAKEOFF_MIN_PITCH
    {
        aircraft.mode = FlightMode::Climbout;
        aircraft.mode_secs = 0.0;
        aircraft.brakes = false;
        vel.y = TAKEOFF_CLIMB_SPEED;
        // Leave the ground already inside the combat band.
        pos.x = pos.x.clamp(COMBAT_MIN_X, COMBAT_MAX_X);
        return Some(FlightEvent::TookOff);
    }
    None
}

fn update_climbout(
    aircraft: &mut Aircraft,
    pos: &mut Position,
    vel: &mut Velocity,
    input: &InputState,
    dt: f64,
) -> Option<FlightEvent> {
    if input.up {
        aircraft.pitch_deg += CLIMB_PITCH_RATE * dt;
    } else if input.down {
        aircraft.pitch_deg -= CLIMB_PITCH_RATE * dt;
    }

    if aircraft.thrust > 0.0 && aircraft.fuel > 0.0 {
        vel.x += aircraft.thrust * AIR_ACCEL_PER_THRUST * dt;
    }
    vel.y -= aircraft.pitch_deg.to_radians().sin() * LIFT_FACTOR * vel.x * dt;
    vel.y += GRAVITY * dt;
    vel.x = (vel.x * per_frame(AIR_DRAG_X, dt)).min(AIRCRAFT_MAX_SPEED);
    vel.y = (vel.y * per_frame(AIR_DRAG_Y, dt)).clamp(-MAX_VERTICAL_SPEED, MAX_VERTICAL_SPEED);

    *pos = pos.advanced(vel, dt);
    aircraft.pitch_deg = aircraft.pitch_deg.clamp(AIR_PITCH_MIN, AIR_PITCH_MAX);
    // Once airborne the aircraft is held in the left band of the screen.
    pos.x = pos.x.clamp(COMBAT_MIN_X, COMBAT_MAX_X);
    pos.y = pos.y.max(FIELD_MIN_Y);

    // Only a descending aircraft can touch down.
    if pos.y >= GROUND_LEVEL && vel.y >= 0.0 {
        pos.y = GROUND_LEVEL;
        let over_runway = (RUNWAY_X_START..=RUNWAY_X_END).contains(&pos.x);
        if over_runway
            && vel.y.abs() <= MAX_LANDING_SPEED
            && aircraft.pitch_deg.abs() <= MAX_LANDING_PITCH
        {
            aircraft.mode = FlightMode::Runway;
            aircraft.mode_secs = 0.0;
            vel.y = 0.0;
            return Some(FlightEvent::Landed);
        }
        *vel = Velocity::default();
        return Some(FlightEvent::Crashed);
    }

    if aircraft.mode_secs >= CLIMBOUT_DURATION_SECS {
        aircraft.mode = FlightMode::Combat;
        aircraft.mode_secs = 0.0;
        aircraft.transition_secs = COMBAT_TRANSITION_SECS;
        return Some(FlightEvent::EnteredCombat);
    }
    None
}

fn update_combat(
    aircraft: &mut Aircraft,
    pos: &mut Position,
    vel: &mut Velocity,
    input: &InputState,
    dt: f64,
) {
    if aircraft.transition_secs > 0.0 {
        // Glide into the combat station, ignoring input.
        aircraft.transition_secs = (aircraft.transition_secs - dt).max(0.0);
        let k = (COMBAT_TRANSITION_RATE * dt).min(1.0);
        pos.x += (COMBAT_ANCHOR_X - pos.x) * k;
        pos.y += (COMBAT_ANCHOR_Y - pos.y) * k;
        aircraft.pitch_deg -= aircraft.pitch_deg * k;
        *vel = Velocity::default();
        if aircraft.transition_secs <= 0.0 {
            pos.x = pos.x.clamp(COMBAT_MIN_X, COMBAT_MAX_X);
        }
        return;
    }

    let axis = |neg: bool, positive: bool| (positive as i8 - neg as i8) as f64;
    vel.x = axis(input.left, input.right) * COMBAT_MOVE_SPEED;
    vel.y = axis(input.up, input.down) * COMBAT_MOVE_SPEED;
    aircraft.pitch_deg = -vel.y / COMBAT_MOVE_SPEED * 10.0;

    pos.x = (pos.x + vel.x * dt).clamp(COMBAT_MIN_X, COMBAT_MAX_X);
    pos.y = (pos.y + vel.y * dt).clamp(FIELD_MIN_Y, FIELD_MAX_Y);
}
