//! Enemy behavior finite state machine.
//!
//! Pure functions that compute state transitions, steering and firing for
//! regular enemies based on their archetype, current state, and situation.
//! No ECS dependency. Operates on plain data.

use glam::DVec2;

use skyfury_core::constants::{ENEMY_FIRE_MAX_X, ENEMY_FIRE_MIN_X};
use skyfury_core::enums::{EnemyArchetype, EnemyState};
use skyfury_core::types::{Position, Velocity};

use crate::profiles::{get_profile, EnemyProfile};

/// Input to the enemy FSM for a single entity.
#[derive(Debug, Clone)]
pub struct EnemyContext {
    pub archetype: EnemyArchetype,
    pub state: EnemyState,
    pub position: Position,
    /// `None` while the player is not on the field.
    pub player_position: Option<Position>,
    pub health: f64,
    pub max_health: f64,
    pub state_secs: f64,
    pub attack_cooldown: f64,
    pub shots_in_burst: u32,
    pub fled: bool,
    pub age_secs: f64,
    pub dt: f64,
}

/// Output from the enemy FSM.
#[derive(Debug, Clone)]
pub struct EnemyUpdate {
    pub new_state: EnemyState,
    pub state_changed: bool,
    pub velocity: Velocity,
    /// Velocities of projectiles to launch from the enemy's position.
    pub shots: Vec<Velocity>,
    pub attack_cooldown: f64,
    pub shots_in_burst: u32,
    pub fled: bool,
}

impl EnemyUpdate {
    fn hold(ctx: &EnemyContext, velocity: Velocity) -> Self {
        Self {
            new_state: ctx.state,
            state_changed: false,
            velocity,
            shots: Vec::new(),
            attack_cooldown: (ctx.attack_cooldown - ctx.dt).max(0.0),
            shots_in_burst: ctx.shots_in_burst,
            fled: ctx.fled,
        }
    }

    fn transition(mut self, state: EnemyState) -> Self {
        self.state_changed = self.new_state != state;
        self.new_state = state;
        self
    }
}

/// Evaluate the FSM for one enemy.
pub fn evaluate(ctx: &EnemyContext) -> EnemyUpdate {
    if ctx.health <= 0.0 {
        return EnemyUpdate::hold(ctx, Velocity::default()).transition(EnemyState::Dead);
    }

    let profile = get_profile(ctx.archetype);

    match ctx.state {
        EnemyState::Patrol => evaluate_patrol(ctx, &profile),
        EnemyState::Attack => evaluate_attack(ctx, &profile),
        EnemyState::Retreat => evaluate_retreat(ctx, &profile),
        // Terminal state, no transitions
        EnemyState::Dead => EnemyUpdate::hold(ctx, Velocity::default()),
    }
}

fn evaluate_patrol(ctx: &EnemyContext, profile: &EnemyProfile) -> EnemyUpdate {
    if let Some(player) = ctx.player_position {
        if ctx.position.distance_to(&player) <= profile.attack_range {
            let mut update = EnemyUpdate::hold(ctx, attack_velocity(ctx, profile, player));
            update.shots_in_burst = 0;
            return update.transition(EnemyState::Attack);
        }
    }

    EnemyUpdate::hold(ctx, cruise_velocity(ctx, profile))
}

fn evaluate_attack(ctx: &EnemyContext, profile: &EnemyProfile) -> EnemyUpdate {
    let health_fraction = if ctx.max_health > 0.0 {
        ctx.health / ctx.max_health
    } else {
        1.0
    };

    if let Some(threshold) = profile.retreat_health_fraction {
        if !ctx.fled && health_fraction < threshold {
            let mut update = EnemyUpdate::hold(ctx, retreat_velocity(ctx, profile));
            update.fled = true;
            return update.transition(EnemyState::Retreat);
        }
    }
    if let Some(burst) = profile.burst_size {
        if ctx.shots_in_burst >= burst {
            return EnemyUpdate::hold(ctx, retreat_velocity(ctx, profile))
                .transition(EnemyState::Retreat);
        }
    }

    let Some(player) = ctx.player_position else {
        return EnemyUpdate::hold(ctx, cruise_velocity(ctx, profile));
    };

    let mut update = EnemyUpdate::hold(ctx, attack_velocity(ctx, profile, player));
    if update.attack_cooldown <= 0.0 {
        let shots = attack_shots(ctx, profile, player);
        if !shots.is_empty() {
            update.shots = shots;
            update.attack_cooldown = profile.fire_cooldown;
            update.shots_in_burst += 1;
        }
    }
    update
}

fn evaluate_retreat(ctx: &EnemyContext, profile: &EnemyProfile) -> EnemyUpdate {
    if ctx.state_secs >= profile.retreat_secs {
        let mut update = EnemyUpdate::hold(ctx, cruise_velocity(ctx, profile));
        update.shots_in_burst = 0;
        return update.transition(EnemyState::Patrol);
    }
    EnemyUpdate::hold(ctx, retreat_velocity(ctx, profile))
}

/// Leftward travel with the archetype's weave.
fn cruise_velocity(ctx: &EnemyContext, profile: &EnemyProfile) -> Velocity {
    Velocity::new(-profile.speed, profile.weave.vertical_speed(ctx.age_secs))
}

fn attack_velocity(ctx: &EnemyContext, profile: &EnemyProfile, player: Position) -> Velocity {
    match ctx.archetype {
        EnemyArchetype::Gunship => {
            let dy = player.y - ctx.position.y;
            // Track the player's row at 1.5 px per reference frame.
            let vy = if dy.abs() > 5.0 { 90.0 * dy.signum() } else { 0.0 };
            Velocity::new(-profile.speed, vy)
        }
        EnemyArchetype::Kamikaze => {
            let dir = (player.as_dvec2() - ctx.position.as_dvec2()).normalize_or_zero();
            Velocity::from(dir * profile.speed)
        }
        _ => cruise_velocity(ctx, profile),
    }
}

/// Back off to the right and away from the player's row.
fn retreat_velocity(ctx: &EnemyContext, profile: &EnemyProfile) -> Velocity {
    let speed = profile.speed * profile.retreat_speed_factor;
    let vy = match ctx.player_position {
        Some(player) if player.y > ctx.position.y => -speed,
        Some(_) => speed,
        None => 0.0,
    };
    Velocity::new(speed, vy)
}

fn attack_shots(ctx: &EnemyContext, profile: &EnemyProfile, player: Position) -> Vec<Velocity> {
    let x = ctx.position.x;
    let in_band = |margin: f64| x > ENEMY_FIRE_MIN_X + margin && x < ENEMY_FIRE_MAX_X - margin;
    let speed = profile.shot_speed;

    match ctx.archetype {
        EnemyArchetype::Drone if in_band(0.0) => vec![Velocity::new(-speed, 0.0)],
        EnemyArchetype::Bomber if in_band(0.0) && (x - player.x).abs() < 100.0 => {
            let dir = DVec2::new(-2.0, 3.0).normalize();
            vec![Velocity::from(dir * speed)]
        }
        EnemyArchetype::Gunship if in_band(50.0) => vec![aimed(ctx.position, player, speed)],
        EnemyArchetype::Elite if in_band(50.0) => [-15.0_f64, 0.0, 15.0]
            .iter()
            .map(|deg| Velocity::from_angle((180.0 + deg).to_radians(), speed))
            .collect(),
        _ => Vec::new(),
    }
}

/// Velocity of magnitude `speed` from `from` toward `to`. Falls back to due left
/// when the points coincide.
pub fn aimed(from: Position, to: Position, speed: f64) -> Velocity {
    let dir = (to.as_dvec2() - from.as_dvec2()).try_normalize().unwrap_or(DVec2::NEG_X);
    Velocity::from(dir * speed)
}
