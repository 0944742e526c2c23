use skyfury_core::constants::*;
use skyfury_core::enums::{BossArchetype, BossPhase, EnemyArchetype, EnemyState};
use skyfury_core::types::Position;

use crate::boss::{evaluate_boss, is_invulnerable, BossContext};
use crate::fsm::{evaluate, EnemyContext};
use crate::profiles::{get_boss_profile, get_profile};

const DT: f64 = 1.0 / 60.0;

fn make_context(archetype: EnemyArchetype, state: EnemyState, x: f64) -> EnemyContext {
    let profile = get_profile(archetype);
    EnemyContext {
        archetype,
        state,
        position: Position::new(x, 300.0),
        player_position: Some(Position::new(150.0, 300.0)),
        health: profile.max_health,
        max_health: profile.max_health,
        state_secs: 0.0,
        attack_cooldown: 0.0,
        shots_in_burst: 0,
        fled: false,
        age_secs: 0.0,
        dt: DT,
    }
}

fn make_boss(archetype: BossArchetype, phase: BossPhase) -> BossContext {
    let profile = get_boss_profile(archetype);
    BossContext {
        archetype,
        phase,
        position: Position::new(BOSS_STATION_X, BOSS_CENTER_Y),
        player_position: Some(Position::new(150.0, 300.0)),
        health: profile.max_health,
        max_health: profile.max_health,
        transition_secs: 0.0,
        attack_cooldown: 0.0,
        active_secs: 0.0,
        volleys: 0,
        dt: DT,
    }
}

// ---- Patrol ----

#[test]
fn test_patrol_stays_out_of_range() {
    let mut ctx = make_context(EnemyArchetype::Drone, EnemyState::Patrol, 850.0);
    ctx.player_position = Some(Position::new(100.0, 300.0));
    let update = evaluate(&ctx);
    assert!(!update.state_changed);
    assert_eq!(update.new_state, EnemyState::Patrol);
    assert!(update.velocity.x < 0.0, "Patrol drifts left");
    assert!(update.shots.is_empty());
}

#[test]
fn test_patrol_to_attack_in_range() {
    let ctx = make_context(EnemyArchetype::Drone, EnemyState::Patrol, 600.0);
    let update = evaluate(&ctx);
    assert!(update.state_changed);
    assert_eq!(update.new_state, EnemyState::Attack);
    assert_eq!(update.shots_in_burst, 0);
}

#[test]
fn test_patrol_without_player_never_attacks() {
    let mut ctx = make_context(EnemyArchetype::Drone, EnemyState::Patrol, 200.0);
    ctx.player_position = None;
    let update = evaluate(&ctx);
    assert_eq!(update.new_state, EnemyState::Patrol);
}

// ---- Attack ----

#[test]
fn test_drone_fires_straight_left_when_ready() {
    let ctx = make_context(EnemyArchetype::Drone, EnemyState::Attack, 600.0);
    let update = evaluate(&ctx);
    assert_eq!(update.shots.len(), 1);
    assert!(update.shots[0].x < 0.0);
    assert!(update.shots[0].y.abs() < 1e-9);
    assert_eq!(update.shots_in_burst, 1);
    assert!((update.attack_cooldown - 2.0).abs() < 1e-9);
}

#[test]
fn test_attack_respects_cooldown() {
    let mut ctx = make_context(EnemyArchetype::Drone, EnemyState::Attack, 600.0);
    ctx.attack_cooldown = 1.0;
    let update = evaluate(&ctx);
    assert!(update.shots.is_empty());
    assert!((update.attack_cooldown - (1.0 - DT)).abs() < 1e-9);
}

#[test]
fn test_no_fire_outside_band() {
    let ctx = make_context(EnemyArchetype::Drone, EnemyState::Attack, 790.0);
    let update = evaluate(&ctx);
    assert!(update.shots.is_empty(), "Off-screen enemies hold fire");
    assert_eq!(update.shots_in_burst, 0);
}

#[test]
fn test_elite_fires_three_way_spread() {
    let ctx = make_context(EnemyArchetype::Elite, EnemyState::Attack, 500.0);
    let update = evaluate(&ctx);
    assert_eq!(update.shots.len(), 3);
    assert!(update.shots.iter().all(|v| v.x < 0.0));
    assert!(update.shots[0].y > 0.0 || update.shots[2].y > 0.0);
}

#[test]
fn test_bomber_only_bombs_above_player() {
    let far = make_context(EnemyArchetype::Bomber, EnemyState::Attack, 500.0);
    assert!(evaluate(&far).shots.is_empty());

    let over = make_context(EnemyArchetype::Bomber, EnemyState::Attack, 180.0);
    let update = evaluate(&over);
    assert_eq!(update.shots.len(), 1);
    assert!(update.shots[0].y > 0.0, "Bombs fall");
}

#[test]
fn test_gunship_tracks_player_row() {
    let mut ctx = make_context(EnemyArchetype::Gunship, EnemyState::Attack, 500.0);
    ctx.attack_cooldown = 1.0;
    ctx.player_position = Some(Position::new(150.0, 450.0));
    let update = evaluate(&ctx);
    assert!(update.velocity.y > 0.0);
}

#[test]
fn test_kamikaze_rushes_player() {
    let mut ctx = make_context(EnemyArchetype::Kamikaze, EnemyState::Attack, 500.0);
    ctx.player_position = Some(Position::new(150.0, 100.0));
    let update = evaluate(&ctx);
    assert!(update.velocity.x < 0.0);
    assert!(update.velocity.y < 0.0);
    assert!((update.velocity.speed() - get_profile(EnemyArchetype::Kamikaze).speed).abs() < 1e-6);
    assert!(update.shots.is_empty());
}

#[test]
fn test_attack_to_retreat_on_low_health() {
    let mut ctx = make_context(EnemyArchetype::Gunship, EnemyState::Attack, 500.0);
    ctx.health = 10.0;
    let update = evaluate(&ctx);
    assert!(update.state_changed);
    assert_eq!(update.new_state, EnemyState::Retreat);
    assert!(update.fled);
    assert!(update.velocity.x > 0.0, "Retreat backs off to the right");
}

#[test]
fn test_low_health_retreat_happens_once() {
    let mut ctx = make_context(EnemyArchetype::Gunship, EnemyState::Attack, 500.0);
    ctx.health = 10.0;
    ctx.fled = true;
    let update = evaluate(&ctx);
    assert_eq!(update.new_state, EnemyState::Attack);
}

#[test]
fn test_attack_to_retreat_after_burst() {
    let mut ctx = make_context(EnemyArchetype::Drone, EnemyState::Attack, 500.0);
    ctx.shots_in_burst = get_profile(EnemyArchetype::Drone).burst_size.unwrap();
    let update = evaluate(&ctx);
    assert_eq!(update.new_state, EnemyState::Retreat);
    assert!(update.shots.is_empty());
}

#[test]
fn test_kamikaze_never_retreats() {
    let mut ctx = make_context(EnemyArchetype::Kamikaze, EnemyState::Attack, 500.0);
    ctx.health = 1.0;
    ctx.shots_in_burst = 100;
    assert_eq!(evaluate(&ctx).new_state, EnemyState::Attack);
}

// ---- Retreat ----

#[test]
fn test_retreat_holds_until_duration() {
    let mut ctx = make_context(EnemyArchetype::Drone, EnemyState::Retreat, 500.0);
    ctx.state_secs = 0.5;
    let update = evaluate(&ctx);
    assert_eq!(update.new_state, EnemyState::Retreat);
    assert!(!update.state_changed);
}

#[test]
fn test_retreat_to_patrol_after_duration() {
    let mut ctx = make_context(EnemyArchetype::Drone, EnemyState::Retreat, 500.0);
    ctx.state_secs = get_profile(EnemyArchetype::Drone).retreat_secs;
    ctx.shots_in_burst = 3;
    let update = evaluate(&ctx);
    assert!(update.state_changed);
    assert_eq!(update.new_state, EnemyState::Patrol);
    assert_eq!(update.shots_in_burst, 0);
}

#[test]
fn test_retreat_moves_away_from_player_row() {
    let mut ctx = make_context(EnemyArchetype::Drone, EnemyState::Retreat, 500.0);
    ctx.position = Position::new(500.0, 200.0);
    ctx.player_position = Some(Position::new(150.0, 400.0));
    assert!(evaluate(&ctx).velocity.y < 0.0);
}

// ---- Dead ----

#[test]
fn test_any_state_to_dead_at_zero_health() {
    for state in [EnemyState::Patrol, EnemyState::Attack, EnemyState::Retreat] {
        let mut ctx = make_context(EnemyArchetype::Elite, state, 500.0);
        ctx.health = 0.0;
        let update = evaluate(&ctx);
        assert!(update.state_changed);
        assert_eq!(update.new_state, EnemyState::Dead, "{state:?} should die");
        assert!(update.shots.is_empty());
    }
}

#[test]
fn test_dead_is_absorbing() {
    // Whatever the situation, Dead never leaves Dead.
    for archetype in [
        EnemyArchetype::Drone,
        EnemyArchetype::Bomber,
        EnemyArchetype::Gunship,
        EnemyArchetype::Elite,
        EnemyArchetype::Kamikaze,
    ] {
        for health in [-5.0, 0.0, 1.0, 1000.0] {
            for state_secs in [0.0, 10.0] {
                let mut ctx = make_context(archetype, EnemyState::Dead, 300.0);
                ctx.health = health;
                ctx.state_secs = state_secs;
                let update = evaluate(&ctx);
                assert_eq!(update.new_state, EnemyState::Dead);
                assert!(!update.state_changed);
                assert!(update.shots.is_empty());
                assert_eq!(update.velocity.speed(), 0.0);
            }
        }
    }
}

// ---- Profiles ----

#[test]
fn test_profile_stats() {
    let drone = get_profile(EnemyArchetype::Drone);
    assert_eq!(drone.max_health, 30.0);
    assert_eq!(drone.score, 100);
    let kamikaze = get_profile(EnemyArchetype::Kamikaze);
    assert_eq!(kamikaze.size, KAMIKAZE_SIZE);
    assert!(kamikaze.speed > get_profile(EnemyArchetype::Elite).speed);
    assert_eq!(get_boss_profile(BossArchetype::FinalDestroyer).max_health, 1800.0);
}

// ---- Boss ----

#[test]
fn test_boss_enters_then_starts_phase_one() {
    let mut ctx = make_boss(BossArchetype::HiveQueen, BossPhase::Entering);
    ctx.position = Position::new(BOSS_ENTRY_X, BOSS_CENTER_Y);
    let update = evaluate_boss(&ctx);
    assert_eq!(update.new_phase, BossPhase::Entering);
    assert!(update.velocity.x < 0.0);
    assert!(update.shots.is_empty());

    ctx.position = Position::new(BOSS_STATION_X, BOSS_CENTER_Y);
    let update = evaluate_boss(&ctx);
    assert!(update.phase_changed);
    assert_eq!(update.new_phase, BossPhase::One);
}

#[test]
fn test_boss_phase_two_at_two_thirds() {
    let mut ctx = make_boss(BossArchetype::AegisDefender, BossPhase::One);
    ctx.health = ctx.max_health * 0.6;
    let update = evaluate_boss(&ctx);
    assert_eq!(update.new_phase, BossPhase::Two);
    assert_eq!(update.transition_secs, BOSS_TRANSITION_SECS);
    assert!(is_invulnerable(update.new_phase, update.transition_secs));
}

#[test]
fn test_boss_holds_fire_during_transition() {
    let mut ctx = make_boss(BossArchetype::FinalDestroyer, BossPhase::Two);
    ctx.health = ctx.max_health * 0.5;
    ctx.transition_secs = 1.0;
    let update = evaluate_boss(&ctx);
    assert!(update.shots.is_empty());
    assert_eq!(update.velocity.speed(), 0.0);
    assert!((update.transition_secs - (1.0 - DT)).abs() < 1e-9);
}

#[test]
fn test_boss_volleys_per_phase() {
    let queen = evaluate_boss(&make_boss(BossArchetype::HiveQueen, BossPhase::One));
    assert_eq!(queen.shots.len(), 5);
    assert!((queen.attack_cooldown - 2.0).abs() < 1e-9);

    let mut ctx = make_boss(BossArchetype::HiveQueen, BossPhase::Two);
    ctx.health = ctx.max_health * 0.5;
    assert_eq!(evaluate_boss(&ctx).shots.len(), 8);

    let destroyer = evaluate_boss(&make_boss(BossArchetype::FinalDestroyer, BossPhase::One));
    assert_eq!(destroyer.shots.len(), 12);

    let aegis = evaluate_boss(&make_boss(BossArchetype::AegisDefender, BossPhase::One));
    assert_eq!(aegis.shots.len(), 1);
    assert!(aegis.shots[0].x < 0.0, "Aimed at the player on the left");
}

#[test]
fn test_boss_dead_is_absorbing() {
    let mut ctx = make_boss(BossArchetype::HiveQueen, BossPhase::Dead);
    ctx.health = 500.0;
    let update = evaluate_boss(&ctx);
    assert_eq!(update.new_phase, BossPhase::Dead);
    assert!(!update.phase_changed);
    assert!(update.shots.is_empty());
}

#[test]
fn test_boss_dies_at_zero_health() {
    let mut ctx = make_boss(BossArchetype::HiveQueen, BossPhase::Three);
    ctx.health = 0.0;
    let update = evaluate_boss(&ctx);
    assert_eq!(update.new_phase, BossPhase::Dead);
    assert!(update.phase_changed);
}

#[test]
fn test_boss_sways_toward_track() {
    let mut ctx = make_boss(BossArchetype::HiveQueen, BossPhase::One);
    ctx.attack_cooldown = 5.0;
    ctx.active_secs = std::f64::consts::PI; // sin(pi/2) peak
    ctx.position = Position::new(BOSS_STATION_X, BOSS_CENTER_Y);
    let update = evaluate_boss(&ctx);
    assert!(update.velocity.y > 0.0);
}
