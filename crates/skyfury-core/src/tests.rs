use crate::commands::PlayerCommand;
use crate::enums::*;
use crate::events::{AudioEvent, GameEvent};
use crate::state::GameStateSnapshot;
use crate::types::{EntityId, Position, Rect, SimTime, Velocity};

// ---- Rect overlap ----

#[test]
fn test_overlapping_rects_detected() {
    let player = Rect::from_center(Position::new(100.0, 100.0), 20.0, 20.0);
    let shot = Rect::from_center(Position::new(105.0, 105.0), 10.0, 10.0);
    assert!(player.overlaps(&shot));
    assert!(shot.overlaps(&player), "Overlap must be symmetric");
}

#[test]
fn test_disjoint_rects_not_detected() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let right = Rect::new(20.0, 0.0, 10.0, 10.0);
    let below = Rect::new(0.0, 30.0, 10.0, 10.0);
    assert!(!a.overlaps(&right));
    assert!(!a.overlaps(&below));
}

#[test]
fn test_touching_edges_do_not_overlap() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(10.0, 0.0, 10.0, 10.0);
    assert!(!a.overlaps(&b));
}

#[test]
fn test_contained_rect_overlaps() {
    let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
    let inner = Rect::new(40.0, 40.0, 5.0, 5.0);
    assert!(outer.overlaps(&inner));
    assert!(inner.overlaps(&outer));
}

#[test]
fn test_overlap_matches_interval_definition() {
    // Sweep a small box across a fixed one and compare against the
    // per-axis interval test.
    let fixed = Rect::new(50.0, 50.0, 30.0, 20.0);
    for ix in 0..40 {
        for iy in 0..40 {
            let moving = Rect::new(ix as f64 * 3.0, iy as f64 * 3.0, 12.0, 9.0);
            let x_overlap = moving.x < fixed.right() && fixed.x < moving.right();
            let y_overlap = moving.y < fixed.bottom() && fixed.y < moving.bottom();
            assert_eq!(moving.overlaps(&fixed), x_overlap && y_overlap);
        }
    }
}

#[test]
fn test_rect_validity() {
    assert!(Rect::new(0.0, 0.0, 1.0, 1.0).is_valid());
    assert!(!Rect::new(0.0, 0.0, 0.0, 1.0).is_valid());
    assert!(!Rect::new(0.0, 0.0, -4.0, 1.0).is_valid());
    assert!(!Rect::new(f64::NAN, 0.0, 1.0, 1.0).is_valid());
    assert!(!Rect::new(0.0, 0.0, f64::INFINITY, 1.0).is_valid());
}

#[test]
fn test_from_center_round_trips_center() {
    let r = Rect::from_center(Position::new(12.0, -3.0), 8.0, 6.0);
    assert_eq!(r.center(), Position::new(12.0, -3.0));
    assert_eq!(r.x, 8.0);
    assert_eq!(r.y, -6.0);
}

// ---- Vectors and time ----

#[test]
fn test_position_distance() {
    let a = Position::new(0.0, 0.0);
    let b = Position::new(3.0, 4.0);
    assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
}

#[test]
fn test_advanced_with_zero_dt_is_identity() {
    let p = Position::new(10.0, 20.0);
    let v = Velocity::new(500.0, -300.0);
    assert_eq!(p.advanced(&v, 0.0), p);
}

#[test]
fn test_velocity_from_angle() {
    let v = Velocity::from_angle(0.0, 900.0);
    assert!((v.x - 900.0).abs() < 1e-9);
    assert!(v.y.abs() < 1e-9);
    assert!((Velocity::from_angle(1.0, 50.0).speed() - 50.0).abs() < 1e-9);
}

#[test]
fn test_sim_time_advance() {
    let mut t = SimTime::default();
    t.advance(0.5);
    t.advance(0.25);
    assert_eq!(t.frame, 2);
    assert!((t.elapsed_secs - 0.75).abs() < 1e-12);
}

#[test]
fn test_entity_id_orders_by_spawn_serial() {
    let mut ids = vec![EntityId(7), EntityId(2), EntityId(5)];
    ids.sort();
    assert_eq!(ids, vec![EntityId(2), EntityId(5), EntityId(7)]);
    assert_eq!(EntityId(9).to_string(), "#9");
}

// ---- Serialization shape ----

#[test]
fn test_game_event_is_tagged() {
    let event = GameEvent::ParticleBurst {
        source: EntityId(3),
        effect: ParticleEffect::Explosion,
        position: Position::new(1.0, 2.0),
    };
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["type"], "ParticleBurst");
    assert_eq!(json["effect"], "Explosion");
}

#[test]
fn test_audio_event_is_tagged() {
    let json = serde_json::to_string(&AudioEvent::PlayMusic {
        track: MusicTrack::Boss,
        looped: true,
    })
    .unwrap();
    assert!(json.contains("\"type\":\"PlayMusic\""));
    let back: AudioEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(
        back,
        AudioEvent::PlayMusic {
            track: MusicTrack::Boss,
            looped: true
        }
    );
}

#[test]
fn test_command_parses_from_frontend_json() {
    let cmd: PlayerCommand = serde_json::from_str(r#"{"type":"StartLevel","level":2}"#).unwrap();
    assert_eq!(cmd, PlayerCommand::StartLevel { level: 2 });
}

#[test]
fn test_default_snapshot_is_main_menu() {
    let snap = GameStateSnapshot::default();
    assert_eq!(snap.phase, GamePhase::MainMenu);
    assert!(snap.player.is_none());
    assert!(serde_json::to_string(&snap).is_ok());
}

#[test]
fn test_boss_phases_are_ordered() {
    assert!(BossPhase::Entering < BossPhase::One);
    assert!(BossPhase::One < BossPhase::Two);
    assert!(BossPhase::Two < BossPhase::Three);
}
