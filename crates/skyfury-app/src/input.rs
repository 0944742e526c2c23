//! Control sources. Each frame the runner polls one for the buttons held.

use skyfury_core::constants::{COMBAT_ANCHOR_X, COMBAT_ANCHOR_Y, SHIELD_ACTIVATION_COST};
use skyfury_core::enums::FlightMode;
use skyfury_core::input::InputState;
use skyfury_core::state::{GameStateSnapshot, PlayerView};

/// Vertical distance the autopilot tolerates before steering (px).
const TRACK_DEADZONE: f64 = 12.0;
/// Horizontal drift allowed around the combat anchor (px).
const ANCHOR_SLACK: f64 = 20.0;
/// Laser cycle while a boss is up: hold for the first part, then release.
const LASER_CYCLE_FRAMES: u64 = 150;
const LASER_HOLD_FRAMES: u64 = 60;
/// Health fraction under which the autopilot raises the shield.
const SHIELD_HEALTH_FRACTION: f64 = 0.4;

pub trait InputSource {
    /// Controls for the next frame, given the last published state.
    fn poll(&mut self, snapshot: &GameStateSnapshot) -> InputState;
}

/// Holds nothing. The aircraft sits on the runway.
#[derive(Debug, Default)]
pub struct IdleInput;

impl InputSource for IdleInput {
    fn poll(&mut self, _snapshot: &GameStateSnapshot) -> InputState {
        InputState::default()
    }
}

/// Deterministic bot: takes off at full throttle, then holds the anchor
/// column, tracks the nearest threat's row and fires everything it has.
#[derive(Debug, Default)]
pub struct Autopilot {
    frame: u64,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    fn fight(&self, player: &PlayerView, snapshot: &GameStateSnapshot) -> InputState {
        let hud = &snapshot.hud;
        let target_y = snapshot
            .boss
            .as_ref()
            .map(|boss| boss.position.y)
            .or_else(|| {
                snapshot
                    .enemies
                    .iter()
                    .min_by(|a, b| a.position.x.total_cmp(&b.position.x))
                    .map(|enemy| enemy.position.y)
            })
            .unwrap_or(COMBAT_ANCHOR_Y);
        let dy = target_y - player.position.y;
        let dx = player.position.x - COMBAT_ANCHOR_X;

        let boss_up = snapshot.boss.is_some();
        let low_health = hud.max_health > 0.0 && hud.health / hud.max_health < SHIELD_HEALTH_FRACTION;

        InputState {
            up: dy < -TRACK_DEADZONE,
            down: dy > TRACK_DEADZONE,
            left: dx > ANCHOR_SLACK,
            right: dx < -ANCHOR_SLACK,
            fire_primary: true,
            fire_missile: hud.missiles > 0 && (boss_up || snapshot.enemies.len() >= 3),
            charge_laser: boss_up && self.frame % LASER_CYCLE_FRAMES < LASER_HOLD_FRAMES,
            shield: low_health
                && !hud.shield_active
                && hud.shield_energy >= SHIELD_ACTIVATION_COST,
        }
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, snapshot: &GameStateSnapshot) -> InputState {
        self.frame += 1;
        let Some(player) = &snapshot.player else {
            return InputState::default();
        };
        match player.mode {
            FlightMode::Runway | FlightMode::Climbout => InputState {
                up: true,
                ..Default::default()
            },
            FlightMode::Combat => self.fight(player, snapshot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyfury_core::enums::{EnemyArchetype, EnemyState};
    use skyfury_core::state::{EnemyView, HudView};
    use skyfury_core::types::{EntityId, Position, Velocity};

    fn snapshot_with_player(mode: FlightMode, position: Position) -> GameStateSnapshot {
        GameStateSnapshot {
            player: Some(PlayerView {
                id: EntityId(1),
                position,
                velocity: Velocity::default(),
                mode,
                pitch_deg: 0.0,
                thrust: 0.0,
                shield_active: false,
                invulnerable: false,
            }),
            hud: HudView {
                health: 100.0,
                max_health: 100.0,
                missiles: 5,
                shield_energy: 50.0,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn enemy(id: u64, x: f64, y: f64) -> EnemyView {
        EnemyView {
            id: EntityId(id),
            archetype: EnemyArchetype::Drone,
            state: EnemyState::Patrol,
            position: Position::new(x, y),
            health: 30.0,
            max_health: 30.0,
        }
    }

    #[test]
    fn test_idle_holds_nothing() {
        let snapshot = snapshot_with_player(FlightMode::Runway, Position::new(100.0, 500.0));
        assert_eq!(IdleInput.poll(&snapshot), InputState::default());
    }

    #[test]
    fn test_autopilot_throttles_up_on_runway() {
        let mut pilot = Autopilot::new();
        let snapshot = snapshot_with_player(FlightMode::Runway, Position::new(100.0, 500.0));
        let input = pilot.poll(&snapshot);
        assert!(input.up);
        assert!(!input.fire_primary);
    }

    #[test]
    fn test_autopilot_without_player() {
        let mut pilot = Autopilot::new();
        assert_eq!(pilot.poll(&GameStateSnapshot::default()), InputState::default());
    }

    #[test]
    fn test_autopilot_tracks_nearest_enemy() {
        let mut pilot = Autopilot::new();
        let mut snapshot = snapshot_with_player(FlightMode::Combat, Position::new(150.0, 300.0));
        snapshot.enemies = vec![enemy(2, 700.0, 500.0), enemy(3, 400.0, 100.0)];

        let input = pilot.poll(&snapshot);
        assert!(input.up, "Nearest enemy is above");
        assert!(!input.down);
        assert!(input.fire_primary);
        assert!(!input.fire_missile, "Missiles are saved for crowds and bosses");
        assert!(!input.shield);
    }

    #[test]
    fn test_autopilot_returns_to_anchor_column() {
        let mut pilot = Autopilot::new();
        let snapshot = snapshot_with_player(FlightMode::Combat, Position::new(240.0, 300.0));
        let input = pilot.poll(&snapshot);
        assert!(input.left);
        assert!(!input.right);
        assert!(!input.up && !input.down);
    }

    #[test]
    fn test_autopilot_shields_when_hurt() {
        let mut pilot = Autopilot::new();
        let mut snapshot = snapshot_with_player(FlightMode::Combat, Position::new(150.0, 300.0));
        snapshot.hud.health = 30.0;
        assert!(pilot.poll(&snapshot).shield);

        snapshot.hud.shield_energy = 10.0;
        assert!(!pilot.poll(&snapshot).shield);
    }
}
