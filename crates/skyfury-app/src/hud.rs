//! Text heads-up display for the headless runner.

use skyfury_core::enums::GamePhase;
use skyfury_core::events::HudMessage;
use skyfury_core::state::HudView;

#[derive(Debug, Clone)]
struct Posted {
    text: String,
    remaining_secs: f64,
}

/// Banner messages still on screen. Each one fades after its own duration.
#[derive(Debug, Default)]
pub struct MessageBoard {
    posted: Vec<Posted>,
}

impl MessageBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: &HudMessage) {
        log::info!("[HUD] {}", message.text);
        self.posted.push(Posted {
            text: message.text.clone(),
            remaining_secs: message.duration_secs,
        });
    }

    /// Age every message by `dt` seconds and drop the expired ones.
    pub fn tick(&mut self, dt: f64) {
        for posted in &mut self.posted {
            posted.remaining_secs -= dt;
        }
        self.posted.retain(|posted| posted.remaining_secs > 0.0);
    }

    /// Texts still visible, oldest first.
    pub fn active(&self) -> Vec<&str> {
        self.posted.iter().map(|posted| posted.text.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.posted.is_empty()
    }
}

/// One-line summary of the HUD counters.
pub fn status_line(phase: GamePhase, hud: &HudView) -> String {
    let stage = if hud.level == 0 {
        "practice".to_string()
    } else {
        format!("L{} wave {}/{}", hud.level, hud.wave, hud.waves_total)
    };
    let mut line = format!(
        "{phase:?} | {stage} | score {} (best {}) | lives {} | hp {:.0}/{:.0} | fuel {:.0} | msl {} | laser {:.0} | shield {:.0}{} | kills {}",
        hud.score,
        hud.high_score,
        hud.lives,
        hud.health,
        hud.max_health,
        hud.fuel,
        hud.missiles,
        hud.laser_charge,
        hud.shield_energy,
        if hud.shield_active { " [up]" } else { "" },
        hud.kills,
    );
    if let Some(boss) = hud.boss_health {
        line.push_str(&format!(" | boss {:.0}%", boss * 100.0));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(text: &str, duration_secs: f64) -> HudMessage {
        HudMessage {
            text: text.to_string(),
            duration_secs,
            frame: 0,
        }
    }

    #[test]
    fn test_messages_expire_independently() {
        let mut board = MessageBoard::new();
        board.push(&message("WAVE 1", 1.0));
        board.push(&message("LEVEL 1: FIRST CONTACT", 3.0));
        assert_eq!(board.active(), vec!["WAVE 1", "LEVEL 1: FIRST CONTACT"]);

        board.tick(0.5);
        assert_eq!(board.active().len(), 2);

        board.tick(0.6);
        assert_eq!(board.active(), vec!["LEVEL 1: FIRST CONTACT"]);

        board.tick(2.0);
        assert!(board.is_empty());
    }

    #[test]
    fn test_status_line_campaign() {
        let hud = HudView {
            score: 1200,
            high_score: 1500,
            lives: 2,
            health: 75.0,
            max_health: 100.0,
            level: 1,
            wave: 2,
            waves_total: 4,
            boss_health: Some(0.5),
            ..Default::default()
        };
        let line = status_line(GamePhase::Active, &hud);
        assert!(line.starts_with("Active | L1 wave 2/4"));
        assert!(line.contains("score 1200 (best 1500)"));
        assert!(line.contains("hp 75/100"));
        assert!(line.ends_with("boss 50%"));
    }

    #[test]
    fn test_status_line_practice() {
        let hud = HudView {
            shield_active: true,
            ..Default::default()
        };
        let line = status_line(GamePhase::Paused, &hud);
        assert!(line.contains("| practice |"));
        assert!(line.contains("[up]"));
        assert!(!line.contains("boss"));
    }
}
