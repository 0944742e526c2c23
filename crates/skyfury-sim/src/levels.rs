//! Level definitions: scripted enemy waves followed by a boss.

use skyfury_core::enums::{BossArchetype, EnemyArchetype};

use crate::error::SimError;

use EnemyArchetype::{Bomber, Drone, Elite, Gunship, Kamikaze};

/// One wave: enemies spawned one at a time, `interval_secs` apart.
#[derive(Debug, Clone)]
pub struct WaveDefinition {
    /// (archetype, spawn row) in spawn order.
    pub spawns: Vec<(EnemyArchetype, f64)>,
    pub interval_secs: f64,
}

#[derive(Debug, Clone)]
pub struct LevelDefinition {
    pub number: u32,
    pub name: &'static str,
    pub waves: Vec<WaveDefinition>,
    pub boss: BossArchetype,
}

impl LevelDefinition {
    /// Total regular enemies across all waves.
    pub fn total_enemies(&self) -> usize {
        self.waves.iter().map(|w| w.spawns.len()).sum()
    }
}

fn wave(interval_secs: f64, spawns: &[(EnemyArchetype, f64)]) -> WaveDefinition {
    WaveDefinition {
        spawns: spawns.to_vec(),
        interval_secs,
    }
}

/// Look up a level by its 1-based number.
pub fn level(number: u32) -> Result<LevelDefinition, SimError> {
    let def = match number {
        1 => LevelDefinition {
            number,
            name: "Drone Scramble",
            boss: BossArchetype::HiveQueen,
            waves: vec![
                wave(1.5, &[(Drone, 150.0), (Drone, 250.0), (Drone, 350.0), (Drone, 450.0)]),
                wave(
                    1.2,
                    &[(Drone, 100.0), (Drone, 200.0), (Drone, 300.0), (Drone, 400.0), (Drone, 500.0)],
                ),
                wave(1.5, &[(Drone, 150.0), (Bomber, 250.0), (Drone, 350.0), (Bomber, 450.0)]),
                wave(
                    1.0,
                    &[
                        (Drone, 100.0),
                        (Drone, 200.0),
                        (Bomber, 300.0),
                        (Drone, 400.0),
                        (Bomber, 500.0),
                        (Drone, 250.0),
                    ],
                ),
                wave(
                    1.2,
                    &[(Bomber, 150.0), (Drone, 200.0), (Drone, 300.0), (Bomber, 400.0), (Drone, 450.0)],
                ),
            ],
        },
        2 => LevelDefinition {
            number,
            name: "Stormfront Assault",
            boss: BossArchetype::AegisDefender,
            waves: vec![
                wave(
                    1.2,
                    &[(Drone, 120.0), (Bomber, 220.0), (Gunship, 300.0), (Bomber, 380.0), (Drone, 480.0)],
                ),
                wave(1.5, &[(Gunship, 150.0), (Drone, 250.0), (Gunship, 350.0), (Drone, 450.0)]),
                wave(
                    1.3,
                    &[(Elite, 200.0), (Bomber, 300.0), (Elite, 400.0), (Gunship, 250.0), (Gunship, 350.0)],
                ),
                wave(
                    1.0,
                    &[
                        (Drone, 100.0),
                        (Elite, 180.0),
                        (Bomber, 260.0),
                        (Gunship, 340.0),
                        (Elite, 420.0),
                        (Drone, 500.0),
                    ],
                ),
                wave(
                    1.1,
                    &[
                        (Kamikaze, 150.0),
                        (Kamikaze, 250.0),
                        (Elite, 300.0),
                        (Kamikaze, 350.0),
                        (Kamikaze, 450.0),
                    ],
                ),
                wave(
                    1.2,
                    &[(Elite, 120.0), (Gunship, 200.0), (Bomber, 280.0), (Gunship, 360.0), (Elite, 440.0)],
                ),
            ],
        },
        3 => LevelDefinition {
            number,
            name: "Final Showdown",
            boss: BossArchetype::FinalDestroyer,
            waves: vec![
                wave(
                    0.9,
                    &[
                        (Kamikaze, 100.0),
                        (Elite, 180.0),
                        (Gunship, 260.0),
                        (Kamikaze, 340.0),
                        (Elite, 420.0),
                        (Kamikaze, 500.0),
                    ],
                ),
                wave(1.3, &[(Elite, 150.0), (Elite, 250.0), (Elite, 350.0), (Elite, 450.0)]),
                wave(
                    0.8,
                    &[
                        (Bomber, 120.0),
                        (Gunship, 200.0),
                        (Elite, 280.0),
                        (Gunship, 360.0),
                        (Bomber, 440.0),
                        (Kamikaze, 300.0),
                    ],
                ),
                wave(
                    0.7,
                    &[
                        (Kamikaze, 150.0),
                        (Kamikaze, 200.0),
                        (Elite, 250.0),
                        (Kamikaze, 300.0),
                        (Kamikaze, 350.0),
                        (Elite, 400.0),
                        (Kamikaze, 450.0),
                    ],
                ),
                wave(
                    0.9,
                    &[
                        (Elite, 100.0),
                        (Gunship, 170.0),
                        (Bomber, 240.0),
                        (Kamikaze, 280.0),
                        (Elite, 340.0),
                        (Gunship, 410.0),
                        (Kamikaze, 480.0),
                    ],
                ),
                wave(
                    1.0,
                    &[
                        (Elite, 150.0),
                        (Elite, 250.0),
                        (Gunship, 200.0),
                        (Gunship, 350.0),
                        (Bomber, 300.0),
                        (Kamikaze, 400.0),
                    ],
                ),
                wave(
                    1.0,
                    &[(Elite, 180.0), (Elite, 280.0), (Elite, 380.0), (Kamikaze, 230.0), (Kamikaze, 330.0)],
                ),
            ],
        },
        _ => return Err(SimError::UnknownLevel(number)),
    };
    Ok(def)
}
