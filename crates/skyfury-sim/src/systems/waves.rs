//! Wave director: feeds each level's scripted waves into the arena, then its boss.

use std::collections::VecDeque;

use rand::Rng;

use skyfury_core::components::{Aircraft, Lifecycle};
use skyfury_core::constants::*;
use skyfury_core::enums::{EnemyArchetype, EntityKind, FlightMode};
use skyfury_core::events::GameEvent;
use skyfury_core::types::EntityId;

use skyfury_enemy_ai::profiles::get_boss_profile;

use crate::context::SimContext;
use crate::levels::{LevelDefinition, WaveDefinition};
use crate::world_setup;

/// Seconds between spawns in practice mode.
const PRACTICE_SPAWN_INTERVAL_SECS: f64 = 2.0;

const PRACTICE_ROSTER: [EnemyArchetype; 5] = [
    EnemyArchetype::Drone,
    EnemyArchetype::Bomber,
    EnemyArchetype::Gunship,
    EnemyArchetype::Elite,
    EnemyArchetype::Kamikaze,
];

#[derive(Debug, Clone, Default)]
enum Script {
    /// Menus and end screens: nothing spawns.
    #[default]
    Idle,
    Level(LevelDefinition),
    Practice,
}

/// Per-level spawn bookkeeping. Owned by the engine, advanced once per frame.
#[derive(Debug, Clone, Default)]
pub struct WaveDirector {
    script: Script,
    /// Index of the current wave, once started.
    current_wave: Option<usize>,
    spawn_queue: VecDeque<(EnemyArchetype, f64)>,
    spawn_timer: f64,
    spawn_interval: f64,
    boss: Option<EntityId>,
    boss_defeated: bool,
}

impl WaveDirector {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn for_level(level: LevelDefinition) -> Self {
        Self {
            script: Script::Level(level),
            spawn_interval: DEFAULT_SPAWN_INTERVAL_SECS,
            ..Self::default()
        }
    }

    pub fn practice() -> Self {
        Self {
            script: Script::Practice,
            spawn_interval: PRACTICE_SPAWN_INTERVAL_SECS,
            ..Self::default()
        }
    }

    /// Level number, or 0 outside scripted levels.
    pub fn level_number(&self) -> u32 {
        match &self.script {
            Script::Level(level) => level.number,
            _ => 0,
        }
    }

    /// Current wave, 1-based; 0 before the first wave starts.
    pub fn wave_number(&self) -> usize {
        self.current_wave.map_or(0, |w| w + 1)
    }

    pub fn waves_total(&self) -> usize {
        match &self.script {
            Script::Level(level) => level.waves.len(),
            _ => 0,
        }
    }

    pub fn boss(&self) -> Option<EntityId> {
        self.boss
    }

    pub fn boss_spawned(&self) -> bool {
        self.boss.is_some()
    }

    pub fn boss_defeated(&self) -> bool {
        self.boss_defeated
    }

    pub fn mark_boss_defeated(&mut self) {
        self.boss_defeated = true;
    }

    /// Advance spawning by one frame.
    pub fn run(&mut self, ctx: &mut SimContext, dt: f64) {
        // Nothing enters the arena until the player reaches the combat zone.
        if !player_in_combat(ctx) {
            return;
        }

        let script = std::mem::take(&mut self.script);
        match &script {
            Script::Idle => {}
            Script::Practice => self.run_practice(ctx, dt),
            Script::Level(level) => self.run_level(ctx, level, dt),
        }
        self.script = script;
    }

    fn run_practice(&mut self, ctx: &mut SimContext, dt: f64) {
        self.spawn_timer -= dt;
        if self.spawn_timer > 0.0 {
            return;
        }
        let archetype = PRACTICE_ROSTER[ctx.rng.gen_range(0..PRACTICE_ROSTER.len())];
        let y = ctx.rng.gen_range(FIELD_MIN_Y + 60.0..=FIELD_MAX_Y - 60.0);
        world_setup::spawn_enemy(ctx, archetype, y);
        self.spawn_timer = self.spawn_interval;
    }

    fn run_level(&mut self, ctx: &mut SimContext, level: &LevelDefinition, dt: f64) {
        if self.boss.is_some() {
            return;
        }

        let Some(current) = self.current_wave else {
            if let Some(first) = level.waves.first() {
                self.start_wave(ctx, level.number, 0, first);
            }
            return;
        };

        if let Some(&(archetype, y)) = self.spawn_queue.front() {
            self.spawn_timer -= dt;
            if self.spawn_timer <= 0.0 {
                self.spawn_queue.pop_front();
                world_setup::spawn_enemy(ctx, archetype, y);
                self.spawn_timer = self.spawn_interval;
            }
            return;
        }

        if live_enemies(ctx) > 0 {
            return;
        }

        match level.waves.get(current + 1) {
            Some(next) => self.start_wave(ctx, level.number, current + 1, next),
            None => {
                let profile = get_boss_profile(level.boss);
                let id = world_setup::spawn_boss(ctx, level.boss);
                log::info!("Level {}: boss {} spawned as {}", level.number, profile.name, id);
                ctx.message(
                    format!("WARNING: {} APPROACHING", profile.name),
                    MESSAGE_LONG_SECS,
                );
                self.boss = Some(id);
            }
        }
    }

    fn start_wave(
        &mut self,
        ctx: &mut SimContext,
        level: u32,
        index: usize,
        wave: &WaveDefinition,
    ) {
        self.current_wave = Some(index);
        self.spawn_queue = wave.spawns.iter().copied().collect();
        self.spawn_interval = wave.interval_secs;
        // First enemy of a wave enters immediately.
        self.spawn_timer = 0.0;
        log::debug!(
            "Level {level}: wave {} with {} enemies",
            index + 1,
            wave.spawns.len()
        );
        ctx.emit(GameEvent::WaveStarted {
            level,
            wave: index + 1,
        });
        ctx.message(format!("WAVE {}", index + 1), MESSAGE_SHORT_SECS);
    }
}

fn player_in_combat(ctx: &SimContext) -> bool {
    ctx.player()
        .and_then(|entity| ctx.world.get::<&Aircraft>(entity).ok().map(|a| a.mode))
        == Some(FlightMode::Combat)
}

/// Regular enemies still alive in the arena.
pub fn live_enemies(ctx: &SimContext) -> usize {
    ctx.world
        .query::<&Lifecycle>()
        .iter()
        .filter(|(_, life)| life.alive && life.kind == EntityKind::Enemy)
        .count()
}
