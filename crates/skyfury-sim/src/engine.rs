//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the simulation context, processes player commands,
//! runs all systems in a fixed order, and produces `GameStateSnapshot`s.
//! Completely headless (no windowing or audio dependency), enabling
//! deterministic testing.

use std::collections::VecDeque;

use hecs::World;

use skyfury_core::commands::PlayerCommand;
use skyfury_core::components::{Loadout, Player};
use skyfury_core::constants::*;
use skyfury_core::enums::{GamePhase, MusicTrack, SoundCue};
use skyfury_core::events::{AudioEvent, GameEvent, HudMessage};
use skyfury_core::input::InputState;
use skyfury_core::state::GameStateSnapshot;
use skyfury_core::types::SimTime;

use crate::context::{Session, SimContext};
use crate::error::SimError;
use crate::levels;
use crate::systems;
use crate::systems::snapshot::FrameOutput;
use crate::systems::waves::WaveDirector;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and inputs = same simulation.
    pub seed: u64,
    /// Lives at the start of a new game.
    pub starting_lives: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            starting_lives: PLAYER_START_LIVES,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), SimError> {
        if self.starting_lives == 0 {
            return Err(SimError::InvalidConfig(
                "starting_lives must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Side effects produced by one [`SimulationEngine::step`].
#[derive(Debug, Clone, Default)]
pub struct FrameReport {
    pub events: Vec<GameEvent>,
    pub audio: Vec<AudioEvent>,
    pub messages: Vec<HudMessage>,
}

/// The simulation engine. Owns the world and all session state.
pub struct SimulationEngine {
    ctx: SimContext,
    phase: GamePhase,
    director: WaveDirector,
    input: InputState,
    command_queue: VecDeque<PlayerCommand>,
    music: Option<MusicTrack>,
    intermission_secs: f64,
    config: SimConfig,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        let mut ctx = SimContext::new(config.seed);
        ctx.session = Session::new(config.starting_lives);
        Self {
            ctx,
            phase: GamePhase::default(),
            director: WaveDirector::idle(),
            input: InputState::default(),
            command_queue: VecDeque::new(),
            music: None,
            intermission_secs: 0.0,
            config,
        }
    }

    /// Queue a player command for processing at the next frame boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Set the control state used by the following frames.
    pub fn set_input(&mut self, input: InputState) {
        self.input = input;
    }

    /// Start a new game on `level`. Score and lives are reset.
    pub fn start_level(&mut self, level: u32) -> Result<(), SimError> {
        // Validate before touching the current game.
        levels::level(level)?;
        self.ctx.session.restart(self.config.starting_lives);
        self.ctx.time = SimTime::default();
        self.begin_level(level, world_setup::starting_loadout())
    }

    /// Start an endless practice arena.
    pub fn start_practice(&mut self) {
        self.ctx.session.restart(self.config.starting_lives);
        self.ctx.time = SimTime::default();
        self.ctx.clear_world();
        world_setup::spawn_player(&mut self.ctx, world_setup::starting_loadout());
        self.director = WaveDirector::practice();
        self.phase = GamePhase::Active;
        log::info!("Starting practice arena");
        self.ctx.message("PRACTICE MODE", MESSAGE_LONG_SECS);
        self.set_music(MusicTrack::Level);
    }

    /// Advance the simulation by `dt` seconds and return the frame's side effects.
    pub fn step(&mut self, dt: f64) -> FrameReport {
        let dt = sanitize_dt(dt);
        self.process_commands();

        match self.phase {
            GamePhase::Active => self.run_systems(dt),
            GamePhase::LevelComplete => self.run_intermission(dt),
            _ => {}
        }

        FrameReport {
            events: std::mem::take(&mut self.ctx.events),
            audio: std::mem::take(&mut self.ctx.audio),
            messages: std::mem::take(&mut self.ctx.messages),
        }
    }

    /// Advance by `dt` and return the resulting snapshot.
    pub fn frame(&mut self, dt: f64) -> GameStateSnapshot {
        let report = self.step(dt);
        systems::snapshot::build_snapshot(
            &self.ctx,
            self.phase,
            &self.director,
            FrameOutput {
                events: report.events,
                audio: report.audio,
                messages: report.messages,
            },
        )
    }

    /// Snapshot of the current state without advancing.
    pub fn snapshot(&self) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(
            &self.ctx,
            self.phase,
            &self.director,
            FrameOutput::default(),
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.ctx.time
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.ctx.world
    }

    pub fn session(&self) -> &Session {
        &self.ctx.session
    }

    /// Current level number, 0 outside scripted levels.
    pub fn level(&self) -> u32 {
        self.director.level_number()
    }

    #[cfg(test)]
    pub fn context_mut(&mut self) -> &mut SimContext {
        &mut self.ctx
    }

    #[cfg(test)]
    pub fn director(&self) -> &WaveDirector {
        &self.director
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        let between_games = matches!(
            self.phase,
            GamePhase::MainMenu | GamePhase::GameOver | GamePhase::Victory
        );
        match command {
            PlayerCommand::StartLevel { level } => {
                if between_games {
                    if let Err(err) = self.start_level(level) {
                        log::warn!("Ignoring StartLevel: {err}");
                    }
                }
            }
            PlayerCommand::StartPractice => {
                if between_games {
                    self.start_practice();
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::ReturnToMenu => {
                if self.phase != GamePhase::MainMenu {
                    self.ctx.clear_world();
                    self.director = WaveDirector::idle();
                    self.phase = GamePhase::MainMenu;
                    self.set_music(MusicTrack::Menu);
                }
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        // 1. Player input (flight, weapons) and wave spawns
        systems::aircraft::run(&mut self.ctx, &self.input, dt);
        systems::weapons::run(&mut self.ctx, &self.input, dt);
        self.director.run(&mut self.ctx, dt);
        // 2. Enemy and boss AI
        systems::enemy_ai::run(&mut self.ctx, dt);
        // 3. Projectiles, particles and pickups
        systems::projectiles::run(&mut self.ctx, dt);
        systems::particles::run(&mut self.ctx, dt);
        systems::pickups::run(&mut self.ctx, dt);
        // 4. Collision passes
        systems::collision::run(&mut self.ctx, dt);
        // 5. Death effects and culling
        let report = systems::cleanup::run(&mut self.ctx);
        // 6. Level progress
        if report.game_over {
            self.game_over();
        } else if report.boss_defeated {
            self.director.mark_boss_defeated();
            self.complete_level();
        }
        // 7. Music follows the boss
        if self.phase == GamePhase::Active {
            let track = if self.director.boss().is_some_and(|id| self.ctx.is_alive(id)) {
                MusicTrack::Boss
            } else {
                MusicTrack::Level
            };
            self.set_music(track);
        }
        // 8. Clock
        self.ctx.time.advance(dt);
    }

    /// Let the last effects play out, then move on to the next level.
    fn run_intermission(&mut self, dt: f64) {
        systems::projectiles::run(&mut self.ctx, dt);
        systems::particles::run(&mut self.ctx, dt);
        systems::pickups::run(&mut self.ctx, dt);
        systems::cleanup::run(&mut self.ctx);
        self.ctx.time.advance(dt);

        self.intermission_secs -= dt;
        if self.intermission_secs > 0.0 {
            return;
        }
        let next = self.director.level_number() + 1;
        let loadout = self.carried_loadout();
        if let Err(err) = self.begin_level(next, loadout) {
            log::warn!("Cannot advance past level {}: {err}", next - 1);
            self.phase = GamePhase::Victory;
        }
    }

    fn begin_level(&mut self, number: u32, loadout: Loadout) -> Result<(), SimError> {
        let def = levels::level(number)?;
        log::info!(
            "Starting level {}: {} ({} enemies)",
            def.number,
            def.name,
            def.total_enemies()
        );
        self.ctx.clear_world();
        world_setup::spawn_player(&mut self.ctx, loadout);
        self.ctx.message(
            format!("LEVEL {}: {}", def.number, def.name.to_uppercase()),
            MESSAGE_LONG_SECS,
        );
        self.director = WaveDirector::for_level(def);
        self.phase = GamePhase::Active;
        self.set_music(MusicTrack::Level);
        Ok(())
    }

    /// The player's loadout with cooldowns and charge cleared.
    fn carried_loadout(&self) -> Loadout {
        let mut query = self.ctx.world.query::<(&Player, &Loadout)>();
        let carried = query.iter().next().map(|(_, (_, loadout))| Loadout {
            laser_charge: 0.0,
            laser_charging: false,
            primary_cooldown: 0.0,
            missile_cooldown: 0.0,
            laser_cooldown: 0.0,
            shield_cooldown: 0.0,
            ..loadout.clone()
        });
        carried.unwrap_or_else(world_setup::starting_loadout)
    }

    fn complete_level(&mut self) {
        let level = self.director.level_number();
        self.ctx.emit(GameEvent::LevelComplete { level });
        self.ctx.sound(SoundCue::LevelComplete);

        if level >= LEVEL_COUNT {
            let score = self.ctx.session.score;
            log::info!("Final level cleared with score {score}");
            self.ctx.emit(GameEvent::Victory { score });
            self.ctx.message("VICTORY!", MESSAGE_LONG_SECS);
            self.stop_music();
            self.phase = GamePhase::Victory;
        } else {
            log::info!("Level {level} complete");
            self.ctx
                .message(format!("LEVEL {level} COMPLETE!"), MESSAGE_LONG_SECS);
            self.intermission_secs = LEVEL_INTERMISSION_SECS;
            self.phase = GamePhase::LevelComplete;
        }
    }

    fn game_over(&mut self) {
        let score = self.ctx.session.score;
        log::info!("Game over with score {score}");
        self.ctx.emit(GameEvent::GameOver { score });
        self.ctx.sound(SoundCue::GameOver);
        self.ctx.message("GAME OVER", MESSAGE_LONG_SECS);
        self.stop_music();
        self.phase = GamePhase::GameOver;
    }

    fn set_music(&mut self, track: MusicTrack) {
        if self.music != Some(track) {
            self.music = Some(track);
            self.ctx.audio.push(AudioEvent::PlayMusic {
                track,
                looped: true,
            });
        }
    }

    fn stop_music(&mut self) {
        if self.music.take().is_some() {
            self.ctx.audio.push(AudioEvent::StopMusic);
        }
    }
}

/// Negative or non-finite frame times become 0; long frames are clamped.
fn sanitize_dt(dt: f64) -> f64 {
    if !dt.is_finite() || dt < 0.0 {
        log::warn!("Invalid frame delta {dt}; treating as 0");
        return 0.0;
    }
    dt.min(MAX_FRAME_DT)
}
