//! Game loop: polls controls, advances the engine one frame at a time and
//! forwards the frame's audio and banner messages.
//!
//! In real-time mode each frame is paced to the configured rate and the
//! engine receives the measured wall-clock delta. Fast mode steps with a
//! fixed delta and never sleeps, which makes a run reproducible.

use std::time::{Duration, Instant};

use skyfury_core::constants::DEFAULT_FPS;
use skyfury_core::enums::{GamePhase, SoundCue};
use skyfury_core::events::GameEvent;
use skyfury_core::state::GameStateSnapshot;
use skyfury_sim::SimulationEngine;

use crate::audio::{self, LoggingSink};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::hud::{self, MessageBoard};
use crate::input::{Autopilot, IdleInput, InputSource};

/// Nominal duration of one frame at the default rate.
pub const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / DEFAULT_FPS as u64);

/// Target wall-clock time per frame at `fps`.
pub fn frame_duration(fps: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(fps.max(1)))
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub phase: GamePhase,
    pub score: u64,
    pub kills: u32,
    pub level: u32,
}

pub struct Runner {
    engine: SimulationEngine,
    input: Box<dyn InputSource>,
    audio: LoggingSink,
    board: MessageBoard,
    config: AppConfig,
}

impl Runner {
    /// `engine` should already have a game started.
    pub fn new(engine: SimulationEngine, input: Box<dyn InputSource>, config: AppConfig) -> Self {
        Self {
            engine,
            input,
            audio: LoggingSink::new(config.music_volume, config.sfx_volume),
            board: MessageBoard::new(),
            config,
        }
    }

    /// Validate `config`, start the configured game and pick the pilot.
    pub fn from_config(config: AppConfig) -> Result<Self, AppError> {
        config.validate()?;
        let sim_config = config.sim_config();
        sim_config.validate()?;

        let mut engine = SimulationEngine::new(sim_config);
        if config.practice {
            engine.start_practice();
        } else {
            engine.start_level(config.level)?;
        }
        let input: Box<dyn InputSource> = if config.autopilot {
            Box::new(Autopilot::new())
        } else {
            Box::new(IdleInput)
        };
        Ok(Self::new(engine, input, config))
    }

    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    pub fn audio(&self) -> &LoggingSink {
        &self.audio
    }

    pub fn board(&self) -> &MessageBoard {
        &self.board
    }

    /// Run until the game ends or the frame limit is reached.
    pub fn run(&mut self) -> RunSummary {
        let frame_budget = frame_duration(self.config.fps);
        let fixed_dt = self.config.fixed_dt();
        let status_every = u64::from(self.config.fps.max(1));

        let mut snapshot = self.engine.snapshot();
        let mut frames: u64 = 0;
        let mut last_frame = Instant::now();
        let mut next_frame_time = Instant::now();

        while !is_finished(snapshot.phase) && self.config.max_frames.map_or(true, |max| frames < max)
        {
            // 1. Controls for this frame, decided from the last published state
            let input = self.input.poll(&snapshot);
            self.engine.set_input(input);

            // 2. Advance one frame
            let dt = if self.config.fast {
                fixed_dt
            } else {
                let now = Instant::now();
                let dt = now.duration_since(last_frame).as_secs_f64();
                last_frame = now;
                dt
            };
            snapshot = self.engine.frame(dt);
            frames += 1;

            // 3. Forward side effects
            self.publish(&snapshot, dt);

            // 4. Periodic status
            if frames % status_every == 0 {
                log::info!("{}", hud::status_line(snapshot.phase, &snapshot.hud));
            }

            // 5. Sleep until the next frame
            if !self.config.fast {
                next_frame_time += frame_budget;
                let now = Instant::now();
                if next_frame_time > now {
                    std::thread::sleep(next_frame_time - now);
                } else if now - next_frame_time > frame_budget * 2 {
                    // Too far behind; drop the backlog instead of racing to catch up
                    next_frame_time = now;
                }
            }
        }

        let (music_volume, sfx_volume) = self.audio.volumes();
        log::debug!(
            "{} sounds played ({} explosions) at music {music_volume:.2}, sfx {sfx_volume:.2}",
            self.audio.total_sounds(),
            self.audio.times_played(SoundCue::Explosion)
        );

        let session = self.engine.session();
        RunSummary {
            frames,
            phase: snapshot.phase,
            score: session.score,
            kills: session.kills,
            level: self.engine.level(),
        }
    }

    fn publish(&mut self, snapshot: &GameStateSnapshot, dt: f64) {
        audio::dispatch(&mut self.audio, &snapshot.audio_events);
        self.board.tick(dt);
        for message in &snapshot.messages {
            self.board.push(message);
        }
        for event in &snapshot.events {
            match event {
                GameEvent::Damage { .. }
                | GameEvent::ProjectileFired { .. }
                | GameEvent::ParticleBurst { .. } => {}
                other => log::debug!("{other:?}"),
            }
        }
    }
}

fn is_finished(phase: GamePhase) -> bool {
    matches!(phase, GamePhase::GameOver | GamePhase::Victory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyfury_core::commands::PlayerCommand;
    use skyfury_core::enums::MusicTrack;
    use skyfury_sim::{SimConfig, SimError};

    fn fast_config(max_frames: u64) -> AppConfig {
        AppConfig {
            fast: true,
            max_frames: Some(max_frames),
            ..Default::default()
        }
    }

    fn level_one() -> SimulationEngine {
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.start_level(1).unwrap();
        engine
    }

    #[test]
    fn test_frame_duration_constant() {
        // 60Hz = 16.666ms per frame
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(FRAME_DURATION.as_nanos(), expected_nanos as u128);
        assert_eq!(frame_duration(60), FRAME_DURATION);
        assert_eq!(frame_duration(0), Duration::from_secs(1));
    }

    #[test]
    fn test_idle_run_stops_at_frame_limit() {
        let mut runner = Runner::new(level_one(), Box::new(IdleInput), fast_config(300));
        let summary = runner.run();

        assert_eq!(summary.frames, 300);
        assert_eq!(summary.phase, GamePhase::Active);
        assert_eq!(summary.level, 1);
        assert_eq!(summary.score, 0);
        assert_eq!(runner.engine().time().frame, 300);
        assert_eq!(runner.audio().current_track(), Some(MusicTrack::Level));
    }

    #[test]
    fn test_autopilot_reaches_first_wave() {
        let mut runner = Runner::new(level_one(), Box::new(Autopilot::new()), fast_config(600));
        let summary = runner.run();

        assert!(summary.frames <= 600);
        assert_eq!(summary.frames, runner.engine().time().frame);
        assert!(
            runner.engine().snapshot().hud.wave >= 1,
            "Autopilot should reach the combat zone within ten seconds"
        );
    }

    #[test]
    fn test_from_config_starts_game() {
        let runner = Runner::from_config(AppConfig {
            level: 2,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(runner.engine().phase(), GamePhase::Active);
        assert_eq!(runner.engine().level(), 2);

        let practice = Runner::from_config(AppConfig {
            practice: true,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(practice.engine().level(), 0);
    }

    #[test]
    fn test_from_config_rejects_bad_setup() {
        let unknown_level = Runner::from_config(AppConfig {
            level: 9,
            ..Default::default()
        });
        assert!(matches!(
            unknown_level,
            Err(AppError::Sim(SimError::UnknownLevel(9)))
        ));

        let no_lives = Runner::from_config(AppConfig {
            starting_lives: 0,
            ..Default::default()
        });
        assert!(matches!(no_lives, Err(AppError::Sim(SimError::InvalidConfig(_)))));

        let bad_fps = Runner::from_config(AppConfig {
            fps: 0,
            ..Default::default()
        });
        assert!(matches!(bad_fps, Err(AppError::Config(_))));
    }

    #[test]
    fn test_terminal_phases() {
        assert!(is_finished(GamePhase::GameOver));
        assert!(is_finished(GamePhase::Victory));
        assert!(!is_finished(GamePhase::LevelComplete));
        assert!(!is_finished(GamePhase::Paused));
    }

    #[test]
    fn test_snapshot_serialization_under_10ms() {
        let mut runner = Runner::new(level_one(), Box::new(Autopilot::new()), fast_config(400));
        runner.run();

        let snapshot = runner.engine().snapshot();
        let start = Instant::now();
        let json = serde_json::to_string(&snapshot).unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed < Duration::from_millis(10),
            "Snapshot serialization took {:?}, should be <10ms",
            elapsed
        );
        assert!(!json.is_empty());
    }

    #[test]
    fn test_pause_resume_via_commands() {
        let mut engine = level_one();
        let snap = engine.frame(1.0 / 60.0);
        assert_eq!(snap.phase, GamePhase::Active);

        // Pause
        engine.queue_command(PlayerCommand::Pause);
        let snap = engine.frame(1.0 / 60.0);
        assert_eq!(snap.phase, GamePhase::Paused);
        let paused_frame = snap.time.frame;

        // Frames while paused do not advance time
        let snap = engine.frame(1.0 / 60.0);
        assert_eq!(snap.time.frame, paused_frame);

        // Resume
        engine.queue_command(PlayerCommand::Resume);
        let snap = engine.frame(1.0 / 60.0);
        assert_eq!(snap.phase, GamePhase::Active);
        assert!(snap.time.frame > paused_frame);
    }

    #[test]
    fn test_real_time_run_paces_frames() {
        let config = AppConfig {
            fps: 100,
            max_frames: Some(5),
            autopilot: false,
            ..Default::default()
        };
        let mut runner = Runner::new(level_one(), Box::new(IdleInput), config);
        let start = Instant::now();
        let summary = runner.run();

        assert_eq!(summary.frames, 5);
        assert!(start.elapsed() >= Duration::from_millis(40));
        assert!(runner.engine().time().elapsed_secs > 0.0);
    }
}
