//! Runner configuration: an optional JSON file, then command-line overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use skyfury_core::constants::{DEFAULT_FPS, PLAYER_START_LIVES};
use skyfury_sim::SimConfig;

use crate::error::ConfigError;

const MAX_FPS: u32 = 1000;

/// Everything the runner needs to start a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub seed: u64,
    /// Level to start on, 1-based.
    pub level: u32,
    pub starting_lives: u32,
    /// Endless practice arena instead of the campaign.
    pub practice: bool,
    /// Frame-rate cap.
    pub fps: u32,
    /// Stop after this many frames. `None` runs until the game ends.
    pub max_frames: Option<u64>,
    /// Step with a fixed `1/fps` delta and never sleep.
    pub fast: bool,
    /// Let the built-in bot fly; otherwise the aircraft idles on the runway.
    pub autopilot: bool,
    pub asset_root: PathBuf,
    pub music_volume: f64,
    pub sfx_volume: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            level: 1,
            starting_lives: PLAYER_START_LIVES,
            practice: false,
            fps: DEFAULT_FPS,
            max_frames: None,
            fast: false,
            autopilot: true,
            asset_root: PathBuf::from("assets"),
            music_volume: 0.4,
            sfx_volume: 0.6,
        }
    }
}

/// Values given on the command line. `None` keeps the file's value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub level: Option<u32>,
    pub fps: Option<u32>,
    pub max_frames: Option<u64>,
    pub asset_root: Option<PathBuf>,
    pub practice: bool,
    pub fast: bool,
    pub idle: bool,
}

impl AppConfig {
    /// Read a config file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// The file at `path` if given, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn apply(mut self, overrides: &Overrides) -> Self {
        if let Some(seed) = overrides.seed {
            self.seed = seed;
        }
        if let Some(level) = overrides.level {
            self.level = level;
        }
        if let Some(fps) = overrides.fps {
            self.fps = fps;
        }
        if let Some(frames) = overrides.max_frames {
            self.max_frames = Some(frames);
        }
        if let Some(root) = &overrides.asset_root {
            self.asset_root = root.clone();
        }
        self.practice |= overrides.practice;
        self.fast |= overrides.fast;
        if overrides.idle {
            self.autopilot = false;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 || self.fps > MAX_FPS {
            return Err(ConfigError::InvalidFrameRate(self.fps));
        }
        for (name, value) in [("music_volume", self.music_volume), ("sfx_volume", self.sfx_volume)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidVolume { name, value });
            }
        }
        Ok(())
    }

    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            seed: self.seed,
            starting_lives: self.starting_lives,
        }
    }

    /// Fixed step used in fast mode.
    pub fn fixed_dt(&self) -> f64 {
        1.0 / f64::from(self.fps.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.fps, 60);
        assert!(config.autopilot);
        assert_eq!(config.sim_config().starting_lives, 3);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "seed": 7, "fps": 30, "max_frames": 900 }}"#).unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.fps, 30);
        assert_eq!(config.max_frames, Some(900));
        assert_eq!(config.level, 1);
        assert_eq!(config.sfx_volume, 0.6);
    }

    #[test]
    fn test_load_missing_file() {
        let err = AppConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ seed: ").unwrap();
        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_overrides_win() {
        let overrides = Overrides {
            seed: Some(99),
            level: Some(2),
            fps: Some(120),
            fast: true,
            idle: true,
            ..Default::default()
        };
        let config = AppConfig::default().apply(&overrides);
        assert_eq!(config.seed, 99);
        assert_eq!(config.level, 2);
        assert_eq!(config.fps, 120);
        assert!(config.fast);
        assert!(!config.autopilot);
        assert!(!config.practice);
    }

    #[test]
    fn test_validation() {
        let zero_fps = AppConfig {
            fps: 0,
            ..Default::default()
        };
        assert!(matches!(
            zero_fps.validate(),
            Err(ConfigError::InvalidFrameRate(0))
        ));

        let loud = AppConfig {
            music_volume: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            loud.validate(),
            Err(ConfigError::InvalidVolume { name: "music_volume", .. })
        ));
    }

    #[test]
    fn test_fixed_dt() {
        let config = AppConfig {
            fps: 50,
            ..Default::default()
        };
        assert!((config.fixed_dt() - 0.02).abs() < 1e-12);
    }
}
