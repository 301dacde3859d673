//! Game configuration. Loaded from `paranoid.ron` at startup.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use paranoid_core::constants::{ARENA_HEIGHT, ARENA_WIDTH};
use paranoid_core::levels::{LevelConfig, LevelTable};
use paranoid_core::types::Arena;
use paranoid_sim::SimConfig;
use paranoid_voice::api::{OfflineApi, SoundApi, UnavailableApi};
use paranoid_voice::recorder::RecorderSettings;

const CONFIG_FILE: &str = "paranoid.ron";

/// Startup settings. Every field is optional in the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// RNG seed. Same seed, same asteroid fields.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Playfield width in arena pixels.
    #[serde(default = "default_arena_width")]
    pub arena_width: f64,
    #[serde(default = "default_arena_height")]
    pub arena_height: f64,
    #[serde(default)]
    pub recording: RecordingConfig,
    /// Replacement level table. Omit to play the five built-in levels.
    #[serde(default)]
    pub levels: Option<Vec<LevelConfig>>,
}

/// Voice recording window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingConfig {
    #[serde(default = "default_min_ms")]
    pub min_ms: u64,
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
    #[serde(default = "default_progress_ms")]
    pub progress_interval_ms: u64,
    /// With no remote sound service, use the recording itself as the weapon
    /// sound. When false, recording ends in an error and only the default
    /// sound is available.
    #[serde(default = "default_offline_voice")]
    pub offline_voice: bool,
}

fn default_seed() -> u64 {
    42
}
fn default_arena_width() -> f64 {
    ARENA_WIDTH
}
fn default_arena_height() -> f64 {
    ARENA_HEIGHT
}
fn default_min_ms() -> u64 {
    500
}
fn default_max_ms() -> u64 {
    3000
}
fn default_progress_ms() -> u64 {
    100
}
fn default_offline_voice() -> bool {
    true
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            min_ms: default_min_ms(),
            max_ms: default_max_ms(),
            progress_interval_ms: default_progress_ms(),
            offline_voice: default_offline_voice(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            arena_width: default_arena_width(),
            arena_height: default_arena_height(),
            recording: RecordingConfig::default(),
            levels: None,
        }
    }
}

impl AppConfig {
    /// Load config from `paranoid.ron` in the working directory. If the file
    /// is missing or invalid, returns default config.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            match Self::parse(&data) {
                Ok(c) => {
                    log::info!("Loaded config from {:?}", path);
                    return c;
                }
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    pub fn parse(data: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(data)
    }

    /// Simulation settings. A level table that fails validation is replaced
    /// by the built-in one.
    pub fn sim_config(&self) -> SimConfig {
        let levels = match &self.levels {
            Some(levels) => LevelTable::new(levels.clone()).unwrap_or_else(|e| {
                log::warn!("{}, using the built-in levels", e);
                LevelTable::default()
            }),
            None => LevelTable::default(),
        };

        SimConfig {
            seed: self.seed,
            arena: Arena::new(self.arena_width, self.arena_height),
            levels,
        }
    }

    pub fn recorder_settings(&self) -> RecorderSettings {
        RecorderSettings {
            min_ms: self.recording.min_ms,
            max_ms: self.recording.max_ms.max(self.recording.min_ms),
            progress_interval_ms: self.recording.progress_interval_ms.max(1),
        }
    }

    /// Where recordings go to become weapon sounds.
    pub fn sound_service(&self) -> Arc<dyn SoundApi> {
        if self.recording.offline_voice {
            Arc::new(OfflineApi)
        } else {
            Arc::new(UnavailableApi)
        }
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(CONFIG_FILE)
}
