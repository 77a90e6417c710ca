//! Configuration of the headless runner.

use std::path::PathBuf;

use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::constants::FRAME_MS;
use crate::error::{GameError, GameResult};
use crate::level::LevelId;

/// Runner configuration. Every field can be overridden through a `NIANSHOU_` prefixed environment variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// The level to start from
    pub level: u8,
    /// Play on through the following levels after a completion
    pub campaign: bool,
    /// Seed for the spawn generator; random when unset
    pub seed: Option<u64>,
    /// Fixed frame length, in milliseconds
    pub frame_ms: f64,
    /// Upper bound on frames per level before the run is abandoned
    pub max_frames: u32,
    /// Save file location; progress is kept in memory when unset
    pub save_path: Option<PathBuf>,
    pub muted: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            level: LevelId::FIRST.get(),
            campaign: true,
            seed: None,
            frame_ms: FRAME_MS,
            max_frames: 60 * 60 * 5,
            save_path: None,
            muted: false,
        }
    }
}

impl RunnerConfig {
    /// The defaults layered under environment overrides.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(RunnerConfig::default())).merge(Env::prefixed("NIANSHOU_"))
    }

    pub fn load() -> GameResult<Self> {
        Self::from_figment(Self::figment())
    }

    /// Extracts the configuration and rejects values the runner cannot make progress with.
    pub fn from_figment(figment: Figment) -> GameResult<Self> {
        let config: Self = figment.extract()?;
        if !config.frame_ms.is_finite() || config.frame_ms <= 0.0 {
            return Err(GameError::InvalidState(format!(
                "frame_ms must be a positive number of milliseconds, got {}",
                config.frame_ms
            )));
        }
        if config.max_frames == 0 {
            return Err(GameError::InvalidState("max_frames must be at least 1".to_string()));
        }
        Ok(config)
    }
}
