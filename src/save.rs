//! Persistent progress: high score, achievements, lifetime stats and unlocked levels.
//!
//! Storage failures never reach the simulation. They are logged and the in-memory copy stays authoritative.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use bevy_ecs::resource::Resource;
use mockall::automock;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, IntoStaticStr};
use tracing::{debug, warn};

use crate::error::SaveError;
use crate::level::LevelId;
use crate::score::AchievementId;

/// A lifetime counter kept in the save data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Stat {
    TotalFuCollected,
    TotalRedPackets,
    /// Seconds of flight granted by spring words.
    TotalFlyTime,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SaveData {
    pub high_score: u32,
    /// Achievement progress keyed by achievement id. An achievement is unlocked once its progress reaches its target.
    pub achievements: HashMap<String, u32>,
    pub total_fu_collected: u32,
    pub total_red_packets: u32,
    pub total_fly_time: u32,
    pub levels_unlocked: [bool; 3],
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            high_score: 0,
            achievements: HashMap::new(),
            total_fu_collected: 0,
            total_red_packets: 0,
            total_fly_time: 0,
            levels_unlocked: [true, false, false],
        }
    }
}

impl SaveData {
    fn stat_mut(&mut self, stat: Stat) -> &mut u32 {
        match stat {
            Stat::TotalFuCollected => &mut self.total_fu_collected,
            Stat::TotalRedPackets => &mut self.total_red_packets,
            Stat::TotalFlyTime => &mut self.total_fly_time,
        }
    }

    fn stat(&self, stat: Stat) -> u32 {
        match stat {
            Stat::TotalFuCollected => self.total_fu_collected,
            Stat::TotalRedPackets => self.total_red_packets,
            Stat::TotalFlyTime => self.total_fly_time,
        }
    }
}

/// Where save data lives between sessions.
#[automock]
pub trait SaveBackend: Send + Sync {
    /// Returns `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<SaveData>, SaveError>;
    fn store(&mut self, data: &SaveData) -> Result<(), SaveError>;
}

/// Keeps save data in memory only.
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    data: Option<SaveData>,
}

impl MemoryBackend {
    pub fn with_data(data: SaveData) -> Self {
        Self { data: Some(data) }
    }

    pub fn stored(&self) -> Option<&SaveData> {
        self.data.as_ref()
    }
}

impl SaveBackend for MemoryBackend {
    fn load(&self) -> Result<Option<SaveData>, SaveError> {
        Ok(self.data.clone())
    }

    fn store(&mut self, data: &SaveData) -> Result<(), SaveError> {
        self.data = Some(data.clone());
        Ok(())
    }
}

/// Persists save data as a JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SaveBackend for JsonFileBackend {
    fn load(&self) -> Result<Option<SaveData>, SaveError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }

    fn store(&mut self, data: &SaveData) -> Result<(), SaveError> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(data)?)?;
        Ok(())
    }
}

/// The persistence collaborator used by the simulation.
#[derive(Resource)]
pub struct SaveManager {
    data: SaveData,
    backend: Box<dyn SaveBackend>,
}

impl SaveManager {
    /// Loads existing data from the backend, falling back to defaults when loading fails.
    pub fn new(backend: Box<dyn SaveBackend>) -> Self {
        let data = match backend.load() {
            Ok(Some(data)) => data,
            Ok(None) => SaveData::default(),
            Err(error) => {
                warn!(%error, "Failed to load save data, starting fresh");
                SaveData::default()
            }
        };
        Self { data, backend }
    }

    /// An in-memory manager with default data.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryBackend::default()))
    }

    fn persist(&mut self) {
        if let Err(error) = self.backend.store(&self.data) {
            warn!(%error, "Failed to persist save data");
        }
    }

    pub fn data(&self) -> &SaveData {
        &self.data
    }

    pub fn high_score(&self) -> u32 {
        self.data.high_score
    }

    /// Records `score` if it beats the current high score. Returns whether it did.
    pub fn set_high_score(&mut self, score: u32) -> bool {
        if score <= self.data.high_score {
            return false;
        }
        debug!(previous = self.data.high_score, score, "New high score");
        self.data.high_score = score;
        self.persist();
        true
    }

    pub fn add_stat(&mut self, stat: Stat, amount: u32) {
        let value = self.data.stat_mut(stat);
        *value = value.saturating_add(amount);
        self.persist();
    }

    pub fn stat(&self, stat: Stat) -> u32 {
        self.data.stat(stat)
    }

    pub fn achievement_progress(&self, id: AchievementId) -> u32 {
        self.data.achievements.get(id.key()).copied().unwrap_or(0)
    }

    pub fn is_achievement_unlocked(&self, id: AchievementId) -> bool {
        self.achievement_progress(id) >= id.target()
    }

    pub fn unlock_achievement(&mut self, id: AchievementId) {
        debug!(achievement = id.key(), "Achievement unlocked");
        self.data.achievements.insert(id.key().to_string(), id.target());
        self.persist();
    }

    /// Unlocks `level`. Levels outside the table are ignored.
    pub fn unlock_level(&mut self, level: u8) {
        let Some(slot) = level.checked_sub(1).and_then(|index| self.data.levels_unlocked.get_mut(index as usize)) else {
            return;
        };
        *slot = true;
        self.persist();
    }

    pub fn is_level_unlocked(&self, level: LevelId) -> bool {
        self.data
            .levels_unlocked
            .get(level.get() as usize - 1)
            .copied()
            .unwrap_or(false)
    }

    /// Restores defaults and persists them.
    pub fn reset(&mut self) {
        self.data = SaveData::default();
        self.persist();
    }
}

impl std::fmt::Debug for SaveManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaveManager").field("data", &self.data).finish_non_exhaustive()
    }
}
