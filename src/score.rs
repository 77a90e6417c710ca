//! Session scoring: score, lives, distance, red packets and invincibility energy.

use bevy_ecs::resource::Resource;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, IntoStaticStr};
use thousands::Separable;
use tracing::{debug, trace};

use crate::constants::{player, score::REDPACKET_THRESHOLD};
use crate::level::LevelId;
use crate::save::{SaveManager, Stat};

/// Every achievement the game tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum AchievementId {
    /// Collect 100 fu characters across all sessions.
    FuMaster,
    /// Collect 20 red packets in a single level.
    PacketSaver,
    /// Clear level 3 without taking damage.
    FirecrackerProof,
    /// Clear level 1 within 30 seconds.
    SpeedDemon,
    #[strum(serialize = "no_damage_1")]
    NoDamage1,
    #[strum(serialize = "no_damage_2")]
    NoDamage2,
    /// Fly for a total of 60 seconds.
    SpringFlyer,
    /// Clear every level.
    NianshouDeliverer,
}

impl AchievementId {
    /// The persistent key used in save data.
    pub fn key(self) -> &'static str {
        self.into()
    }

    /// Progress needed for the achievement to count as unlocked.
    pub fn target(self) -> u32 {
        match self {
            AchievementId::FuMaster => 100,
            AchievementId::PacketSaver => 20,
            AchievementId::SpeedDemon => 30,
            AchievementId::SpringFlyer => 60,
            _ => 1,
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct ScoreManager {
    score: u32,
    lives: u8,
    /// Red packets available to spend on invincibility.
    red_packets: u32,
    /// Red packets picked up this level, regardless of spending.
    red_packets_collected: u32,
    current_level: LevelId,
    distance: f64,
    damage_taken: u32,
    invincible_energy: f64,
    invincible_active: bool,
    level_elapsed_ms: f64,
}

impl ScoreManager {
    pub fn new(level: LevelId) -> Self {
        Self {
            score: 0,
            lives: player::MAX_LIVES,
            red_packets: 0,
            red_packets_collected: 0,
            current_level: level,
            distance: 0.0,
            damage_taken: 0,
            invincible_energy: 0.0,
            invincible_active: false,
            level_elapsed_ms: 0.0,
        }
    }

    /// Zeroes every session counter for a fresh attempt at `level`.
    pub fn reset_level(&mut self, level: LevelId) {
        debug!(%level, "Resetting score state");
        *self = Self::new(level);
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// The score with thousands separators, as shown to players.
    pub fn formatted_score(&self) -> String {
        self.score.separate_with_commas()
    }

    pub fn take_damage(&mut self, amount: u8) {
        self.lives = self.lives.saturating_sub(amount);
        self.damage_taken += amount as u32;
        trace!(lives = self.lives, damage_taken = self.damage_taken, "Lives lost");
    }

    pub fn heal(&mut self, amount: u8) {
        self.lives = self.lives.saturating_add(amount).min(player::MAX_LIVES);
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn is_dead(&self) -> bool {
        self.lives == 0
    }

    pub fn add_red_packet(&mut self) {
        self.red_packets += 1;
        self.red_packets_collected += 1;
    }

    pub fn red_packets(&self) -> u32 {
        self.red_packets
    }

    pub fn red_packets_collected(&self) -> u32 {
        self.red_packets_collected
    }

    pub fn can_activate_invincible(&self) -> bool {
        self.red_packets >= REDPACKET_THRESHOLD
    }

    /// Spends a full set of red packets and fills the energy bar.
    pub fn activate_invincible(&mut self) -> bool {
        if !self.can_activate_invincible() {
            return false;
        }
        self.red_packets -= REDPACKET_THRESHOLD;
        self.invincible_energy = REDPACKET_THRESHOLD as f64;
        self.invincible_active = true;
        true
    }

    /// Drains energy linearly so a full bar empties over the invincibility duration.
    pub fn update_invincible_energy(&mut self, delta_ms: f64) {
        if !self.invincible_active || self.invincible_energy <= 0.0 {
            return;
        }
        let rate = REDPACKET_THRESHOLD as f64 / player::INVINCIBLE_DURATION_MS;
        self.invincible_energy -= rate * delta_ms;
        if self.invincible_energy <= 0.0 {
            self.end_invincible();
        }
    }

    pub fn end_invincible(&mut self) {
        self.invincible_energy = 0.0;
        self.invincible_active = false;
    }

    pub fn invincible_energy(&self) -> f64 {
        self.invincible_energy
    }

    pub fn is_invincible_active(&self) -> bool {
        self.invincible_active
    }

    pub fn current_level(&self) -> LevelId {
        self.current_level
    }

    pub fn update_distance(&mut self, delta: f64) {
        self.distance += delta.max(0.0);
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn advance_level_time(&mut self, delta_ms: f64) {
        self.level_elapsed_ms += delta_ms;
    }

    /// Seconds spent in the current level while running.
    pub fn level_time(&self) -> f64 {
        self.level_elapsed_ms / 1000.0
    }

    pub fn damage_taken(&self) -> u32 {
        self.damage_taken
    }

    pub fn is_no_damage(&self) -> bool {
        self.damage_taken == 0
    }

    fn qualifies(&self, id: AchievementId, save: &SaveManager) -> bool {
        let level = self.current_level.get();
        match id {
            AchievementId::FuMaster => save.stat(Stat::TotalFuCollected) >= id.target(),
            AchievementId::PacketSaver => self.red_packets_collected >= id.target(),
            AchievementId::FirecrackerProof => level == 3 && self.is_no_damage(),
            AchievementId::SpeedDemon => level == 1 && self.level_time() <= id.target() as f64,
            AchievementId::NoDamage1 => level == 1 && self.is_no_damage(),
            AchievementId::NoDamage2 => level == 2 && self.is_no_damage(),
            AchievementId::SpringFlyer => save.stat(Stat::TotalFlyTime) >= id.target(),
            AchievementId::NianshouDeliverer => level == 3,
        }
    }

    /// Unlocks every achievement this session now qualifies for and returns the new ones.
    pub fn check_achievements(&self, save: &mut SaveManager) -> Vec<AchievementId> {
        let unlocked: Vec<AchievementId> = AchievementId::iter()
            .filter(|id| !save.is_achievement_unlocked(*id) && self.qualifies(*id, save))
            .collect();
        for id in &unlocked {
            save.unlock_achievement(*id);
        }
        unlocked
    }
}
