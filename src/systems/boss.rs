//! Scripted obstacle waves for the final level.
//!
//! The boss level runs three phases of thirty seconds each. Phase one rains bouncing firecrackers
//! with a shrinking interval, phase two sends fixed sine-shaped waves, and phase three mixes both
//! with rows of lanterns at a fast cadence. The level ends on distance, not on phase.

use bevy_ecs::{
    resource::Resource,
    system::{Res, ResMut},
};
use glam::Vec2;
use rand::Rng;
use strum_macros::Display;
use tracing::{debug, info};

use crate::constants::{boss, obstacle, popup, VIEWPORT_SIZE};
use crate::entity::firecracker::{FirecrackerConfig, MovePattern, SpawnDomain};
use crate::entity::lantern::{HeightBand, LanternConfig};
use crate::systems::{GameRng, Obstacles, Popups, SimClock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum BossAttack {
    Rain,
    Wave,
    LanternRow,
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct BossPhase {
    phase: u8,
    phase_timer_ms: f64,
    interval_ms: f64,
    last_spawn_ms: f64,
}

impl Default for BossPhase {
    fn default() -> Self {
        Self {
            phase: 1,
            phase_timer_ms: 0.0,
            interval_ms: boss::RAIN_INITIAL_INTERVAL_MS,
            last_spawn_ms: 0.0,
        }
    }
}

impl BossPhase {
    pub fn phase(&self) -> u8 {
        self.phase
    }

    /// Time spent in the current phase.
    pub fn phase_timer_ms(&self) -> f64 {
        self.phase_timer_ms
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Accumulates phase time and moves to the next phase once the current one has run its course.
    /// Returns the new phase on a transition.
    pub fn advance(&mut self, delta_ms: f64) -> Option<u8> {
        self.phase_timer_ms += delta_ms;
        if self.phase >= 3 || self.phase_timer_ms < boss::PHASE_DURATION_MS {
            return None;
        }
        self.phase += 1;
        self.phase_timer_ms = 0.0;
        Some(self.phase)
    }

    pub fn is_due(&self, now_ms: f64) -> bool {
        now_ms - self.last_spawn_ms > self.interval_ms
    }

    /// The interval before the next attack in the current phase.
    pub fn next_interval(&self) -> f64 {
        match self.phase {
            1 => (boss::RAIN_INITIAL_INTERVAL_MS - self.phase_timer_ms * boss::RAIN_INTERVAL_DECAY)
                .max(boss::RAIN_MIN_INTERVAL_MS),
            2 => boss::WAVE_INTERVAL_MS,
            _ => boss::BURST_INTERVAL_MS,
        }
    }

    fn pick_attack(&self, rng: &mut impl Rng) -> BossAttack {
        match self.phase {
            1 => BossAttack::Rain,
            2 => BossAttack::Wave,
            _ => match rng.random_range(0..3) {
                0 => BossAttack::Rain,
                1 => BossAttack::Wave,
                _ => BossAttack::LanternRow,
            },
        }
    }
}

fn spawn_rain(obstacles: &mut Obstacles, rng: &mut impl Rng, now_ms: f64) -> u32 {
    let count = rng.random_range(1..=boss::RAIN_MAX_COUNT);
    for _ in 0..count {
        let position = Vec2::new(
            VIEWPORT_SIZE.x + rng.random_range(0.0..boss::RAIN_X_SPREAD),
            boss::RAIN_Y_MIN + rng.random_range(0.0..boss::RAIN_Y_SPREAD),
        );
        let config = FirecrackerConfig::new(SpawnDomain::Air, MovePattern::Bounce).with_warning(0.0);
        obstacles.0.acquire(position, config.into(), now_ms);
    }
    count
}

fn spawn_wave(obstacles: &mut Obstacles, now_ms: f64) -> u32 {
    for i in 0..boss::WAVE_COUNT {
        let position = Vec2::new(
            VIEWPORT_SIZE.x + i as f32 * boss::WAVE_SPACING,
            boss::WAVE_START_Y + (i as f32).sin() * boss::WAVE_AMPLITUDE,
        );
        let config =
            FirecrackerConfig::new(SpawnDomain::Air, MovePattern::Static).with_warning(boss::WAVE_WARNING_MS);
        obstacles.0.acquire(position, config.into(), now_ms);
    }
    boss::WAVE_COUNT as u32
}

fn spawn_lantern_row(obstacles: &mut Obstacles, now_ms: f64) -> u32 {
    let x = VIEWPORT_SIZE.x + obstacle::SPAWN_MARGIN;
    let bands = [HeightBand::Low, HeightBand::Mid, HeightBand::High];
    for band in bands {
        let config = LanternConfig::at(band);
        obstacles.0.acquire(Vec2::new(x, config.spawn_y()), config.into(), now_ms);
    }
    bands.len() as u32
}

/// Drives the phase clock and fires the current phase's attack when due.
pub fn boss_system(
    clock: Res<SimClock>,
    mut boss: ResMut<BossPhase>,
    mut rng: ResMut<GameRng>,
    mut obstacles: ResMut<Obstacles>,
    mut popups: ResMut<Popups>,
) {
    if let Some(phase) = boss.advance(clock.delta_ms) {
        info!(phase, "Boss phase change");
        let text = if phase == 2 { "Wave two" } else { "Final wave" };
        popups.banner(
            text.to_string(),
            VIEWPORT_SIZE / 2.0,
            popup::RED,
            popup::BANNER_MS,
            clock.now_ms,
        );
    }

    if !boss.is_due(clock.now_ms) {
        return;
    }

    let rng = &mut rng.0;
    let attack = boss.pick_attack(rng);
    let spawned = match attack {
        BossAttack::Rain => spawn_rain(&mut obstacles, rng, clock.now_ms),
        BossAttack::Wave => spawn_wave(&mut obstacles, clock.now_ms),
        BossAttack::LanternRow => spawn_lantern_row(&mut obstacles, clock.now_ms),
    };

    boss.last_spawn_ms = clock.now_ms;
    boss.interval_ms = boss.next_interval();
    debug!(
        phase = boss.phase,
        %attack,
        spawned,
        next_interval_ms = boss.interval_ms,
        "Boss attack"
    );
}
