use glam::Vec2;
use strum_macros::{Display, EnumIter};

use crate::constants::obstacle::{
    GLOW_BASE_ALPHA, GLOW_PULSE_ALPHA, GLOW_PULSE_RATE, LANTERN_BODY, LANTERN_HIGH_OFFSET, LANTERN_LOW_OFFSET,
    LANTERN_MID_OFFSET, LANTERN_SWING_AMPLITUDE, LANTERN_SWING_SPEED,
};
use crate::constants::{GROUND_TOP, VIEWPORT_SIZE};
use crate::entity::obstacle::{ObstacleBehavior, ObstacleCore};

/// Viewport height the band offsets were tuned for.
const REFERENCE_HEIGHT: f32 = 720.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum HeightBand {
    Low,
    Mid,
    High,
}

impl HeightBand {
    /// Distance above the ground top, scaled to the viewport height.
    pub fn offset(self) -> f32 {
        let base = match self {
            HeightBand::Low => LANTERN_LOW_OFFSET,
            HeightBand::Mid => LANTERN_MID_OFFSET,
            HeightBand::High => LANTERN_HIGH_OFFSET,
        };
        base * (VIEWPORT_SIZE.y / REFERENCE_HEIGHT)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LanternConfig {
    pub band: HeightBand,
    pub swing_amplitude: f32,
    pub swing_speed: f64,
}

impl Default for LanternConfig {
    fn default() -> Self {
        Self {
            band: HeightBand::Mid,
            swing_amplitude: LANTERN_SWING_AMPLITUDE,
            swing_speed: LANTERN_SWING_SPEED,
        }
    }
}

impl LanternConfig {
    pub fn at(band: HeightBand) -> Self {
        Self {
            band,
            ..Default::default()
        }
    }

    /// The y the lantern swings around. Spawn positions never override it.
    pub fn spawn_y(&self) -> f32 {
        GROUND_TOP - self.band.offset()
    }
}

/// The additive halo drawn behind a lantern.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
    pub position: Vec2,
    pub visible: bool,
    pub alpha: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Lantern {
    config: LanternConfig,
    start_y: f32,
    glow: Glow,
    glow_started_at: f64,
}

impl Lantern {
    pub const BODY: Vec2 = LANTERN_BODY;

    pub fn new(config: LanternConfig, position: Vec2, now_ms: f64) -> Self {
        Self {
            config,
            start_y: position.y,
            glow: Glow {
                position,
                visible: true,
                alpha: GLOW_BASE_ALPHA,
            },
            glow_started_at: now_ms,
        }
    }

    pub fn config(&self) -> &LanternConfig {
        &self.config
    }

    pub fn glow(&self) -> &Glow {
        &self.glow
    }

    pub fn start_y(&self) -> f32 {
        self.start_y
    }
}

impl ObstacleBehavior for Lantern {
    fn on_spawn(&mut self, core: &mut ObstacleCore) {
        self.glow.position = core.position;
        self.glow.visible = core.visible;
    }

    fn advance(&mut self, core: &mut ObstacleCore, now_ms: f64) {
        let swing = (core.elapsed(now_ms) * self.config.swing_speed).sin() as f32;
        core.position.y = self.start_y + swing * self.config.swing_amplitude;

        self.glow.position = core.position;
        self.glow.visible = core.visible;
        let pulse = ((now_ms - self.glow_started_at) * GLOW_PULSE_RATE).sin() as f32;
        self.glow.alpha = (GLOW_BASE_ALPHA + pulse * GLOW_PULSE_ALPHA) * core.alpha;
    }

    fn on_release(&mut self, core: &mut ObstacleCore) {
        self.glow.visible = false;
        self.glow.position = core.position;
    }
}
