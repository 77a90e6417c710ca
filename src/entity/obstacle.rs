//! The shared obstacle contract: scroll, cull, damage and one-way deactivation.

use glam::Vec2;

use crate::constants::obstacle::CULL_X;
use crate::entity::firecracker::{Firecracker, FirecrackerConfig};
use crate::entity::lantern::{Lantern, LanternConfig};
use crate::entity::{scroll_x, Aabb, Body, Cull, Fade};
use crate::pool::{PoolKind, Poolable};

/// State every obstacle variant shares.
#[derive(Debug, Clone, PartialEq)]
pub struct ObstacleCore {
    pub position: Vec2,
    pub visible: bool,
    pub alpha: f32,
    pub scale: f32,
    pub body: Body,
    /// Whether the obstacle can still deal damage or be smashed.
    pub active: bool,
    pub damage: u8,
    pub created_at: f64,
    /// Set while a smashed obstacle shrinks away.
    pub fade: Option<Fade>,
}

impl ObstacleCore {
    fn new(position: Vec2, body_size: Vec2, damage: u8, now_ms: f64) -> Self {
        Self {
            position,
            visible: true,
            alpha: 1.0,
            scale: 1.0,
            body: Body::new(body_size),
            active: true,
            damage,
            created_at: now_ms,
            fade: None,
        }
    }

    pub fn elapsed(&self, now_ms: f64) -> f64 {
        now_ms - self.created_at
    }
}

/// Variant-specific behaviour layered on [`ObstacleCore`].
pub trait ObstacleBehavior {
    /// Runs once after the core is (re)initialized.
    fn on_spawn(&mut self, core: &mut ObstacleCore);

    /// Runs every frame after the core has scrolled.
    fn advance(&mut self, core: &mut ObstacleCore, now_ms: f64);

    /// Hides any secondary visuals when the obstacle goes back to its pool.
    fn on_release(&mut self, _core: &mut ObstacleCore) {}
}

/// Spawn parameters for any obstacle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObstacleConfig {
    Firecracker(FirecrackerConfig),
    Lantern(LanternConfig),
}

impl From<FirecrackerConfig> for ObstacleConfig {
    fn from(config: FirecrackerConfig) -> Self {
        ObstacleConfig::Firecracker(config)
    }
}

impl From<LanternConfig> for ObstacleConfig {
    fn from(config: LanternConfig) -> Self {
        ObstacleConfig::Lantern(config)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObstacleVariant {
    Firecracker(Firecracker),
    Lantern(Lantern),
}

impl ObstacleVariant {
    fn behavior(&mut self) -> &mut dyn ObstacleBehavior {
        match self {
            ObstacleVariant::Firecracker(firecracker) => firecracker,
            ObstacleVariant::Lantern(lantern) => lantern,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    core: ObstacleCore,
    variant: ObstacleVariant,
}

impl Obstacle {
    pub fn new(position: Vec2, config: ObstacleConfig, now_ms: f64) -> Self {
        let (mut core, mut variant) = match config {
            ObstacleConfig::Firecracker(config) => (
                ObstacleCore::new(position, config.body_size(), config.damage, now_ms),
                ObstacleVariant::Firecracker(Firecracker::new(config, position.y)),
            ),
            ObstacleConfig::Lantern(config) => {
                let position = Vec2::new(position.x, config.spawn_y());
                (
                    ObstacleCore::new(position, Lantern::BODY, 1, now_ms),
                    ObstacleVariant::Lantern(Lantern::new(config, position, now_ms)),
                )
            }
        };
        variant.behavior().on_spawn(&mut core);
        Self { core, variant }
    }

    /// Scrolls the obstacle and runs its variant motion.
    pub fn update(&mut self, scroll_speed: f32, dt_s: f32, now_ms: f64) -> Cull {
        self.core.position.x = scroll_x(self.core.position.x, scroll_speed, dt_s);
        self.variant.behavior().advance(&mut self.core, now_ms);

        if let Some(fade) = self.core.fade {
            self.core.alpha = fade.alpha(now_ms);
            self.core.scale = fade.alpha(now_ms);
        }

        if self.core.position.x < CULL_X {
            Cull::Release
        } else {
            Cull::Keep
        }
    }

    pub fn is_active_obstacle(&self) -> bool {
        self.core.active
    }

    /// Permanently disarms the obstacle until it is reused.
    pub fn deactivate(&mut self) {
        self.core.active = false;
    }

    /// Starts the shrink-and-fade shown after a smash.
    pub fn start_fade(&mut self, now_ms: f64, duration_ms: f64) {
        self.core.body.enabled = false;
        self.core.fade = Some(Fade::new(now_ms, duration_ms));
    }

    pub fn damage(&self) -> u8 {
        self.core.damage
    }

    pub fn position(&self) -> Vec2 {
        self.core.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.core.position = position;
    }

    pub fn is_visible(&self) -> bool {
        self.core.visible
    }

    pub fn alpha(&self) -> f32 {
        self.core.alpha
    }

    pub fn body(&self) -> &Body {
        &self.core.body
    }

    pub fn hitbox(&self) -> Option<Aabb> {
        self.core.body.aabb(self.core.position)
    }

    pub fn core(&self) -> &ObstacleCore {
        &self.core
    }

    pub fn variant(&self) -> &ObstacleVariant {
        &self.variant
    }

    pub fn as_firecracker(&self) -> Option<&Firecracker> {
        match &self.variant {
            ObstacleVariant::Firecracker(firecracker) => Some(firecracker),
            _ => None,
        }
    }

    pub fn as_lantern(&self) -> Option<&Lantern> {
        match &self.variant {
            ObstacleVariant::Lantern(lantern) => Some(lantern),
            _ => None,
        }
    }
}

impl Poolable for Obstacle {
    type Config = ObstacleConfig;

    fn kind_of(config: &ObstacleConfig) -> PoolKind {
        match config {
            ObstacleConfig::Firecracker(_) => PoolKind::Firecracker,
            ObstacleConfig::Lantern(_) => PoolKind::Lantern,
        }
    }

    fn create(position: Vec2, config: ObstacleConfig, now_ms: f64) -> Self {
        Self::new(position, config, now_ms)
    }

    fn reinitialize(&mut self, position: Vec2, config: ObstacleConfig, now_ms: f64) {
        *self = Self::new(position, config, now_ms);
    }

    fn on_release(&mut self) {
        self.core.visible = false;
        self.core.body.enabled = false;
        self.variant.behavior().on_release(&mut self.core);
    }
}
