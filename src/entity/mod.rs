//! Simulation entities: the player, obstacles and collectible items.
//!
//! Positions are the centre of the sprite in viewport pixels.

use glam::Vec2;

pub mod firecracker;
pub mod item;
pub mod lantern;
pub mod obstacle;
pub mod player;

/// An axis-aligned rectangle in viewport space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap: rectangles that only touch along an edge do not collide.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x && self.max.x > other.min.x && self.min.y < other.max.y && self.max.y > other.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

/// A collision body attached to a sprite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub size: Vec2,
    /// Displacement of the body's centre from the sprite's centre.
    pub offset: Vec2,
    pub enabled: bool,
}

impl Body {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            offset: Vec2::ZERO,
            enabled: true,
        }
    }

    /// The body's rectangle for a sprite centred at `position`, or `None` while disabled.
    pub fn aabb(&self, position: Vec2) -> Option<Aabb> {
        self.enabled.then(|| Aabb::from_center(position + self.offset, self.size))
    }
}

/// What an entity wants after its per-frame update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cull {
    Keep,
    /// The entity left the screen and should go back to its pool.
    Release,
}

/// A cosmetic linear fade-out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    pub started_ms: f64,
    pub duration_ms: f64,
}

impl Fade {
    pub fn new(started_ms: f64, duration_ms: f64) -> Self {
        Self { started_ms, duration_ms }
    }

    /// Completion in `0.0..=1.0`.
    pub fn progress(&self, now_ms: f64) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.started_ms) / self.duration_ms).clamp(0.0, 1.0) as f32
    }

    pub fn alpha(&self, now_ms: f64) -> f32 {
        1.0 - self.progress(now_ms)
    }

    pub fn is_done(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }
}

/// Scrolls `x` left and snaps it to a whole pixel.
pub(crate) fn scroll_x(x: f32, scroll_speed: f32, dt_s: f32) -> f32 {
    (x - scroll_speed * dt_s).floor()
}
