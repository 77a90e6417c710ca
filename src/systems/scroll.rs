use bevy_ecs::{
    resource::Resource,
    system::{Res, ResMut},
};
use strum::IntoEnumIterator;

use crate::constants::scroll::ACCELERATION;
use crate::level::{LevelConfig, ParallaxLayer};
use crate::score::ScoreManager;
use crate::systems::SimClock;

/// Foreground scroll state for the level.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Scroll {
    /// Pixels per second.
    pub speed: f32,
    pub max_speed: f32,
    /// Total distance scrolled this level.
    pub distance: f64,
}

impl Scroll {
    pub fn new(level: &LevelConfig) -> Self {
        Self {
            speed: level.base_speed,
            max_speed: level.max_speed,
            distance: 0.0,
        }
    }

    /// Advances distance at the current speed, then ramps the speed toward its maximum.
    /// Returns the distance covered.
    pub fn advance(&mut self, dt_s: f32) -> f64 {
        let covered = (self.speed * dt_s).max(0.0) as f64;
        self.distance += covered;
        if self.speed < self.max_speed {
            self.speed = (self.speed + ACCELERATION * dt_s).min(self.max_speed);
        }
        covered
    }
}

/// Horizontal texture offsets of the background layers.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct Parallax {
    offsets: [f32; 4],
}

impl Parallax {
    pub fn offset(&self, layer: ParallaxLayer) -> f32 {
        self.offsets[layer as usize]
    }

    pub fn advance(&mut self, scroll_speed: f32, dt_s: f32) {
        for layer in ParallaxLayer::iter() {
            self.offsets[layer as usize] += scroll_speed * layer.speed_factor() * dt_s;
        }
    }
}

pub fn scroll_system(clock: Res<SimClock>, mut scroll: ResMut<Scroll>, mut score: ResMut<ScoreManager>) {
    let covered = scroll.advance(clock.delta_seconds());
    score.update_distance(covered);
}

pub fn parallax_system(clock: Res<SimClock>, scroll: Res<Scroll>, mut parallax: ResMut<Parallax>) {
    parallax.advance(scroll.speed, clock.delta_seconds());
}
