//! Floating text that rises, fades and expires.

use bevy_ecs::{
    resource::Resource,
    system::{Res, ResMut},
};
use glam::Vec2;

use crate::constants::popup::RISE;
use crate::systems::SimClock;

#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub text: String,
    pub position: Vec2,
    pub color: u32,
    pub alpha: f32,
    origin: Vec2,
    rise: f32,
    spawned_at: f64,
    ttl_ms: f64,
}

impl Popup {
    fn progress(&self, now_ms: f64) -> f32 {
        ((now_ms - self.spawned_at) / self.ttl_ms).clamp(0.0, 1.0) as f32
    }

    pub fn is_expired(&self, now_ms: f64) -> bool {
        now_ms - self.spawned_at >= self.ttl_ms
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct Popups {
    entries: Vec<Popup>,
}

impl Popups {
    /// A popup that rises and fades over `ttl_ms`.
    pub fn spawn(&mut self, text: String, position: Vec2, color: u32, ttl_ms: f64, now_ms: f64) {
        self.push(text, position, color, RISE, ttl_ms, now_ms);
    }

    /// A centred popup that fades in place.
    pub fn banner(&mut self, text: String, position: Vec2, color: u32, ttl_ms: f64, now_ms: f64) {
        self.push(text, position, color, 0.0, ttl_ms, now_ms);
    }

    fn push(&mut self, text: String, position: Vec2, color: u32, rise: f32, ttl_ms: f64, now_ms: f64) {
        self.entries.push(Popup {
            text,
            position,
            color,
            alpha: 1.0,
            origin: position,
            rise,
            spawned_at: now_ms,
            ttl_ms: ttl_ms.max(1.0),
        });
    }

    pub fn update(&mut self, now_ms: f64) {
        self.entries.retain(|popup| !popup.is_expired(now_ms));
        for popup in &mut self.entries {
            let progress = popup.progress(now_ms);
            popup.position = popup.origin - Vec2::new(0.0, popup.rise * progress);
            popup.alpha = 1.0 - progress;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Popup> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

pub fn popup_system(clock: Res<SimClock>, mut popups: ResMut<Popups>) {
    popups.update(clock.now_ms);
}
