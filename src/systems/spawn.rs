//! The standard level's timed spawner.

use bevy_ecs::{
    resource::Resource,
    system::{Res, ResMut},
};
use glam::Vec2;
use rand::Rng;
use tracing::debug;

use crate::constants::{item, obstacle, spawn, GROUND_TOP, VIEWPORT_SIZE};
use crate::entity::firecracker::{FirecrackerConfig, MovePattern, SpawnDomain};
use crate::entity::item::{FuTier, ItemKind};
use crate::entity::lantern::{HeightBand, LanternConfig};
use crate::entity::obstacle::ObstacleConfig;
use crate::entity::player::Player;
use crate::systems::{GameRng, Items, Obstacles, Scroll, SimClock};

/// Cadence of the standard spawner.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SpawnTimer {
    pub last_spawn_ms: f64,
    pub interval_ms: f64,
}

impl Default for SpawnTimer {
    fn default() -> Self {
        Self {
            last_spawn_ms: 0.0,
            interval_ms: spawn::INITIAL_INTERVAL_MS,
        }
    }
}

/// The interval that follows a spawn at `distance`.
pub fn spawn_interval(distance: f64) -> f64 {
    (spawn::INITIAL_INTERVAL_MS - distance * spawn::INTERVAL_DECAY).max(spawn::MIN_INTERVAL_MS)
}

pub fn random_height_band(rng: &mut impl Rng) -> HeightBand {
    match rng.random_range(0..3) {
        0 => HeightBand::Low,
        1 => HeightBand::Mid,
        _ => HeightBand::High,
    }
}

/// Picks the next obstacle: mostly firecrackers, otherwise a lantern at a random height.
pub fn roll_obstacle(rng: &mut impl Rng) -> ObstacleConfig {
    if rng.random_bool(spawn::FIRECRACKER_CHANCE) {
        let domain = if rng.random_bool(spawn::GROUND_FIRECRACKER_CHANCE) {
            SpawnDomain::Ground
        } else {
            SpawnDomain::Air
        };
        let pattern = if rng.random_bool(spawn::STATIC_FIRECRACKER_CHANCE) {
            MovePattern::Static
        } else {
            MovePattern::Bounce
        };
        FirecrackerConfig::new(domain, pattern).into()
    } else {
        LanternConfig::at(random_height_band(rng)).into()
    }
}

/// Picks the next item. Fu tiers are weighted 3:1:1 copper, silver, gold.
pub fn roll_item(rng: &mut impl Rng) -> ItemKind {
    let roll: f64 = rng.random();
    if roll < spawn::FU_CHANCE {
        let tier = match rng.random_range(0..5) {
            0..=2 => FuTier::Copper,
            3 => FuTier::Silver,
            _ => FuTier::Gold,
        };
        ItemKind::Fu(tier)
    } else if roll < spawn::FU_CHANCE + spawn::RED_PACKET_CHANCE {
        ItemKind::RedPacket
    } else {
        ItemKind::SpringWord
    }
}

/// Clamps a raw item height between the player's reachable apex and just above the ground.
pub fn clamp_item_y(raw_y: f32, apex_y: f32) -> f32 {
    let lowest = GROUND_TOP - item::GROUND_MARGIN;
    let highest = (apex_y + item::APEX_MARGIN).min(lowest);
    raw_y.max(highest).min(lowest)
}

/// Obstacles appear just past the right edge of the viewport.
pub fn obstacle_spawn_position(config: &ObstacleConfig) -> Vec2 {
    let x = VIEWPORT_SIZE.x + obstacle::SPAWN_MARGIN;
    let y = match config {
        ObstacleConfig::Firecracker(firecracker) => firecracker.spawn_y(),
        ObstacleConfig::Lantern(lantern) => lantern.spawn_y(),
    };
    Vec2::new(x, y)
}

pub fn spawn_system(
    clock: Res<SimClock>,
    scroll: Res<Scroll>,
    player: Res<Player>,
    mut timer: ResMut<SpawnTimer>,
    mut rng: ResMut<GameRng>,
    mut obstacles: ResMut<Obstacles>,
    mut items: ResMut<Items>,
) {
    if clock.now_ms - timer.last_spawn_ms <= timer.interval_ms {
        return;
    }
    let rng = &mut rng.0;

    let obstacle = roll_obstacle(rng);
    obstacles.0.acquire(obstacle_spawn_position(&obstacle), obstacle, clock.now_ms);

    let kind = roll_item(rng);
    let x = VIEWPORT_SIZE.x + obstacle::SPAWN_MARGIN + rng.random_range(0.0..item::SPAWN_X_SPREAD);
    let raw_y = item::SPAWN_Y_MIN + rng.random_range(0.0..item::SPAWN_Y_SPREAD);
    let y = clamp_item_y(raw_y, player.jump_apex_y());
    items.0.acquire(Vec2::new(x, y), kind, clock.now_ms);

    timer.last_spawn_ms = clock.now_ms;
    timer.interval_ms = spawn_interval(scroll.distance);
    debug!(
        ?obstacle,
        ?kind,
        next_interval_ms = timer.interval_ms,
        distance = scroll.distance,
        "Spawned obstacle and item"
    );
}
