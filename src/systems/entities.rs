use bevy_ecs::{
    resource::Resource,
    system::{Res, ResMut},
};
use tracing::trace;

use crate::entity::item::Item;
use crate::entity::obstacle::Obstacle;
use crate::entity::Cull;
use crate::pool::ObjectPool;
use crate::systems::{Scroll, SimClock};

/// Every obstacle the session has spawned.
#[derive(Resource, Debug, Default)]
pub struct Obstacles(pub ObjectPool<Obstacle>);

/// Every item the session has spawned.
#[derive(Resource, Debug, Default)]
pub struct Items(pub ObjectPool<Item>);

/// Scrolls every live obstacle and item, returning those that left the screen to their pools.
pub fn entity_update_system(
    clock: Res<SimClock>,
    scroll: Res<Scroll>,
    mut obstacles: ResMut<Obstacles>,
    mut items: ResMut<Items>,
) {
    let dt = clock.delta_seconds();

    for handle in obstacles.0.handles() {
        let cull = obstacles
            .0
            .get_mut(handle)
            .map(|obstacle| obstacle.update(scroll.speed, dt, clock.now_ms));
        if cull == Some(Cull::Release) {
            trace!(?handle, "Obstacle scrolled off screen");
            obstacles.0.release(handle);
        }
    }

    for handle in items.0.handles() {
        let cull = items
            .0
            .get_mut(handle)
            .map(|item| item.update(scroll.speed, dt, clock.now_ms));
        if cull == Some(Cull::Release) {
            trace!(?handle, "Item scrolled off screen");
            items.0.release(handle);
        }
    }
}
