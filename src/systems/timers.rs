use bevy_ecs::{
    resource::Resource,
    system::{Res, ResMut},
};
use tracing::trace;

use crate::pool::PoolHandle;
use crate::systems::{Items, Obstacles, SimClock};
use crate::timer::TimerQueue;

/// Work scheduled on the simulation clock. Each action names the pool epoch it was scheduled under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Return a smashed obstacle to its pool after its fade.
    ReleaseObstacle { handle: PoolHandle, epoch: u32 },
    /// Return a collected item to its pool after its fade.
    ReleaseItem { handle: PoolHandle, epoch: u32 },
}

#[derive(Resource, Debug, Default)]
pub struct DeferredActions(pub TimerQueue<DeferredAction>);

impl DeferredActions {
    pub fn schedule(&mut self, clock: &SimClock, delay_ms: f64, action: DeferredAction) {
        self.0.schedule(clock.now_ms, delay_ms, action);
    }
}

/// Advances the simulation clock by the frame delta.
pub fn clock_system(mut clock: ResMut<SimClock>) {
    clock.now_ms += clock.delta_ms;
}

/// Fires every deferred action that is due, skipping those whose target has been reused since.
pub fn deferred_system(
    clock: Res<SimClock>,
    mut deferred: ResMut<DeferredActions>,
    mut obstacles: ResMut<Obstacles>,
    mut items: ResMut<Items>,
) {
    for action in deferred.0.drain_due(clock.now_ms) {
        match action {
            DeferredAction::ReleaseObstacle { handle, epoch } => {
                if obstacles.0.epoch(handle) == Some(epoch) {
                    obstacles.0.release(handle);
                } else {
                    trace!(?handle, epoch, "Dropping stale obstacle release");
                }
            }
            DeferredAction::ReleaseItem { handle, epoch } => {
                if items.0.epoch(handle) == Some(epoch) {
                    items.0.release(handle);
                } else {
                    trace!(?handle, epoch, "Dropping stale item release");
                }
            }
        }
    }
}
