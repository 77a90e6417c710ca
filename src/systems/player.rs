use bevy_ecs::system::{Res, ResMut};

use crate::entity::player::Player;
use crate::events::HeldInput;
use crate::score::ScoreManager;
use crate::systems::SimClock;

/// Advances player physics, timers and held-input movement.
pub fn player_system(clock: Res<SimClock>, held: Res<HeldInput>, mut player: ResMut<Player>) {
    player.update(clock.delta_ms, &held);
}

/// Drains invincibility energy and accumulates level time.
pub fn energy_system(clock: Res<SimClock>, mut score: ResMut<ScoreManager>) {
    score.update_invincible_energy(clock.delta_ms);
    score.advance_level_time(clock.delta_ms);
}
