//! A rule-based stand-in for a human player, used by the headless runner.

use smallvec::SmallVec;
use tracing::trace;

use crate::constants::player::{DUCK_HEIGHT, SIZE};
use crate::entity::player::PlayerState;
use crate::entity::Aabb;
use crate::events::{Action, GameCommand};
use crate::game::Game;

/// Seconds of scroll ahead of the player that the autopilot reacts to.
const REACTION_S: f32 = 0.35;
/// Extra margin, in pixels, added to the reaction window.
const REACTION_MARGIN: f32 = 40.0;

/// What the autopilot wants to do about the nearest threat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dodge {
    Jump,
    Duck,
}

#[derive(Debug, Default, Clone)]
pub struct Autopilot {
    ducking: bool,
    jump_held: bool,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands to send before the next tick.
    pub fn decide(&mut self, game: &Game) -> SmallVec<[GameCommand; 4]> {
        let mut commands = SmallVec::new();
        if self.jump_held {
            commands.push(GameCommand::Release(Action::Jump));
            self.jump_held = false;
        }

        let player = game.player();
        let state = player.state();
        if state == PlayerState::Flying {
            return commands;
        }

        let score = game.score();
        if score.can_activate_invincible() && state != PlayerState::Invincible {
            commands.push(GameCommand::Press(Action::Activate));
            commands.push(GameCommand::Release(Action::Activate));
        }

        match self.threat(game) {
            Some(Dodge::Jump) => {
                if self.ducking {
                    commands.push(GameCommand::Release(Action::Duck));
                    self.ducking = false;
                }
                if player.is_grounded() {
                    commands.push(GameCommand::Press(Action::Jump));
                    self.jump_held = true;
                }
            }
            Some(Dodge::Duck) => {
                if !self.ducking && player.is_grounded() {
                    commands.push(GameCommand::Press(Action::Duck));
                    self.ducking = true;
                }
            }
            None => {
                if self.ducking {
                    commands.push(GameCommand::Release(Action::Duck));
                    self.ducking = false;
                }
            }
        }

        if !commands.is_empty() {
            trace!(?commands, "Autopilot commands");
        }
        commands
    }

    /// The nearest obstacle that would hit a standing player, and how to avoid it.
    fn threat(&self, game: &Game) -> Option<Dodge> {
        if game.player().state() == PlayerState::Invincible {
            return None;
        }

        let position = game.player().position();
        let standing = Aabb::from_center(position, SIZE);
        let duck_top = standing.max.y - DUCK_HEIGHT;
        let window = standing.max.x + game.scroll().speed * REACTION_S + REACTION_MARGIN;

        game.obstacles()
            .0
            .iter()
            .filter(|(_, obstacle)| obstacle.is_active_obstacle())
            .map(|(_, obstacle)| {
                let body = obstacle.body();
                Aabb::from_center(obstacle.position() + body.offset, body.size)
            })
            .filter(|hitbox| hitbox.max.x > standing.min.x && hitbox.min.x < window)
            .filter(|hitbox| hitbox.max.y > standing.min.y && hitbox.min.y < standing.max.y)
            .min_by(|a, b| a.min.x.total_cmp(&b.min.x))
            .map(|hitbox| if hitbox.max.y <= duck_top { Dodge::Duck } else { Dodge::Jump })
    }
}
