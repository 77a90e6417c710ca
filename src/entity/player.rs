//! The player-controlled Nianshou and its movement state machine.

use bevy_ecs::resource::Resource;
use glam::Vec2;
use strum_macros::{Display, EnumIter, IntoStaticStr};
use tracing::{debug, trace};

use crate::audio::{Sound, SoundSink};
use crate::constants::{player, VIEWPORT_SIZE};
use crate::entity::item::FlightHandle;
use crate::entity::{Aabb, Body};
use crate::events::HeldInput;
use crate::score::ScoreManager;
use crate::timer::TimerQueue;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerState {
    /// Defined for completeness. The simulation never enters it.
    Idle,
    Running,
    Jumping,
    Falling,
    Ducking,
    Hurt,
    Invincible,
    Flying,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PlayerTimer {
    /// Return to running if nothing else changed the state since the hit.
    RecoverFromHurt { generation: u32 },
}

#[derive(Resource, Debug, Clone)]
pub struct Player {
    position: Vec2,
    velocity: Vec2,
    state: PlayerState,
    grounded: bool,
    coyote_ms: f64,
    /// Jumps used since last touching the ground: 0, 1 or 2.
    jump_count: u8,
    invincible_ms: f64,
    fly_ms: f64,
    tint: Option<u32>,
    /// Position of the wing visual while flying.
    wing: Option<Vec2>,
    body: Body,
    /// Bumped on every state change, used to discard stale deferred transitions.
    generation: u32,
    clock_ms: f64,
    timers: TimerQueue<PlayerTimer>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(player::SPAWN)
    }
}

impl Player {
    /// A grounded, running player with a full coyote window.
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            state: PlayerState::Running,
            grounded: true,
            coyote_ms: player::COYOTE_TIME_MS,
            jump_count: 0,
            invincible_ms: 0.0,
            fly_ms: 0.0,
            tint: None,
            wing: None,
            body: Body::new(player::SIZE),
            generation: 0,
            clock_ms: 0.0,
            timers: TimerQueue::new(),
        }
    }

    fn set_state(&mut self, state: PlayerState) {
        if self.state == state {
            return;
        }
        trace!(from = %self.state, to = %state, "Player state change");
        if self.is_crouched() {
            self.stand_up();
        }
        self.state = state;
        self.generation = self.generation.wrapping_add(1);
    }

    fn stand_up(&mut self) {
        self.body.size = player::SIZE;
        self.body.offset = Vec2::ZERO;
    }

    /// Advances physics, timers and held-input movement by one frame.
    pub fn update(&mut self, delta_ms: f64, held: &HeldInput) {
        let dt = (delta_ms / 1000.0) as f32;
        self.clock_ms += delta_ms;

        self.integrate(dt);

        if self.grounded {
            self.coyote_ms = player::COYOTE_TIME_MS;
            self.jump_count = 0;
            if matches!(self.state, PlayerState::Jumping | PlayerState::Falling) {
                self.set_state(PlayerState::Running);
            }
        } else {
            self.coyote_ms = (self.coyote_ms - delta_ms).max(0.0);
            match self.state {
                PlayerState::Running => self.set_state(PlayerState::Falling),
                PlayerState::Jumping if self.velocity.y > 0.0 => self.set_state(PlayerState::Falling),
                _ => {}
            }
        }

        for timer in self.timers.drain_due(self.clock_ms) {
            match timer {
                PlayerTimer::RecoverFromHurt { generation } => {
                    if generation == self.generation && self.state == PlayerState::Hurt {
                        self.set_state(PlayerState::Running);
                    }
                }
            }
        }

        match self.state {
            PlayerState::Invincible => {
                self.invincible_ms -= delta_ms;
                if self.invincible_ms <= 0.0 {
                    self.invincible_ms = 0.0;
                    self.set_state(PlayerState::Running);
                    self.tint = None;
                } else {
                    self.tint = Some(player::INVINCIBLE_TINT);
                }
            }
            PlayerState::Flying => {
                self.fly_ms -= delta_ms;
                if self.fly_ms <= 0.0 {
                    self.deactivate_fly();
                } else {
                    self.velocity.y = held.vertical() as f32 * player::FLY_SPEED;
                }
            }
            _ => {}
        }

        self.velocity.x = held.horizontal() as f32 * self.move_speed();

        if self.state == PlayerState::Flying {
            self.clamp_to_flight_area();
            self.wing = Some(self.position + Vec2::new(0.0, player::WING_OFFSET_Y));
        }
    }

    fn integrate(&mut self, dt: f32) {
        if self.state != PlayerState::Flying {
            self.velocity.y += player::GRAVITY * dt;
        }
        self.position += self.velocity * dt;

        let half = player::SIZE / 2.0;
        let floor_y = player::SPAWN.y;
        self.grounded = self.position.y >= floor_y && self.velocity.y >= 0.0;
        if self.grounded {
            self.position.y = floor_y;
            self.velocity.y = 0.0;
        }

        // World bounds
        self.position.x = self.position.x.clamp(half.x, VIEWPORT_SIZE.x - half.x);
        if self.position.y < half.y {
            self.position.y = half.y;
            self.velocity.y = self.velocity.y.max(0.0);
        }
    }

    fn clamp_to_flight_area(&mut self) {
        let min = Vec2::new(player::FLY_INSET_X, player::FLY_MIN_Y);
        let max = Vec2::new(
            VIEWPORT_SIZE.x - player::FLY_INSET_X,
            VIEWPORT_SIZE.y - player::FLY_BOTTOM_MARGIN,
        );
        self.position = self.position.clamp(min, max);
    }

    /// Horizontal speed for the current context.
    pub fn move_speed(&self) -> f32 {
        if self.state == PlayerState::Flying {
            player::FLY_SPEED
        } else if self.grounded {
            player::MOVE_SPEED
        } else {
            player::AIR_MOVE_SPEED
        }
    }

    /// Jumps from the ground or within the coyote window, or double-jumps once in the air.
    pub fn jump(&mut self, sounds: &mut dyn SoundSink) -> bool {
        if self.state == PlayerState::Flying {
            // Vertical control belongs to the held up/duck actions
            return true;
        }

        if self.grounded || self.coyote_ms > 0.0 {
            self.velocity.y = player::JUMP_VELOCITY;
            self.enter_jump();
            self.grounded = false;
            self.coyote_ms = 0.0;
            self.jump_count = 1;
            sounds.play_sound(Sound::Jump);
            return true;
        }

        if self.jump_count == 1 {
            self.velocity.y = player::JUMP_VELOCITY;
            self.enter_jump();
            self.jump_count = 2;
            sounds.play_sound(Sound::Jump);
            return true;
        }

        false
    }

    fn enter_jump(&mut self) {
        // Invincibility keeps its state through jumps
        if self.state == PlayerState::Invincible {
            self.stand_up();
        } else {
            self.set_state(PlayerState::Jumping);
        }
    }

    /// Crouches while grounded. While flying, descending is driven by the held duck action instead.
    ///
    /// An invincible player crouches without leaving the invincible state.
    pub fn duck(&mut self) {
        if self.state == PlayerState::Flying || !self.grounded || self.is_crouched() {
            return;
        }
        if self.state != PlayerState::Invincible {
            self.set_state(PlayerState::Ducking);
        }
        self.body.size = Vec2::new(player::SIZE.x, player::DUCK_HEIGHT);
        self.body.offset = Vec2::new(0.0, (player::SIZE.y - player::DUCK_HEIGHT) / 2.0);
    }

    pub fn stop_duck(&mut self) {
        if self.state == PlayerState::Ducking {
            self.set_state(PlayerState::Running);
        } else {
            self.stand_up();
        }
    }

    /// Whether the collision body is currently shrunk to the duck height.
    pub fn is_crouched(&self) -> bool {
        self.body.size.y < player::SIZE.y
    }

    /// Applies one hit. Returns true when the hit was fatal.
    pub fn take_damage(&mut self, score: &mut ScoreManager, sounds: &mut dyn SoundSink) -> bool {
        if matches!(
            self.state,
            PlayerState::Invincible | PlayerState::Flying | PlayerState::Hurt
        ) {
            return false;
        }

        score.take_damage(1);
        sounds.play_sound(Sound::Hurt);
        if score.is_dead() {
            debug!("Player took a fatal hit");
            return true;
        }

        self.set_state(PlayerState::Hurt);
        self.velocity.y = player::HURT_KNOCKBACK;
        self.grounded = false;
        self.timers.schedule(
            self.clock_ms,
            player::HURT_RECOVERY_MS,
            PlayerTimer::RecoverFromHurt {
                generation: self.generation,
            },
        );
        false
    }

    /// Spends red packets on invincibility. Refused while flying.
    pub fn activate_invincible(&mut self, score: &mut ScoreManager, sounds: &mut dyn SoundSink) -> bool {
        if self.state == PlayerState::Flying || !score.activate_invincible() {
            return false;
        }
        self.set_state(PlayerState::Invincible);
        self.invincible_ms = player::INVINCIBLE_DURATION_MS;
        self.tint = Some(player::INVINCIBLE_TINT);
        sounds.play_sound(Sound::PowerUp);
        debug!(duration_ms = self.invincible_ms, "Invincibility activated");
        true
    }

    /// Enters flight, restarting the timer if already flying. Flight replaces invincibility.
    pub fn activate_fly(&mut self, score: &mut ScoreManager, sounds: &mut dyn SoundSink) {
        self.wing = None;
        if self.state == PlayerState::Invincible {
            self.invincible_ms = 0.0;
            self.tint = None;
            score.end_invincible();
        }

        self.set_state(PlayerState::Flying);
        self.fly_ms = player::FLY_DURATION_MS;
        self.velocity.y = 0.0;
        self.wing = Some(self.position + Vec2::new(0.0, player::WING_OFFSET_Y));
        sounds.play_sound(Sound::PowerUp);
        debug!(duration_ms = self.fly_ms, "Flight activated");
    }

    /// Ends flight and lets gravity take over again.
    pub fn deactivate_fly(&mut self) {
        if self.state != PlayerState::Flying {
            return;
        }
        self.fly_ms = 0.0;
        self.wing = None;
        self.set_state(PlayerState::Falling);
    }

    /// True while the player cannot be hurt: invincible or flying.
    pub fn is_invincible(&self) -> bool {
        matches!(self.state, PlayerState::Invincible | PlayerState::Flying)
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn coyote_ms(&self) -> f64 {
        self.coyote_ms
    }

    pub fn jump_count(&self) -> u8 {
        self.jump_count
    }

    pub fn invincible_ms(&self) -> f64 {
        self.invincible_ms
    }

    pub fn fly_ms(&self) -> f64 {
        self.fly_ms
    }

    pub fn tint(&self) -> Option<u32> {
        self.tint
    }

    pub fn wing(&self) -> Option<Vec2> {
        self.wing
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn hitbox(&self) -> Option<Aabb> {
        self.body.aabb(self.position)
    }

    /// Highest point a jump from the current position would reach.
    pub fn jump_apex_y(&self) -> f32 {
        let v = player::JUMP_VELOCITY;
        self.position.y - (v * v) / (2.0 * player::GRAVITY)
    }
}

impl FlightHandle for Player {
    fn activate_fly(&mut self, score: &mut ScoreManager, sounds: &mut dyn SoundSink) {
        Player::activate_fly(self, score, sounds);
    }
}
