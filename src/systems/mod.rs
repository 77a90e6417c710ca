//! The per-frame systems and the resources they share.
//!
//! Systems run chained on a single-threaded executor, in this order: commands, clock and deferred
//! actions, player, energy, scroll, parallax, obstacle/item update, spawning, collisions, level
//! completion, popups and audio.

use bevy_ecs::resource::Resource;
use rand::rngs::SmallRng;
use rand::SeedableRng;

pub mod audio;
pub mod boss;
pub mod collision;
pub mod entities;
pub mod input;
pub mod player;
pub mod popup;
pub mod scroll;
pub mod spawn;
pub mod stage;
pub mod timers;

pub use self::audio::*;
pub use self::boss::*;
pub use self::collision::*;
pub use self::entities::*;
pub use self::input::*;
pub use self::player::*;
pub use self::popup::*;
pub use self::scroll::*;
pub use self::spawn::*;
pub use self::stage::*;
pub use self::timers::*;

/// The simulation clock. It only advances while the session is running, so pausing freezes every timer.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct SimClock {
    /// Milliseconds of running time since the session started.
    pub now_ms: f64,
    /// Length of the current frame, in milliseconds.
    pub delta_ms: f64,
}

impl SimClock {
    pub fn delta_seconds(&self) -> f32 {
        (self.delta_ms / 1000.0) as f32
    }
}

/// The session's random source.
#[derive(Resource, Debug, Clone)]
pub struct GameRng(pub SmallRng);

impl GameRng {
    /// A reproducible generator when `seed` is given, otherwise seeded from the OS.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(SmallRng::seed_from_u64(seed)),
            None => Self(SmallRng::from_os_rng()),
        }
    }
}
