//! This module contains all the constants used in the simulation.

use glam::Vec2;

/// The size of the logical viewport, in pixels.
pub const VIEWPORT_SIZE: Vec2 = Vec2::new(1280.0, 720.0);

/// The height of the ground band at the bottom of the viewport, in pixels.
pub const GROUND_HEIGHT: f32 = 140.0;
/// The y coordinate of the top of the ground, where the player's feet rest.
pub const GROUND_TOP: f32 = VIEWPORT_SIZE.y - GROUND_HEIGHT;

/// The nominal frame length used by the headless runner (60 FPS).
pub const FRAME_MS: f64 = 1000.0 / 60.0;

/// Player tuning, in pixels, pixels per second and milliseconds.
pub mod player {
    use glam::Vec2;

    /// Centre of the player when standing on the ground.
    pub const SPAWN: Vec2 = Vec2::new(200.0, 548.0);
    pub const SIZE: Vec2 = Vec2::new(64.0, 64.0);
    pub const DUCK_HEIGHT: f32 = 32.0;

    pub const JUMP_VELOCITY: f32 = -600.0;
    pub const GRAVITY: f32 = 1000.0;
    pub const MOVE_SPEED: f32 = 300.0;
    pub const AIR_MOVE_SPEED: f32 = 200.0;
    pub const FLY_SPEED: f32 = 300.0;
    pub const HURT_KNOCKBACK: f32 = -200.0;

    pub const COYOTE_TIME_MS: f64 = 100.0;
    pub const INVINCIBLE_DURATION_MS: f64 = 3000.0;
    pub const FLY_DURATION_MS: f64 = 5000.0;
    pub const HURT_RECOVERY_MS: f64 = 500.0;

    /// Inset of the flight rectangle from the left/right viewport edges.
    pub const FLY_INSET_X: f32 = 32.0;
    pub const FLY_MIN_Y: f32 = 50.0;
    /// Distance kept between the bottom of the viewport and the lowest flight position.
    pub const FLY_BOTTOM_MARGIN: f32 = 150.0;
    /// Offset of the wing visual above the player's centre.
    pub const WING_OFFSET_Y: f32 = -10.0;

    pub const INVINCIBLE_TINT: u32 = 0xFFD700;

    pub const MAX_LIVES: u8 = 3;
}

/// Scroll speed ramp.
pub mod scroll {
    /// Scroll speed gained per second until the level's maximum.
    pub const ACCELERATION: f32 = 5.0;
}

/// Obstacle tuning.
pub mod obstacle {
    use glam::Vec2;

    /// Obstacles are returned to their pool once they pass this x coordinate.
    pub const CULL_X: f32 = -100.0;
    /// Distance beyond the right edge of the viewport at which obstacles appear.
    pub const SPAWN_MARGIN: f32 = 100.0;

    pub const FIRECRACKER_GROUND_Y: f32 = 600.0;
    pub const FIRECRACKER_AIR_Y: f32 = 500.0;
    pub const FIRECRACKER_GROUND_BODY: Vec2 = Vec2::new(40.0, 60.0);
    pub const FIRECRACKER_AIR_BODY: Vec2 = Vec2::new(40.0, 40.0);
    pub const FIRECRACKER_WARNING_MS: f64 = 500.0;
    pub const FIRECRACKER_BOUNCE_AMPLITUDE: f32 = 40.0;
    pub const FIRECRACKER_BOUNCE_RATE: f64 = 0.003;
    pub const WARNING_OFFSET_Y: f32 = -60.0;
    pub const WARNING_ALPHA: f32 = 0.5;

    pub const LANTERN_BODY: Vec2 = Vec2::new(60.0, 80.0);
    pub const LANTERN_LOW_OFFSET: f32 = 130.0;
    pub const LANTERN_MID_OFFSET: f32 = 230.0;
    pub const LANTERN_HIGH_OFFSET: f32 = 330.0;
    pub const LANTERN_SWING_AMPLITUDE: f32 = 20.0;
    pub const LANTERN_SWING_SPEED: f64 = 0.002;
    pub const GLOW_BASE_ALPHA: f32 = 0.3;
    pub const GLOW_PULSE_ALPHA: f32 = 0.2;
    pub const GLOW_PULSE_RATE: f64 = 0.003;

    /// Bonus awarded for smashing an obstacle while invincible.
    pub const SMASH_BONUS: u32 = 50;
    /// Length of the shrink/fade played before a smashed obstacle disappears.
    pub const SMASH_FADE_MS: f64 = 200.0;
}

/// Item tuning.
pub mod item {
    use glam::Vec2;

    pub const CULL_X: f32 = -50.0;
    pub const BODY: Vec2 = Vec2::new(40.0, 40.0);

    pub const FU_COPPER_SCORE: u32 = 10;
    pub const FU_SILVER_SCORE: u32 = 25;
    pub const FU_GOLD_SCORE: u32 = 50;

    /// Lifetime flight stat credited per spring word, in seconds.
    pub const SPRING_FLY_SECONDS: u32 = 5;

    pub const FLOAT_HEIGHT: f32 = 10.0;
    pub const FLOAT_HALF_PERIOD_MS: f64 = 1000.0;
    pub const COLLECT_FADE_MS: f64 = 250.0;

    /// Raw item heights are drawn from `SPAWN_Y_MIN..SPAWN_Y_MIN + SPAWN_Y_SPREAD` before clamping.
    pub const SPAWN_Y_MIN: f32 = 300.0;
    pub const SPAWN_Y_SPREAD: f32 = 200.0;
    pub const SPAWN_X_SPREAD: f32 = 200.0;
    /// Margin kept below the jump apex so items stay reachable.
    pub const APEX_MARGIN: f32 = 20.0;
    /// Margin kept above the ground so items are never trivially grounded.
    pub const GROUND_MARGIN: f32 = 40.0;
}

/// Spawn cadence of the standard level loop.
pub mod spawn {
    pub const INITIAL_INTERVAL_MS: f64 = 2000.0;
    pub const MIN_INTERVAL_MS: f64 = 800.0;
    /// Interval shrinkage per unit of distance travelled.
    pub const INTERVAL_DECAY: f64 = 0.5;

    pub const FIRECRACKER_CHANCE: f64 = 0.6;
    pub const GROUND_FIRECRACKER_CHANCE: f64 = 0.7;
    pub const STATIC_FIRECRACKER_CHANCE: f64 = 0.5;

    pub const FU_CHANCE: f64 = 0.5;
    pub const RED_PACKET_CHANCE: f64 = 0.3;
}

/// Boss phase scripting.
pub mod boss {
    pub const PHASE_DURATION_MS: f64 = 30_000.0;
    /// Distance that completes the boss level.
    pub const TARGET_DISTANCE: f64 = 2000.0;

    pub const RAIN_INITIAL_INTERVAL_MS: f64 = 1000.0;
    pub const RAIN_MIN_INTERVAL_MS: f64 = 300.0;
    pub const RAIN_INTERVAL_DECAY: f64 = 0.02;
    pub const WAVE_INTERVAL_MS: f64 = 400.0;
    pub const BURST_INTERVAL_MS: f64 = 200.0;

    pub const RAIN_MAX_COUNT: u32 = 3;
    pub const RAIN_X_SPREAD: f32 = 300.0;
    pub const RAIN_Y_MIN: f32 = 200.0;
    pub const RAIN_Y_SPREAD: f32 = 300.0;

    pub const WAVE_COUNT: usize = 5;
    pub const WAVE_SPACING: f32 = 100.0;
    pub const WAVE_START_Y: f32 = 200.0;
    pub const WAVE_AMPLITUDE: f32 = 100.0;
    pub const WAVE_WARNING_MS: f64 = 300.0;
}

/// Session scoring rules.
pub mod score {
    /// Red packets required to trigger invincibility.
    pub const REDPACKET_THRESHOLD: u32 = 5;
}

/// Object pool sizing.
pub mod pool {
    pub const MAX_POOL_SIZE: usize = 50;
}

/// Floating text popups.
pub mod popup {
    pub const RISE: f32 = 50.0;
    pub const SHORT_MS: f64 = 800.0;
    pub const LONG_MS: f64 = 1000.0;
    pub const BANNER_MS: f64 = 2000.0;

    pub const GOLD: u32 = 0xFFD700;
    pub const RED: u32 = 0xFF0000;
    pub const GREEN: u32 = 0x00FF00;
}
