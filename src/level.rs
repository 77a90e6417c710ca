//! The level table and parallax layer definitions.

use std::fmt;

use strum_macros::{Display, EnumIter, IntoStaticStr};

use crate::error::LevelError;

/// A playable level number, 1 through 3.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LevelId(u8);

impl LevelId {
    pub const FIRST: LevelId = LevelId(1);
    pub const LAST: LevelId = LevelId(3);

    pub fn new(level: u8) -> Result<Self, LevelError> {
        if (Self::FIRST.0..=Self::LAST.0).contains(&level) {
            Ok(Self(level))
        } else {
            Err(LevelError::Unknown(level))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// The level that follows this one, or `None` after the final level.
    pub fn next(self) -> Option<LevelId> {
        (self < Self::LAST).then_some(LevelId(self.0 + 1))
    }

    pub fn is_last(self) -> bool {
        self == Self::LAST
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Background art for a level. Only the key matters to the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Background {
    #[strum(serialize = "bg_village")]
    Village,
    #[strum(serialize = "bg_city")]
    City,
    #[strum(serialize = "bg_palace")]
    Palace,
}

/// Per-level tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelConfig {
    pub id: LevelId,
    /// Distance that completes the level in standard mode.
    pub length: f64,
    pub base_speed: f32,
    pub max_speed: f32,
    pub background: Background,
    /// Whether the level plays as the boss phase instead of the standard spawn loop.
    pub boss_phase: bool,
}

impl LevelConfig {
    pub fn get(level: LevelId) -> LevelConfig {
        match level.get() {
            1 => LevelConfig {
                id: level,
                length: 4000.0,
                base_speed: 150.0,
                max_speed: 250.0,
                background: Background::Village,
                boss_phase: false,
            },
            2 => LevelConfig {
                id: level,
                length: 6000.0,
                base_speed: 200.0,
                max_speed: 320.0,
                background: Background::City,
                boss_phase: false,
            },
            _ => LevelConfig {
                id: level,
                length: 8000.0,
                base_speed: 250.0,
                max_speed: 400.0,
                background: Background::Palace,
                boss_phase: true,
            },
        }
    }

    /// Looks up a level by its raw number.
    pub fn for_number(level: u8) -> Result<LevelConfig, LevelError> {
        LevelId::new(level).map(Self::get)
    }
}

/// A background layer scrolled at a fraction of the foreground speed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ParallaxLayer {
    Sky,
    Mountains,
    Buildings,
    Ground,
}

impl ParallaxLayer {
    /// Fraction of the scroll speed this layer moves at. Nearer layers move faster.
    pub fn speed_factor(self) -> f32 {
        match self {
            ParallaxLayer::Sky => 0.1,
            ParallaxLayer::Mountains => 0.3,
            ParallaxLayer::Buildings => 0.6,
            ParallaxLayer::Ground => 1.0,
        }
    }

    pub fn y(self) -> f32 {
        match self {
            ParallaxLayer::Sky => 0.0,
            ParallaxLayer::Mountains => 100.0,
            ParallaxLayer::Buildings => 200.0,
            ParallaxLayer::Ground => crate::constants::GROUND_TOP,
        }
    }
}
