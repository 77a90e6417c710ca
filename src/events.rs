use bevy_ecs::prelude::*;
use bitflags::bitflags;
use strum_macros::{Display, EnumIter};

use crate::level::LevelId;
use crate::score::AchievementId;

/// An abstract player action, independent of the device that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    Jump,
    Duck,
    Up,
    Left,
    Right,
    Activate,
}

impl Action {
    /// The held-input flag mirroring this action.
    pub fn flag(self) -> HeldFlags {
        match self {
            Action::Jump => HeldFlags::JUMP,
            Action::Duck => HeldFlags::DUCK,
            Action::Up => HeldFlags::UP,
            Action::Left => HeldFlags::LEFT,
            Action::Right => HeldFlags::RIGHT,
            Action::Activate => HeldFlags::ACTIVATE,
        }
    }
}

bitflags! {
    /// Actions currently held down, for level-triggered queries.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct HeldFlags: u8 {
        const JUMP = 1 << 0;
        const DUCK = 1 << 1;
        const UP = 1 << 2;
        const LEFT = 1 << 3;
        const RIGHT = 1 << 4;
        const ACTIVATE = 1 << 5;
    }
}

/// Level-triggered view of the input collaborator.
#[derive(Resource, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeldInput(pub HeldFlags);

impl HeldInput {
    pub fn is_held(&self, action: Action) -> bool {
        self.0.contains(action.flag())
    }

    /// Horizontal intent: -1 for left, 1 for right, 0 when neither or both are held.
    pub fn horizontal(&self) -> i8 {
        match (self.is_held(Action::Left), self.is_held(Action::Right)) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }

    /// Vertical flight intent: -1 for up, 1 for down, 0 otherwise. Up wins when both are held.
    pub fn vertical(&self) -> i8 {
        if self.is_held(Action::Up) {
            -1
        } else if self.is_held(Action::Duck) {
            1
        } else {
            0
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCommand {
    /// An action was pressed. Fires the edge callback once, then counts as held.
    Press(Action),
    /// An action was released.
    Release(Action),
    TogglePause,
}

#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Command(GameCommand),
}

impl From<GameCommand> for GameEvent {
    fn from(command: GameCommand) -> Self {
        GameEvent::Command(command)
    }
}

/// Where the surrounding scene layer should go after a completed level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NextScene {
    /// The story panel introducing the given level.
    Story(LevelId),
    /// The final victory screen.
    Victory,
}

/// The life-cycle outcome handed to the scene layer when a session ends.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    LevelComplete {
        level: LevelId,
        score: u32,
        distance: u32,
        unlocked: Vec<AchievementId>,
        next: NextScene,
    },
    GameOver {
        level: LevelId,
        score: u32,
        distance: u32,
    },
}

impl Outcome {
    pub fn is_level_complete(&self) -> bool {
        matches!(self, Outcome::LevelComplete { .. })
    }

    pub fn score(&self) -> u32 {
        match self {
            Outcome::LevelComplete { score, .. } | Outcome::GameOver { score, .. } => *score,
        }
    }
}
