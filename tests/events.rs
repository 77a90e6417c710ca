use nianshou::events::{Action, GameCommand, GameEvent, HeldFlags, HeldInput, NextScene, Outcome};
use nianshou::level::LevelId;
use strum::IntoEnumIterator;

fn holding(actions: &[Action]) -> HeldInput {
    HeldInput(actions.iter().fold(HeldFlags::empty(), |flags, action| flags | action.flag()))
}

#[test]
fn test_every_action_has_its_own_flag() {
    let all = Action::iter().fold(HeldFlags::empty(), |flags, action| {
        assert!(!flags.contains(action.flag()), "{action} shares a flag");
        flags | action.flag()
    });
    assert_eq!(all, HeldFlags::all());
}

#[test]
fn test_horizontal_intent() {
    assert_eq!(holding(&[]).horizontal(), 0);
    assert_eq!(holding(&[Action::Left]).horizontal(), -1);
    assert_eq!(holding(&[Action::Right]).horizontal(), 1);
    assert_eq!(holding(&[Action::Left, Action::Right]).horizontal(), 0);
}

#[test]
fn test_vertical_intent() {
    assert_eq!(holding(&[]).vertical(), 0);
    assert_eq!(holding(&[Action::Up]).vertical(), -1);
    assert_eq!(holding(&[Action::Duck]).vertical(), 1);
    assert_eq!(holding(&[Action::Up, Action::Duck]).vertical(), -1);
}

#[test]
fn test_is_held() {
    let held = holding(&[Action::Jump, Action::Activate]);
    assert!(held.is_held(Action::Jump));
    assert!(held.is_held(Action::Activate));
    assert!(!held.is_held(Action::Duck));
}

#[test]
fn test_command_wraps_into_event() {
    let event: GameEvent = GameCommand::Press(Action::Jump).into();
    assert_eq!(event, GameEvent::Command(GameCommand::Press(Action::Jump)));
    assert_ne!(GameCommand::Press(Action::Jump), GameCommand::Release(Action::Jump));
}

#[test]
fn test_outcome_accessors() {
    let complete = Outcome::LevelComplete {
        level: LevelId::FIRST,
        score: 120,
        distance: 4000,
        unlocked: Vec::new(),
        next: NextScene::Story(LevelId::new(2).unwrap()),
    };
    let over = Outcome::GameOver {
        level: LevelId::FIRST,
        score: 30,
        distance: 800,
    };

    assert!(complete.is_level_complete());
    assert!(!over.is_level_complete());
    assert_eq!(complete.score(), 120);
    assert_eq!(over.score(), 30);
}
