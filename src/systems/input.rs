use bevy_ecs::{
    event::{EventReader, EventWriter},
    system::ResMut,
};
use tracing::{debug, trace};

use crate::entity::player::Player;
use crate::events::{Action, GameCommand, GameEvent, HeldInput};
use crate::score::ScoreManager;
use crate::systems::{AudioEvent, Session, SessionStage};

/// Applies queued commands: tracks held actions, fires press callbacks and toggles pause.
///
/// Edge callbacks only fire while the session is running. Held state is tracked regardless so that
/// actions held across a pause still count once play resumes.
pub fn command_system(
    mut events: EventReader<GameEvent>,
    mut held: ResMut<HeldInput>,
    mut session: ResMut<Session>,
    mut player: ResMut<Player>,
    mut score: ResMut<ScoreManager>,
    mut audio_events: EventWriter<AudioEvent>,
) {
    for event in events.read() {
        let GameEvent::Command(command) = *event;
        match command {
            GameCommand::Press(action) => {
                held.0.insert(action.flag());
                if !session.is_running() {
                    trace!(%action, stage = ?session.stage(), "Ignoring press outside of play");
                    continue;
                }
                match action {
                    Action::Jump => {
                        player.jump(&mut audio_events);
                    }
                    Action::Duck => player.duck(),
                    Action::Activate => {
                        player.activate_invincible(&mut score, &mut audio_events);
                    }
                    // Continuous movement is read from the held set every frame
                    Action::Up | Action::Left | Action::Right => {}
                }
            }
            GameCommand::Release(action) => {
                held.0.remove(action.flag());
                if action == Action::Duck && session.is_running() {
                    player.stop_duck();
                }
            }
            GameCommand::TogglePause => match session.stage() {
                SessionStage::Running => {
                    session.pause();
                    audio_events.write(AudioEvent::Pause);
                }
                SessionStage::Paused => {
                    session.resume();
                    audio_events.write(AudioEvent::Resume);
                }
                stage => debug!(?stage, "Ignoring pause toggle"),
            },
        }
    }
}
