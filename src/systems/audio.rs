//! Forwards audio requests from the simulation to the host's audio sink.

use bevy_ecs::{
    event::{Event, EventReader, EventWriter},
    system::ResMut,
};
use tracing::{debug, trace};

use crate::audio::{Audio, Sound, SoundSink};

/// Events for triggering audio output
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    /// Play a specific sound effect
    PlaySound(Sound),
    /// Pause all sounds
    Pause,
    /// Resume all sounds
    Resume,
}

impl SoundSink for EventWriter<'_, AudioEvent> {
    fn play_sound(&mut self, sound: Sound) {
        self.write(AudioEvent::PlaySound(sound));
    }
}

/// System that processes audio events and hands them to the sink
pub fn audio_system(mut audio: ResMut<Audio>, mut events: EventReader<AudioEvent>) {
    for event in events.read() {
        match event {
            AudioEvent::PlaySound(sound) => {
                trace!(%sound, "Playing sound");
                audio.play(*sound);
            }
            AudioEvent::Pause => {
                debug!("Pausing all audio");
                audio.pause_all();
            }
            AudioEvent::Resume => {
                debug!("Resuming all audio");
                audio.resume_all();
            }
        }
    }
}
