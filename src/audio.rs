//! This module handles the audio side of the simulation.
//!
//! Playback itself belongs to the host. The simulation only decides *what* should be heard and hands it
//! to an [`AudioSink`].

use std::sync::Arc;

use bevy_ecs::resource::Resource;
use parking_lot::Mutex;
use strum_macros::{Display, EnumIter, IntoStaticStr};
use tracing::trace;

/// Every sound effect the simulation can request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Sound {
    Jump,
    Hurt,
    PowerUp,
    Explosion,
    CollectFu,
    CollectPacket,
    LevelComplete,
    GameOver,
}

/// Fire-and-forget audio output implemented by the host.
pub trait AudioSink: Send + Sync {
    fn play(&mut self, sound: Sound);
    fn play_music(&mut self);
    fn pause_all(&mut self);
    fn resume_all(&mut self);
    fn stop_all(&mut self);
}

/// Anything entity code can push a sound request into.
pub trait SoundSink {
    fn play_sound(&mut self, sound: Sound);
}

impl SoundSink for Vec<Sound> {
    fn play_sound(&mut self, sound: Sound) {
        self.push(sound);
    }
}

/// A sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _sound: Sound) {}
    fn play_music(&mut self) {}
    fn pause_all(&mut self) {}
    fn resume_all(&mut self) {}
    fn stop_all(&mut self) {}
}

/// Something the recording sink observed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioCall {
    Play(Sound),
    Music,
    Pause,
    Resume,
    Stop,
}

/// A sink that records every call into a shared log.
///
/// Clones share the same log, so a copy can be kept while the original is handed to a session.
#[derive(Debug, Default, Clone)]
pub struct RecordingAudio {
    log: Arc<Mutex<Vec<AudioCall>>>,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<AudioCall> {
        self.log.lock().clone()
    }

    /// Only the sound effects, in the order they were played.
    pub fn sounds(&self) -> Vec<Sound> {
        self.log
            .lock()
            .iter()
            .filter_map(|call| match call {
                AudioCall::Play(sound) => Some(*sound),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, sound: Sound) -> usize {
        self.log.lock().iter().filter(|call| **call == AudioCall::Play(sound)).count()
    }

    pub fn clear(&self) {
        self.log.lock().clear();
    }
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, sound: Sound) {
        self.log.lock().push(AudioCall::Play(sound));
    }

    fn play_music(&mut self) {
        self.log.lock().push(AudioCall::Music);
    }

    fn pause_all(&mut self) {
        self.log.lock().push(AudioCall::Pause);
    }

    fn resume_all(&mut self) {
        self.log.lock().push(AudioCall::Resume);
    }

    fn stop_all(&mut self) {
        self.log.lock().push(AudioCall::Stop);
    }
}

/// The session's audio output, with mute handling layered over the host sink.
#[derive(Resource)]
pub struct Audio {
    sink: Box<dyn AudioSink>,
    muted: bool,
}

impl Audio {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self { sink, muted: false }
    }

    pub fn play(&mut self, sound: Sound) {
        if self.muted {
            trace!(%sound, "Skipping sound while muted");
            return;
        }
        self.sink.play(sound);
    }

    pub fn play_music(&mut self) {
        if !self.muted {
            self.sink.play_music();
        }
    }

    pub fn pause_all(&mut self) {
        self.sink.pause_all();
    }

    pub fn resume_all(&mut self) {
        self.sink.resume_all();
    }

    pub fn stop_all(&mut self) {
        self.sink.stop_all();
    }

    pub fn set_mute(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn into_sink(self) -> Box<dyn AudioSink> {
        self.sink
    }
}
