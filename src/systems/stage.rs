use bevy_ecs::{
    event::EventWriter,
    resource::Resource,
    system::{Res, ResMut},
};
use tracing::{debug, info};

use crate::audio::Sound;
use crate::constants::boss::TARGET_DISTANCE;
use crate::events::{NextScene, Outcome};
use crate::level::LevelConfig;
use crate::save::SaveManager;
use crate::score::{AchievementId, ScoreManager};
use crate::systems::{AudioEvent, Scroll};

/// The session life-cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStage {
    /// Level loaded and counters zeroed, waiting for `start`.
    Init,
    Running,
    /// Frame updates are suspended until resumed.
    Paused,
    /// Terminal. The outcome has been decided.
    Over,
}

/// Which spawner drives the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnMode {
    Standard,
    Boss,
}

#[derive(Resource, Debug, Clone)]
pub struct Session {
    pub level: LevelConfig,
    pub mode: SpawnMode,
    stage: SessionStage,
    outcome: Option<Outcome>,
}

impl Session {
    pub fn new(level: LevelConfig) -> Self {
        Self {
            level,
            mode: if level.boss_phase {
                SpawnMode::Boss
            } else {
                SpawnMode::Standard
            },
            stage: SessionStage::Init,
            outcome: None,
        }
    }

    pub fn stage(&self) -> SessionStage {
        self.stage
    }

    pub fn is_running(&self) -> bool {
        self.stage == SessionStage::Running
    }

    pub fn is_over(&self) -> bool {
        self.stage == SessionStage::Over
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// INIT to RUNNING. Any other stage is left alone.
    pub fn start(&mut self) -> bool {
        self.transition(SessionStage::Init, SessionStage::Running)
    }

    pub fn pause(&mut self) -> bool {
        self.transition(SessionStage::Running, SessionStage::Paused)
    }

    pub fn resume(&mut self) -> bool {
        self.transition(SessionStage::Paused, SessionStage::Running)
    }

    fn transition(&mut self, from: SessionStage, to: SessionStage) -> bool {
        if self.stage != from {
            return false;
        }
        debug!(?from, ?to, level = %self.level.id, "Session stage transition");
        self.stage = to;
        true
    }

    /// Records the outcome and enters OVER. Only the first outcome is kept.
    pub fn finish(&mut self, outcome: Outcome) -> bool {
        if self.stage == SessionStage::Over {
            return false;
        }
        info!(?outcome, "Session over");
        self.stage = SessionStage::Over;
        self.outcome = Some(outcome);
        true
    }
}

/// Run condition: true only while the session is running.
pub fn is_running(session: Res<Session>) -> bool {
    session.is_running()
}

pub fn is_standard_mode(session: Res<Session>) -> bool {
    session.mode == SpawnMode::Standard
}

pub fn is_boss_mode(session: Res<Session>) -> bool {
    session.mode == SpawnMode::Boss
}

/// Ends the session on the game-over path.
pub fn finish_game_over(
    session: &mut Session,
    score: &ScoreManager,
    scroll: &Scroll,
    audio_events: &mut EventWriter<AudioEvent>,
) {
    let outcome = Outcome::GameOver {
        level: session.level.id,
        score: score.score(),
        distance: scroll.distance.floor() as u32,
    };
    if session.finish(outcome) {
        audio_events.write(AudioEvent::PlaySound(Sound::GameOver));
    }
}

/// Checks the completion predicate and runs the level-complete path once it holds.
pub fn completion_system(
    mut session: ResMut<Session>,
    score: Res<ScoreManager>,
    scroll: Res<Scroll>,
    mut save: ResMut<SaveManager>,
    mut audio_events: EventWriter<AudioEvent>,
) {
    if session.is_over() {
        return;
    }
    let complete = match session.mode {
        SpawnMode::Standard => scroll.distance >= session.level.length,
        SpawnMode::Boss => score.distance() >= TARGET_DISTANCE,
    };
    if !complete {
        return;
    }

    let level = session.level.id;
    let mut unlocked = score.check_achievements(&mut save);
    save.set_high_score(score.score());

    let next = match session.mode {
        SpawnMode::Boss => {
            if !save.is_achievement_unlocked(AchievementId::NianshouDeliverer) {
                save.unlock_achievement(AchievementId::NianshouDeliverer);
                unlocked.push(AchievementId::NianshouDeliverer);
            }
            NextScene::Victory
        }
        SpawnMode::Standard => {
            save.unlock_level(level.get() + 1);
            match level.next() {
                Some(next) => NextScene::Story(next),
                None => NextScene::Victory,
            }
        }
    };

    info!(
        %level,
        score = %score.formatted_score(),
        distance = scroll.distance.floor(),
        achievements = unlocked.len(),
        "Level complete"
    );

    let outcome = Outcome::LevelComplete {
        level,
        score: score.score(),
        distance: scroll.distance.floor() as u32,
        unlocked,
        next,
    };
    if session.finish(outcome) {
        audio_events.write(AudioEvent::PlaySound(Sound::LevelComplete));
    }
}
