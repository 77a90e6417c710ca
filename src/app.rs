//! The headless runner: plays levels back to back with the autopilot at a fixed frame rate.

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use crate::audio::{AudioSink, NullAudio};
use crate::autopilot::Autopilot;
use crate::config::RunnerConfig;
use crate::events::{NextScene, Outcome};
use crate::game::{Collaborators, Game};
use crate::level::LevelId;
use crate::save::{JsonFileBackend, SaveManager};

/// How a single level ended.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelReport {
    pub level: LevelId,
    pub frames: u32,
    /// `None` when the frame limit was hit before the session ended.
    pub outcome: Option<Outcome>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub levels: Vec<LevelReport>,
    pub high_score: u32,
}

impl RunReport {
    /// True when the final level was completed.
    pub fn is_victory(&self) -> bool {
        self.levels.last().is_some_and(|report| {
            matches!(
                report.outcome,
                Some(Outcome::LevelComplete {
                    next: NextScene::Victory,
                    ..
                })
            )
        })
    }
}

pub struct App {
    config: RunnerConfig,
    collaborators: Option<Collaborators>,
}

impl App {
    /// Builds the runner's collaborators from the configuration.
    pub fn new(config: RunnerConfig) -> Self {
        let save = match &config.save_path {
            Some(path) => SaveManager::new(Box::new(JsonFileBackend::new(path))),
            None => SaveManager::in_memory(),
        };
        Self::with_collaborators(config, Box::new(NullAudio), save)
    }

    pub fn with_collaborators(config: RunnerConfig, audio: Box<dyn AudioSink>, save: SaveManager) -> Self {
        Self {
            config,
            collaborators: Some(Collaborators { audio, save }),
        }
    }

    /// Plays from the configured level until a game over, the frame limit, or the end of the campaign.
    pub fn run(&mut self) -> Result<RunReport> {
        let mut report = RunReport::default();
        let mut level = LevelId::new(self.config.level).context("Invalid starting level")?;

        loop {
            let level_report = self.play_level(level)?;
            let next = match &level_report.outcome {
                Some(Outcome::LevelComplete {
                    next: NextScene::Story(next),
                    ..
                }) if self.config.campaign => Some(*next),
                _ => None,
            };
            report.levels.push(level_report);

            match next {
                Some(next) => level = next,
                None => break,
            }
        }

        report.high_score = self.save().map(SaveManager::high_score).unwrap_or_default();
        info!(
            levels = report.levels.len(),
            high_score = report.high_score,
            victory = report.is_victory(),
            "Run finished"
        );
        Ok(report)
    }

    fn play_level(&mut self, level: LevelId) -> Result<LevelReport> {
        let _span = info_span!("level", %level).entered();
        let collaborators = self.collaborators.take().context("Collaborators already in use")?;
        let mut game = Game::new(level.get(), collaborators, self.config.seed)?;
        game.set_muted(self.config.muted);
        game.start();

        let mut autopilot = Autopilot::new();
        let mut frames = 0;
        while frames < self.config.max_frames {
            for command in autopilot.decide(&game) {
                game.send(command);
            }
            frames += 1;
            if game.tick(self.config.frame_ms) {
                break;
            }
        }

        let outcome = game.outcome().cloned();
        if outcome.is_none() {
            warn!(frames, "Frame limit reached before the level ended");
        }
        self.collaborators = Some(game.finish());

        Ok(LevelReport { level, frames, outcome })
    }

    pub fn save(&self) -> Option<&SaveManager> {
        self.collaborators.as_ref().map(|collaborators| &collaborators.save)
    }
}
