use anyhow::Result;
use tracing::{error, info};
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

use nianshou::app::App;
use nianshou::config::RunnerConfig;
use nianshou::events::Outcome;

fn init_tracing() -> Result<()> {
    let subscriber = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

pub fn main() -> Result<()> {
    init_tracing()?;

    let config = RunnerConfig::load()?;
    info!(?config, "Starting headless run");

    let report = match App::new(config).run() {
        Ok(report) => report,
        Err(err) => {
            error!(error = %err, "Run failed");
            return Err(err);
        }
    };

    for level in &report.levels {
        match &level.outcome {
            Some(Outcome::LevelComplete {
                score,
                distance,
                unlocked,
                ..
            }) => info!(level = %level.level, score, distance, achievements = ?unlocked, "Cleared"),
            Some(Outcome::GameOver { score, distance, .. }) => {
                info!(level = %level.level, score, distance, "Game over")
            }
            None => info!(level = %level.level, frames = level.frames, "Abandoned"),
        }
    }
    info!(high_score = report.high_score, victory = report.is_victory(), "Done");
    Ok(())
}
