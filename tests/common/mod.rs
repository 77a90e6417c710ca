#![allow(dead_code)]

use glam::Vec2;
use nianshou::{
    audio::RecordingAudio,
    constants::player::SPAWN,
    entity::{
        firecracker::{FirecrackerConfig, MovePattern, SpawnDomain},
        item::ItemKind,
        obstacle::ObstacleConfig,
    },
    game::{Collaborators, Game},
    pool::PoolHandle,
    save::SaveManager,
    systems::SpawnTimer,
};

pub const SEED: u64 = 0x5EED;
pub const FRAME: f64 = 1000.0 / 60.0;

/// A session for `level` with a recording audio sink and in-memory saves.
pub fn new_game(level: u8) -> (Game, RecordingAudio) {
    new_game_with_save(level, SaveManager::in_memory())
}

pub fn new_game_with_save(level: u8, save: SaveManager) -> (Game, RecordingAudio) {
    let audio = RecordingAudio::new();
    let collaborators = Collaborators {
        audio: Box::new(audio.clone()),
        save,
    };
    let game = Game::new(level, collaborators, Some(SEED)).expect("level should exist");
    (game, audio)
}

/// A running session whose standard spawner never fires.
pub fn quiet_game(level: u8) -> (Game, RecordingAudio) {
    let (mut game, audio) = new_game(level);
    silence_spawner(&mut game);
    game.start();
    (game, audio)
}

pub fn silence_spawner(game: &mut Game) {
    game.world.resource_mut::<SpawnTimer>().interval_ms = f64::INFINITY;
}

pub fn run_frames(game: &mut Game, frames: usize, delta_ms: f64) {
    for _ in 0..frames {
        game.tick(delta_ms);
    }
}

/// Ticks until the session ends or `max_frames` pass. Returns the frames run.
pub fn run_until_over(game: &mut Game, max_frames: usize, delta_ms: f64) -> usize {
    for frame in 1..=max_frames {
        if game.tick(delta_ms) {
            return frame;
        }
    }
    max_frames
}

/// An armed ground firecracker, no warning window.
pub fn armed_firecracker() -> ObstacleConfig {
    FirecrackerConfig::new(SpawnDomain::Ground, MovePattern::Static)
        .with_warning(0.0)
        .into()
}

/// Places an obstacle centred on the player.
pub fn obstacle_on_player(game: &mut Game, config: ObstacleConfig) -> PoolHandle {
    let now = game.now_ms();
    let position = game.player().position();
    game.obstacles_mut().0.acquire(position, config, now)
}

pub fn item_on_player(game: &mut Game, kind: ItemKind) -> PoolHandle {
    let now = game.now_ms();
    let position = game.player().position();
    game.items_mut().0.acquire(position, kind, now)
}

pub fn item_at(game: &mut Game, kind: ItemKind, position: Vec2) -> PoolHandle {
    let now = game.now_ms();
    game.items_mut().0.acquire(position, kind, now)
}

pub fn spawn_point() -> Vec2 {
    SPAWN
}

/// A unique scratch path under the system temp directory.
pub fn temp_path(name: &str) -> std::path::PathBuf {
    let unique = format!("nianshou-{}-{}-{}", name, std::process::id(), SEED);
    std::env::temp_dir().join(unique).join("save.json")
}
