use nianshou::{
    audio::{AudioCall, Sound},
    entity::{item::FuTier, item::ItemKind, player::PlayerState},
    error::{GameError, LevelError},
    events::{Action, GameCommand, NextScene, Outcome},
    game::{Collaborators, Game},
    level::{LevelId, ParallaxLayer},
    save::{SaveManager, Stat},
    score::AchievementId,
    systems::{SessionStage, SpawnTimer},
};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

use common::*;

#[test]
fn test_unknown_level_is_rejected() {
    let collaborators = Collaborators {
        audio: Box::new(nianshou::audio::NullAudio),
        save: SaveManager::in_memory(),
    };
    let result = Game::new(4, collaborators, None);
    assert!(matches!(result, Err(GameError::Level(LevelError::Unknown(4)))));
}

#[test]
fn test_new_session_waits_in_init() {
    let (mut game, audio) = new_game(1);
    assert_eq!(game.stage(), SessionStage::Init);

    run_frames(&mut game, 10, FRAME);
    assert_eq!(game.now_ms(), 0.0);
    assert_eq!(game.scroll().distance, 0.0);
    assert_that(&audio.calls()).is_empty();

    assert_that(&game.start()).is_true();
    assert_that(&game.start()).is_false();
    assert_eq!(game.stage(), SessionStage::Running);
    assert_eq!(audio.calls(), vec![AudioCall::Music]);
}

#[test]
fn test_scroll_distance_is_monotonic_and_speed_ramps_to_max() {
    let (mut game, _audio) = quiet_game(1);
    let max_speed = game.level().max_speed;

    let mut last_distance = 0.0;
    let mut last_speed = game.scroll().speed;
    for _ in 0..150 {
        game.tick(100.0);
        let scroll = *game.scroll();
        assert!(scroll.distance >= last_distance);
        assert!(scroll.speed >= last_speed);
        assert!(scroll.speed <= max_speed);
        last_distance = scroll.distance;
        last_speed = scroll.speed;
    }
    assert!(last_distance > 0.0);
    assert_eq!(game.score().distance(), game.scroll().distance);
}

#[test]
fn test_parallax_layers_scroll_at_their_fractions() {
    let (mut game, _audio) = quiet_game(1);
    run_frames(&mut game, 30, FRAME);

    let parallax = game.parallax();
    let ground = parallax.offset(ParallaxLayer::Ground);
    let sky = parallax.offset(ParallaxLayer::Sky);
    assert!(ground > parallax.offset(ParallaxLayer::Buildings));
    assert!(parallax.offset(ParallaxLayer::Buildings) > parallax.offset(ParallaxLayer::Mountains));
    assert!((ground * 0.1 - sky).abs() < 0.01);
}

#[test]
fn test_pause_freezes_the_simulation() {
    let (mut game, audio) = quiet_game(1);
    run_frames(&mut game, 10, FRAME);

    assert_that(&game.pause()).is_true();
    let now = game.now_ms();
    let distance = game.scroll().distance;
    let position = game.player().position();

    run_frames(&mut game, 30, FRAME);
    assert_eq!(game.now_ms(), now);
    assert_eq!(game.scroll().distance, distance);
    assert_eq!(game.player().position(), position);
    assert_eq!(game.score().level_time(), now / 1000.0);

    assert_that(&game.resume()).is_true();
    game.tick(FRAME);
    assert!(game.now_ms() > now);
    assert!(game.scroll().distance > distance);
    assert_that(&audio.calls()).contains(AudioCall::Pause);
    assert_that(&audio.calls()).contains(AudioCall::Resume);
}

#[test]
fn test_toggle_pause_command() {
    let (mut game, audio) = quiet_game(1);
    game.send(GameCommand::TogglePause);
    game.tick(FRAME);
    assert_eq!(game.stage(), SessionStage::Paused);
    assert_eq!(game.now_ms(), 0.0);

    game.send(GameCommand::TogglePause);
    game.tick(FRAME);
    assert_eq!(game.stage(), SessionStage::Running);
    assert_eq!(game.now_ms(), FRAME);
    assert_that(&audio.calls()).contains(AudioCall::Pause);
}

#[test]
fn test_press_while_paused_only_updates_held_state() {
    let (mut game, _audio) = quiet_game(1);
    game.pause();
    game.send(GameCommand::Press(Action::Jump));
    game.tick(FRAME);

    assert_that(&game.player().is_grounded()).is_true();
    assert_that(&game.world.resource::<nianshou::events::HeldInput>().is_held(Action::Jump)).is_true();

    game.resume();
    game.tick(FRAME);
    assert_eq!(game.player().state(), PlayerState::Running);
}

#[test]
fn test_jump_command_launches_player() {
    let (mut game, audio) = quiet_game(1);
    game.send(GameCommand::Press(Action::Jump));
    game.tick(FRAME);

    assert_eq!(game.player().state(), PlayerState::Jumping);
    assert!(game.player().position().y < spawn_point().y);
    assert_eq!(audio.count(Sound::Jump), 1);
}

#[test]
fn test_level_completion_fires_exactly_once() {
    let (mut game, audio) = quiet_game(1);
    let frames = run_until_over(&mut game, 1_000, 100.0);
    assert!(frames < 1_000);
    assert!(game.scroll().distance >= 4000.0);

    let outcome = game.outcome().cloned().expect("session should have an outcome");
    match &outcome {
        Outcome::LevelComplete {
            level,
            unlocked,
            next,
            distance,
            ..
        } => {
            assert_eq!(*level, LevelId::FIRST);
            assert_eq!(*next, NextScene::Story(LevelId::new(2).unwrap()));
            assert!(*distance >= 4000);
            assert_that(unlocked).contains(AchievementId::NoDamage1);
            assert_that(unlocked).contains(AchievementId::SpeedDemon);
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    assert_that(&game.save().is_level_unlocked(LevelId::new(2).unwrap())).is_true();

    let distance = game.scroll().distance;
    run_frames(&mut game, 20, 100.0);
    assert_eq!(game.scroll().distance, distance);
    assert_eq!(game.outcome(), Some(&outcome));
    assert_eq!(audio.count(Sound::LevelComplete), 1);
    assert_eq!(audio.count(Sound::GameOver), 0);
}

#[test]
fn test_finish_hands_back_progress() {
    let (mut game, _audio) = quiet_game(1);
    run_until_over(&mut game, 1_000, 100.0);

    let collaborators = game.finish();
    assert_that(&collaborators.save.is_level_unlocked(LevelId::new(2).unwrap())).is_true();
    assert_that(&collaborators.save.is_achievement_unlocked(AchievementId::NoDamage1)).is_true();
}

#[test]
fn test_obstacle_hit_costs_one_life() {
    let (mut game, audio) = quiet_game(1);
    let handle = obstacle_on_player(&mut game, armed_firecracker());
    game.tick(FRAME);

    assert_eq!(game.score().lives(), 2);
    assert_eq!(game.player().state(), PlayerState::Hurt);
    assert_that(&game.obstacles().0.get(handle).unwrap().is_active_obstacle()).is_false();
    assert_eq!(audio.count(Sound::Hurt), 1);

    run_frames(&mut game, 10, FRAME);
    assert_eq!(game.score().lives(), 2);
    assert_eq!(game.score().damage_taken(), 1);
}

#[test]
fn test_invincible_player_smashes_obstacles() {
    let (mut game, audio) = quiet_game(1);
    for _ in 0..5 {
        game.score_mut().add_red_packet();
    }
    game.send(GameCommand::Press(Action::Activate));
    game.tick(FRAME);
    assert_eq!(game.player().state(), PlayerState::Invincible);
    assert_eq!(game.score().red_packets(), 0);
    assert_that(&game.score().is_invincible_active()).is_true();

    let handle = obstacle_on_player(&mut game, armed_firecracker());
    game.tick(FRAME);
    assert_eq!(game.score().score(), 50);
    assert_eq!(game.score().lives(), 3);
    assert_eq!(audio.count(Sound::Explosion), 1);
    let obstacle = game.obstacles().0.get(handle).unwrap();
    assert_that(&obstacle.is_active_obstacle()).is_false();
    assert_that(&obstacle.hitbox()).is_none();

    run_frames(&mut game, 6, 50.0);
    assert_eq!(game.obstacles().0.in_use(), 0);
    assert_eq!(game.score().score(), 50);
}

#[test]
fn test_fatal_hit_ends_session_and_skips_items() {
    let (mut game, audio) = quiet_game(1);
    game.score_mut().take_damage(2);
    obstacle_on_player(&mut game, armed_firecracker());
    item_on_player(&mut game, ItemKind::Fu(FuTier::Gold));

    assert_that(&game.tick(FRAME)).is_true();
    let outcome = game.outcome().cloned().unwrap();
    assert!(matches!(outcome, Outcome::GameOver { score: 0, .. }));
    assert_eq!(game.score().score(), 0);
    assert_eq!(audio.count(Sound::GameOver), 1);

    obstacle_on_player(&mut game, armed_firecracker());
    run_frames(&mut game, 5, FRAME);
    assert_eq!(game.outcome(), Some(&outcome));
    assert_eq!(audio.count(Sound::GameOver), 1);
    assert_eq!(audio.count(Sound::LevelComplete), 0);
}

#[test]
fn test_collecting_fu_scores_and_recycles() {
    let (mut game, audio) = quiet_game(1);
    let handle = item_on_player(&mut game, ItemKind::Fu(FuTier::Gold));
    game.tick(FRAME);

    assert_eq!(game.score().score(), 50);
    assert_eq!(game.save().stat(Stat::TotalFuCollected), 1);
    assert_eq!(audio.count(Sound::CollectFu), 1);
    assert_that(&game.items().0.get(handle).unwrap().is_collected()).is_true();
    assert_eq!(game.popups().iter().next().map(|popup| popup.text.as_str()), Some("+50"));

    game.tick(FRAME);
    assert_eq!(game.score().score(), 50);

    run_frames(&mut game, 20, FRAME);
    assert_eq!(game.items().0.in_use(), 0);
}

#[test]
fn test_red_packets_feed_invincibility() {
    let (mut game, audio) = quiet_game(1);
    item_on_player(&mut game, ItemKind::RedPacket);
    game.tick(FRAME);

    assert_eq!(game.score().red_packets(), 1);
    assert_eq!(game.score().red_packets_collected(), 1);
    assert_eq!(game.save().stat(Stat::TotalRedPackets), 1);
    assert_eq!(audio.count(Sound::CollectPacket), 1);
    assert_that(&game.score().can_activate_invincible()).is_false();
}

#[test]
fn test_spring_word_grants_flight() {
    let (mut game, audio) = quiet_game(1);
    item_on_player(&mut game, ItemKind::SpringWord);
    game.tick(FRAME);

    assert_eq!(game.player().state(), PlayerState::Flying);
    assert_that(&game.player().wing()).is_some();
    assert_eq!(game.save().stat(Stat::TotalFlyTime), 5);
    assert_eq!(audio.count(Sound::PowerUp), 1);

    obstacle_on_player(&mut game, armed_firecracker());
    game.tick(FRAME);
    assert_eq!(game.score().lives(), 3);
}

#[test]
fn test_standard_spawner_spawns_in_pairs() {
    let (mut game, _audio) = new_game(1);
    game.start();

    run_frames(&mut game, 110, FRAME);
    assert_eq!(game.obstacles().0.in_use(), 0);

    run_frames(&mut game, 20, FRAME);
    assert_eq!(game.obstacles().0.in_use(), 1);
    assert_eq!(game.items().0.in_use(), 1);

    let (_, item) = game.items().0.iter().next().unwrap();
    assert_that(&item.base_y()).is_greater_than_or_equal_to(388.0);
    assert_that(&item.base_y()).is_less_than_or_equal_to(540.0);

    let timer = *game.world.resource::<SpawnTimer>();
    assert!(timer.interval_ms < 2000.0);
    assert!(timer.interval_ms >= 800.0);
}

#[test]
fn test_teardown_clears_everything() {
    let (mut game, audio) = new_game(1);
    game.start();
    run_frames(&mut game, 200, FRAME);
    item_on_player(&mut game, ItemKind::RedPacket);
    game.tick(FRAME);

    game.teardown();
    assert_eq!(game.obstacles().0.in_use(), 0);
    assert_eq!(game.items().0.in_use(), 0);
    assert_that(&game.popups().is_empty()).is_true();
    assert_eq!(audio.calls().last(), Some(&AudioCall::Stop));
}

#[test]
fn test_boss_level_completes_with_victory() {
    let (mut game, _audio) = new_game(3);
    assert_that(&game.boss()).is_some();
    assert_eq!(game.popups().len(), 1);
    game.start();

    run_frames(&mut game, 70, FRAME);
    assert_that(&game.obstacles().0.in_use()).is_greater_than(0);

    let mut over = false;
    for _ in 0..2_000 {
        game.score_mut().heal(3);
        if game.tick(FRAME) {
            over = true;
            break;
        }
    }
    assert_that(&over).is_true();
    assert!(game.score().distance() >= 2000.0);

    match game.outcome().unwrap() {
        Outcome::LevelComplete { next, unlocked, .. } => {
            assert_eq!(*next, NextScene::Victory);
            assert_that(unlocked).contains(AchievementId::NianshouDeliverer);
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    assert_that(&game.save().is_achievement_unlocked(AchievementId::NianshouDeliverer)).is_true();
}

#[test]
fn test_muted_session_plays_nothing() {
    let (mut game, audio) = quiet_game(1);
    audio.clear();
    game.set_muted(true);
    game.send(GameCommand::Press(Action::Jump));
    game.tick(FRAME);
    assert_eq!(audio.count(Sound::Jump), 0);
}

#[test]
fn test_hurt_recovery_waits_out_a_pause() {
    let (mut game, _audio) = quiet_game(1);
    obstacle_on_player(&mut game, armed_firecracker());
    game.tick(FRAME);
    assert_eq!(game.player().state(), PlayerState::Hurt);

    game.pause();
    run_frames(&mut game, 120, FRAME);
    assert_eq!(game.player().state(), PlayerState::Hurt);

    game.resume();
    run_frames(&mut game, 40, FRAME);
    assert_eq!(game.player().state(), PlayerState::Running);
}

#[test]
fn test_item_release_waits_out_a_pause() {
    let (mut game, _audio) = quiet_game(1);
    let handle = item_on_player(&mut game, ItemKind::RedPacket);
    game.tick(FRAME);
    assert_that(&game.items().0.get(handle).unwrap().is_collected()).is_true();

    game.pause();
    run_frames(&mut game, 60, FRAME);
    assert_that(&game.items().0.get(handle)).is_some();
    assert_eq!(game.items().0.in_use(), 1);

    game.resume();
    run_frames(&mut game, 20, FRAME);
    assert_that(&game.items().0.get(handle)).is_none();
    assert_eq!(game.items().0.in_use(), 0);
}
