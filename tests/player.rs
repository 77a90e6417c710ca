use glam::Vec2;
use nianshou::{
    audio::Sound,
    constants::player::{DUCK_HEIGHT, SIZE, SPAWN},
    entity::player::{Player, PlayerState},
    events::{Action, HeldFlags, HeldInput},
    level::LevelId,
    score::ScoreManager,
};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

const FRAME: f64 = 1000.0 / 60.0;

fn idle() -> HeldInput {
    HeldInput::default()
}

fn holding(actions: &[Action]) -> HeldInput {
    let mut flags = HeldFlags::empty();
    for action in actions {
        flags.insert(action.flag());
    }
    HeldInput(flags)
}

fn score() -> ScoreManager {
    ScoreManager::new(LevelId::FIRST)
}

#[test]
fn test_new_player_is_grounded_and_running() {
    let player = Player::default();
    assert_eq!(player.position(), SPAWN);
    assert_eq!(player.state(), PlayerState::Running);
    assert_that(&player.is_grounded()).is_true();
    assert_eq!(player.jump_count(), 0);
    assert_eq!(player.body().size, SIZE);
}

#[test]
fn test_player_stays_on_ground() {
    let mut player = Player::default();
    for _ in 0..30 {
        player.update(FRAME, &idle());
    }
    assert_eq!(player.position().y, SPAWN.y);
    assert_eq!(player.velocity().y, 0.0);
    assert_eq!(player.state(), PlayerState::Running);
}

#[test]
fn test_jump_from_ground() {
    let mut player = Player::default();
    let mut sounds: Vec<Sound> = Vec::new();

    assert_that(&player.jump(&mut sounds)).is_true();
    assert_eq!(player.state(), PlayerState::Jumping);
    assert_eq!(player.velocity().y, -600.0);
    assert_eq!(player.jump_count(), 1);
    assert_that(&player.is_grounded()).is_false();
    assert_eq!(sounds, vec![Sound::Jump]);
}

#[test]
fn test_double_jump_is_capped() {
    let mut player = Player::default();
    let mut sounds: Vec<Sound> = Vec::new();

    assert_that(&player.jump(&mut sounds)).is_true();
    player.update(FRAME, &idle());
    assert_that(&player.jump(&mut sounds)).is_true();
    assert_eq!(player.jump_count(), 2);
    player.update(FRAME, &idle());
    assert_that(&player.jump(&mut sounds)).is_false();
    assert_eq!(sounds.len(), 2);
}

#[test]
fn test_back_to_back_jumps_follow_the_cap() {
    let mut player = Player::default();
    let mut sounds: Vec<Sound> = Vec::new();

    assert_that(&player.jump(&mut sounds)).is_true();
    assert_that(&player.jump(&mut sounds)).is_true();
    assert_that(&player.jump(&mut sounds)).is_false();
}

#[test]
fn test_coyote_jump_after_leaving_ground() {
    let mut player = Player::default();
    let mut sounds: Vec<Sound> = Vec::new();
    player.set_position(Vec2::new(SPAWN.x, 300.0));
    player.update(FRAME, &idle());

    assert_that(&player.is_grounded()).is_false();
    assert_eq!(player.state(), PlayerState::Falling);
    assert!(player.coyote_ms() > 0.0);

    assert_that(&player.jump(&mut sounds)).is_true();
    assert_eq!(player.jump_count(), 1);
    assert_that(&player.jump(&mut sounds)).is_true();
    assert_eq!(player.jump_count(), 2);
}

#[test]
fn test_no_jump_after_coyote_window() {
    let mut player = Player::default();
    let mut sounds: Vec<Sound> = Vec::new();
    player.set_position(Vec2::new(SPAWN.x, 100.0));
    for _ in 0..7 {
        player.update(FRAME, &idle());
    }

    assert_eq!(player.coyote_ms(), 0.0);
    assert_that(&player.jump(&mut sounds)).is_false();
    assert_that(&sounds).is_empty();
}

#[test]
fn test_landing_returns_to_running() {
    let mut player = Player::default();
    player.jump(&mut Vec::<Sound>::new());

    let mut frames = 0;
    while !player.is_grounded() && frames < 200 {
        player.update(FRAME, &idle());
        frames += 1;
    }
    assert_that(&player.is_grounded()).is_true();
    assert_eq!(player.state(), PlayerState::Running);
    assert_eq!(player.jump_count(), 0);
    assert_eq!(player.position().y, SPAWN.y);
}

#[test]
fn test_duck_shrinks_body_and_stop_restores_it() {
    let mut player = Player::default();
    player.duck();

    assert_eq!(player.state(), PlayerState::Ducking);
    assert_eq!(player.body().size, Vec2::new(SIZE.x, DUCK_HEIGHT));
    assert_eq!(player.body().offset.y, (SIZE.y - DUCK_HEIGHT) / 2.0);
    let hitbox = player.hitbox().unwrap();
    assert_eq!(hitbox.max.y, SPAWN.y + SIZE.y / 2.0);

    player.stop_duck();
    assert_eq!(player.state(), PlayerState::Running);
    assert_eq!(player.body().size, SIZE);
    assert_eq!(player.body().offset, Vec2::ZERO);
}

#[test]
fn test_duck_is_ignored_in_the_air() {
    let mut player = Player::default();
    player.jump(&mut Vec::<Sound>::new());
    player.duck();
    assert_eq!(player.state(), PlayerState::Jumping);
    assert_eq!(player.body().size, SIZE);
}

#[test]
fn test_jump_out_of_a_duck_restores_body() {
    let mut player = Player::default();
    player.duck();
    player.jump(&mut Vec::<Sound>::new());
    assert_eq!(player.state(), PlayerState::Jumping);
    assert_eq!(player.body().size, SIZE);
}

#[test]
fn test_damage_hurts_then_recovers() {
    let mut player = Player::default();
    let mut score = score();
    let mut sounds: Vec<Sound> = Vec::new();

    assert_that(&player.take_damage(&mut score, &mut sounds)).is_false();
    assert_eq!(player.state(), PlayerState::Hurt);
    assert_eq!(player.velocity().y, -200.0);
    assert_eq!(score.lives(), 2);
    assert_eq!(sounds, vec![Sound::Hurt]);

    // Hurt ignores further hits
    assert_that(&player.take_damage(&mut score, &mut sounds)).is_false();
    assert_eq!(score.lives(), 2);

    for _ in 0..4 {
        player.update(100.0, &idle());
    }
    assert_eq!(player.state(), PlayerState::Hurt);
    player.update(100.0, &idle());
    assert_eq!(player.state(), PlayerState::Running);
}

#[test]
fn test_stale_recovery_does_not_override_flight() {
    let mut player = Player::default();
    let mut score = score();
    let mut sounds: Vec<Sound> = Vec::new();

    player.take_damage(&mut score, &mut sounds);
    player.activate_fly(&mut score, &mut sounds);
    for _ in 0..6 {
        player.update(100.0, &idle());
    }
    assert_eq!(player.state(), PlayerState::Flying);
}

#[test]
fn test_fatal_damage() {
    let mut player = Player::default();
    let mut score = score();
    score.take_damage(2);

    assert_that(&player.take_damage(&mut score, &mut Vec::<Sound>::new())).is_true();
    assert_that(&score.is_dead()).is_true();
}

#[test]
fn test_invincibility_needs_red_packets() {
    let mut player = Player::default();
    let mut score = score();
    let mut sounds: Vec<Sound> = Vec::new();

    assert_that(&player.activate_invincible(&mut score, &mut sounds)).is_false();
    for _ in 0..5 {
        score.add_red_packet();
    }
    assert_that(&player.activate_invincible(&mut score, &mut sounds)).is_true();
    assert_eq!(player.state(), PlayerState::Invincible);
    assert_that(&player.is_invincible()).is_true();
    assert_that(&player.tint()).is_some();
    assert_eq!(score.red_packets(), 0);
    assert_eq!(sounds, vec![Sound::PowerUp]);

    assert_that(&player.take_damage(&mut score, &mut sounds)).is_false();
    assert_eq!(score.lives(), 3);
}

#[test]
fn test_invincibility_expires() {
    let mut player = Player::default();
    let mut score = score();
    for _ in 0..5 {
        score.add_red_packet();
    }
    player.activate_invincible(&mut score, &mut Vec::<Sound>::new());

    for _ in 0..29 {
        player.update(100.0, &idle());
    }
    assert_eq!(player.state(), PlayerState::Invincible);
    player.update(100.0, &idle());
    assert_eq!(player.state(), PlayerState::Running);
    assert_that(&player.tint()).is_none();
}

#[test]
fn test_jump_keeps_invincibility() {
    let mut player = Player::default();
    let mut score = score();
    for _ in 0..5 {
        score.add_red_packet();
    }
    player.activate_invincible(&mut score, &mut Vec::<Sound>::new());
    assert_that(&player.jump(&mut Vec::<Sound>::new())).is_true();
    assert_eq!(player.state(), PlayerState::Invincible);
    assert_eq!(player.velocity().y, -600.0);

    player.duck();
    assert_eq!(player.state(), PlayerState::Invincible);
    assert_that(&player.is_crouched()).is_false();
}

#[test]
fn test_invincible_player_can_duck() {
    let mut player = Player::default();
    let mut score = score();
    for _ in 0..5 {
        score.add_red_packet();
    }
    player.activate_invincible(&mut score, &mut Vec::<Sound>::new());

    player.duck();
    assert_eq!(player.state(), PlayerState::Invincible);
    assert_that(&player.is_crouched()).is_true();
    assert_eq!(player.body().size, Vec2::new(SIZE.x, DUCK_HEIGHT));
    assert_eq!(player.body().offset.y, (SIZE.y - DUCK_HEIGHT) / 2.0);

    player.stop_duck();
    assert_eq!(player.state(), PlayerState::Invincible);
    assert_eq!(player.body().size, SIZE);
    assert_eq!(player.body().offset, Vec2::ZERO);
}

#[test]
fn test_crouch_ends_with_invincibility() {
    let mut player = Player::default();
    let mut score = score();
    for _ in 0..5 {
        score.add_red_packet();
    }
    player.activate_invincible(&mut score, &mut Vec::<Sound>::new());
    player.duck();

    for _ in 0..30 {
        player.update(100.0, &holding(&[Action::Duck]));
    }
    assert_eq!(player.state(), PlayerState::Running);
    assert_eq!(player.body().size, SIZE);
}

#[test]
fn test_flight_replaces_invincibility() {
    let mut player = Player::default();
    let mut score = score();
    for _ in 0..10 {
        score.add_red_packet();
    }
    player.activate_invincible(&mut score, &mut Vec::<Sound>::new());
    player.activate_fly(&mut score, &mut Vec::<Sound>::new());

    assert_eq!(player.state(), PlayerState::Flying);
    assert_that(&score.is_invincible_active()).is_false();
    assert_that(&player.tint()).is_none();
    assert_that(&player.activate_invincible(&mut score, &mut Vec::<Sound>::new())).is_false();
    assert_eq!(score.red_packets(), 5);
}

#[test]
fn test_flight_follows_held_input_and_expires() {
    let mut player = Player::default();
    let mut score = score();
    player.activate_fly(&mut score, &mut Vec::<Sound>::new());

    player.update(FRAME, &holding(&[Action::Up]));
    player.update(FRAME, &holding(&[Action::Up]));
    assert!(player.position().y < SPAWN.y);
    assert_eq!(player.velocity().y, -300.0);
    let wing = player.wing().unwrap();
    assert_eq!(wing, player.position() + Vec2::new(0.0, -10.0));

    for _ in 0..40 {
        player.update(100.0, &holding(&[Action::Up]));
    }
    assert_eq!(player.state(), PlayerState::Flying);
    assert_eq!(player.position().y, 50.0);

    for _ in 0..10 {
        player.update(100.0, &idle());
    }
    assert_eq!(player.state(), PlayerState::Falling);
    assert_that(&player.wing()).is_none();
}

#[test]
fn test_flight_restarts_timer() {
    let mut player = Player::default();
    let mut score = score();
    player.activate_fly(&mut score, &mut Vec::<Sound>::new());
    for _ in 0..30 {
        player.update(100.0, &idle());
    }
    player.activate_fly(&mut score, &mut Vec::<Sound>::new());
    assert_eq!(player.fly_ms(), 5000.0);
}

#[test]
fn test_jump_while_flying_is_a_no_op() {
    let mut player = Player::default();
    player.activate_fly(&mut score(), &mut Vec::<Sound>::new());
    let mut sounds: Vec<Sound> = Vec::new();
    assert_that(&player.jump(&mut sounds)).is_true();
    assert_eq!(player.state(), PlayerState::Flying);
    assert_that(&sounds).is_empty();
}

#[test]
fn test_horizontal_movement() {
    let mut player = Player::default();
    player.update(100.0, &holding(&[Action::Right]));
    assert_eq!(player.velocity().x, 300.0);

    player.update(100.0, &holding(&[Action::Left, Action::Right]));
    assert_eq!(player.velocity().x, 0.0);

    for _ in 0..100 {
        player.update(100.0, &holding(&[Action::Left]));
    }
    assert_eq!(player.position().x, SIZE.x / 2.0);
}

#[test]
fn test_jump_apex() {
    let player = Player::default();
    assert_eq!(player.jump_apex_y(), SPAWN.y - 180.0);
}
