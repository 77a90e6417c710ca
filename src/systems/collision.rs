use bevy_ecs::{
    event::EventWriter,
    system::{Res, ResMut},
};
use tracing::{debug, trace};

use crate::audio::Sound;
use crate::constants::{item::COLLECT_FADE_MS, obstacle};
use crate::entity::item::CollectContext;
use crate::entity::player::Player;
use crate::save::SaveManager;
use crate::score::ScoreManager;
use crate::systems::{
    finish_game_over, AudioEvent, DeferredAction, DeferredActions, Items, Obstacles, Popups, Scroll, Session,
    SimClock,
};

/// Resolves player overlaps against obstacles, then against items.
///
/// Obstacles without an enabled body (warning window, smashed, released) never collide. A lethal hit
/// ends the session on the spot and skips the item pass.
#[allow(clippy::too_many_arguments)]
pub fn collision_system(
    clock: Res<SimClock>,
    scroll: Res<Scroll>,
    mut session: ResMut<Session>,
    mut player: ResMut<Player>,
    mut score: ResMut<ScoreManager>,
    mut save: ResMut<SaveManager>,
    mut obstacles: ResMut<Obstacles>,
    mut items: ResMut<Items>,
    mut popups: ResMut<Popups>,
    mut deferred: ResMut<DeferredActions>,
    mut audio_events: EventWriter<AudioEvent>,
) {
    if !session.is_running() {
        return;
    }

    for handle in obstacles.0.handles() {
        let Some(player_box) = player.hitbox() else {
            break;
        };
        let Some(hit) = obstacles.0.get_mut(handle) else {
            continue;
        };
        if !hit.is_active_obstacle() || !hit.hitbox().is_some_and(|hitbox| hitbox.overlaps(&player_box)) {
            continue;
        }

        if player.is_invincible() {
            hit.deactivate();
            hit.start_fade(clock.now_ms, obstacle::SMASH_FADE_MS);
            score.add_score(obstacle::SMASH_BONUS);
            audio_events.write(AudioEvent::PlaySound(Sound::Explosion));
            if let Some(epoch) = obstacles.0.epoch(handle) {
                deferred.schedule(
                    &clock,
                    obstacle::SMASH_FADE_MS,
                    DeferredAction::ReleaseObstacle { handle, epoch },
                );
            }
            debug!(?handle, score = score.score(), "Smashed obstacle");
            continue;
        }

        hit.deactivate();
        let died = player.take_damage(&mut score, &mut audio_events);
        debug!(?handle, lives = score.lives(), died, "Player hit obstacle");
        if died || score.is_dead() {
            finish_game_over(&mut session, &score, &scroll, &mut audio_events);
            return;
        }
    }

    let Some(player_box) = player.hitbox() else {
        return;
    };
    for handle in items.0.handles() {
        let Some(item) = items.0.get_mut(handle) else {
            continue;
        };
        if item.is_collected() || !item.hitbox().is_some_and(|hitbox| hitbox.overlaps(&player_box)) {
            continue;
        }

        let kind = item.kind();
        let mut ctx = CollectContext {
            score: &mut score,
            save: &mut save,
            sounds: &mut audio_events,
            popups: &mut popups,
            flight: &mut *player,
            now_ms: clock.now_ms,
        };
        if !item.collect(&mut ctx) {
            continue;
        }
        if let Some(epoch) = items.0.epoch(handle) {
            deferred.schedule(&clock, COLLECT_FADE_MS, DeferredAction::ReleaseItem { handle, epoch });
        }
        trace!(?handle, ?kind, "Collected item");
    }
}
