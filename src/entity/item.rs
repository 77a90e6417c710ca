//! Collectible items and their collection effects.

use std::f64::consts::PI;

use glam::Vec2;
use strum_macros::{Display, EnumIter, IntoStaticStr};

use crate::audio::{Sound, SoundSink};
use crate::constants::item::{
    BODY, COLLECT_FADE_MS, CULL_X, FLOAT_HALF_PERIOD_MS, FLOAT_HEIGHT, FU_COPPER_SCORE, FU_GOLD_SCORE, FU_SILVER_SCORE,
    SPRING_FLY_SECONDS,
};
use crate::constants::popup;
use crate::entity::{scroll_x, Aabb, Body, Cull, Fade};
use crate::pool::{PoolKind, Poolable};
use crate::save::{SaveManager, Stat};
use crate::score::ScoreManager;
use crate::systems::popup::Popups;

/// How far a collected item drifts upward while it fades.
const COLLECT_RISE: f32 = 50.0;
const COLLECT_SCALE: f32 = 1.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum FuTier {
    Copper,
    Silver,
    Gold,
}

impl FuTier {
    pub fn score(self) -> u32 {
        match self {
            FuTier::Copper => FU_COPPER_SCORE,
            FuTier::Silver => FU_SILVER_SCORE,
            FuTier::Gold => FU_GOLD_SCORE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ItemKind {
    Fu(FuTier),
    RedPacket,
    SpringWord,
}

impl ItemKind {
    pub fn pool_kind(self) -> PoolKind {
        match self {
            ItemKind::Fu(FuTier::Copper) => PoolKind::FuCopper,
            ItemKind::Fu(FuTier::Silver) => PoolKind::FuSilver,
            ItemKind::Fu(FuTier::Gold) => PoolKind::FuGold,
            ItemKind::RedPacket => PoolKind::RedPacket,
            ItemKind::SpringWord => PoolKind::SpringWord,
        }
    }
}

/// The player capability a spring word needs.
pub trait FlightHandle {
    fn activate_fly(&mut self, score: &mut ScoreManager, sounds: &mut dyn SoundSink);
}

/// Everything a collection effect may touch.
pub struct CollectContext<'a> {
    pub score: &'a mut ScoreManager,
    pub save: &'a mut SaveManager,
    pub sounds: &'a mut dyn SoundSink,
    pub popups: &'a mut Popups,
    pub flight: &'a mut dyn FlightHandle,
    pub now_ms: f64,
}

/// The effect applied when an item is picked up.
pub trait CollectEffect {
    fn apply(&self, ctx: &mut CollectContext<'_>, position: Vec2);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FuCharacter {
    pub tier: FuTier,
}

impl CollectEffect for FuCharacter {
    fn apply(&self, ctx: &mut CollectContext<'_>, position: Vec2) {
        let points = self.tier.score();
        ctx.score.add_score(points);
        ctx.save.add_stat(Stat::TotalFuCollected, 1);
        ctx.sounds.play_sound(Sound::CollectFu);
        ctx.popups
            .spawn(format!("+{points}"), position, popup::GOLD, popup::SHORT_MS, ctx.now_ms);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RedPacket;

impl CollectEffect for RedPacket {
    fn apply(&self, ctx: &mut CollectContext<'_>, position: Vec2) {
        ctx.score.add_red_packet();
        ctx.save.add_stat(Stat::TotalRedPackets, 1);
        ctx.sounds.play_sound(Sound::CollectPacket);
        ctx.popups
            .spawn("+1".to_string(), position, popup::RED, popup::SHORT_MS, ctx.now_ms);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpringWord;

impl CollectEffect for SpringWord {
    fn apply(&self, ctx: &mut CollectContext<'_>, position: Vec2) {
        ctx.save.add_stat(Stat::TotalFlyTime, SPRING_FLY_SECONDS);
        // Flight activation plays the power-up sound itself
        ctx.flight.activate_fly(ctx.score, ctx.sounds);
        ctx.popups
            .spawn("Flight mode!".to_string(), position, popup::GREEN, popup::LONG_MS, ctx.now_ms);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    kind: ItemKind,
    position: Vec2,
    base_y: f32,
    visible: bool,
    alpha: f32,
    scale: f32,
    body: Body,
    collected: bool,
    created_at: f64,
    fade: Option<Fade>,
}

impl Item {
    pub fn new(position: Vec2, kind: ItemKind, now_ms: f64) -> Self {
        Self {
            kind,
            position,
            base_y: position.y,
            visible: true,
            alpha: 1.0,
            scale: 1.0,
            body: Body::new(BODY),
            collected: false,
            created_at: now_ms,
            fade: None,
        }
    }

    /// Scrolls the item and animates its hover or collection fade.
    pub fn update(&mut self, scroll_speed: f32, dt_s: f32, now_ms: f64) -> Cull {
        self.position.x = scroll_x(self.position.x, scroll_speed, dt_s);

        match self.fade {
            Some(fade) => {
                let progress = fade.progress(now_ms);
                self.position.y = self.base_y - COLLECT_RISE * progress;
                self.alpha = fade.alpha(now_ms);
                self.scale = 1.0 + (COLLECT_SCALE - 1.0) * progress;
            }
            None => {
                // Sine-eased hover, up and back over two half periods
                let phase = (now_ms - self.created_at) / FLOAT_HALF_PERIOD_MS * PI;
                let lift = (1.0 - phase.cos()) / 2.0;
                self.position.y = self.base_y - FLOAT_HEIGHT * lift as f32;
            }
        }

        if self.position.x < CULL_X {
            Cull::Release
        } else {
            Cull::Keep
        }
    }

    /// Applies the item's effect once. Returns false if it was already collected.
    pub fn collect(&mut self, ctx: &mut CollectContext<'_>) -> bool {
        if self.collected {
            return false;
        }
        self.collected = true;
        self.body.enabled = false;
        self.base_y = self.position.y;
        self.fade = Some(Fade::new(ctx.now_ms, COLLECT_FADE_MS));

        let position = self.position;
        match self.kind {
            ItemKind::Fu(tier) => FuCharacter { tier }.apply(ctx, position),
            ItemKind::RedPacket => RedPacket.apply(ctx, position),
            ItemKind::SpringWord => SpringWord.apply(ctx, position),
        }
        true
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn base_y(&self) -> f32 {
        self.base_y
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn hitbox(&self) -> Option<Aabb> {
        self.body.aabb(self.position)
    }
}

impl Poolable for Item {
    type Config = ItemKind;

    fn kind_of(kind: &ItemKind) -> PoolKind {
        kind.pool_kind()
    }

    fn create(position: Vec2, kind: ItemKind, now_ms: f64) -> Self {
        Self::new(position, kind, now_ms)
    }

    fn reinitialize(&mut self, position: Vec2, kind: ItemKind, now_ms: f64) {
        *self = Self::new(position, kind, now_ms);
    }

    fn on_release(&mut self) {
        self.visible = false;
        self.body.enabled = false;
    }
}
