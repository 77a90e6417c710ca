use glam::Vec2;
use strum_macros::{Display, EnumIter};

use crate::constants::obstacle::{
    FIRECRACKER_AIR_BODY, FIRECRACKER_AIR_Y, FIRECRACKER_BOUNCE_AMPLITUDE, FIRECRACKER_BOUNCE_RATE,
    FIRECRACKER_GROUND_BODY, FIRECRACKER_GROUND_Y, FIRECRACKER_WARNING_MS, WARNING_ALPHA, WARNING_OFFSET_Y,
};
use crate::entity::obstacle::{ObstacleBehavior, ObstacleCore};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum SpawnDomain {
    Ground,
    Air,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum MovePattern {
    Static,
    Bounce,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FirecrackerConfig {
    pub domain: SpawnDomain,
    pub pattern: MovePattern,
    pub damage: u8,
    /// Telegraph length before the firecracker becomes visible and collidable. Zero disables it.
    pub warning_ms: f64,
}

impl Default for FirecrackerConfig {
    fn default() -> Self {
        Self {
            domain: SpawnDomain::Ground,
            pattern: MovePattern::Static,
            damage: 1,
            warning_ms: FIRECRACKER_WARNING_MS,
        }
    }
}

impl FirecrackerConfig {
    pub fn new(domain: SpawnDomain, pattern: MovePattern) -> Self {
        Self {
            domain,
            pattern,
            ..Default::default()
        }
    }

    pub fn with_warning(mut self, warning_ms: f64) -> Self {
        self.warning_ms = warning_ms;
        self
    }

    pub fn body_size(&self) -> Vec2 {
        match self.domain {
            SpawnDomain::Ground => FIRECRACKER_GROUND_BODY,
            SpawnDomain::Air => FIRECRACKER_AIR_BODY,
        }
    }

    /// The standard spawn height for this domain.
    pub fn spawn_y(&self) -> f32 {
        match self.domain {
            SpawnDomain::Ground => FIRECRACKER_GROUND_Y,
            SpawnDomain::Air => FIRECRACKER_AIR_Y,
        }
    }
}

/// The translucent telegraph shown above a firecracker before it arms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WarningMarker {
    pub position: Vec2,
    pub alpha: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Firecracker {
    config: FirecrackerConfig,
    base_y: f32,
    warning: Option<WarningMarker>,
    revealed: bool,
}

impl Firecracker {
    pub fn new(config: FirecrackerConfig, base_y: f32) -> Self {
        Self {
            config,
            base_y,
            warning: None,
            revealed: config.warning_ms <= 0.0,
        }
    }

    pub fn config(&self) -> &FirecrackerConfig {
        &self.config
    }

    pub fn warning(&self) -> Option<&WarningMarker> {
        self.warning.as_ref()
    }

    /// Whether the warning window is over.
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    fn bounces(&self) -> bool {
        self.config.pattern == MovePattern::Bounce && self.config.domain == SpawnDomain::Air
    }
}

impl ObstacleBehavior for Firecracker {
    fn on_spawn(&mut self, core: &mut ObstacleCore) {
        if self.revealed {
            return;
        }
        core.visible = false;
        core.body.enabled = false;
        self.warning = Some(WarningMarker {
            position: core.position + Vec2::new(0.0, WARNING_OFFSET_Y),
            alpha: WARNING_ALPHA,
        });
    }

    fn advance(&mut self, core: &mut ObstacleCore, now_ms: f64) {
        let elapsed = core.elapsed(now_ms);

        if !self.revealed {
            if elapsed >= self.config.warning_ms {
                self.revealed = true;
                self.warning = None;
                core.visible = true;
                core.body.enabled = true;
            } else if let Some(marker) = self.warning.as_mut() {
                marker.position = core.position + Vec2::new(0.0, WARNING_OFFSET_Y);
                let remaining = 1.0 - (elapsed / self.config.warning_ms).clamp(0.0, 1.0);
                marker.alpha = WARNING_ALPHA * remaining as f32;
            }
            return;
        }

        if self.bounces() {
            let wave = (elapsed * FIRECRACKER_BOUNCE_RATE).sin() as f32;
            core.position.y = self.base_y + wave * FIRECRACKER_BOUNCE_AMPLITUDE;
        }
    }

    fn on_release(&mut self, _core: &mut ObstacleCore) {
        self.warning = None;
    }
}
