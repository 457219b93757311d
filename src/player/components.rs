//! Player-related components.

use bevy::prelude::*;

use crate::combat::{DamageContext, DamageOutcome, Damageable, LivingEntity};
use super::shooter::GunConfig;
use crate::core::{
    AudioCue, DamageMessage, EffectKind, HudUpdate, Presentation, PresentationCue,
};

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

pub const PLAYER_CAPSULE_HALF_HEIGHT: f32 = 0.5;
pub const PLAYER_CAPSULE_RADIUS: f32 = 0.3;
/// Standing height of the player's collider, origin at its center.
pub const PLAYER_HEIGHT: f32 = 2.0 * (PLAYER_CAPSULE_HALF_HEIGHT + PLAYER_CAPSULE_RADIUS);

/// Animator trigger fired when the player dies.
pub const PLAYER_DIE_TRIGGER: &str = "Die";

/// Player health with hit feedback and HUD updates.
#[derive(Component, Debug, Clone)]
pub struct PlayerHealth {
    living: LivingEntity,
}

impl PlayerHealth {
    pub fn new(starting_health: f32) -> Self {
        Self {
            living: LivingEntity::new(starting_health),
        }
    }

    pub fn with_invulnerability_window(mut self, window: f32) -> Self {
        self.living = self.living.with_invulnerability_window(window);
        self
    }

    pub fn health(&self) -> f32 {
        self.living.health()
    }

    /// Fresh lifecycle on (re)activation; the HUD shows full health again.
    pub fn reactivate(&mut self, presentation: &mut dyn Presentation) {
        self.living.reset();
        self.publish_health(presentation);
    }

    fn publish_health(&self, presentation: &mut dyn Presentation) {
        let shown = if self.living.is_dead() {
            0.0
        } else {
            self.living.health()
        };
        presentation.cue(PresentationCue::Hud(HudUpdate::Health(shown)));
    }
}

impl Damageable for PlayerHealth {
    fn living(&self) -> &LivingEntity {
        &self.living
    }

    fn apply_damage(&mut self, message: &DamageMessage, ctx: &mut DamageContext) -> bool {
        let outcome = self.living.apply_damage(message, ctx.me, ctx.now);
        if !outcome.accepted() {
            return false;
        }

        ctx.presentation.cue(PresentationCue::Effect {
            kind: EffectKind::Flesh,
            position: message.hit_point,
            normal: message.hit_normal,
            parent: Some(ctx.me),
        });
        ctx.presentation.cue(PresentationCue::Audio {
            emitter: ctx.me,
            clip: AudioCue::PlayerHit,
        });

        if outcome == DamageOutcome::Killed {
            self.die(Some(message.damager), ctx);
        } else {
            self.publish_health(ctx.presentation);
        }

        true
    }

    fn restore_health(&mut self, amount: f32, ctx: &mut DamageContext) {
        self.living.restore_health(amount);
        self.publish_health(ctx.presentation);
    }

    fn die(&mut self, killed_by: Option<Entity>, ctx: &mut DamageContext) {
        self.living.die(ctx.me, killed_by, ctx.deaths);

        ctx.presentation.cue(PresentationCue::Audio {
            emitter: ctx.me,
            clip: AudioCue::PlayerDeath,
        });
        ctx.presentation.cue(PresentationCue::AnimationTrigger {
            entity: ctx.me,
            name: PLAYER_DIE_TRIGGER,
        });
        self.publish_health(ctx.presentation);
    }
}

/// Tracks player movement state for physics.
#[derive(Component)]
pub struct MovementState {
    pub is_grounded: bool,
    pub vertical_velocity: f32,
}

impl Default for MovementState {
    fn default() -> Self {
        Self {
            is_grounded: true,
            vertical_velocity: 0.0,
        }
    }
}

/// Configuration for the character controller.
#[derive(Resource)]
pub struct PlayerConfig {
    /// Base movement speed in units per second
    pub move_speed: f32,
    /// Turn rate toward the movement direction, in radians per second
    pub turn_speed: f32,
    /// Jump velocity
    pub jump_force: f32,
    /// Gravity acceleration
    pub gravity: f32,
    pub starting_health: f32,
    pub gun: GunConfig,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            turn_speed: 10.0,
            jump_force: 6.0,
            gravity: 15.0,
            starting_health: 100.0,
            gun: GunConfig::default(),
        }
    }
}
