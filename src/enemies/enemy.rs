//! The enemy actor: health lifecycle plus combat state.

use bevy::prelude::*;
use std::collections::HashSet;

use super::components::{EnemyRig, EnemySetup, EnemyState, EnemyStats};
use crate::combat::{DamageContext, DamageOutcome, Damageable, LivingEntity};
use crate::core::{
    ActorLookup, AudioCue, DamageMessage, EffectKind, Navigation, Presentation,
    PresentationCue, TargetLayer,
};

/// Animator trigger fired when the attack wind-up starts.
pub const ATTACK_TRIGGER: &str = "Attack";
/// Animator trigger fired on death.
pub const DIE_TRIGGER: &str = "Die";
/// Animator float fed with the agent's desired speed every frame.
pub const SPEED_PARAMETER: &str = "Speed";

/// Hostile melee actor.
///
/// Owns its health, tuning and combat state. Everything it needs from the
/// outside world comes in through the host traits, so the whole state machine
/// runs in plain unit tests.
#[derive(Component, Debug, Clone)]
pub struct Enemy {
    pub(super) living: LivingEntity,
    pub(super) stats: EnemyStats,
    pub(super) rig: EnemyRig,
    pub(super) state: EnemyState,
    pub(super) target: Option<Entity>,
    pub(super) target_layer: TargetLayer,
    /// Victims already struck during the current attack window
    pub(super) last_attacked_targets: HashSet<Entity>,
    pub(super) turn_velocity: f32,
}

impl Enemy {
    pub fn new(stats: EnemyStats, rig: EnemyRig, starting_health: f32) -> Self {
        Self {
            living: LivingEntity::new(starting_health),
            stats,
            rig,
            state: EnemyState::Patrol,
            target: None,
            target_layer: TargetLayer::Player,
            last_attacked_targets: HashSet::new(),
            turn_velocity: 0.0,
        }
    }

    pub fn with_target_layer(mut self, layer: TargetLayer) -> Self {
        self.target_layer = layer;
        self
    }

    pub fn with_invulnerability_window(mut self, window: f32) -> Self {
        self.living = self.living.with_invulnerability_window(window);
        self
    }

    pub fn state(&self) -> EnemyState {
        self.state
    }

    pub fn target(&self) -> Option<Entity> {
        self.target
    }

    pub fn stats(&self) -> &EnemyStats {
        &self.stats
    }

    pub fn rig(&self) -> &EnemyRig {
        &self.rig
    }

    pub fn target_layer(&self) -> TargetLayer {
        self.target_layer
    }

    /// How close the target must be for an attack to start.
    pub fn attack_distance(&self) -> f32 {
        self.rig.attack_root_offset.length() + self.stats.attack_radius
    }

    pub fn eye_point(&self, transform: &Transform) -> Vec3 {
        transform.transform_point(self.rig.eye_offset)
    }

    pub fn eye_forward(&self, transform: &Transform) -> Vec3 {
        transform.forward().as_vec3()
    }

    pub fn attack_root(&self, transform: &Transform) -> Vec3 {
        transform.transform_point(self.rig.attack_root_offset)
    }

    /// Holding a target that is still a live damageable actor.
    pub fn has_target(&self, actors: &dyn ActorLookup) -> bool {
        self.target.is_some_and(|target| actors.is_alive(target))
    }

    pub fn has_struck(&self, victim: Entity) -> bool {
        self.last_attacked_targets.contains(&victim)
    }

    /// Apply spawner parameters. Only meaningful before activation.
    pub fn setup(&mut self, setup: &EnemySetup, nav: &mut dyn Navigation) {
        self.living.set_starting_health(setup.health);
        self.stats.damage = setup.damage;
        self.stats.run_speed = setup.run_speed;
        self.stats.patrol_speed = setup.patrol_speed;
        nav.set_speed(self.stats.patrol_speed);
    }

    /// Fresh lifecycle: full health, patrolling, no target.
    pub fn activate(&mut self, nav: &mut dyn Navigation) {
        self.living.reset();
        self.state = EnemyState::Patrol;
        self.target = None;
        self.last_attacked_targets.clear();
        self.turn_velocity = 0.0;

        nav.set_stopping_distance(self.attack_distance());
        nav.set_speed(self.stats.patrol_speed);
        nav.resume();
    }

    /// Leave any combat state for Patrol at patrol speed.
    pub(super) fn return_to_patrol(&mut self, nav: &mut dyn Navigation) {
        if self.state != EnemyState::Patrol {
            self.state = EnemyState::Patrol;
            nav.set_speed(self.stats.patrol_speed);
            nav.resume();
        }
    }
}

impl Damageable for Enemy {
    fn living(&self) -> &LivingEntity {
        &self.living
    }

    fn apply_damage(&mut self, message: &DamageMessage, ctx: &mut DamageContext) -> bool {
        let outcome = self.living.apply_damage(message, ctx.me, ctx.now);
        if !outcome.accepted() {
            return false;
        }

        // Retaliate against whoever hurt us if we were not already chasing someone
        if self.target.is_none() {
            self.target = Some(message.damager);
        }

        ctx.presentation.cue(PresentationCue::Effect {
            kind: EffectKind::Flesh,
            position: message.hit_point,
            normal: message.hit_normal,
            parent: Some(ctx.me),
        });
        ctx.presentation.cue(PresentationCue::Audio {
            emitter: ctx.me,
            clip: AudioCue::EnemyHit,
        });

        if outcome == DamageOutcome::Killed {
            self.die(Some(message.damager), ctx);
        }

        true
    }

    fn restore_health(&mut self, amount: f32, _ctx: &mut DamageContext) {
        self.living.restore_health(amount);
    }

    fn die(&mut self, killed_by: Option<Entity>, ctx: &mut DamageContext) {
        self.living.die(ctx.me, killed_by, ctx.deaths);

        ctx.presentation.cue(PresentationCue::RootMotion {
            entity: ctx.me,
            enabled: true,
        });
        ctx.presentation.cue(PresentationCue::AnimationTrigger {
            entity: ctx.me,
            name: DIE_TRIGGER,
        });
        ctx.presentation.cue(PresentationCue::Audio {
            emitter: ctx.me,
            clip: AudioCue::EnemyDeath,
        });
    }
}
