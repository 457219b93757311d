//! Shared health/damage/death lifecycle.
//!
//! `LivingEntity` is the helper every damageable variant embeds. Variants
//! (`PlayerHealth`, `Enemy`) implement [`Damageable`], delegate to the helper
//! first and layer their presentation on top only when the helper accepts.

use bevy::prelude::*;

use crate::core::{DamageMessage, DeathEvent, Presentation};

/// Default post-hit invulnerability window in seconds.
pub const INVULNERABILITY_WINDOW: f32 = 0.1;

/// Why a hit was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Still inside the post-hit invulnerability window
    Invulnerable,
    /// The damager is the victim itself
    SelfInflicted,
    AlreadyDead,
}

/// Result of feeding a hit through the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    Rejected(Rejection),
    Wounded,
    /// Health reached zero; the caller must run the death path
    Killed,
}

impl DamageOutcome {
    pub fn accepted(self) -> bool {
        !matches!(self, Self::Rejected(_))
    }
}

/// Receives death broadcasts. Runs before the dying actor is flagged dead.
pub trait DeathObserver {
    fn on_death(&mut self, event: DeathEvent, dying: &LivingEntity);
}

impl DeathObserver for EventWriter<'_, DeathEvent> {
    fn on_death(&mut self, event: DeathEvent, _dying: &LivingEntity) {
        self.send(event);
    }
}

impl DeathObserver for Vec<DeathEvent> {
    fn on_death(&mut self, event: DeathEvent, _dying: &LivingEntity) {
        self.push(event);
    }
}

/// Health state of one damageable actor.
#[derive(Debug, Clone, PartialEq)]
pub struct LivingEntity {
    starting_health: f32,
    health: f32,
    dead: bool,
    last_damaged_at: Option<f32>,
    invulnerability_window: f32,
}

impl LivingEntity {
    pub fn new(starting_health: f32) -> Self {
        Self {
            starting_health,
            health: starting_health,
            dead: false,
            last_damaged_at: None,
            invulnerability_window: INVULNERABILITY_WINDOW,
        }
    }

    pub fn with_invulnerability_window(mut self, window: f32) -> Self {
        self.invulnerability_window = window;
        self
    }

    pub fn starting_health(&self) -> f32 {
        self.starting_health
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Whether a hit at `now` would bounce off the invulnerability window.
    /// A hit exactly `window` seconds after the last one is accepted.
    pub fn is_invulnerable(&self, now: f32) -> bool {
        self.last_damaged_at
            .is_some_and(|last| now < last + self.invulnerability_window)
    }

    /// Re-parameterize before activation. Resets current health too.
    pub fn set_starting_health(&mut self, health: f32) {
        self.starting_health = health;
        self.health = health;
    }

    /// Fresh lifecycle: full health, alive, no invulnerability.
    pub fn reset(&mut self) {
        self.health = self.starting_health;
        self.dead = false;
        self.last_damaged_at = None;
    }

    /// Accept or reject a hit against the actor `me` at simulated time `now`.
    pub fn apply_damage(&mut self, message: &DamageMessage, me: Entity, now: f32) -> DamageOutcome {
        if self.is_invulnerable(now) {
            return DamageOutcome::Rejected(Rejection::Invulnerable);
        }
        if message.damager == me {
            return DamageOutcome::Rejected(Rejection::SelfInflicted);
        }
        if self.dead {
            return DamageOutcome::Rejected(Rejection::AlreadyDead);
        }

        self.last_damaged_at = Some(now);
        self.health -= message.amount;

        if self.health <= 0.0 {
            DamageOutcome::Killed
        } else {
            DamageOutcome::Wounded
        }
    }

    /// Add health. No upper clamp: overheal above the starting value stays.
    pub fn restore_health(&mut self, amount: f32) {
        if self.dead {
            return;
        }

        self.health += amount;
    }

    /// Broadcast the death, then flag the actor dead.
    ///
    /// Not guarded against repeated calls; variants only call it from the
    /// hit that first drives health to zero.
    pub fn die(&mut self, me: Entity, killed_by: Option<Entity>, observer: &mut dyn DeathObserver) {
        observer.on_death(
            DeathEvent {
                entity: me,
                killed_by,
            },
            self,
        );
        self.dead = true;
    }
}

/// Everything a damageable actor needs while handling a hit.
pub struct DamageContext<'a> {
    /// Entity id of the actor being damaged
    pub me: Entity,
    /// Simulated seconds since startup
    pub now: f32,
    pub presentation: &'a mut dyn Presentation,
    pub deaths: &'a mut dyn DeathObserver,
}

/// Capability shared by every actor that can be hurt.
pub trait Damageable {
    fn living(&self) -> &LivingEntity;

    /// Returns true iff the hit was accepted (whether or not it killed).
    fn apply_damage(&mut self, message: &DamageMessage, ctx: &mut DamageContext) -> bool;

    fn restore_health(&mut self, amount: f32, ctx: &mut DamageContext);

    fn die(&mut self, killed_by: Option<Entity>, ctx: &mut DamageContext);

    fn is_dead(&self) -> bool {
        self.living().is_dead()
    }
}
