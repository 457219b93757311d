//! Global events used for cross-system communication.
//!
//! Damage itself is a direct call between actors (see `combat`); these
//! events carry what happens *around* a hit: deaths, inbound animation
//! notifications and fire-and-forget presentation cues.

use bevy::prelude::*;

/// One damage event. Built by the attacker, consumed by value by the victim.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageMessage {
    /// Damage to subtract from the victim's health
    pub amount: f32,
    /// Actor that dealt the hit
    pub damager: Entity,
    /// World-space contact point
    pub hit_point: Vec3,
    /// World-space contact normal
    pub hit_normal: Vec3,
}

impl DamageMessage {
    pub fn new(amount: f32, damager: Entity, hit_point: Vec3, hit_normal: Vec3) -> Self {
        Self {
            amount,
            damager,
            hit_point,
            hit_normal,
        }
    }
}

/// Sent when an actor dies (health reaches 0).
///
/// Observers see the dying actor while it is still flagged alive; the
/// `dead` flag flips right after the broadcast.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeathEvent {
    /// Actor that died
    pub entity: Entity,
    /// Actor that dealt the killing hit (if any)
    pub killed_by: Option<Entity>,
}

/// Inbound notifications from the host animation system.
///
/// The attack clip opens and closes the damage window at authored frames;
/// only "Enable precedes the matching Disable" is assumed.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackAnimationEvent {
    Enable(Entity),
    Disable(Entity),
}
