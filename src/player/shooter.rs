//! Hitscan shooting: hip-fire aim, magazine and reload.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::{Player, PlayerHealth};
use super::input::PlayerInput;
use crate::combat::{ActorRoster, DamageContext, Damageable};
use crate::core::{
    DamageMessage, DeathEvent, EffectKind, HudUpdate, Presentation, PresentationCue,
};
use crate::enemies::{Enemy, Senses, Strike};
use crate::physics::RapierSpatialQuery;

/// Animator trigger for a fired round.
pub const SHOOT_TRIGGER: &str = "Shoot";
/// Animator trigger for the reload clip.
pub const RELOAD_TRIGGER: &str = "Reload";

/// Weapon tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct GunConfig {
    pub damage: f32,
    /// Hitscan range in metres
    pub fire_distance: f32,
    /// Minimum seconds between rounds
    pub time_between_fire: f32,
    pub reload_time: f32,
    pub magazine_capacity: u32,
    pub starting_reserve: u32,
    /// Muzzle height above the player origin
    pub muzzle_height: f32,
}

impl Default for GunConfig {
    fn default() -> Self {
        Self {
            damage: 25.0,
            fire_distance: 50.0,
            time_between_fire: 0.12,
            reload_time: 1.8,
            magazine_capacity: 25,
            starting_reserve: 100,
            muzzle_height: 0.4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AimState {
    #[default]
    Idle,
    HipFire,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GunState {
    Ready,
    Empty,
    Reloading,
}

/// Magazine, reserve and fire-rate bookkeeping.
#[derive(Debug, Clone)]
pub struct Gun {
    config: GunConfig,
    magazine: u32,
    reserve: u32,
    state: GunState,
    last_fire_time: Option<f32>,
    reload_finishes_at: f32,
}

impl Gun {
    pub fn new(config: GunConfig) -> Self {
        let magazine = config.magazine_capacity;
        let reserve = config.starting_reserve;
        Self {
            config,
            magazine,
            reserve,
            state: if magazine > 0 {
                GunState::Ready
            } else {
                GunState::Empty
            },
            last_fire_time: None,
            reload_finishes_at: 0.0,
        }
    }

    pub fn config(&self) -> &GunConfig {
        &self.config
    }

    pub fn magazine(&self) -> u32 {
        self.magazine
    }

    pub fn reserve(&self) -> u32 {
        self.reserve
    }

    pub fn state(&self) -> GunState {
        self.state
    }

    /// Spend one round if the gun is ready and the fire interval has passed.
    pub fn try_fire(&mut self, now: f32) -> bool {
        if self.state != GunState::Ready {
            return false;
        }
        if self
            .last_fire_time
            .is_some_and(|last| now - last < self.config.time_between_fire)
        {
            return false;
        }

        self.last_fire_time = Some(now);
        self.magazine -= 1;
        if self.magazine == 0 {
            self.state = GunState::Empty;
        }
        true
    }

    /// Start reloading. Refused while reloading, with a full magazine or no reserve.
    pub fn start_reload(&mut self, now: f32) -> bool {
        if self.state == GunState::Reloading
            || self.reserve == 0
            || self.magazine >= self.config.magazine_capacity
        {
            return false;
        }

        self.state = GunState::Reloading;
        self.reload_finishes_at = now + self.config.reload_time;
        true
    }

    /// Finish a due reload; returns true when the magazine was refilled.
    pub fn update(&mut self, now: f32) -> bool {
        if self.state != GunState::Reloading || now < self.reload_finishes_at {
            return false;
        }

        let refill = (self.config.magazine_capacity - self.magazine).min(self.reserve);
        self.magazine += refill;
        self.reserve -= refill;
        self.state = GunState::Ready;
        true
    }
}

/// Player weapon handling. The first fire input raises the weapon; rounds
/// leave from the following steps while the trigger stays held.
#[derive(Component, Debug, Clone)]
pub struct PlayerShooter {
    aim: AimState,
    gun: Gun,
    last_fire_input: f32,
    /// Seconds without fire input before the weapon is lowered
    pub aim_release_delay: f32,
}

impl PlayerShooter {
    pub fn new(config: GunConfig) -> Self {
        Self {
            aim: AimState::Idle,
            gun: Gun::new(config),
            last_fire_input: 0.0,
            aim_release_delay: 2.5,
        }
    }

    pub fn aim(&self) -> AimState {
        self.aim
    }

    pub fn gun(&self) -> &Gun {
        &self.gun
    }

    pub fn publish_ammo(&self, presentation: &mut dyn Presentation) {
        presentation.cue(PresentationCue::Hud(HudUpdate::Ammo {
            magazine: self.gun.magazine(),
            reserve: self.gun.reserve(),
        }));
    }

    /// One input step. Returns a strike when a round hits a living actor;
    /// other surfaces get a common hit effect.
    #[allow(clippy::too_many_arguments)]
    pub fn step(
        &mut self,
        me: Entity,
        input: &PlayerInput,
        origin: Vec3,
        direction: Vec3,
        now: f32,
        senses: &Senses,
        presentation: &mut dyn Presentation,
    ) -> Option<Strike> {
        if self.gun.update(now) {
            self.publish_ammo(presentation);
        }

        if input.fire {
            self.last_fire_input = now;
            return self.shoot(me, origin, direction, now, senses, presentation);
        }

        if input.reload && self.gun.start_reload(now) {
            presentation.cue(PresentationCue::AnimationTrigger {
                entity: me,
                name: RELOAD_TRIGGER,
            });
        }

        if self.aim == AimState::HipFire && now - self.last_fire_input >= self.aim_release_delay {
            self.aim = AimState::Idle;
        }
        None
    }

    fn shoot(
        &mut self,
        me: Entity,
        origin: Vec3,
        direction: Vec3,
        now: f32,
        senses: &Senses,
        presentation: &mut dyn Presentation,
    ) -> Option<Strike> {
        if self.aim == AimState::Idle {
            self.aim = AimState::HipFire;
            return None;
        }
        if !self.gun.try_fire(now) {
            return None;
        }

        presentation.cue(PresentationCue::AnimationTrigger {
            entity: me,
            name: SHOOT_TRIGGER,
        });
        self.publish_ammo(presentation);

        let hit = senses.world.raycast(
            origin,
            direction,
            self.gun.config().fire_distance,
            Some(me),
        )?;

        match senses.actors.snapshot(hit.entity) {
            Some(actor) if actor.damageable => actor.alive.then(|| Strike {
                victim: hit.entity,
                message: DamageMessage::new(
                    self.gun.config().damage,
                    me,
                    hit.point,
                    hit.normal,
                ),
            }),
            _ => {
                presentation.cue(PresentationCue::Effect {
                    kind: EffectKind::Common,
                    position: hit.point,
                    normal: hit.normal,
                    parent: None,
                });
                None
            }
        }
    }
}

/// Fire and reload from the player's input; rounds travel along its facing.
#[allow(clippy::too_many_arguments)]
pub fn player_shooting(
    time: Res<Time>,
    mut roster: ResMut<ActorRoster>,
    rapier_context: Query<&RapierContext>,
    mut cues: EventWriter<PresentationCue>,
    mut deaths: EventWriter<DeathEvent>,
    mut shooters: Query<
        (Entity, &Transform, &PlayerInput, &PlayerHealth, &mut PlayerShooter),
        With<Player>,
    >,
    mut enemies: Query<&mut Enemy, Without<Player>>,
) {
    let Ok(context) = rapier_context.get_single() else {
        return;
    };
    let world = RapierSpatialQuery::new(context);
    let now = time.elapsed_secs();

    let mut strikes = Vec::new();
    {
        let senses = Senses {
            world: &world,
            actors: &*roster,
        };
        for (entity, transform, input, health, mut shooter) in shooters.iter_mut() {
            if health.is_dead() {
                continue;
            }
            let origin = transform.translation + Vec3::Y * shooter.gun().config().muzzle_height;
            let direction = transform.forward().as_vec3();
            if let Some(strike) =
                shooter.step(entity, input, origin, direction, now, &senses, &mut cues)
            {
                strikes.push(strike);
            }
        }
    }

    for strike in strikes {
        let Ok(mut victim) = enemies.get_mut(strike.victim) else {
            continue;
        };
        let mut ctx = DamageContext {
            me: strike.victim,
            now,
            presentation: &mut cues,
            deaths: &mut deaths,
        };
        if victim.apply_damage(&strike.message, &mut ctx) && victim.is_dead() {
            roster.mark_dead(strike.victim);
        }
    }
}
