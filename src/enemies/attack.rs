//! Melee attack: wind-up, facing and the swept damage volume.

use bevy::prelude::*;

use super::components::EnemyState;
use super::enemy::{Enemy, ATTACK_TRIGGER, SPEED_PARAMETER};
use super::perception::Senses;
use crate::core::{
    smooth_damp_angle, yaw_towards, ActorLookup, DamageMessage, Navigation, Presentation,
    PresentationCue,
};

/// A hit the attacker has committed to. Applied to the victim afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strike {
    pub victim: Entity,
    pub message: DamageMessage,
}

impl Enemy {
    /// Per-frame check: start the attack once the target is close enough.
    ///
    /// Reach is measured on the ground plane, like the navigation stopping distance.
    pub fn update_frame(
        &mut self,
        me: Entity,
        transform: &Transform,
        nav: &mut dyn Navigation,
        actors: &dyn ActorLookup,
        presentation: &mut dyn Presentation,
    ) {
        if self.living.is_dead() {
            return;
        }

        if self.state == EnemyState::Tracking {
            let in_range = self
                .target
                .and_then(|target| actors.snapshot(target))
                .is_some_and(|actor| {
                    let offset = actor.position - transform.translation;
                    Vec2::new(offset.x, offset.z).length() <= self.attack_distance()
                });

            if in_range {
                self.begin_attack(me, nav, presentation);
            }
        }

        presentation.cue(PresentationCue::AnimationFloat {
            entity: me,
            name: SPEED_PARAMETER,
            value: nav.desired_velocity().length(),
        });
    }

    /// Halt and play the wind-up. Damage starts with [`Enemy::enable_attack`].
    pub fn begin_attack(
        &mut self,
        me: Entity,
        nav: &mut dyn Navigation,
        presentation: &mut dyn Presentation,
    ) {
        self.state = EnemyState::AttackBegin;
        nav.stop();
        presentation.cue(PresentationCue::AnimationTrigger {
            entity: me,
            name: ATTACK_TRIGGER,
        });
    }

    /// Animation event: the damage window opens. Returns false if ignored.
    pub fn enable_attack(&mut self) -> bool {
        if self.living.is_dead() || self.target.is_none() {
            return false;
        }

        self.state = EnemyState::Attacking;
        self.last_attacked_targets.clear();
        true
    }

    /// Animation event: the damage window closes.
    pub fn disable_attack(&mut self, nav: &mut dyn Navigation, actors: &dyn ActorLookup) {
        if self.living.is_dead() {
            return;
        }

        if self.has_target(actors) {
            self.state = EnemyState::Tracking;
            nav.set_speed(self.stats.run_speed);
        } else {
            self.state = EnemyState::Patrol;
            nav.set_speed(self.stats.patrol_speed);
        }
        nav.resume();
    }

    /// Fixed-step update: turn toward the target and sweep the attack volume.
    ///
    /// At most one victim is struck per step, and each victim at most once per
    /// attack window.
    pub fn physics_step(
        &mut self,
        me: Entity,
        transform: &mut Transform,
        nav: &dyn Navigation,
        senses: &Senses,
        delta: f32,
    ) -> Option<Strike> {
        if self.living.is_dead() {
            return None;
        }

        if matches!(self.state, EnemyState::AttackBegin | EnemyState::Attacking) {
            self.face_target(transform, senses.actors, delta);
        }

        if self.state == EnemyState::Attacking {
            return self.sweep_attack(me, transform, nav, senses, delta);
        }

        None
    }

    fn face_target(&mut self, transform: &mut Transform, actors: &dyn ActorLookup, delta: f32) {
        let Some(actor) = self.target.and_then(|target| actors.snapshot(target)) else {
            return;
        };
        let Some(target_yaw) = yaw_towards(actor.position - transform.translation) else {
            return;
        };

        let (current_yaw, _, _) = transform.rotation.to_euler(EulerRot::YXZ);
        let yaw = smooth_damp_angle(
            current_yaw,
            target_yaw,
            &mut self.turn_velocity,
            self.stats.turn_smooth_time,
            delta,
        );
        transform.rotation = Quat::from_rotation_y(yaw);
    }

    fn sweep_attack(
        &mut self,
        me: Entity,
        transform: &Transform,
        nav: &dyn Navigation,
        senses: &Senses,
        delta: f32,
    ) -> Option<Strike> {
        let origin = self.attack_root(transform);
        let direction = transform.forward().as_vec3();
        let distance = nav.velocity().length() * delta;

        let hits = senses.world.sweep_sphere(
            origin,
            self.stats.attack_radius,
            direction,
            distance,
            self.target_layer,
            Some(me),
        );

        let hit = hits.into_iter().find(|hit| {
            let damageable = senses
                .actors
                .snapshot(hit.entity)
                .is_some_and(|actor| actor.damageable);
            damageable && !self.has_struck(hit.entity)
        })?;

        // Already overlapping at the start of the sweep: no meaningful contact point
        let hit_point = if hit.distance <= 0.0 { origin } else { hit.point };

        self.last_attacked_targets.insert(hit.entity);
        Some(Strike {
            victim: hit.entity,
            message: DamageMessage::new(self.stats.damage, me, hit_point, hit.normal),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SweepHit;
    use crate::enemies::testing::{MockActors, MockNavigation, MockWorld};
    use crate::enemies::{EnemyRig, EnemyStats};
    use approx::assert_relative_eq;

    const ME: Entity = Entity::from_raw(1);
    const PLAYER: Entity = Entity::from_raw(2);
    const OTHER: Entity = Entity::from_raw(3);
    const CRATE: Entity = Entity::from_raw(4);

    fn enemy() -> Enemy {
        let rig = EnemyRig {
            eye_offset: Vec3::new(0.0, 1.6, 0.0),
            attack_root_offset: Vec3::new(0.0, 1.0, -1.0),
        };
        Enemy::new(EnemyStats::default(), rig, 100.0)
    }

    fn sweep_hit(entity: Entity, distance: f32) -> SweepHit {
        SweepHit {
            entity,
            point: Vec3::new(0.0, 1.0, -2.5),
            normal: Vec3::Z,
            distance,
        }
    }

    fn attacking(target: Entity) -> Enemy {
        let mut enemy = enemy();
        enemy.target = Some(target);
        enemy.state = EnemyState::AttackBegin;
        assert!(enemy.enable_attack());
        enemy
    }

    fn step(enemy: &mut Enemy, world: &MockWorld, actors: &MockActors) -> Option<Strike> {
        let nav = MockNavigation {
            actual: Vec3::new(0.0, 0.0, -1.0),
            ..default()
        };
        let senses = Senses { world, actors };
        let mut transform = Transform::IDENTITY;
        enemy.physics_step(ME, &mut transform, &nav, &senses, 0.02)
    }

    #[test]
    fn target_in_range_starts_wind_up() {
        let mut enemy = enemy();
        enemy.target = Some(PLAYER);
        enemy.state = EnemyState::Tracking;
        let mut nav = MockNavigation {
            desired: Vec3::new(3.0, 0.0, 4.0),
            ..default()
        };
        let actors = MockActors::default().with(PLAYER, Vec3::new(0.0, 0.0, -2.0));
        let mut cues: Vec<PresentationCue> = Vec::new();

        enemy.update_frame(ME, &Transform::IDENTITY, &mut nav, &actors, &mut cues);

        assert_eq!(enemy.state(), EnemyState::AttackBegin);
        assert!(nav.stopped);
        assert_eq!(
            cues,
            vec![
                PresentationCue::AnimationTrigger {
                    entity: ME,
                    name: ATTACK_TRIGGER
                },
                PresentationCue::AnimationFloat {
                    entity: ME,
                    name: SPEED_PARAMETER,
                    value: 5.0
                },
            ]
        );
    }

    #[test]
    fn reach_ignores_target_height() {
        let mut enemy = enemy();
        enemy.target = Some(PLAYER);
        enemy.state = EnemyState::Tracking;
        let mut nav = MockNavigation::default();
        // 3.35 m away on the ground, 3.44 m in space; reach is about 3.41 m
        let actors = MockActors::default().with(PLAYER, Vec3::new(0.0, 0.8, -3.35));
        let mut cues: Vec<PresentationCue> = Vec::new();

        enemy.update_frame(ME, &Transform::IDENTITY, &mut nav, &actors, &mut cues);

        assert_eq!(enemy.state(), EnemyState::AttackBegin);
    }

    #[test]
    fn target_out_of_range_keeps_tracking() {
        let mut enemy = enemy();
        enemy.target = Some(PLAYER);
        enemy.state = EnemyState::Tracking;
        let mut nav = MockNavigation::default();
        let actors = MockActors::default().with(PLAYER, Vec3::new(0.0, 0.0, -9.0));
        let mut cues: Vec<PresentationCue> = Vec::new();

        enemy.update_frame(ME, &Transform::IDENTITY, &mut nav, &actors, &mut cues);

        assert_eq!(enemy.state(), EnemyState::Tracking);
        assert!(!nav.stopped);
    }

    #[test]
    fn victim_struck_once_per_attack_window() {
        let mut enemy = attacking(PLAYER);
        let world = MockWorld {
            sweeps: vec![sweep_hit(PLAYER, 0.1)],
            ..default()
        };
        let actors = MockActors::default().with(PLAYER, Vec3::new(0.0, 0.0, -2.0));

        let strike = step(&mut enemy, &world, &actors).expect("first step strikes");
        assert_eq!(strike.victim, PLAYER);
        assert_eq!(strike.message.amount, 30.0);
        assert_eq!(strike.message.damager, ME);

        for _ in 0..10 {
            assert_eq!(step(&mut enemy, &world, &actors), None);
        }

        // A new window strikes again
        assert!(enemy.enable_attack());
        assert!(step(&mut enemy, &world, &actors).is_some());
    }

    #[test]
    fn one_victim_per_step() {
        let mut enemy = attacking(PLAYER);
        let world = MockWorld {
            sweeps: vec![sweep_hit(PLAYER, 0.1), sweep_hit(OTHER, 0.2)],
            ..default()
        };
        let actors = MockActors::default()
            .with(PLAYER, Vec3::new(0.0, 0.0, -2.0))
            .with(OTHER, Vec3::new(0.5, 0.0, -2.0));

        assert_eq!(step(&mut enemy, &world, &actors).map(|s| s.victim), Some(PLAYER));
        assert_eq!(step(&mut enemy, &world, &actors).map(|s| s.victim), Some(OTHER));
        assert_eq!(step(&mut enemy, &world, &actors), None);
    }

    #[test]
    fn non_damageable_hits_are_skipped() {
        let mut enemy = attacking(PLAYER);
        let world = MockWorld {
            sweeps: vec![sweep_hit(CRATE, 0.05), sweep_hit(PLAYER, 0.1)],
            ..default()
        };
        let actors = MockActors::default()
            .with_prop(CRATE, Vec3::new(0.0, 0.0, -1.5))
            .with(PLAYER, Vec3::new(0.0, 0.0, -2.0));

        assert_eq!(step(&mut enemy, &world, &actors).map(|s| s.victim), Some(PLAYER));
    }

    #[test]
    fn initial_overlap_reports_attack_root() {
        let mut enemy = attacking(PLAYER);
        let world = MockWorld {
            sweeps: vec![sweep_hit(PLAYER, 0.0)],
            ..default()
        };
        let actors = MockActors::default().with(PLAYER, Vec3::new(0.0, 0.0, -2.0));

        let strike = step(&mut enemy, &world, &actors).expect("overlap strikes");
        assert_eq!(strike.message.hit_point, Vec3::new(0.0, 1.0, -1.0));
        assert_eq!(strike.message.hit_normal, Vec3::Z);
    }

    #[test]
    fn wind_up_does_not_strike() {
        let mut enemy = enemy();
        enemy.target = Some(PLAYER);
        enemy.state = EnemyState::AttackBegin;
        let world = MockWorld {
            sweeps: vec![sweep_hit(PLAYER, 0.0)],
            ..default()
        };
        let actors = MockActors::default().with(PLAYER, Vec3::new(0.0, 0.0, -2.0));

        assert_eq!(step(&mut enemy, &world, &actors), None);
    }

    #[test]
    fn enable_attack_without_target_is_ignored() {
        let mut enemy = enemy();
        enemy.state = EnemyState::Patrol;

        assert!(!enemy.enable_attack());
        assert_eq!(enemy.state(), EnemyState::Patrol);
    }

    #[test]
    fn disable_attack_returns_to_tracking_or_patrol() {
        let mut nav = MockNavigation {
            stopped: true,
            ..default()
        };
        let mut actors = MockActors::default().with(PLAYER, Vec3::new(0.0, 0.0, -2.0));

        let mut enemy = attacking(PLAYER);
        enemy.disable_attack(&mut nav, &actors);
        assert_eq!(enemy.state(), EnemyState::Tracking);
        assert!(!nav.stopped);
        assert_eq!(nav.speed, enemy.stats().run_speed);

        actors.kill(PLAYER);
        let mut enemy = attacking(PLAYER);
        nav.stopped = true;
        enemy.disable_attack(&mut nav, &actors);
        assert_eq!(enemy.state(), EnemyState::Patrol);
        assert!(!nav.stopped);
        assert_eq!(nav.speed, enemy.stats().patrol_speed);
    }

    #[test]
    fn turns_toward_target_while_attacking() {
        let mut enemy = attacking(PLAYER);
        // Target directly to the right (+X); forward starts at -Z
        let actors = MockActors::default().with(PLAYER, Vec3::new(5.0, 0.0, 0.0));
        let world = MockWorld::default();
        let nav = MockNavigation::default();
        let senses = Senses {
            world: &world,
            actors: &actors,
        };
        let mut transform = Transform::IDENTITY;

        for _ in 0..100 {
            enemy.physics_step(ME, &mut transform, &nav, &senses, 0.02);
        }

        let forward = transform.forward().as_vec3();
        assert_relative_eq!(forward.x, 1.0, epsilon = 1e-3);
        assert_relative_eq!(forward.z, 0.0, epsilon = 1e-3);
    }
}
