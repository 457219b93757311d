//! Periodic target acquisition and path updates.

use bevy::prelude::*;
use rand::RngCore;

use super::components::EnemyState;
use super::enemy::Enemy;
use crate::core::{ActorLookup, GameplayConfig, Navigation, SpatialQuery};

/// Degrees of slack at the edge of the view cone, absorbing rounding.
const VIEW_CONE_EDGE: f32 = 1e-3;

/// Read-only view of the world the enemy senses through.
pub struct Senses<'a> {
    pub world: &'a dyn SpatialQuery,
    pub actors: &'a dyn ActorLookup,
}

/// What one perception cycle concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Perception {
    /// Actor is dead; the task should stop
    Dormant,
    /// Kept chasing an already held target
    Chasing(Entity),
    /// Spotted a new target this cycle
    Acquired(Entity),
    /// Nothing in sight
    Searching,
}

impl Enemy {
    /// One perception cycle: chase the held target or patrol and look around.
    pub fn perceive(
        &mut self,
        me: Entity,
        transform: &Transform,
        nav: &mut dyn Navigation,
        senses: &Senses,
        rng: &mut dyn RngCore,
        config: &GameplayConfig,
    ) -> Perception {
        if self.living.is_dead() {
            return Perception::Dormant;
        }

        if let Some(target) = self.live_target(senses.actors) {
            self.chase(target, nav, senses.actors);
            return Perception::Chasing(target);
        }

        self.target = None;
        self.return_to_patrol(nav);

        if nav.remaining_distance() <= config.patrol_repath_distance {
            if let Some(point) =
                nav.sample_reachable_point(transform.translation, config.patrol_radius, rng)
            {
                nav.set_destination(point);
            }
        }

        let Some(target) = self.scan_for_target(me, transform, senses) else {
            return Perception::Searching;
        };

        self.target = Some(target);
        self.chase(target, nav, senses.actors);
        Perception::Acquired(target)
    }

    /// Whether `target` lies inside the view cone with a clear line from the eye.
    pub fn is_target_on_sight(
        &self,
        me: Entity,
        transform: &Transform,
        target: Entity,
        senses: &Senses,
    ) -> bool {
        let Some(actor) = senses.actors.snapshot(target) else {
            return false;
        };

        let eye = self.eye_point(transform);
        let forward = self.eye_forward(transform);

        // Compare on the eye's own pitch so height differences do not matter
        let mut direction = actor.position - eye;
        direction.y = forward.y;

        let Some(direction) = direction.try_normalize() else {
            return false;
        };
        // The edge itself counts as inside the cone
        let half_fov = self.stats.field_of_view * 0.5;
        if direction.angle_between(forward).to_degrees() > half_fov + VIEW_CONE_EDGE {
            return false;
        }

        senses
            .world
            .raycast(eye, direction, self.stats.view_distance, Some(me))
            .is_some_and(|hit| hit.entity == target)
    }

    fn live_target(&self, actors: &dyn ActorLookup) -> Option<Entity> {
        self.target.filter(|target| actors.is_alive(*target))
    }

    fn chase(&mut self, target: Entity, nav: &mut dyn Navigation, actors: &dyn ActorLookup) {
        if self.state == EnemyState::Patrol {
            self.state = EnemyState::Tracking;
            nav.set_speed(self.stats.run_speed);
        }

        if let Some(actor) = actors.snapshot(target) {
            nav.set_destination(actor.position);
        }
    }

    fn scan_for_target(&self, me: Entity, transform: &Transform, senses: &Senses) -> Option<Entity> {
        let eye = self.eye_point(transform);

        senses
            .world
            .overlap_sphere(eye, self.stats.view_distance, self.target_layer, Some(me))
            .into_iter()
            .find(|candidate| {
                self.is_target_on_sight(me, transform, *candidate, senses)
                    && senses.actors.is_alive(*candidate)
            })
    }
}
