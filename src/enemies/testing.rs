//! Hand-written host fakes for exercising enemy logic without an App.

use bevy::prelude::*;
use rand::RngCore;
use std::collections::HashMap;

use crate::core::{
    ActorLookup, ActorSnapshot, Navigation, RayHit, SpatialQuery, SweepHit, TargetLayer,
};

#[derive(Debug, Default)]
pub struct MockNavigation {
    pub destination: Option<Vec3>,
    pub destinations: Vec<Vec3>,
    pub remaining: f32,
    pub desired: Vec3,
    pub actual: Vec3,
    pub speed: f32,
    pub stopping_distance: f32,
    pub stopped: bool,
    pub disabled: bool,
    pub sample: Option<Vec3>,
}

impl Navigation for MockNavigation {
    fn set_destination(&mut self, point: Vec3) {
        self.destination = Some(point);
        self.destinations.push(point);
    }

    fn remaining_distance(&self) -> f32 {
        self.remaining
    }

    fn desired_velocity(&self) -> Vec3 {
        self.desired
    }

    fn velocity(&self) -> Vec3 {
        self.actual
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    fn set_stopping_distance(&mut self, distance: f32) {
        self.stopping_distance = distance;
    }

    fn stop(&mut self) {
        self.stopped = true;
    }

    fn resume(&mut self) {
        self.stopped = false;
    }

    fn disable(&mut self) {
        self.disabled = true;
    }

    fn sample_reachable_point(
        &self,
        _center: Vec3,
        _radius: f32,
        _rng: &mut dyn RngCore,
    ) -> Option<Vec3> {
        self.sample
    }
}

/// Scripted physics answers.
#[derive(Debug, Default)]
pub struct MockWorld {
    pub overlaps: Vec<Entity>,
    /// Colliders along every ray; the nearest one is reported
    pub rays: Vec<RayHit>,
    pub sweeps: Vec<SweepHit>,
}

impl SpatialQuery for MockWorld {
    fn overlap_sphere(
        &self,
        _center: Vec3,
        _radius: f32,
        _layer: TargetLayer,
        exclude: Option<Entity>,
    ) -> Vec<Entity> {
        self.overlaps
            .iter()
            .copied()
            .filter(|entity| Some(*entity) != exclude)
            .collect()
    }

    fn raycast(
        &self,
        _origin: Vec3,
        _direction: Vec3,
        max_distance: f32,
        exclude: Option<Entity>,
    ) -> Option<RayHit> {
        self.rays
            .iter()
            .filter(|hit| Some(hit.entity) != exclude && hit.distance <= max_distance)
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
            .copied()
    }

    fn sweep_sphere(
        &self,
        _origin: Vec3,
        _radius: f32,
        _direction: Vec3,
        _distance: f32,
        _layer: TargetLayer,
        exclude: Option<Entity>,
    ) -> Vec<SweepHit> {
        self.sweeps
            .iter()
            .copied()
            .filter(|hit| Some(hit.entity) != exclude)
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct MockActors {
    pub actors: HashMap<Entity, ActorSnapshot>,
}

impl MockActors {
    pub fn with(mut self, entity: Entity, position: Vec3) -> Self {
        self.actors.insert(
            entity,
            ActorSnapshot {
                position,
                damageable: true,
                alive: true,
            },
        );
        self
    }

    pub fn with_prop(mut self, entity: Entity, position: Vec3) -> Self {
        self.actors.insert(
            entity,
            ActorSnapshot {
                position,
                damageable: false,
                alive: true,
            },
        );
        self
    }

    pub fn kill(&mut self, entity: Entity) {
        if let Some(actor) = self.actors.get_mut(&entity) {
            actor.alive = false;
        }
    }
}

impl ActorLookup for MockActors {
    fn snapshot(&self, entity: Entity) -> Option<ActorSnapshot> {
        self.actors.get(&entity).copied()
    }
}

pub fn ray_hit(entity: Entity, distance: f32) -> RayHit {
    RayHit {
        entity,
        point: Vec3::ZERO,
        normal: Vec3::ZERO,
        distance,
    }
}
