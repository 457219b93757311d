//! Straight-line steering agent standing in for a navmesh agent.

use bevy::prelude::*;
use rand::RngCore;
use std::f32::consts::TAU;

use crate::core::{yaw_towards, Navigation};

/// Attempts made to find a sample point inside the walkable area.
const SAMPLE_ATTEMPTS: usize = 30;

/// Walks toward its destination on the ground plane, ignoring obstacles.
#[derive(Component, Debug, Clone)]
pub struct NavAgent {
    position: Vec3,
    destination: Option<Vec3>,
    speed: f32,
    stopping_distance: f32,
    stopped: bool,
    enabled: bool,
    velocity: Vec3,
    /// Walkable XZ bounds. Unbounded when `None`.
    area: Option<Rect>,
}

impl Default for NavAgent {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            destination: None,
            speed: 3.5,
            stopping_distance: 0.0,
            stopped: false,
            enabled: true,
            velocity: Vec3::ZERO,
            area: None,
        }
    }
}

impl NavAgent {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..default()
        }
    }

    pub fn with_area(mut self, area: Rect) -> Self {
        self.area = Some(area);
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn destination(&self) -> Option<Vec3> {
        self.destination
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Switch a disabled agent back on, standing still at `position`.
    pub fn respawn(&mut self, position: Vec3) {
        self.enabled = true;
        self.position = position;
        self.destination = None;
        self.velocity = Vec3::ZERO;
    }

    pub fn set_area(&mut self, area: Option<Rect>) {
        self.area = area;
    }

    fn walkable(&self, point: Vec3) -> bool {
        self.area
            .map_or(true, |area| area.contains(Vec2::new(point.x, point.z)))
    }

    /// Advance one step from `position`. Returns the new position.
    pub fn advance(&mut self, position: Vec3, delta: f32) -> Vec3 {
        self.position = position;
        self.velocity = self.desired_velocity();

        let mut next = position + self.velocity * delta;
        if let Some(area) = self.area {
            let clamped = Vec2::new(next.x, next.z).clamp(area.min, area.max);
            next.x = clamped.x;
            next.z = clamped.y;
        }

        self.position = next;
        next
    }
}

impl Navigation for NavAgent {
    fn set_destination(&mut self, point: Vec3) {
        if self.enabled {
            self.destination = Some(point);
        }
    }

    fn remaining_distance(&self) -> f32 {
        self.destination.map_or(0.0, |destination| {
            Vec2::new(destination.x - self.position.x, destination.z - self.position.z).length()
        })
    }

    fn desired_velocity(&self) -> Vec3 {
        if !self.enabled || self.stopped {
            return Vec3::ZERO;
        }
        let Some(destination) = self.destination else {
            return Vec3::ZERO;
        };

        let offset = Vec3::new(
            destination.x - self.position.x,
            0.0,
            destination.z - self.position.z,
        );
        let distance = offset.length();
        if distance <= self.stopping_distance.max(0.01) {
            return Vec3::ZERO;
        }

        offset / distance * self.speed
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed.max(0.0);
    }

    fn set_stopping_distance(&mut self, distance: f32) {
        self.stopping_distance = distance.max(0.0);
    }

    fn stop(&mut self) {
        self.stopped = true;
        self.velocity = Vec3::ZERO;
    }

    fn resume(&mut self) {
        self.stopped = false;
    }

    fn disable(&mut self) {
        self.enabled = false;
        self.destination = None;
        self.velocity = Vec3::ZERO;
    }

    fn sample_reachable_point(
        &self,
        center: Vec3,
        radius: f32,
        rng: &mut dyn RngCore,
    ) -> Option<Vec3> {
        for _ in 0..SAMPLE_ATTEMPTS {
            let angle = unit(rng) * TAU;
            // sqrt keeps samples uniform over the disc
            let distance = unit(rng).sqrt() * radius;
            let point = center + Vec3::new(angle.cos(), 0.0, angle.sin()) * distance;

            if self.walkable(point) {
                return Some(point);
            }
        }

        None
    }
}

/// Uniform float in [0, 1).
fn unit(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() >> 8) as f32 / (1u32 << 24) as f32
}

/// Move every enabled agent along its desired velocity and face the motion.
pub fn steer_agents(time: Res<Time>, mut agents: Query<(&mut Transform, &mut NavAgent)>) {
    let delta = time.delta_secs();

    for (mut transform, mut agent) in agents.iter_mut() {
        if !agent.is_enabled() {
            continue;
        }

        transform.translation = agent.advance(transform.translation, delta);

        if let Some(yaw) = yaw_towards(agent.velocity()) {
            transform.rotation = Quat::from_rotation_y(yaw);
        }
    }
}
