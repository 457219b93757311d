//! Enemy-related components and configuration.

use bevy::prelude::*;
use std::time::Duration;

use crate::core::ConfigError;

/// Enemy type identifier (matches RON file name).
#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct EnemyType(pub String);

/// Combat state machine for enemy behavior.
#[derive(Default, PartialEq, Eq, Clone, Copy, Debug)]
pub enum EnemyState {
    /// Wandering between random waypoints, scanning for a target.
    #[default]
    Patrol,
    /// Running toward the acquired target.
    Tracking,
    /// In range; halted and winding up the attack animation.
    AttackBegin,
    /// Damage window open; the attack volume is swept every physics step.
    Attacking,
}

/// Enemy tuning, immutable after spawn unless re-`setup`.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemyStats {
    pub run_speed: f32,
    pub patrol_speed: f32,
    pub damage: f32,
    /// Radius of the swept attack sphere
    pub attack_radius: f32,
    /// Full view cone angle in degrees
    pub field_of_view: f32,
    pub view_distance: f32,
    /// Approximate seconds to turn toward the target while attacking
    pub turn_smooth_time: f32,
    /// Score awarded to the session when this enemy dies
    pub score_value: u32,
}

impl Default for EnemyStats {
    fn default() -> Self {
        Self {
            run_speed: 10.0,
            patrol_speed: 3.0,
            damage: 30.0,
            attack_radius: 2.0,
            field_of_view: 50.0,
            view_distance: 10.0,
            turn_smooth_time: 0.1,
            score_value: 100,
        }
    }
}

/// Rig points relative to the enemy origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyRig {
    /// Where the enemy looks from
    pub eye_offset: Vec3,
    /// Center of the attack sphere
    pub attack_root_offset: Vec3,
}

impl Default for EnemyRig {
    fn default() -> Self {
        Self {
            eye_offset: Vec3::new(0.0, 1.4, 0.0),
            attack_root_offset: Vec3::new(0.0, 1.0, -0.8),
        }
    }
}

/// Parameters handed over by the spawner before activation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySetup {
    pub health: f32,
    pub damage: f32,
    pub run_speed: f32,
    pub patrol_speed: f32,
    pub skin_color: Color,
}

/// Periodic perception task. Stops for good once the enemy dies.
#[derive(Component, Debug, Clone)]
pub struct PerceptionTask {
    timer: Timer,
    started: bool,
    finished: bool,
}

impl PerceptionTask {
    pub fn new(interval: f32) -> Self {
        Self {
            timer: Timer::from_seconds(interval, TimerMode::Repeating),
            started: false,
            finished: false,
        }
    }

    /// Advance by `delta` and return how many cycles are due.
    ///
    /// The first call runs one cycle right away; after that cycles follow
    /// the interval regardless of frame rate.
    pub fn due_cycles(&mut self, delta: Duration) -> u32 {
        if self.finished {
            return 0;
        }
        if !self.started {
            self.started = true;
            return 1;
        }

        self.timer.tick(delta);
        self.timer.times_finished_this_tick()
    }

    pub fn finish(&mut self) {
        self.finished = true;
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Only valid together with a full actor reset.
    pub fn restart(&mut self) {
        self.timer.reset();
        self.started = false;
        self.finished = false;
    }
}

/// Marks an actor that failed its startup checks. Behaviour systems skip it.
#[derive(Component, Debug)]
pub struct Misconfigured(pub ConfigError);
