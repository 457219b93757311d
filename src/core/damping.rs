//! Critically damped smoothing for yaw and scalar values.

use bevy::math::Vec3;
use std::f32::consts::{PI, TAU};

/// Smoothly move `current` toward `target` like a critically damped spring.
///
/// `velocity` is carried between calls by the caller. `smooth_time` is
/// roughly the time needed to reach the target; it is clamped away from
/// zero. Never overshoots the target.
pub fn smooth_damp(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    delta: f32,
) -> f32 {
    if delta <= 0.0 {
        return current;
    }

    let smooth_time = smooth_time.max(0.0001);
    let omega = 2.0 / smooth_time;

    // Pade-style approximation of exp(-omega * delta)
    let x = omega * delta;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * delta;
    *velocity = (*velocity - omega * temp) * decay;

    let mut output = target + (change + temp) * decay;

    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = 0.0;
    }

    output
}

/// Shortest signed difference between two angles in radians, in (-PI, PI].
pub fn delta_angle(current: f32, target: f32) -> f32 {
    let mut delta = (target - current).rem_euclid(TAU);
    if delta > PI {
        delta -= TAU;
    }
    delta
}

/// [`smooth_damp`] for angles in radians, taking the short way around.
pub fn smooth_damp_angle(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    delta: f32,
) -> f32 {
    let target = current + delta_angle(current, target);
    smooth_damp(current, target, velocity, smooth_time, delta)
}

/// Yaw in radians that points the -Z forward axis along `direction`.
///
/// Only the horizontal part counts. `None` for (near) vertical directions.
pub fn yaw_towards(direction: Vec3) -> Option<f32> {
    let horizontal = Vec3::new(direction.x, 0.0, direction.z);
    if horizontal.length_squared() < 1e-8 {
        return None;
    }

    Some((-horizontal.x).atan2(-horizontal.z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn delta_angle_wraps_short_way() {
        assert_relative_eq!(delta_angle(0.0, 0.5), 0.5);
        assert_relative_eq!(delta_angle(0.1, TAU - 0.1), -0.2, epsilon = 1e-5);
        assert_relative_eq!(delta_angle(TAU - 0.1, 0.1), 0.2, epsilon = 1e-5);
    }

    #[test]
    fn smooth_damp_converges_without_overshoot() {
        let mut value = 0.0;
        let mut velocity = 0.0;
        let mut previous = value;

        for _ in 0..200 {
            value = smooth_damp(value, 1.0, &mut velocity, 0.1, 1.0 / 60.0);
            assert!(value <= 1.0, "overshot: {value}");
            assert!(value >= previous, "moved backwards: {value} < {previous}");
            previous = value;
        }

        assert_relative_eq!(value, 1.0, epsilon = 1e-3);
    }

    #[test]
    fn smooth_damp_is_not_a_snap() {
        let mut velocity = 0.0;
        let value = smooth_damp(0.0, 1.0, &mut velocity, 0.5, 1.0 / 60.0);
        assert!(value > 0.0 && value < 0.1, "value = {value}");
    }

    #[test]
    fn smooth_damp_angle_crosses_the_seam() {
        let mut velocity = 0.0;
        let mut yaw = TAU - 0.2;

        for _ in 0..120 {
            yaw = smooth_damp_angle(yaw, 0.2, &mut velocity, 0.1, 1.0 / 60.0);
        }

        assert_relative_eq!(delta_angle(yaw, 0.2), 0.0, epsilon = 1e-3);
    }

    #[test]
    fn zero_delta_keeps_current() {
        let mut velocity = 3.0;
        assert_eq!(smooth_damp(0.4, 1.0, &mut velocity, 0.1, 0.0), 0.4);
        assert_eq!(velocity, 3.0);
    }

    #[test]
    fn yaw_points_forward_axis_at_direction() {
        use bevy::math::Quat;

        for direction in [Vec3::X, Vec3::NEG_X, Vec3::Z, Vec3::new(1.0, 3.0, -1.0)] {
            let yaw = yaw_towards(direction).unwrap();
            let forward = Quat::from_rotation_y(yaw) * Vec3::NEG_Z;
            let expected = Vec3::new(direction.x, 0.0, direction.z).normalize();
            assert_relative_eq!(forward.x, expected.x, epsilon = 1e-5);
            assert_relative_eq!(forward.z, expected.z, epsilon = 1e-5);
        }
        assert_eq!(yaw_towards(Vec3::Y), None);
    }
}
