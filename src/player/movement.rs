//! Third-person character movement driven by `PlayerInput`.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use super::input::PlayerInput;
use super::shooter::PlayerShooter;
use crate::combat::Damageable;
use crate::core::{yaw_towards, GameplayConfig, TargetLayer};
use crate::physics::ActorLayer;
use crate::presentation::AnimatorParameters;

/// Handle movement and jumping.
///
/// Uses Rapier's KinematicCharacterController for collision detection.
pub fn player_movement(
    time: Res<Time>,
    config: Res<PlayerConfig>,
    rapier_context: Query<&RapierContext>,
    mut player_query: Query<
        (
            Entity,
            &mut Transform,
            &PlayerInput,
            &PlayerHealth,
            &mut MovementState,
            &mut KinematicCharacterController,
        ),
        With<Player>,
    >,
) {
    let Ok((player_entity, mut transform, input, health, mut movement_state, mut controller)) =
        player_query.get_single_mut()
    else {
        return;
    };

    if health.is_dead() {
        controller.translation = None;
        return;
    }

    let delta = time.delta_secs();

    // Ground check using a short raycast below the capsule
    let is_grounded = if let Ok(context) = rapier_context.get_single() {
        let ray_origin = transform.translation - Vec3::Y * (PLAYER_HEIGHT * 0.5 - 0.05);

        context
            .cast_ray(
                ray_origin,
                Vec3::NEG_Y,
                0.15,
                true,
                QueryFilter::default().exclude_collider(player_entity),
            )
            .is_some()
    } else {
        // No physics context: treat as grounded
        true
    };
    movement_state.is_grounded = is_grounded;

    if is_grounded {
        if movement_state.vertical_velocity < 0.0 {
            movement_state.vertical_velocity = 0.0;
        }
        if input.jump {
            movement_state.vertical_velocity = config.jump_force;
        }
    } else {
        movement_state.vertical_velocity -= config.gravity * delta;
    }

    // Input is world-relative: forward is -Z
    let direction = Vec3::new(input.move_input.x, 0.0, -input.move_input.y);

    if let Some(yaw) = yaw_towards(direction) {
        let target = Quat::from_rotation_y(yaw);
        let t = (config.turn_speed * delta).min(1.0);
        transform.rotation = transform.rotation.slerp(target, t);
    }

    let horizontal = direction * config.move_speed * delta;
    let vertical = Vec3::new(0.0, movement_state.vertical_velocity * delta, 0.0);

    controller.translation = Some(horizontal + vertical);
}

/// Spawn the player entity. `position` is the capsule center.
pub fn spawn_player(
    commands: &mut Commands,
    position: Vec3,
    config: &PlayerConfig,
    gameplay: &GameplayConfig,
) -> Entity {
    commands
        .spawn((
            Player,
            PlayerHealth::new(config.starting_health)
                .with_invulnerability_window(gameplay.invulnerability_window),
            PlayerShooter::new(config.gun.clone()),
            PlayerInput::default(),
            MovementState::default(),
            AnimatorParameters::default(),
            ActorLayer(TargetLayer::Player),
            Transform::from_translation(position),
            Visibility::default(),
            // Rapier physics components
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(PLAYER_CAPSULE_HALF_HEIGHT, PLAYER_CAPSULE_RADIUS),
            KinematicCharacterController {
                offset: CharacterLength::Absolute(0.01),
                autostep: Some(CharacterAutostep {
                    max_height: CharacterLength::Absolute(0.4),
                    min_width: CharacterLength::Absolute(0.3),
                    include_dynamic_bodies: false,
                }),
                max_slope_climb_angle: 45_f32.to_radians(),
                min_slope_slide_angle: 30_f32.to_radians(),
                snap_to_ground: Some(CharacterLength::Absolute(0.5)),
                ..default()
            },
        ))
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DamageMessage, DeathEvent, PresentationCue};
    use crate::combat::DamageContext;

    #[test]
    fn spawned_player_uses_configured_health_and_window() {
        let mut world = World::new();
        let gameplay = GameplayConfig {
            invulnerability_window: 0.5,
            ..default()
        };
        let player = {
            let mut commands = world.commands();
            spawn_player(&mut commands, Vec3::Y, &PlayerConfig::default(), &gameplay)
        };
        world.flush();

        let mut health = world.get_mut::<PlayerHealth>(player).unwrap();
        assert_eq!(health.health(), 100.0);

        let attacker = Entity::from_raw(99);
        let hit = DamageMessage::new(10.0, attacker, Vec3::Y, Vec3::Z);
        let mut cues: Vec<PresentationCue> = Vec::new();
        let mut deaths: Vec<DeathEvent> = Vec::new();
        let mut ctx = DamageContext {
            me: player,
            now: 0.0,
            presentation: &mut cues,
            deaths: &mut deaths,
        };
        assert!(health.apply_damage(&hit, &mut ctx));
        ctx.now = 0.3;
        assert!(!health.apply_damage(&hit, &mut ctx));
        ctx.now = 0.5;
        assert!(health.apply_damage(&hit, &mut ctx));
        assert_eq!(health.health(), 80.0);

        let shooter = world.get::<PlayerShooter>(player).unwrap();
        assert_eq!(shooter.gun().magazine(), PlayerConfig::default().gun.magazine_capacity);
    }
}
