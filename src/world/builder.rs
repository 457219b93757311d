//! Arena construction: floor, walls, lights and camera.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::data::ArenaDefinition;
use crate::physics::WORLD_GROUP;

/// Marker for arena entities.
#[derive(Component)]
pub struct ArenaGeometry;

/// Camera that trails the player from behind and above.
#[derive(Component, Debug, Clone, Copy)]
pub struct FollowCamera {
    pub offset: Vec3,
    pub smoothing: f32,
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self {
            offset: Vec3::new(0.0, 4.0, 7.0),
            smoothing: 8.0,
        }
    }
}

const WALL_THICKNESS: f32 = 0.5;
const FLOOR_DEPTH: f32 = 0.5;

fn world_colliders() -> CollisionGroups {
    CollisionGroups::new(WORLD_GROUP, Group::ALL)
}

/// Build the arena and return the player start position.
pub fn build_arena(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    arena: &ArenaDefinition,
) -> Vec3 {
    let (half_x, half_z) = arena.half_extents;
    let (r, g, b, brightness) = arena.ambient;

    commands.insert_resource(AmbientLight {
        color: Color::srgb(r, g, b),
        brightness,
    });

    commands.spawn((
        DirectionalLight {
            illuminance: 6000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::XYZ,
            -std::f32::consts::FRAC_PI_3,
            std::f32::consts::FRAC_PI_6,
            0.0,
        )),
        ArenaGeometry,
    ));

    let floor_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.35, 0.37, 0.33),
        perceptual_roughness: 0.9,
        ..default()
    });
    let wall_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.5, 0.48, 0.45),
        ..default()
    });

    // Top surface at y = 0
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(half_x * 2.0, FLOOR_DEPTH, half_z * 2.0))),
        MeshMaterial3d(floor_material),
        Transform::from_xyz(0.0, -FLOOR_DEPTH / 2.0, 0.0),
        Collider::cuboid(half_x, FLOOR_DEPTH / 2.0, half_z),
        world_colliders(),
        ArenaGeometry,
    ));

    let height = arena.wall_height;
    let walls = [
        (Vec3::new(0.0, height / 2.0, -half_z), Vec3::new(half_x, height / 2.0, WALL_THICKNESS / 2.0)),
        (Vec3::new(0.0, height / 2.0, half_z), Vec3::new(half_x, height / 2.0, WALL_THICKNESS / 2.0)),
        (Vec3::new(-half_x, height / 2.0, 0.0), Vec3::new(WALL_THICKNESS / 2.0, height / 2.0, half_z)),
        (Vec3::new(half_x, height / 2.0, 0.0), Vec3::new(WALL_THICKNESS / 2.0, height / 2.0, half_z)),
    ];
    for (center, half_size) in walls {
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::from_size(half_size * 2.0))),
            MeshMaterial3d(wall_material.clone()),
            Transform::from_translation(center),
            Collider::cuboid(half_size.x, half_size.y, half_size.z),
            world_colliders(),
            ArenaGeometry,
        ));
    }

    let start = Vec3::new(arena.player_start.0, 1.0, arena.player_start.1);

    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(start + FollowCamera::default().offset)
            .looking_at(start, Vec3::Y),
        FollowCamera::default(),
        ArenaGeometry,
    ));

    start
}
