//! Skin colour from spawn cues, applied to the actor's scene materials.

use bevy::prelude::*;

use crate::core::PresentationCue;

/// Colour an actor's skin should be rendered with.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SkinTint(pub Color);

/// Mesh whose material is a tinted copy; holds the colour it was given.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct TintedMaterial(pub Color);

pub fn record_skin_tints(mut commands: Commands, mut cues: EventReader<PresentationCue>) {
    for cue in cues.read() {
        if let PresentationCue::SkinColor { entity, color } = *cue {
            if let Some(mut target) = commands.get_entity(entity) {
                target.insert(SkinTint(color));
            }
        }
    }
}

/// Give every mesh below a tinted actor its own material in the skin colour.
///
/// Scenes load asynchronously, so meshes are picked up whenever they appear.
/// Shared materials are copied once; later tint changes edit the copy.
pub fn tint_skin_materials(
    mut commands: Commands,
    mut materials: ResMut<Assets<StandardMaterial>>,
    actors: Query<(Entity, &SkinTint)>,
    children: Query<&Children>,
    meshes: Query<(&MeshMaterial3d<StandardMaterial>, Option<&TintedMaterial>)>,
) {
    for (actor, tint) in actors.iter() {
        for mesh in children.iter_descendants(actor) {
            let Ok((material, tinted)) = meshes.get(mesh) else {
                continue;
            };

            match tinted {
                Some(applied) if applied.0 == tint.0 => {}
                Some(_) => {
                    if let Some(copy) = materials.get_mut(&material.0) {
                        copy.base_color = tint.0;
                    }
                    commands.entity(mesh).insert(TintedMaterial(tint.0));
                }
                None => {
                    let Some(shared) = materials.get(&material.0).cloned() else {
                        continue;
                    };
                    let copy = materials.add(StandardMaterial {
                        base_color: tint.0,
                        ..shared
                    });
                    commands
                        .entity(mesh)
                        .insert((MeshMaterial3d(copy), TintedMaterial(tint.0)));
                }
            }
        }
    }
}
