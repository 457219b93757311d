//! Short-lived hit effects.

use bevy::prelude::*;

use crate::core::{EffectKind, GameplayConfig, PresentationCue};

/// Scene paths of the hit effect prefabs.
#[derive(Resource, Debug, Clone)]
pub struct EffectLibrary {
    pub common: String,
    pub flesh: String,
}

impl Default for EffectLibrary {
    fn default() -> Self {
        Self {
            common: "effects/common_hit.glb#Scene0".to_string(),
            flesh: "effects/flesh_hit.glb#Scene0".to_string(),
        }
    }
}

impl EffectLibrary {
    pub fn path(&self, kind: EffectKind) -> &str {
        match kind {
            EffectKind::Common => &self.common,
            EffectKind::Flesh => &self.flesh,
        }
    }
}

/// A spawned effect, despawned when its lifetime runs out.
#[derive(Component, Debug)]
pub struct HitEffect {
    pub kind: EffectKind,
    pub lifetime: Timer,
}

/// World transform for an effect at `position` whose forward axis faces along `normal`.
pub fn effect_transform(position: Vec3, normal: Vec3) -> Transform {
    let normal = normal.try_normalize().unwrap_or(Vec3::Y);
    Transform::from_translation(position)
        .with_rotation(Quat::from_rotation_arc(Vec3::NEG_Z, normal))
}

pub fn spawn_hit_effects(
    mut commands: Commands,
    mut cues: EventReader<PresentationCue>,
    config: Res<GameplayConfig>,
    library: Res<EffectLibrary>,
    asset_server: Option<Res<AssetServer>>,
    parents: Query<&GlobalTransform>,
) {
    for cue in cues.read() {
        let PresentationCue::Effect {
            kind,
            position,
            normal,
            parent,
        } = *cue
        else {
            continue;
        };

        let world = effect_transform(position, normal);
        let parent = parent.and_then(|parent| parents.get(parent).ok().map(|global| (parent, global)));

        // Keep the world placement when following a moving parent
        let local = match parent {
            Some((_, global)) => {
                Transform::from_matrix(global.compute_matrix().inverse() * world.compute_matrix())
            }
            None => world,
        };

        let mut effect = commands.spawn((
            HitEffect {
                kind,
                lifetime: Timer::from_seconds(config.effect_lifetime, TimerMode::Once),
            },
            local,
            Visibility::default(),
        ));
        if let Some(asset_server) = asset_server.as_deref() {
            effect.insert(SceneRoot(asset_server.load(library.path(kind).to_string())));
        }
        let effect = effect.id();

        if let Some((parent, _)) = parent {
            commands.entity(parent).add_child(effect);
        }
    }
}

pub fn expire_hit_effects(
    mut commands: Commands,
    time: Res<Time>,
    mut effects: Query<(Entity, &mut HitEffect)>,
) {
    for (entity, mut effect) in effects.iter_mut() {
        effect.lifetime.tick(time.delta());

        if effect.lifetime.finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}
