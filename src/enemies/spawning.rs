//! Enemy spawning from registry definitions.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::{EnemySetup, EnemyType, PerceptionTask};
use super::data::{ColliderConfig, EnemyDefinition, EnemyRegistry};
use super::enemy::Enemy;
use crate::core::{ConfigError, GameplayConfig, Presentation, PresentationCue, TargetLayer};
use crate::navigation::{NavAgent, WalkableArea};
use crate::physics::ActorLayer;
use crate::presentation::{AnimatorParameters, AttackClip};

/// Ask for an enemy of a registered type. `setup` overrides the definition's tuning.
#[derive(Event, Debug, Clone)]
pub struct SpawnEnemyEvent {
    pub enemy_type: String,
    pub position: Vec3,
    pub setup: Option<EnemySetup>,
}

/// Bring a dead enemy back at `position` (or where it fell) with a full reset.
#[derive(Event, Debug, Clone)]
pub struct ReactivateEnemyEvent {
    pub entity: Entity,
    pub position: Option<Vec3>,
}

/// Build a configured, activated enemy and its agent from a definition.
pub fn build_enemy(
    definition: &EnemyDefinition,
    setup: &EnemySetup,
    position: Vec3,
    config: &GameplayConfig,
) -> Result<(Enemy, NavAgent), ConfigError> {
    let rig = definition.to_rig()?;
    let mut agent = NavAgent::new(position);
    let mut enemy = Enemy::new(definition.to_stats(), rig, definition.max_health)
        .with_target_layer(TargetLayer::Player)
        .with_invulnerability_window(config.invulnerability_window);

    enemy.setup(setup, &mut agent);
    enemy.activate(&mut agent);

    Ok((enemy, agent))
}

/// Capsule raised so its lowest point sits at the actor's origin (the floor).
pub fn standing_collider(config: &ColliderConfig) -> Collider {
    Collider::compound(vec![(
        Vec3::Y * config.center_height(),
        Quat::IDENTITY,
        Collider::capsule_y(config.half_height, config.radius),
    )])
}

/// Spawn one enemy. The skin colour goes out as a presentation cue.
pub fn spawn_enemy(
    commands: &mut Commands,
    asset_server: Option<&AssetServer>,
    registry: &EnemyRegistry,
    config: &GameplayConfig,
    area: Option<Rect>,
    request: &SpawnEnemyEvent,
    presentation: &mut dyn Presentation,
) -> Result<Entity, ConfigError> {
    let definition = registry.get(&request.enemy_type)?;
    let setup = request.setup.unwrap_or_else(|| definition.default_setup());
    let (enemy, mut agent) = build_enemy(definition, &setup, request.position, config)?;
    agent.set_area(area);

    let collider = definition.collider.clone().unwrap_or_default();
    let animation = &definition.animation;

    let entity = commands
        .spawn((
            enemy,
            EnemyType(request.enemy_type.clone()),
            PerceptionTask::new(config.perception_interval),
            agent,
            ActorLayer(TargetLayer::Enemy),
            AnimatorParameters::default(),
            AttackClip::new(animation.attack_duration, animation.attack_hit_frame),
            Transform::from_translation(request.position),
            Visibility::default(),
            standing_collider(&collider),
            RigidBody::KinematicPositionBased,
        ))
        .id();

    if let Some(asset_server) = asset_server.filter(|_| !definition.model_path.is_empty()) {
        let model = commands
            .spawn((
                SceneRoot(asset_server.load(&definition.model_path)),
                Transform::from_scale(Vec3::splat(definition.scale)),
            ))
            .id();
        commands.entity(entity).add_child(model);
    }

    presentation.cue(PresentationCue::SkinColor {
        entity,
        color: setup.skin_color,
    });

    info!(
        "Spawned {} at ({:.1}, {:.1}, {:.1})",
        definition.name, request.position.x, request.position.y, request.position.z
    );
    Ok(entity)
}

pub fn spawn_requested_enemies(
    mut commands: Commands,
    asset_server: Option<Res<AssetServer>>,
    registry: Res<EnemyRegistry>,
    config: Res<GameplayConfig>,
    area: Option<Res<WalkableArea>>,
    mut requests: EventReader<SpawnEnemyEvent>,
    mut cues: EventWriter<PresentationCue>,
) {
    for request in requests.read() {
        if let Err(e) = spawn_enemy(
            &mut commands,
            asset_server.as_deref(),
            &registry,
            &config,
            area.as_deref().map(|area| area.0),
            request,
            &mut cues,
        ) {
            error!("Could not spawn {}: {}", request.enemy_type, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemies::{EnemyState, EnemyStats};
    use crate::combat::Damageable;
    use crate::core::Navigation;
    use crate::enemies::data::AnimationConfig;

    fn definition() -> EnemyDefinition {
        EnemyDefinition {
            name: "Zombie".to_string(),
            max_health: 100.0,
            damage: 30.0,
            run_speed: 10.0,
            patrol_speed: 3.0,
            attack_radius: 2.0,
            field_of_view: 50.0,
            view_distance: 10.0,
            turn_smooth_time: 0.1,
            score_value: 100,
            model_path: String::new(),
            scale: 1.0,
            collider: None,
            eye: Some((0.0, 1.4, 0.0)),
            attack_root: Some((0.0, 1.0, -1.0)),
            skin_color: None,
            animation: AnimationConfig::default(),
        }
    }

    #[test]
    fn built_enemy_is_patrolling_with_setup_applied() {
        let setup = EnemySetup {
            health: 40.0,
            damage: 5.0,
            run_speed: 7.0,
            patrol_speed: 1.5,
            skin_color: Color::BLACK,
        };

        let (enemy, agent) =
            build_enemy(&definition(), &setup, Vec3::ZERO, &GameplayConfig::default()).unwrap();

        assert_eq!(enemy.state(), EnemyState::Patrol);
        assert!(!enemy.is_dead());
        assert_eq!(enemy.living().health(), 40.0);
        assert_eq!(
            enemy.stats(),
            &EnemyStats {
                damage: 5.0,
                run_speed: 7.0,
                patrol_speed: 1.5,
                ..EnemyStats::default()
            }
        );
        assert_eq!(agent.speed(), 1.5);
        assert_eq!(agent.remaining_distance(), 0.0);
    }

    #[test]
    fn enemy_collider_stands_on_its_origin() {
        let config = ColliderConfig {
            half_height: 0.6,
            radius: 0.4,
        };
        let collider = standing_collider(&config);

        let aabb = collider.raw.compute_local_aabb();
        assert!(aabb.mins.y.abs() < 1e-4);
        assert!((aabb.maxs.y - 2.0).abs() < 1e-4);
    }

    #[test]
    fn definition_without_attack_root_is_rejected() {
        let mut definition = definition();
        definition.attack_root = None;
        let setup = definition.default_setup();

        let result = build_enemy(&definition, &setup, Vec3::ZERO, &GameplayConfig::default());

        assert!(matches!(
            result,
            Err(ConfigError::MissingPart {
                part: "attack_root",
                ..
            })
        ));
    }

    #[test]
    fn spawn_request_creates_enemy_and_tints_skin() {
        let mut app = App::new();
        let mut registry = EnemyRegistry::default();
        registry
            .definitions
            .insert("zombie".to_string(), definition());
        app.insert_resource(registry)
            .init_resource::<GameplayConfig>()
            .add_event::<SpawnEnemyEvent>()
            .add_event::<PresentationCue>()
            .add_systems(Update, spawn_requested_enemies);

        app.world_mut().send_event(SpawnEnemyEvent {
            enemy_type: "zombie".to_string(),
            position: Vec3::new(2.0, 0.0, 3.0),
            setup: None,
        });
        app.world_mut().send_event(SpawnEnemyEvent {
            enemy_type: "ghoul".to_string(),
            position: Vec3::ZERO,
            setup: None,
        });
        app.update();

        let mut enemies = app.world_mut().query::<(Entity, &Enemy, &Transform)>();
        let spawned: Vec<_> = enemies
            .iter(app.world())
            .map(|(entity, _, transform)| (entity, transform.translation))
            .collect();
        assert_eq!(spawned.len(), 1);
        assert_eq!(spawned[0].1, Vec3::new(2.0, 0.0, 3.0));
        assert!(!app
            .world()
            .get::<AttackClip>(spawned[0].0)
            .unwrap()
            .is_playing());

        let cues = app.world().resource::<Events<PresentationCue>>();
        let mut reader = cues.get_cursor();
        let sent: Vec<_> = reader.read(cues).cloned().collect();
        assert_eq!(
            sent,
            vec![PresentationCue::SkinColor {
                entity: spawned[0].0,
                color: Color::srgb(1.0, 1.0, 1.0),
            }]
        );
    }
}
