//! Enemy AI behavior systems.
//!
//! Thin ECS glue: each system gathers the host adapters and hands them to the
//! `Enemy` logic.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::{Misconfigured, PerceptionTask};
use super::enemy::Enemy;
use super::perception::{Perception, Senses};
use super::spawning::ReactivateEnemyEvent;
use crate::combat::{ActorRoster, DamageContext, Damageable};
use crate::core::{
    AttackAnimationEvent, ConfigError, DeathEvent, GameplayConfig, Navigation, PresentationCue,
};
use crate::navigation::{NavAgent, PatrolRng};
use crate::physics::RapierSpatialQuery;
use crate::player::PlayerHealth;

/// Enemies spawned without a navigation agent cannot move; park them.
pub fn validate_enemies(
    mut commands: Commands,
    enemies: Query<(Entity, Option<&Name>), (Added<Enemy>, Without<NavAgent>)>,
) {
    for (entity, name) in enemies.iter() {
        let error = ConfigError::MissingComponent {
            actor: name.map_or_else(|| format!("{entity:?}"), |name| name.to_string()),
            component: "NavAgent",
        };
        error!("{}", error);
        commands.entity(entity).insert(Misconfigured(error));
    }
}

/// Run due perception cycles on simulated time.
pub fn run_perception(
    time: Res<Time>,
    config: Res<GameplayConfig>,
    roster: Res<ActorRoster>,
    mut rng: ResMut<PatrolRng>,
    rapier_context: Query<&RapierContext>,
    mut enemies: Query<
        (Entity, &mut Enemy, &mut PerceptionTask, &Transform, &mut NavAgent),
        Without<Misconfigured>,
    >,
) {
    let Ok(context) = rapier_context.get_single() else {
        return;
    };
    let world = RapierSpatialQuery::new(context);
    let senses = Senses {
        world: &world,
        actors: &*roster,
    };

    for (entity, mut enemy, mut task, transform, mut agent) in enemies.iter_mut() {
        for _ in 0..task.due_cycles(time.delta()) {
            let perception =
                enemy.perceive(entity, transform, &mut *agent, &senses, &mut rng.0, &config);

            match perception {
                Perception::Dormant => {
                    task.finish();
                    break;
                }
                Perception::Acquired(target) => {
                    debug!("Enemy {:?} spotted {:?}", entity, target);
                }
                Perception::Chasing(_) | Perception::Searching => {}
            }
        }
    }
}

/// Per-frame range check and locomotion speed for the animator.
pub fn check_attack_range(
    roster: Res<ActorRoster>,
    mut cues: EventWriter<PresentationCue>,
    mut enemies: Query<(Entity, &mut Enemy, &Transform, &mut NavAgent), Without<Misconfigured>>,
) {
    for (entity, mut enemy, transform, mut agent) in enemies.iter_mut() {
        enemy.update_frame(entity, transform, &mut *agent, &*roster, &mut cues);
    }
}

/// Animation events open and close the damage window.
pub fn handle_attack_animation_events(
    mut events: EventReader<AttackAnimationEvent>,
    roster: Res<ActorRoster>,
    mut enemies: Query<(&mut Enemy, &mut NavAgent), Without<Misconfigured>>,
) {
    for event in events.read() {
        match *event {
            AttackAnimationEvent::Enable(entity) => {
                if let Ok((mut enemy, _)) = enemies.get_mut(entity) {
                    if !enemy.enable_attack() {
                        debug!("Enable attack on {:?} ignored", entity);
                    }
                }
            }
            AttackAnimationEvent::Disable(entity) => {
                if let Ok((mut enemy, mut agent)) = enemies.get_mut(entity) {
                    enemy.disable_attack(&mut *agent, &*roster);
                }
            }
        }
    }
}

/// Fixed step: face targets, sweep attack volumes and deliver the strikes.
#[allow(clippy::too_many_arguments)]
pub fn resolve_attack_sweeps(
    time: Res<Time>,
    mut roster: ResMut<ActorRoster>,
    rapier_context: Query<&RapierContext>,
    mut cues: EventWriter<PresentationCue>,
    mut deaths: EventWriter<DeathEvent>,
    mut enemies: Query<(Entity, &mut Enemy, &mut Transform, &NavAgent), Without<Misconfigured>>,
    mut players: Query<&mut PlayerHealth, Without<Enemy>>,
) {
    let Ok(context) = rapier_context.get_single() else {
        return;
    };
    let world = RapierSpatialQuery::new(context);
    let delta = time.delta_secs();
    let now = time.elapsed_secs();

    let mut strikes = Vec::new();
    {
        let senses = Senses {
            world: &world,
            actors: &*roster,
        };
        for (entity, mut enemy, mut transform, agent) in enemies.iter_mut() {
            if let Some(strike) = enemy.physics_step(entity, &mut transform, agent, &senses, delta)
            {
                strikes.push(strike);
            }
        }
    }

    for strike in strikes {
        let mut ctx = DamageContext {
            me: strike.victim,
            now,
            presentation: &mut cues,
            deaths: &mut deaths,
        };

        let killed = if let Ok((_, mut victim, _, _)) = enemies.get_mut(strike.victim) {
            victim.apply_damage(&strike.message, &mut ctx) && victim.is_dead()
        } else if let Ok(mut victim) = players.get_mut(strike.victim) {
            victim.apply_damage(&strike.message, &mut ctx) && victim.is_dead()
        } else {
            false
        };

        if killed {
            roster.mark_dead(strike.victim);
        }
    }
}

/// Dead enemies stop perceiving, lose their collider and their agent.
pub fn on_enemy_death(
    mut commands: Commands,
    mut deaths: EventReader<DeathEvent>,
    mut enemies: Query<(&mut PerceptionTask, Option<&mut NavAgent>), With<Enemy>>,
) {
    for death in deaths.read() {
        let Ok((mut task, agent)) = enemies.get_mut(death.entity) else {
            continue;
        };

        task.finish();
        if let Some(mut agent) = agent {
            agent.disable();
        }
        commands.entity(death.entity).insert(ColliderDisabled);
    }
}

/// Reactivated enemies get a fresh lifecycle, their agent and collider back,
/// and a perception task that starts over on the next frame.
pub fn reactivate_enemies(
    mut commands: Commands,
    mut requests: EventReader<ReactivateEnemyEvent>,
    mut cues: EventWriter<PresentationCue>,
    mut enemies: Query<
        (&mut Enemy, &mut PerceptionTask, &mut NavAgent, &mut Transform),
        Without<Misconfigured>,
    >,
) {
    for request in requests.read() {
        let Ok((mut enemy, mut task, mut agent, mut transform)) = enemies.get_mut(request.entity)
        else {
            warn!("Cannot reactivate {:?}: not a working enemy", request.entity);
            continue;
        };

        if let Some(position) = request.position {
            transform.translation = position;
        }
        agent.respawn(transform.translation);
        enemy.activate(&mut *agent);
        task.restart();

        commands.entity(request.entity).remove::<ColliderDisabled>();
        cues.send(PresentationCue::RootMotion {
            entity: request.entity,
            enabled: false,
        });
        info!("Enemy {:?} reactivated", request.entity);
    }
}
