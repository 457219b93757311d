//! Combat systems - ordering, healing and death bookkeeping.

use bevy::ecs::schedule::ScheduleLabel;
use bevy::prelude::*;

use super::living::{DamageContext, Damageable};
use super::roster::{refresh_actor_roster, ActorRoster};
use crate::core::{gameplay_running, DeathEvent, GameSession, PresentationCue};
use crate::enemies::Enemy;
use crate::player::{Player, PlayerHealth};

/// System set ordering for gameplay, shared by the frame and the fixed step.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameplaySet {
    /// Refresh the actor roster
    Sense,
    /// Inputs, animation events, perception, range checks
    Decide,
    /// Attack sweeps and damage
    Strike,
    /// Steering and character movement
    Move,
    /// Death bookkeeping and presentation
    React,
}

/// Heal an actor (pickups, scripted events).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct RestoreHealthEvent {
    pub target: Entity,
    pub amount: f32,
}

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app
        .init_resource::<ActorRoster>()
        .add_event::<RestoreHealthEvent>();

    configure_gameplay_sets(app, Update);
    configure_gameplay_sets(app, FixedUpdate);

    app.add_systems(
        Update,
        (
            apply_restore_health.in_set(GameplaySet::Strike),
            handle_deaths.in_set(GameplaySet::React),
        ),
    );
}

fn configure_gameplay_sets(app: &mut App, schedule: impl ScheduleLabel + Clone) {
    app.configure_sets(
        schedule.clone(),
        (
            GameplaySet::Sense,
            GameplaySet::Decide,
            GameplaySet::Strike,
            GameplaySet::Move,
            GameplaySet::React,
        )
            .chain()
            .run_if(gameplay_running),
    )
    .add_systems(schedule, refresh_actor_roster.in_set(GameplaySet::Sense));
}

fn apply_restore_health(
    time: Res<Time>,
    mut requests: EventReader<RestoreHealthEvent>,
    mut cues: EventWriter<PresentationCue>,
    mut deaths: EventWriter<DeathEvent>,
    mut enemies: Query<&mut Enemy>,
    mut players: Query<&mut PlayerHealth, Without<Enemy>>,
) {
    let now = time.elapsed_secs();

    for request in requests.read() {
        let mut ctx = DamageContext {
            me: request.target,
            now,
            presentation: &mut cues,
            deaths: &mut deaths,
        };

        if let Ok(mut enemy) = enemies.get_mut(request.target) {
            enemy.restore_health(request.amount, &mut ctx);
        } else if let Ok(mut player) = players.get_mut(request.target) {
            player.restore_health(request.amount, &mut ctx);
        } else {
            debug!("Restore health for {:?} ignored: not damageable", request.target);
        }
    }
}

/// Score kills and end the session when the player falls.
fn handle_deaths(
    mut death_events: EventReader<DeathEvent>,
    mut session: ResMut<GameSession>,
    mut cues: EventWriter<PresentationCue>,
    player_query: Query<(), With<Player>>,
    enemy_query: Query<&Enemy>,
) {
    for event in death_events.read() {
        if player_query.get(event.entity).is_ok() {
            info!("Player died, killed by {:?}", event.killed_by);
            session.end_game(&mut cues);
        } else if let Ok(enemy) = enemy_query.get(event.entity) {
            debug!("Enemy {:?} died", event.entity);
            session.add_score(enemy.stats().score_value, &mut cues);
        }
    }
}
