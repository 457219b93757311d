//! Snapshot of every damageable actor, refreshed before decisions are made.

use bevy::prelude::*;
use std::collections::HashMap;

use super::living::Damageable;
use crate::core::{ActorLookup, ActorSnapshot};
use crate::enemies::Enemy;
use crate::player::PlayerHealth;

/// Positions and liveness of all actors, readable while their own
/// components are mutably borrowed elsewhere.
#[derive(Resource, Debug, Default)]
pub struct ActorRoster {
    actors: HashMap<Entity, ActorSnapshot>,
}

impl ActorRoster {
    pub fn insert(&mut self, entity: Entity, snapshot: ActorSnapshot) {
        self.actors.insert(entity, snapshot);
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Mark an actor dead right away so later systems in the same step see it.
    pub fn mark_dead(&mut self, entity: Entity) {
        if let Some(actor) = self.actors.get_mut(&entity) {
            actor.alive = false;
        }
    }
}

impl ActorLookup for ActorRoster {
    fn snapshot(&self, entity: Entity) -> Option<ActorSnapshot> {
        self.actors.get(&entity).copied()
    }
}

pub fn refresh_actor_roster(
    mut roster: ResMut<ActorRoster>,
    actors: Query<(Entity, &Transform, Option<&PlayerHealth>, Option<&Enemy>)>,
) {
    roster.actors.clear();

    for (entity, transform, player, enemy) in actors.iter() {
        let alive = match (player, enemy) {
            (Some(player), _) => !player.is_dead(),
            (None, Some(enemy)) => !enemy.is_dead(),
            (None, None) => continue,
        };

        roster.insert(
            entity,
            ActorSnapshot {
                position: transform.translation,
                damageable: true,
                alive,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemies::{EnemyRig, EnemyStats};

    #[test]
    fn roster_tracks_damageable_actors_only() {
        let mut app = App::new();
        app.init_resource::<ActorRoster>()
            .add_systems(Update, refresh_actor_roster);

        let player = app
            .world_mut()
            .spawn((Transform::from_xyz(1.0, 0.0, 2.0), PlayerHealth::new(100.0)))
            .id();
        let enemy = app
            .world_mut()
            .spawn((
                Transform::default(),
                Enemy::new(EnemyStats::default(), EnemyRig::default(), 50.0),
            ))
            .id();
        let prop = app.world_mut().spawn(Transform::default()).id();

        app.update();

        let roster = app.world().resource::<ActorRoster>();
        assert_eq!(roster.len(), 2);
        assert_eq!(
            roster.snapshot(player).map(|actor| actor.position),
            Some(Vec3::new(1.0, 0.0, 2.0))
        );
        assert!(roster.is_alive(enemy));
        assert_eq!(roster.snapshot(prop), None);
    }

    #[test]
    fn mark_dead_is_visible_immediately() {
        let mut roster = ActorRoster::default();
        let entity = Entity::from_raw(9);
        roster.insert(
            entity,
            ActorSnapshot {
                position: Vec3::ZERO,
                damageable: true,
                alive: true,
            },
        );

        roster.mark_dead(entity);

        assert!(!roster.is_alive(entity));
    }
}
