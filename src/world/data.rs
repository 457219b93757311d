//! Arena layout loaded from RON.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;

use crate::core::DataLoadError;

/// Default location of the arena file.
pub const ARENA_PATH: &str = "assets/data/arena.ron";

fn default_wall_height() -> f32 {
    3.0
}

fn default_ambient() -> (f32, f32, f32, f32) {
    (0.4, 0.4, 0.5, 300.0)
}

/// One enemy placed in the arena.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EnemyPlacement {
    /// Key into the enemy registry (definition file stem).
    pub enemy_type: String,
    /// Ground position (x, z).
    pub position: (f32, f32),
}

/// Flat rectangular arena centred on the origin.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
pub struct ArenaDefinition {
    pub name: String,
    /// Half size of the floor along x and z.
    pub half_extents: (f32, f32),
    #[serde(default = "default_wall_height")]
    pub wall_height: f32,
    /// Player start (x, z).
    pub player_start: (f32, f32),
    #[serde(default)]
    pub enemies: Vec<EnemyPlacement>,
    /// Ambient light colour and brightness.
    #[serde(default = "default_ambient")]
    pub ambient: (f32, f32, f32, f32),
}

impl Default for ArenaDefinition {
    fn default() -> Self {
        Self {
            name: "Training Yard".to_string(),
            half_extents: (20.0, 20.0),
            wall_height: default_wall_height(),
            player_start: (0.0, 10.0),
            enemies: vec![
                EnemyPlacement {
                    enemy_type: "zombie".to_string(),
                    position: (-6.0, -8.0),
                },
                EnemyPlacement {
                    enemy_type: "zombie".to_string(),
                    position: (6.0, -8.0),
                },
            ],
            ambient: default_ambient(),
        }
    }
}

impl ArenaDefinition {
    pub fn from_ron(path: &str, contents: &str) -> Result<Self, DataLoadError> {
        ron::from_str(contents).map_err(|e| DataLoadError::ParseError {
            path: path.to_string(),
            details: e.to_string(),
        })
    }

    /// Area the navigation agents may walk in.
    pub fn walkable_area(&self) -> Rect {
        let (x, z) = self.half_extents;
        Rect::new(-x, -z, x, z)
    }

    pub fn contains(&self, position: (f32, f32)) -> bool {
        self.walkable_area()
            .contains(Vec2::new(position.0, position.1))
    }

    /// Placements that fall outside the floor.
    pub fn misplaced_enemies(&self) -> impl Iterator<Item = &EnemyPlacement> {
        self.enemies
            .iter()
            .filter(|placement| !self.contains(placement.position))
    }
}

/// System to read the arena file at startup, keeping the built-in yard on failure.
pub fn load_arena_definition(mut commands: Commands) {
    let loaded = fs::read_to_string(ARENA_PATH)
        .map_err(|e| DataLoadError::ReadError {
            path: ARENA_PATH.to_string(),
            details: e.to_string(),
        })
        .and_then(|contents| ArenaDefinition::from_ron(ARENA_PATH, &contents));

    let arena = match loaded {
        Ok(arena) => {
            info!("Loaded arena: {}", arena.name);
            arena
        }
        Err(e) => {
            warn!("{}. Using the default arena.", e);
            ArenaDefinition::default()
        }
    };

    for placement in arena.misplaced_enemies() {
        warn!(
            "{} at ({}, {}) is outside the arena floor",
            placement.enemy_type, placement.position.0, placement.position.1
        );
    }

    commands.insert_resource(arena);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_arena_with_defaults() {
        let arena = ArenaDefinition::from_ron(
            "arena.ron",
            r#"(
                name: "Pit",
                half_extents: (10.0, 5.0),
                player_start: (0.0, 0.0),
                enemies: [(enemy_type: "zombie", position: (3.0, -2.0))],
            )"#,
        )
        .unwrap();

        assert_eq!(arena.wall_height, 3.0);
        assert_eq!(arena.enemies.len(), 1);
        assert_eq!(arena.walkable_area(), Rect::new(-10.0, -5.0, 10.0, 5.0));
    }

    #[test]
    fn placements_outside_the_floor_are_reported() {
        let mut arena = ArenaDefinition::default();
        arena.enemies.push(EnemyPlacement {
            enemy_type: "zombie".to_string(),
            position: (0.0, 40.0),
        });

        let misplaced: Vec<_> = arena.misplaced_enemies().collect();
        assert_eq!(misplaced.len(), 1);
        assert_eq!(misplaced[0].position, (0.0, 40.0));
    }

    #[test]
    fn missing_field_is_a_parse_error() {
        let err = ArenaDefinition::from_ron("arena.ron", r#"(name: "Pit")"#).unwrap_err();
        assert!(matches!(err, DataLoadError::ParseError { .. }));
    }
}
