//! Enemy data loading from RON files.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::components::{EnemyRig, EnemySetup, EnemyStats};
use crate::core::{ConfigError, DataLoadError};

pub const ENEMIES_DIR: &str = "assets/data/enemies";

/// Collider configuration for an enemy type.
#[derive(Deserialize, Clone, Debug)]
pub struct ColliderConfig {
    pub half_height: f32,
    pub radius: f32,
}

impl Default for ColliderConfig {
    fn default() -> Self {
        Self {
            half_height: 0.6,
            radius: 0.4,
        }
    }
}

impl ColliderConfig {
    /// Height of the capsule's lowest point above its center.
    pub fn center_height(&self) -> f32 {
        self.half_height + self.radius
    }
}

/// Attack clip timing, the way an authored clip places its hit frame.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    /// Seconds from the "Attack" trigger to the end of the clip
    pub attack_duration: f32,
    /// Fraction of the clip at which the damage window opens
    pub attack_hit_frame: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            attack_duration: 1.0,
            attack_hit_frame: 0.4,
        }
    }
}

fn default_turn_smooth_time() -> f32 {
    0.1
}

fn default_scale() -> f32 {
    1.0
}

/// Enemy definition loaded from RON file.
#[derive(Deserialize, Clone, Debug)]
pub struct EnemyDefinition {
    pub name: String,
    pub max_health: f32,
    pub damage: f32,
    pub run_speed: f32,
    pub patrol_speed: f32,
    pub attack_radius: f32,
    /// Degrees
    pub field_of_view: f32,
    pub view_distance: f32,
    #[serde(default = "default_turn_smooth_time")]
    pub turn_smooth_time: f32,
    #[serde(default)]
    pub score_value: u32,
    #[serde(default)]
    pub model_path: String,
    #[serde(default = "default_scale")]
    pub scale: f32,
    #[serde(default)]
    pub collider: Option<ColliderConfig>,
    /// Eye point relative to the enemy origin
    #[serde(default)]
    pub eye: Option<(f32, f32, f32)>,
    /// Center of the attack sphere relative to the enemy origin
    #[serde(default)]
    pub attack_root: Option<(f32, f32, f32)>,
    #[serde(default)]
    pub skin_color: Option<(f32, f32, f32)>,
    #[serde(default)]
    pub animation: AnimationConfig,
}

impl EnemyDefinition {
    pub fn from_ron(path: &str, contents: &str) -> Result<Self, DataLoadError> {
        ron::from_str(contents).map_err(|e| DataLoadError::ParseError {
            path: path.to_string(),
            details: e.to_string(),
        })
    }

    /// Convert to EnemyStats.
    pub fn to_stats(&self) -> EnemyStats {
        EnemyStats {
            run_speed: self.run_speed,
            patrol_speed: self.patrol_speed,
            damage: self.damage,
            attack_radius: self.attack_radius,
            field_of_view: self.field_of_view,
            view_distance: self.view_distance,
            turn_smooth_time: self.turn_smooth_time.clamp(0.01, 2.0),
            score_value: self.score_value,
        }
    }

    /// Rig points. Both are required for perception and attacks.
    pub fn to_rig(&self) -> Result<EnemyRig, ConfigError> {
        let eye = self.eye.ok_or_else(|| ConfigError::MissingPart {
            actor: self.name.clone(),
            part: "eye",
        })?;
        let attack_root = self.attack_root.ok_or_else(|| ConfigError::MissingPart {
            actor: self.name.clone(),
            part: "attack_root",
        })?;

        Ok(EnemyRig {
            eye_offset: Vec3::new(eye.0, eye.1, eye.2),
            attack_root_offset: Vec3::new(attack_root.0, attack_root.1, attack_root.2),
        })
    }

    /// Spawner parameters matching this definition.
    pub fn default_setup(&self) -> EnemySetup {
        let (r, g, b) = self.skin_color.unwrap_or((1.0, 1.0, 1.0));
        EnemySetup {
            health: self.max_health,
            damage: self.damage,
            run_speed: self.run_speed,
            patrol_speed: self.patrol_speed,
            skin_color: Color::srgb(r, g, b),
        }
    }
}

/// Resource holding all loaded enemy definitions.
#[derive(Resource, Default)]
pub struct EnemyRegistry {
    pub definitions: HashMap<String, EnemyDefinition>,
}

impl EnemyRegistry {
    /// Get an enemy definition by type name.
    pub fn get(&self, enemy_type: &str) -> Result<&EnemyDefinition, ConfigError> {
        self.definitions
            .get(enemy_type)
            .ok_or_else(|| ConfigError::UnknownEnemyType(enemy_type.to_string()))
    }
}

/// Parse every `.ron` file in `dir`, keyed by file stem.
///
/// Files that fail to read or parse are reported and skipped.
pub fn read_enemy_definitions(
    dir: &Path,
) -> Result<Vec<(String, Result<EnemyDefinition, DataLoadError>)>, DataLoadError> {
    let entries = fs::read_dir(dir).map_err(|e| DataLoadError::ReadError {
        path: dir.display().to_string(),
        details: e.to_string(),
    })?;

    let mut definitions = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.extension().is_some_and(|ext| ext == "ron") {
            continue;
        }

        let enemy_type = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();
        let display = path.display().to_string();

        let loaded = fs::read_to_string(&path)
            .map_err(|e| DataLoadError::ReadError {
                path: display.clone(),
                details: e.to_string(),
            })
            .and_then(|contents| EnemyDefinition::from_ron(&display, &contents));
        definitions.push((enemy_type, loaded));
    }

    Ok(definitions)
}

/// Load all enemy definitions from the assets/data/enemies/ directory.
pub fn load_enemy_definitions(mut registry: ResMut<EnemyRegistry>) {
    let enemies_dir = Path::new(ENEMIES_DIR);

    if !enemies_dir.exists() {
        warn!("{}", DataLoadError::FileNotFound(ENEMIES_DIR.to_string()));
        return;
    }

    let definitions = match read_enemy_definitions(enemies_dir) {
        Ok(definitions) => definitions,
        Err(e) => {
            warn!("{}", e);
            return;
        }
    };

    for (enemy_type, loaded) in definitions {
        match loaded {
            Ok(definition) => {
                info!("Loaded enemy definition: {} ({})", definition.name, enemy_type);
                registry.definitions.insert(enemy_type, definition);
            }
            Err(e) => error!("{}", e),
        }
    }

    info!("Loaded {} enemy definitions", registry.definitions.len());
}
