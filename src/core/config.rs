//! Gameplay tuning loaded from an external RON file.
//!
//! Lets designers tweak cadences and ranges without recompilation.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;

use super::error::DataLoadError;

/// Default location of the tuning file.
pub const GAMEPLAY_CONFIG_PATH: &str = "assets/data/gameplay.ron";

/// Gameplay tuning loaded from assets/data/gameplay.ron.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Seconds between perception cycles (simulated time)
    pub perception_interval: f32,
    /// Patrol picks a new waypoint once the remaining path is this short
    pub patrol_repath_distance: f32,
    /// Radius around the enemy to sample patrol waypoints from
    pub patrol_radius: f32,
    /// Seconds after an accepted hit during which further damage is ignored
    pub invulnerability_window: f32,
    /// Seconds a spawned hit effect stays alive
    pub effect_lifetime: f32,
    /// Seed for patrol waypoint sampling
    pub patrol_seed: u64,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            perception_interval: 0.05,
            patrol_repath_distance: 3.0,
            patrol_radius: 20.0,
            invulnerability_window: 0.1,
            effect_lifetime: 1.0,
            patrol_seed: 42,
        }
    }
}

impl GameplayConfig {
    /// Parse a config from RON text.
    pub fn from_ron(path: &str, contents: &str) -> Result<Self, DataLoadError> {
        ron::from_str(contents).map_err(|e| DataLoadError::ParseError {
            path: path.to_string(),
            details: e.to_string(),
        })
    }

    /// Read and parse a config file.
    pub fn read(path: &str) -> Result<Self, DataLoadError> {
        let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
            path: path.to_string(),
            details: e.to_string(),
        })?;
        Self::from_ron(path, &contents)
    }

    /// Load the config, falling back to defaults when the file is unusable.
    pub fn load() -> Self {
        match Self::read(GAMEPLAY_CONFIG_PATH) {
            Ok(config) => {
                info!("Loaded gameplay config from {}", GAMEPLAY_CONFIG_PATH);
                config
            }
            Err(e @ DataLoadError::ReadError { .. }) => {
                warn!("{}. Using defaults.", e);
                Self::default()
            }
            Err(e) => {
                error!("{}. Using defaults.", e);
                Self::default()
            }
        }
    }
}

/// System to load gameplay config at startup.
pub fn load_gameplay_config(mut commands: Commands) {
    commands.insert_resource(GameplayConfig::load());
}
