//! Navigation plugin - moves agents on the fixed step.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::agent::steer_agents;
use crate::combat::GameplaySet;
use crate::core::{gameplay_running, GameplayConfig};

/// Random source for patrol waypoints. Seeded so runs are reproducible.
#[derive(Resource)]
pub struct PatrolRng(pub StdRng);

impl PatrolRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for PatrolRng {
    fn default() -> Self {
        Self::seeded(GameplayConfig::default().patrol_seed)
    }
}

/// XZ bounds of the walkable floor. Agents spawned while it exists stay inside.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct WalkableArea(pub Rect);

pub struct NavigationPlugin;

impl Plugin for NavigationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PatrolRng>()
            .add_systems(PostStartup, reseed_patrol_rng)
            .add_systems(
                FixedUpdate,
                steer_agents
                    .in_set(GameplaySet::Move)
                    .run_if(gameplay_running),
            );
    }
}

/// The config file is read at Startup, after the resource was created.
fn reseed_patrol_rng(config: Res<GameplayConfig>, mut rng: ResMut<PatrolRng>) {
    *rng = PatrolRng::seeded(config.patrol_seed);
}
