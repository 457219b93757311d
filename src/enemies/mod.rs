//! Enemies module - enemy actors, perception, attacks and spawning.

mod ai;
mod attack;
mod components;
pub mod data;
mod enemy;
mod perception;
mod plugin;
mod spawning;
#[cfg(test)]
pub(crate) mod testing;

pub use attack::Strike;
pub use components::*;
pub use data::{AnimationConfig, ColliderConfig, EnemyDefinition, EnemyRegistry};
pub use enemy::{Enemy, ATTACK_TRIGGER, DIE_TRIGGER, SPEED_PARAMETER};
pub use perception::{Perception, Senses};
pub use plugin::EnemyPlugin;
pub use spawning::{build_enemy, spawn_enemy, ReactivateEnemyEvent, SpawnEnemyEvent};
