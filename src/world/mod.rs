//! World module - the arena the prototype plays in.

mod builder;
mod data;
mod plugin;

pub use builder::{ArenaGeometry, FollowCamera};
pub use data::{ArenaDefinition, EnemyPlacement};
pub use plugin::{setup_arena, WorldPlugin};
