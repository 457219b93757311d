//! Physics module - collision layers and the rapier query adapter.

mod layers;
mod plugin;
mod rapier;

pub use layers::*;
pub use plugin::PhysicsPlugin;
pub use rapier::RapierSpatialQuery;
