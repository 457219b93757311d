//! Navigation module - the steering agent and patrol randomness.

mod agent;
mod plugin;

pub use agent::{steer_agents, NavAgent};
pub use plugin::{NavigationPlugin, PatrolRng, WalkableArea};
