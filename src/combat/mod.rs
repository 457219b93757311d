//! Combat module - health lifecycle, actor roster and damage resolution.

mod living;
mod plugin;
mod roster;
mod systems;

pub use living::*;
pub use plugin::CombatPlugin;
pub use roster::{refresh_actor_roster, ActorRoster};
pub use systems::{GameplaySet, RestoreHealthEvent};
