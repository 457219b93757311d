//! Combat plugin - damage lifecycle glue shared by players and enemies.

use bevy::prelude::*;

use super::systems;

/// Combat plugin - roster, system ordering, healing and death bookkeeping.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        systems::setup_combat_systems(app);
    }
}
