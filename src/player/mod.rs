//! Player module - player entity, input mapping, movement and health.

mod components;
mod input;
mod movement;
mod plugin;
mod shooter;

pub use components::*;
pub use input::{map_input, read_player_input, InputBindings, PlayerInput};
pub use movement::spawn_player;
pub use plugin::PlayerPlugin;
pub use shooter::{
    AimState, Gun, GunConfig, GunState, PlayerShooter, RELOAD_TRIGGER, SHOOT_TRIGGER,
};
