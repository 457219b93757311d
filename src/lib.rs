//! TPS Prototype - gameplay core of a third-person shooter in Bevy.
//!
//! Enemies patrol, spot the player through a view cone and line of sight,
//! chase, and strike with a swept attack volume. Player and enemies share one
//! health and damage lifecycle.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, host interfaces, session flow
//! - **Combat**: Health lifecycle, damage resolution, death bookkeeping
//! - **Enemies**: Perception, the combat state machine, definitions, spawning
//! - **Player**: Input mapping, movement, player health
//! - **Navigation**: Steering agent and patrol randomness
//! - **Physics**: Collision layers and the rapier query adapter
//! - **Presentation**: Animator parameters, hit effects, audio, HUD readout
//! - **World**: The arena, player start and enemy placements
//!
//! Gameplay logic talks to the engine only through the traits in `core::host`,
//! so it can be unit tested without a running App.

pub mod combat;
pub mod core;
pub mod enemies;
pub mod navigation;
pub mod physics;
pub mod player;
pub mod presentation;
pub mod world;

use bevy::prelude::*;

/// Gameplay plugins without the arena; enough for headless simulations.
///
/// Includes the animator, since attack clips open and close damage windows.
pub struct GameplayPlugins;

impl Plugin for GameplayPlugins {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)
            .add_plugins(combat::CombatPlugin)
            .add_plugins(physics::PhysicsPlugin)
            .add_plugins(navigation::NavigationPlugin)
            .add_plugins(player::PlayerPlugin)
            .add_plugins(enemies::EnemyPlugin)
            .add_plugins(presentation::AnimatorPlugin);
    }
}

/// Main game plugin that adds all sub-plugins.
///
/// Expects `RapierPhysicsPlugin` and bevy_kira_audio's `AudioPlugin` to be
/// added by the application.
pub struct PrototypePlugin;

impl Plugin for PrototypePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(GameplayPlugins)
            .add_plugins(presentation::PresentationPlugin)
            .add_plugins(world::WorldPlugin);
    }
}
