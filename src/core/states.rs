//! Game state definitions that control the overall flow of the game.
//!
//! Gameplay systems run in `InGame` and keep running in `GameOver`, where
//! input reads as idle. Nothing runs while `Loading`. The session flips to
//! `GameOver` when the player dies.

use bevy::prelude::*;

/// Main game states.
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading config and definition files
    #[default]
    Loading,
    /// Active gameplay
    InGame,
    /// Player has died; corpses stay, AI keeps its last state
    GameOver,
}
