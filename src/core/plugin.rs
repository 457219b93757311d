//! Core plugin that sets up game states, events, and session flow.

use bevy::prelude::*;

use super::config::{load_gameplay_config, GameplayConfig};
use super::events::*;
use super::host::PresentationCue;
use super::session::GameSession;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, InGame, GameOver)
/// - Global events (DeathEvent, AttackAnimationEvent, PresentationCue)
/// - Gameplay config and the session resource
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()

            // Register global events
            .add_event::<DeathEvent>()
            .add_event::<AttackAnimationEvent>()
            .add_event::<PresentationCue>()

            // Defaults are usable before the file is read
            .init_resource::<GameplayConfig>()
            .init_resource::<GameSession>()

            .add_systems(Startup, load_gameplay_config)

            // Nothing streams in asynchronously yet, so Loading ends at once
            .add_systems(OnEnter(GameState::Loading), transition_to_game)

            .add_systems(
                Update,
                enter_game_over
                    .run_if(in_state(GameState::InGame))
                    .run_if(resource_changed::<GameSession>),
            );
    }
}

/// Run condition: the world is live (playing, or showing the game-over screen).
pub fn gameplay_running(state: Option<Res<State<GameState>>>) -> bool {
    state.is_some_and(|state| *state.get() != GameState::Loading)
}

/// Immediately transition from Loading to InGame.
fn transition_to_game(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::InGame);
}

/// Mirror the session's game-over flag into the state machine.
fn enter_game_over(session: Res<GameSession>, mut next_state: ResMut<NextState<GameState>>) {
    if session.is_game_over() {
        next_state.set(GameState::GameOver);
    }
}
