//! Keyboard and mouse to player actions.

use bevy::prelude::*;

use crate::core::GameSession;

/// Player intent for the current frame.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    /// x = strafe (right positive), y = forward. Length never exceeds 1.
    pub move_input: Vec2,
    /// Held
    pub fire: bool,
    /// Pressed this frame
    pub reload: bool,
    /// Pressed this frame
    pub jump: bool,
}

/// Key assignments.
#[derive(Resource, Debug, Clone)]
pub struct InputBindings {
    pub forward: KeyCode,
    pub back: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub fire: MouseButton,
    pub reload: KeyCode,
    pub jump: KeyCode,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            forward: KeyCode::KeyW,
            back: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            fire: MouseButton::Left,
            reload: KeyCode::KeyR,
            jump: KeyCode::Space,
        }
    }
}

/// Map raw button state to actions. Everything reads as idle once the game is over.
pub fn map_input(
    bindings: &InputBindings,
    keyboard: &ButtonInput<KeyCode>,
    mouse: &ButtonInput<MouseButton>,
    game_over: bool,
) -> PlayerInput {
    if game_over {
        return PlayerInput::default();
    }

    let axis = |positive: KeyCode, negative: KeyCode| {
        let mut value = 0.0;
        if keyboard.pressed(positive) {
            value += 1.0;
        }
        if keyboard.pressed(negative) {
            value -= 1.0;
        }
        value
    };

    let mut move_input = Vec2::new(
        axis(bindings.right, bindings.left),
        axis(bindings.forward, bindings.back),
    );
    // Diagonals would otherwise be faster
    if move_input.length_squared() > 1.0 {
        move_input = move_input.normalize();
    }

    PlayerInput {
        move_input,
        fire: mouse.pressed(bindings.fire),
        reload: keyboard.just_pressed(bindings.reload),
        jump: keyboard.just_pressed(bindings.jump),
    }
}

pub fn read_player_input(
    bindings: Res<InputBindings>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    session: Res<GameSession>,
    mut players: Query<&mut PlayerInput>,
) {
    let input = map_input(&bindings, &keyboard, &mouse, session.is_game_over());

    for mut player_input in players.iter_mut() {
        player_input.set_if_neq(input);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn keys(pressed: &[KeyCode]) -> ButtonInput<KeyCode> {
        let mut input = ButtonInput::default();
        for key in pressed {
            input.press(*key);
        }
        input
    }

    #[test]
    fn diagonal_movement_is_normalized() {
        let bindings = InputBindings::default();
        let keyboard = keys(&[KeyCode::KeyW, KeyCode::KeyD]);
        let mouse = ButtonInput::default();

        let input = map_input(&bindings, &keyboard, &mouse, false);

        assert_relative_eq!(input.move_input.length(), 1.0, epsilon = 1e-6);
        assert!(input.move_input.x > 0.0 && input.move_input.y > 0.0);
    }

    #[test]
    fn opposite_keys_cancel() {
        let bindings = InputBindings::default();
        let keyboard = keys(&[KeyCode::KeyA, KeyCode::KeyD, KeyCode::KeyS]);
        let mouse = ButtonInput::default();

        let input = map_input(&bindings, &keyboard, &mouse, false);

        assert_eq!(input.move_input, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn buttons_map_to_actions() {
        let bindings = InputBindings::default();
        let keyboard = keys(&[KeyCode::KeyR, KeyCode::Space]);
        let mut mouse = ButtonInput::default();
        mouse.press(MouseButton::Left);

        let input = map_input(&bindings, &keyboard, &mouse, false);

        assert!(input.fire);
        assert!(input.reload);
        assert!(input.jump);
    }

    #[test]
    fn game_over_clears_every_action() {
        let bindings = InputBindings::default();
        let keyboard = keys(&[KeyCode::KeyW, KeyCode::KeyR, KeyCode::Space]);
        let mut mouse = ButtonInput::default();
        mouse.press(MouseButton::Left);

        let input = map_input(&bindings, &keyboard, &mouse, true);

        assert_eq!(input, PlayerInput::default());
    }
}
