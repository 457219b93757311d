//! Presentation plugin - turns cues into effects, sounds and readouts.

use bevy::prelude::*;

use super::audio::{play_audio_cues, AudioHandles, AudioLibrary};
use super::effects::{expire_hit_effects, spawn_hit_effects, EffectLibrary};
use super::hud::{update_hud_readout, HudReadout};
use super::skin::{record_skin_tints, tint_skin_materials};
use crate::combat::GameplaySet;

/// Expects bevy_kira_audio's `AudioPlugin` to be added by the application.
pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<EffectLibrary>()
            .init_resource::<AudioLibrary>()
            .init_resource::<AudioHandles>()
            .init_resource::<HudReadout>()
            .add_systems(
                Update,
                (
                    spawn_hit_effects,
                    expire_hit_effects,
                    play_audio_cues,
                    update_hud_readout,
                    (record_skin_tints, tint_skin_materials).chain(),
                )
                    .in_set(GameplaySet::React),
            );
    }
}
