//! Numeric HUD readout.

use bevy::prelude::*;

use crate::core::{HudUpdate, PresentationCue};

/// Latest values the HUD should display. Layout is left to the host UI.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct HudReadout {
    pub score: u32,
    pub health: f32,
    pub magazine: u32,
    pub reserve: u32,
    pub game_over: bool,
}

impl HudReadout {
    pub fn apply(&mut self, update: HudUpdate) {
        match update {
            HudUpdate::Score(score) => self.score = score,
            HudUpdate::Health(health) => self.health = health,
            HudUpdate::Ammo { magazine, reserve } => {
                self.magazine = magazine;
                self.reserve = reserve;
            }
            HudUpdate::GameOver => self.game_over = true,
        }
    }
}

pub fn update_hud_readout(mut cues: EventReader<PresentationCue>, mut hud: ResMut<HudReadout>) {
    for cue in cues.read() {
        if let PresentationCue::Hud(update) = *cue {
            hud.apply(update);
        }
    }
}
