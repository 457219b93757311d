//! Score keeping and game-over flow.

use bevy::prelude::*;

use super::host::{HudUpdate, Presentation, PresentationCue};

/// Score and game-over flag for the running session.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct GameSession {
    score: u32,
    game_over: bool,
}

impl GameSession {
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Add to the score. Ignored once the game is over.
    pub fn add_score(&mut self, points: u32, presentation: &mut dyn Presentation) {
        if self.game_over {
            return;
        }

        self.score = self.score.saturating_add(points);
        presentation.cue(PresentationCue::Hud(HudUpdate::Score(self.score)));
    }

    /// End the session. Later calls are no-ops.
    pub fn end_game(&mut self, presentation: &mut dyn Presentation) {
        if self.game_over {
            return;
        }

        self.game_over = true;
        presentation.cue(PresentationCue::Hud(HudUpdate::GameOver));
        info!("Game over with score {}", self.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_accumulates_and_is_published() {
        let mut session = GameSession::default();
        let mut cues: Vec<PresentationCue> = Vec::new();

        session.add_score(100, &mut cues);
        session.add_score(50, &mut cues);

        assert_eq!(session.score(), 150);
        assert_eq!(
            cues,
            vec![
                PresentationCue::Hud(HudUpdate::Score(100)),
                PresentationCue::Hud(HudUpdate::Score(150)),
            ]
        );
    }

    #[test]
    fn score_frozen_after_game_over() {
        let mut session = GameSession::default();
        let mut cues: Vec<PresentationCue> = Vec::new();

        session.add_score(10, &mut cues);
        session.end_game(&mut cues);
        session.add_score(90, &mut cues);
        session.end_game(&mut cues);

        assert!(session.is_game_over());
        assert_eq!(session.score(), 10);
        assert_eq!(
            cues,
            vec![
                PresentationCue::Hud(HudUpdate::Score(10)),
                PresentationCue::Hud(HudUpdate::GameOver),
            ]
        );
    }
}
