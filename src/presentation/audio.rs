//! One-shot clips through kira.

use bevy::prelude::*;
use bevy_kira_audio::{Audio, AudioControl, AudioSource};
use std::collections::HashMap;

use crate::core::{AudioCue, PresentationCue};

/// Asset paths of the one-shot clips.
#[derive(Resource, Debug, Clone)]
pub struct AudioLibrary {
    clips: HashMap<AudioCue, String>,
}

impl Default for AudioLibrary {
    fn default() -> Self {
        let clips = [
            (AudioCue::EnemyHit, "audio/enemy_hit.ogg"),
            (AudioCue::EnemyDeath, "audio/enemy_death.ogg"),
            (AudioCue::PlayerHit, "audio/player_hit.ogg"),
            (AudioCue::PlayerDeath, "audio/player_death.ogg"),
        ]
        .into_iter()
        .map(|(cue, path)| (cue, path.to_string()))
        .collect();

        Self { clips }
    }
}

impl AudioLibrary {
    pub fn path(&self, clip: AudioCue) -> Option<&str> {
        self.clips.get(&clip).map(String::as_str)
    }

    pub fn set(&mut self, clip: AudioCue, path: impl Into<String>) {
        self.clips.insert(clip, path.into());
    }
}

/// Loaded handles, filled lazily so clips load on first use.
#[derive(Resource, Default)]
pub struct AudioHandles {
    handles: HashMap<AudioCue, Handle<AudioSource>>,
}

pub fn play_audio_cues(
    mut cues: EventReader<PresentationCue>,
    library: Res<AudioLibrary>,
    mut handles: ResMut<AudioHandles>,
    asset_server: Res<AssetServer>,
    audio: Res<Audio>,
) {
    for cue in cues.read() {
        let PresentationCue::Audio { clip, .. } = *cue else {
            continue;
        };

        let Some(path) = library.path(clip) else {
            warn!("No audio clip configured for {:?}", clip);
            continue;
        };

        let handle = handles
            .handles
            .entry(clip)
            .or_insert_with(|| asset_server.load(path.to_string()))
            .clone();
        audio.play(handle);
    }
}
