//! Animator parameter store fed by presentation cues, and the attack clip
//! driver that turns the "Attack" trigger into damage-window events.

use bevy::prelude::*;
use std::collections::HashMap;
use std::time::Duration;

use crate::combat::GameplaySet;
use crate::core::{AttackAnimationEvent, PresentationCue};
use crate::enemies::{ATTACK_TRIGGER, DIE_TRIGGER};

/// Parameters an animation graph would read. Triggers queue until consumed.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct AnimatorParameters {
    triggers: Vec<&'static str>,
    floats: HashMap<&'static str, f32>,
    root_motion: bool,
    current_clip: Option<&'static str>,
}

impl AnimatorParameters {
    pub fn set_trigger(&mut self, name: &'static str) {
        self.triggers.push(name);
    }

    pub fn set_float(&mut self, name: &'static str, value: f32) {
        self.floats.insert(name, value);
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        self.floats.get(name).copied()
    }

    pub fn set_root_motion(&mut self, enabled: bool) {
        self.root_motion = enabled;
    }

    pub fn root_motion(&self) -> bool {
        self.root_motion
    }

    /// Pending triggers in firing order; clears the queue.
    pub fn take_triggers(&mut self) -> Vec<&'static str> {
        std::mem::take(&mut self.triggers)
    }

    pub fn has_pending_trigger(&self, name: &str) -> bool {
        self.triggers.contains(&name)
    }

    /// Last one-shot clip started from a trigger.
    pub fn current_clip(&self) -> Option<&'static str> {
        self.current_clip
    }
}

/// Marker events an attack clip emits while playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipSignal {
    /// Hit frame reached: open the damage window
    Enable,
    /// Clip finished: close it
    Disable,
}

#[derive(Debug, Clone)]
struct ClipPlayback {
    timer: Timer,
    enabled: bool,
}

/// Timing of an actor's attack clip.
///
/// `hit_frame` is the fraction of `duration` at which the damage window opens.
/// It closes when the clip ends.
#[derive(Component, Debug, Clone)]
pub struct AttackClip {
    duration: f32,
    hit_frame: f32,
    playback: Option<ClipPlayback>,
}

impl AttackClip {
    pub fn new(duration: f32, hit_frame: f32) -> Self {
        Self {
            duration: duration.max(0.05),
            hit_frame: hit_frame.clamp(0.0, 1.0),
            playback: None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_some()
    }

    /// Restart the clip from its first frame.
    pub fn start(&mut self) {
        self.playback = Some(ClipPlayback {
            timer: Timer::from_seconds(self.duration, TimerMode::Once),
            enabled: false,
        });
    }

    /// Drop playback without signalling (the actor died mid-swing).
    pub fn cancel(&mut self) {
        self.playback = None;
    }

    /// Advance playback; returns the markers crossed during `delta`.
    pub fn advance(&mut self, delta: Duration) -> Vec<ClipSignal> {
        let mut signals = Vec::new();
        let Some(playback) = self.playback.as_mut() else {
            return signals;
        };

        playback.timer.tick(delta);
        let progress = playback.timer.elapsed_secs() / self.duration;

        if !playback.enabled && progress >= self.hit_frame {
            playback.enabled = true;
            signals.push(ClipSignal::Enable);
        }
        if playback.timer.finished() {
            signals.push(ClipSignal::Disable);
            self.playback = None;
        }

        signals
    }
}

pub fn record_animation_cues(
    mut cues: EventReader<PresentationCue>,
    mut animators: Query<&mut AnimatorParameters>,
) {
    for cue in cues.read() {
        match *cue {
            PresentationCue::AnimationTrigger { entity, name } => {
                if let Ok(mut animator) = animators.get_mut(entity) {
                    animator.set_trigger(name);
                }
            }
            PresentationCue::AnimationFloat {
                entity,
                name,
                value,
            } => {
                if let Ok(mut animator) = animators.get_mut(entity) {
                    animator.set_float(name, value);
                }
            }
            PresentationCue::RootMotion { entity, enabled } => {
                if let Ok(mut animator) = animators.get_mut(entity) {
                    animator.set_root_motion(enabled);
                }
            }
            _ => {}
        }
    }
}

/// Consume queued triggers and drive attack clips on simulated time.
pub fn play_animator_triggers(
    time: Res<Time>,
    mut events: EventWriter<AttackAnimationEvent>,
    mut animators: Query<(Entity, &mut AnimatorParameters, Option<&mut AttackClip>)>,
) {
    for (entity, mut animator, mut clip) in animators.iter_mut() {
        if let Some(clip) = clip.as_deref_mut() {
            for signal in clip.advance(time.delta()) {
                events.send(match signal {
                    ClipSignal::Enable => AttackAnimationEvent::Enable(entity),
                    ClipSignal::Disable => AttackAnimationEvent::Disable(entity),
                });
            }
        }

        for trigger in animator.take_triggers() {
            animator.current_clip = Some(trigger);
            let Some(clip) = clip.as_deref_mut() else {
                continue;
            };
            if trigger == ATTACK_TRIGGER {
                clip.start();
            } else if trigger == DIE_TRIGGER {
                clip.cancel();
            }
        }
    }
}

/// Animator state runs headless too: the attack window depends on it.
pub struct AnimatorPlugin;

impl Plugin for AnimatorPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (record_animation_cues, play_animator_triggers)
                .chain()
                .in_set(GameplaySet::React),
        );
    }
}
