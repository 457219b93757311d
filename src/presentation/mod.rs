//! Presentation module - host side of the cue stream.
//!
//! Gameplay code only emits `PresentationCue`s; everything here consumes them.

mod animator;
mod audio;
mod effects;
mod hud;
mod plugin;
mod skin;

pub use animator::{AnimatorParameters, AnimatorPlugin, AttackClip, ClipSignal};
pub use audio::AudioLibrary;
pub use effects::{effect_transform, EffectLibrary, HitEffect};
pub use hud::HudReadout;
pub use plugin::PresentationPlugin;
pub use skin::{SkinTint, TintedMaterial};
