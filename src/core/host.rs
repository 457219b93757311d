//! Narrow interfaces to the host engine.
//!
//! Gameplay code never talks to rapier, the navigation agent or the audio
//! backend directly. It goes through these traits so the decision logic can
//! run against hand-written fakes in tests. The App wires in the real
//! adapters (`NavAgent`, `RapierSpatialQuery`, the `PresentationCue` stream).

use bevy::prelude::*;
use rand::RngCore;

/// Classification tag used to filter spatial queries to relevant actors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TargetLayer {
    #[default]
    Player,
    Enemy,
}

/// Host navigation agent (pathfinding + steering live on the host side).
pub trait Navigation {
    fn set_destination(&mut self, point: Vec3);
    /// Remaining path distance to the current destination (0 without one).
    fn remaining_distance(&self) -> f32;
    /// Velocity the agent wants to move with this step.
    fn desired_velocity(&self) -> Vec3;
    /// Velocity the agent actually moved with during the last step.
    fn velocity(&self) -> Vec3;
    fn set_speed(&mut self, speed: f32);
    fn set_stopping_distance(&mut self, distance: f32);
    fn stop(&mut self);
    fn resume(&mut self);
    /// Permanently switch the agent off (death).
    fn disable(&mut self);
    /// Random point on the traversable surface within `radius` of `center`.
    fn sample_reachable_point(
        &self,
        center: Vec3,
        radius: f32,
        rng: &mut dyn RngCore,
    ) -> Option<Vec3>;
}

/// Nearest hit of a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    pub point: Vec3,
    pub normal: Vec3,
    pub distance: f32,
}

/// One contact reported by a swept-volume query.
///
/// `distance` is zero when the volume already overlapped the collider at
/// the start of the sweep; `point` is not meaningful in that case.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepHit {
    pub entity: Entity,
    pub point: Vec3,
    pub normal: Vec3,
    pub distance: f32,
}

/// Host physics queries.
pub trait SpatialQuery {
    /// All actors of `layer` whose colliders touch the sphere, in host order.
    fn overlap_sphere(
        &self,
        center: Vec3,
        radius: f32,
        layer: TargetLayer,
        exclude: Option<Entity>,
    ) -> Vec<Entity>;

    /// Nearest collider of any layer hit along the ray.
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        exclude: Option<Entity>,
    ) -> Option<RayHit>;

    /// Sphere swept from `origin` along `direction` for `distance`.
    fn sweep_sphere(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        distance: f32,
        layer: TargetLayer,
        exclude: Option<Entity>,
    ) -> Vec<SweepHit>;
}

/// What the AI needs to know about another actor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorSnapshot {
    pub position: Vec3,
    /// Carries a health lifecycle (can be damaged)
    pub damageable: bool,
    pub alive: bool,
}

/// Read access to other actors by id.
pub trait ActorLookup {
    fn snapshot(&self, entity: Entity) -> Option<ActorSnapshot>;

    fn is_alive(&self, entity: Entity) -> bool {
        self.snapshot(entity)
            .is_some_and(|actor| actor.damageable && actor.alive)
    }
}

/// Hit effect flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EffectKind {
    /// Sparks/dust for inanimate surfaces
    #[default]
    Common,
    /// Blood for living actors
    Flesh,
}

/// Named one-shot audio clips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCue {
    EnemyHit,
    EnemyDeath,
    PlayerHit,
    PlayerDeath,
}

/// On-screen numeric displays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HudUpdate {
    Score(u32),
    Health(f32),
    /// Rounds in the magazine and in reserve
    Ammo { magazine: u32, reserve: u32 },
    GameOver,
}

/// Fire-and-forget presentation request. Core logic never reads a result.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum PresentationCue {
    AnimationTrigger {
        entity: Entity,
        name: &'static str,
    },
    AnimationFloat {
        entity: Entity,
        name: &'static str,
        value: f32,
    },
    /// Hand body motion over to the animation (death falls)
    RootMotion {
        entity: Entity,
        enabled: bool,
    },
    Audio {
        emitter: Entity,
        clip: AudioCue,
    },
    Effect {
        kind: EffectKind,
        position: Vec3,
        normal: Vec3,
        /// Moving object the effect should follow
        parent: Option<Entity>,
    },
    SkinColor {
        entity: Entity,
        color: Color,
    },
    Hud(HudUpdate),
}

/// Sink for presentation cues.
pub trait Presentation {
    fn cue(&mut self, cue: PresentationCue);
}

impl Presentation for EventWriter<'_, PresentationCue> {
    fn cue(&mut self, cue: PresentationCue) {
        self.send(cue);
    }
}

impl Presentation for Vec<PresentationCue> {
    fn cue(&mut self, cue: PresentationCue) {
        self.push(cue);
    }
}
