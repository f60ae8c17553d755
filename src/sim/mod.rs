//! Deterministic simulation module
//!
//! All prop logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Timers through the injected scheduler only
//! - Stable iteration order (by entity ID)
//! - No audio, rendering or platform dependencies

pub mod blast;
pub mod detonation;
pub mod gnome;
pub mod gun;
pub mod scheduler;
pub mod world;

use serde::{Deserialize, Serialize};

/// Host entity handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

pub use blast::{
    AvatarImpact, BlastParams, BodyFlags, BodyKind, ImpulseResult, Target, avatar_impact,
    compute_impulse, compute_spin_perturbation, propagate,
};
pub use detonation::{ChainTrigger, DetonationMode, DetonationRecord, TriggerState};
pub use gnome::Gnome;
pub use gun::{
    Decal, DesktopRig, Gun, GunEvent, HandSmoother, HandTarget, HitKind, Pose, RayHit, Shot,
    closest_hit, decal_for, exponential_smoothing, look_rotation,
};
pub use scheduler::{DeferredQueue, ImmediateScheduler, ScheduledTask, Scheduler};
pub use world::{BlastEvent, BlastWorld, Body};
