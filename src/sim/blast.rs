//! Blast propagation model
//!
//! Turns one detonation into per-body velocity edits and chain-reaction
//! requests. Everything here is a pure function of its inputs plus the
//! injected RNG; applying results to live bodies is the caller's job.

use std::collections::HashSet;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::EntityId;
use crate::consts::*;

/// Fixed blast configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlastParams {
    /// Effective range in meters
    pub radius: f32,
    /// Chain sub-radius is radius / falloff_divisor
    pub falloff_divisor: f32,
    /// Impulse scalar
    pub power: f32,
    /// Upper bound of each random spin axis
    pub spin_rate: f32,
    /// Distance clamp for the inverse-distance falloff
    pub min_distance: f32,
}

impl Default for BlastParams {
    fn default() -> Self {
        Self {
            radius: BLAST_RADIUS,
            falloff_divisor: BLAST_FALLOFF,
            power: BLAST_POWER,
            spin_rate: SPIN_RATE,
            min_distance: MIN_BLAST_DISTANCE,
        }
    }
}

impl BlastParams {
    /// Radius inside which a blasted gnome is asked to chain-detonate
    #[inline]
    pub fn chain_radius(&self) -> f32 {
        self.radius / self.falloff_divisor
    }
}

/// Shape category reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BodyKind {
    #[default]
    Model,
    /// Trigger volume, never pushed by blasts
    Zone,
}

/// Physics flags that decide whether a blast can move a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyFlags {
    pub dynamic: bool,
    pub collisionless: bool,
    pub collisions_will_move: bool,
    pub locked: bool,
    /// Body participates in the dynamic collision layer
    pub collides_with_dynamic: bool,
    pub kind: BodyKind,
}

impl Default for BodyFlags {
    fn default() -> Self {
        Self {
            dynamic: true,
            collisionless: false,
            collisions_will_move: true,
            locked: false,
            collides_with_dynamic: true,
            kind: BodyKind::Model,
        }
    }
}

impl BodyFlags {
    /// Static scenery (walls, floors)
    pub fn fixed() -> Self {
        Self {
            dynamic: false,
            collisions_will_move: false,
            ..Self::default()
        }
    }

    pub fn is_eligible(&self) -> bool {
        self.dynamic
            && !self.collisionless
            && self.collisions_will_move
            && !self.locked
            && self.collides_with_dynamic
            && self.kind != BodyKind::Zone
    }
}

/// Snapshot of a body near the epicenter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: EntityId,
    pub position: Vec3,
    pub velocity: Vec3,
    pub flags: BodyFlags,
}

/// Proposed velocity edit for one blasted body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpulseResult {
    pub new_velocity: Vec3,
    pub new_angular_velocity: Vec3,
    /// Body sat inside the chain sub-radius
    pub chain_requested: bool,
}

/// Push felt by the local avatar from a blast
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AvatarImpact {
    pub thrust: Vec3,
    /// Haptic pulse strength (0-1)
    pub haptic_strength: f32,
}

/// Impulse on a body at `target_position` from a blast at `epicenter`
///
/// Inverse-distance falloff: |impulse| = power / distance. Distances below
/// `min_distance` are clamped; coincident points are pushed straight up.
pub fn compute_impulse(epicenter: Vec3, target_position: Vec3, power: f32, min_distance: f32) -> Vec3 {
    let difference = target_position - epicenter;
    let distance = difference.length();
    let direction = if distance > 0.0 {
        difference / distance
    } else {
        Vec3::Y
    };
    direction * (power / distance.max(min_distance))
}

/// Random spin scaled down by the body's speed
///
/// Slow bodies spin harder. Zero velocity gives zero spin.
pub fn compute_spin_perturbation<R: Rng + ?Sized>(velocity: Vec3, spin_rate: f32, rng: &mut R) -> Vec3 {
    let speed = velocity.length();
    if speed <= f32::EPSILON {
        return Vec3::ZERO;
    }
    let spin = Vec3::new(
        rng.random::<f32>() * spin_rate,
        rng.random::<f32>() * spin_rate,
        rng.random::<f32>() * spin_rate,
    );
    spin / speed
}

/// Run one blast pass over a candidate snapshot
///
/// Candidates come from the host's spatial query and are re-checked here:
/// ineligible bodies, bodies at or beyond the radius, and repeated ids are
/// skipped. Output keeps input order.
pub fn propagate<R: Rng + ?Sized>(
    epicenter: Vec3,
    params: &BlastParams,
    candidates: &[Target],
    rng: &mut R,
) -> Vec<(Target, ImpulseResult)> {
    let chain_radius = params.chain_radius();
    let mut seen = HashSet::with_capacity(candidates.len());
    let mut hits = Vec::new();

    for candidate in candidates {
        if !candidate.flags.is_eligible() {
            continue;
        }
        let distance = candidate.position.distance(epicenter);
        if distance >= params.radius {
            continue;
        }
        if !seen.insert(candidate.id) {
            continue;
        }

        let chain_requested = distance < chain_radius;
        let new_velocity = candidate.velocity
            + compute_impulse(epicenter, candidate.position, params.power, params.min_distance);
        let new_angular_velocity = compute_spin_perturbation(new_velocity, params.spin_rate, rng);

        log::debug!(
            "Blast hit {:?} at {:.2}m: v={:?} chain={}",
            candidate.id,
            distance,
            new_velocity,
            chain_requested
        );

        hits.push((
            *candidate,
            ImpulseResult {
                new_velocity,
                new_angular_velocity,
                chain_requested,
            },
        ));
    }

    hits
}

/// Thrust and haptic feedback for the local avatar
///
/// Applies at any distance; the haptic strength grows with distance up to
/// the blast radius.
pub fn avatar_impact(
    epicenter: Vec3,
    avatar_position: Vec3,
    params: &BlastParams,
    thrust_multiplier: f32,
) -> Option<AvatarImpact> {
    let impulse = compute_impulse(epicenter, avatar_position, params.power, params.min_distance);
    if impulse.length_squared() <= 0.0 {
        return None;
    }
    let distance = avatar_position.distance(epicenter);
    Some(AvatarImpact {
        thrust: impulse * thrust_multiplier,
        haptic_strength: (distance / params.radius).clamp(0.0, 1.0),
    })
}
