//! Projectile gun prop
//!
//! Equip lifecycle, trigger and key firing, barrel ray math, hit selection,
//! and smoothing for the desktop hold animation.

use glam::{EulerRot, Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::EntityId;
use crate::Hand;
use crate::consts::*;

/// Key that fires the gun in desktop mode
pub const FIRE_KEY: &str = "f";
/// Haptic pulse on firing
pub const FIRE_HAPTIC_STRENGTH: f32 = 1.0;
pub const FIRE_HAPTIC_DURATION_MS: u32 = 20;
/// Scale applied to head height when placing the desktop hand
const HEAD_OFFSET_MULTIPLIER: f32 = 0.8;
/// Fallback offset when the avatar has no head joint
const DEFAULT_HEAD_OFFSET: f32 = 0.5;

/// World transform of the gun
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }
}

/// One trigger pull
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    pub origin: Vec3,
    /// Unit direction along the barrel
    pub direction: Vec3,
    pub velocity: Vec3,
    /// Hand that gets the haptic pulse
    pub hand: Option<Hand>,
    pub haptic_strength: f32,
    pub haptic_duration_ms: u32,
}

/// What a pick ray struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitKind {
    Entity,
    Avatar,
    Overlay,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayHit {
    pub kind: HitKind,
    pub id: EntityId,
    pub distance: f32,
    pub intersection: Vec3,
    pub surface_normal: Vec3,
}

/// Marker left where a shot landed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decal {
    pub position: Vec3,
    pub rotation: Quat,
    pub lifetime_secs: u32,
}

/// Requests for the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GunEvent {
    /// Show the how-to overlay and start the mouse-equip hand animation
    ShowDesktopAids { hand: Hand },
    /// Remove the overlay and hand animation
    HideDesktopAids,
    Fired(Shot),
}

/// A gun held in one hand
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gun {
    hand: Option<Hand>,
    hmd_active: bool,
    desktop_aids: bool,
    /// Trigger released since the last shot
    trigger_ready: bool,
    /// Earliest time the fire key works again
    key_ready_at_ms: u64,
    /// Barrel position in gun space
    pub barrel_offset: Vec3,
    /// Barrel direction in gun space (any length)
    pub barrel_direction: Vec3,
}

impl Default for Gun {
    fn default() -> Self {
        Self {
            hand: None,
            hmd_active: false,
            desktop_aids: false,
            trigger_ready: true,
            key_ready_at_ms: 0,
            barrel_offset: Vec3::ZERO,
            barrel_direction: Vec3::new(0.0, 0.0, 1000.0),
        }
    }
}

impl Gun {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hand(&self) -> Option<Hand> {
        self.hand
    }

    pub fn desktop_aids_shown(&self) -> bool {
        self.desktop_aids
    }

    pub fn start_equip(&mut self, hand: Hand, hmd_active: bool) -> Vec<GunEvent> {
        self.hand = Some(hand);
        self.hmd_active = hmd_active;
        self.trigger_ready = true;
        let mut events = Vec::new();
        if !hmd_active {
            self.desktop_aids = true;
            events.push(GunEvent::ShowDesktopAids { hand });
        }
        events
    }

    /// Per-frame update while held
    pub fn continue_equip(&mut self, trigger_value: f32, hmd_active: bool, pose: Pose) -> Vec<GunEvent> {
        let Some(hand) = self.hand else {
            return Vec::new();
        };
        let mut events = Vec::new();

        if hmd_active != self.hmd_active {
            if hmd_active {
                if self.desktop_aids {
                    self.desktop_aids = false;
                    events.push(GunEvent::HideDesktopAids);
                }
            } else {
                self.desktop_aids = true;
                events.push(GunEvent::ShowDesktopAids { hand });
            }
            self.hmd_active = hmd_active;
        }

        if trigger_value >= TRIGGER_THRESHOLD {
            if self.trigger_ready {
                self.trigger_ready = false;
                events.push(GunEvent::Fired(self.fire(pose)));
            }
        } else {
            self.trigger_ready = true;
        }
        events
    }

    pub fn release_equip(&mut self) -> Vec<GunEvent> {
        self.hand = None;
        if self.desktop_aids {
            self.desktop_aids = false;
            return vec![GunEvent::HideDesktopAids];
        }
        Vec::new()
    }

    /// Desktop key release. Fires on `f` at most once per cooldown.
    pub fn key_release(&mut self, key: &str, now_ms: u64, pose: Pose) -> Option<Shot> {
        if self.hand.is_none() || !key.eq_ignore_ascii_case(FIRE_KEY) {
            return None;
        }
        if now_ms < self.key_ready_at_ms {
            return None;
        }
        self.key_ready_at_ms = now_ms.saturating_add(FIRE_COOLDOWN_MS);
        Some(self.fire(pose))
    }

    pub fn barrel_position(&self, pose: Pose) -> Vec3 {
        pose.position + pose.rotation * self.barrel_offset
    }

    pub fn barrel_direction(&self, pose: Pose) -> Vec3 {
        (pose.rotation * self.barrel_direction).normalize_or_zero()
    }

    pub fn fire(&self, pose: Pose) -> Shot {
        let direction = self.barrel_direction(pose);
        Shot {
            origin: self.barrel_position(pose),
            direction,
            velocity: direction * PROJECTILE_SPEED,
            hand: self.hand,
            haptic_strength: FIRE_HAPTIC_STRENGTH,
            haptic_duration_ms: FIRE_HAPTIC_DURATION_MS,
        }
    }
}

/// Pick the hit to decorate from the three ray casts
///
/// The entity hit is the baseline. An avatar wins if strictly closer;
/// failing that, an overlay wins if strictly closer.
pub fn closest_hit(entity: Option<RayHit>, avatar: Option<RayHit>, overlay: Option<RayHit>) -> Option<RayHit> {
    let baseline = entity.map_or(f32::INFINITY, |hit| hit.distance);
    if let Some(hit) = avatar
        && hit.distance < baseline
    {
        return Some(hit);
    }
    if let Some(hit) = overlay
        && hit.distance < baseline
    {
        return Some(hit);
    }
    entity
}

/// Decal just short of the hit point, lying flat on the surface
pub fn decal_for(shot: &Shot, hit: &RayHit) -> Decal {
    let normal = hit.surface_normal.normalize_or_zero();
    let rotation = if normal == Vec3::ZERO {
        Quat::IDENTITY
    } else {
        Quat::from_rotation_arc(Vec3::Y, normal)
    };
    Decal {
        position: shot.origin.lerp(hit.intersection, DECAL_RAY_FRACTION),
        rotation,
        lifetime_secs: DECAL_LIFETIME_SECS,
    }
}

#[inline]
pub fn exponential_smoothing(target: f32, current: f32) -> f32 {
    target * (1.0 - HAND_SMOOTHING) + current * HAND_SMOOTHING
}

/// Orientation facing `forward` (-Z) with +Y kept up, so it never rolls
///
/// Straight up or down falls back to the shortest arc.
pub fn look_rotation(forward: Vec3) -> Quat {
    let forward = forward.normalize_or_zero();
    if forward == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let right = forward.cross(Vec3::Y);
    if right.length_squared() < 1e-8 {
        return Quat::from_rotation_arc(Vec3::NEG_Z, forward);
    }
    let right = right.normalize();
    let up = right.cross(forward);
    Quat::from_mat3(&Mat3::from_cols(right, up, -forward))
}

/// Avatar joints sampled for the desktop hold animation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesktopRig {
    pub avatar_position: Vec3,
    pub shoulder: Vec3,
    pub hand: Vec3,
    pub camera_forward: Vec3,
    /// Head joint height in the avatar frame, if the rig has a head
    pub head_height: Option<f32>,
}

/// Hand target in the avatar frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandTarget {
    pub position: Vec3,
    pub rotation: Quat,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct SmoothedHand {
    y: f32,
    pitch: f32,
    roll: f32,
}

/// Per-hand smoothing state for the desktop hold animation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HandSmoother {
    left: SmoothedHand,
    right: SmoothedHand,
}

impl HandSmoother {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold the gun out toward the camera at arm's length
    pub fn desktop_pose(&mut self, hand: Hand, rig: &DesktopRig) -> HandTarget {
        let reach = rig.hand.distance(rig.shoulder);
        let reached = rig.shoulder + rig.camera_forward * reach;
        let reached_local = reached - rig.avatar_position;

        let offset = rig
            .head_height
            .map_or(DEFAULT_HEAD_OFFSET, |h| h * HEAD_OFFSET_MULTIPLIER);
        let (rest, extra) = match hand {
            Hand::Left => (Vec3::new(0.0, 0.5, 0.0), Quat::IDENTITY),
            Hand::Right => (
                Vec3::new(-0.25, 0.6, 0.9),
                Quat::from_euler(EulerRot::YXZ, 0.0, 80f32.to_radians(), 90f32.to_radians()),
            ),
        };

        let state = match hand {
            Hand::Left => &mut self.left,
            Hand::Right => &mut self.right,
        };

        let mut position = rest * offset;
        state.y = exponential_smoothing(reached_local.y, state.y);
        position.y = state.y;

        let look = look_rotation(rig.shoulder - (rig.avatar_position + position));
        let (_yaw, pitch, roll) = look.to_euler(EulerRot::YXZ);
        state.pitch = exponential_smoothing(pitch, state.pitch);
        state.roll = exponential_smoothing(roll, state.roll);

        HandTarget {
            position,
            rotation: Quat::from_euler(EulerRot::YXZ, 0.0, state.pitch, state.roll) * extra,
        }
    }
}
