//! Gnome Blast - blast propagation and prop behavior for VR props
//!
//! Core modules:
//! - `sim`: Deterministic simulation (blast model, chain detonation, props)
//! - `settings`: Data-driven blast tuning loaded from JSON

pub mod settings;
pub mod sim;

pub use settings::{BlastSettings, SettingsError};

use serde::{Deserialize, Serialize};

/// Blast and prop configuration constants
pub mod consts {
    /// Scalar applied to every blast impulse
    pub const BLAST_POWER: f32 = 1.0;
    /// Blast radius in meters
    pub const BLAST_RADIUS: f32 = 2.0;
    /// Chain-reaction sub-radius is BLAST_RADIUS / BLAST_FALLOFF
    pub const BLAST_FALLOFF: f32 = 1.8;
    /// Upper bound of the random spin applied to blasted bodies
    pub const SPIN_RATE: f32 = 20.0;
    /// Distances below this are clamped before the inverse-distance falloff
    pub const MIN_BLAST_DISTANCE: f32 = 0.01;

    /// Longest delay before a chain-armed gnome goes off (ms)
    pub const MAX_CHAIN_DELAY_MS: u64 = 5000;
    /// Release speed needed to count as a throw (m/s)
    pub const THROW_SPEED_THRESHOLD: f32 = 2.0;
    /// Multiplier on the blast impulse when pushing the local avatar
    pub const AVATAR_THRUST_MULTIPLIER: f32 = 5.0;
    /// Spawn offsets of the shattered gnome pieces from the epicenter
    pub const DEBRIS_OFFSETS: [[f32; 3]; 5] = [
        [0.002, 0.1, 0.0],
        [-0.002, 0.2, 0.0],
        [0.0, 0.1, 0.0],
        [0.1, 0.0, 0.0],
        [0.0, -0.04, 0.1],
    ];
    /// Debris and spent gnomes are deleted after this long (ms)
    pub const DEBRIS_LIFETIME_MS: u64 = 60_000;

    /// Trigger travel needed to fire the gun (0-1)
    pub const TRIGGER_THRESHOLD: f32 = 0.97;
    /// Minimum time between key-release shots (ms)
    pub const FIRE_COOLDOWN_MS: u64 = 250;
    /// Projectile speed along the barrel (m/s)
    pub const PROJECTILE_SPEED: f32 = 5.0;
    /// How far along the ray the hit decal is placed (0-1)
    pub const DECAL_RAY_FRACTION: f32 = 0.98;
    /// Decal lifetime in seconds
    pub const DECAL_LIFETIME_SECS: u32 = 100;
    /// Weight of the previous value in hand-animation smoothing
    pub const HAND_SMOOTHING: f32 = 0.75;
}

/// Which hand holds a prop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    /// Parse the hand name passed by grab/equip callbacks ("left"/"right")
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(Hand::Left),
            "right" => Some(Hand::Right),
            _ => None,
        }
    }

    /// Controller index used by haptics and trigger lookup
    pub fn index(self) -> usize {
        match self {
            Hand::Left => 0,
            Hand::Right => 1,
        }
    }
}
