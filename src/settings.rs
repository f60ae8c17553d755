//! Blast tuning
//!
//! Loaded from JSON; missing fields fall back to the built-in constants.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::BlastParams;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Blast and gnome tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlastSettings {
    pub power: f32,
    pub radius: f32,
    pub falloff_divisor: f32,
    pub spin_rate: f32,
    pub min_distance: f32,
    pub max_chain_delay_ms: u64,
    pub throw_speed_threshold: f32,
    pub avatar_thrust_multiplier: f32,
}

impl Default for BlastSettings {
    fn default() -> Self {
        Self {
            power: BLAST_POWER,
            radius: BLAST_RADIUS,
            falloff_divisor: BLAST_FALLOFF,
            spin_rate: SPIN_RATE,
            min_distance: MIN_BLAST_DISTANCE,
            max_chain_delay_ms: MAX_CHAIN_DELAY_MS,
            throw_speed_threshold: THROW_SPEED_THRESHOLD,
            avatar_thrust_multiplier: AVATAR_THRUST_MULTIPLIER,
        }
    }
}

impl BlastSettings {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded blast settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load a file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Using default blast settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        fn positive(field: &'static str, value: f32) -> Result<(), SettingsError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(SettingsError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }

        positive("power", self.power)?;
        positive("radius", self.radius)?;
        positive("spin_rate", self.spin_rate)?;
        positive("min_distance", self.min_distance)?;
        if !(self.falloff_divisor.is_finite() && self.falloff_divisor > 1.0) {
            return Err(SettingsError::Invalid {
                field: "falloff_divisor",
                reason: "must be greater than 1",
            });
        }
        if self.max_chain_delay_ms == 0 {
            return Err(SettingsError::Invalid {
                field: "max_chain_delay_ms",
                reason: "must be at least 1",
            });
        }
        if !(self.throw_speed_threshold.is_finite() && self.throw_speed_threshold >= 0.0) {
            return Err(SettingsError::Invalid {
                field: "throw_speed_threshold",
                reason: "must be zero or positive",
            });
        }
        if !self.avatar_thrust_multiplier.is_finite() {
            return Err(SettingsError::Invalid {
                field: "avatar_thrust_multiplier",
                reason: "must be finite",
            });
        }
        Ok(())
    }

    /// Parameters for the propagation model
    pub fn blast_params(&self) -> BlastParams {
        BlastParams {
            radius: self.radius,
            falloff_divisor: self.falloff_divisor,
            power: self.power,
            spin_rate: self.spin_rate,
            min_distance: self.min_distance,
        }
    }
}
