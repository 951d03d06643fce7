//! Setpoints and powers used by the tele-operation routine.
//!
//! Every field has a default, so a partial JSON document only overrides what
//! it names.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::math::mecanum::DRIVE_DAMPING;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeleOpConfig {
    /// Multiplier applied to normalized wheel powers.
    pub drive_damping: f32,
    /// Slide encoder target while the extend button is held (ticks).
    pub slide_extended_position: i32,
    /// Slide encoder target otherwise (ticks).
    pub slide_retracted_position: i32,
    pub slide_extend_power: f32,
    pub slide_retract_power: f32,
    /// Upper bound of the intake rotation accumulator (degrees).
    pub rotation_limit: f32,
    /// Degrees added or removed per tick while a rotate button is held.
    pub rotation_step: f32,
}

impl Default for TeleOpConfig {
    fn default() -> Self {
        Self {
            drive_damping: DRIVE_DAMPING,
            slide_extended_position: 2200,
            slide_retracted_position: 0,
            slide_extend_power: 0.75,
            slide_retract_power: 0.5,
            rotation_limit: 270.0,
            rotation_step: 1.0,
        }
    }
}

/// A setpoint that would break the controllers' invariants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// `drive_damping` outside `[0, 1]`.
    DriveDamping(f32),
    /// `rotation_limit` not strictly positive.
    RotationLimit(f32),
    /// `rotation_step` negative.
    RotationStep(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            ConfigError::DriveDamping(v) => write!(f, "drive_damping {} is outside [0, 1]", v),
            ConfigError::RotationLimit(v) => write!(f, "rotation_limit {} must be above 0", v),
            ConfigError::RotationStep(v) => write!(f, "rotation_step {} must not be negative", v),
        }
    }
}

impl core::error::Error for ConfigError {}

impl TeleOpConfig {
    /// Reject values the intake accumulator or the mixer cannot honor.
    ///
    /// NaN fails every check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.drive_damping) {
            return Err(ConfigError::DriveDamping(self.drive_damping));
        }
        if self.rotation_limit.is_nan() || self.rotation_limit <= 0.0 {
            return Err(ConfigError::RotationLimit(self.rotation_limit));
        }
        if self.rotation_step.is_nan() || self.rotation_step < 0.0 {
            return Err(ConfigError::RotationStep(self.rotation_step));
        }
        Ok(())
    }
}
