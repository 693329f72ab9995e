//! Kinematics configuration structures.
//!
//! Deserialized from TOML through `gantry_common::config::ConfigLoader`.
//! `validate()` performs every check that needs no pipeline knowledge;
//! the Z ceilings are checked against the pipeline's global maxima at
//! construction, where those maxima are known.
//!
//! # TOML Example
//!
//! ```toml
//! max_z_velocity = 25.0
//! max_z_accel = 300.0
//!
//! [rail.x]
//! position_min = 0.0
//! position_max = 200.0
//! position_endstop = 0.0
//! homing_speed = 25.0
//!
//! [rail.y]
//! position_min = 0.0
//! position_max = 200.0
//! position_endstop = 0.0
//!
//! [rail.z]
//! position_min = 0.0
//! position_max = 150.0
//! position_endstop = 0.0
//!
//! [dual_carriage]
//! axis = "x"
//! position_min = 0.0
//! position_max = 200.0
//! position_endstop = 200.0
//! ```

use gantry_common::axis::Axis;
use gantry_common::config::ConfigError;
use gantry_common::consts::DEFAULT_HOMING_SPEED;
use gantry_common::homing::HomingDirection;
use serde::{Deserialize, Serialize};

/// Configuration of one rail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RailConfig {
    /// Low end of travel [mm].
    pub position_min: f64,
    /// High end of travel [mm].
    pub position_max: f64,
    /// Endstop trigger coordinate [mm]; must lie within travel.
    pub position_endstop: f64,
    /// Homing approach speed [mm/s].
    #[serde(default = "default_homing_speed")]
    pub homing_speed: f64,
    /// Homing direction; inferred from the endstop position when omitted.
    #[serde(default)]
    pub homing_direction: Option<HomingDirection>,
}

fn default_homing_speed() -> f64 {
    DEFAULT_HOMING_SPEED
}

impl RailConfig {
    /// Resolve the homing direction.
    ///
    /// When not explicit, an endstop in the lower quarter of travel homes
    /// negative and one in the upper quarter homes positive. An endstop in
    /// the middle half is ambiguous and must be configured explicitly.
    pub fn resolved_direction(&self) -> Result<HomingDirection, ConfigError> {
        if let Some(direction) = self.homing_direction {
            return Ok(direction);
        }
        let span = self.position_max - self.position_min;
        if self.position_endstop <= self.position_min + 0.25 * span {
            Ok(HomingDirection::Negative)
        } else if self.position_endstop >= self.position_max - 0.25 * span {
            Ok(HomingDirection::Positive)
        } else {
            Err(ConfigError::ValidationError(format!(
                "endstop at {} is not near either end of travel; set homing_direction explicitly",
                self.position_endstop
            )))
        }
    }

    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if !self.position_min.is_finite() || !self.position_max.is_finite() {
            return Err(ConfigError::ValidationError(format!(
                "rail {name}: travel bounds must be finite"
            )));
        }
        if self.position_min >= self.position_max {
            return Err(ConfigError::ValidationError(format!(
                "rail {name}: position_min {} must be below position_max {}",
                self.position_min, self.position_max
            )));
        }
        if self.position_endstop < self.position_min || self.position_endstop > self.position_max
        {
            return Err(ConfigError::ValidationError(format!(
                "rail {name}: position_endstop {} outside travel [{}, {}]",
                self.position_endstop, self.position_min, self.position_max
            )));
        }
        if self.homing_speed <= 0.0 || !self.homing_speed.is_finite() {
            return Err(ConfigError::ValidationError(format!(
                "rail {name}: homing_speed must be positive"
            )));
        }
        self.resolved_direction().map_err(|e| {
            ConfigError::ValidationError(format!("rail {name}: {e}"))
        })?;
        Ok(())
    }
}

/// The three primary rails, one per axis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RailSet {
    pub x: RailConfig,
    pub y: RailConfig,
    pub z: RailConfig,
}

impl RailSet {
    /// Rail configuration for an axis.
    pub fn for_axis(&self, axis: Axis) -> &RailConfig {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}

/// Configuration of the optional second carriage.
///
/// The auxiliary rail shares `axis` with one of the primary rails; the
/// Z axis never carries a dual carriage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DualCarriageConfig {
    /// Axis the two carriages share (`x` or `y`).
    pub axis: Axis,
    /// Rail parameters of the secondary carriage.
    #[serde(flatten)]
    pub rail: RailConfig,
}

/// Top-level kinematics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GantryConfig {
    /// Z velocity ceiling [mm/s]; defaults to the pipeline maximum.
    #[serde(default)]
    pub max_z_velocity: Option<f64>,
    /// Z acceleration ceiling [mm/s^2]; defaults to the pipeline maximum.
    #[serde(default)]
    pub max_z_accel: Option<f64>,
    /// Per-axis rail definitions.
    pub rail: RailSet,
    /// Optional second carriage on X or Y.
    #[serde(default)]
    pub dual_carriage: Option<DualCarriageConfig>,
}

impl GantryConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if:
    /// - any rail's travel bounds, endstop, or homing settings are
    ///   inconsistent
    /// - the dual-carriage axis is Z
    /// - a Z ceiling is non-positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        for axis in Axis::ALL {
            self.rail
                .for_axis(axis)
                .validate(&axis.letter().to_string())?;
        }
        if let Some(dc) = &self.dual_carriage {
            if dc.axis == Axis::Z {
                return Err(ConfigError::ValidationError(
                    "dual_carriage axis must be x or y".to_string(),
                ));
            }
            dc.rail.validate("dual_carriage")?;
        }
        for (field, value) in [
            ("max_z_velocity", self.max_z_velocity),
            ("max_z_accel", self.max_z_accel),
        ] {
            if let Some(v) = value {
                if v <= 0.0 || !v.is_finite() {
                    return Err(ConfigError::ValidationError(format!(
                        "{field} must be positive"
                    )));
                }
            }
        }
        Ok(())
    }
}
