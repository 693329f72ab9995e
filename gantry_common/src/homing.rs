//! Homing vocabulary shared across the gantry workspace.
//!
//! Defines `HomingDirection` and the resolved per-rail `HomingParams`
//! handed to the homing controller.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_HOMING_SPEED;

/// Direction a rail travels to reach its endstop.
///
/// Safety-relevant: a wrong direction drives the carriage away from the
/// endstop and into the opposite mechanical stop, so there is no default.
/// Configuration either states the direction or it is inferred from the
/// endstop's position within the travel range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum HomingDirection {
    /// Endstop sits at the high end of travel.
    Positive = 0,
    /// Endstop sits at the low end of travel.
    Negative = 1,
}

impl HomingDirection {
    /// Convert from raw `u8`. Returns `None` for invalid values.
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Positive),
            1 => Some(Self::Negative),
            _ => None,
        }
    }

    /// Sign multiplier for travel toward the endstop.
    #[inline]
    pub const fn sign(&self) -> f64 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }
}

/// Resolved homing parameters for one rail.
///
/// Produced from rail configuration during registry construction and
/// passed through to the homing controller with each probe request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HomingParams {
    /// Nominal coordinate of the endstop trigger point.
    pub position_endstop: f64,
    /// Travel direction toward the endstop.
    pub direction: HomingDirection,
    /// Approach speed [mm/s].
    #[serde(default = "default_homing_speed")]
    pub speed: f64,
}

fn default_homing_speed() -> f64 {
    DEFAULT_HOMING_SPEED
}
