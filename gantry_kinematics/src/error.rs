//! Error types for the kinematics layer.
//!
//! One umbrella enum covers everything a caller can get back from the
//! coordinator; probe failures from the homing controller are wrapped
//! transparently so `?` composes across the seam.

use gantry_common::axis::Axis;
use gantry_common::config::ConfigError;
use thiserror::Error;

/// Failure reported by the homing controller's probe sequence.
///
/// The kinematics layer never constructs this itself; it propagates the
/// controller's report unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("homing failed on rail '{rail}': {reason}")]
pub struct ProbeError {
    /// Name of the rail whose probe sequence failed.
    pub rail: String,
    /// Controller-supplied failure description.
    pub reason: String,
}

/// Errors surfaced by kinematics operations.
#[derive(Debug, Clone, Error)]
pub enum KinematicsError {
    /// A move touches an axis whose soft-limit interval is not yet valid.
    #[error("Must home axis {axis} first")]
    NotHomed {
        /// Axis that has not been homed.
        axis: Axis,
    },

    /// A move ends outside a homed axis's soft-limit interval.
    #[error("Move out of range: {axis} end position {end:.3} outside [{low:.3}, {high:.3}]")]
    OutOfRange {
        /// Axis whose limit is violated.
        axis: Axis,
        /// Requested end coordinate on that axis.
        end: f64,
        /// Lower soft-limit bound.
        low: f64,
        /// Upper soft-limit bound.
        high: f64,
    },

    /// Carriage index outside the valid range.
    #[error("Carriage {index} not valid (must be 0 or 1)")]
    InvalidCarriage {
        /// Rejected index.
        index: u8,
    },

    /// Carriage operation requested but no dual carriage is configured.
    #[error("No dual carriage configured")]
    NoDualCarriage,

    /// A stepper position report is missing an active rail's stepper.
    #[error("No position reported for stepper '{name}'")]
    MissingStepper {
        /// Stepper name that had no entry.
        name: String,
    },

    /// Configuration rejected during loading or construction.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Probe failure reported by the homing controller.
    #[error(transparent)]
    Probe(#[from] ProbeError),
}

/// Convenience alias for kinematics operations.
pub type KinematicsResult<T> = Result<T, KinematicsError>;
