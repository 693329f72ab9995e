//! Prelude module for common re-exports.
//!
//! This module provides convenient re-exports of commonly used types
//! so that consumers can do `use gantry_common::prelude::*;` and get
//! the most important types without listing individual paths.

// ─── Axes ───────────────────────────────────────────────────────────
pub use crate::axis::{Axis, AxisMask, Coord};

// ─── Homing ─────────────────────────────────────────────────────────
pub use crate::homing::{HomingDirection, HomingParams};

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader};

// ─── System Constants ───────────────────────────────────────────────
pub use crate::consts::{AXIS_COUNT, CARRIAGE_COUNT, DEFAULT_HOMING_SPEED, MAX_RAILS};
