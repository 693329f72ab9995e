//! Per-axis soft-limit tracking.
//!
//! An axis has no usable limit interval until it has been homed. The
//! tagged representation keeps the unhomed state distinct from any real
//! interval, so membership tests need no sentinel conventions.

use gantry_common::axis::{Axis, AxisMask};
use gantry_common::consts::AXIS_COUNT;

/// Soft-limit state of one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisLimit {
    /// Axis has not been homed; every move touching it is rejected.
    Unhomed,
    /// Closed interval that move end positions must stay inside.
    Homed {
        /// Lower bound [mm].
        low: f64,
        /// Upper bound [mm].
        high: f64,
    },
}

impl AxisLimit {
    /// Returns true if the axis has a valid interval.
    #[inline]
    pub const fn is_homed(&self) -> bool {
        matches!(self, Self::Homed { .. })
    }

    /// Inclusive membership test; `Unhomed` contains nothing.
    #[inline]
    pub fn contains(&self, position: f64) -> bool {
        match *self {
            Self::Unhomed => false,
            Self::Homed { low, high } => position >= low && position <= high,
        }
    }

    /// The interval bounds, if homed.
    #[inline]
    pub const fn bounds(&self) -> Option<(f64, f64)> {
        match *self {
            Self::Unhomed => None,
            Self::Homed { low, high } => Some((low, high)),
        }
    }
}

/// Soft-limit state for all three axes.
#[derive(Debug, Clone, PartialEq)]
pub struct SoftLimits {
    limits: [AxisLimit; AXIS_COUNT],
}

impl SoftLimits {
    /// All axes unhomed.
    pub const fn new() -> Self {
        Self {
            limits: [AxisLimit::Unhomed; AXIS_COUNT],
        }
    }

    /// Limit state of one axis.
    #[inline]
    pub fn get(&self, axis: Axis) -> AxisLimit {
        self.limits[axis.index()]
    }

    /// Give an axis the interval `(low, high)`.
    pub fn mark_homed(&mut self, axis: Axis, (low, high): (f64, f64)) {
        self.limits[axis.index()] = AxisLimit::Homed { low, high };
    }

    /// Drop one axis back to unhomed.
    pub fn mark_unhomed(&mut self, axis: Axis) {
        self.limits[axis.index()] = AxisLimit::Unhomed;
    }

    /// Drop every axis back to unhomed.
    pub fn reset(&mut self) {
        self.limits = [AxisLimit::Unhomed; AXIS_COUNT];
    }

    /// Mask of currently homed axes.
    pub fn homed_mask(&self) -> AxisMask {
        let mut mask = AxisMask::empty();
        for axis in Axis::ALL {
            if self.get(axis).is_homed() {
                mask |= axis.mask();
            }
        }
        mask
    }
}

impl Default for SoftLimits {
    fn default() -> Self {
        Self::new()
    }
}
