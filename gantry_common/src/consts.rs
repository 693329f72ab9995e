//! System-wide constants for the gantry workspace.
//!
//! Single source of truth for axis and rail capacities and homing defaults.
//! Imported by all crates, no duplication permitted.

use static_assertions::const_assert;

/// Number of Cartesian axes handled by the kinematics layer.
pub const AXIS_COUNT: usize = 3;

/// Maximum number of rails a registry can hold: one per axis plus one
/// auxiliary dual-carriage rail.
pub const MAX_RAILS: usize = 4;

/// Number of carriages sharing a dual-carriage axis.
pub const CARRIAGE_COUNT: usize = 2;

/// Default homing approach speed in mm/s when a rail's config omits it.
pub const DEFAULT_HOMING_SPEED: f64 = 5.0;

// The rail arena must fit every axis rail plus the extra carriage.
const_assert!(MAX_RAILS >= AXIS_COUNT + CARRIAGE_COUNT - 1);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_are_consistent() {
        assert!(AXIS_COUNT > 0);
        assert!(MAX_RAILS >= AXIS_COUNT);
        assert_eq!(CARRIAGE_COUNT, 2);
        assert!(DEFAULT_HOMING_SPEED > 0.0);
    }
}
