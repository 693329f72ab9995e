//! Homing target computation and pass sequencing.

use gantry_common::axis::Axis;
use gantry_common::consts::AXIS_COUNT;
use gantry_common::homing::HomingDirection;
use tracing::debug;

use crate::carriage::{Carriage, activate_carriage};
use crate::error::KinematicsResult;
use crate::limits::SoftLimits;
use crate::pipeline::{HomingController, MotionPipeline};
use crate::rail::Rail;
use crate::registry::RailRegistry;

/// Per-axis target vector for the homing controller; only `Some`
/// coordinates are constrained.
pub type AxisTargets = [Option<f64>; AXIS_COUNT];

/// Start/target coordinate pair handed to the homing controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HomingTargets {
    /// Backed-off start position; only the homed axis is set.
    pub forcepos: AxisTargets,
    /// Endstop position; only the homed axis is set.
    pub homepos: AxisTargets,
}

/// Compute the controller targets for one rail.
///
/// `homepos` constrains the rail's axis to the endstop coordinate.
/// `forcepos` backs off by 1.5x the endstop-to-far-edge distance, so the
/// probe travel covers the whole range with margin even from an unknown
/// start position.
pub fn homing_targets(rail: &Rail) -> HomingTargets {
    let (position_min, position_max) = rail.range();
    let homing = rail.homing();
    let index = rail.axis().index();

    let mut homepos: AxisTargets = [None; AXIS_COUNT];
    homepos[index] = Some(homing.position_endstop);
    let mut forcepos = homepos;
    match homing.direction {
        HomingDirection::Positive => {
            forcepos[index] =
                Some(homing.position_endstop - 1.5 * (homing.position_endstop - position_min));
        }
        HomingDirection::Negative => {
            forcepos[index] =
                Some(homing.position_endstop + 1.5 * (position_max - homing.position_endstop));
        }
    }
    HomingTargets { forcepos, homepos }
}

/// Home one axis's active rail: compute targets, delegate the probe, and
/// on success record the endstop as the rail position and mark the axis
/// homed.
fn home_axis(
    registry: &mut RailRegistry,
    limits: &mut SoftLimits,
    controller: &mut dyn HomingController,
    axis: Axis,
) -> KinematicsResult<()> {
    let rail = registry.active_rail(axis);
    let targets = homing_targets(rail);
    let endstop = rail.homing().position_endstop;
    let range = rail.range();
    debug!(axis = %axis, rail = rail.name(), speed = rail.homing().speed, "homing axis");
    controller.home_rails(&[rail], targets.forcepos, targets.homepos)?;

    registry.active_rail_mut(axis).set_commanded_position(endstop);
    limits.mark_homed(axis, range);
    Ok(())
}

/// Walk an ordered axis list. On the dual-carriage axis both carriages are
/// homed (primary first) and the previously selected carriage is restored
/// afterwards. A probe failure propagates immediately; axes homed earlier
/// in the pass stay homed, and whichever carriage was active at the
/// failure stays active.
pub(crate) fn home_axes(
    registry: &mut RailRegistry,
    limits: &mut SoftLimits,
    pipeline: &mut dyn MotionPipeline,
    controller: &mut dyn HomingController,
    axes: &[Axis],
) -> KinematicsResult<()> {
    for &axis in axes {
        match registry.dual_carriage_axis() {
            Some(dc_axis) if dc_axis == axis => {
                let restore = registry.active_carriage().unwrap_or(Carriage::Primary);
                activate_carriage(registry, limits, pipeline, Carriage::Primary)?;
                home_axis(registry, limits, controller, axis)?;
                activate_carriage(registry, limits, pipeline, Carriage::Secondary)?;
                home_axis(registry, limits, controller, axis)?;
                activate_carriage(registry, limits, pipeline, restore)?;
            }
            _ => home_axis(registry, limits, controller, axis)?,
        }
    }
    Ok(())
}
