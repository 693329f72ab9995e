//! Rails and their steppers.

use gantry_common::axis::Axis;
use gantry_common::config::ConfigError;
use gantry_common::homing::HomingParams;

use crate::config::RailConfig;
use crate::pipeline::QueueHandle;

/// Identity of one stepper motor.
///
/// The kinematics layer owns only the name; the pipeline owns the step
/// generation state registered under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stepper {
    name: String,
}

impl Stepper {
    fn new(rail_name: &str) -> Self {
        Self {
            name: format!("stepper_{rail_name}"),
        }
    }

    /// Pipeline-facing stepper name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A named linear rail: travel range, homing parameters, one stepper, the
/// last commanded position on its axis, and the trajectory-queue binding
/// that makes it active.
#[derive(Debug, Clone)]
pub struct Rail {
    name: String,
    axis: Axis,
    position_min: f64,
    position_max: f64,
    homing: HomingParams,
    stepper: Stepper,
    commanded_position: f64,
    queue: Option<QueueHandle>,
}

impl Rail {
    /// Build a rail from its configuration, resolving the homing direction.
    pub fn from_config(name: &str, axis: Axis, config: &RailConfig) -> Result<Self, ConfigError> {
        let direction = config.resolved_direction()?;
        Ok(Self {
            name: name.to_string(),
            axis,
            position_min: config.position_min,
            position_max: config.position_max,
            homing: HomingParams {
                position_endstop: config.position_endstop,
                direction,
                speed: config.homing_speed,
            },
            stepper: Stepper::new(name),
            commanded_position: 0.0,
            queue: None,
        })
    }

    /// Rail name (config section name, e.g. `x` or `dual_carriage`).
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Axis this rail moves.
    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Travel range `(min, max)`.
    #[inline]
    pub fn range(&self) -> (f64, f64) {
        (self.position_min, self.position_max)
    }

    /// Homing parameters handed to the homing controller.
    #[inline]
    pub fn homing(&self) -> &HomingParams {
        &self.homing
    }

    /// The rail's stepper.
    #[inline]
    pub fn stepper(&self) -> &Stepper {
        &self.stepper
    }

    /// Last commanded position on this rail's axis. Retained while the
    /// rail is inactive so a carriage switch can hand off seamlessly.
    #[inline]
    pub fn commanded_position(&self) -> f64 {
        self.commanded_position
    }

    pub(crate) fn set_commanded_position(&mut self, position: f64) {
        self.commanded_position = position;
    }

    /// Trajectory-queue binding; `Some` while the rail is active.
    #[inline]
    pub fn queue(&self) -> Option<QueueHandle> {
        self.queue
    }

    /// Returns true if the rail is bound to a trajectory queue.
    #[inline]
    pub fn is_bound(&self) -> bool {
        self.queue.is_some()
    }

    pub(crate) fn bind_queue(&mut self, queue: QueueHandle) {
        self.queue = Some(queue);
    }

    pub(crate) fn unbind_queue(&mut self) {
        self.queue = None;
    }
}
