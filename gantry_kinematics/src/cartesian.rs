//! Cartesian kinematics coordinator.
//!
//! One instance owns the rail registry and the soft limits and exposes the
//! operations the command layer consumes: move validation, homing,
//! carriage selection, status, and lifecycle notifications.

use std::collections::HashMap;

use gantry_common::axis::{Axis, AxisMask, Coord};
use gantry_common::config::ConfigError;
use gantry_common::consts::MAX_RAILS;
use tracing::{debug, trace};

use crate::carriage::{Carriage, activate_carriage};
use crate::config::GantryConfig;
use crate::error::{KinematicsError, KinematicsResult};
use crate::homing::home_axes;
use crate::limits::{AxisLimit, SoftLimits};
use crate::motion::Move;
use crate::pipeline::{HomingController, MotionPipeline};
use crate::rail::Stepper;
use crate::registry::RailRegistry;
use crate::status::{Corner, KinematicsStatus};

/// Kinematics and homing policy for a Cartesian gantry.
#[derive(Debug)]
pub struct CartesianKinematics {
    registry: RailRegistry,
    limits: SoftLimits,
    max_z_velocity: f64,
    max_z_accel: f64,
    axes_min: Corner,
    axes_max: Corner,
}

impl CartesianKinematics {
    /// Build the kinematics from configuration and wire the pipeline
    /// (stepper registration, initial queue binding).
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config.validate()` fails or a Z
    /// ceiling exceeds the pipeline's global maxima.
    pub fn new(
        config: &GantryConfig,
        pipeline: &mut dyn MotionPipeline,
    ) -> KinematicsResult<Self> {
        config.validate()?;
        let rates = pipeline.max_rates();
        let max_z_velocity = ceiling(config.max_z_velocity, rates.velocity, "max_z_velocity")?;
        let max_z_accel = ceiling(config.max_z_accel, rates.accel, "max_z_accel")?;
        let registry = RailRegistry::new(config, pipeline)?;

        // Workspace corners come from the axis rails, not the auxiliary
        // carriage; the fourth channel stays zero.
        let mut axes_min: Corner = [0.0; 4];
        let mut axes_max: Corner = [0.0; 4];
        for axis in Axis::ALL {
            let (low, high) = registry.rail(axis.index()).range();
            axes_min[axis.index()] = low;
            axes_max[axis.index()] = high;
        }

        debug!(max_z_velocity, max_z_accel, "cartesian kinematics ready");
        Ok(Self {
            registry,
            limits: SoftLimits::new(),
            max_z_velocity,
            max_z_accel,
            axes_min,
            axes_max,
        })
    }

    /// Rail registry, for read access.
    #[inline]
    pub fn registry(&self) -> &RailRegistry {
        &self.registry
    }

    /// Soft-limit state, for read access.
    #[inline]
    pub fn limits(&self) -> &SoftLimits {
        &self.limits
    }

    /// Effective Z velocity ceiling [mm/s].
    #[inline]
    pub fn max_z_velocity(&self) -> f64 {
        self.max_z_velocity
    }

    /// Effective Z acceleration ceiling [mm/s^2].
    #[inline]
    pub fn max_z_accel(&self) -> f64 {
        self.max_z_accel
    }

    /// Every stepper in axis order (both dual-carriage rails included).
    pub fn steppers(&self) -> heapless::Vec<&Stepper, MAX_RAILS> {
        self.registry.steppers()
    }

    /// Assemble a Cartesian position from per-stepper positions keyed by
    /// stepper name.
    pub fn calc_position(
        &self,
        stepper_positions: &HashMap<String, f64>,
    ) -> KinematicsResult<Coord> {
        self.registry.calc_position(stepper_positions)
    }

    /// Override the commanded position on every active rail, marking the
    /// axes in `homed_axes` as homed.
    pub fn set_position(&mut self, position: Coord, homed_axes: AxisMask) {
        trace!(?position, homed = %homed_axes.letters(), "set position");
        self.registry
            .set_position(position, homed_axes, &mut self.limits);
    }

    /// Drop one axis back to unhomed without touching the others.
    pub fn note_axis_unhomed(&mut self, axis: Axis) {
        debug!(axis = %axis, "axis marked unhomed");
        self.limits.mark_unhomed(axis);
    }

    /// Motor-disable notification: every axis drops back to unhomed.
    pub fn motor_off(&mut self) {
        debug!("motors off, soft limits reset");
        self.limits.reset();
    }

    /// Home the given axes in order, delegating each rail's probe sequence
    /// to `controller`. The dual-carriage axis homes both carriages and
    /// restores the previously selected one.
    ///
    /// # Errors
    ///
    /// Propagates the first probe failure; axes already homed in this pass
    /// stay homed.
    pub fn home(
        &mut self,
        pipeline: &mut dyn MotionPipeline,
        controller: &mut dyn HomingController,
        axes: &[Axis],
    ) -> KinematicsResult<()> {
        home_axes(
            &mut self.registry,
            &mut self.limits,
            pipeline,
            controller,
            axes,
        )
    }

    /// Validate a candidate move against the soft limits and derate moves
    /// with a Z component.
    ///
    /// The fast path skips the per-axis sweep when both X and Y end inside
    /// their homed intervals. Any move with a nonzero Z delta takes the
    /// full sweep and then has its ceilings min-clamped by
    /// `max_z * (move distance / |z delta|)`.
    pub fn check_move(&self, mv: &mut Move) -> KinematicsResult<()> {
        let end = mv.end_pos();
        if !self.limits.get(Axis::X).contains(end[0])
            || !self.limits.get(Axis::Y).contains(end[1])
        {
            self.sweep_limits(mv)?;
        }
        let z_delta = mv.delta(Axis::Z);
        if z_delta == 0.0 {
            return Ok(());
        }
        self.sweep_limits(mv)?;
        // move_d >= |z_delta| > 0, so the ratio is finite and >= 1.
        let z_ratio = mv.move_d() / z_delta.abs();
        mv.limit_speed(self.max_z_velocity * z_ratio, self.max_z_accel * z_ratio);
        trace!(
            z_ratio,
            velocity = mv.velocity(),
            accel = mv.accel(),
            "z move derated"
        );
        Ok(())
    }

    /// Per-axis sweep: every axis with a nonzero delta must be homed and
    /// must end inside its interval.
    fn sweep_limits(&self, mv: &Move) -> KinematicsResult<()> {
        for axis in Axis::ALL {
            if mv.delta(axis) == 0.0 {
                continue;
            }
            let end = mv.end_pos()[axis.index()];
            match self.limits.get(axis) {
                AxisLimit::Unhomed => return Err(KinematicsError::NotHomed { axis }),
                AxisLimit::Homed { low, high } if end < low || end > high => {
                    return Err(KinematicsError::OutOfRange {
                        axis,
                        end,
                        low,
                        high,
                    });
                }
                AxisLimit::Homed { .. } => {}
            }
        }
        Ok(())
    }

    /// Selected carriage when a dual carriage is configured.
    #[inline]
    pub fn active_carriage(&self) -> Option<Carriage> {
        self.registry.active_carriage()
    }

    /// Operator command surface: validate `index` and switch carriages.
    pub fn set_active_carriage(
        &mut self,
        pipeline: &mut dyn MotionPipeline,
        index: u8,
    ) -> KinematicsResult<()> {
        let carriage =
            Carriage::from_index(index).ok_or(KinematicsError::InvalidCarriage { index })?;
        self.activate_carriage(pipeline, carriage)
    }

    /// Typed carriage switch, for hosts that already hold a [`Carriage`].
    pub fn activate_carriage(
        &mut self,
        pipeline: &mut dyn MotionPipeline,
        carriage: Carriage,
    ) -> KinematicsResult<()> {
        activate_carriage(&mut self.registry, &mut self.limits, pipeline, carriage)
    }

    /// Status snapshot: homed axes, workspace corners, active carriage.
    pub fn status(&self) -> KinematicsStatus {
        KinematicsStatus {
            homed_axes: self.limits.homed_mask().letters(),
            axis_minimum: self.axes_min,
            axis_maximum: self.axes_max,
            active_carriage: self
                .registry
                .active_carriage()
                .map(|carriage| carriage.index() as u8),
        }
    }
}

fn ceiling(configured: Option<f64>, pipeline_max: f64, field: &str) -> KinematicsResult<f64> {
    match configured {
        None => Ok(pipeline_max),
        Some(value) if value > pipeline_max => Err(KinematicsError::Config(
            ConfigError::ValidationError(format!(
                "{field} {value} exceeds pipeline maximum {pipeline_max}"
            )),
        )),
        Some(value) => Ok(value),
    }
}
