//! Rail registry: the rail arena and the axis-to-rail mapping.

use std::collections::HashMap;

use gantry_common::axis::{Axis, AxisMask, Coord};
use gantry_common::consts::{AXIS_COUNT, CARRIAGE_COUNT, MAX_RAILS};
use tracing::debug;

use crate::carriage::Carriage;
use crate::config::GantryConfig;
use crate::error::{KinematicsError, KinematicsResult};
use crate::limits::SoftLimits;
use crate::pipeline::MotionPipeline;
use crate::rail::{Rail, Stepper};

/// Dual-carriage bookkeeping: the shared axis and the arena indices of the
/// two carriage rails, in carriage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DualCarriage {
    pub(crate) axis: Axis,
    rails: [usize; CARRIAGE_COUNT],
}

impl DualCarriage {
    pub(crate) fn rail_index(&self, carriage: Carriage) -> usize {
        self.rails[carriage.index()]
    }
}

/// Owns every rail and records which one is active per axis.
///
/// The arena never changes after construction; carriage activation updates
/// the mapping table, not the arena.
#[derive(Debug)]
pub struct RailRegistry {
    rails: Vec<Rail>,
    active: [usize; AXIS_COUNT],
    dual_carriage: Option<DualCarriage>,
}

impl RailRegistry {
    /// Build the registry and wire the pipeline: every stepper (both
    /// dual-carriage rails included) is registered with the step generator
    /// set, and the trajectory queue is bound to the initially active
    /// rails. The secondary carriage starts unbound; carriage 0 is active.
    pub fn new(
        config: &GantryConfig,
        pipeline: &mut dyn MotionPipeline,
    ) -> KinematicsResult<Self> {
        let mut rails = Vec::with_capacity(MAX_RAILS);
        for axis in Axis::ALL {
            let name = axis.letter().to_string();
            rails.push(Rail::from_config(&name, axis, config.rail.for_axis(axis))?);
        }
        let mut dual_carriage = None;
        if let Some(dc) = &config.dual_carriage {
            rails.push(Rail::from_config("dual_carriage", dc.axis, &dc.rail)?);
            dual_carriage = Some(DualCarriage {
                axis: dc.axis,
                rails: [dc.axis.index(), rails.len() - 1],
            });
        }

        for rail in &rails {
            pipeline.register_step_generator(rail.stepper());
        }
        let queue = pipeline.trajectory_queue();
        let mut registry = Self {
            rails,
            // Arena slots 0..AXIS_COUNT are laid out in axis order.
            active: [0, 1, 2],
            dual_carriage,
        };
        for axis in Axis::ALL {
            registry.rails[axis.index()].bind_queue(queue);
        }
        debug!(
            rails = registry.rails.len(),
            dual_carriage = registry.dual_carriage.is_some(),
            "rail registry ready"
        );
        Ok(registry)
    }

    /// Active rail for an axis.
    #[inline]
    pub fn active_rail(&self, axis: Axis) -> &Rail {
        &self.rails[self.active[axis.index()]]
    }

    pub(crate) fn active_rail_mut(&mut self, axis: Axis) -> &mut Rail {
        &mut self.rails[self.active[axis.index()]]
    }

    pub(crate) fn rail(&self, index: usize) -> &Rail {
        &self.rails[index]
    }

    pub(crate) fn rail_mut(&mut self, index: usize) -> &mut Rail {
        &mut self.rails[index]
    }

    pub(crate) fn active_index(&self, axis: Axis) -> usize {
        self.active[axis.index()]
    }

    pub(crate) fn set_active_index(&mut self, axis: Axis, index: usize) {
        self.active[axis.index()] = index;
    }

    pub(crate) fn dual_carriage(&self) -> Option<DualCarriage> {
        self.dual_carriage
    }

    /// Axis shared by the two carriages, if a dual carriage is configured.
    pub fn dual_carriage_axis(&self) -> Option<Axis> {
        self.dual_carriage.map(|dc| dc.axis)
    }

    /// Currently selected carriage, if a dual carriage is configured.
    pub fn active_carriage(&self) -> Option<Carriage> {
        self.dual_carriage.map(|dc| {
            if self.active[dc.axis.index()] == dc.rail_index(Carriage::Secondary) {
                Carriage::Secondary
            } else {
                Carriage::Primary
            }
        })
    }

    /// Every stepper in axis order; on the dual-carriage axis both
    /// carriage rails appear, in carriage order.
    pub fn steppers(&self) -> heapless::Vec<&Stepper, MAX_RAILS> {
        let mut out = heapless::Vec::new();
        for axis in Axis::ALL {
            match self.dual_carriage {
                Some(dc) if dc.axis == axis => {
                    for index in dc.rails {
                        // Cannot overflow: one rail per axis plus the extra carriage.
                        let _ = out.push(self.rails[index].stepper());
                    }
                }
                _ => {
                    let _ = out.push(self.rails[axis.index()].stepper());
                }
            }
        }
        out
    }

    /// Assemble a Cartesian position from per-stepper positions keyed by
    /// stepper name, reading each active rail.
    pub fn calc_position(
        &self,
        stepper_positions: &HashMap<String, f64>,
    ) -> KinematicsResult<Coord> {
        let mut position = [0.0; AXIS_COUNT];
        for axis in Axis::ALL {
            let stepper = self.active_rail(axis).stepper();
            position[axis.index()] =
                *stepper_positions.get(stepper.name()).ok_or_else(|| {
                    KinematicsError::MissingStepper {
                        name: stepper.name().to_string(),
                    }
                })?;
        }
        Ok(position)
    }

    /// Set every active rail's commanded position; for each axis in
    /// `homed_axes`, flip its soft limit to that rail's travel range.
    pub fn set_position(
        &mut self,
        position: Coord,
        homed_axes: AxisMask,
        limits: &mut SoftLimits,
    ) {
        for axis in Axis::ALL {
            let index = self.active[axis.index()];
            self.rails[index].set_commanded_position(position[axis.index()]);
            if homed_axes.contains_axis(axis) {
                limits.mark_homed(axis, self.rails[index].range());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::testing::{
        PipelineEvent, RecordingPipeline, basic_config, dual_carriage_config,
    };

    fn stepper_names(registry: &RailRegistry) -> Vec<String> {
        registry
            .steppers()
            .iter()
            .map(|s| s.name().to_string())
            .collect()
    }

    #[test]
    fn construction_wires_pipeline() {
        let mut pipeline = RecordingPipeline::new();
        let registry = RailRegistry::new(&basic_config(), &mut pipeline).unwrap();

        let registered: Vec<_> = pipeline
            .events
            .iter()
            .filter_map(|e| match e {
                PipelineEvent::RegisterStepper(name) => Some(name.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(registered, ["stepper_x", "stepper_y", "stepper_z"]);
        for axis in Axis::ALL {
            assert!(registry.active_rail(axis).is_bound());
        }
        assert_eq!(registry.active_carriage(), None);
        assert_eq!(registry.dual_carriage_axis(), None);
    }

    #[test]
    fn dual_carriage_rail_starts_unbound() {
        let mut pipeline = RecordingPipeline::new();
        let registry = RailRegistry::new(&dual_carriage_config(), &mut pipeline).unwrap();

        let dc = registry.dual_carriage().unwrap();
        assert_eq!(dc.axis, Axis::X);
        assert!(registry.active_rail(Axis::X).is_bound());
        assert!(!registry.rail(dc.rail_index(Carriage::Secondary)).is_bound());
        assert_eq!(registry.active_carriage(), Some(Carriage::Primary));
    }

    #[test]
    fn steppers_enumerates_both_carriages_in_axis_order() {
        let mut pipeline = RecordingPipeline::new();

        let single = RailRegistry::new(&basic_config(), &mut pipeline).unwrap();
        assert_eq!(
            stepper_names(&single),
            ["stepper_x", "stepper_y", "stepper_z"]
        );

        let dual = RailRegistry::new(&dual_carriage_config(), &mut pipeline).unwrap();
        assert_eq!(
            stepper_names(&dual),
            [
                "stepper_x",
                "stepper_dual_carriage",
                "stepper_y",
                "stepper_z"
            ]
        );
    }

    #[test]
    fn calc_position_reads_active_rails() {
        let mut pipeline = RecordingPipeline::new();
        let registry = RailRegistry::new(&basic_config(), &mut pipeline).unwrap();

        let mut positions = HashMap::new();
        positions.insert("stepper_x".to_string(), 10.0);
        positions.insert("stepper_y".to_string(), 20.0);
        positions.insert("stepper_z".to_string(), 5.0);
        assert_eq!(
            registry.calc_position(&positions).unwrap(),
            [10.0, 20.0, 5.0]
        );

        positions.remove("stepper_y");
        let err = registry.calc_position(&positions).unwrap_err();
        assert!(matches!(
            err,
            KinematicsError::MissingStepper { ref name } if name == "stepper_y"
        ));
    }

    #[test]
    fn set_position_marks_requested_axes() {
        let mut pipeline = RecordingPipeline::new();
        let mut registry = RailRegistry::new(&basic_config(), &mut pipeline).unwrap();
        let mut limits = SoftLimits::new();

        registry.set_position([10.0, 20.0, 5.0], AxisMask::X | AxisMask::Z, &mut limits);

        assert_eq!(registry.active_rail(Axis::X).commanded_position(), 10.0);
        assert_eq!(registry.active_rail(Axis::Y).commanded_position(), 20.0);
        assert_eq!(registry.active_rail(Axis::Z).commanded_position(), 5.0);
        assert_eq!(limits.homed_mask(), AxisMask::X | AxisMask::Z);
        assert_eq!(limits.get(Axis::Z).bounds(), Some((0.0, 150.0)));
    }
}
