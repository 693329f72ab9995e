//! Trait seams toward the motion pipeline and the homing controller.
//!
//! The kinematics layer never generates steps and never touches hardware.
//! Everything below it is reached through these two traits; the host wires
//! in the real pipeline, tests wire in mocks.

use gantry_common::axis::Coord;

use crate::error::ProbeError;
use crate::homing::AxisTargets;
use crate::rail::{Rail, Stepper};

/// Opaque handle to the pipeline's trajectory queue.
///
/// Rails hold this while active; an unbound rail is detached from motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueueHandle(u32);

impl QueueHandle {
    /// Wrap a pipeline-assigned queue id.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Raw queue id.
    #[inline]
    pub const fn id(self) -> u32 {
        self.0
    }
}

/// Global velocity/acceleration maxima advertised by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaxRates {
    /// Maximum velocity [mm/s].
    pub velocity: f64,
    /// Maximum acceleration [mm/s^2].
    pub accel: f64,
}

/// Narrow interface onto the motion pipeline (trajectory queue plus step
/// generation).
pub trait MotionPipeline {
    /// Global velocity/acceleration maxima.
    fn max_rates(&self) -> MaxRates;

    /// Handle of the trajectory queue active rails bind to.
    fn trajectory_queue(&self) -> QueueHandle;

    /// Register a rail's stepper with the pipeline's step generator set.
    fn register_step_generator(&mut self, stepper: &Stepper);

    /// Barrier: returns once all queued motion has been turned into steps.
    fn flush_step_generation(&mut self);

    /// Current Cartesian position of the pipeline.
    fn position(&self) -> Coord;

    /// Overwrite the pipeline's Cartesian position.
    fn set_position(&mut self, position: Coord);
}

/// External controller driving the physical probe sequence.
pub trait HomingController {
    /// Home the given rails: travel from `forcepos` toward `homepos` until
    /// each rail's endstop triggers. Only coordinates that are `Some` are
    /// constrained. On `Ok` the rails are treated as resting at `homepos`;
    /// the sequencer records that on the rail and in the soft limits.
    fn home_rails(
        &mut self,
        rails: &[&Rail],
        forcepos: AxisTargets,
        homepos: AxisTargets,
    ) -> Result<(), ProbeError>;
}

#[cfg(test)]
pub(crate) mod testing {
    //! Mock pipeline and controller shared by the unit tests.

    use super::*;
    use crate::config::GantryConfig;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum PipelineEvent {
        RegisterStepper(String),
        Flush,
        SetPosition(Coord),
    }

    pub(crate) struct RecordingPipeline {
        pub(crate) rates: MaxRates,
        pub(crate) queue: QueueHandle,
        pub(crate) position: Coord,
        pub(crate) events: Vec<PipelineEvent>,
    }

    impl RecordingPipeline {
        pub(crate) fn new() -> Self {
            Self {
                rates: MaxRates {
                    velocity: 500.0,
                    accel: 3000.0,
                },
                queue: QueueHandle::new(1),
                position: [0.0; 3],
                events: Vec::new(),
            }
        }
    }

    impl MotionPipeline for RecordingPipeline {
        fn max_rates(&self) -> MaxRates {
            self.rates
        }

        fn trajectory_queue(&self) -> QueueHandle {
            self.queue
        }

        fn register_step_generator(&mut self, stepper: &Stepper) {
            self.events
                .push(PipelineEvent::RegisterStepper(stepper.name().to_string()));
        }

        fn flush_step_generation(&mut self) {
            self.events.push(PipelineEvent::Flush);
        }

        fn position(&self) -> Coord {
            self.position
        }

        fn set_position(&mut self, position: Coord) {
            self.position = position;
            self.events.push(PipelineEvent::SetPosition(position));
        }
    }

    pub(crate) struct ScriptedController {
        pub(crate) fail_rail: Option<String>,
        pub(crate) homed: Vec<(String, AxisTargets, AxisTargets)>,
    }

    impl ScriptedController {
        pub(crate) fn new() -> Self {
            Self {
                fail_rail: None,
                homed: Vec::new(),
            }
        }
    }

    impl HomingController for ScriptedController {
        fn home_rails(
            &mut self,
            rails: &[&Rail],
            forcepos: AxisTargets,
            homepos: AxisTargets,
        ) -> Result<(), ProbeError> {
            for rail in rails {
                if self.fail_rail.as_deref() == Some(rail.name()) {
                    return Err(ProbeError {
                        rail: rail.name().to_string(),
                        reason: "endstop never triggered".to_string(),
                    });
                }
                self.homed
                    .push((rail.name().to_string(), forcepos, homepos));
            }
            Ok(())
        }
    }

    pub(crate) fn basic_config() -> GantryConfig {
        toml::from_str(
            r#"
[rail.x]
position_min = 0.0
position_max = 200.0
position_endstop = 0.0

[rail.y]
position_min = 0.0
position_max = 200.0
position_endstop = 0.0

[rail.z]
position_min = 0.0
position_max = 150.0
position_endstop = 0.0
"#,
        )
        .unwrap()
    }

    pub(crate) fn dual_carriage_config() -> GantryConfig {
        toml::from_str(
            r#"
[rail.x]
position_min = 0.0
position_max = 200.0
position_endstop = 0.0

[rail.y]
position_min = 0.0
position_max = 200.0
position_endstop = 0.0

[rail.z]
position_min = 0.0
position_max = 150.0
position_endstop = 0.0

[dual_carriage]
axis = "x"
position_min = 100.0
position_max = 300.0
position_endstop = 300.0
"#,
        )
        .unwrap()
    }
}
