//! Dual-carriage selection.

use tracing::debug;

use crate::error::{KinematicsError, KinematicsResult};
use crate::limits::SoftLimits;
use crate::pipeline::MotionPipeline;
use crate::registry::RailRegistry;

/// One of the two carriages sharing the dual-carriage axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Carriage {
    /// The axis's original rail.
    Primary = 0,
    /// The auxiliary rail from the dual-carriage config.
    Secondary = 1,
}

impl Carriage {
    /// Validate an operator-supplied index. Returns `None` outside {0, 1}.
    #[inline]
    pub const fn from_index(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Primary),
            1 => Some(Self::Secondary),
            _ => None,
        }
    }

    /// Carriage slot index.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Switch the dual-carriage axis to `carriage`.
///
/// The steps run in exactly this order:
/// 1. flush step generation,
/// 2. unbind the queue from the outgoing rail,
/// 3. bind it to the incoming rail,
/// 4. repoint the axis mapping,
/// 5. overwrite the pipeline position's carriage-axis coordinate with the
///    incoming rail's commanded position,
/// 6. refresh the axis's soft limit to the incoming rail's range, if the
///    axis is homed.
///
/// Selecting the already-active carriage is harmless.
pub(crate) fn activate_carriage(
    registry: &mut RailRegistry,
    limits: &mut SoftLimits,
    pipeline: &mut dyn MotionPipeline,
    carriage: Carriage,
) -> KinematicsResult<()> {
    let dc = registry
        .dual_carriage()
        .ok_or(KinematicsError::NoDualCarriage)?;
    let target = dc.rail_index(carriage);

    pipeline.flush_step_generation();
    let outgoing = registry.active_index(dc.axis);
    registry.rail_mut(outgoing).unbind_queue();
    let queue = pipeline.trajectory_queue();
    registry.rail_mut(target).bind_queue(queue);
    registry.set_active_index(dc.axis, target);

    let mut position = pipeline.position();
    position[dc.axis.index()] = registry.rail(target).commanded_position();
    pipeline.set_position(position);

    if limits.get(dc.axis).is_homed() {
        limits.mark_homed(dc.axis, registry.rail(target).range());
    }

    debug!(
        axis = %dc.axis,
        carriage = carriage.index(),
        rail = registry.rail(target).name(),
        "carriage activated"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::testing::{
        PipelineEvent, RecordingPipeline, basic_config, dual_carriage_config,
    };
    use gantry_common::axis::Axis;

    fn setup() -> (RailRegistry, SoftLimits, RecordingPipeline) {
        let mut pipeline = RecordingPipeline::new();
        let registry = RailRegistry::new(&dual_carriage_config(), &mut pipeline).unwrap();
        pipeline.events.clear();
        (registry, SoftLimits::new(), pipeline)
    }

    #[test]
    fn from_index_validates_range() {
        assert_eq!(Carriage::from_index(0), Some(Carriage::Primary));
        assert_eq!(Carriage::from_index(1), Some(Carriage::Secondary));
        assert_eq!(Carriage::from_index(2), None);
    }

    #[test]
    fn activation_rebinds_and_repoints() {
        let (mut registry, mut limits, mut pipeline) = setup();
        pipeline.position = [40.0, 50.0, 60.0];

        activate_carriage(&mut registry, &mut limits, &mut pipeline, Carriage::Secondary)
            .unwrap();

        assert_eq!(registry.active_carriage(), Some(Carriage::Secondary));
        assert_eq!(registry.active_rail(Axis::X).name(), "dual_carriage");
        assert!(registry.active_rail(Axis::X).is_bound());
        let dc = registry.dual_carriage().unwrap();
        assert!(!registry.rail(dc.rail_index(Carriage::Primary)).is_bound());

        // Flush precedes the position overwrite; the X coordinate becomes
        // the incoming rail's commanded position (still 0.0 here).
        assert_eq!(
            pipeline.events,
            [
                PipelineEvent::Flush,
                PipelineEvent::SetPosition([0.0, 50.0, 60.0])
            ]
        );
    }

    #[test]
    fn activation_refreshes_limit_only_when_homed() {
        let (mut registry, mut limits, mut pipeline) = setup();

        activate_carriage(&mut registry, &mut limits, &mut pipeline, Carriage::Secondary)
            .unwrap();
        assert!(!limits.get(Axis::X).is_homed());

        limits.mark_homed(Axis::X, registry.active_rail(Axis::X).range());
        activate_carriage(&mut registry, &mut limits, &mut pipeline, Carriage::Primary)
            .unwrap();
        // Refreshed to the primary rail's travel.
        assert_eq!(limits.get(Axis::X).bounds(), Some((0.0, 200.0)));

        activate_carriage(&mut registry, &mut limits, &mut pipeline, Carriage::Secondary)
            .unwrap();
        assert_eq!(limits.get(Axis::X).bounds(), Some((100.0, 300.0)));
    }

    #[test]
    fn activation_is_idempotent() {
        let (mut registry, mut limits, mut pipeline) = setup();

        activate_carriage(&mut registry, &mut limits, &mut pipeline, Carriage::Primary)
            .unwrap();
        activate_carriage(&mut registry, &mut limits, &mut pipeline, Carriage::Primary)
            .unwrap();

        assert_eq!(registry.active_carriage(), Some(Carriage::Primary));
        assert!(registry.active_rail(Axis::X).is_bound());
    }

    #[test]
    fn activation_without_dual_carriage_is_an_error() {
        let mut pipeline = RecordingPipeline::new();
        let mut registry = RailRegistry::new(&basic_config(), &mut pipeline).unwrap();
        let mut limits = SoftLimits::new();

        let err =
            activate_carriage(&mut registry, &mut limits, &mut pipeline, Carriage::Secondary)
                .unwrap_err();
        assert!(matches!(err, KinematicsError::NoDualCarriage));
    }
}
