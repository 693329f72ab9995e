//! Candidate moves and their speed ceilings.

use gantry_common::axis::{Axis, Coord};

/// A straight-line move candidate handed to `check_move`.
///
/// Carries the requested end position, the per-axis deltas, the Euclidean
/// move distance, and the velocity/acceleration ceilings the planner may
/// use. Validation only ever lowers the ceilings.
#[derive(Debug, Clone, PartialEq)]
pub struct Move {
    end_pos: Coord,
    axes_d: Coord,
    move_d: f64,
    velocity: f64,
    accel: f64,
}

impl Move {
    /// Build a move from start and end positions and the requested
    /// ceilings.
    pub fn new(start: Coord, end: Coord, velocity: f64, accel: f64) -> Self {
        let axes_d = [end[0] - start[0], end[1] - start[1], end[2] - start[2]];
        let move_d =
            (axes_d[0] * axes_d[0] + axes_d[1] * axes_d[1] + axes_d[2] * axes_d[2]).sqrt();
        Self {
            end_pos: end,
            axes_d,
            move_d,
            velocity,
            accel,
        }
    }

    /// Requested end position.
    #[inline]
    pub fn end_pos(&self) -> Coord {
        self.end_pos
    }

    /// Per-axis deltas.
    #[inline]
    pub fn axes_d(&self) -> Coord {
        self.axes_d
    }

    /// Delta on one axis.
    #[inline]
    pub fn delta(&self, axis: Axis) -> f64 {
        self.axes_d[axis.index()]
    }

    /// Euclidean move distance.
    #[inline]
    pub fn move_d(&self) -> f64 {
        self.move_d
    }

    /// Current velocity ceiling [mm/s].
    #[inline]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Current acceleration ceiling [mm/s^2].
    #[inline]
    pub fn accel(&self) -> f64 {
        self.accel
    }

    /// Min-clamp the ceilings. Monotonic and idempotent.
    pub fn limit_speed(&mut self, velocity: f64, accel: f64) {
        self.velocity = self.velocity.min(velocity);
        self.accel = self.accel.min(accel);
    }
}
