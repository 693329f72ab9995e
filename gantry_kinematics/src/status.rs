//! Status snapshot for the command layer.

use serde::Serialize;

/// Workspace corner coordinate: x, y, z plus a trailing auxiliary channel
/// pinned to zero for hosts that report four-wide positions.
pub type Corner = [f64; 4];

/// Snapshot returned by `CartesianKinematics::status`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KinematicsStatus {
    /// Lowercase letters of the homed axes in `xyz` order.
    pub homed_axes: String,
    /// Minimum workspace corner, from the axis rails' travel ranges.
    pub axis_minimum: Corner,
    /// Maximum workspace corner, from the axis rails' travel ranges.
    pub axis_maximum: Corner,
    /// Selected carriage index when a dual carriage is configured.
    pub active_carriage: Option<u8>,
}
