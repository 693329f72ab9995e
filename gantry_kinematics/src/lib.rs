//! Cartesian kinematics and homing policy for a gantry motion host.
//!
//! This crate owns the mapping between named linear rails and the three
//! Cartesian axes: which rail is active per axis, which axes have a valid
//! soft-limit interval, whether a candidate move is legal and how hard Z
//! motion may be pushed, how a homing pass is sequenced (including the
//! dual-carriage double pass), and what the status report says.
//!
//! It never generates steps and never touches hardware. The motion
//! pipeline below and the homing controller beside it are reached through
//! the [`pipeline::MotionPipeline`] and [`pipeline::HomingController`]
//! traits; the command layer above calls the methods on
//! [`CartesianKinematics`].
//!
//! # Threading
//!
//! One `CartesianKinematics` instance is owned and driven by a single host
//! thread. Cross-thread coordination (letting queued motion drain before a
//! carriage switch, for example) happens inside the pipeline's
//! `flush_step_generation` barrier, not here.
//!
//! # Module Structure
//!
//! - [`cartesian`] - the coordinator type
//! - [`config`] - TOML configuration structures
//! - [`rail`] / [`registry`] - rails, steppers, active-rail mapping
//! - [`limits`] - per-axis soft limits
//! - [`motion`] - move candidates and their ceilings
//! - [`homing`] - homing targets and pass sequencing
//! - [`carriage`] - dual-carriage selection
//! - [`status`] - status snapshot
//! - [`pipeline`] - traits toward the pipeline and homing controller
//! - [`error`] - error types

pub mod carriage;
pub mod cartesian;
pub mod config;
pub mod error;
pub mod homing;
pub mod limits;
pub mod motion;
pub mod pipeline;
pub mod rail;
pub mod registry;
pub mod status;

pub use cartesian::CartesianKinematics;
pub use error::{KinematicsError, KinematicsResult, ProbeError};
