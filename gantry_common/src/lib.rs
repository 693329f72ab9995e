//! Gantry Common Library
//!
//! This crate provides the shared vocabulary for the gantry workspace:
//! Cartesian axis types, homing parameters, system constants, and the
//! TOML configuration loader.
//!
//! # Module Structure
//!
//! - [`axis`] - Axis enumeration, axis masks, coordinate triple
//! - [`homing`] - Homing direction and per-rail homing parameters
//! - [`consts`] - System-wide capacities and defaults
//! - [`config`] - Configuration loading trait and error type
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use gantry_common::prelude::*;
//!
//! let axis = Axis::from_letter('x').unwrap();
//! assert_eq!(axis.index(), 0);
//! ```

pub mod axis;
pub mod config;
pub mod consts;
pub mod homing;
pub mod prelude;
