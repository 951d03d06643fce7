//! Module Exports
//!
//! This file exports the op mode that ties the controllers together.
//!
//! # Modules
//! - `teleop`: per-tick gamepad handling and the host-driven loop.

pub mod teleop;
