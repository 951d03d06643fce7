//! Drive mixing and mechanism control for a gamepad-driven mecanum robot on
//! no-std platforms.
//!
//! For a runnable host, see the `sim-hub` binary under `teleop-app/`.
#![no_std]

pub mod utils;
