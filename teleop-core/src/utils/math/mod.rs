//! Math utilities for the tele-operation routine.
//!
//! This module provides wheel power mixing for four-wheeled mecanum robots.

pub mod mecanum;
