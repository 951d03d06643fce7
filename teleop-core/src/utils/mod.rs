//! Utility re-exports for the tele-operation routine.
//!
//! - `config`: tunable setpoints and powers with their default values
//! - `controllers`: hardware traits, device binding, and the drive, intake and
//!   slide controllers
//! - `math`: mecanum wheel mixing
//! - `opmode`: the per-tick routine and the host loop that repeats it

pub mod config;
pub mod controllers;
pub mod math;
pub mod opmode;

pub use config::{ConfigError, TeleOpConfig};
pub use controllers::hardware::{
    DcMotor, Direction, GamepadState, HardwareMap, PowerActuator, RunMode, Servo, Telemetry,
};
pub use controllers::{BindError, MotorType};
pub use math::mecanum::{MecanumMixer as mixer, WheelPowers};
pub use opmode::teleop::{OpModeHost, SetupError, TeleOp, TickReport};
