//! Capability traits for the hardware layer the routine runs on.
//!
//! The host runtime owns the real drivers (closed-loop position control,
//! encoder reads, servo pulses). The routine only sees these traits, which
//! keeps the control logic testable against in-memory doubles.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Rotation sense applied by the driver to every power command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

/// Driver-side control mode for an encoder-equipped motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunMode {
    /// Open-loop power.
    #[default]
    RunWithoutEncoder,
    /// Zero the encoder and hold the motor stopped.
    StopAndResetEncoder,
    /// Drive toward the target position with the commanded power as a ceiling.
    RunToPosition,
}

/// Anything that accepts a signed power in `[-1, 1]`.
pub trait PowerActuator {
    fn set_power(
        &mut self,
        power: f32,
    );

    fn set_direction(
        &mut self,
        direction: Direction,
    );
}

/// Encoder-equipped motor with driver-side position control.
pub trait DcMotor: PowerActuator {
    fn set_mode(
        &mut self,
        mode: RunMode,
    );

    fn set_target_position(
        &mut self,
        ticks: i32,
    );

    /// `true` while the driver is still moving toward its target.
    fn is_busy(&self) -> bool;

    fn current_position(&self) -> i32;
}

/// Positional servo commanded over `[0, 1]`.
pub trait Servo {
    fn set_position(
        &mut self,
        position: f32,
    );
}

/// Device lookup by configured name.
///
/// Returning `None` means nothing with that name is attached. The drive wheels
/// only ever take open-loop power, so they get their own device type and can
/// sit on a plain H-bridge; slides and intake need encoder feedback.
pub trait HardwareMap {
    type DriveMotor: PowerActuator;
    type Motor: DcMotor;
    type Servo: Servo;

    fn drive_motor(
        &mut self,
        name: &str,
    ) -> Option<Self::DriveMotor>;

    fn motor(
        &mut self,
        name: &str,
    ) -> Option<Self::Motor>;

    fn servo(
        &mut self,
        name: &str,
    ) -> Option<Self::Servo>;
}

/// Fire-and-forget key/value reporting.
///
/// Entries accumulate until `update` publishes them; nothing here can fail or
/// feed back into control.
pub trait Telemetry {
    fn add_data(
        &mut self,
        caption: &str,
        value: fmt::Arguments<'_>,
    );

    fn update(&mut self);
}

/// Snapshot of one gamepad for a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GamepadState {
    pub left_stick_x: f32,
    pub left_stick_y: f32,
    pub right_stick_x: f32,
    pub right_stick_y: f32,
    pub a: bool,
    pub b: bool,
    pub x: bool,
    pub y: bool,
    pub left_bumper: bool,
    pub right_bumper: bool,
}
