//! Module Exports
//!
//! This file exports the controllers that make up one tele-operation tick and
//! the by-name binding of the devices they drive.
//!
//! - `hardware`: capability traits implemented by the host runtime.
//! - `drive`: applies mecanum wheel powers to the four drive motors.
//! - `intake`: the clamped intake rotation accumulator and its servo.
//! - `slides`: the level-sensed two-position slide pair.
//! - `pwm`: `embedded-hal` PWM implementations of the drive motor and servo
//!   traits.

pub mod drive;
pub mod hardware;
pub mod intake;
pub mod pwm;
pub mod slides;

use core::fmt;

use hardware::{Direction, HardwareMap, PowerActuator};

pub use drive::MecanumDrive;
pub use intake::{IntakeAngle, IntakeRotation};
pub use slides::{SlidePair, SlideReport, SlideTarget};

/// Name the intake rotation servo is bound under.
pub const INTAKE_ROTATION_SERVO: &str = "intake_rotation";

/// Every motor the routine binds at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotorType {
    LeftFront,
    LeftBack,
    RightFront,
    RightBack,
    LeftSlide,
    RightSlide,
    Intake,
}

impl MotorType {
    pub const ALL: [MotorType; 7] = [
        MotorType::LeftFront,
        MotorType::LeftBack,
        MotorType::RightFront,
        MotorType::RightBack,
        MotorType::LeftSlide,
        MotorType::RightSlide,
        MotorType::Intake,
    ];

    /// Configured device name.
    pub const fn name(self) -> &'static str {
        match self {
            MotorType::LeftFront => "left_front_drive",
            MotorType::LeftBack => "left_back_drive",
            MotorType::RightFront => "right_front_drive",
            MotorType::RightBack => "right_back_drive",
            MotorType::LeftSlide => "left_slide",
            MotorType::RightSlide => "right_slide",
            MotorType::Intake => "intake_motor",
        }
    }

    /// Direction applied once at startup. The left drive side and the right
    /// slide are mounted mirrored.
    pub const fn default_direction(self) -> Direction {
        match self {
            MotorType::LeftFront | MotorType::LeftBack | MotorType::RightSlide => {
                Direction::Reverse
            }
            MotorType::RightFront
            | MotorType::RightBack
            | MotorType::LeftSlide
            | MotorType::Intake => Direction::Forward,
        }
    }
}

impl fmt::Display for MotorType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A required device was not found in the hardware map.
///
/// Always fatal: the routine must not run with only part of its hardware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    MissingMotor(MotorType),
    MissingServo(&'static str),
}

impl fmt::Display for BindError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            BindError::MissingMotor(motor) => write!(f, "no motor bound as \"{}\"", motor),
            BindError::MissingServo(name) => write!(f, "no servo bound as \"{}\"", name),
        }
    }
}

impl core::error::Error for BindError {}

/// All seven motors, bound and with their startup directions applied.
pub struct Motors<H: HardwareMap> {
    pub left_front: H::DriveMotor,
    pub left_back: H::DriveMotor,
    pub right_front: H::DriveMotor,
    pub right_back: H::DriveMotor,
    pub left_slide: H::Motor,
    pub right_slide: H::Motor,
    pub intake: H::Motor,
}

impl<H> Motors<H>
where
    H: HardwareMap,
{
    /// Look up every `MotorType` by name, stopping at the first one missing.
    pub fn bind(hw: &mut H) -> Result<Self, BindError> {
        let motors = Motors {
            left_front: bind_drive_motor(hw, MotorType::LeftFront)?,
            left_back: bind_drive_motor(hw, MotorType::LeftBack)?,
            right_front: bind_drive_motor(hw, MotorType::RightFront)?,
            right_back: bind_drive_motor(hw, MotorType::RightBack)?,
            left_slide: bind_motor(hw, MotorType::LeftSlide)?,
            right_slide: bind_motor(hw, MotorType::RightSlide)?,
            intake: bind_motor(hw, MotorType::Intake)?,
        };
        tracing::info!("bound {} motors", MotorType::ALL.len());
        Ok(motors)
    }
}

fn missing(motor: MotorType) -> BindError {
    tracing::error!("missing motor: {}", motor);
    BindError::MissingMotor(motor)
}

fn with_direction<A: PowerActuator>(
    mut actuator: A,
    motor: MotorType,
) -> A {
    actuator.set_direction(motor.default_direction());
    actuator
}

fn bind_drive_motor<H: HardwareMap>(
    hw: &mut H,
    motor: MotorType,
) -> Result<H::DriveMotor, BindError> {
    hw.drive_motor(motor.name())
        .map(|m| with_direction(m, motor))
        .ok_or_else(|| missing(motor))
}

fn bind_motor<H: HardwareMap>(
    hw: &mut H,
    motor: MotorType,
) -> Result<H::Motor, BindError> {
    hw.motor(motor.name())
        .map(|m| with_direction(m, motor))
        .ok_or_else(|| missing(motor))
}

/// Look up a servo by name.
pub fn bind_servo<H>(
    hw: &mut H,
    name: &'static str,
) -> Result<H::Servo, BindError>
where
    H: HardwareMap,
{
    hw.servo(name).ok_or_else(|| {
        tracing::error!("missing servo: {}", name);
        BindError::MissingServo(name)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_unique() {
        for (i, a) in MotorType::ALL.iter().enumerate() {
            for b in &MotorType::ALL[i + 1..] {
                assert_ne!(a.name(), b.name());
            }
        }
    }

    #[test]
    fn test_mirrored_directions() {
        assert_eq!(MotorType::LeftFront.default_direction(), Direction::Reverse);
        assert_eq!(MotorType::LeftBack.default_direction(), Direction::Reverse);
        assert_eq!(MotorType::RightFront.default_direction(), Direction::Forward);
        assert_eq!(MotorType::RightBack.default_direction(), Direction::Forward);
        assert_eq!(MotorType::LeftSlide.default_direction(), Direction::Forward);
        assert_eq!(MotorType::RightSlide.default_direction(), Direction::Reverse);
    }
}
