//! Intake rotation control.
//!
//! Two buttons walk an angle accumulator up or down one step per tick; the
//! angle is clamped to `[0, limit]` and sent to the servo as `angle / limit`.

use crate::utils::controllers::hardware::{Servo, Telemetry};

/// Clamped angle accumulator, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntakeAngle {
    degrees: f32,
    limit: f32,
    step: f32,
}

impl IntakeAngle {
    /// Start at 0 degrees.
    pub const fn new(
        limit: f32,
        step: f32,
    ) -> Self {
        Self {
            degrees: 0.0,
            limit,
            step,
        }
    }

    pub const fn degrees(&self) -> f32 {
        self.degrees
    }

    /// Apply one tick of button input and return the new angle.
    ///
    /// The two buttons are evaluated in sequence, forward first. Holding both
    /// cancels out anywhere below the upper limit; at the limit the forward
    /// step is absorbed by the clamp and the back step still applies.
    pub fn update(
        &mut self,
        forward: bool,
        back: bool,
    ) -> f32 {
        if forward {
            self.degrees = (self.degrees + self.step).min(self.limit);
        }
        if back {
            self.degrees = (self.degrees - self.step).max(0.0);
        }
        self.degrees
    }

    /// Servo command in `[0, 1]`.
    pub fn servo_position(&self) -> f32 {
        self.degrees / self.limit
    }
}

/// Rotating intake: the accumulator plus the servo it drives.
pub struct IntakeRotation<S> {
    servo: S,
    angle: IntakeAngle,
}

impl<S> IntakeRotation<S>
where
    S: Servo,
{
    pub fn new(
        servo: S,
        angle: IntakeAngle,
    ) -> Self {
        Self { servo, angle }
    }

    pub fn angle(&self) -> &IntakeAngle {
        &self.angle
    }

    /// Step the accumulator, command the servo and report the angle.
    pub fn update<T: Telemetry>(
        &mut self,
        forward: bool,
        back: bool,
        telemetry: &mut T,
    ) -> f32 {
        let rotation = self.angle.update(forward, back);
        self.servo.set_position(self.angle.servo_position());
        telemetry.add_data("Servo_rotation", format_args!("{}", rotation));
        rotation
    }
}
