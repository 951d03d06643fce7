//! Mecanum drive train.
//!
//! Owns the four wheel motors and pushes the mixer output to them once per
//! tick.

use crate::utils::{self, controllers::hardware::{PowerActuator, Telemetry}, WheelPowers};

/// High-level driver for the four mecanum wheels.
pub struct MecanumDrive<M> {
    front_left: M,
    front_right: M,
    back_left: M,
    back_right: M,
    mixer: utils::mixer,
}

impl<M> MecanumDrive<M>
where
    M: PowerActuator,
{
    pub fn new(
        front_left: M,
        front_right: M,
        back_left: M,
        back_right: M,
        damping: f32,
    ) -> Self {
        MecanumDrive {
            front_left,
            front_right,
            back_left,
            back_right,
            mixer: utils::mixer::new(damping),
        }
    }

    /// Mix `x` (strafe), `y` (forward) and `yaw`, command the wheels, and
    /// report the normalized, undamped mapping.
    ///
    /// Returns the powers actually commanded.
    pub fn drive<T: Telemetry>(
        &mut self,
        x: f32,
        y: f32,
        yaw: f32,
        telemetry: &mut T,
    ) -> WheelPowers {
        let normalized = utils::mixer::mix(x, y, yaw).normalized();
        let powers = normalized.scaled(self.mixer.damping());
        self.apply_wheel_powers(&powers);
        telemetry.add_data("Motor Powers", format_args!("{}", normalized));
        powers
    }

    /// Send one power to each wheel.
    pub fn apply_wheel_powers(
        &mut self,
        powers: &WheelPowers,
    ) {
        self.front_left.set_power(powers.front_left);
        self.back_left.set_power(powers.back_left);
        self.front_right.set_power(powers.front_right);
        self.back_right.set_power(powers.back_right);
    }
}
