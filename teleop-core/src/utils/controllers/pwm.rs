//! `embedded-hal` PWM bindings for the actuator traits.
//!
//! These let the routine drive a phase/enable H-bridge or a hobby servo
//! directly from a microcontroller PWM channel: `PwmMotor` fills
//! `HardwareMap::DriveMotor` and `PwmServo` fills `HardwareMap::Servo`. Bus errors are logged and
//! dropped: the control loop treats every actuator command as delivered.

use embedded_hal::{digital::OutputPin, pwm::SetDutyCycle};

use crate::utils::controllers::hardware::{Direction, PowerActuator, Servo};

/// Open-loop motor on a phase/enable H-bridge.
///
/// The phase pin selects the spin sense and the enable channel carries the
/// magnitude as a duty cycle.
pub struct PwmMotor<P, D> {
    enable: P,
    phase: D,
    direction: Direction,
}

impl<P, D> PwmMotor<P, D>
where
    P: SetDutyCycle,
    D: OutputPin,
{
    pub fn new(
        enable: P,
        phase: D,
    ) -> Self {
        Self {
            enable,
            phase,
            direction: Direction::Forward,
        }
    }

    /// Give back the PWM channel and phase pin.
    pub fn release(self) -> (P, D) {
        (self.enable, self.phase)
    }
}

impl<P, D> PowerActuator for PwmMotor<P, D>
where
    P: SetDutyCycle,
    D: OutputPin,
{
    fn set_power(
        &mut self,
        power: f32,
    ) {
        let power = match self.direction {
            Direction::Forward => power,
            Direction::Reverse => -power,
        };
        // NaN power stops the motor.
        let magnitude = if power.is_nan() {
            0.0
        } else {
            libm::fabsf(power).min(1.0)
        };
        let max_duty = self.enable.max_duty_cycle();

        let phase = if power >= 0.0 {
            self.phase.set_high()
        } else {
            self.phase.set_low()
        };
        if let Err(e) = phase {
            tracing::error!("phase pin write failed: {:?}", e);
        }

        let duty = (magnitude * max_duty as f32) as u16;
        if let Err(e) = self.enable.set_duty_cycle(duty) {
            tracing::error!("enable duty write failed: {:?}", e);
        }
    }

    fn set_direction(
        &mut self,
        direction: Direction,
    ) {
        self.direction = direction;
    }
}

/// Hobby servo driven by pulse width.
///
/// Position `0.0` maps to `min_pulse` and `1.0` to `max_pulse`, both given as
/// a fraction of the PWM period.
pub struct PwmServo<P> {
    pwm: P,
    min_pulse: f32,
    max_pulse: f32,
}

impl<P> PwmServo<P>
where
    P: SetDutyCycle,
{
    /// 1 ms to 2 ms out of a 20 ms (50 Hz) period.
    pub const DEFAULT_MIN_PULSE: f32 = 0.05;
    pub const DEFAULT_MAX_PULSE: f32 = 0.10;

    pub fn new(pwm: P) -> Self {
        Self::with_pulse_range(pwm, Self::DEFAULT_MIN_PULSE, Self::DEFAULT_MAX_PULSE)
    }

    pub fn with_pulse_range(
        pwm: P,
        min_pulse: f32,
        max_pulse: f32,
    ) -> Self {
        Self {
            pwm,
            min_pulse,
            max_pulse,
        }
    }

    pub fn release(self) -> P {
        self.pwm
    }
}

impl<P> Servo for PwmServo<P>
where
    P: SetDutyCycle,
{
    fn set_position(
        &mut self,
        position: f32,
    ) {
        let position = position.clamp(0.0, 1.0);
        let pulse = self.min_pulse + (self.max_pulse - self.min_pulse) * position;
        let duty = (pulse * self.pwm.max_duty_cycle() as f32) as u16;
        if let Err(e) = self.pwm.set_duty_cycle(duty) {
            tracing::error!("servo duty write failed: {:?}", e);
        }
    }
}
