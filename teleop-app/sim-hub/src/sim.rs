//! In-process stand-in for the robot hardware.
//!
//! Motors follow a first-order run-to-position model so the slides actually
//! travel and report arrival; servos just remember their last position.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use teleop_core::utils::{
    controllers::{MotorType, INTAKE_ROTATION_SERVO},
    DcMotor, Direction, HardwareMap, PowerActuator, RunMode, Servo,
};

/// Encoder ticks covered per control tick at full power.
const TICKS_PER_STEP: f32 = 80.0;
/// A motor within this many ticks of its target is no longer busy.
const POSITION_TOLERANCE: i32 = 5;

#[derive(Debug, Default)]
struct MotorState {
    power: f32,
    direction: Direction,
    mode: RunMode,
    target: i32,
    position: i32,
}

#[derive(Clone, Default)]
pub struct SimMotor(Rc<RefCell<MotorState>>);

impl SimMotor {
    /// Advance the motor model by one control tick.
    pub fn advance(&self) {
        let mut m = self.0.borrow_mut();
        match m.mode {
            RunMode::StopAndResetEncoder => m.position = 0,
            RunMode::RunToPosition => {
                let remaining = m.target - m.position;
                let reach = (m.power.abs() * TICKS_PER_STEP) as i32;
                m.position += remaining.clamp(-reach, reach);
            }
            RunMode::RunWithoutEncoder => {
                let signed = match m.direction {
                    Direction::Forward => m.power,
                    Direction::Reverse => -m.power,
                };
                m.position += (signed * TICKS_PER_STEP) as i32;
            }
        }
    }

    pub fn power(&self) -> f32 {
        self.0.borrow().power
    }
}

impl PowerActuator for SimMotor {
    fn set_power(
        &mut self,
        power: f32,
    ) {
        self.0.borrow_mut().power = power;
    }

    fn set_direction(
        &mut self,
        direction: Direction,
    ) {
        self.0.borrow_mut().direction = direction;
    }
}

impl DcMotor for SimMotor {
    fn set_mode(
        &mut self,
        mode: RunMode,
    ) {
        let mut m = self.0.borrow_mut();
        m.mode = mode;
        if mode == RunMode::StopAndResetEncoder {
            m.position = 0;
        }
    }

    fn set_target_position(
        &mut self,
        ticks: i32,
    ) {
        self.0.borrow_mut().target = ticks;
    }

    fn is_busy(&self) -> bool {
        let m = self.0.borrow();
        m.mode == RunMode::RunToPosition && (m.target - m.position).abs() > POSITION_TOLERANCE
    }

    fn current_position(&self) -> i32 {
        self.0.borrow().position
    }
}

#[derive(Clone, Default)]
pub struct SimServo(Rc<RefCell<f32>>);

impl SimServo {
    pub fn position(&self) -> f32 {
        *self.0.borrow()
    }
}

impl Servo for SimServo {
    fn set_position(
        &mut self,
        position: f32,
    ) {
        *self.0.borrow_mut() = position;
    }
}

/// Named devices; handles are shared so the simulation can step them after
/// the routine has bound its own copies.
#[derive(Default)]
pub struct SimHardware {
    motors: HashMap<String, SimMotor>,
    servos: HashMap<String, SimServo>,
}

impl SimHardware {
    /// Every device the tele-op routine expects, minus any name in `omit`.
    pub fn standard(omit: &[String]) -> Self {
        let mut hw = SimHardware::default();
        let names = MotorType::ALL.iter().map(|m| m.name());
        for name in names.filter(|n| !omit.iter().any(|o| o == n)) {
            hw.motors.insert(name.to_string(), SimMotor::default());
        }
        if !omit.iter().any(|o| o == INTAKE_ROTATION_SERVO) {
            hw.servos
                .insert(INTAKE_ROTATION_SERVO.to_string(), SimServo::default());
        }
        hw
    }

    pub fn motor_handle(
        &self,
        name: &str,
    ) -> Option<SimMotor> {
        self.motors.get(name).cloned()
    }

    pub fn servo_handle(
        &self,
        name: &str,
    ) -> Option<SimServo> {
        self.servos.get(name).cloned()
    }

    /// Step every motor model once.
    pub fn advance(&self) {
        for motor in self.motors.values() {
            motor.advance();
        }
    }
}

impl HardwareMap for SimHardware {
    type DriveMotor = SimMotor;
    type Motor = SimMotor;
    type Servo = SimServo;

    fn drive_motor(
        &mut self,
        name: &str,
    ) -> Option<SimMotor> {
        self.motors.get(name).cloned()
    }

    fn motor(
        &mut self,
        name: &str,
    ) -> Option<SimMotor> {
        self.motors.get(name).cloned()
    }

    fn servo(
        &mut self,
        name: &str,
    ) -> Option<SimServo> {
        self.servos.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slide() -> SimMotor {
        let mut m = SimMotor::default();
        m.set_mode(RunMode::StopAndResetEncoder);
        m.set_target_position(0);
        m.set_mode(RunMode::RunToPosition);
        m
    }

    #[test]
    fn run_to_position_arrives_and_goes_idle() {
        let mut m = slide();
        m.set_target_position(200);
        m.set_power(0.5);
        assert!(m.is_busy());
        for _ in 0..4 {
            m.advance();
        }
        assert_eq!(m.current_position(), 160);
        assert!(m.is_busy());
        m.advance();
        assert_eq!(m.current_position(), 200);
        assert!(!m.is_busy());
    }

    #[test]
    fn zero_power_holds_position() {
        let mut m = slide();
        m.set_target_position(500);
        m.set_power(0.0);
        m.advance();
        assert_eq!(m.current_position(), 0);
        assert!(m.is_busy());
    }

    #[test]
    fn omitted_devices_are_not_bound() {
        let mut hw = SimHardware::standard(&["left_slide".to_string()]);
        assert!(hw.motor("left_slide").is_none());
        assert!(hw.motor("right_slide").is_some());
        assert!(hw.servo(INTAKE_ROTATION_SERVO).is_some());
    }
}
