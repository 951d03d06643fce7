//! Tele-operation routine.
//!
//! `TeleOp` binds its devices once, then turns each pair of gamepad
//! snapshots into drive, intake and slide commands. `step` is one tick;
//! `run` repeats it for as long as the host keeps the op mode active.
//!
//! Control bindings:
//! - driver left stick x/y: strafe and forward (y passed through unchanged)
//! - driver right stick x: yaw
//! - driver `x` (held): extend slides
//! - operator `x` / `y` (held): rotate intake forward / back

use core::fmt;

use crate::utils::{
    config::{ConfigError, TeleOpConfig},
    controllers::{
        bind_servo,
        hardware::{GamepadState, HardwareMap, Telemetry},
        BindError, IntakeAngle, IntakeRotation, MecanumDrive, Motors, SlidePair, SlideReport,
        INTAKE_ROTATION_SERVO,
    },
    WheelPowers,
};

/// The runtime hosting the op mode: owns the start gate, the active flag and
/// the gamepads.
#[allow(async_fn_in_trait)]
pub trait OpModeHost {
    /// Block until the operator presses start.
    async fn wait_for_start(&mut self);

    /// Checked at the top of every tick; the loop exits once this is false.
    fn is_active(&self) -> bool;

    /// Wait for the next tick and return `[driver, operator]`.
    async fn next_gamepads(&mut self) -> [GamepadState; 2];
}

/// Why `TeleOp::init` refused to start.
#[derive(Debug, Clone, PartialEq)]
pub enum SetupError {
    Config(ConfigError),
    Bind(BindError),
}

impl fmt::Display for SetupError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            SetupError::Config(e) => write!(f, "invalid config: {}", e),
            SetupError::Bind(e) => write!(f, "hardware binding failed: {}", e),
        }
    }
}

impl core::error::Error for SetupError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            SetupError::Config(e) => Some(e),
            SetupError::Bind(e) => Some(e),
        }
    }
}

impl From<ConfigError> for SetupError {
    fn from(e: ConfigError) -> Self {
        SetupError::Config(e)
    }
}

impl From<BindError> for SetupError {
    fn from(e: BindError) -> Self {
        SetupError::Bind(e)
    }
}

/// Everything commanded on one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub wheels: WheelPowers,
    pub rotation: f32,
    pub slides: SlideReport,
}

pub struct TeleOp<H: HardwareMap> {
    drive: MecanumDrive<H::DriveMotor>,
    intake: IntakeRotation<H::Servo>,
    slides: SlidePair<H::Motor>,
}

impl<H> TeleOp<H>
where
    H: HardwareMap,
{
    /// Check the config, bind every device, apply motor directions and home
    /// the slides.
    ///
    /// A bad config or any missing device aborts before a single tick runs.
    pub fn init<T: Telemetry>(
        hw: &mut H,
        config: TeleOpConfig,
        telemetry: &mut T,
    ) -> Result<Self, SetupError> {
        config.validate().inspect_err(|e| tracing::error!("{}", e))?;

        let Motors {
            left_front,
            left_back,
            right_front,
            right_back,
            left_slide,
            right_slide,
            intake: _,
        } = Motors::bind(hw)?;
        let servo = bind_servo(hw, INTAKE_ROTATION_SERVO)?;

        let drive = MecanumDrive::new(
            left_front,
            right_front,
            left_back,
            right_back,
            config.drive_damping,
        );
        let intake = IntakeRotation::new(
            servo,
            IntakeAngle::new(config.rotation_limit, config.rotation_step),
        );
        let mut slides = SlidePair::new(left_slide, right_slide, config);
        slides.home();

        telemetry.add_data("Status", format_args!("Initialized"));
        telemetry.update();
        tracing::info!(?config, "teleop initialized");

        Ok(TeleOp {
            drive,
            intake,
            slides,
        })
    }

    pub fn rotation(&self) -> f32 {
        self.intake.angle().degrees()
    }

    /// One control tick.
    pub fn step<T: Telemetry>(
        &mut self,
        driver: &GamepadState,
        operator: &GamepadState,
        telemetry: &mut T,
    ) -> TickReport {
        telemetry.add_data("Status", format_args!("Running"));

        let wheels = self.drive.drive(
            driver.left_stick_x,
            driver.left_stick_y,
            driver.right_stick_x,
            telemetry,
        );
        let rotation = self.intake.update(operator.x, operator.y, telemetry);
        let slides = self.slides.update(driver.x, telemetry);

        telemetry.update();

        let report = TickReport {
            wheels,
            rotation,
            slides,
        };
        tracing::debug!(?report, "tick");
        report
    }

    /// Wait for start, then step once per host tick until the host goes
    /// inactive. Actuators keep their last commands on exit.
    pub async fn run<R, T>(
        &mut self,
        host: &mut R,
        telemetry: &mut T,
    ) -> u64
    where
        R: OpModeHost,
        T: Telemetry,
    {
        host.wait_for_start().await;
        tracing::info!("teleop started");

        let mut ticks = 0u64;
        while host.is_active() {
            let [driver, operator] = host.next_gamepads().await;
            self.step(&driver, &operator, telemetry);
            ticks += 1;
        }

        tracing::info!(ticks, "teleop stopped");
        ticks
    }
}
