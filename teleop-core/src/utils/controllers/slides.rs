//! Linear slide pair.
//!
//! Both slides follow one level-sensed target: extended while the button is
//! held, retracted otherwise. The motor drivers close the position loop; this
//! module only picks the target and power, and cuts power on any slide whose
//! driver reports it has arrived.

use crate::utils::{
    config::TeleOpConfig,
    controllers::hardware::{DcMotor, RunMode, Telemetry},
};

/// Where the slides are being sent this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideTarget {
    Retracted,
    Extended,
}

impl SlideTarget {
    /// Current button level maps straight to a target. No edge detection,
    /// no memory of earlier ticks.
    pub const fn from_level(pressed: bool) -> Self {
        if pressed {
            SlideTarget::Extended
        } else {
            SlideTarget::Retracted
        }
    }

    /// Encoder target in ticks.
    pub fn position(
        self,
        config: &TeleOpConfig,
    ) -> i32 {
        match self {
            SlideTarget::Retracted => config.slide_retracted_position,
            SlideTarget::Extended => config.slide_extended_position,
        }
    }

    /// Power ceiling while moving toward the target.
    pub fn power(
        self,
        config: &TeleOpConfig,
    ) -> f32 {
        match self {
            SlideTarget::Retracted => config.slide_retract_power,
            SlideTarget::Extended => config.slide_extend_power,
        }
    }
}

/// What the pair was told to do on one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideReport {
    pub target: SlideTarget,
    pub position: i32,
    pub left_power: f32,
    pub right_power: f32,
}

pub struct SlidePair<M> {
    left: M,
    right: M,
    config: TeleOpConfig,
}

impl<M> SlidePair<M>
where
    M: DcMotor,
{
    pub fn new(
        left: M,
        right: M,
        config: TeleOpConfig,
    ) -> Self {
        Self {
            left,
            right,
            config,
        }
    }

    /// Zero both encoders and leave them holding the retracted position.
    pub fn home(&mut self) {
        let retracted = SlideTarget::Retracted.position(&self.config);
        for slide in [&mut self.left, &mut self.right] {
            slide.set_mode(RunMode::StopAndResetEncoder);
            slide.set_target_position(retracted);
            slide.set_mode(RunMode::RunToPosition);
        }
        tracing::info!("slides homed at {}", retracted);
    }

    /// Run one tick of the slide state machine.
    ///
    /// Target, mode and power are re-sent every tick whether or not the
    /// target changed. A slide whose driver is no longer busy then has its
    /// power overridden to zero; its target is left as commanded.
    pub fn update<T: Telemetry>(
        &mut self,
        extend: bool,
        telemetry: &mut T,
    ) -> SlideReport {
        let target = SlideTarget::from_level(extend);
        let position = target.position(&self.config);
        let power = target.power(&self.config);

        self.left.set_target_position(position);
        self.right.set_target_position(position);

        self.left.set_mode(RunMode::RunToPosition);
        self.right.set_mode(RunMode::RunToPosition);

        self.left.set_power(power);
        self.right.set_power(power);

        telemetry.add_data("Status", format_args!("Moving to position: {}", position));

        let mut left_power = power;
        if !self.left.is_busy() {
            self.left.set_power(0.0);
            left_power = 0.0;
            telemetry.add_data("Status", format_args!("left reached"));
        }

        let mut right_power = power;
        if !self.right.is_busy() {
            self.right.set_power(0.0);
            right_power = 0.0;
            telemetry.add_data("Status", format_args!("right reached"));
        }

        telemetry.add_data(
            "Status",
            format_args!("Slide at {:7}", self.left.current_position()),
        );
        telemetry.add_data(
            "Status",
            format_args!("Slide at {:7}", self.right.current_position()),
        );

        SlideReport {
            target,
            position,
            left_power,
            right_power,
        }
    }
}
