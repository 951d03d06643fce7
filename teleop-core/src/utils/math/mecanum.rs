//! Wheel power mixing for 4-wheeled mecanum robots.
//!
//! The `MecanumMixer` combines strafe, forward and yaw axes into one power per
//! wheel, scales the set down uniformly when any wheel would exceed unit
//! magnitude, and applies a fixed damping factor.
//!
//! # Example
//! ```rust
//! use teleop_core::utils::math::mecanum::MecanumMixer;
//! let mixer = MecanumMixer::default();
//! let powers = mixer.compute_wheel_powers(1.0, 1.0, 0.0);
//! assert_eq!(powers.as_array(), [0.5, 0.0, 0.0, 0.5]);
//! ```

use core::fmt;

use serde::{Deserialize, Serialize};

/// Damping applied to every wheel after normalization.
pub const DRIVE_DAMPING: f32 = 0.5;

/// One power value per mecanum wheel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WheelPowers {
    pub front_left: f32,
    pub front_right: f32,
    pub back_left: f32,
    pub back_right: f32,
}

impl WheelPowers {
    /// Powers in `[front_left, front_right, back_left, back_right]` order.
    pub fn as_array(&self) -> [f32; 4] {
        [
            self.front_left,
            self.front_right,
            self.back_left,
            self.back_right,
        ]
    }

    /// Largest absolute power across the four wheels.
    pub fn max_magnitude(&self) -> f32 {
        self.as_array()
            .iter()
            .fold(0.0_f32, |acc, &p| acc.max(libm::fabsf(p)))
    }

    /// Multiply every wheel by `factor`.
    pub fn scaled(
        self,
        factor: f32,
    ) -> Self {
        Self {
            front_left: self.front_left * factor,
            front_right: self.front_right * factor,
            back_left: self.back_left * factor,
            back_right: self.back_right * factor,
        }
    }

    /// Divide every wheel by `divisor`; the largest wheel divided by its own
    /// magnitude lands on exactly 1.0.
    pub fn divided(
        self,
        divisor: f32,
    ) -> Self {
        Self {
            front_left: self.front_left / divisor,
            front_right: self.front_right / divisor,
            back_left: self.back_left / divisor,
            back_right: self.back_right / divisor,
        }
    }

    /// Divide all wheels by the largest magnitude when it exceeds 1.0.
    ///
    /// Values already in range are returned untouched, so this only ever scales
    /// down and keeps the ratios between wheels.
    pub fn normalized(self) -> Self {
        let max = self.max_magnitude();
        if max > 1.0 {
            self.divided(max)
        } else {
            self
        }
    }
}

impl fmt::Display for WheelPowers {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "{{left_front_drive={}, right_front_drive={}, left_back_drive={}, right_back_drive={}}}",
            self.front_left, self.front_right, self.back_left, self.back_right
        )
    }
}

/// Mixes joystick axes into damped mecanum wheel powers.
#[derive(Debug, Clone, Copy)]
pub struct MecanumMixer {
    damping: f32,
}

impl Default for MecanumMixer {
    fn default() -> Self {
        Self::new(DRIVE_DAMPING)
    }
}

impl MecanumMixer {
    /// Instantiate with the multiplier applied after normalization.
    pub const fn new(damping: f32) -> Self {
        Self { damping }
    }

    pub const fn damping(&self) -> f32 {
        self.damping
    }

    /// Raw mecanum mix of `x` (strafe), `y` (forward) and `yaw`.
    ///
    /// Inputs are taken as-is; nothing is clamped.
    pub fn mix(
        x: f32,
        y: f32,
        yaw: f32,
    ) -> WheelPowers {
        WheelPowers {
            front_left: y + x + yaw,
            front_right: y - x - yaw,
            back_left: y - x + yaw,
            back_right: y + x - yaw,
        }
    }

    /// Mix, normalize and damp. Every output magnitude is at most `damping`.
    pub fn compute_wheel_powers(
        &self,
        x: f32,
        y: f32,
        yaw: f32,
    ) -> WheelPowers {
        Self::mix(x, y, yaw).normalized().scaled(self.damping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    fn assert_powers(
        actual: WheelPowers,
        expected: [f32; 4],
    ) {
        for (i, (a, e)) in actual.as_array().iter().zip(expected.iter()).enumerate() {
            assert!(libm::fabsf(a - e) < EPS, "wheel {} was {} expected {}", i, a, e);
        }
    }

    #[test]
    fn test_forward_is_not_scaled() {
        let mixer = MecanumMixer::default();
        assert_powers(MecanumMixer::mix(0.0, 1.0, 0.0), [1.0, 1.0, 1.0, 1.0]);
        assert_powers(mixer.compute_wheel_powers(0.0, 1.0, 0.0), [0.5, 0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_diagonal_is_normalized() {
        let mixer = MecanumMixer::default();
        assert_powers(MecanumMixer::mix(1.0, 1.0, 0.0), [2.0, 0.0, 0.0, 2.0]);
        assert_powers(
            MecanumMixer::mix(1.0, 1.0, 0.0).normalized(),
            [1.0, 0.0, 0.0, 1.0],
        );
        assert_powers(mixer.compute_wheel_powers(1.0, 1.0, 0.0), [0.5, 0.0, 0.0, 0.5]);
    }

    #[test]
    fn test_normalize_identity_within_range() {
        let raw = MecanumMixer::mix(0.2, -0.3, 0.1);
        assert!(raw.max_magnitude() <= 1.0);
        assert_eq!(raw.normalized(), raw);
    }

    #[test]
    fn test_normalize_keeps_ratios() {
        let raw = MecanumMixer::mix(0.5, 1.0, 0.75);
        let norm = raw.normalized();
        assert!(libm::fabsf(norm.max_magnitude() - 1.0) < EPS);
        let ratio = raw.front_left / raw.back_left;
        assert!(libm::fabsf(norm.front_left / norm.back_left - ratio) < 1e-4);
    }

    #[test]
    fn test_normalized_bound_over_grid() {
        let mixer = MecanumMixer::default();
        let steps = [-1.0, -0.75, -0.5, -0.1, 0.0, 0.1, 0.5, 0.75, 1.0];
        for &x in &steps {
            for &y in &steps {
                for &yaw in &steps {
                    let raw = MecanumMixer::mix(x, y, yaw);
                    let norm = raw.normalized();
                    if raw.max_magnitude() > 1.0 {
                        assert_eq!(norm.max_magnitude(), 1.0, "({}, {}, {})", x, y, yaw);
                    } else {
                        assert_eq!(norm, raw);
                    }
                    let damped = mixer.compute_wheel_powers(x, y, yaw);
                    assert!(damped.max_magnitude() <= DRIVE_DAMPING + EPS);
                    assert_powers(damped, norm.scaled(DRIVE_DAMPING).as_array());
                }
            }
        }
    }

    #[test]
    fn test_largest_wheel_lands_on_one() {
        // (-1.0, -0.98, 0.0) comes out one ulp short if the reciprocal is used.
        let norm = MecanumMixer::mix(-1.0, -0.98, 0.0).normalized();
        assert_eq!(norm.back_right, -1.0);
        assert_eq!(norm.max_magnitude(), 1.0);

        for yaw in [0.0, 0.37, -0.81, 1.0] {
            for i in 0..=200 {
                for j in 0..=200 {
                    let x = i as f32 / 100.0 - 1.0;
                    let y = j as f32 / 100.0 - 1.0;
                    let raw = MecanumMixer::mix(x, y, yaw);
                    if raw.max_magnitude() > 1.0 {
                        assert_eq!(
                            raw.normalized().max_magnitude(),
                            1.0,
                            "({}, {}, {})",
                            x,
                            y,
                            yaw
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_mixer_is_pure() {
        let mixer = MecanumMixer::default();
        let a = mixer.compute_wheel_powers(-0.4, 0.9, 0.6);
        let b = mixer.compute_wheel_powers(-0.4, 0.9, 0.6);
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_input() {
        let mixer = MecanumMixer::default();
        assert_eq!(mixer.compute_wheel_powers(0.0, 0.0, 0.0), WheelPowers::default());
    }
}
