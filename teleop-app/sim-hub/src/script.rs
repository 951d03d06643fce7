//! Scripted gamepad input.
//!
//! A script is a JSON array of steps; each step holds both gamepads for
//! `repeat` ticks:
//!
//! ```json
//! [{ "driver": { "left_stick_y": -1.0 }, "repeat": 20 },
//!  { "driver": { "x": true }, "operator": { "x": true }, "repeat": 60 }]
//! ```

use serde::Deserialize;
use teleop_core::utils::GamepadState;

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptStep {
    #[serde(default)]
    pub driver: GamepadState,
    #[serde(default)]
    pub operator: GamepadState,
    #[serde(default = "one")]
    pub repeat: u32,
}

fn one() -> u32 {
    1
}

/// Expand the steps into one `[driver, operator]` frame per tick.
pub fn expand(steps: &[ScriptStep]) -> Vec<[GamepadState; 2]> {
    steps
        .iter()
        .flat_map(|s| std::iter::repeat_n([s.driver, s.operator], s.repeat as usize))
        .collect()
}

/// Drive forward, strafe diagonally, extend the slides while rotating the
/// intake, then let everything retract.
pub fn demo() -> Vec<ScriptStep> {
    let idle = GamepadState::default();
    vec![
        ScriptStep {
            driver: GamepadState {
                left_stick_y: -1.0,
                ..idle
            },
            operator: idle,
            repeat: 20,
        },
        ScriptStep {
            driver: GamepadState {
                left_stick_x: 1.0,
                left_stick_y: -1.0,
                ..idle
            },
            operator: idle,
            repeat: 20,
        },
        ScriptStep {
            driver: GamepadState { x: true, ..idle },
            operator: GamepadState { x: true, ..idle },
            repeat: 60,
        },
        ScriptStep {
            driver: GamepadState {
                right_stick_x: 0.5,
                ..idle
            },
            operator: GamepadState { y: true, ..idle },
            repeat: 40,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_defaults_to_one() {
        let steps: Vec<ScriptStep> =
            serde_json::from_str(r#"[{ "driver": { "x": true } }, { "repeat": 3 }]"#).unwrap();
        let frames = expand(&steps);
        assert_eq!(frames.len(), 4);
        assert!(frames[0][0].x);
        assert!(!frames[1][0].x);
        assert_eq!(frames[3][1], GamepadState::default());
    }

    #[test]
    fn demo_is_not_empty() {
        assert_eq!(expand(&demo()).len(), 140);
    }
}
