use clap::Parser;
use core::fmt;
use embassy_executor::{Executor, Spawner};
use embassy_time::{Duration, Ticker, Timer};
use static_cell::StaticCell;
use teleop_core::utils::{
    controllers::INTAKE_ROTATION_SERVO, GamepadState, OpModeHost, SetupError, TeleOp, TeleOpConfig,
};
use tracing::{error, info};

mod script;
mod sim;
mod telemetry;

use sim::SimHardware;
use telemetry::{ChannelTelemetry, HubEvent, TELEMETRY_CHANNEL};

#[derive(Parser, Debug)]
#[clap(version = "1.0")]
struct Opts
{
    /// JSON gamepad script; the built-in demo runs when omitted
    #[clap(long)]
    script: Option<String>,
    /// JSON file overriding the default setpoints
    #[clap(long)]
    config: Option<String>,
    /// control loop period in milliseconds
    #[clap(long, default_value_t = 20, value_parser = clap::value_parser!(u64).range(1..))]
    period_ms: u64,
    /// print each telemetry frame as a JSON line instead of logging it
    #[clap(long)]
    json: bool,
    /// leave the named device out of the hardware map (repeatable)
    #[clap(long)]
    omit: Vec<String>,
}

#[derive(Debug)]
enum HubError {
    Io(String, std::io::Error),
    Json(String, serde_json::Error),
    Setup(SetupError),
}

impl fmt::Display for HubError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            HubError::Io(path, e) => write!(f, "reading {}: {}", path, e),
            HubError::Json(path, e) => write!(f, "parsing {}: {}", path, e),
            HubError::Setup(e) => write!(f, "op mode setup failed: {}", e),
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, HubError> {
    let text = std::fs::read_to_string(path).map_err(|e| HubError::Io(path.to_string(), e))?;
    serde_json::from_str(&text).map_err(|e| HubError::Json(path.to_string(), e))
}

/// Host that replays scripted gamepads on a fixed period and steps the
/// simulated hardware between ticks.
struct ScriptedHost {
    hw: SimHardware,
    frames: Vec<[GamepadState; 2]>,
    cursor: usize,
    ticker: Ticker,
    period: Duration,
}

impl OpModeHost for ScriptedHost {
    async fn wait_for_start(&mut self) {
        info!("Waiting for start...");
        Timer::after(self.period).await;
        self.ticker.reset();
    }

    fn is_active(&self) -> bool {
        self.cursor < self.frames.len()
    }

    async fn next_gamepads(&mut self) -> [GamepadState; 2] {
        self.ticker.next().await;
        self.hw.advance();
        let frame = self.frames[self.cursor];
        self.cursor += 1;
        frame
    }
}

fn setup(
    hw: &mut SimHardware,
    config: TeleOpConfig,
    telemetry: &mut ChannelTelemetry,
) -> Result<TeleOp<SimHardware>, HubError> {
    TeleOp::init(hw, config, telemetry).map_err(HubError::Setup)
}

async fn run_op_mode(opts: &Opts) -> Result<u64, HubError> {
    let config: TeleOpConfig = match &opts.config {
        Some(path) => read_json(path)?,
        None => TeleOpConfig::default(),
    };
    let steps = match &opts.script {
        Some(path) => read_json(path)?,
        None => script::demo(),
    };

    let mut hw = SimHardware::standard(&opts.omit);
    let mut telemetry = ChannelTelemetry::default();
    let mut teleop = setup(&mut hw, config, &mut telemetry)?;

    let period = Duration::from_millis(opts.period_ms);
    let mut host = ScriptedHost {
        hw,
        frames: script::expand(&steps),
        cursor: 0,
        ticker: Ticker::every(period),
        period,
    };
    let ticks = teleop.run(&mut host, &mut telemetry).await;

    let slide = |name: &str| host.hw.motor_handle(name).map(|m| m.power());
    info!(
        rotation = teleop.rotation(),
        servo = host.hw.servo_handle(INTAKE_ROTATION_SERVO).map(|s| s.position()),
        left_slide_power = slide("left_slide"),
        right_slide_power = slide("right_slide"),
        "final state"
    );
    Ok(ticks)
}

#[embassy_executor::task]
async fn control_task(opts: Opts) {
    let code = match run_op_mode(&opts).await {
        Ok(ticks) => {
            info!("op mode finished after {} ticks", ticks);
            0
        }
        Err(e) => {
            error!("{}", e);
            1
        }
    };
    TELEMETRY_CHANNEL.send(HubEvent::Stopped(code)).await;
}

#[embassy_executor::task]
async fn telemetry_task(json: bool) {
    loop {
        match TELEMETRY_CHANNEL.receive().await {
            HubEvent::Frame(frame) if json => match serde_json::to_string(&frame) {
                Ok(line) => println!("{}", line),
                Err(e) => error!("failed to encode telemetry frame: {}", e),
            },
            HubEvent::Frame(frame) => {
                for (caption, value) in &frame.entries {
                    info!(seq = frame.seq, "{}: {}", caption, value);
                }
            }
            HubEvent::Stopped(code) => {
                info!("shutting down with code {}", code);
                std::process::exit(code);
            }
        }
    }
}

#[embassy_executor::task]
async fn main_task(spawner: Spawner, opts: Opts) {
    spawner.spawn(telemetry_task(opts.json)).unwrap();
    spawner.spawn(control_task(opts)).unwrap();
}

static EXECUTOR: StaticCell<Executor> = StaticCell::new();

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let opts: Opts = Opts::parse();
    info!(?opts, "starting sim hub");
    let executor = EXECUTOR.init(Executor::new());
    executor.run(|spawner| {
        spawner.spawn(main_task(spawner, opts)).unwrap();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    use teleop_core::utils::{BindError, MotorType};

    #[test]
    fn invalid_config_stops_the_hub() {
        let config = TeleOpConfig {
            rotation_step: -1.0,
            ..Default::default()
        };
        let mut hw = SimHardware::standard(&[]);
        let err = setup(&mut hw, config, &mut ChannelTelemetry::default())
            .err()
            .unwrap();
        assert_eq!(
            err.to_string(),
            "op mode setup failed: invalid config: rotation_step -1 must not be negative"
        );
    }

    #[test]
    fn omitted_device_stops_the_hub() {
        let mut hw = SimHardware::standard(&["right_front_drive".to_string()]);
        let err = setup(&mut hw, TeleOpConfig::default(), &mut ChannelTelemetry::default())
            .err()
            .unwrap();
        assert!(matches!(
            err,
            HubError::Setup(SetupError::Bind(BindError::MissingMotor(MotorType::RightFront)))
        ));
    }
}
