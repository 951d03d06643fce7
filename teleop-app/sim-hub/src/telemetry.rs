//! Telemetry sink that hands each published frame to the logging task.

use core::fmt;

use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel};
use serde::Serialize;
use teleop_core::utils::Telemetry;

/// Messages from the control task to the telemetry task.
#[derive(Debug)]
pub enum HubEvent {
    Frame(TelemetryFrame),
    /// The op mode ended; exit the process with this code.
    Stopped(i32),
}

/// Channel carrying `HubEvent`s to the telemetry task.
pub static TELEMETRY_CHANNEL: Channel<CriticalSectionRawMutex, HubEvent, 64> = Channel::new();

#[derive(Debug, Default, Clone, Serialize)]
pub struct TelemetryFrame {
    pub seq: u64,
    pub entries: Vec<(String, String)>,
}

/// Buffers entries and publishes them as one frame on `update`.
#[derive(Default)]
pub struct ChannelTelemetry {
    pending: TelemetryFrame,
    seq: u64,
}

impl Telemetry for ChannelTelemetry {
    fn add_data(
        &mut self,
        caption: &str,
        value: fmt::Arguments<'_>,
    ) {
        self.pending
            .entries
            .push((caption.to_string(), value.to_string()));
    }

    fn update(&mut self) {
        let mut frame = core::mem::take(&mut self.pending);
        frame.seq = self.seq;
        self.seq += 1;
        if let Err(e) = TELEMETRY_CHANNEL.try_send(HubEvent::Frame(frame)) {
            tracing::warn!("telemetry channel full, dropping frame: {:?}", e);
        }
    }
}
