//! Outbound application events.
//!
//! The controller reports state changes and probe readings to the host as
//! `INFO:` lines. Each event knows its own wire rendering; [`emit`] sends it
//! through the [`SerialPort`](super::ports::SerialPort).

use log::debug;

use crate::error::SensorError;
use crate::protocol::telemetry::{InfoLine, NumberFormat, TelemetryValue, format_info};

use super::ports::SerialPort;

/// One of the three analog probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    AirTemperature,
    AirHumidity,
    WaterTemperature,
}

impl Probe {
    pub const ALL: [Self; 3] = [Self::AirTemperature, Self::AirHumidity, Self::WaterTemperature];

    /// Telemetry name on the wire.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::AirTemperature => "AIR_TEMP",
            Self::AirHumidity => "AIR_HUM",
            Self::WaterTemperature => "WATER_TEMP",
        }
    }
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppEvent {
    /// Fan speed changed (percent).
    FanChanged(u8),
    /// Heater relay switched.
    HeaterChanged(bool),
    /// Pump relay switched.
    PumpChanged(bool),
    /// Grow light switched between lit and dark.
    LightChanged(bool),
    /// A probe was sampled for the host.
    Reading {
        probe: Probe,
        value: Result<f32, SensorError>,
    },
}

impl AppEvent {
    /// Render as an `INFO:` line.
    pub fn to_line(&self) -> InfoLine {
        let fmt = NumberFormat::READING;
        match *self {
            Self::FanChanged(pct) => format_info("FAN", TelemetryValue::Int(i32::from(pct)), fmt),
            Self::HeaterChanged(on) => format_info("HEAT", TelemetryValue::Switch(on), fmt),
            Self::PumpChanged(on) => format_info("FLOW", TelemetryValue::Switch(on), fmt),
            Self::LightChanged(on) => format_info("LIGHT", TelemetryValue::Switch(on), fmt),
            Self::Reading { probe, value: Ok(v) } => {
                format_info(probe.wire_name(), TelemetryValue::Float(v), fmt)
            }
            Self::Reading { probe, value: Err(_) } => {
                format_info("SENSOR_FAULT", TelemetryValue::Text(probe.wire_name()), fmt)
            }
        }
    }
}

/// Send one event to the host.
pub fn emit(serial: &mut impl SerialPort, event: &AppEvent) {
    let line = event.to_line();
    debug!("tx: {}", line);
    serial.write_line(&line);
}
