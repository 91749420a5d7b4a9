//! Capacitive relative humidity probe with a linear voltage output.
//!
//! 0.5 V at 0 %RH, 25 mV per %RH, read through the ESP32-S3 ADC.

use crate::drivers::hw_init::{self, ADC_MAX};
use crate::error::SensorError;

const V_REF: f32 = 3.3;
const V_ZERO: f32 = 0.5;
const V_PER_PERCENT: f32 = 0.025;
/// Raw counts within this distance of a rail mean a broken wire.
const RAIL_COUNTS: u16 = 10;
/// Sensor tolerance beyond 0..100 before a reading is rejected.
const SLACK_PERCENT: f32 = 5.0;

pub struct HumidityProbe {
    channel: u32,
}

impl HumidityProbe {
    pub fn new(channel: u32) -> Self {
        Self { channel }
    }

    pub fn read(&self) -> Result<f32, SensorError> {
        let raw = hw_init::adc1_read(self.channel).ok_or(SensorError::AdcReadFailed)?;
        adc_to_percent(raw)
    }
}

/// Convert a raw 12-bit reading to %RH, clamped to 0..=100.
pub fn adc_to_percent(raw: u16) -> Result<f32, SensorError> {
    if raw <= RAIL_COUNTS || raw >= ADC_MAX - RAIL_COUNTS {
        return Err(SensorError::Disconnected);
    }
    let voltage = (f32::from(raw) / f32::from(ADC_MAX)) * V_REF;
    let percent = (voltage - V_ZERO) / V_PER_PERCENT;
    if !(-SLACK_PERCENT..=100.0 + SLACK_PERCENT).contains(&percent) {
        return Err(SensorError::OutOfRange);
    }
    Ok(percent.clamp(0.0, 100.0))
}
