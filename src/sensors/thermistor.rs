//! NTC thermistor temperature probe (10 kOhm @ 25 C, B = 3950).
//!
//! Wired in a voltage divider with a fixed 10 kOhm resistor, read via the
//! ESP32-S3 ADC. The simplified Beta (Steinhart-Hart) equation converts
//! resistance to temperature.
//!
//! A divider sitting on either supply rail means the probe is open or
//! shorted, and is reported as [`SensorError::Disconnected`] rather than
//! converted.

use crate::drivers::hw_init::{self, ADC_MAX};
use crate::error::SensorError;

const R25: f32 = 10_000.0;
const BETA: f32 = 3950.0;
const T25_K: f32 = 298.15;
const R_DIVIDER: f32 = 10_000.0;
const V_REF: f32 = 3.3;
/// Readings this close to a rail (volts) are treated as a broken probe.
const RAIL_MARGIN_V: f32 = 0.01;

pub struct Thermistor {
    channel: u32,
    /// Plausible range for this probe, Celsius.
    valid_c: (f32, f32),
}

impl Thermistor {
    pub fn new(channel: u32, min_c: f32, max_c: f32) -> Self {
        Self {
            channel,
            valid_c: (min_c, max_c),
        }
    }

    pub fn read(&self) -> Result<f32, SensorError> {
        let raw = hw_init::adc1_read(self.channel).ok_or(SensorError::AdcReadFailed)?;
        let celsius = adc_to_celsius(raw)?;
        if celsius < self.valid_c.0 || celsius > self.valid_c.1 {
            return Err(SensorError::OutOfRange);
        }
        Ok(celsius)
    }
}

/// Convert a raw 12-bit divider reading to Celsius.
pub fn adc_to_celsius(raw: u16) -> Result<f32, SensorError> {
    let voltage = (f32::from(raw) / f32::from(ADC_MAX)) * V_REF;
    if voltage <= RAIL_MARGIN_V || voltage >= V_REF - RAIL_MARGIN_V {
        return Err(SensorError::Disconnected);
    }
    let r_ntc = R_DIVIDER * voltage / (V_REF - voltage);
    let inv_t = (1.0 / T25_K) + (1.0 / BETA) * (r_ntc / R25).ln();
    if inv_t <= 0.0 {
        return Err(SensorError::OutOfRange);
    }
    Ok((1.0 / inv_t) - 273.15)
}
