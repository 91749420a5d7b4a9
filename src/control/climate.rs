//! Air and water temperature regulation.
//!
//! Two independent bang-bang loops with hysteresis:
//!
//! ```text
//!   fan     full ◀── air ≥ air_high          off ◀── air ≤ air_high − tolerance
//!   heater  on   ◀── water ≤ water_low       off ◀── water ≥ water_high
//! ```
//!
//! Between the two edges the effector keeps its last state. A faulted
//! reading leaves its effector alone.

use log::warn;

use crate::app::events::Probe;
use crate::app::ports::{ActuatorPort, SerialPort};
use crate::app::state::LiveReadings;
use crate::app::store::OperatingConfig;

use super::actuators::ActuatorBank;

/// Fan speed while cooling (percent).
pub const FAN_FULL_PERCENT: u8 = 100;

/// Fan decision: `Some(true)` full speed, `Some(false)` off, `None` hold.
///
/// When both edges match (zero tolerance at exactly `air_high`) the fan
/// ends up off.
pub fn fan_decision(air_c: f32, air_high_c: f32, tolerance_c: f32) -> Option<bool> {
    if air_c <= air_high_c - tolerance_c {
        Some(false)
    } else if air_c >= air_high_c {
        Some(true)
    } else {
        None
    }
}

/// Heater decision: `Some(true)` on, `Some(false)` off, `None` hold.
///
/// If the thresholds overlap, off wins.
pub fn heater_decision(water_c: f32, water_low_c: f32, water_high_c: f32) -> Option<bool> {
    if water_c >= water_high_c {
        Some(false)
    } else if water_c <= water_low_c {
        Some(true)
    } else {
        None
    }
}

/// Run both loops against the latest readings.
pub fn regulate<H: ActuatorPort + SerialPort>(
    bank: &mut ActuatorBank,
    readings: &LiveReadings,
    config: &OperatingConfig,
    tolerance_c: f32,
    hw: &mut H,
) {
    match (readings.air_temperature, config.air_high_c) {
        (Ok(air), Some(high)) => {
            if let Some(on) = fan_decision(air, high, tolerance_c) {
                bank.set_fan(hw, if on { FAN_FULL_PERCENT } else { 0 });
            }
        }
        (Err(e), _) => warn!("Climate: fan held, {} probe fault: {}", Probe::AirTemperature.wire_name(), e),
        (Ok(_), None) => {}
    }

    match (readings.water_temperature, config.water_low_c, config.water_high_c) {
        (Ok(water), Some(low), Some(high)) => {
            if let Some(on) = heater_decision(water, low, high) {
                bank.set_heater(hw, on);
            }
        }
        (Err(e), ..) => warn!("Climate: heater held, {} probe fault: {}", Probe::WaterTemperature.wire_name(), e),
        _ => {}
    }
}
