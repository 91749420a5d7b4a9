//! Probe subsystem: individual analog probes and the aggregating
//! [`ProbeHub`].
//!
//! Each probe yields its own `Result`, so one broken probe never masks the
//! others. On host builds the raw ADC levels come from
//! [`hw_init::sim_set_adc`](crate::drivers::hw_init) injection points.

pub mod humidity;
pub mod thermistor;

use crate::error::SensorError;
use crate::pins;
use humidity::HumidityProbe;
use thermistor::Thermistor;

/// Plausible air temperature inside the chamber.
const AIR_RANGE_C: (f32, f32) = (-10.0, 60.0);
/// Plausible reservoir temperature.
const WATER_RANGE_C: (f32, f32) = (0.0, 50.0);

/// Owns the three probes of the germination unit.
pub struct ProbeHub {
    pub air_temperature: Thermistor,
    pub air_humidity: HumidityProbe,
    pub water_temperature: Thermistor,
}

impl ProbeHub {
    /// Probes on their board channels.
    pub fn new() -> Self {
        Self {
            air_temperature: Thermistor::new(pins::ADC1_CH_AIR_TEMP, AIR_RANGE_C.0, AIR_RANGE_C.1),
            air_humidity: HumidityProbe::new(pins::ADC1_CH_AIR_HUMIDITY),
            water_temperature: Thermistor::new(
                pins::ADC1_CH_WATER_TEMP,
                WATER_RANGE_C.0,
                WATER_RANGE_C.1,
            ),
        }
    }

    pub fn read_air_temperature(&self) -> Result<f32, SensorError> {
        self.air_temperature.read()
    }

    pub fn read_air_humidity(&self) -> Result<f32, SensorError> {
        self.air_humidity.read()
    }

    pub fn read_water_temperature(&self) -> Result<f32, SensorError> {
        self.water_temperature.read()
    }
}

impl Default for ProbeHub {
    fn default() -> Self {
        Self::new()
    }
}
