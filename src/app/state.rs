//! Controller state aggregate.
//!
//! One owned value holding everything the control loop mutates. Each step
//! function borrows exactly the parts it needs.

use log::warn;

use crate::control::actuators::ActuatorBank;
use crate::control::irrigation::IrrigationCycle;
use crate::control::lighting::LightingState;
use crate::error::SensorError;
use crate::ui::rotation::DisplayRotation;

use super::events::{AppEvent, Probe, emit};
use super::ports::{SensorPort, SerialPort};
use super::store::OperatingConfig;

/// Latest probe readings, replaced wholesale on every refresh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiveReadings {
    pub air_temperature: Result<f32, SensorError>,
    pub air_humidity: Result<f32, SensorError>,
    pub water_temperature: Result<f32, SensorError>,
}

impl Default for LiveReadings {
    fn default() -> Self {
        Self {
            air_temperature: Err(SensorError::NotSampled),
            air_humidity: Err(SensorError::NotSampled),
            water_temperature: Err(SensorError::NotSampled),
        }
    }
}

impl LiveReadings {
    /// Read all three probes.
    pub fn sample(sensors: &mut impl SensorPort) -> Self {
        let readings = Self {
            air_temperature: sensors.read_air_temperature(),
            air_humidity: sensors.read_air_humidity(),
            water_temperature: sensors.read_water_temperature(),
        };
        for probe in Probe::ALL {
            if let Err(e) = readings.get(probe) {
                warn!("Probe {} fault: {}", probe.wire_name(), e);
            }
        }
        readings
    }

    pub fn get(&self, probe: Probe) -> Result<f32, SensorError> {
        match probe {
            Probe::AirTemperature => self.air_temperature,
            Probe::AirHumidity => self.air_humidity,
            Probe::WaterTemperature => self.water_temperature,
        }
    }

    /// Report every reading to the host.
    pub fn transmit(&self, serial: &mut impl SerialPort) {
        for probe in Probe::ALL {
            emit(serial, &AppEvent::Reading { probe, value: self.get(probe) });
        }
    }
}

/// Everything the controller owns between ticks.
#[derive(Debug, Default)]
pub struct ControllerState {
    /// Grow program acquired from the host.
    pub config: OperatingConfig,
    /// Set once the host has sent the wall clock.
    pub clock_set: bool,
    pub readings: LiveReadings,
    pub actuators: ActuatorBank,
    pub irrigation: IrrigationCycle,
    pub lighting: LightingState,
    pub rotation: DisplayRotation,
}

impl ControllerState {
    pub fn new() -> Self {
        Self::default()
    }
}
