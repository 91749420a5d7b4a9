//! Hardware adapter: bridges the real peripherals to the domain ports.
//!
//! Owns the probe hub and every driver, and exposes them through all six
//! port traits so the [`Controller`](crate::app::service::Controller) can
//! take a single [`Board`](crate::app::ports::Board). This is the only
//! module that touches hardware; on non-espidf targets the drivers fall
//! back to their simulation stubs.

use crate::app::ports::{ActuatorPort, ButtonPort, ClockPort, DisplayPort, SensorPort, SerialPort};
use crate::clock::CivilTime;
use crate::drivers::buttons::ButtonPanel;
use crate::drivers::fan::FanDriver;
use crate::drivers::grow_light::GrowLight;
use crate::drivers::host_link::HostLink;
use crate::drivers::lcd::{self, ClockFormat, DisplayLine, Icon, IconLevel, IconSpeed, Lcd};
use crate::drivers::relay::RelayDriver;
use crate::error::SensorError;
use crate::pins;
use crate::sensors::ProbeHub;

use super::time::WallClock;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    probes: ProbeHub,
    fan: FanDriver,
    light: GrowLight,
    heater: RelayDriver,
    pump: RelayDriver,
    lcd: Lcd,
    host: HostLink,
    buttons: ButtonPanel,
    clock: WallClock,
}

impl HardwareAdapter {
    /// Wire every driver to the pins in [`pins`].
    pub fn new() -> Self {
        Self {
            probes: ProbeHub::new(),
            fan: FanDriver::new(),
            light: GrowLight::new(),
            heater: RelayDriver::new(pins::HEATER_RELAY_GPIO),
            pump: RelayDriver::new(pins::PUMP_RELAY_GPIO),
            lcd: Lcd::new(pins::LCD_UART_PORT),
            host: HostLink::new(pins::HOST_UART_PORT),
            buttons: ButtonPanel::new(pins::ADC1_CH_BUTTON_RIGHT, pins::ADC1_CH_BUTTON_LEFT),
            clock: WallClock::new(),
        }
    }

    pub fn heater_closed(&self) -> bool {
        self.heater.is_closed()
    }

    pub fn pump_closed(&self) -> bool {
        self.pump.is_closed()
    }

    pub fn fan_duty(&self) -> u8 {
        self.fan.duty()
    }

    pub fn light_duties(&self) -> (u8, u8, u8) {
        self.light.current_duties()
    }
}

impl Default for HardwareAdapter {
    fn default() -> Self {
        Self::new()
    }
}

// ── SensorPort ────────────────────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn read_air_temperature(&mut self) -> Result<f32, SensorError> {
        self.probes.read_air_temperature()
    }

    fn read_air_humidity(&mut self) -> Result<f32, SensorError> {
        self.probes.read_air_humidity()
    }

    fn read_water_temperature(&mut self) -> Result<f32, SensorError> {
        self.probes.read_water_temperature()
    }
}

// ── ActuatorPort ──────────────────────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn set_fan_duty(&mut self, duty: u8) {
        self.fan.set_duty(duty);
    }

    fn set_heater(&mut self, on: bool) {
        self.heater.set(on);
    }

    fn set_pump(&mut self, on: bool) {
        self.pump.set(on);
    }

    fn set_led(&mut self, r: u8, g: u8, b: u8) {
        self.light.set_duties(r, g, b);
    }
}

// ── DisplayPort ───────────────────────────────────────────────

impl DisplayPort for HardwareAdapter {
    fn clear(&mut self, line: DisplayLine) {
        self.lcd.send(&lcd::clear(line));
    }

    fn write_at(&mut self, text: &str, line: DisplayLine, column: u8) {
        self.lcd.send(&lcd::text_at(text, line, column));
    }

    fn write_after(&mut self, text: &str) {
        self.lcd.send(&lcd::text(text));
    }

    fn show_icon(&mut self, icon: Icon, level: IconLevel) {
        self.lcd.send(&lcd::icon(icon, level));
    }

    fn show_clock(&mut self) {
        self.lcd.send(&lcd::show_clock());
    }

    fn set_clock(&mut self, time: &CivilTime) {
        self.lcd.send(&lcd::set_clock(time));
    }

    fn set_clock_format(&mut self, format: ClockFormat) {
        self.lcd.send(&lcd::clock_format(format));
    }

    fn set_cd_speed(&mut self, speed: IconSpeed) {
        self.lcd.send(&lcd::cd_speed(speed));
    }

    fn set_rec_speed(&mut self, speed: IconSpeed) {
        self.lcd.send(&lcd::rec_speed(speed));
    }
}

// ── SerialPort ────────────────────────────────────────────────

impl SerialPort for HardwareAdapter {
    fn read_byte(&mut self) -> Option<u8> {
        self.host.read_byte()
    }

    fn write_line(&mut self, line: &str) {
        self.host.write_line(line);
    }
}

// ── ClockPort ─────────────────────────────────────────────────

impl ClockPort for HardwareAdapter {
    fn set_epoch(&mut self, epoch: u32) {
        self.clock.set_epoch(epoch);
    }

    fn epoch(&self) -> Option<u32> {
        self.clock.epoch()
    }
}

// ── ButtonPort ────────────────────────────────────────────────

impl ButtonPort for HardwareAdapter {
    fn read_levels(&mut self) -> (u16, u16) {
        self.buttons.read_levels()
    }
}
