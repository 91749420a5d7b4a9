//! Cached actuator bank.
//!
//! Every effector write goes through here. The bank remembers the last
//! commanded value of each effector: repeating it is a no-op (no hardware
//! write, no telemetry), a change is written and reported to the host.
//! Nothing is cached at power-on, so the first command to each effector
//! always reaches the hardware.
//!
//! The inspect override (green channel forced to full while the operator
//! holds the right button) is applied on top of the cached levels and never
//! replaces them.

use log::info;

use crate::app::events::{AppEvent, emit};
use crate::app::ports::{ActuatorPort, SerialPort};

/// Full-scale PWM duty.
pub const PWM_MAX: u8 = 255;

/// Scale a 0..=100 percent to an 8-bit duty. Values above 100 saturate.
pub fn percent_to_pwm(percent: u8) -> u8 {
    (u16::from(percent.min(100)) * u16::from(PWM_MAX) / 100) as u8
}

/// Grow light levels, percent per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedLevels {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl LedLevels {
    pub const OFF: Self = Self { red: 0, green: 0, blue: 0 };

    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Green does not drive photosynthesis: the light counts as on only
    /// when red or blue is lit.
    pub fn is_lit(&self) -> bool {
        self.red != 0 || self.blue != 0
    }
}

#[derive(Debug, Default)]
pub struct ActuatorBank {
    fan_percent: Option<u8>,
    heater_on: Option<bool>,
    pump_on: Option<bool>,
    led: Option<LedLevels>,
    /// Last `INFO:LIGHT` value sent; level changes that keep the same
    /// lit/dark reading stay silent.
    light_reported: Option<bool>,
    inspecting: bool,
}

impl ActuatorBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drive every effector to its off state. Used once at power-on; each
    /// write is reported because nothing is cached yet.
    pub fn safe_state<H: ActuatorPort + SerialPort>(&mut self, hw: &mut H) {
        self.set_led(hw, LedLevels::OFF);
        self.set_fan(hw, 0);
        self.set_heater(hw, false);
        self.set_pump(hw, false);
    }

    pub fn set_fan<H: ActuatorPort + SerialPort>(&mut self, hw: &mut H, percent: u8) {
        let percent = percent.min(100);
        if self.fan_percent == Some(percent) {
            return;
        }
        hw.set_fan_duty(percent_to_pwm(percent));
        self.fan_percent = Some(percent);
        emit(hw, &AppEvent::FanChanged(percent));
    }

    pub fn set_heater<H: ActuatorPort + SerialPort>(&mut self, hw: &mut H, on: bool) {
        if self.heater_on == Some(on) {
            return;
        }
        hw.set_heater(on);
        self.heater_on = Some(on);
        emit(hw, &AppEvent::HeaterChanged(on));
    }

    pub fn set_pump<H: ActuatorPort + SerialPort>(&mut self, hw: &mut H, on: bool) {
        if self.pump_on == Some(on) {
            return;
        }
        hw.set_pump(on);
        self.pump_on = Some(on);
        emit(hw, &AppEvent::PumpChanged(on));
    }

    pub fn set_led<H: ActuatorPort + SerialPort>(&mut self, hw: &mut H, levels: LedLevels) {
        if self.led == Some(levels) {
            return;
        }
        self.led = Some(levels);
        self.write_led(hw);
        let lit = levels.is_lit();
        if self.light_reported != Some(lit) {
            self.light_reported = Some(lit);
            emit(hw, &AppEvent::LightChanged(lit));
        }
    }

    /// Engage or release the inspect override. No telemetry: the schedule
    /// state of the light is unchanged.
    pub fn set_inspect<H: ActuatorPort>(&mut self, hw: &mut H, on: bool) {
        if self.inspecting == on {
            return;
        }
        self.inspecting = on;
        self.write_led(hw);
        info!("Inspect light {}", if on { "on" } else { "off" });
    }

    fn write_led<H: ActuatorPort>(&self, hw: &mut H) {
        let levels = self.led.unwrap_or(LedLevels::OFF);
        let green = if self.inspecting { PWM_MAX } else { percent_to_pwm(levels.green) };
        hw.set_led(percent_to_pwm(levels.red), green, percent_to_pwm(levels.blue));
    }

    pub fn fan_percent(&self) -> Option<u8> {
        self.fan_percent
    }

    pub fn heater_on(&self) -> Option<bool> {
        self.heater_on
    }

    pub fn pump_on(&self) -> Option<bool> {
        self.pump_on
    }

    pub fn led_levels(&self) -> Option<LedLevels> {
        self.led
    }

    pub fn is_inspecting(&self) -> bool {
        self.inspecting
    }
}
