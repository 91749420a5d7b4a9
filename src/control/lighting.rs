//! Scheduled grow light.
//!
//! The light window is `[on, off)` in minutes since midnight. When `on` is
//! not before `off` the window wraps midnight and the lit period is the
//! complement of `[off, on)`; equal times therefore mean always lit.

use log::info;

use crate::app::ports::{ActuatorPort, SerialPort};
use crate::app::store::OperatingConfig;

use super::actuators::{ActuatorBank, LedLevels};

/// Whether `now` falls in the lit part of the schedule.
pub fn should_be_lit(now: u16, on: u16, off: u16) -> bool {
    if on < off {
        now >= on && now < off
    } else {
        !(now >= off && now < on)
    }
}

/// Tracks which side of the schedule was last applied.
#[derive(Debug, Default)]
pub struct LightingState {
    is_on: bool,
}

impl LightingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_on(&self) -> bool {
        self.is_on
    }

    /// Apply the schedule for minute-of-day `now`.
    ///
    /// Only a change of side touches the light. Returns the new side when
    /// it changed.
    pub fn step<H: ActuatorPort + SerialPort>(
        &mut self,
        now: u16,
        config: &OperatingConfig,
        bank: &mut ActuatorBank,
        hw: &mut H,
    ) -> Option<bool> {
        let ((on, off), (r, g, b)) = (config.light_window()?, config.light_levels()?);
        let lit = should_be_lit(now, on, off);
        if lit == self.is_on {
            return None;
        }
        let levels = if lit { LedLevels::new(r, g, b) } else { LedLevels::OFF };
        bank.set_led(hw, levels);
        self.is_on = lit;
        info!("Lighting: {} at minute {}", if lit { "lit" } else { "dark" }, now);
        Some(lit)
    }
}
