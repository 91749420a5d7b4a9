//! System configuration parameters
//!
//! Compile-time tunables for the Sprout controller: loop timing, control
//! tolerances and UI thresholds. The grow program itself (light window,
//! irrigation duty cycle, thresholds) is acquired from the host at boot and
//! lives in [`OperatingConfig`](crate::app::store::OperatingConfig).

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Timing ---
    /// Main loop tick period (milliseconds)
    pub tick_ms: u32,
    /// Per-second scheduler period (milliseconds)
    pub second_period_ms: u32,
    /// Per-minute scheduler period (milliseconds)
    pub minute_period_ms: u32,
    /// Quarter-hour scheduler period (milliseconds)
    pub quarter_period_ms: u32,

    // --- Boot handshake ---
    /// Pause between two configuration requests (milliseconds)
    pub handshake_retry_ms: u32,
    /// How long the "connect host" prompt stays on screen (milliseconds)
    pub connect_prompt_ms: u32,

    // --- Control ---
    /// Fan dead band below the air high threshold (Celsius)
    pub temperature_tolerance_c: f32,

    // --- Local UI ---
    /// Analog level below which a button reads as pressed (10-bit scale)
    pub button_threshold: u16,

    // --- Serial ---
    /// Host link baud rate
    pub serial_baud: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Timing
            tick_ms: 100,
            second_period_ms: 1_000,
            minute_period_ms: 60_000,
            quarter_period_ms: 900_000,

            // Boot handshake
            handshake_retry_ms: 100,
            connect_prompt_ms: 2_000,

            // Control
            temperature_tolerance_c: 1.0,

            // Local UI
            button_threshold: 512,

            // Serial
            serial_baud: 115_200,
        }
    }
}

impl SystemConfig {
    /// Check the invariants the scheduler relies on.
    ///
    /// Timers fire on exact equality to zero, so every period must be a
    /// positive multiple of the tick.
    pub fn validate(&self) -> Result<()> {
        if self.tick_ms == 0 {
            return Err(Error::Config("tick_ms must be positive"));
        }
        for (period, name) in [
            (self.second_period_ms, "second_period_ms must be a multiple of tick_ms"),
            (self.minute_period_ms, "minute_period_ms must be a multiple of tick_ms"),
            (self.quarter_period_ms, "quarter_period_ms must be a multiple of tick_ms"),
        ] {
            if period == 0 || period % self.tick_ms != 0 {
                return Err(Error::Config(name));
            }
        }
        if !(self.temperature_tolerance_c.is_finite() && self.temperature_tolerance_c >= 0.0) {
            return Err(Error::Config("temperature_tolerance_c must be a non-negative number"));
        }
        Ok(())
    }
}
