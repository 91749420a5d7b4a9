//! Duty-cycled irrigation pump.
//!
//! A single signed counter, stepped once per second:
//!
//! ```text
//!   +flow_on ... 2, 1, 0 ──▶ pump off, reload −flow_off
//!   −flow_off ... −2, −1, 0 ──▶ pump on,  reload +flow_on
//! ```
//!
//! Positive values count down the on phase, non-positive values count up
//! the off phase, so every zero crossing is exactly one relay transition.

use log::info;

/// Signed pump phase counter (seconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IrrigationCycle {
    counter: i64,
}

impl IrrigationCycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Off phase with one second left: the pump starts on the next step.
    pub fn start_immediately(&mut self) {
        self.set_counter(-1);
    }

    pub fn counter(&self) -> i64 {
        self.counter
    }

    /// Positive: seconds of pumping left. Non-positive: `-counter` seconds
    /// of rest left before the pump starts.
    pub fn set_counter(&mut self, counter: i64) {
        self.counter = counter;
    }

    /// Advance one second. Returns the new pump state on a transition.
    pub fn step(&mut self, flow_on_secs: u32, flow_off_secs: u32) -> Option<bool> {
        if self.counter > 0 {
            self.counter -= 1;
            if self.counter == 0 {
                self.counter = -i64::from(flow_off_secs);
                info!("Irrigation: pump off for {} s", flow_off_secs);
                return Some(false);
            }
        } else {
            self.counter += 1;
            if self.counter == 0 {
                self.counter = i64::from(flow_on_secs);
                info!("Irrigation: pump on for {} s", flow_on_secs);
                return Some(true);
            }
        }
        None
    }
}
