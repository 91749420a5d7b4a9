//! Operating configuration acquired from the host.
//!
//! Every field starts unset and only ever moves to set: the boot handshake
//! keeps asking for a field until it is populated, and later commands
//! overwrite values but never clear them.

use heapless::String;
use serde::Serialize;

/// Maximum program name length (one display line minus a column).
pub const PROGRAM_NAME_MAX: usize = 15;

pub type ProgramName = String<PROGRAM_NAME_MAX>;

/// Host-supplied grow program.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OperatingConfig {
    pub program_name: Option<ProgramName>,

    /// Grow light channel levels, percent (0..=100).
    pub red_level: Option<u8>,
    pub green_level: Option<u8>,
    pub blue_level: Option<u8>,

    /// Light window, minutes since midnight (0..=1439).
    pub light_on_minute: Option<u16>,
    pub light_off_minute: Option<u16>,

    /// Irrigation duty cycle, seconds (> 0).
    pub flow_on_secs: Option<u32>,
    pub flow_off_secs: Option<u32>,

    /// Thresholds, Celsius.
    pub water_low_c: Option<f32>,
    pub water_high_c: Option<f32>,
    pub air_low_c: Option<f32>,
    pub air_high_c: Option<f32>,
}

impl OperatingConfig {
    /// Store a program name, truncated to [`PROGRAM_NAME_MAX`] characters.
    pub fn set_program_name(&mut self, name: &str) {
        let mut stored = ProgramName::new();
        for c in name.chars() {
            if stored.push(c).is_err() {
                break;
            }
        }
        self.program_name = Some(stored);
    }

    /// Program name for display, empty while unset.
    pub fn program_name(&self) -> &str {
        self.program_name.as_deref().unwrap_or("")
    }

    /// Lighting levels, percent. `None` until all three channels are set.
    pub fn light_levels(&self) -> Option<(u8, u8, u8)> {
        Some((self.red_level?, self.green_level?, self.blue_level?))
    }

    /// Light window `(on, off)` in minutes since midnight.
    pub fn light_window(&self) -> Option<(u16, u16)> {
        Some((self.light_on_minute?, self.light_off_minute?))
    }

    /// Irrigation `(on, off)` durations in seconds.
    pub fn flow_durations(&self) -> Option<(u32, u32)> {
        Some((self.flow_on_secs?, self.flow_off_secs?))
    }

    /// True once every field required to run the control loop is set.
    pub fn is_complete(&self) -> bool {
        self.program_name.is_some()
            && self.light_levels().is_some()
            && self.light_window().is_some()
            && self.flow_durations().is_some()
            && self.water_low_c.is_some()
            && self.water_high_c.is_some()
            && self.air_low_c.is_some()
            && self.air_high_c.is_some()
    }
}
