//! Front panel page rotation.
//!
//! Started by the left button, stepped once per second. Odd steps draw a
//! page, even steps leave the previous page up for another second.
//!
//! | step | top line      | bottom line        |
//! |------|---------------|--------------------|
//! | 1    | PROGRAM       | program name       |
//! | 3    | AIR TEMP      | ` 23.5°C`          |
//! | 5    | AIR HUMIDITY  | ` 61.0%`           |
//! | 7    | WATER TEMP    | ` 19.8°C`          |
//! | 9    | internal clock, rotation ends      |

use heapless::String;

use crate::app::events::Probe;
use crate::app::ports::DisplayPort;
use crate::app::state::LiveReadings;
use crate::app::store::OperatingConfig;
use crate::drivers::lcd::DisplayLine;
use crate::protocol::telemetry::{NumberFormat, format_number};

/// Step at which the clock is shown and the rotation stops.
const LAST_STEP: u8 = 9;

/// Bottom-line text for a faulted probe.
pub const FAULT_TEXT: &str = "FAULT";

/// What a rotation step drew.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Program,
    Reading(Probe),
    Clock,
}

/// Page cursor. `None` is idle.
#[derive(Debug, Default)]
pub struct DisplayRotation {
    cursor: Option<u8>,
}

impl DisplayRotation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn cursor(&self) -> Option<u8> {
        self.cursor
    }

    /// Start at page 0; the first page is drawn on the next step.
    pub fn activate(&mut self) {
        self.cursor = Some(0);
    }

    /// Advance one second and draw the page that falls due.
    pub fn step<D: DisplayPort>(
        &mut self,
        config: &OperatingConfig,
        readings: &LiveReadings,
        display: &mut D,
    ) -> Option<Page> {
        let step = self.cursor? + 1;
        self.cursor = Some(step);

        let page = match step {
            1 => Page::Program,
            3 => Page::Reading(Probe::AirTemperature),
            5 => Page::Reading(Probe::AirHumidity),
            7 => Page::Reading(Probe::WaterTemperature),
            LAST_STEP => Page::Clock,
            _ => return None,
        };

        match page {
            Page::Program => {
                display.write_centered("PROGRAM", DisplayLine::Top);
                display.write_centered(config.program_name(), DisplayLine::Bottom);
            }
            Page::Reading(probe) => {
                display.write_centered(title(probe), DisplayLine::Top);
                display.write_centered(&value_text(probe, readings.get(probe)), DisplayLine::Bottom);
            }
            Page::Clock => {
                display.show_clock();
                self.cursor = None;
            }
        }
        Some(page)
    }
}

fn title(probe: Probe) -> &'static str {
    match probe {
        Probe::AirTemperature => "AIR TEMP",
        Probe::AirHumidity => "AIR HUMIDITY",
        Probe::WaterTemperature => "WATER TEMP",
    }
}

fn unit(probe: Probe) -> &'static str {
    match probe {
        Probe::AirTemperature | Probe::WaterTemperature => "°C",
        Probe::AirHumidity => "%",
    }
}

/// Panel rendering of one reading: width 5, one decimal, unit suffix.
pub fn value_text(probe: Probe, value: Result<f32, crate::error::SensorError>) -> String<16> {
    match value {
        Ok(v) => {
            let mut text: String<16> = format_number(v, NumberFormat::PANEL);
            let _ = text.push_str(unit(probe));
            text
        }
        Err(_) => {
            let mut text = String::new();
            let _ = text.push_str(FAULT_TEXT);
            text
        }
    }
}
