//! Mock board for integration tests.
//!
//! Implements every port trait, records every effector, display and serial
//! call, and plays a scripted host: each request token can be mapped to a
//! reply line that is queued on the inbound byte stream as soon as the
//! request is written.

use std::collections::{HashMap, VecDeque};

use embedded_hal::delay::DelayNs;
use sprout::app::ports::{ActuatorPort, ButtonPort, ClockPort, DisplayPort, SensorPort, SerialPort};
use sprout::clock::CivilTime;
use sprout::drivers::lcd::{ClockFormat, DisplayLine, Icon, IconLevel, IconSpeed};
use sprout::error::SensorError;

/// 2024-02-29 13:45:30.
pub const TEST_EPOCH: u32 = 1_709_214_330;

// ── Call records ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorCall {
    Fan(u8),
    Heater(bool),
    Pump(bool),
    Led { r: u8, g: u8, b: u8 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCall {
    Clear(DisplayLine),
    WriteAt { text: String, line: DisplayLine, column: u8 },
    WriteAfter(String),
    Icon(Icon, IconLevel),
    ShowClock,
    SetClock(CivilTime),
    ClockFormat(ClockFormat),
    CdSpeed(IconSpeed),
    RecSpeed(IconSpeed),
}

// ── MockBoard ─────────────────────────────────────────────────

pub struct MockBoard {
    pub actuator_calls: Vec<ActuatorCall>,
    pub display_calls: Vec<DisplayCall>,
    /// Every line written to the host, in order.
    pub sent: Vec<String>,
    pub inbound: VecDeque<u8>,
    /// Request token -> reply line.
    pub replies: HashMap<String, String>,
    pub air_temperature: Result<f32, SensorError>,
    pub air_humidity: Result<f32, SensorError>,
    pub water_temperature: Result<f32, SensorError>,
    pub probe_reads: usize,
    pub epoch: Option<u32>,
    /// `(right, left)` button levels; 1023 is released.
    pub button_levels: (u16, u16),
}

#[allow(dead_code)]
impl MockBoard {
    pub fn new() -> Self {
        Self {
            actuator_calls: Vec::new(),
            display_calls: Vec::new(),
            sent: Vec::new(),
            inbound: VecDeque::new(),
            replies: HashMap::new(),
            air_temperature: Ok(24.0),
            air_humidity: Ok(65.0),
            water_temperature: Ok(20.0),
            probe_reads: 0,
            epoch: None,
            button_levels: (1023, 1023),
        }
    }

    /// A host that answers every handshake request with a valid program:
    /// basil, lit 07:00-19:00, pump 15 min on / 45 min off.
    pub fn with_host() -> Self {
        let mut board = Self::new();
        for (request, reply) in default_script() {
            board.reply(request, &reply);
        }
        board
    }

    pub fn reply(&mut self, request: &str, reply: &str) {
        self.replies.insert(request.to_string(), reply.to_string());
    }

    /// Queue one inbound line (terminator added).
    pub fn push_line(&mut self, line: &str) {
        self.inbound.extend(line.bytes());
        self.inbound.push_back(b'\n');
    }

    pub fn press(&mut self, right: bool, left: bool) {
        self.button_levels = (if right { 0 } else { 1023 }, if left { 0 } else { 1023 });
    }

    pub fn clear_records(&mut self) {
        self.actuator_calls.clear();
        self.display_calls.clear();
        self.sent.clear();
    }

    /// Lines sent to the host that are handshake requests.
    pub fn requests(&self) -> Vec<&str> {
        self.sent.iter().map(String::as_str).filter(|l| l.starts_with("INIT:")).collect()
    }

    /// Lines sent to the host that are telemetry.
    pub fn telemetry(&self) -> Vec<&str> {
        self.sent.iter().map(String::as_str).filter(|l| l.starts_with("INFO:")).collect()
    }

    pub fn last_led(&self) -> Option<(u8, u8, u8)> {
        self.actuator_calls.iter().rev().find_map(|c| match c {
            ActuatorCall::Led { r, g, b } => Some((*r, *g, *b)),
            _ => None,
        })
    }

    pub fn pump_writes(&self) -> Vec<bool> {
        self.actuator_calls
            .iter()
            .filter_map(|c| match c {
                ActuatorCall::Pump(on) => Some(*on),
                _ => None,
            })
            .collect()
    }

    /// Text written with `write_at`, in order.
    pub fn texts(&self) -> Vec<(&str, DisplayLine)> {
        self.display_calls
            .iter()
            .filter_map(|c| match c {
                DisplayCall::WriteAt { text, line, .. } => Some((text.as_str(), *line)),
                _ => None,
            })
            .collect()
    }
}

impl Default for MockBoard {
    fn default() -> Self {
        Self::new()
    }
}

pub fn default_script() -> Vec<(&'static str, String)> {
    vec![
        ("INIT:GET_PROGRAM", "SET_PROGRAM:BASIL".to_string()),
        ("INIT:GET_TIME", format!("SET_TIME:{TEST_EPOCH}")),
        ("INIT:GET_RED_LEVEL", "SET_RED_LEVEL:80".to_string()),
        ("INIT:GET_GREEN_LEVEL", "SET_GREEN_LEVEL:20".to_string()),
        ("INIT:GET_BLUE_LEVEL", "SET_BLUE_LEVEL:60".to_string()),
        ("INIT:GET_LIGHT_ON", "SET_LIGHT_ON:07:00".to_string()),
        ("INIT:GET_LIGHT_OFF", "SET_LIGHT_OFF:19:00".to_string()),
        ("INIT:GET_FLOW_ON", "SET_FLOW_ON:15".to_string()),
        ("INIT:GET_FLOW_OFF", "SET_FLOW_OFF:45".to_string()),
        ("INIT:GET_WATER_LOW", "SET_WATER_LOW:18".to_string()),
        ("INIT:GET_WATER_HIGH", "SET_WATER_HIGH:22".to_string()),
        ("INIT:GET_AIR_LOW", "SET_AIR_LOW:16".to_string()),
        ("INIT:GET_AIR_HIGH", "SET_AIR_HIGH:28".to_string()),
    ]
}

// ── Ports ─────────────────────────────────────────────────────

impl SensorPort for MockBoard {
    fn read_air_temperature(&mut self) -> Result<f32, SensorError> {
        self.probe_reads += 1;
        self.air_temperature
    }

    fn read_air_humidity(&mut self) -> Result<f32, SensorError> {
        self.air_humidity
    }

    fn read_water_temperature(&mut self) -> Result<f32, SensorError> {
        self.water_temperature
    }
}

impl ActuatorPort for MockBoard {
    fn set_fan_duty(&mut self, duty: u8) {
        self.actuator_calls.push(ActuatorCall::Fan(duty));
    }

    fn set_heater(&mut self, on: bool) {
        self.actuator_calls.push(ActuatorCall::Heater(on));
    }

    fn set_pump(&mut self, on: bool) {
        self.actuator_calls.push(ActuatorCall::Pump(on));
    }

    fn set_led(&mut self, r: u8, g: u8, b: u8) {
        self.actuator_calls.push(ActuatorCall::Led { r, g, b });
    }
}

impl DisplayPort for MockBoard {
    fn clear(&mut self, line: DisplayLine) {
        self.display_calls.push(DisplayCall::Clear(line));
    }

    fn write_at(&mut self, text: &str, line: DisplayLine, column: u8) {
        self.display_calls.push(DisplayCall::WriteAt { text: text.to_string(), line, column });
    }

    fn write_after(&mut self, text: &str) {
        self.display_calls.push(DisplayCall::WriteAfter(text.to_string()));
    }

    fn show_icon(&mut self, icon: Icon, level: IconLevel) {
        self.display_calls.push(DisplayCall::Icon(icon, level));
    }

    fn show_clock(&mut self) {
        self.display_calls.push(DisplayCall::ShowClock);
    }

    fn set_clock(&mut self, time: &CivilTime) {
        self.display_calls.push(DisplayCall::SetClock(*time));
    }

    fn set_clock_format(&mut self, format: ClockFormat) {
        self.display_calls.push(DisplayCall::ClockFormat(format));
    }

    fn set_cd_speed(&mut self, speed: IconSpeed) {
        self.display_calls.push(DisplayCall::CdSpeed(speed));
    }

    fn set_rec_speed(&mut self, speed: IconSpeed) {
        self.display_calls.push(DisplayCall::RecSpeed(speed));
    }
}

impl SerialPort for MockBoard {
    fn read_byte(&mut self) -> Option<u8> {
        self.inbound.pop_front()
    }

    fn write_line(&mut self, line: &str) {
        self.sent.push(line.to_string());
        if let Some(reply) = self.replies.get(line).cloned() {
            self.push_line(&reply);
        }
    }
}

impl ClockPort for MockBoard {
    fn set_epoch(&mut self, epoch: u32) {
        self.epoch = Some(epoch);
    }

    fn epoch(&self) -> Option<u32> {
        self.epoch
    }
}

impl ButtonPort for MockBoard {
    fn read_levels(&mut self) -> (u16, u16) {
        self.button_levels
    }
}

// ── Delay ─────────────────────────────────────────────────────

/// Records requested sleeps instead of sleeping.
#[derive(Debug, Default)]
pub struct RecordingDelay {
    pub waits_ms: Vec<u32>,
}

#[allow(dead_code)]
impl RecordingDelay {
    pub fn total_ms(&self) -> u64 {
        self.waits_ms.iter().map(|&ms| u64::from(ms)).sum()
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.waits_ms.push(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.waits_ms.push(ms);
    }
}
