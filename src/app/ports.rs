//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Controller (domain)
//! ```
//!
//! Driven adapters (probes, relays, PWM, display, serial link, clock)
//! implement these traits. The [`Controller`](super::service::Controller)
//! consumes them via generics, so the domain core never touches hardware
//! directly. Every call is expected to return promptly: the only place the
//! loop is allowed to block is the tick sleep.

use crate::clock::CivilTime;
use crate::drivers::lcd::{COLUMNS, ClockFormat, DisplayLine, Icon, IconLevel, IconSpeed};
use crate::error::SensorError;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: one reading per probe, each independently fallible.
pub trait SensorPort {
    /// Air temperature in the grow chamber (Celsius).
    fn read_air_temperature(&mut self) -> Result<f32, SensorError>;

    /// Relative air humidity (percent).
    fn read_air_humidity(&mut self) -> Result<f32, SensorError>;

    /// Reservoir water temperature (Celsius).
    fn read_water_temperature(&mut self) -> Result<f32, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Raw actuator writes. No caching and no telemetry at this level; see
/// [`ActuatorBank`](crate::control::actuators::ActuatorBank).
pub trait ActuatorPort {
    /// Fan speed as an 8-bit PWM duty.
    fn set_fan_duty(&mut self, duty: u8);

    /// Water heater relay.
    fn set_heater(&mut self, on: bool);

    /// Irrigation pump relay.
    fn set_pump(&mut self, on: bool);

    /// Grow light channels as 8-bit PWM duties.
    fn set_led(&mut self, r: u8, g: u8, b: u8);
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → front panel)
// ───────────────────────────────────────────────────────────────

/// Two-line, 16-column character display with a built-in clock and icons.
pub trait DisplayPort {
    /// Blank one or both lines.
    fn clear(&mut self, line: DisplayLine);

    /// Clear `line`, then write `text` starting at `column`.
    fn write_at(&mut self, text: &str, line: DisplayLine, column: u8);

    /// Clear `line`, then write `text` centered.
    fn write_centered(&mut self, text: &str, line: DisplayLine) {
        let len = text.chars().count();
        let column = if len < COLUMNS { (COLUMNS - len) / 2 } else { 0 };
        self.write_at(text, line, column as u8);
    }

    /// Write `text` at the current cursor position.
    fn write_after(&mut self, text: &str);

    /// Set the brightness of one of the icons under the text lines.
    fn show_icon(&mut self, icon: Icon, level: IconLevel);

    /// Switch the panel to its internal clock.
    fn show_clock(&mut self);

    /// Load the panel's internal clock.
    fn set_clock(&mut self, time: &CivilTime);

    /// Choose how the internal clock is drawn.
    fn set_clock_format(&mut self, format: ClockFormat);

    /// Spin rate of the CD icon.
    fn set_cd_speed(&mut self, speed: IconSpeed);

    /// Blink rate of the REC icon.
    fn set_rec_speed(&mut self, speed: IconSpeed);
}

// ───────────────────────────────────────────────────────────────
// Serial port (driven adapter: domain ↔ host)
// ───────────────────────────────────────────────────────────────

/// Line-oriented host link.
pub trait SerialPort {
    /// Next received byte, if any. Never blocks.
    fn read_byte(&mut self) -> Option<u8>;

    /// Transmit `line` followed by `\n`.
    fn write_line(&mut self, line: &str);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Settable wall clock.
pub trait ClockPort {
    /// Set the current time (Unix epoch seconds, host local time).
    fn set_epoch(&mut self, epoch: u32);

    /// Current time, `None` until set.
    fn epoch(&self) -> Option<u32>;
}

// ───────────────────────────────────────────────────────────────
// Button port
// ───────────────────────────────────────────────────────────────

/// Raw analog levels of the two front panel buttons.
pub trait ButtonPort {
    /// `(right, left)` levels on a 10-bit scale; low means pressed.
    fn read_levels(&mut self) -> (u16, u16);
}

// ───────────────────────────────────────────────────────────────
// Board (everything the controller drives)
// ───────────────────────────────────────────────────────────────

/// Convenience bound for an adapter that implements every port.
pub trait Board: SensorPort + ActuatorPort + DisplayPort + SerialPort + ClockPort + ButtonPort {}

impl<T> Board for T where T: SensorPort + ActuatorPort + DisplayPort + SerialPort + ClockPort + ButtonPort {}

// ───────────────────────────────────────────────────────────────
// Scheduler delegate (decouples scheduler from the control steps)
// ───────────────────────────────────────────────────────────────

/// Callback trait that the [`Scheduler`](crate::scheduler::Scheduler)
/// invokes when a timer fires.
pub trait SchedulerDelegate {
    fn on_timer_fired(&mut self, kind: TimerKind);
}

/// Which periodic trigger fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Every second: irrigation, lighting, display rotation.
    Second,
    /// Every minute: probe refresh, feedback control, telemetry.
    Minute,
    /// Every quarter hour: reserved.
    Quarter,
}
