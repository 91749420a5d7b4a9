//! Outbound `INFO:` lines.
//!
//! Every device→host report goes through [`format_info`], which renders
//! `INFO:<NAME>=<value>` with an explicit numeric format.

use core::fmt::Write;

use heapless::String;

/// Capacity of one outbound line.
pub const MAX_INFO_LEN: usize = 48;

pub type InfoLine = String<MAX_INFO_LEN>;

/// Value carried by a telemetry line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TelemetryValue<'a> {
    Int(i32),
    Float(f32),
    /// Rendered `ON` / `OFF`.
    Switch(bool),
    /// Bare token, e.g. a probe name.
    Text(&'a str),
}

/// Fixed-point rendering for [`TelemetryValue::Float`]: right-aligned in
/// `width` columns with `precision` decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    pub width: usize,
    pub precision: usize,
}

impl NumberFormat {
    /// Probe readings sent to the host.
    pub const READING: Self = Self { width: 5, precision: 2 };
    /// Probe readings on the front panel.
    pub const PANEL: Self = Self { width: 5, precision: 1 };
}

/// Render `INFO:<name>=<value>`.
///
/// Output that would not fit [`MAX_INFO_LEN`] is cut short; names in use are
/// far below the limit.
pub fn format_info(name: &str, value: TelemetryValue<'_>, fmt: NumberFormat) -> InfoLine {
    let mut line = InfoLine::new();
    let _ = write!(line, "INFO:{name}=");
    let _ = match value {
        TelemetryValue::Int(v) => write!(line, "{v}"),
        TelemetryValue::Float(v) => write!(line, "{:w$.p$}", v, w = fmt.width, p = fmt.precision),
        TelemetryValue::Switch(on) => line.write_str(if on { "ON" } else { "OFF" }),
        TelemetryValue::Text(s) => line.write_str(s),
    };
    line
}

/// Fixed-width number without the `INFO:` envelope, for display pages.
pub fn format_number<const N: usize>(value: f32, fmt: NumberFormat) -> String<N> {
    let mut out = String::new();
    let _ = write!(out, "{:w$.p$}", value, w = fmt.width, p = fmt.precision);
    out
}
