//! Unified error types for the Sprout firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! control loop's error handling uniform. All variants are `Copy` so they
//! can be stored in [`LiveReadings`](crate::app::state::LiveReadings) and
//! passed around without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A probe could not be read or returned implausible data.
    Sensor(SensorError),
    /// An inbound host command was rejected.
    Command(CommandError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Command(e) => write!(f, "command: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// ADC read returned an error or timed out.
    AdcReadFailed,
    /// The divider voltage sits on a supply rail: probe open or shorted.
    Disconnected,
    /// Reading is outside the physically plausible range.
    OutOfRange,
    /// No reading has been taken yet.
    NotSampled,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdcReadFailed => write!(f, "ADC read failed"),
            Self::Disconnected => write!(f, "probe disconnected"),
            Self::OutOfRange => write!(f, "reading out of range"),
            Self::NotSampled => write!(f, "not sampled yet"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Command errors
// ---------------------------------------------------------------------------

/// Reasons an inbound line does not produce a [`Command`](crate::protocol::Command).
///
/// None of these are reported to the host: the wire behaviour of every
/// variant is a silent no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// No `:` separator in the line.
    MissingSeparator,
    /// Keyword is not one of the known `SET_*` commands.
    UnknownKeyword,
    /// The parameter did not parse or was out of range for the keyword.
    InvalidParameter(&'static str),
    /// Line exceeded the receive buffer and was dropped.
    Overflow,
    /// Line bytes were not valid UTF-8.
    Encoding,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSeparator => write!(f, "missing ':' separator"),
            Self::UnknownKeyword => write!(f, "unknown keyword"),
            Self::InvalidParameter(keyword) => write!(f, "invalid parameter for {keyword}"),
            Self::Overflow => write!(f, "line too long"),
            Self::Encoding => write!(f, "line is not valid UTF-8"),
        }
    }
}

impl From<CommandError> for Error {
    fn from(e: CommandError) -> Self {
        Self::Command(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
