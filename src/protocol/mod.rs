//! Host command protocol.
//!
//! Newline-terminated ASCII lines of the form `<KEYWORD>:<PARAM>`. The line
//! is split on the first `:` only, so `SET_LIGHT_ON:07:30` carries `07:30`
//! as its parameter.
//!
//! ```text
//!  UART bytes ──▶ LineAssembler ──▶ parse() ──▶ Command ──▶ dispatch
//!                  (line.rs)                              (app/commands.rs)
//! ```
//!
//! Parsing is pure: it never touches controller state, so a rejected line
//! cannot leave a field half-written.

pub mod line;
pub mod telemetry;

use crate::error::CommandError;

/// A validated host command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command<'a> {
    SetProgram(&'a str),
    SetTime(u32),
    SetRedLevel(u8),
    SetGreenLevel(u8),
    SetBlueLevel(u8),
    SetLightOn(u16),
    SetLightOff(u16),
    /// Seconds (the wire carries minutes).
    SetFlowOn(u32),
    /// Seconds (the wire carries minutes).
    SetFlowOff(u32),
    SetWaterLow(f32),
    SetWaterHigh(f32),
    SetAirLow(f32),
    SetAirHigh(f32),
}

impl Command<'_> {
    /// Wire keyword, used for logging.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::SetProgram(_) => "SET_PROGRAM",
            Self::SetTime(_) => "SET_TIME",
            Self::SetRedLevel(_) => "SET_RED_LEVEL",
            Self::SetGreenLevel(_) => "SET_GREEN_LEVEL",
            Self::SetBlueLevel(_) => "SET_BLUE_LEVEL",
            Self::SetLightOn(_) => "SET_LIGHT_ON",
            Self::SetLightOff(_) => "SET_LIGHT_OFF",
            Self::SetFlowOn(_) => "SET_FLOW_ON",
            Self::SetFlowOff(_) => "SET_FLOW_OFF",
            Self::SetWaterLow(_) => "SET_WATER_LOW",
            Self::SetWaterHigh(_) => "SET_WATER_HIGH",
            Self::SetAirLow(_) => "SET_AIR_LOW",
            Self::SetAirHigh(_) => "SET_AIR_HIGH",
        }
    }
}

/// Parse one line (terminator already removed) into a [`Command`].
pub fn parse(line: &str) -> Result<Command<'_>, CommandError> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let (keyword, param) = line.split_once(':').ok_or(CommandError::MissingSeparator)?;

    let cmd = match keyword {
        "SET_PROGRAM" => Command::SetProgram(param),
        "SET_TIME" => Command::SetTime(parse_epoch(param).ok_or(invalid("SET_TIME"))?),
        "SET_RED_LEVEL" => Command::SetRedLevel(parse_level(param).ok_or(invalid("SET_RED_LEVEL"))?),
        "SET_GREEN_LEVEL" => {
            Command::SetGreenLevel(parse_level(param).ok_or(invalid("SET_GREEN_LEVEL"))?)
        }
        "SET_BLUE_LEVEL" => {
            Command::SetBlueLevel(parse_level(param).ok_or(invalid("SET_BLUE_LEVEL"))?)
        }
        "SET_LIGHT_ON" => Command::SetLightOn(parse_hhmm(param).ok_or(invalid("SET_LIGHT_ON"))?),
        "SET_LIGHT_OFF" => Command::SetLightOff(parse_hhmm(param).ok_or(invalid("SET_LIGHT_OFF"))?),
        "SET_FLOW_ON" => Command::SetFlowOn(parse_flow(param).ok_or(invalid("SET_FLOW_ON"))?),
        "SET_FLOW_OFF" => Command::SetFlowOff(parse_flow(param).ok_or(invalid("SET_FLOW_OFF"))?),
        "SET_WATER_LOW" => Command::SetWaterLow(parse_celsius(param).ok_or(invalid("SET_WATER_LOW"))?),
        "SET_WATER_HIGH" => {
            Command::SetWaterHigh(parse_celsius(param).ok_or(invalid("SET_WATER_HIGH"))?)
        }
        "SET_AIR_LOW" => Command::SetAirLow(parse_celsius(param).ok_or(invalid("SET_AIR_LOW"))?),
        "SET_AIR_HIGH" => Command::SetAirHigh(parse_celsius(param).ok_or(invalid("SET_AIR_HIGH"))?),
        _ => return Err(CommandError::UnknownKeyword),
    };
    Ok(cmd)
}

fn invalid(keyword: &'static str) -> CommandError {
    CommandError::InvalidParameter(keyword)
}

fn parse_epoch(param: &str) -> Option<u32> {
    param.trim().parse().ok()
}

/// Percent level, 0..=100.
fn parse_level(param: &str) -> Option<u8> {
    param.trim().parse::<u8>().ok().filter(|&v| v <= 100)
}

/// `HH:MM`, read positionally: hours from chars 0-1, minutes from chars 3-4.
/// Whatever sits at position 2 is not inspected.
fn parse_hhmm(param: &str) -> Option<u16> {
    let hours: u16 = param.get(0..2)?.parse().ok()?;
    let minutes: u16 = param.get(3..5)?.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Integer minutes, strictly positive, returned as seconds.
fn parse_flow(param: &str) -> Option<u32> {
    let minutes: u32 = param.trim().parse().ok()?;
    if minutes == 0 {
        return None;
    }
    minutes.checked_mul(60)
}

fn parse_celsius(param: &str) -> Option<f32> {
    param.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}
