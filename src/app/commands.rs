//! Inbound host commands applied to the controller state.
//!
//! The same dispatcher serves the boot handshake and the running loop: a
//! field set during the handshake satisfies its stage, a field set later
//! simply replaces the program value. Lines that fail to parse, or a
//! threshold that would meet or cross its partner, are logged and dropped;
//! nothing is sent back to the host.

use log::{debug, info, warn};

use crate::drivers::lcd::DisplayLine;
use crate::error::CommandError;
use crate::protocol::{self, Command};

use super::ports::{ClockPort, DisplayPort};
use super::state::ControllerState;

/// Parse one received line and apply it.
pub fn handle_line<H: DisplayPort + ClockPort>(
    line: &str,
    state: &mut ControllerState,
    hw: &mut H,
) -> Result<(), CommandError> {
    let result = protocol::parse(line).and_then(|command| {
        debug!("rx {}: {}", command.keyword(), line);
        dispatch(command, state, hw)
    });
    if let Err(e) = result {
        match e {
            CommandError::InvalidParameter(_) => warn!("Rejected '{}': {}", line, e),
            _ => debug!("Ignored '{}': {}", line, e),
        }
    }
    result
}

/// Apply an already-parsed command.
///
/// Each low threshold must stay strictly below its high partner once both
/// are known; a value that would break that is rejected and the stored
/// pair is left as it was.
pub fn dispatch<H: DisplayPort + ClockPort>(
    command: Command<'_>,
    state: &mut ControllerState,
    hw: &mut H,
) -> Result<(), CommandError> {
    let cfg = &mut state.config;
    match command {
        Command::SetProgram(name) => {
            cfg.set_program_name(name);
            info!("Program: {}", cfg.program_name());
            hw.write_centered("PROGRAM", DisplayLine::Top);
            hw.write_centered(cfg.program_name(), DisplayLine::Bottom);
        }
        Command::SetTime(epoch) => {
            hw.set_epoch(epoch);
            state.clock_set = true;
            info!("Clock set to {}", epoch);
        }
        Command::SetRedLevel(v) => cfg.red_level = Some(v),
        Command::SetGreenLevel(v) => cfg.green_level = Some(v),
        Command::SetBlueLevel(v) => cfg.blue_level = Some(v),
        Command::SetLightOn(minute) => cfg.light_on_minute = Some(minute),
        Command::SetLightOff(minute) => cfg.light_off_minute = Some(minute),
        Command::SetFlowOn(secs) => cfg.flow_on_secs = Some(secs),
        Command::SetFlowOff(secs) => cfg.flow_off_secs = Some(secs),
        Command::SetWaterLow(c) => cfg.water_low_c = Some(below(c, cfg.water_high_c, "SET_WATER_LOW")?),
        Command::SetWaterHigh(c) => cfg.water_high_c = Some(above(c, cfg.water_low_c, "SET_WATER_HIGH")?),
        Command::SetAirLow(c) => cfg.air_low_c = Some(below(c, cfg.air_high_c, "SET_AIR_LOW")?),
        Command::SetAirHigh(c) => cfg.air_high_c = Some(above(c, cfg.air_low_c, "SET_AIR_HIGH")?),
    }
    Ok(())
}

fn below(low: f32, high: Option<f32>, keyword: &'static str) -> Result<f32, CommandError> {
    match high {
        Some(high) if low >= high => Err(CommandError::InvalidParameter(keyword)),
        _ => Ok(low),
    }
}

fn above(high: f32, low: Option<f32>, keyword: &'static str) -> Result<f32, CommandError> {
    match low {
        Some(low) if high <= low => Err(CommandError::InvalidParameter(keyword)),
        _ => Ok(high),
    }
}
