//! Fuzz target: `protocol::parse`
//!
//! Any UTF-8 input must either parse or return a typed error; a parsed
//! command must carry a value inside its documented range.
//!
//! cargo fuzz run fuzz_command_parser

#![no_main]

use libfuzzer_sys::fuzz_target;
use sprout::protocol::{Command, parse};

fuzz_target!(|data: &[u8]| {
    let Ok(line) = core::str::from_utf8(data) else {
        return;
    };
    match parse(line) {
        Ok(Command::SetRedLevel(v) | Command::SetGreenLevel(v) | Command::SetBlueLevel(v)) => {
            assert!(v <= 100, "level out of range");
        }
        Ok(Command::SetLightOn(m) | Command::SetLightOff(m)) => {
            assert!(m < 1440, "minute of day out of range");
        }
        Ok(Command::SetFlowOn(s) | Command::SetFlowOff(s)) => {
            assert!(s >= 60 && s % 60 == 0, "flow time not whole minutes");
        }
        Ok(
            Command::SetWaterLow(c)
            | Command::SetWaterHigh(c)
            | Command::SetAirLow(c)
            | Command::SetAirHigh(c),
        ) => {
            assert!(c.is_finite(), "non-finite temperature");
        }
        Ok(Command::SetProgram(_) | Command::SetTime(_)) | Err(_) => {}
    }
});
