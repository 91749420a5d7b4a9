//! Stage table and the connect-wait animation.
//!
//! Each stage is a plain `fn` predicate over the controller state: no
//! closures, no dynamic dispatch, no heap.
//!
//! ```text
//!  CONNECT ──[SET_PROGRAM]──▶ TIME ──[SET_TIME]──▶ RED ──▶ GREEN ──▶ BLUE
//!     ──▶ LIGHT_ON ──▶ LIGHT_OFF ──▶ FLOW_ON ──▶ FLOW_OFF
//!     ──▶ WATER_LOW ──▶ WATER_HIGH ──▶ AIR_LOW ──▶ AIR_HIGH ──▶ COMPLETE
//! ```

use crate::app::state::ControllerState;
use crate::drivers::lcd::COLUMNS;

use super::{BootStage, StageDescriptor};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

const fn stage(
    id: BootStage,
    name: &'static str,
    request: &'static str,
    is_satisfied: fn(&ControllerState) -> bool,
) -> StageDescriptor {
    StageDescriptor { id, name, request: Some(request), is_satisfied }
}

/// Build the static stage table. Called once at startup.
pub fn build_stage_table() -> [StageDescriptor; BootStage::COUNT] {
    [
        stage(BootStage::Connect, "Connect", "INIT:GET_PROGRAM", |s| s.config.program_name.is_some()),
        stage(BootStage::Time, "Time", "INIT:GET_TIME", |s| s.clock_set),
        stage(BootStage::RedLevel, "RedLevel", "INIT:GET_RED_LEVEL", |s| s.config.red_level.is_some()),
        stage(BootStage::GreenLevel, "GreenLevel", "INIT:GET_GREEN_LEVEL", |s| {
            s.config.green_level.is_some()
        }),
        stage(BootStage::BlueLevel, "BlueLevel", "INIT:GET_BLUE_LEVEL", |s| s.config.blue_level.is_some()),
        stage(BootStage::LightOn, "LightOn", "INIT:GET_LIGHT_ON", |s| s.config.light_on_minute.is_some()),
        stage(BootStage::LightOff, "LightOff", "INIT:GET_LIGHT_OFF", |s| {
            s.config.light_off_minute.is_some()
        }),
        stage(BootStage::FlowOn, "FlowOn", "INIT:GET_FLOW_ON", |s| s.config.flow_on_secs.is_some()),
        stage(BootStage::FlowOff, "FlowOff", "INIT:GET_FLOW_OFF", |s| s.config.flow_off_secs.is_some()),
        stage(BootStage::WaterLow, "WaterLow", "INIT:GET_WATER_LOW", |s| s.config.water_low_c.is_some()),
        stage(BootStage::WaterHigh, "WaterHigh", "INIT:GET_WATER_HIGH", |s| {
            s.config.water_high_c.is_some()
        }),
        stage(BootStage::AirLow, "AirLow", "INIT:GET_AIR_LOW", |s| s.config.air_low_c.is_some()),
        stage(BootStage::AirHigh, "AirHigh", "INIT:GET_AIR_HIGH", |s| s.config.air_high_c.is_some()),
        StageDescriptor {
            id: BootStage::Complete,
            name: "Complete",
            request: None,
            is_satisfied: |_| false,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  Connect-wait animation
// ═══════════════════════════════════════════════════════════════════════════

/// One frame of the waiting indicator on the bottom display line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectFrame {
    /// Show the connect prompt, hold it, then restart the dots at column 0.
    Prompt,
    /// Append one more dot.
    Dot,
}

/// One dot per attempt after the prompt's own column-0 dot. After
/// `COLUMNS` appended dots the prompt comes back; the last one lands past
/// the visible line, as on the first units.
#[derive(Debug)]
pub struct ConnectAnimation {
    dots: usize,
}

impl ConnectAnimation {
    /// The very first frame is the prompt.
    pub fn new() -> Self {
        Self { dots: COLUMNS }
    }

    pub fn next_frame(&mut self) -> ConnectFrame {
        if self.dots < COLUMNS {
            self.dots += 1;
            ConnectFrame::Dot
        } else {
            // The prompt frame ends by drawing a dot at column 0.
            self.dots = 0;
            ConnectFrame::Prompt
        }
    }
}

impl Default for ConnectAnimation {
    fn default() -> Self {
        Self::new()
    }
}
