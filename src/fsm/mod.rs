//! Table-driven boot handshake state machine.
//!
//! Before the control loop may start, every field of the grow program has
//! to be acquired from the host, one at a time and in a fixed order:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  StageTable                                                  │
//! │  ┌────────────┬───────────────────────┬───────────────────┐  │
//! │  │ BootStage  │ request               │ is_satisfied      │  │
//! │  ├────────────┼───────────────────────┼───────────────────┤  │
//! │  │ Connect    │ INIT:GET_PROGRAM      │ fn(&state)->bool  │  │
//! │  │ Time       │ INIT:GET_TIME         │ fn(&state)->bool  │  │
//! │  │ ...        │ ...                   │ ...               │  │
//! │  │ AirHigh    │ INIT:GET_AIR_HIGH     │ fn(&state)->bool  │  │
//! │  │ Complete   │ -                     │ -                 │  │
//! │  └────────────┴───────────────────────┴───────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The caller polls: [`BootSequence::advance`] skips every stage whose field
//! is already set and returns the request token of the first one that is
//! not. The caller sends it, waits, feeds any host lines through the
//! command dispatcher and polls again. There is no timeout: an unanswered
//! stage is asked for forever.

pub mod states;

use log::info;

use crate::app::state::ControllerState;

// ---------------------------------------------------------------------------
// Stage identity
// ---------------------------------------------------------------------------

/// Every stage of the handshake, in the order they run.
/// Must stay in sync with the table built in [`states::build_stage_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BootStage {
    Connect = 0,
    Time = 1,
    RedLevel = 2,
    GreenLevel = 3,
    BlueLevel = 4,
    LightOn = 5,
    LightOff = 6,
    FlowOn = 7,
    FlowOff = 8,
    WaterLow = 9,
    WaterHigh = 10,
    AirLow = 11,
    AirHigh = 12,
    Complete = 13,
}

impl BootStage {
    /// Total number of stages, used to size the table array.
    pub const COUNT: usize = 14;

    /// Convert an index back to `BootStage`. Out-of-range indices map to
    /// `Complete`.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Connect,
            1 => Self::Time,
            2 => Self::RedLevel,
            3 => Self::GreenLevel,
            4 => Self::BlueLevel,
            5 => Self::LightOn,
            6 => Self::LightOff,
            7 => Self::FlowOn,
            8 => Self::FlowOff,
            9 => Self::WaterLow,
            10 => Self::WaterHigh,
            11 => Self::AirLow,
            12 => Self::AirHigh,
            _ => {
                debug_assert!(idx == 13, "invalid stage index: {idx}");
                Self::Complete
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Stage descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Predicate telling whether a stage's field has been acquired.
pub type SatisfiedFn = fn(&ControllerState) -> bool;

/// Static descriptor for a single stage.
pub struct StageDescriptor {
    pub id: BootStage,
    pub name: &'static str,
    /// Token sent to the host while the stage is pending.
    pub request: Option<&'static str>,
    pub is_satisfied: SatisfiedFn,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// The handshake engine. Holds the table and the current stage; the
/// controller state it inspects is passed in on every poll.
pub struct BootSequence {
    table: [StageDescriptor; BootStage::COUNT],
    current: usize,
    /// Requests sent for the current stage.
    attempts: u32,
}

impl BootSequence {
    pub fn new() -> Self {
        Self {
            table: states::build_stage_table(),
            current: BootStage::Connect as usize,
            attempts: 0,
        }
    }

    pub fn current_stage(&self) -> BootStage {
        BootStage::from_index(self.current)
    }

    pub fn is_complete(&self) -> bool {
        self.current_stage() == BootStage::Complete
    }

    /// Requests sent so far for the current stage.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Move past satisfied stages and return the request for the first
    /// pending one, counting it as an attempt. `None` once complete.
    pub fn advance(&mut self, state: &ControllerState) -> Option<&'static str> {
        while !self.is_complete() {
            let stage = &self.table[self.current];
            if !(stage.is_satisfied)(state) {
                self.attempts += 1;
                return stage.request;
            }
            self.transition(self.current + 1);
        }
        None
    }

    fn transition(&mut self, next: usize) {
        info!(
            "Boot: {} -> {} (after {} request(s))",
            self.table[self.current].name, self.table[next].name, self.attempts
        );
        self.current = next;
        self.attempts = 0;
    }
}

impl Default for BootSequence {
    fn default() -> Self {
        Self::new()
    }
}
