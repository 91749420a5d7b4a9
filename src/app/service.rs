//! Controller service: the hexagonal core.
//!
//! [`Controller`] owns the controller state, the boot handshake and the
//! periodic scheduler. All I/O flows through the port traits of the
//! [`Board`] passed in on every call, so the whole service runs against
//! mock adapters in tests.
//!
//! ```text
//!  SensorPort ───▶ ┌──────────────────────────────┐ ───▶ SerialPort
//!  ButtonPort ───▶ │          Controller          │ ───▶ DisplayPort
//!  SerialPort ───▶ │ Boot · Scheduler · Control   │ ───▶ ActuatorPort
//!                  └──────────────────────────────┘
//! ```
//!
//! Lifecycle: [`power_on`](Controller::power_on) once, then
//! [`run_boot`](Controller::run_boot) until every program field is known,
//! then [`tick`](Controller::tick) forever.

use embedded_hal::delay::DelayNs;
use log::{debug, info, trace, warn};

use crate::clock::{self, CivilTime};
use crate::config::SystemConfig;
use crate::control::climate;
use crate::drivers::lcd::{ClockFormat, DisplayLine, Icon, IconLevel, IconSpeed};
use crate::error::{CommandError, Result};
use crate::fsm::states::{ConnectAnimation, ConnectFrame};
use crate::fsm::{BootSequence, BootStage};
use crate::protocol::line::{Line, LineAssembler};
use crate::scheduler::Scheduler;
use crate::ui::buttons::ButtonAction;
use crate::ui::local;

use super::commands;
use super::ports::{Board, SchedulerDelegate, TimerKind};
use super::state::{ControllerState, LiveReadings};

const INIT_BANNER: &str = "INITIALIZING";
const CONNECT_PROMPT: &str = "CONNECT HOST";

// ───────────────────────────────────────────────────────────────
// Controller
// ───────────────────────────────────────────────────────────────

pub struct Controller {
    settings: SystemConfig,
    state: ControllerState,
    scheduler: Scheduler,
    lines: LineAssembler,
    boot: BootSequence,
    animation: ConnectAnimation,
    booted: bool,
}

impl Controller {
    /// Build a controller from validated timing settings.
    pub fn new(settings: SystemConfig) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            scheduler: Scheduler::new(&settings),
            settings,
            state: ControllerState::new(),
            lines: LineAssembler::new(),
            boot: BootSequence::new(),
            animation: ConnectAnimation::new(),
            booted: false,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Put every effector in its safe state and prepare the panel.
    pub fn power_on<B: Board>(&mut self, hw: &mut B) {
        info!("Power on: effectors to safe state");
        self.state.actuators.safe_state(hw);
        hw.clear(DisplayLine::Both);
        hw.set_clock_format(ClockFormat::Eu);
    }

    /// Block until the handshake has acquired the whole program.
    pub fn run_boot<B: Board, D: DelayNs>(&mut self, hw: &mut B, delay: &mut D) {
        while !self.poll_boot(hw, delay) {}
    }

    /// One handshake round: send the pending request, wait, absorb every
    /// line the host sent meanwhile. Returns `true` once complete.
    pub fn poll_boot<B: Board, D: DelayNs>(&mut self, hw: &mut B, delay: &mut D) -> bool {
        if self.booted {
            return true;
        }
        let Some(request) = self.boot.advance(&self.state) else {
            self.finish_boot(hw);
            return true;
        };

        if self.boot.current_stage() == BootStage::Connect {
            if self.boot.attempts() == 1 {
                delay.delay_ms(self.settings.connect_prompt_ms);
                hw.write_centered(INIT_BANNER, DisplayLine::Top);
                hw.show_icon(Icon::Rec, IconLevel::High);
                hw.set_rec_speed(IconSpeed::Medium);
            }
            self.draw_connect_frame(hw, delay);
            hw.write_line(request);
        } else {
            hw.write_line(request);
            delay.delay_ms(self.settings.handshake_retry_ms);
        }
        self.drain_lines(hw);
        false
    }

    /// One pass of the main loop: buttons, timers, at most one host line,
    /// then sleep for one tick.
    pub fn tick<B: Board, D: DelayNs>(&mut self, hw: &mut B, delay: &mut D) {
        let (right, left) = hw.read_levels();
        let action = ButtonAction::from_levels(right, left, self.settings.button_threshold);
        if let Some(transition) = local::apply(action, &mut self.state, hw) {
            info!("Local UI: {:?}", transition);
        }

        let mut delegate = LoopDelegate {
            settings: &self.settings,
            state: &mut self.state,
            hw: &mut *hw,
        };
        self.scheduler.tick(&mut delegate);

        if let Some(line) = self.next_line(hw) {
            // Errors are already logged by the dispatcher.
            let _ = commands::handle_line(&line, &mut self.state, hw);
        }

        delay.delay_ms(self.settings.tick_ms);
    }

    /// Power on, boot, then loop forever.
    pub fn run<B: Board, D: DelayNs>(&mut self, hw: &mut B, delay: &mut D) -> ! {
        self.power_on(hw);
        self.run_boot(hw, delay);
        info!("Entering control loop");
        loop {
            self.tick(hw, delay);
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn boot_stage(&self) -> BootStage {
        self.boot.current_stage()
    }

    pub fn is_booted(&self) -> bool {
        self.booted
    }

    // ── Internal ──────────────────────────────────────────────

    fn draw_connect_frame<B: Board, D: DelayNs>(&mut self, hw: &mut B, delay: &mut D) {
        match self.animation.next_frame() {
            ConnectFrame::Prompt => {
                hw.write_centered(CONNECT_PROMPT, DisplayLine::Bottom);
                delay.delay_ms(self.settings.connect_prompt_ms);
                hw.write_at(".", DisplayLine::Bottom, 0);
            }
            ConnectFrame::Dot => {
                delay.delay_ms(self.settings.handshake_retry_ms);
                hw.write_after(".");
            }
        }
    }

    fn finish_boot<B: Board>(&mut self, hw: &mut B) {
        self.booted = true;
        self.state.irrigation.start_immediately();

        hw.set_rec_speed(IconSpeed::Stop);
        hw.show_icon(Icon::Rec, IconLevel::Off);
        hw.show_icon(Icon::Usb, IconLevel::High);
        match hw.epoch() {
            Some(epoch) => hw.set_clock(&CivilTime::from_epoch(epoch)),
            None => warn!("Boot finished without a wall clock"),
        }
        hw.show_clock();

        match serde_json::to_string(&self.state.config) {
            Ok(json) => info!("Boot complete, program: {}", json),
            Err(e) => warn!("Boot complete (program dump failed: {})", e),
        }
    }

    /// Feed every pending byte through the assembler, applying each line.
    fn drain_lines<B: Board>(&mut self, hw: &mut B) {
        while let Some(byte) = hw.read_byte() {
            if let Some(Ok(line)) = self.assemble(byte) {
                let _ = commands::handle_line(&line, &mut self.state, hw);
            }
        }
    }

    /// Read bytes until one complete line is available or the port is idle.
    fn next_line<B: Board>(&mut self, hw: &mut B) -> Option<Line> {
        while let Some(byte) = hw.read_byte() {
            if let Some(Ok(line)) = self.assemble(byte) {
                return Some(line);
            }
        }
        None
    }

    fn assemble(&mut self, byte: u8) -> Option<core::result::Result<Line, CommandError>> {
        let result = self.lines.push(byte)?;
        if let Err(e) = &result {
            warn!("Dropped host line: {}", e);
        }
        Some(result)
    }
}

// ───────────────────────────────────────────────────────────────
// Timer dispatch
// ───────────────────────────────────────────────────────────────

/// Borrows the parts of the controller the periodic steps mutate while
/// the scheduler itself is borrowed.
struct LoopDelegate<'a, B> {
    settings: &'a SystemConfig,
    state: &'a mut ControllerState,
    hw: &'a mut B,
}

impl<B: Board> LoopDelegate<'_, B> {
    fn every_second(&mut self) {
        let state = &mut *self.state;
        let hw = &mut *self.hw;

        if let Some((on, off)) = state.config.flow_durations() {
            if let Some(pump) = state.irrigation.step(on, off) {
                state.actuators.set_pump(hw, pump);
            }
        }

        if !state.actuators.is_inspecting() {
            match hw.epoch() {
                Some(epoch) => {
                    let now = clock::minute_of_day(epoch);
                    state.lighting.step(now, &state.config, &mut state.actuators, hw);
                }
                None => debug!("Lighting skipped: clock not set"),
            }
        }

        state.rotation.step(&state.config, &state.readings, hw);
    }

    fn every_minute(&mut self) {
        let state = &mut *self.state;
        let hw = &mut *self.hw;

        state.readings = LiveReadings::sample(hw);
        climate::regulate(
            &mut state.actuators,
            &state.readings,
            &state.config,
            self.settings.temperature_tolerance_c,
            hw,
        );
        state.readings.transmit(hw);
    }
}

impl<B: Board> SchedulerDelegate for LoopDelegate<'_, B> {
    fn on_timer_fired(&mut self, kind: TimerKind) {
        match kind {
            TimerKind::Second => self.every_second(),
            TimerKind::Minute => self.every_minute(),
            TimerKind::Quarter => trace!("Quarter-hour tick"),
        }
    }
}
