//! Tick-driven countdown timers.
//!
//! The main loop calls [`Scheduler::tick`] once per iteration. Each timer
//! counts down by the tick period and fires when it lands exactly on zero,
//! then reloads. The scheduler notifies a [`SchedulerDelegate`] and knows
//! nothing about what the timers drive.
//!
//! ```text
//!   main loop ──tick()──▶ Scheduler
//!                          ├─ second  (1 s)   ─┐
//!                          ├─ minute  (60 s)  ─┼─▶ SchedulerDelegate::on_timer_fired
//!                          └─ quarter (900 s) ─┘
//! ```
//!
//! A timer that steps past zero without hitting it (a period that is not a
//! multiple of the tick) does not fire; it reloads one full period and
//! fires on the next exact landing. [`SystemConfig::validate`] rules this
//! out for the shipped configuration.
//!
//! [`SystemConfig::validate`]: crate::config::SystemConfig::validate

use log::{trace, warn};

use crate::app::ports::{SchedulerDelegate, TimerKind};
use crate::config::SystemConfig;

// ═══════════════════════════════════════════════════════════════
//  Countdown timer
// ═══════════════════════════════════════════════════════════════

/// One reloading countdown.
#[derive(Debug, Clone, Copy)]
pub struct CountdownTimer {
    kind: TimerKind,
    period_ms: i64,
    remaining_ms: i64,
}

impl CountdownTimer {
    /// Start a timer one full period away from its first fire.
    pub fn new(kind: TimerKind, period_ms: u32) -> Self {
        Self {
            kind,
            period_ms: i64::from(period_ms),
            remaining_ms: i64::from(period_ms),
        }
    }

    /// Advance by `elapsed_ms`. Returns `true` if the timer fired.
    pub fn step(&mut self, elapsed_ms: u32) -> bool {
        self.remaining_ms -= i64::from(elapsed_ms);
        if self.remaining_ms == 0 {
            self.remaining_ms = self.period_ms;
            return true;
        }
        if self.remaining_ms < 0 {
            warn!(
                "Scheduler: {:?} timer overshot by {} ms, window missed",
                self.kind, -self.remaining_ms
            );
            self.remaining_ms += self.period_ms;
        }
        false
    }

    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    pub fn remaining_ms(&self) -> i64 {
        self.remaining_ms
    }
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler engine
// ═══════════════════════════════════════════════════════════════

/// The three periodic triggers of the control loop.
pub struct Scheduler {
    /// Fire order within one tick: second, minute, quarter.
    timers: [CountdownTimer; 3],
    tick_ms: u32,
}

impl Scheduler {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            timers: [
                CountdownTimer::new(TimerKind::Second, config.second_period_ms),
                CountdownTimer::new(TimerKind::Minute, config.minute_period_ms),
                CountdownTimer::new(TimerKind::Quarter, config.quarter_period_ms),
            ],
            tick_ms: config.tick_ms,
        }
    }

    /// Advance every timer by one tick period.
    pub fn tick(&mut self, delegate: &mut dyn SchedulerDelegate) {
        self.advance(self.tick_ms, delegate);
    }

    /// Advance every timer by an arbitrary amount of time.
    ///
    /// Used when the loop knows it slept longer than one tick.
    pub fn advance(&mut self, elapsed_ms: u32, delegate: &mut dyn SchedulerDelegate) {
        for timer in &mut self.timers {
            if timer.step(elapsed_ms) {
                trace!("Scheduler: {:?} fired", timer.kind());
                delegate.on_timer_fired(timer.kind());
            }
        }
    }

    /// Time until the given timer next fires.
    pub fn remaining_ms(&self, kind: TimerKind) -> i64 {
        self.timers
            .iter()
            .find(|t| t.kind() == kind)
            .map_or(0, CountdownTimer::remaining_ms)
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
