//! ESP32 time adapter.
//!
//! - [`WallClock`]: host-set wall clock, anchored to the monotonic uptime
//!   at the moment it was set. On `target_os = "espidf"` the uptime comes
//!   from `esp_timer_get_time()`; elsewhere from `std::time::Instant`.
//! - [`TickDelay`]: blocking delay. FreeRTOS task delay on target,
//!   thread sleep on the host.

use embedded_hal::delay::DelayNs;

use crate::app::ports::ClockPort;

/// Wall clock driven by the host's `SET_TIME`.
pub struct WallClock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
    /// `(epoch, uptime_us)` at the last set.
    anchor: Option<(u32, u64)>,
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
            anchor: None,
        }
    }

    /// Microseconds since boot (monotonic).
    #[cfg(target_os = "espidf")]
    pub fn uptime_us(&self) -> u64 {
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64
    }

    /// Microseconds since boot (monotonic).
    #[cfg(not(target_os = "espidf"))]
    pub fn uptime_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }
}

impl ClockPort for WallClock {
    fn set_epoch(&mut self, epoch: u32) {
        self.anchor = Some((epoch, self.uptime_us()));
    }

    fn epoch(&self) -> Option<u32> {
        let (epoch, at_us) = self.anchor?;
        let elapsed_s = self.uptime_us().saturating_sub(at_us) / 1_000_000;
        Some(epoch.saturating_add(elapsed_s as u32))
    }
}

/// Blocking delay for the loop tick and the handshake waits.
#[derive(Debug, Default, Clone, Copy)]
pub struct TickDelay;

#[cfg(target_os = "espidf")]
impl DelayNs for TickDelay {
    fn delay_ns(&mut self, ns: u32) {
        esp_idf_hal::delay::FreeRtos.delay_ns(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        esp_idf_hal::delay::FreeRtos::delay_ms(ms);
    }
}

#[cfg(not(target_os = "espidf"))]
impl DelayNs for TickDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
