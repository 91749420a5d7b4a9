//! Mains relay driver (heater and pump sockets).
//!
//! The relay board is active-low: driving the GPIO LOW energises the coil
//! and closes the socket. This driver hides the inversion and remembers
//! the last commanded state.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the GPIO via hw_init helpers.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;

pub struct RelayDriver {
    gpio: i32,
    closed: bool,
}

impl RelayDriver {
    /// A relay starts released; hw_init already parked the pin HIGH.
    pub fn new(gpio: i32) -> Self {
        Self { gpio, closed: false }
    }

    pub fn set(&mut self, closed: bool) {
        hw_init::gpio_write(self.gpio, !closed);
        self.closed = closed;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
