//! Host serial link on UART0.
//!
//! Byte-level receive and line-level transmit; line assembly happens in
//! [`protocol::line`](crate::protocol::line).

use crate::drivers::hw_init;

pub struct HostLink {
    uart_port: i32,
}

impl HostLink {
    pub fn new(uart_port: i32) -> Self {
        Self { uart_port }
    }

    pub fn read_byte(&mut self) -> Option<u8> {
        hw_init::uart_read_byte(self.uart_port)
    }

    /// Send `line` terminated by `\n`.
    pub fn write_line(&mut self, line: &str) {
        hw_init::uart_write(self.uart_port, line.as_bytes());
        hw_init::uart_write(self.uart_port, b"\n");
    }
}
