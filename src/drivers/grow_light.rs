//! RGB grow light driver.
//!
//! Three LEDC PWM channels (CH0-2) switch the red, green and blue strips
//! through logic-level MOSFETs.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives three LEDC PWM channels via hw_init.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;

pub struct GrowLight {
    current: (u8, u8, u8),
}

impl GrowLight {
    pub fn new() -> Self {
        Self { current: (0, 0, 0) }
    }

    pub fn set_duties(&mut self, r: u8, g: u8, b: u8) {
        hw_init::ledc_set(hw_init::LEDC_CH_LED_R, r);
        hw_init::ledc_set(hw_init::LEDC_CH_LED_G, g);
        hw_init::ledc_set(hw_init::LEDC_CH_LED_B, b);
        self.current = (r, g, b);
    }

    pub fn current_duties(&self) -> (u8, u8, u8) {
        self.current
    }
}

impl Default for GrowLight {
    fn default() -> Self {
        Self::new()
    }
}
