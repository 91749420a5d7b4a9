//! Cooling fan driver, LEDC PWM on CH3.

use crate::drivers::hw_init;

pub struct FanDriver {
    duty: u8,
}

impl FanDriver {
    pub fn new() -> Self {
        Self { duty: 0 }
    }

    /// Set the 8-bit PWM duty (0 = stopped, 255 = full speed).
    pub fn set_duty(&mut self, duty: u8) {
        hw_init::ledc_set(hw_init::LEDC_CH_FAN, duty);
        self.duty = duty;
    }

    pub fn duty(&self) -> u8 {
        self.duty
    }
}

impl Default for FanDriver {
    fn default() -> Self {
        Self::new()
    }
}
