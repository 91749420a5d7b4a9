//! Front panel buttons.
//!
//! Both buttons sit on analog inputs (a resistor ladder on the display
//! board pulls a channel low while its button is held). The driver returns
//! levels rescaled to 10 bits; deciding what counts as pressed is left to
//! [`ui::buttons`](crate::ui::buttons).
//!
//! No debounce: the control loop samples every 100 ms, far slower than
//! contact bounce.

use crate::drivers::hw_init;

/// Level reported for a channel whose ADC read fails: reads as released.
const RELEASED_LEVEL: u16 = 1023;

pub struct ButtonPanel {
    right_channel: u32,
    left_channel: u32,
}

impl ButtonPanel {
    pub fn new(right_channel: u32, left_channel: u32) -> Self {
        Self { right_channel, left_channel }
    }

    /// `(right, left)` levels on a 10-bit scale.
    pub fn read_levels(&mut self) -> (u16, u16) {
        (self.level(self.right_channel), self.level(self.left_channel))
    }

    fn level(&self, channel: u32) -> u16 {
        hw_init::adc1_read(channel).map_or(RELEASED_LEVEL, |raw| raw >> 2)
    }
}
