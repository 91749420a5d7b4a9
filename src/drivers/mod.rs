//! Peripheral drivers and hardware initialisation.

pub mod buttons;
pub mod fan;
pub mod grow_light;
pub mod host_link;
pub mod hw_init;
pub mod lcd;
pub mod relay;
