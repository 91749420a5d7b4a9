//! Feedback control: lighting schedule, climate hysteresis, irrigation duty
//! cycle, and the cached actuator bank they all drive.

pub mod actuators;
pub mod climate;
pub mod irrigation;
pub mod lighting;
