//! Application core: domain logic behind port traits.
//!
//! The business rules of the germination unit (boot handshake, host
//! commands, climate, irrigation and lighting schedules, the local
//! panel) live here and in the modules they orchestrate. Hardware is
//! reached only through the traits in [`ports`].

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
pub mod state;
pub mod store;
