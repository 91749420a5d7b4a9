//! Front panel: button decoding, local interaction modes and the display
//! page rotation.

pub mod buttons;
pub mod local;
pub mod rotation;
