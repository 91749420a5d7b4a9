//! Two-button decoding.

/// What the operator is pressing this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    None,
    Left,
    Right,
    Both,
}

impl ButtonAction {
    pub fn from_pressed(left: bool, right: bool) -> Self {
        match (left, right) {
            (false, false) => Self::None,
            (true, false) => Self::Left,
            (false, true) => Self::Right,
            (true, true) => Self::Both,
        }
    }

    /// Decode raw analog levels; a channel below `threshold` is pressed.
    pub fn from_levels(right_level: u16, left_level: u16, threshold: u16) -> Self {
        Self::from_pressed(left_level < threshold, right_level < threshold)
    }
}
