//! Local button interface.
//!
//! Two overlapping modes driven by the front panel buttons:
//!
//! - **inspect**: while the right button is held the green channel is
//!   forced to full so the operator can look at the seedlings; releasing
//!   (or pressing both) restores the scheduled light;
//! - **display**: a left press refreshes the probes and starts the page
//!   rotation.
//!
//! Only one transition is taken per tick, checked in this order: both,
//! left, right, none.

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::app::state::{ControllerState, LiveReadings};

use super::buttons::ButtonAction;

/// Transition taken this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiTransition {
    InspectStarted,
    InspectCancelled,
    RotationStarted,
}

/// Apply one tick's button action, returning the transition taken.
pub fn apply<H: ActuatorPort + SensorPort>(
    action: ButtonAction,
    state: &mut ControllerState,
    hw: &mut H,
) -> Option<UiTransition> {
    let inspecting = state.actuators.is_inspecting();
    let transition = match action {
        ButtonAction::Both if inspecting => {
            state.actuators.set_inspect(hw, false);
            UiTransition::InspectCancelled
        }
        ButtonAction::Left if !state.rotation.is_active() => {
            state.readings = LiveReadings::sample(hw);
            state.rotation.activate();
            UiTransition::RotationStarted
        }
        ButtonAction::Right if !inspecting => {
            state.actuators.set_inspect(hw, true);
            UiTransition::InspectStarted
        }
        ButtonAction::None if inspecting => {
            state.actuators.set_inspect(hw, false);
            UiTransition::InspectCancelled
        }
        _ => return None,
    };
    Some(transition)
}
