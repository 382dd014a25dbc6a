//! The core focus camera controller: targets, transitions and scrubbing.

use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
use bevy_input::{mouse::MouseWheel, touch::TouchInput};
use bevy_window::RequestRedraw;

pub mod component;
pub mod inputs;
pub mod pose;
pub mod registry;
pub mod scrub;
pub mod timeline;
pub mod transition;

/// Ordering of the controller's work within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SystemSet)]
pub enum FocusCamSystems {
    /// Raw input is accumulated into scrub velocity.
    Input,
    /// Discrete navigation requests start transitions.
    Navigate,
    /// Transitions and scrubbing advance and the camera is moved.
    Animate,
    /// Observers are told about settled focus changes.
    Notify,
}

/// Adds the [`FocusRegistry`](registry::FocusRegistry) and drives every
/// [`FocusCam`](component::FocusCam) each frame.
pub struct FocusCamPlugin;

impl Plugin for FocusCamPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<registry::FocusRegistry>()
            .add_event::<registry::FocusChanged>()
            .add_event::<RequestRedraw>()
            .add_event::<MouseWheel>()
            .add_event::<TouchInput>()
            .configure_sets(
                Update,
                (
                    FocusCamSystems::Input,
                    FocusCamSystems::Navigate,
                    FocusCamSystems::Animate,
                    FocusCamSystems::Notify,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    (inputs::sync_page_height, inputs::send_scrub_inputs)
                        .chain()
                        .in_set(FocusCamSystems::Input),
                    component::FocusCam::update_camera_positions.in_set(FocusCamSystems::Animate),
                    registry::FocusChanged::notify.in_set(FocusCamSystems::Notify),
                ),
            )
            .register_type::<registry::FocusRegistry>();
    }
}
