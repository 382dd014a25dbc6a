//! Camera focus navigation for scenes with a handful of points of interest.
//!
//! A [`FocusRegistry`](controller::registry::FocusRegistry) holds an ordered list of focus targets,
//! each an offset pair attached to a scene node. The camera moves between them two ways:
//!
//! - **Scrubbing**: wheel and touch input drag the camera partway toward the next or previous
//!   target, following a pre-built timeline. Past a threshold the move commits and plays out.
//! - **Direct navigation**: a [`NavigateTo`](extensions::navigate_to::NavigateTo) event, e.g. from a
//!   nav bar button, plays a transition straight to any target.
//!
//! Only one camera motion plays at a time, and the registry records a new focus only once the
//! camera has arrived.
//!
//! ## Usage
//!
//! ```rust,ignore
//! App::new()
//!     .add_plugins((DefaultPlugins, DefaultFocusCamPlugins))
//!     .add_systems(Startup, |mut commands: Commands, mut registry: ResMut<FocusRegistry>| {
//!         commands.spawn((Camera3d::default(), FocusCam::default()));
//!         registry.set_targets(vec![
//!             FocusTarget::new("sign", Vec3::new(-0.55, 0.61, 1.5), Vec3::new(0.0, 0.15, 0.0)),
//!         ]);
//!     });
//! ```

use bevy_app::{PluginGroup, PluginGroupBuilder};

pub mod controller;
pub mod extensions;

/// Common imports.
pub mod prelude {
    pub use crate::{
        controller::{
            component::FocusCam,
            pose::{resolve_pose, NodeTransforms, WorldPose},
            registry::{Focus, FocusChanged, FocusPoses, FocusRegistry, FocusTarget, TargetRef},
            scrub::{ScrollUnit, ScrubDirection, ScrubPhase, ScrubSettings},
            timeline::Timeline,
            transition::TransitionSettings,
            FocusCamPlugin, FocusCamSystems,
        },
        extensions::navigate_to::NavigateTo,
        DefaultFocusCamPlugins,
    };
}

/// Adds the focus camera controller and every enabled extension.
pub struct DefaultFocusCamPlugins;

impl PluginGroup for DefaultFocusCamPlugins {
    fn build(self) -> PluginGroupBuilder {
        let group = PluginGroupBuilder::start::<Self>()
            .add(controller::FocusCamPlugin)
            .add(extensions::navigate_to::NavigateToPlugin);

        #[cfg(feature = "extension_scroll_hint")]
        let group = group.add(extensions::scroll_hint::ScrollHintPlugin);

        #[cfg(feature = "extension_click_to_focus")]
        let group = group.add(extensions::click_to_focus::ClickToFocusPlugin);

        #[cfg(feature = "extension_target_indicator")]
        let group = group.add(extensions::target_indicator::TargetIndicatorPlugin);

        group
    }
}
