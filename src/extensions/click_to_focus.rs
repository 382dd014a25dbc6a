//! A `bevy_focus_cam` extension that focuses a target when its scene node is clicked.
//!
//! Clicks bubble up the hierarchy, so clicking any mesh under a target's node counts. Clicking the
//! target the camera is already settled on does nothing, leaving the click to whatever interaction
//! that object has once focused.

use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
use bevy_picking::{
    events::{Click, Pointer},
    pointer::PointerButton,
};

use crate::prelude::*;

/// See the [module](self) docs.
pub struct ClickToFocusPlugin;

impl Plugin for ClickToFocusPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<NavigateTo>().add_observer(focus_clicked_target);
    }
}

/// The navigation a click on `node` should cause, if any.
pub fn click_navigation(registry: &FocusRegistry, node: Entity) -> Option<NavigateTo> {
    let focus = registry.focus_for_node(node)?;
    (focus != registry.current()).then(|| TargetRef::from(focus).into())
}

fn focus_clicked_target(
    mut trigger: Trigger<Pointer<Click>>,
    registry: Res<FocusRegistry>,
    mut navigate: EventWriter<NavigateTo>,
) {
    if trigger.event().button != PointerButton::Primary {
        return;
    }
    if registry.focus_for_node(trigger.target()).is_none() {
        return;
    }
    trigger.propagate(false);
    if let Some(request) = click_navigation(&registry, trigger.target()) {
        navigate.write(request);
    }
}
