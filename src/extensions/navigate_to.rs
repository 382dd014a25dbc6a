//! A `bevy_focus_cam` extension that moves the camera straight to a named focus target, e.g. when
//! a navigation button is clicked.
//!
//! Unlike scrubbing, the transition plays immediately and can't be seeked. It goes through the same
//! transition engine as scrub commits, so a request made while any transition is playing is
//! dropped.

use std::borrow::Cow;

use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
use bevy_log::prelude::*;
use bevy_transform::prelude::*;
use bevy_window::RequestRedraw;

use crate::prelude::*;

/// See the [module](self) docs.
pub struct NavigateToPlugin;

impl Plugin for NavigateToPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<NavigateTo>().add_systems(
            Update,
            NavigateTo::receive.in_set(FocusCamSystems::Navigate),
        );
    }
}

/// Send this event to move the camera to a focus target. The registry's focus is updated once the
/// camera arrives.
#[derive(Debug, Clone, PartialEq, Eq, Event)]
pub struct NavigateTo {
    /// Where to go.
    pub target: TargetRef,
}

impl NavigateTo {
    /// Navigate to the home overview.
    pub fn home() -> Self {
        Self {
            target: TargetRef::Home,
        }
    }

    /// Navigate to the target with this id.
    pub fn id(id: impl Into<Cow<'static, str>>) -> Self {
        Self {
            target: TargetRef::Id(id.into()),
        }
    }

    /// Navigate to the target at this position.
    pub fn index(index: usize) -> Self {
        Self {
            target: TargetRef::Index(index),
        }
    }

    fn receive(
        mut events: EventReader<Self>,
        registry: Res<FocusRegistry>,
        nodes: Query<&GlobalTransform, Without<FocusCam>>,
        mut cameras: Query<(&mut FocusCam, &Transform)>,
        mut redraw: EventWriter<RequestRedraw>,
    ) {
        for event in events.read() {
            let Some(focus) = registry.lookup(&event.target) else {
                warn!("Cannot navigate to unknown focus target {:?}", event.target);
                continue;
            };
            let Some(to) = registry.world_pose(focus, &nodes) else {
                continue;
            };
            let Some((mut controller, transform)) = cameras.iter_mut().next() else {
                continue;
            };
            if controller.navigate(transform, to, focus) {
                debug!("Navigating to {focus:?}");
                redraw.write(RequestRedraw);
            } else {
                debug!("Navigation to {focus:?} dropped, a transition is already playing");
            }
        }
    }
}

impl From<TargetRef> for NavigateTo {
    fn from(target: TargetRef) -> Self {
        Self { target }
    }
}
