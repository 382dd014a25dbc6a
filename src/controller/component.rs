//! The primary [`Component`] of the controller, [`FocusCam`].

use bevy_ecs::prelude::*;
use bevy_log::prelude::*;
use bevy_time::prelude::*;
use bevy_transform::prelude::*;
use bevy_window::RequestRedraw;

use super::{
    pose::WorldPose,
    registry::{Focus, FocusRegistry},
    scrub::{ScrollUnit, ScrubPhase, ScrubSettings, Scrubber},
    transition::{TransitionEngine, TransitionSettings, TransitionTick},
};

/// Tracks all state of a camera's focus navigation, including its settings, the active transition,
/// and scrub progress.
///
/// Add it to the camera entity. The [`FocusCamPlugin`](crate::controller::FocusCamPlugin) feeds
/// wheel and touch input to it and moves the camera every frame it has something to do, sending a
/// [`RequestRedraw`] each time so reactive (demand-driven) rendering keeps up.
///
/// # Moving the Camera
///
/// Camera motion comes from exactly two places, and only one motion can play at a time:
///
/// 1. Scrubbing, from [`FocusCam::send_wheel_input`] and [`FocusCam::send_touch_input`].
/// 2. Direct navigation, from [`FocusCam::navigate`], usually through the
///    [`NavigateTo`](crate::extensions::navigate_to::NavigateTo) event.
///
/// The settled focus is recorded in the [`FocusRegistry`] only once the motion has finished.
#[derive(Debug, Clone, Default, Component)]
#[require(Transform)]
pub struct FocusCam {
    /// Duration and easing of camera transitions.
    pub transition: TransitionSettings,
    /// Input sensitivity, damping and commit threshold of scrubbing.
    pub scrub: ScrubSettings,
    engine: TransitionEngine,
    scrubber: Scrubber,
}

impl FocusCam {
    /// Create a new focus camera component.
    pub fn new(transition: TransitionSettings, scrub: ScrubSettings) -> Self {
        Self {
            transition,
            scrub,
            ..Default::default()
        }
    }

    /// Is a camera transition, scrub commit or direct navigation, currently playing?
    pub fn is_transitioning(&self) -> bool {
        self.engine.is_active()
    }

    /// The focus the playing transition will settle at.
    pub fn pending_focus(&self) -> Option<Focus> {
        self.engine.pending_focus()
    }

    /// The scrub state machine's current phase.
    pub fn scrub_phase(&self) -> ScrubPhase {
        self.scrubber.phase()
    }

    /// Signed scrub progress toward the next (`+`) or previous (`-`) target.
    pub fn scrub_progress(&self) -> f32 {
        self.scrubber.progress()
    }

    /// Accumulated scrub velocity.
    pub fn scrub_velocity(&self) -> f32 {
        self.scrubber.velocity()
    }

    /// Send a wheel scroll amount. Positive values move toward the next target.
    pub fn send_wheel_input(&mut self, delta: f32, unit: ScrollUnit) {
        self.scrubber
            .push_wheel(delta, unit, &self.scrub, &self.engine);
    }

    /// Send a vertical touch drag in pixels. Positive values (finger moving up) move toward the
    /// next target.
    pub fn send_touch_input(&mut self, delta: f32) {
        self.scrubber.push_touch(delta, &self.scrub, &self.engine);
    }

    /// Re-resolve every target and replan scrubbing on the next frame, e.g. after moving a node
    /// that the registry has no way to know about.
    pub fn refresh(&mut self) {
        self.scrubber.invalidate();
    }

    /// Start a transition from the camera's live pose to `to`, settling the registry at `focus`
    /// when it completes. Returns `false` if another transition is already playing.
    pub fn navigate(&mut self, camera: &Transform, to: WorldPose, focus: Focus) -> bool {
        let from = WorldPose::from_camera(camera);
        self.engine
            .transition(from, to, &self.transition, Some(focus))
    }

    /// Advance transitions and scrubbing for all focus cameras. Called once per frame.
    pub fn update_camera_positions(
        mut cameras: Query<(&mut FocusCam, &mut Transform)>,
        nodes: Query<&GlobalTransform, Without<FocusCam>>,
        mut registry: ResMut<FocusRegistry>,
        mut redraw: EventWriter<RequestRedraw>,
        time: Res<Time>,
    ) {
        let mut cameras = cameras.iter_mut();
        let Some((mut controller, mut transform)) = cameras.next() else {
            return;
        };
        if cameras.next().is_some() {
            warn_once!("More than one FocusCam found; only the first is driven");
        }

        let controller = &mut *controller;
        let pose = match controller.engine.advance(time.delta()) {
            Some(TransitionTick::Moving(pose)) => Some(pose),
            Some(TransitionTick::Finished { pose, settles_at }) => {
                if let Some(focus) = settles_at {
                    registry.set_current(focus);
                    info!("Camera focus settled at {focus:?}");
                }
                // Plan the next scrub step against the new focus before anything else can read it.
                controller
                    .scrubber
                    .rebuild(&registry, &nodes, &controller.transition);
                Some(pose)
            }
            None => controller.scrubber.tick(
                &registry,
                &nodes,
                &mut controller.engine,
                &controller.scrub,
                &controller.transition,
            ),
        };

        if let Some(pose) = pose {
            pose.apply_to(&mut transform);
            redraw.write(RequestRedraw);
        }
    }
}
