//! Scroll and touch scrubbing between neighbouring focus targets.
//!
//! Raw input accumulates into a single velocity. Every tick the velocity is integrated into a
//! signed progress toward the next (`+`) or previous (`-`) target, the matching pre-built
//! [`Timeline`] is seeked to that progress, and the velocity decays. Once progress crosses the
//! commit threshold the timeline is handed to the [`TransitionEngine`] to play out, and the
//! registry's focus is stepped only when that transition completes.

use bevy_log::prelude::*;

use super::{
    pose::{NodeTransforms, WorldPose},
    registry::{Focus, FocusRegistry},
    timeline::Timeline,
    transition::{TransitionEngine, TransitionSettings},
};

/// Sensitivity, damping and commit behavior of scrubbing.
#[derive(Debug, Clone, Copy)]
pub struct ScrubSettings {
    /// Progress added per pixel of wheel scroll.
    pub wheel_sensitivity: f32,
    /// Progress added per pixel of vertical touch drag.
    pub touch_sensitivity: f32,
    /// Fraction of velocity kept after each tick.
    pub damping: f32,
    /// Progress, in either direction, at which a scrub commits to the neighbouring target.
    pub commit_threshold: f32,
    /// Pixels per line, for wheels that report in lines.
    pub line_height: f32,
    /// Pixels per page, for wheels that report in pages. Kept equal to the primary window's height
    /// by the [`FocusCamPlugin`](super::FocusCamPlugin); only used as-is when there is no window.
    pub page_height: f32,
    /// Velocities at or below this don't move the camera. They are kept, so further input adds
    /// to them.
    pub rest_velocity: f32,
}

impl Default for ScrubSettings {
    fn default() -> Self {
        Self {
            wheel_sensitivity: 0.000_07,
            touch_sensitivity: 0.000_2,
            damping: 0.5,
            commit_threshold: 0.2,
            line_height: 16.0,
            page_height: 800.0,
            rest_velocity: 1e-4,
        }
    }
}

/// The granularity a wheel delta is reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollUnit {
    /// Pixel-equivalents, e.g. a trackpad.
    Pixel,
    /// Lines of text, e.g. a notched mouse wheel.
    Line,
    /// Whole pages.
    Page,
}

/// Which neighbour a scrub is heading toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrubDirection {
    /// Toward the next target.
    Forward,
    /// Toward the previous target, or home.
    Backward,
}

/// Where the scrubber is in its per-step state machine.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ScrubPhase {
    /// At rest on the settled focus.
    #[default]
    Idle,
    /// Being dragged partway toward a neighbour.
    Scrubbing(ScrubDirection),
    /// Crossed the threshold; the timeline is playing out in the transition engine.
    Committing(ScrubDirection),
}

/// Identifies the registry state a pair of timelines was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BuiltFor {
    focus: Focus,
    revision: u64,
}

/// Scrub state for one camera.
#[derive(Debug, Clone, Default)]
pub struct Scrubber {
    velocity: f32,
    progress: f32,
    phase: ScrubPhase,
    forward: Option<Timeline>,
    backward: Option<Timeline>,
    built_for: Option<BuiltFor>,
}

impl Scrubber {
    /// Accumulated input velocity, in progress per tick.
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Signed progress toward the next (`+`) or previous (`-`) target.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// The current state of the scrub state machine.
    pub fn phase(&self) -> ScrubPhase {
        self.phase
    }

    /// Is there a neighbour in this direction to scrub toward?
    pub fn can_scrub(&self, direction: ScrubDirection) -> bool {
        match direction {
            ScrubDirection::Forward => self.forward.is_some(),
            ScrubDirection::Backward => self.backward.is_some(),
        }
    }

    /// Feed a wheel delta. Positive values scroll toward the next target. Ignored while a
    /// transition is playing.
    pub fn push_wheel(
        &mut self,
        delta: f32,
        unit: ScrollUnit,
        settings: &ScrubSettings,
        engine: &TransitionEngine,
    ) {
        let pixels = match unit {
            ScrollUnit::Pixel => delta,
            ScrollUnit::Line => delta * settings.line_height,
            ScrollUnit::Page => delta * settings.page_height,
        };
        self.push(pixels * settings.wheel_sensitivity, engine);
    }

    /// Feed a vertical touch drag in pixels. Positive values (finger moving up) scrub toward the
    /// next target. Ignored while a transition is playing.
    pub fn push_touch(&mut self, delta: f32, settings: &ScrubSettings, engine: &TransitionEngine) {
        self.push(delta * settings.touch_sensitivity, engine);
    }

    fn push(&mut self, velocity: f32, engine: &TransitionEngine) {
        if engine.is_active() || !velocity.is_finite() {
            return;
        }
        self.velocity += velocity;
    }

    /// Force the timelines to be rebuilt on the next tick.
    pub fn invalidate(&mut self) {
        self.built_for = None;
    }

    /// Discard any stale timelines and plan new ones around the registry's current focus,
    /// resolving every endpoint against the scene as it is now. Resets progress and velocity.
    pub fn rebuild(
        &mut self,
        registry: &FocusRegistry,
        nodes: &impl NodeTransforms,
        settings: &TransitionSettings,
    ) {
        for timeline in [self.forward.as_mut(), self.backward.as_mut()]
            .into_iter()
            .flatten()
        {
            timeline.cancel();
        }

        let current = registry.current();
        let plan = |neighbour: Option<Focus>| -> Option<Timeline> {
            let from = registry.world_pose(current, nodes)?;
            let to = registry.world_pose(neighbour?, nodes)?;
            Some(settings.controlled_transition(from, to))
        };
        self.forward = plan(current.next(registry.targets().len()));
        self.backward = plan(current.prev());
        self.progress = 0.0;
        self.velocity = 0.0;
        self.phase = ScrubPhase::Idle;
        self.built_for = Some(BuiltFor {
            focus: current,
            revision: registry.revision(),
        });
        debug!(
            "Rebuilt scrub timelines around {current:?} (forward: {}, backward: {})",
            self.forward.is_some(),
            self.backward.is_some()
        );
    }

    /// Advance the scrub by one tick. Returns the pose the camera should take, if scrubbing moved
    /// it this tick.
    ///
    /// Does nothing while the engine is playing a transition. Otherwise, timelines are first
    /// rebuilt if the registry's focus or targets changed since they were planned.
    pub fn tick(
        &mut self,
        registry: &FocusRegistry,
        nodes: &impl NodeTransforms,
        engine: &mut TransitionEngine,
        settings: &ScrubSettings,
        transition: &TransitionSettings,
    ) -> Option<WorldPose> {
        if engine.is_active() {
            return None;
        }
        let built_for = BuiltFor {
            focus: registry.current(),
            revision: registry.revision(),
        };
        if self.built_for != Some(built_for) {
            // Progress belonged to the stale plans, but input that just arrived still counts.
            let velocity = self.velocity;
            self.rebuild(registry, nodes, transition);
            self.velocity = velocity;
        }

        // Velocity at rest is kept, not cleared, so slow input builds up until it moves the camera.
        if self.velocity.abs() <= settings.rest_velocity {
            return None;
        }
        let pose = self.integrate();
        self.velocity *= settings.damping;
        self.maybe_commit(registry, engine, settings);
        pose
    }

    fn integrate(&mut self) -> Option<WorldPose> {
        let upper = if self.forward.is_some() { 1.0 } else { 0.0 };
        let lower = if self.backward.is_some() { -1.0 } else { 0.0 };
        self.progress = (self.progress + self.velocity).clamp(lower, upper);

        if self.progress > 0.0 {
            self.phase = ScrubPhase::Scrubbing(ScrubDirection::Forward);
            self.forward.as_mut()?.seek(self.progress)
        } else if self.progress < 0.0 {
            self.phase = ScrubPhase::Scrubbing(ScrubDirection::Backward);
            self.backward.as_mut()?.seek(-self.progress)
        } else {
            self.phase = ScrubPhase::Idle;
            self.forward
                .as_mut()
                .or(self.backward.as_mut())?
                .seek(0.0)
        }
    }

    fn maybe_commit(
        &mut self,
        registry: &FocusRegistry,
        engine: &mut TransitionEngine,
        settings: &ScrubSettings,
    ) {
        let current = registry.current();
        let (direction, timeline, settles_at) = if self.progress >= settings.commit_threshold {
            (
                ScrubDirection::Forward,
                &mut self.forward,
                current.next(registry.targets().len()),
            )
        } else if self.progress <= -settings.commit_threshold {
            (ScrubDirection::Backward, &mut self.backward, current.prev())
        } else {
            return;
        };
        let (Some(plan), Some(settles_at)) = (timeline.take(), settles_at) else {
            return;
        };
        if engine.play(plan, Some(settles_at)) {
            debug!("Scrub committed {direction:?} toward {settles_at:?}");
            self.velocity = 0.0;
            self.phase = ScrubPhase::Committing(direction);
        }
    }
}
