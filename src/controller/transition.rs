//! The transition engine: owns the single camera motion allowed to play at a time.

use std::time::Duration;

use bevy_log::prelude::*;
use bevy_math::curve::easing::EaseFunction;

use super::{pose::WorldPose, registry::Focus, timeline::Timeline};

/// Duration and curve used for camera transitions.
#[derive(Debug, Clone, Copy)]
pub struct TransitionSettings {
    /// How long a full transition between two targets takes.
    pub duration: Duration,
    /// The curve applied to transition progress.
    pub ease: EaseFunction,
}

impl Default for TransitionSettings {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(1500),
            ease: EaseFunction::CubicInOut,
        }
    }
}

impl TransitionSettings {
    /// Build a paused, seekable timeline between two poses without moving the camera. Always
    /// accepted, regardless of whether a transition is active.
    pub fn controlled_transition(&self, from: WorldPose, to: WorldPose) -> Timeline {
        Timeline::new(from, to, self.duration, self.ease)
    }
}

/// What happened to the active transition during one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionTick {
    /// Still moving. The camera should be placed at this pose.
    Moving(WorldPose),
    /// Reached the end. The camera should be placed at `pose`, after which `settles_at`, if any,
    /// becomes the authoritative focus.
    Finished {
        /// The final pose.
        pose: WorldPose,
        /// The focus the registry should record now that the motion is over.
        settles_at: Option<Focus>,
    },
}

#[derive(Debug, Clone)]
struct ActiveTransition {
    timeline: Timeline,
    settles_at: Option<Focus>,
}

/// Plays at most one camera transition at a time.
///
/// Both fire-and-forget transitions and played-out scrub timelines go through here, so a single
/// active flag arbitrates between every source of camera motion. A request made while a transition
/// is active is dropped; it does not queue behind, interrupt, or replace the current one.
#[derive(Debug, Clone, Default)]
pub struct TransitionEngine {
    active: Option<ActiveTransition>,
}

impl TransitionEngine {
    /// Is a transition currently playing?
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The focus the active transition will settle at, if any.
    pub fn pending_focus(&self) -> Option<Focus> {
        self.active.as_ref().and_then(|active| active.settles_at)
    }

    /// Start an eased transition from the camera's live pose to `to`, settling at `settles_at` on
    /// completion. Returns `false`, without side effects, if a transition is already active.
    pub fn transition(
        &mut self,
        from: WorldPose,
        to: WorldPose,
        settings: &TransitionSettings,
        settles_at: Option<Focus>,
    ) -> bool {
        self.play(settings.controlled_transition(from, to), settles_at)
    }

    /// Switch a controlled timeline to auto-play and make it the active transition. Returns
    /// `false`, leaving the timeline untouched, if a transition is already active.
    pub fn play(&mut self, mut timeline: Timeline, settles_at: Option<Focus>) -> bool {
        if self.active.is_some() {
            debug!("Camera transition already in progress, dropping request");
            return false;
        }
        timeline.play();
        if !timeline.is_playing() {
            debug!("Timeline was not playable, dropping request");
            return false;
        }
        self.active = Some(ActiveTransition {
            timeline,
            settles_at,
        });
        true
    }

    /// Advance the active transition. Returns `None` when nothing is playing.
    pub fn advance(&mut self, delta: Duration) -> Option<TransitionTick> {
        let active = self.active.as_mut()?;
        let Some(pose) = active.timeline.advance(delta) else {
            self.active = None;
            return None;
        };
        if !active.timeline.is_finished() {
            return Some(TransitionTick::Moving(pose));
        }
        let settles_at = active.settles_at;
        self.active = None;
        Some(TransitionTick::Finished { pose, settles_at })
    }
}
