//! Seekable interpolation plans between two [`WorldPose`]s.

use std::time::Duration;

use bevy_math::curve::{
    easing::{EaseFunction, EasingCurve},
    Curve,
};

use super::pose::WorldPose;

/// How a [`Timeline`] is currently being driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Playback {
    /// Progress only changes through [`Timeline::seek`].
    #[default]
    Paused,
    /// Progress advances with time toward completion.
    Playing,
    /// Reached the end while playing.
    Finished,
    /// Killed; the timeline no longer produces poses.
    Cancelled,
}

/// A paused, seekable plan that moves the camera from one pose to another.
///
/// A timeline is created rewound to progress `0.0` and never moves the camera on its own. It can be
/// scrubbed with [`seek`](Self::seek) any number of times, and later switched to auto-play with
/// [`play`](Self::play), after which [`advance`](Self::advance) drives it to `1.0` over the
/// remaining fraction of its duration.
///
/// The ease curve is applied to progress, so the pose at progress `p` is the same whether `p` was
/// reached by seeking or by playing.
#[derive(Debug, Clone)]
pub struct Timeline {
    from: WorldPose,
    to: WorldPose,
    duration: Duration,
    curve: EasingCurve<f32>,
    progress: f32,
    playback: Playback,
}

impl Timeline {
    /// Build a paused timeline, rewound to the start.
    pub fn new(from: WorldPose, to: WorldPose, duration: Duration, ease: EaseFunction) -> Self {
        Self {
            from,
            to,
            duration,
            curve: EasingCurve::new(0.0, 1.0, ease),
            progress: 0.0,
            playback: Playback::Paused,
        }
    }

    /// The pose this timeline starts from.
    pub fn from(&self) -> WorldPose {
        self.from
    }

    /// The pose this timeline ends at.
    pub fn to(&self) -> WorldPose {
        self.to
    }

    /// Linear progress in `[0, 1]`, before easing.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Current playback state.
    pub fn playback(&self) -> Playback {
        self.playback
    }

    /// Is the timeline auto-playing toward completion?
    pub fn is_playing(&self) -> bool {
        self.playback == Playback::Playing
    }

    /// Has the timeline played through to the end?
    pub fn is_finished(&self) -> bool {
        self.playback == Playback::Finished
    }

    /// The pose at the current progress, or `None` once cancelled.
    pub fn pose(&self) -> Option<WorldPose> {
        (self.playback != Playback::Cancelled).then(|| self.pose_at(self.progress))
    }

    fn pose_at(&self, progress: f32) -> WorldPose {
        let eased = self.curve.sample_clamped(progress);
        self.from.lerp(&self.to, eased)
    }

    /// Jump to `progress` (clamped to `[0, 1]`) and return the pose there.
    ///
    /// Seeking is idempotent. It is ignored while playing or after the timeline finished or was
    /// cancelled, in which case the returned pose is the current one (or `None` when cancelled).
    pub fn seek(&mut self, progress: f32) -> Option<WorldPose> {
        if self.playback == Playback::Paused {
            self.progress = progress.clamp(0.0, 1.0);
        }
        self.pose()
    }

    /// Stop manual seeking and play from the current progress to the end.
    pub fn play(&mut self) {
        if self.playback == Playback::Paused {
            self.playback = Playback::Playing;
        }
    }

    /// Advance a playing timeline by `delta` and return the new pose. Paused timelines don't move.
    pub fn advance(&mut self, delta: Duration) -> Option<WorldPose> {
        if self.playback == Playback::Playing {
            let step = if self.duration.is_zero() {
                1.0
            } else {
                delta.as_secs_f32() / self.duration.as_secs_f32()
            };
            self.progress = (self.progress + step).min(1.0);
            if self.progress >= 1.0 {
                self.playback = Playback::Finished;
            }
        }
        self.pose()
    }

    /// Kill the timeline. It stops producing poses and can't be restarted.
    pub fn cancel(&mut self) {
        self.playback = Playback::Cancelled;
    }
}
