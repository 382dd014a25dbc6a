//! A `bevy_focus_cam` extension that decides when to show a "scroll to explore" hint.
//!
//! While the camera rests on home and the visitor hasn't touched the wheel, keyboard or screen for
//! a while, [`ScrollHint::visible`] turns on for a few seconds, then off, and the cycle repeats. Any
//! input restarts the wait. Rendering the hint is left to the app.

use std::time::Duration;

use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
use bevy_input::{
    keyboard::KeyboardInput,
    mouse::MouseWheel,
    touch::{TouchInput, TouchPhase},
};
use bevy_reflect::prelude::*;
use bevy_time::prelude::*;

use crate::prelude::*;

/// See the [module](self) docs.
pub struct ScrollHintPlugin;

impl Plugin for ScrollHintPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScrollHint>()
            .init_resource::<ScrollHintSettings>()
            .add_event::<KeyboardInput>()
            .add_systems(
                Update,
                ScrollHint::update.after(FocusCamSystems::Notify),
            )
            .register_type::<ScrollHint>()
            .register_type::<ScrollHintSettings>();
    }
}

/// Timing of the hint cycle.
#[derive(Debug, Clone, Resource, Reflect)]
#[reflect(Resource)]
pub struct ScrollHintSettings {
    /// How long home must sit idle before the hint appears, and the pause between repeats.
    pub idle_delay: Duration,
    /// How long the hint stays visible each time.
    pub visible_for: Duration,
}

impl Default for ScrollHintSettings {
    fn default() -> Self {
        Self {
            idle_delay: Duration::from_secs(6),
            visible_for: Duration::from_secs(5),
        }
    }
}

/// Time spent in each phase is counted up and compared against the live settings, so changes to
/// [`ScrollHintSettings`] apply to the cycle already in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
enum HintCycle {
    Waiting { elapsed: Duration },
    Showing { elapsed: Duration },
}

impl Default for HintCycle {
    fn default() -> Self {
        HintCycle::Waiting {
            elapsed: Duration::ZERO,
        }
    }
}

/// Whether the scroll hint should currently be shown.
#[derive(Debug, Default, Clone, Resource, Reflect)]
#[reflect(Resource)]
pub struct ScrollHint {
    cycle: HintCycle,
}

impl ScrollHint {
    /// Should the hint be on screen?
    pub fn visible(&self) -> bool {
        matches!(self.cycle, HintCycle::Showing { .. })
    }

    /// Advance the cycle by `delta`.
    pub fn advance(
        &mut self,
        delta: Duration,
        interacted: bool,
        at_home: bool,
        settings: &ScrollHintSettings,
    ) {
        if !at_home || interacted {
            self.cycle = HintCycle::default();
            return;
        }
        self.cycle = match self.cycle {
            HintCycle::Waiting { elapsed } if elapsed + delta >= settings.idle_delay => {
                HintCycle::Showing {
                    elapsed: Duration::ZERO,
                }
            }
            HintCycle::Showing { elapsed } if elapsed + delta >= settings.visible_for => {
                HintCycle::default()
            }
            HintCycle::Waiting { elapsed } => HintCycle::Waiting {
                elapsed: elapsed + delta,
            },
            HintCycle::Showing { elapsed } => HintCycle::Showing {
                elapsed: elapsed + delta,
            },
        };
    }

    fn update(
        mut hint: ResMut<Self>,
        settings: Res<ScrollHintSettings>,
        registry: Res<FocusRegistry>,
        time: Res<Time>,
        mut wheel: EventReader<MouseWheel>,
        mut touches: EventReader<TouchInput>,
        mut keys: EventReader<KeyboardInput>,
    ) {
        // Drain every reader, even when an earlier one already saw input.
        let scrolled = wheel.read().count() > 0;
        let touched = touches
            .read()
            .filter(|touch| touch.phase == TouchPhase::Started)
            .count()
            > 0;
        let typed = keys.read().count() > 0;
        let interacted = scrolled || touched || typed;
        let at_home = registry.current() == Focus::Home;
        // Avoid flagging the resource as changed every frame.
        let mut next = hint.clone();
        next.advance(time.delta(), interacted, at_home, &settings);
        if next.cycle != hint.cycle {
            *hint = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(hint: &mut ScrollHint, millis: u64, interacted: bool, at_home: bool) {
        hint.advance(
            Duration::from_millis(millis),
            interacted,
            at_home,
            &ScrollHintSettings::default(),
        );
    }

    #[test]
    fn appears_after_idling_at_home_then_cycles() {
        let mut hint = ScrollHint::default();
        step(&mut hint, 5_900, false, true);
        assert!(!hint.visible());
        step(&mut hint, 200, false, true);
        assert!(hint.visible());
        step(&mut hint, 5_000, false, true);
        assert!(!hint.visible());
        step(&mut hint, 6_000, false, true);
        assert!(hint.visible());
    }

    #[test]
    fn input_hides_and_restarts_the_wait() {
        let mut hint = ScrollHint::default();
        step(&mut hint, 6_000, false, true);
        assert!(hint.visible());
        step(&mut hint, 16, true, true);
        assert!(!hint.visible());
        step(&mut hint, 5_000, false, true);
        assert!(!hint.visible());
        step(&mut hint, 1_000, false, true);
        assert!(hint.visible());
    }

    #[test]
    fn first_wait_follows_configured_delay() {
        let settings = ScrollHintSettings {
            idle_delay: Duration::from_secs(1),
            visible_for: Duration::from_secs(2),
        };
        let mut hint = ScrollHint::default();
        hint.advance(Duration::from_millis(999), false, true, &settings);
        assert!(!hint.visible());
        hint.advance(Duration::from_millis(1), false, true, &settings);
        assert!(hint.visible());
        hint.advance(Duration::from_secs(2), false, true, &settings);
        assert!(!hint.visible());
    }

    #[test]
    fn hidden_away_from_home() {
        let mut hint = ScrollHint::default();
        step(&mut hint, 6_000, false, true);
        assert!(hint.visible());
        step(&mut hint, 16, false, false);
        assert!(!hint.visible());
        step(&mut hint, 60_000, false, false);
        assert!(!hint.visible());
    }
}
