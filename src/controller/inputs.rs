//! Translates raw wheel and touch events into scrub input for [`FocusCam`]s.

use bevy_ecs::prelude::*;
use bevy_input::{
    mouse::{MouseScrollUnit, MouseWheel},
    touch::{TouchInput, TouchPhase},
};
use bevy_platform::collections::HashMap;
use bevy_window::{PrimaryWindow, Window};

use super::{component::FocusCam, scrub::ScrollUnit};

impl From<MouseScrollUnit> for ScrollUnit {
    fn from(unit: MouseScrollUnit) -> Self {
        match unit {
            MouseScrollUnit::Line => ScrollUnit::Line,
            MouseScrollUnit::Pixel => ScrollUnit::Pixel,
        }
    }
}

/// The scrub amount of a wheel event. Scrolling down (negative `y`) moves toward the next target.
pub fn wheel_delta(event: &MouseWheel) -> (f32, ScrollUnit) {
    (-event.y, event.unit.into())
}

/// Last seen vertical position of each finger currently on the screen.
#[derive(Debug, Default)]
pub struct TouchTracker {
    last_y: HashMap<u64, f32>,
}

impl TouchTracker {
    /// Record a touch event, returning the upward drag in pixels since that finger's last event.
    pub fn process(&mut self, event: &TouchInput) -> Option<f32> {
        let y = event.position.y;
        match event.phase {
            TouchPhase::Started => {
                self.last_y.insert(event.id, y);
                None
            }
            TouchPhase::Moved => {
                let last = self.last_y.insert(event.id, y)?;
                // Window coordinates grow downward, so a finger moving up yields a positive drag.
                Some(last - y)
            }
            TouchPhase::Ended | TouchPhase::Canceled => {
                self.last_y.remove(&event.id);
                None
            }
        }
    }
}

/// Feed wheel and touch events to the driven [`FocusCam`]. Like the camera update, only the first
/// camera is fed.
pub fn send_scrub_inputs(
    mut wheel: EventReader<MouseWheel>,
    mut touches: EventReader<TouchInput>,
    mut tracker: Local<TouchTracker>,
    mut cameras: Query<&mut FocusCam>,
) {
    let wheel_deltas: Vec<_> = wheel.read().map(wheel_delta).collect();
    let touch_deltas: Vec<_> = touches
        .read()
        .filter_map(|event| tracker.process(event))
        .collect();
    if wheel_deltas.is_empty() && touch_deltas.is_empty() {
        return;
    }
    let Some(mut controller) = cameras.iter_mut().next() else {
        return;
    };
    for (delta, unit) in wheel_deltas {
        controller.send_wheel_input(delta, unit);
    }
    for delta in touch_deltas {
        controller.send_touch_input(delta);
    }
}

/// Keep [`ScrubSettings::page_height`](super::scrub::ScrubSettings::page_height) equal to the
/// primary window's logical height, so page-unit scrolls move one viewport.
pub fn sync_page_height(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut cameras: Query<&mut FocusCam>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let height = window.height();
    if height <= 0.0 {
        return;
    }
    for mut controller in &mut cameras {
        if controller.scrub.page_height != height {
            controller.scrub.page_height = height;
        }
    }
}
