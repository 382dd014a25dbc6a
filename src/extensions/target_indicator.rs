//! A `bevy_focus_cam` extension that draws every focus target's camera placement in the scene.
//! Each target gets a small sphere where the camera would sit and a ray to the point it would look
//! at. This makes it much easier to tune offsets.

use bevy_app::prelude::*;
use bevy_color::Color;
use bevy_ecs::prelude::*;
use bevy_gizmos::prelude::*;
use bevy_math::prelude::*;
use bevy_reflect::prelude::*;
use bevy_transform::{prelude::*, TransformSystem};

use crate::prelude::*;

/// See the [module](self) docs.
pub struct TargetIndicatorPlugin;

impl Plugin for TargetIndicatorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TargetIndicator>()
            .add_systems(
                PostUpdate,
                draw_targets.after(TransformSystem::TransformPropagate),
            )
            .register_type::<TargetIndicator>();
    }
}

/// Configures whether target indicators are drawn. Disabled by default.
#[derive(Debug, Default, Resource, Reflect)]
#[reflect(Resource)]
pub struct TargetIndicator {
    /// Should the indicators be drawn?
    pub enabled: bool,
}

/// One target's indicator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetMarker {
    /// Which focus this marker belongs to.
    pub focus: Focus,
    /// Where that focus would place the camera.
    pub pose: WorldPose,
    /// Is the camera settled on it?
    pub current: bool,
}

/// Resolve a marker for home and every target.
pub fn target_markers(registry: &FocusRegistry, nodes: &impl NodeTransforms) -> Vec<TargetMarker> {
    std::iter::once(Focus::Home)
        .chain((0..registry.targets().len()).map(Focus::Target))
        .filter_map(|focus| {
            Some(TargetMarker {
                focus,
                pose: registry.world_pose(focus, nodes)?,
                current: registry.current() == focus,
            })
        })
        .collect()
}

/// Use gizmos to draw each target's camera pose in world space.
pub fn draw_targets(
    indicator: Res<TargetIndicator>,
    registry: Res<FocusRegistry>,
    nodes: Query<&GlobalTransform>,
    mut gizmos: Gizmos,
) {
    if !indicator.enabled {
        return;
    }
    for marker in target_markers(&registry, &nodes) {
        let color = if marker.current {
            Color::srgb(1.0, 0.85, 0.2)
        } else {
            Color::srgb(1.0, 1.0, 1.0)
        };
        let WorldPose {
            camera_pos,
            look_at,
        } = marker.pose;
        gizmos.sphere(Isometry3d::from_translation(camera_pos), 0.1, color);
        gizmos.line(camera_pos, look_at, color);
    }
}
