//! Resolves focus targets into world-space camera poses.
//!
//! A target's offsets are expressed in the local rotated frame of its scene node. Resolution reads
//! the node's *current* [`GlobalTransform`], so a node that rotates between frames (an idle
//! animation, a floating island) carries its camera placement with it. Nothing here caches: every
//! call reflects the scene graph as it is right now.

use bevy_ecs::{prelude::*, query::QueryFilter};
use bevy_math::prelude::*;
use bevy_platform::collections::HashMap;
use bevy_reflect::prelude::*;
use bevy_transform::prelude::*;

/// A camera position and the point it looks at, both in absolute world coordinates.
#[derive(Debug, Default, Clone, Copy, PartialEq, Reflect)]
pub struct WorldPose {
    /// Where the camera sits.
    pub camera_pos: Vec3,
    /// The point the camera faces.
    pub look_at: Vec3,
}

impl WorldPose {
    /// Create a pose from a camera position and look-at point.
    pub const fn new(camera_pos: Vec3, look_at: Vec3) -> Self {
        Self {
            camera_pos,
            look_at,
        }
    }

    /// The live pose of a camera: its translation, and the point one unit along its forward
    /// direction.
    pub fn from_camera(transform: &Transform) -> Self {
        Self {
            camera_pos: transform.translation,
            look_at: transform.translation + *transform.forward(),
        }
    }

    /// Linearly interpolate both the position and the look-at point.
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            camera_pos: self.camera_pos.lerp(other.camera_pos, t),
            look_at: self.look_at.lerp(other.look_at, t),
        }
    }

    /// Write this pose into a camera transform, keeping world +Y as up.
    pub fn apply_to(&self, transform: &mut Transform) {
        transform.translation = self.camera_pos;
        // Degenerate when the look-at point coincides with the position; keep the old rotation.
        if self.look_at.distance_squared(self.camera_pos) > f32::EPSILON {
            transform.look_at(self.look_at, Vec3::Y);
        }
    }

    /// Compare both points within `max_abs_diff`.
    pub fn abs_diff_eq(&self, other: &Self, max_abs_diff: f32) -> bool {
        self.camera_pos.abs_diff_eq(other.camera_pos, max_abs_diff)
            && self.look_at.abs_diff_eq(other.look_at, max_abs_diff)
    }
}

/// Compute the world pose for a pair of offsets relative to an optional scene node.
///
/// With a node, only its world rotation is applied to the offsets (scale and translation are
/// discarded from the rotation), and the rotated offsets are added to the node's world position.
/// Without a node, the offsets are returned verbatim as absolute coordinates.
pub fn resolve_pose(
    node: Option<&GlobalTransform>,
    camera_offset: Vec3,
    look_at_offset: Vec3,
) -> WorldPose {
    let Some(node) = node else {
        return WorldPose::new(camera_offset, look_at_offset);
    };
    let (_, rotation, translation) = node.to_scale_rotation_translation();
    WorldPose {
        camera_pos: translation + rotation * camera_offset,
        look_at: translation + rotation * look_at_offset,
    }
}

/// Lookup from a non-owning node handle to that node's current world transform.
///
/// The scene layer owns the nodes; this is the only way the focus subsystem sees them. Returning
/// `None` (the node was never spawned, was despawned, or has no transform yet) is not an error.
pub trait NodeTransforms {
    /// The current world transform of `node`, if it exists.
    fn world_transform(&self, node: Entity) -> Option<GlobalTransform>;
}

impl<F: QueryFilter> NodeTransforms for Query<'_, '_, &GlobalTransform, F> {
    fn world_transform(&self, node: Entity) -> Option<GlobalTransform> {
        self.get(node).ok().copied()
    }
}

impl NodeTransforms for HashMap<Entity, GlobalTransform> {
    fn world_transform(&self, node: Entity) -> Option<GlobalTransform> {
        self.get(&node).copied()
    }
}

impl<T: NodeTransforms + ?Sized> NodeTransforms for &T {
    fn world_transform(&self, node: Entity) -> Option<GlobalTransform> {
        (**self).world_transform(node)
    }
}
