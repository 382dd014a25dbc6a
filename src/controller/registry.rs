//! The [`FocusRegistry`]: the ordered set of focus targets and which one the camera is settled on.

use std::borrow::Cow;

use bevy_ecs::{prelude::*, system::SystemParam};
use bevy_math::prelude::*;
use bevy_reflect::prelude::*;
use bevy_transform::prelude::*;

use super::pose::{resolve_pose, NodeTransforms, WorldPose};

/// Where the camera is focused: the home overview, or one of the registry's targets.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum Focus {
    /// The unfocused overview.
    #[default]
    Home,
    /// The target at this position in [`FocusRegistry::targets`].
    Target(usize),
}

impl Focus {
    /// The signed index form: `-1` for home, otherwise the target position.
    pub fn as_index(self) -> isize {
        match self {
            Focus::Home => -1,
            Focus::Target(i) => i as isize,
        }
    }

    /// Inverse of [`Focus::as_index`]. Any negative index is home.
    pub fn from_index(index: isize) -> Self {
        usize::try_from(index).map_or(Focus::Home, Focus::Target)
    }

    /// The following focus, or `None` if this is already the last of `len` targets.
    pub fn next(self, len: usize) -> Option<Self> {
        let next = match self {
            Focus::Home => 0,
            Focus::Target(i) => i + 1,
        };
        (next < len).then_some(Focus::Target(next))
    }

    /// The preceding focus, or `None` at home.
    pub fn prev(self) -> Option<Self> {
        match self {
            Focus::Home => None,
            Focus::Target(0) => Some(Focus::Home),
            Focus::Target(i) => Some(Focus::Target(i - 1)),
        }
    }

    /// Restore the index invariant against a list of `len` targets.
    fn clamped(self, len: usize) -> Self {
        match self {
            Focus::Target(_) if len == 0 => Focus::Home,
            Focus::Target(i) if i >= len => Focus::Target(len - 1),
            other => other,
        }
    }
}

/// One point of interest the camera can focus on.
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct FocusTarget {
    /// Stable identity, e.g. `"avatar"`.
    pub id: Cow<'static, str>,
    /// The scene node the offsets are relative to. Owned by the scene; `None` until it exists.
    pub node: Option<Entity>,
    /// Camera position in the node's rotated local frame, or absolute when there is no node.
    pub camera_offset: Vec3,
    /// Look-at point in the node's rotated local frame, or absolute when there is no node.
    pub look_at_offset: Vec3,
}

impl FocusTarget {
    /// A target with no node yet, whose offsets are absolute world coordinates.
    pub fn new(id: impl Into<Cow<'static, str>>, camera_offset: Vec3, look_at_offset: Vec3) -> Self {
        Self {
            id: id.into(),
            node: None,
            camera_offset,
            look_at_offset,
        }
    }

    /// Attach the target to a scene node, or detach it with `None`.
    #[must_use = "with_node returns a modified FocusTarget"]
    pub fn with_node(self, node: impl Into<Option<Entity>>) -> Self {
        Self {
            node: node.into(),
            ..self
        }
    }

    /// The world pose for this target given the scene as it is right now.
    pub fn resolve(&self, nodes: &impl NodeTransforms) -> WorldPose {
        let node = self.node.and_then(|node| nodes.world_transform(node));
        resolve_pose(node.as_ref(), self.camera_offset, self.look_at_offset)
    }
}

/// A way to name a focus from outside the registry, e.g. from a navigation button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetRef {
    /// The home overview.
    Home,
    /// A target by position.
    Index(usize),
    /// A target by [`FocusTarget::id`].
    Id(Cow<'static, str>),
}

impl From<Focus> for TargetRef {
    fn from(focus: Focus) -> Self {
        match focus {
            Focus::Home => TargetRef::Home,
            Focus::Target(i) => TargetRef::Index(i),
        }
    }
}

/// The ordered focus targets and the focus the camera has settled on.
///
/// [`FocusRegistry::current`] only ever changes once a camera transition has fully completed, so
/// readers never observe a focus the camera hasn't visually reached yet. Changing the current
/// focus here never moves the camera; motion is driven by the scroll scrubber and the navigation
/// bridge.
#[derive(Debug, Clone, Resource, Reflect)]
#[reflect(Resource)]
pub struct FocusRegistry {
    /// The pose used for [`Focus::Home`].
    pub home: WorldPose,
    targets: Vec<FocusTarget>,
    current: Focus,
    revision: u64,
}

impl Default for FocusRegistry {
    fn default() -> Self {
        Self::new(WorldPose::new(Vec3::new(0.0, 50.0, 14.0), Vec3::new(0.0, 50.0, 0.0)))
    }
}

impl FocusRegistry {
    /// An empty registry focused on home.
    pub fn new(home: WorldPose) -> Self {
        Self {
            home,
            targets: Vec::new(),
            current: Focus::Home,
            revision: 0,
        }
    }

    /// The targets, in navigation order.
    pub fn targets(&self) -> &[FocusTarget] {
        &self.targets
    }

    /// The target at `index`, if any.
    pub fn target(&self, index: usize) -> Option<&FocusTarget> {
        self.targets.get(index)
    }

    /// The focus the camera has settled on.
    pub fn current(&self) -> Focus {
        self.current
    }

    /// Incremented every time the target list is replaced.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the whole target list, e.g. after a node finished loading. Does not move the camera.
    /// The current focus is clamped if the list shrank below it.
    pub fn set_targets(&mut self, targets: Vec<FocusTarget>) {
        self.targets = targets;
        self.current = self.current.clamped(self.targets.len());
        self.revision = self.revision.wrapping_add(1);
    }

    /// Record the focus the camera has settled on, clamped to the current target list.
    pub fn set_current(&mut self, focus: Focus) {
        self.current = focus.clamped(self.targets.len());
    }

    /// Step the recorded focus forward, stopping at the last target.
    pub fn next(&mut self) {
        if let Some(next) = self.current.next(self.targets.len()) {
            self.current = next;
        }
    }

    /// Step the recorded focus back, stopping at home.
    pub fn prev(&mut self) {
        if let Some(prev) = self.current.prev() {
            self.current = prev;
        }
    }

    /// Translate an external reference into a focus that exists in this registry.
    pub fn lookup(&self, target: &TargetRef) -> Option<Focus> {
        match target {
            TargetRef::Home => Some(Focus::Home),
            TargetRef::Index(i) => (*i < self.targets.len()).then_some(Focus::Target(*i)),
            TargetRef::Id(id) => self
                .targets
                .iter()
                .position(|target| target.id == *id)
                .map(Focus::Target),
        }
    }

    /// Does `target` name the current focus?
    pub fn is_current(&self, target: &TargetRef) -> bool {
        self.lookup(target) == Some(self.current)
    }

    /// The target whose scene node is `node`.
    pub fn focus_for_node(&self, node: Entity) -> Option<Focus> {
        self.targets
            .iter()
            .position(|target| target.node == Some(node))
            .map(Focus::Target)
    }

    /// Where focusing on `focus` would place the camera, resolved against the current scene.
    pub fn world_pose(&self, focus: Focus, nodes: &impl NodeTransforms) -> Option<WorldPose> {
        match focus {
            Focus::Home => Some(self.home),
            Focus::Target(i) => self.targets.get(i).map(|target| target.resolve(nodes)),
        }
    }
}

/// Sent whenever the settled focus changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Event)]
pub struct FocusChanged {
    /// The focus before the change.
    pub previous: Focus,
    /// The newly settled focus.
    pub current: Focus,
}

impl FocusChanged {
    /// Emit a [`FocusChanged`] when the settled focus differs from the last one observed.
    pub(crate) fn notify(
        registry: Res<FocusRegistry>,
        mut last: Local<Focus>,
        mut events: EventWriter<FocusChanged>,
    ) {
        let current = registry.current();
        if current != *last {
            events.write(FocusChanged {
                previous: *last,
                current,
            });
            *last = current;
        }
    }
}

/// Read access to camera poses for every focus, for systems that need to know where the camera
/// would go without duplicating the offset math.
#[derive(SystemParam)]
pub struct FocusPoses<'w, 's> {
    registry: Res<'w, FocusRegistry>,
    nodes: Query<'w, 's, &'static GlobalTransform>,
}

impl FocusPoses<'_, '_> {
    /// The registry itself.
    pub fn registry(&self) -> &FocusRegistry {
        &self.registry
    }

    /// Where focusing on `target` would place the camera right now.
    pub fn pose_of(&self, target: &TargetRef) -> Option<WorldPose> {
        let focus = self.registry.lookup(target)?;
        self.registry.world_pose(focus, &self.nodes)
    }
}
