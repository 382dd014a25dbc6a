//! A floating island with a few points of interest. Scroll or drag to move between them, or use the
//! number keys to jump straight to one.

use std::{f32::consts::PI, time::Duration};

use bevy::prelude::*;
use bevy_focus_cam::{
    extensions::{scroll_hint::ScrollHint, target_indicator::TargetIndicator},
    prelude::*,
};

fn main() {
    App::new()
        .add_plugins((DefaultPlugins, MeshPickingPlugin, DefaultFocusCamPlugins))
        .add_systems(Startup, (setup_camera, setup_scene, setup_ui))
        .add_systems(
            Update,
            (load_avatar, spin_crystal, nav_keys, toggle_indicator, update_ui),
        )
        .run();
}

fn setup_camera(mut commands: Commands, registry: Res<FocusRegistry>) {
    let mut transform = Transform::default();
    registry.home.apply_to(&mut transform);
    commands.spawn((
        Camera3d::default(),
        transform,
        FocusCam::default(), // Navigates between the registry's targets
    ));
}

fn nav_items() -> [(&'static str, KeyCode, TargetRef); 5] {
    [
        ("Home", KeyCode::Digit0, TargetRef::Home),
        ("Island", KeyCode::Digit1, TargetRef::Id("island".into())),
        ("About", KeyCode::Digit2, TargetRef::Id("avatar".into())),
        ("Projects", KeyCode::Digit3, TargetRef::Id("sign".into())),
        ("Contact", KeyCode::Digit4, TargetRef::Id("crystal".into())),
    ]
}

#[derive(Component)]
struct Island;

#[derive(Component)]
struct Crystal;

#[derive(Resource)]
struct SceneNodes {
    sign: Entity,
    crystal: Entity,
    avatar: Option<Entity>,
}

impl SceneNodes {
    fn targets(&self) -> Vec<FocusTarget> {
        vec![
            FocusTarget::new("island", Vec3::new(0.0, 3.5, 10.0), Vec3::new(0.2, 0.5, 0.0)),
            FocusTarget::new("avatar", Vec3::new(0.0, 2.32, 4.0), Vec3::new(-1.1, 2.17, 1.6))
                .with_node(self.avatar),
            FocusTarget::new("sign", Vec3::new(-0.55, 0.61, 1.5), Vec3::new(0.0, 0.15, 0.0))
                .with_node(self.sign),
            FocusTarget::new("crystal", Vec3::new(2.1, 1.5, 2.0), Vec3::new(0.3, 1.4, 0.0))
                .with_node(self.crystal),
        ]
    }
}

//
// --- The below code is not important for the example ---
//

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut registry: ResMut<FocusRegistry>,
) {
    commands.spawn((
        DirectionalLight::default(),
        Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        Island,
        Mesh3d(meshes.add(Cylinder::new(4.0, 1.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.35, 0.6, 0.3))),
        Transform::from_xyz(0.0, -0.5, 0.0),
    ));
    let sign = commands
        .spawn((
            Mesh3d(meshes.add(Cuboid::new(1.0, 0.6, 0.1))),
            MeshMaterial3d(materials.add(Color::srgb(0.55, 0.35, 0.2))),
            Transform::from_xyz(1.5, 0.3, 1.0).with_rotation(Quat::from_rotation_y(-0.4)),
        ))
        .id();
    let crystal = commands
        .spawn((
            Crystal,
            Mesh3d(meshes.add(Cuboid::new(0.4, 1.2, 0.4))),
            MeshMaterial3d(materials.add(Color::srgb(0.5, 0.4, 0.95))),
            Transform::from_xyz(-2.0, 0.8, -1.5),
        ))
        .id();

    let nodes = SceneNodes {
        sign,
        crystal,
        avatar: None,
    };
    registry.set_targets(nodes.targets());
    commands.insert_resource(nodes);
}

/// Pretend the avatar model takes a moment to load.
fn load_avatar(
    mut commands: Commands,
    time: Res<Time>,
    mut nodes: ResMut<SceneNodes>,
    mut registry: ResMut<FocusRegistry>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    island: Single<Entity, With<Island>>,
) {
    if nodes.avatar.is_some() || time.elapsed() < Duration::from_millis(500) {
        return;
    }
    let avatar = commands
        .spawn((
            Mesh3d(meshes.add(Capsule3d::new(0.3, 0.8))),
            MeshMaterial3d(materials.add(Color::srgb(0.9, 0.75, 0.6))),
            Transform::from_xyz(-1.0, 1.1, 2.1)
                .with_scale(Vec3::splat(1.3))
                .with_rotation(Quat::from_rotation_y(PI * 0.36)),
            ChildOf(*island),
        ))
        .id();
    nodes.avatar = Some(avatar);
    registry.set_targets(nodes.targets());
}

fn spin_crystal(time: Res<Time>, mut crystals: Query<&mut Transform, With<Crystal>>) {
    for mut transform in &mut crystals {
        transform.rotate_y(0.2 * time.delta_secs());
    }
}

fn nav_keys(keys: Res<ButtonInput<KeyCode>>, mut navigate: EventWriter<NavigateTo>) {
    for (_, key, target) in nav_items() {
        if keys.just_pressed(key) {
            navigate.write(NavigateTo::from(target));
        }
    }
}

fn toggle_indicator(keys: Res<ButtonInput<KeyCode>>, mut indicator: ResMut<TargetIndicator>) {
    if keys.just_pressed(KeyCode::KeyG) {
        indicator.enabled = !indicator.enabled;
    }
}

#[derive(Component)]
struct NavText;

fn setup_ui(mut commands: Commands) {
    commands.spawn((
        NavText,
        Text::default(),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        Node {
            margin: UiRect::all(Val::Px(20.0)),
            ..default()
        },
    ));
}

fn update_ui(
    registry: Res<FocusRegistry>,
    hint: Res<ScrollHint>,
    mut text: Single<&mut Text, With<NavText>>,
) {
    if !registry.is_changed() && !hint.is_changed() {
        return;
    }
    let mut lines: Vec<String> = nav_items()
        .iter()
        .enumerate()
        .map(|(i, (label, _, target))| {
            let marker = if registry.is_current(target) { ">" } else { " " };
            format!("{marker} {i} - {label}")
        })
        .collect();
    lines.push("G - Toggle target indicators".into());
    if hint.visible() {
        lines.push("Scroll to explore".into());
    }
    text.0 = lines.join("\n");
}
