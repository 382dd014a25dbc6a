use std::{f32::consts::FRAC_PI_2, time::Duration};

use bevy_app::prelude::*;
use bevy_ecs::{event::Events, prelude::*, system::RunSystemOnce};
use bevy_focus_cam::{extensions::navigate_to::NavigateToPlugin, prelude::*};
use bevy_input::{
    mouse::{MouseScrollUnit, MouseWheel},
    touch::{TouchInput, TouchPhase},
};
use bevy_math::prelude::*;
use bevy_time::{TimePlugin, TimeUpdateStrategy};
use bevy_transform::prelude::*;
use bevy_window::{PrimaryWindow, Window, WindowResolution};

const FRAME: Duration = Duration::from_millis(50);

struct Island {
    app: App,
    camera: Entity,
    avatar: Entity,
}

fn targets(avatar: Option<Entity>, sign: Entity, crystal: Entity) -> Vec<FocusTarget> {
    vec![
        FocusTarget::new("avatar", Vec3::new(0.0, 2.32, 4.0), Vec3::new(-1.1, 2.17, 1.6))
            .with_node(avatar),
        FocusTarget::new("sign", Vec3::new(-0.55, 0.61, 1.5), Vec3::new(0.0, 0.15, 0.0))
            .with_node(sign),
        FocusTarget::new("crystal", Vec3::new(2.1, 1.5, 2.0), Vec3::new(0.3, 1.4, 0.0))
            .with_node(crystal),
    ]
}

fn spawn_node(app: &mut App, transform: Transform) -> Entity {
    app.world_mut()
        .spawn((transform, GlobalTransform::from(transform)))
        .id()
}

impl Island {
    fn new() -> Self {
        let mut app = App::new();
        app.add_plugins((TimePlugin, FocusCamPlugin, NavigateToPlugin))
            .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME));

        let avatar = spawn_node(
            &mut app,
            Transform::from_xyz(-1.0, -0.12, 2.1)
                .with_rotation(Quat::from_rotation_y(std::f32::consts::PI * 0.36)),
        );
        let sign = spawn_node(&mut app, Transform::from_xyz(1.5, 0.3, 0.5));
        let crystal = spawn_node(
            &mut app,
            Transform::from_xyz(2.0, 0.8, -1.5).with_rotation(Quat::from_rotation_y(FRAC_PI_2)),
        );
        app.world_mut()
            .resource_mut::<FocusRegistry>()
            .set_targets(targets(Some(avatar), sign, crystal));

        let home = app.world().resource::<FocusRegistry>().home;
        let mut camera_transform = Transform::default();
        home.apply_to(&mut camera_transform);
        let camera = app
            .world_mut()
            .spawn((FocusCam::default(), camera_transform))
            .id();

        // First frame plans the scrub timelines.
        app.update();
        Self {
            app,
            camera,
            avatar,
        }
    }

    fn current(&self) -> Focus {
        self.app.world().resource::<FocusRegistry>().current()
    }

    fn cam(&self) -> &FocusCam {
        self.app.world().get::<FocusCam>(self.camera).unwrap()
    }

    fn camera_pose(&self) -> WorldPose {
        WorldPose::from_camera(self.app.world().get::<Transform>(self.camera).unwrap())
    }

    fn pose_of(&mut self, target: TargetRef) -> WorldPose {
        self.app
            .world_mut()
            .run_system_once(move |poses: FocusPoses| poses.pose_of(&target))
            .unwrap()
            .unwrap()
    }

    fn scroll(&mut self, pixels_down: f32) {
        self.app.world_mut().send_event(MouseWheel {
            unit: MouseScrollUnit::Pixel,
            x: 0.0,
            y: -pixels_down,
            window: Entity::PLACEHOLDER,
        });
    }

    fn touch(&mut self, phase: TouchPhase, y: f32) {
        self.app.world_mut().send_event(TouchInput {
            phase,
            position: Vec2::new(200.0, y),
            window: Entity::PLACEHOLDER,
            force: None,
            id: 7,
        });
    }

    fn focus_changes(&self) -> Vec<FocusChanged> {
        let events = self.app.world().resource::<Events<FocusChanged>>();
        events.get_cursor().read(events).copied().collect()
    }

    /// Step frames until no transition is playing, recording the settled focus each frame.
    fn run_until_idle(&mut self) -> Vec<Focus> {
        let mut seen = Vec::new();
        for _ in 0..200 {
            self.app.update();
            seen.push(self.current());
            if !self.cam().is_transitioning() {
                return seen;
            }
        }
        panic!("transition never completed");
    }
}

fn assert_camera_at(camera: WorldPose, expected: WorldPose) {
    assert!(
        camera.camera_pos.abs_diff_eq(expected.camera_pos, 1e-4),
        "camera at {:?}, expected {:?}",
        camera.camera_pos,
        expected.camera_pos
    );
    let facing = (camera.look_at - camera.camera_pos).normalize();
    let expected_facing = (expected.look_at - expected.camera_pos).normalize();
    assert!(facing.abs_diff_eq(expected_facing, 1e-4));
}

#[test]
fn scrolling_past_the_threshold_settles_on_the_first_target() {
    let mut island = Island::new();
    island.scroll(5000.0);
    island.app.update();

    assert_eq!(
        island.cam().scrub_phase(),
        ScrubPhase::Committing(ScrubDirection::Forward)
    );
    assert!(island.cam().is_transitioning());
    assert_eq!(island.current(), Focus::Home);

    let seen = island.run_until_idle();
    let (last, in_flight) = seen.split_last().unwrap();
    assert!(in_flight.iter().all(|focus| *focus == Focus::Home));
    assert_eq!(*last, Focus::Target(0));

    let avatar = island.pose_of(TargetRef::Id("avatar".into()));
    assert_camera_at(island.camera_pose(), avatar);
    assert_eq!(
        island.focus_changes(),
        vec![FocusChanged {
            previous: Focus::Home,
            current: Focus::Target(0),
        }]
    );
}

#[test]
fn navigation_goes_straight_to_the_requested_target() {
    let mut island = Island::new();
    let sign = island.pose_of(TargetRef::Index(1));
    island
        .app
        .world_mut()
        .resource_mut::<FocusRegistry>()
        .set_current(Focus::Target(1));
    let mut transform = Transform::default();
    sign.apply_to(&mut transform);
    *island.app.world_mut().get_mut::<Transform>(island.camera).unwrap() = transform;
    island.app.update();

    island.app.world_mut().send_event(NavigateTo::id("crystal"));
    island.app.update();
    assert!(island.cam().is_transitioning());
    assert_eq!(island.cam().pending_focus(), Some(Focus::Target(2)));

    // A second request mid-flight is dropped, not queued.
    island.app.world_mut().send_event(NavigateTo::home());

    let seen = island.run_until_idle();
    assert!(seen
        .iter()
        .all(|focus| matches!(focus, Focus::Target(1) | Focus::Target(2))));
    assert_eq!(island.current(), Focus::Target(2));

    let crystal = island.pose_of(TargetRef::Id("crystal".into()));
    assert_camera_at(island.camera_pose(), crystal);

    for _ in 0..10 {
        island.app.update();
    }
    assert_eq!(island.current(), Focus::Target(2));
    assert!(!island.cam().is_transitioning());
}

#[test]
fn scrolling_is_ignored_while_navigating() {
    let mut island = Island::new();
    island.app.world_mut().send_event(NavigateTo::id("sign"));
    island.app.update();
    assert!(island.cam().is_transitioning());

    island.scroll(50_000.0);
    island.app.update();
    assert_eq!(island.cam().scrub_velocity(), 0.0);

    island.run_until_idle();
    assert_eq!(island.current(), Focus::Target(1));
    assert_eq!(island.cam().scrub_phase(), ScrubPhase::Idle);
}

#[test]
fn late_loading_node_replaces_the_fallback_pose() {
    let mut island = Island::new();
    let sign = island.app.world().resource::<FocusRegistry>().targets()[1].node;
    let crystal = island.app.world().resource::<FocusRegistry>().targets()[2].node;
    island
        .app
        .world_mut()
        .resource_mut::<FocusRegistry>()
        .set_targets(targets(None, sign.unwrap(), crystal.unwrap()));
    island.app.update();

    let fallback = island.pose_of(TargetRef::Id("avatar".into()));
    assert_eq!(fallback.camera_pos, Vec3::new(0.0, 2.32, 4.0));
    assert_eq!(fallback.look_at, Vec3::new(-1.1, 2.17, 1.6));

    // The avatar finishes loading half a second later.
    for _ in 0..10 {
        island.app.update();
    }
    let avatar = island.avatar;
    island
        .app
        .world_mut()
        .resource_mut::<FocusRegistry>()
        .set_targets(targets(Some(avatar), sign.unwrap(), crystal.unwrap()));

    let rotation = Quat::from_rotation_y(std::f32::consts::PI * 0.36);
    let node_pos = Vec3::new(-1.0, -0.12, 2.1);
    let placed = island.pose_of(TargetRef::Id("avatar".into()));
    assert!(placed
        .camera_pos
        .abs_diff_eq(node_pos + rotation * Vec3::new(0.0, 2.32, 4.0), 1e-4));
    assert!(placed
        .look_at
        .abs_diff_eq(node_pos + rotation * Vec3::new(-1.1, 2.17, 1.6), 1e-4));

    // Scrubbing now heads for the placed pose rather than the stale fallback.
    island.scroll(5000.0);
    island.app.update();
    island.run_until_idle();
    assert_camera_at(island.camera_pose(), placed);
}

#[test]
fn opposite_scrolls_in_one_frame_accumulate_into_one_velocity() {
    let mut island = Island::new();
    island.scroll(1000.0);
    island.scroll(-600.0);
    island.app.update();

    let net = 400.0 * ScrubSettings::default().wheel_sensitivity;
    assert!((island.cam().scrub_progress() - net).abs() < 1e-6);
    assert!((island.cam().scrub_velocity() - net * 0.5).abs() < 1e-6);
    assert_eq!(
        island.cam().scrub_phase(),
        ScrubPhase::Scrubbing(ScrubDirection::Forward)
    );
}

#[test]
fn scrolling_back_from_home_stays_home() {
    let mut island = Island::new();
    let before = island.camera_pose();
    for _ in 0..5 {
        island.scroll(-20_000.0);
        island.app.update();
        assert_eq!(island.cam().scrub_progress(), 0.0);
    }
    assert!(!island.cam().is_transitioning());
    assert_eq!(island.current(), Focus::Home);
    assert_camera_at(island.camera_pose(), before);
}

#[test]
fn unknown_targets_are_ignored() {
    let mut island = Island::new();
    island.app.world_mut().send_event(NavigateTo::id("moon"));
    island.app.update();
    assert!(!island.cam().is_transitioning());
    assert_eq!(island.current(), Focus::Home);
}

#[test]
fn navigating_home_settles_at_home() {
    let mut island = Island::new();
    island.app.world_mut().send_event(NavigateTo::index(2));
    island.run_until_idle();
    assert_eq!(island.current(), Focus::Target(2));

    island.app.world_mut().send_event(NavigateTo::home());
    island.run_until_idle();
    assert_eq!(island.current(), Focus::Home);
    let home = island.app.world().resource::<FocusRegistry>().home;
    assert_camera_at(island.camera_pose(), home);
}

#[test]
fn touch_drags_scrub_with_their_own_sensitivity() {
    let mut island = Island::new();
    let sensitivity = ScrubSettings::default().touch_sensitivity;
    island.touch(TouchPhase::Started, 500.0);
    island.app.update();
    assert_eq!(island.cam().scrub_velocity(), 0.0);

    // Finger moves up 60 px.
    island.touch(TouchPhase::Moved, 440.0);
    island.app.update();
    let drag = 60.0 * sensitivity;
    assert!((island.cam().scrub_progress() - drag).abs() < 1e-6);
    assert!((island.cam().scrub_velocity() - drag * 0.5).abs() < 1e-6);
    assert_eq!(
        island.cam().scrub_phase(),
        ScrubPhase::Scrubbing(ScrubDirection::Forward)
    );

    // A long swipe up commits to the first target.
    island.touch(TouchPhase::Moved, -600.0);
    island.app.update();
    assert_eq!(
        island.cam().scrub_phase(),
        ScrubPhase::Committing(ScrubDirection::Forward)
    );
    island.touch(TouchPhase::Ended, -600.0);
    island.run_until_idle();
    assert_eq!(island.current(), Focus::Target(0));
}

#[test]
fn only_the_first_camera_receives_scroll_input() {
    let mut island = Island::new();
    let extra = island
        .app
        .world_mut()
        .spawn((FocusCam::default(), Transform::default()))
        .id();
    island.scroll(1000.0);
    island.app.update();

    assert!(island.cam().scrub_progress() > 0.0);
    let extra = island.app.world().get::<FocusCam>(extra).unwrap();
    assert_eq!(extra.scrub_velocity(), 0.0);
    assert_eq!(extra.scrub_progress(), 0.0);
}

#[test]
fn page_scrolls_follow_the_window_height() {
    let mut island = Island::new();
    island.app.world_mut().spawn((
        Window {
            resolution: WindowResolution::new(1000.0, 600.0),
            ..Default::default()
        },
        PrimaryWindow,
    ));
    island.app.update();
    assert_eq!(island.cam().scrub.page_height, 600.0);

    let mut cam = island.app.world_mut().get_mut::<FocusCam>(island.camera).unwrap();
    cam.send_wheel_input(0.1, ScrollUnit::Page);
    let expected = 60.0 * ScrubSettings::default().wheel_sensitivity;
    assert!((cam.scrub_velocity() - expected).abs() < 1e-7);
}
