//! Animators driven through a scene, frame by frame

use approx::assert_relative_eq;

use super::mesh_node;
use crate::animation::{AnimationTrack, Animator};
use crate::foundation::math::Vec3;
use crate::render::RecordingBackend;
use crate::scene::{NodePath, Scene};

fn floating_scene() -> (Scene, NodePath) {
    let mut scene = Scene::default();
    let mut node = mesh_node("balloon").with_position(Vec3::new(0.0, 1.0, 0.0));
    node.set_mass(0.0).unwrap();
    let path = scene.add_root(node);
    (scene, path)
}

fn rise(scene: &mut Scene, path: &NodePath) {
    let track = AnimationTrack::translation(path.clone(), 10.0, Vec3::new(0.0, 10.0, 0.0)).unwrap();
    let key = scene.add_animator(Animator::new().with_track(track));
    scene.animator_mut(key).unwrap().start();
}

#[test]
fn test_total_change_is_independent_of_frame_slicing() {
    let slicings: [&[f32]; 3] = [&[10.0], &[0.5, 3.0, 0.25, 6.25], &[0.016; 625]];

    for steps in slicings {
        let (mut scene, path) = floating_scene();
        rise(&mut scene, &path);
        for &dt in steps {
            scene.update(dt).unwrap();
        }
        assert_relative_eq!(*scene.node(&path).unwrap().position(), Vec3::new(0.0, 11.0, 0.0), epsilon = 1e-3);
    }
}

#[test]
fn test_overshooting_frames_do_not_overshoot_the_total() {
    let (mut scene, path) = floating_scene();
    rise(&mut scene, &path);

    for _ in 0..3 {
        scene.update(4.0).unwrap();
    }
    assert_eq!(*scene.node(&path).unwrap().position(), Vec3::new(0.0, 11.0, 0.0));
    assert!(scene.animations_finished());
}

#[test]
fn test_finished_animation_leaves_node_alone() {
    let (mut scene, path) = floating_scene();
    rise(&mut scene, &path);
    scene.update(10.0).unwrap();
    let settled = *scene.node(&path).unwrap().position();

    for dt in [0.1, 1.0, 100.0] {
        scene.update(dt).unwrap();
        assert_eq!(*scene.node(&path).unwrap().position(), settled);
    }
}

#[test]
fn test_rotation_and_scale_tracks_on_a_child() {
    let mut scene = Scene::default();
    let mut boat = mesh_node("boat");
    boat.set_mass(0.0).unwrap();
    boat.add_child(mesh_node("tiger"));
    let boat_path = scene.add_root(boat);
    let tiger_path = boat_path.child(0);

    let animator = Animator::new()
        .with_track(AnimationTrack::rotation(tiger_path.clone(), 2.0, Vec3::new(0.0, 3.0, 0.0)).unwrap())
        .with_track(AnimationTrack::scale(tiger_path.clone(), 1.0, Vec3::new(1.0, 1.0, 1.0)).unwrap());
    scene.add_animator(animator);
    scene.start_animators();

    for _ in 0..40 {
        scene.update(0.1).unwrap();
    }

    let tiger = scene.node(&tiger_path).unwrap();
    assert_relative_eq!(*tiger.orientation(), Vec3::new(0.0, 3.0, 0.0), epsilon = 1e-4);
    assert_relative_eq!(*tiger.scale(), Vec3::new(2.0, 2.0, 2.0), epsilon = 1e-4);
}

#[test]
fn test_track_with_missing_target_reports_error() {
    let (mut scene, _) = floating_scene();
    let track = AnimationTrack::translation(NodePath::root(0).child(4), 1.0, Vec3::x()).unwrap();
    let key = scene.add_animator(Animator::new().with_track(track));
    scene.start_animators();

    assert!(scene.update(0.5).is_err());
    scene.remove_animator(key);
    assert!(scene.update(0.5).is_ok());
}

#[test]
fn test_missing_target_does_not_stall_animation_or_physics() {
    let (mut scene, balloon) = floating_scene();
    let stone = scene.add_root(mesh_node("stone").with_position(Vec3::new(0.0, 10.0, 0.0)));
    let animator = Animator::new()
        .with_track(AnimationTrack::translation(NodePath::root(0).child(9), 1.0, Vec3::x()).unwrap())
        .with_track(AnimationTrack::translation(balloon.clone(), 1.0, Vec3::new(0.0, 1.0, 0.0)).unwrap());
    scene.add_animator(animator);
    scene.start_animators();

    for _ in 0..10 {
        assert!(scene.update(0.1).is_err());
    }

    assert_relative_eq!(scene.node(&balloon).unwrap().position().y, 2.0, epsilon = 1e-5);
    assert!(scene.node(&stone).unwrap().position().y < 10.0);
}

#[test]
fn test_animation_runs_before_physics_within_a_frame() {
    // Pushed below the floor by the animation, then clamped back by physics
    // before anything is drawn.
    let mut scene = Scene::default();
    let path = scene.add_root(mesh_node("anchor"));
    let track = AnimationTrack::translation(path.clone(), 1.0, Vec3::new(0.0, -1.0, 0.0)).unwrap();
    scene.add_animator(Animator::new().with_track(track));
    scene.start_animators();

    let mut backend = RecordingBackend::new();
    scene.frame(0.5, &mut backend).unwrap();

    let anchor = backend.draws_of("anchor").next().unwrap();
    assert_eq!(anchor.world_position().y, 0.0);
    assert_eq!(scene.node(&path).unwrap().position().y, 0.0);
}
