//! Demonstration scenes
//!
//! Meshes are stand-ins named after the models they replace; only their
//! index counts matter to the recording backend.

use scene_engine::animation::{AnimationError, AnimationTrack, Animator};
use scene_engine::config::PhysicsConfig;
use scene_engine::foundation::math::{constants, Vec3};
use scene_engine::render::{
    Attenuation, DirectionalLight, FirstPersonCamera, LightColors, LightingError, LightingRig, MeshDrawable,
    PointLight,
};
use scene_engine::scene::{Scene, SceneError, SceneNode};
use thiserror::Error;

/// Names accepted by [`build`]
pub const SCENE_NAMES: [&str; 4] = ["bunny", "marble_square", "cube", "life_of_pi"];

/// Failures while assembling a scene
#[derive(Error, Debug)]
pub enum SceneBuildError {
    /// No scene with that name
    #[error("Unknown scene '{0}', expected one of {names:?}", names = SCENE_NAMES)]
    UnknownScene(String),

    /// A node could not be built
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// An animation could not be built
    #[error("Animation error: {0}")]
    Animation(#[from] AnimationError),

    /// Too many lights
    #[error("Lighting error: {0}")]
    Lighting(#[from] LightingError),
}

/// Build a scene by name
pub fn build(name: &str, physics: PhysicsConfig) -> Result<Scene, SceneBuildError> {
    let mut scene = Scene::new(physics);
    match name {
        "bunny" => bunny(&mut scene)?,
        "marble_square" => marble_square(&mut scene)?,
        "cube" => cube(&mut scene)?,
        "life_of_pi" => life_of_pi(&mut scene)?,
        other => return Err(SceneBuildError::UnknownScene(other.to_string())),
    }
    scene.set_camera(FirstPersonCamera::default());
    log::info!("Built scene '{}' with {} node(s)", name, scene.node_count());
    Ok(scene)
}

fn mesh(name: &str, index_count: u32) -> Result<SceneNode, SceneError> {
    Ok(SceneNode::new(vec![MeshDrawable::new(name, index_count)
        .with_sampler("baseTexture")
        .into_handle()])?
    .with_name(name))
}

fn full_turn(axis: Vec3) -> Vec3 {
    axis * constants::TAU
}

fn bunny(scene: &mut Scene) -> Result<(), SceneBuildError> {
    let mut bunny = mesh("bunny_textured", 14_904)?.with_position(Vec3::new(0.2, 0.0, 0.0));
    bunny.grow(Vec3::repeat(9.0));
    let path = scene.add_root(bunny);

    let mut lights = LightingRig::new(32.0);
    lights.set_directional(DirectionalLight::new(
        Vec3::new(0.0, -1.0, -1.0),
        LightColors::new(Vec3::new(0.1, 0.1, 0.085), Vec3::zeros(), Vec3::new(1.0, 1.0, 0.85)),
    ));
    lights.add_point_light(PointLight::new(
        Vec3::new(0.0, 2.0, 2.0),
        Attenuation::default(),
        LightColors::off(),
    ))?;
    scene.set_lighting(lights);

    let spin = AnimationTrack::rotation(path, 10.0, full_turn(Vec3::y()))?;
    scene.add_animator(Animator::new().with_track(spin));
    Ok(())
}

fn marble_square(scene: &mut Scene) -> Result<(), SceneBuildError> {
    let mut floor = mesh("marble_square", 6)?;
    floor.set_mass(0.0)?;
    floor.grow(Vec3::repeat(5.0));
    floor.rotate_by(Vec3::new(-constants::PI / 2.0, 0.0, 0.0));
    scene.add_root(floor);

    let mut lights = LightingRig::new(32.0);
    lights.set_directional(DirectionalLight::new(Vec3::new(0.0, -1.0, 0.0), LightColors::off()));
    lights.add_point_light(PointLight::new(
        Vec3::zeros(),
        Attenuation::default(),
        LightColors::new(Vec3::new(0.0, 0.0, 0.2), Vec3::new(0.8, 0.8, 0.6), Vec3::new(1.0, 1.0, 0.75)),
    ))?;
    scene.set_lighting(lights);
    Ok(())
}

fn cube(scene: &mut Scene) -> Result<(), SceneBuildError> {
    let path = scene.add_root(mesh("cube", 36)?.with_position(Vec3::new(0.0, 3.0, 0.0)));

    // Both turns run at once on the same node
    let animator = Animator::new()
        .with_track(AnimationTrack::rotation(path.clone(), 10.0, full_turn(Vec3::y()))?)
        .with_track(AnimationTrack::rotation(path, 10.0, full_turn(Vec3::x()))?);
    scene.add_animator(animator);
    Ok(())
}

fn life_of_pi(scene: &mut Scene) -> Result<(), SceneBuildError> {
    let mut boat = mesh("boat", 42_120)?;
    boat.grow(Vec3::repeat(0.01));
    boat.add_child(mesh("tiger", 67_458)?.with_position(Vec3::new(0.0, 0.0, 10.0)));
    let boat_path = scene.add_root(boat);
    let tiger_path = boat_path.child(0);

    let mut lights = LightingRig::new(32.0);
    lights.set_directional(DirectionalLight::new(
        Vec3::new(10.0, -1.0, 0.0),
        LightColors::new(Vec3::repeat(0.05), Vec3::zeros(), Vec3::repeat(0.05)),
    ));
    lights.add_point_light(PointLight::new(
        Vec3::new(0.0, 20.0, 0.0),
        Attenuation::default(),
        LightColors::new(Vec3::zeros(), Vec3::new(0.8, 0.8, 0.6), Vec3::new(1.0, 1.0, 0.75)),
    ))?;
    scene.set_lighting(lights);

    // Independent animators: the boat turns about Y while the tiger rolls about Z
    scene.add_animator(Animator::new().with_track(AnimationTrack::rotation(boat_path, 10.0, full_turn(Vec3::y()))?));
    scene.add_animator(Animator::new().with_track(AnimationTrack::rotation(tiger_path, 10.0, full_turn(Vec3::z()))?));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_named_scene_builds() {
        for name in SCENE_NAMES {
            let scene = build(name, PhysicsConfig::default()).unwrap();
            assert!(scene.node_count() > 0, "{name} is empty");
            assert!(scene.camera().is_some());
        }
    }

    #[test]
    fn test_unknown_scene_is_rejected() {
        assert!(matches!(
            build("teapot", PhysicsConfig::default()),
            Err(SceneBuildError::UnknownScene(name)) if name == "teapot"
        ));
    }

    #[test]
    fn test_life_of_pi_tiger_rides_the_boat() {
        let scene = build("life_of_pi", PhysicsConfig::default()).unwrap();
        assert_eq!(scene.roots()[0].child(0).unwrap().name(), "tiger");
        assert_eq!(scene.animator_count(), 2);
    }
}
