//! # Scene Engine
//!
//! A hierarchical 3D scene graph with per-node Newtonian physics and
//! time-based procedural animation, independent of any graphics API.
//!
//! ## Features
//!
//! - **Scene Graph**: Nodes own their children; world matrices compose on render
//! - **Physics**: Gravity, ground friction and a floor plane, per node
//! - **Animation**: Constant-rate translation, rotation and scale tracks
//! - **Render Boundary**: Uniforms and draws go through a small sink trait
//! - **Configuration**: Physics and viewer settings from TOML or RON
//!
//! ## Quick Start
//!
//! ```rust
//! use scene_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut scene = Scene::new(PhysicsConfig::default());
//!     let cube = SceneNode::new(vec![MeshDrawable::new("cube", 36).into_handle()])?
//!         .with_position(Vec3::new(0.0, 10.0, 0.0));
//!     let path = scene.add_root(cube);
//!
//!     let spin = AnimationTrack::rotation(path.clone(), 2.0, Vec3::new(0.0, 1.5, 0.0))?;
//!     scene.add_animator(Animator::new().with_track(spin));
//!     scene.start_animators();
//!
//!     let mut backend = RecordingBackend::new();
//!     scene.frame(1.0 / 60.0, &mut backend)?;
//!     assert_eq!(backend.draws().len(), 1);
//!     Ok(())
//! }
//! ```

pub mod foundation;
pub mod config;
pub mod scene;
pub mod animation;
pub mod render;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        animation::{Animation, AnimationError, AnimationTrack, Animator},
        config::{Config, ConfigError, PhysicsConfig, SceneConfig, ViewerConfig},
        foundation::{
            math::{Mat4, Mat4Ext, Vec3},
            time::FrameClock,
        },
        render::{
            Drawable, FirstPersonCamera, LightingRig, Material, MeshDrawable, RecordingBackend, UniformSink,
            UniformValue,
        },
        scene::{AnimatorKey, NodePath, Scene, SceneError, SceneNode},
    };
}
