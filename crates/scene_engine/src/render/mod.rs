//! Rendering boundary
//!
//! The scene core does not own a graphics API. It computes world matrices and
//! pushes them, together with lights and camera matrices, through the
//! [`UniformSink`] trait; drawables issue their own draw calls.

pub mod backend;
pub mod camera;
pub mod lighting;
pub mod material;
pub mod recording;

pub use backend::{Drawable, DrawableHandle, MeshDrawable, UniformSink, UniformValue, MODEL_UNIFORM};
pub use camera::FirstPersonCamera;
pub use lighting::{
    Attenuation, DirectionalLight, LightColors, LightingError, LightingRig, PointLight, SpotLight,
    MAX_POINT_LIGHTS, MAX_SPOT_LIGHTS,
};
pub use material::Material;
pub use recording::{DrawCall, RecordingBackend};
