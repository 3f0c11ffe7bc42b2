//! In-memory render backend
//!
//! Records every uniform assignment and draw instead of touching a GPU.
//! The headless viewer logs from it and the tests assert against it.

use std::collections::HashMap;

use super::backend::{UniformSink, UniformValue, MODEL_UNIFORM};
use crate::foundation::math::{utils, Mat4, Vec3};

/// A draw issued while recording
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    /// Mesh that was drawn
    pub mesh: String,
    /// Index count of the draw
    pub index_count: u32,
    /// Model matrix bound at the time of the draw
    pub model: Mat4,
}

impl DrawCall {
    /// World-space position of the drawn mesh's local origin
    pub fn world_position(&self) -> Vec3 {
        utils::translation_of(&self.model)
    }
}

/// Backend that records uniforms and draw calls
#[derive(Debug, Default)]
pub struct RecordingBackend {
    uniforms: HashMap<String, UniformValue>,
    uniform_writes: usize,
    draws: Vec<DrawCall>,
}

impl RecordingBackend {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest value assigned to a uniform
    pub fn uniform(&self, name: &str) -> Option<&UniformValue> {
        self.uniforms.get(name)
    }

    /// Total number of uniform assignments since the last clear
    pub fn uniform_writes(&self) -> usize {
        self.uniform_writes
    }

    /// Draws recorded since the last clear, in issue order
    pub fn draws(&self) -> &[DrawCall] {
        &self.draws
    }

    /// Draws of the named mesh
    pub fn draws_of<'a>(&'a self, mesh: &'a str) -> impl Iterator<Item = &'a DrawCall> + 'a {
        self.draws.iter().filter(move |d| d.mesh == mesh)
    }

    /// Forget recorded draws, keeping the current uniform state (start of a new frame)
    pub fn begin_frame(&mut self) {
        self.draws.clear();
        self.uniform_writes = 0;
    }
}

impl UniformSink for RecordingBackend {
    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        log::trace!("uniform {} = {:?}", name, value);
        self.uniform_writes += 1;
        self.uniforms.insert(name.to_string(), value);
    }

    fn draw_indexed(&mut self, mesh: &str, index_count: u32) {
        let model = self
            .uniforms
            .get(MODEL_UNIFORM)
            .and_then(UniformValue::as_mat4)
            .copied()
            .unwrap_or_else(Mat4::identity);
        self.draws.push(DrawCall {
            mesh: mesh.to_string(),
            index_count,
            model,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::backend::{Drawable, MeshDrawable};

    #[test]
    fn test_draw_captures_current_model_matrix() {
        let mut backend = RecordingBackend::new();
        let cube = MeshDrawable::new("cube", 36).with_sampler("baseTexture");

        backend.set_uniform(MODEL_UNIFORM, Mat4::new_translation(&Vec3::new(0.0, 2.0, 0.0)).into());
        cube.render(&mut backend);

        assert_eq!(backend.draws().len(), 1);
        assert_eq!(backend.draws()[0].world_position(), Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(backend.uniform("baseTexture"), Some(&UniformValue::Int(0)));
    }

    #[test]
    fn test_begin_frame_keeps_uniforms() {
        let mut backend = RecordingBackend::new();
        backend.set_uniform("numPointLights", 2.into());
        backend.draw_indexed("quad", 6);
        backend.begin_frame();

        assert!(backend.draws().is_empty());
        assert_eq!(backend.uniform_writes(), 0);
        assert_eq!(backend.uniform("numPointLights"), Some(&UniformValue::Int(2)));
    }
}
