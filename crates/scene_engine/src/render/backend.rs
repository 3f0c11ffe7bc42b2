//! Boundary between the scene core and whatever actually draws
//!
//! The core only ever asks for two things: "set this named uniform" and
//! "draw this mesh". Shader programs, textures and GPU buffers live behind
//! these traits.

use std::sync::Arc;

use crate::foundation::math::{Mat4, Vec3, Vec4};

/// Name of the per-draw model matrix uniform
pub const MODEL_UNIFORM: &str = "model";

/// Value of a shader uniform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    /// Signed integer (counts, sampler slots)
    Int(i32),
    /// Scalar
    Float(f32),
    /// 3-component vector
    Vec3(Vec3),
    /// 4-component vector
    Vec4(Vec4),
    /// Column-major 4x4 matrix
    Mat4(Mat4),
}

impl UniformValue {
    /// Raw bytes in the layout a GPU upload expects (column-major for matrices)
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Int(v) => bytemuck::bytes_of(v),
            Self::Float(v) => bytemuck::bytes_of(v),
            Self::Vec3(v) => bytemuck::cast_slice(v.as_slice()),
            Self::Vec4(v) => bytemuck::cast_slice(v.as_slice()),
            Self::Mat4(m) => bytemuck::cast_slice(m.as_slice()),
        }
    }

    /// Matrix payload, if this is a matrix
    pub fn as_mat4(&self) -> Option<&Mat4> {
        match self {
            Self::Mat4(m) => Some(m),
            _ => None,
        }
    }
}

impl From<i32> for UniformValue {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<f32> for UniformValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<Vec3> for UniformValue {
    fn from(v: Vec3) -> Self {
        Self::Vec3(v)
    }
}

impl From<Vec4> for UniformValue {
    fn from(v: Vec4) -> Self {
        Self::Vec4(v)
    }
}

impl From<Mat4> for UniformValue {
    fn from(m: Mat4) -> Self {
        Self::Mat4(m)
    }
}

/// Receiver of uniform assignments and draw calls (a bound shader program)
pub trait UniformSink {
    /// Set the named uniform for subsequent draws
    fn set_uniform(&mut self, name: &str, value: UniformValue);

    /// Issue a draw of `index_count` indices for the named mesh
    fn draw_indexed(&mut self, mesh: &str, index_count: u32);
}

/// Something a scene node can draw; immutable once created
pub trait Drawable: Send + Sync {
    /// Issue the draw calls for this drawable against the current uniforms
    fn render(&self, sink: &mut dyn UniformSink);
}

/// Shared handle to an already-uploaded drawable
pub type DrawableHandle = Arc<dyn Drawable>;

/// A mesh already resident on the GPU, identified by name
///
/// Rendering binds each texture sampler to its slot and then draws the
/// mesh's index buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshDrawable {
    name: String,
    index_count: u32,
    samplers: Vec<String>,
}

impl MeshDrawable {
    /// Create a mesh drawable
    pub fn new(name: impl Into<String>, index_count: u32) -> Self {
        Self {
            name: name.into(),
            index_count,
            samplers: Vec::new(),
        }
    }

    /// Attach a texture sampler; slots are assigned in insertion order
    pub fn with_sampler(mut self, sampler: impl Into<String>) -> Self {
        self.samplers.push(sampler.into());
        self
    }

    /// Wrap into a shareable handle
    pub fn into_handle(self) -> DrawableHandle {
        Arc::new(self)
    }

    /// Mesh name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of indices drawn
    pub fn index_count(&self) -> u32 {
        self.index_count
    }
}

impl Drawable for MeshDrawable {
    fn render(&self, sink: &mut dyn UniformSink) {
        for (slot, sampler) in (0_i32..).zip(&self.samplers) {
            sink.set_uniform(sampler, UniformValue::Int(slot));
        }
        sink.draw_indexed(&self.name, self.index_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_bytes_are_column_major() {
        let m = Mat4::new_translation(&Vec3::new(1.0, 2.0, 3.0));
        let value = UniformValue::from(m);
        let bytes = value.as_bytes();
        assert_eq!(bytes.len(), 64);

        let floats: &[f32] = bytemuck::cast_slice(bytes);
        assert_eq!(&floats[12..15], &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_scalar_bytes() {
        assert_eq!(UniformValue::Int(7).as_bytes(), &7_i32.to_ne_bytes());
        assert_eq!(UniformValue::Float(0.5).as_bytes(), &0.5_f32.to_ne_bytes());
        assert_eq!(UniformValue::Vec3(Vec3::zeros()).as_bytes().len(), 12);
    }
}
