//! Per-node reflectance coefficients
//!
//! Lighting now takes its material parameters from textures; these
//! coefficients are kept on every node for older shaders that still read them.

use crate::foundation::math::Vec4;

/// Phong reflectance coefficients of a node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Ambient reflectance
    pub ambient: f32,
    /// Diffuse reflectance
    pub diffuse: f32,
    /// Specular reflectance
    pub specular: f32,
    /// Specular exponent
    pub shininess: f32,
}

impl Material {
    /// Create a material with the default coefficients
    pub fn new() -> Self {
        Self {
            ambient: 0.1,
            diffuse: 1.0,
            specular: 0.3,
            shininess: 4.0,
        }
    }

    /// Build from a packed `(ambient, diffuse, specular, shininess)` vector
    pub fn from_vec4(v: Vec4) -> Self {
        Self {
            ambient: v.x,
            diffuse: v.y,
            specular: v.z,
            shininess: v.w,
        }
    }

    /// Packed `(ambient, diffuse, specular, shininess)` vector, as uploaded
    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(self.ambient, self.diffuse, self.specular, self.shininess)
    }

    /// Set the specular exponent
    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packing() {
        let material = Material::new().with_shininess(32.0);
        assert_eq!(material.to_vec4(), Vec4::new(0.1, 1.0, 0.3, 32.0));
        assert_eq!(Material::from_vec4(material.to_vec4()), material);
    }
}
