//! Math utilities and types
//!
//! Thin aliases over nalgebra plus the handful of matrix builders the scene
//! graph needs. All angles are in radians and all rotations are right-handed.

pub use nalgebra::{Matrix4, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Mat4, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Translation component (fourth column) of an affine matrix
    pub fn translation_of(matrix: &Mat4) -> Vec3 {
        Vec3::new(matrix[(0, 3)], matrix[(1, 3)], matrix[(2, 3)])
    }

    /// Horizontal (X/Z) part of a vector, with Y zeroed
    pub fn horizontal(v: &Vec3) -> Vec3 {
        Vec3::new(v.x, 0.0, v.z)
    }
}

/// Extension trait for Mat4 with the builders used by node transforms
pub trait Mat4Ext {
    /// Create a translation matrix
    fn translation(offset: &Vec3) -> Mat4;

    /// Create a non-uniform scaling matrix
    fn scaling(factors: &Vec3) -> Mat4;

    /// Create a rotation matrix around the X axis
    fn rotation_x(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Y axis
    fn rotation_y(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Z axis
    fn rotation_z(angle: f32) -> Mat4;

    /// Fixed-order Euler rotation `Rz(z) * Rx(x) * Ry(y)`.
    ///
    /// The three angles are independent; this is not a composable rotation and
    /// the axis order is part of the visible behavior.
    fn euler_zxy(angles: &Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn translation(offset: &Vec3) -> Mat4 {
        Mat4::new_translation(offset)
    }

    fn scaling(factors: &Vec3) -> Mat4 {
        Mat4::new_nonuniform_scaling(factors)
    }

    fn rotation_x(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::x_axis(), angle)
    }

    fn rotation_y(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), angle)
    }

    fn rotation_z(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::z_axis(), angle)
    }

    fn euler_zxy(angles: &Vec3) -> Mat4 {
        Mat4::rotation_z(angles.z) * Mat4::rotation_x(angles.x) * Mat4::rotation_y(angles.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_rotation_z_turns_x_into_y() {
        let rotated = Mat4::rotation_z(constants::PI / 2.0).transform_vector(&Vec3::x());
        assert_relative_eq!(rotated, Vec3::y(), epsilon = EPSILON);
    }

    #[test]
    fn test_euler_order_is_z_then_x_then_y() {
        let angles = Vec3::new(0.3, -1.1, 0.7);
        let expected = Mat4::rotation_z(0.7) * Mat4::rotation_x(0.3) * Mat4::rotation_y(-1.1);
        assert_relative_eq!(Mat4::euler_zxy(&angles), expected, epsilon = EPSILON);

        // A different order gives a visibly different matrix
        let xyz = Mat4::rotation_x(0.3) * Mat4::rotation_y(-1.1) * Mat4::rotation_z(0.7);
        assert!((Mat4::euler_zxy(&angles) - xyz).abs().max() > 1e-3);
    }

    #[test]
    fn test_translation_of() {
        let m = Mat4::translation(&Vec3::new(1.0, -2.0, 3.5));
        assert_eq!(utils::translation_of(&m), Vec3::new(1.0, -2.0, 3.5));
    }
}
