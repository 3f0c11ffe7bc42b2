use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::foundation::math::Vec3;

/// # Physics Configuration
///
/// Constants of the per-node integrator. A copy is stored on every node so
/// that `SceneNode::tick` needs no outside context.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravitational acceleration (units / s^2)
    pub gravity: Vec3,
    /// Coefficient of kinetic friction against the ground plane
    pub friction_coefficient: f32,
    /// Distance from y = 0 within which a node counts as resting on the ground
    pub ground_tolerance: f32,
}

impl PhysicsConfig {
    /// Default gravity of the scene: a deliberately heavy -38 on Y
    pub const DEFAULT_GRAVITY: Vec3 = Vec3::new(0.0, -38.0, 0.0);

    /// Create a physics configuration with default constants
    pub fn new() -> Self {
        Self {
            gravity: Self::DEFAULT_GRAVITY,
            friction_coefficient: 0.5,
            ground_tolerance: 1e-5,
        }
    }

    /// Set gravity
    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the friction coefficient
    pub fn with_friction(mut self, coefficient: f32) -> Self {
        self.friction_coefficient = coefficient;
        self
    }

    /// Set the ground contact tolerance
    pub fn with_ground_tolerance(mut self, tolerance: f32) -> Self {
        self.ground_tolerance = tolerance;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.gravity.iter().all(|c| c.is_finite()) {
            return Err(ConfigError::Invalid(format!("gravity must be finite, got {:?}", self.gravity)));
        }
        if self.friction_coefficient.is_nan() || self.friction_coefficient < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "friction_coefficient must be >= 0, got {}",
                self.friction_coefficient
            )));
        }
        if self.ground_tolerance.is_nan() || self.ground_tolerance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "ground_tolerance must be >= 0, got {}",
                self.ground_tolerance
            )));
        }
        Ok(())
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Viewer Configuration
///
/// Settings for the headless driver loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Name of the demonstration scene to build
    pub scene: String,
    /// Number of frames to run before exiting
    pub frame_count: u32,
    /// Fixed frame delta; measured wall-clock time when absent
    pub fixed_dt: Option<f32>,
    /// Upper bound on a measured frame delta
    pub max_frame_dt: f32,
    /// Default log filter
    pub log_level: String,
}

impl ViewerConfig {
    /// Create a viewer configuration with defaults
    pub fn new() -> Self {
        Self {
            scene: "life_of_pi".to_string(),
            frame_count: 600,
            fixed_dt: Some(1.0 / 60.0),
            max_frame_dt: 0.1,
            log_level: "info".to_string(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(dt) = self.fixed_dt {
            if dt.is_nan() || dt <= 0.0 {
                return Err(ConfigError::Invalid(format!("fixed_dt must be > 0, got {dt}")));
            }
        }
        if self.max_frame_dt.is_nan() || self.max_frame_dt <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "max_frame_dt must be > 0, got {}",
                self.max_frame_dt
            )));
        }
        Ok(())
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Complete Scene Configuration
///
/// Top-level configuration read by the viewer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Physics constants
    pub physics: PhysicsConfig,
    /// Driver loop settings
    pub viewer: ViewerConfig,
}

impl SceneConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.physics.validate()?;
        self.viewer.validate()
    }
}

impl Config for SceneConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_physics_constants() {
        let physics = PhysicsConfig::default();
        assert_eq!(physics.gravity, Vec3::new(0.0, -38.0, 0.0));
        assert!(physics.validate().is_ok());
    }

    #[test]
    fn test_negative_friction_rejected() {
        let physics = PhysicsConfig::new().with_friction(-0.1);
        assert!(matches!(physics.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_nan_gravity_rejected() {
        let physics = PhysicsConfig::new().with_gravity(Vec3::new(0.0, f32::NAN, 0.0));
        assert!(physics.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: SceneConfig = toml::from_str(
            r#"
            [physics]
            friction_coefficient = 0.8

            [viewer]
            frame_count = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.physics.friction_coefficient, 0.8);
        assert_eq!(config.physics.gravity, PhysicsConfig::DEFAULT_GRAVITY);
        assert_eq!(config.viewer.frame_count, 10);
        assert_eq!(config.viewer.scene, "life_of_pi");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_ron_round_trip_through_files() {
        let dir = std::env::temp_dir().join(format!("scene_engine_cfg_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("scene.ron");
        let path = path.to_str().unwrap();

        let mut config = SceneConfig::default();
        config.viewer.frame_count = 42;
        config.physics.gravity = Vec3::new(0.0, -9.81, 0.0);
        config.save_to_file(path).unwrap();

        let loaded = SceneConfig::load_from_file(path).unwrap();
        assert_eq!(loaded, config);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_unsupported_extension() {
        let result = SceneConfig::default().save_to_file("scene.json");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}
