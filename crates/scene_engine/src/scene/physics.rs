//! Per-node Newtonian physics
//!
//! Forces accumulate over a frame, become an acceleration at the next tick and
//! are then discarded; only gravity survives a clear. Integration is
//! semi-implicit Euler against a ground plane at y = 0 with kinetic friction.
//! Bodies do not collide with each other.

use super::SceneError;
use crate::config::PhysicsConfig;
use crate::foundation::math::{utils, Vec3};

/// Physical state of a scene node
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsBody {
    /// Mass; zero means kinematic (driven by animation, not by forces)
    mass: f32,

    /// Linear velocity in units per second
    pub velocity: Vec3,

    /// Linear acceleration in units per second squared
    pub acceleration: Vec3,

    /// Angular velocity in radians per second (stored, not integrated)
    pub angular_velocity: Vec3,

    /// Angular acceleration in radians per second squared (stored, not integrated)
    pub angular_acceleration: Vec3,

    /// Forces accumulated since the last tick; index 0 is always gravity
    forces: Vec<Vec3>,

    config: PhysicsConfig,
}

impl PhysicsBody {
    /// Create a unit-mass body at rest
    pub fn new(config: PhysicsConfig) -> Self {
        let mut body = Self {
            mass: 1.0,
            velocity: Vec3::zeros(),
            acceleration: Vec3::zeros(),
            angular_velocity: Vec3::zeros(),
            angular_acceleration: Vec3::zeros(),
            forces: Vec::with_capacity(4),
            config,
        };
        body.clear_forces();
        body
    }

    /// Mass of the body
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Set the mass and reset accumulated forces so gravity matches it
    ///
    /// Negative and non-finite masses are rejected; the body is left unchanged.
    pub fn set_mass(&mut self, mass: f32) -> Result<(), SceneError> {
        if !mass.is_finite() || mass < 0.0 {
            return Err(SceneError::InvalidMass(mass));
        }
        self.mass = mass;
        self.clear_forces();
        Ok(())
    }

    /// Physics constants in effect
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Replace the physics constants, keeping any custom forces already added
    pub fn set_config(&mut self, config: PhysicsConfig) {
        self.config = config;
        self.forces[0] = self.gravity_force();
    }

    /// Weight of the body under the configured gravity
    pub fn gravity_force(&self) -> Vec3 {
        self.config.gravity * self.mass
    }

    /// Forces accumulated for the next tick, gravity first
    pub fn forces(&self) -> &[Vec3] {
        &self.forces
    }

    /// Add a force for the next tick only
    pub fn add_force(&mut self, force: Vec3) {
        self.forces.push(force);
    }

    /// Drop every force except gravity
    pub fn clear_forces(&mut self) {
        self.forces.clear();
        self.forces.push(self.gravity_force());
    }

    /// Sum of the accumulated forces
    pub fn net_force(&self) -> Vec3 {
        self.forces.iter().sum()
    }

    /// Whether `position` counts as resting on the ground plane
    pub fn is_grounded(&self, position: &Vec3) -> bool {
        position.y.abs() <= self.config.ground_tolerance
    }

    /// Advance the body and `position` by `dt` seconds
    pub fn integrate(&mut self, position: &mut Vec3, dt: f32) {
        let horizontal_before = utils::horizontal(&self.velocity);
        let mut friction = None;

        if self.is_grounded(position) {
            let driving = utils::horizontal(&self.net_force()).norm();
            let speed = horizontal_before.norm();
            let magnitude = self.config.gravity.y.abs() * self.config.friction_coefficient * self.mass;
            if speed <= 0.0 {
                // At rest on the ground only gravity remains
                self.clear_forces();
            } else if magnitude > 0.0 {
                self.add_force(-horizontal_before / speed * magnitude);
                friction = Some((magnitude, driving));
            }
            // Normal force from the ground cancels the vertical pull
            self.add_force(Vec3::new(0.0, -self.gravity_force().y, 0.0));
        }

        if self.mass > 0.0 {
            self.acceleration = self.net_force() / self.mass;
        }
        self.clear_forces();

        if position.y < 0.0 && self.mass != 0.0 {
            position.y = 0.0;
        }

        self.velocity += self.acceleration * dt;

        // Kinetic friction may stop a slide but never reverse it. Static
        // friction then holds unless something pushes harder than it.
        if let Some((magnitude, driving)) = friction {
            let horizontal_after = utils::horizontal(&self.velocity);
            if horizontal_after.dot(&horizontal_before) <= 0.0 && driving <= magnitude {
                self.velocity.x = 0.0;
                self.velocity.z = 0.0;
                log::trace!("Friction brought body to rest");
            }
        }

        *position += self.velocity * dt;

        if position.y < 0.0 {
            position.y = 0.0;
            self.velocity.y = self.velocity.y.max(0.0);
        }
    }
}

impl Default for PhysicsBody {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}
