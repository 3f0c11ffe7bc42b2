//! Lighting system
//!
//! Layered Phong lighting: one directional light plus bounded arrays of
//! point and spot lights, uploaded as uniforms each frame.

use thiserror::Error;

use super::backend::{UniformSink, UniformValue};
use crate::foundation::math::Vec3;

/// Size of the shader's point light array
pub const MAX_POINT_LIGHTS: usize = 10;

/// Size of the shader's spot light array
pub const MAX_SPOT_LIGHTS: usize = 10;

/// Lighting errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LightingError {
    /// The point light array is full
    #[error("Too many point lights (max {max})")]
    TooManyPointLights {
        /// Capacity of the array
        max: usize,
    },

    /// The spot light array is full
    #[error("Too many spot lights (max {max})")]
    TooManySpotLights {
        /// Capacity of the array
        max: usize,
    },
}

/// Ambient, diffuse and specular colors of a light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightColors {
    /// Ambient contribution
    pub ambient: Vec3,
    /// Diffuse contribution
    pub diffuse: Vec3,
    /// Specular contribution
    pub specular: Vec3,
}

impl LightColors {
    /// Create a color triple
    pub fn new(ambient: Vec3, diffuse: Vec3, specular: Vec3) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
        }
    }

    /// All three components black
    pub fn off() -> Self {
        Self::new(Vec3::zeros(), Vec3::zeros(), Vec3::zeros())
    }

    fn upload(&self, sink: &mut dyn UniformSink, prefix: &str) {
        sink.set_uniform(&format!("{prefix}.ambient"), self.ambient.into());
        sink.set_uniform(&format!("{prefix}.diffuse"), self.diffuse.into());
        sink.set_uniform(&format!("{prefix}.specular"), self.specular.into());
    }
}

/// Distance attenuation `1 / (constant + linear*d + quadratic*d^2)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attenuation {
    /// Constant term
    pub constant: f32,
    /// Linear term
    pub linear: f32,
    /// Quadratic term
    pub quadratic: f32,
}

impl Attenuation {
    /// Create an attenuation
    pub fn new(constant: f32, linear: f32, quadratic: f32) -> Self {
        Self {
            constant,
            linear,
            quadratic,
        }
    }

    /// Attenuation factor at a distance
    pub fn factor(&self, distance: f32) -> f32 {
        1.0 / (self.constant + self.linear * distance + self.quadratic * distance * distance)
    }

    fn upload(&self, sink: &mut dyn UniformSink, prefix: &str) {
        sink.set_uniform(&format!("{prefix}.constant"), self.constant.into());
        sink.set_uniform(&format!("{prefix}.linear"), self.linear.into());
        sink.set_uniform(&format!("{prefix}.quadratic"), self.quadratic.into());
    }
}

impl Default for Attenuation {
    /// Roughly a 50 unit reach
    fn default() -> Self {
        Self::new(1.0, 0.09, 0.032)
    }
}

/// Light with parallel rays (sun, moon)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Direction the light travels
    pub direction: Vec3,
    /// Light colors
    pub colors: LightColors,
}

impl DirectionalLight {
    /// Create a directional light
    pub fn new(direction: Vec3, colors: LightColors) -> Self {
        Self { direction, colors }
    }
}

/// Light radiating from a point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    /// World-space position
    pub position: Vec3,
    /// Distance falloff
    pub attenuation: Attenuation,
    /// Light colors
    pub colors: LightColors,
}

impl PointLight {
    /// Create a point light
    pub fn new(position: Vec3, attenuation: Attenuation, colors: LightColors) -> Self {
        Self {
            position,
            attenuation,
            colors,
        }
    }
}

/// Cone of light from a point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    /// World-space position
    pub position: Vec3,
    /// Direction of the cone axis
    pub direction: Vec3,
    /// Half-angle of the fully lit inner cone (radians)
    pub inner_cone: f32,
    /// Half-angle where the light reaches zero (radians)
    pub outer_cone: f32,
    /// Distance falloff
    pub attenuation: Attenuation,
    /// Light colors
    pub colors: LightColors,
}

impl SpotLight {
    /// Create a spot light
    pub fn new(
        position: Vec3,
        direction: Vec3,
        inner_cone: f32,
        outer_cone: f32,
        attenuation: Attenuation,
        colors: LightColors,
    ) -> Self {
        Self {
            position,
            direction,
            inner_cone,
            outer_cone,
            attenuation,
            colors,
        }
    }
}

/// All lights of a scene plus the global shininess
#[derive(Debug, Clone, PartialEq)]
pub struct LightingRig {
    /// Specular exponent shared by every surface
    pub shininess: f32,
    directional: Option<DirectionalLight>,
    points: Vec<PointLight>,
    spots: Vec<SpotLight>,
}

impl LightingRig {
    /// Create an empty rig
    pub fn new(shininess: f32) -> Self {
        Self {
            shininess,
            directional: None,
            points: Vec::new(),
            spots: Vec::new(),
        }
    }

    /// Set (or replace) the directional light
    pub fn set_directional(&mut self, light: DirectionalLight) {
        self.directional = Some(light);
    }

    /// Add a point light, returning its index in the shader array
    pub fn add_point_light(&mut self, light: PointLight) -> Result<usize, LightingError> {
        if self.points.len() >= MAX_POINT_LIGHTS {
            log::warn!("Dropping point light at {:?}: array is full", light.position);
            return Err(LightingError::TooManyPointLights { max: MAX_POINT_LIGHTS });
        }
        self.points.push(light);
        Ok(self.points.len() - 1)
    }

    /// Add a spot light, returning its index in the shader array
    pub fn add_spot_light(&mut self, light: SpotLight) -> Result<usize, LightingError> {
        if self.spots.len() >= MAX_SPOT_LIGHTS {
            log::warn!("Dropping spot light at {:?}: array is full", light.position);
            return Err(LightingError::TooManySpotLights { max: MAX_SPOT_LIGHTS });
        }
        self.spots.push(light);
        Ok(self.spots.len() - 1)
    }

    /// Directional light, if any
    pub fn directional(&self) -> Option<&DirectionalLight> {
        self.directional.as_ref()
    }

    /// Point lights in shader order
    pub fn point_lights(&self) -> &[PointLight] {
        &self.points
    }

    /// Mutable point light, for lights that move with the scene
    pub fn point_light_mut(&mut self, index: usize) -> Option<&mut PointLight> {
        self.points.get_mut(index)
    }

    /// Spot lights in shader order
    pub fn spot_lights(&self) -> &[SpotLight] {
        &self.spots
    }

    /// Mutable spot light (a flashlight that follows the camera)
    pub fn spot_light_mut(&mut self, index: usize) -> Option<&mut SpotLight> {
        self.spots.get_mut(index)
    }

    /// Upload every light to the bound program
    ///
    /// A missing directional light is uploaded as a black one so that a
    /// previous scene's sun does not leak into this one.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn upload(&self, sink: &mut dyn UniformSink) {
        sink.set_uniform("material.shininess", UniformValue::Float(self.shininess));

        let sun = self
            .directional
            .unwrap_or_else(|| DirectionalLight::new(Vec3::new(0.0, -1.0, 0.0), LightColors::off()));
        sink.set_uniform("dirLight.direction", sun.direction.into());
        sun.colors.upload(sink, "dirLight");

        sink.set_uniform("numPointLights", UniformValue::Int(self.points.len() as i32));
        for (i, light) in self.points.iter().enumerate() {
            let prefix = format!("pointLights[{i}]");
            sink.set_uniform(&format!("{prefix}.position"), light.position.into());
            light.attenuation.upload(sink, &prefix);
            light.colors.upload(sink, &prefix);
        }

        sink.set_uniform("numSpotLights", UniformValue::Int(self.spots.len() as i32));
        for (i, light) in self.spots.iter().enumerate() {
            let prefix = format!("spotLights[{i}]");
            sink.set_uniform(&format!("{prefix}.position"), light.position.into());
            sink.set_uniform(&format!("{prefix}.direction"), light.direction.into());
            sink.set_uniform(&format!("{prefix}.cutOff"), light.inner_cone.cos().into());
            sink.set_uniform(&format!("{prefix}.outerCutOff"), light.outer_cone.cos().into());
            light.attenuation.upload(sink, &prefix);
            light.colors.upload(sink, &prefix);
        }
    }
}

impl Default for LightingRig {
    fn default() -> Self {
        Self::new(32.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::recording::RecordingBackend;

    fn warm() -> LightColors {
        LightColors::new(Vec3::zeros(), Vec3::new(0.8, 0.8, 0.6), Vec3::new(1.0, 1.0, 0.75))
    }

    #[test]
    fn test_point_light_limit() {
        let mut rig = LightingRig::default();
        for i in 0..MAX_POINT_LIGHTS {
            let index = rig
                .add_point_light(PointLight::new(Vec3::zeros(), Attenuation::default(), warm()))
                .unwrap();
            assert_eq!(index, i);
        }
        let overflow = rig.add_point_light(PointLight::new(Vec3::zeros(), Attenuation::default(), warm()));
        assert_eq!(overflow, Err(LightingError::TooManyPointLights { max: MAX_POINT_LIGHTS }));
        assert_eq!(rig.point_lights().len(), MAX_POINT_LIGHTS);
    }

    #[test]
    fn test_upload_names() {
        let mut rig = LightingRig::new(16.0);
        rig.set_directional(DirectionalLight::new(Vec3::new(0.0, -1.0, -1.0), warm()));
        rig.add_point_light(PointLight::new(Vec3::new(0.0, 20.0, 0.0), Attenuation::default(), warm()))
            .unwrap();
        rig.add_spot_light(SpotLight::new(
            Vec3::new(0.0, 5.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
            0.0,
            std::f32::consts::FRAC_PI_3,
            Attenuation::default(),
            warm(),
        ))
        .unwrap();

        let mut backend = RecordingBackend::new();
        rig.upload(&mut backend);

        assert_eq!(backend.uniform("material.shininess"), Some(&UniformValue::Float(16.0)));
        assert_eq!(backend.uniform("numPointLights"), Some(&UniformValue::Int(1)));
        assert_eq!(backend.uniform("numSpotLights"), Some(&UniformValue::Int(1)));
        assert_eq!(
            backend.uniform("pointLights[0].position"),
            Some(&UniformValue::Vec3(Vec3::new(0.0, 20.0, 0.0)))
        );
        assert_eq!(backend.uniform("pointLights[0].linear"), Some(&UniformValue::Float(0.09)));
        assert_eq!(backend.uniform("spotLights[0].cutOff"), Some(&UniformValue::Float(1.0)));
        match backend.uniform("spotLights[0].outerCutOff") {
            Some(UniformValue::Float(c)) => assert!((c - 0.5).abs() < 1e-6),
            other => panic!("unexpected outer cut-off {other:?}"),
        }
        assert!(backend.uniform("dirLight.specular").is_some());
    }

    #[test]
    fn test_attenuation_factor() {
        let attenuation = Attenuation::new(1.0, 0.0, 0.0);
        assert_eq!(attenuation.factor(100.0), 1.0);
        assert!(Attenuation::default().factor(10.0) < Attenuation::default().factor(1.0));
    }
}
