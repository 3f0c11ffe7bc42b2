//! # Scene Node
//!
//! A node owns its geometry, its placement parameters, its physical state and,
//! by value, its children. World matrices are never stored: every render
//! composes `parent * local` on the way down the tree.
//!
//! ## Local matrix
//!
//! ```text
//! T(position) · T(center ⊙ scale) · Rz · Rx · Ry · S(scale) · T(-center) · base
//! ```
//!
//! Orientation is three independent Euler angles applied in Z, X, Y order.
//! It is not a composable rotation; changing the order changes what is drawn.

use super::physics::PhysicsBody;
use super::SceneError;
use crate::config::PhysicsConfig;
use crate::foundation::math::{Mat4, Mat4Ext, Vec3};
use crate::render::{DrawableHandle, Material, UniformSink, UniformValue, MODEL_UNIFORM};

/// Hierarchical scene object
pub struct SceneNode {
    name: String,
    drawables: Vec<DrawableHandle>,
    children: Vec<SceneNode>,

    position: Vec3,
    orientation: Vec3,
    scale: Vec3,
    center: Vec3,
    base_transform: Mat4,

    body: PhysicsBody,
    material: Material,
}

impl SceneNode {
    /// Create a node from its drawables
    ///
    /// A node without geometry is not a valid state, so an empty list is
    /// rejected with [`SceneError::NoDrawables`].
    pub fn new(drawables: Vec<DrawableHandle>) -> Result<Self, SceneError> {
        Self::with_base_transform(drawables, Mat4::identity())
    }

    /// Create a node whose geometry is first transformed by `base_transform`
    ///
    /// Importers use the base transform to carry a mesh's own coordinate
    /// system; it is applied after every procedural transform.
    pub fn with_base_transform(drawables: Vec<DrawableHandle>, base_transform: Mat4) -> Result<Self, SceneError> {
        if drawables.is_empty() {
            return Err(SceneError::NoDrawables);
        }
        Ok(Self {
            name: String::new(),
            drawables,
            children: Vec::new(),
            position: Vec3::zeros(),
            orientation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            center: Vec3::zeros(),
            base_transform,
            body: PhysicsBody::default(),
            material: Material::default(),
        })
    }

    /// Builder pattern: set the debug name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Builder pattern: set the position
    #[must_use]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    // --- Accessors ---

    /// Debug name (importers fill this from the source file)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position of the local origin in parent space
    pub fn position(&self) -> &Vec3 {
        &self.position
    }

    /// Euler angles in radians (applied Z, X, Y)
    pub fn orientation(&self) -> &Vec3 {
        &self.orientation
    }

    /// Per-axis scale
    pub fn scale(&self) -> &Vec3 {
        &self.scale
    }

    /// Local point that rotation and scaling pivot around
    pub fn center(&self) -> &Vec3 {
        &self.center
    }

    /// Matrix applied to the geometry before anything else
    pub fn base_transform(&self) -> &Mat4 {
        &self.base_transform
    }

    /// Reflectance coefficients
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Drawables rendered by this node
    pub fn drawables(&self) -> &[DrawableHandle] {
        &self.drawables
    }

    /// Physical state
    pub fn body(&self) -> &PhysicsBody {
        &self.body
    }

    /// Mutable physical state
    pub fn body_mut(&mut self) -> &mut PhysicsBody {
        &mut self.body
    }

    /// Linear velocity
    pub fn velocity(&self) -> &Vec3 {
        &self.body.velocity
    }

    /// Linear acceleration
    pub fn acceleration(&self) -> &Vec3 {
        &self.body.acceleration
    }

    /// Angular velocity
    pub fn rotational_velocity(&self) -> &Vec3 {
        &self.body.angular_velocity
    }

    /// Angular acceleration
    pub fn rotational_acceleration(&self) -> &Vec3 {
        &self.body.angular_acceleration
    }

    /// Mass
    pub fn mass(&self) -> f32 {
        self.body.mass()
    }

    /// Forces accumulated for the next tick (gravity first)
    pub fn forces(&self) -> &[Vec3] {
        self.body.forces()
    }

    // --- Mutators ---

    /// Set the debug name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Set the position
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Set the Euler angles
    pub fn set_orientation(&mut self, orientation: Vec3) {
        self.orientation = orientation;
    }

    /// Set the scale
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    /// Set the rotation/scale pivot, otherwise the local origin
    pub fn set_center(&mut self, center: Vec3) {
        self.center = center;
    }

    /// Set the reflectance coefficients
    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    /// Set the linear velocity
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.body.velocity = velocity;
    }

    /// Set the linear acceleration (kinematic nodes keep it across ticks)
    pub fn set_acceleration(&mut self, acceleration: Vec3) {
        self.body.acceleration = acceleration;
    }

    /// Set the angular velocity
    pub fn set_rotational_velocity(&mut self, velocity: Vec3) {
        self.body.angular_velocity = velocity;
    }

    /// Set the angular acceleration
    pub fn set_rotational_acceleration(&mut self, acceleration: Vec3) {
        self.body.angular_acceleration = acceleration;
    }

    /// Set the mass; drops pending custom forces and re-seeds gravity
    pub fn set_mass(&mut self, mass: f32) -> Result<(), SceneError> {
        self.body.set_mass(mass)
    }

    /// Add a force for the next tick only
    pub fn add_force(&mut self, force: Vec3) {
        self.body.add_force(force);
    }

    /// Drop pending custom forces, keeping gravity
    pub fn clear_forces(&mut self) {
        self.body.clear_forces();
    }

    /// Apply physics constants to this node and every descendant
    pub fn set_physics_config(&mut self, config: PhysicsConfig) {
        self.body.set_config(config);
        for child in &mut self.children {
            child.set_physics_config(config);
        }
    }

    // --- Transformations ---

    /// Translate by `offset`
    pub fn move_by(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Add to the Euler angles
    pub fn rotate_by(&mut self, angles: Vec3) {
        self.orientation += angles;
    }

    /// Multiply the scale component-wise
    pub fn grow(&mut self, factor: Vec3) {
        self.scale.component_mul_assign(&factor);
    }

    // --- Children ---

    /// Take ownership of `child`, appending it after existing children
    pub fn add_child(&mut self, child: SceneNode) {
        log::debug!("Attaching '{}' under '{}'", child.name, self.name);
        self.children.push(child);
    }

    /// Number of direct children
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Direct child by index
    pub fn child(&self, index: usize) -> Result<&SceneNode, SceneError> {
        let len = self.children.len();
        self.children.get(index).ok_or(SceneError::ChildNotFound { index, len })
    }

    /// Mutable direct child by index
    pub fn child_mut(&mut self, index: usize) -> Result<&mut SceneNode, SceneError> {
        let len = self.children.len();
        self.children.get_mut(index).ok_or(SceneError::ChildNotFound { index, len })
    }

    /// Direct children in order
    pub fn children(&self) -> impl Iterator<Item = &SceneNode> {
        self.children.iter()
    }

    // --- Per frame ---

    /// Local -> parent matrix
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::translation(&self.position)
            * Mat4::translation(&self.center.component_mul(&self.scale))
            * Mat4::euler_zxy(&self.orientation)
            * Mat4::scaling(&self.scale)
            * Mat4::translation(&-self.center)
            * self.base_transform
    }

    /// Run one physics step on this node, then on every descendant
    ///
    /// Each node integrates independently; only rendering is hierarchical.
    pub fn tick(&mut self, dt: f32) {
        self.body.integrate(&mut self.position, dt);
        for child in &mut self.children {
            child.tick(dt);
        }
    }

    /// Render this subtree as a root
    pub fn render(&self, sink: &mut dyn UniformSink) {
        self.render_with_parent(sink, &Mat4::identity());
    }

    /// Render this subtree below a parent whose world matrix is `parent`
    pub fn render_with_parent(&self, sink: &mut dyn UniformSink, parent: &Mat4) {
        let world = parent * self.local_matrix();
        sink.set_uniform(MODEL_UNIFORM, UniformValue::Mat4(world));
        for drawable in &self.drawables {
            drawable.render(sink);
        }
        for child in &self.children {
            child.render_with_parent(sink, &world);
        }
    }
}

impl std::fmt::Debug for SceneNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneNode")
            .field("name", &self.name)
            .field("drawables", &self.drawables.len())
            .field("position", &self.position)
            .field("orientation", &self.orientation)
            .field("scale", &self.scale)
            .field("body", &self.body)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}
