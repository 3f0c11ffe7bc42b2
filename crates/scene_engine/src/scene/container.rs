//! Top-level scene: the forest of root nodes plus what animates and lights it

use slotmap::{new_key_type, SlotMap};

use super::{NodePath, SceneError, SceneNode};
use crate::animation::{AnimationError, Animator};
use crate::config::PhysicsConfig;
use crate::render::{FirstPersonCamera, LightingRig, UniformSink};

new_key_type! {
    /// Stable handle to an animator owned by a [`Scene`]
    pub struct AnimatorKey;
}

/// Owns every root node, animator, light and the camera of a scene
///
/// A frame is always, in this order: animators, physics, render. Animation and
/// physics both write node positions and rendering reads the result.
pub struct Scene {
    roots: Vec<SceneNode>,
    animators: SlotMap<AnimatorKey, Animator>,
    lighting: LightingRig,
    camera: Option<FirstPersonCamera>,
    physics: PhysicsConfig,
}

impl Scene {
    /// Create an empty scene with the given physics constants
    pub fn new(physics: PhysicsConfig) -> Self {
        Self {
            roots: Vec::new(),
            animators: SlotMap::with_key(),
            lighting: LightingRig::default(),
            camera: None,
            physics,
        }
    }

    /// Take ownership of a tree; the returned path addresses its root
    ///
    /// The scene's physics constants are applied to the whole tree.
    pub fn add_root(&mut self, mut node: SceneNode) -> NodePath {
        node.set_physics_config(self.physics);
        log::debug!("Adding root '{}' as #{}", node.name(), self.roots.len());
        self.roots.push(node);
        NodePath::root(self.roots.len() - 1)
    }

    /// Root nodes in insertion order
    pub fn roots(&self) -> &[SceneNode] {
        &self.roots
    }

    /// Look up a node
    pub fn node(&self, path: &NodePath) -> Result<&SceneNode, SceneError> {
        path.resolve(&self.roots)
    }

    /// Look up a node for mutation
    pub fn node_mut(&mut self, path: &NodePath) -> Result<&mut SceneNode, SceneError> {
        path.resolve_mut(&mut self.roots)
    }

    /// Total number of nodes in every tree
    pub fn node_count(&self) -> usize {
        fn count(node: &SceneNode) -> usize {
            1 + node.children().map(count).sum::<usize>()
        }
        self.roots.iter().map(count).sum()
    }

    /// Take ownership of an animator
    pub fn add_animator(&mut self, animator: Animator) -> AnimatorKey {
        self.animators.insert(animator)
    }

    /// Animator by key
    pub fn animator(&self, key: AnimatorKey) -> Option<&Animator> {
        self.animators.get(key)
    }

    /// Mutable animator by key
    pub fn animator_mut(&mut self, key: AnimatorKey) -> Option<&mut Animator> {
        self.animators.get_mut(key)
    }

    /// Remove and return an animator
    pub fn remove_animator(&mut self, key: AnimatorKey) -> Option<Animator> {
        self.animators.remove(key)
    }

    /// Number of animators owned
    pub fn animator_count(&self) -> usize {
        self.animators.len()
    }

    /// Start every animator that is not already running
    pub fn start_animators(&mut self) {
        for animator in self.animators.values_mut() {
            animator.start();
        }
    }

    /// Whether every animator has finished all its tracks
    pub fn animations_finished(&self) -> bool {
        self.animators.values().all(Animator::is_finished)
    }

    /// Lights of the scene
    pub fn lighting(&self) -> &LightingRig {
        &self.lighting
    }

    /// Mutable lights of the scene
    pub fn lighting_mut(&mut self) -> &mut LightingRig {
        &mut self.lighting
    }

    /// Replace the lights
    pub fn set_lighting(&mut self, lighting: LightingRig) {
        self.lighting = lighting;
    }

    /// Active camera, if any
    pub fn camera(&self) -> Option<&FirstPersonCamera> {
        self.camera.as_ref()
    }

    /// Mutable active camera
    pub fn camera_mut(&mut self) -> Option<&mut FirstPersonCamera> {
        self.camera.as_mut()
    }

    /// Set the active camera
    pub fn set_camera(&mut self, camera: FirstPersonCamera) {
        self.camera = Some(camera);
    }

    /// Physics constants in effect
    pub fn physics_config(&self) -> &PhysicsConfig {
        &self.physics
    }

    /// Change the physics constants of every node
    pub fn set_physics_config(&mut self, physics: PhysicsConfig) {
        self.physics = physics;
        for root in &mut self.roots {
            root.set_physics_config(physics);
        }
    }

    /// Advance animation, then physics, by `dt` seconds
    ///
    /// Every animator and every node is advanced even when an animation
    /// target cannot be found; the first such error is returned afterwards.
    pub fn update(&mut self, dt: f32) -> Result<(), AnimationError> {
        let mut first_error = None;
        for animator in self.animators.values_mut() {
            if let Err(err) = animator.tick(dt, &mut self.roots) {
                first_error.get_or_insert(err);
            }
        }
        for root in &mut self.roots {
            root.tick(dt);
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Upload camera and lights, then draw every tree from the identity matrix
    pub fn render(&self, sink: &mut dyn UniformSink) {
        if let Some(camera) = &self.camera {
            camera.upload(sink);
        }
        self.lighting.upload(sink);
        for root in &self.roots {
            root.render(sink);
        }
    }

    /// One complete frame: [`Scene::update`] then [`Scene::render`]
    pub fn frame(&mut self, dt: f32, sink: &mut dyn UniformSink) -> Result<(), AnimationError> {
        self.update(dt)?;
        self.render(sink);
        Ok(())
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("roots", &self.roots.len())
            .field("nodes", &self.node_count())
            .field("animators", &self.animators.len())
            .field("physics", &self.physics)
            .finish_non_exhaustive()
    }
}
