//! Scenario tests across nodes, physics, animation and rendering

mod animation_scenarios;

use crate::render::MeshDrawable;
use crate::scene::SceneNode;

/// Single-mesh node named after its mesh
pub(super) fn mesh_node(name: &str) -> SceneNode {
    SceneNode::new(vec![MeshDrawable::new(name, 36).into_handle()])
        .expect("one drawable")
        .with_name(name)
}
