//! Scene graph
//!
//! Trees of [`SceneNode`]s, each owning its children by value, collected in a
//! [`Scene`]. Rendering is hierarchical (a child's world matrix is its
//! parent's world matrix times its own local matrix); physics is not (every
//! node integrates on its own, wherever it sits in the tree).
//!
//! ## Per-frame order
//!
//! ```text
//! Animator::tick   (every animator)
//!      ↓
//! SceneNode::tick  (every root, recursively)
//!      ↓
//! SceneNode::render(identity)
//! ```

mod container;
mod error;
mod node;
mod path;
pub mod physics;

#[cfg(test)]
mod tests;

pub use container::{AnimatorKey, Scene};
pub use error::SceneError;
pub use node::SceneNode;
pub use path::NodePath;
pub use physics::PhysicsBody;
