use thiserror::Error;

/// Scene graph errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// A node must be built from at least one drawable
    #[error("Scene node requires at least one drawable")]
    NoDrawables,

    /// Mass must be finite and non-negative
    #[error("Invalid mass {0}: mass must be finite and >= 0")]
    InvalidMass(f32),

    /// Child index past the end of a node's children
    #[error("Child index {index} out of range (node has {len} children)")]
    ChildNotFound {
        /// Requested index
        index: usize,
        /// Number of children
        len: usize,
    },

    /// Root index past the end of the scene's roots
    #[error("Root index {index} out of range (scene has {len} roots)")]
    RootNotFound {
        /// Requested index
        index: usize,
        /// Number of roots
        len: usize,
    },
}
