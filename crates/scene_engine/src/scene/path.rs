//! Addressing nodes inside a forest of owned trees
//!
//! Children are owned by value, so there is nothing to hold a pointer to.
//! Instead a node is named by the root it hangs under and the child index
//! taken at every level below it.

use std::fmt;

use super::{SceneError, SceneNode};

/// Location of a node: a root index followed by child indices
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodePath {
    root: usize,
    children: Vec<usize>,
}

impl NodePath {
    /// Path to a root node
    pub fn root(index: usize) -> Self {
        Self {
            root: index,
            children: Vec::new(),
        }
    }

    /// Path to the `index`-th child of this node
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        let mut path = self.clone();
        path.children.push(index);
        path
    }

    /// Index of the root this path starts from
    pub fn root_index(&self) -> usize {
        self.root
    }

    /// Child indices below the root
    pub fn child_indices(&self) -> &[usize] {
        &self.children
    }

    /// Number of levels below the root
    pub fn depth(&self) -> usize {
        self.children.len()
    }

    /// Look the node up in `roots`
    pub fn resolve<'a>(&self, roots: &'a [SceneNode]) -> Result<&'a SceneNode, SceneError> {
        let mut node = roots.get(self.root).ok_or(SceneError::RootNotFound {
            index: self.root,
            len: roots.len(),
        })?;
        for &index in &self.children {
            node = node.child(index)?;
        }
        Ok(node)
    }

    /// Look the node up in `roots` for mutation
    pub fn resolve_mut<'a>(&self, roots: &'a mut [SceneNode]) -> Result<&'a mut SceneNode, SceneError> {
        let len = roots.len();
        let mut node = roots.get_mut(self.root).ok_or(SceneError::RootNotFound { index: self.root, len })?;
        for &index in &self.children {
            node = node.child_mut(index)?;
        }
        Ok(node)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.root)?;
        for index in &self.children {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::MeshDrawable;

    fn node(name: &str) -> SceneNode {
        SceneNode::new(vec![MeshDrawable::new(name, 3).into_handle()])
            .unwrap()
            .with_name(name)
    }

    fn forest() -> Vec<SceneNode> {
        let mut boat = node("boat");
        boat.add_child(node("mast"));
        let mut deck = node("deck");
        deck.add_child(node("tiger"));
        boat.add_child(deck);
        vec![node("floor"), boat]
    }

    #[test]
    fn test_resolve_nested() {
        let roots = forest();
        let tiger = NodePath::root(1).child(1).child(0);
        assert_eq!(tiger.resolve(&roots).unwrap().name(), "tiger");
        assert_eq!(tiger.depth(), 2);
        assert_eq!(tiger.to_string(), "/1/1/0");
    }

    #[test]
    fn test_resolve_mut_allows_edits() {
        let mut roots = forest();
        let mast = NodePath::root(1).child(0);
        mast.resolve_mut(&mut roots).unwrap().set_name("main mast");
        assert_eq!(roots[1].child(0).unwrap().name(), "main mast");
    }

    #[test]
    fn test_missing_nodes_are_errors() {
        let roots = forest();
        assert_eq!(
            NodePath::root(5).resolve(&roots).err(),
            Some(SceneError::RootNotFound { index: 5, len: 2 })
        );
        assert_eq!(
            NodePath::root(1).child(4).resolve(&roots).err(),
            Some(SceneError::ChildNotFound { index: 4, len: 2 })
        );
    }
}
