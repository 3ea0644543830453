//! Fluent tree construction.

use tracing::instrument;

use crate::id::{IdSource, NodeId, RandomIds};
use crate::node::Node;
use crate::tree::Tree;

/// Builds a tree node by node, drawing ids from an injected [`IdSource`].
///
/// With [`SequentialIds`](crate::SequentialIds) the same build sequence
/// yields the same ids every time, which is what reproducible fixtures need:
///
/// ```
/// use rstree::{SequentialIds, TreeBuilder};
///
/// let mut builder = TreeBuilder::<i32, _>::with_source(SequentialIds::new());
/// let root = builder.root("Root");
/// let branch = builder.child(root, "Branch");
/// builder.child_with(branch, "Leaf", 42);
/// let tree = builder.build();
///
/// assert_eq!(tree.len(), 3);
/// assert_eq!(tree.get(branch).unwrap().level(), 1);
/// ```
pub struct TreeBuilder<T, S = RandomIds> {
    tree: Tree<T>,
    source: S,
}

impl<T: Clone> TreeBuilder<T, RandomIds> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_source(RandomIds)
    }
}

impl<T: Clone> Default for TreeBuilder<T, RandomIds> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, S: IdSource> TreeBuilder<T, S> {
    #[must_use]
    pub fn with_source(source: S) -> Self {
        Self {
            tree: Tree::new(),
            source,
        }
    }

    /// Starts the tree over with a fresh root, returning its id.
    #[instrument(level = "trace", skip(self, name))]
    pub fn root(&mut self, name: impl Into<String>) -> NodeId {
        self.insert_root(name, None)
    }

    /// Starts the tree over with a fresh root carrying `content`.
    pub fn root_with(&mut self, name: impl Into<String>, content: T) -> NodeId {
        self.insert_root(name, Some(content))
    }

    /// Appends a child under `parent`, returning the new id.
    ///
    /// # Panics
    ///
    /// Panics when `parent` is not part of the tree being built.
    #[instrument(level = "trace", skip(self, name))]
    pub fn child(&mut self, parent: NodeId, name: impl Into<String>) -> NodeId {
        self.insert_child(parent, name, None)
    }

    /// Appends a child carrying `content` under `parent`.
    pub fn child_with(&mut self, parent: NodeId, name: impl Into<String>, content: T) -> NodeId {
        self.insert_child(parent, name, Some(content))
    }

    /// The finished tree.
    #[must_use]
    pub fn build(self) -> Tree<T> {
        self.tree
    }

    fn insert_root(&mut self, name: impl Into<String>, content: Option<T>) -> NodeId {
        let node = Node::with_source(&mut self.source, name, content);
        let id = node.id();
        self.tree = Tree::with_root(node);
        id
    }

    fn insert_child(&mut self, parent: NodeId, name: impl Into<String>, content: Option<T>) -> NodeId {
        let node = Node::with_source(&mut self.source, name, content);
        let id = node.id();
        self.tree = self.tree.add_child(node, Some(parent));
        id
    }
}
