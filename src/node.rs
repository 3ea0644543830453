//! Tree nodes.

use crate::id::{IdSource, NodeId, RandomIds};

/// A single tree node: identity, display name, optional payload, and its
/// position in the hierarchy.
///
/// The linkage fields (`parent`, `level`, `children`) are maintained by
/// [`Tree`](crate::Tree) operations alone; a freshly constructed node is
/// always standalone (no parent, level 0, no children) and only becomes part
/// of a hierarchy by being inserted into a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<T> {
    pub(crate) id: NodeId,
    pub(crate) name: String,
    pub(crate) content: Option<T>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) level: usize,
    pub(crate) children: Vec<NodeId>,
}

impl<T> Node<T> {
    /// Creates a node with a fresh random id and no content.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_source(&mut RandomIds, name, None)
    }

    /// Creates a node with a fresh random id carrying `content`.
    pub fn with_content(name: impl Into<String>, content: T) -> Self {
        Self::with_source(&mut RandomIds, name, Some(content))
    }

    /// Creates a node whose id is drawn from `source`.
    pub fn with_source(
        source: &mut impl IdSource,
        name: impl Into<String>,
        content: Option<T>,
    ) -> Self {
        Self {
            id: source.next_id(),
            name: name.into(),
            content,
            parent: None,
            level: 0,
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> Option<&T> {
        self.content.as_ref()
    }

    /// Id of the owning node, `None` for a root.
    pub fn parent_id(&self) -> Option<NodeId> {
        self.parent
    }

    /// Depth from the tree root; a root is at level 0.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Child ids in insertion order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }
}

impl<T> Default for Node<T> {
    /// An unnamed, contentless node with a fresh random id.
    fn default() -> Self {
        Self::new("")
    }
}
