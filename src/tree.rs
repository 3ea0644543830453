//! The tree aggregate: an id-indexed node map with value semantics.

use std::collections::HashMap;

use itertools::Itertools;
use tracing::instrument;

use crate::errors::{TreeError, TreeResult};
use crate::id::NodeId;
use crate::node::Node;
use crate::traverse::{Fold, PostOrder, PreOrder, Step};

/// An n-ary tree owning all of its nodes through an id-indexed map.
///
/// Every structural operation takes `&self` and returns a new `Tree` (or a
/// [`TreeError`]); a value handed out earlier is never observably changed.
/// Nodes are cross-referenced exclusively by [`NodeId`], so edits rewrite
/// the map instead of copying content graphs.
#[derive(Debug, Clone)]
pub struct Tree<T> {
    root: Option<NodeId>,
    nodes: HashMap<NodeId, Node<T>>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self {
            root: None,
            nodes: HashMap::new(),
        }
    }
}

impl<T> Tree<T> {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps `node` as the root of a fresh single-node tree.
    ///
    /// The node is normalized into root shape: parent cleared, level 0,
    /// children reset. Subtrees are attached through [`Tree::merge`], never
    /// by smuggling child ids in through a standalone node.
    #[must_use]
    pub fn with_root(node: Node<T>) -> Self {
        let mut root = node;
        root.parent = None;
        root.level = 0;
        root.children.clear();

        let id = root.id;
        let mut nodes = HashMap::new();
        nodes.insert(id, root);
        Self {
            root: Some(id),
            nodes,
        }
    }

    /// Number of nodes, O(1).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Membership test by id.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(&id)
    }

    pub fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    pub fn root(&self) -> Option<&Node<T>> {
        self.root.map(|id| self.node_ref(id))
    }

    /// Parent of the node at `id`; `None` for a root or an unknown id.
    pub fn parent(&self, id: NodeId) -> Option<&Node<T>> {
        self.get(id)
            .and_then(|node| node.parent)
            .map(|parent| self.node_ref(parent))
    }

    /// Children of the node at `id` in insertion order; empty for an
    /// unknown id.
    pub fn children(&self, id: NodeId) -> Vec<&Node<T>> {
        self.get(id)
            .map(|node| {
                node.children
                    .iter()
                    .map(|child| self.node_ref(*child))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Children of the parent of `id`, excluding `id` itself, order
    /// preserved.
    pub fn siblings(&self, id: NodeId) -> Vec<&Node<T>> {
        self.parent(id)
            .map(|parent| {
                parent
                    .children
                    .iter()
                    .filter(|child| **child != id)
                    .map(|child| self.node_ref(*child))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// All nodes, in map order (unordered with respect to traversal).
    pub fn nodes(&self) -> impl Iterator<Item = &Node<T>> {
        self.nodes.values()
    }

    /// Leaf nodes in pre-order.
    pub fn leaves(&self) -> impl Iterator<Item = &Node<T>> {
        self.iter().filter(|node| node.is_leaf())
    }

    /// Number of levels below and including the root; 0 for an empty tree.
    pub fn depth(&self) -> usize {
        self.nodes
            .values()
            .map(|node| node.level + 1)
            .max()
            .unwrap_or(0)
    }

    /// All nodes in pre-order: a node first, then each child subtree in
    /// listed order.
    ///
    /// # Panics
    ///
    /// Panics on a dangling child id; that means a prior operation broke the
    /// tree invariant.
    pub fn to_list(&self) -> Vec<&Node<T>> {
        self.iter().collect()
    }

    /// Lazy pre-order walk. Constructing a fresh iterator restarts it.
    pub fn iter(&self) -> PreOrder<'_, T> {
        PreOrder::new(self)
    }

    /// Lazy post-order walk: children before their parent.
    pub fn iter_post_order(&self) -> PostOrder<'_, T> {
        PostOrder::new(self)
    }

    /// Folds the pre-order sequence with early termination and suspension;
    /// see [`PreOrder::fold_steps`].
    pub fn fold_steps<B, F>(&self, init: B, step: F) -> Fold<'_, T, B>
    where
        F: FnMut(B, &Node<T>) -> Step<B>,
    {
        self.iter().fold_steps(init, step)
    }

    pub(crate) fn node_ref(&self, id: NodeId) -> &Node<T> {
        self.nodes
            .get(&id)
            .unwrap_or_else(|| panic!("dangling node id {id}: tree invariant violated"))
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        self.nodes
            .get_mut(&id)
            .unwrap_or_else(|| panic!("dangling node id {id}: tree invariant violated"))
    }

    /// Removes `id` from its parent's children list. No-op for a root.
    fn unlink(&mut self, id: NodeId) {
        if let Some(parent) = self.node_ref(id).parent {
            self.node_mut(parent).children.retain(|child| *child != id);
        }
    }

    /// Re-parents `id` as the last child of `parent`.
    fn link_last(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(id).parent = Some(parent);
        self.node_mut(parent).children.push(id);
    }

    /// Recomputes `level` through the whole subtree rooted at `id`.
    fn reindex_levels(&mut self, id: NodeId) {
        let base = match self.node_ref(id).parent {
            Some(parent) => self.node_ref(parent).level + 1,
            None => 0,
        };
        let mut stack = vec![(id, base)];
        while let Some((current, level)) = stack.pop() {
            self.node_mut(current).level = level;
            for child in self.node_ref(current).children.clone() {
                stack.push((child, level + 1));
            }
        }
    }

    /// Ids of the subtree rooted at `id`, `id` included.
    fn subtree_ids(&self, id: NodeId) -> Vec<NodeId> {
        let mut ids = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            ids.push(current);
            stack.extend(self.node_ref(current).children.iter().copied());
        }
        ids
    }
}

impl<T: Clone> Tree<T> {
    /// Appends `child` as the last child of `parent`, defaulting to the
    /// root; on an empty tree the child becomes the root.
    ///
    /// Re-adding an id that is already part of the tree moves that node (and
    /// its subtree) instead of duplicating it: the id is unlinked from its
    /// current position and appended to the target, with levels recomputed
    /// through its descendants. The stored name and content win over the
    /// ones passed in.
    ///
    /// # Panics
    ///
    /// Panics when `child` would become its own parent, when the target
    /// parent is not part of the tree, or when a re-added node would end up
    /// underneath its own subtree.
    #[must_use]
    #[instrument(level = "debug", skip(self, child), fields(child = %child.id()))]
    pub fn add_child(&self, child: Node<T>, parent: Option<NodeId>) -> Tree<T> {
        let Some(parent_id) = parent.or(self.root) else {
            return Tree::with_root(child);
        };
        assert!(
            child.id != parent_id,
            "node {parent_id} cannot be its own parent"
        );
        assert!(
            self.contains(parent_id),
            "cannot attach under {parent_id}: not part of the tree"
        );

        let mut tree = self.clone();
        let id = child.id;
        if tree.contains(id) {
            assert!(
                !self.subtree_ids(id).contains(&parent_id),
                "cannot move {id} under its own descendant {parent_id}"
            );
            tree.unlink(id);
            tree.link_last(id, parent_id);
            tree.reindex_levels(id);
        } else {
            let mut node = child;
            node.parent = Some(parent_id);
            node.level = tree.node_ref(parent_id).level + 1;
            node.children.clear();
            tree.nodes.insert(id, node);
            tree.node_mut(parent_id).children.push(id);
        }
        tree
    }

    /// Relocates a sibling group to the end of `new_parent`'s children,
    /// appended in the given order. An empty list is a no-op.
    ///
    /// The moved ids must all share one parent; each moved subtree has its
    /// levels recomputed.
    ///
    /// # Panics
    ///
    /// Panics when a moved id equals `new_parent` (a node cannot be its own
    /// parent).
    #[instrument(level = "debug", skip(self))]
    pub fn move_nodes(&self, ids: &[NodeId], new_parent: NodeId) -> TreeResult<Tree<T>> {
        if ids.is_empty() {
            return Ok(self.clone());
        }
        if let Some(duplicate) = ids.iter().duplicates().next() {
            return Err(TreeError::DuplicateId(*duplicate));
        }
        if let Some(missing) = ids.iter().find(|id| !self.contains(**id)) {
            return Err(TreeError::NodeNotFound(*missing));
        }
        if !self.contains(new_parent) {
            return Err(TreeError::NodeNotFound(new_parent));
        }
        assert!(
            !ids.contains(&new_parent),
            "node {new_parent} cannot be its own parent"
        );

        let expected = self.node_ref(ids[0]).parent;
        for id in &ids[1..] {
            let found = self.node_ref(*id).parent;
            if found != expected {
                return Err(TreeError::MixedParents {
                    id: *id,
                    expected,
                    found,
                });
            }
        }
        for id in ids {
            if self.subtree_ids(*id).contains(&new_parent) {
                return Err(TreeError::WouldCycle {
                    id: *id,
                    new_parent,
                });
            }
        }

        let mut tree = self.clone();
        for id in ids {
            tree.unlink(*id);
            tree.link_last(*id, new_parent);
            tree.reindex_levels(*id);
        }
        Ok(tree)
    }

    /// Removes the node at `id`, splicing its children into its place: they
    /// are re-parented to the deleted node's parent and take over its
    /// position in that parent's children list, relative order preserved.
    ///
    /// Deleting a childless root yields the empty tree; deleting a root that
    /// still has children is rejected with [`TreeError::RootHasChildren`].
    #[instrument(level = "debug", skip(self))]
    pub fn delete(&self, id: NodeId) -> TreeResult<Tree<T>> {
        let node = self.get(id).ok_or(TreeError::NodeNotFound(id))?;

        if self.root == Some(id) {
            if !node.is_leaf() {
                return Err(TreeError::RootHasChildren(id));
            }
            return Ok(Tree::new());
        }
        let parent = node
            .parent
            .unwrap_or_else(|| panic!("non-root node {id} has no parent: tree invariant violated"));

        let mut tree = self.clone();
        let promoted = tree.node_ref(id).children.clone();
        let position = tree
            .node_ref(parent)
            .children
            .iter()
            .position(|child| *child == id)
            .unwrap_or_else(|| {
                panic!("node {id} missing from its parent's children: tree invariant violated")
            });
        tree.node_mut(parent)
            .children
            .splice(position..=position, promoted.iter().copied());

        for child in &promoted {
            tree.node_mut(*child).parent = Some(parent);
            tree.reindex_levels(*child);
        }
        tree.nodes.remove(&id);
        Ok(tree)
    }

    /// Copies the subtree rooted at `id` into a brand-new independent tree;
    /// the source is left untouched. The new root has level 0 and no parent,
    /// descendant levels are rebased, child order is preserved.
    #[instrument(level = "debug", skip(self))]
    pub fn detach(&self, id: NodeId) -> TreeResult<Tree<T>> {
        if !self.contains(id) {
            return Err(TreeError::NodeNotFound(id));
        }

        let mut nodes = HashMap::new();
        let mut stack = vec![(id, 0usize, None)];
        while let Some((current, level, parent)) = stack.pop() {
            let mut node = self.node_ref(current).clone();
            node.parent = parent;
            node.level = level;
            for child in &node.children {
                stack.push((*child, level + 1, Some(current)));
            }
            nodes.insert(current, node);
        }
        Ok(Tree {
            root: Some(id),
            nodes,
        })
    }

    /// Removes the subtree rooted at `id`, returning `(remainder, subtree)`
    /// as two independent trees. Splitting at the root yields an empty
    /// remainder.
    #[instrument(level = "debug", skip(self))]
    pub fn split_off(&self, id: NodeId) -> TreeResult<(Tree<T>, Tree<T>)> {
        let detached = self.detach(id)?;
        if self.root == Some(id) {
            return Ok((Tree::new(), detached));
        }

        let mut remainder = self.clone();
        remainder.unlink(id);
        for removed in detached.nodes.keys() {
            remainder.nodes.remove(removed);
        }
        Ok((remainder, detached))
    }

    /// Grafts `branch` as the last child of the node at `at`. Merging an
    /// empty branch is a no-op.
    ///
    /// The two node maps must be disjoint; a shared id is rejected with
    /// [`TreeError::DuplicateId`]. Every branch node's level shifts by the
    /// grafted depth so the level invariant holds in the result.
    #[instrument(level = "debug", skip(self, branch))]
    pub fn merge(&self, branch: &Tree<T>, at: NodeId) -> TreeResult<Tree<T>> {
        let target = self.get(at).ok_or(TreeError::NodeNotFound(at))?;
        let Some(branch_root) = branch.root else {
            return Ok(self.clone());
        };
        if let Some(duplicate) = branch
            .nodes
            .keys()
            .copied()
            .find(|id| self.nodes.contains_key(id))
        {
            return Err(TreeError::DuplicateId(duplicate));
        }

        let shift = target.level + 1;
        let mut tree = self.clone();
        for node in branch.nodes.values() {
            let mut node = node.clone();
            node.level += shift;
            tree.nodes.insert(node.id, node);
        }
        tree.node_mut(branch_root).parent = Some(at);
        tree.node_mut(at).children.push(branch_root);
        Ok(tree)
    }

    /// Replaces the name and content of the node at `id`; its parent, level
    /// and children are preserved no matter what the replacement carries.
    /// The replacement's own id and linkage are ignored.
    ///
    /// # Panics
    ///
    /// Panics when `id` is not part of the tree; existence is the caller's
    /// precondition.
    #[must_use]
    #[instrument(level = "debug", skip(self, replacement))]
    pub fn put(&self, id: NodeId, replacement: Node<T>) -> Tree<T> {
        assert!(
            self.contains(id),
            "cannot replace node {id}: not part of the tree"
        );
        let mut tree = self.clone();
        let node = tree.node_mut(id);
        node.name = replacement.name;
        node.content = replacement.content;
        tree
    }

    /// Applies `f` to every node's content, each node visited exactly once;
    /// nodes without content stay untouched.
    #[must_use]
    #[instrument(level = "debug", skip(self, f))]
    pub fn update_content<F>(&self, f: F) -> Tree<T>
    where
        F: Fn(&T) -> T,
    {
        let mut tree = self.clone();
        for node in tree.nodes.values_mut() {
            if let Some(content) = node.content.take() {
                node.content = Some(f(&content));
            }
        }
        tree
    }

    /// Same as [`Tree::update_content`], restricted to leaf nodes.
    #[must_use]
    #[instrument(level = "debug", skip(self, f))]
    pub fn update_leaves<F>(&self, f: F) -> Tree<T>
    where
        F: Fn(&T) -> T,
    {
        let mut tree = self.clone();
        for node in tree.nodes.values_mut().filter(|node| node.is_leaf()) {
            if let Some(content) = node.content.take() {
                node.content = Some(f(&content));
            }
        }
        tree
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a Node<T>;
    type IntoIter = PreOrder<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_root_normalizes_the_node_into_root_shape() {
        let base = Tree::with_root(Node::<i32>::new("root"));
        let tree = base.add_child(Node::new("child"), None);
        let child_id = tree.root().unwrap().children()[0];

        // A node cloned out of a tree carries linkage; wrapping it as a new
        // root must reset all of it.
        let carried = tree.get(child_id).unwrap().clone();
        let fresh = Tree::with_root(carried);

        let root = fresh.root().unwrap();
        assert_eq!(fresh.len(), 1);
        assert!(root.is_root());
        assert!(root.is_leaf());
        assert_eq!(root.level(), 0);
    }

    #[test]
    fn add_child_resets_linkage_of_fresh_nodes() {
        let tree = Tree::with_root(Node::<i32>::new("root"));
        let other = tree.add_child(Node::new("a"), None);
        let a = other.root().unwrap().children()[0];

        // Same node value inserted into an unrelated tree: the id is unknown
        // there, so it comes in fresh with parent and children reset.
        let carried = other.get(a).unwrap().clone();
        let target = Tree::with_root(Node::<i32>::new("elsewhere"));
        let target = target.add_child(carried, None);

        let inserted = target.get(a).unwrap();
        assert_eq!(inserted.level(), 1);
        assert!(inserted.is_leaf());
        assert_eq!(inserted.parent_id(), target.root_id());
    }
}
