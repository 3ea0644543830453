//! Node identity.

use std::fmt;

use uuid::Uuid;

/// Opaque node identifier.
///
/// Backed by a v4 UUID so that ids stay unique across trees: `detach` copies
/// nodes into a brand-new tree and `merge` unions two node maps, so an id
/// must never depend on the map that currently holds it.
///
/// `Ord` is provided for ordered containers only; it carries no relation to
/// creation order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(Uuid);

impl NodeId {
    /// Creates a fresh random id.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub(crate) const fn from_u128(v: u128) -> Self {
        Self(Uuid::from_u128(v))
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source of node ids.
///
/// `Node` constructors default to [`RandomIds`]; inject [`SequentialIds`]
/// (e.g. through [`TreeBuilder`](crate::TreeBuilder)) where reproducible ids
/// matter, such as test fixtures.
pub trait IdSource {
    fn next_id(&mut self) -> NodeId;
}

/// Process randomness, the default id source.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&mut self) -> NodeId {
        NodeId::random()
    }
}

/// Deterministic counter for reproducible fixtures.
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> NodeId {
        let id = NodeId::from_u128(u128::from(self.next));
        self.next += 1;
        id
    }
}
