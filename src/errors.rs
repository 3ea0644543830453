use thiserror::Error;

use crate::id::NodeId;

/// Recoverable failures of the tree operations.
///
/// Contract violations (self-parenting, attaching under an unknown parent,
/// replacing a node that does not exist, traversing a dangling child id) are
/// not represented here; those panic at the violation site with a message
/// naming the broken precondition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("moved nodes must share a parent: {id} has parent {found:?}, expected {expected:?}")]
    MixedParents {
        id: NodeId,
        expected: Option<NodeId>,
        found: Option<NodeId>,
    },

    #[error("moving {id} under {new_parent} would create a cycle")]
    WouldCycle { id: NodeId, new_parent: NodeId },

    #[error("cannot delete root {0} while it has children")]
    RootHasChildren(NodeId),

    #[error("duplicate node id: {0}")]
    DuplicateId(NodeId),
}

pub type TreeResult<T> = Result<T, TreeError>;
