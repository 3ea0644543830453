//! Immutable n-ary tree with id-indexed node storage.
//!
//! Every structural operation is a pure function from a [`Tree`] value to a
//! new [`Tree`] value (or a [`TreeError`]); a tree handed out earlier never
//! changes. Nodes carry stable opaque [`NodeId`]s and reference each other
//! only through the tree's id-indexed map, so structural edits (attach,
//! detach, move, merge, delete) rewrite the map instead of copying content
//! graphs.
//!
//! ```
//! use rstree::{Node, Tree};
//!
//! let tree = Tree::with_root(Node::<()>::new("Root"));
//! let tree = tree.add_child(Node::new("A"), None);
//! let tree = tree.add_child(Node::new("B"), None);
//!
//! assert_eq!(tree.len(), 3);
//! let names: Vec<_> = tree.iter().map(|node| node.name().to_string()).collect();
//! assert_eq!(names, ["Root", "A", "B"]);
//! ```

pub mod builder;
pub mod errors;
pub mod id;
pub mod node;
pub mod render;
pub mod traverse;
pub mod tree;

pub use builder::TreeBuilder;
pub use errors::{TreeError, TreeResult};
pub use id::{IdSource, NodeId, RandomIds, SequentialIds};
pub use node::Node;
pub use render::TreeFormat;
pub use traverse::{Fold, PostOrder, PreOrder, Step};
pub use tree::Tree;
