//! Human-facing tree output.

use std::io;

use crate::node::Node;
use crate::tree::Tree;

impl<T> Tree<T> {
    /// Writes one line per node in pre-order: two spaces of indentation per
    /// level, `*` for internal nodes, `-` for leaves, then the label.
    pub fn write_tree<W, F>(&self, out: &mut W, label: F) -> io::Result<()>
    where
        W: io::Write,
        F: Fn(&Node<T>) -> String,
    {
        for node in self.iter() {
            let marker = if node.is_leaf() { '-' } else { '*' };
            writeln!(
                out,
                "{}{} {}",
                "  ".repeat(node.level()),
                marker,
                label(node)
            )?;
        }
        Ok(())
    }

    /// Prints the tree to stdout, labelling each node by name.
    pub fn print_tree(&self) {
        self.print_tree_with(|node| node.name().to_string());
    }

    /// Prints the tree to stdout with a caller-supplied label.
    pub fn print_tree_with<F>(&self, label: F)
    where
        F: Fn(&Node<T>) -> String,
    {
        let _ = self.write_tree(&mut io::stdout(), label);
    }
}

/// Conversion into a box-drawing [`termtree::Tree`] for display.
pub trait TreeFormat {
    fn to_tree_string(&self) -> termtree::Tree<String>;
}

impl<T> TreeFormat for Tree<T> {
    fn to_tree_string(&self) -> termtree::Tree<String> {
        match self.root() {
            Some(root) => branch(self, root),
            None => termtree::Tree::new("Empty tree".to_string()),
        }
    }
}

fn branch<T>(tree: &Tree<T>, node: &Node<T>) -> termtree::Tree<String> {
    let leaves: Vec<_> = tree
        .children(node.id())
        .into_iter()
        .map(|child| branch(tree, child))
        .collect();
    termtree::Tree::new(node.name().to_string()).with_leaves(leaves)
}
