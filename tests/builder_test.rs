//! Tests for TreeBuilder

use rstree::{NodeId, SequentialIds, TreeBuilder};

fn build_sample(source: SequentialIds) -> (rstree::Tree<i32>, Vec<NodeId>) {
    let mut builder = TreeBuilder::with_source(source);
    let root = builder.root("root");
    let a = builder.child(root, "a");
    let b = builder.child_with(root, "b", 2);
    let x = builder.child_with(a, "x", 10);
    (builder.build(), vec![root, a, b, x])
}

#[test]
fn given_sequential_source_when_building_twice_then_same_ids() {
    let (first, first_ids) = build_sample(SequentialIds::new());
    let (second, second_ids) = build_sample(SequentialIds::new());

    assert_eq!(first_ids, second_ids);
    let first_names: Vec<_> = first.iter().map(|node| node.name().to_string()).collect();
    let second_names: Vec<_> = second.iter().map(|node| node.name().to_string()).collect();
    assert_eq!(first_names, second_names);
}

#[test]
fn given_random_source_when_building_twice_then_distinct_ids() {
    let mut first = TreeBuilder::<i32, _>::new();
    let mut second = TreeBuilder::<i32, _>::new();

    assert_ne!(first.root("root"), second.root("root"));
}

#[test]
fn given_builder_when_nesting_children_then_levels_and_content_set() {
    let mut builder = TreeBuilder::with_source(SequentialIds::new());
    let root = builder.root_with("root", 1);
    let child = builder.child(root, "child");
    let grandchild = builder.child_with(child, "grandchild", 3);
    let tree = builder.build();

    assert_eq!(tree.len(), 3);
    assert_eq!(tree.get(root).unwrap().content(), Some(&1));
    assert_eq!(tree.get(child).unwrap().level(), 1);
    assert!(!tree.get(child).unwrap().has_content());
    assert_eq!(tree.get(grandchild).unwrap().level(), 2);
    assert_eq!(tree.get(grandchild).unwrap().parent_id(), Some(child));
}

#[test]
fn given_builder_when_root_called_again_then_tree_starts_over() {
    let mut builder = TreeBuilder::<i32, _>::with_source(SequentialIds::new());
    let first = builder.root("first");
    builder.child(first, "child");
    let second = builder.root("second");
    let tree = builder.build();

    assert_eq!(tree.len(), 1);
    assert_eq!(tree.root_id(), Some(second));
    assert!(!tree.contains(first));
}

#[test]
#[should_panic(expected = "not part of the tree")]
fn given_unknown_parent_when_adding_child_then_panics() {
    let mut builder = TreeBuilder::<i32, _>::with_source(SequentialIds::new());
    builder.root("root");
    builder.child(NodeId::random(), "orphan");
}
