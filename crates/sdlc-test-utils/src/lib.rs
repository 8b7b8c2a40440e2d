//! Testing utilities for the SDLC map workspace
//!
//! Shared fixtures and proptest strategies for process trees.

#![allow(missing_docs)]

use proptest::prelude::*;
use sdlc_tree::TreeNode;

/// Names drawn from a small pool so generated trees contain duplicates.
pub const COLLIDING_NAMES: &[&str] = &["Plan", "Build", "Test", "plan", "Review"];

/// Linear chain `names[0] -> names[1] -> ...`, built bottom-up without recursion.
///
/// # Panics
/// When `names` is empty.
pub fn chain(names: &[&str]) -> TreeNode {
    let (last, rest) = names.split_last().expect("chain needs at least one name");
    let mut node = TreeNode::new(*last);
    for name in rest.iter().rev() {
        node = TreeNode::new(*name).with_child(node);
    }
    node
}

/// Chain of `depth + 1` nodes named `n0`, `n1`, ...
pub fn deep_chain(depth: usize) -> TreeNode {
    let mut node = TreeNode::new(format!("n{depth}"));
    for i in (0..depth).rev() {
        node = TreeNode::new(format!("n{i}")).with_child(node);
    }
    node
}

/// Small mixed tree: `R -> {Plan -> {Scope, Budget}, Build -> {Code}, Ship}`
pub fn sample_tree() -> TreeNode {
    TreeNode::new("R").with_children([
        TreeNode::new("Plan")
            .with_level(1)
            .with_children([
                TreeNode::new("Scope").with_level(2),
                TreeNode::new("Budget").with_level(2),
            ]),
        TreeNode::new("Build")
            .with_level(1)
            .with_child(TreeNode::new("Code").with_level(2)),
        TreeNode::new("Ship").with_level(1),
    ])
}

pub fn arb_name() -> impl Strategy<Value = String> {
    "\\PC{0,16}"
}

pub fn arb_colliding_name() -> impl Strategy<Value = String> {
    prop::sample::select(COLLIDING_NAMES).prop_map(str::to_string)
}

/// Coverage in half-percent steps, exact in binary and in JSON text
pub fn arb_percentage() -> impl Strategy<Value = f64> {
    (0u32..=200).prop_map(|halves| f64::from(halves) / 2.0)
}

fn arb_node(name: impl Strategy<Value = String> + 'static) -> BoxedStrategy<TreeNode> {
    (
        name,
        prop::option::of(1..=5u32),
        prop::option::of(arb_percentage()),
    )
        .prop_map(|(name, level, pct)| {
            TreeNode::new(name)
                .with_level_opt(level)
                .with_ai_percentage_opt(pct)
        })
        .boxed()
}

fn grow(leaf: BoxedStrategy<TreeNode>) -> impl Strategy<Value = TreeNode> {
    leaf.clone().prop_recursive(6, 64, 5, move |inner| {
        (leaf.clone(), prop::collection::vec(inner, 0..5))
            .prop_map(|(node, children)| node.with_children(children))
    })
}

/// Arbitrary tree with free-form names, up to six levels deep
pub fn arb_tree() -> impl Strategy<Value = TreeNode> {
    grow(arb_node(arb_name()))
}

/// Arbitrary tree whose names collide often
pub fn arb_colliding_tree() -> impl Strategy<Value = TreeNode> {
    grow(arb_node(arb_colliding_name()))
}
