use pretty_assertions::assert_eq;
use proptest::prelude::*;
use sdlc_test_utils::{arb_colliding_name, arb_colliding_tree, arb_tree, chain, deep_chain, sample_tree};
use sdlc_tree::{default_tree, load, serialize, serialize_pretty, TreeNode, TreeStore};

#[test]
fn test_default_store_round_trips() {
    let store = TreeStore::default();
    let reloaded = TreeStore::from_json(&store.serialize()).unwrap();
    assert_eq!(reloaded, store);
    assert_eq!(reloaded.node_count(), 44);
}

#[test]
fn test_pretty_and_compact_decode_alike() {
    let tree = sample_tree();
    assert_eq!(load(&serialize_pretty(&tree)).unwrap(), load(&serialize(&tree)).unwrap());
}

#[test]
fn test_removing_a_phase_drops_its_activities() {
    let mut store = TreeStore::default();
    assert_eq!(store.remove_by_name("Design"), 1);
    assert_eq!(store.node_count(), 44 - 6);
    assert!(store.root().preorder().all(|n| n.name() != "Interface Design"));
}

#[test]
fn test_add_under_default_phase() {
    let mut store = TreeStore::default();
    let testing = store
        .root()
        .children()
        .iter()
        .find(|n| n.name() == "Testing")
        .map(TreeNode::key)
        .unwrap();

    let node = TreeNode::from_input("Security Review", "2").unwrap();
    let key = store.add_child(Some(testing), node).unwrap();

    let phase = store.find(testing).unwrap();
    assert_eq!(phase.children().last().map(TreeNode::key), Some(key));
    assert_eq!(store.node_count(), 45);
}

#[test]
fn test_deep_chain_operations_do_not_recurse() {
    let depth = 20_000;
    let mut store = TreeStore::new(deep_chain(depth));
    assert_eq!(store.node_count(), depth + 1);

    let leaf = format!("n{depth}");
    assert_eq!(store.set_ai_percentage(&leaf, 60.0).unwrap(), 1);
    assert_eq!(store.root().ai_percentage(), Some(60.0));

    assert_eq!(store.rename_by_name(&leaf, "tail").unwrap(), 1);
    assert_eq!(store.remove_by_name("n1"), 1);
    assert_eq!(store.node_count(), 1);
}

#[test]
fn test_deeply_nested_json_loads() {
    let mut input = String::from(r#"{"name":"leaf"}"#);
    for _ in 0..200 {
        input = format!(r#"{{"name":"n","children":[{input}]}}"#);
    }
    let tree = load(&input).unwrap();
    assert_eq!(tree.node_count(), 201);
    assert_eq!(tree.preorder().last().map(TreeNode::name), Some("leaf"));
}

#[test]
fn test_chain_of_64_round_trips() {
    let tree = deep_chain(64);
    let decoded = load(&serialize(&tree)).unwrap();
    assert_eq!(decoded, tree);
    assert_eq!(load(&serialize_pretty(&tree)).unwrap(), tree);
}

#[test]
fn test_chain_of_20k_round_trips() {
    let depth = 20_000;
    let tree = deep_chain(depth);
    let decoded = load(&serialize(&tree)).unwrap();
    // Debug output of a chain this deep would recurse, so no assert_eq here.
    assert!(decoded == tree);
    assert_eq!(decoded.node_count(), depth + 1);
    assert!(load(&serialize_pretty(&tree)).unwrap() == tree);
}

#[test]
fn test_store_grown_by_add_child_reloads() {
    let mut store = TreeStore::new(TreeNode::new("root"));
    let mut parent = None;
    for i in 0..80 {
        parent = store.add_child(parent, TreeNode::new(format!("step {i}")).with_level(1));
        assert!(parent.is_some());
    }
    let reloaded = TreeStore::from_json(&store.serialize()).unwrap();
    assert_eq!(reloaded.node_count(), 81);
    assert!(reloaded == store);
}

#[test]
fn test_deep_store_clones() {
    let store = TreeStore::new(deep_chain(20_000));
    let copy = store.clone();
    assert!(copy == store);
    assert_eq!(copy.root().key(), store.root().key());
}

#[test]
fn test_chain_fixture_shape() {
    let tree = chain(&["A", "B", "C"]);
    let names: Vec<_> = tree.preorder().map(TreeNode::name).collect();
    assert_eq!(names, ["A", "B", "C"]);
    assert_eq!(default_tree().children().len(), 6);
}

proptest! {
    #[test]
    fn prop_serialize_then_load_is_identity(tree in arb_tree()) {
        let decoded = load(&serialize(&tree)).unwrap();
        prop_assert_eq!(decoded, tree);
    }

    #[test]
    fn prop_removal_leaves_no_match_below_root(
        tree in arb_colliding_tree(),
        name in arb_colliding_name(),
    ) {
        let root_name = tree.name().to_string();
        let survivors: usize = tree
            .preorder()
            .skip(1)
            .filter(|n| n.name() != name)
            .count();
        // Every node under a non-root match goes with it
        let doomed: Vec<_> = tree
            .preorder()
            .skip(1)
            .filter(|n| n.name() == name)
            .flat_map(TreeNode::preorder)
            .map(TreeNode::key)
            .collect();
        let mut store = TreeStore::new(tree);
        store.remove_by_name(&name);

        prop_assert_eq!(store.root().name(), root_name.as_str());
        prop_assert!(store.root().preorder().skip(1).all(|n| n.name() != name));
        prop_assert!(store.node_count() <= survivors + 1);
        for key in doomed {
            prop_assert!(!store.contains(key));
        }
    }

    #[test]
    fn prop_removal_is_idempotent(tree in arb_colliding_tree(), name in arb_colliding_name()) {
        let mut store = TreeStore::new(tree);
        store.remove_by_name(&name);
        let once = store.clone();
        prop_assert_eq!(store.remove_by_name(&name), 0);
        prop_assert_eq!(store, once);
    }

    #[test]
    fn prop_rollup_stays_in_range(tree in arb_colliding_tree(), name in arb_colliding_name(), pct in 0.0..=100.0f64) {
        let mut store = TreeStore::new(tree);
        store.set_ai_percentage(&name, pct).unwrap();
        for node in store.root().preorder() {
            if let Some(p) = node.ai_percentage() {
                prop_assert!((0.0..=100.0).contains(&p));
            }
        }
    }
}
