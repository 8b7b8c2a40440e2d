use pretty_assertions::assert_eq;
use proptest::prelude::*;
use sdlc_projection::{project, GraphEdge};
use sdlc_test_utils::{arb_colliding_name, arb_colliding_tree, arb_tree, chain, deep_chain};
use sdlc_tree::{default_tree, TreeNode, TreeStore};
use std::collections::BTreeSet;

#[test]
fn test_stake_search_on_default_dataset() {
    let projection = project(&default_tree());
    let names: BTreeSet<_> = projection
        .search("stake")
        .into_iter()
        .filter_map(|id| projection.node(id))
        .map(|node| node.name.as_str())
        .collect();
    assert_eq!(
        names,
        BTreeSet::from([
            "Stakeholder Analysis",
            "Identify Key Stakeholders",
            "Internal Stakeholders",
            "External Stakeholders",
        ])
    );
}

#[test]
fn test_removing_middle_of_chain_leaves_root_alone() {
    let mut store = TreeStore::new(chain(&["A", "B", "C"]));
    store.remove_by_name("B");
    let projection = project(store.root());
    assert_eq!(projection.len(), 1);
    assert!(projection.edges().is_empty());
    assert_eq!(projection.nodes()[0].name, "A");
}

#[test]
fn test_added_child_appears_only_as_target() {
    let mut store = TreeStore::default();
    let before = store.root().children().len();
    let key = store.add_child(None, TreeNode::new("Retirement").with_level(1)).unwrap();
    assert_eq!(store.root().children().len(), before + 1);

    let projection = project(store.root());
    let id = projection.id_of(key).unwrap();
    assert!(projection.edges().iter().all(|edge| edge.source != id));
    assert_eq!(
        projection.edges().iter().filter(|edge| edge.target == id).collect::<Vec<_>>(),
        [&GraphEdge { source: 0, target: id }]
    );
}

#[test]
fn test_subtree_projection_restarts_ids() {
    let tree = default_tree();
    let design = &tree.children()[1];
    let projection = project(design);
    assert_eq!(projection.root(), design.key());
    assert_eq!(projection.len(), 6);
    assert_eq!(projection.nodes()[0].name, "Design");
    assert_eq!(projection.nodes()[0].id, 0);
}

#[test]
fn test_deep_chain_projects_without_recursion() {
    let depth = 3_000;
    let tree = deep_chain(depth);
    let projection = project(&tree);
    assert_eq!(projection.len(), depth + 1);
    assert_eq!(projection.edges().last(), Some(&GraphEdge { source: depth - 1, target: depth }));
}

#[test]
fn test_projection_serializes_for_renderers() {
    let projection = project(&chain(&["A", "B"]));
    let json = serde_json::to_value(&projection).unwrap();
    assert_eq!(json["edges"], serde_json::json!([{"source": 0, "target": 1}]));
    assert_eq!(json["nodes"][1]["name"], "B");
    assert_eq!(json["nodes"][1]["child_count"], 0);
}

proptest! {
    #[test]
    fn prop_projection_is_a_rooted_tree(tree in arb_tree()) {
        let projection = project(&tree);
        let n = tree.node_count();
        prop_assert_eq!(projection.len(), n);
        prop_assert_eq!(projection.edges().len(), n - 1);
        prop_assert!(projection.edges().iter().all(|edge| edge.target != 0));
        prop_assert!(projection.edges().iter().all(|edge| edge.source < edge.target));

        let mut targets: Vec<_> = projection.edges().iter().map(|edge| edge.target).collect();
        targets.sort_unstable();
        prop_assert_eq!(targets, (1..n).collect::<Vec<_>>());

        for (index, node) in projection.nodes().iter().enumerate() {
            prop_assert_eq!(node.id, index);
        }
    }

    #[test]
    fn prop_projection_is_deterministic(tree in arb_tree()) {
        prop_assert_eq!(project(&tree), project(&tree));
    }

    #[test]
    fn prop_removed_name_is_gone_from_projection(
        tree in arb_colliding_tree(),
        name in arb_colliding_name(),
    ) {
        let root_is_match = tree.name() == name;
        let mut store = TreeStore::new(tree);
        store.remove_by_name(&name);
        let projection = project(store.root());
        let matches = projection.nodes().iter().filter(|node| node.name == name).count();
        prop_assert_eq!(matches, usize::from(root_is_match));
    }
}
