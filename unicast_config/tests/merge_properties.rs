//! Algebraic properties of expansion and merging.

use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use unicast_config::{ConfigValue, Tree, expand, merge, merge_all};

#[fixture]
fn nested_mapping() -> Tree {
    let ping = Tree::singleton("timeout", "3s");
    let zen: Tree = [
        ("minimum_master_nodes", ConfigValue::scalar("2")),
        ("ping", ConfigValue::from(ping)),
    ]
    .into_iter()
    .collect();
    [
        ("cluster", ConfigValue::from(Tree::singleton("name", "logs"))),
        ("discovery", ConfigValue::from(Tree::singleton("zen", zen))),
        ("plugins", ConfigValue::list(["a", "b"])),
    ]
    .into_iter()
    .collect()
}

#[rstest]
fn expanding_a_nested_mapping_round_trips(nested_mapping: Tree) {
    let fragments = expand(&nested_mapping);
    assert_eq!(fragments.len(), 4);
    assert_eq!(merge_all(fragments), nested_mapping);
}

#[rstest]
fn disjoint_paths_merge_in_any_order() {
    let a = Tree::nested(&["x", "a"], ConfigValue::scalar("1"));
    let b = Tree::nested(&["x", "b"], ConfigValue::list(["2"]));
    let c = Tree::nested(&["y"], ConfigValue::scalar("3"));

    let forward = merge_all([a.clone(), b.clone(), c.clone()]);
    let backward = merge_all([c.clone(), b.clone(), a.clone()]);
    assert_eq!(forward, backward);
    assert_eq!(
        merge(merge(a.clone(), b.clone()), c.clone()),
        merge(a, merge(b, c))
    );
}

#[rstest]
fn lists_concatenate_in_argument_order() {
    let left = Tree::singleton("hosts", ConfigValue::list(["a", "b"]));
    let right = Tree::singleton("hosts", ConfigValue::list(["c", "a"]));
    assert_eq!(
        merge(left, right),
        Tree::singleton("hosts", ConfigValue::list(["a", "b", "c", "a"]))
    );
}

#[rstest]
fn scalar_collisions_take_the_right_value() {
    let merged = merge(Tree::singleton("mode", "1"), Tree::singleton("mode", "2"));
    assert_eq!(merged, Tree::singleton("mode", "2"));
}

#[rstest]
#[case::list_over_scalar(ConfigValue::scalar("1"), ConfigValue::list(["2"]))]
#[case::scalar_over_list(ConfigValue::list(["1"]), ConfigValue::scalar("2"))]
#[case::scalar_over_tree(ConfigValue::from(Tree::singleton("k", "v")), ConfigValue::scalar("2"))]
#[case::tree_over_list(ConfigValue::list(["1"]), ConfigValue::from(Tree::singleton("k", "v")))]
fn shape_mismatches_resolve_to_the_right_value(
    #[case] left: ConfigValue,
    #[case] right: ConfigValue,
) {
    let merged = merge(
        Tree::singleton("key", left),
        Tree::singleton("key", right.clone()),
    );
    assert_eq!(merged.get("key"), Some(&right));
}

#[rstest]
fn dotted_and_nested_spellings_merge_together() {
    let compact: Tree = [
        ("discovery.zen.minimum_master_nodes", "2"),
        ("discovery.zen.ping.timeout", "3s"),
    ]
    .into_iter()
    .collect();
    let merged = merge_all(expand(&compact));
    assert_eq!(
        merged.get_path(&["discovery", "zen", "minimum_master_nodes"]),
        Some(&ConfigValue::scalar("2"))
    );
    assert_eq!(
        merged.get_path(&["discovery", "zen", "ping", "timeout"]),
        Some(&ConfigValue::scalar("3s"))
    );
}

#[rstest]
fn merging_with_an_empty_tree_is_identity(nested_mapping: Tree) {
    assert_eq!(merge(Tree::new(), nested_mapping.clone()), nested_mapping);
    assert_eq!(merge(nested_mapping.clone(), Tree::new()), nested_mapping);
    assert_eq!(nested_mapping.clone().merged_with(Tree::new()), nested_mapping);
}
