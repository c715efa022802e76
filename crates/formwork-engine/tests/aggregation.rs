//! Integration test: aggregate reads and writes.
//!
//! Value and serialized-value derivation across nesting and array
//! groups, disabled exclusion on the read side, positional and
//! recursive write distribution, and the silent rejection of malformed
//! writes.

use formwork_arena::NodeId;
use formwork_core::Value;
use formwork_engine::{FormTree, GroupConfig, LeafConfig};

fn leaf(tree: &mut FormTree, group: NodeId, name: &str, value: Value) -> NodeId {
    let field = tree.create_leaf(LeafConfig {
        value,
        ..LeafConfig::new(name)
    });
    tree.register(group, field).unwrap();
    field
}

#[test]
fn aggregates_singles_arrays_and_nested_groups() {
    let mut tree = FormTree::new();
    let form = tree.create_group(GroupConfig::new(""));
    leaf(&mut tree, form, "lastName", Value::from("Bar"));
    let fieldset = tree.create_group(GroupConfig::new("newfieldset"));
    tree.register(form, fieldset).unwrap();
    leaf(&mut tree, fieldset, "hobbies[]", Value::from("chess"));
    leaf(&mut tree, fieldset, "hobbies[]", Value::from("football"));
    leaf(&mut tree, fieldset, "color", Value::from("blue"));

    assert_eq!(
        tree.value(form),
        Value::group([
            ("lastName", Value::from("Bar")),
            (
                "newfieldset",
                Value::group([
                    (
                        "hobbies[]",
                        Value::list([Value::from("chess"), Value::from("football")])
                    ),
                    ("color", Value::from("blue")),
                ])
            ),
        ])
    );
}

#[test]
fn disabling_an_array_member_drops_it_from_both_reads() {
    let mut tree = FormTree::new();
    let form = tree.create_group(GroupConfig::new(""));
    leaf(&mut tree, form, "a", Value::from("x"));
    leaf(&mut tree, form, "b[]", Value::from(1i64));
    let second = leaf(&mut tree, form, "b[]", Value::from(2i64));

    assert_eq!(
        tree.value(form),
        Value::group([
            ("a", Value::from("x")),
            ("b[]", Value::list([Value::from(1i64), Value::from(2i64)])),
        ])
    );

    tree.set_disabled(second, true);
    let expected = Value::group([
        ("a", Value::from("x")),
        ("b[]", Value::list([Value::from(1i64)])),
    ]);
    assert_eq!(tree.serialized_value(form), expected.clone());
    assert_eq!(tree.value(form), expected);

    // Re-enabling makes the key's member reappear with its value.
    tree.set_disabled(second, false);
    assert_eq!(
        tree.serialized_value(form),
        Value::group([
            ("a", Value::from("x")),
            ("b[]", Value::list([Value::from(1i64), Value::from(2i64)])),
        ])
    );
}

#[test]
fn disabled_members_and_disabled_fieldsets_never_contribute() {
    let mut tree = FormTree::new();
    let form = tree.create_group(GroupConfig::new(""));
    let a = leaf(&mut tree, form, "a", Value::from("x"));
    leaf(&mut tree, form, "b", Value::from("x"));
    let nested = tree.create_group(GroupConfig::new("newFieldset"));
    tree.register(form, nested).unwrap();
    leaf(&mut tree, nested, "c", Value::from("x"));
    let d = leaf(&mut tree, nested, "d", Value::from("x"));
    let disabled_set = tree.create_group(GroupConfig::new("disabledFieldset").disabled());
    tree.register(form, disabled_set).unwrap();
    leaf(&mut tree, disabled_set, "e", Value::from("x"));

    tree.set_disabled(a, true);
    tree.set_disabled(d, true);

    assert_eq!(
        tree.value(form),
        Value::group([
            ("b", Value::from("x")),
            ("newFieldset", Value::group([("c", Value::from("x"))])),
        ])
    );
}

#[test]
fn disabled_fieldset_excludes_enabled_descendants() {
    let mut tree = FormTree::new();
    let form = tree.create_group(GroupConfig::new("userData"));
    leaf(&mut tree, form, "comment", Value::from("Foo"));
    let nested = tree.create_group(GroupConfig::new("newfieldset"));
    tree.register(form, nested).unwrap();
    let color = leaf(&mut tree, nested, "color", Value::from("blue"));
    tree.set_disabled(color, true);

    assert_eq!(
        tree.serialized_value(form),
        Value::group([
            ("comment", Value::from("Foo")),
            ("newfieldset", Value::group::<&str, _>([])),
        ])
    );

    tree.set_disabled(color, false);
    assert_eq!(
        tree.serialized_value(form),
        Value::group([
            ("comment", Value::from("Foo")),
            ("newfieldset", Value::group([("color", Value::from("blue"))])),
        ])
    );
}

#[test]
fn writes_distribute_across_nesting_and_arrays() {
    let mut tree = FormTree::new();
    let form = tree.create_group(GroupConfig::new(""));
    let last = leaf(&mut tree, form, "lastName", Value::from("Bar"));
    let fieldset = tree.create_group(GroupConfig::new("newfieldset"));
    tree.register(form, fieldset).unwrap();
    let h1 = leaf(&mut tree, fieldset, "hobbies[]", Value::from("chess"));
    let h2 = leaf(&mut tree, fieldset, "hobbies[]", Value::from("football"));

    tree.set_value(
        form,
        Value::group([
            ("lastName", Value::from(2i64)),
            (
                "newfieldset",
                Value::group([(
                    "hobbies[]",
                    Value::list([Value::from("chess"), Value::from("baseball")]),
                )]),
            ),
        ]),
    );

    assert_eq!(tree.value(last), Value::from(2i64));
    assert_eq!(tree.value(h1), Value::from("chess"));
    assert_eq!(tree.value(h2), Value::from("baseball"));
}

#[test]
fn malformed_writes_retain_previous_state() {
    let mut tree = FormTree::new();
    let form = tree.create_group(GroupConfig::new(""));
    leaf(&mut tree, form, "firstName", Value::from("foo"));
    leaf(&mut tree, form, "lastName", Value::from("bar"));

    let before = tree.value(form);
    tree.set_value(form, Value::Unset);
    assert_eq!(tree.value(form), before);
    tree.set_value(form, Value::from("not a mapping"));
    assert_eq!(tree.value(form), before);
    tree.set_value(form, Value::list([Value::from("nor a list")]));
    assert_eq!(tree.value(form), before);
}

#[test]
fn unknown_keys_are_ignored_and_absent_keys_untouched() {
    let mut tree = FormTree::new();
    let form = tree.create_group(GroupConfig::new(""));
    let a = leaf(&mut tree, form, "a", Value::from("kept"));
    let b = leaf(&mut tree, form, "b", Value::from("old"));

    tree.set_value(
        form,
        Value::group([
            ("b", Value::from("new")),
            ("stranger", Value::from("dropped")),
        ]),
    );
    assert_eq!(tree.value(a), Value::from("kept"));
    assert_eq!(tree.value(b), Value::from("new"));
}

#[test]
fn serializer_hooks_shape_the_serialized_aggregate() {
    let mut tree = FormTree::new();
    let form = tree.create_group(GroupConfig::new(""));
    let hooked = tree.create_leaf(
        LeafConfig::new("hobbies[]")
            .value("Bar")
            .serializer(|value| match value {
                Value::Text(text) => Value::Text(format!("{text}-serialized")),
                other => other.clone(),
            }),
    );
    tree.register(form, hooked).unwrap();
    leaf(&mut tree, form, "hobbies[]", Value::from("rugby"));

    assert_eq!(tree.serialized_value(hooked), Value::from("Bar-serialized"));
    assert_eq!(
        tree.serialized_value(form),
        Value::group([(
            "hobbies[]",
            Value::list([Value::from("Bar-serialized"), Value::from("rugby")])
        )])
    );
    // The plain value read is unaffected by the hook.
    assert_eq!(
        tree.value(form),
        Value::group([(
            "hobbies[]",
            Value::list([Value::from("Bar"), Value::from("rugby")])
        )])
    );
}

#[test]
fn zero_is_a_valid_value_to_serialize() {
    let mut tree = FormTree::new();
    let form = tree.create_group(GroupConfig::new(""));
    leaf(&mut tree, form, "price", Value::from(0i64));
    assert_eq!(
        tree.serialized_value(form),
        Value::group([("price", Value::Number(0.0))])
    );
}

#[test]
fn unset_values_serialize_to_empty_strings() {
    let mut tree = FormTree::new();
    let form = tree.create_group(GroupConfig::new(""));
    leaf(&mut tree, form, "custom[]", Value::from("custom 1"));
    leaf(&mut tree, form, "custom[]", Value::Unset);

    assert_eq!(
        tree.serialized_value(form),
        Value::group([(
            "custom[]",
            Value::list([Value::from("custom 1"), Value::from("")])
        )])
    );
}

#[test]
fn empty_tree_reads_are_total() {
    let mut tree = FormTree::new();
    let form = tree.create_group(GroupConfig::new(""));
    assert_eq!(tree.value(form), Value::group::<&str, _>([]));
    assert_eq!(tree.serialized_value(form), Value::group::<&str, _>([]));
    tree.reset_group(form);
    tree.clear_group(form);
}
