//! Formwork Quickstart — a complete, minimal form tree from scratch.
//!
//! Demonstrates:
//!   1. Creating a tree, a group, and leaf fields (including an array group)
//!   2. Registering members and settling the registration burst
//!   3. Reading aggregate and serialized values
//!   4. Validation (own validators plus the synthetic member condition)
//!   5. Disabling, writing, resetting, and clearing
//!
//! Run with:
//!   cargo run --example quickstart

use formwork_core::{Validator, Value};
use formwork_engine::{FormTree, GroupConfig, LeafConfig};

// ─── Validators ─────────────────────────────────────────────────

/// A leaf value must be a non-empty text.
struct RequiredText;

impl Validator for RequiredText {
    fn name(&self) -> &str {
        "RequiredText"
    }

    fn run(&self, value: &Value) -> bool {
        value.as_text().is_none_or(str::is_empty)
    }
}

// ─── Main ───────────────────────────────────────────────────────

fn main() {
    println!("=== Formwork Quickstart ===\n");

    // 1. Build the tree: one profile group with a name, a color, and
    //    two hobby fields collected under one array-group key.
    let mut tree = FormTree::new();
    let profile = tree.create_group(GroupConfig::new("profile"));
    let name = tree.create_leaf(LeafConfig::new("name").value("Ada").validator(RequiredText));
    let color = tree.create_leaf(LeafConfig::new("color"));
    let hobby_a = tree.create_leaf(LeafConfig::new("hobbies[]").value("chess"));
    let hobby_b = tree.create_leaf(LeafConfig::new("hobbies[]").value("rugby"));

    for field in [name, color, hobby_a, hobby_b] {
        tree.register(profile, field).expect("unique names");
    }
    println!(
        "Registered {} members under {} keys: {:?}",
        tree.member_count(profile),
        tree.key_count(profile),
        tree.keys(profile),
    );

    // 2. Settle the burst; the handle is also awaitable from async hosts.
    let settled = tree.registration_settled(profile);
    tree.settle();
    println!("Registration settled: {}\n", settled.is_settled());

    // 3. Aggregate reads.
    println!("value           = {:?}", tree.value(profile));
    println!("serializedValue = {:?}\n", tree.serialized_value(profile));

    // 4. Validation: `color` is empty, so RequiredText would fail on it
    //    if attached; the group is clean because no member has errors.
    println!(
        "group validation clean: {}",
        tree.validation_state(profile).is_clean()
    );

    // 5. Disable one hobby: it vanishes from the aggregate.
    tree.set_disabled(hobby_b, true);
    println!(
        "after disabling a hobby: {:?}",
        tree.serialized_value(profile)
    );
    tree.set_disabled(hobby_b, false);

    // 6. Write through the group, then reset back to the baselines
    //    captured when each member registered.
    tree.set_value(
        profile,
        Value::group([
            ("name", Value::from("Grace")),
            (
                "hobbies[]",
                Value::list([Value::from("sailing"), Value::from("flying")]),
            ),
        ]),
    );
    println!("after write:  {:?}", tree.value(profile));
    tree.reset_group(profile);
    println!("after reset:  {:?}", tree.value(profile));

    // 7. Clear drives every leaf to its empty value.
    tree.clear_group(profile);
    println!("after clear:  {:?}", tree.serialized_value(profile));

    println!("\nDone.");
}
