//! Benchmark support crate. See `benches/` for the criterion harnesses.

#![forbid(unsafe_code)]

use formwork_arena::NodeId;
use formwork_core::Value;
use formwork_engine::{FormTree, GroupConfig, LeafConfig};

/// Build a chain of nested groups `depth` levels deep with `width`
/// prefilled leaves per level.
pub fn build_tree(depth: usize, width: usize) -> (FormTree, NodeId) {
    let mut tree = FormTree::new();
    let root = tree.create_group(GroupConfig::new("root"));
    populate(&mut tree, root, depth, width);
    (tree, root)
}

fn populate(tree: &mut FormTree, group: NodeId, depth: usize, width: usize) {
    for i in 0..width {
        let leaf = tree.create_leaf(LeafConfig::new(format!("field{i}")).value(Value::from("x")));
        tree.register(group, leaf).expect("unique names");
    }
    if depth > 0 {
        let child = tree.create_group(GroupConfig::new(format!("level{depth}")));
        tree.register(group, child).expect("unique names");
        populate(tree, child, depth - 1, width);
    }
}
