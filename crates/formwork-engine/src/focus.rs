//! Focus-within tracking and touched derivation.
//!
//! Each composite keeps a "focus is currently inside my subtree" bit,
//! updated on every focus/blur signal from members. A composite becomes
//! touched at the moment that bit drops from true to false: focus left
//! the subtree without re-entering it. Moving focus between two members
//! of the same composite never touches it.

use smallvec::SmallVec;

use formwork_arena::{NodeArena, NodeId};

/// The composites whose subtree contains `node`: the node itself when it
/// is a group, then every ancestor group up to the root.
fn chain_of(arena: &NodeArena, node: Option<NodeId>) -> SmallVec<[NodeId; 8]> {
    let mut chain = SmallVec::new();
    let Some(start) = node else {
        return chain;
    };
    if arena.get(start).is_some_and(|n| n.is_group()) {
        chain.push(start);
    }
    let mut current = start;
    while let Some(parent) = arena.get(current).and_then(|n| n.parent) {
        chain.push(parent);
        current = parent;
    }
    chain
}

/// Apply a focus transition: the composites left behind lose their
/// focus-within bit and become touched; the composites entered gain it.
pub(crate) fn transition(arena: &mut NodeArena, from: Option<NodeId>, to: Option<NodeId>) {
    let old_chain = chain_of(arena, from);
    let new_chain = chain_of(arena, to);
    for id in &old_chain {
        if new_chain.contains(id) {
            continue;
        }
        if let Some(group) = arena.get_mut(*id).and_then(|node| node.as_group_mut()) {
            if group.focus_within {
                group.focus_within = false;
                group.interaction.touched = true;
            }
        }
    }
    for id in &new_chain {
        if let Some(group) = arena.get_mut(*id).and_then(|node| node.as_group_mut()) {
            group.focus_within = true;
        }
    }
}
