//! Directed state effects over the tree.
//!
//! Top-down: disabled inheritance, reset, clear, interaction resets,
//! submitted propagation. Bottom-up: revalidation and interaction
//! derivation for one composite at a time (the bubble queue in
//! [`tree`](crate::tree) walks these toward the root). Every walk
//! snapshots the member list before iterating, so a mutation triggered
//! mid-walk cannot corrupt traversal.

use formwork_arena::{NodeArena, NodeId};
use formwork_core::{Severity, MEMBERS_HAVE_NO_ERROR};

use crate::aggregate;

/// Snapshot of a composite's members, flattened in registry order.
pub(crate) fn members_of(arena: &NodeArena, id: NodeId) -> Vec<NodeId> {
    arena
        .get(id)
        .and_then(|node| node.as_group())
        .map(|group| group.registry.all())
        .unwrap_or_default()
}

/// Recompute `inherited_disabled` throughout the subtree below `root`.
///
/// Each node's inherited bit becomes its parent's effective state, so a
/// self-disabled node keeps imposing disablement on its own subtree
/// even while an ancestor re-enables everything above it.
pub(crate) fn refresh_inherited(arena: &mut NodeArena, root: NodeId) {
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        let Some(node) = arena.get(id) else {
            continue;
        };
        let effective = node.disabled();
        for member in members_of(arena, id) {
            if let Some(child) = arena.get_mut(member) {
                child.inherited_disabled = effective;
            }
            stack.push(member);
        }
    }
}

/// Re-run a leaf's validators against its current value.
pub(crate) fn revalidate_leaf(arena: &mut NodeArena, id: NodeId) {
    let results: Vec<(Severity, String)> = match arena.get(id).and_then(|node| node.as_leaf()) {
        Some(leaf) => leaf
            .validators
            .iter()
            .filter(|validator| validator.run(&leaf.value))
            .map(|validator| (validator.severity(), validator.name().to_string()))
            .collect(),
        None => return,
    };
    if let Some(leaf) = arena.get_mut(id).and_then(|node| node.as_leaf_mut()) {
        leaf.validation.clear();
        for (severity, name) in results {
            leaf.validation.insert(severity, name);
        }
    }
}

/// Re-run a composite's validators against its current aggregate, plus
/// the synthetic member condition: [`MEMBERS_HAVE_NO_ERROR`] fails while
/// any live member reports an error-severity result.
pub(crate) fn revalidate_group(arena: &mut NodeArena, id: NodeId) {
    let aggregate = aggregate::group_value(arena, id);
    let mut results: Vec<(Severity, String)> = match arena.get(id).and_then(|node| node.as_group())
    {
        Some(group) => group
            .validators
            .iter()
            .filter(|validator| validator.run(&aggregate))
            .map(|validator| (validator.severity(), validator.name().to_string()))
            .collect(),
        None => return,
    };
    let any_member_error = members_of(arena, id).into_iter().any(|member| {
        arena
            .get(member)
            .is_some_and(|node| node.validation().has_errors())
    });
    if any_member_error {
        results.push((Severity::Error, MEMBERS_HAVE_NO_ERROR.to_string()));
    }
    if let Some(group) = arena.get_mut(id).and_then(|node| node.as_group_mut()) {
        group.validation.clear();
        for (severity, name) in results {
            group.validation.insert(severity, name);
        }
    }
}

/// Recompute one composite's derived state from its current members:
/// `dirty` when any member is dirty, `prefilled` when every member of a
/// non-empty membership is prefilled, then revalidation. `touched` and
/// `submitted` are event-driven and left alone.
pub(crate) fn recompute_group(arena: &mut NodeArena, id: NodeId) {
    let members = members_of(arena, id);
    let mut any_dirty = false;
    let mut all_prefilled = !members.is_empty();
    for member in &members {
        if let Some(node) = arena.get(*member) {
            any_dirty |= node.interaction().dirty;
            all_prefilled &= node.interaction().prefilled;
        }
    }
    if let Some(node) = arena.get_mut(id) {
        if node.is_group() {
            let interaction = node.interaction_mut();
            interaction.dirty = any_dirty;
            interaction.prefilled = all_prefilled;
        }
    }
    revalidate_group(arena, id);
}

/// Restore every leaf below `id` to its registration-time baseline and
/// return the whole subtree to its at-rest interaction state.
pub(crate) fn reset_group(arena: &mut NodeArena, id: NodeId) {
    for member in members_of(arena, id) {
        match arena.get(member).map(|node| node.is_group()) {
            Some(true) => reset_group(arena, member),
            Some(false) => reset_leaf(arena, member),
            None => {}
        }
    }
    finish_group_rest(arena, id);
}

/// Drive every leaf below `id` to its empty value and return the whole
/// subtree to its at-rest interaction state.
pub(crate) fn clear_group(arena: &mut NodeArena, id: NodeId) {
    for member in members_of(arena, id) {
        match arena.get(member).map(|node| node.is_group()) {
            Some(true) => clear_group(arena, member),
            Some(false) => clear_leaf(arena, member),
            None => {}
        }
    }
    finish_group_rest(arena, id);
}

fn reset_leaf(arena: &mut NodeArena, id: NodeId) {
    let Some(leaf) = arena.get(id).and_then(|node| node.as_leaf()) else {
        return;
    };
    let restored = leaf.baseline.clone().unwrap_or_default();
    let prefilled = !restored.is_empty();
    aggregate::write_leaf_value(arena, id, restored, false);
    if let Some(node) = arena.get_mut(id) {
        node.interaction_mut().reset(prefilled);
    }
}

fn clear_leaf(arena: &mut NodeArena, id: NodeId) {
    aggregate::write_leaf_value(arena, id, Default::default(), false);
    if let Some(node) = arena.get_mut(id) {
        node.interaction_mut().reset(false);
    }
}

/// Clear a group's event-driven flags, then rederive the rest.
fn finish_group_rest(arena: &mut NodeArena, id: NodeId) {
    if let Some(node) = arena.get_mut(id) {
        if node.is_group() {
            let interaction = node.interaction_mut();
            interaction.touched = false;
            interaction.submitted = false;
        }
    }
    recompute_group(arena, id);
}

/// Reset interaction flags throughout the subtree without touching
/// values; `prefilled` is rederived from what each node currently holds.
pub(crate) fn reset_interaction(arena: &mut NodeArena, id: NodeId) {
    let is_group = match arena.get(id).map(|node| node.is_group()) {
        Some(flag) => flag,
        None => return,
    };
    if is_group {
        let members = members_of(arena, id);
        for member in &members {
            reset_interaction(arena, *member);
        }
        let mut all_prefilled = !members.is_empty();
        for member in &members {
            if let Some(node) = arena.get(*member) {
                all_prefilled &= node.interaction().prefilled;
            }
        }
        if let Some(node) = arena.get_mut(id) {
            node.interaction_mut().reset(all_prefilled);
        }
    } else {
        let prefilled = arena
            .get(id)
            .and_then(|node| node.as_leaf())
            .is_some_and(|leaf| !leaf.value.is_empty());
        if let Some(node) = arena.get_mut(id) {
            node.interaction_mut().reset(prefilled);
        }
    }
}

/// Set the submitted flag on a node and every participant below it.
pub(crate) fn set_submitted_all(arena: &mut NodeArena, id: NodeId, submitted: bool) {
    if let Some(node) = arena.get_mut(id) {
        node.interaction_mut().submitted = submitted;
    } else {
        return;
    }
    for member in members_of(arena, id) {
        set_submitted_all(arena, member, submitted);
    }
}
