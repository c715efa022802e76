//! Initial-value baselines.
//!
//! A composite's baseline is the aggregate value "at rest", assembled
//! key by key as members register — a merge, never a wholesale
//! recapture, so a sibling attached late cannot disturb the baseline a
//! sibling attached early already contributed. Leaves capture their own
//! baseline once, at first registration; that is the value `reset`
//! restores.

use formwork_arena::{NodeArena, NodeId, ResolvedKey};
use formwork_core::Value;

/// Merge a newly registered member's current value into its parent's
/// baseline. A single key is captured only if the key is new; an
/// array-group key appends, preserving attachment order.
pub(crate) fn capture(arena: &mut NodeArena, parent: NodeId, key: &ResolvedKey, value: Value) {
    let Some(group) = arena.get_mut(parent).and_then(|node| node.as_group_mut()) else {
        return;
    };
    match key {
        ResolvedKey::Single(key) => {
            if !group.baseline.contains_key(key.as_str()) {
                group.baseline.insert(key.clone(), value);
            }
        }
        ResolvedKey::ArrayGroup(key) => match group.baseline.get_mut(key.as_str()) {
            Some(Value::List(items)) => items.push(value),
            _ => {
                group.baseline.insert(key.clone(), Value::List(vec![value]));
            }
        },
    }
}

/// Capture a leaf's own reset baseline, once. Later re-registrations
/// keep the first capture.
pub(crate) fn capture_leaf_baseline(arena: &mut NodeArena, id: NodeId) {
    let Some(leaf) = arena.get_mut(id).and_then(|node| node.as_leaf_mut()) else {
        return;
    };
    if leaf.baseline.is_none() {
        leaf.baseline = Some(leaf.value.clone());
    }
}
