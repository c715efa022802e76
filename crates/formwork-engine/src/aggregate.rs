//! Aggregate reads and writes.
//!
//! Reads walk the registry in key order and build a [`Value::Group`]
//! from member values, recursing into nested composites. Disabled
//! participants never contribute: a single-member key whose member is
//! disabled is omitted, an array group collects enabled members only
//! (relative order preserved, no placeholders), and a key whose every
//! member is disabled is absent entirely.
//!
//! Writes distribute a `Value::Group` mapping onto matching registry
//! keys, positionally for array groups and recursively for nested
//! composites. Unknown keys are ignored; registry keys absent from the
//! mapping stay untouched; a non-mapping write is a silent no-op.

use indexmap::IndexMap;

use formwork_arena::{NodeArena, NodeBody, NodeId, RegistryEntry};
use formwork_core::Value;

use crate::propagate;

/// A node's current value: the leaf value as-is, or the composite's
/// aggregate. Stale handles read as [`Value::Unset`].
pub(crate) fn value_of(arena: &NodeArena, id: NodeId) -> Value {
    match arena.get(id).map(|node| &node.body) {
        Some(NodeBody::Leaf(leaf)) => leaf.value.clone(),
        Some(NodeBody::Group(_)) => group_value(arena, id),
        None => Value::Unset,
    }
}

/// A node's serialized value: the leaf's serializer output (default:
/// `Unset` becomes the empty string), or the composite's serialized
/// aggregate.
pub(crate) fn serialized_of(arena: &NodeArena, id: NodeId) -> Value {
    match arena.get(id).map(|node| &node.body) {
        Some(NodeBody::Leaf(leaf)) => match leaf.serializer {
            Some(serialize) => serialize(&leaf.value),
            None => leaf.value.serialized(),
        },
        Some(NodeBody::Group(_)) => group_serialized(arena, id),
        None => Value::Text(String::new()),
    }
}

/// A composite's aggregate value over enabled members.
pub(crate) fn group_value(arena: &NodeArena, id: NodeId) -> Value {
    collect_group(arena, id, value_of)
}

/// A composite's serialized aggregate over enabled members.
pub(crate) fn group_serialized(arena: &NodeArena, id: NodeId) -> Value {
    collect_group(arena, id, serialized_of)
}

fn collect_group(
    arena: &NodeArena,
    id: NodeId,
    read: fn(&NodeArena, NodeId) -> Value,
) -> Value {
    let mut entries = IndexMap::new();
    let Some(group) = arena.get(id).and_then(|node| node.as_group()) else {
        return Value::Group(entries);
    };
    for (key, entry) in group.registry.iter() {
        match entry {
            RegistryEntry::Single(member) => {
                if is_enabled(arena, *member) {
                    entries.insert(key.to_string(), read(arena, *member));
                }
            }
            RegistryEntry::ArrayGroup(members) => {
                let values: Vec<Value> = members
                    .iter()
                    .filter(|member| is_enabled(arena, **member))
                    .map(|member| read(arena, *member))
                    .collect();
                if !values.is_empty() {
                    entries.insert(key.to_string(), Value::List(values));
                }
            }
        }
    }
    Value::Group(entries)
}

fn is_enabled(arena: &NodeArena, id: NodeId) -> bool {
    arena.get(id).is_some_and(|node| !node.disabled())
}

/// Push an aggregate mapping down onto a composite's members.
///
/// Returns whether the write was accepted at all: a value that is not a
/// [`Value::Group`] leaves every member untouched and reports `false`.
/// Disabled members receive writes like any other; only reads exclude
/// them.
pub(crate) fn write_group_value(arena: &mut NodeArena, id: NodeId, value: &Value) -> bool {
    let Some(entries) = value.as_group() else {
        return false;
    };
    // Snapshot the affected members before writing anything; writes may
    // fan out and must not observe a registry mutated mid-iteration.
    let mut writes: Vec<(NodeId, Value)> = Vec::new();
    {
        let Some(group) = arena.get(id).and_then(|node| node.as_group()) else {
            return false;
        };
        for (key, sub) in entries {
            match group.registry.get(key) {
                Some(RegistryEntry::Single(member)) => {
                    writes.push((*member, sub.clone()));
                }
                Some(RegistryEntry::ArrayGroup(members)) => {
                    let Some(items) = sub.as_list() else {
                        continue;
                    };
                    for (member, item) in members.iter().zip(items) {
                        writes.push((*member, item.clone()));
                    }
                }
                None => {}
            }
        }
    }
    for (member, sub) in writes {
        write_node_value(arena, member, sub);
    }
    true
}

/// Write a value into one node: a leaf takes it directly (marking the
/// leaf dirty and revalidating), a composite distributes it.
pub(crate) fn write_node_value(arena: &mut NodeArena, id: NodeId, value: Value) {
    let is_leaf = matches!(arena.get(id).map(|n| &n.body), Some(NodeBody::Leaf(_)));
    if is_leaf {
        write_leaf_value(arena, id, value, true);
    } else {
        write_group_value(arena, id, &value);
    }
}

/// Write a leaf's value in place. `mark_dirty` is false on reset/clear
/// paths, which restore values without counting as user edits.
pub(crate) fn write_leaf_value(arena: &mut NodeArena, id: NodeId, value: Value, mark_dirty: bool) {
    let Some(leaf) = arena.get_mut(id).and_then(|node| node.as_leaf_mut()) else {
        return;
    };
    leaf.value = value;
    if mark_dirty {
        leaf.interaction.dirty = true;
    }
    propagate::revalidate_leaf(arena, id);
}
