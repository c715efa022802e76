//! The [`FormTree`] engine facade.
//!
//! One `FormTree` owns one tree of participants and is the single entry
//! point for everything the surrounding rendering layer drives:
//! creation, registration, aggregate reads/writes, disabling, reset and
//! clear, focus signals, and registration settling.
//!
//! # Ownership model
//!
//! `FormTree` is [`Send`] (can be moved between threads) but all
//! mutation goes through `&mut self`, so the borrow checker rules out
//! concurrent mutation: the engine is single-threaded cooperative by
//! construction. Handles ([`NodeId`]) are plain copyable values; a
//! handle whose node is gone reads as absent and mutates as a no-op.

use std::sync::Arc;

use indexmap::IndexMap;

use formwork_arena::{is_array_name, Node, NodeArena, NodeId, ResolvedKey};
use formwork_core::{InteractionState, NameError, Severity, ValidationState, Value};

use crate::aggregate;
use crate::config::{GroupConfig, LeafConfig};
use crate::events::BubbleQueue;
use crate::focus;
use crate::propagate;
use crate::settle::{SettleInner, Settled};
use crate::snapshot;

// Compile-time assertion: FormTree is Send.
// Fails to compile if any field (validators included) is !Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<FormTree>();
    }
};

/// A live, mutable tree of form participants.
///
/// # Example
///
/// ```
/// use formwork_engine::{FormTree, GroupConfig, LeafConfig};
/// use formwork_core::Value;
///
/// let mut tree = FormTree::new();
/// let form = tree.create_group(GroupConfig::new("profile"));
/// let name = tree.create_leaf(LeafConfig::new("name").value("Ada"));
/// tree.register(form, name).unwrap();
///
/// assert_eq!(
///     tree.value(form),
///     Value::group([("name", Value::from("Ada"))]),
/// );
/// ```
#[derive(Default)]
pub struct FormTree {
    arena: NodeArena,
    bubbles: BubbleQueue,
    settles: IndexMap<NodeId, Arc<SettleInner>>,
    focused: Option<NodeId>,
}

impl FormTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Creation ────────────────────────────────────────────────

    /// Create a detached leaf field. Validators run once immediately,
    /// so validation state is meaningful before first registration.
    pub fn create_leaf(&mut self, config: LeafConfig) -> NodeId {
        let mut node = Node::leaf(config.name, config.value);
        node.self_disabled = config.disabled;
        if let Some(leaf) = node.as_leaf_mut() {
            leaf.serializer = config.serializer;
            leaf.validators = config.validators;
        }
        let id = self.arena.insert(node);
        propagate::revalidate_leaf(&mut self.arena, id);
        id
    }

    /// Create a detached composite group. Validators run once against
    /// the (empty) aggregate immediately.
    pub fn create_group(&mut self, config: GroupConfig) -> NodeId {
        let mut node = Node::group(config.name);
        node.self_disabled = config.disabled;
        if let Some(group) = node.as_group_mut() {
            group.validators = config.validators;
        }
        let id = self.arena.insert(node);
        propagate::revalidate_group(&mut self.arena, id);
        id
    }

    // ── Registration ────────────────────────────────────────────

    /// Register `child` as a member of the composite `parent`.
    ///
    /// The child's declared name resolves to a registry key; on success
    /// the child's current value merges into the parent's baseline, the
    /// parent's disabled state is inherited, and derived state bubbles
    /// to the root. A child already attached elsewhere is moved.
    ///
    /// Stale handles and non-composite parents are tolerated no-ops.
    ///
    /// # Errors
    ///
    /// [`NameError`] when the name is missing, collides with the
    /// parent's own name, or duplicates a non-array sibling. The
    /// registry is untouched on error.
    pub fn register(&mut self, parent: NodeId, child: NodeId) -> Result<(), NameError> {
        if !self.arena.contains(child) {
            return Ok(());
        }
        let (parent_name, parent_disabled) = match self.arena.get(parent) {
            Some(node) if node.is_group() => (
                (!node.name.is_empty()).then(|| node.name.clone()),
                node.disabled(),
            ),
            _ => return Ok(()),
        };
        if self.arena.get(child).and_then(|node| node.parent).is_some() {
            self.deregister(child);
        }
        let child_name = match self.arena.get(child) {
            Some(node) => node.name.clone(),
            None => return Ok(()),
        };
        let child_value = aggregate::value_of(&self.arena, child);
        let resolved = {
            let Some(group) = self.arena.get_mut(parent).and_then(|node| node.as_group_mut())
            else {
                return Ok(());
            };
            group
                .registry
                .register(&child_name, parent_name.as_deref(), child)?
        };
        snapshot::capture(&mut self.arena, parent, &resolved, child_value);
        snapshot::capture_leaf_baseline(&mut self.arena, child);
        if let Some(node) = self.arena.get_mut(child) {
            node.parent = Some(parent);
            node.inherited_disabled = parent_disabled;
        }
        propagate::refresh_inherited(&mut self.arena, child);
        self.arm_settle(parent);
        self.bubble_from(Some(parent));
        Ok(())
    }

    /// Remove `child` from its parent's registry, leaving the node
    /// itself alive and detached. Idempotent: deregistering a detached
    /// or stale handle is a no-op.
    pub fn deregister(&mut self, child: NodeId) {
        let Some(parent) = self.arena.get(child).and_then(|node| node.parent) else {
            return;
        };
        if let Some(group) = self.arena.get_mut(parent).and_then(|node| node.as_group_mut()) {
            group.registry.remove(child);
        }
        if let Some(node) = self.arena.get_mut(child) {
            node.parent = None;
            node.inherited_disabled = false;
        }
        propagate::refresh_inherited(&mut self.arena, child);
        self.bubble_from(Some(parent));
    }

    /// Tear down a node and its whole subtree: deregister it, then drop
    /// every descendant from the arena. All handles into the subtree go
    /// stale.
    pub fn remove(&mut self, id: NodeId) {
        if !self.arena.contains(id) {
            return;
        }
        self.deregister(id);
        let mut stack = vec![id];
        let mut doomed = Vec::new();
        while let Some(current) = stack.pop() {
            doomed.push(current);
            stack.extend(propagate::members_of(&self.arena, current));
        }
        for node in doomed {
            self.settles.shift_remove(&node);
            if self.focused == Some(node) {
                self.focused = None;
            }
            self.arena.remove(node);
        }
    }

    /// Change a node's declared name, re-resolving its registry key.
    ///
    /// A registered node moves from its old key to the new one under
    /// the same collision rules; on error it stays where it was. The
    /// new key merges into the parent baseline like a fresh
    /// registration.
    ///
    /// # Errors
    ///
    /// [`NameError`], as for [`register`](Self::register).
    pub fn rename(&mut self, id: NodeId, new_name: &str) -> Result<(), NameError> {
        let Some(node) = self.arena.get(id) else {
            return Ok(());
        };
        if node.name == new_name {
            return Ok(());
        }
        let Some(parent) = node.parent else {
            if let Some(node) = self.arena.get_mut(id) {
                node.name = new_name.to_string();
            }
            return Ok(());
        };
        let parent_name = self
            .arena
            .get(parent)
            .and_then(|p| (!p.name.is_empty()).then(|| p.name.clone()));
        let child_value = aggregate::value_of(&self.arena, id);
        {
            let Some(group) = self.arena.get_mut(parent).and_then(|node| node.as_group_mut())
            else {
                return Ok(());
            };
            group.registry.rename(id, new_name, parent_name.as_deref())?;
        }
        if let Some(node) = self.arena.get_mut(id) {
            node.name = new_name.to_string();
        }
        let resolved = if is_array_name(new_name) {
            ResolvedKey::ArrayGroup(new_name.to_string())
        } else {
            ResolvedKey::Single(new_name.to_string())
        };
        snapshot::capture(&mut self.arena, parent, &resolved, child_value);
        self.bubble_from(Some(parent));
        Ok(())
    }

    // ── Tree inspection ─────────────────────────────────────────

    /// Whether `id` resolves to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id)
    }

    /// Number of live nodes in the whole tree.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// The node's declared name.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.arena.get(id).map(|node| node.name.as_str())
    }

    /// The composite `id` is currently registered under.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(id).and_then(|node| node.parent)
    }

    /// Whether the node is a composite.
    pub fn is_group(&self, id: NodeId) -> bool {
        self.arena.get(id).is_some_and(|node| node.is_group())
    }

    /// A composite's registry keys, in first-appearance order.
    pub fn keys(&self, group: NodeId) -> Vec<String> {
        self.arena
            .get(group)
            .and_then(|node| node.as_group())
            .map(|state| state.registry.keys().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Number of distinct registry keys with at least one live member.
    pub fn key_count(&self, group: NodeId) -> usize {
        self.arena
            .get(group)
            .and_then(|node| node.as_group())
            .map(|state| state.registry.key_count())
            .unwrap_or(0)
    }

    /// Every member of a composite, flattened in registry order; each
    /// array-group member counts once.
    pub fn members(&self, group: NodeId) -> Vec<NodeId> {
        propagate::members_of(&self.arena, group)
    }

    /// Number of members, counted like [`members`](Self::members).
    pub fn member_count(&self, group: NodeId) -> usize {
        self.arena
            .get(group)
            .and_then(|node| node.as_group())
            .map(|state| state.registry.member_count())
            .unwrap_or(0)
    }

    /// The members registered under one key, in attachment order.
    pub fn members_under(&self, group: NodeId, key: &str) -> Vec<NodeId> {
        self.arena
            .get(group)
            .and_then(|node| node.as_group())
            .and_then(|state| state.registry.get(key))
            .map(|entry| entry.members().to_vec())
            .unwrap_or_default()
    }

    // ── Values ──────────────────────────────────────────────────

    /// The node's current value: a leaf's value as-is, a composite's
    /// aggregate over enabled members. Stale handles read as
    /// [`Value::Unset`].
    pub fn value(&self, id: NodeId) -> Value {
        aggregate::value_of(&self.arena, id)
    }

    /// The node's serialized value: leaf serializer output (default:
    /// unset becomes the empty string), or the composite's serialized
    /// aggregate over enabled members.
    pub fn serialized_value(&self, id: NodeId) -> Value {
        aggregate::serialized_of(&self.arena, id)
    }

    /// The initial-value baseline: a leaf's registration-time capture,
    /// or the composite's merged key-by-key baseline. Read-only; the
    /// returned value is a clone.
    pub fn initial_value(&self, id: NodeId) -> Value {
        match self.arena.get(id) {
            Some(node) => match node.as_group() {
                Some(state) => Value::Group(state.baseline.clone()),
                None => node
                    .as_leaf()
                    .and_then(|leaf| leaf.baseline.clone())
                    .unwrap_or_default(),
            },
            None => Value::Unset,
        }
    }

    /// Write a value.
    ///
    /// For a leaf: store it, mark the leaf dirty, revalidate, bubble.
    /// For a composite: distribute a [`Value::Group`] mapping onto
    /// matching registry keys (positional for array groups, recursive
    /// for nested composites); anything that is not a mapping is a
    /// silent no-op and previous state is retained.
    pub fn set_value(&mut self, id: NodeId, value: Value) {
        let Some(node) = self.arena.get(id) else {
            return;
        };
        let parent = node.parent;
        if node.is_group() {
            if aggregate::write_group_value(&mut self.arena, id, &value) {
                self.bubble_from(Some(id));
            }
        } else {
            aggregate::write_leaf_value(&mut self.arena, id, value, true);
            self.bubble_from(parent);
        }
    }

    // ── Disabled state ──────────────────────────────────────────

    /// The node's effective disabled state (own or inherited).
    pub fn disabled(&self, id: NodeId) -> bool {
        self.arena.get(id).is_some_and(|node| node.disabled())
    }

    /// Set the node's own disabled flag and push the resulting
    /// effective state down its subtree. Re-enabling clears only the
    /// inherited bit on descendants: a descendant disabled for its own
    /// reasons stays disabled.
    pub fn set_disabled(&mut self, id: NodeId, disabled: bool) {
        let (parent, is_group) = match self.arena.get_mut(id) {
            Some(node) => {
                node.self_disabled = disabled;
                (node.parent, node.is_group())
            }
            None => return,
        };
        propagate::refresh_inherited(&mut self.arena, id);
        self.bubble_from(if is_group { Some(id) } else { parent });
    }

    // ── Derived state ───────────────────────────────────────────

    /// The node's interaction flags. Stale handles read as defaults.
    pub fn interaction(&self, id: NodeId) -> InteractionState {
        self.arena
            .get(id)
            .map(|node| *node.interaction())
            .unwrap_or_default()
    }

    /// The node's last validation outcome. Stale handles read as clean.
    pub fn validation_state(&self, id: NodeId) -> ValidationState {
        self.arena
            .get(id)
            .map(|node| node.validation().clone())
            .unwrap_or_default()
    }

    /// Severities with at least one recorded result, gated by nothing.
    pub fn has_feedback_for(&self, id: NodeId) -> Vec<Severity> {
        self.arena
            .get(id)
            .map(|node| node.validation().severities())
            .unwrap_or_default()
    }

    /// Severities whose feedback should currently be surfaced: recorded
    /// results gated by the interaction state (touched-and-dirty, or
    /// prefilled, or submitted).
    pub fn shows_feedback_for(&self, id: NodeId) -> Vec<Severity> {
        match self.arena.get(id) {
            Some(node) if node.interaction().feedback_gate() => node.validation().severities(),
            _ => Vec::new(),
        }
    }

    /// Whether focus currently sits inside the composite's subtree.
    pub fn focus_within(&self, group: NodeId) -> bool {
        self.arena
            .get(group)
            .and_then(|node| node.as_group())
            .is_some_and(|state| state.focus_within)
    }

    // ── Commands ────────────────────────────────────────────────

    /// Restore every leaf in the subtree to its registration-time
    /// baseline, return interaction flags to rest, and revalidate
    /// throughout. No-op on non-composites.
    pub fn reset_group(&mut self, group: NodeId) {
        if !self.is_group(group) {
            return;
        }
        propagate::reset_group(&mut self.arena, group);
        let parent = self.parent(group);
        self.bubble_from(parent);
    }

    /// Drive every leaf in the subtree to its empty value, return
    /// interaction flags to rest, and revalidate throughout. No-op on
    /// non-composites.
    pub fn clear_group(&mut self, group: NodeId) {
        if !self.is_group(group) {
            return;
        }
        propagate::clear_group(&mut self.arena, group);
        let parent = self.parent(group);
        self.bubble_from(parent);
    }

    /// Reset interaction flags throughout the subtree without touching
    /// values; `prefilled` is rederived from current values.
    pub fn reset_interaction_state(&mut self, id: NodeId) {
        propagate::reset_interaction(&mut self.arena, id);
        let parent = self.parent(id);
        self.bubble_from(parent);
    }

    /// Set the submitted flag on the node and every participant below.
    pub fn set_submitted(&mut self, id: NodeId, submitted: bool) {
        propagate::set_submitted_all(&mut self.arena, id, submitted);
    }

    // ── Ingress notifications ───────────────────────────────────

    /// A member's value changed through its own machinery (not through
    /// [`set_value`](Self::set_value)): mark it dirty, revalidate, and
    /// bubble to the root.
    pub fn on_member_changed(&mut self, id: NodeId) {
        let Some(node) = self.arena.get(id) else {
            return;
        };
        let parent = node.parent;
        if node.is_group() {
            self.bubble_from(Some(id));
        } else {
            if let Some(node) = self.arena.get_mut(id) {
                node.interaction_mut().dirty = true;
            }
            propagate::revalidate_leaf(&mut self.arena, id);
            self.bubble_from(parent);
        }
    }

    /// Focus entered a member. Every composite on the member's ancestor
    /// chain gains focus-within; composites left behind by the implied
    /// transition become touched.
    pub fn on_member_focus(&mut self, member: NodeId) {
        let previous = self.focused.take();
        self.focused = Some(member);
        focus::transition(&mut self.arena, previous, Some(member));
    }

    /// Focus left a member for `next_focus` (`None` when focus left the
    /// tree entirely). The blurred member becomes touched, and so does
    /// every composite whose subtree focus actually left.
    pub fn on_member_blur(&mut self, member: NodeId, next_focus: Option<NodeId>) {
        if let Some(node) = self.arena.get_mut(member) {
            node.interaction_mut().touched = true;
        }
        focus::transition(&mut self.arena, Some(member), next_focus);
        self.focused = next_focus;
    }

    // ── Settling ────────────────────────────────────────────────

    /// Completion handle for the composite's pending registration
    /// burst. Already-settled (or never-started) composites return a
    /// completed handle; otherwise the handle completes at the next
    /// [`settle`](Self::settle) call. Registrations arriving before
    /// completion coalesce into the same handle.
    pub fn registration_settled(&self, group: NodeId) -> Settled {
        match self.settles.get(&group) {
            Some(inner) => Settled::pending(Arc::clone(inner)),
            None => Settled::ready(),
        }
    }

    /// Declare the current attachment burst finished: complete every
    /// pending registration signal. The next registration arms a fresh
    /// one.
    pub fn settle(&mut self) {
        for (_, inner) in self.settles.drain(..) {
            inner.complete();
        }
    }

    // ── Internals ───────────────────────────────────────────────

    fn arm_settle(&mut self, group: NodeId) {
        self.settles
            .entry(group)
            .or_insert_with(|| Arc::new(SettleInner::default()));
    }

    /// Recompute derived state from `start` to the root through the
    /// bubble queue. Nested calls enqueue into the drain already in
    /// progress instead of recursing.
    fn bubble_from(&mut self, start: Option<NodeId>) {
        if let Some(group) = start {
            self.bubbles.push(group);
        }
        if !self.bubbles.begin_drain() {
            return;
        }
        while let Some(id) = self.bubbles.pop() {
            if !self.is_group(id) {
                continue;
            }
            propagate::recompute_group(&mut self.arena, id);
            if let Some(parent) = self.arena.get(id).and_then(|node| node.parent) {
                self.bubbles.push(parent);
            }
        }
        self.bubbles.end_drain();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_links_parent_and_inherits_disabled() {
        let mut tree = FormTree::new();
        let group = tree.create_group(GroupConfig::new("g").disabled());
        let field = tree.create_leaf(LeafConfig::new("a"));
        tree.register(group, field).unwrap();
        assert_eq!(tree.parent(field), Some(group));
        assert!(tree.disabled(field));
    }

    #[test]
    fn register_tolerates_stale_handles() {
        let mut tree = FormTree::new();
        let group = tree.create_group(GroupConfig::new("g"));
        let field = tree.create_leaf(LeafConfig::new("a"));
        tree.remove(field);
        assert_eq!(tree.register(group, field), Ok(()));
        assert_eq!(tree.member_count(group), 0);
    }

    #[test]
    fn register_under_a_leaf_is_a_no_op() {
        let mut tree = FormTree::new();
        let not_a_group = tree.create_leaf(LeafConfig::new("x"));
        let field = tree.create_leaf(LeafConfig::new("a"));
        assert_eq!(tree.register(not_a_group, field), Ok(()));
        assert_eq!(tree.parent(field), None);
    }

    #[test]
    fn reregistration_moves_a_member() {
        let mut tree = FormTree::new();
        let first = tree.create_group(GroupConfig::new("first"));
        let second = tree.create_group(GroupConfig::new("second"));
        let field = tree.create_leaf(LeafConfig::new("a").value("x"));
        tree.register(first, field).unwrap();
        tree.register(second, field).unwrap();
        assert_eq!(tree.member_count(first), 0);
        assert_eq!(tree.member_count(second), 1);
        assert_eq!(tree.parent(field), Some(second));
    }

    #[test]
    fn remove_drops_the_whole_subtree() {
        let mut tree = FormTree::new();
        let outer = tree.create_group(GroupConfig::new("outer"));
        let inner = tree.create_group(GroupConfig::new("inner"));
        let field = tree.create_leaf(LeafConfig::new("a"));
        tree.register(outer, inner).unwrap();
        tree.register(inner, field).unwrap();

        tree.remove(inner);
        assert!(!tree.contains(inner));
        assert!(!tree.contains(field));
        assert!(tree.contains(outer));
        assert_eq!(tree.member_count(outer), 0);
    }

    #[test]
    fn bubbling_reaches_grandparents() {
        let mut tree = FormTree::new();
        let outer = tree.create_group(GroupConfig::new("outer"));
        let inner = tree.create_group(GroupConfig::new("inner"));
        let field = tree.create_leaf(LeafConfig::new("a"));
        tree.register(outer, inner).unwrap();
        tree.register(inner, field).unwrap();

        tree.set_value(field, Value::from("edit"));
        assert!(tree.interaction(inner).dirty);
        assert!(tree.interaction(outer).dirty, "dirty bubbles past one level");
    }

    #[test]
    fn detached_rename_changes_the_declared_name() {
        let mut tree = FormTree::new();
        let field = tree.create_leaf(LeafConfig::new("old"));
        tree.rename(field, "new").unwrap();
        assert_eq!(tree.name(field), Some("new"));
    }
}
