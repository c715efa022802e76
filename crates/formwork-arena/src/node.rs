//! The participant node model.
//!
//! A participant is either a leaf field or a composite group; the
//! distinction is a tagged variant ([`NodeBody`]) dispatched through the
//! shared [`Node`] shell, which carries the state both kinds have: name,
//! parent link, and the two-part disabled flag.
//!
//! Disabled state is split in two. `self_disabled` belongs to the node
//! (set at creation or by a direct call on the node); `inherited_disabled`
//! belongs to its ancestors and is recomputed whenever an ancestor's
//! effective state changes. A node is effectively disabled when either
//! bit is set, so re-enabling an ancestor never un-disables a node that
//! was disabled for its own reasons.

use std::fmt;

use indexmap::IndexMap;

use formwork_core::{InteractionState, ValidationState, Validator, Value};

use crate::handle::NodeId;
use crate::registry::Registry;

/// A leaf serialization hook: maps the leaf's value to its submit form.
pub type Serializer = fn(&Value) -> Value;

/// A participant node: the shared shell around a leaf or group body.
pub struct Node {
    /// Declared name; the registry key is derived from it.
    pub name: String,
    /// The composite this node is currently registered under, if any.
    pub parent: Option<NodeId>,
    /// Disabled for the node's own reasons.
    pub self_disabled: bool,
    /// Disabled because an ancestor composite is disabled.
    pub inherited_disabled: bool,
    /// Leaf or group payload.
    pub body: NodeBody,
}

/// Leaf-or-composite payload of a [`Node`].
pub enum NodeBody {
    /// A leaf field.
    Leaf(LeafState),
    /// A composite group with its own member registry.
    Group(GroupState),
}

/// State owned by a leaf field.
pub struct LeafState {
    /// Current value.
    pub value: Value,
    /// Value captured at first registration; what `reset` restores.
    pub baseline: Option<Value>,
    /// Optional serialization hook applied by serialized reads.
    pub serializer: Option<Serializer>,
    /// Interaction flags.
    pub interaction: InteractionState,
    /// Validators run against the leaf's value.
    pub validators: Vec<Box<dyn Validator>>,
    /// Outcome of the last validator run.
    pub validation: ValidationState,
}

/// State owned by a composite group.
pub struct GroupState {
    /// Ordered, name-keyed member table.
    pub registry: Registry,
    /// Initial-value baseline, merged key-by-key as members register.
    pub baseline: IndexMap<String, Value>,
    /// Interaction flags, derived from members plus focus tracking.
    pub interaction: InteractionState,
    /// Validators run against the group's aggregate value.
    pub validators: Vec<Box<dyn Validator>>,
    /// Outcome of the last validator run, including the synthetic
    /// member condition.
    pub validation: ValidationState,
    /// Whether focus currently sits somewhere inside this subtree.
    pub focus_within: bool,
}

impl Node {
    /// Build a leaf node. Detached until registered under a composite.
    pub fn leaf(name: impl Into<String>, value: Value) -> Self {
        let prefilled = !value.is_empty();
        Self {
            name: name.into(),
            parent: None,
            self_disabled: false,
            inherited_disabled: false,
            body: NodeBody::Leaf(LeafState {
                value,
                baseline: None,
                serializer: None,
                interaction: InteractionState {
                    prefilled,
                    ..InteractionState::default()
                },
                validators: Vec::new(),
                validation: ValidationState::empty(),
            }),
        }
    }

    /// Build a group node with an empty registry.
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            self_disabled: false,
            inherited_disabled: false,
            body: NodeBody::Group(GroupState {
                registry: Registry::new(),
                baseline: IndexMap::new(),
                interaction: InteractionState::default(),
                validators: Vec::new(),
                validation: ValidationState::empty(),
                focus_within: false,
            }),
        }
    }

    /// Effective disabled state: own flag or inherited from an ancestor.
    pub fn disabled(&self) -> bool {
        self.self_disabled || self.inherited_disabled
    }

    /// Whether this node is a composite.
    pub fn is_group(&self) -> bool {
        matches!(self.body, NodeBody::Group(_))
    }

    /// Borrow the group state, if this is a composite.
    pub fn as_group(&self) -> Option<&GroupState> {
        match &self.body {
            NodeBody::Group(group) => Some(group),
            NodeBody::Leaf(_) => None,
        }
    }

    /// Mutably borrow the group state, if this is a composite.
    pub fn as_group_mut(&mut self) -> Option<&mut GroupState> {
        match &mut self.body {
            NodeBody::Group(group) => Some(group),
            NodeBody::Leaf(_) => None,
        }
    }

    /// Borrow the leaf state, if this is a leaf.
    pub fn as_leaf(&self) -> Option<&LeafState> {
        match &self.body {
            NodeBody::Leaf(leaf) => Some(leaf),
            NodeBody::Group(_) => None,
        }
    }

    /// Mutably borrow the leaf state, if this is a leaf.
    pub fn as_leaf_mut(&mut self) -> Option<&mut LeafState> {
        match &mut self.body {
            NodeBody::Leaf(leaf) => Some(leaf),
            NodeBody::Group(_) => None,
        }
    }

    /// The node's interaction flags, leaf or group alike.
    pub fn interaction(&self) -> &InteractionState {
        match &self.body {
            NodeBody::Leaf(leaf) => &leaf.interaction,
            NodeBody::Group(group) => &group.interaction,
        }
    }

    /// Mutable access to the node's interaction flags.
    pub fn interaction_mut(&mut self) -> &mut InteractionState {
        match &mut self.body {
            NodeBody::Leaf(leaf) => &mut leaf.interaction,
            NodeBody::Group(group) => &mut group.interaction,
        }
    }

    /// The node's last validation outcome.
    pub fn validation(&self) -> &ValidationState {
        match &self.body {
            NodeBody::Leaf(leaf) => &leaf.validation,
            NodeBody::Group(group) => &group.validation,
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.body {
            NodeBody::Leaf(_) => "leaf",
            NodeBody::Group(group) => {
                return f
                    .debug_struct("Node")
                    .field("name", &self.name)
                    .field("kind", &"group")
                    .field("members", &group.registry.member_count())
                    .field("disabled", &self.disabled())
                    .finish();
            }
        };
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("kind", &kind)
            .field("disabled", &self.disabled())
            .finish()
    }
}
