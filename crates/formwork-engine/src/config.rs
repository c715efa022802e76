//! Build-then-consume node configurations.
//!
//! A config describes a participant before it exists in the tree;
//! [`FormTree::create_leaf`](crate::FormTree::create_leaf) and
//! [`FormTree::create_group`](crate::FormTree::create_group) consume
//! them. Fields are public so callers can use struct-update syntax; the
//! chainable helpers cover the common cases.

use formwork_arena::Serializer;
use formwork_core::{Validator, Value};

/// Configuration for a leaf field.
pub struct LeafConfig {
    /// Declared name; resolved to a registry key at registration.
    pub name: String,
    /// Initial value. Defaults to [`Value::Unset`].
    pub value: Value,
    /// Whether the leaf starts disabled for its own reasons.
    pub disabled: bool,
    /// Optional serialization hook for serialized reads.
    pub serializer: Option<Serializer>,
    /// Validators run against the leaf's value.
    pub validators: Vec<Box<dyn Validator>>,
}

impl LeafConfig {
    /// A leaf with the given name and all defaults.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Value::Unset,
            disabled: false,
            serializer: None,
            validators: Vec::new(),
        }
    }

    /// Set the initial value.
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self
    }

    /// Start the leaf disabled.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Attach a serialization hook.
    pub fn serializer(mut self, serializer: Serializer) -> Self {
        self.serializer = Some(serializer);
        self
    }

    /// Attach a validator.
    pub fn validator(mut self, validator: impl Validator) -> Self {
        self.validators.push(Box::new(validator));
        self
    }
}

/// Configuration for a composite group.
pub struct GroupConfig {
    /// Declared name. May be empty for an anonymous root group; an empty
    /// name only fails once the group itself tries to register.
    pub name: String,
    /// Whether the group starts disabled for its own reasons.
    pub disabled: bool,
    /// Validators run against the group's aggregate value.
    pub validators: Vec<Box<dyn Validator>>,
}

impl GroupConfig {
    /// A group with the given name and all defaults.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            disabled: false,
            validators: Vec::new(),
        }
    }

    /// Start the group disabled.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Attach a validator.
    pub fn validator(mut self, validator: impl Validator) -> Self {
        self.validators.push(Box::new(validator));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_defaults() {
        let config = LeafConfig::new("color");
        assert_eq!(config.name, "color");
        assert_eq!(config.value, Value::Unset);
        assert!(!config.disabled);
        assert!(config.serializer.is_none());
        assert!(config.validators.is_empty());
    }

    #[test]
    fn chainable_helpers_apply() {
        let config = LeafConfig::new("color").value("blue").disabled();
        assert_eq!(config.value, Value::from("blue"));
        assert!(config.disabled);
    }
}
