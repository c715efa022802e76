//! The [`Validator`] trait and aggregated [`ValidationState`].
//!
//! Validators are modular, stateless checks executed against a node's
//! current value whenever that value (or, for composites, the membership
//! that derives it) changes. A composite additionally carries one
//! synthetic condition, [`MEMBERS_HAVE_NO_ERROR`], that fails while any
//! live member reports an error-severity result.

use std::fmt;

use indexmap::IndexSet;

use crate::value::Value;

/// Name of the synthetic composite condition that fails while any live
/// member reports an error-severity validation result.
pub const MEMBERS_HAVE_NO_ERROR: &str = "MembersHaveNoError";

/// How severe a validation result is.
///
/// Only `Error` results block the synthetic member condition and count
/// toward [`ValidationState::has_errors`]; warnings and infos are
/// advisory and surface solely through feedback queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// The value is invalid.
    Error,
    /// The value is acceptable but suspicious.
    Warning,
    /// Purely informational.
    Info,
}

impl Severity {
    /// All severities, in display order.
    pub const ALL: [Severity; 3] = [Severity::Error, Severity::Warning, Severity::Info];
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// A modular, stateless validation check.
///
/// # Contract
///
/// - `run()` MUST be deterministic for a given value.
/// - `&self` — validators are stateless; they see only the value under
///   check, never the tree, so they cannot mutate it mid-propagation.
/// - `name()` keys the result in [`ValidationState`]; two validators on
///   the same node should not share a name.
///
/// # Object safety
///
/// This trait is object-safe; nodes store validators as
/// `Vec<Box<dyn Validator>>`.
pub trait Validator: Send + 'static {
    /// Name under which a violation is recorded.
    fn name(&self) -> &str;

    /// Severity of a violation. Defaults to [`Severity::Error`].
    fn severity(&self) -> Severity {
        Severity::Error
    }

    /// Check `value`. Returns `true` when the value violates the rule.
    fn run(&self, value: &Value) -> bool;
}

/// The aggregated outcome of running a node's validators.
///
/// One ordered name set per severity; a name is present iff the validator
/// with that name reported a violation on the last run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationState {
    errors: IndexSet<String>,
    warnings: IndexSet<String>,
    infos: IndexSet<String>,
}

impl ValidationState {
    /// A state with no recorded violations.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Record a violation under `name` at the given severity.
    pub fn insert(&mut self, severity: Severity, name: impl Into<String>) {
        self.set_for(severity).insert(name.into());
    }

    /// Whether a violation is recorded under `name` at the given severity.
    pub fn has(&self, severity: Severity, name: &str) -> bool {
        self.for_severity(severity).contains(name)
    }

    /// Whether any error-severity violation is recorded.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Whether no violation of any severity is recorded.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty() && self.infos.is_empty()
    }

    /// The violation names recorded at a severity, in insertion order.
    pub fn names(&self, severity: Severity) -> impl Iterator<Item = &str> {
        self.for_severity(severity).iter().map(String::as_str)
    }

    /// The severities with at least one recorded violation, in
    /// [`Severity::ALL`] order.
    pub fn severities(&self) -> Vec<Severity> {
        Severity::ALL
            .into_iter()
            .filter(|s| !self.for_severity(*s).is_empty())
            .collect()
    }

    /// Drop every recorded violation.
    pub fn clear(&mut self) {
        self.errors.clear();
        self.warnings.clear();
        self.infos.clear();
    }

    fn for_severity(&self, severity: Severity) -> &IndexSet<String> {
        match severity {
            Severity::Error => &self.errors,
            Severity::Warning => &self.warnings,
            Severity::Info => &self.infos,
        }
    }

    fn set_for(&mut self, severity: Severity) -> &mut IndexSet<String> {
        match severity {
            Severity::Error => &mut self.errors,
            Severity::Warning => &mut self.warnings,
            Severity::Info => &mut self.infos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NonEmpty;

    impl Validator for NonEmpty {
        fn name(&self) -> &str {
            "NonEmpty"
        }

        fn run(&self, value: &Value) -> bool {
            value.is_empty()
        }
    }

    #[test]
    fn validator_default_severity_is_error() {
        assert_eq!(NonEmpty.severity(), Severity::Error);
    }

    #[test]
    fn trait_is_object_safe() {
        let boxed: Box<dyn Validator> = Box::new(NonEmpty);
        assert!(boxed.run(&Value::Unset));
        assert!(!boxed.run(&Value::from("x")));
    }

    #[test]
    fn state_records_per_severity() {
        let mut state = ValidationState::empty();
        state.insert(Severity::Error, "A");
        state.insert(Severity::Warning, "B");
        assert!(state.has(Severity::Error, "A"));
        assert!(!state.has(Severity::Error, "B"));
        assert!(state.has_errors());
        assert!(!state.is_clean());
        assert_eq!(state.severities(), vec![Severity::Error, Severity::Warning]);
    }

    #[test]
    fn clear_empties_all_severities() {
        let mut state = ValidationState::empty();
        state.insert(Severity::Error, "A");
        state.insert(Severity::Info, "C");
        state.clear();
        assert!(state.is_clean());
        assert!(state.severities().is_empty());
    }

    #[test]
    fn duplicate_names_collapse() {
        let mut state = ValidationState::empty();
        state.insert(Severity::Error, "A");
        state.insert(Severity::Error, "A");
        assert_eq!(state.names(Severity::Error).count(), 1);
    }
}
