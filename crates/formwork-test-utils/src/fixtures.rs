//! Reusable validator fixtures.
//!
//! Four standard validators for engine and integration testing:
//!
//! - [`MustEqualText`] — fails unless the value is exactly a given text.
//! - [`NonEmpty`] — fails on empty values.
//! - [`EvenMemberCount`] — fails unless an aggregate has an even number
//!   of keys; exercises composite validators over membership churn.
//! - [`AlwaysWarn`] — a constant warning-severity result.
//! - [`CountingValidator`] — records how many times it ran.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use formwork_core::{Severity, Validator, Value};

/// Fails unless the value is exactly the expected text.
///
/// The go-to leaf validator for tests: set the expectation to `"cat"`
/// and any other value is an error.
pub struct MustEqualText {
    pub name: String,
    pub expected: String,
}

impl MustEqualText {
    pub fn new(name: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expected: expected.into(),
        }
    }
}

impl Validator for MustEqualText {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, value: &Value) -> bool {
        value.as_text() != Some(self.expected.as_str())
    }
}

/// Fails on empty values ([`Value::is_empty`]).
pub struct NonEmpty;

impl Validator for NonEmpty {
    fn name(&self) -> &str {
        "NonEmpty"
    }

    fn run(&self, value: &Value) -> bool {
        value.is_empty()
    }
}

/// Fails unless the aggregate holds an even number of keys.
///
/// Useful for verifying that composite validators re-run on member
/// (de)registration, not just on value changes.
pub struct EvenMemberCount;

impl Validator for EvenMemberCount {
    fn name(&self) -> &str {
        "EvenMemberCount"
    }

    fn run(&self, value: &Value) -> bool {
        match value.as_group() {
            Some(entries) => entries.len() % 2 != 0,
            None => true,
        }
    }
}

/// Always reports a warning-severity result.
pub struct AlwaysWarn;

impl Validator for AlwaysWarn {
    fn name(&self) -> &str {
        "AlwaysWarn"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn run(&self, _value: &Value) -> bool {
        true
    }
}

/// Counts invocations; never fails.
///
/// Clone the inner counter handle before attaching so the test can
/// observe how many times validation actually ran.
pub struct CountingValidator {
    pub name: String,
    pub calls: Arc<AtomicUsize>,
}

impl CountingValidator {
    pub fn new(name: impl Into<String>) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                name: name.into(),
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

impl Validator for CountingValidator {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, _value: &Value) -> bool {
        self.calls.fetch_add(1, Ordering::Relaxed);
        false
    }
}
