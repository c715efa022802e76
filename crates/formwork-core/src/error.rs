//! Registration error types.
//!
//! Name resolution is the only fallible operation in the engine: every
//! other operation (removal, reads, reset, clear) is total over arbitrary
//! tree shapes. A [`NameError`] is fatal to the registration call that
//! raised it and never leaves the registry partially mutated.

use std::error::Error;
use std::fmt;

/// Why a participant's registration was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NameError {
    /// The participant declares no name (empty string).
    Missing,
    /// The participant's name is identical to its parent composite's name.
    MatchesParent {
        /// The shared name.
        name: String,
    },
    /// A sibling is already registered under the same non-array name.
    Duplicate {
        /// The conflicting name.
        name: String,
    },
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "a name must be defined before registering"),
            Self::MatchesParent { name } => {
                write!(f, "name \"{name}\" is the same as its parent group's name")
            }
            Self::Duplicate { name } => {
                write!(
                    f,
                    "name \"{name}\" is already registered - append [] to collect an array group"
                )
            }
        }
    }
}

impl Error for NameError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_message_names_the_conflict_and_suggests_arrays() {
        let msg = NameError::Duplicate {
            name: "fooBar".into(),
        }
        .to_string();
        assert!(msg.contains("\"fooBar\""));
        assert!(msg.contains("[]"));
    }

    #[test]
    fn parent_collision_message_names_the_shared_name() {
        let msg = NameError::MatchesParent { name: "root".into() }.to_string();
        assert!(msg.contains("\"root\""));
        assert!(msg.contains("parent"));
    }

    #[test]
    fn errors_are_std_errors() {
        fn assert_error<E: Error>(_: &E) {}
        assert_error(&NameError::Missing);
    }
}
