//! Name resolution: declared participant name to registry key.
//!
//! A name ending in the two-character suffix `[]` declares an array
//! group: any number of same-named siblings collect into one ordered
//! entry. Every other name must be unique among its siblings and
//! distinct from the parent composite's own name. Resolution never
//! mutates the registry; a rejected candidate leaves no trace.

use formwork_core::NameError;

use crate::registry::Registry;

/// The suffix that turns a name into an array-group name.
pub const ARRAY_SUFFIX: &str = "[]";

/// Whether `name` declares an array group.
pub fn is_array_name(name: &str) -> bool {
    name.ends_with(ARRAY_SUFFIX)
}

/// A successfully resolved registry key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolvedKey {
    /// A unique single-member key.
    Single(String),
    /// An array-group key; the participant appends to the member list.
    ArrayGroup(String),
}

impl ResolvedKey {
    /// The key string, either variant.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Single(key) | Self::ArrayGroup(key) => key,
        }
    }
}

/// Compute the registry key for a candidate participant.
///
/// # Errors
///
/// - [`NameError::Missing`] when `name` is empty.
/// - [`NameError::MatchesParent`] when `name` equals the parent
///   composite's own name.
/// - [`NameError::Duplicate`] when a non-array `name` is already a key
///   in `registry`.
pub fn resolve_key(
    name: &str,
    parent_name: Option<&str>,
    registry: &Registry,
) -> Result<ResolvedKey, NameError> {
    if name.is_empty() {
        return Err(NameError::Missing);
    }
    if parent_name == Some(name) {
        return Err(NameError::MatchesParent {
            name: name.to_string(),
        });
    }
    if is_array_name(name) {
        return Ok(ResolvedKey::ArrayGroup(name.to_string()));
    }
    if registry.contains_key(name) {
        return Err(NameError::Duplicate {
            name: name.to_string(),
        });
    }
    Ok(ResolvedKey::Single(name.to_string()))
}
