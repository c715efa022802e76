//! The ordered, name-keyed member table one composite holds.
//!
//! Keys iterate in first-appearance order; members within an array-group
//! entry keep attachment order. The registry stores only handles — the
//! arena owns node lifetime — and its removal path is idempotent so the
//! surrounding tree may tear members down in any order.

use smallvec::SmallVec;

use formwork_core::NameError;

use crate::handle::NodeId;
use crate::resolve::{is_array_name, resolve_key, ResolvedKey};

/// Members registered under one key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryEntry {
    /// A unique non-array member.
    Single(NodeId),
    /// Ordered members of an array group. Never empty: the registry
    /// prunes the key when the last member leaves.
    ArrayGroup(SmallVec<[NodeId; 2]>),
}

impl RegistryEntry {
    /// The members under this key, in attachment order.
    pub fn members(&self) -> &[NodeId] {
        match self {
            Self::Single(id) => std::slice::from_ref(id),
            Self::ArrayGroup(ids) => ids,
        }
    }

    /// Number of members under this key.
    pub fn len(&self) -> usize {
        self.members().len()
    }

    /// Whether this entry holds no members. Always false for a
    /// registry-resident entry; pruning removes emptied array groups.
    pub fn is_empty(&self) -> bool {
        self.members().is_empty()
    }

    /// Whether this is an array-group entry.
    pub fn is_array(&self) -> bool {
        matches!(self, Self::ArrayGroup(_))
    }
}

/// Ordered mapping from registry key to registered member(s).
#[derive(Default)]
pub struct Registry {
    entries: indexmap::IndexMap<String, RegistryEntry>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `name` and insert `id` under the resulting key.
    ///
    /// All-or-nothing: on error the registry is untouched. Returns the
    /// resolved key so the caller can mirror it (e.g. into a baseline).
    pub fn register(
        &mut self,
        name: &str,
        parent_name: Option<&str>,
        id: NodeId,
    ) -> Result<ResolvedKey, NameError> {
        let resolved = resolve_key(name, parent_name, self)?;
        match &resolved {
            ResolvedKey::Single(key) => {
                self.entries.insert(key.clone(), RegistryEntry::Single(id));
            }
            ResolvedKey::ArrayGroup(key) => match self.entries.get_mut(key.as_str()) {
                Some(RegistryEntry::ArrayGroup(ids)) => ids.push(id),
                _ => {
                    self.entries.insert(
                        key.clone(),
                        RegistryEntry::ArrayGroup(SmallVec::from_elem(id, 1)),
                    );
                }
            },
        }
        Ok(resolved)
    }

    /// Remove `id` from whichever entry holds it.
    ///
    /// Prunes an array-group key when its last member leaves. Idempotent:
    /// removing an absent handle is a no-op and reports `false`.
    pub fn remove(&mut self, id: NodeId) -> bool {
        let Some(key_index) = self.index_of(id) else {
            return false;
        };
        let emptied = match &mut self.entries[key_index] {
            RegistryEntry::Single(_) => true,
            RegistryEntry::ArrayGroup(ids) => {
                ids.retain(|member| *member != id);
                ids.is_empty()
            }
        };
        if emptied {
            self.entries.shift_remove_index(key_index);
        }
        true
    }

    /// Move `id` to a new key, applying the same collision rules as
    /// registration. On error the member stays under its old key in its
    /// old position. Renaming to the current key is a no-op.
    pub fn rename(
        &mut self,
        id: NodeId,
        new_name: &str,
        parent_name: Option<&str>,
    ) -> Result<(), NameError> {
        if self.key_of(id) == Some(new_name) {
            return Ok(());
        }
        if new_name.is_empty() {
            return Err(NameError::Missing);
        }
        if parent_name == Some(new_name) {
            return Err(NameError::MatchesParent {
                name: new_name.to_string(),
            });
        }
        if !is_array_name(new_name) && self.entries.contains_key(new_name) {
            return Err(NameError::Duplicate {
                name: new_name.to_string(),
            });
        }
        if !self.remove(id) {
            return Ok(());
        }
        // Checked above, so this cannot fail and roll back is never needed.
        let _ = self.register(new_name, parent_name, id);
        Ok(())
    }

    /// The entry under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&RegistryEntry> {
        self.entries.get(key)
    }

    /// Whether `key` currently holds at least one member.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// The key `id` is registered under, if any.
    pub fn key_of(&self, id: NodeId) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, entry)| entry.members().contains(&id))
            .map(|(key, _)| key.as_str())
    }

    /// Whether `id` is registered under any key.
    pub fn contains(&self, id: NodeId) -> bool {
        self.index_of(id).is_some()
    }

    /// Keys in first-appearance order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of distinct keys holding at least one member.
    pub fn key_count(&self) -> usize {
        self.entries.len()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RegistryEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// Every member flattened in key order, array members in attachment
    /// order.
    pub fn all(&self) -> Vec<NodeId> {
        self.entries
            .values()
            .flat_map(|entry| entry.members().iter().copied())
            .collect()
    }

    /// Total member count; each array-group member counts once.
    pub fn member_count(&self) -> usize {
        self.entries.values().map(RegistryEntry::len).sum()
    }

    /// Whether no member is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn index_of(&self, id: NodeId) -> Option<usize> {
        self.entries
            .values()
            .position(|entry| entry.members().contains(&id))
    }
}
