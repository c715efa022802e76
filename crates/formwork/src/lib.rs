//! Formwork: a hierarchical form-state aggregation and propagation engine.
//!
//! A tree of form participants — leaf fields and composite groups — that
//! behaves, from the outside, as one coherent form control. Members
//! register dynamically under name-derived keys (including `[]` array
//! groups), composites derive aggregate values and validation from their
//! members on demand, and mutations (writes, enable/disable, reset,
//! clear, focus transitions) propagate through the tree while preserving
//! ordering, disabled exclusion, and initial-value baselines.
//!
//! This is the top-level facade crate that re-exports the public API
//! from the Formwork sub-crates. For most users, adding `formwork` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use formwork::prelude::*;
//!
//! let mut tree = FormTree::new();
//! let form = tree.create_group(GroupConfig::new("profile"));
//! let name = tree.create_leaf(LeafConfig::new("name").value("Ada"));
//! let hobby_a = tree.create_leaf(LeafConfig::new("hobbies[]").value("chess"));
//! let hobby_b = tree.create_leaf(LeafConfig::new("hobbies[]").value("rugby"));
//! tree.register(form, name).unwrap();
//! tree.register(form, hobby_a).unwrap();
//! tree.register(form, hobby_b).unwrap();
//!
//! assert_eq!(
//!     tree.value(form),
//!     Value::group([
//!         ("name", Value::from("Ada")),
//!         ("hobbies[]", Value::list([
//!             Value::from("chess"),
//!             Value::from("rugby"),
//!         ])),
//!     ]),
//! );
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `formwork-core` | Value algebra, validation, errors, interaction flags |
//! | [`arena`] | `formwork-arena` | Node arena, handles, registry, name resolution |
//! | [`engine`] | `formwork-engine` | The `FormTree` engine and node configs |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types: values, validation, errors, interaction flags
/// (`formwork-core`).
pub use formwork_core as types;

/// Node arena, handles, registry, and name resolution
/// (`formwork-arena`).
pub use formwork_arena as arena;

/// The [`engine::FormTree`] engine and node configurations
/// (`formwork-engine`).
pub use formwork_engine as engine;

/// Common imports for typical Formwork usage.
///
/// ```rust
/// use formwork::prelude::*;
/// ```
pub mod prelude {
    // Engine
    pub use formwork_engine::{FormTree, GroupConfig, LeafConfig, Settled};

    // Handles
    pub use formwork_arena::NodeId;

    // Core types
    pub use formwork_core::{
        InteractionState, NameError, Severity, ValidationState, Validator, Value,
        MEMBERS_HAVE_NO_ERROR,
    };
}
