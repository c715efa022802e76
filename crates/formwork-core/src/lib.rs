//! Core types for the Formwork form-state engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the abstractions shared by the rest of the workspace: the dynamic
//! [`Value`] algebra, registration error types, the [`Validator`] trait
//! with its aggregated [`ValidationState`], and interaction flags.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod error;
mod interact;
mod validate;
mod value;

pub use error::NameError;
pub use interact::InteractionState;
pub use validate::{Severity, ValidationState, Validator, MEMBERS_HAVE_NO_ERROR};
pub use value::Value;
