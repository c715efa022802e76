//! The Formwork engine: a live, mutable tree of form participants that
//! behaves, from the outside, as one coherent form control.
//!
//! [`FormTree`] owns every participant node and exposes the operations
//! the surrounding rendering layer drives: registration keyed by name,
//! aggregate reads and writes, enable/disable, reset/clear, focus
//! signals, and registration settling. All derived state (aggregate
//! values, validation, interaction flags) stays consistent with the
//! current membership without full recomputation on every read.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod aggregate;
mod config;
mod events;
mod focus;
mod propagate;
mod settle;
mod snapshot;
mod tree;

pub use config::{GroupConfig, LeafConfig};
pub use settle::Settled;
pub use tree::FormTree;
