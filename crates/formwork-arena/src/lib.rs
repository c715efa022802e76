//! Node arena, participant model, and ordered registry for Formwork.
//!
//! The rendering tree owns participant lifetime; everything in this
//! crate indexes participants without owning them. [`NodeArena`] is the
//! single owner of node storage, [`NodeId`] is a generational handle
//! that goes stale the moment its node is removed, and [`Registry`] is
//! the ordered name-keyed member table one composite holds.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod arena;
mod handle;
mod node;
mod registry;
mod resolve;

pub use arena::NodeArena;
pub use handle::NodeId;
pub use node::{GroupState, LeafState, Node, NodeBody, Serializer};
pub use registry::{Registry, RegistryEntry};
pub use resolve::{is_array_name, resolve_key, ResolvedKey, ARRAY_SUFFIX};
