//! Test utilities for Formwork development.
//!
//! Provides reusable [`Validator`] fixtures for engine and integration
//! tests: value-shape checks, a membership-parity check for composite
//! aggregates, a constant warning, and a call-counting wrapper for
//! asserting when validation actually runs.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod fixtures;

pub use fixtures::{CountingValidator, EvenMemberCount, MustEqualText, NonEmpty, AlwaysWarn};
