//! # Core Module
//!
//! The foundation layer of the crate: stateless data models for pattern
//! graphs, the SMIRKS/SMARTS grammar parser and serializer, and the
//! pluggable toolkit backends that validate and decompose pattern text.
//!
//! ## Architecture
//!
//! - **Pattern representation** ([`models`]) - atoms, bonds, decorator
//!   tokens, the mutable pattern graph, and kind classification
//! - **Grammar** ([`grammar`]) - text to structural decomposition and back
//! - **Toolkits** ([`toolkits`]) - interchangeable parsing backends behind a
//!   single adapter contract, selected through a fail-closed registry

pub mod grammar;
pub mod models;
pub mod toolkits;
