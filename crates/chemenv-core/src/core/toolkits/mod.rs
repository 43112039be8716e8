//! Pluggable pattern-parsing backends.
//!
//! This module defines the adapter contract every backend fulfils
//! ([`adapter::ToolkitAdapter`]), the two interchangeable built-in backends
//! ([`native::NativeToolkit`] and [`canonical::CanonicalToolkit`]), and the
//! fail-closed name registry used to select between them
//! ([`registry::ToolkitRegistry`]).

pub mod adapter;
pub mod canonical;
pub mod native;
pub mod registry;
