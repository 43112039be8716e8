//! SMIRKS/SMARTS grammar handling.
//!
//! The [`parser`] turns raw pattern text into the neutral structural
//! decomposition consumed by the graph builder, and the [`writer`] renders a
//! pattern graph back to canonical SMIRKS/SMARTS text. Both directions share
//! the decorator-token model defined in the core models.

pub mod error;
pub mod parser;
pub mod writer;
