use crate::core::grammar::error::SmirksParsingError;
use crate::core::models::tokens::TokenGroup;
use serde::Serialize;

/// The contract every pattern-parsing backend fulfils.
///
/// An adapter is the single external-collaborator boundary of this crate: a
/// synchronous, side-effect-free query that either rejects a pattern as
/// syntactically invalid or returns its structural decomposition. Two
/// adapters given the same valid text must yield structurally equivalent
/// decompositions (same atom count, same bond connectivity, same index
/// assignment) even if their internal token ordering differs.
pub trait ToolkitAdapter: Send + Sync + std::fmt::Debug {
    /// The registry name this adapter is selected by.
    fn name(&self) -> &'static str;

    /// Validates the pattern text and decomposes it into neutral structural
    /// form.
    ///
    /// # Errors
    ///
    /// Returns a [`SmirksParsingError`] when the text is not well-formed
    /// SMIRKS/SMARTS; no partial decomposition is ever returned.
    fn validate_and_decompose(
        &self,
        pattern: &str,
    ) -> Result<StructuralDecomposition, SmirksParsingError>;
}

/// The neutral structural form exchanged between adapters and the graph
/// builder: atoms in text order addressed by position, bonds by positional
/// endpoint pairs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StructuralDecomposition {
    pub atoms: Vec<DecomposedAtom>,
    pub bonds: Vec<DecomposedBond>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DecomposedAtom {
    pub or_types: Vec<TokenGroup>,
    pub and_types: Vec<String>,
    pub map_index: Option<u32>,
    /// Recursive sub-patterns from `$(...)`, anchored at this atom.
    pub embedded: Vec<StructuralDecomposition>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecomposedBond {
    /// Positional indices of the two endpoints within the atom list.
    pub atoms: (usize, usize),
    pub or_types: Vec<TokenGroup>,
    pub and_types: Vec<String>,
}
