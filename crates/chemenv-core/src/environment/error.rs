use crate::core::grammar::error::SmirksParsingError;
use crate::core::models::kind::PatternKind;
use crate::core::toolkits::registry::ToolkitSelectionError;
use thiserror::Error;

/// Errors surfaced when constructing a chemical environment.
///
/// The three variants are deliberately distinct: malformed pattern text,
/// well-formed text whose indexed-atom shape does not match the requested
/// specialization, and a toolkit selector naming an unregistered adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvironmentError {
    #[error(transparent)]
    Parsing(#[from] SmirksParsingError),

    #[error(
        "SMIRKS pattern classified as {}, but a {expected} environment was requested",
        .actual.map_or("unclassified", |kind| kind.label())
    )]
    Mismatch {
        expected: PatternKind,
        actual: Option<PatternKind>,
    },

    #[error(transparent)]
    ToolkitSelection(#[from] ToolkitSelectionError),
}
