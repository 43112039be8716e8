use thiserror::Error;

/// Errors raised while parsing a SMIRKS/SMARTS pattern.
///
/// Parsing is all-or-nothing: any of these surfaces before a partially built
/// pattern graph is ever exposed to a caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SmirksParsingError {
    #[error("empty SMIRKS pattern")]
    Empty,

    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { pos: usize, ch: char },

    #[error("unexpected end of pattern at position {pos}")]
    UnexpectedEnd { pos: usize },

    #[error("unclosed bracket atom starting at position {pos}")]
    UnclosedBracket { pos: usize },

    #[error("empty logical component in bracket atom at position {pos}")]
    EmptyComponent { pos: usize },

    #[error("unmatched parenthesis at position {pos}")]
    UnmatchedParen { pos: usize },

    #[error("bond at position {pos} is not followed by an atom")]
    DanglingBond { pos: usize },

    #[error("ring closure {digit} was opened but never closed")]
    UnclosedRingBond { digit: u32 },

    #[error("ring closure {digit} declares conflicting bond decorators")]
    ConflictingRingBond { digit: u32 },

    #[error("invalid atomic number at position {pos}")]
    InvalidAtomicNumber { pos: usize },

    #[error("invalid atom map index at position {pos}")]
    InvalidMapIndex { pos: usize },

    #[error("unterminated embedded pattern at position {pos}")]
    UnclosedEmbedded { pos: usize },

    #[error("embedded patterns nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}
