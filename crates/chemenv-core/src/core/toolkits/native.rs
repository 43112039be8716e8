use super::adapter::{StructuralDecomposition, ToolkitAdapter};
use crate::core::grammar::error::SmirksParsingError;
use crate::core::grammar::parser;

/// The default pattern-parsing backend: the crate's own grammar parser,
/// token order preserved exactly as written.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeToolkit;

impl ToolkitAdapter for NativeToolkit {
    fn name(&self) -> &'static str {
        "native"
    }

    fn validate_and_decompose(
        &self,
        pattern: &str,
    ) -> Result<StructuralDecomposition, SmirksParsingError> {
        parser::parse(pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decomposes_valid_patterns() {
        let decomposition = NativeToolkit.validate_and_decompose("[*:1]~[*:2]").unwrap();
        assert_eq!(decomposition.atoms.len(), 2);
        assert_eq!(decomposition.bonds.len(), 1);
    }

    #[test]
    fn rejects_invalid_patterns() {
        assert!(NativeToolkit.validate_and_decompose("[*;:1]").is_err());
    }
}
