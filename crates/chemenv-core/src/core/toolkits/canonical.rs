use super::adapter::{StructuralDecomposition, ToolkitAdapter};
use crate::core::grammar::error::SmirksParsingError;
use crate::core::grammar::parser;

/// A pattern-parsing backend that sorts decorator tokens into canonical
/// order.
///
/// Structurally this adapter is interchangeable with [`NativeToolkit`]: it
/// accepts and rejects exactly the same inputs and produces the same atoms,
/// bonds, and index assignments. Only the internal ordering of decorator
/// tokens differs, which exercises the adapter-equivalence guarantee.
///
/// [`NativeToolkit`]: super::native::NativeToolkit
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalToolkit;

impl ToolkitAdapter for CanonicalToolkit {
    fn name(&self) -> &'static str {
        "canonical"
    }

    fn validate_and_decompose(
        &self,
        pattern: &str,
    ) -> Result<StructuralDecomposition, SmirksParsingError> {
        let mut decomposition = parser::parse(pattern)?;
        canonicalize(&mut decomposition);
        Ok(decomposition)
    }
}

fn canonicalize(decomposition: &mut StructuralDecomposition) {
    for atom in &mut decomposition.atoms {
        for group in &mut atom.or_types {
            group.decorators.sort();
        }
        atom.or_types.sort();
        atom.and_types.sort();
        for sub_pattern in &mut atom.embedded {
            canonicalize(sub_pattern);
        }
    }
    for bond in &mut decomposition.bonds {
        for group in &mut bond.or_types {
            group.decorators.sort();
        }
        bond.or_types.sort();
        bond.and_types.sort();
    }
}

#[cfg(test)]
mod tests {
    use super::super::native::NativeToolkit;
    use super::*;
    use crate::core::models::tokens::TokenGroup;

    #[test]
    fn token_groups_come_out_sorted() {
        let decomposition = CanonicalToolkit
            .validate_and_decompose("[#8,#7;X3;H0:1]")
            .unwrap();
        let atom = &decomposition.atoms[0];
        assert_eq!(
            atom.or_types,
            vec![TokenGroup::new("#7"), TokenGroup::new("#8")]
        );
        assert_eq!(atom.and_types, vec!["H0".to_string(), "X3".to_string()]);
    }

    #[test]
    fn structure_matches_the_native_adapter() {
        for pattern in ["[*:1]~[*:2]", "[#6X4H0,#7:1]-[#8:2]", "C1CC1"] {
            let native = NativeToolkit.validate_and_decompose(pattern).unwrap();
            let canonical = CanonicalToolkit.validate_and_decompose(pattern).unwrap();
            assert_eq!(native.atoms.len(), canonical.atoms.len());
            assert_eq!(native.bonds.len(), canonical.bonds.len());
            for (a, b) in native.atoms.iter().zip(&canonical.atoms) {
                assert_eq!(a.map_index, b.map_index);
            }
            for (a, b) in native.bonds.iter().zip(&canonical.bonds) {
                assert_eq!(a.atoms, b.atoms);
            }
        }
    }

    #[test]
    fn rejects_exactly_what_the_native_adapter_rejects() {
        for pattern in ["[*;:1]", "C1CC", "[#6"] {
            assert_eq!(
                NativeToolkit.validate_and_decompose(pattern).err(),
                CanonicalToolkit.validate_and_decompose(pattern).err(),
            );
        }
    }
}
