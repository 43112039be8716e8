use phf::{Map, Set, phf_map, phf_set};
use serde::Serialize;
use std::fmt;

/// Every element symbol accepted inside a bracket atom primitive.
pub static ELEMENT_SYMBOLS: Set<&'static str> = phf_set! {
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne",
    "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar", "K", "Ca",
    "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn",
    "Ga", "Ge", "As", "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr",
    "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In", "Sn",
    "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd",
    "Pm", "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb",
    "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg",
    "Tl", "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th",
    "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk", "Cf", "Es", "Fm",
    "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds",
    "Rg", "Cn", "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
};

/// Lowercase symbols naming aromatic atoms in SMARTS.
pub static AROMATIC_SYMBOLS: Set<&'static str> = phf_set! {
    "b", "c", "n", "o", "p", "s", "as", "se", "te",
};

/// Minimum numeric bond order implied by a single bond-primitive token.
///
/// A wildcard or ring-membership token constrains nothing about the order,
/// so it contributes the lowest order of 1.
static BOND_TOKEN_MIN_ORDER: Map<&'static str, f64> = phf_map! {
    "-" => 1.0,
    "/" => 1.0,
    "\\" => 1.0,
    ":" => 1.5,
    "=" => 2.0,
    "#" => 3.0,
    "~" => 1.0,
    "@" => 1.0,
};

pub fn minimum_bond_order(token: &str) -> f64 {
    *BOND_TOKEN_MIN_ORDER.get(token).unwrap_or(&1.0)
}

/// One OR-option of an atom or bond primitive: a base token plus the
/// conjunctive qualifier tokens attached to it (e.g. `#7` with `X3`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TokenGroup {
    pub base: String,
    pub decorators: Vec<String>,
}

impl TokenGroup {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            decorators: Vec::new(),
        }
    }

    pub fn with_decorators<I, S>(base: impl Into<String>, decorators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            base: base.into(),
            decorators: decorators.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for TokenGroup {
    /// Renders the group as its SMARTS text, qualifiers concatenated after
    /// the base (`#7X3`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base)?;
        for decorator in &self.decorators {
            write!(f, "{decorator}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimum_bond_order_maps_known_tokens() {
        assert_eq!(minimum_bond_order("-"), 1.0);
        assert_eq!(minimum_bond_order(":"), 1.5);
        assert_eq!(minimum_bond_order("="), 2.0);
        assert_eq!(minimum_bond_order("#"), 3.0);
        assert_eq!(minimum_bond_order("~"), 1.0);
    }

    #[test]
    fn minimum_bond_order_defaults_to_single_for_unknown_tokens() {
        assert_eq!(minimum_bond_order("@"), 1.0);
        assert_eq!(minimum_bond_order("!@"), 1.0);
        assert_eq!(minimum_bond_order(""), 1.0);
    }

    #[test]
    fn element_tables_contain_expected_symbols() {
        assert!(ELEMENT_SYMBOLS.contains("C"));
        assert!(ELEMENT_SYMBOLS.contains("Cl"));
        assert!(ELEMENT_SYMBOLS.contains("Og"));
        assert!(!ELEMENT_SYMBOLS.contains("Xx"));
        assert!(AROMATIC_SYMBOLS.contains("c"));
        assert!(AROMATIC_SYMBOLS.contains("se"));
        assert!(!AROMATIC_SYMBOLS.contains("f"));
    }

    #[test]
    fn token_group_display_concatenates_base_and_decorators() {
        let group = TokenGroup::with_decorators("#6", ["X4", "H0"]);
        assert_eq!(group.to_string(), "#6X4H0");
        assert_eq!(TokenGroup::new("*").to_string(), "*");
    }
}
