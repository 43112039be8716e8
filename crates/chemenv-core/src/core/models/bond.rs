use super::ids::AtomId;
use super::tokens::{TokenGroup, minimum_bond_order};

/// One bond primitive connecting two atoms of a pattern graph.
///
/// Endpoints are undirected but stored with a stable orientation so that
/// serialization is deterministic. The decorator model matches atoms:
/// OR-type groups are disjunctive order/ring alternatives (`-,:`), AND-type
/// tokens apply to every alternative (`!@`).
#[derive(Debug, Clone)]
pub struct PatternBond {
    pub atom1: AtomId,
    pub atom2: AtomId,
    pub or_types: Vec<TokenGroup>,
    pub and_types: Vec<String>,
}

impl PatternBond {
    pub fn new(
        atom1: AtomId,
        atom2: AtomId,
        or_types: Vec<TokenGroup>,
        and_types: Vec<String>,
    ) -> Self {
        Self {
            atom1,
            atom2,
            or_types,
            and_types,
        }
    }

    /// The OR-type pair an unwritten bond defaults to in SMARTS.
    pub fn single_or_aromatic() -> Vec<TokenGroup> {
        vec![TokenGroup::new("-"), TokenGroup::new(":")]
    }

    /// Whether this bond carries exactly the implicit single-or-aromatic
    /// decorators, and can therefore be omitted when serializing.
    pub fn is_implicit(&self) -> bool {
        self.and_types.is_empty() && self.or_types == Self::single_or_aromatic()
    }

    pub fn contains(&self, atom_id: AtomId) -> bool {
        self.atom1 == atom_id || self.atom2 == atom_id
    }

    /// The endpoint opposite `atom_id`, if `atom_id` is an endpoint at all.
    pub fn other(&self, atom_id: AtomId) -> Option<AtomId> {
        if self.atom1 == atom_id {
            Some(self.atom2)
        } else if self.atom2 == atom_id {
            Some(self.atom1)
        } else {
            None
        }
    }

    /// Lowest numeric bond order consistent with the declared OR-options.
    ///
    /// `=,:` yields 1.5; an unconstrained bond yields 1.
    pub fn min_order(&self) -> f64 {
        if self.or_types.is_empty() {
            return 1.0;
        }
        self.or_types
            .iter()
            .map(|group| minimum_bond_order(&group.base))
            .fold(f64::INFINITY, f64::min)
    }

    /// Appends an OR-type group; adding an identical group again is a no-op.
    pub fn add_or_type(&mut self, group: TokenGroup) {
        if !self.or_types.contains(&group) {
            self.or_types.push(group);
        }
    }

    /// Appends an AND-type token; adding an identical token again is a no-op.
    pub fn add_and_type(&mut self, token: impl Into<String>) {
        let token = token.into();
        if !self.and_types.contains(&token) {
            self.and_types.push(token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn dummy_atom_id(n: u64) -> AtomId {
        AtomId::from(KeyData::from_ffi(n))
    }

    fn bond_with_or_types(tokens: &[&str]) -> PatternBond {
        PatternBond::new(
            dummy_atom_id(1),
            dummy_atom_id(2),
            tokens.iter().copied().map(TokenGroup::new).collect(),
            Vec::new(),
        )
    }

    #[test]
    fn contains_and_other_cover_both_endpoints() {
        let a = dummy_atom_id(10);
        let b = dummy_atom_id(20);
        let bond = PatternBond::new(a, b, PatternBond::single_or_aromatic(), Vec::new());
        assert!(bond.contains(a));
        assert!(bond.contains(b));
        assert!(!bond.contains(dummy_atom_id(30)));
        assert_eq!(bond.other(a), Some(b));
        assert_eq!(bond.other(b), Some(a));
        assert_eq!(bond.other(dummy_atom_id(30)), None);
    }

    #[test]
    fn implicit_bond_is_exactly_the_single_or_aromatic_pair() {
        let implicit = bond_with_or_types(&["-", ":"]);
        assert!(implicit.is_implicit());

        let any = bond_with_or_types(&["~"]);
        assert!(!any.is_implicit());

        let mut ring_constrained = bond_with_or_types(&["-", ":"]);
        ring_constrained.add_and_type("@");
        assert!(!ring_constrained.is_implicit());
    }

    #[test]
    fn min_order_takes_the_lowest_or_option() {
        assert_eq!(bond_with_or_types(&["="]).min_order(), 2.0);
        assert_eq!(bond_with_or_types(&["=", ":"]).min_order(), 1.5);
        assert_eq!(bond_with_or_types(&["-", ":"]).min_order(), 1.0);
        assert_eq!(bond_with_or_types(&["#"]).min_order(), 3.0);
    }

    #[test]
    fn min_order_of_an_unconstrained_bond_is_single() {
        assert_eq!(bond_with_or_types(&[]).min_order(), 1.0);
        assert_eq!(bond_with_or_types(&["~"]).min_order(), 1.0);
    }

    #[test]
    fn decorator_addition_is_idempotent() {
        let mut bond = bond_with_or_types(&[]);
        bond.add_or_type(TokenGroup::new("-"));
        bond.add_or_type(TokenGroup::new("-"));
        assert_eq!(bond.or_types.len(), 1);

        bond.add_and_type("!@");
        bond.add_and_type("!@");
        assert_eq!(bond.and_types, vec!["!@".to_string()]);
    }
}
