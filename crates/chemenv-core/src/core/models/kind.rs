use super::graph::PatternGraph;
use super::ids::AtomId;
use serde::Serialize;
use std::fmt;

/// The classification of a pattern by the count and connectivity of its
/// indexed atoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PatternKind {
    /// Exactly one indexed atom.
    Atom,
    /// Two indexed atoms, bonded.
    Bond,
    /// Three indexed atoms on the path 1-2-3, with 1 and 3 unbonded.
    Angle,
    /// Four indexed atoms on the linear path 1-2-3-4 with no shortcut bonds.
    ProperTorsion,
    /// Four indexed atoms in a star: one center bonded to the other three,
    /// which are mutually unbonded.
    ImproperTorsion,
}

impl PatternKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Atom => "Atom",
            Self::Bond => "Bond",
            Self::Angle => "Angle",
            Self::ProperTorsion => "ProperTorsion",
            Self::ImproperTorsion => "ImproperTorsion",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Determines the kind of a pattern graph from its indexed atoms alone.
///
/// Returns `None` (unclassified) for zero indexed atoms, duplicate or
/// non-contiguous indices, more than four indexed atoms, or any adjacency
/// shape outside the table above. Unindexed context atoms and embedded
/// sub-patterns never influence the result.
pub fn classify(graph: &PatternGraph) -> Option<PatternKind> {
    let indexed = graph.indexed_atoms();
    if indexed.is_empty() {
        return None;
    }
    // Indices must be exactly 1..=n, each used once.
    if indexed
        .iter()
        .enumerate()
        .any(|(position, &(index, _))| index != position as u32 + 1)
    {
        return None;
    }

    let ids: Vec<AtomId> = indexed.into_iter().map(|(_, id)| id).collect();
    let bonded = |a: AtomId, b: AtomId| graph.bond_between(a, b).is_some();

    match ids.as_slice() {
        [_] => Some(PatternKind::Atom),
        &[a1, a2] => bonded(a1, a2).then_some(PatternKind::Bond),
        &[a1, a2, a3] => {
            (bonded(a1, a2) && bonded(a2, a3) && !bonded(a1, a3)).then_some(PatternKind::Angle)
        }
        &[a1, a2, a3, a4] => {
            let linear = bonded(a1, a2)
                && bonded(a2, a3)
                && bonded(a3, a4)
                && !bonded(a1, a3)
                && !bonded(a1, a4)
                && !bonded(a2, a4);
            if linear {
                return Some(PatternKind::ProperTorsion);
            }

            let all = [a1, a2, a3, a4];
            for center in all {
                let arms: Vec<AtomId> = all.iter().copied().filter(|&id| id != center).collect();
                let star = arms.iter().all(|&arm| bonded(center, arm))
                    && !bonded(arms[0], arms[1])
                    && !bonded(arms[0], arms[2])
                    && !bonded(arms[1], arms[2]);
                if star {
                    return Some(PatternKind::ImproperTorsion);
                }
            }
            None
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::PatternAtom;

    fn indexed(index: u32) -> PatternAtom {
        PatternAtom {
            map_index: Some(index),
            ..PatternAtom::new()
        }
    }

    fn connect(graph: &mut PatternGraph, a: AtomId, b: AtomId) {
        graph.add_bond(a, b, Vec::new(), Vec::new());
    }

    /// Builds a graph with the given indexed atoms and bonds between them,
    /// where bonds name atoms by list position.
    fn build(indices: &[u32], bonds: &[(usize, usize)]) -> PatternGraph {
        let mut graph = PatternGraph::new();
        let ids: Vec<AtomId> = indices.iter().map(|&n| graph.add_atom(indexed(n))).collect();
        for &(a, b) in bonds {
            connect(&mut graph, ids[a], ids[b]);
        }
        graph
    }

    #[test]
    fn single_indexed_atom_is_atom() {
        assert_eq!(classify(&build(&[1], &[])), Some(PatternKind::Atom));
    }

    #[test]
    fn two_bonded_indexed_atoms_are_bond() {
        assert_eq!(classify(&build(&[1, 2], &[(0, 1)])), Some(PatternKind::Bond));
        assert_eq!(classify(&build(&[1, 2], &[])), None);
    }

    #[test]
    fn three_atom_path_is_angle() {
        assert_eq!(
            classify(&build(&[1, 2, 3], &[(0, 1), (1, 2)])),
            Some(PatternKind::Angle)
        );
    }

    #[test]
    fn triangle_is_unclassified() {
        assert_eq!(classify(&build(&[1, 2, 3], &[(0, 1), (1, 2), (0, 2)])), None);
    }

    #[test]
    fn linear_four_atom_path_is_proper_torsion() {
        assert_eq!(
            classify(&build(&[1, 2, 3, 4], &[(0, 1), (1, 2), (2, 3)])),
            Some(PatternKind::ProperTorsion)
        );
    }

    #[test]
    fn star_of_four_is_improper_torsion() {
        assert_eq!(
            classify(&build(&[1, 2, 3, 4], &[(0, 1), (1, 2), (1, 3)])),
            Some(PatternKind::ImproperTorsion)
        );
    }

    #[test]
    fn star_center_may_carry_any_index() {
        // Center is the atom indexed 3.
        assert_eq!(
            classify(&build(&[1, 2, 3, 4], &[(2, 0), (2, 1), (2, 3)])),
            Some(PatternKind::ImproperTorsion)
        );
    }

    #[test]
    fn four_atoms_with_extra_bond_are_unclassified() {
        assert_eq!(
            classify(&build(&[1, 2, 3, 4], &[(0, 1), (1, 2), (2, 3), (0, 3)])),
            None
        );
    }

    #[test]
    fn five_indexed_atoms_are_unclassified() {
        assert_eq!(
            classify(&build(&[1, 2, 3, 4, 5], &[(0, 1), (1, 2), (2, 3), (3, 4)])),
            None
        );
    }

    #[test]
    fn index_gap_is_unclassified() {
        assert_eq!(classify(&build(&[1, 2, 4], &[(0, 1), (1, 2)])), None);
    }

    #[test]
    fn duplicate_indices_are_unclassified() {
        assert_eq!(classify(&build(&[1, 1], &[(0, 1)])), None);
    }

    #[test]
    fn no_indexed_atoms_is_unclassified() {
        assert_eq!(classify(&build(&[], &[])), None);

        let mut graph = PatternGraph::new();
        graph.add_atom(PatternAtom::new());
        graph.add_atom(PatternAtom::new());
        assert_eq!(classify(&graph), None);
    }

    #[test]
    fn disconnected_indexed_atoms_are_unclassified() {
        assert_eq!(classify(&build(&[1, 2, 3], &[(0, 1)])), None);
    }

    #[test]
    fn labels_match_the_wire_names() {
        assert_eq!(PatternKind::Atom.label(), "Atom");
        assert_eq!(PatternKind::ProperTorsion.to_string(), "ProperTorsion");
        assert_eq!(PatternKind::ImproperTorsion.label(), "ImproperTorsion");
    }
}
