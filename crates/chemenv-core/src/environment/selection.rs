use crate::core::models::graph::PatternGraph;
use crate::core::models::ids::{AtomId, BondId};
use std::collections::HashSet;

/// Selects atoms or bonds of a pattern by their relationship to the indexed
/// atoms.
///
/// Alpha components sit directly on an indexed atom; beta components sit on
/// an alpha atom without touching an indexed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Descriptor {
    /// The atom carrying this map index, or the bond joining the atoms
    /// indexed `n` and `n + 1`.
    Index(u32),
    /// Atoms with a map index; bonds whose endpoints are both indexed.
    Indexed,
    /// Atoms without a map index; bonds with at least one unindexed endpoint.
    Unindexed,
    /// Unindexed atoms bonded to an indexed atom; bonds joining an indexed
    /// atom to an alpha atom.
    Alpha,
    /// Unindexed, non-alpha atoms bonded to an alpha atom; bonds joining an
    /// alpha atom to a beta atom.
    Beta,
}

impl From<u32> for Descriptor {
    fn from(index: u32) -> Self {
        Self::Index(index)
    }
}

struct AtomLabels {
    indexed: HashSet<AtomId>,
    alpha: HashSet<AtomId>,
    beta: HashSet<AtomId>,
}

fn label_atoms(graph: &PatternGraph) -> AtomLabels {
    let indexed: HashSet<AtomId> = graph
        .atoms_iter()
        .filter(|(_, atom)| atom.is_indexed())
        .map(|(id, _)| id)
        .collect();

    let alpha: HashSet<AtomId> = graph
        .atoms_iter()
        .map(|(id, _)| id)
        .filter(|id| !indexed.contains(id))
        .filter(|&id| graph.neighbors(id).any(|neighbor| indexed.contains(&neighbor)))
        .collect();

    let beta: HashSet<AtomId> = graph
        .atoms_iter()
        .map(|(id, _)| id)
        .filter(|id| !indexed.contains(id) && !alpha.contains(id))
        .filter(|&id| graph.neighbors(id).any(|neighbor| alpha.contains(&neighbor)))
        .collect();

    AtomLabels {
        indexed,
        alpha,
        beta,
    }
}

pub(crate) fn select_atoms(graph: &PatternGraph, descriptor: Descriptor) -> Vec<AtomId> {
    let labels = label_atoms(graph);
    graph
        .atoms_iter()
        .filter(|&(id, atom)| match descriptor {
            Descriptor::Index(index) => atom.map_index == Some(index),
            Descriptor::Indexed => labels.indexed.contains(&id),
            Descriptor::Unindexed => !labels.indexed.contains(&id),
            Descriptor::Alpha => labels.alpha.contains(&id),
            Descriptor::Beta => labels.beta.contains(&id),
        })
        .map(|(id, _)| id)
        .collect()
}

pub(crate) fn select_bonds(graph: &PatternGraph, descriptor: Descriptor) -> Vec<BondId> {
    if let Descriptor::Index(index) = descriptor {
        let bond = graph
            .atom_with_index(index)
            .zip(graph.atom_with_index(index + 1))
            .and_then(|(a, b)| graph.bond_between(a, b));
        return bond.into_iter().collect();
    }

    let labels = label_atoms(graph);
    let joins = |a: AtomId, b: AtomId, left: &HashSet<AtomId>, right: &HashSet<AtomId>| {
        (left.contains(&a) && right.contains(&b)) || (left.contains(&b) && right.contains(&a))
    };

    graph
        .bonds_iter()
        .filter(|&(_, bond)| match descriptor {
            Descriptor::Index(_) => false,
            Descriptor::Indexed => {
                labels.indexed.contains(&bond.atom1) && labels.indexed.contains(&bond.atom2)
            }
            Descriptor::Unindexed => {
                !labels.indexed.contains(&bond.atom1) || !labels.indexed.contains(&bond.atom2)
            }
            Descriptor::Alpha => joins(bond.atom1, bond.atom2, &labels.indexed, &labels.alpha),
            Descriptor::Beta => joins(bond.atom1, bond.atom2, &labels.alpha, &labels.beta),
        })
        .map(|(id, _)| id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grammar::parser::parse;

    fn graph_of(pattern: &str) -> PatternGraph {
        PatternGraph::from_decomposition(&parse(pattern).unwrap())
    }

    /// Three indexed atoms, one alpha nitrogen on atom 2, no betas.
    fn angle_graph() -> PatternGraph {
        graph_of("[#6X3;R1:1]=,:;@[#6X3;R1;a:2](-,:;@[#7])-;!@[#8X2H1;!R:3]")
    }

    #[test]
    fn atom_component_counts_match_the_pattern() {
        let graph = angle_graph();
        assert_eq!(select_atoms(&graph, Descriptor::Indexed).len(), 3);
        assert_eq!(select_atoms(&graph, Descriptor::Unindexed).len(), 1);
        assert_eq!(select_atoms(&graph, Descriptor::Alpha).len(), 1);
        assert_eq!(select_atoms(&graph, Descriptor::Beta).len(), 0);
    }

    #[test]
    fn bond_component_counts_match_the_pattern() {
        let graph = angle_graph();
        assert_eq!(select_bonds(&graph, Descriptor::Indexed).len(), 2);
        assert_eq!(select_bonds(&graph, Descriptor::Unindexed).len(), 1);
        assert_eq!(select_bonds(&graph, Descriptor::Alpha).len(), 1);
        assert_eq!(select_bonds(&graph, Descriptor::Beta).len(), 0);
    }

    #[test]
    fn index_descriptors_resolve_by_map_index() {
        let graph = angle_graph();
        let second = select_atoms(&graph, Descriptor::Index(2));
        assert_eq!(second.len(), 1);
        assert_eq!(graph.atom(second[0]).unwrap().map_index, Some(2));
        assert!(select_atoms(&graph, Descriptor::Index(4)).is_empty());
    }

    #[test]
    fn index_descriptors_resolve_consecutive_bonds() {
        let graph = angle_graph();
        assert_eq!(select_bonds(&graph, Descriptor::Index(1)).len(), 1);
        assert_eq!(select_bonds(&graph, Descriptor::Index(2)).len(), 1);
        assert!(select_bonds(&graph, Descriptor::Index(3)).is_empty());
        assert!(select_bonds(&graph, Descriptor::Index(4)).is_empty());
    }

    #[test]
    fn beta_atoms_sit_behind_alpha_atoms() {
        // The trailing hydrogen is beta: bonded to the alpha nitrogen only.
        let graph = graph_of("[#6:1]-[#7]-[#1]");
        assert_eq!(select_atoms(&graph, Descriptor::Alpha).len(), 1);
        assert_eq!(select_atoms(&graph, Descriptor::Beta).len(), 1);
        assert_eq!(select_bonds(&graph, Descriptor::Beta).len(), 1);
    }

    #[test]
    fn an_unindexed_pattern_has_no_alpha_atoms() {
        let graph = graph_of("CCC");
        assert!(select_atoms(&graph, Descriptor::Indexed).is_empty());
        assert_eq!(select_atoms(&graph, Descriptor::Unindexed).len(), 3);
        assert!(select_atoms(&graph, Descriptor::Alpha).is_empty());
        assert!(select_atoms(&graph, Descriptor::Beta).is_empty());
    }
}
