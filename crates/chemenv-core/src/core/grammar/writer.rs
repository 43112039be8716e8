use crate::core::models::atom::PatternAtom;
use crate::core::models::bond::PatternBond;
use crate::core::models::graph::PatternGraph;
use crate::core::models::ids::{AtomId, BondId};
use std::collections::{HashMap, HashSet};

/// Renders a pattern graph as SMIRKS text, atom-map indices included.
pub fn to_smirks(graph: &PatternGraph) -> String {
    write_pattern(graph, true)
}

/// Renders a pattern graph as plain SMARTS text, atom-map indices stripped.
pub fn to_atomtype_smarts(graph: &PatternGraph) -> String {
    write_pattern(graph, false)
}

/// Renders a single atom primitive on its own, index included.
pub fn atom_to_smirks(atom: &PatternAtom) -> String {
    let mut out = String::new();
    write_atom_into(atom, true, &mut out);
    out
}

fn write_pattern(graph: &PatternGraph, with_indices: bool) -> String {
    connected_components(graph)
        .iter()
        .map(|component| write_component(graph, component, with_indices))
        .collect::<Vec<_>>()
        .join(".")
}

fn connected_components(graph: &PatternGraph) -> Vec<Vec<AtomId>> {
    let mut visited: HashSet<AtomId> = HashSet::new();
    let mut components = Vec::new();

    for (start, _) in graph.atoms_iter() {
        if visited.contains(&start) {
            continue;
        }
        let mut component = Vec::new();
        let mut stack = vec![start];
        visited.insert(start);
        while let Some(node) = stack.pop() {
            component.push(node);
            for neighbor in graph.neighbors(node) {
                if visited.insert(neighbor) {
                    stack.push(neighbor);
                }
            }
        }
        components.push(component);
    }
    components
}

/// Traversal starts from the lowest-indexed atom of the component, or its
/// first atom when none is indexed.
fn component_root(graph: &PatternGraph, component: &[AtomId]) -> AtomId {
    component
        .iter()
        .copied()
        .filter_map(|id| {
            graph
                .atom(id)
                .and_then(|atom| atom.map_index)
                .map(|index| (index, id))
        })
        .min_by_key(|&(index, _)| index)
        .map(|(_, id)| id)
        .unwrap_or(component[0])
}

struct Traversal {
    children: HashMap<AtomId, Vec<AtomId>>,
    ring_opens: HashMap<AtomId, Vec<(u32, BondId)>>,
    ring_closes: HashMap<AtomId, Vec<u32>>,
}

fn write_component(graph: &PatternGraph, component: &[AtomId], with_indices: bool) -> String {
    let root = component_root(graph, component);
    let traversal = plan_traversal(graph, root);

    let mut out = String::new();
    write_node(graph, root, &traversal, with_indices, &mut out);
    out
}

/// Depth-first pass assigning tree children and ring-closure digits.
///
/// Every non-tree edge in an undirected depth-first traversal is a back edge,
/// so the "open" side of a ring digit is always emitted before its "close"
/// side.
fn plan_traversal(graph: &PatternGraph, root: AtomId) -> Traversal {
    let mut visited: HashSet<AtomId> = HashSet::new();
    let mut parent: HashMap<AtomId, AtomId> = HashMap::new();
    let mut children: HashMap<AtomId, Vec<AtomId>> = HashMap::new();
    let mut ring_opens: HashMap<AtomId, Vec<(u32, BondId)>> = HashMap::new();
    let mut ring_closes: HashMap<AtomId, Vec<u32>> = HashMap::new();
    let mut assigned: HashSet<BondId> = HashSet::new();
    let mut next_digit = 1u32;

    let mut stack: Vec<(AtomId, usize)> = vec![(root, 0)];
    visited.insert(root);

    loop {
        let Some(&mut (node, ref mut cursor)) = stack.last_mut() else {
            break;
        };
        let adjacency = graph.adjacency(node);
        if *cursor >= adjacency.len() {
            stack.pop();
            continue;
        }
        let (neighbor, bond_id) = adjacency[*cursor];
        *cursor += 1;

        if visited.insert(neighbor) {
            parent.insert(neighbor, node);
            children.entry(node).or_default().push(neighbor);
            stack.push((neighbor, 0));
        } else if parent.get(&node) != Some(&neighbor) && assigned.insert(bond_id) {
            let digit = next_digit;
            next_digit += 1;
            ring_opens.entry(neighbor).or_default().push((digit, bond_id));
            ring_closes.entry(node).or_default().push(digit);
        }
    }

    Traversal {
        children,
        ring_opens,
        ring_closes,
    }
}

fn write_node(
    graph: &PatternGraph,
    node: AtomId,
    traversal: &Traversal,
    with_indices: bool,
    out: &mut String,
) {
    if let Some(atom) = graph.atom(node) {
        write_atom_into(atom, with_indices, out);
    }

    if let Some(opens) = traversal.ring_opens.get(&node) {
        for &(digit, bond_id) in opens {
            if let Some(bond) = graph.bond(bond_id) {
                out.push_str(&bond_text(bond));
            }
            push_ring_digit(digit, out);
        }
    }
    if let Some(closes) = traversal.ring_closes.get(&node) {
        for &digit in closes {
            push_ring_digit(digit, out);
        }
    }

    let children = traversal
        .children
        .get(&node)
        .map(Vec::as_slice)
        .unwrap_or(&[]);
    let last = children.len().saturating_sub(1);
    for (position, &child) in children.iter().enumerate() {
        let parenthesized = position < last;
        if parenthesized {
            out.push('(');
        }
        if let Some(bond_id) = graph.bond_between(node, child) {
            if let Some(bond) = graph.bond(bond_id) {
                out.push_str(&bond_text(bond));
            }
        }
        write_node(graph, child, traversal, with_indices, out);
        if parenthesized {
            out.push(')');
        }
    }
}

pub(crate) fn write_atom_into(atom: &PatternAtom, with_indices: bool, out: &mut String) {
    out.push('[');
    if atom.or_types.is_empty() && atom.embedded.is_empty() {
        out.push('*');
    }
    for (position, group) in atom.or_types.iter().enumerate() {
        if position > 0 {
            out.push(',');
        }
        out.push_str(&group.to_string());
    }
    for sub_pattern in &atom.embedded {
        out.push_str("$(");
        out.push_str(&write_pattern(sub_pattern, with_indices));
        out.push(')');
    }
    for and_type in &atom.and_types {
        out.push(';');
        out.push_str(and_type);
    }
    if with_indices {
        if let Some(index) = atom.map_index {
            out.push(':');
            out.push_str(&index.to_string());
        }
    }
    out.push(']');
}

/// The bond's SMARTS text: nothing for an implicit single-or-aromatic bond,
/// `~` for a fully unconstrained one, otherwise the OR list followed by the
/// `;`-prefixed AND tokens.
fn bond_text(bond: &PatternBond) -> String {
    if bond.is_implicit() {
        return String::new();
    }

    let mut out = String::new();
    if bond.or_types.is_empty() {
        out.push('~');
    } else {
        for (position, group) in bond.or_types.iter().enumerate() {
            if position > 0 {
                out.push(',');
            }
            out.push_str(&group.to_string());
        }
    }
    for and_type in &bond.and_types {
        out.push(';');
        out.push_str(and_type);
    }
    out
}

fn push_ring_digit(digit: u32, out: &mut String) {
    if digit <= 9 {
        out.push_str(&digit.to_string());
    } else {
        out.push('%');
        out.push_str(&digit.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grammar::parser::parse;
    use crate::core::models::tokens::TokenGroup;

    fn graph_of(pattern: &str) -> PatternGraph {
        let decomposition =
            parse(pattern).unwrap_or_else(|e| panic!("failed to parse {pattern:?}: {e}"));
        PatternGraph::from_decomposition(&decomposition)
    }

    #[test]
    fn empty_graph_writes_nothing() {
        assert_eq!(to_smirks(&PatternGraph::new()), "");
    }

    #[test]
    fn simple_chains_round_trip_verbatim() {
        for pattern in [
            "[*:1]",
            "[#6X4:1]",
            "[*:1]~[*:2]",
            "[*:1]~[*:2]~[*:3]~[*:4]",
            "[*:1]~[*:2](~[*:3])~[*:4]",
            "[#6X4,#7;+0;H1:2]",
            "[#1:1]-[#6X4:2](-[#8:3])-[#1:4]",
        ] {
            assert_eq!(to_smirks(&graph_of(pattern)), pattern);
        }
    }

    #[test]
    fn implicit_bonds_are_omitted() {
        assert_eq!(to_smirks(&graph_of("[#6:1]-,:[#6:2]")), "[#6:1][#6:2]");
        assert_eq!(to_smirks(&graph_of("[#6:1][#6:2]")), "[#6:1][#6:2]");
    }

    #[test]
    fn bare_atoms_are_normalized_into_brackets() {
        assert_eq!(to_smirks(&graph_of("CCC")), "[C][C][C]");
        assert_eq!(to_smirks(&graph_of("c1ccccc1")), "[c]1[c][c][c][c][c]1");
    }

    #[test]
    fn ring_closures_round_trip_verbatim() {
        let pattern = "[#6:1]1(-;!@[#1,#6])=;@[#6]-;@[#6]1";
        assert_eq!(to_smirks(&graph_of(pattern)), pattern);
    }

    #[test]
    fn ring_bond_decorators_are_emitted_at_the_opening_digit() {
        let written = to_smirks(&graph_of("[P:1]=1=[P]=[P]=[P]=[P:2]=1"));
        assert_eq!(written, "[P:1]=1=[P]=[P]=[P]=[P:2]1");
        // Re-parsing keeps the ring-closure bond decorator.
        let reparsed = graph_of(&written);
        let indexed = reparsed.indexed_atoms();
        let bond_id = reparsed.bond_between(indexed[0].1, indexed[1].1).unwrap();
        assert_eq!(
            reparsed.bond(bond_id).unwrap().or_types,
            vec![TokenGroup::new("=")]
        );
    }

    #[test]
    fn traversal_starts_at_the_lowest_indexed_atom() {
        let written = to_smirks(&graph_of("[#8]-[#6:2]-[#7:1]"));
        assert!(written.starts_with("[#7:1]"), "got {written}");
    }

    #[test]
    fn embedded_patterns_render_in_dollar_parens() {
        let pattern = "[#1$(*-[#6]):1]";
        assert_eq!(to_smirks(&graph_of(pattern)), pattern);

        let pattern = "[$([#7])]";
        assert_eq!(to_smirks(&graph_of(pattern)), pattern);
    }

    #[test]
    fn atomtype_smarts_strips_map_indices() {
        assert_eq!(to_atomtype_smarts(&graph_of("[#6X4:1]")), "[#6X4]");
        assert_eq!(
            to_atomtype_smarts(&graph_of("[*:1]~[*:2](~[*:3])~[*:4]")),
            "[*]~[*](~[*])~[*]"
        );
    }

    #[test]
    fn disconnected_components_are_dot_joined() {
        assert_eq!(to_smirks(&graph_of("[#6].[#8]")), "[#6].[#8]");
    }

    #[test]
    fn undecorated_atoms_render_as_wildcards() {
        let mut graph = PatternGraph::new();
        graph.add_atom(PatternAtom::new());
        assert_eq!(to_smirks(&graph), "[*]");
    }

    #[test]
    fn atom_to_smirks_renders_one_primitive() {
        let graph = graph_of("[#7X3,#8X2;+0:2]");
        let (id, _) = graph.atoms_iter().next().unwrap();
        assert_eq!(atom_to_smirks(graph.atom(id).unwrap()), "[#7X3,#8X2;+0:2]");
    }
}
