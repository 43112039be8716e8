use super::atom::PatternAtom;
use super::bond::PatternBond;
use super::ids::{AtomId, BondId};
use super::tokens::TokenGroup;
use crate::core::toolkits::adapter::StructuralDecomposition;
use slotmap::{SecondaryMap, SlotMap};

/// The mutable node/edge model of one parsed pattern.
///
/// This struct is the central data structure of the crate: atoms and bonds
/// live in slot maps for efficient ID management, and a secondary adjacency
/// map caches bond connectivity per atom. Every bond's endpoints are
/// guaranteed to exist in the atom map; a graph is exclusively owned by one
/// pattern object, and embedded sub-graphs are owned recursively by their
/// anchor atoms.
#[derive(Debug, Clone, Default)]
pub struct PatternGraph {
    /// Primary storage for atoms using a slot map for efficient ID management.
    atoms: SlotMap<AtomId, PatternAtom>,
    /// Primary storage for bonds using a slot map for efficient ID management.
    bonds: SlotMap<BondId, PatternBond>,
    /// Cached adjacency list for bond connectivity, indexed by atom ID.
    adjacency: SecondaryMap<AtomId, Vec<(AtomId, BondId)>>,
}

impl PatternGraph {
    /// Creates a new, empty pattern graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from the neutral structural form produced by a toolkit
    /// adapter. Embedded sub-decompositions become owned sub-graphs on their
    /// anchor atoms; duplicate bonds between the same endpoints collapse to a
    /// single bond entity.
    pub fn from_decomposition(decomposition: &StructuralDecomposition) -> Self {
        let mut graph = Self::new();
        let mut ids = Vec::with_capacity(decomposition.atoms.len());

        for decomposed in &decomposition.atoms {
            let atom = PatternAtom {
                or_types: decomposed.or_types.clone(),
                and_types: decomposed.and_types.clone(),
                map_index: decomposed.map_index,
                embedded: decomposed
                    .embedded
                    .iter()
                    .map(Self::from_decomposition)
                    .collect(),
            };
            ids.push(graph.add_atom(atom));
        }

        for decomposed in &decomposition.bonds {
            let (a, b) = decomposed.atoms;
            if let (Some(&atom1), Some(&atom2)) = (ids.get(a), ids.get(b)) {
                graph.add_bond(
                    atom1,
                    atom2,
                    decomposed.or_types.clone(),
                    decomposed.and_types.clone(),
                );
            }
        }

        graph
    }

    pub fn atom(&self, id: AtomId) -> Option<&PatternAtom> {
        self.atoms.get(id)
    }

    pub fn atom_mut(&mut self, id: AtomId) -> Option<&mut PatternAtom> {
        self.atoms.get_mut(id)
    }

    pub fn bond(&self, id: BondId) -> Option<&PatternBond> {
        self.bonds.get(id)
    }

    pub fn bond_mut(&mut self, id: BondId) -> Option<&mut PatternBond> {
        self.bonds.get_mut(id)
    }

    pub fn contains_atom(&self, id: AtomId) -> bool {
        self.atoms.contains_key(id)
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    /// Returns an iterator over all atoms as `(AtomId, &PatternAtom)` pairs.
    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &PatternAtom)> {
        self.atoms.iter()
    }

    /// Returns an iterator over all bonds as `(BondId, &PatternBond)` pairs.
    pub fn bonds_iter(&self) -> impl Iterator<Item = (BondId, &PatternBond)> {
        self.bonds.iter()
    }

    /// Adds an atom to the graph and initializes its adjacency entry.
    pub fn add_atom(&mut self, atom: PatternAtom) -> AtomId {
        let id = self.atoms.insert(atom);
        self.adjacency.insert(id, Vec::new());
        id
    }

    /// Adds a bond between two existing atoms.
    ///
    /// The operation is idempotent: if a bond already connects the two atoms
    /// its ID is returned and no duplicate is created, which is what collapses
    /// ring-closure bonds into a single entity. Returns `None` if either
    /// endpoint is missing or the endpoints are the same atom.
    pub fn add_bond(
        &mut self,
        atom1: AtomId,
        atom2: AtomId,
        or_types: Vec<TokenGroup>,
        and_types: Vec<String>,
    ) -> Option<BondId> {
        if atom1 == atom2 || !self.atoms.contains_key(atom1) || !self.atoms.contains_key(atom2) {
            return None;
        }
        if let Some(existing) = self.bond_between(atom1, atom2) {
            return Some(existing);
        }

        let id = self
            .bonds
            .insert(PatternBond::new(atom1, atom2, or_types, and_types));
        self.adjacency[atom1].push((atom2, id));
        self.adjacency[atom2].push((atom1, id));
        Some(id)
    }

    /// Removes an atom along with every bond incident to it.
    pub fn remove_atom(&mut self, id: AtomId) -> Option<PatternAtom> {
        let atom = self.atoms.remove(id)?;

        let incident = self.adjacency.remove(id).unwrap_or_default();
        for (neighbor, bond_id) in incident {
            self.bonds.remove(bond_id);
            if let Some(entries) = self.adjacency.get_mut(neighbor) {
                entries.retain(|&(other, _)| other != id);
            }
        }

        Some(atom)
    }

    /// Removes a single bond, leaving its endpoints in place.
    pub fn remove_bond(&mut self, id: BondId) -> Option<PatternBond> {
        let bond = self.bonds.remove(id)?;
        for endpoint in [bond.atom1, bond.atom2] {
            if let Some(entries) = self.adjacency.get_mut(endpoint) {
                entries.retain(|&(_, bond_id)| bond_id != id);
            }
        }
        Some(bond)
    }

    /// Returns the bond directly connecting the two atoms, if one exists.
    /// This is a direct-adjacency lookup, not a path search.
    pub fn bond_between(&self, atom1: AtomId, atom2: AtomId) -> Option<BondId> {
        self.adjacency.get(atom1)?.iter().find_map(
            |&(neighbor, bond_id)| {
                if neighbor == atom2 { Some(bond_id) } else { None }
            },
        )
    }

    /// The cached `(neighbor, bond)` adjacency entries of an atom, in bond
    /// insertion order. Unknown atoms have no neighbors.
    pub fn adjacency(&self, id: AtomId) -> &[(AtomId, BondId)] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns an iterator over the atoms directly bonded to `id`.
    pub fn neighbors(&self, id: AtomId) -> impl Iterator<Item = AtomId> + '_ {
        self.adjacency(id).iter().map(|&(neighbor, _)| neighbor)
    }

    /// Number of bonds incident to an atom.
    pub fn degree(&self, id: AtomId) -> usize {
        self.adjacency(id).len()
    }

    /// All indexed atoms as `(map_index, id)` pairs, sorted by map index.
    /// Duplicate indices are preserved (they make a pattern unclassifiable,
    /// but they are not a structural error).
    pub fn indexed_atoms(&self) -> Vec<(u32, AtomId)> {
        let mut indexed: Vec<_> = self
            .atoms
            .iter()
            .filter_map(|(id, atom)| atom.map_index.map(|index| (index, id)))
            .collect();
        indexed.sort_by_key(|&(index, _)| index);
        indexed
    }

    /// Looks up the atom carrying a given map index.
    pub fn atom_with_index(&self, index: u32) -> Option<AtomId> {
        self.atoms
            .iter()
            .find(|(_, atom)| atom.map_index == Some(index))
            .map(|(id, _)| id)
    }
}
