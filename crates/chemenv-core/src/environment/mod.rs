//! # Environment Module
//!
//! The public, user-facing layer of the crate: pattern objects built over
//! the core. A [`ChemicalEnvironment`] owns one pattern graph and exposes
//! construction from SMIRKS text, kind classification, atom/bond selection,
//! in-place structural editing, and serialization back to SMIRKS/SMARTS.
//! The specialized types ([`AtomEnvironment`], [`BondEnvironment`],
//! [`AngleEnvironment`], [`TorsionEnvironment`], [`ImproperEnvironment`])
//! are thin wrappers whose constructors enforce that the parsed pattern's
//! kind matches the type.

mod error;
mod selection;

pub use error::EnvironmentError;
pub use selection::Descriptor;

use crate::core::grammar::writer;
use crate::core::models::atom::PatternAtom;
use crate::core::models::bond::PatternBond;
use crate::core::models::graph::PatternGraph;
use crate::core::models::ids::{AtomId, BondId};
use crate::core::models::kind::{self, PatternKind};
use crate::core::models::tokens::TokenGroup;
use crate::core::toolkits::adapter::ToolkitAdapter;
use crate::core::toolkits::native::NativeToolkit;
use crate::core::toolkits::registry::ToolkitRegistry;
use std::fmt;
use std::ops::{Deref, DerefMut};
use tracing::debug;

/// Chooses the toolkit backend a pattern is parsed with.
///
/// A selector is either a name resolved against the built-in registry
/// (failing closed on unknown names) or a caller-supplied adapter instance.
#[derive(Clone, Copy, Default)]
pub enum ToolkitSelector<'a> {
    /// The built-in native adapter.
    #[default]
    Default,
    /// An adapter resolved by name from the built-in registry.
    Named(&'a str),
    /// A caller-supplied adapter instance.
    Adapter(&'a dyn ToolkitAdapter),
}

impl fmt::Debug for ToolkitSelector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "Default"),
            Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Self::Adapter(adapter) => f.debug_tuple("Adapter").field(&adapter.name()).finish(),
        }
    }
}

impl<'a> From<&'a str> for ToolkitSelector<'a> {
    fn from(name: &'a str) -> Self {
        Self::Named(name)
    }
}

impl<'a> From<&'a dyn ToolkitAdapter> for ToolkitSelector<'a> {
    fn from(adapter: &'a dyn ToolkitAdapter) -> Self {
        Self::Adapter(adapter)
    }
}

/// A parsed chemical-environment pattern of any shape.
///
/// Owns its pattern graph exclusively; distinct environments share no state
/// and are safe to use from distinct threads without coordination.
#[derive(Debug, Clone, Default)]
pub struct ChemicalEnvironment {
    graph: PatternGraph,
}

impl ChemicalEnvironment {
    /// Parses a SMIRKS pattern with the default toolkit.
    ///
    /// # Errors
    ///
    /// Returns [`EnvironmentError::Parsing`] when the text is not valid
    /// SMIRKS/SMARTS.
    pub fn from_smirks(smirks: &str) -> Result<Self, EnvironmentError> {
        Self::from_smirks_with(smirks, ToolkitSelector::Default)
    }

    /// Parses a SMIRKS pattern with an explicitly selected toolkit.
    ///
    /// # Errors
    ///
    /// Returns [`EnvironmentError::Parsing`] for invalid text and
    /// [`EnvironmentError::ToolkitSelection`] for an unknown adapter name.
    pub fn from_smirks_with(
        smirks: &str,
        toolkit: ToolkitSelector<'_>,
    ) -> Result<Self, EnvironmentError> {
        let decomposition = match toolkit {
            ToolkitSelector::Default => NativeToolkit.validate_and_decompose(smirks)?,
            ToolkitSelector::Adapter(adapter) => adapter.validate_and_decompose(smirks)?,
            ToolkitSelector::Named(name) => {
                let registry = ToolkitRegistry::builtin();
                registry.resolve(name)?.validate_and_decompose(smirks)?
            }
        };

        let environment = Self {
            graph: PatternGraph::from_decomposition(&decomposition),
        };
        debug!(
            atoms = environment.graph.atom_count(),
            bonds = environment.graph.bond_count(),
            kind = environment.get_type().unwrap_or("unclassified"),
            "parsed SMIRKS pattern"
        );
        Ok(environment)
    }

    /// Wraps a programmatically built pattern graph.
    pub fn from_graph(graph: PatternGraph) -> Self {
        Self { graph }
    }

    /// Classifies the pattern by its indexed atoms; `None` means
    /// unclassified.
    pub fn kind(&self) -> Option<PatternKind> {
        kind::classify(&self.graph)
    }

    /// The kind's label string, or `None` for an unclassified pattern.
    pub fn get_type(&self) -> Option<&'static str> {
        self.kind().map(PatternKind::label)
    }

    pub fn graph(&self) -> &PatternGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut PatternGraph {
        &mut self.graph
    }

    pub fn atom(&self, id: AtomId) -> Option<&PatternAtom> {
        self.graph.atom(id)
    }

    pub fn atom_mut(&mut self, id: AtomId) -> Option<&mut PatternAtom> {
        self.graph.atom_mut(id)
    }

    pub fn bond(&self, id: BondId) -> Option<&PatternBond> {
        self.graph.bond(id)
    }

    pub fn bond_mut(&mut self, id: BondId) -> Option<&mut PatternBond> {
        self.graph.bond_mut(id)
    }

    /// Returns an iterator over all atoms as `(AtomId, &PatternAtom)` pairs.
    pub fn atoms(&self) -> impl Iterator<Item = (AtomId, &PatternAtom)> {
        self.graph.atoms_iter()
    }

    /// Returns an iterator over all bonds as `(BondId, &PatternBond)` pairs.
    pub fn bonds(&self) -> impl Iterator<Item = (BondId, &PatternBond)> {
        self.graph.bonds_iter()
    }

    /// The first atom matching the descriptor, if any.
    pub fn select_atom(&self, descriptor: impl Into<Descriptor>) -> Option<AtomId> {
        selection::select_atoms(&self.graph, descriptor.into())
            .into_iter()
            .next()
    }

    /// The first bond matching the descriptor, if any.
    pub fn select_bond(&self, descriptor: impl Into<Descriptor>) -> Option<BondId> {
        selection::select_bonds(&self.graph, descriptor.into())
            .into_iter()
            .next()
    }

    /// Every atom matching the descriptor.
    pub fn atoms_matching(&self, descriptor: impl Into<Descriptor>) -> Vec<AtomId> {
        selection::select_atoms(&self.graph, descriptor.into())
    }

    /// Every bond matching the descriptor.
    pub fn bonds_matching(&self, descriptor: impl Into<Descriptor>) -> Vec<BondId> {
        selection::select_bonds(&self.graph, descriptor.into())
    }

    /// Adds a new unindexed atom bonded to `anchor` and returns its ID, or
    /// `None` when the anchor atom does not exist.
    pub fn add_atom(
        &mut self,
        anchor: AtomId,
        bond_or_types: Vec<TokenGroup>,
        bond_and_types: Vec<String>,
        atom_or_types: Vec<TokenGroup>,
        atom_and_types: Vec<String>,
    ) -> Option<AtomId> {
        if !self.graph.contains_atom(anchor) {
            return None;
        }
        let atom = PatternAtom {
            or_types: atom_or_types,
            and_types: atom_and_types,
            ..PatternAtom::new()
        };
        let id = self.graph.add_atom(atom);
        self.graph.add_bond(anchor, id, bond_or_types, bond_and_types);
        Some(id)
    }

    /// Removes a removable leaf atom, together with its sole bond.
    ///
    /// Succeeds only for an unindexed atom with exactly one incident bond;
    /// indexed atoms, bridging atoms, and isolated atoms are left untouched.
    /// Failure to remove is an expected, topology-driven outcome, so the
    /// result is a boolean rather than an error, and this never panics.
    pub fn remove_atom(&mut self, id: AtomId) -> bool {
        let Some(atom) = self.graph.atom(id) else {
            return false;
        };
        if atom.is_indexed() || self.graph.degree(id) != 1 {
            return false;
        }
        self.graph.remove_atom(id).is_some()
    }

    /// The bond directly connecting two atoms, if one exists. This is a
    /// direct-adjacency lookup, not a path search.
    pub fn get_bond(&self, atom1: AtomId, atom2: AtomId) -> Option<BondId> {
        self.graph.bond_between(atom1, atom2)
    }

    /// Number of bonds incident to an atom.
    pub fn valence(&self, id: AtomId) -> Option<usize> {
        self.graph.contains_atom(id).then(|| self.graph.degree(id))
    }

    /// Sum of the minimum bond orders of an atom's incident bonds.
    pub fn bond_order_around(&self, id: AtomId) -> Option<f64> {
        if !self.graph.contains_atom(id) {
            return None;
        }
        Some(
            self.graph
                .adjacency(id)
                .iter()
                .filter_map(|&(_, bond_id)| self.graph.bond(bond_id))
                .map(PatternBond::min_order)
                .sum(),
        )
    }

    /// Renders the pattern as SMIRKS text, atom-map indices included.
    pub fn as_smirks(&self) -> String {
        writer::to_smirks(&self.graph)
    }

    /// Renders the pattern as plain SMARTS text, atom-map indices stripped.
    pub fn as_atomtype_smarts(&self) -> String {
        writer::to_atomtype_smarts(&self.graph)
    }
}

macro_rules! specialized_environment {
    ($(#[$docs:meta])* $name:ident, $kind:expr) => {
        $(#[$docs])*
        #[derive(Debug, Clone)]
        pub struct $name(ChemicalEnvironment);

        impl $name {
            /// Parses a SMIRKS pattern with the default toolkit and checks
            /// its kind.
            ///
            /// # Errors
            ///
            /// Returns [`EnvironmentError::Parsing`] for invalid text and
            /// [`EnvironmentError::Mismatch`] when the pattern's kind does
            /// not match this type.
            pub fn from_smirks(smirks: &str) -> Result<Self, EnvironmentError> {
                Self::from_smirks_with(smirks, ToolkitSelector::Default)
            }

            /// Parses a SMIRKS pattern with an explicitly selected toolkit
            /// and checks its kind.
            ///
            /// # Errors
            ///
            /// As [`Self::from_smirks`], plus
            /// [`EnvironmentError::ToolkitSelection`] for an unknown adapter
            /// name.
            pub fn from_smirks_with(
                smirks: &str,
                toolkit: ToolkitSelector<'_>,
            ) -> Result<Self, EnvironmentError> {
                ChemicalEnvironment::from_smirks_with(smirks, toolkit)
                    .and_then(Self::from_environment)
            }

            /// Wraps an already-built environment, checking its kind.
            ///
            /// # Errors
            ///
            /// Returns [`EnvironmentError::Mismatch`] when the environment's
            /// kind does not match this type.
            pub fn from_environment(
                environment: ChemicalEnvironment,
            ) -> Result<Self, EnvironmentError> {
                match environment.kind() {
                    Some(kind) if kind == $kind => Ok(Self(environment)),
                    actual => Err(EnvironmentError::Mismatch {
                        expected: $kind,
                        actual,
                    }),
                }
            }

            pub fn into_inner(self) -> ChemicalEnvironment {
                self.0
            }
        }

        impl Deref for $name {
            type Target = ChemicalEnvironment;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl DerefMut for $name {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }

        impl From<$name> for ChemicalEnvironment {
            fn from(environment: $name) -> Self {
                environment.0
            }
        }
    };
}

specialized_environment!(
    /// A pattern with exactly one indexed atom.
    AtomEnvironment,
    PatternKind::Atom
);
specialized_environment!(
    /// A pattern whose two indexed atoms are bonded.
    BondEnvironment,
    PatternKind::Bond
);
specialized_environment!(
    /// A pattern whose three indexed atoms form the path 1-2-3.
    AngleEnvironment,
    PatternKind::Angle
);
specialized_environment!(
    /// A pattern whose four indexed atoms form the linear path 1-2-3-4.
    TorsionEnvironment,
    PatternKind::ProperTorsion
);
specialized_environment!(
    /// A pattern whose four indexed atoms form a star around one center.
    ImproperEnvironment,
    PatternKind::ImproperTorsion
);
