//! # chemenv
//!
//! A library for parsing, editing, and classifying SMIRKS chemical-
//! environment patterns.
//!
//! A chemical environment is a SMARTS-like substructure query whose
//! "indexed" atoms (`:1`, `:2`, ...) mark the structurally significant
//! positions of the pattern. This crate parses such patterns into a mutable
//! pattern graph, classifies them by the count and connectivity of their
//! indexed atoms (Atom, Bond, Angle, ProperTorsion, ImproperTorsion),
//! supports in-place structural editing, and serializes graphs back to
//! canonical SMIRKS/SMARTS text.
//!
//! ## Architectural Philosophy
//!
//! The library is split into two layers to keep concerns separated and
//! testable in isolation:
//!
//! - **[`core`]: The Foundation.** Stateless pattern models (the graph, its
//!   atoms and bonds, decorator tokens, kind classification), the grammar
//!   parser and serializer, and the pluggable toolkit backends that validate
//!   and decompose pattern text behind a single adapter contract.
//!
//! - **[`environment`]: The Public API.** Pattern objects over the core:
//!   construction from SMIRKS with a selectable toolkit, kind queries,
//!   descriptor-based atom/bond selection, editing operations that preserve
//!   indexed-atom integrity, and the SMIRKS/SMARTS rendering surface.
//!
//! ## Example
//!
//! ```
//! use chemenv::{AngleEnvironment, ChemicalEnvironment};
//!
//! let generic = ChemicalEnvironment::from_smirks("[#6X4:1]-[#6X4:2]-[#6X4:3]")?;
//! assert_eq!(generic.get_type(), Some("Angle"));
//!
//! let angle = AngleEnvironment::from_smirks("[#6X4:1]-[#6X4:2]-[#6X4:3]")?;
//! assert_eq!(angle.as_atomtype_smarts(), "[#6X4]-[#6X4]-[#6X4]");
//! # Ok::<(), chemenv::EnvironmentError>(())
//! ```

pub mod core;
pub mod environment;

pub use crate::core::grammar::error::SmirksParsingError;
pub use crate::core::models::atom::PatternAtom;
pub use crate::core::models::bond::PatternBond;
pub use crate::core::models::graph::PatternGraph;
pub use crate::core::models::ids::{AtomId, BondId};
pub use crate::core::models::kind::PatternKind;
pub use crate::core::models::tokens::TokenGroup;
pub use crate::core::toolkits::adapter::{StructuralDecomposition, ToolkitAdapter};
pub use crate::core::toolkits::canonical::CanonicalToolkit;
pub use crate::core::toolkits::native::NativeToolkit;
pub use crate::core::toolkits::registry::{ToolkitRegistry, ToolkitSelectionError};
pub use environment::{
    AngleEnvironment, AtomEnvironment, BondEnvironment, ChemicalEnvironment, Descriptor,
    EnvironmentError, ImproperEnvironment, TorsionEnvironment, ToolkitSelector,
};
