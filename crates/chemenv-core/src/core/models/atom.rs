use super::graph::PatternGraph;
use super::tokens::TokenGroup;

/// One atom primitive in a pattern graph.
///
/// An atom carries its OR-type decorator groups (disjunctive alternatives,
/// each with its own conjunctive qualifiers), its AND-type decorator tokens
/// (applied to every alternative), an optional atom-map index marking it as
/// structurally significant, and any embedded `$(...)` sub-patterns anchored
/// here. Embedded sub-patterns are pure matching constraints; they never
/// participate in connectivity or classification.
#[derive(Debug, Clone, Default)]
pub struct PatternAtom {
    /// Disjunctive decorator alternatives (`#7X3,#8X2` is two groups).
    pub or_types: Vec<TokenGroup>,
    /// Conjunctive decorator tokens applied after the OR list (`;`-separated).
    pub and_types: Vec<String>,
    /// Atom-map index (`:1`, `:2`, ...); `None` for context atoms.
    pub map_index: Option<u32>,
    /// Recursive sub-patterns from `$(...)`, owned by this atom.
    pub embedded: Vec<PatternGraph>,
}

impl PatternAtom {
    /// Creates an undecorated, unindexed atom (a bare `[*]`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an unindexed atom with the given OR-type groups.
    pub fn with_or_types<I>(or_types: I) -> Self
    where
        I: IntoIterator<Item = TokenGroup>,
    {
        Self {
            or_types: or_types.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn is_indexed(&self) -> bool {
        self.map_index.is_some()
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

    #[test]
    fn new_atom_is_an_unindexed_wildcard() {
        let atom = PatternAtom::new();
        assert!(atom.or_types.is_empty());
        assert!(atom.and_types.is_empty());
        assert!(atom.embedded.is_empty());
        assert!(!atom.is_indexed());
    }

    #[test]
    fn add_or_type_is_idempotent() {
        let mut atom = PatternAtom::new();
        atom.add_or_type(TokenGroup::new("#7"));
        atom.add_or_type(TokenGroup::new("#8"));
        atom.add_or_type(TokenGroup::new("#7"));
        assert_eq!(atom.or_types.len(), 2);
        assert_eq!(atom.or_types[0], TokenGroup::new("#7"));
        assert_eq!(atom.or_types[1], TokenGroup::new("#8"));
    }

    #[test]
    fn add_or_type_distinguishes_decorated_groups() {
        let mut atom = PatternAtom::new();
        atom.add_or_type(TokenGroup::new("#7"));
        atom.add_or_type(TokenGroup::with_decorators("#7", ["X3"]));
        assert_eq!(atom.or_types.len(), 2);
    }

    #[test]
    fn add_and_type_is_idempotent() {
        let mut atom = PatternAtom::new();
        atom.add_and_type("+0");
        atom.add_and_type("+0");
        atom.add_and_type("H0");
        assert_eq!(atom.and_types, vec!["+0".to_string(), "H0".to_string()]);
    }
}
