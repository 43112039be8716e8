use super::error::SmirksParsingError;
use crate::core::models::bond::PatternBond;
use crate::core::models::tokens::{AROMATIC_SYMBOLS, ELEMENT_SYMBOLS, TokenGroup};
use crate::core::toolkits::adapter::{DecomposedAtom, DecomposedBond, StructuralDecomposition};
use std::collections::HashMap;

/// Hard ceiling on `$(...)` nesting; deeper input is rejected rather than
/// recursed into.
pub const MAX_EMBEDDING_DEPTH: usize = 16;

/// Parses a SMIRKS/SMARTS pattern into its structural decomposition.
///
/// All grammar legality checks happen here; any failure surfaces as a
/// [`SmirksParsingError`] before a decomposition is returned.
pub fn parse(input: &str) -> Result<StructuralDecomposition, SmirksParsingError> {
    parse_at_depth(input, 0)
}

fn parse_at_depth(input: &str, depth: usize) -> Result<StructuralDecomposition, SmirksParsingError> {
    if depth > MAX_EMBEDDING_DEPTH {
        return Err(SmirksParsingError::NestingTooDeep {
            limit: MAX_EMBEDDING_DEPTH,
        });
    }
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SmirksParsingError::Empty);
    }
    Parser::new(trimmed, depth).parse_pattern()
}

/// Bond decorators accumulated between two atom primitives.
#[derive(Debug, Clone, PartialEq)]
struct BondTokens {
    or_types: Vec<TokenGroup>,
    and_types: Vec<String>,
}

impl BondTokens {
    fn single_or_aromatic() -> Self {
        Self {
            or_types: PatternBond::single_or_aromatic(),
            and_types: Vec::new(),
        }
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    depth: usize,
}

const BOND_CHARS: [char; 8] = ['-', '=', '#', ':', '~', '@', '/', '\\'];

fn is_bond_char(ch: char) -> bool {
    BOND_CHARS.contains(&ch)
}

impl Parser {
    fn new(input: &str, depth: usize) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            depth,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn parse_pattern(&mut self) -> Result<StructuralDecomposition, SmirksParsingError> {
        let mut atoms: Vec<DecomposedAtom> = Vec::new();
        let mut bonds: Vec<DecomposedBond> = Vec::new();
        let mut current: Option<usize> = None;
        let mut branch_stack: Vec<usize> = Vec::new();
        let mut pending: Option<BondTokens> = None;
        let mut ring_map: HashMap<u32, (usize, Option<BondTokens>)> = HashMap::new();

        while let Some(ch) = self.peek() {
            match ch {
                '[' => {
                    let atom = self.parse_bracket_atom()?;
                    let index = atoms.len();
                    atoms.push(atom);
                    attach(&mut bonds, current, index, pending.take());
                    current = Some(index);
                }
                '(' => {
                    let pos = self.pos;
                    self.pos += 1;
                    if pending.is_some() {
                        return Err(SmirksParsingError::DanglingBond { pos });
                    }
                    match current {
                        Some(cur) => branch_stack.push(cur),
                        None => return Err(SmirksParsingError::UnmatchedParen { pos }),
                    }
                }
                ')' => {
                    let pos = self.pos;
                    self.pos += 1;
                    if pending.is_some() {
                        return Err(SmirksParsingError::DanglingBond { pos });
                    }
                    match branch_stack.pop() {
                        Some(parent) => current = Some(parent),
                        None => return Err(SmirksParsingError::UnmatchedParen { pos }),
                    }
                }
                '.' => {
                    let pos = self.pos;
                    self.pos += 1;
                    if pending.is_some() {
                        return Err(SmirksParsingError::DanglingBond { pos });
                    }
                    current = None;
                }
                '0'..='9' | '%' => {
                    let pos = self.pos;
                    let digit = self.parse_ring_digit()?;
                    let Some(cur) = current else {
                        return Err(SmirksParsingError::UnexpectedChar { pos, ch });
                    };
                    let declared = pending.take();
                    match ring_map.remove(&digit) {
                        Some((opened_at, opening_tokens)) => {
                            let tokens = merge_ring_bond(digit, opening_tokens, declared)?;
                            let exists = bonds.iter().any(|bond| {
                                bond.atoms == (opened_at, cur) || bond.atoms == (cur, opened_at)
                            });
                            if !exists && opened_at != cur {
                                bonds.push(DecomposedBond {
                                    atoms: (opened_at, cur),
                                    or_types: tokens.or_types,
                                    and_types: tokens.and_types,
                                });
                            }
                        }
                        None => {
                            ring_map.insert(digit, (cur, declared));
                        }
                    }
                }
                c if is_bond_char(c) || c == '!' => {
                    let pos = self.pos;
                    if current.is_none() {
                        return Err(SmirksParsingError::UnexpectedChar { pos, ch: c });
                    }
                    pending = Some(self.parse_bond_expr()?);
                }
                _ => {
                    let atom = self.parse_bare_atom()?;
                    let index = atoms.len();
                    atoms.push(atom);
                    attach(&mut bonds, current, index, pending.take());
                    current = Some(index);
                }
            }
        }

        if !branch_stack.is_empty() {
            return Err(SmirksParsingError::UnmatchedParen { pos: self.pos });
        }
        if pending.is_some() {
            return Err(SmirksParsingError::DanglingBond { pos: self.pos });
        }
        if let Some(&digit) = ring_map.keys().next() {
            return Err(SmirksParsingError::UnclosedRingBond { digit });
        }
        if atoms.is_empty() {
            return Err(SmirksParsingError::Empty);
        }

        Ok(StructuralDecomposition { atoms, bonds })
    }

    fn parse_ring_digit(&mut self) -> Result<u32, SmirksParsingError> {
        let pos = self.pos;
        if self.peek() == Some('%') {
            self.pos += 1;
            match (self.peek(), self.peek_at(1)) {
                (Some(d1), Some(d2)) if d1.is_ascii_digit() && d2.is_ascii_digit() => {
                    self.pos += 2;
                    Ok(d1.to_digit(10).unwrap_or(0) * 10 + d2.to_digit(10).unwrap_or(0))
                }
                _ => Err(SmirksParsingError::UnexpectedChar { pos, ch: '%' }),
            }
        } else {
            let digit = self
                .peek()
                .and_then(|c| c.to_digit(10))
                .ok_or(SmirksParsingError::UnexpectedEnd { pos })?;
            self.pos += 1;
            Ok(digit)
        }
    }

    // === Bond expressions ===============================================

    fn parse_bond_expr(&mut self) -> Result<BondTokens, SmirksParsingError> {
        let mut tokens = BondTokens {
            or_types: Vec::new(),
            and_types: Vec::new(),
        };

        loop {
            tokens.or_types.push(self.parse_bond_or_option()?);
            if self.peek() == Some(',') {
                self.pos += 1;
            } else {
                break;
            }
        }

        while self.peek() == Some(';') {
            self.pos += 1;
            tokens.and_types.push(self.parse_bond_and_chunk()?);
        }

        Ok(tokens)
    }

    fn parse_bond_or_option(&mut self) -> Result<TokenGroup, SmirksParsingError> {
        let base = self.parse_bond_primitive()?;
        let mut group = TokenGroup::new(base);
        loop {
            match self.peek() {
                Some('&') => {
                    self.pos += 1;
                    group.decorators.push(self.parse_bond_primitive()?);
                }
                Some(c) if is_bond_char(c) || c == '!' => {
                    group.decorators.push(self.parse_bond_primitive()?);
                }
                _ => return Ok(group),
            }
        }
    }

    fn parse_bond_and_chunk(&mut self) -> Result<String, SmirksParsingError> {
        let mut token = self.parse_bond_primitive()?;
        while self.peek() == Some('&') {
            self.pos += 1;
            token.push_str(&self.parse_bond_primitive()?);
        }
        Ok(token)
    }

    fn parse_bond_primitive(&mut self) -> Result<String, SmirksParsingError> {
        let pos = self.pos;
        let mut token = String::new();
        if self.peek() == Some('!') {
            token.push('!');
            self.pos += 1;
        }
        match self.peek() {
            Some(c) if is_bond_char(c) => {
                token.push(c);
                self.pos += 1;
                Ok(token)
            }
            Some(c) => Err(SmirksParsingError::UnexpectedChar { pos, ch: c }),
            None => Err(SmirksParsingError::UnexpectedEnd { pos }),
        }
    }

    // === Atom primitives ================================================

    fn parse_bare_atom(&mut self) -> Result<DecomposedAtom, SmirksParsingError> {
        let pos = self.pos;
        let Some(ch) = self.peek() else {
            return Err(SmirksParsingError::UnexpectedEnd { pos });
        };

        let token: String = match ch {
            '*' | 'a' | 'A' => {
                self.pos += 1;
                ch.to_string()
            }
            'b' | 'c' | 'n' | 'o' | 'p' | 's' => {
                self.pos += 1;
                ch.to_string()
            }
            'C' if self.peek_at(1) == Some('l') => {
                self.pos += 2;
                "Cl".to_string()
            }
            'B' if self.peek_at(1) == Some('r') => {
                self.pos += 2;
                "Br".to_string()
            }
            'B' | 'C' | 'N' | 'O' | 'P' | 'S' | 'F' | 'I' | 'H' => {
                self.pos += 1;
                ch.to_string()
            }
            other => return Err(SmirksParsingError::UnexpectedChar { pos, ch: other }),
        };

        Ok(DecomposedAtom {
            or_types: vec![TokenGroup::new(token)],
            ..DecomposedAtom::default()
        })
    }

    fn parse_bracket_atom(&mut self) -> Result<DecomposedAtom, SmirksParsingError> {
        let open = self.pos;
        self.pos += 1;
        let mut atom = DecomposedAtom::default();

        self.parse_or_chunk(&mut atom)?;

        while self.peek() == Some(';') {
            self.pos += 1;
            if let Some(token) = self.parse_and_chunk(&mut atom)? {
                atom.and_types.push(token);
            }
        }

        if self.peek() == Some(':') {
            self.pos += 1;
            let digits_at = self.pos;
            match self.parse_number() {
                Some(index) if index >= 1 => atom.map_index = Some(index),
                _ => return Err(SmirksParsingError::InvalidMapIndex { pos: digits_at }),
            }
        }

        if self.peek() == Some(']') {
            self.pos += 1;
            Ok(atom)
        } else {
            Err(SmirksParsingError::UnclosedBracket { pos: open })
        }
    }

    fn parse_or_chunk(&mut self, atom: &mut DecomposedAtom) -> Result<(), SmirksParsingError> {
        loop {
            if let Some(group) = self.parse_atom_option(atom)? {
                atom.or_types.push(group);
            }
            if self.peek() == Some(',') {
                self.pos += 1;
            } else {
                return Ok(());
            }
        }
    }

    /// Parses one OR-option inside a bracket: a sequence of primitives joined
    /// by `&` or adjacency. Embedded `$(...)` sub-patterns encountered here
    /// are attached to the atom rather than stored as tokens. Returns `None`
    /// if the option consisted only of embedded sub-patterns.
    fn parse_atom_option(
        &mut self,
        atom: &mut DecomposedAtom,
    ) -> Result<Option<TokenGroup>, SmirksParsingError> {
        let start = self.pos;
        let mut group: Option<TokenGroup> = None;
        let mut saw_embedded = false;

        loop {
            match self.peek() {
                Some(']' | ',' | ';' | ':') | None => break,
                Some('&') => {
                    self.pos += 1;
                    if matches!(self.peek(), Some(']' | ',' | ';' | ':') | None) {
                        return Err(SmirksParsingError::EmptyComponent { pos: self.pos });
                    }
                }
                Some('$') => {
                    let sub = self.parse_embedded()?;
                    atom.embedded.push(sub);
                    saw_embedded = true;
                }
                Some(_) => {
                    let token = self.parse_atom_primitive()?;
                    match group.as_mut() {
                        None => group = Some(TokenGroup::new(token)),
                        Some(existing) => existing.decorators.push(token),
                    }
                }
            }
        }

        if group.is_none() && !saw_embedded {
            return Err(SmirksParsingError::EmptyComponent { pos: start });
        }
        Ok(group)
    }

    /// Parses one `;`-separated AND chunk inside a bracket. The chunk text is
    /// kept verbatim as a single token; embedded sub-patterns are attached to
    /// the atom. Returns `None` for an embedded-only chunk.
    fn parse_and_chunk(
        &mut self,
        atom: &mut DecomposedAtom,
    ) -> Result<Option<String>, SmirksParsingError> {
        let start = self.pos;
        let embedded_before = atom.embedded.len();
        let mut token = String::new();

        loop {
            match self.peek() {
                Some(']' | ';' | ':') | None => break,
                Some(sep @ (',' | '&')) => {
                    if token.is_empty() && atom.embedded.len() == embedded_before {
                        return Err(SmirksParsingError::EmptyComponent { pos: self.pos });
                    }
                    self.pos += 1;
                    token.push(sep);
                }
                Some('$') => {
                    let sub = self.parse_embedded()?;
                    atom.embedded.push(sub);
                }
                Some(_) => token.push_str(&self.parse_atom_primitive()?),
            }
        }

        if token.ends_with([',', '&']) {
            return Err(SmirksParsingError::EmptyComponent { pos: self.pos });
        }
        if token.is_empty() && atom.embedded.len() == embedded_before {
            return Err(SmirksParsingError::EmptyComponent { pos: start });
        }
        Ok((!token.is_empty()).then_some(token))
    }

    fn parse_atom_primitive(&mut self) -> Result<String, SmirksParsingError> {
        let pos = self.pos;
        let Some(ch) = self.peek() else {
            return Err(SmirksParsingError::UnexpectedEnd { pos });
        };

        match ch {
            '!' => {
                self.pos += 1;
                let inner = self.parse_atom_primitive()?;
                Ok(format!("!{inner}"))
            }
            '*' => {
                self.pos += 1;
                Ok("*".to_string())
            }
            '#' => {
                self.pos += 1;
                match self.parse_number() {
                    Some(number) if (1..=118).contains(&number) => Ok(format!("#{number}")),
                    _ => Err(SmirksParsingError::InvalidAtomicNumber { pos }),
                }
            }
            '@' => {
                self.pos += 1;
                if self.peek() == Some('@') {
                    self.pos += 1;
                    Ok("@@".to_string())
                } else {
                    Ok("@".to_string())
                }
            }
            '+' | '-' => {
                self.pos += 1;
                let mut token = ch.to_string();
                match self.parse_number() {
                    Some(magnitude) => token.push_str(&magnitude.to_string()),
                    None => {
                        while self.peek() == Some(ch) {
                            token.push(ch);
                            self.pos += 1;
                        }
                    }
                }
                Ok(token)
            }
            '0'..='9' => {
                let number = self
                    .parse_number()
                    .ok_or(SmirksParsingError::UnexpectedChar { pos, ch })?;
                Ok(number.to_string())
            }
            c if c.is_ascii_uppercase() => self.parse_uppercase_primitive(pos),
            c if c.is_ascii_lowercase() => self.parse_lowercase_primitive(pos),
            c => Err(SmirksParsingError::UnexpectedChar { pos, ch: c }),
        }
    }

    fn parse_uppercase_primitive(&mut self, pos: usize) -> Result<String, SmirksParsingError> {
        let ch = self.chars[self.pos];

        // A two-letter element symbol wins over a count primitive ("Xe" is
        // xenon, not connectivity).
        if let Some(next) = self.peek_at(1) {
            if next.is_ascii_lowercase() {
                let symbol: String = [ch, next].iter().collect();
                if ELEMENT_SYMBOLS.contains(symbol.as_str()) {
                    self.pos += 2;
                    return Ok(symbol);
                }
            }
        }

        if matches!(ch, 'D' | 'H' | 'R' | 'X') {
            if ch == 'H' && self.hydrogen_is_element() {
                self.pos += 1;
                return Ok("H".to_string());
            }
            self.pos += 1;
            let mut token = ch.to_string();
            if let Some(count) = self.parse_number() {
                token.push_str(&count.to_string());
            }
            return Ok(token);
        }

        let symbol = ch.to_string();
        if ELEMENT_SYMBOLS.contains(symbol.as_str()) {
            self.pos += 1;
            Ok(symbol)
        } else {
            Err(SmirksParsingError::UnexpectedChar { pos, ch })
        }
    }

    fn parse_lowercase_primitive(&mut self, pos: usize) -> Result<String, SmirksParsingError> {
        let ch = self.chars[self.pos];

        if let Some(next) = self.peek_at(1) {
            let symbol: String = [ch, next].iter().collect();
            if AROMATIC_SYMBOLS.contains(symbol.as_str()) {
                self.pos += 2;
                return Ok(symbol);
            }
        }

        match ch {
            'b' | 'c' | 'n' | 'o' | 'p' | 's' | 'a' => {
                self.pos += 1;
                Ok(ch.to_string())
            }
            'h' | 'r' | 'x' | 'v' => {
                self.pos += 1;
                let mut token = ch.to_string();
                if let Some(count) = self.parse_number() {
                    token.push_str(&count.to_string());
                }
                Ok(token)
            }
            c => Err(SmirksParsingError::UnexpectedChar { pos, ch: c }),
        }
    }

    /// `H` directly after `[` followed by a terminator is elemental hydrogen;
    /// anywhere else it is a hydrogen-count primitive.
    fn hydrogen_is_element(&self) -> bool {
        let mut before = self.pos;
        while before > 0 && self.chars[before - 1] != '[' {
            before -= 1;
        }
        if before != self.pos {
            return false;
        }
        matches!(
            self.peek_at(1),
            Some(']' | ':' | ';' | ',') | None
        )
    }

    // === Embedded sub-patterns ==========================================

    fn parse_embedded(&mut self) -> Result<StructuralDecomposition, SmirksParsingError> {
        let start = self.pos;
        self.pos += 1;
        if self.peek() != Some('(') {
            return Err(SmirksParsingError::UnclosedEmbedded { pos: start });
        }
        self.pos += 1;
        let body = self.take_embedded_body(start)?;
        parse_at_depth(&body, self.depth + 1)
    }

    fn take_embedded_body(&mut self, start: usize) -> Result<String, SmirksParsingError> {
        let mut depth = 1usize;
        let mut body = String::new();
        while let Some(ch) = self.peek() {
            self.pos += 1;
            match ch {
                '(' => {
                    depth += 1;
                    body.push(ch);
                }
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(body);
                    }
                    body.push(ch);
                }
                _ => body.push(ch),
            }
        }
        Err(SmirksParsingError::UnclosedEmbedded { pos: start })
    }

    fn parse_number(&mut self) -> Option<u32> {
        let start = self.pos;
        while self.pos < self.chars.len() && self.chars[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        if self.pos > start {
            self.chars[start..self.pos]
                .iter()
                .collect::<String>()
                .parse()
                .ok()
        } else {
            None
        }
    }
}

fn attach(
    bonds: &mut Vec<DecomposedBond>,
    current: Option<usize>,
    new_index: usize,
    pending: Option<BondTokens>,
) {
    if let Some(previous) = current {
        let tokens = pending.unwrap_or_else(BondTokens::single_or_aromatic);
        bonds.push(DecomposedBond {
            atoms: (previous, new_index),
            or_types: tokens.or_types,
            and_types: tokens.and_types,
        });
    }
}

fn merge_ring_bond(
    digit: u32,
    opening: Option<BondTokens>,
    closing: Option<BondTokens>,
) -> Result<BondTokens, SmirksParsingError> {
    match (opening, closing) {
        (None, None) => Ok(BondTokens::single_or_aromatic()),
        (Some(tokens), None) | (None, Some(tokens)) => Ok(tokens),
        (Some(opening), Some(closing)) => {
            if opening == closing {
                Ok(opening)
            } else {
                Err(SmirksParsingError::ConflictingRingBond { digit })
            }
        }
    }
}
