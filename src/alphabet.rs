use itertools::Itertools;

use crate::{math::Bijection, Show};

/// Index of a symbol in an [`Alphabet`].
pub type SymbolIndex = usize;

/// The index that is reserved for the silent symbol. It never matches an input character and
/// is only used for computing closures.
pub const LAMBDA: SymbolIndex = 0;

/// The name under which the silent symbol appears in textual descriptions of an automaton.
pub const LAMBDA_NAME: &str = "lambda";

/// An ordered alphabet of named symbols. Symbols are assigned dense indices in the order in
/// which they are first seen, where index [`LAMBDA`] is always taken by the silent symbol.
///
/// # Example
/// ```
/// use lambda_det::prelude::*;
///
/// let mut alphabet = Alphabet::new();
/// assert_eq!(alphabet.intern("b"), 1);
/// assert_eq!(alphabet.intern("a"), 2);
/// assert_eq!(alphabet.intern("b"), 1);
/// assert_eq!(alphabet.intern("lambda"), LAMBDA);
/// assert_eq!(alphabet.size(), 3);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Alphabet {
    names: Bijection<String, SymbolIndex>,
}

impl Alphabet {
    /// Creates an alphabet that only contains the silent symbol.
    pub fn new() -> Self {
        let mut names = Bijection::new();
        names.insert(LAMBDA_NAME.to_string(), LAMBDA);
        Self { names }
    }

    /// Creates an alphabet with `size` regular symbols named `a`, `b`, `c` and so on. Past `z`
    /// the names continue as `s26`, `s27`, ...
    pub fn of_size(size: usize) -> Self {
        let mut alphabet = Self::new();
        for i in 0..size {
            let name = match u8::try_from(i) {
                Ok(offset) if offset < 26 => char::from(b'a' + offset).to_string(),
                _ => format!("s{i}"),
            };
            alphabet.intern(&name);
        }
        alphabet
    }

    /// Returns the index of the symbol with the given name, assigning it the next free index
    /// if it has not been seen before.
    pub fn intern(&mut self, name: &str) -> SymbolIndex {
        if let Some(index) = self.names.get_by_left(name) {
            return *index;
        }
        let index = self.names.len();
        self.names.insert(name.to_string(), index);
        index
    }

    /// Looks up the index of a symbol by its name.
    pub fn index_of(&self, name: &str) -> Option<SymbolIndex> {
        self.names.get_by_left(name).copied()
    }

    /// Looks up the name of the symbol with the given index.
    pub fn name_of(&self, index: SymbolIndex) -> Option<&str> {
        self.names.get_by_right(&index).map(String::as_str)
    }

    /// Number of symbols, the silent symbol included.
    pub fn size(&self) -> usize {
        self.names.len()
    }

    /// Iterates over the indices of all symbols except the silent one, in ascending order.
    pub fn universe(&self) -> impl Iterator<Item = SymbolIndex> {
        (LAMBDA + 1)..self.size()
    }

    /// Iterates over the names of all symbols except the silent one, in index order.
    pub fn symbol_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.universe().filter_map(|sym| self.name_of(sym))
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.show())
    }
}

impl Show for Alphabet {
    fn show(&self) -> String {
        format!("{{{}}}", self.symbol_names().join(", "))
    }
}
