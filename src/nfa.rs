use tracing::trace;

use crate::{
    alphabet::{Alphabet, SymbolIndex, LAMBDA},
    closure::Closure,
    state_set::StateSet,
    Show,
};

/// Index of a state in an automaton, states are numbered densely starting from zero.
pub type StateIndex = usize;

/// A nondeterministic finite automaton with silent transitions. It stores an [`Alphabet`], the
/// transition relation as a table indexed by state and symbol, one finality flag per state and
/// a designated initial state.
///
/// Every state has an entry for every symbol of the alphabet, these entries are padded with
/// empty lists of targets whenever the alphabet grows. The entry for [`LAMBDA`] holds the silent
/// transitions of a state.
#[derive(Clone, PartialEq, Eq)]
pub struct NFA {
    alphabet: Alphabet,
    delta: Vec<Vec<Vec<StateIndex>>>,
    finality: Vec<bool>,
    initial: StateIndex,
}

impl NFA {
    /// Creates an automaton without states over an alphabet that only contains the silent
    /// symbol.
    pub fn new() -> Self {
        Self::for_alphabet(Alphabet::new())
    }

    /// Creates an automaton without states over the given alphabet.
    pub fn for_alphabet(alphabet: Alphabet) -> Self {
        Self {
            alphabet,
            delta: vec![],
            finality: vec![],
            initial: 0,
        }
    }

    /// Returns a builder which is the most convenient way of constructing an automaton from a
    /// list of transitions.
    ///
    /// # Example
    /// ```
    /// use lambda_det::prelude::*;
    ///
    /// let nfa = NFA::builder()
    ///     .with_state_colors([false, true])
    ///     .with_transitions([(0, "a", 0), (0, "a", 1), (0, "lambda", 1)])
    ///     .into_nfa(0);
    /// assert_eq!(nfa.size(), 2);
    /// assert!(nfa.accepts(["a", "a"]));
    /// ```
    pub fn builder() -> NFABuilder {
        NFABuilder::default()
    }

    /// Adds a new state and returns its index.
    pub fn add_state(&mut self, is_final: bool) -> StateIndex {
        let id = self.delta.len();
        self.delta.push(vec![vec![]; self.alphabet.size()]);
        self.finality.push(is_final);
        id
    }

    /// Adds a transition on the symbol with the given name, which is added to the alphabet if
    /// it is not yet known. Returns the index of the symbol. Adding a transition that already
    /// exists has no effect.
    ///
    /// Panics if `from` or `to` is not a state of the automaton.
    pub fn add_transition(
        &mut self,
        from: StateIndex,
        symbol: &str,
        to: StateIndex,
    ) -> SymbolIndex {
        let sym = self.alphabet.intern(symbol);
        if sym >= self.delta.first().map_or(0, Vec::len) {
            let size = self.alphabet.size();
            for row in &mut self.delta {
                row.resize(size, vec![]);
            }
        }
        self.add_transition_on(from, sym, to);
        sym
    }

    /// Adds a transition on the symbol with the given index.
    ///
    /// Panics if one of the states or the symbol does not exist.
    pub fn add_transition_on(&mut self, from: StateIndex, sym: SymbolIndex, to: StateIndex) {
        assert!(
            to < self.size(),
            "target {to} is out of bounds, there are only {} states",
            self.size()
        );
        let targets = &mut self.delta[from][sym];
        if !targets.contains(&to) {
            trace!("adding transition {from} --{sym}--> {to}");
            targets.push(to);
        }
    }

    /// Marks the state `q` as final or non-final.
    pub fn set_final(&mut self, q: StateIndex, is_final: bool) {
        self.finality[q] = is_final;
    }

    /// Designates `q` as the initial state.
    pub fn set_initial(&mut self, q: StateIndex) {
        assert!(q < self.size(), "initial state {q} does not exist");
        self.initial = q;
    }

    /// The number of states.
    pub fn size(&self) -> usize {
        self.delta.len()
    }

    /// The alphabet over which the automaton operates.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Number of symbols in the alphabet, the silent symbol included.
    pub fn alphabet_size(&self) -> usize {
        self.alphabet.size()
    }

    /// The designated initial state.
    pub fn initial(&self) -> StateIndex {
        self.initial
    }

    /// Returns whether `q` is final.
    pub fn is_final(&self, q: StateIndex) -> bool {
        self.finality[q]
    }

    /// The finality flags of all states, ordered by state index.
    pub fn finality(&self) -> &[bool] {
        &self.finality
    }

    /// The states which `q` can move to directly on the symbol `sym`.
    pub fn successors(&self, q: StateIndex, sym: SymbolIndex) -> &[StateIndex] {
        &self.delta[q][sym]
    }

    /// The states which `q` can move to with a single silent transition.
    pub fn silent_successors(&self, q: StateIndex) -> &[StateIndex] {
        self.successors(q, LAMBDA)
    }

    /// Iterates over all transitions as triples `(source, symbol, target)`, ordered by source
    /// and then by symbol.
    pub fn transitions(
        &self,
    ) -> impl Iterator<Item = (StateIndex, SymbolIndex, StateIndex)> + '_ {
        self.delta.iter().enumerate().flat_map(|(q, row)| {
            row.iter()
                .enumerate()
                .flat_map(move |(sym, targets)| targets.iter().map(move |&p| (q, sym, p)))
        })
    }

    /// Returns the set of states that the automaton can be in after reading `word` from the
    /// initial state. Symbols which are not part of the alphabet lead to the empty set.
    pub fn reached_states<W, S>(&self, word: W) -> StateSet
    where
        W: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut closure = Closure::new(self);
        let mut current = closure.of_state(self.initial);
        for symbol in word {
            let Some(sym) = self.alphabet.index_of(symbol.as_ref()).filter(|&s| s != LAMBDA)
            else {
                return StateSet::empty();
            };
            current = closure.of_states(
                current
                    .iter()
                    .flat_map(|q| self.successors(q, sym).iter().copied()),
            );
        }
        current
    }

    /// Decides whether `word`, given as a sequence of symbol names, is accepted.
    pub fn accepts<W, S>(&self, word: W) -> bool
    where
        W: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.reached_states(word).iter().any(|q| self.is_final(q))
    }
}

impl Default for NFA {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NFA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "NFA over {} with {} states, initial {}",
            self.alphabet.show(),
            self.size(),
            self.initial
        )?;
        for (q, sym, p) in self.transitions() {
            writeln!(
                f,
                "{q}{} --{}--> {p}",
                self.finality[q].show(),
                self.alphabet.name_of(sym).unwrap_or("?")
            )?;
        }
        Ok(())
    }
}

/// Helper struct for the construction of an [`NFA`]. It stores a list of transitions, a list of
/// state colors (finality flags) and a default color for states that were not given one.
#[derive(Debug, Clone, Default)]
pub struct NFABuilder {
    symbols: Vec<String>,
    edges: Vec<(StateIndex, String, StateIndex)>,
    colors: Vec<bool>,
    default: bool,
}

impl NFABuilder {
    /// Sets the finality of states that have no color specified.
    pub fn default_color(mut self, color: bool) -> Self {
        self.default = color;
        self
    }

    /// Assigns finality flags to the states in the order in which they are given.
    pub fn with_state_colors<I: IntoIterator<Item = bool>>(mut self, iter: I) -> Self {
        self.colors = iter.into_iter().collect();
        self
    }

    /// By default, only symbols that appear on a transition end up in the alphabet. This
    /// forces additional symbols to be present, they are added before those of the transitions.
    pub fn with_alphabet_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbols.extend(symbols.into_iter().map(Into::into));
        self
    }

    /// Adds a list of transitions given as `(source, symbol, target)`.
    pub fn with_transitions<I, S>(mut self, iter: I) -> Self
    where
        I: IntoIterator<Item = (StateIndex, S, StateIndex)>,
        S: Into<String>,
    {
        self.edges
            .extend(iter.into_iter().map(|(q, sym, p)| (q, sym.into(), p)));
        self
    }

    /// Builds the automaton with `initial` as its initial state. The number of states is the
    /// smallest number that covers all colored states and all endpoints of transitions.
    pub fn into_nfa(self, initial: StateIndex) -> NFA {
        let mut alphabet = Alphabet::new();
        for sym in self.symbols.iter().chain(self.edges.iter().map(|(_, sym, _)| sym)) {
            alphabet.intern(sym);
        }

        let size = self
            .edges
            .iter()
            .flat_map(|(q, _, p)| [*q + 1, *p + 1])
            .chain([self.colors.len(), initial + 1])
            .max()
            .unwrap_or(0);

        let mut nfa = NFA::for_alphabet(alphabet);
        for q in 0..size {
            nfa.add_state(self.colors.get(q).copied().unwrap_or(self.default));
        }
        for (q, sym, p) in &self.edges {
            nfa.add_transition(*q, sym, *p);
        }
        nfa.set_initial(initial);
        nfa
    }
}
