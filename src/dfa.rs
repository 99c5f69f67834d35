use itertools::Itertools;

use crate::{
    alphabet::{Alphabet, SymbolIndex, LAMBDA},
    nfa::StateIndex,
    state_set::StateSet,
    Show,
};

/// The label under which the trap state, i.e. the state corresponding to the empty set of
/// NFA states, is displayed.
pub const TRAP_LABEL: &str = "TRAP";

/// A deterministic finite automaton as it is produced by the subset construction. Each state
/// corresponds to a set of states of the automaton it was built from, the state with index
/// `0` is the initial one.
///
/// The transition table has one row per state and one column per symbol of the alphabet. The
/// column of the silent symbol is never populated.
#[derive(Clone, PartialEq, Eq)]
pub struct DFA {
    alphabet: Alphabet,
    delta: Vec<Vec<Option<StateIndex>>>,
    finality: Vec<bool>,
    subsets: Vec<StateSet>,
}

impl DFA {
    pub(crate) fn from_parts(
        alphabet: Alphabet,
        delta: Vec<Vec<Option<StateIndex>>>,
        finality: Vec<bool>,
        subsets: Vec<StateSet>,
    ) -> Self {
        assert_eq!(delta.len(), finality.len());
        assert_eq!(delta.len(), subsets.len());
        Self {
            alphabet,
            delta,
            finality,
            subsets,
        }
    }

    /// The number of states.
    pub fn size(&self) -> usize {
        self.delta.len()
    }

    /// The initial state, which is always the first one that was created.
    pub fn initial(&self) -> StateIndex {
        0
    }

    /// The alphabet, this is the same one as that of the automaton that was determinized.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Iterates over the indices of all states.
    pub fn state_indices(&self) -> std::ops::Range<StateIndex> {
        0..self.size()
    }

    /// Returns the state that is reached from `q` on `sym`, if there is one. For the silent
    /// symbol this is always `None`.
    pub fn successor(&self, q: StateIndex, sym: SymbolIndex) -> Option<StateIndex> {
        self.delta[q].get(sym).copied().flatten()
    }

    /// Returns whether `q` is final.
    pub fn is_final(&self, q: StateIndex) -> bool {
        self.finality[q]
    }

    /// The finality flags of all states, ordered by state index.
    pub fn finality(&self) -> &[bool] {
        &self.finality
    }

    /// Iterates over the indices of all final states.
    pub fn final_states(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.state_indices().filter(|&q| self.is_final(q))
    }

    /// The set of states of the determinized automaton that `q` stands for.
    pub fn subset(&self, q: StateIndex) -> &StateSet {
        &self.subsets[q]
    }

    /// The canonical label of `q`, which is empty for the trap state.
    pub fn label(&self, q: StateIndex) -> String {
        self.subsets[q].label()
    }

    /// The label of `q` as it is displayed in tables, the trap state is shown as
    /// [`TRAP_LABEL`].
    pub fn display_label(&self, q: StateIndex) -> String {
        if self.subsets[q].is_empty() {
            TRAP_LABEL.to_string()
        } else {
            self.label(q)
        }
    }

    /// Returns the index of the trap state if it was created.
    pub fn trap(&self) -> Option<StateIndex> {
        self.subsets.iter().position(StateSet::is_empty)
    }

    /// Iterates over the column of `sym` in the transition table, i.e. yields the successor of
    /// every state on `sym`, ordered by state index.
    pub fn column(&self, sym: SymbolIndex) -> impl Iterator<Item = Option<StateIndex>> + '_ {
        self.state_indices().map(move |q| self.successor(q, sym))
    }

    /// Groups the outgoing transitions of `q` by their target. The groups are ordered by the
    /// smallest symbol leading to the target and each group lists its symbols ascending.
    pub fn edges_grouped(&self, q: StateIndex) -> Vec<(StateIndex, Vec<SymbolIndex>)> {
        let mut grouped: Vec<(StateIndex, Vec<SymbolIndex>)> = Vec::new();
        for sym in self.alphabet.universe() {
            let Some(p) = self.successor(q, sym) else {
                continue;
            };
            match grouped.iter_mut().find(|(target, _)| *target == p) {
                Some((_, symbols)) => symbols.push(sym),
                None => grouped.push((p, vec![sym])),
            }
        }
        grouped
    }

    /// Runs `word`, given as a sequence of symbol names, from the initial state and returns the
    /// reached state. Returns `None` if a symbol is not part of the alphabet or a transition is
    /// missing.
    pub fn reached_state<W, S>(&self, word: W) -> Option<StateIndex>
    where
        W: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        word.into_iter().try_fold(self.initial(), |q, symbol| {
            let sym = self.alphabet.index_of(symbol.as_ref())?;
            if sym == LAMBDA {
                return None;
            }
            self.successor(q, sym)
        })
    }

    /// Decides whether `word`, given as a sequence of symbol names, is accepted.
    pub fn accepts<W, S>(&self, word: W) -> bool
    where
        W: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.reached_state(word)
            .map(|q| self.is_final(q))
            .unwrap_or(false)
    }
}

impl std::fmt::Debug for DFA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "DFA over {} with {} states",
            self.alphabet.show(),
            self.size()
        )?;
        for q in self.state_indices() {
            writeln!(
                f,
                "{q}{} {}: {}",
                self.finality[q].show(),
                self.subsets[q].show(),
                self.alphabet
                    .universe()
                    .map(|sym| format!(
                        "{} -> {}",
                        self.alphabet.name_of(sym).unwrap_or("?"),
                        self.successor(q, sym).show()
                    ))
                    .join(", ")
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    fn ab_dfa() -> DFA {
        NFA::builder()
            .with_state_colors([false, true])
            .with_transitions([(0, "a", 1), (1, "a", 1), (1, "b", 0)])
            .into_nfa(0)
            .determinize()
    }

    #[test]
    fn queries() {
        let dfa = ab_dfa();
        // {0} -a-> {1}, {0} -b-> {}, {1} -a-> {1}, {1} -b-> {0}
        assert_eq!(dfa.size(), 3);
        assert_eq!(dfa.label(0), "0");
        assert_eq!(dfa.final_states().collect::<Vec<_>>(), vec![1]);
        let trap = dfa.trap().expect("symbol b leads nowhere from state 0");
        assert_eq!(dfa.display_label(trap), TRAP_LABEL);
        assert_eq!(dfa.label(trap), "");
        assert_eq!(dfa.successor(0, LAMBDA), None);
        assert_eq!(dfa.column(LAMBDA).flatten().count(), 0);

        assert!(dfa.accepts(["a", "a", "b", "a"]));
        assert!(!dfa.accepts(["a", "b"]));
        assert!(!dfa.accepts(["b", "a"]));
        assert!(!dfa.accepts(["c"]));
        assert!(!dfa.accepts(["lambda", "a"]));
        assert_eq!(dfa.reached_state(["b", "b"]), Some(trap));
    }

    #[test]
    fn grouped_edges() {
        let dfa = ab_dfa();
        let trap = dfa.trap().unwrap();
        assert_eq!(dfa.edges_grouped(trap), vec![(trap, vec![1, 2])]);
        let accepting = dfa.final_states().next().unwrap();
        assert_eq!(
            dfa.edges_grouped(accepting),
            vec![(accepting, vec![1]), (0, vec![2])]
        );
    }
}
