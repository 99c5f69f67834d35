use tracing::{debug, trace};

use crate::{
    closure::Closure,
    math::Map,
    nfa::StateIndex,
    state_set::StateSet,
    DFA, NFA,
};

/// Represents the subset construction applied to an [`NFA`]. Every state of the resulting
/// [`DFA`] corresponds to the set of NFA states that can be active at the same time, sets are
/// identified through their canonical [`StateSet`] form.
///
/// States are discovered in a depth-first manner: the worklist is a stack of sets that were
/// assigned an index but whose outgoing transitions have not been computed yet. Indices are
/// handed out in the order of discovery, the initial state always gets index `0`.
pub struct SubsetConstruction<'a> {
    nfa: &'a NFA,
    closure: Closure<'a>,
    ids: Map<StateSet, StateIndex>,
    worklist: Vec<(StateSet, StateIndex)>,
    delta: Vec<Vec<Option<StateIndex>>>,
    finality: Vec<bool>,
    subsets: Vec<StateSet>,
}

impl<'a> SubsetConstruction<'a> {
    /// Prepares the construction, which means that the closure of the initial state of `nfa`
    /// is computed and registered as the initial DFA state.
    pub fn new(nfa: &'a NFA) -> Self {
        let mut closure = Closure::new(nfa);
        let initial = closure.of_state(nfa.initial());

        let mut construction = Self {
            nfa,
            closure,
            ids: Map::default(),
            worklist: vec![],
            delta: vec![],
            finality: vec![],
            subsets: vec![],
        };
        construction.index_of(initial);
        construction
    }

    /// Number of DFA states that have been discovered so far.
    pub fn discovered(&self) -> usize {
        self.subsets.len()
    }

    /// Returns the index of the DFA state corresponding to `set`. If the set has not been seen
    /// before, it is assigned the next free index and scheduled for exploration.
    fn index_of(&mut self, set: StateSet) -> StateIndex {
        if let Some(&id) = self.ids.get(&set) {
            return id;
        }

        let id = self.discovered();
        debug!("discovered DFA state {id} for subset {:?}", set);
        self.ids.insert(set.clone(), id);
        self.subsets.push(set.clone());
        self.delta.push(vec![None; self.nfa.alphabet_size()]);
        self.finality.push(false);
        self.worklist.push((set, id));
        id
    }

    /// Pops one pending state from the worklist and computes its finality and its successor on
    /// every non-silent symbol. Returns `false` if there was nothing left to do.
    pub fn step(&mut self) -> bool {
        let Some((set, id)) = self.worklist.pop() else {
            return false;
        };
        let nfa = self.nfa;
        trace!("exploring DFA state {id} for subset {:?}", set);

        self.finality[id] = set.iter().any(|q| nfa.is_final(q));

        for sym in nfa.alphabet().universe() {
            let reached = self.closure.of_states(
                set.iter()
                    .flat_map(|q| nfa.successors(q, sym).iter().copied()),
            );
            let target = self.index_of(reached);
            trace!("{id} --{sym}--> {target}");
            self.delta[id][sym] = Some(target);
        }
        true
    }

    /// Runs the construction to completion and returns the resulting automaton.
    pub fn run(mut self) -> DFA {
        while self.step() {}

        debug!(
            "subset construction produced {} states from {} NFA states",
            self.discovered(),
            self.nfa.size()
        );
        DFA::from_parts(
            self.nfa.alphabet().clone(),
            self.delta,
            self.finality,
            self.subsets,
        )
    }
}

/// Converts `nfa` into an equivalent [`DFA`] through the subset construction. Only states that
/// are reachable from the initial state are created.
pub fn determinize(nfa: &NFA) -> DFA {
    SubsetConstruction::new(nfa).run()
}

impl NFA {
    /// Converts `self` into an equivalent [`DFA`], see [`determinize`].
    pub fn determinize(&self) -> DFA {
        determinize(self)
    }
}
