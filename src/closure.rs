use bit_set::BitSet;
use tracing::trace;

use crate::{nfa::StateIndex, state_set::StateSet, NFA};

/// Computes closures under silent transitions, i.e. the sets of states that are reachable
/// through zero or more [`crate::alphabet::LAMBDA`] transitions. The closure of a state always
/// contains the state itself.
///
/// The traversal is a depth-first search with an explicit stack. Visited markers and the stack
/// are kept between calls so that their allocations can be reused, they are reset at the start
/// of every call.
#[derive(Debug, Clone)]
pub struct Closure<'a> {
    nfa: &'a NFA,
    visited: BitSet,
    stack: Vec<StateIndex>,
}

impl<'a> Closure<'a> {
    /// Creates a closure computer for the given automaton.
    pub fn new(nfa: &'a NFA) -> Self {
        Self {
            nfa,
            visited: BitSet::with_capacity(nfa.size()),
            stack: Vec::new(),
        }
    }

    /// Computes the set of states reachable from `start` through silent transitions.
    ///
    /// Panics if `start` is not a state of the automaton.
    pub fn of_state(&mut self, start: StateIndex) -> StateSet {
        self.of_states([start])
    }

    /// Computes the union of the closures of all given states. Duplicates in `starts` are
    /// fine, an empty iterator yields the empty set.
    pub fn of_states<I: IntoIterator<Item = StateIndex>>(&mut self, starts: I) -> StateSet {
        self.visited.clear();
        self.stack.clear();
        let mut reachable = Vec::new();

        for start in starts {
            assert!(
                start < self.nfa.size(),
                "state {start} is out of bounds, there are only {} states",
                self.nfa.size()
            );
            if self.visited.insert(start) {
                self.stack.push(start);
                reachable.push(start);
            }

            while let Some(q) = self.stack.pop() {
                for &p in self.nfa.silent_successors(q) {
                    if self.visited.insert(p) {
                        self.stack.push(p);
                        reachable.push(p);
                    }
                }
            }
        }

        let closure = StateSet::from_unsorted(reachable);
        trace!("computed closure {:?}", closure);
        closure
    }
}

#[cfg(test)]
mod tests {
    use super::Closure;
    use crate::prelude::*;

    fn lambda_chain() -> NFA {
        NFA::builder()
            .with_transitions([
                (0, "lambda", 1),
                (1, "lambda", 2),
                (2, "lambda", 0),
                (2, "a", 3),
                (3, "lambda", 4),
                (5, "lambda", 5),
            ])
            .into_nfa(0)
    }

    #[test_log::test]
    fn closure_of_single_state() {
        let nfa = lambda_chain();
        let mut closure = Closure::new(&nfa);
        assert_eq!(closure.of_state(0).as_slice(), &[0, 1, 2]);
        assert_eq!(closure.of_state(1).as_slice(), &[0, 1, 2]);
        assert_eq!(closure.of_state(3).as_slice(), &[3, 4]);
        assert_eq!(closure.of_state(4).as_slice(), &[4]);
        assert_eq!(closure.of_state(5).as_slice(), &[5]);
    }

    #[test]
    fn closure_of_multiple_states_is_union() {
        let nfa = lambda_chain();
        let mut closure = Closure::new(&nfa);
        assert_eq!(closure.of_states([4, 3, 4]).as_slice(), &[3, 4]);
        assert_eq!(closure.of_states([5, 1]).as_slice(), &[0, 1, 2, 5]);
        assert!(closure.of_states(Vec::<StateIndex>::new()).is_empty());
    }

    #[test]
    #[cfg(feature = "random")]
    fn closure_properties_hold_on_random_automata() {
        for _ in 0..50 {
            let nfa = generate_random_nfa(12, 2, 0.1, 0.15);
            let mut closure = Closure::new(&nfa);
            for q in 0..nfa.size() {
                let set = closure.of_state(q);
                assert!(set.contains(q));
                for p in set.iter() {
                    for &r in nfa.silent_successors(p) {
                        assert!(set.contains(r), "silent edge {p} -> {r} leaves {set:?}");
                    }
                }
                assert_eq!(closure.of_states(set.iter()), set);
                let statewise: StateSet = set
                    .iter()
                    .flat_map(|p| closure.of_state(p))
                    .collect();
                assert_eq!(statewise, set);
            }
        }
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_start_panics() {
        let nfa = lambda_chain();
        Closure::new(&nfa).of_state(nfa.size());
    }
}
