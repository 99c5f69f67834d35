//! Library for determinizing finite automata with silent transitions.
//!
//! An [`NFA`] consists of a set of states $Q$ that are numbered densely from zero, an ordered
//! [`alphabet::Alphabet`] whose first symbol is the silent symbol `lambda`, a transition relation
//! that maps each pair of state and symbol to a (possibly empty) list of target states, one
//! finality flag per state and a designated initial state. Silent transitions do not consume
//! any input, they are only taken into account through closures (see [`closure::Closure`]),
//! which collect all states reachable through zero or more silent transitions.
//!
//! The subset construction (see [`determinization::SubsetConstruction`]) turns an `NFA` into a
//! [`DFA`] whose states are sets of NFA states. These sets are kept in the canonical form of a
//! [`state_set::StateSet`], which makes two sets that were discovered in different ways
//! compare equal if they have the same members. Only sets that are reachable from the closure
//! of the initial state are ever created. The empty set plays the role of a trap state.
//!
//! Besides the construction itself, the crate provides ways of inspecting the result:
//! - [`table::transition_table`] renders the transition table,
//! - [`equivalence`] determines which input symbols are indistinguishable in the DFA,
//! - [`dot::Dottable`] outputs automata in the DOT format of graphviz,
//! - [`report::Report`] combines the above into the output of the `lambda-det` binary.
//!
//! Automata can be built through [`NFA::builder`] or read from text with [`parse::parse_nfa`].
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use lambda_det::prelude::*;` should be enough to use the package.
pub mod prelude {
    #[cfg(feature = "random")]
    pub use super::random::{generate_random_nfa, random_word};
    pub use super::{
        alphabet::{Alphabet, SymbolIndex, LAMBDA, LAMBDA_NAME},
        closure::Closure,
        determinization::{determinize, SubsetConstruction},
        dfa::{DFA, TRAP_LABEL},
        dot::Dottable,
        equivalence::equivalence_report,
        math::{self, Map, Partition},
        nfa::{NFABuilder, StateIndex, NFA},
        parse::{parse_nfa, ParseError},
        report::{determinize_and_report, Report, ReportOptions, Section},
        state_set::StateSet,
        table::transition_table,
        Show,
    };
}

/// This module contains the collection types which are used throughout the crate.
pub mod math;

/// Module that contains definitions for dealing with alphabets.
pub mod alphabet;

/// Nondeterministic automata with silent transitions.
#[allow(clippy::upper_case_acronyms)]
pub mod nfa;
pub use nfa::NFA;

/// Canonical sets of states.
pub mod state_set;

/// Closures under silent transitions.
pub mod closure;

/// The subset construction.
pub mod determinization;

/// Deterministic automata as produced by the subset construction.
#[allow(clippy::upper_case_acronyms)]
pub mod dfa;
pub use dfa::DFA;

/// Equivalence of input symbols in a deterministic automaton.
pub mod equivalence;

/// Rendering of transition tables.
pub mod table;

/// Output in the DOT format.
pub mod dot;

/// Reading automata from text.
pub mod parse;

/// Assembling the output of the command line tool.
pub mod report;

/// Implements the generation of random automata and words. This is feature gated behind the
/// `random` feature.
#[cfg(feature = "random")]
pub mod random;

/// Helper trait which can be used to display states, transitions and such.
pub trait Show {
    /// Returns a human readable representation of `self`, for a state index that could for
    /// example be `3`, for a set of states `[0 1 3]`. Mainly used for labels and debugging.
    fn show(&self) -> String;
}

impl Show for usize {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for Option<usize> {
    fn show(&self) -> String {
        match self {
            None => "-".to_string(),
            Some(x) => x.show(),
        }
    }
}

impl Show for bool {
    fn show(&self) -> String {
        match self {
            true => "+",
            false => "-",
        }
        .to_string()
    }
}

impl Show for String {
    fn show(&self) -> String {
        self.clone()
    }
}

impl<S: Show> Show for &S {
    fn show(&self) -> String {
        S::show(*self)
    }
}

#[cfg(test)]
mod tests {
    use crate::Show;

    #[test]
    fn show_primitives() {
        assert_eq!(3usize.show(), "3");
        assert_eq!(Some(4usize).show(), "4");
        assert_eq!(None::<usize>.show(), "-");
        assert_eq!(true.show(), "+");
        assert_eq!((&false).show(), "-");
    }
}
