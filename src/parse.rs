//! Reading automata from their textual description.
//!
//! The description consists of whitespace-separated tokens: the number of states `N` and the
//! number of transitions `M`, followed by `M` triples `source target symbol`, then `N` finality
//! flags (`0` or `1`) and finally the index of the initial state. The symbol named
//! [`LAMBDA_NAME`](crate::alphabet::LAMBDA_NAME) denotes a silent transition.
//!
//! ```text
//! 2 3
//! 0 0 a
//! 0 1 a
//! 0 1 lambda
//! 0 1
//! 0
//! ```
use std::str::{FromStr, SplitWhitespace};

use thiserror::Error;
use tracing::{debug, warn};

use crate::{nfa::StateIndex, NFA};

/// Errors that can occur while reading an automaton from its textual description.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input ended prematurely.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd {
        /// What should have come next.
        expected: &'static str,
    },
    /// A token that should have been a non-negative number was something else.
    #[error("expected {expected}, found \"{token}\"")]
    InvalidNumber {
        /// The offending token.
        token: String,
        /// What the token should have been.
        expected: &'static str,
    },
    /// A state index does not refer to one of the declared states.
    #[error("{what} {state} is out of range, there are only {states} states")]
    StateOutOfRange {
        /// Role of the state in the description.
        what: &'static str,
        /// The given index.
        state: usize,
        /// The declared number of states.
        states: usize,
    },
    /// A finality flag was neither `0` nor `1`.
    #[error("finality flag of state {state} must be 0 or 1, found \"{token}\"")]
    InvalidFinality {
        /// The state the flag belongs to.
        state: StateIndex,
        /// The offending token.
        token: String,
    },
}

struct Tokens<'a>(SplitWhitespace<'a>);

impl<'a> Tokens<'a> {
    fn next_token(&mut self, expected: &'static str) -> Result<&'a str, ParseError> {
        self.0.next().ok_or(ParseError::UnexpectedEnd { expected })
    }

    fn next_number(&mut self, expected: &'static str) -> Result<usize, ParseError> {
        let token = self.next_token(expected)?;
        token.parse().map_err(|_| ParseError::InvalidNumber {
            token: token.to_string(),
            expected,
        })
    }

    fn next_state(
        &mut self,
        what: &'static str,
        states: usize,
    ) -> Result<StateIndex, ParseError> {
        let state = self.next_number(what)?;
        if state >= states {
            return Err(ParseError::StateOutOfRange {
                what,
                state,
                states,
            });
        }
        Ok(state)
    }
}

/// Reads an [`NFA`] from its textual description, see the [module documentation](self) for
/// the format. Tokens after the initial state are ignored.
///
/// The whole description is read before any state is created, so the declared counts only
/// determine the size of the automaton once they are backed by actual input.
pub fn parse_nfa(input: &str) -> Result<NFA, ParseError> {
    let mut tokens = Tokens(input.split_whitespace());

    let states = tokens.next_number("number of states")?;
    let transitions = tokens.next_number("number of transitions")?;
    debug!("reading automaton with {states} states and {transitions} transitions");

    let mut edges = Vec::new();
    for _ in 0..transitions {
        let from = tokens.next_state("source state", states)?;
        let to = tokens.next_state("target state", states)?;
        let symbol = tokens.next_token("transition symbol")?;
        edges.push((from, symbol, to));
    }

    let mut finality = Vec::new();
    for q in 0..states {
        match tokens.next_token("finality flag")? {
            "0" => finality.push(false),
            "1" => finality.push(true),
            token => {
                return Err(ParseError::InvalidFinality {
                    state: q,
                    token: token.to_string(),
                })
            }
        }
    }

    let initial = tokens.next_state("initial state", states)?;

    let trailing = tokens.0.count();
    if trailing > 0 {
        warn!("ignoring {trailing} tokens after the initial state");
    }

    let mut nfa = NFA::new();
    for is_final in finality {
        nfa.add_state(is_final);
    }
    for (from, symbol, to) in edges {
        nfa.add_transition(from, symbol, to);
    }
    nfa.set_initial(initial);

    debug!(
        "read automaton over alphabet of size {}",
        nfa.alphabet_size()
    );
    Ok(nfa)
}

impl FromStr for NFA {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_nfa(s)
    }
}
