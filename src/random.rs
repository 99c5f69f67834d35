use tracing::debug;

use crate::{
    alphabet::{Alphabet, LAMBDA},
    NFA,
};

/// Generates a random automaton with `states` states over an alphabet of `symbols` symbols named
/// `a`, `b`, ... (see [`Alphabet::of_size`]). For every pair of states and every symbol, a
/// transition is inserted with probability `density`, and a silent transition is inserted with
/// probability `lambda_density`. Each state is final with probability one half and state `0`
/// is the initial one.
///
/// Panics if `states` is zero.
pub fn generate_random_nfa(
    states: usize,
    symbols: usize,
    density: f64,
    lambda_density: f64,
) -> NFA {
    assert!(states > 0, "an automaton needs at least one state");
    let alphabet = Alphabet::of_size(symbols);
    let mut nfa = NFA::for_alphabet(alphabet.clone());
    for _ in 0..states {
        nfa.add_state(fastrand::bool());
    }

    for q in 0..states {
        for p in 0..states {
            if q != p && fastrand::f64() < lambda_density {
                nfa.add_transition_on(q, LAMBDA, p);
            }
            for sym in alphabet.universe() {
                if fastrand::f64() < density {
                    nfa.add_transition_on(q, sym, p);
                }
            }
        }
    }
    nfa.set_initial(0);

    debug!(
        "generated random automaton with {} states and {} transitions",
        states,
        nfa.transitions().count()
    );
    nfa
}

/// Draws a random word of length at most `max_len` over the non-silent symbols of the alphabet
/// of `nfa`.
pub fn random_word(nfa: &NFA, max_len: usize) -> Vec<String> {
    let alphabet = nfa.alphabet();
    let symbols = alphabet.symbol_names().collect::<Vec<_>>();
    if symbols.is_empty() {
        return vec![];
    }
    (0..fastrand::usize(..=max_len))
        .map(|_| symbols[fastrand::usize(..symbols.len())].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{generate_random_nfa, random_word};

    #[test]
    fn random_automaton_shape() {
        let nfa = generate_random_nfa(5, 3, 0.3, 0.2);
        assert_eq!(nfa.size(), 5);
        assert_eq!(nfa.alphabet_size(), 4);
        assert_eq!(nfa.initial(), 0);
        for (q, sym, p) in nfa.transitions() {
            assert!(q < 5 && p < 5 && sym < 4);
        }
        for _ in 0..20 {
            let word = random_word(&nfa, 6);
            assert!(word.len() <= 6);
            assert!(word.iter().all(|s| ["a", "b", "c"].contains(&s.as_str())));
        }
    }

    #[test]
    fn empty_alphabet_gives_empty_words() {
        let nfa = generate_random_nfa(2, 0, 0.5, 0.5);
        assert!(random_word(&nfa, 4).is_empty());
    }
}
