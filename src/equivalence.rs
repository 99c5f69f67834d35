use itertools::Itertools;

use crate::{alphabet::SymbolIndex, math::Partition, DFA};

impl DFA {
    /// Returns true if every state moves to the same successor on `left` as it does on
    /// `right`, i.e. the two columns of the transition table coincide.
    pub fn symbols_equivalent(&self, left: SymbolIndex, right: SymbolIndex) -> bool {
        self.column(left).eq(self.column(right))
    }

    /// Returns the symbols with an index greater than `sym` that are equivalent to it, in
    /// ascending order.
    pub fn equivalent_symbols(&self, sym: SymbolIndex) -> Vec<SymbolIndex> {
        ((sym + 1)..self.alphabet().size())
            .filter(|&other| self.symbols_equivalent(sym, other))
            .collect()
    }

    /// Computes the classes of mutually equivalent non-silent symbols. Classes are ordered by
    /// their smallest member.
    pub fn symbol_classes(&self) -> Partition<SymbolIndex> {
        let mut classes: Vec<Vec<SymbolIndex>> = vec![];
        for sym in self.alphabet().universe() {
            match classes
                .iter_mut()
                .find(|class| self.symbols_equivalent(class[0], sym))
            {
                Some(class) => class.push(sym),
                None => classes.push(vec![sym]),
            }
        }
        Partition::new(classes)
    }
}

/// Lists, for every non-silent symbol in alphabet order, the symbols that come after it and
/// are equivalent to it. Each symbol gets one line of the form `a is equivalent to b c`.
pub fn equivalence_report(dfa: &DFA) -> String {
    let alphabet = dfa.alphabet();
    let classes = dfa.symbol_classes();
    alphabet
        .universe()
        .map(|sym| {
            let equivalent = classes
                .class_of(&sym)
                .into_iter()
                .flat_map(|class| class.range((sym + 1)..))
                .filter_map(|&other| alphabet.name_of(other))
                .join(" ");
            format!(
                "{} is equivalent to {}",
                alphabet.name_of(sym).unwrap_or_default(),
                equivalent
            )
            .trim_end()
            .to_string()
        })
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::equivalence_report;
    use crate::prelude::*;

    #[test]
    fn single_state_self_loops_are_equivalent() {
        let dfa = NFA::builder()
            .with_state_colors([true])
            .with_transitions([(0, "x", 0), (0, "y", 0)])
            .into_nfa(0)
            .determinize();
        assert_eq!(dfa.size(), 1);
        assert!(dfa.symbols_equivalent(1, 2));
        assert!(dfa.symbols_equivalent(2, 1));
        assert_eq!(dfa.equivalent_symbols(1), vec![2]);
        assert_eq!(dfa.symbol_classes(), Partition::new([vec![1, 2]]));
        assert_eq!(
            equivalence_report(&dfa),
            "x is equivalent to y\ny is equivalent to"
        );
    }

    #[test]
    fn classes_follow_columns() {
        // a and c behave identically, b leads elsewhere
        let dfa = NFA::builder()
            .with_state_colors([false, true])
            .with_transitions([(0, "a", 1), (0, "b", 0), (0, "c", 1), (1, "b", 1)])
            .into_nfa(0)
            .determinize();
        assert!(dfa.symbols_equivalent(1, 3));
        assert!(!dfa.symbols_equivalent(1, 2));
        assert_eq!(dfa.equivalent_symbols(1), vec![3]);
        assert!(dfa.equivalent_symbols(2).is_empty());
        assert_eq!(dfa.symbol_classes(), Partition::new([vec![1, 3], vec![2]]));
        assert_eq!(
            equivalence_report(&dfa),
            "a is equivalent to c\nb is equivalent to\nc is equivalent to"
        );
    }

    #[test]
    fn report_lists_later_class_members() {
        let dfa = NFA::builder()
            .with_state_colors([false, true])
            .with_transitions([
                (0, "a", 1),
                (0, "b", 0),
                (0, "c", 1),
                (0, "d", 1),
                (1, "b", 1),
            ])
            .into_nfa(0)
            .determinize();
        let classes = dfa.symbol_classes();
        assert_eq!(classes, Partition::new([vec![1, 3, 4], vec![2]]));
        for sym in dfa.alphabet().universe() {
            let later = classes
                .class_of(&sym)
                .unwrap()
                .range((sym + 1)..)
                .copied()
                .collect::<Vec<_>>();
            assert_eq!(later, dfa.equivalent_symbols(sym));
        }
        assert_eq!(
            equivalence_report(&dfa),
            "a is equivalent to c d\nb is equivalent to\nc is equivalent to d\nd is equivalent to"
        );
    }

    #[test]
    fn equivalence_is_symmetric() {
        let dfa = NFA::builder()
            .with_state_colors([false, true, false])
            .with_transitions([(0, "a", 1), (0, "b", 2), (1, "a", 2), (1, "b", 2), (2, "c", 0)])
            .into_nfa(0)
            .determinize();
        for left in dfa.alphabet().universe() {
            for right in dfa.alphabet().universe() {
                assert_eq!(
                    dfa.symbols_equivalent(left, right),
                    dfa.symbols_equivalent(right, left)
                );
            }
        }
    }
}
