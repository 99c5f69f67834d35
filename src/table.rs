use owo_colors::OwoColorize;

use crate::{nfa::StateIndex, DFA};

/// Placeholder for a cell of the transition table whose transition is undefined.
pub const UNDEFINED_CELL: &str = "-";

fn decorate_state(dfa: &DFA, q: StateIndex, colored: bool) -> String {
    let label = dfa.display_label(q);
    if !colored {
        return label;
    }
    if dfa.is_final(q) {
        label.bold().to_string()
    } else if dfa.subset(q).is_empty() {
        label.dimmed().to_string()
    } else {
        label
    }
}

/// Returns a string representation of the transition table of `dfa`. The header lists the
/// non-silent symbols, every row starts with the label of a state followed by the labels of its
/// successors. If `colored` is set, labels of final states are printed in bold and the trap
/// state is dimmed.
pub fn transition_table(dfa: &DFA, colored: bool) -> String {
    let mut builder = tabled::builder::Builder::default();
    builder.push_record(
        std::iter::once(String::new()).chain(dfa.alphabet().symbol_names().map(str::to_string)),
    );
    for q in dfa.state_indices() {
        let mut row = vec![decorate_state(dfa, q, colored)];
        for sym in dfa.alphabet().universe() {
            row.push(match dfa.successor(q, sym) {
                Some(p) => decorate_state(dfa, p, colored),
                None => UNDEFINED_CELL.to_string(),
            });
        }
        builder.push_record(row);
    }

    builder
        .build()
        .with(tabled::settings::Style::rounded())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::transition_table;
    use crate::prelude::*;

    fn cells(line: &str) -> Vec<String> {
        line.split('│')
            .map(|cell| cell.trim().to_string())
            .filter(|cell| !cell.is_empty())
            .collect()
    }

    #[test]
    fn table_rows_and_trap_label() {
        let dfa = NFA::builder()
            .with_state_colors([false, true])
            .with_transitions([(0, "a", 1), (0, "lambda", 1), (1, "b", 0)])
            .into_nfa(0)
            .determinize();
        let table = transition_table(&dfa, false);
        println!("{table}");

        let rows = table
            .lines()
            .filter(|line| line.starts_with('│'))
            .map(cells)
            .collect::<Vec<_>>();
        assert_eq!(rows[0], vec!["a", "b"]);
        assert_eq!(rows.len(), dfa.size() + 1);
        // {0, 1} -a-> {1}, {0, 1} -b-> {0, 1}
        assert_eq!(rows[1], vec!["0 1", "1", "0 1"]);
        assert!(rows.iter().any(|row| row[0] == TRAP_LABEL));
        assert!(!table.contains(" - "));
    }

    #[test]
    fn colored_table_highlights_final_states() {
        let dfa = NFA::builder()
            .with_state_colors([true])
            .with_transitions([(0, "a", 0)])
            .into_nfa(0)
            .determinize();
        let plain = transition_table(&dfa, false);
        let colored = transition_table(&dfa, true);
        assert_ne!(plain, colored);
        assert!(colored.contains("\u{1b}[1m0\u{1b}[0m"));
    }
}
