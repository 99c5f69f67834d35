use std::fmt::Display;

use itertools::Itertools;

use crate::{alphabet::SymbolIndex, nfa::StateIndex, Show, DFA, NFA};

fn escape_dot_label(label: &str) -> String {
    label.chars().fold(String::new(), |mut out, chr| {
        if matches!(chr, '"' | '\\') {
            out.push('\\');
        }
        out.push(chr);
        out
    })
}

/// Implemented by automata that can be output in the DOT format of graphviz.
pub trait Dottable {
    /// Compute the graphviz representation, for more information on the DOT format,
    /// see the [graphviz documentation](https://graphviz.org/doc/info/lang.html).
    fn dot_representation(&self) -> String {
        let header = std::iter::once(format!(
            "digraph {} {{",
            self.dot_name().unwrap_or("A".to_string())
        ))
        .chain(self.dot_header_statements());

        let states = self.dot_states().into_iter().map(|(ident, attributes)| {
            format!(
                "{ident} [{}]",
                attributes.into_iter().map(|attr| attr.to_string()).join(", ")
            )
        });

        let transitions = self
            .dot_transitions()
            .into_iter()
            .map(|(source, target, attributes)| {
                format!(
                    "{source} -> {target} [{}]",
                    attributes.into_iter().map(|attr| attr.to_string()).join(", ")
                )
            });

        let mut lines = header
            .chain(states)
            .chain(transitions)
            .chain(std::iter::once("}".to_string()));
        lines.join("\n")
    }

    /// Name of the graph.
    fn dot_name(&self) -> Option<String>;

    /// Statements that are placed before the nodes, such as graph attributes.
    fn dot_header_statements(&self) -> impl IntoIterator<Item = String> {
        []
    }

    /// The nodes of the graph as pairs of identifier and attributes.
    fn dot_states(&self) -> impl IntoIterator<Item = (String, Vec<DotStateAttribute>)>;

    /// The edges of the graph as triples of source identifier, target identifier and
    /// attributes.
    fn dot_transitions(
        &self,
    ) -> impl IntoIterator<Item = (String, String, Vec<DotTransitionAttribute>)>;
}

fn state_ident(q: StateIndex) -> String {
    format!("q{}", q.show())
}

fn state_shape(is_final: bool) -> DotStateAttribute {
    DotStateAttribute::Shape(if is_final { "doublecircle" } else { "circle" }.into())
}

impl Dottable for DFA {
    fn dot_name(&self) -> Option<String> {
        Some("DFA".into())
    }

    fn dot_header_statements(&self) -> impl IntoIterator<Item = String> {
        ["rankdir=LR".to_string()]
    }

    fn dot_states(&self) -> impl IntoIterator<Item = (String, Vec<DotStateAttribute>)> {
        self.state_indices().map(move |q| {
            (
                state_ident(q),
                vec![
                    DotStateAttribute::Label(escape_dot_label(&self.subset(q).show())),
                    state_shape(self.is_final(q)),
                ],
            )
        })
    }

    fn dot_transitions(
        &self,
    ) -> impl IntoIterator<Item = (String, String, Vec<DotTransitionAttribute>)> {
        self.state_indices().flat_map(move |q| {
            self.edges_grouped(q).into_iter().map(move |(p, symbols)| {
                (
                    state_ident(q),
                    state_ident(p),
                    vec![DotTransitionAttribute::Label(
                        self.symbol_list_label(&symbols),
                    )],
                )
            })
        })
    }
}

impl DFA {
    fn symbol_list_label(&self, symbols: &[SymbolIndex]) -> String {
        escape_dot_label(
            &symbols
                .iter()
                .filter_map(|&sym| self.alphabet().name_of(sym))
                .join(", "),
        )
    }
}

impl Dottable for NFA {
    fn dot_name(&self) -> Option<String> {
        Some("NFA".into())
    }

    fn dot_header_statements(&self) -> impl IntoIterator<Item = String> {
        ["rankdir=LR".to_string()]
    }

    fn dot_states(&self) -> impl IntoIterator<Item = (String, Vec<DotStateAttribute>)> {
        std::iter::once((
            "init".to_string(),
            vec![
                DotStateAttribute::Label(String::new()),
                DotStateAttribute::Shape("none".into()),
            ],
        ))
        .chain((0..self.size()).map(move |q| {
            (
                state_ident(q),
                vec![
                    DotStateAttribute::Label(q.show()),
                    state_shape(self.is_final(q)),
                ],
            )
        }))
    }

    fn dot_transitions(
        &self,
    ) -> impl IntoIterator<Item = (String, String, Vec<DotTransitionAttribute>)> {
        std::iter::once(("init".to_string(), state_ident(self.initial()), vec![])).chain(
            self.transitions().map(move |(q, sym, p)| {
                (
                    state_ident(q),
                    state_ident(p),
                    vec![DotTransitionAttribute::Label(escape_dot_label(
                        self.alphabet().name_of(sym).unwrap_or_default(),
                    ))],
                )
            }),
        )
    }
}

/// Enum that abstracts attributes of nodes in the DOT format.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DotStateAttribute {
    /// The label of a node
    Label(String),
    /// The shape of a node
    Shape(String),
}

impl Display for DotStateAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DotStateAttribute::Label(s) => write!(f, "label=\"{s}\""),
            DotStateAttribute::Shape(s) => write!(f, "shape=\"{s}\""),
        }
    }
}

/// Enum that abstracts attributes of edges in the DOT format.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DotTransitionAttribute {
    /// The label of an edge
    Label(String),
}

impl Display for DotTransitionAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DotTransitionAttribute::Label(lbl) => write!(f, "label=\"{lbl}\""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Dottable;
    use crate::prelude::*;

    #[test]
    fn dfa_dot() {
        let dfa = NFA::builder()
            .with_state_colors([false, true])
            .with_transitions([(0, "a", 1), (0, "b", 1), (1, "a", 1)])
            .into_nfa(0)
            .determinize();
        let dot = dfa.dot_representation();
        println!("{dot}");

        assert!(dot.starts_with("digraph DFA {\nrankdir=LR\n"));
        assert!(dot.ends_with('}'));
        assert!(dot.contains("q0 [label=\"[0]\", shape=\"circle\"]"));
        assert!(dot.contains("q1 [label=\"[1]\", shape=\"doublecircle\"]"));
        assert!(dot.contains("q2 [label=\"[]\", shape=\"circle\"]"));
        assert!(dot.contains("q0 -> q1 [label=\"a, b\"]"));
        assert!(dot.contains("q1 -> q1 [label=\"a\"]"));
        assert!(dot.contains("q1 -> q2 [label=\"b\"]"));
        assert!(dot.contains("q2 -> q2 [label=\"a, b\"]"));

        assert_eq!(dot.matches("doublecircle").count(), dfa.final_states().count());
        // one edge per pair of source and target
        assert_eq!(dot.matches(" -> ").count(), 4);
    }

    #[test]
    fn nfa_dot_escapes_labels() {
        let nfa = NFA::builder()
            .with_transitions([(0, "lambda", 1), (1, "\"q\"", 0)])
            .into_nfa(1);
        let dot = nfa.dot_representation();
        assert!(dot.starts_with("digraph NFA {"));
        assert!(dot.contains("init -> q1 []"));
        assert!(dot.contains("q0 -> q1 [label=\"lambda\"]"));
        assert!(dot.contains("q1 -> q0 [label=\"\\\"q\\\"\"]"));
    }
}
