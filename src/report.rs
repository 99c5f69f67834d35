use itertools::Itertools;
use tracing::{debug, info};

use crate::{
    dot::Dottable, equivalence::equivalence_report, parse::ParseError, table::transition_table,
    DFA, NFA,
};

/// The parts of which a report on a determinized automaton can consist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// The transition table.
    Table,
    /// The list of equivalent input symbols.
    Equivalences,
    /// The DOT representation of the automaton.
    Dot,
}

impl Section {
    /// All sections in the order in which they are rendered by default.
    pub const ALL: [Section; 3] = [Section::Table, Section::Equivalences, Section::Dot];

    /// The name under which the section can be selected.
    pub fn name(&self) -> &'static str {
        match self {
            Section::Table => "table",
            Section::Equivalences => "equivalences",
            Section::Dot => "dot",
        }
    }

    /// Looks up a section by its name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|section| section.name() == name)
    }
}

/// Determines what a [`Report`] contains and how it looks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// The sections to render, in this order.
    pub sections: Vec<Section>,
    /// Whether to highlight states in the transition table with ANSI colors.
    pub colored: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            sections: Section::ALL.to_vec(),
            colored: false,
        }
    }
}

/// A textual report on a determinized automaton.
#[derive(Debug, Clone)]
pub struct Report<'a> {
    dfa: &'a DFA,
    options: &'a ReportOptions,
}

impl<'a> Report<'a> {
    /// Creates a report on `dfa`.
    pub fn new(dfa: &'a DFA, options: &'a ReportOptions) -> Self {
        Self { dfa, options }
    }

    fn render_section(&self, section: Section) -> String {
        debug!("rendering section {}", section.name());
        match section {
            Section::Table => format!(
                "Table:\n{}",
                transition_table(self.dfa, self.options.colored)
            ),
            Section::Equivalences => equivalence_report(self.dfa),
            Section::Dot => self.dfa.dot_representation(),
        }
    }

    /// Renders the selected sections separated by blank lines. The result ends with a newline
    /// unless no section was selected.
    pub fn render(&self) -> String {
        let body = self
            .options
            .sections
            .iter()
            .map(|&section| self.render_section(section))
            .join("\n\n");
        if body.is_empty() {
            body
        } else {
            body + "\n"
        }
    }
}

/// Reads an automaton from `input`, determinizes it and renders the report selected by
/// `options`.
pub fn determinize_and_report(
    input: &str,
    options: &ReportOptions,
) -> Result<String, ParseError> {
    let nfa: NFA = input.parse()?;
    info!(
        "read automaton with {} states over {} symbols",
        nfa.size(),
        nfa.alphabet_size() - 1
    );

    let start = std::time::Instant::now();
    let dfa = nfa.determinize();
    info!(
        "determinization produced {} states and took {}µs",
        dfa.size(),
        start.elapsed().as_micros()
    );

    Ok(Report::new(&dfa, options).render())
}
