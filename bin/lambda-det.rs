use std::io::{Read, Write};

use lambda_det::prelude::*;

use thiserror::Error;
use tracing::{debug, error, trace};
use tracing_subscriber::{filter, prelude::*};

use clap::{Arg, ArgAction, ArgMatches, Command};

fn cli() -> clap::Command {
    Command::new("lambda-det")
        .about("reads an automaton with silent transitions from stdin, determinizes it and prints the transition table, equivalent input symbols and a DOT graph")
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbosity")
                .num_args(0..=1)
                .require_equals(true)
                .value_parser(["info", "debug", "trace"])
                .default_missing_value("info"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .action(ArgAction::Append)
                .value_parser(Section::ALL.map(|section| section.name()))
                .help("sections to print, in the given order (default: all)"),
        )
        .arg(
            Arg::new("color")
                .long("color")
                .action(ArgAction::SetTrue)
                .help("highlight final and trap states in the transition table"),
        )
}

fn setup_logging(matches: &ArgMatches) {
    let level = match matches
        .try_get_one::<String>("verbosity")
        .ok()
        .flatten()
        .map(|m| m.as_str())
    {
        Some("trace") => filter::LevelFilter::TRACE,
        Some("debug") => filter::LevelFilter::DEBUG,
        Some("info") => filter::LevelFilter::INFO,
        _ => filter::LevelFilter::WARN,
    };

    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();

    trace!("setup {level} logging");
}

fn report_options(matches: &ArgMatches) -> ReportOptions {
    let sections = matches
        .get_many::<String>("output")
        .map(|names| {
            names
                .filter_map(|name| Section::from_name(name))
                .collect::<Vec<_>>()
        })
        .unwrap_or_else(|| Section::ALL.to_vec());

    ReportOptions {
        sections,
        colored: matches.get_flag("color"),
    }
}

#[derive(Debug, Error)]
enum RunError {
    #[error("could not read from stdin: {0}")]
    Read(std::io::Error),
    #[error("could not read automaton: {0}")]
    Parse(#[from] ParseError),
    #[error("could not write report: {0}")]
    Write(std::io::Error),
}

/// Reads an automaton from `input` and writes the report to `output`. Nothing is written if
/// reading or parsing fails.
fn run<R: Read, W: Write>(
    mut input: R,
    output: &mut W,
    options: &ReportOptions,
) -> Result<(), RunError> {
    let mut text = String::new();
    input.read_to_string(&mut text).map_err(RunError::Read)?;

    let report = determinize_and_report(&text, options)?;
    output
        .write_all(report.as_bytes())
        .and_then(|_| output.flush())
        .map_err(RunError::Write)
}

pub fn main() {
    let matches = cli().get_matches();

    setup_logging(&matches);
    let options = report_options(&matches);
    debug!("using {:?}", options);

    debug!("reading automaton from stdin");
    if let Err(e) = run(std::io::stdin().lock(), &mut std::io::stdout().lock(), &options) {
        error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_consistent() {
        cli().debug_assert();
    }

    struct BrokenInput;

    impl Read for BrokenInput {
        fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "stream closed",
            ))
        }
    }

    #[test_log::test]
    fn report_is_written_for_valid_input() {
        let input = "2 1\n1 1 b\n0 0\n0\n";
        let options = ReportOptions::default();
        let mut output = Vec::new();
        run(input.as_bytes(), &mut output, &options).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            determinize_and_report(input, &options).unwrap()
        );
    }

    #[test_log::test]
    fn failures_leave_output_empty() {
        let options = ReportOptions::default();

        let mut output = Vec::new();
        let result = run("2 1 0 1".as_bytes(), &mut output, &options);
        assert!(matches!(
            result,
            Err(RunError::Parse(ParseError::UnexpectedEnd { .. }))
        ));
        assert!(output.is_empty());

        let result = run("1 0 1 7".as_bytes(), &mut output, &options);
        assert_eq!(
            result.unwrap_err().to_string(),
            "could not read automaton: initial state 7 is out of range, there are only 1 states"
        );
        assert!(output.is_empty());

        let result = run(BrokenInput, &mut output, &options);
        assert!(matches!(result, Err(RunError::Read(_))));
        assert!(output.is_empty());
    }

    #[test]
    fn output_sections_are_collected_in_order() {
        let matches = cli().get_matches_from(["lambda-det", "-o", "dot", "--output", "table"]);
        assert_eq!(
            report_options(&matches),
            ReportOptions {
                sections: vec![Section::Dot, Section::Table],
                colored: false,
            }
        );

        let matches = cli().get_matches_from(["lambda-det", "--color"]);
        assert_eq!(
            report_options(&matches),
            ReportOptions {
                sections: Section::ALL.to_vec(),
                colored: true,
            }
        );
    }
}
