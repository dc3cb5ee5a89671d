use std::error::Error;
use std::process;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use log::LevelFilter;

mod graphviz;
mod parse;
mod report;
mod table;

use crate::parse::{CliError, GrammarSource};

fn main() {
    if let Err(err) = cli() {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

fn grammar_args<'a, 'b>() -> [Arg<'a, 'b>; 2] {
    [
        Arg::with_name("file")
            .help("Grammar description file")
            .required_unless("grammar")
            .conflicts_with("grammar"),
        Arg::with_name("grammar")
            .long("grammar")
            .short("g")
            .takes_value(true)
            .help("Grammar description given inline"),
    ]
}

fn cli() -> Result<(), Box<dyn Error>> {
    let matches = App::new("slr")
        .about("SLR(1) parse table generator")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::with_name("verbose")
                .long("verbose")
                .short("v")
                .global(true)
                .help("Log the progress of every phase"),
        )
        .subcommand(
            SubCommand::with_name("check")
                .args(&grammar_args())
                .about("Checks whether a grammar is SLR(1)"),
        )
        .subcommand(
            SubCommand::with_name("states")
                .args(&grammar_args())
                .about("Prints FIRST/FOLLOW sets and the LR(0) states of a grammar"),
        )
        .subcommand(
            SubCommand::with_name("table")
                .args(&grammar_args())
                .arg(
                    Arg::with_name("csv")
                        .long("csv")
                        .takes_value(true)
                        .help("Write the parse table to a specified CSV file"),
                )
                .about("Prints the SLR(1) parse table of a grammar"),
        )
        .subcommand(
            SubCommand::with_name("graph")
                .args(&grammar_args())
                .arg(
                    Arg::with_name("output")
                        .long("output")
                        .short("o")
                        .takes_value(true)
                        .help("Write the generated graphviz graph to a file (*.dot)"),
                )
                .about("Outputs a graphviz graph showing the LR(0) states of a grammar"),
        )
        .setting(AppSettings::ArgRequiredElseHelp)
        .get_matches();

    init_logging(&matches);

    if let Some(check_opts) = matches.subcommand_matches("check") {
        let source = GrammarSource::from_matches(check_opts)?;
        let parse_table = parse::generate_slr1_table(&source)?;
        println!(
            "Grammar is SLR(1): {} states, {} productions",
            parse_table.automaton.len(),
            parse_table.grammar.rules().len()
        );
    }

    if let Some(states_opts) = matches.subcommand_matches("states") {
        let source = GrammarSource::from_matches(states_opts)?;
        let parse_table = parse::generate_parse_table(&source)?;
        println!("{}", report::StatesReport(&parse_table));
        if !parse_table.is_slr1() {
            eprintln!("{}", report::ConflictReport(&parse_table));
            return Err(Box::new(CliError::NotSlr1(parse_table.conflicts.len())));
        }
    }

    if let Some(table_opts) = matches.subcommand_matches("table") {
        let source = GrammarSource::from_matches(table_opts)?;
        let csv_file: Option<&str> = table_opts.value_of("csv");

        if let Some(csv_filename) = csv_file {
            table::write_table_csv(&source, csv_filename)?;
        } else {
            table::print_table(&source)?;
        }
    }

    if let Some(graph_opts) = matches.subcommand_matches("graph") {
        let source = GrammarSource::from_matches(graph_opts)?;
        let output_file: Option<&str> = graph_opts.value_of("output");

        if let Some(output_filename) = output_file {
            graphviz::write_graphviz_graph(&source, output_filename)?;
        } else {
            graphviz::show_graphviz_graph(&source)?;
        }
    }

    Ok(())
}

/// `RUST_LOG` wins over `--verbose`
fn init_logging(matches: &ArgMatches) {
    let verbose = matches.is_present("verbose")
        || matches
            .subcommand()
            .1
            .map_or(false, |sub| sub.is_present("verbose"));
    let default_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_filters(&std::env::var("RUST_LOG").unwrap_or_default())
        .init();
}
