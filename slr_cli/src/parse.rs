use std::error::Error;
use std::fmt;
use std::fs;

use clap::ArgMatches;
use log::info;

use slr_core::ParseTable;

use crate::report;

/// Where the grammar description comes from
pub enum GrammarSource<'a> {
    File(&'a str),
    Inline(&'a str),
}

impl<'a> GrammarSource<'a> {
    pub fn from_matches(matches: &'a ArgMatches) -> Result<Self, CliError> {
        if let Some(filename) = matches.value_of("file") {
            Ok(GrammarSource::File(filename))
        } else if let Some(text) = matches.value_of("grammar") {
            Ok(GrammarSource::Inline(text))
        } else {
            Err(CliError::MissingGrammar)
        }
    }

    fn read(&self) -> Result<String, Box<dyn Error>> {
        match self {
            GrammarSource::File(filename) => {
                let text = fs::read_to_string(filename)?;
                info!("loaded grammar from {}", filename);
                Ok(text)
            }
            GrammarSource::Inline(text) => Ok((*text).to_owned()),
        }
    }
}

/// Load a grammar and run the pipeline on it
///
/// The returned table may still contain conflicts.
pub fn generate_parse_table(source: &GrammarSource) -> Result<ParseTable, Box<dyn Error>> {
    let text = source.read()?;
    slr_grammar::generate_parse_table(&text)
}

/// Load a grammar and make sure it is SLR(1)
///
/// Prints the conflict report to stderr if it is not.
pub fn generate_slr1_table(source: &GrammarSource) -> Result<ParseTable, Box<dyn Error>> {
    let parse_table = generate_parse_table(source)?;
    if !parse_table.is_slr1() {
        eprintln!("{}", report::ConflictReport(&parse_table));
        return Err(Box::new(CliError::NotSlr1(parse_table.conflicts.len())));
    }
    Ok(parse_table)
}

#[derive(Debug)]
pub enum CliError {
    MissingGrammar,
    NotSlr1(usize),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            CliError::MissingGrammar => write!(
                f,
                "No grammar given\nHint: pass a grammar file or an inline grammar with --grammar."
            ),
            CliError::NotSlr1(count) => write!(
                f,
                "Grammar is not SLR(1) ({} conflict(s)), no parse table generated",
                count
            ),
        }
    }
}

impl Error for CliError {}
