//! Reader for the textual grammar description format

use std::error::Error;

use slr_core as slr;

pub mod error;
pub mod parse;

pub use crate::error::{FormatError, FormatErrorKind};
pub use crate::parse::read_grammar;

/// Read a grammar description and run the whole SLR(1) pipeline on it
///
/// Fails on malformed text or an invalid grammar. A table with conflicts is still returned, check
/// `ParseTable::is_slr1`.
pub fn generate_parse_table(text: &str) -> Result<slr::ParseTable, Box<dyn Error>> {
    let grammar = parse::read_grammar(text)?;
    let parse_table = slr::ParseTable::generate(grammar)?;
    Ok(parse_table)
}
