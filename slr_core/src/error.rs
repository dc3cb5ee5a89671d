use std::error::Error;
use std::fmt;

use crate::Rule;

/// A single well-formedness problem found by `Grammar::validate`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarProblem {
    MissingStartRule { start: String },
    UndeclaredSymbol { symbol: String, rule: Rule },
    UndeclaredLhs { rule: Rule },
    OverlappingSymbols(Vec<String>),
    EndMarkerIsNonterminal { end: String },
}

impl fmt::Display for GrammarProblem {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            GrammarProblem::MissingStartRule { start } => {
                write!(f, "No productions for start symbol '{}'", start)
            }
            GrammarProblem::UndeclaredSymbol { symbol, rule } => write!(
                f,
                "Symbol '{}' in production '{}' is not declared",
                symbol, rule
            ),
            GrammarProblem::UndeclaredLhs { rule } => write!(
                f,
                "Left-hand side of production '{}' is not a declared nonterminal",
                rule
            ),
            GrammarProblem::OverlappingSymbols(names) => write!(
                f,
                "Symbols declared both as terminals and nonterminals: {}",
                names.join(", ")
            ),
            GrammarProblem::EndMarkerIsNonterminal { end } => {
                write!(f, "End marker '{}' is declared as a nonterminal", end)
            }
        }
    }
}

#[derive(Debug)]
pub enum GenerationError {
    InvalidGrammar(Vec<GrammarProblem>),
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            GenerationError::InvalidGrammar(problems) => {
                write!(f, "Invalid grammar:")?;
                for problem in problems {
                    write!(f, "\n  - {}", problem)?;
                }
                Ok(())
            }
        }
    }
}

impl Error for GenerationError {}
