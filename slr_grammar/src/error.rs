use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatErrorKind {
    TooFewHeaderLines,
    MissingEquals { expected: &'static str },
    EmptyHeaderValue { expected: &'static str },
    InvalidTerminalList,
    EmptyTerminals,
    EmptyNonterminals,
    MissingArrow,
    EmptyLhs,
    NoProductions,
}

impl fmt::Display for FormatErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            FormatErrorKind::TooFewHeaderLines => write!(
                f,
                "Grammar needs four header lines (terminals, nonterminals, start symbol, end marker)"
            ),
            FormatErrorKind::MissingEquals { expected } => {
                write!(f, "Header line must have the form `{}`", expected)
            }
            FormatErrorKind::EmptyHeaderValue { expected } => {
                write!(f, "Header line `{}` has no value", expected)
            }
            FormatErrorKind::InvalidTerminalList => write!(
                f,
                "Terminals must be a bracketed, comma-separated list of quoted symbols"
            ),
            FormatErrorKind::EmptyTerminals => write!(f, "Terminal list must not be empty"),
            FormatErrorKind::EmptyNonterminals => write!(f, "Nonterminal list must not be empty"),
            FormatErrorKind::MissingArrow => write!(f, "Production must contain '->'"),
            FormatErrorKind::EmptyLhs => write!(f, "Left-hand side of production must not be empty"),
            FormatErrorKind::NoProductions => write!(f, "Grammar must have at least one production"),
        }
    }
}

/// Malformed grammar description
///
/// `line` is the 1-based line number in the input text, if the error can be attributed to a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    pub line: Option<usize>,
    pub content: String,
    pub kind: FormatErrorKind,
}

impl FormatError {
    pub fn at(line: usize, content: &str, kind: FormatErrorKind) -> Self {
        FormatError {
            line: Some(line),
            content: content.to_owned(),
            kind,
        }
    }

    pub fn global(kind: FormatErrorKind) -> Self {
        FormatError {
            line: None,
            content: String::new(),
            kind,
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self.line {
            Some(line) => write!(
                f,
                "Grammar format error on line {}: {}: {}",
                line, self.kind, self.content
            ),
            None => write!(f, "Grammar format error: {}", self.kind),
        }
    }
}

impl Error for FormatError {}
