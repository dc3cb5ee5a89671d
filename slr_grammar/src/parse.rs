use combine::parser::char::spaces;
use combine::{between, choice, eof, many1, satisfy, sep_end_by, token};
use combine::{ParseError, Parser, Stream};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use slr_core as slr;

use crate::error::{FormatError, FormatErrorKind};

lazy_static! {
    static ref IDENT: Regex = Regex::new(r"\w+").unwrap();
}

const TERMINALS_HEADER: &str = "term = [...]";
const NONTERMINALS_HEADER: &str = "non_term = [...]";
const START_HEADER: &str = "init = <symbol>";
const END_HEADER: &str = "eof = <symbol>";

/// Alternatives spelling out an empty right-hand side
const EPSILON_KEYWORDS: [&str; 2] = ["vazio", "epsilon"];

/// Read a grammar description
///
/// The text starts with four header lines (terminals, nonterminals, start symbol, end marker),
/// followed by production lines `A -> x y | z`. Blank lines and lines starting with `#` are
/// ignored. The returned grammar is not validated yet.
pub fn read_grammar(text: &str) -> Result<slr::Grammar, FormatError> {
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .collect();

    if lines.len() < 4 {
        return Err(FormatError::global(FormatErrorKind::TooFewHeaderLines));
    }

    let (line, content) = lines[0];
    let value = header_value(line, content, TERMINALS_HEADER)?;
    let terminals = terminal_list()
        .parse(value)
        .map(|(terminals, _)| terminals)
        .map_err(|_| FormatError::at(line, content, FormatErrorKind::InvalidTerminalList))?;
    if terminals.is_empty() {
        return Err(FormatError::at(line, content, FormatErrorKind::EmptyTerminals));
    }

    let (line, content) = lines[1];
    let value = header_value(line, content, NONTERMINALS_HEADER)?;
    let nonterminals: Vec<String> = IDENT
        .find_iter(value)
        .map(|m| m.as_str().to_owned())
        .collect();
    if nonterminals.is_empty() {
        return Err(FormatError::at(line, content, FormatErrorKind::EmptyNonterminals));
    }

    let (line, content) = lines[2];
    let start = required_header_value(line, content, START_HEADER)?;

    let (line, content) = lines[3];
    let end = required_header_value(line, content, END_HEADER)?;

    let mut productions = Vec::new();
    for &(line, content) in &lines[4..] {
        productions.extend(production_line(line, content, &terminals)?);
    }
    if productions.is_empty() {
        return Err(FormatError::global(FormatErrorKind::NoProductions));
    }

    debug!(
        "read grammar with {} terminal(s), {} nonterminal(s) and {} production(s)",
        terminals.len(),
        nonterminals.len(),
        productions.len()
    );

    Ok(slr::Grammar::new(
        terminals,
        nonterminals,
        start.to_owned(),
        end.to_owned(),
        productions,
    ))
}

fn header_value<'a>(
    line: usize,
    content: &'a str,
    expected: &'static str,
) -> Result<&'a str, FormatError> {
    let mut parts = content.splitn(2, '=');
    parts.next();
    match parts.next() {
        Some(value) => Ok(value.trim()),
        None => Err(FormatError::at(
            line,
            content,
            FormatErrorKind::MissingEquals { expected },
        )),
    }
}

fn required_header_value<'a>(
    line: usize,
    content: &'a str,
    expected: &'static str,
) -> Result<&'a str, FormatError> {
    let value = header_value(line, content, expected)?;
    if value.is_empty() {
        return Err(FormatError::at(
            line,
            content,
            FormatErrorKind::EmptyHeaderValue { expected },
        ));
    }
    Ok(value)
}

/// Split `A -> x | y` into one production per alternative
fn production_line(
    line: usize,
    content: &str,
    terminals: &[String],
) -> Result<Vec<(String, Vec<String>)>, FormatError> {
    let mut sides = content.splitn(2, "->");
    let lhs = sides.next().unwrap_or_default().trim();
    let rhs = match sides.next() {
        Some(rhs) => rhs.trim(),
        None => return Err(FormatError::at(line, content, FormatErrorKind::MissingArrow)),
    };
    if lhs.is_empty() {
        return Err(FormatError::at(line, content, FormatErrorKind::EmptyLhs));
    }

    Ok(rhs
        .split('|')
        .map(|alternative| (lhs.to_owned(), alternative_symbols(alternative, terminals)))
        .collect())
}

/// Symbols of a single alternative
///
/// Alternatives containing whitespace are split at whitespace. Otherwise the alternative is
/// segmented by longest match against the declared terminals. Surrounding quotes are stripped.
fn alternative_symbols(alternative: &str, terminals: &[String]) -> Vec<String> {
    let alternative = alternative.trim();
    if alternative.is_empty() || EPSILON_KEYWORDS.contains(&alternative) {
        return Vec::new();
    }

    let tokens = if alternative.contains(char::is_whitespace) {
        alternative.split_whitespace().map(str::to_owned).collect()
    } else {
        segment(alternative, terminals)
    };

    tokens.into_iter().map(strip_quotes).collect()
}

fn segment(alternative: &str, terminals: &[String]) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut rest = alternative;

    while let Some(c) = rest.chars().next() {
        // A quoted run is a single token
        if c == '"' || c == '\'' {
            if let Some(close) = rest[1..].find(c) {
                flush(&mut current, &mut tokens);
                tokens.push(rest[..close + 2].to_owned());
                rest = &rest[close + 2..];
                continue;
            }
        }

        let longest = terminals
            .iter()
            .filter(|t| !t.is_empty() && rest.starts_with(t.as_str()))
            .max_by_key(|t| t.len());
        match longest {
            Some(t) => {
                flush(&mut current, &mut tokens);
                tokens.push(t.clone());
                rest = &rest[t.len()..];
            }
            None => {
                current.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }
    flush(&mut current, &mut tokens);

    tokens
}

fn flush(current: &mut String, tokens: &mut Vec<String>) {
    if !current.is_empty() {
        tokens.push(std::mem::replace(current, String::new()));
    }
}

fn strip_quotes(token: String) -> String {
    for quote in &['"', '\''] {
        if token.len() >= 2 && token.starts_with(*quote) && token.ends_with(*quote) {
            return token[1..token.len() - 1].to_owned();
        }
    }
    token
}

fn terminal_list<I>() -> impl Parser<Input = I, Output = Vec<String>>
where
    I: Stream<Item = char>,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
{
    (
        spaces(),
        between(
            token('[').skip(spaces()),
            token(']').skip(spaces()),
            sep_end_by::<Vec<String>, _, _>(
                quoted_literal().skip(spaces()),
                token(',').skip(spaces()),
            ),
        ),
        eof(),
    )
        .map(|(_, terminals, _)| terminals)
}

fn quoted_literal<I>() -> impl Parser<Input = I, Output = String>
where
    I: Stream<Item = char>,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
{
    choice((
        between(
            token('"'),
            token('"'),
            many1::<String, _>(satisfy(|c: char| c != '"')),
        ),
        between(
            token('\''),
            token('\''),
            many1::<String, _>(satisfy(|c: char| c != '\'')),
        ),
    ))
}
