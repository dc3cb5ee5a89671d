//! Grammars shared by the unit tests

use crate::Grammar;

/// Build a grammar from whitespace separated symbol lists and `lhs -> rhs` rule strings
///
/// The end marker is always `$`. A rule with nothing after the arrow is an ε-production.
pub(crate) fn grammar(terminals: &str, nonterminals: &str, start: &str, rules: &[&str]) -> Grammar {
    let words = |s: &str| -> Vec<String> { s.split_whitespace().map(str::to_owned).collect() };
    let productions = rules
        .iter()
        .map(|rule| {
            let mut sides = rule.splitn(2, "->");
            let lhs = sides.next().unwrap_or_default().trim().to_owned();
            let rhs = words(sides.next().unwrap_or_default());
            (lhs, rhs)
        })
        .collect();
    Grammar::new(
        words(terminals),
        words(nonterminals),
        start.to_owned(),
        "$".to_owned(),
        productions,
    )
}

pub(crate) fn arithmetic() -> Grammar {
    grammar(
        "+ * ( ) id",
        "E T F",
        "E",
        &[
            "E -> E + T",
            "E -> T",
            "T -> T * F",
            "T -> F",
            "F -> ( E )",
            "F -> id",
        ],
    )
}

pub(crate) fn nested_lists() -> Grammar {
    grammar(
        "( ) x ,",
        "S L",
        "S",
        &["S -> ( L )", "S -> x", "L -> S", "L -> L , S"],
    )
}

pub(crate) fn optional_suffixes() -> Grammar {
    grammar(
        "a b c",
        "S A B",
        "S",
        &["S -> A B c", "A -> a", "A ->", "B -> b", "B ->"],
    )
}

/// Classic `L = R` grammar, LALR(1) but not SLR(1)
pub(crate) fn assignments() -> Grammar {
    grammar(
        "= * id",
        "S L R",
        "S",
        &["S -> L = R", "S -> R", "L -> * R", "L -> id", "R -> L"],
    )
}

pub(crate) fn ambiguous_reductions() -> Grammar {
    grammar(
        "a",
        "S A B",
        "S",
        &["S -> A", "S -> B", "A -> a", "B -> a"],
    )
}
