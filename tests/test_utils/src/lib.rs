//! Grammar descriptions and a table-driven recognizer shared by the scenario tests

use slr_core::{Action, ParseTable};

pub const ARITHMETIC: &str = r#"
# Expressions with the usual precedence
term = ['+', '*', '(', ')', 'id']
non_term = [E, T, F]
init = E
eof = $

E -> E + T | T
T -> T * F | F
F -> ( E ) | id
"#;

pub const NESTED_LISTS: &str = r#"
term = ['(', ')', 'x', ',']
non_term = [S, L]
init = S
eof = $

S -> (L) | x
L -> S | L,S
"#;

pub const DANGLING_ELSE: &str = r#"
term = ['if', 'else', 'other']
non_term = [S]
init = S
eof = $

S -> if S | if S else S | other
"#;

pub const DUPLICATE_REDUCTIONS: &str = r#"
term = ['a', 'b']
non_term = [S, A, B]
init = S
eof = $

S -> A b | B b
A -> a
B -> a
"#;

pub const UNDECLARED_SYMBOL: &str = r#"
term = ['a']
non_term = [S]
init = S
eof = $

S -> a S | a c
"#;

pub const MISSING_START_RULE: &str = r#"
term = ['a']
non_term = [S, A]
init = S
eof = $

A -> a
"#;

/// Run a table-driven LR parse over `tokens`, which must end with the end marker
///
/// Returns the position of the offending token if the table rejects the input.
pub fn recognize(parse_table: &ParseTable, tokens: &[&str]) -> Result<(), usize> {
    let mut stack = vec![1];
    let mut pos = 0;
    loop {
        let state = *stack.last().ok_or(pos)?;
        let lookahead = *tokens.get(pos).ok_or(pos)?;
        match parse_table.action(state, lookahead) {
            Some(Action::Shift(next)) => {
                stack.push(next);
                pos += 1;
            }
            Some(Action::Reduce(rule_idx)) => {
                let rule = parse_table.grammar.rule(rule_idx);
                let len = stack.len().checked_sub(rule.rhs.len()).ok_or(pos)?;
                stack.truncate(len);
                let top = *stack.last().ok_or(pos)?;
                let next = parse_table.goto(top, &rule.lhs).ok_or(pos)?;
                stack.push(next);
            }
            Some(Action::Accept) => return Ok(()),
            None => return Err(pos),
        }
    }
}

/// Split a whitespace separated token string
pub fn tokens(input: &str) -> Vec<&str> {
    input.split_whitespace().collect()
}
