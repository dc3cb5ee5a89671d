#![cfg(test)]

use matches::assert_matches;
use slr_core::{Action, ConflictKind, GenerationError, GrammarProblem, ParseTable};
use slr_grammar::generate_parse_table;
use test_utils::{recognize, tokens};

fn generation_error(text: &str) -> GenerationError {
    let err = generate_parse_table(text).expect_err("grammar should be rejected");
    *err.downcast::<GenerationError>()
        .expect("rejected by validation, not by the reader")
}

#[test]
fn test_arithmetic_is_slr1_and_accepts() {
    let parse_table = generate_parse_table(test_utils::ARITHMETIC).unwrap();
    assert!(parse_table.is_slr1());

    assert_eq!(recognize(&parse_table, &tokens("id + id * id $")), Ok(()));
    assert_eq!(recognize(&parse_table, &tokens("( id + id ) * id $")), Ok(()));
    assert_eq!(recognize(&parse_table, &tokens("id $")), Ok(()));
}

#[test]
fn test_arithmetic_rejects_malformed_input() {
    let parse_table = generate_parse_table(test_utils::ARITHMETIC).unwrap();
    assert_eq!(recognize(&parse_table, &tokens("id + * id $")), Err(2));
    assert_eq!(recognize(&parse_table, &tokens("( id $")), Err(2));
    assert_eq!(recognize(&parse_table, &tokens("$")), Err(0));
}

#[test]
fn test_nested_lists() {
    let parse_table = generate_parse_table(test_utils::NESTED_LISTS).unwrap();
    assert!(parse_table.is_slr1());
    assert_eq!(recognize(&parse_table, &tokens("( x , ( x ) , x ) $")), Ok(()));
    assert_eq!(recognize(&parse_table, &tokens("( x , ) $")), Err(3));
}

#[test]
fn test_dangling_else_shift_reduce() {
    let parse_table = generate_parse_table(test_utils::DANGLING_ELSE).unwrap();
    assert!(!parse_table.is_slr1());
    assert_eq!(parse_table.conflicts.len(), 1);

    let conflict = &parse_table.conflicts[0];
    assert_eq!(conflict.kind, ConflictKind::ShiftReduce);
    assert_eq!(conflict.symbol, "else");
    assert_matches!(conflict.existing, Action::Shift(_));
    // S -> if S
    assert_eq!(conflict.attempted, Action::Reduce(1));
    assert_eq!(conflict.rules(), vec![1]);
}

#[test]
fn test_duplicate_reductions_reduce_reduce() {
    let parse_table = generate_parse_table(test_utils::DUPLICATE_REDUCTIONS).unwrap();
    assert_eq!(parse_table.conflicts.len(), 1);

    let conflict = &parse_table.conflicts[0];
    assert_eq!(conflict.kind, ConflictKind::ReduceReduce);
    assert_eq!(conflict.symbol, "b");
    assert_eq!(conflict.rules(), vec![3, 4]);
    assert_eq!(format!("{}", parse_table.grammar.rule(3)), "A -> a");
    assert_eq!(format!("{}", parse_table.grammar.rule(4)), "B -> a");
}

#[test]
fn test_undeclared_symbol_is_rejected() {
    match generation_error(test_utils::UNDECLARED_SYMBOL) {
        GenerationError::InvalidGrammar(problems) => {
            assert_eq!(problems.len(), 1);
            assert_matches!(
                &problems[0],
                GrammarProblem::UndeclaredSymbol { symbol, .. } if symbol == "c"
            );
        }
    }
}

#[test]
fn test_missing_start_rule_is_rejected() {
    match generation_error(test_utils::MISSING_START_RULE) {
        GenerationError::InvalidGrammar(problems) => {
            assert_eq!(problems.len(), 1);
            assert_matches!(&problems[0], GrammarProblem::MissingStartRule { .. });
            assert_eq!(
                format!("{}", problems[0]),
                "No productions for start symbol 'S'"
            );
        }
    }
}

#[test]
fn test_pipeline_is_deterministic() {
    for text in &[
        test_utils::ARITHMETIC,
        test_utils::NESTED_LISTS,
        test_utils::DANGLING_ELSE,
        test_utils::DUPLICATE_REDUCTIONS,
    ] {
        let first = generate_parse_table(text).unwrap();
        let second = generate_parse_table(text).unwrap();

        assert_eq!(first.automaton.len(), second.automaton.len());
        for (number, item_set) in first.automaton.states() {
            assert_eq!(item_set, second.automaton.state(number));
            assert_eq!(
                first.automaton.transitions(number),
                second.automaton.transitions(number)
            );
        }
        assert_eq!(first.states, second.states);
        assert_eq!(first.conflicts, second.conflicts);
    }
}

#[test]
fn test_core_pipeline_without_text() {
    let grammar = slr_core::Grammar::validated(
        vec!["a".to_owned()],
        vec!["S".to_owned()],
        "S".to_owned(),
        "$".to_owned(),
        vec![
            ("S".to_owned(), vec!["a".to_owned(), "S".to_owned()]),
            ("S".to_owned(), vec![]),
        ],
    )
    .unwrap();
    let parse_table = ParseTable::generate(grammar).unwrap();
    assert!(parse_table.is_slr1());
    assert_eq!(recognize(&parse_table, &tokens("a a a $")), Ok(()));
    assert_eq!(recognize(&parse_table, &tokens("$")), Ok(()));
}
