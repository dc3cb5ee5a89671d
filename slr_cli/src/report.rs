use std::fmt;

use slr_core::{Action, ConflictKind, ParseTable, Symbol};

/// Listing of the grammar, its FIRST/FOLLOW sets and the LR(0) states
pub struct StatesReport<'t>(pub &'t ParseTable);

impl<'t> fmt::Display for StatesReport<'t> {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        let parse_table = self.0;
        let grammar = &parse_table.grammar;

        writeln!(f, "{}", grammar.grammar())?;

        writeln!(f, "FIRST sets:")?;
        for (symbol, first) in parse_table.first_sets.iter() {
            if let Symbol::Nonterminal(n) = symbol {
                writeln!(f, "  FIRST({}) = {}", n, first)?;
            }
        }

        writeln!(f, "\nFOLLOW sets:")?;
        for (n, follow) in parse_table.follow_sets.iter() {
            let terminals: Vec<&str> = follow.iter().map(String::as_str).collect();
            writeln!(f, "  FOLLOW({}) = {{{}}}", n, terminals.join(", "))?;
        }

        write!(f, "\nLR(0) states:")?;
        for (number, item_set) in parse_table.automaton.states() {
            write!(f, "\nState {}:", number)?;
            for item in item_set {
                write!(f, "\n    [{}]", item.augmented_rule_string(grammar))?;
            }
            for (symbol, target) in parse_table.automaton.transitions(number) {
                write!(f, "\n    on {} go to {}", symbol, target)?;
            }
        }
        Ok(())
    }
}

/// Conflict diagnostics, shift/reduce conflicts first
pub struct ConflictReport<'t>(pub &'t ParseTable);

impl<'t> fmt::Display for ConflictReport<'t> {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        let parse_table = self.0;
        write!(
            f,
            "Grammar is not SLR(1): {} conflict(s)",
            parse_table.conflicts.len()
        )?;

        for (kind, heading) in &[
            (ConflictKind::ShiftReduce, "Shift/reduce conflicts:"),
            (ConflictKind::ReduceReduce, "Reduce/reduce conflicts:"),
        ] {
            let mut conflicts = parse_table
                .conflicts
                .iter()
                .filter(|conflict| conflict.kind == *kind)
                .peekable();
            if conflicts.peek().is_none() {
                continue;
            }

            write!(f, "\n\n{}", heading)?;
            for conflict in conflicts {
                write!(
                    f,
                    "\n  State {}, symbol '{}': {} vs {}",
                    conflict.state,
                    conflict.symbol,
                    Described(conflict.existing),
                    Described(conflict.attempted)
                )?;
                for rule_idx in conflict.rules() {
                    write!(
                        f,
                        "\n    production {}: {}",
                        rule_idx,
                        parse_table.grammar.rule(rule_idx)
                    )?;
                }
            }
        }
        Ok(())
    }
}

struct Described(Action);

impl fmt::Display for Described {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self.0 {
            Action::Shift(state) => write!(f, "shift to {}", state),
            Action::Reduce(rule_idx) => write!(f, "reduce by {}", rule_idx),
            Action::Accept => write!(f, "accept"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const ASSIGNMENTS: &str = "
        term = ['=', '*', 'id']
        non_term = [S, L, R]
        init = S
        eof = $
        S -> L = R | R
        L -> * R | id
        R -> L
    ";

    #[test]
    fn test_conflict_report_names_productions() {
        let parse_table = slr_grammar::generate_parse_table(ASSIGNMENTS).unwrap();
        let report = format!("{}", ConflictReport(&parse_table));
        assert!(report.starts_with("Grammar is not SLR(1): 1 conflict(s)"));
        assert!(report.contains("Shift/reduce conflicts:"));
        assert!(!report.contains("Reduce/reduce conflicts:"));
        assert!(report.contains("symbol '='"));
        assert!(report.contains("vs reduce by 5"));
        assert!(report.contains("production 5: R -> L"));
    }

    #[test]
    fn test_states_report_lists_items() {
        let parse_table = slr_grammar::generate_parse_table(ASSIGNMENTS).unwrap();
        let report = format!("{}", StatesReport(&parse_table));
        assert!(report.contains("State 1:"));
        assert!(report.contains("[S' -> • S $]"));
        assert!(report.contains("FOLLOW(R) = {$, =}"));
        assert!(report.contains("FIRST(S) = {*, id}"));
    }
}
