use std::error::Error;
use std::fs::File;

use prettytable as pt;
use prettytable::cell;
use prettytable::row;

use crate::parse::{self, GrammarSource};

pub fn print_table(source: &GrammarSource) -> Result<(), Box<dyn Error>> {
    let parse_table = parse::generate_slr1_table(source)?;
    let pretty_table = generate_pretty_table(&parse_table);
    println!("{}", pretty_table);
    Ok(())
}

pub fn write_table_csv(source: &GrammarSource, csv_filename: &str) -> Result<(), Box<dyn Error>> {
    let parse_table = parse::generate_slr1_table(source)?;
    let pretty_table = generate_pretty_table(&parse_table);
    let csv_file = File::create(csv_filename)?;
    pretty_table.to_csv(csv_file)?;
    Ok(())
}

/// ACTION columns for every terminal, then GOTO columns for every nonterminal except the
/// synthetic start symbol
fn generate_pretty_table(parse_table: &slr_core::ParseTable) -> pt::Table {
    let grammar = &parse_table.grammar;
    let terminals = grammar.grammar().terminals();
    let nonterminals: Vec<&String> = grammar
        .grammar()
        .nonterminals()
        .iter()
        .filter(|n| n.as_str() != grammar.start())
        .collect();

    let mut table = pt::Table::new();

    let mut title_row = row!["#", "LR(0) item set"];
    for t in terminals {
        title_row.add_cell(cell!(t));
    }
    for n in nonterminals.iter() {
        title_row.add_cell(cell!(n));
    }
    table.add_row(title_row);

    for (number, item_set) in parse_table.automaton.states() {
        let items: Vec<String> = item_set
            .iter()
            .map(|item| item.augmented_rule_string(grammar))
            .collect();
        let state = parse_table.state(number);

        let mut row = row![number, items.join("\n")];

        for t in terminals {
            row.add_cell(cell![state
                .action_map
                .get(t)
                .map_or("".to_owned(), |a| format!("{}", a))]);
        }

        for n in nonterminals.iter() {
            row.add_cell(cell![state
                .goto_map
                .get(n.as_str())
                .map_or("".to_owned(), |target| format!("{}", target))]);
        }

        table.add_row(row);
    }

    table
}
