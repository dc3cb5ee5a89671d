use std::error::Error;
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

use crate::parse::{self, GrammarSource};

pub fn write_graphviz_graph(
    source: &GrammarSource,
    output_filename: &str,
) -> Result<(), Box<dyn Error>> {
    let parse_table = parse::generate_parse_table(source)?;
    let graphviz_string = render_graphviz_graph(&parse_table);
    fs::write(output_filename, graphviz_string)?;
    Ok(())
}

pub fn show_graphviz_graph(source: &GrammarSource) -> Result<(), Box<dyn Error>> {
    let parse_table = parse::generate_parse_table(source)?;
    let graphviz_string = render_graphviz_graph(&parse_table);
    // We need the tempfile filename in order to open it with an associated application
    let mut temp_file = NamedTempFile::new()?;
    let path = temp_file.path().with_extension("dot");
    write!(temp_file, "{}", graphviz_string)?;
    temp_file.persist(&path)?;
    open::that(&path)?;
    Ok(())
}

/// Render the LR(0) automaton, one HTML table per state
///
/// Items with the dot at the end are underlined, as they produce reduce actions.
fn render_graphviz_graph(parse_table: &slr_core::ParseTable) -> String {
    let grammar = &parse_table.grammar;
    let mut lines = Vec::new();
    lines.push("digraph lr0_states {".to_owned());
    for (number, item_set) in parse_table.automaton.states() {
        let table_rows: Vec<String> = item_set
            .iter()
            .map(|item| {
                let mut item_string = escape_html(&item.augmented_rule_string(grammar));
                if item.is_pos_at_end(grammar) {
                    item_string = format!("<U>{}</U>", item_string);
                }
                format!("      <TR><TD>{}</TD></TR>", item_string)
            })
            .collect();
        let table_row_string = table_rows.join("\n");
        let table_head = format!("      <TR><TD><B>State #{}</B></TD></TR>", number);
        let line = format!(
            r#"  State{} [shape=plain label=<
    <TABLE BORDER="0" CELLBORDER="1" CELLSPACING="0">
{}
{}
    </TABLE>
  >];"#,
            number, table_head, table_row_string
        );
        lines.push(line);
        for (symbol, target) in parse_table.automaton.transitions(number) {
            lines.push(format!(
                r#"  State{} -> State{} [label="{}"];"#,
                number,
                target,
                escape_label(symbol.name())
            ));
        }
    }
    lines.push("}".to_owned());
    lines.join("\n")
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn escape_label(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
