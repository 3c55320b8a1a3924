use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use repair_model::{ActionKind, IssueKind};

use crate::commands::RunResult;

pub fn print_summary(result: &RunResult) {
    println!(
        "Input:  {} ({} rows)",
        result.input.display(),
        result.rows_in
    );
    println!(
        "Output: {} ({} rows)",
        result.output.display(),
        result.rows_out
    );
    println!("Change log: {}", result.log.display());

    let mut table = Table::new();
    table.set_header(vec![header_cell("Action"), header_cell("Records")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let actions = [
        ActionKind::Corrected,
        ActionKind::Deduplicated,
        ActionKind::Enriched,
        ActionKind::Derived,
    ];
    let mut total = 0usize;
    for action in actions {
        let count = result.counts.get(&action).copied().unwrap_or(0);
        total += count;
        table.add_row(vec![Cell::new(action), Cell::new(count)]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    if result.status.is_converged() {
        println!("Converged after {} iteration(s).", result.iterations);
    } else {
        eprintln!(
            "warning: issues remain after {} iteration(s); best-effort output written",
            result.iterations
        );
        print_unresolved_table(result);
    }
}

fn print_unresolved_table(result: &RunResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Issue"),
        header_cell("Rows"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for ((column, kind), rows) in result.unresolved.grouped_by_column() {
        table.add_row(vec![
            Cell::new(column),
            issue_cell(kind),
            Cell::new(rows.len()),
        ]);
    }
    if !result.unresolved.duplicates.is_empty() {
        table.add_row(vec![
            Cell::new("(row)"),
            Cell::new("duplicate").fg(Color::Yellow),
            Cell::new(result.unresolved.duplicates.len()),
        ]);
    }
    println!("{table}");
}

fn issue_cell(kind: IssueKind) -> Cell {
    let color = match kind {
        IssueKind::Missing => Color::Yellow,
        IssueKind::Malformed | IssueKind::Implausible => Color::Red,
        IssueKind::NonCanonical => Color::Blue,
    };
    Cell::new(kind).fg(color)
}

pub fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
