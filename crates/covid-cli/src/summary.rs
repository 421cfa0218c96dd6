use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use covid_cli::types::{DatasetResult, ExtractSummary};

pub fn print_extract(summary: &ExtractSummary) {
    println!("Input: {}", summary.input.display());
    match &summary.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: (dry run)"),
    }
    let table = summary_table(std::slice::from_ref(summary));
    println!("{table}");
}

pub fn print_summary(result: &DatasetResult) {
    println!("Dataset: {}", result.input_dir.display());
    println!("Output: {}", result.output_dir.display());
    let table = summary_table(&result.extracts);
    println!("{table}");
    if !result.unclassified.is_empty() {
        println!("Skipped (unrecognized file name):");
        for path in &result.unclassified {
            println!("- {}", file_name(path));
        }
    }
    let failures: Vec<&ExtractSummary> = result.extracts.iter().filter(|s| s.failed()).collect();
    if !failures.is_empty() {
        eprintln!("Errors:");
        for summary in failures {
            eprintln!(
                "- {}: {}",
                file_name(&summary.input),
                summary.error.as_deref().unwrap_or_default()
            );
        }
    }
}

fn summary_table(summaries: &[ExtractSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Kind"),
        header_cell("Input"),
        header_cell("Rows in"),
        header_cell("Rows out"),
        header_cell("Duplicates"),
        header_cell("Severe"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    align_column(&mut table, 6, CellAlignment::Center);

    let mut total_in = 0usize;
    let mut total_out = 0usize;
    for summary in summaries {
        total_in += summary.rows_in;
        total_out += summary.rows_out;
        table.add_row(vec![
            kind_cell(summary),
            Cell::new(file_name(&summary.input)),
            Cell::new(summary.rows_in),
            Cell::new(summary.rows_out),
            count_cell(Some(summary.duplicates_removed()), Color::Yellow),
            count_cell(summary.severe, Color::Red),
            status_cell(summary),
        ]);
    }
    if summaries.len() > 1 {
        table.add_row(vec![
            Cell::new("TOTAL")
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
            dim_cell("-"),
            Cell::new(total_in).add_attribute(Attribute::Bold),
            Cell::new(total_out).add_attribute(Attribute::Bold),
            count_cell(Some(total_in.saturating_sub(total_out)), Color::Yellow)
                .add_attribute(Attribute::Bold),
            dim_cell("-"),
            dim_cell("-"),
        ]);
    }
    table
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn kind_cell(summary: &ExtractSummary) -> Cell {
    Cell::new(summary.kind)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn status_cell(summary: &ExtractSummary) -> Cell {
    if summary.failed() {
        Cell::new("FAILED")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    } else if summary.output.is_some() {
        Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        dim_cell("dry run")
    }
}

fn count_cell(count: Option<usize>, color: Color) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
