use covid_model::{NormalizeOptions, RecordKind, Result, Table};

use crate::pipeline::{clean, project_output};

/// Normalizes a laboratory-test extract with default options.
pub fn normalize_tests(table: &Table) -> Result<Table> {
    normalize_tests_with_options(table, &NormalizeOptions::default())
}

pub fn normalize_tests_with_options(table: &Table, options: &NormalizeOptions) -> Result<Table> {
    let kind = RecordKind::Tests;
    let cleaned = clean(kind, table, options)?;
    let output = project_output(kind, cleaned, options);
    tracing::info!(
        kind = %kind,
        rows_in = table.height(),
        rows_out = output.height(),
        "normalized extract"
    );
    Ok(output)
}
