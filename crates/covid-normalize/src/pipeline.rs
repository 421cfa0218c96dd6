//! Stages shared by every normalizer.
//!
//! Each stage consumes one `Table` and returns the next, so the caller's
//! input is never observed mid-transformation.

use covid_model::{NormalizeOptions, RecordKind, Result, Table};

use crate::coerce::coerce_columns;
use crate::dedupe::dedupe_rows;
use crate::schema::{canonicalize_headers, output_columns};
use crate::sentinel::nullify_sentinels;
use crate::{labs, outcomes, patients};

/// Canonicalize headers, nullify sentinels, coerce types and drop duplicate rows.
pub fn clean(kind: RecordKind, table: &Table, options: &NormalizeOptions) -> Result<Table> {
    let table = canonicalize_headers(kind, table.clone(), options)?;
    let table = nullify_sentinels(kind, table);
    let table = coerce_columns(kind, table)?;
    Ok(dedupe_rows(table))
}

/// Keeps the output columns of `kind`, in canonical order.
pub fn project_output(kind: RecordKind, table: Table, options: &NormalizeOptions) -> Table {
    table.select(&output_columns(kind, options))
}

/// Runs the normalizer of `kind`.
pub fn normalize(kind: RecordKind, table: &Table, options: &NormalizeOptions) -> Result<Table> {
    match kind {
        RecordKind::Patients => patients::normalize_patients_with_options(table, options),
        RecordKind::Tests => labs::normalize_tests_with_options(table, options),
        RecordKind::Outcomes => outcomes::normalize_outcomes_with_options(table, options),
    }
}
