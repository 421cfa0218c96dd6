use std::collections::BTreeSet;

use covid_model::Table;

/// Removes rows identical to an earlier row, keeping first occurrences in order.
pub fn dedupe_rows(table: Table) -> Table {
    let before = table.height();
    let mut seen = BTreeSet::new();
    let rows: Vec<_> = table
        .rows
        .into_iter()
        .filter(|row| seen.insert(row.clone()))
        .collect();
    tracing::debug!(removed = before - rows.len(), kept = rows.len(), "deduplicated rows");
    Table {
        columns: table.columns,
        rows,
    }
}
