//! Outcome normalization: cleaning plus the derived severity label.

use covid_model::{CellValue, NormalizeOptions, RecordKind, Result, SeverityClass, Table};

use crate::pipeline::{clean, project_output};
use crate::schema::columns::{
    ENCOUNTER_DATE, ENCOUNTER_TYPE, OUTCOME_DATE, OUTCOME_DESCRIPTION, SEVERITY_CLASS,
};
use crate::severity::SeverityRule;

/// Normalizes an outcome extract with default options.
///
/// Duplicates are removed on the cleaned fields, which include the encounter
/// id and both dates. Two encounters that differ only in those fields both
/// survive, so the projected output may hold identical rows; deduplicating
/// the cleaned table a second time is still a no-op.
pub fn normalize_outcomes(table: &Table) -> Result<Table> {
    normalize_outcomes_with_options(table, &NormalizeOptions::default())
}

pub fn normalize_outcomes_with_options(table: &Table, options: &NormalizeOptions) -> Result<Table> {
    let kind = RecordKind::Outcomes;
    let cleaned = clean(kind, table, options)?;
    let rule = SeverityRule::for_vocabulary(options.vocabulary);
    let durations = derive_duration_days(&cleaned);
    let classes = classify_rows(&cleaned, &durations, &rule);
    let severe = classes.iter().filter(|class| class.is_severe()).count();
    let labels = classes
        .iter()
        .map(|class| CellValue::Text(class.as_str().to_string()))
        .collect();
    let output = project_output(kind, cleaned.with_column(SEVERITY_CLASS, labels), options);
    tracing::info!(
        kind = %kind,
        rows_in = table.height(),
        rows_out = output.height(),
        severe,
        vocabulary = %options.vocabulary,
        "normalized extract"
    );
    Ok(output)
}

/// Whole days from `encounter_date` to `outcome_date` for every row.
///
/// `None` when either date is missing or the columns are absent.
pub fn derive_duration_days(table: &Table) -> Vec<Option<i64>> {
    let encounter = table.column_index(ENCOUNTER_DATE);
    let outcome = table.column_index(OUTCOME_DATE);
    table
        .rows
        .iter()
        .map(|row| {
            let start = row.get(encounter?)?.as_date()?;
            let end = row.get(outcome?)?.as_date()?;
            Some(end.signed_duration_since(start).num_days())
        })
        .collect()
}

fn text_at(row: &[CellValue], idx: Option<usize>) -> &str {
    idx.and_then(|idx| row.get(idx))
        .and_then(CellValue::as_text)
        .unwrap_or_default()
}

fn classify_rows(
    table: &Table,
    durations: &[Option<i64>],
    rule: &SeverityRule,
) -> Vec<SeverityClass> {
    let encounter_type = table.column_index(ENCOUNTER_TYPE);
    let description = table.column_index(OUTCOME_DESCRIPTION);
    table
        .rows
        .iter()
        .zip(durations)
        .map(|(row, &days)| {
            rule.classify(
                days,
                text_at(row, encounter_type),
                text_at(row, description),
            )
        })
        .collect()
}
