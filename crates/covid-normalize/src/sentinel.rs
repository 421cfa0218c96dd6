//! Sentinel codes that stand for "value unknown" in the source extracts.

use covid_model::{CellValue, RecordKind, Table};

use crate::schema::columns::{
    BIRTH_YEAR, CITY, COLLECTION_DATE, COUNTRY, ENCOUNTER_DATE, OUTCOME_DATE, POSTAL_CODE,
    REPORT_DATE, STATE,
};

/// Placeholder written in place of an unknown day/month/year date.
pub const DATE_SENTINEL: &str = "DDMMAA";

const PATIENT_SENTINELS: &[(&str, &[&str])] = &[
    (BIRTH_YEAR, &["AAAA", "YYYY"]),
    (COUNTRY, &["XX"]),
    (STATE, &["UU"]),
    (CITY, &["MMMM"]),
    (POSTAL_CODE, &["CCCC"]),
];

const TEST_SENTINELS: &[(&str, &[&str])] = &[
    (COLLECTION_DATE, &[DATE_SENTINEL]),
    (REPORT_DATE, &[DATE_SENTINEL]),
];

const OUTCOME_SENTINELS: &[(&str, &[&str])] = &[
    (ENCOUNTER_DATE, &[DATE_SENTINEL]),
    (OUTCOME_DATE, &[DATE_SENTINEL]),
];

/// Declared `(column, sentinels)` pairs of a record kind.
pub fn sentinels(kind: RecordKind) -> &'static [(&'static str, &'static [&'static str])] {
    match kind {
        RecordKind::Patients => PATIENT_SENTINELS,
        RecordKind::Tests => TEST_SENTINELS,
        RecordKind::Outcomes => OUTCOME_SENTINELS,
    }
}

/// Replaces every declared sentinel with `Missing`.
///
/// Columns declared for `kind` but absent from `table` are skipped.
pub fn nullify_sentinels(kind: RecordKind, mut table: Table) -> Table {
    let mut replaced = 0usize;
    for (column, codes) in sentinels(kind) {
        let Some(idx) = table.column_index(column) else {
            continue;
        };
        for row in &mut table.rows {
            let Some(cell) = row.get_mut(idx) else {
                continue;
            };
            let is_sentinel = cell
                .as_text()
                .is_some_and(|value| codes.contains(&value.trim()));
            if is_sentinel {
                *cell = CellValue::Missing;
                replaced += 1;
            }
        }
    }
    tracing::debug!(kind = %kind, replaced, "nullified sentinel codes");
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_only_declared_pairs() {
        let table = Table::from_strings(
            ["patient_id", "country", "state"],
            vec![vec!["XX", "XX", "UU"], vec!["P2", "BR", "XX"]],
        );
        let table = nullify_sentinels(RecordKind::Patients, table);
        assert_eq!(table.rows[0][0].as_text(), Some("XX"));
        assert!(table.rows[0][1].is_missing());
        assert!(table.rows[0][2].is_missing());
        assert_eq!(table.rows[1][2].as_text(), Some("XX"));
    }

    #[test]
    fn skips_absent_columns() {
        let table = Table::from_strings(["patient_id", "state"], vec![vec!["P1", "UU"]]);
        let table = nullify_sentinels(RecordKind::Patients, table);
        assert!(table.rows[0][1].is_missing());
    }

    #[test]
    fn date_sentinel_is_declared_for_every_date_column() {
        for (column, codes) in sentinels(RecordKind::Outcomes) {
            assert!(column.ends_with("_date"));
            assert_eq!(*codes, &[DATE_SENTINEL]);
        }
    }
}
