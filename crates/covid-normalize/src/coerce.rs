//! Type coercion of canonical columns.
//!
//! Numeric columns coerce failures to `Missing`; date columns reject any
//! non-null value that is not a day/month/year date.

use chrono::NaiveDate;

use covid_model::{CellValue, ParseError, RecordKind, Table};

use crate::schema::columns::{
    ANALYTE, BIRTH_YEAR, COLLECTION_DATE, ENCOUNTER_DATE, EXAM, OUTCOME_DATE,
    OUTCOME_DESCRIPTION, POSTAL_CODE, REPORT_DATE, RESULT, UNIT,
};

/// Layout of every date in the source extracts.
pub const SOURCE_DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Date,
    TrimmedText,
}

const PATIENT_TYPES: &[(&str, ColumnType)] = &[
    (BIRTH_YEAR, ColumnType::Integer),
    (POSTAL_CODE, ColumnType::Integer),
];

const TEST_TYPES: &[(&str, ColumnType)] = &[
    (EXAM, ColumnType::TrimmedText),
    (ANALYTE, ColumnType::TrimmedText),
    (RESULT, ColumnType::TrimmedText),
    (UNIT, ColumnType::TrimmedText),
    (COLLECTION_DATE, ColumnType::Date),
    (REPORT_DATE, ColumnType::Date),
];

const OUTCOME_TYPES: &[(&str, ColumnType)] = &[
    (OUTCOME_DESCRIPTION, ColumnType::TrimmedText),
    (ENCOUNTER_DATE, ColumnType::Date),
    (OUTCOME_DATE, ColumnType::Date),
];

/// Typed columns of a record kind. Undeclared columns stay text as read.
pub fn column_types(kind: RecordKind) -> &'static [(&'static str, ColumnType)] {
    match kind {
        RecordKind::Patients => PATIENT_TYPES,
        RecordKind::Tests => TEST_TYPES,
        RecordKind::Outcomes => OUTCOME_TYPES,
    }
}

/// Parses an integer, accepting integral decimals such as `1980.0`.
pub fn parse_integer(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = trimmed.parse::<i64>() {
        return Some(parsed);
    }
    let parsed = trimmed.parse::<f64>().ok()?;
    if parsed.is_finite() && parsed.fract() == 0.0 && parsed.abs() < i64::MAX as f64 {
        Some(parsed as i64)
    } else {
        None
    }
}

/// Parses a day/month/year date such as `25/03/2020`.
///
/// The year must have four digits; `01/04/20` is rejected rather than read
/// as the year 20.
pub fn parse_source_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if !has_source_date_layout(trimmed) {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, SOURCE_DATE_FORMAT).ok()
}

/// `d{1,2}/d{1,2}/dddd`.
fn has_source_date_layout(value: &str) -> bool {
    let parts: Vec<&str> = value.split('/').collect();
    let [day, month, year] = parts.as_slice() else {
        return false;
    };
    let digits = |part: &str, min: usize, max: usize| {
        (min..=max).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
    };
    digits(*day, 1, 2) && digits(*month, 1, 2) && digits(*year, 4, 4)
}

fn coerce_integer(cell: CellValue) -> CellValue {
    match cell {
        CellValue::Integer(_) | CellValue::Missing => cell,
        CellValue::Text(value) => parse_integer(&value).map_or(CellValue::Missing, CellValue::Integer),
        CellValue::Date(_) => CellValue::Missing,
    }
}

fn coerce_date(cell: CellValue, column: &str, row: usize) -> Result<CellValue, ParseError> {
    match cell {
        CellValue::Date(_) | CellValue::Missing => Ok(cell),
        CellValue::Text(value) => {
            parse_source_date(&value)
                .map(CellValue::Date)
                .ok_or_else(|| ParseError {
                    column: column.to_string(),
                    value,
                    row,
                })
        }
        CellValue::Integer(value) => Err(ParseError {
            column: column.to_string(),
            value: value.to_string(),
            row,
        }),
    }
}

fn coerce_text(cell: CellValue) -> CellValue {
    match cell {
        CellValue::Text(value) => CellValue::from_raw(&value),
        other => other,
    }
}

/// Applies the declared column types of `kind` to `table`.
///
/// Already-typed cells are kept, so coercing twice is a no-op.
pub fn coerce_columns(kind: RecordKind, table: Table) -> Result<Table, ParseError> {
    let typed: Vec<(usize, &str, ColumnType)> = column_types(kind)
        .iter()
        .filter_map(|(column, ty)| table.column_index(column).map(|idx| (idx, *column, *ty)))
        .collect();

    let mut rows = Vec::with_capacity(table.height());
    for (row_idx, mut row) in table.rows.into_iter().enumerate() {
        for &(idx, column, ty) in &typed {
            let Some(slot) = row.get_mut(idx) else {
                continue;
            };
            let cell = std::mem::replace(slot, CellValue::Missing);
            *slot = match ty {
                ColumnType::Integer => coerce_integer(cell),
                ColumnType::TrimmedText => coerce_text(cell),
                ColumnType::Date => coerce_date(cell, column, row_idx + 1)?,
            };
        }
        rows.push(row);
    }
    tracing::debug!(kind = %kind, typed = typed.len(), rows = rows.len(), "coerced columns");
    Ok(Table {
        columns: table.columns,
        rows,
    })
}
