#![deny(unsafe_code)]

use std::fmt;

use chrono::NaiveDate;

/// Date layout used when a table is rendered for output.
pub const OUTPUT_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Missing,
    Text(String),
    Integer(i64),
    Date(NaiveDate),
}

impl CellValue {
    /// Builds a text cell, mapping blank input to `Missing`.
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            CellValue::Missing
        } else {
            CellValue::Text(trimmed.to_string())
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            CellValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Missing => Ok(()),
            CellValue::Text(value) => f.write_str(value),
            CellValue::Integer(value) => write!(f, "{value}"),
            CellValue::Date(value) => write!(f, "{}", value.format(OUTPUT_DATE_FORMAT)),
        }
    }
}

/// A rectangular table: named columns and positional rows aligned with them.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Builds a table of text cells from raw strings. Blank strings become `Missing`.
    pub fn from_strings<H, R, C>(headers: H, rows: R) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let mut table = Table::new(headers.into_iter().map(Into::into).collect());
        for row in rows {
            table.push_row(
                row.into_iter()
                    .map(|cell| CellValue::from_raw(cell.as_ref()))
                    .collect(),
            );
        }
        table
    }

    pub fn push_row(&mut self, row: Vec<CellValue>) {
        self.rows.push(row);
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Value of `column` in row `row`, if both exist.
    pub fn value(&self, row: usize, column: &str) -> Option<&CellValue> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)
    }

    /// All values of one column in row order. Empty when the column does not exist.
    pub fn column_values(&self, name: &str) -> Vec<&CellValue> {
        let Some(idx) = self.column_index(name) else {
            return Vec::new();
        };
        self.rows.iter().filter_map(|row| row.get(idx)).collect()
    }

    /// Keeps only the named columns, in the given order. Unknown names are
    /// skipped; cells missing from short rows become `Missing`.
    pub fn select(self, names: &[&str]) -> Table {
        let indices: Vec<usize> = names
            .iter()
            .filter_map(|name| self.column_index(name))
            .collect();
        let columns = indices
            .iter()
            .map(|&idx| self.columns[idx].clone())
            .collect();
        let rows = self
            .rows
            .into_iter()
            .map(|row| {
                indices
                    .iter()
                    .map(|&idx| row.get(idx).cloned().unwrap_or(CellValue::Missing))
                    .collect()
            })
            .collect();
        Table { columns, rows }
    }

    /// Removes the named columns. Unknown names are ignored.
    pub fn drop_columns(self, names: &[&str]) -> Table {
        let keep: Vec<bool> = self
            .columns
            .iter()
            .map(|column| !names.contains(&column.as_str()))
            .collect();
        let columns = self
            .columns
            .into_iter()
            .zip(&keep)
            .filter_map(|(column, &kept)| kept.then_some(column))
            .collect();
        let rows = self
            .rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .zip(&keep)
                    .filter_map(|(cell, &kept)| kept.then_some(cell))
                    .collect()
            })
            .collect();
        Table { columns, rows }
    }

    /// Appends a column. `values` must hold one cell per row.
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<CellValue>) -> Table {
        debug_assert_eq!(values.len(), self.rows.len());
        self.columns.push(name.into());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_strings(
            ["a", "b", "c"],
            vec![vec!["1", "x", ""], vec!["2", " y ", "z"]],
        )
    }

    #[test]
    fn from_strings_maps_blank_to_missing() {
        let table = sample();
        assert_eq!(table.value(0, "c"), Some(&CellValue::Missing));
        assert_eq!(table.value(1, "b"), Some(&CellValue::Text("y".to_string())));
    }

    #[test]
    fn select_reorders_and_skips_unknown() {
        let table = sample().select(&["c", "a", "nope"]);
        assert_eq!(table.columns, vec!["c", "a"]);
        assert_eq!(table.rows[1][1], CellValue::Text("2".to_string()));
    }

    #[test]
    fn select_fills_short_rows_with_missing() {
        let mut table = sample();
        table.push_row(vec![CellValue::Text("3".to_string())]);
        let table = table.select(&["a", "c"]);
        assert_eq!(table.rows[2], vec![CellValue::Text("3".to_string()), CellValue::Missing]);
    }

    #[test]
    fn drop_columns_keeps_order() {
        let table = sample().drop_columns(&["b"]);
        assert_eq!(table.columns, vec!["a", "c"]);
        assert_eq!(table.width(), 2);
        assert_eq!(table.height(), 2);
    }

    #[test]
    fn with_column_appends_values() {
        let table = sample().with_column(
            "d",
            vec![CellValue::Integer(4), CellValue::Missing],
        );
        assert_eq!(table.columns.last().map(String::as_str), Some("d"));
        assert_eq!(table.value(0, "d"), Some(&CellValue::Integer(4)));
    }

    #[test]
    fn display_formats_dates_as_iso() {
        let date = NaiveDate::from_ymd_opt(2020, 3, 7).unwrap();
        assert_eq!(CellValue::Date(date).to_string(), "2020-03-07");
        assert_eq!(CellValue::Missing.to_string(), "");
    }
}
