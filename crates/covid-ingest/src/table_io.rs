use std::io;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};

use covid_model::{CellValue, Table};

use crate::error::{IngestError, Result};

/// Field separator of the source extracts.
pub const DEFAULT_DELIMITER: u8 = b'|';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    pub delimiter: u8,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl ReadOptions {
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> CellValue {
    CellValue::from_raw(raw.trim_matches('\u{feff}'))
}

/// Reads a delimited extract with a header row into a [`Table`] of text cells.
pub fn read_table(path: &Path, options: &ReadOptions) -> Result<Table> {
    let file = std::fs::File::open(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let table = read_delimited(file, path, options)?;
    tracing::debug!(
        path = %path.display(),
        columns = table.width(),
        rows = table.height(),
        "read extract"
    );
    Ok(table)
}

/// Same as [`read_table`], over any reader.
pub fn read_table_from_reader<R: io::Read>(reader: R, options: &ReadOptions) -> Result<Table> {
    read_delimited(reader, Path::new("<reader>"), options)
}

fn read_delimited<R: io::Read>(input: R, path: &Path, options: &ReadOptions) -> Result<Table> {
    let csv_error = |source: csv::Error| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(normalize_header)
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err(IngestError::MissingHeader {
            path: path.to_path_buf(),
        });
    }

    let mut table = Table::new(headers);
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(csv_error)?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        if record.len() != table.width() {
            return Err(IngestError::RaggedRow {
                path: path.to_path_buf(),
                record: (idx as u64) + 1,
                expected: table.width(),
                actual: record.len(),
            });
        }
        table.push_row(record.iter().map(normalize_cell).collect());
    }
    Ok(table)
}

/// Writes a table as a delimited file with a header row.
///
/// Missing cells are written empty and dates as `YYYY-MM-DD`.
pub fn write_table(path: &Path, table: &Table, delimiter: u8) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|source| IngestError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    write_delimited(file, path, table, delimiter)?;
    tracing::debug!(
        path = %path.display(),
        rows = table.height(),
        "wrote table"
    );
    Ok(())
}

/// Same as [`write_table`], into any writer.
pub fn write_table_to_writer<W: io::Write>(writer: W, table: &Table, delimiter: u8) -> Result<()> {
    write_delimited(writer, Path::new("<writer>"), table, delimiter)
}

fn write_delimited<W: io::Write>(
    output: W,
    path: &Path,
    table: &Table,
    delimiter: u8,
) -> Result<()> {
    let owned_path = || PathBuf::from(path);
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(output);
    writer
        .write_record(&table.columns)
        .map_err(|source| IngestError::Csv {
            path: owned_path(),
            source,
        })?;
    for row in &table.rows {
        writer
            .write_record(row.iter().map(ToString::to_string))
            .map_err(|source| IngestError::Csv {
                path: owned_path(),
                source,
            })?;
    }
    writer.flush().map_err(|source| IngestError::FileWrite {
        path: owned_path(),
        source,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_header_strips_bom_and_collapses_spaces() {
        assert_eq!(normalize_header("\u{feff}ID_PACIENTE "), "ID_PACIENTE");
        assert_eq!(normalize_header("  De   Exame "), "De Exame");
    }

    #[test]
    fn reads_pipe_delimited_by_default() {
        let input = "ID_PACIENTE|IC_SEXO\nP1|F\nP2|\n";
        let table = read_table_from_reader(input.as_bytes(), &ReadOptions::default()).unwrap();
        assert_eq!(table.columns, vec!["ID_PACIENTE", "IC_SEXO"]);
        assert_eq!(table.height(), 2);
        assert_eq!(table.rows[1][1], CellValue::Missing);
    }

    #[test]
    fn skips_blank_records() {
        let input = "A|B\n1|2\n | \n3|4\n";
        let table = read_table_from_reader(input.as_bytes(), &ReadOptions::default()).unwrap();
        assert_eq!(table.height(), 2);
    }

    #[test]
    fn rejects_ragged_rows() {
        let input = "A|B\n1|2\n3\n";
        let error = read_table_from_reader(input.as_bytes(), &ReadOptions::default()).unwrap_err();
        assert!(matches!(
            error,
            IngestError::RaggedRow {
                record: 2,
                expected: 2,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn honors_custom_delimiter() {
        let input = "A,B\n1,2\n";
        let options = ReadOptions::default().with_delimiter(b',');
        let table = read_table_from_reader(input.as_bytes(), &options).unwrap();
        assert_eq!(table.columns, vec!["A", "B"]);
    }
}
