//! Shared types for the COVID-19 severity views.
//!
//! - **table**: the rectangular `Table` passed between reader, normalizers and writer
//! - **kind**: `RecordKind` (patients, tests, outcomes) and `SeverityClass`
//! - **error**: `SchemaError`, `ParseError` and their `NormalizeError` union
//! - **options**: `NormalizeOptions` and the severity `Vocabulary`

pub mod error;
pub mod kind;
pub mod options;
pub mod table;

pub use error::{ModelError, NormalizeError, ParseError, Result, SchemaError};
pub use kind::{RecordKind, SeverityClass};
pub use options::{NormalizeOptions, Vocabulary};
pub use table::{CellValue, OUTPUT_DATE_FORMAT, Table};
