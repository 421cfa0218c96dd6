use thiserror::Error;

use crate::kind::RecordKind;

/// Structural mismatch between an extract and the declared schema of its kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("{kind} extract must have {expected} columns, found {actual}")]
    ColumnCount {
        kind: RecordKind,
        expected: usize,
        actual: usize,
    },
    #[error("{kind} extract has unrecognized column '{column}'")]
    UnknownColumn { kind: RecordKind, column: String },
    #[error("{kind} extract maps more than one column onto '{column}'")]
    DuplicateColumn { kind: RecordKind, column: String },
    #[error("{kind} extract is missing required column '{column}'")]
    MissingColumn { kind: RecordKind, column: String },
    #[error("{kind} extract row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        kind: RecordKind,
        /// 1-based data row number.
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// A non-null date cell that does not follow the day/month/year layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("column '{column}' row {row}: '{value}' is not a day/month/year date")]
pub struct ParseError {
    pub column: String,
    pub value: String,
    /// 1-based data row number.
    pub row: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown record kind '{0}' (expected patients, tests or outcomes)")]
    UnknownRecordKind(String),
    #[error("unknown severity class '{0}'")]
    UnknownSeverity(String),
    #[error("unknown vocabulary '{0}' (expected en or pt)")]
    UnknownVocabulary(String),
}

pub type Result<T> = std::result::Result<T, NormalizeError>;
