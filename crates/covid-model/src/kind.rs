//! Record kinds and the severity label.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// The three extract types the pipeline understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Patients,
    Tests,
    Outcomes,
}

impl RecordKind {
    pub const ALL: [RecordKind; 3] = [RecordKind::Patients, RecordKind::Tests, RecordKind::Outcomes];

    /// Number of source columns an extract of this kind must carry.
    pub fn expected_width(self) -> usize {
        match self {
            RecordKind::Patients => 7,
            RecordKind::Tests => 9,
            RecordKind::Outcomes => 8,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Patients => "patients",
            RecordKind::Tests => "tests",
            RecordKind::Outcomes => "outcomes",
        }
    }

    /// Human-readable label used in summaries.
    pub fn label(self) -> &'static str {
        match self {
            RecordKind::Patients => "Patient demographics",
            RecordKind::Tests => "Laboratory tests",
            RecordKind::Outcomes => "Encounter outcomes",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "patients" | "patient" => Ok(RecordKind::Patients),
            "tests" | "test" | "exams" => Ok(RecordKind::Tests),
            "outcomes" | "outcome" => Ok(RecordKind::Outcomes),
            _ => Err(ModelError::UnknownRecordKind(value.to_string())),
        }
    }
}

/// Derived clinical severity of one encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityClass {
    Severe,
    Mild,
}

impl SeverityClass {
    pub fn as_str(self) -> &'static str {
        match self {
            SeverityClass::Severe => "severe",
            SeverityClass::Mild => "mild",
        }
    }

    pub fn is_severe(self) -> bool {
        self == SeverityClass::Severe
    }
}

impl fmt::Display for SeverityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeverityClass {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "severe" => Ok(SeverityClass::Severe),
            "mild" => Ok(SeverityClass::Mild),
            _ => Err(ModelError::UnknownSeverity(value.to_string())),
        }
    }
}
