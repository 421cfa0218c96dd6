use std::path::PathBuf;

use covid_model::RecordKind;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ExtractSummary {
    pub kind: RecordKind,
    pub input: PathBuf,
    /// Written file; `None` on dry runs and failures.
    pub output: Option<PathBuf>,
    pub rows_in: usize,
    pub rows_out: usize,
    /// Severe encounters, outcome extracts only.
    pub severe: Option<usize>,
    pub error: Option<String>,
}

impl ExtractSummary {
    pub fn duplicates_removed(&self) -> usize {
        self.rows_in.saturating_sub(self.rows_out)
    }

    pub fn failed(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetResult {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub extracts: Vec<ExtractSummary>,
    pub unclassified: Vec<PathBuf>,
    pub has_errors: bool,
}
