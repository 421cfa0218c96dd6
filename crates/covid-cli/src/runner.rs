//! Read → normalize → write for single extracts and whole dataset folders.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use covid_ingest::{
    CLEAN_SUFFIX, DEFAULT_DELIMITER, ReadOptions, discover_extracts, read_table, write_table,
};
use covid_model::{CellValue, NormalizeOptions, RecordKind, SeverityClass, Table};
use covid_normalize::{columns::SEVERITY_CLASS, normalize};

use crate::types::{DatasetResult, ExtractSummary};

/// Suffix appended to the input stem for the cleaned output file.
pub const OUTPUT_SUFFIX: &str = CLEAN_SUFFIX;

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub normalize: NormalizeOptions,
    pub read: ReadOptions,
    pub output_delimiter: u8,
    /// Validate and report without writing output files.
    pub dry_run: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            normalize: NormalizeOptions::default(),
            read: ReadOptions::default(),
            output_delimiter: DEFAULT_DELIMITER,
            dry_run: false,
        }
    }
}

/// `<dir>/<stem>_clean.csv`, where `dir` defaults to the input's directory.
pub fn default_output_path(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("extract");
    let file_name = format!("{stem}{OUTPUT_SUFFIX}.csv");
    match output_dir.or_else(|| input.parent()) {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Number of rows labelled severe, if the table carries a severity column.
pub fn count_severe(table: &Table) -> Option<usize> {
    if !table.has_column(SEVERITY_CLASS) {
        return None;
    }
    Some(
        table
            .column_values(SEVERITY_CLASS)
            .into_iter()
            .filter(|cell| {
                matches!(cell, CellValue::Text(label) if label == SeverityClass::Severe.as_str())
            })
            .count(),
    )
}

/// Normalizes one extract and writes the result unless `dry_run` is set.
pub fn process_extract(
    kind: RecordKind,
    input: &Path,
    output: &Path,
    options: &RunOptions,
) -> Result<ExtractSummary> {
    let span = info_span!("extract", kind = %kind, input = %input.display());
    let _guard = span.enter();

    let raw = read_table(input, &options.read)
        .with_context(|| format!("read {kind} extract {}", input.display()))?;
    let cleaned = normalize(kind, &raw, &options.normalize)
        .with_context(|| format!("normalize {kind} extract {}", input.display()))?;

    let written = if options.dry_run {
        None
    } else {
        write_table(output, &cleaned, options.output_delimiter)
            .with_context(|| format!("write {}", output.display()))?;
        Some(output.to_path_buf())
    };
    info!(
        rows_in = raw.height(),
        rows_out = cleaned.height(),
        dry_run = options.dry_run,
        "processed extract"
    );
    Ok(ExtractSummary {
        kind,
        input: input.to_path_buf(),
        output: written,
        rows_in: raw.height(),
        rows_out: cleaned.height(),
        severe: count_severe(&cleaned),
        error: None,
    })
}

/// Discovers and normalizes every extract in `input_dir`.
///
/// A failing extract is recorded in its summary and does not stop the others.
pub fn process_dataset(
    input_dir: &Path,
    output_dir: Option<&Path>,
    options: &RunOptions,
) -> Result<DatasetResult> {
    let discovered = discover_extracts(input_dir)
        .with_context(|| format!("discover extracts in {}", input_dir.display()))?;
    let output_dir = output_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input_dir.join("output"));
    if !options.dry_run {
        std::fs::create_dir_all(&output_dir)
            .with_context(|| format!("create output dir {}", output_dir.display()))?;
    }
    if discovered.is_empty() {
        warn!(dir = %input_dir.display(), "no extracts found");
    }

    let mut extracts = Vec::new();
    for kind in RecordKind::ALL {
        for input in discovered.files(kind) {
            let output = default_output_path(input, Some(&output_dir));
            let summary = match process_extract(kind, input, &output, options) {
                Ok(summary) => summary,
                Err(error) => {
                    warn!(kind = %kind, input = %input.display(), "extract failed: {error:#}");
                    ExtractSummary {
                        kind,
                        input: input.clone(),
                        output: None,
                        rows_in: 0,
                        rows_out: 0,
                        severe: None,
                        error: Some(format!("{error:#}")),
                    }
                }
            };
            extracts.push(summary);
        }
    }

    let has_errors = extracts.iter().any(ExtractSummary::failed);
    Ok(DatasetResult {
        input_dir: input_dir.to_path_buf(),
        output_dir,
        extracts,
        unclassified: discovered.unclassified,
        has_errors,
    })
}
