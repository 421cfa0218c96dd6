use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result, bail};
use tracing::debug;

use covid_cli::logging::redact_value;
use covid_cli::runner::{RunOptions, default_output_path, process_dataset, process_extract};
use covid_cli::types::{DatasetResult, ExtractSummary};
use covid_ingest::ReadOptions;
use covid_model::{NormalizeOptions, RecordKind, SeverityClass};
use covid_normalize::SeverityRule;

use crate::cli::{ClassifyArgs, DatasetArgs, NormalizeArgs, ProcessingArgs};

fn delimiter_byte(delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() {
        bail!("delimiter must be a single ASCII character, got '{delimiter}'");
    }
    Ok(delimiter as u8)
}

fn run_options(args: &ProcessingArgs) -> Result<RunOptions> {
    let delimiter = delimiter_byte(args.delimiter)?;
    Ok(RunOptions {
        normalize: NormalizeOptions::new()
            .with_keep_geography(args.keep_geography)
            .with_vocabulary(args.vocabulary.into()),
        read: ReadOptions::default().with_delimiter(delimiter),
        output_delimiter: delimiter,
        dry_run: args.dry_run,
    })
}

pub fn run_normalize(args: &NormalizeArgs) -> Result<ExtractSummary> {
    let options = run_options(&args.processing)?;
    let kind = RecordKind::from(args.kind);
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input, None));
    process_extract(kind, &args.input, &output, &options)
}

pub fn run_dataset(args: &DatasetArgs) -> Result<DatasetResult> {
    let options = run_options(&args.processing)?;
    let result = process_dataset(&args.input_dir, args.output_dir.as_deref(), &options)?;
    if let Some(path) = &args.summary_json {
        let file = File::create(path)
            .with_context(|| format!("create summary file {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &result)
            .with_context(|| format!("write summary file {}", path.display()))?;
    }
    Ok(result)
}

pub fn run_classify(args: &ClassifyArgs) -> SeverityClass {
    let rule = SeverityRule::for_vocabulary(args.vocabulary.into());
    let class = rule.classify(args.duration_days, &args.encounter_type, &args.description);
    debug!(
        duration_days = ?args.duration_days,
        encounter_type = redact_value(&args.encounter_type),
        description = redact_value(&args.description),
        class = %class,
        "classified encounter"
    );
    class
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delimiter_must_be_ascii() {
        assert_eq!(delimiter_byte('|').unwrap(), b'|');
        assert_eq!(delimiter_byte(';').unwrap(), b';');
        assert!(delimiter_byte('§').is_err());
    }
}
