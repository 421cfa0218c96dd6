//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use covid_model::{RecordKind, Vocabulary};

#[derive(Parser)]
#[command(
    name = "covid-severity",
    version,
    about = "Normalize COVID-19 patient, test and outcome extracts",
    long_about = "Normalize COVID-19 patient, laboratory test and outcome extracts.\n\n\
                  Maps raw headers onto canonical columns, replaces unknown-value codes\n\
                  with empty cells, parses dates and numbers, removes duplicate rows\n\
                  and labels every outcome as severe or mild."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow cell values in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Normalize a single extract.
    Normalize(NormalizeArgs),

    /// Discover and normalize every extract in a folder.
    Dataset(DatasetArgs),

    /// Classify the severity of one encounter.
    Classify(ClassifyArgs),
}

/// Options shared by the commands that process extracts.
#[derive(Args)]
pub struct ProcessingArgs {
    /// Field delimiter of input and output files.
    #[arg(long = "delimiter", value_name = "CHAR", default_value = "|")]
    pub delimiter: char,

    /// Keep raw city and postal-code columns in patient output.
    #[arg(long = "keep-geography")]
    pub keep_geography: bool,

    /// Wording of encounter types and outcome descriptions.
    #[arg(long = "vocabulary", value_enum, default_value = "en")]
    pub vocabulary: VocabularyArg,

    /// Validate and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct NormalizeArgs {
    /// Kind of records in the extract.
    #[arg(value_enum, value_name = "KIND")]
    pub kind: KindArg,

    /// Path to the delimited extract.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file (default: <INPUT stem>_clean.csv next to the input).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub processing: ProcessingArgs,
}

#[derive(Parser)]
pub struct DatasetArgs {
    /// Folder holding the patient, test and outcome extracts.
    #[arg(value_name = "DIR")]
    pub input_dir: PathBuf,

    /// Output directory for cleaned files (default: <DIR>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Also write the run summary as JSON.
    #[arg(long = "summary-json", value_name = "PATH")]
    pub summary_json: Option<PathBuf>,

    #[command(flatten)]
    pub processing: ProcessingArgs,
}

#[derive(Parser)]
pub struct ClassifyArgs {
    /// Whole days between encounter and outcome; omit when unknown.
    #[arg(long = "duration-days", value_name = "DAYS", allow_negative_numbers = true)]
    pub duration_days: Option<i64>,

    /// Encounter type, compared exactly against the admitted category.
    #[arg(long = "encounter-type", value_name = "TYPE", default_value = "")]
    pub encounter_type: String,

    /// Free-text outcome description.
    #[arg(long = "description", value_name = "TEXT", default_value = "")]
    pub description: String,

    /// Wording of the admitted category and death indicator.
    #[arg(long = "vocabulary", value_enum, default_value = "en")]
    pub vocabulary: VocabularyArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Patients,
    Tests,
    Outcomes,
}

impl From<KindArg> for RecordKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Patients => RecordKind::Patients,
            KindArg::Tests => RecordKind::Tests,
            KindArg::Outcomes => RecordKind::Outcomes,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum VocabularyArg {
    En,
    Pt,
}

impl From<VocabularyArg> for Vocabulary {
    fn from(value: VocabularyArg) -> Self {
        match value {
            VocabularyArg::En => Vocabulary::En,
            VocabularyArg::Pt => Vocabulary::Pt,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
