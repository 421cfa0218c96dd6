//! Normalization and severity classification of COVID-19 extracts.
//!
//! Every normalizer runs the same stages on a borrowed table and returns a
//! new one:
//!
//! - **schema**: column-count check and raw → canonical header mapping
//! - **sentinel**: declared "unknown" codes become `Missing`
//! - **coerce**: integer, day/month/year date and trimmed-text columns
//! - **dedupe**: identical rows collapse to their first occurrence
//! - **outcomes**: stay duration and the derived `severity_class`
//! - **severity**: the standalone classification rule

pub mod coerce;
pub mod dedupe;
pub mod labs;
pub mod outcomes;
pub mod patients;
pub mod pipeline;
pub mod schema;
pub mod sentinel;
pub mod severity;

pub use coerce::{SOURCE_DATE_FORMAT, coerce_columns, parse_integer, parse_source_date};
pub use dedupe::dedupe_rows;
pub use labs::{normalize_tests, normalize_tests_with_options};
pub use outcomes::{derive_duration_days, normalize_outcomes, normalize_outcomes_with_options};
pub use patients::{normalize_patients, normalize_patients_with_options};
pub use pipeline::normalize;
pub use schema::{canonicalize_headers, columns, output_columns};
pub use sentinel::{DATE_SENTINEL, nullify_sentinels, sentinels};
pub use severity::{MIN_SEVERE_STAY_DAYS, SeverityRule, classify_severity};
