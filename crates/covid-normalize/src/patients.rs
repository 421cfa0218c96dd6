use covid_model::{NormalizeOptions, RecordKind, Result, Table};

use crate::pipeline::{clean, project_output};

/// Normalizes a patient-demographics extract with default options.
pub fn normalize_patients(table: &Table) -> Result<Table> {
    normalize_patients_with_options(table, &NormalizeOptions::default())
}

pub fn normalize_patients_with_options(table: &Table, options: &NormalizeOptions) -> Result<Table> {
    let kind = RecordKind::Patients;
    let cleaned = clean(kind, table, options)?;
    let output = project_output(kind, cleaned, options);
    tracing::info!(
        kind = %kind,
        rows_in = table.height(),
        rows_out = output.height(),
        keep_geography = options.keep_geography,
        "normalized extract"
    );
    Ok(output)
}
