//! Declarative raw-header tables and header canonicalization.
//!
//! Every record kind lists its canonical columns, the raw header spellings
//! that map onto each of them, and what happens to the column afterwards.
//! Raw headers are compared after uppercasing; the uppercased canonical name
//! is always accepted too, so an already-canonical extract maps onto itself.

use covid_model::{NormalizeOptions, RecordKind, SchemaError, Table};

/// Canonical column names.
pub mod columns {
    pub const PATIENT_ID: &str = "patient_id";
    pub const SEX: &str = "sex";
    pub const BIRTH_YEAR: &str = "birth_year";
    pub const COUNTRY: &str = "country";
    pub const STATE: &str = "state";
    pub const CITY: &str = "city";
    pub const POSTAL_CODE: &str = "postal_code";

    pub const COLLECTION_DATE: &str = "collection_date";
    pub const ORIGIN: &str = "origin";
    pub const EXAM: &str = "exam";
    pub const ANALYTE: &str = "analyte";
    pub const RESULT: &str = "result";
    pub const UNIT: &str = "unit";
    pub const REFERENCE_VALUE: &str = "reference_value";
    pub const REPORT_DATE: &str = "report_date";

    pub const ENCOUNTER_ID: &str = "encounter_id";
    pub const ENCOUNTER_DATE: &str = "encounter_date";
    pub const ENCOUNTER_TYPE: &str = "encounter_type";
    pub const CLINIC_ID: &str = "clinic_id";
    pub const CLINIC_NAME: &str = "clinic_name";
    pub const OUTCOME_DATE: &str = "outcome_date";
    pub const OUTCOME_DESCRIPTION: &str = "outcome_description";
    pub const DURATION_DAYS: &str = "duration_days";
    pub const SEVERITY_CLASS: &str = "severity_class";
}

use columns::{
    ANALYTE, BIRTH_YEAR, CITY, CLINIC_ID, CLINIC_NAME, COLLECTION_DATE, COUNTRY, ENCOUNTER_DATE,
    ENCOUNTER_ID, ENCOUNTER_TYPE, EXAM, ORIGIN, OUTCOME_DATE, OUTCOME_DESCRIPTION, PATIENT_ID,
    POSTAL_CODE, REFERENCE_VALUE, REPORT_DATE, RESULT, SEVERITY_CLASS, SEX, STATE, UNIT,
};

/// What happens to a canonical column after header canonicalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Part of the output schema.
    Output,
    /// Raw geographic code; in the output only when geography is kept.
    Geographic,
    /// Used by later stages, removed by the final projection.
    Carried,
    /// Removed right after canonicalization.
    Obsolete,
}

#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub canonical: &'static str,
    /// Uppercased raw header spellings.
    pub raw_names: &'static [&'static str],
    pub disposition: Disposition,
}

impl ColumnSpec {
    const fn new(
        canonical: &'static str,
        raw_names: &'static [&'static str],
        disposition: Disposition,
    ) -> Self {
        Self {
            canonical,
            raw_names,
            disposition,
        }
    }

    fn matches(&self, upper: &str) -> bool {
        self.raw_names.contains(&upper) || self.canonical.eq_ignore_ascii_case(upper)
    }

    fn retained(&self, options: &NormalizeOptions) -> bool {
        match self.disposition {
            Disposition::Output | Disposition::Carried => true,
            Disposition::Geographic => options.keep_geography,
            Disposition::Obsolete => false,
        }
    }

    fn in_output(&self, options: &NormalizeOptions) -> bool {
        match self.disposition {
            Disposition::Output => true,
            Disposition::Geographic => options.keep_geography,
            Disposition::Carried | Disposition::Obsolete => false,
        }
    }
}

use Disposition::{Carried, Geographic, Obsolete, Output};

const PATIENT_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new(PATIENT_ID, &["ID_PACIENTE"], Output),
    ColumnSpec::new(SEX, &["IC_SEXO"], Output),
    ColumnSpec::new(BIRTH_YEAR, &["AA_NASCIMENTO"], Output),
    ColumnSpec::new(COUNTRY, &["CD_PAIS"], Output),
    ColumnSpec::new(STATE, &["CD_UF"], Output),
    ColumnSpec::new(CITY, &["CD_MUNICIPIO"], Geographic),
    ColumnSpec::new(POSTAL_CODE, &["CD_CEPREDUZIDO", "CD_CEP"], Geographic),
];

const TEST_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new(PATIENT_ID, &["ID_PACIENTE"], Output),
    ColumnSpec::new(EXAM, &["DE_EXAME"], Output),
    ColumnSpec::new(ANALYTE, &["DE_ANALITO"], Output),
    ColumnSpec::new(RESULT, &["DE_RESULTADO"], Output),
    ColumnSpec::new(UNIT, &["CD_UNIDADE"], Output),
    ColumnSpec::new(COLLECTION_DATE, &["DT_COLETA"], Output),
    ColumnSpec::new(REPORT_DATE, &["DT_RESULTADO", "DT_LAUDO"], Output),
    ColumnSpec::new(ORIGIN, &["DE_ORIGEM"], Obsolete),
    ColumnSpec::new(REFERENCE_VALUE, &["DE_VALOR_REFERENCIA"], Obsolete),
];

const OUTCOME_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new(PATIENT_ID, &["ID_PACIENTE"], Output),
    ColumnSpec::new(ENCOUNTER_ID, &["ID_ATENDIMENTO"], Carried),
    ColumnSpec::new(ENCOUNTER_TYPE, &["DE_TIPO_ATENDIMENTO"], Output),
    ColumnSpec::new(OUTCOME_DESCRIPTION, &["DE_DESFECHO"], Output),
    ColumnSpec::new(ENCOUNTER_DATE, &["DT_ATENDIMENTO"], Carried),
    ColumnSpec::new(OUTCOME_DATE, &["DT_DESFECHO"], Carried),
    ColumnSpec::new(CLINIC_ID, &["ID_CLINICA"], Obsolete),
    ColumnSpec::new(CLINIC_NAME, &["DE_CLINICA"], Obsolete),
];

/// Declared columns of a record kind, in canonical order.
pub fn column_specs(kind: RecordKind) -> &'static [ColumnSpec] {
    match kind {
        RecordKind::Patients => PATIENT_COLUMNS,
        RecordKind::Tests => TEST_COLUMNS,
        RecordKind::Outcomes => OUTCOME_COLUMNS,
    }
}

/// Canonical name for an uppercased raw header, if the kind declares it.
pub fn canonical_name(kind: RecordKind, raw: &str) -> Option<&'static str> {
    let upper = raw.trim().to_uppercase();
    column_specs(kind)
        .iter()
        .find(|spec| spec.matches(&upper))
        .map(|spec| spec.canonical)
}

/// Columns of the final output table of a record kind.
pub fn output_columns(kind: RecordKind, options: &NormalizeOptions) -> Vec<&'static str> {
    let mut names: Vec<&'static str> = column_specs(kind)
        .iter()
        .filter(|spec| spec.in_output(options))
        .map(|spec| spec.canonical)
        .collect();
    if kind == RecordKind::Outcomes {
        names.push(SEVERITY_CLASS);
    }
    names
}

/// Checks the column count and row lengths, renames raw headers onto
/// canonical names and drops the columns not retained for `kind`.
///
/// The result lists the retained columns in canonical order.
pub fn canonicalize_headers(
    kind: RecordKind,
    table: Table,
    options: &NormalizeOptions,
) -> Result<Table, SchemaError> {
    let expected = kind.expected_width();
    if table.width() != expected {
        return Err(SchemaError::ColumnCount {
            kind,
            expected,
            actual: table.width(),
        });
    }
    if let Some((idx, row)) = table
        .rows
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != expected)
    {
        return Err(SchemaError::RaggedRow {
            kind,
            row: idx + 1,
            expected,
            actual: row.len(),
        });
    }

    let mut renamed: Vec<String> = Vec::with_capacity(table.width());
    for raw in &table.columns {
        let canonical = canonical_name(kind, raw).ok_or_else(|| SchemaError::UnknownColumn {
            kind,
            column: raw.clone(),
        })?;
        if renamed.iter().any(|seen| seen == canonical) {
            return Err(SchemaError::DuplicateColumn {
                kind,
                column: canonical.to_string(),
            });
        }
        renamed.push(canonical.to_string());
    }
    for spec in column_specs(kind) {
        if !renamed.iter().any(|name| name == spec.canonical) {
            return Err(SchemaError::MissingColumn {
                kind,
                column: spec.canonical.to_string(),
            });
        }
    }

    let retained: Vec<&str> = column_specs(kind)
        .iter()
        .filter(|spec| spec.retained(options))
        .map(|spec| spec.canonical)
        .collect();
    let renamed = Table {
        columns: renamed,
        rows: table.rows,
    };
    tracing::debug!(
        kind = %kind,
        retained = retained.len(),
        dropped = expected - retained.len(),
        "canonicalized headers"
    );
    Ok(renamed.select(&retained))
}
