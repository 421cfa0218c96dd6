//! End-to-end tests for single-extract and dataset runs.

use std::fs;
use std::path::Path;

use covid_cli::runner::{RunOptions, default_output_path, process_dataset, process_extract};
use covid_model::RecordKind;
use tempfile::TempDir;

const PATIENTS: &str = "\
ID_PACIENTE|IC_SEXO|AA_NASCIMENTO|CD_PAIS|CD_UF|CD_MUNICIPIO|CD_CEPREDUZIDO
P1|F|1980|BR|SP|MMMM|CCCC
P2|M|AAAA|BR|UU|MMMM|CCCC
P2|M|AAAA|BR|UU|MMMM|CCCC
";

const OUTCOMES: &str = "\
ID_PACIENTE|ID_ATENDIMENTO|DT_ATENDIMENTO|DE_TIPO_ATENDIMENTO|ID_CLINICA|DE_CLINICA|DT_DESFECHO|DE_DESFECHO
P1|E1|01/06/2020|admitted|12|Clinica|15/06/2020|discharged
P2|E2|01/06/2020|ambulatory|12|Clinica|02/06/2020|recovered
P3|E3|DDMMAA|admitted|12|Clinica|DDMMAA|recovered
";

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

#[test]
fn default_output_path_uses_stem_and_suffix() {
    let input = Path::new("/data/hsl_pacientes.csv");
    assert_eq!(
        default_output_path(input, None),
        Path::new("/data/hsl_pacientes_clean.csv")
    );
    assert_eq!(
        default_output_path(input, Some(Path::new("/out"))),
        Path::new("/out/hsl_pacientes_clean.csv")
    );
}

#[test]
fn process_extract_writes_cleaned_patients() {
    let dir = TempDir::new().expect("temp dir");
    let input = write(dir.path(), "pacientes.csv", PATIENTS);
    let output = dir.path().join("pacientes_clean.csv");

    let summary = process_extract(RecordKind::Patients, &input, &output, &RunOptions::default())
        .expect("process extract");

    assert_eq!(summary.rows_in, 3);
    assert_eq!(summary.rows_out, 2);
    assert_eq!(summary.duplicates_removed(), 1);
    assert_eq!(summary.severe, None);
    assert_eq!(summary.output.as_deref(), Some(output.as_path()));

    let written = fs::read_to_string(&output).expect("read output");
    assert_eq!(
        written,
        "patient_id|sex|birth_year|country|state\nP1|F|1980|BR|SP\nP2|M||BR|\n"
    );
}

#[test]
fn dry_run_writes_nothing() {
    let dir = TempDir::new().expect("temp dir");
    let input = write(dir.path(), "desfechos.csv", OUTCOMES);
    let output = dir.path().join("desfechos_clean.csv");
    let options = RunOptions {
        dry_run: true,
        ..RunOptions::default()
    };

    let summary =
        process_extract(RecordKind::Outcomes, &input, &output, &options).expect("process extract");

    assert_eq!(summary.output, None);
    assert_eq!(summary.severe, Some(1));
    assert!(!output.exists());
}

#[test]
fn process_extract_reports_schema_errors() {
    let dir = TempDir::new().expect("temp dir");
    let input = write(dir.path(), "pacientes.csv", "ID_PACIENTE|IC_SEXO\nP1|F\n");
    let output = dir.path().join("out.csv");

    let error = process_extract(RecordKind::Patients, &input, &output, &RunOptions::default())
        .expect_err("two columns is not a patient extract");

    let message = format!("{error:#}");
    assert!(message.contains("must have 7 columns"), "{message}");
    assert!(!output.exists());
}

#[test]
fn dataset_run_processes_every_extract() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "HSL_Pacientes_3.csv", PATIENTS);
    write(dir.path(), "HSL_Desfechos_3.csv", OUTCOMES);
    write(dir.path(), "HSL_Exames_3.csv", "ID_PACIENTE|DT_COLETA\nP1|01/06/2020\n");
    write(dir.path(), "readme.txt", "not an extract\n");

    let result = process_dataset(dir.path(), None, &RunOptions::default()).expect("dataset run");

    assert_eq!(result.output_dir, dir.path().join("output"));
    assert_eq!(result.extracts.len(), 3);
    assert_eq!(result.unclassified.len(), 1);
    assert!(result.has_errors);

    let kinds: Vec<RecordKind> = result.extracts.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![RecordKind::Patients, RecordKind::Tests, RecordKind::Outcomes]
    );

    let tests = &result.extracts[1];
    assert!(tests.failed());
    assert_eq!(tests.output, None);

    let outcomes = &result.extracts[2];
    assert!(!outcomes.failed());
    assert_eq!(outcomes.severe, Some(1));
    let written = fs::read_to_string(result.output_dir.join("HSL_Desfechos_3_clean.csv"))
        .expect("read outcome output");
    assert_eq!(
        written,
        "patient_id|encounter_type|outcome_description|severity_class\n\
         P1|admitted|discharged|severe\n\
         P2|ambulatory|recovered|mild\n\
         P3|admitted|recovered|mild\n"
    );
}

#[test]
fn dataset_summary_serializes_to_json() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "pacientes.csv", PATIENTS);
    let options = RunOptions {
        dry_run: true,
        ..RunOptions::default()
    };

    let result = process_dataset(dir.path(), None, &options).expect("dataset run");
    assert!(!dir.path().join("output").exists());

    let json = serde_json::to_value(&result).expect("serialize summary");
    assert_eq!(json["has_errors"], false);
    assert_eq!(json["extracts"][0]["rows_out"], 2);
    assert!(json["extracts"][0]["output"].is_null());
}

#[test]
fn rerun_into_input_folder_ignores_previous_outputs() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "pacientes.csv", PATIENTS);
    write(dir.path(), "desfechos.csv", OUTCOMES);

    let first = process_dataset(dir.path(), Some(dir.path()), &RunOptions::default())
        .expect("first run");
    assert!(!first.has_errors);
    assert!(dir.path().join("pacientes_clean.csv").exists());

    let second = process_dataset(dir.path(), Some(dir.path()), &RunOptions::default())
        .expect("second run");
    assert!(!second.has_errors);
    assert_eq!(second.extracts.len(), 2);
    assert!(second.unclassified.is_empty());
}

#[test]
fn missing_dataset_folder_is_an_error() {
    let dir = TempDir::new().expect("temp dir");
    let missing = dir.path().join("absent");
    assert!(process_dataset(&missing, None, &RunOptions::default()).is_err());
}
