use std::fs;

use chrono::NaiveDate;

use covid_ingest::{
    IngestError, ReadOptions, discover_extracts, read_table, write_table, write_table_to_writer,
};
use covid_model::{CellValue, RecordKind, Table};

#[test]
fn reads_extract_from_disk() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("HSL_Pacientes_3.csv");
    fs::write(
        &path,
        "ID_PACIENTE|IC_SEXO|AA_NASCIMENTO\nP1|F|1980\nP2|M|AAAA\n",
    )
    .expect("write file");

    let table = read_table(&path, &ReadOptions::default()).expect("read extract");
    assert_eq!(table.columns, vec!["ID_PACIENTE", "IC_SEXO", "AA_NASCIMENTO"]);
    assert_eq!(table.height(), 2);
    assert_eq!(table.rows[1][2], CellValue::Text("AAAA".to_string()));
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.csv");
    let error = read_table(&path, &ReadOptions::default()).unwrap_err();
    assert!(matches!(error, IngestError::FileRead { .. }));
    assert!(error.to_string().contains("absent.csv"));
}

#[test]
fn writes_typed_cells() {
    let mut table = Table::new(vec!["patient_id".into(), "birth_year".into(), "date".into()]);
    table.push_row(vec![
        CellValue::Text("P1".into()),
        CellValue::Integer(1980),
        CellValue::Date(NaiveDate::from_ymd_opt(2020, 6, 1).expect("valid date")),
    ]);
    table.push_row(vec![
        CellValue::Text("P2".into()),
        CellValue::Missing,
        CellValue::Missing,
    ]);

    let mut buffer = Vec::new();
    write_table_to_writer(&mut buffer, &table, b'|').expect("write table");
    let text = String::from_utf8(buffer).expect("utf8");
    assert_eq!(
        text,
        "patient_id|birth_year|date\nP1|1980|2020-06-01\nP2||\n"
    );
}

#[test]
fn written_table_reads_back_as_text() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("out.csv");
    let table = Table::from_strings(["a", "b"], vec![vec!["x", ""], vec!["y", "z"]]);
    write_table(&path, &table, b'|').expect("write table");
    let read = read_table(&path, &ReadOptions::default()).expect("read back");
    assert_eq!(read, table);
}

#[test]
fn discovers_extracts_by_name() {
    let dir = tempfile::tempdir().expect("temp dir");
    for name in [
        "HSL_Pacientes_3.csv",
        "HSL_Exames_3.CSV",
        "HSL_Desfechos_3.txt",
        "notes.md",
        "dictionary.csv",
    ] {
        fs::write(dir.path().join(name), "A\n1\n").expect("write file");
    }

    let found = discover_extracts(dir.path()).expect("discover");
    assert_eq!(found.files(RecordKind::Patients).len(), 1);
    assert_eq!(found.files(RecordKind::Tests).len(), 1);
    assert_eq!(found.files(RecordKind::Outcomes).len(), 1);
    assert_eq!(found.unclassified.len(), 1);
    assert!(found.unclassified[0].ends_with("dictionary.csv"));
}

#[test]
fn discovery_skips_previous_outputs() {
    let dir = tempfile::tempdir().expect("temp dir");
    for name in ["HSL_Pacientes_3.csv", "HSL_Pacientes_3_clean.csv"] {
        fs::write(dir.path().join(name), "A\n1\n").expect("write file");
    }

    let found = discover_extracts(dir.path()).expect("discover");
    assert_eq!(found.files(RecordKind::Patients).len(), 1);
    assert!(found.files(RecordKind::Patients)[0].ends_with("HSL_Pacientes_3.csv"));
    assert_eq!(found.previous_outputs.len(), 1);
    assert!(found.unclassified.is_empty());
}

#[test]
fn discovery_requires_directory() {
    let dir = tempfile::tempdir().expect("temp dir");
    let error = discover_extracts(&dir.path().join("missing")).unwrap_err();
    assert!(matches!(error, IngestError::DirectoryNotFound { .. }));
}
