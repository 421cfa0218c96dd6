//! Extract discovery and record-kind matching.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use covid_model::RecordKind;

use crate::error::{IngestError, Result};

/// Extensions accepted as delimited extracts.
const EXTRACT_EXTENSIONS: [&str; 2] = ["csv", "txt"];

/// Stem suffix of normalized output files.
pub const CLEAN_SUFFIX: &str = "_clean";

/// Extracts found in a dataset folder, classified by record kind.
#[derive(Debug, Clone, Default)]
pub struct DiscoveredExtracts {
    /// Matched files per kind, sorted by filename.
    pub by_kind: BTreeMap<RecordKind, Vec<PathBuf>>,
    /// Files whose name matches no record kind.
    pub unclassified: Vec<PathBuf>,
    /// Outputs of an earlier run (`*_clean.*`), never treated as extracts.
    pub previous_outputs: Vec<PathBuf>,
}

impl DiscoveredExtracts {
    pub fn files(&self, kind: RecordKind) -> &[PathBuf] {
        self.by_kind.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.by_kind.is_empty()
    }
}

fn has_extract_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| EXTRACT_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
}

/// `.csv`/`.txt` files directly inside `dir`, sorted by file name.
pub fn list_extract_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }
    let read_error = |source: std::io::Error| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_file() && has_extract_extension(&path) {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// True for file stems produced by a normalization run.
pub fn is_clean_output(stem: &str) -> bool {
    stem.to_lowercase().ends_with(CLEAN_SUFFIX)
}

/// Discovers the extracts in `dir` and classifies them by file name.
pub fn discover_extracts(dir: &Path) -> Result<DiscoveredExtracts> {
    let mut discovered = DiscoveredExtracts::default();
    for path in list_extract_files(dir)? {
        let stem = path.file_stem().and_then(|v| v.to_str()).unwrap_or_default();
        if is_clean_output(stem) {
            tracing::debug!(path = %path.display(), "skipping previous output");
            discovered.previous_outputs.push(path);
            continue;
        }
        match match_record_kind(stem) {
            Some(kind) => discovered.by_kind.entry(kind).or_default().push(path),
            None => {
                tracing::debug!(path = %path.display(), "skipping unclassified file");
                discovered.unclassified.push(path);
            }
        }
    }
    Ok(discovered)
}

/// Matches a file stem to a record kind by keyword.
///
/// Handles names like `HSL_Pacientes_3`, `einstein_exames` or `outcomes-2020`.
pub fn match_record_kind(stem: &str) -> Option<RecordKind> {
    let name = stem.to_lowercase();
    let keywords: [(RecordKind, &[&str]); 3] = [
        (RecordKind::Patients, &["pacientes", "patients"]),
        (RecordKind::Tests, &["exames", "exams", "tests"]),
        (RecordKind::Outcomes, &["desfechos", "outcomes"]),
    ];
    keywords
        .iter()
        .find(|(_, words)| words.iter().any(|word| name.contains(word)))
        .map(|(kind, _)| *kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_source_and_english_names() {
        assert_eq!(match_record_kind("HSL_Pacientes_3"), Some(RecordKind::Patients));
        assert_eq!(match_record_kind("EINSTEIN_Exames"), Some(RecordKind::Tests));
        assert_eq!(match_record_kind("lab_tests"), Some(RecordKind::Tests));
        assert_eq!(match_record_kind("hsl_desfechos"), Some(RecordKind::Outcomes));
        assert_eq!(match_record_kind("README"), None);
    }

    #[test]
    fn recognizes_clean_outputs() {
        assert!(is_clean_output("HSL_Pacientes_3_clean"));
        assert!(is_clean_output("desfechos_CLEAN"));
        assert!(!is_clean_output("HSL_Pacientes_3"));
        assert!(!is_clean_output("cleaned_pacientes"));
    }
}
