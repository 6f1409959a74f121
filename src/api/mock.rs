//! Offline row source backed by a JSON file.

use super::types::{extract_rows, ReportQuery};
use super::RowSource;
use crate::parser::schema::RawRow;
use crate::utils::error::FetchError;
use log::{debug, info};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Reads rows from a static file instead of the API
///
/// The file holds either a bare array of rows or a full response
/// object; both go through the same extraction as live responses.
#[derive(Debug, Clone)]
pub struct MockSource {
    path: PathBuf,
}

impl MockSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Load rows from a mock data file
pub fn load_mock_rows(path: impl AsRef<Path>) -> Result<Vec<RawRow>, FetchError> {
    let path = path.as_ref();

    debug!("Reading mock rows from: {}", path.display());

    let file = File::open(path).map_err(FetchError::MockRead)?;
    let body: serde_json::Value =
        serde_json::from_reader(BufReader::new(file)).map_err(FetchError::MockParse)?;

    Ok(extract_rows(body)?.rows)
}

impl RowSource for MockSource {
    fn fetch_rows(&self, query: &ReportQuery) -> Result<Vec<RawRow>, FetchError> {
        debug!("Mock source ignores query range {} -> {}", query.from, query.to);

        let rows = load_mock_rows(&self.path)?;
        info!("Loaded {} mock rows", rows.len());
        Ok(rows)
    }

    fn describe(&self) -> String {
        format!("mock file {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_bare_array() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"columns": {{"offer": {{"id": 1, "name": "A"}}}}, "metrics": {{"revenue": 10}}}}]"#
        )
        .unwrap();

        let rows = load_mock_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_load_response_shaped_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"table": [], "rows": [{{}}, {{}}]}}"#).unwrap();

        let rows = MockSource::new(file.path())
            .fetch_rows(&ReportQuery::new("2024-01-01", "2024-01-02"))
            .unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_missing_file() {
        let result = load_mock_rows("does/not/exist.json");
        assert!(matches!(result, Err(FetchError::MockRead(_))));
    }

    #[test]
    fn test_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(matches!(
            load_mock_rows(file.path()),
            Err(FetchError::MockParse(_))
        ));
    }
}
