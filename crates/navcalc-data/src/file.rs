//! File-based NAV history sources.
//!
//! Both sources accept either a directory holding one file per scheme
//! (`<dir>/<scheme_code>.json`, `<dir>/<scheme_code>.csv`) or a single file
//! that serves every request.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use navcalc_core::{Date, RawNavRecord};

use crate::error::{SourceError, SourceResult};
use crate::history::{SchemeHistory, SchemeMeta};
use crate::source::{NavHistorySource, SourceType};

/// Resolves the file to read for `scheme_code` under `root`.
fn scheme_file(root: &Path, scheme_code: &str, extension: &str) -> SourceResult<PathBuf> {
    if scheme_code.is_empty() || scheme_code.contains(['/', '\\']) || scheme_code.contains("..") {
        return Err(SourceError::InvalidInput(format!(
            "invalid scheme code: {scheme_code:?}"
        )));
    }

    let path = if root.is_dir() {
        root.join(format!("{scheme_code}.{extension}"))
    } else {
        root.to_path_buf()
    };

    if !path.exists() {
        return Err(SourceError::not_found(scheme_code));
    }
    Ok(path)
}

// =============================================================================
// JSON SOURCE
// =============================================================================

/// Reads scheme documents (`{"meta": ..., "data": [...]}`) from JSON files.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    root: PathBuf,
}

impl JsonFileSource {
    /// Creates a source over a directory or a single document.
    pub fn new(path: impl AsRef<Path>) -> SourceResult<Self> {
        let root = path.as_ref().to_path_buf();
        if !root.exists() {
            return Err(SourceError::SourceNotAvailable(format!(
                "{} does not exist",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    /// The configured path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.root
    }
}

impl NavHistorySource for JsonFileSource {
    fn source_type(&self) -> SourceType {
        SourceType::File
    }

    fn fetch(&self, scheme_code: &str) -> SourceResult<SchemeHistory> {
        let path = scheme_file(&self.root, scheme_code, "json")?;
        log::debug!("reading scheme {scheme_code} from {}", path.display());

        let content = std::fs::read_to_string(&path)?;
        let history: SchemeHistory =
            serde_json::from_str(&content).map_err(|e| SourceError::parse(path.display(), e))?;

        // A single document only answers for its own scheme.
        if !self.root.is_dir() {
            if let Some(code) = history.meta.scheme_code.as_deref() {
                if code != scheme_code {
                    return Err(SourceError::not_found(scheme_code));
                }
            }
        }

        Ok(history)
    }
}

// =============================================================================
// CSV SOURCE
// =============================================================================

/// CSV record for NAVs.
#[derive(Debug, Deserialize)]
struct NavRecord {
    date: String,
    nav: String,
}

/// Reads `date,nav` CSV files.
///
/// Dates may be `DD-MM-YYYY` or ISO `YYYY-MM-DD`; ISO dates are rewritten to
/// the upstream format so that normalization treats both alike.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    root: PathBuf,
}

impl CsvFileSource {
    /// Creates a source over a directory or a single file.
    pub fn new(path: impl AsRef<Path>) -> SourceResult<Self> {
        let root = path.as_ref().to_path_buf();
        if !root.exists() {
            return Err(SourceError::SourceNotAvailable(format!(
                "{} does not exist",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    /// The configured path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.root
    }
}

impl NavHistorySource for CsvFileSource {
    fn source_type(&self) -> SourceType {
        SourceType::File
    }

    fn fetch(&self, scheme_code: &str) -> SourceResult<SchemeHistory> {
        let path = scheme_file(&self.root, scheme_code, "csv")?;
        log::debug!("reading scheme {scheme_code} from {}", path.display());

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&path)?;

        let records = reader
            .deserialize::<NavRecord>()
            .map(|result| -> SourceResult<RawNavRecord> {
                let record = result.map_err(|e| SourceError::parse(path.display(), e))?;
                let date = match Date::parse(&record.date) {
                    Ok(iso) => iso.to_dmy_string(),
                    Err(_) => record.date,
                };
                Ok(RawNavRecord::new(date, record.nav))
            })
            .collect::<SourceResult<Vec<_>>>()?;

        Ok(SchemeHistory::new(SchemeMeta::with_code(scheme_code), records))
    }
}
