//! # NavCalc Data
//!
//! NAV history sources for the NavCalc engine.
//!
//! This crate provides:
//! - The [`NavHistorySource`] trait, keyed by scheme code
//! - JSON and CSV file sources, and an in-memory source for tests
//! - A TTL cache ([`TtlCache`]) and a caching decorator ([`CachedSource`])
//!
//! Sources deliver raw records; normalization happens in
//! [`SchemeHistory::series`].

#![warn(missing_docs)]
#![warn(clippy::all)]

mod cache;
mod error;
mod file;
mod history;
mod source;

pub use cache::*;
pub use error::*;
pub use file::*;
pub use history::*;
pub use source::*;

use std::path::Path;

/// Opens a file source, choosing the format from the path.
///
/// A `.csv` file is read as CSV; a `.json` file or a directory as JSON
/// documents, unless the directory only holds `.csv` files.
pub fn open_file_source(path: impl AsRef<Path>) -> SourceResult<Box<dyn NavHistorySource>> {
    let path = path.as_ref();
    if is_csv(path)? {
        Ok(Box::new(CsvFileSource::new(path)?))
    } else {
        Ok(Box::new(JsonFileSource::new(path)?))
    }
}

fn is_csv(path: &Path) -> SourceResult<bool> {
    let has_csv_extension =
        |p: &Path| p.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    if !path.is_dir() {
        return Ok(has_csv_extension(path));
    }

    let mut saw_csv = false;
    for entry in std::fs::read_dir(path)? {
        let entry_path = entry?.path();
        if has_csv_extension(&entry_path) {
            saw_csv = true;
        } else if entry_path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        {
            return Ok(false);
        }
    }
    Ok(saw_csv)
}
