//! The NAV history source trait and an in-memory implementation.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::error::{SourceError, SourceResult};
use crate::history::SchemeHistory;

/// Where a source gets its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// File-based (JSON, CSV)
    File,
    /// Held in memory
    Memory,
    /// Served from a cache in front of another source
    Cached,
}

/// Provides NAV histories by scheme code.
pub trait NavHistorySource: Send + Sync {
    /// Source type.
    fn source_type(&self) -> SourceType;

    /// Loads the history of `scheme_code`.
    fn fetch(&self, scheme_code: &str) -> SourceResult<SchemeHistory>;
}

impl<S: NavHistorySource + ?Sized> NavHistorySource for Box<S> {
    fn source_type(&self) -> SourceType {
        (**self).source_type()
    }

    fn fetch(&self, scheme_code: &str) -> SourceResult<SchemeHistory> {
        (**self).fetch(scheme_code)
    }
}

/// Preloaded histories, for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemorySource {
    histories: DashMap<String, SchemeHistory>,
}

impl InMemorySource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a history.
    pub fn insert(&self, scheme_code: impl Into<String>, history: SchemeHistory) {
        self.histories.insert(scheme_code.into(), history);
    }

    /// Adds a history, builder style.
    #[must_use]
    pub fn with(self, scheme_code: impl Into<String>, history: SchemeHistory) -> Self {
        self.insert(scheme_code, history);
        self
    }

    /// Number of schemes held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.histories.len()
    }

    /// Returns true if no scheme is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.histories.is_empty()
    }
}

impl NavHistorySource for InMemorySource {
    fn source_type(&self) -> SourceType {
        SourceType::Memory
    }

    fn fetch(&self, scheme_code: &str) -> SourceResult<SchemeHistory> {
        self.histories
            .get(scheme_code)
            .map(|h| h.clone())
            .ok_or_else(|| SourceError::not_found(scheme_code))
    }
}
