//! Scheme history documents.
//!
//! The document shape follows the public mutual-fund NAV feeds:
//!
//! ```json
//! {
//!   "meta": { "scheme_code": 119551, "scheme_name": "...", "fund_house": "..." },
//!   "data": [ { "date": "30-06-2023", "nav": "130.4521" } ]
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize};

use navcalc_core::{NavSeries, RawNavRecord};

/// Descriptive information about a scheme. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeMeta {
    /// Scheme identifier. Feeds send it as a number or a string.
    #[serde(default, deserialize_with = "code_as_string")]
    pub scheme_code: Option<String>,
    /// Display name.
    #[serde(default)]
    pub scheme_name: Option<String>,
    /// Asset management company.
    #[serde(default)]
    pub fund_house: Option<String>,
    /// e.g. "Open Ended Schemes".
    #[serde(default)]
    pub scheme_type: Option<String>,
    /// e.g. "Equity Scheme - Large Cap Fund".
    #[serde(default)]
    pub scheme_category: Option<String>,
}

impl SchemeMeta {
    /// Meta carrying only a scheme code.
    #[must_use]
    pub fn with_code(scheme_code: impl Into<String>) -> Self {
        Self {
            scheme_code: Some(scheme_code.into()),
            ..Self::default()
        }
    }

    /// The scheme name, falling back to the code.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.scheme_name
            .as_deref()
            .or(self.scheme_code.as_deref())
            .unwrap_or("unknown scheme")
    }
}

fn code_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Number(u64),
        Text(String),
    }

    Ok(Option::<Code>::deserialize(deserializer)?.map(|code| match code {
        Code::Number(n) => n.to_string(),
        Code::Text(s) => s,
    }))
}

/// A scheme's metadata and its raw NAV records, as delivered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemeHistory {
    /// Scheme metadata.
    #[serde(default)]
    pub meta: SchemeMeta,
    /// Raw records, in upstream order.
    #[serde(rename = "data", default)]
    pub records: Vec<RawNavRecord>,
}

impl SchemeHistory {
    /// Creates a history.
    #[must_use]
    pub fn new(meta: SchemeMeta, records: Vec<RawNavRecord>) -> Self {
        Self { meta, records }
    }

    /// Normalizes the raw records into a sorted, validated series.
    #[must_use]
    pub fn series(&self) -> NavSeries {
        NavSeries::from_raw(&self.records)
    }
}
