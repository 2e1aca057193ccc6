//! CLI command implementations.

pub mod config;
pub mod lumpsum;
pub mod nav;
pub mod returns;
pub mod sip;

// Re-export submodules for convenience
pub use config::ConfigArgs;
pub use lumpsum::LumpsumArgs;
pub use nav::NavArgs;
pub use returns::ReturnsArgs;
pub use sip::SipArgs;

use std::path::PathBuf;

use clap::Args;

use navcalc_core::{Date, NavSeries};
use navcalc_data::{open_file_source, NavHistorySource, SchemeHistory};
use navcalc_returns::{Review, ValuationOutcome};

use crate::cli::OutputFormat;
use crate::config::Settings;
use crate::error::{CliError, CliResult};
use crate::output::{print_json_value, print_warning};

/// State shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    /// Effective output format.
    pub format: OutputFormat,
    /// Suppress headers and informational messages.
    pub quiet: bool,
    /// Resolved settings.
    pub settings: Settings,
    /// Configuration file in use.
    pub config_path: PathBuf,
}

/// Where to load a scheme's NAV history from.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// NAV history file or directory (JSON documents or `date,nav` CSV files)
    #[arg(long, env = "NAVCALC_SOURCE")]
    pub source: PathBuf,

    /// Scheme code
    #[arg(long)]
    pub scheme: String,
}

impl SourceArgs {
    /// Loads the scheme history.
    pub fn load(&self) -> CliResult<SchemeHistory> {
        let history = open_file_source(&self.source)?.fetch(&self.scheme)?;
        tracing::debug!(
            scheme = %self.scheme,
            records = history.records.len(),
            "loaded NAV history"
        );
        Ok(history)
    }

    /// Loads and normalizes the scheme history.
    pub fn load_series(&self) -> CliResult<(SchemeHistory, NavSeries)> {
        let history = self.load()?;
        let series = history.series();
        Ok((history, series))
    }
}

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Parses an optional date, defaulting to today.
pub fn parse_date_or_today(s: Option<&str>) -> CliResult<Date> {
    s.map_or_else(|| Ok(Date::today()), parse_date)
}

/// Validates an investment amount.
pub fn validate_amount(amount: f64) -> CliResult<f64> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(CliError::InvalidAmount(amount));
    }
    Ok(amount)
}

/// Reports a `needs_review` outcome.
///
/// JSON output carries the tagged outcome so callers can branch on `status`;
/// other formats print a warning. Either way the command succeeds.
pub fn report_review(review: Review, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json_value(&ValuationOutcome::NeedsReview(review)),
        _ => {
            print_warning(&format!("Needs review: {review}"));
            Ok(())
        }
    }
}
