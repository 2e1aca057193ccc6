//! CLI configuration storage and typed settings.
//!
//! Settings live in a flat JSON object (`{"default_format": "json", ...}`)
//! under the platform config directory. Missing keys take their defaults.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use navcalc_core::Cadence;

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};

/// CLI configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// Default output format
    DefaultFormat,
    /// Default SIP cadence
    DefaultCadence,
    /// Whether SIP ranges are clamped to the available history
    ClampSipRange,
    /// Precision for decimal output
    DecimalPrecision,
    /// Whether to use colors
    UseColors,
}

impl ConfigKey {
    /// Looks up a key by name or alias.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "default_format" | "format" => Some(Self::DefaultFormat),
            "default_cadence" | "cadence" => Some(Self::DefaultCadence),
            "clamp_sip_range" | "clamp" => Some(Self::ClampSipRange),
            "decimal_precision" | "precision" => Some(Self::DecimalPrecision),
            "use_colors" | "colors" => Some(Self::UseColors),
            _ => None,
        }
    }

    /// Canonical key name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DefaultFormat => "default_format",
            Self::DefaultCadence => "default_cadence",
            Self::ClampSipRange => "clamp_sip_range",
            Self::DecimalPrecision => "decimal_precision",
            Self::UseColors => "use_colors",
        }
    }

    /// One-line description for `config list`.
    pub fn description(&self) -> &'static str {
        match self {
            Self::DefaultFormat => "Default output format (table, json, csv, minimal)",
            Self::DefaultCadence => "Default SIP cadence (monthly, quarterly, half-yearly, yearly)",
            Self::ClampSipRange => "Clamp SIP ranges to the available NAV history (true, false)",
            Self::DecimalPrecision => "Number of decimal places for output (2-10)",
            Self::UseColors => "Enable colored output (true, false)",
        }
    }

    /// Default value as stored text.
    pub fn default_value(&self) -> &'static str {
        match self {
            Self::DefaultFormat => "table",
            Self::DefaultCadence => "monthly",
            Self::ClampSipRange => "true",
            Self::DecimalPrecision => "2",
            Self::UseColors => "true",
        }
    }

    /// Every key, in display order.
    pub fn all() -> &'static [Self] {
        &[
            Self::DefaultFormat,
            Self::DefaultCadence,
            Self::ClampSipRange,
            Self::DecimalPrecision,
            Self::UseColors,
        ]
    }

    /// Validates a value for this key.
    pub fn validate(&self, value: &str) -> CliResult<()> {
        let invalid = |hint: &str| CliError::Config(format!("Invalid {}: {value}. {hint}", self.as_str()));

        match self {
            Self::DefaultFormat => {
                OutputFormat::parse(value).ok_or_else(|| invalid("Use table, json, csv, or minimal."))?;
            }
            Self::DefaultCadence => {
                value
                    .parse::<Cadence>()
                    .map_err(|_| invalid("Use monthly, quarterly, half-yearly, or yearly."))?;
            }
            Self::DecimalPrecision => {
                let precision: usize = value.parse().map_err(|_| invalid("Must be a number."))?;
                if !(2..=10).contains(&precision) {
                    return Err(invalid("Must be between 2 and 10."));
                }
            }
            Self::ClampSipRange | Self::UseColors => {
                parse_bool(value).ok_or_else(|| invalid("Use true or false."))?;
            }
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Simple config storage.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigStore {
    #[serde(skip)]
    path: PathBuf,
    #[serde(flatten)]
    values: HashMap<String, String>,
}

impl ConfigStore {
    /// Loads the store at `path`, or an empty one if the file does not exist.
    pub fn load(path: &Path) -> CliResult<Self> {
        let mut store = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content)
                .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?
        } else {
            Self::default()
        };
        store.path = path.to_path_buf();
        Ok(store)
    }

    /// Writes the store back to its file.
    pub fn save(&self) -> CliResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    /// File backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored value, or the key's default.
    pub fn get_or_default(&self, key: ConfigKey) -> &str {
        self.values
            .get(key.as_str())
            .map_or(key.default_value(), String::as_str)
    }

    /// Stores a value.
    pub fn set(&mut self, key: ConfigKey, value: String) {
        self.values.insert(key.as_str().to_string(), value);
    }

    /// Removes a stored value.
    pub fn remove(&mut self, key: ConfigKey) {
        self.values.remove(key.as_str());
    }

    /// Removes every stored value.
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

/// Default config file path.
pub fn default_config_path() -> CliResult<PathBuf> {
    let home = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| CliError::Config("Could not determine config directory".into()))?;
    Ok(home.join("navcalc").join("config.json"))
}

/// Resolved settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Output format when `--format` is not given.
    pub default_format: OutputFormat,
    /// SIP cadence when `--cadence` is not given.
    pub default_cadence: Cadence,
    /// Clamp SIP ranges to the available history.
    pub clamp_sip_range: bool,
    /// Decimal places for amounts and percentages.
    pub decimal_precision: usize,
    /// Colored output.
    pub use_colors: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::Table,
            default_cadence: Cadence::Monthly,
            clamp_sip_range: true,
            decimal_precision: 2,
            use_colors: true,
        }
    }
}

impl Settings {
    /// Resolves settings from a store, validating every stored value.
    pub fn from_store(store: &ConfigStore) -> CliResult<Self> {
        for key in ConfigKey::all() {
            key.validate(store.get_or_default(*key))?;
        }

        let text = |key: ConfigKey| store.get_or_default(key);
        let number = |key: ConfigKey| {
            text(key)
                .parse::<u64>()
                .map_err(|_| CliError::Config(format!("Invalid {}", key.as_str())))
        };

        Ok(Self {
            default_format: OutputFormat::parse(text(ConfigKey::DefaultFormat)).unwrap_or_default(),
            default_cadence: text(ConfigKey::DefaultCadence).parse()?,
            clamp_sip_range: parse_bool(text(ConfigKey::ClampSipRange)).unwrap_or(true),
            decimal_precision: usize::try_from(number(ConfigKey::DecimalPrecision)?).unwrap_or(2),
            use_colors: parse_bool(text(ConfigKey::UseColors)).unwrap_or(true),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_settings_default() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::load(&dir.path().join("config.json")).unwrap();
        let settings = Settings::from_store(&store).unwrap();
        let expected = Settings::default();

        assert_eq!(settings.default_format, expected.default_format);
        assert_eq!(settings.default_cadence, expected.default_cadence);
        assert_eq!(settings.clamp_sip_range, expected.clamp_sip_range);
        assert_eq!(settings.decimal_precision, expected.decimal_precision);
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut store = ConfigStore::load(&path).unwrap();
        store.set(ConfigKey::DefaultCadence, "quarterly".into());
        store.set(ConfigKey::ClampSipRange, "no".into());
        store.save().unwrap();

        let reloaded = ConfigStore::load(&path).unwrap();
        let settings = Settings::from_store(&reloaded).unwrap();
        assert_eq!(settings.default_cadence, Cadence::Quarterly);
        assert!(!settings.clamp_sip_range);
    }

    #[test]
    fn test_validation() {
        assert!(ConfigKey::DefaultFormat.validate("json").is_ok());
        assert!(ConfigKey::DefaultFormat.validate("xml").is_err());
        assert!(ConfigKey::DecimalPrecision.validate("11").is_err());
        assert!(ConfigKey::UseColors.validate("maybe").is_err());
    }

    #[test]
    fn test_unknown_keys_are_rejected_and_ignored() {
        assert_eq!(ConfigKey::from_name("cache_ttl_hours"), None);

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"cache_ttl_hours": "0", "legacy_key": "x"}"#).unwrap();

        let store = ConfigStore::load(&path).unwrap();
        let settings = Settings::from_store(&store).unwrap();
        assert_eq!(settings.decimal_precision, 2);
    }
}
