//! Config command implementation.
//!
//! Manages CLI configuration settings.

use anyhow::Result;
use clap::{Args, Subcommand};
use std::collections::BTreeMap;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::config::{ConfigKey, ConfigStore};
use crate::output::{print_header, print_info, print_output, print_success, print_warning, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// List available configuration keys
    List,

    /// Reset configuration to defaults
    Reset(ResetArgs),

    /// Show configuration file location
    Path,
}

/// Arguments for get subcommand.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key
    pub key: String,
}

/// Arguments for set subcommand.
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key
    pub key: String,

    /// Configuration value
    pub value: String,
}

/// Arguments for reset subcommand.
#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Reset all settings (not just one)
    #[arg(long)]
    pub all: bool,

    /// Specific key to reset (optional)
    pub key: Option<String>,
}

fn lookup_key(name: &str) -> Result<ConfigKey> {
    ConfigKey::from_name(name).ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {name}"))
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &Context) -> Result<()> {
    let store = ConfigStore::load(&ctx.config_path)?;
    match args.command {
        ConfigCommand::Show => execute_show(&store, ctx.format),
        ConfigCommand::Get(get_args) => execute_get(&store, get_args, ctx.format),
        ConfigCommand::Set(set_args) => execute_set(store, set_args, ctx.quiet),
        ConfigCommand::List => execute_list(ctx.format),
        ConfigCommand::Reset(reset_args) => execute_reset(store, reset_args, ctx.quiet),
        ConfigCommand::Path => execute_path(&store),
    }
}

/// Show current configuration.
fn execute_show(store: &ConfigStore, format: OutputFormat) -> Result<()> {
    let results: Vec<KeyValue> = ConfigKey::all()
        .iter()
        .map(|key| KeyValue::new(key.as_str(), store.get_or_default(*key)))
        .collect();

    match format {
        OutputFormat::Table => {
            print_header("Current Configuration");
            print_output(&results, format)?;
        }
        OutputFormat::Json => {
            let output: BTreeMap<&str, &str> = ConfigKey::all()
                .iter()
                .map(|key| (key.as_str(), store.get_or_default(*key)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Csv => {
            print_output(&results, format)?;
        }
        OutputFormat::Minimal => {
            for kv in &results {
                println!("{}={}", kv.key, kv.value);
            }
        }
    }

    Ok(())
}

/// Get a configuration value.
fn execute_get(store: &ConfigStore, args: GetArgs, format: OutputFormat) -> Result<()> {
    let key = lookup_key(&args.key)?;
    let value = store.get_or_default(key);

    match format {
        OutputFormat::Table | OutputFormat::Csv => {
            println!("{}: {}", key.as_str(), value);
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "key": key.as_str(),
                "value": value
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Minimal => {
            println!("{value}");
        }
    }

    Ok(())
}

/// Set a configuration value.
fn execute_set(mut store: ConfigStore, args: SetArgs, quiet: bool) -> Result<()> {
    let key = lookup_key(&args.key)?;
    key.validate(&args.value)?;

    store.set(key, args.value.clone());
    store.save()?;

    if !quiet {
        print_success(&format!("Set {} = {}", key.as_str(), args.value));
    }
    Ok(())
}

/// List available configuration keys.
fn execute_list(format: OutputFormat) -> Result<()> {
    let results: Vec<KeyValue> = ConfigKey::all()
        .iter()
        .map(|key| {
            KeyValue::new(
                key.as_str(),
                format!("{} (default: {})", key.description(), key.default_value()),
            )
        })
        .collect();

    match format {
        OutputFormat::Table => {
            print_header("Available Configuration Keys");
            print_output(&results, format)?;
        }
        OutputFormat::Json => {
            let output: Vec<_> = ConfigKey::all()
                .iter()
                .map(|key| {
                    serde_json::json!({
                        "key": key.as_str(),
                        "description": key.description(),
                        "default": key.default_value()
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Csv => {
            print_output(&results, format)?;
        }
        OutputFormat::Minimal => {
            for key in ConfigKey::all() {
                println!("{}", key.as_str());
            }
        }
    }

    Ok(())
}

/// Reset configuration.
fn execute_reset(mut store: ConfigStore, args: ResetArgs, quiet: bool) -> Result<()> {
    if args.all {
        store.clear();
        store.save()?;
        if !quiet {
            print_success("Reset all configuration to defaults");
        }
    } else if let Some(name) = args.key {
        let key = lookup_key(&name)?;
        store.remove(key);
        store.save()?;
        if !quiet {
            print_success(&format!("Reset {} to default ({})", key.as_str(), key.default_value()));
        }
    } else {
        print_warning("Use --all to reset all settings, or specify a key to reset");
    }

    Ok(())
}

/// Show configuration file path.
fn execute_path(store: &ConfigStore) -> Result<()> {
    let path = store.path();
    print_info(&format!("Config file: {}", path.display()));
    if path.exists() {
        print_info("Status: exists");
    } else {
        print_info("Status: not created yet (using defaults)");
    }
    Ok(())
}
