//! NavCalc CLI - Command-line interface for NAV-based return calculations.
//!
//! # Usage
//!
//! ```bash
//! # Value a monthly SIP
//! navcalc sip --source navs/ --scheme 119551 --amount 5000 --from 2020-01-01 --to 2024-12-31
//!
//! # Value a lump-sum investment
//! navcalc lumpsum --source navs/ --scheme 119551 --amount 100000 --from 2019-04-01 --to 2024-03-31
//!
//! # Trailing returns as of a date
//! navcalc returns --source navs/ --scheme 119551 --all-periods --as-of 2024-06-28
//!
//! # Which NAV applies to a holiday
//! navcalc nav --source navs/ --scheme 119551 --date 2024-01-26
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::Context;
use config::{default_config_path, ConfigStore, Settings};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config_path = match cli.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    tracing::debug!(path = %config_path.display(), "using configuration file");

    let settings = match ConfigStore::load(&config_path).and_then(|store| Settings::from_store(&store)) {
        Ok(settings) => settings,
        // Let the config command repair a broken file.
        Err(e) if matches!(cli.command, Commands::Config(_)) => {
            output::print_warning(&format!("{e}; using defaults"));
            Settings::default()
        }
        Err(e) => return Err(e.into()),
    };

    if !settings.use_colors {
        colored::control::set_override(false);
    }

    let ctx = Context {
        format: cli.format.unwrap_or(settings.default_format),
        quiet: cli.quiet,
        settings,
        config_path,
    };

    // Execute command
    match cli.command {
        Commands::Sip(args) => commands::sip::execute(args, &ctx)?,
        Commands::Lumpsum(args) => commands::lumpsum::execute(args, &ctx)?,
        Commands::Returns(args) => commands::returns::execute(args, &ctx)?,
        Commands::Nav(args) => commands::nav::execute(args, &ctx)?,
        Commands::Config(args) => commands::config::execute(args, &ctx)?,
    }

    Ok(())
}

/// Installs the log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `-v` selects debug and `-vv` trace.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string());

    tracing_subscriber::registry()
        .with(EnvFilter::new(filter))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
