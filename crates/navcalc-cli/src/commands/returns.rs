//! Returns command implementation.
//!
//! Point-to-point returns for an explicit range, one preset period, or every
//! preset period ending on a date.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use navcalc_core::Date;
use navcalc_returns::{
    compute_holding_period_return, compute_period_returns, validation::validate_range, HoldingPeriod,
    HoldingPeriodReturn, PeriodReturn,
};

use crate::cli::OutputFormat;
use crate::commands::{parse_date, parse_date_or_today, report_review, Context, SourceArgs};
use crate::error::CliError;
use crate::output::{format_nav, format_percent, print_header, print_json_value, print_output, print_warning};

/// Arguments for the returns command.
#[derive(Args, Debug)]
pub struct ReturnsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Preset period: 1m, 3m, 6m, 1y, 3y, 5y
    #[arg(short, long, conflicts_with_all = ["from", "all_periods"])]
    pub period: Option<String>,

    /// Start date (YYYY-MM-DD); requires --to
    #[arg(long, requires = "to")]
    pub from: Option<String>,

    /// End date (YYYY-MM-DD)
    #[arg(long, requires = "from")]
    pub to: Option<String>,

    /// Every preset period
    #[arg(long)]
    pub all_periods: bool,

    /// End date for preset periods (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub as_of: Option<String>,
}

/// One return row.
#[derive(Debug, Serialize, Tabled)]
struct ReturnRow {
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Start NAV")]
    start_nav: String,
    #[tabled(rename = "End NAV")]
    end_nav: String,
    #[tabled(rename = "Return")]
    simple_return: String,
    #[tabled(rename = "Annualized")]
    annualized: String,
}

impl ReturnRow {
    fn new(label: String, result: Option<&HoldingPeriodReturn>, precision: usize) -> Self {
        let na = || "n/a".to_string();
        Self {
            period: label,
            from: result.map_or_else(na, |r| r.start_date.to_string()),
            to: result.map_or_else(na, |r| r.end_date.to_string()),
            start_nav: result.map_or_else(na, |r| format_nav(r.start_nav)),
            end_nav: result.map_or_else(na, |r| format_nav(r.end_nav)),
            simple_return: result.map_or_else(na, |r| format_percent(r.simple_return_pct, precision)),
            annualized: result.map_or_else(na, |r| format_percent(r.annualized_return_pct, precision)),
        }
    }
}

/// Execute the returns command.
pub fn execute(args: ReturnsArgs, ctx: &Context) -> Result<()> {
    let (history, series) = args.source.load_series()?;
    let precision = ctx.settings.decimal_precision;

    let rows: Vec<ReturnRow> = if let (Some(from), Some(to)) = (&args.from, &args.to) {
        let (from, to) = (parse_date(from)?, parse_date(to)?);
        if let Err(review) = validate_range(from, to) {
            return report_review(review, ctx.format);
        }
        let result = compute_holding_period_return(&series, from, to);
        if result.is_none() {
            print_warning("Needs review: no NAV data for the requested range.");
        }
        if ctx.format == OutputFormat::Json {
            return print_json_value(&result);
        }
        vec![ReturnRow::new(format!("{from} to {to}"), result.as_ref(), precision)]
    } else {
        let as_of: Date = parse_date_or_today(args.as_of.as_deref())?;
        let results: Vec<PeriodReturn> = match args.period.as_deref() {
            Some(p) => {
                let period: HoldingPeriod = p
                    .parse()
                    .map_err(|_| CliError::InvalidArgument { name: "period", value: p.to_string() })?;
                let (start, end) = period.range_ending(as_of)?;
                vec![PeriodReturn {
                    period,
                    result: compute_holding_period_return(&series, start, end),
                }]
            }
            None => {
                if !args.all_periods {
                    tracing::debug!("no period or range given, computing every preset");
                }
                compute_period_returns(&series, as_of)?
            }
        };

        if ctx.format == OutputFormat::Json {
            return print_json_value(&results);
        }
        results
            .iter()
            .map(|r| ReturnRow::new(r.period.to_string(), r.result.as_ref(), precision))
            .collect()
    };

    match ctx.format {
        OutputFormat::Table => {
            if !ctx.quiet {
                print_header(&format!("Returns: {}", history.meta.display_name()));
            }
            print_output(&rows, ctx.format)?;
        }
        OutputFormat::Csv | OutputFormat::Json => {
            print_output(&rows, ctx.format)?;
        }
        OutputFormat::Minimal => {
            for row in &rows {
                println!("{} {}", row.period, row.simple_return);
            }
        }
    }

    Ok(())
}
