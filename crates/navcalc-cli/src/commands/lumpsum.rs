//! Lump-sum command implementation.

use anyhow::Result;
use clap::Args;

use navcalc_returns::{LumpsumPlan, ValuationOutcome};

use crate::cli::OutputFormat;
use crate::commands::{parse_date, report_review, validate_amount, Context, SourceArgs};
use crate::output::{format_amount, format_nav, print_header, print_json_value, print_output, KeyValue};

/// Arguments for the lumpsum command.
#[derive(Args, Debug)]
pub struct LumpsumArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Amount invested
    #[arg(short, long)]
    pub amount: f64,

    /// Purchase date (YYYY-MM-DD)
    #[arg(long)]
    pub from: String,

    /// Valuation date (YYYY-MM-DD)
    #[arg(long)]
    pub to: String,
}

/// Execute the lumpsum command.
pub fn execute(args: LumpsumArgs, ctx: &Context) -> Result<()> {
    let amount = validate_amount(args.amount)?;
    let from = parse_date(&args.from)?;
    let to = parse_date(&args.to)?;

    let (history, series) = args.source.load_series()?;

    let valuation = match LumpsumPlan::new(amount, from, to).evaluate(&series) {
        ValuationOutcome::Computed(valuation) => valuation,
        ValuationOutcome::NeedsReview(review) => return report_review(review, ctx.format),
    };

    let precision = ctx.settings.decimal_precision;
    let mut results = vec![
        KeyValue::new("Scheme", history.meta.display_name()),
        KeyValue::new("Period", format!("{from} to {to}")),
    ];
    if let Some(purchase) = valuation.timeline.first() {
        results.push(KeyValue::new(
            "Purchase NAV",
            format!("{} ({})", format_nav(purchase.nav_used), purchase.date),
        ));
    }
    results.extend([
        KeyValue::from_amount("Invested", valuation.total_invested, precision),
        KeyValue::from_amount("Current Value", valuation.current_value, precision),
        KeyValue::from_amount("Gain", valuation.gain(), precision),
        KeyValue::new("Units", format!("{:.4}", valuation.total_units)),
        KeyValue::from_percent("Absolute Return", valuation.absolute_return_pct, precision),
        KeyValue::from_percent("Annualized Return", valuation.annualized_return_pct, precision),
    ]);

    match ctx.format {
        OutputFormat::Table => {
            if !ctx.quiet {
                print_header("Lump-sum Valuation");
            }
            print_output(&results, ctx.format)?;
        }
        OutputFormat::Json => {
            print_json_value(&ValuationOutcome::Computed(valuation))?;
        }
        OutputFormat::Csv => {
            print_output(&results, ctx.format)?;
        }
        OutputFormat::Minimal => {
            println!(
                "{} {}",
                format_amount(valuation.current_value, precision),
                format_amount(valuation.annualized_return_pct, precision)
            );
        }
    }

    Ok(())
}
