//! SIP command implementation.
//!
//! Values a fixed installment invested on a recurring schedule.

use anyhow::Result;
use clap::Args;
use tabled::Tabled;

use navcalc_core::Cadence;
use navcalc_returns::{clamp_range_to_series, Review, ReviewReason, SipPlan, ValuationOutcome};

use crate::cli::OutputFormat;
use crate::commands::{parse_date, report_review, validate_amount, Context, SourceArgs};
use crate::output::{
    format_amount, format_nav, print_header, print_info, print_json_value, print_output, KeyValue,
};

/// Arguments for the sip command.
#[derive(Args, Debug)]
pub struct SipArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Installment amount
    #[arg(short, long)]
    pub amount: f64,

    /// First installment date (YYYY-MM-DD)
    #[arg(long)]
    pub from: String,

    /// Last possible installment date (YYYY-MM-DD)
    #[arg(long)]
    pub to: String,

    /// Installment cadence: monthly, quarterly, half-yearly, yearly
    #[arg(short, long)]
    pub cadence: Option<String>,

    /// Do not clamp the range to the available NAV history
    #[arg(long)]
    pub no_clamp: bool,

    /// Show the installment timeline
    #[arg(long)]
    pub timeline: bool,
}

/// One installment row.
#[derive(Debug, serde::Serialize, Tabled)]
struct InstallmentRow {
    #[tabled(rename = "Scheduled")]
    scheduled: String,
    #[tabled(rename = "NAV Date")]
    nav_date: String,
    #[tabled(rename = "NAV")]
    nav: String,
    #[tabled(rename = "Units")]
    units: String,
    #[tabled(rename = "Total Units")]
    total_units: String,
    #[tabled(rename = "Invested")]
    invested: String,
    #[tabled(rename = "Value")]
    value: String,
}

/// Execute the sip command.
pub fn execute(args: SipArgs, ctx: &Context) -> Result<()> {
    let amount = validate_amount(args.amount)?;
    let from = parse_date(&args.from)?;
    let to = parse_date(&args.to)?;
    let cadence: Cadence = match args.cadence.as_deref() {
        Some(c) => c.parse()?,
        None => ctx.settings.default_cadence,
    };

    let (history, series) = args.source.load_series()?;

    let (start, end) = if ctx.settings.clamp_sip_range && !args.no_clamp && from <= to {
        match clamp_range_to_series(&series, from, to) {
            Some(range) => range,
            None => {
                let review = Review::new(
                    ReviewReason::NoInstallments,
                    "Requested range lies outside the available NAV history.",
                );
                return report_review(review, ctx.format);
            }
        }
    } else {
        (from, to)
    };

    if (start, end) != (from, to) && !ctx.quiet && ctx.format == OutputFormat::Table {
        print_info(&format!("Range clamped to available history: {start} to {end}"));
    }

    let plan = SipPlan::monthly(amount, start, end).with_cadence(cadence);
    let valuation = match plan.evaluate(&series) {
        ValuationOutcome::Computed(valuation) => valuation,
        ValuationOutcome::NeedsReview(review) => return report_review(review, ctx.format),
    };

    let precision = ctx.settings.decimal_precision;
    let results = vec![
        KeyValue::new("Scheme", history.meta.display_name()),
        KeyValue::new("Period", format!("{start} to {end}")),
        KeyValue::new("Cadence", cadence.to_string()),
        KeyValue::new("Installments", valuation.installments().to_string()),
        KeyValue::from_amount("Installment", amount, precision),
        KeyValue::from_amount("Total Invested", valuation.total_invested, precision),
        KeyValue::from_amount("Current Value", valuation.current_value, precision),
        KeyValue::from_amount("Gain", valuation.gain(), precision),
        KeyValue::new("Total Units", format!("{:.4}", valuation.total_units)),
        KeyValue::from_percent("Absolute Return", valuation.absolute_return_pct, precision),
        KeyValue::from_percent("Annualized Return", valuation.annualized_return_pct, precision),
    ];

    let rows: Vec<InstallmentRow> = valuation
        .timeline
        .iter()
        .map(|s| InstallmentRow {
            scheduled: s.scheduled_date.to_string(),
            nav_date: s.date.to_string(),
            nav: format_nav(s.nav_used),
            units: format!("{:.4}", s.units_bought),
            total_units: format!("{:.4}", s.cumulative_units),
            invested: format_amount(s.cumulative_invested, precision),
            value: format_amount(s.value_at_that_date, precision),
        })
        .collect();

    match ctx.format {
        OutputFormat::Table => {
            if !ctx.quiet {
                print_header("SIP Valuation");
            }
            print_output(&results, ctx.format)?;

            if args.timeline {
                if !ctx.quiet {
                    print_header("Installments");
                }
                print_output(&rows, ctx.format)?;
            }
        }
        OutputFormat::Json => {
            print_json_value(&ValuationOutcome::Computed(valuation))?;
        }
        OutputFormat::Csv => {
            if args.timeline {
                print_output(&rows, ctx.format)?;
            } else {
                print_output(&results, ctx.format)?;
            }
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
