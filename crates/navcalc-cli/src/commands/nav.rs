//! NAV command implementation.
//!
//! Summarizes a scheme's NAV history, or shows which NAV a date resolves to.

use anyhow::Result;
use clap::Args;

use navcalc_core::resolver::MatchKind;
use navcalc_returns::Review;

use crate::cli::OutputFormat;
use crate::commands::{parse_date, report_review, Context, SourceArgs};
use crate::output::{format_nav, print_header, print_json_value, print_output, KeyValue};

/// Arguments for the nav command.
#[derive(Args, Debug)]
pub struct NavArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Resolve the NAV to use on this date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,
}

/// Execute the nav command.
pub fn execute(args: NavArgs, ctx: &Context) -> Result<()> {
    let (history, series) = args.source.load_series()?;

    let mut results = vec![KeyValue::new("Scheme", history.meta.display_name())];

    if let Some(ref date) = args.date {
        let target = parse_date(date)?;
        let Some(resolution) = series.resolve_detailed(target) else {
            return report_review(Review::missing_nav(target), ctx.format);
        };

        let matched = match resolution.kind {
            MatchKind::Exact => "exact",
            MatchKind::Earlier => "earlier",
            MatchKind::Later => "later",
        };

        if ctx.format == OutputFormat::Json {
            return print_json_value(&serde_json::json!({
                "requestedDate": target,
                "navDate": resolution.point.date(),
                "nav": resolution.point.nav(),
                "match": resolution.kind,
                "distanceDays": resolution.distance_days,
            }));
        }

        results.extend([
            KeyValue::new("Requested Date", target.to_string()),
            KeyValue::new("NAV Date", resolution.point.date().to_string()),
            KeyValue::new("NAV", format_nav(resolution.point.nav())),
            KeyValue::new("Match", matched),
            KeyValue::new("Distance (days)", resolution.distance_days.to_string()),
        ]);

        if ctx.format == OutputFormat::Minimal {
            println!("{}", format_nav(resolution.point.nav()));
            return Ok(());
        }
    } else {
        let meta = &history.meta;
        if ctx.format == OutputFormat::Json {
            return print_json_value(&serde_json::json!({
                "meta": meta,
                "records": history.records.len(),
                "points": series.len(),
                "firstDate": series.earliest().map(|p| p.date()),
                "lastDate": series.latest().map(|p| p.date()),
                "latestNav": series.latest().map(|p| p.nav()),
            }));
        }

        let optional = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
        results.extend([
            KeyValue::new("Fund House", optional(&meta.fund_house)),
            KeyValue::new("Category", optional(&meta.scheme_category)),
            KeyValue::new("Records", history.records.len().to_string()),
            KeyValue::new("Valid NAVs", series.len().to_string()),
        ]);
        if let (Some(first), Some(last)) = (series.earliest(), series.latest()) {
            results.extend([
                KeyValue::new("First NAV", format!("{} ({})", format_nav(first.nav()), first.date())),
                KeyValue::new("Latest NAV", format!("{} ({})", format_nav(last.nav()), last.date())),
            ]);
        }

        if ctx.format == OutputFormat::Minimal {
            match series.latest() {
                Some(last) => println!("{} {}", last.date(), format_nav(last.nav())),
                None => println!("-"),
            }
            return Ok(());
        }
    }

    if ctx.format == OutputFormat::Table && !ctx.quiet {
        print_header("NAV History");
    }
    print_output(&results, ctx.format)?;
    Ok(())
}
