use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;
use studyplan_core::{Insight, WeeklySummary};

use super::{open_planner, parse_date, print_json, week_or_current, CliResult};

#[derive(Args)]
pub struct SummaryArgs {
    /// First day of the week (YYYY-MM-DD, default: this Monday)
    #[arg(long, value_parser = parse_date)]
    week: Option<NaiveDate>,
}

#[derive(Serialize)]
struct SummaryReport {
    #[serde(flatten)]
    summary: WeeklySummary,
    time_efficiency: u32,
    insight: Insight,
    message: String,
}

pub fn run(args: SummaryArgs) -> CliResult {
    let planner = open_planner()?;
    let summary = planner.generate_weekly_summary(week_or_current(args.week))?;
    let insight = summary.insight();
    let report = SummaryReport {
        time_efficiency: summary.time_efficiency(),
        message: insight.message(),
        insight,
        summary,
    };
    print_json(&report)
}
