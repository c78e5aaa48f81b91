use chrono::NaiveDate;
use clap::Subcommand;
use studyplan_core::{RecordStore, ScheduleOptions};

use super::{open_planner, parse_date, print_json, week_or_current, CliResult};

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Generate the week's schedule, replacing any existing one
    Generate {
        /// First day of the week (YYYY-MM-DD, default: this Monday)
        #[arg(long, value_parser = parse_date)]
        week: Option<NaiveDate>,
        /// Short break length in minutes
        #[arg(long)]
        short_break: Option<u32>,
        /// Long break length in minutes
        #[arg(long)]
        long_break: Option<u32>,
        /// Continuous work ceiling in hours
        #[arg(long)]
        max_hours: Option<f64>,
    },
    /// Show the week's stored blocks
    Show {
        /// First day of the week (YYYY-MM-DD, default: this Monday)
        #[arg(long, value_parser = parse_date)]
        week: Option<NaiveDate>,
    },
    /// Totals for the week's stored blocks
    Stats {
        /// First day of the week (YYYY-MM-DD, default: this Monday)
        #[arg(long, value_parser = parse_date)]
        week: Option<NaiveDate>,
    },
}

pub fn run(action: ScheduleAction) -> CliResult {
    let mut planner = open_planner()?;
    match action {
        ScheduleAction::Generate {
            week,
            short_break,
            long_break,
            max_hours,
        } => {
            let options = ScheduleOptions {
                short_break_minutes: short_break,
                long_break_minutes: long_break,
                max_continuous_hours: max_hours,
                ..ScheduleOptions::new(week_or_current(week))
            };
            let outcome = planner.generate_weekly_schedule(&options)?;
            for partial in &outcome.partial {
                eprintln!(
                    "warning: {} minutes of '{}' did not fit this week",
                    partial.unscheduled_minutes, partial.title
                );
            }
            print_json(&outcome)?;
        }
        ScheduleAction::Show { week } => {
            let blocks = planner.store().blocks_by_week(week_or_current(week))?;
            print_json(&blocks)?;
        }
        ScheduleAction::Stats { week } => {
            print_json(&planner.get_weekly_stats(week_or_current(week))?)?;
        }
    }
    Ok(())
}
