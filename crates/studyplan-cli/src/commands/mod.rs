//! Subcommand implementations and the helpers they share.

pub mod config;
pub mod course;
pub mod deadline;
pub mod habit;
pub mod schedule;
pub mod session;
pub mod summary;
pub mod task;
pub mod window;

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use studyplan_core::{Config, Planner, SqliteStore};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Open the on-disk store wrapped in a planner using the configured scheduling parameters.
pub fn open_planner() -> Result<Planner<SqliteStore>, Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store = SqliteStore::open()?;
    Ok(Planner::with_config(store, config.scheduler()))
}

pub fn open_store() -> Result<SqliteStore, Box<dyn std::error::Error>> {
    Ok(SqliteStore::open()?)
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("invalid date '{s}' (expected YYYY-MM-DD): {e}"))
}

pub fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|e| format!("invalid time '{s}' (expected HH:MM): {e}"))
}

pub fn parse_due(s: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
        .map_err(|e| format!("invalid timestamp '{s}' (expected YYYY-MM-DDTHH:MM): {e}"))
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Monday of the week containing `date`.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// The requested week, or the current one starting Monday.
pub fn week_or_current(week: Option<NaiveDate>) -> NaiveDate {
    week.unwrap_or_else(|| monday_of(today()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cli_formats() {
        assert_eq!(parse_date("2026-10-12").unwrap(), NaiveDate::from_ymd_opt(2026, 10, 12).unwrap());
        assert_eq!(parse_time("09:30").unwrap(), NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert_eq!(
            parse_due("2026-10-16T23:59").unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 16)
                .unwrap()
                .and_hms_opt(23, 59, 0)
                .unwrap()
        );
        assert!(parse_date("12/10/2026").is_err());
        assert!(parse_time("9am").is_err());
    }

    #[test]
    fn monday_of_week() {
        let thursday = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        assert_eq!(monday_of(thursday), NaiveDate::from_ymd_opt(2026, 10, 12).unwrap());
        let sunday = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert_eq!(monday_of(sunday), NaiveDate::from_ymd_opt(2026, 10, 12).unwrap());
    }
}
