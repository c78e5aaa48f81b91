//! Availability window commands for CLI.

use chrono::NaiveTime;
use clap::Subcommand;
use studyplan_core::{AvailabilityWindow, RecordStore, Table};

use super::{open_store, parse_time, print_json, CliResult};

#[derive(Subcommand)]
pub enum WindowAction {
    /// Add a recurring weekly window
    Add {
        /// Day of week, 0 = Sunday .. 6 = Saturday
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=6))]
        day: u8,
        /// Start time (HH:MM)
        #[arg(long, value_parser = parse_time)]
        start: NaiveTime,
        /// End time (HH:MM)
        #[arg(long, value_parser = parse_time)]
        end: NaiveTime,
    },
    /// List windows
    List,
    /// Remove a window
    Remove {
        /// Window ID
        id: String,
    },
}

pub fn run(action: WindowAction) -> CliResult {
    let mut store = open_store()?;
    match action {
        WindowAction::Add { day, start, end } => {
            let window = AvailabilityWindow::new(day, start, end);
            window.validate()?;
            Table::<AvailabilityWindow>::add(&mut store, window.clone())?;
            print_json(&window)?;
        }
        WindowAction::List => {
            let mut windows = store.availability()?;
            windows.sort_by_key(|w| (w.day_of_week, w.start_time));
            print_json(&windows)?;
        }
        WindowAction::Remove { id } => {
            Table::<AvailabilityWindow>::remove(&mut store, &id)?;
            println!("window removed: {id}");
        }
    }
    Ok(())
}
