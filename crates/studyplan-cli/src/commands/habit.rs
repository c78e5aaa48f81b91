//! Habit tracking commands for CLI.

use chrono::NaiveDate;
use clap::Subcommand;
use studyplan_core::habit::refresh_habit;
use studyplan_core::{Habit, HabitCompletion, RecordStore, Table};

use super::{open_planner, open_store, parse_date, print_json, today, CliResult};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Add a daily habit
    Add {
        /// Habit name
        name: String,
        /// Minutes per day that count toward the streak
        #[arg(long, default_value = "1")]
        target_minutes: u32,
    },
    /// List habits with their streaks
    List,
    /// Log minutes spent on a habit
    Log {
        /// Habit ID
        id: String,
        /// Minutes spent
        #[arg(long)]
        minutes: u32,
        /// Day of the completion (YYYY-MM-DD, default: today)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Recompute every habit's streak as of today
    Refresh,
}

pub fn run(action: HabitAction) -> CliResult {
    match action {
        HabitAction::Add {
            name,
            target_minutes,
        } => {
            let mut store = open_store()?;
            let habit = Habit::new(name, target_minutes);
            habit.validate()?;
            Table::<Habit>::add(&mut store, habit.clone())?;
            print_json(&habit)?;
        }
        HabitAction::List => {
            print_json(&open_store()?.habits()?)?;
        }
        HabitAction::Log { id, minutes, date } => {
            let mut store = open_store()?;
            let habit = store
                .habits()?
                .into_iter()
                .find(|h| h.id == id)
                .ok_or_else(|| format!("habit not found: {id}"))?;
            let completion = HabitCompletion::new(&habit.id, date.unwrap_or_else(today), minutes);
            Table::<HabitCompletion>::add(&mut store, completion)?;

            let updated = refresh_habit(&habit, &store.habit_completions()?, today());
            Table::<Habit>::update(&mut store, updated.clone())?;
            print_json(&updated)?;
        }
        HabitAction::Refresh => {
            let mut planner = open_planner()?;
            print_json(&planner.refresh_habits(today())?)?;
        }
    }
    Ok(())
}
