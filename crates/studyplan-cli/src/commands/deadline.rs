//! Deadline commands for CLI.

use chrono::NaiveDateTime;
use clap::Subcommand;
use studyplan_core::{Deadline, Priority, RecordStore, Table};
use uuid::Uuid;

use super::{open_store, parse_due, print_json, CliResult};

#[derive(Subcommand)]
pub enum DeadlineAction {
    /// Add a deadline
    Add {
        /// Deadline title
        title: String,
        /// Course ID
        #[arg(long)]
        course: String,
        /// Due timestamp (YYYY-MM-DDTHH:MM)
        #[arg(long, value_parser = parse_due)]
        due: NaiveDateTime,
        /// Priority: low, medium or high
        #[arg(long, default_value = "medium")]
        priority: Priority,
    },
    /// List deadlines
    List {
        /// Include completed deadlines
        #[arg(long)]
        all: bool,
    },
    /// Mark a deadline completed
    Done {
        /// Deadline ID
        id: String,
    },
}

pub fn run(action: DeadlineAction) -> CliResult {
    let mut store = open_store()?;
    match action {
        DeadlineAction::Add {
            title,
            course,
            due,
            priority,
        } => {
            let deadline = Deadline {
                id: Uuid::new_v4().to_string(),
                title,
                course_id: course,
                due_at: due,
                priority,
                completed: false,
            };
            Table::<Deadline>::add(&mut store, deadline.clone())?;
            print_json(&deadline)?;
        }
        DeadlineAction::List { all } => {
            let mut deadlines: Vec<Deadline> = store
                .deadlines()?
                .into_iter()
                .filter(|d| all || !d.completed)
                .collect();
            deadlines.sort_by_key(|d| d.due_at);
            print_json(&deadlines)?;
        }
        DeadlineAction::Done { id } => {
            let mut deadline = store
                .deadlines()?
                .into_iter()
                .find(|d| d.id == id)
                .ok_or_else(|| format!("deadline not found: {id}"))?;
            deadline.completed = true;
            Table::<Deadline>::update(&mut store, deadline.clone())?;
            print_json(&deadline)?;
        }
    }
    Ok(())
}
