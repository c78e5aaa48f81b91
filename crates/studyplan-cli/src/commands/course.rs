//! Course management commands for CLI.

use clap::Subcommand;
use studyplan_core::{Course, RecordStore, Table};
use uuid::Uuid;

use super::{open_store, print_json, CliResult};

#[derive(Subcommand)]
pub enum CourseAction {
    /// Add a course
    Add {
        /// Course name
        name: String,
        /// Display color (e.g. "#1e88e5")
        #[arg(long)]
        color: Option<String>,
    },
    /// List courses
    List,
}

pub fn run(action: CourseAction) -> CliResult {
    let mut store = open_store()?;
    match action {
        CourseAction::Add { name, color } => {
            let course = Course {
                id: Uuid::new_v4().to_string(),
                name,
                color,
            };
            Table::<Course>::add(&mut store, course.clone())?;
            print_json(&course)?;
        }
        CourseAction::List => {
            print_json(&store.courses()?)?;
        }
    }
    Ok(())
}
