//! Task backlog commands for CLI.

use clap::Subcommand;
use studyplan_core::{Priority, RecordStore, Table, Task};

use super::{open_store, print_json, CliResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task to the backlog
    Add {
        /// Task title
        title: String,
        /// Estimated effort in minutes
        #[arg(long)]
        minutes: u32,
        /// Course ID to associate with
        #[arg(long)]
        course: Option<String>,
        /// Deadline ID this task works toward
        #[arg(long)]
        deadline: Option<String>,
        /// Priority override: low, medium or high
        #[arg(long)]
        priority: Option<Priority>,
    },
    /// List tasks
    List {
        /// Include completed tasks
        #[arg(long)]
        all: bool,
    },
    /// Mark a task completed
    Done {
        /// Task ID
        id: String,
    },
    /// Remove a task
    Remove {
        /// Task ID
        id: String,
    },
}

pub fn run(action: TaskAction) -> CliResult {
    let mut store = open_store()?;
    match action {
        TaskAction::Add {
            title,
            minutes,
            course,
            deadline,
            priority,
        } => {
            let mut task = Task::new(title, minutes);
            task.course_id = course;
            task.deadline_id = deadline;
            task.priority = priority;
            task.validate()?;
            Table::<Task>::add(&mut store, task.clone())?;
            print_json(&task)?;
        }
        TaskAction::List { all } => {
            let tasks: Vec<Task> = store
                .tasks()?
                .into_iter()
                .filter(|t| all || !t.completed)
                .collect();
            print_json(&tasks)?;
        }
        TaskAction::Done { id } => {
            let mut task = find(&store, &id)?;
            task.completed = true;
            Table::<Task>::update(&mut store, task.clone())?;
            print_json(&task)?;
        }
        TaskAction::Remove { id } => {
            Table::<Task>::remove(&mut store, &id)?;
            println!("task removed: {id}");
        }
    }
    Ok(())
}

fn find(store: &impl RecordStore, id: &str) -> Result<Task, Box<dyn std::error::Error>> {
    store
        .tasks()?
        .into_iter()
        .find(|t| t.id == id)
        .ok_or_else(|| format!("task not found: {id}").into())
}
