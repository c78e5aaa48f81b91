//! Ordering of the pending task backlog.
//!
//! Precedence:
//! 1. tasks with a deadline before tasks without one
//! 2. among deadlines: earlier due date, then higher priority
//! 3. among the rest: shorter estimate first
//!
//! The sort is stable, so anything left tied keeps its backlog position.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::schedule::{Deadline, Priority, Task};

/// Return the not-yet-completed tasks in scheduling order.
pub fn prioritize_tasks(tasks: &[Task], deadlines: &[Deadline]) -> Vec<Task> {
    let by_id: HashMap<&str, &Deadline> = deadlines.iter().map(|d| (d.id.as_str(), d)).collect();
    let deadline_of = |task: &Task| {
        task.deadline_id
            .as_deref()
            .and_then(|id| by_id.get(id).copied())
    };

    let mut pending: Vec<Task> = tasks.iter().filter(|t| !t.completed).cloned().collect();
    pending.sort_by(|a, b| compare(a, deadline_of(a), b, deadline_of(b)));
    pending
}

/// A task's own priority wins over the one declared on its deadline.
fn effective_priority(task: &Task, deadline: &Deadline) -> Priority {
    task.priority.unwrap_or(deadline.priority)
}

fn compare(a: &Task, da: Option<&Deadline>, b: &Task, db: Option<&Deadline>) -> Ordering {
    match (da, db) {
        (Some(da), Some(db)) => da
            .due_at
            .cmp(&db.due_at)
            .then_with(|| effective_priority(b, db).cmp(&effective_priority(a, da))),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.estimated_minutes.cmp(&b.estimated_minutes),
    }
}
