//! Totals over a generated week.

use serde::{Deserialize, Serialize};

use crate::schedule::{Task, TimeBlock};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyStats {
    pub total_scheduled_minutes: i64,
    pub total_task_minutes: i64,
    pub total_break_minutes: i64,
    /// Scheduled work as a percentage of all incomplete tasks' estimates.
    pub scheduling_efficiency: u32,
}

impl WeeklyStats {
    /// Summarize a week's blocks against the current task backlog.
    pub fn compute(blocks: &[TimeBlock], tasks: &[Task]) -> Self {
        let (work, rest): (Vec<&TimeBlock>, Vec<&TimeBlock>) = blocks.iter().partition(|b| !b.is_break);
        let total_task_minutes: i64 = work.iter().map(|b| b.duration_minutes()).sum();
        let total_break_minutes: i64 = rest.iter().map(|b| b.duration_minutes()).sum();

        let requested: i64 = tasks
            .iter()
            .filter(|t| !t.completed)
            .map(|t| i64::from(t.estimated_minutes))
            .sum();
        let scheduling_efficiency = if requested > 0 {
            (total_task_minutes as f64 / requested as f64 * 100.0).round() as u32
        } else {
            0
        };

        Self {
            total_scheduled_minutes: total_task_minutes + total_break_minutes,
            total_task_minutes,
            total_break_minutes,
            scheduling_efficiency,
        }
    }
}
