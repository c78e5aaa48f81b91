//! Weekly analytics reducer.
//!
//! Compares a week's planned blocks with the minutes actually recorded for
//! them and derives the summary shown at the end of the week.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::productive_slot::{most_productive_slot, ProductiveSlot};
use crate::habit::Habit;
use crate::schedule::{week_bounds, Deadline, Task, TimeBlock};

/// Derived, read-only summary of one week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub week_start: NaiveDate,
    /// Last day of the week (inclusive).
    pub week_end: NaiveDate,
    pub tasks_completed: u32,
    pub tasks_overdue: u32,
    pub total_actual_time: i64,
    pub total_predicted_time: i64,
    /// Actual minutes per course id.
    pub time_per_course: BTreeMap<String, i64>,
    /// Current streak per habit id.
    pub habit_streaks: BTreeMap<String, u32>,
    pub most_productive_time_slot: Option<ProductiveSlot>,
}

/// Borrowed records the reducer reads.
#[derive(Debug, Clone, Copy)]
pub struct SummaryInputs<'a> {
    /// Blocks of the target week.
    pub blocks: &'a [TimeBlock],
    pub tasks: &'a [Task],
    pub deadlines: &'a [Deadline],
    pub habits: &'a [Habit],
}

/// Reduce a week's records into a [`WeeklySummary`].
pub fn summarize_week(week_start: NaiveDate, inputs: SummaryInputs<'_>) -> WeeklySummary {
    let (_, week_end_exclusive) = week_bounds(week_start);
    let work: Vec<&TimeBlock> = inputs.blocks.iter().filter(|b| !b.is_break).collect();

    let scheduled: HashSet<&str> = work.iter().filter_map(|b| b.task_id.as_deref()).collect();
    let tasks_completed = inputs
        .tasks
        .iter()
        .filter(|t| t.completed && scheduled.contains(t.id.as_str()))
        .count() as u32;

    let tasks_overdue = inputs
        .deadlines
        .iter()
        .filter(|d| !d.completed && d.due_at < week_end_exclusive)
        .count() as u32;

    let total_actual_time = work
        .iter()
        .map(|b| i64::from(b.actual_minutes.unwrap_or(0)))
        .sum();
    let total_predicted_time = work.iter().map(|b| b.duration_minutes()).sum();

    let course_of: HashMap<&str, &str> = inputs
        .tasks
        .iter()
        .filter_map(|t| Some((t.id.as_str(), t.course_id.as_deref()?)))
        .collect();
    let mut time_per_course: BTreeMap<String, i64> = BTreeMap::new();
    for block in &work {
        let Some(actual) = block.actual_minutes.filter(|m| *m > 0) else {
            continue;
        };
        let Some(course) = block.task_id.as_deref().and_then(|id| course_of.get(id)) else {
            continue;
        };
        *time_per_course.entry(course.to_string()).or_default() += i64::from(actual);
    }

    let habit_streaks = inputs
        .habits
        .iter()
        .map(|h| (h.id.clone(), h.current_streak))
        .collect();

    WeeklySummary {
        week_start,
        week_end: week_start + Duration::days(6),
        tasks_completed,
        tasks_overdue,
        total_actual_time,
        total_predicted_time,
        time_per_course,
        habit_streaks,
        most_productive_time_slot: most_productive_slot(inputs.blocks),
    }
}

/// Actual time as a rounded percentage of predicted time; 0 when nothing was planned.
pub fn time_efficiency(total_actual: i64, total_predicted: i64) -> u32 {
    if total_predicted <= 0 {
        return 0;
    }
    (total_actual as f64 / total_predicted as f64 * 100.0).round() as u32
}

/// The one message shown alongside a summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Insight {
    ProductiveSlot(ProductiveSlot),
    HighEfficiency { efficiency: u32 },
    LowEfficiency { efficiency: u32 },
    HabitMomentum { average_streak: f64 },
    OverdueWarning { overdue: u32 },
    Encouragement,
}

impl Insight {
    pub fn message(&self) -> String {
        match self {
            Insight::ProductiveSlot(slot) => format!(
                "You're most productive on {} between {}h ({}% efficiency). Schedule your hardest work there.",
                slot.day, slot.hour_range, slot.productivity_percent
            ),
            Insight::HighEfficiency { efficiency } => format!(
                "Great job! You hit {efficiency}% of your planned study time this week."
            ),
            Insight::LowEfficiency { efficiency } => format!(
                "You reached {efficiency}% of your planned time. Try breaking tasks into smaller chunks."
            ),
            Insight::HabitMomentum { average_streak } => format!(
                "Your habits are on a roll with an average streak of {average_streak:.1} days. Keep it going!"
            ),
            Insight::OverdueWarning { overdue } => format!(
                "You have {overdue} overdue deadlines. Catch up on them before taking on new work."
            ),
            Insight::Encouragement => "Steady progress this week. Keep showing up!".to_string(),
        }
    }
}

impl WeeklySummary {
    pub fn time_efficiency(&self) -> u32 {
        time_efficiency(self.total_actual_time, self.total_predicted_time)
    }

    /// Average current streak across all habits, `None` without habits.
    pub fn average_streak(&self) -> Option<f64> {
        if self.habit_streaks.is_empty() {
            return None;
        }
        let total: u32 = self.habit_streaks.values().sum();
        Some(f64::from(total) / self.habit_streaks.len() as f64)
    }

    /// Pick the insight by fixed precedence; the first matching rule wins.
    pub fn insight(&self) -> Insight {
        if let Some(slot) = &self.most_productive_time_slot {
            return Insight::ProductiveSlot(slot.clone());
        }

        let efficiency = self.time_efficiency();
        if efficiency > 90 {
            return Insight::HighEfficiency { efficiency };
        }
        if efficiency < 70 {
            return Insight::LowEfficiency { efficiency };
        }
        if let Some(average_streak) = self.average_streak().filter(|avg| *avg > 5.0) {
            return Insight::HabitMomentum { average_streak };
        }
        if self.tasks_overdue > 3 {
            return Insight::OverdueWarning {
                overdue: self.tasks_overdue,
            };
        }
        Insight::Encouragement
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{BreakType, Priority};
    use chrono::NaiveDateTime;

    fn week() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 12).unwrap()
    }

    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn block(task: &str, start: NaiveDateTime, planned: i64, actual: Option<u32>) -> TimeBlock {
        let mut b = TimeBlock::work(task, start, start + Duration::minutes(planned));
        b.actual_minutes = actual;
        b
    }

    fn task(id: &str, course: Option<&str>, completed: bool) -> Task {
        let mut t = Task::new(id, 60);
        t.id = id.to_string();
        t.course_id = course.map(str::to_string);
        t.completed = completed;
        t
    }

    fn deadline(id: &str, due: NaiveDateTime, completed: bool) -> Deadline {
        Deadline {
            id: id.to_string(),
            title: id.to_string(),
            course_id: "math".to_string(),
            due_at: due,
            priority: Priority::Medium,
            completed,
        }
    }

    fn summary_with(efficiency_actual: i64, streaks: &[u32], overdue: u32) -> WeeklySummary {
        WeeklySummary {
            week_start: week(),
            week_end: week() + Duration::days(6),
            tasks_completed: 0,
            tasks_overdue: overdue,
            total_actual_time: efficiency_actual,
            total_predicted_time: 100,
            time_per_course: BTreeMap::new(),
            habit_streaks: streaks
                .iter()
                .enumerate()
                .map(|(i, s)| (format!("h{i}"), *s))
                .collect(),
            most_productive_time_slot: None,
        }
    }

    #[test]
    fn reduces_a_week() {
        let blocks = vec![
            block("essay", at(12, 9, 0), 60, Some(50)),
            TimeBlock::rest(BreakType::Short, at(12, 10, 0), at(12, 10, 15)),
            block("essay", at(12, 10, 15), 30, Some(30)),
            block("lab", at(13, 9, 0), 60, None),
            block("quiz", at(14, 9, 0), 30, Some(20)),
        ];
        let tasks = vec![
            task("essay", Some("english"), true),
            task("lab", Some("chem"), false),
            task("quiz", None, true),
            task("unscheduled", Some("english"), true),
        ];
        let deadlines = vec![
            deadline("past", at(10, 23, 59), false),
            deadline("sunday", at(18, 23, 0), false),
            deadline("next-week", at(19, 0, 0), false),
            deadline("done", at(11, 12, 0), true),
        ];
        let mut reading = Habit::new("Reading", 20);
        reading.id = "reading".into();
        reading.current_streak = 4;

        let summary = summarize_week(
            week(),
            SummaryInputs {
                blocks: &blocks,
                tasks: &tasks,
                deadlines: &deadlines,
                habits: &[reading],
            },
        );

        assert_eq!(summary.week_end, NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
        assert_eq!(summary.tasks_completed, 2);
        assert_eq!(summary.tasks_overdue, 2);
        assert_eq!(summary.total_actual_time, 100);
        assert_eq!(summary.total_predicted_time, 180);
        assert_eq!(
            summary.time_per_course,
            BTreeMap::from([("english".to_string(), 80)])
        );
        assert_eq!(summary.habit_streaks, BTreeMap::from([("reading".to_string(), 4)]));
        assert!(summary.most_productive_time_slot.is_none());
        assert_eq!(summary.time_efficiency(), 56);
    }

    #[test]
    fn efficiency_rounds_to_integer() {
        assert_eq!(time_efficiency(180, 200), 90);
        assert_eq!(time_efficiency(1, 3), 33);
        assert_eq!(time_efficiency(50, 0), 0);
    }

    #[test]
    fn productive_slot_insight_comes_first() {
        let mut summary = summary_with(95, &[10], 5);
        summary.most_productive_time_slot = Some(ProductiveSlot {
            day: "Monday".into(),
            hour_range: "9-10".into(),
            productivity_percent: 95,
        });
        assert!(matches!(summary.insight(), Insight::ProductiveSlot(_)));
        assert!(summary.insight().message().contains("Monday"));
    }

    #[test]
    fn insight_precedence() {
        assert_eq!(
            summary_with(95, &[10], 5).insight(),
            Insight::HighEfficiency { efficiency: 95 }
        );
        assert_eq!(
            summary_with(60, &[10], 5).insight(),
            Insight::LowEfficiency { efficiency: 60 }
        );
        assert_eq!(
            summary_with(80, &[6, 8], 5).insight(),
            Insight::HabitMomentum { average_streak: 7.0 }
        );
        assert_eq!(
            summary_with(80, &[5, 5], 4).insight(),
            Insight::OverdueWarning { overdue: 4 }
        );
        assert_eq!(summary_with(80, &[], 3).insight(), Insight::Encouragement);
    }

    #[test]
    fn boundaries_are_exclusive() {
        // exactly 90 and 70 fall through to later rules
        assert_eq!(summary_with(90, &[], 0).insight(), Insight::Encouragement);
        assert_eq!(summary_with(70, &[], 0).insight(), Insight::Encouragement);
        assert_eq!(summary_with(80, &[5], 3).insight(), Insight::Encouragement);
    }
}
