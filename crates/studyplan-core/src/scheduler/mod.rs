//! Weekly greedy scheduler.
//!
//! Places the prioritized task backlog into the week's availability slots:
//! - walks slots in chronological order with a cursor that only moves forward
//! - carves work blocks bounded by the continuous-work ceiling
//! - splits a task across slots when one slot is not enough
//! - inserts a short or long break after long stretches of work
//!
//! Tasks are attempted once each, in priority order. A task that runs out of
//! slots is reported as a [`PartialSchedule`]; later tasks are never pulled
//! forward into gaps it leaves behind.

mod availability;
mod priority;
mod stats;

pub use availability::{expand_availability, Slot};
pub use priority::prioritize_tasks;
pub use stats::WeeklyStats;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ValidationError;
use crate::schedule::{AvailabilityWindow, BreakType, Deadline, Task, TimeBlock};

/// Shortest block the scheduler will ever emit (minutes).
pub const MIN_BLOCK_MINUTES: i64 = 15;
/// A work block at least this long is followed by a break (minutes).
pub const BREAK_AFTER_MINUTES: i64 = 60;
/// A work block at least this long earns a long break (minutes).
pub const LONG_BREAK_AFTER_MINUTES: i64 = 120;

/// Tunable scheduling parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    pub short_break_minutes: u32,
    pub long_break_minutes: u32,
    pub max_continuous_hours: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            short_break_minutes: 15,
            long_break_minutes: 30,
            max_continuous_hours: 2.0,
        }
    }
}

impl SchedulerConfig {
    /// Continuous-work ceiling in whole minutes
    pub fn max_continuous_minutes(&self) -> i64 {
        (self.max_continuous_hours * 60.0).round() as i64
    }

    /// Every emitted block, breaks included, must be able to reach the minimum length.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let too_short = |field: &str, minutes: i64| ValidationError::InvalidValue {
            field: field.to_string(),
            message: format!("{minutes} minutes is below the {MIN_BLOCK_MINUTES}-minute minimum block"),
        };

        if i64::from(self.short_break_minutes) < MIN_BLOCK_MINUTES {
            return Err(too_short("short_break_minutes", i64::from(self.short_break_minutes)));
        }
        if i64::from(self.long_break_minutes) < MIN_BLOCK_MINUTES {
            return Err(too_short("long_break_minutes", i64::from(self.long_break_minutes)));
        }
        if !self.max_continuous_hours.is_finite() {
            return Err(ValidationError::InvalidValue {
                field: "max_continuous_hours".to_string(),
                message: "must be a finite number".to_string(),
            });
        }
        if self.max_continuous_minutes() < MIN_BLOCK_MINUTES {
            return Err(too_short("max_continuous_hours", self.max_continuous_minutes()));
        }
        Ok(())
    }

    fn break_minutes(&self, kind: BreakType) -> i64 {
        match kind {
            BreakType::Short => i64::from(self.short_break_minutes),
            BreakType::Long => i64::from(self.long_break_minutes),
        }
    }
}

/// Per-call options for generating a week.
///
/// Unset fields fall back to the planner's [`SchedulerConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOptions {
    pub week_start: NaiveDate,
    #[serde(default)]
    pub short_break_minutes: Option<u32>,
    #[serde(default)]
    pub long_break_minutes: Option<u32>,
    #[serde(default)]
    pub max_continuous_hours: Option<f64>,
}

impl ScheduleOptions {
    pub fn new(week_start: NaiveDate) -> Self {
        Self {
            week_start,
            short_break_minutes: None,
            long_break_minutes: None,
            max_continuous_hours: None,
        }
    }

    pub fn resolve(&self, base: &SchedulerConfig) -> SchedulerConfig {
        SchedulerConfig {
            short_break_minutes: self.short_break_minutes.unwrap_or(base.short_break_minutes),
            long_break_minutes: self.long_break_minutes.unwrap_or(base.long_break_minutes),
            max_continuous_hours: self.max_continuous_hours.unwrap_or(base.max_continuous_hours),
        }
    }
}

/// A task whose estimate did not fully fit into the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialSchedule {
    pub task_id: String,
    pub title: String,
    pub unscheduled_minutes: u32,
}

/// Result of planning one week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOutcome {
    pub week_start: NaiveDate,
    /// Chronological, non-overlapping work and break blocks.
    pub blocks: Vec<TimeBlock>,
    pub partial: Vec<PartialSchedule>,
}

impl ScheduleOutcome {
    /// True when every pending task was fully placed
    pub fn is_complete(&self) -> bool {
        self.partial.is_empty()
    }

    pub fn unscheduled_minutes(&self) -> u32 {
        self.partial.iter().map(|p| p.unscheduled_minutes).sum()
    }
}

/// Position in the slot list. Both fields only ever move forward.
#[derive(Debug, Clone, Copy, Default)]
struct Cursor {
    slot: usize,
    at: Option<NaiveDateTime>,
}

impl Cursor {
    /// Move to the first slot with time left at or after the cursor.
    ///
    /// The clock is clamped to the slot start but never moves backwards, so
    /// overlapping slots cannot produce overlapping blocks.
    fn settle(self, slots: &[Slot]) -> Option<(Cursor, Slot, NaiveDateTime)> {
        let mut slot_index = self.slot;
        loop {
            let slot = *slots.get(slot_index)?;
            let at = self.at.map_or(slot.start, |at| at.max(slot.start));
            if at < slot.end {
                let cursor = Cursor {
                    slot: slot_index,
                    at: Some(at),
                };
                return Some((cursor, slot, at));
            }
            slot_index += 1;
        }
    }

    fn moved_to(self, at: NaiveDateTime) -> Cursor {
        Cursor { at: Some(at), ..self }
    }

    /// Abandon what is left of the current slot.
    fn next_slot(self) -> Cursor {
        Cursor {
            slot: self.slot + 1,
            ..self
        }
    }
}

/// State threaded through the fold over the task list.
#[derive(Debug, Default)]
struct Plan {
    cursor: Cursor,
    blocks: Vec<TimeBlock>,
    partial: Vec<PartialSchedule>,
}

/// Greedy weekly scheduler
pub struct WeeklyScheduler {
    config: SchedulerConfig,
}

impl WeeklyScheduler {
    /// Create a new scheduler with default config
    pub fn new() -> Self {
        Self {
            config: SchedulerConfig::default(),
        }
    }

    /// Create with custom config
    pub fn with_config(config: SchedulerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Plan one week without touching any store.
    ///
    /// # Errors
    /// Returns a validation error for a malformed window, a pending task with a
    /// non-positive estimate, or a configuration that could emit blocks shorter
    /// than [`MIN_BLOCK_MINUTES`].
    pub fn plan_week(
        &self,
        week_start: NaiveDate,
        tasks: &[Task],
        windows: &[AvailabilityWindow],
        deadlines: &[Deadline],
    ) -> Result<ScheduleOutcome, ValidationError> {
        self.config.validate()?;
        for task in tasks.iter().filter(|t| !t.completed) {
            task.validate()?;
        }
        let slots = expand_availability(windows, week_start)?;
        let ordered = prioritize_tasks(tasks, deadlines);

        let plan = ordered
            .iter()
            .fold(Plan::default(), |plan, task| self.place_task(plan, task, &slots));

        info!(
            %week_start,
            slots = slots.len(),
            blocks = plan.blocks.len(),
            partial = plan.partial.len(),
            "planned week"
        );

        Ok(ScheduleOutcome {
            week_start,
            blocks: plan.blocks,
            partial: plan.partial,
        })
    }

    /// Place as much of one task as the remaining slots allow
    fn place_task(&self, mut plan: Plan, task: &Task, slots: &[Slot]) -> Plan {
        let ceiling = self.config.max_continuous_minutes();
        let mut remaining = i64::from(task.estimated_minutes);

        while remaining > 0 {
            let Some((cursor, slot, at)) = plan.cursor.settle(slots) else {
                warn!(
                    task_id = %task.id,
                    unscheduled_minutes = remaining,
                    "availability exhausted before task was fully scheduled"
                );
                plan.partial.push(PartialSchedule {
                    task_id: task.id.clone(),
                    title: task.title.clone(),
                    unscheduled_minutes: u32::try_from(remaining).unwrap_or(u32::MAX),
                });
                break;
            };

            let left_in_slot = (slot.end - at).num_minutes();
            let carve = remaining.min(left_in_slot).min(ceiling);

            if carve < MIN_BLOCK_MINUTES {
                debug!(%at, left_in_slot, "skipping unusable slot remainder");
                plan.cursor = cursor.next_slot();
                continue;
            }

            let end = at + Duration::minutes(carve);
            debug!(task_id = %task.id, start = %at, %end, "work block");
            plan.blocks.push(TimeBlock::work(task.id.clone(), at, end));
            plan.cursor = cursor.moved_to(end);
            remaining -= carve;

            if remaining > 0 && carve >= BREAK_AFTER_MINUTES {
                let kind = if carve >= LONG_BREAK_AFTER_MINUTES {
                    BreakType::Long
                } else {
                    BreakType::Short
                };
                let length = self.config.break_minutes(kind);
                if (slot.end - end).num_minutes() >= length {
                    let break_end = end + Duration::minutes(length);
                    plan.blocks.push(TimeBlock::rest(kind, end, break_end));
                    plan.cursor = plan.cursor.moved_to(break_end);
                }
            }
        }

        plan
    }
}

impl Default for WeeklyScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn week() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 12).unwrap()
    }

    fn dt(h: u32, m: u32) -> NaiveDateTime {
        week().and_hms_opt(h, m, 0).unwrap()
    }

    fn monday(from: (u32, u32), to: (u32, u32)) -> AvailabilityWindow {
        AvailabilityWindow::new(
            1,
            NaiveTime::from_hms_opt(from.0, from.1, 0).unwrap(),
            NaiveTime::from_hms_opt(to.0, to.1, 0).unwrap(),
        )
    }

    fn task(id: &str, minutes: u32) -> Task {
        let mut t = Task::new(format!("Task {id}"), minutes);
        t.id = id.to_string();
        t
    }

    fn shape(blocks: &[TimeBlock]) -> Vec<(Option<&str>, i64, Option<BreakType>)> {
        blocks
            .iter()
            .map(|b| (b.task_id.as_deref(), b.duration_minutes(), b.break_type))
            .collect()
    }

    #[test]
    fn long_stretch_gets_long_break() {
        let outcome = WeeklyScheduler::new()
            .plan_week(week(), &[task("a", 150)], &[monday((9, 0), (13, 0))], &[])
            .unwrap();

        assert_eq!(
            shape(&outcome.blocks),
            vec![
                (Some("a"), 120, None),
                (None, 30, Some(BreakType::Long)),
                (Some("a"), 30, None),
            ]
        );
        assert_eq!(outcome.blocks[0].start_at, dt(9, 0));
        assert_eq!(outcome.blocks[1].start_at, dt(11, 0));
        assert_eq!(outcome.blocks[2].end_at, dt(12, 0));
        assert!(outcome.is_complete());
    }

    #[test]
    fn hour_stretch_gets_short_break() {
        let config = SchedulerConfig {
            max_continuous_hours: 1.0,
            ..SchedulerConfig::default()
        };
        let outcome = WeeklyScheduler::with_config(config)
            .plan_week(week(), &[task("a", 100)], &[monday((9, 0), (12, 0))], &[])
            .unwrap();
        assert_eq!(
            shape(&outcome.blocks),
            vec![
                (Some("a"), 60, None),
                (None, 15, Some(BreakType::Short)),
                (Some("a"), 40, None),
            ]
        );
    }

    #[test]
    fn no_break_after_final_chunk_or_short_chunks() {
        let outcome = WeeklyScheduler::new()
            .plan_week(
                week(),
                &[task("a", 120), task("b", 45), task("c", 30)],
                &[monday((9, 0), (13, 0))],
                &[],
            )
            .unwrap();
        // a finishes in one chunk, so no break follows it
        assert_eq!(
            shape(&outcome.blocks),
            vec![(Some("c"), 30, None), (Some("b"), 45, None), (Some("a"), 120, None)]
        );
    }

    #[test]
    fn slot_exhaustion_reports_partial() {
        let outcome = WeeklyScheduler::new()
            .plan_week(week(), &[task("a", 90)], &[monday((9, 0), (10, 0))], &[])
            .unwrap();
        assert_eq!(shape(&outcome.blocks), vec![(Some("a"), 60, None)]);
        assert_eq!(
            outcome.partial,
            vec![PartialSchedule {
                task_id: "a".into(),
                title: "Task a".into(),
                unscheduled_minutes: 30,
            }]
        );
    }

    #[test]
    fn break_skipped_when_slot_too_short() {
        // only 10 minutes remain after the first chunk, too few for a 15-minute break
        let config = SchedulerConfig {
            max_continuous_hours: 1.0,
            ..SchedulerConfig::default()
        };
        let windows = vec![monday((9, 0), (10, 10)), monday((14, 0), (15, 0))];
        let outcome = WeeklyScheduler::with_config(config)
            .plan_week(week(), &[task("a", 90)], &windows, &[])
            .unwrap();
        assert_eq!(
            shape(&outcome.blocks),
            vec![(Some("a"), 60, None), (Some("a"), 30, None)]
        );
        assert_eq!(outcome.blocks[1].start_at, dt(14, 0));
    }

    #[test]
    fn slivers_below_minimum_are_skipped() {
        // 9:00-9:40 leaves a 10-minute sliver after the first task
        let windows = vec![monday((9, 0), (9, 40)), monday((11, 0), (12, 0))];
        let outcome = WeeklyScheduler::new()
            .plan_week(week(), &[task("a", 30), task("b", 30)], &windows, &[])
            .unwrap();
        assert_eq!(outcome.blocks[0].start_at, dt(9, 0));
        assert_eq!(outcome.blocks[1].task_id.as_deref(), Some("b"));
        assert_eq!(outcome.blocks[1].start_at, dt(11, 0));
    }

    #[test]
    fn task_shorter_than_minimum_block_is_reported_partial() {
        let outcome = WeeklyScheduler::new()
            .plan_week(week(), &[task("tiny", 10)], &[monday((9, 0), (10, 0))], &[])
            .unwrap();
        assert!(outcome.blocks.is_empty());
        assert_eq!(outcome.partial[0].unscheduled_minutes, 10);
    }

    #[test]
    fn greedy_never_backfills_for_later_tasks() {
        // "big" has a deadline and takes the only slot; "small" would have fit
        // entirely but is never placed ahead of it
        let due = Deadline {
            id: "exam".into(),
            title: "Exam".into(),
            course_id: "chem".into(),
            due_at: dt(9, 0) + Duration::days(3),
            priority: crate::schedule::Priority::High,
            completed: false,
        };
        let mut big = task("big", 200);
        big.deadline_id = Some("exam".into());

        let outcome = WeeklyScheduler::new()
            .plan_week(week(), &[task("small", 30), big], &[monday((9, 0), (10, 0))], &[due])
            .unwrap();
        assert_eq!(shape(&outcome.blocks), vec![(Some("big"), 60, None)]);
        let unplaced: Vec<(&str, u32)> = outcome
            .partial
            .iter()
            .map(|p| (p.task_id.as_str(), p.unscheduled_minutes))
            .collect();
        assert_eq!(unplaced, vec![("big", 140), ("small", 30)]);
    }

    #[test]
    fn unplaceable_remainder_consumes_the_rest_of_the_week() {
        // "a" leaves a 10-minute remainder that no slot can take; the cursor
        // walks past every slot for it, so "b" finds nothing left
        let due = Deadline {
            id: "essay".into(),
            title: "Essay".into(),
            course_id: "lit".into(),
            due_at: dt(23, 0) + Duration::days(4),
            priority: crate::schedule::Priority::Medium,
            completed: false,
        };
        let mut a = task("a", 130);
        a.deadline_id = Some("essay".into());
        let tuesday = AvailabilityWindow::new(
            2,
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        );

        let outcome = WeeklyScheduler::new()
            .plan_week(
                week(),
                &[a, task("b", 60)],
                &[monday((9, 0), (13, 0)), tuesday],
                &[due],
            )
            .unwrap();

        assert_eq!(
            shape(&outcome.blocks),
            vec![(Some("a"), 120, None), (None, 30, Some(BreakType::Long))]
        );
        assert_eq!(outcome.blocks[1].end_at, dt(11, 30));
        let unplaced: Vec<(&str, u32)> = outcome
            .partial
            .iter()
            .map(|p| (p.task_id.as_str(), p.unscheduled_minutes))
            .collect();
        assert_eq!(unplaced, vec![("a", 10), ("b", 60)]);
    }

    #[test]
    fn overlapping_windows_never_overlap_blocks() {
        let windows = vec![monday((9, 0), (11, 0)), monday((10, 0), (12, 0))];
        let outcome = WeeklyScheduler::new()
            .plan_week(week(), &[task("a", 60), task("b", 90)], &windows, &[])
            .unwrap();
        for pair in outcome.blocks.windows(2) {
            assert!(pair[0].end_at <= pair[1].start_at);
        }
        assert_eq!(outcome.blocks.last().unwrap().end_at, dt(11, 30));
    }

    #[test]
    fn completed_tasks_are_not_scheduled() {
        let mut done = task("done", 30);
        done.completed = true;
        done.estimated_minutes = 0;
        let outcome = WeeklyScheduler::new()
            .plan_week(week(), &[done], &[monday((9, 0), (10, 0))], &[])
            .unwrap();
        assert!(outcome.blocks.is_empty());
        assert!(outcome.is_complete());
    }

    #[test]
    fn zero_estimate_is_rejected() {
        let result = WeeklyScheduler::new().plan_week(week(), &[task("z", 0)], &[], &[]);
        assert!(matches!(result, Err(ValidationError::NonPositiveEstimate { .. })));
    }

    #[test]
    fn config_below_minimum_block_is_rejected() {
        let config = SchedulerConfig {
            short_break_minutes: 5,
            ..SchedulerConfig::default()
        };
        assert!(WeeklyScheduler::with_config(config)
            .plan_week(week(), &[], &[], &[])
            .is_err());

        let config = SchedulerConfig {
            max_continuous_hours: 0.1,
            ..SchedulerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn options_override_base_config() {
        let options = ScheduleOptions {
            long_break_minutes: Some(45),
            ..ScheduleOptions::new(week())
        };
        let resolved = options.resolve(&SchedulerConfig::default());
        assert_eq!(resolved.long_break_minutes, 45);
        assert_eq!(resolved.short_break_minutes, 15);
        assert_eq!(resolved.max_continuous_minutes(), 120);
    }
}
