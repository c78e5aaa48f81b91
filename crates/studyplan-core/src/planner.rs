//! Planner facade over an injected record store.
//!
//! Exposes the in-process contract surface:
//! - [`Planner::generate_weekly_schedule`]
//! - [`Planner::get_weekly_stats`]
//! - [`Planner::generate_weekly_summary`]
//!
//! plus recording timed sessions and refreshing habit streaks. A planner
//! assumes it is the only writer for the weeks it regenerates.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{info, warn};

use crate::error::{Result, StoreError};
use crate::habit::{refresh_habit, Habit};
use crate::scheduler::{ScheduleOptions, ScheduleOutcome, SchedulerConfig, WeeklyScheduler, WeeklyStats};
use crate::schedule::{Task, TimeBlock};
use crate::stats::{summarize_week, SummaryInputs, WeeklySummary};
use crate::storage::{Record, RecordStore, Table};
use crate::timer::SessionTimer;

pub struct Planner<S: RecordStore> {
    store: S,
    config: SchedulerConfig,
}

impl<S: RecordStore> Planner<S> {
    /// Create a planner with default scheduling parameters
    pub fn new(store: S) -> Self {
        Self::with_config(store, SchedulerConfig::default())
    }

    pub fn with_config(store: S, config: SchedulerConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Plan the week and replace its stored blocks with the result.
    ///
    /// Validation happens before anything is written: a rejected call leaves
    /// the week's existing blocks untouched.
    ///
    /// # Errors
    /// `VALIDATION` for malformed input, `STORE_UNAVAILABLE` when the store fails.
    pub fn generate_weekly_schedule(&mut self, options: &ScheduleOptions) -> Result<ScheduleOutcome> {
        let config = options.resolve(&self.config);
        let tasks = self.store.tasks()?;
        let windows = self.store.availability()?;
        let deadlines = self.store.deadlines()?;

        let outcome = WeeklyScheduler::with_config(config).plan_week(
            options.week_start,
            &tasks,
            &windows,
            &deadlines,
        )?;

        self.store
            .replace_week_blocks(options.week_start, &outcome.blocks)?;

        for partial in &outcome.partial {
            warn!(
                task_id = %partial.task_id,
                unscheduled_minutes = partial.unscheduled_minutes,
                "task only partially scheduled"
            );
        }
        info!(
            week_start = %options.week_start,
            blocks = outcome.blocks.len(),
            "stored weekly schedule"
        );
        Ok(outcome)
    }

    /// Totals over the week's stored blocks.
    pub fn get_weekly_stats(&self, week_start: NaiveDate) -> Result<WeeklyStats> {
        let blocks = self.store.blocks_by_week(week_start)?;
        let tasks = self.store.tasks()?;
        Ok(WeeklyStats::compute(&blocks, &tasks))
    }

    /// Planned-versus-actual summary of the week.
    pub fn generate_weekly_summary(&self, week_start: NaiveDate) -> Result<WeeklySummary> {
        let blocks = self.store.blocks_by_week(week_start)?;
        let tasks = self.store.tasks()?;
        let deadlines = self.store.deadlines()?;
        let habits = self.store.habits()?;

        Ok(summarize_week(
            week_start,
            SummaryInputs {
                blocks: &blocks,
                tasks: &tasks,
                deadlines: &deadlines,
                habits: &habits,
            },
        ))
    }

    /// Store the reconciled minutes of an executed block.
    ///
    /// Marks the block completed and, for work blocks, moves the task's
    /// `actual_minutes` accumulator by the difference to any earlier recording.
    pub fn record_session(&mut self, block_id: &str, actual_minutes: u32) -> Result<TimeBlock> {
        let mut block = Table::<TimeBlock>::get_all(&self.store)?
            .into_iter()
            .find(|b| b.id == block_id)
            .ok_or_else(|| StoreError::NotFound {
                kind: TimeBlock::KIND,
                id: block_id.to_string(),
            })?;

        let previous = block.actual_minutes.unwrap_or(0);
        block.actual_minutes = Some(actual_minutes);
        block.completed = true;
        Table::<TimeBlock>::update(&mut self.store, block.clone())?;

        if let Some(task_id) = block.task_id.as_deref() {
            match self.store.tasks()?.into_iter().find(|t| t.id == task_id) {
                Some(mut task) => {
                    let worked = task.actual_minutes.unwrap_or(0).saturating_sub(previous);
                    task.actual_minutes = Some(worked.saturating_add(actual_minutes));
                    Table::<Task>::update(&mut self.store, task)?;
                }
                None => warn!(%task_id, block_id, "recorded session for a task that no longer exists"),
            }
        }

        Ok(block)
    }

    /// Finish a running timer and record its minutes against the timer's block.
    pub fn finish_session(&mut self, timer: &mut SessionTimer, at: NaiveDateTime) -> Result<TimeBlock> {
        let minutes = timer.finish(at)?;
        let block_id = timer.block_id().to_string();
        self.record_session(&block_id, minutes)
    }

    /// Recompute and store every habit's streak counters as of `today`.
    pub fn refresh_habits(&mut self, today: NaiveDate) -> Result<Vec<Habit>> {
        let completions = self.store.habit_completions()?;
        let mut refreshed = Vec::new();
        for habit in self.store.habits()? {
            let updated = refresh_habit(&habit, &completions, today);
            if updated != habit {
                Table::<Habit>::update(&mut self.store, updated.clone())?;
            }
            refreshed.push(updated);
        }
        Ok(refreshed)
    }
}
