//! Habit tracking and streak computation.
//!
//! A day counts toward a habit when the minutes logged for it that day reach
//! the habit's `target_minutes`. The current streak is the run of qualifying
//! days ending today; if today has not qualified yet, a run ending yesterday
//! is still current.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub target_minutes: u32,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
}

impl Habit {
    pub fn new(name: impl Into<String>, target_minutes: u32) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            target_minutes,
            current_streak: 0,
            longest_streak: 0,
        }
    }

    /// Reject a zero daily target.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.target_minutes == 0 {
            return Err(ValidationError::InvalidValue {
                field: "target_minutes".to_string(),
                message: format!("habit '{}' needs a target of at least one minute", self.name),
            });
        }
        Ok(())
    }
}

/// Minutes logged against a habit on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitCompletion {
    pub id: String,
    pub habit_id: String,
    pub date: NaiveDate,
    pub minutes: u32,
}

impl HabitCompletion {
    pub fn new(habit_id: impl Into<String>, date: NaiveDate, minutes: u32) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            habit_id: habit_id.into(),
            date,
            minutes,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub current: u32,
    pub longest: u32,
}

/// Compute a habit's streaks from its completion history as of `today`.
///
/// Completions for other habits and days after `today` are ignored.
pub fn compute_streak(habit: &Habit, completions: &[HabitCompletion], today: NaiveDate) -> Streak {
    let mut per_day: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for c in completions
        .iter()
        .filter(|c| c.habit_id == habit.id && c.date <= today)
    {
        *per_day.entry(c.date).or_default() += c.minutes;
    }

    let qualifying: BTreeSet<NaiveDate> = per_day
        .into_iter()
        .filter(|(_, minutes)| *minutes >= habit.target_minutes)
        .map(|(date, _)| date)
        .collect();

    let anchor = if qualifying.contains(&today) {
        today
    } else {
        today - Duration::days(1)
    };
    let current = std::iter::successors(Some(anchor), |d| d.pred_opt())
        .take_while(|d| qualifying.contains(d))
        .count() as u32;

    let mut longest = 0u32;
    let mut run = 0u32;
    let mut previous: Option<NaiveDate> = None;
    for &date in &qualifying {
        run = match previous {
            Some(p) if p.succ_opt() == Some(date) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(date);
    }

    Streak {
        current,
        longest: longest.max(current),
    }
}

/// Return `habit` with its streak counters recomputed.
pub fn refresh_habit(habit: &Habit, completions: &[HabitCompletion], today: NaiveDate) -> Habit {
    let streak = compute_streak(habit, completions, today);
    Habit {
        current_streak: streak.current,
        longest_streak: streak.longest,
        ..habit.clone()
    }
}
