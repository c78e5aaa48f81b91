//! Schedule types for tasks, courses, deadlines, availability and time blocks.
//!
//! All timestamps are local wall-clock values (`NaiveDateTime`); the engine
//! never converts between time zones.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Declared importance of a task or deadline.
///
/// Ordered so that `High > Medium > Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl std::str::FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(ValidationError::InvalidValue {
                field: "priority".to_string(),
                message: format!("expected low|medium|high, got '{other}'"),
            }),
        }
    }
}

/// A course that groups tasks and deadlines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// A unit of study work with a time estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub course_id: Option<String>,
    pub estimated_minutes: u32,
    #[serde(default)]
    pub deadline_id: Option<String>,
    #[serde(default)]
    pub completed: bool,
    /// Minutes actually worked, accumulated by recorded sessions.
    #[serde(default)]
    pub actual_minutes: Option<u32>,
    #[serde(default)]
    pub priority: Option<Priority>,
}

impl Task {
    pub fn new(title: impl Into<String>, estimated_minutes: u32) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            course_id: None,
            estimated_minutes,
            deadline_id: None,
            completed: false,
            actual_minutes: None,
            priority: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.estimated_minutes == 0 {
            return Err(ValidationError::NonPositiveEstimate {
                id: self.id.clone(),
            });
        }
        Ok(())
    }
}

/// A due date for coursework.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deadline {
    pub id: String,
    pub title: String,
    pub course_id: String,
    pub due_at: NaiveDateTime,
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
}

/// Recurring weekly free time.
///
/// `day_of_week` counts from Sunday: 0=Sun ... 6=Sat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    pub id: String,
    pub day_of_week: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl AvailabilityWindow {
    pub fn new(day_of_week: u8, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            day_of_week,
            start_time,
            end_time,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.day_of_week > 6 {
            return Err(ValidationError::InvalidWeekday {
                id: self.id.clone(),
                day: self.day_of_week,
            });
        }
        if self.start_time >= self.end_time {
            return Err(ValidationError::InvalidWindow {
                id: self.id.clone(),
                start: self.start_time,
                end: self.end_time,
            });
        }
        Ok(())
    }

    /// Check whether this template recurs on the given date
    pub fn falls_on(&self, date: NaiveDate) -> bool {
        date.weekday().num_days_from_sunday() == u32::from(self.day_of_week)
    }
}

/// Kind of rest inserted between work stretches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakType {
    Short,
    Long,
}

/// A concrete, dated interval of work on a task or a rest break.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBlock {
    pub id: String,
    /// `None` for break blocks.
    #[serde(default)]
    pub task_id: Option<String>,
    pub start_at: NaiveDateTime,
    pub end_at: NaiveDateTime,
    #[serde(default)]
    pub is_break: bool,
    #[serde(default)]
    pub break_type: Option<BreakType>,
    /// Reconciled elapsed minutes reported by the session timer.
    #[serde(default)]
    pub actual_minutes: Option<u32>,
    #[serde(default)]
    pub completed: bool,
}

impl TimeBlock {
    /// Create a work block for a task
    pub fn work(task_id: impl Into<String>, start_at: NaiveDateTime, end_at: NaiveDateTime) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            task_id: Some(task_id.into()),
            start_at,
            end_at,
            is_break: false,
            break_type: None,
            actual_minutes: None,
            completed: false,
        }
    }

    /// Create a break block
    pub fn rest(break_type: BreakType, start_at: NaiveDateTime, end_at: NaiveDateTime) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            task_id: None,
            start_at,
            end_at,
            is_break: true,
            break_type: Some(break_type),
            actual_minutes: None,
            completed: false,
        }
    }

    /// Planned duration in minutes
    pub fn duration_minutes(&self) -> i64 {
        (self.end_at - self.start_at).num_minutes()
    }

    /// Check if this block overlaps the half-open range `[start, end)`
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.start_at < end && self.end_at > start
    }

    /// Check if the block starts inside the 7-day week beginning at `week_start`
    pub fn starts_in_week(&self, week_start: NaiveDate) -> bool {
        let (from, to) = week_bounds(week_start);
        self.start_at >= from && self.start_at < to
    }
}

/// Half-open `[week_start 00:00, week_start + 7 days 00:00)` range.
pub fn week_bounds(week_start: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let from = week_start.and_time(NaiveTime::MIN);
    (from, from + Duration::days(7))
}
