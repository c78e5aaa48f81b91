//! # Studyplan Core Library
//!
//! Core logic for the Studyplan weekly study planner. Everything runs
//! in-process; the `studyplan` CLI is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Scheduler**: Greedy placement of prioritized tasks into weekly
//!   availability, with break insertion and partial-schedule reporting
//! - **Stats**: Weekly totals and the planned-versus-actual summary reducer
//! - **Storage**: Record store trait with in-memory and SQLite backends, plus
//!   TOML-based configuration
//! - **Timer**: Session stopwatch producing the minutes recorded against a block
//!
//! ## Key Components
//!
//! - [`Planner`]: Facade tying the store to scheduling and analytics
//! - [`WeeklyScheduler`]: Pure scheduling over in-memory records
//! - [`RecordStore`]: Storage seam injected into the planner
//! - [`Config`]: Application configuration management

pub mod error;
pub mod habit;
pub mod planner;
pub mod schedule;
pub mod scheduler;
pub mod stats;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, StoreError, ValidationError};
pub use habit::{compute_streak, Habit, HabitCompletion, Streak};
pub use planner::Planner;
pub use schedule::{AvailabilityWindow, BreakType, Course, Deadline, Priority, Task, TimeBlock};
pub use scheduler::{
    PartialSchedule, ScheduleOptions, ScheduleOutcome, SchedulerConfig, WeeklyScheduler,
    WeeklyStats,
};
pub use stats::{Insight, ProductiveSlot, WeeklySummary};
pub use storage::{Config, MemoryStore, Record, RecordStore, SqliteStore, Table};
pub use timer::{SessionTimer, TimerState};
