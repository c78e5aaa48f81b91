//! Record store abstraction and its implementations.
//!
//! The scheduler and the analytics reducer only see the [`RecordStore`] trait,
//! so they run unchanged against [`MemoryStore`] in tests and [`SqliteStore`]
//! in the CLI.

mod config;
pub mod database;
pub mod memory;

pub use config::{Config, SchedulingConfig};
pub use database::SqliteStore;
pub use memory::MemoryStore;

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;
use crate::habit::{Habit, HabitCompletion};
use crate::schedule::{AvailabilityWindow, Course, Deadline, Task, TimeBlock};

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// An entity kept in the record store.
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Stable name of the collection this record lives in.
    const KIND: &'static str;

    fn id(&self) -> &str;

    /// Start timestamp used for week range queries.
    fn starts_at(&self) -> Option<NaiveDateTime> {
        None
    }
}

macro_rules! impl_record {
    ($ty:ty, $kind:literal) => {
        impl Record for $ty {
            const KIND: &'static str = $kind;

            fn id(&self) -> &str {
                &self.id
            }
        }
    };
}

impl_record!(Task, "task");
impl_record!(Course, "course");
impl_record!(Deadline, "deadline");
impl_record!(AvailabilityWindow, "availability_window");
impl_record!(Habit, "habit");
impl_record!(HabitCompletion, "habit_completion");

impl Record for TimeBlock {
    const KIND: &'static str = "time_block";

    fn id(&self) -> &str {
        &self.id
    }

    fn starts_at(&self) -> Option<NaiveDateTime> {
        Some(self.start_at)
    }
}

/// CRUD over one entity collection. `get_all` returns insertion order.
pub trait Table<T: Record> {
    fn get_all(&self) -> StoreResult<Vec<T>>;
    fn add(&mut self, item: T) -> StoreResult<()>;
    /// Replace the record with the same id.
    fn update(&mut self, item: T) -> StoreResult<()>;
    fn remove(&mut self, id: &str) -> StoreResult<()>;
}

/// The full record store the planner is injected with.
pub trait RecordStore:
    Table<Task>
    + Table<Course>
    + Table<Deadline>
    + Table<AvailabilityWindow>
    + Table<TimeBlock>
    + Table<Habit>
    + Table<HabitCompletion>
{
    /// All blocks starting inside `[week_start, week_start + 7 days)`, ordered by start.
    fn blocks_by_week(&self, week_start: NaiveDate) -> StoreResult<Vec<TimeBlock>>;

    /// Remove every block of the week and insert `blocks` in their place.
    ///
    /// Callers must not run two replacements for the same week concurrently.
    fn replace_week_blocks(&mut self, week_start: NaiveDate, blocks: &[TimeBlock]) -> StoreResult<()> {
        for block in self.blocks_by_week(week_start)? {
            Table::<TimeBlock>::remove(self, &block.id)?;
        }
        for block in blocks {
            Table::<TimeBlock>::add(self, block.clone())?;
        }
        Ok(())
    }

    fn tasks(&self) -> StoreResult<Vec<Task>> {
        Table::<Task>::get_all(self)
    }

    fn courses(&self) -> StoreResult<Vec<Course>> {
        Table::<Course>::get_all(self)
    }

    fn deadlines(&self) -> StoreResult<Vec<Deadline>> {
        Table::<Deadline>::get_all(self)
    }

    fn availability(&self) -> StoreResult<Vec<AvailabilityWindow>> {
        Table::<AvailabilityWindow>::get_all(self)
    }

    fn habits(&self) -> StoreResult<Vec<Habit>> {
        Table::<Habit>::get_all(self)
    }

    fn habit_completions(&self) -> StoreResult<Vec<HabitCompletion>> {
        Table::<HabitCompletion>::get_all(self)
    }
}

/// Returns `~/.config/studyplan[-dev]/` based on STUDYPLAN_ENV.
///
/// `STUDYPLAN_DATA_DIR` overrides the location entirely.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("STUDYPLAN_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("STUDYPLAN_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("studyplan-dev")
            } else {
                base_dir.join("studyplan")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
