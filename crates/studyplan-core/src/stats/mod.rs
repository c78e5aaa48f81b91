//! Statistics module for Studyplan
//!
//! Post-hoc analytics over executed weeks: planned versus actual time,
//! per-course breakdown, habit streak snapshot and the most productive
//! recurring time slot.

mod productive_slot;
mod weekly_summary;

pub use productive_slot::{most_productive_slot, weekday_name, ProductiveSlot, MIN_SESSIONS};

pub use weekly_summary::{summarize_week, time_efficiency, Insight, SummaryInputs, WeeklySummary};
