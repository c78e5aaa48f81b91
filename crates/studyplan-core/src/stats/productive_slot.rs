//! Most productive recurring time slot.
//!
//! Timed work blocks are grouped by `(weekday, start hour)`. Only groups with
//! at least [`MIN_SESSIONS`] sessions are considered; the winner is the group
//! with the highest actual/planned ratio.

use chrono::{Datelike, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::schedule::TimeBlock;

/// Sessions a group needs before its ratio is trusted.
pub const MIN_SESSIONS: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductiveSlot {
    /// Full weekday name, e.g. "Tuesday".
    pub day: String,
    /// `"h-(h+1)"`, e.g. "14-15".
    pub hour_range: String,
    pub productivity_percent: u32,
}

#[derive(Debug)]
struct SlotGroup {
    weekday: Weekday,
    hour: u32,
    sessions: u32,
    actual: i64,
    planned: i64,
}

impl SlotGroup {
    fn ratio(&self) -> f64 {
        if self.planned > 0 {
            self.actual as f64 / self.planned as f64
        } else {
            0.0
        }
    }
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Find the best-performing `(weekday, hour)` among the given blocks.
///
/// Break blocks and blocks without recorded minutes are ignored. On equal
/// ratios the chronologically first group wins.
pub fn most_productive_slot(blocks: &[TimeBlock]) -> Option<ProductiveSlot> {
    let mut timed: Vec<&TimeBlock> = blocks
        .iter()
        .filter(|b| !b.is_break && b.actual_minutes.is_some_and(|m| m > 0))
        .collect();
    timed.sort_by_key(|b| b.start_at);

    let mut groups: Vec<SlotGroup> = Vec::new();
    for block in timed {
        let weekday = block.start_at.weekday();
        let hour = block.start_at.hour();
        let actual = i64::from(block.actual_minutes.unwrap_or(0));
        let planned = block.duration_minutes();

        match groups.iter_mut().find(|g| g.weekday == weekday && g.hour == hour) {
            Some(group) => {
                group.sessions += 1;
                group.actual += actual;
                group.planned += planned;
            }
            None => groups.push(SlotGroup {
                weekday,
                hour,
                sessions: 1,
                actual,
                planned,
            }),
        }
    }

    let best = groups
        .iter()
        .filter(|g| g.sessions >= MIN_SESSIONS)
        .fold(None::<&SlotGroup>, |best, g| match best {
            Some(b) if b.ratio() >= g.ratio() => Some(b),
            _ => Some(g),
        })?;

    Some(ProductiveSlot {
        day: weekday_name(best.weekday).to_string(),
        hour_range: format!("{}-{}", best.hour, best.hour + 1),
        productivity_percent: (best.ratio() * 100.0).round() as u32,
    })
}
