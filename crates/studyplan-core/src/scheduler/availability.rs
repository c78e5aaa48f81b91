//! Expansion of recurring availability windows into dated slots.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::schedule::AvailabilityWindow;

/// A concrete free interval inside the target week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Slot {
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Materialize every window for the 7 days starting at `week_start`.
///
/// Slots are sorted by start time. Overlapping windows are not merged; each
/// one yields its own slot.
///
/// # Errors
/// Returns a validation error for the first window with `start >= end` or an
/// out-of-range day of week. Nothing is expanded in that case.
pub fn expand_availability(
    windows: &[AvailabilityWindow],
    week_start: NaiveDate,
) -> Result<Vec<Slot>, ValidationError> {
    for window in windows {
        window.validate()?;
    }

    let mut slots: Vec<Slot> = week_start
        .iter_days()
        .take(7)
        .flat_map(|date| {
            windows
                .iter()
                .filter(move |w| w.falls_on(date))
                .map(move |w| Slot {
                    start: date.and_time(w.start_time),
                    end: date.and_time(w.end_time),
                })
        })
        .collect();

    slots.sort_by_key(|s| s.start);
    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn week() -> NaiveDate {
        // Monday
        NaiveDate::from_ymd_opt(2026, 10, 12).unwrap()
    }

    fn window(day: u8, from: (u32, u32), to: (u32, u32)) -> AvailabilityWindow {
        AvailabilityWindow::new(
            day,
            NaiveTime::from_hms_opt(from.0, from.1, 0).unwrap(),
            NaiveTime::from_hms_opt(to.0, to.1, 0).unwrap(),
        )
    }

    fn dt(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn expands_each_matching_day_in_order() {
        let windows = vec![
            window(3, (18, 0), (20, 0)), // Wednesday
            window(1, (9, 0), (11, 0)),  // Monday
            window(0, (10, 0), (12, 0)), // Sunday, last day of the week
        ];
        let slots = expand_availability(&windows, week()).unwrap();
        assert_eq!(
            slots,
            vec![
                Slot { start: dt(12, 9, 0), end: dt(12, 11, 0) },
                Slot { start: dt(14, 18, 0), end: dt(14, 20, 0) },
                Slot { start: dt(18, 10, 0), end: dt(18, 12, 0) },
            ]
        );
    }

    #[test]
    fn same_day_windows_sort_by_start() {
        let windows = vec![window(2, (15, 0), (16, 0)), window(2, (8, 0), (9, 30))];
        let slots = expand_availability(&windows, week()).unwrap();
        assert_eq!(slots[0].start, dt(13, 8, 0));
        assert_eq!(slots[1].start, dt(13, 15, 0));
        assert_eq!(slots[0].duration_minutes(), 90);
    }

    #[test]
    fn overlapping_windows_pass_through() {
        let windows = vec![window(1, (9, 0), (11, 0)), window(1, (10, 0), (12, 0))];
        let slots = expand_availability(&windows, week()).unwrap();
        assert_eq!(slots.len(), 2);
    }

    #[test]
    fn week_start_need_not_be_monday() {
        // Thursday start still covers one of each weekday
        let thursday = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        let windows = vec![window(1, (9, 0), (10, 0))];
        let slots = expand_availability(&windows, thursday).unwrap();
        assert_eq!(slots, vec![Slot { start: dt(19, 9, 0), end: dt(19, 10, 0) }]);
    }

    #[test]
    fn inverted_window_is_rejected() {
        let windows = vec![window(1, (9, 0), (11, 0)), window(2, (11, 0), (9, 0))];
        assert!(matches!(
            expand_availability(&windows, week()),
            Err(ValidationError::InvalidWindow { .. })
        ));
    }

    #[test]
    fn no_windows_no_slots() {
        assert!(expand_availability(&[], week()).unwrap().is_empty());
    }
}
