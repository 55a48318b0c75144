//! Expense filtering
//!
//! Pure functions over an already-loaded snapshot. Records keep their input
//! order; the only question asked of each one is whether its creation time
//! is on or after the window's lower bound.

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::models::{Expense, FilterMode, WeekStart};

/// Filter against the current local time with a Sunday-first week
pub fn filter_expenses(records: &[Expense], mode: FilterMode) -> Vec<Expense> {
    filter_expenses_at(records, mode, &Local::now(), WeekStart::default())
}

/// Filter against an explicit evaluation instant
///
/// The window boundary is computed in `now`'s time zone. The lower bound is
/// inclusive and there is no upper bound, so records stamped in the future
/// are kept.
pub fn filter_expenses_at<Tz: TimeZone>(
    records: &[Expense],
    mode: FilterMode,
    now: &DateTime<Tz>,
    week_start: WeekStart,
) -> Vec<Expense> {
    match mode.lower_bound(now, week_start) {
        None => records.to_vec(),
        Some(bound) => {
            let bound = bound.with_timezone(&Utc);
            records
                .iter()
                .filter(|expense| expense.created_at() >= bound)
                .cloned()
                .collect()
        }
    }
}
