//! Filter windows and calendar boundaries
//!
//! The week and month windows are measured from local midnight on the first
//! day of the current week/month. Boundaries are computed in whatever time
//! zone the evaluation instant carries, so callers can pin `Utc`, a fixed
//! offset, or `Local`.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Which time window of expenses to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Every record
    #[default]
    All,
    /// Records since the start of the current week
    Week,
    /// Records since the first of the current month
    Month,
}

impl FilterMode {
    pub const MODES: [FilterMode; 3] = [FilterMode::All, FilterMode::Week, FilterMode::Month];

    /// Inclusive lower bound of the window, or `None` for `All`
    pub fn lower_bound<Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
        week_start: WeekStart,
    ) -> Option<DateTime<Tz>> {
        match self {
            Self::All => None,
            Self::Week => Some(start_of_week(now, week_start)),
            Self::Month => Some(start_of_month(now)),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All time",
            Self::Week => "This week",
            Self::Month => "This month",
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Week => write!(f, "week"),
            Self::Month => write!(f, "month"),
        }
    }
}

impl FromStr for FilterMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "a" => Ok(Self::All),
            "week" | "w" => Ok(Self::Week),
            "month" | "m" => Ok(Self::Month),
            _ => Err(ValidationError::UnknownFilter(s.to_string())),
        }
    }
}

/// First day of the calendar week
///
/// Defaults to Sunday (day 0 in a Sunday-first numbering).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekStart(Weekday);

impl WeekStart {
    pub const SUNDAY: WeekStart = WeekStart(Weekday::Sun);
    pub const MONDAY: WeekStart = WeekStart(Weekday::Mon);

    /// Build from a Sunday-first index (0 = Sunday ... 6 = Saturday)
    pub fn from_index(index: u8) -> Option<Self> {
        let day = match index {
            0 => Weekday::Sun,
            1 => Weekday::Mon,
            2 => Weekday::Tue,
            3 => Weekday::Wed,
            4 => Weekday::Thu,
            5 => Weekday::Fri,
            6 => Weekday::Sat,
            _ => return None,
        };
        Some(Self(day))
    }

    pub fn weekday(&self) -> Weekday {
        self.0
    }
}

impl Default for WeekStart {
    fn default() -> Self {
        Self::SUNDAY
    }
}

/// Midnight at the start of the instant's local day
pub fn start_of_day<Tz: TimeZone>(instant: &DateTime<Tz>) -> DateTime<Tz> {
    local_midnight(&instant.timezone(), instant.date_naive())
}

/// Midnight on the most recent `week_start` day, on or before the instant
pub fn start_of_week<Tz: TimeZone>(instant: &DateTime<Tz>, week_start: WeekStart) -> DateTime<Tz> {
    let date = instant.date_naive();
    let days_back = (date.weekday().num_days_from_sunday() + 7
        - week_start.weekday().num_days_from_sunday())
        % 7;
    local_midnight(
        &instant.timezone(),
        date - Duration::days(i64::from(days_back)),
    )
}

/// Midnight on the first day of the instant's month
pub fn start_of_month<Tz: TimeZone>(instant: &DateTime<Tz>) -> DateTime<Tz> {
    let date = instant.date_naive();
    let first = NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date);
    local_midnight(&instant.timezone(), first)
}

/// Resolve 00:00 on `date` in `tz`
///
/// An ambiguous midnight resolves to the earlier instant. A midnight that
/// falls in a DST gap resolves to the first valid local time after it.
pub fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    let midnight = date.and_time(NaiveTime::MIN);
    if let Some(dt) = tz.from_local_datetime(&midnight).earliest() {
        return dt;
    }

    let mut candidate: NaiveDateTime = midnight;
    for _ in 0..(24 * 4) {
        candidate += Duration::minutes(15);
        if let Some(dt) = tz.from_local_datetime(&candidate).earliest() {
            return dt;
        }
    }
    tz.from_utc_datetime(&midnight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use chrono_tz::America::{Havana, Sao_Paulo};

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_start_of_day() {
        let now = utc(2025, 3, 12, 15, 45);
        assert_eq!(start_of_day(&now), utc(2025, 3, 12, 0, 0));
    }

    #[test]
    fn test_start_of_week_sunday_first() {
        // 2025-03-12 is a Wednesday; the week began Sunday 2025-03-09.
        let now = utc(2025, 3, 12, 15, 45);
        assert_eq!(start_of_week(&now, WeekStart::SUNDAY), utc(2025, 3, 9, 0, 0));
    }

    #[test]
    fn test_start_of_week_on_sunday_is_same_day() {
        let now = utc(2025, 3, 9, 0, 0);
        assert_eq!(start_of_week(&now, WeekStart::SUNDAY), now);
    }

    #[test]
    fn test_start_of_week_saturday() {
        let now = utc(2025, 3, 15, 23, 59);
        assert_eq!(start_of_week(&now, WeekStart::SUNDAY), utc(2025, 3, 9, 0, 0));
    }

    #[test]
    fn test_start_of_week_monday_first() {
        let wednesday = utc(2025, 3, 12, 15, 45);
        assert_eq!(
            start_of_week(&wednesday, WeekStart::MONDAY),
            utc(2025, 3, 10, 0, 0)
        );

        // On a Sunday a Monday-first week began six days earlier.
        let sunday = utc(2025, 3, 9, 8, 0);
        assert_eq!(
            start_of_week(&sunday, WeekStart::MONDAY),
            utc(2025, 3, 3, 0, 0)
        );
    }

    #[test]
    fn test_start_of_week_crosses_month_and_year() {
        // 2025-01-01 is a Wednesday.
        let now = utc(2025, 1, 1, 10, 0);
        assert_eq!(start_of_week(&now, WeekStart::SUNDAY), utc(2024, 12, 29, 0, 0));
    }

    #[test]
    fn test_start_of_month() {
        assert_eq!(start_of_month(&utc(2025, 3, 12, 15, 45)), utc(2025, 3, 1, 0, 0));
        assert_eq!(start_of_month(&utc(2024, 2, 29, 23, 0)), utc(2024, 2, 1, 0, 0));
        assert_eq!(start_of_month(&utc(2025, 3, 1, 0, 0)), utc(2025, 3, 1, 0, 0));
    }

    #[test]
    fn test_boundaries_use_instant_offset() {
        // 01:30 on March 1st at UTC+10 is still February in UTC.
        let tz = FixedOffset::east_opt(10 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2025, 3, 1, 1, 30, 0).unwrap();

        let start = start_of_month(&now);
        assert_eq!(start, tz.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap());
        assert_eq!(start.with_timezone(&Utc), utc(2025, 2, 28, 14, 0));
    }

    #[test]
    fn test_lower_bound_per_mode() {
        let now = utc(2025, 3, 12, 15, 45);
        assert_eq!(FilterMode::All.lower_bound(&now, WeekStart::SUNDAY), None);
        assert_eq!(
            FilterMode::Week.lower_bound(&now, WeekStart::SUNDAY),
            Some(utc(2025, 3, 9, 0, 0))
        );
        assert_eq!(
            FilterMode::Month.lower_bound(&now, WeekStart::SUNDAY),
            Some(utc(2025, 3, 1, 0, 0))
        );
    }

    #[test]
    fn test_filter_mode_parse() {
        assert_eq!("all".parse::<FilterMode>().unwrap(), FilterMode::All);
        assert_eq!("Week".parse::<FilterMode>().unwrap(), FilterMode::Week);
        assert_eq!(" m ".parse::<FilterMode>().unwrap(), FilterMode::Month);
        assert!(matches!(
            "year".parse::<FilterMode>(),
            Err(ValidationError::UnknownFilter(_))
        ));
    }

    #[test]
    fn test_filter_mode_serde() {
        let json = serde_json::to_string(&FilterMode::Month).unwrap();
        assert_eq!(json, "\"month\"");
        let back: FilterMode = serde_json::from_str("\"week\"").unwrap();
        assert_eq!(back, FilterMode::Week);
    }

    #[test]
    fn test_week_start_from_index() {
        assert_eq!(WeekStart::from_index(0), Some(WeekStart::SUNDAY));
        assert_eq!(WeekStart::from_index(1), Some(WeekStart::MONDAY));
        assert_eq!(WeekStart::from_index(6).unwrap().weekday(), Weekday::Sat);
        assert_eq!(WeekStart::from_index(7), None);
        assert_eq!(WeekStart::default(), WeekStart::SUNDAY);
    }

    #[test]
    fn test_midnight_in_dst_gap() {
        // Sao Paulo skipped from 00:00 to 01:00 (UTC-2) on 2018-11-04.
        let date = NaiveDate::from_ymd_opt(2018, 11, 4).unwrap();
        let midnight = local_midnight(&Sao_Paulo, date);
        assert_eq!(midnight.with_timezone(&Utc), utc(2018, 11, 4, 3, 0));
        assert_eq!(midnight.date_naive(), date);

        let afternoon = Sao_Paulo.with_ymd_and_hms(2018, 11, 4, 15, 0, 0).unwrap();
        assert_eq!(start_of_day(&afternoon), midnight);
    }

    #[test]
    fn test_ambiguous_midnight_takes_earlier() {
        // Havana fell back from 01:00 to 00:00 on 2019-11-03, so midnight
        // happened at both 04:00 and 05:00 UTC.
        let date = NaiveDate::from_ymd_opt(2019, 11, 3).unwrap();
        let midnight = local_midnight(&Havana, date);
        assert_eq!(midnight.with_timezone(&Utc), utc(2019, 11, 3, 4, 0));

        let evening = Havana.with_ymd_and_hms(2019, 11, 3, 20, 0, 0).unwrap();
        assert_eq!(start_of_day(&evening), midnight);
    }
}
