//! Time Window Resolver — pure calendar-boundary arithmetic.
//!
//! All ranges are closed: `end` is inclusive to the last millisecond of
//! its day. Weeks always start on Monday regardless of host locale; this
//! is a fixed design decision the dashboard depends on.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

/// A closed `[start, end]` range of instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Inclusive membership test.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

fn day_start(day: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN))
}

fn day_end(day: NaiveDate) -> DateTime<Utc> {
    let last_ms = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).expect("valid literal time");
    Utc.from_utc_datetime(&day.and_time(last_ms))
}

/// Monday of the week containing `day`.
fn monday_of(day: NaiveDate) -> NaiveDate {
    day - Duration::days(day.weekday().num_days_from_monday() as i64)
}

/// The week containing the reference instant: Monday 00:00:00.000 to
/// Sunday 23:59:59.999.
pub fn current_week(now: DateTime<Utc>) -> DateRange {
    weeks_ago(now, 0)
}

/// The week immediately following the current one.
pub fn next_week(now: DateTime<Utc>) -> DateRange {
    let monday = monday_of(now.date_naive()) + Duration::weeks(1);
    DateRange {
        start: day_start(monday),
        end: day_end(monday + Duration::days(6)),
    }
}

/// The `n`-th Monday-start week before the current one (0 = current).
pub fn weeks_ago(now: DateTime<Utc>, n: u32) -> DateRange {
    let monday = monday_of(now.date_naive()) - Duration::weeks(n as i64);
    DateRange {
        start: day_start(monday),
        end: day_end(monday + Duration::days(6)),
    }
}

/// The calendar month containing the reference instant.
pub fn current_month(now: DateTime<Utc>) -> DateRange {
    months_ago(now, 0)
}

/// The calendar month immediately before the current one.
pub fn previous_month(now: DateTime<Utc>) -> DateRange {
    months_ago(now, 1)
}

/// The `n`-th calendar month before the current one (0 = current).
/// Year rollover is handled by counting whole months since year zero.
pub fn months_ago(now: DateTime<Utc>, n: u32) -> DateRange {
    let today = now.date_naive();
    let months = today.year() * 12 + today.month0() as i32 - n as i32;
    let (year, month0) = (months.div_euclid(12), months.rem_euclid(12) as u32);

    let first = NaiveDate::from_ymd_opt(year, month0 + 1, 1).expect("valid first of month");
    let next_first = if month0 == 11 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month0 + 2, 1)
    }
    .expect("valid first of next month");

    DateRange {
        start: day_start(first),
        end: day_end(next_first - Duration::days(1)),
    }
}

/// Trailing `days`-day window ending exactly at the reference instant.
/// This window slides with `now`; it is not anchored to calendar
/// boundaries like the month/week ranges above.
pub fn rolling_days(now: DateTime<Utc>, days: u32) -> DateRange {
    DateRange {
        start: now - Duration::days(days as i64),
        end: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 30, 0).unwrap()
    }

    // -----------------------------------------------------------------------
    // Weeks
    // -----------------------------------------------------------------------

    #[test]
    fn week_of_wednesday_jan_10_2024() {
        // 2024-01-10 is a Wednesday; its week is Mon 01-08 .. Sun 01-14.
        let week = current_week(at(2024, 1, 10, 15));
        assert_eq!(week.start, at(2024, 1, 8, 0).with_minute(0).unwrap());
        assert_eq!(week.start.date_naive().to_string(), "2024-01-08");
        assert_eq!(week.end.date_naive().to_string(), "2024-01-14");
        assert_eq!(week.end.hour(), 23);
        assert_eq!(week.end.minute(), 59);
        assert_eq!(week.end.second(), 59);
    }

    #[test]
    fn week_start_is_always_monday() {
        // Every day of one week maps to the same Monday-start range.
        let reference = current_week(at(2024, 1, 8, 9));
        for day in 8..=14 {
            let week = current_week(at(2024, 1, day, 9));
            assert_eq!(week, reference, "day {day}");
            assert_eq!(
                week.start.date_naive().weekday(),
                chrono::Weekday::Mon
            );
        }
    }

    #[test]
    fn sunday_belongs_to_preceding_monday_week() {
        // 2024-01-14 is a Sunday; locale conventions that start weeks on
        // Sunday must not leak in.
        let week = current_week(at(2024, 1, 14, 10));
        assert_eq!(week.start.date_naive().to_string(), "2024-01-08");
    }

    #[test]
    fn next_week_is_contiguous_and_disjoint() {
        let now = at(2024, 1, 10, 12);
        let this = current_week(now);
        let next = next_week(now);
        assert_eq!(next.start.date_naive().to_string(), "2024-01-15");
        assert!(this.end < next.start);
        // Gap between the ranges is a single millisecond.
        assert_eq!((next.start - this.end).num_milliseconds(), 1);
    }

    #[test]
    fn weeks_ago_zero_is_current_week() {
        let now = at(2024, 3, 22, 8);
        assert_eq!(weeks_ago(now, 0), current_week(now));
    }

    #[test]
    fn weeks_ago_crosses_year_boundary() {
        // Two weeks before a 2024-01-10 reference starts in December 2023.
        let week = weeks_ago(at(2024, 1, 10, 12), 2);
        assert_eq!(week.start.date_naive().to_string(), "2023-12-25");
        assert_eq!(week.end.date_naive().to_string(), "2023-12-31");
    }

    // -----------------------------------------------------------------------
    // Months
    // -----------------------------------------------------------------------

    #[test]
    fn current_month_boundaries() {
        let month = current_month(at(2024, 2, 14, 12));
        assert_eq!(month.start.date_naive().to_string(), "2024-02-01");
        // 2024 is a leap year.
        assert_eq!(month.end.date_naive().to_string(), "2024-02-29");
    }

    #[test]
    fn previous_month_handles_january() {
        let month = previous_month(at(2024, 1, 5, 12));
        assert_eq!(month.start.date_naive().to_string(), "2023-12-01");
        assert_eq!(month.end.date_naive().to_string(), "2023-12-31");
    }

    #[test]
    fn months_ago_walks_across_years() {
        let month = months_ago(at(2024, 3, 31, 12), 5);
        assert_eq!(month.start.date_naive().to_string(), "2023-10-01");
        assert_eq!(month.end.date_naive().to_string(), "2023-10-31");
    }

    #[test]
    fn months_ago_zero_is_current_month() {
        let now = at(2024, 7, 1, 0);
        assert_eq!(months_ago(now, 0), current_month(now));
    }

    // -----------------------------------------------------------------------
    // Rolling window + membership
    // -----------------------------------------------------------------------

    #[test]
    fn rolling_window_slides_with_reference() {
        let now = at(2024, 6, 15, 18);
        let window = rolling_days(now, 30);
        assert_eq!(window.end, now);
        assert_eq!(window.start, now - Duration::days(30));
        assert!(window.contains(now - Duration::days(29)));
        assert!(!window.contains(now - Duration::days(31)));
    }

    #[test]
    fn contains_is_inclusive_at_both_ends() {
        let week = current_week(at(2024, 1, 10, 12));
        assert!(week.contains(week.start));
        assert!(week.contains(week.end));
        assert!(!week.contains(week.end + Duration::milliseconds(1)));
    }
}
