//! Trend Builder — rolling sets of sequential, non-overlapping windows
//! and the fold that turns per-window record sets into ordered series.
//!
//! The concurrent dispatch of per-window fetches lives in the engine;
//! this module only derives the windows and folds fetched data.

use chrono::{DateTime, Utc};

use crate::window::{self, DateRange};

/// `n` consecutive Monday-start weeks, oldest first, newest being the
/// week containing `now`.
pub fn weekly_windows(now: DateTime<Utc>, n: u32) -> Vec<DateRange> {
    (0..n).rev().map(|i| window::weeks_ago(now, i)).collect()
}

/// `n` consecutive calendar months, oldest first, newest being the month
/// containing `now`.
pub fn monthly_windows(now: DateTime<Utc>, n: u32) -> Vec<DateRange> {
    (0..n).rev().map(|i| window::months_ago(now, i)).collect()
}

/// Folds each window's records into one series entry. The output always
/// has exactly one entry per window: an empty window folds the empty
/// slice, so identity values (zeros) appear instead of gaps.
pub fn build_series<R, T>(per_window: &[Vec<R>], fold: impl Fn(&[R]) -> T) -> Vec<T> {
    per_window.iter().map(|records| fold(records)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn weekly_windows_are_sequential_and_disjoint() {
        let windows = weekly_windows(at(2024, 1, 10), 4);
        assert_eq!(windows.len(), 4);
        // Oldest first, each window ending right before the next starts.
        for pair in windows.windows(2) {
            assert!(pair[0].end < pair[1].start);
            assert_eq!((pair[1].start - pair[0].end).num_milliseconds(), 1);
        }
        // Newest window is the current week.
        assert_eq!(windows[3], window::current_week(at(2024, 1, 10)));
        assert_eq!(windows[0].start.date_naive().to_string(), "2023-12-18");
    }

    #[test]
    fn monthly_windows_cover_six_calendar_months() {
        let windows = monthly_windows(at(2024, 3, 15), 6);
        assert_eq!(windows.len(), 6);
        assert_eq!(windows[0].start.date_naive().to_string(), "2023-10-01");
        assert_eq!(windows[5].start.date_naive().to_string(), "2024-03-01");
        for pair in windows.windows(2) {
            assert!(pair[0].end < pair[1].start);
        }
    }

    #[test]
    fn series_has_one_entry_per_window_even_when_empty() {
        let per_window: Vec<Vec<u32>> = vec![vec![1, 2], vec![], vec![5], vec![]];
        let series = build_series(&per_window, |records| {
            records.iter().sum::<u32>()
        });
        assert_eq!(series, vec![3, 0, 5, 0]);
    }
}
