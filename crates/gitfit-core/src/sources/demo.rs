//! Synthetic training log for demo mode
//!
//! Deterministic: a given date always yields the same count, so reports over
//! the same window are reproducible.

use super::RecordSource;
use crate::error::Result;
use crate::window::DateWindow;
use crate::{ActivityRecord, SourceMode};
use chrono::{Datelike, NaiveDate, Weekday};

/// Every n-th ISO week is a deload week with no training.
const DELOAD_EVERY_WEEKS: u32 = 5;

#[derive(Debug, Clone, Copy, Default)]
pub struct DemoSource;

impl DemoSource {
    pub fn new() -> Self {
        Self
    }

    /// Synthetic count for `date`, 0 on rest days.
    pub fn count_for(date: NaiveDate) -> u64 {
        let week = date.iso_week().week();
        if week % DELOAD_EVERY_WEEKS == 0 {
            return 0;
        }
        match date.weekday() {
            Weekday::Mon | Weekday::Tue | Weekday::Thu | Weekday::Sat => {
                1 + u64::from((date.ordinal() * 3 + week) % 7)
            }
            _ => 0,
        }
    }
}

impl RecordSource for DemoSource {
    fn mode(&self) -> SourceMode {
        SourceMode::Demo
    }

    fn load(&self, window: &DateWindow) -> Result<Vec<ActivityRecord>> {
        let records: Vec<ActivityRecord> = window
            .iter_days()
            .filter_map(|date| {
                let count = Self::count_for(date);
                (count > 0).then(|| ActivityRecord::new(date, count))
            })
            .collect();
        tracing::debug!(days = records.len(), "generated demo records");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bucket_level, compute_streaks};

    fn window() -> DateWindow {
        DateWindow::trailing_year(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()).unwrap()
    }

    #[test]
    fn test_demo_is_deterministic() {
        let source = DemoSource::new();
        assert_eq!(source.load(&window()).unwrap(), source.load(&window()).unwrap());
        assert_eq!(source.mode(), SourceMode::Demo);
    }

    #[test]
    fn test_demo_stays_in_window() {
        let window = window();
        let records = DemoSource::new().load(&window).unwrap();
        assert!(!records.is_empty());
        assert!(records.iter().all(|r| window.contains(r.date) && r.count > 0));
    }

    #[test]
    fn test_demo_rest_days() {
        // 2024-01-03 is a Wednesday, ISO week 1
        assert_eq!(DemoSource::count_for(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()), 0);
        // 2024-02-01 is a Thursday in ISO week 5, a deload week
        assert_eq!(DemoSource::count_for(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()), 0);
        // 2024-01-01 is a Monday in ISO week 1
        assert!(DemoSource::count_for(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()) > 0);
    }

    #[test]
    fn test_demo_covers_all_levels() {
        let records = DemoSource::new().load(&window()).unwrap();
        for level in 1..=4u8 {
            assert!(
                records.iter().any(|r| bucket_level(r.count) == level),
                "no demo day at level {}",
                level
            );
        }
    }

    #[test]
    fn test_demo_has_short_streaks() {
        let records = DemoSource::new().load(&window()).unwrap();
        let streaks = compute_streaks(&records, window().end);
        assert_eq!(streaks.longest_streak, 2);
    }
}
