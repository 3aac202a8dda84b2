//! Inclusive calendar-day windows

use crate::error::{Error, Result};
use chrono::{Duration, Months, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// The `days` calendar days ending at (and including) `end`.
    pub fn trailing_days(end: NaiveDate, days: u32) -> Result<Self> {
        if days == 0 {
            return Err(Error::InvalidArgument(
                "window must span at least one day".to_string(),
            ));
        }
        let start = end
            .checked_sub_signed(Duration::days(i64::from(days) - 1))
            .ok_or_else(|| Error::InvalidArgument(format!("{} days before {} is out of range", days, end)))?;
        Self::new(start, end)
    }

    /// Same calendar day one year earlier through `end`. Feb 29 maps to Feb 28.
    pub fn trailing_year(end: NaiveDate) -> Result<Self> {
        let start = end
            .checked_sub_months(Months::new(12))
            .ok_or_else(|| Error::InvalidArgument(format!("one year before {} is out of range", end)))?;
        Self::new(start, end)
    }

    pub fn len_days(&self) -> usize {
        ((self.end - self.start).num_days() + 1) as usize
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_new_rejects_reversed_window() {
        let err = DateWindow::new(date("2024-01-02"), date("2024-01-01")).unwrap_err();
        assert!(matches!(err, Error::InvalidWindow { .. }));
    }

    #[test]
    fn test_single_day_window() {
        let window = DateWindow::new(date("2024-01-01"), date("2024-01-01")).unwrap();
        assert_eq!(window.len_days(), 1);
        assert_eq!(window.iter_days().collect::<Vec<_>>(), vec![date("2024-01-01")]);
    }

    #[test]
    fn test_trailing_days() {
        let window = DateWindow::trailing_days(date("2024-03-01"), 30).unwrap();
        assert_eq!(window.start, date("2024-02-01"));
        assert_eq!(window.len_days(), 30);
    }

    #[test]
    fn test_trailing_days_zero() {
        assert!(DateWindow::trailing_days(date("2024-03-01"), 0).is_err());
    }

    #[test]
    fn test_trailing_year() {
        let window = DateWindow::trailing_year(date("2024-06-15")).unwrap();
        assert_eq!(window.start, date("2023-06-15"));
        assert_eq!(window.len_days(), 367); // spans 2024-02-29
    }

    #[test]
    fn test_trailing_year_from_leap_day() {
        let window = DateWindow::trailing_year(date("2024-02-29")).unwrap();
        assert_eq!(window.start, date("2023-02-28"));
    }

    #[test]
    fn test_contains() {
        let window = DateWindow::new(date("2024-01-01"), date("2024-01-31")).unwrap();
        assert!(window.contains(date("2024-01-01")));
        assert!(window.contains(date("2024-01-31")));
        assert!(!window.contains(date("2024-02-01")));
        assert!(!window.contains(date("2023-12-31")));
    }
}
