#![deny(clippy::all)]

mod aggregator;
mod error;
pub mod records;
pub mod sources;
mod window;
pub mod workouts;

pub use aggregator::*;
pub use error::{Error, Result};
pub use records::parse_records_json;
pub use sources::{DemoSource, EventFeedSource, RecordFileSource, RecordSource};
pub use window::DateWindow;

use chrono::NaiveDate;
use serde::Serialize;

pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Number of qualifying events on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActivityRecord {
    pub date: NaiveDate,
    pub count: u64,
}

impl ActivityRecord {
    pub fn new(date: NaiveDate, count: u64) -> Self {
        Self { date, count }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub count: u64,
    pub level: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakSummary {
    pub current_streak: u32,
    pub longest_streak: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityTotals {
    pub total_count: u64,
    pub active_days: u32,
}

/// Where the records behind a report came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    Live,
    Demo,
}

impl SourceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceMode::Live => "live",
            SourceMode::Demo => "demo",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMeta {
    pub generated_at: String,
    pub version: String,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    pub mode: SourceMode,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityReport {
    pub meta: ReportMeta,
    pub totals: ActivityTotals,
    pub streaks: StreakSummary,
    pub calendar: Vec<CalendarDay>,
}
