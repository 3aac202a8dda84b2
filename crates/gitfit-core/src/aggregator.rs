//! Activity aggregation: calendar, intensity levels, streaks and totals
//!
//! Every function here is pure. Inputs may be unsorted, sparse and contain
//! duplicate dates; duplicates are summed before anything else happens.

use crate::error::Result;
use crate::window::DateWindow;
use crate::{
    ActivityRecord, ActivityReport, ActivityTotals, CalendarDay, ReportMeta, SourceMode,
    StreakSummary,
};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// Current streaks longer than this are reported as this value.
pub const MAX_STREAK_LOOKBACK_DAYS: u32 = 365;

/// Map a day's event count to a display intensity in `0..=4`.
pub fn bucket_level(count: u64) -> u8 {
    match count {
        0 => 0,
        1 => 1,
        2..=3 => 2,
        4..=6 => 3,
        _ => 4,
    }
}

/// Sum counts per date. Ordered ascending by date.
pub fn merge_records(records: &[ActivityRecord]) -> BTreeMap<NaiveDate, u64> {
    let mut merged: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for record in records {
        let entry = merged.entry(record.date).or_insert(0);
        *entry = entry.saturating_add(record.count);
    }
    merged
}

/// Dense, zero-filled calendar over `[window_start, window_end]`.
///
/// Records outside the window are ignored. Fails when the window is reversed.
pub fn build_calendar(
    records: &[ActivityRecord],
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Result<Vec<CalendarDay>> {
    let window = DateWindow::new(window_start, window_end)?;
    Ok(fill_calendar(&merge_records(records), &window))
}

/// Current streak ending at `today` and longest streak anywhere in `records`.
pub fn compute_streaks(records: &[ActivityRecord], today: NaiveDate) -> StreakSummary {
    let merged = merge_records(records);

    let mut current_streak = 0u32;
    let mut check_date = today;
    while current_streak < MAX_STREAK_LOOKBACK_DAYS {
        match merged.get(&check_date) {
            Some(&count) if count > 0 => current_streak += 1,
            _ => break,
        }
        check_date = match check_date.pred_opt() {
            Some(date) => date,
            None => break,
        };
    }

    let mut longest_streak = 0u32;
    let mut streak = 0u32;
    let mut prev_date: Option<NaiveDate> = None;

    for (&date, _) in merged.iter().filter(|(_, count)| **count > 0) {
        streak = match prev_date {
            Some(prev) if prev.succ_opt() == Some(date) => streak + 1,
            _ => 1,
        };
        longest_streak = longest_streak.max(streak);
        prev_date = Some(date);
    }

    StreakSummary {
        current_streak,
        longest_streak,
    }
}

pub fn compute_totals(records: &[ActivityRecord]) -> ActivityTotals {
    let merged = merge_records(records);
    let total_count = merged
        .values()
        .fold(0u64, |acc, count| acc.saturating_add(*count));
    let active_days = merged.values().filter(|count| **count > 0).count() as u32;

    ActivityTotals {
        total_count,
        active_days,
    }
}

/// Slice a calendar into Sunday-first weeks of seven slots.
///
/// The first week is padded with `None` up to the weekday of the first day;
/// the last week is left short.
pub fn calendar_weeks(days: &[CalendarDay]) -> Vec<Vec<Option<CalendarDay>>> {
    let Some(first) = days.first() else {
        return Vec::new();
    };

    let offset = first.date.weekday().num_days_from_sunday() as usize;
    let mut weeks: Vec<Vec<Option<CalendarDay>>> = Vec::with_capacity((days.len() + offset) / 7 + 1);
    let mut current_week: Vec<Option<CalendarDay>> = vec![None; offset];

    for day in days {
        current_week.push(Some(*day));
        if current_week.len() == 7 {
            weeks.push(current_week);
            current_week = Vec::with_capacity(7);
        }
    }
    if !current_week.is_empty() {
        weeks.push(current_week);
    }

    weeks
}

/// Calendar, streaks and totals for `window`, with streaks anchored at its end.
///
/// Records outside the window are dropped first, so streaks stop at the window start.
pub fn generate_report(
    records: &[ActivityRecord],
    window: &DateWindow,
    mode: SourceMode,
) -> ActivityReport {
    let in_window: Vec<ActivityRecord> = records
        .iter()
        .filter(|r| window.contains(r.date))
        .copied()
        .collect();
    let merged = merge_records(&in_window);
    let calendar = fill_calendar(&merged, window);
    let streaks = compute_streaks(&in_window, window.end);
    let totals = compute_totals(&in_window);

    tracing::debug!(
        records = records.len(),
        days = calendar.len(),
        total = totals.total_count,
        mode = mode.as_str(),
        "generated activity report"
    );

    ActivityReport {
        meta: ReportMeta {
            generated_at: chrono::Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            window_start: window.start,
            window_end: window.end,
            mode,
        },
        totals,
        streaks,
        calendar,
    }
}

// =============================================================================
// Internal helpers
// =============================================================================

fn fill_calendar(merged: &BTreeMap<NaiveDate, u64>, window: &DateWindow) -> Vec<CalendarDay> {
    let mut calendar = Vec::with_capacity(window.len_days());
    calendar.extend(window.iter_days().map(|date| {
        let count = merged.get(&date).copied().unwrap_or(0);
        CalendarDay {
            date,
            count,
            level: bucket_level(count),
        }
    }));
    calendar
}
