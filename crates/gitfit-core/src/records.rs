//! Validation of raw `{date, count}` records
//!
//! Input comes from outside the process, so counts arrive as JSON numbers and
//! dates as strings. A single malformed record fails the whole batch.

use crate::error::{Error, Result};
use crate::ActivityRecord;
use chrono::NaiveDate;
use serde::Deserialize;

/// Largest count that survives a round trip through an IEEE double.
const MAX_COUNT: f64 = 9_007_199_254_740_992.0;

#[derive(Debug, Clone, Deserialize)]
pub struct RawActivityRecord {
    pub date: Option<String>,
    pub count: Option<f64>,
}

impl RawActivityRecord {
    pub fn validate(&self, index: usize) -> Result<ActivityRecord> {
        let invalid = |reason: String| Error::InvalidRecord { index, reason };

        let date_str = self
            .date
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| invalid("missing date".to_string()))?;
        let date = parse_day(date_str)
            .ok_or_else(|| invalid(format!("date '{}' is not YYYY-MM-DD", date_str)))?;

        let count = self.count.ok_or_else(|| invalid("missing count".to_string()))?;
        if !count.is_finite() {
            return Err(invalid(format!("count {} is not finite", count)));
        }
        if count < 0.0 {
            return Err(invalid(format!("count {} is negative", count)));
        }
        if count.fract() != 0.0 {
            return Err(invalid(format!("count {} is not a whole number", count)));
        }
        if count > MAX_COUNT {
            return Err(invalid(format!("count {} is too large", count)));
        }

        Ok(ActivityRecord::new(date, count as u64))
    }
}

pub fn validate_records(raw: &[RawActivityRecord]) -> Result<Vec<ActivityRecord>> {
    raw.iter()
        .enumerate()
        .map(|(index, record)| record.validate(index))
        .collect()
}

/// Parse a JSON array of `{date, count}` objects.
pub fn parse_records_json(bytes: &[u8]) -> Result<Vec<ActivityRecord>> {
    let raw: Vec<RawActivityRecord> = serde_json::from_slice(bytes)?;
    let records = validate_records(&raw)?;
    tracing::debug!(records = records.len(), "validated activity records");
    Ok(records)
}

/// Strict `YYYY-MM-DD` parse.
pub fn parse_day(s: &str) -> Option<NaiveDate> {
    if s.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
