//! Public event feed source
//!
//! Counts commits from push events per UTC calendar day. The feed is the JSON
//! array returned by the code-hosting platform's public events listing.

use super::{read_input, RecordSource};
use crate::error::{Error, Result};
use crate::window::DateWindow;
use crate::{ActivityRecord, SourceMode};
use chrono::{DateTime, NaiveDate, Utc};
use rayon::prelude::*;
use serde::de::IgnoredAny;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

const PUSH_EVENT: &str = "PushEvent";

#[derive(Debug, Clone, Deserialize)]
pub struct FeedEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub created_at: Option<String>,
    pub payload: Option<FeedPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedPayload {
    /// Only the number of commits matters
    pub commits: Option<Vec<IgnoredAny>>,
    pub size: Option<u64>,
}

impl FeedEvent {
    fn commit_count(&self) -> u64 {
        match &self.payload {
            Some(FeedPayload {
                commits: Some(commits),
                ..
            }) => commits.len() as u64,
            Some(FeedPayload { size: Some(size), .. }) => *size,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventFeedSource {
    path: PathBuf,
}

impl EventFeedSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSource for EventFeedSource {
    fn mode(&self) -> SourceMode {
        SourceMode::Live
    }

    fn load(&self, _window: &DateWindow) -> Result<Vec<ActivityRecord>> {
        let bytes = read_input(&self.path)?;
        let events = parse_event_feed(bytes)?;
        count_push_events(&events)
    }
}

pub fn parse_event_feed(mut bytes: Vec<u8>) -> Result<Vec<FeedEvent>> {
    let events: Vec<FeedEvent> =
        simd_json::from_slice(&mut bytes).map_err(|e| Error::FeedParse(e.to_string()))?;
    tracing::debug!(events = events.len(), "parsed event feed");
    Ok(events)
}

/// Per-day commit counts from push events, ascending by date.
pub fn count_push_events(events: &[FeedEvent]) -> Result<Vec<ActivityRecord>> {
    let daily: HashMap<NaiveDate, u64> = events
        .par_iter()
        .enumerate()
        .filter(|(_, event)| event.event_type == PUSH_EVENT)
        .try_fold(HashMap::new, |mut acc: HashMap<NaiveDate, u64>, (index, event)| {
            let date = event_day(index, event)?;
            let entry = acc.entry(date).or_insert(0);
            *entry = entry.saturating_add(event.commit_count());
            Ok::<_, Error>(acc)
        })
        .try_reduce(HashMap::new, |mut a, b| {
            for (date, count) in b {
                let entry = a.entry(date).or_insert(0);
                *entry = entry.saturating_add(count);
            }
            Ok(a)
        })?;

    let mut records: Vec<ActivityRecord> = Vec::with_capacity(daily.len());
    records.extend(
        daily
            .into_iter()
            .map(|(date, count)| ActivityRecord::new(date, count)),
    );
    records.sort_by(|a, b| a.date.cmp(&b.date));

    tracing::debug!(days = records.len(), "counted push events");
    Ok(records)
}

fn event_day(index: usize, event: &FeedEvent) -> Result<NaiveDate> {
    let created_at = event.created_at.as_deref().ok_or_else(|| Error::InvalidEvent {
        index,
        reason: "missing created_at".to_string(),
    })?;
    let timestamp = DateTime::parse_from_rfc3339(created_at).map_err(|e| Error::InvalidEvent {
        index,
        reason: format!("created_at '{}': {}", created_at, e),
    })?;
    Ok(timestamp.with_timezone(&Utc).date_naive())
}
