//! Error types for gitfit-core

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Window start falls after its end
    #[error("invalid window: start {start} is after end {end}")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },

    /// Activity record rejected at ingestion
    #[error("invalid activity record at index {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    /// Feed event rejected at ingestion
    #[error("invalid event at index {index}: {reason}")]
    InvalidEvent { index: usize, reason: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The event feed is not a JSON array of events
    #[error("event feed parse error: {0}")]
    FeedParse(String),
}

pub type Result<T> = std::result::Result<T, Error>;
