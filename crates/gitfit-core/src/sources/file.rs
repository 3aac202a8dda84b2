//! Pre-aggregated `{date, count}` record files

use super::{read_input, RecordSource};
use crate::error::Result;
use crate::records::parse_records_json;
use crate::window::DateWindow;
use crate::{ActivityRecord, SourceMode};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct RecordFileSource {
    path: PathBuf,
}

impl RecordFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSource for RecordFileSource {
    fn mode(&self) -> SourceMode {
        SourceMode::Live
    }

    fn load(&self, _window: &DateWindow) -> Result<Vec<ActivityRecord>> {
        parse_records_json(&read_input(&self.path)?)
    }
}
