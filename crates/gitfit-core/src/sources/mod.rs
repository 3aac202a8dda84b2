//! Record sources
//!
//! Live and demo modes share the aggregator and differ only in where their
//! records come from.

pub mod demo;
pub mod events;
pub mod file;

pub use demo::DemoSource;
pub use events::EventFeedSource;
pub use file::RecordFileSource;

use crate::error::Result;
use crate::window::DateWindow;
use crate::{ActivityRecord, SourceMode};
use std::io::Read;
use std::path::Path;

pub trait RecordSource {
    fn mode(&self) -> SourceMode;

    /// Records for at least `window`. Sources may return dates outside it.
    fn load(&self, window: &DateWindow) -> Result<Vec<ActivityRecord>>;
}

/// Read a whole file, or stdin when `path` is `-`.
pub(crate) fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        return Ok(buf);
    }
    Ok(std::fs::read(path)?)
}
