pub mod activity;
pub mod workouts;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use gitfit_core::{
    generate_report, ActivityReport, DateWindow, DemoSource, EventFeedSource, RecordFileSource,
    RecordSource,
};

use crate::settings::Settings;
use crate::{SourceArgs, WindowArgs};

/// Window end is `--until`, else `--today`, else the current UTC date.
pub fn resolve_window(args: &WindowArgs, settings: &Settings) -> Result<DateWindow> {
    let end = args.until.or(args.today).unwrap_or_else(today_utc);

    let window = if let Some(since) = args.since {
        DateWindow::new(since, end)?
    } else if let Some(days) = args.days.or_else(|| settings.default_window_days()) {
        DateWindow::trailing_days(end, days)?
    } else {
        DateWindow::trailing_year(end)?
    };
    Ok(window)
}

/// Explicit file flags win, then `--demo`, then the connected account's saved
/// feed. Anything else falls back to demo data.
pub fn resolve_source(args: &SourceArgs, settings: &Settings) -> Box<dyn RecordSource> {
    use colored::Colorize;

    if let Some(path) = &args.events {
        return Box::new(EventFeedSource::new(path));
    }
    if let Some(path) = &args.records {
        return Box::new(RecordFileSource::new(path));
    }
    if args.demo {
        return Box::new(DemoSource::new());
    }
    if let Some(path) = settings.connected_events_path() {
        tracing::debug!(path = %path.display(), "using connected account feed");
        return Box::new(EventFeedSource::new(path));
    }

    eprintln!(
        "{}",
        "  No activity source connected; showing demo data (run `gitfit connect` or pass --events)"
            .bright_black()
    );
    Box::new(DemoSource::new())
}

pub fn load_report(
    settings: &Settings,
    source_args: &SourceArgs,
    window_args: &WindowArgs,
) -> Result<ActivityReport> {
    let window = resolve_window(window_args, settings)?;
    let source = resolve_source(source_args, settings);
    let records = source
        .load(&window)
        .context("Failed to load activity records")?;
    Ok(generate_report(&records, &window, source.mode()))
}

pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitfit_core::SourceMode;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_resolve_window_since_until() {
        let args = WindowArgs {
            since: Some(date("2024-01-01")),
            until: Some(date("2024-01-31")),
            ..Default::default()
        };
        let window = resolve_window(&args, &Settings::default()).unwrap();
        assert_eq!(window.len_days(), 31);
    }

    #[test]
    fn test_resolve_window_days_from_today() {
        let args = WindowArgs {
            days: Some(7),
            today: Some(date("2024-01-10")),
            ..Default::default()
        };
        let window = resolve_window(&args, &Settings::default()).unwrap();
        assert_eq!(window.start, date("2024-01-04"));
        assert_eq!(window.end, date("2024-01-10"));
    }

    #[test]
    fn test_resolve_window_until_beats_today() {
        let args = WindowArgs {
            days: Some(1),
            until: Some(date("2024-03-01")),
            today: Some(date("2024-06-01")),
            ..Default::default()
        };
        let window = resolve_window(&args, &Settings::default()).unwrap();
        assert_eq!(window.end, date("2024-03-01"));
    }

    #[test]
    fn test_resolve_window_reversed() {
        let args = WindowArgs {
            since: Some(date("2024-01-02")),
            until: Some(date("2024-01-01")),
            ..Default::default()
        };
        assert!(resolve_window(&args, &Settings::default()).is_err());
    }

    #[test]
    fn test_resolve_source_demo_fallback() {
        let source = resolve_source(&SourceArgs::default(), &Settings::default());
        assert_eq!(source.mode(), SourceMode::Demo);
    }

    #[test]
    fn test_resolve_source_connected_feed() {
        let settings = Settings {
            github_connected: true,
            events_path: Some("/tmp/events.json".into()),
            ..Default::default()
        };
        let source = resolve_source(&SourceArgs::default(), &settings);
        assert_eq!(source.mode(), SourceMode::Live);
    }
}
