use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Datelike;
use colored::Colorize;
use gitfit_core::{
    calendar_weeks, ActivityReport, ActivityTotals, CalendarDay, ReportMeta, StreakSummary,
};

use super::load_report;
use crate::config::GitfitConfig;
use crate::settings::Settings;
use crate::{format_count, format_days, SourceArgs, WindowArgs};

const CELL: &str = "■ ";
const DAY_LABELS: [&str; 7] = ["Sun", "", "Tue", "", "Thu", "", "Sat"];

pub fn run_activity(
    settings: &Settings,
    source: &SourceArgs,
    window: &WindowArgs,
    json: bool,
) -> Result<()> {
    let report = load_report(settings, source, window)?;

    if json {
        #[derive(serde::Serialize)]
        #[serde(rename_all = "camelCase")]
        struct ActivitySummaryJson<'a> {
            meta: &'a ReportMeta,
            totals: &'a ActivityTotals,
            streaks: &'a StreakSummary,
        }

        let output = ActivitySummaryJson {
            meta: &report.meta,
            totals: &report.totals,
            streaks: &report.streaks,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    use comfy_table::{ContentArrangement, Table};

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec![
        "Commits".to_string(),
        format_count(report.totals.total_count),
    ]);
    table.add_row(vec![
        "Active days".to_string(),
        report.totals.active_days.to_string(),
    ]);
    table.add_row(vec![
        "Current streak".to_string(),
        format_days(report.streaks.current_streak),
    ]);
    table.add_row(vec![
        "Longest streak".to_string(),
        format_days(report.streaks.longest_streak),
    ]);

    println!("{table}");
    println!(
        "{}",
        format!(
            "  {} → {} ({} mode)",
            report.meta.window_start,
            report.meta.window_end,
            report.meta.mode.as_str()
        )
        .bright_black()
    );

    Ok(())
}

pub fn run_graph(
    settings: &Settings,
    source: &SourceArgs,
    window: &WindowArgs,
    output: Option<PathBuf>,
) -> Result<()> {
    let report = load_report(settings, source, window)?;
    let content = serde_json::to_string_pretty(&report)?;

    match output {
        Some(path) => {
            std::fs::write(&path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{}",
                format!(
                    "  ✓ Wrote {} days of activity to {}",
                    report.calendar.len(),
                    path.display()
                )
                .green()
            );
        }
        None => println!("{}", content),
    }

    Ok(())
}

pub fn run_heatmap(settings: &Settings, source: &SourceArgs, window: &WindowArgs) -> Result<()> {
    let report = load_report(settings, source, window)?;
    let config = GitfitConfig::load();

    for line in render_heatmap(&report, config) {
        println!("{}", line);
    }
    Ok(())
}

fn render_heatmap(report: &ActivityReport, config: &GitfitConfig) -> Vec<String> {
    let weeks = calendar_weeks(&report.calendar);
    let mut lines = Vec::with_capacity(12);

    lines.push(String::new());
    lines.push(format!("    {}", month_header(&weeks)).bright_black().to_string());

    for (row, label) in DAY_LABELS.iter().enumerate() {
        let mut line = format!("{:<4}", label).bright_black().to_string();
        for week in &weeks {
            match week.get(row).copied().flatten() {
                Some(day) => line.push_str(&paint_cell(day.level, config)),
                None => line.push_str("  "),
            }
        }
        lines.push(line);
    }

    let mut legend = format!("    {} ", "Less".bright_black());
    for level in 0..=4u8 {
        legend.push_str(&paint_cell(level, config));
    }
    legend.push_str(&"More".bright_black().to_string());
    lines.push(String::new());
    lines.push(legend);

    lines.push(String::new());
    lines.push(format!(
        "    {} commits · {} active · streak {} · best {}",
        format_count(report.totals.total_count).bold(),
        format_days(report.totals.active_days),
        format_days(report.streaks.current_streak),
        format_days(report.streaks.longest_streak),
    ));
    lines.push(String::new());
    lines
}

fn paint_cell(level: u8, config: &GitfitConfig) -> String {
    let (r, g, b) = config.level_color(level);
    CELL.truecolor(r, g, b).to_string()
}

/// Three-letter month names over the first week column in which each month starts.
fn month_header(weeks: &[Vec<Option<CalendarDay>>]) -> String {
    let mut header = String::new();
    let mut last_month = None;

    for (index, week) in weeks.iter().enumerate() {
        let first_day = week.iter().flatten().next();
        let month = first_day.map(|d| d.date.month());
        if month.is_some() && month != last_month {
            // Labels need four columns; skip if the previous label still occupies this one
            let column = index * 2;
            if header.chars().count() <= column {
                while header.chars().count() < column {
                    header.push(' ');
                }
                if let Some(day) = first_day {
                    header.push_str(&day.date.format("%b").to_string());
                }
            }
            last_month = month;
        }
    }
    header
}
