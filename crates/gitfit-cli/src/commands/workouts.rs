use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use colored::Colorize;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use gitfit_core::workouts::{
    load_workouts, recent_workouts, weekly_progress, workout_stats, workouts_for_date,
    StrengthGain, WeeklyProgress, WorkoutEntry, WorkoutStats,
};

use super::today_utc;
use crate::{format_days, format_weight};

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct WorkoutsReport {
    stats: WorkoutStats,
    recent_workouts: Vec<WorkoutEntry>,
    weekly_progress: Vec<WeeklyProgress>,
}

pub fn run(dir: &Path, recent: usize, today: Option<NaiveDate>, json: bool) -> Result<()> {
    let workouts = load_workouts(dir)
        .with_context(|| format!("Failed to load workouts from {}", dir.display()))?;
    let today = today.unwrap_or_else(today_utc);

    let report = WorkoutsReport {
        stats: workout_stats(&workouts, today),
        recent_workouts: recent_workouts(&workouts, recent),
        weekly_progress: weekly_progress(&workouts),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_stats(&report.stats);

    if report.recent_workouts.is_empty() {
        println!("{}", "  No workouts logged yet.".bright_black());
        return Ok(());
    }

    println!("\n  {}", "Recent workouts".bold());
    println!("{}", recent_table(&report.recent_workouts));
    println!("\n  {}", "Weekly progress".bold());
    println!("{}", progress_table(&report.weekly_progress));

    Ok(())
}

/// Workouts logged on a single day. Exits non-zero when none exist.
pub fn run_day(dir: &Path, date: NaiveDate, json: bool) -> Result<()> {
    let workouts = load_workouts(dir)
        .with_context(|| format!("Failed to load workouts from {}", dir.display()))?;
    let found = workouts_for_date(&workouts, date);
    if found.is_empty() {
        anyhow::bail!("No workout logged on {}", date);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&found)?);
    } else {
        println!("{}", recent_table(&found));
    }
    Ok(())
}

fn print_stats(stats: &WorkoutStats) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Workouts".to_string(), stats.total_workouts.to_string()]);
    table.add_row(vec![
        "Current streak".to_string(),
        format_days(stats.current_streak),
    ]);
    table.add_row(vec![
        "Longest streak".to_string(),
        format_days(stats.longest_streak),
    ]);
    table.add_row(vec![
        "Favorite exercise".to_string(),
        stats
            .favorite_exercise
            .clone()
            .unwrap_or_else(|| "Unknown".to_string()),
    ]);
    table.add_row(vec!["Max weight".to_string(), format_weight(stats.max_weight)]);
    table.add_row(vec![
        "Strength gain".to_string(),
        stats
            .strength_gain
            .as_ref()
            .map(format_strength_gain)
            .unwrap_or_else(|| "-".to_string()),
    ]);
    println!("{table}");
}

fn format_strength_gain(gain: &StrengthGain) -> String {
    let sign = if gain.gain >= 0.0 { "+" } else { "-" };
    let amount = format!("{}{}", sign, format_weight(gain.gain.abs()));
    match gain.gain_percent {
        Some(percent) => format!("{} ({:+.1}%)", amount, percent),
        None => amount,
    }
}

fn recent_table(workouts: &[WorkoutEntry]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Date", "Exercise", "Weight", "Sets × Reps", "Notes"]);

    for workout in workouts {
        table.add_row(vec![
            Cell::new(workout.date.format("%Y-%m-%d")),
            Cell::new(&workout.exercise),
            Cell::new(format_weight(workout.weight)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{} × {}", workout.sets, workout.reps))
                .set_alignment(CellAlignment::Right),
            Cell::new(workout.notes.as_deref().unwrap_or("")),
        ]);
    }
    table
}

fn progress_table(weeks: &[WeeklyProgress]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Week", "Workouts", "Max weight", "Volume"]);

    for week in weeks {
        table.add_row(vec![
            Cell::new(&week.week),
            Cell::new(week.workout_count).set_alignment(CellAlignment::Right),
            Cell::new(format_weight(week.max_weight)).set_alignment(CellAlignment::Right),
            Cell::new(format_weight(week.total_volume)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}
