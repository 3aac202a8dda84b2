//! Workout log statistics
//!
//! A workout log is a directory of JSON files, one workout per file. Streaks
//! are computed through the activity aggregator so that workout streaks and
//! activity streaks follow the same rules.

use crate::aggregator::compute_streaks;
use crate::error::{Error, Result};
use crate::ActivityRecord;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutEntry {
    pub date: NaiveDate,
    pub exercise: String,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub sets: u32,
    #[serde(default)]
    pub reps: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl WorkoutEntry {
    pub fn volume(&self) -> f64 {
        self.weight * f64::from(self.reps) * f64::from(self.sets)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutStats {
    pub total_workouts: usize,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub favorite_exercise: Option<String>,
    pub max_weight: f64,
    pub strength_gain: Option<StrengthGain>,
}

/// Weight change from the earliest logged workout to the most recent one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrengthGain {
    pub first_weight: f64,
    pub latest_weight: f64,
    pub gain: f64,
    /// `None` when the first weight is zero
    pub gain_percent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyProgress {
    /// ISO week, e.g. `2024-W03`
    pub week: String,
    pub max_weight: f64,
    pub total_volume: f64,
    pub workout_count: usize,
}

/// Load every `*.json` workout under `dir`, most recent first.
///
/// Files that cannot be read or parsed are skipped with a warning.
pub fn load_workouts(dir: &Path) -> Result<Vec<WorkoutEntry>> {
    if !dir.is_dir() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("workout directory not found: {}", dir.display()),
        )));
    }

    let mut workouts = Vec::new();
    for entry in WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
    {
        let path = entry.path();
        let parsed = std::fs::read(path)
            .map_err(Error::from)
            .and_then(|bytes| serde_json::from_slice::<WorkoutEntry>(&bytes).map_err(Error::from));
        match parsed {
            Ok(workout) => workouts.push(workout),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping workout file"),
        }
    }

    sort_most_recent_first(&mut workouts);
    tracing::debug!(workouts = workouts.len(), dir = %dir.display(), "loaded workouts");
    Ok(workouts)
}

/// One activity record per workout; same-day workouts merge in the aggregator.
pub fn workout_records(workouts: &[WorkoutEntry]) -> Vec<ActivityRecord> {
    workouts
        .iter()
        .map(|w| ActivityRecord::new(w.date, 1))
        .collect()
}

pub fn workout_stats(workouts: &[WorkoutEntry], today: NaiveDate) -> WorkoutStats {
    let streaks = compute_streaks(&workout_records(workouts), today);
    let max_weight = workouts.iter().map(|w| w.weight).fold(0.0, f64::max);

    WorkoutStats {
        total_workouts: workouts.len(),
        current_streak: streaks.current_streak,
        longest_streak: streaks.longest_streak,
        favorite_exercise: favorite_exercise(workouts),
        max_weight,
        strength_gain: strength_gain(workouts),
    }
}

pub fn strength_gain(workouts: &[WorkoutEntry]) -> Option<StrengthGain> {
    let by_date = |a: &&WorkoutEntry, b: &&WorkoutEntry| {
        a.date.cmp(&b.date).then_with(|| a.exercise.cmp(&b.exercise))
    };
    let first = workouts.iter().min_by(by_date)?;
    let latest = workouts.iter().max_by(by_date)?;

    let gain = latest.weight - first.weight;
    let gain_percent = (first.weight != 0.0).then(|| gain / first.weight * 100.0);

    Some(StrengthGain {
        first_weight: first.weight,
        latest_weight: latest.weight,
        gain,
        gain_percent,
    })
}

/// Workouts logged on `date`, ordered by exercise.
pub fn workouts_for_date(workouts: &[WorkoutEntry], date: NaiveDate) -> Vec<WorkoutEntry> {
    let mut found: Vec<WorkoutEntry> = workouts
        .iter()
        .filter(|w| w.date == date)
        .cloned()
        .collect();
    sort_most_recent_first(&mut found);
    found
}

/// Most frequent exercise. Ties go to the alphabetically first name.
pub fn favorite_exercise(workouts: &[WorkoutEntry]) -> Option<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for workout in workouts {
        *counts.entry(workout.exercise.as_str()).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(name, _)| name.to_string())
}

pub fn recent_workouts(workouts: &[WorkoutEntry], n: usize) -> Vec<WorkoutEntry> {
    let mut sorted = workouts.to_vec();
    sort_most_recent_first(&mut sorted);
    sorted.truncate(n);
    sorted
}

/// Per ISO week totals, oldest week first.
pub fn weekly_progress(workouts: &[WorkoutEntry]) -> Vec<WeeklyProgress> {
    let mut weeks: BTreeMap<(i32, u32), WeekAccumulator> = BTreeMap::new();
    for workout in workouts {
        let iso = workout.date.iso_week();
        weeks
            .entry((iso.year(), iso.week()))
            .or_default()
            .add(workout);
    }

    weeks
        .into_iter()
        .map(|((year, week), acc)| WeeklyProgress {
            week: format!("{}-W{:02}", year, week),
            max_weight: acc.max_weight,
            total_volume: acc.total_volume,
            workout_count: acc.count,
        })
        .collect()
}

// =============================================================================
// Internal helpers
// =============================================================================

#[derive(Default)]
struct WeekAccumulator {
    max_weight: f64,
    total_volume: f64,
    count: usize,
}

impl WeekAccumulator {
    fn add(&mut self, workout: &WorkoutEntry) {
        self.max_weight = self.max_weight.max(workout.weight);
        self.total_volume += workout.volume();
        self.count += 1;
    }
}

fn sort_most_recent_first(workouts: &mut [WorkoutEntry]) {
    workouts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.exercise.cmp(&b.exercise)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn workout(d: &str, exercise: &str, weight: f64, sets: u32, reps: u32) -> WorkoutEntry {
        WorkoutEntry {
            date: date(d),
            exercise: exercise.to_string(),
            weight,
            sets,
            reps,
            notes: None,
            photo_url: None,
        }
    }

    #[test]
    fn test_workout_stats() {
        let workouts = vec![
            workout("2024-01-01", "Deadlift", 80.0, 3, 8),
            workout("2024-01-02", "Squat", 60.0, 3, 5),
            workout("2024-01-03", "Deadlift", 90.0, 3, 6),
            workout("2024-01-05", "Deadlift", 95.0, 3, 6),
        ];
        let stats = workout_stats(&workouts, date("2024-01-05"));

        assert_eq!(stats.total_workouts, 4);
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.longest_streak, 3);
        assert_eq!(stats.favorite_exercise.as_deref(), Some("Deadlift"));
        assert_eq!(stats.max_weight, 95.0);

        let gain = stats.strength_gain.unwrap();
        assert_eq!(gain.first_weight, 80.0);
        assert_eq!(gain.latest_weight, 95.0);
        assert_eq!(gain.gain, 15.0);
        assert_eq!(gain.gain_percent, Some(18.75));
    }

    #[test]
    fn test_workout_stats_empty() {
        let stats = workout_stats(&[], date("2024-01-05"));
        assert_eq!(stats.total_workouts, 0);
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.favorite_exercise, None);
        assert_eq!(stats.max_weight, 0.0);
        assert_eq!(stats.strength_gain, None);
    }

    #[test]
    fn test_strength_gain_unsorted_input() {
        let workouts = vec![
            workout("2024-02-01", "Deadlift", 100.0, 3, 5),
            workout("2024-01-01", "Deadlift", 120.0, 3, 5),
            workout("2024-01-15", "Deadlift", 140.0, 3, 5),
        ];
        let gain = strength_gain(&workouts).unwrap();
        assert_eq!(gain.first_weight, 120.0);
        assert_eq!(gain.latest_weight, 100.0);
        assert_eq!(gain.gain, -20.0);
    }

    #[test]
    fn test_strength_gain_zero_first_weight() {
        let workouts = vec![
            workout("2024-01-01", "Pushup", 0.0, 3, 20),
            workout("2024-01-08", "Pushup", 10.0, 3, 12),
        ];
        let gain = strength_gain(&workouts).unwrap();
        assert_eq!(gain.gain, 10.0);
        assert_eq!(gain.gain_percent, None);
    }

    #[test]
    fn test_workouts_for_date() {
        let workouts = vec![
            workout("2024-01-02", "Squat", 60.0, 3, 5),
            workout("2024-01-01", "Bench", 50.0, 3, 8),
            workout("2024-01-02", "Row", 40.0, 3, 10),
        ];
        let found = workouts_for_date(&workouts, date("2024-01-02"));
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].exercise, "Row");
        assert_eq!(found[1].exercise, "Squat");

        assert!(workouts_for_date(&workouts, date("2024-01-03")).is_empty());
        assert!(workouts_for_date(&[], date("2024-01-02")).is_empty());
    }

    #[test]
    fn test_same_day_workouts_count_once_for_streaks() {
        let workouts = vec![
            workout("2024-01-04", "Bench", 50.0, 3, 8),
            workout("2024-01-05", "Squat", 60.0, 3, 5),
            workout("2024-01-05", "Row", 40.0, 3, 10),
        ];
        let stats = workout_stats(&workouts, date("2024-01-05"));
        assert_eq!(stats.current_streak, 2);
        assert_eq!(stats.longest_streak, 2);
    }

    #[test]
    fn test_favorite_exercise_tie_breaks_alphabetically() {
        let workouts = vec![
            workout("2024-01-01", "Squat", 0.0, 0, 0),
            workout("2024-01-02", "Bench", 0.0, 0, 0),
        ];
        assert_eq!(favorite_exercise(&workouts).as_deref(), Some("Bench"));
    }

    #[test]
    fn test_recent_workouts() {
        let workouts = vec![
            workout("2024-01-01", "A", 0.0, 0, 0),
            workout("2024-01-09", "B", 0.0, 0, 0),
            workout("2024-01-05", "C", 0.0, 0, 0),
        ];
        let recent = recent_workouts(&workouts, 2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].exercise, "B");
        assert_eq!(recent[1].exercise, "C");
    }

    #[test]
    fn test_weekly_progress() {
        let workouts = vec![
            workout("2024-01-01", "Deadlift", 80.0, 3, 8), // 2024-W01
            workout("2024-01-03", "Deadlift", 85.0, 3, 8), // 2024-W01
            workout("2024-01-08", "Deadlift", 90.0, 3, 6), // 2024-W02
        ];
        let progress = weekly_progress(&workouts);

        assert_eq!(progress.len(), 2);
        assert_eq!(progress[0].week, "2024-W01");
        assert_eq!(progress[0].max_weight, 85.0);
        assert_eq!(progress[0].total_volume, 80.0 * 24.0 + 85.0 * 24.0);
        assert_eq!(progress[0].workout_count, 2);
        assert_eq!(progress[1].week, "2024-W02");
        assert_eq!(progress[1].workout_count, 1);
    }

    #[test]
    fn test_weekly_progress_iso_year_boundary() {
        // 2024-12-30 belongs to ISO week 1 of 2025
        let progress = weekly_progress(&[workout("2024-12-30", "Squat", 100.0, 1, 1)]);
        assert_eq!(progress[0].week, "2025-W01");
    }

    #[test]
    fn test_load_workouts() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("workouts");
        fs::create_dir_all(&nested).unwrap();

        fs::write(
            nested.join("2024-01-01.json"),
            r#"{"date": "2024-01-01", "exercise": "Deadlift", "weight": 80, "sets": 3, "reps": 8}"#,
        )
        .unwrap();
        fs::write(
            nested.join("2024-01-03.json"),
            r#"{"date": "2024-01-03", "exercise": "Squat", "weight": 70.5, "sets": 5, "reps": 5,
                "notes": "felt strong", "photoUrl": "https://example.com/squat.jpg"}"#,
        )
        .unwrap();
        fs::write(nested.join("broken.json"), "{ not json").unwrap();
        fs::write(nested.join("README.md"), "# workouts").unwrap();

        let workouts = load_workouts(tmp.path()).unwrap();
        assert_eq!(workouts.len(), 2);
        assert_eq!(workouts[0].exercise, "Squat");
        assert_eq!(workouts[0].notes.as_deref(), Some("felt strong"));
        assert_eq!(workouts[0].photo_url.as_deref(), Some("https://example.com/squat.jpg"));
        assert_eq!(workouts[1].weight, 80.0);
    }

    #[test]
    fn test_load_workouts_missing_dir() {
        let tmp = TempDir::new().unwrap();
        let err = load_workouts(&tmp.path().join("nope")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
