// ABOUTME: Bounded mutation history recording before-images of every touched date
// ABOUTME: Supports undo by restoring the snapshots of the newest record
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, NaiveDate, Utc};
use pierre_core::constants::schedule::MUTATION_HISTORY_LIMIT;
use pierre_core::models::Workout;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Date-keyed schedule as persisted
pub type ScheduleMap = BTreeMap<NaiveDate, Workout>;

/// Kind of schedule mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationKind {
    /// Upsert of a whole workout
    Save,
    /// Removal of a date's workout
    Delete,
    /// Move or swap between two dates
    Move,
    /// In-place exercise substitution
    Replace,
    /// Exercise appended to a workout
    AddExercise,
    /// Exercise removed from a workout
    RemoveExercise,
    /// Workout marked completed
    Complete,
}

impl MutationKind {
    /// Convert to string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Save => "save",
            Self::Delete => "delete",
            Self::Move => "move",
            Self::Replace => "replace",
            Self::AddExercise => "add_exercise",
            Self::RemoveExercise => "remove_exercise",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of one date before a mutation touched it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateSnapshot {
    /// Touched date
    pub date: NaiveDate,
    /// Workout on that date beforehand; `None` means it was a rest day
    pub before: Option<Workout>,
}

/// Append-only log entry with enough payload to reverse the change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationRecord {
    /// Unique identifier
    pub id: String,
    /// Mutation kind
    pub kind: MutationKind,
    /// When the mutation was committed
    pub timestamp: DateTime<Utc>,
    /// Human readable summary
    pub summary: String,
    /// Before-images of every touched date
    pub snapshots: Vec<DateSnapshot>,
}

impl MutationRecord {
    /// Record a mutation of `dates`, capturing their current state from `schedule`
    #[must_use]
    pub fn capture(
        kind: MutationKind,
        summary: impl Into<String>,
        schedule: &ScheduleMap,
        dates: &[NaiveDate],
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            timestamp: Utc::now(),
            summary: summary.into(),
            snapshots: dates
                .iter()
                .map(|date| DateSnapshot {
                    date: *date,
                    before: schedule.get(date).cloned(),
                })
                .collect(),
        }
    }

    /// Dates this mutation touched
    #[must_use]
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.snapshots.iter().map(|s| s.date).collect()
    }

    /// Restore every snapshot into `schedule`
    pub fn restore_into(&self, schedule: &mut ScheduleMap) {
        for snapshot in &self.snapshots {
            match &snapshot.before {
                Some(workout) => {
                    schedule.insert(snapshot.date, workout.clone());
                }
                None => {
                    schedule.remove(&snapshot.date);
                }
            }
        }
    }
}

/// Append `record`, evicting the oldest entries beyond the history limit
pub fn push_bounded(history: &mut Vec<MutationRecord>, record: MutationRecord) {
    history.push(record);
    if history.len() > MUTATION_HISTORY_LIMIT {
        let excess = history.len() - MUTATION_HISTORY_LIMIT;
        history.drain(..excess);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pierre_core::models::WorkoutType;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    #[test]
    fn test_history_is_bounded() {
        let schedule = ScheduleMap::new();
        let mut history = Vec::new();
        for i in 0..(MUTATION_HISTORY_LIMIT + 5) {
            push_bounded(
                &mut history,
                MutationRecord::capture(MutationKind::Save, format!("save {i}"), &schedule, &[]),
            );
        }
        assert_eq!(history.len(), MUTATION_HISTORY_LIMIT);
        assert_eq!(history[0].summary, "save 5");
    }

    #[test]
    fn test_restore_reinstates_and_removes() {
        let mut schedule = ScheduleMap::new();
        let original = Workout::new("Leg Day", date(5), WorkoutType::Strength);
        schedule.insert(date(5), original.clone());

        let record =
            MutationRecord::capture(MutationKind::Move, "move", &schedule, &[date(5), date(6)]);

        schedule.remove(&date(5));
        schedule.insert(date(6), original.clone());

        record.restore_into(&mut schedule);
        assert_eq!(schedule.get(&date(5)), Some(&original));
        assert!(!schedule.contains_key(&date(6)));
    }
}
