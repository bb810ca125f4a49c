// ABOUTME: Workout session model keyed by calendar date
// ABOUTME: Holds exercise copies and keeps duration/calorie totals in sync with them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::exercise::{DifficultyLevel, Exercise};
use crate::constants::schedule::{MIN_WORKOUT_CALORIES, MIN_WORKOUT_MINUTES};

/// Type of workout session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    /// Resistance session
    Strength,
    /// Steady-state conditioning
    Cardio,
    /// Stretching and mobility
    Flexibility,
    /// High-intensity intervals
    Hiit,
    /// Yoga flow
    Yoga,
    /// Planned rest or active recovery
    Rest,
}

impl WorkoutType {
    /// Convert to storage string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Cardio => "cardio",
            Self::Flexibility => "flexibility",
            Self::Hiit => "hiit",
            Self::Yoga => "yoga",
            Self::Rest => "rest",
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who created a workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutOrigin {
    /// Default schedule bootstrap
    System,
    /// Direct user edit
    #[default]
    User,
    /// Workout generator via the conversational layer
    Ai,
}

/// One calendar day's planned or completed session
///
/// The calendar `date` is the primary key: a schedule holds at most one
/// workout per date, and an absent date is an implicit rest day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Unique identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Short description
    pub description: String,
    /// Calendar date, serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
    /// Planned time of day
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<NaiveTime>,
    /// Duration in minutes
    pub duration_minutes: u32,
    /// Difficulty
    pub difficulty: DifficultyLevel,
    /// Session type
    pub workout_type: WorkoutType,
    /// Estimated calories
    pub calories: u32,
    /// Completed flag
    pub completed: bool,
    /// Ordered exercise copies
    pub exercises: Vec<Exercise>,
    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Creator
    pub origin: WorkoutOrigin,
    /// Date the workout was scheduled on before it was moved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_date: Option<NaiveDate>,
    /// Last modification timestamp
    pub last_modified: DateTime<Utc>,
}

impl Workout {
    /// Create an empty workout on `date`
    pub fn new(title: impl Into<String>, date: NaiveDate, workout_type: WorkoutType) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: String::new(),
            date,
            scheduled_time: None,
            duration_minutes: MIN_WORKOUT_MINUTES,
            difficulty: DifficultyLevel::default(),
            workout_type,
            calories: MIN_WORKOUT_CALORIES,
            completed: false,
            exercises: Vec::new(),
            notes: None,
            tags: Vec::new(),
            origin: WorkoutOrigin::default(),
            original_date: None,
            last_modified: Utc::now(),
        }
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the planned time of day
    #[must_use]
    pub fn with_time(mut self, time: NaiveTime) -> Self {
        self.scheduled_time = Some(time);
        self
    }

    /// Set the difficulty
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: DifficultyLevel) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Set the origin
    #[must_use]
    pub fn with_origin(mut self, origin: WorkoutOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// Replace the exercise list and recompute totals
    #[must_use]
    pub fn with_exercises(mut self, exercises: Vec<Exercise>) -> Self {
        self.exercises = exercises;
        self.recompute_totals();
        self
    }

    /// Recompute duration and calories from the exercise list
    ///
    /// Duration is the sum of per-exercise minute estimates floored at
    /// [`MIN_WORKOUT_MINUTES`]; calories are floored at [`MIN_WORKOUT_CALORIES`].
    pub fn recompute_totals(&mut self) {
        let minutes: f64 = self.exercises.iter().map(Exercise::estimated_minutes).sum();
        let calories: f64 = self
            .exercises
            .iter()
            .map(Exercise::estimated_calories)
            .sum();

        self.duration_minutes = (minutes.round() as u32).max(MIN_WORKOUT_MINUTES);
        self.calories = (calories.round() as u32).max(MIN_WORKOUT_CALORIES);
    }

    /// Position of the exercise with `exercise_id`
    #[must_use]
    pub fn exercise_position(&self, exercise_id: &str) -> Option<usize> {
        self.exercises.iter().position(|e| e.id == exercise_id)
    }

    /// First exercise whose name contains `fragment` (case-insensitive)
    #[must_use]
    pub fn find_exercise_by_name(&self, fragment: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.name_matches(fragment))
    }

    /// Names of all exercises, in order
    #[must_use]
    pub fn exercise_names(&self) -> Vec<String> {
        self.exercises.iter().map(|e| e.name.clone()).collect()
    }

    /// Stamp the last-modified timestamp
    pub fn touch(&mut self) {
        self.last_modified = Utc::now();
    }

    /// Equality ignoring the last-modified timestamp
    #[must_use]
    pub fn same_content(&self, other: &Self) -> bool {
        let mut other = other.clone();
        other.last_modified = self.last_modified;
        *self == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::exercise::{ExerciseCategory, RepScheme};
    use std::collections::BTreeSet;

    fn exercise(id: &str, category: ExerciseCategory, sets: u32, rate: f64) -> Exercise {
        Exercise {
            id: id.to_owned(),
            name: id.to_owned(),
            muscle_groups: BTreeSet::new(),
            equipment: BTreeSet::new(),
            category,
            difficulty: DifficultyLevel::Beginner,
            tags: BTreeSet::new(),
            sets,
            reps: RepScheme::Range { min: 8, max: 12 },
            rest_seconds: 60,
            weight_guidance: None,
            calories_per_minute: rate,
            contraindications: Vec::new(),
        }
    }

    #[test]
    fn test_totals_use_category_minutes() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        let workout = Workout::new("Mixed", date, WorkoutType::Strength).with_exercises(vec![
            exercise("squat", ExerciseCategory::Strength, 4, 8.0),
            exercise("rower", ExerciseCategory::Cardio, 4, 10.0),
        ]);

        // 4 * 2.0 + 4 * 1.5 = 14 minutes; 8 * 8 + 6 * 10 = 124 calories
        assert_eq!(workout.duration_minutes, 14);
        assert_eq!(workout.calories, 124);
    }

    #[test]
    fn test_totals_are_floored() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        let workout = Workout::new("Tiny", date, WorkoutType::Flexibility)
            .with_exercises(vec![exercise("stretch", ExerciseCategory::Flexibility, 1, 2.0)]);

        assert_eq!(workout.duration_minutes, MIN_WORKOUT_MINUTES);
        assert_eq!(workout.calories, MIN_WORKOUT_CALORIES);
    }
}
