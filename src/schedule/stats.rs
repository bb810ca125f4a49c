// ABOUTME: Aggregate statistics over a range of scheduled workouts
// ABOUTME: Totals, completion rate, per-type counts and weekly average
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use pierre_core::models::{Workout, WorkoutType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary of the workouts in a date range
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutStats {
    /// Workouts in range
    pub total_workouts: usize,
    /// Completed workouts in range
    pub completed_workouts: usize,
    /// Sum of calorie estimates
    pub total_calories: u64,
    /// Sum of durations in minutes
    pub total_duration: u64,
    /// Mean duration in minutes
    pub average_duration: f64,
    /// Completed share as a percentage
    pub completion_rate_percent: f64,
    /// Workout count per type
    pub counts_by_type: BTreeMap<WorkoutType, usize>,
    /// Workouts per week spanned by the range
    pub weekly_average: f64,
}

impl WorkoutStats {
    /// Compute statistics for `workouts`, which must already be filtered to
    /// the range `start..=end`
    ///
    /// Open bounds default to the earliest and latest workout dates.
    #[must_use]
    pub fn compute(workouts: &[Workout], start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        if workouts.is_empty() {
            return Self::default();
        }

        let total = workouts.len();
        let completed = workouts.iter().filter(|w| w.completed).count();
        let total_calories: u64 = workouts.iter().map(|w| u64::from(w.calories)).sum();
        let total_duration: u64 = workouts.iter().map(|w| u64::from(w.duration_minutes)).sum();

        let mut counts_by_type = BTreeMap::new();
        for workout in workouts {
            *counts_by_type.entry(workout.workout_type).or_insert(0) += 1;
        }

        let first = start.or_else(|| workouts.iter().map(|w| w.date).min());
        let last = end.or_else(|| workouts.iter().map(|w| w.date).max());
        let days = match (first, last) {
            (Some(first), Some(last)) if last >= first => (last - first).num_days() + 1,
            _ => 1,
        };
        let weeks = ((days as f64) / 7.0).ceil().max(1.0);

        Self {
            total_workouts: total,
            completed_workouts: completed,
            total_calories,
            total_duration,
            average_duration: total_duration as f64 / total as f64,
            completion_rate_percent: completed as f64 / total as f64 * 100.0,
            counts_by_type,
            weekly_average: total as f64 / weeks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workout(day: u32, workout_type: WorkoutType, completed: bool) -> Workout {
        let date = NaiveDate::from_ymd_opt(2025, 3, day).unwrap();
        let mut workout = Workout::new("Session", date, workout_type);
        workout.duration_minutes = 30;
        workout.calories = 200;
        workout.completed = completed;
        workout
    }

    #[test]
    fn test_empty_range_is_zeroed() {
        let stats = WorkoutStats::compute(&[], None, None);
        assert_eq!(stats, WorkoutStats::default());
    }

    #[test]
    fn test_totals_and_rates() {
        let workouts = vec![
            workout(3, WorkoutType::Strength, true),
            workout(4, WorkoutType::Hiit, false),
            workout(5, WorkoutType::Strength, true),
            workout(6, WorkoutType::Yoga, false),
        ];
        let start = NaiveDate::from_ymd_opt(2025, 3, 3);
        let end = NaiveDate::from_ymd_opt(2025, 3, 16);
        let stats = WorkoutStats::compute(&workouts, start, end);

        assert_eq!(stats.total_workouts, 4);
        assert_eq!(stats.completed_workouts, 2);
        assert_eq!(stats.total_calories, 800);
        assert_eq!(stats.total_duration, 120);
        assert!((stats.average_duration - 30.0).abs() < f64::EPSILON);
        assert!((stats.completion_rate_percent - 50.0).abs() < f64::EPSILON);
        assert_eq!(stats.counts_by_type[&WorkoutType::Strength], 2);
        // 14 days span two weeks
        assert!((stats.weekly_average - 2.0).abs() < f64::EPSILON);
    }
}
