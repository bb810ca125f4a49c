// ABOUTME: Fixed day-of-week table used to bootstrap a new user's schedule
// ABOUTME: Seeds four weeks from the Monday of the current week, leaving Sundays as rest days
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{Datelike, Days, NaiveDate, NaiveTime, Weekday};
use pierre_core::constants::schedule::DEFAULT_SCHEDULE_WEEKS;
use pierre_core::models::{DifficultyLevel, Exercise, Workout, WorkoutOrigin, WorkoutType};
use pierre_intelligence::catalog::default_exercise_library;

use super::history::ScheduleMap;

struct DayPlan {
    weekday: Weekday,
    title: &'static str,
    description: &'static str,
    workout_type: WorkoutType,
    difficulty: DifficultyLevel,
    hour: u32,
    exercise_ids: &'static [&'static str],
}

const WEEKLY_PLAN: &[DayPlan] = &[
    DayPlan {
        weekday: Weekday::Mon,
        title: "Upper Body Strength",
        description: "Push and pull work for chest, back, shoulders and arms",
        workout_type: WorkoutType::Strength,
        difficulty: DifficultyLevel::Intermediate,
        hour: 7,
        exercise_ids: &[
            "arm-circles",
            "push-up",
            "dumbbell-row",
            "dumbbell-shoulder-press",
            "dumbbell-bicep-curl",
            "bench-tricep-dip",
            "doorway-chest-stretch",
        ],
    },
    DayPlan {
        weekday: Weekday::Tue,
        title: "HIIT Cardio",
        description: "Short intervals to build conditioning",
        workout_type: WorkoutType::Hiit,
        difficulty: DifficultyLevel::Intermediate,
        hour: 7,
        exercise_ids: &[
            "jumping-jacks",
            "burpee",
            "mountain-climbers",
            "jump-squat",
            "high-knees",
        ],
    },
    DayPlan {
        weekday: Weekday::Wed,
        title: "Leg Day",
        description: "Lower body strength for legs and glutes",
        workout_type: WorkoutType::Strength,
        difficulty: DifficultyLevel::Intermediate,
        hour: 7,
        exercise_ids: &[
            "leg-swings",
            "goblet-squat",
            "walking-lunge",
            "glute-bridge",
            "bodyweight-squat",
            "hamstring-stretch",
        ],
    },
    DayPlan {
        weekday: Weekday::Thu,
        title: "Yoga & Mobility",
        description: "Gentle flow to restore range of motion",
        workout_type: WorkoutType::Yoga,
        difficulty: DifficultyLevel::Beginner,
        hour: 18,
        exercise_ids: &[
            "cat-cow",
            "downward-dog",
            "worlds-greatest-stretch",
            "pigeon-pose",
            "childs-pose",
        ],
    },
    DayPlan {
        weekday: Weekday::Fri,
        title: "Full Body Strength",
        description: "Compound lifts across the whole body",
        workout_type: WorkoutType::Strength,
        difficulty: DifficultyLevel::Intermediate,
        hour: 7,
        exercise_ids: &[
            "hip-circles",
            "goblet-squat",
            "push-up",
            "dumbbell-row",
            "kettlebell-swing",
            "plank",
        ],
    },
    DayPlan {
        weekday: Weekday::Sat,
        title: "Active Recovery",
        description: "Light movement and stretching",
        workout_type: WorkoutType::Flexibility,
        difficulty: DifficultyLevel::Beginner,
        hour: 9,
        exercise_ids: &["hip-circles", "leg-swings", "hamstring-stretch", "childs-pose"],
    },
];

/// Monday of the week containing `date`
#[must_use]
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

fn build_day(plan: &DayPlan, date: NaiveDate, library: &[Exercise]) -> Workout {
    let exercises = plan
        .exercise_ids
        .iter()
        .filter_map(|id| library.iter().find(|e| e.id == *id).cloned())
        .collect();

    let mut workout = Workout::new(plan.title, date, plan.workout_type)
        .with_description(plan.description)
        .with_difficulty(plan.difficulty)
        .with_origin(WorkoutOrigin::System)
        .with_exercises(exercises);
    if let Some(time) = NaiveTime::from_hms_opt(plan.hour, 0, 0) {
        workout = workout.with_time(time);
    }
    workout
}

/// Build the default schedule for the weeks starting on the Monday of `today`'s week
#[must_use]
pub fn default_schedule(today: NaiveDate) -> ScheduleMap {
    let library = default_exercise_library();
    let start = week_start(today);
    let days = u64::from(DEFAULT_SCHEDULE_WEEKS) * 7;

    (0..days)
        .filter_map(|offset| start.checked_add_days(Days::new(offset)))
        .filter_map(|date| {
            WEEKLY_PLAN
                .iter()
                .find(|plan| plan.weekday == date.weekday())
                .map(|plan| (date, build_day(plan, date, &library)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_start_is_monday() {
        // 2025-03-06 is a Thursday
        let thursday = NaiveDate::from_ymd_opt(2025, 3, 6).unwrap();
        assert_eq!(week_start(thursday), NaiveDate::from_ymd_opt(2025, 3, 3).unwrap());
        let monday = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        assert_eq!(week_start(monday), monday);
    }

    #[test]
    fn test_default_schedule_skips_sundays() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 6).unwrap();
        let schedule = default_schedule(today);

        assert_eq!(schedule.len(), 24);
        assert!(schedule.keys().all(|d| d.weekday() != Weekday::Sun));
        assert!(schedule.values().all(|w| !w.exercises.is_empty()));

        let wednesday = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        assert_eq!(schedule[&wednesday].title, "Leg Day");
    }
}
