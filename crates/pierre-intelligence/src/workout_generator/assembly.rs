// ABOUTME: Section assembly for generated workouts from a retrieved exercise pool
// ABOUTME: Picks warm-up, main and cool-down exercises and adjusts them for experience level
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_core::constants::generation::{
    ADVANCED_HIIT_REST_CAP_SECONDS, ADVANCED_MAX_SETS, ADVANCED_REST_CAP_SECONDS,
    BEGINNER_REP_WIDENING, BEGINNER_REST_SECONDS, COMPOUND_SHARE,
    COOLDOWN_SECOND_EXERCISE_MINUTES, LOW_INTENSITY_CALORIE_RATE, MAX_MAIN_EXERCISES,
    MINUTES_PER_MAIN_EXERCISE, MIN_MAIN_EXERCISES, STRENGTH_REST_FLOOR_SECONDS,
    WARMUP_THIRD_EXERCISE_MINUTES,
};
use pierre_core::models::{DifficultyLevel, Exercise, ExerciseCategory, ExerciseTag, WorkoutType};
use std::collections::HashSet;

/// Exercises already placed in the workout, by id
pub(super) type Placed = HashSet<String>;

/// True for exercises suitable for warm-up or cool-down work
#[must_use]
pub fn is_low_intensity(exercise: &Exercise) -> bool {
    exercise.calories_per_minute < LOW_INTENSITY_CALORIE_RATE
        || exercise.has_tag(ExerciseTag::Mobility)
        || exercise.has_tag(ExerciseTag::Stretch)
        || exercise.category == ExerciseCategory::Flexibility
}

/// Number of warm-up exercises for a section budget
#[must_use]
pub const fn warm_up_count(minutes: u32) -> usize {
    if minutes >= WARMUP_THIRD_EXERCISE_MINUTES {
        3
    } else {
        2
    }
}

/// Number of cool-down exercises for a section budget
#[must_use]
pub const fn cool_down_count(minutes: u32) -> usize {
    if minutes >= COOLDOWN_SECOND_EXERCISE_MINUTES {
        2
    } else {
        1
    }
}

/// Number of working exercises for the main and accessory budget
#[must_use]
pub fn main_exercise_count(minutes: u32) -> usize {
    ((minutes / MINUTES_PER_MAIN_EXERCISE) as usize).clamp(MIN_MAIN_EXERCISES, MAX_MAIN_EXERCISES)
}

/// Take up to `count` exercises from `candidates`, skipping placed ids
fn take_unplaced<'a>(
    candidates: impl IntoIterator<Item = &'a Exercise>,
    count: usize,
    placed: &mut Placed,
    into: &mut Vec<Exercise>,
) {
    for exercise in candidates {
        if into.len() >= count {
            break;
        }
        if placed.insert(exercise.id.clone()) {
            into.push(exercise.clone());
        }
    }
}

/// Pick low-intensity exercises, preferring those carrying `preferred_tag`
///
/// `primary` is searched before `fallback`; both keep their order.
pub(super) fn pick_low_intensity(
    primary: &[Exercise],
    fallback: &[Exercise],
    preferred_tag: ExerciseTag,
    count: usize,
    placed: &mut Placed,
) -> Vec<Exercise> {
    let mut picked = Vec::with_capacity(count);
    for pool in [primary, fallback] {
        let low: Vec<&Exercise> = pool.iter().filter(|e| is_low_intensity(e)).collect();
        take_unplaced(
            low.iter().copied().filter(|e| e.has_tag(preferred_tag)),
            count,
            placed,
            &mut picked,
        );
        take_unplaced(low.iter().copied(), count, placed, &mut picked);
    }
    picked
}

/// Pick working exercises aiming at a 60/40 compound/isolation split
///
/// Any remaining pool exercise backfills a short section.
pub(super) fn pick_main(pool: &[Exercise], count: usize, placed: &mut Placed) -> Vec<Exercise> {
    let compound_target = ((count as f64) * COMPOUND_SHARE).round() as usize;
    let mut picked = Vec::with_capacity(count);

    take_unplaced(
        pool.iter().filter(|e| e.has_tag(ExerciseTag::Compound)),
        compound_target,
        placed,
        &mut picked,
    );
    take_unplaced(
        pool.iter().filter(|e| e.has_tag(ExerciseTag::Isolation)),
        count,
        placed,
        &mut picked,
    );
    take_unplaced(pool.iter(), count, placed, &mut picked);
    picked
}

/// Adjust sets, reps and rest of an exercise copy for the athlete's level
pub fn adjust_for_level(exercise: &mut Exercise, level: DifficultyLevel, workout_type: WorkoutType) {
    match level {
        DifficultyLevel::Beginner => {
            exercise.sets = exercise.sets.saturating_sub(1).max(1);
            exercise.reps = exercise.reps.widened(BEGINNER_REP_WIDENING);
            exercise.rest_seconds = BEGINNER_REST_SECONDS;
        }
        DifficultyLevel::Intermediate => {}
        DifficultyLevel::Advanced => {
            exercise.sets = exercise.sets.saturating_add(1).min(ADVANCED_MAX_SETS);
            let cap = if workout_type == WorkoutType::Hiit {
                ADVANCED_HIIT_REST_CAP_SECONDS
            } else {
                ADVANCED_REST_CAP_SECONDS
            };
            exercise.rest_seconds = exercise.rest_seconds.min(cap);
        }
    }

    if workout_type == WorkoutType::Strength {
        exercise.rest_seconds = exercise.rest_seconds.max(STRENGTH_REST_FLOOR_SECONDS);
    }
}
