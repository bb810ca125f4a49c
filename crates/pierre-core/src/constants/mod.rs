// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for scheduling, generation, storage and conversation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large file.

/// Schedule totals, history and bootstrap constants
pub mod schedule {
    /// Minutes per set for cardio exercises
    pub const CARDIO_MINUTES_PER_SET: f64 = 1.5;
    /// Minutes per set for strength exercises
    pub const STRENGTH_MINUTES_PER_SET: f64 = 2.0;
    /// Minutes per set for flexibility and balance exercises
    pub const OTHER_MINUTES_PER_SET: f64 = 1.0;
    /// Recomputed workout duration never drops below this
    pub const MIN_WORKOUT_MINUTES: u32 = 10;
    /// Recomputed workout calories never drop below this
    pub const MIN_WORKOUT_CALORIES: u32 = 50;
    /// Mutation records kept for undo; oldest are evicted first
    pub const MUTATION_HISTORY_LIMIT: usize = 50;
    /// Weeks populated by the default schedule bootstrap
    pub const DEFAULT_SCHEDULE_WEEKS: u32 = 4;
}

/// Persistent key-value store keys
pub mod storage_keys {
    /// Date-keyed workout map
    pub const WORKOUT_SCHEDULE: &str = "workout_schedule";
    /// Mutation history for undo
    pub const WORKOUT_HISTORY: &str = "workout_history";
}

/// Workout generator tuning
pub mod generation {
    /// Template score awarded when duration is within the close window
    pub const SCORE_DURATION_CLOSE: u32 = 3;
    /// Template score awarded when duration is within the near window
    pub const SCORE_DURATION_NEAR: u32 = 1;
    /// Template score for exact difficulty match
    pub const SCORE_DIFFICULTY_MATCH: u32 = 2;
    /// Template score for focus keyword alignment
    pub const SCORE_FOCUS_MATCH: u32 = 3;
    /// Minimum score to use a library template instead of synthesizing one
    pub const MIN_TEMPLATE_SCORE: u32 = 3;
    /// Close duration window in minutes
    pub const DURATION_CLOSE_MINUTES: u32 = 10;
    /// Near duration window in minutes
    pub const DURATION_NEAR_MINUTES: u32 = 20;

    /// Synthesized warm-up share of total duration
    pub const WARMUP_SHARE: f64 = 0.15;
    /// Synthesized warm-up bounds in minutes
    pub const WARMUP_MIN_MINUTES: u32 = 3;
    /// Synthesized warm-up upper bound in minutes
    pub const WARMUP_MAX_MINUTES: u32 = 8;
    /// Synthesized cool-down share of total duration
    pub const COOLDOWN_SHARE: f64 = 0.10;
    /// Synthesized cool-down lower bound in minutes
    pub const COOLDOWN_MIN_MINUTES: u32 = 2;
    /// Synthesized cool-down upper bound in minutes
    pub const COOLDOWN_MAX_MINUTES: u32 = 5;

    /// Calorie rate below which an exercise counts as low intensity
    pub const LOW_INTENSITY_CALORIE_RATE: f64 = 5.0;
    /// Warm-up minutes at which three warm-up exercises are used instead of two
    pub const WARMUP_THIRD_EXERCISE_MINUTES: u32 = 5;
    /// Cool-down minutes at which two cool-down exercises are used instead of one
    pub const COOLDOWN_SECOND_EXERCISE_MINUTES: u32 = 4;

    /// Minutes of workout per main exercise
    pub const MINUTES_PER_MAIN_EXERCISE: u32 = 4;
    /// Fewest main exercises
    pub const MIN_MAIN_EXERCISES: usize = 3;
    /// Most main exercises
    pub const MAX_MAIN_EXERCISES: usize = 8;
    /// Target share of compound movements in the main section
    pub const COMPOUND_SHARE: f64 = 0.6;

    /// Beginner rest between sets in seconds
    pub const BEGINNER_REST_SECONDS: u32 = 90;
    /// Extra reps added to the top of a beginner rep range
    pub const BEGINNER_REP_WIDENING: u32 = 3;
    /// Advanced rest cap for HIIT templates in seconds
    pub const ADVANCED_HIIT_REST_CAP_SECONDS: u32 = 45;
    /// Advanced rest cap for other templates in seconds
    pub const ADVANCED_REST_CAP_SECONDS: u32 = 75;
    /// Set cap for advanced athletes
    pub const ADVANCED_MAX_SETS: u32 = 6;
    /// Rest floor for strength templates in seconds
    pub const STRENGTH_REST_FLOOR_SECONDS: u32 = 60;
}

/// Conversational layer constants
pub mod conversation {
    /// Confidence for workout queries
    pub const CONFIDENCE_WORKOUT_QUERY: f64 = 0.9;
    /// Confidence for rest-day requests
    pub const CONFIDENCE_REST_DAY: f64 = 0.85;
    /// Confidence for exercise substitutions
    pub const CONFIDENCE_SUBSTITUTION: f64 = 0.8;
    /// Confidence for workout creation
    pub const CONFIDENCE_CREATION: f64 = 0.75;
    /// Confidence for schedule moves
    pub const CONFIDENCE_MOVE: f64 = 0.8;

    /// Default confirmation ttl in seconds
    pub const DEFAULT_CONFIRMATION_TTL_SECS: u64 = 300;
    /// Default pending proposals kept per session
    pub const DEFAULT_MAX_PENDING_PROPOSALS: usize = 5;
    /// Default number of substitution alternatives offered
    pub const DEFAULT_SUBSTITUTION_ALTERNATIVES: usize = 3;
    /// Default generated workout length in minutes
    pub const DEFAULT_WORKOUT_MINUTES: u32 = 30;
}

/// Service identity used in structured logs
pub mod service_names {
    /// Planner service name
    pub const PIERRE_WORKOUT_PLANNER: &str = "pierre-workout-planner";
}
