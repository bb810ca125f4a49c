// ABOUTME: Core data models for the Pierre workout planner
// ABOUTME: Re-exports Exercise, Workout and their supporting enumerations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `Exercise`: a catalog definition, or a per-workout copy adjusted for level
//! - `Workout`: one calendar day's session, keyed by date
//!
//! All models serialize with serde; dates are `YYYY-MM-DD` strings.

mod exercise;
mod workout;

pub use exercise::{
    DifficultyLevel, Equipment, Exercise, ExerciseCategory, ExerciseTag, MuscleGroup, RepScheme,
};
pub use workout::{Workout, WorkoutOrigin, WorkoutType};
