// ABOUTME: Workout intelligence for the Pierre workout planner
// ABOUTME: Exercise catalog abstraction and the template-driven workout generator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Intelligence
//!
//! Read-only exercise catalog and the workout generator built on top of it.
//! Nothing in this crate touches persistence; the schedule store lives in the
//! root crate.

/// Exercise catalog trait, filters and the in-memory catalog
pub mod catalog;

/// Template scoring and workout assembly
pub mod workout_generator;

pub use catalog::{CatalogFilter, ExerciseCatalog, InMemoryCatalog};
pub use workout_generator::{
    EquipmentProfile, GeneratedWorkout, GenerationWarning, WorkoutGenerator, WorkoutRequirement,
};
