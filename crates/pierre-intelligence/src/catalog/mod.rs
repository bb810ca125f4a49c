// ABOUTME: Read-only exercise catalog abstraction consumed by the workout generator
// ABOUTME: Defines the ExerciseCatalog trait, search filters, and an in-memory implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Exercise Catalog
//!
//! The catalog is a read-only pool of exercise definitions populated outside
//! the planner. Generation and substitution only ever query it; results are
//! cloned so callers can adjust sets and reps without touching the catalog.

/// Built-in exercise library used to seed the in-memory catalog
mod library;

pub use library::default_exercise_library;

use async_trait::async_trait;
use pierre_core::errors::AppResult;
use pierre_core::models::{DifficultyLevel, Equipment, Exercise, ExerciseCategory, MuscleGroup};
use std::collections::BTreeSet;

/// Filter options for catalog searches
///
/// Empty or `None` fields do not restrict the search.
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    /// Exercise must work at least one of these groups
    pub muscle_groups: BTreeSet<MuscleGroup>,
    /// Exercise equipment must be a subset of this set
    pub equipment: Option<BTreeSet<Equipment>>,
    /// Exercise category must equal this
    pub category: Option<ExerciseCategory>,
    /// Exercise difficulty must be at or below this level
    pub difficulty: Option<DifficultyLevel>,
    /// Exercise must not list any of these terms as a contraindication
    pub exclude_injury: Vec<String>,
}

impl CatalogFilter {
    /// Check whether `exercise` passes every configured constraint
    #[must_use]
    pub fn matches(&self, exercise: &Exercise) -> bool {
        if !self.muscle_groups.is_empty() && !exercise.targets_any(&self.muscle_groups) {
            return false;
        }
        if let Some(allowed) = &self.equipment {
            if !exercise.equipment.is_subset(allowed) {
                return false;
            }
        }
        if let Some(category) = self.category {
            if exercise.category != category {
                return false;
            }
        }
        if let Some(level) = self.difficulty {
            if exercise.difficulty > level {
                return false;
            }
        }
        !self
            .exclude_injury
            .iter()
            .map(|injury| normalize_term(injury))
            .filter(|injury| !injury.is_empty())
            .any(|injury| {
                exercise.contraindications.iter().any(|c| {
                    let c = normalize_term(c);
                    c.contains(&injury) || injury.contains(&c)
                })
            })
    }
}

/// Lowercase and collapse separators so "Lower Back" matches "lower_back"
fn normalize_term(term: &str) -> String {
    term.trim()
        .to_lowercase()
        .replace(['_', '-'], " ")
}

/// Read-only exercise catalog
#[async_trait]
pub trait ExerciseCatalog: Send + Sync {
    /// Search exercises by name fragment and filters
    ///
    /// An empty `text` matches every name. Results keep catalog order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing catalog cannot be read
    async fn search(&self, text: &str, filter: &CatalogFilter) -> AppResult<Vec<Exercise>>;

    /// Look up a single exercise
    ///
    /// # Errors
    ///
    /// Returns an error if the backing catalog cannot be read
    async fn get_by_id(&self, id: &str) -> AppResult<Option<Exercise>>;
}

/// Catalog held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    exercises: Vec<Exercise>,
}

impl InMemoryCatalog {
    /// Create a catalog from an explicit exercise list
    #[must_use]
    pub const fn new(exercises: Vec<Exercise>) -> Self {
        Self { exercises }
    }

    /// Create a catalog seeded with the built-in exercise library
    #[must_use]
    pub fn with_default_library() -> Self {
        Self::new(default_exercise_library())
    }

    /// Number of exercises in the catalog
    #[must_use]
    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    /// True when the catalog holds no exercises
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }
}

#[async_trait]
impl ExerciseCatalog for InMemoryCatalog {
    async fn search(&self, text: &str, filter: &CatalogFilter) -> AppResult<Vec<Exercise>> {
        let text = text.trim();
        Ok(self
            .exercises
            .iter()
            .filter(|e| text.is_empty() || e.name_matches(text))
            .filter(|e| filter.matches(e))
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: &str) -> AppResult<Option<Exercise>> {
        Ok(self.exercises.iter().find(|e| e.id == id).cloned())
    }
}
