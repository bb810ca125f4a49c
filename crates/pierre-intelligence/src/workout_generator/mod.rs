// ABOUTME: Workout generator assembling concrete workouts from templates and the exercise catalog
// ABOUTME: Resolves equipment, retrieves the exercise pool, and reports underfilled sections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Workout Generator
//!
//! Generation runs in a fixed order:
//!
//! 1. Score the template library against the requirement, or synthesize a
//!    template when nothing scores at least 3
//! 2. Resolve the equipment profile to an allowed equipment set
//! 3. Retrieve the exercise pool from the catalog
//! 4. Assemble warm-up, main and cool-down sections
//! 5. Adjust each exercise copy for the athlete's level
//!
//! The listed duration always equals the requested duration. A catalog that
//! yields nothing still produces a workout skeleton with no exercises; the
//! shortfall is reported through [`GenerationWarning`] rather than an error.

/// Section picking and level adjustment
pub mod assembly;
/// Template library and scoring
pub mod templates;

pub use templates::{
    score_template, select_template, synthesize_template, template_library, FocusIntent,
    SectionKind, TemplateChoice, TemplateSection, WorkoutTemplate,
};

use crate::catalog::{CatalogFilter, ExerciseCatalog};
use assembly::{
    adjust_for_level, cool_down_count, main_exercise_count, pick_low_intensity, pick_main,
    warm_up_count, Placed,
};
use chrono::NaiveDate;
use pierre_core::errors::{AppError, AppResult};
use pierre_core::models::{
    DifficultyLevel, Equipment, Exercise, ExerciseCategory, ExerciseTag, Workout, WorkoutOrigin,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Longest workout the generator accepts, in minutes
pub const MAX_REQUESTED_MINUTES: u32 = 240;

/// Equipment available to the athlete
///
/// Profiles nest: gym ⊇ home ⊇ minimal ⊇ bodyweight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentProfile {
    /// Full commercial gym
    Gym,
    /// Typical home setup
    #[default]
    Home,
    /// A few portable items
    Minimal,
    /// No equipment
    Bodyweight,
}

impl EquipmentProfile {
    /// Equipment allowed by this profile
    #[must_use]
    pub fn allowed_equipment(&self) -> BTreeSet<Equipment> {
        let minimal = [Equipment::ResistanceBand, Equipment::Mat, Equipment::JumpRope];
        let home = [
            Equipment::Dumbbell,
            Equipment::Kettlebell,
            Equipment::PullUpBar,
            Equipment::Bench,
        ];
        let gym = [Equipment::Barbell, Equipment::Cable, Equipment::Machine];

        match self {
            Self::Bodyweight => BTreeSet::new(),
            Self::Minimal => minimal.into_iter().collect(),
            Self::Home => minimal.into_iter().chain(home).collect(),
            Self::Gym => minimal.into_iter().chain(home).chain(gym).collect(),
        }
    }

    /// Convert to string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gym => "gym",
            Self::Home => "home",
            Self::Minimal => "minimal",
            Self::Bodyweight => "bodyweight",
        }
    }

    /// Parse from string, returning `None` for unrecognized values
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "gym" | "full_gym" => Some(Self::Gym),
            "home" | "home_gym" => Some(Self::Home),
            "minimal" | "travel" => Some(Self::Minimal),
            "bodyweight" | "none" | "no_equipment" => Some(Self::Bodyweight),
            _ => None,
        }
    }
}

impl fmt::Display for EquipmentProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the athlete asked for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutRequirement {
    /// Requested duration in minutes
    pub duration_minutes: u32,
    /// Free-text focus ("upper body", "cardio", ...)
    pub focus_area: String,
    /// Available equipment
    pub equipment: EquipmentProfile,
    /// Athlete experience
    pub experience_level: DifficultyLevel,
    /// Free-text goals, recorded in the description
    #[serde(default)]
    pub goals: Vec<String>,
    /// Injured or limited areas to avoid
    #[serde(default)]
    pub limitations: Vec<String>,
    /// Exercise ids or name fragments to place first
    #[serde(default)]
    pub preferred_exercises: Vec<String>,
    /// Exercise ids or name fragments to leave out
    #[serde(default)]
    pub excluded_exercises: Vec<String>,
}

impl WorkoutRequirement {
    /// Create a requirement with no goals, limitations or preferences
    pub fn new(
        duration_minutes: u32,
        focus_area: impl Into<String>,
        equipment: EquipmentProfile,
        experience_level: DifficultyLevel,
    ) -> Self {
        Self {
            duration_minutes,
            focus_area: focus_area.into(),
            equipment,
            experience_level,
            goals: Vec::new(),
            limitations: Vec::new(),
            preferred_exercises: Vec::new(),
            excluded_exercises: Vec::new(),
        }
    }

    /// Add injured or limited areas
    #[must_use]
    pub fn with_limitations(mut self, limitations: Vec<String>) -> Self {
        self.limitations = limitations;
        self
    }

    /// Add preferred exercises
    #[must_use]
    pub fn with_preferred(mut self, preferred: Vec<String>) -> Self {
        self.preferred_exercises = preferred;
        self
    }

    /// Add excluded exercises
    #[must_use]
    pub fn with_excluded(mut self, excluded: Vec<String>) -> Self {
        self.excluded_exercises = excluded;
        self
    }

    /// Add goals
    #[must_use]
    pub fn with_goals(mut self, goals: Vec<String>) -> Self {
        self.goals = goals;
        self
    }

    /// Validate the requested duration
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` when the duration is zero or above
    /// [`MAX_REQUESTED_MINUTES`]
    pub fn validate(&self) -> AppResult<()> {
        if self.duration_minutes == 0 || self.duration_minutes > MAX_REQUESTED_MINUTES {
            return Err(AppError::invalid_input(format!(
                "Workout duration must be between 1 and {MAX_REQUESTED_MINUTES} minutes, got {}",
                self.duration_minutes
            )));
        }
        Ok(())
    }
}

fn matches_any(exercise: &Exercise, terms: &[String]) -> bool {
    terms
        .iter()
        .any(|term| exercise.id == *term || exercise.name_matches(term))
}

/// A section that came up short of its ideal exercise count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationWarning {
    /// Section that was underfilled
    pub section: SectionKind,
    /// Ideal exercise count
    pub wanted: usize,
    /// Exercises actually placed
    pub found: usize,
}

impl fmt::Display for GenerationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} section has {} of {} exercises",
            self.section.as_str(),
            self.found,
            self.wanted
        )
    }
}

/// Output of [`WorkoutGenerator::generate`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedWorkout {
    /// The assembled workout, not yet saved
    pub workout: Workout,
    /// Name of the chosen or synthesized template
    pub template_name: String,
    /// Score of the best library template
    pub template_score: u32,
    /// True when the template was synthesized from the focus text
    pub synthesized: bool,
    /// Underfilled sections
    pub warnings: Vec<GenerationWarning>,
}

impl GeneratedWorkout {
    /// True when every section reached its ideal count
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Assembles workouts from a read-only exercise catalog
pub struct WorkoutGenerator {
    catalog: Arc<dyn ExerciseCatalog>,
    templates: Vec<WorkoutTemplate>,
}

impl WorkoutGenerator {
    /// Create a generator over `catalog` with the built-in template library
    #[must_use]
    pub fn new(catalog: Arc<dyn ExerciseCatalog>) -> Self {
        Self::with_templates(catalog, template_library())
    }

    /// Create a generator with a custom template library
    #[must_use]
    pub fn with_templates(catalog: Arc<dyn ExerciseCatalog>, templates: Vec<WorkoutTemplate>) -> Self {
        Self { catalog, templates }
    }

    /// Templates the generator scores against
    #[must_use]
    pub fn templates(&self) -> &[WorkoutTemplate] {
        &self.templates
    }

    /// The catalog exercises are drawn from
    #[must_use]
    pub fn catalog(&self) -> &Arc<dyn ExerciseCatalog> {
        &self.catalog
    }

    /// Generate a workout for `requirement` on `date`
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` for an out-of-range duration, or the catalog's
    /// error if it cannot be read
    pub async fn generate(
        &self,
        requirement: &WorkoutRequirement,
        date: NaiveDate,
    ) -> AppResult<GeneratedWorkout> {
        requirement.validate()?;

        let choice = select_template(&self.templates, requirement);
        let template = &choice.template;
        let total = requirement.duration_minutes;
        debug!(
            template = %template.name,
            score = choice.score,
            synthesized = choice.synthesized,
            "Selected workout template"
        );

        let allowed = requirement.equipment.allowed_equipment();
        let main_pool = self.main_pool(template, requirement, &allowed).await?;
        let low_pool = self.low_intensity_pool(requirement, &allowed).await?;

        let mut placed = Placed::new();
        let mut warnings = Vec::new();

        // Working sets go first so warm-up and cool-down never consume them
        let main_minutes = template.section_minutes(SectionKind::Main, total)
            + template.section_minutes(SectionKind::Accessory, total);
        let main_wanted = main_exercise_count(main_minutes);
        let main = pick_main(&main_pool, main_wanted, &mut placed);
        record_shortfall(&mut warnings, SectionKind::Main, main_wanted, main.len());

        let warm_minutes = template.section_minutes(SectionKind::WarmUp, total);
        let warm_wanted = warm_up_count(warm_minutes);
        let warm_up = pick_low_intensity(
            &main_pool,
            &low_pool,
            ExerciseTag::Mobility,
            warm_wanted,
            &mut placed,
        );
        record_shortfall(&mut warnings, SectionKind::WarmUp, warm_wanted, warm_up.len());

        let cool_minutes = template.section_minutes(SectionKind::CoolDown, total);
        let cool_wanted = cool_down_count(cool_minutes);
        let cool_down = pick_low_intensity(
            &main_pool,
            &low_pool,
            ExerciseTag::Stretch,
            cool_wanted,
            &mut placed,
        );
        record_shortfall(&mut warnings, SectionKind::CoolDown, cool_wanted, cool_down.len());

        let mut exercises: Vec<Exercise> = warm_up
            .into_iter()
            .chain(main)
            .chain(cool_down)
            .collect();
        for exercise in &mut exercises {
            adjust_for_level(exercise, requirement.experience_level, template.workout_type);
        }

        for warning in &warnings {
            warn!(
                section = warning.section.as_str(),
                wanted = warning.wanted,
                found = warning.found,
                "Generated workout section underfilled"
            );
        }

        let workout = build_workout(template, requirement, date, exercises);
        info!(
            template = %template.name,
            date = %date,
            exercises = workout.exercises.len(),
            duration_minutes = workout.duration_minutes,
            "Generated workout"
        );

        Ok(GeneratedWorkout {
            workout,
            template_name: choice.template.name.clone(),
            template_score: choice.score,
            synthesized: choice.synthesized,
            warnings,
        })
    }

    /// Working-set pool for the template, excluded entries removed and
    /// preferred entries first
    async fn main_pool(
        &self,
        template: &WorkoutTemplate,
        requirement: &WorkoutRequirement,
        allowed: &BTreeSet<Equipment>,
    ) -> AppResult<Vec<Exercise>> {
        let mut filter = CatalogFilter {
            muscle_groups: template.target_groups.clone(),
            equipment: Some(allowed.clone()),
            category: None,
            difficulty: Some(requirement.experience_level),
            exclude_injury: requirement.limitations.clone(),
        };

        let mut pool = self.search_for_template(template, &filter).await?;
        if pool.is_empty() {
            debug!(template = %template.name, "No exercises at level, relaxing difficulty");
            filter.difficulty = None;
            pool = self.search_for_template(template, &filter).await?;
        }

        pool.retain(|e| !matches_any(e, &requirement.excluded_exercises));
        // Stable sort keeps catalog order inside each partition
        pool.sort_by_key(|e| !matches_any(e, &requirement.preferred_exercises));
        Ok(pool)
    }

    async fn search_for_template(
        &self,
        template: &WorkoutTemplate,
        filter: &CatalogFilter,
    ) -> AppResult<Vec<Exercise>> {
        let pool = self.catalog.search("", filter).await?;
        let fits_type = |e: &Exercise| {
            if template.is_conditioning() {
                e.category == ExerciseCategory::Cardio || e.has_tag(ExerciseTag::Plyometric)
            } else if template.is_mobility() {
                matches!(
                    e.category,
                    ExerciseCategory::Flexibility | ExerciseCategory::Balance
                )
            } else {
                e.category == ExerciseCategory::Strength
            }
        };

        let typed: Vec<Exercise> = pool.iter().filter(|e| fits_type(e)).cloned().collect();
        // Any exercise touching the target groups beats an empty section
        Ok(if typed.is_empty() { pool } else { typed })
    }

    /// Low-intensity fallback pool regardless of target groups
    async fn low_intensity_pool(
        &self,
        requirement: &WorkoutRequirement,
        allowed: &BTreeSet<Equipment>,
    ) -> AppResult<Vec<Exercise>> {
        let filter = CatalogFilter {
            equipment: Some(allowed.clone()),
            exclude_injury: requirement.limitations.clone(),
            ..CatalogFilter::default()
        };
        let mut pool = self.catalog.search("", &filter).await?;
        pool.retain(|e| {
            assembly::is_low_intensity(e) && !matches_any(e, &requirement.excluded_exercises)
        });
        Ok(pool)
    }
}

fn record_shortfall(
    warnings: &mut Vec<GenerationWarning>,
    section: SectionKind,
    wanted: usize,
    found: usize,
) {
    if found < wanted {
        warnings.push(GenerationWarning {
            section,
            wanted,
            found,
        });
    }
}

fn build_workout(
    template: &WorkoutTemplate,
    requirement: &WorkoutRequirement,
    date: NaiveDate,
    exercises: Vec<Exercise>,
) -> Workout {
    let mean_rate = if exercises.is_empty() {
        0.0
    } else {
        exercises.iter().map(|e| e.calories_per_minute).sum::<f64>() / exercises.len() as f64
    };

    let summary = format!(
        "{}-minute {} session for {} equipment",
        requirement.duration_minutes, template.workout_type, requirement.equipment
    );
    let description = if requirement.goals.is_empty() {
        summary
    } else {
        format!("{summary}. Goals: {}", requirement.goals.join(", "))
    };

    let mut workout = Workout::new(template.name.clone(), date, template.workout_type)
        .with_description(description)
        .with_difficulty(requirement.experience_level)
        .with_origin(WorkoutOrigin::Ai);
    workout.exercises = exercises;
    workout.duration_minutes = requirement.duration_minutes;
    workout.calories = (f64::from(requirement.duration_minutes) * mean_rate).round() as u32;
    workout.tags.push("generated".to_owned());
    workout
}
