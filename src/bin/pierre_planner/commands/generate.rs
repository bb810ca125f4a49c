// ABOUTME: Workout generation command for pierre-planner
// ABOUTME: Builds a requirement from flags, prints the generated workout and optionally saves it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use pierre_workout_planner::{
    errors::{AppError, AppResult},
    intelligence::{EquipmentProfile, WorkoutRequirement},
    models::DifficultyLevel,
    planner::WorkoutPlanner,
};
use tracing::warn;

use crate::helpers::display::display_workout;

/// Flags for `generate`
pub struct GenerateOptions {
    pub minutes: Option<u32>,
    pub focus: String,
    pub equipment: Option<String>,
    pub level: Option<String>,
    pub date: NaiveDate,
    pub save: bool,
}

/// Generate a workout and print it
pub async fn run(planner: &WorkoutPlanner, options: GenerateOptions) -> AppResult<()> {
    let defaults = &planner.config().generation;
    let equipment = match options.equipment.as_deref() {
        Some(raw) => EquipmentProfile::parse(raw)
            .ok_or_else(|| AppError::invalid_input(format!("Unknown equipment profile '{raw}'")))?,
        None => defaults.equipment,
    };
    let level = match options.level.as_deref() {
        Some(raw) => DifficultyLevel::parse(raw)
            .ok_or_else(|| AppError::invalid_input(format!("Unknown level '{raw}'")))?,
        None => defaults.experience,
    };
    let requirement = WorkoutRequirement::new(
        options.minutes.unwrap_or(defaults.workout_minutes),
        options.focus,
        equipment,
        level,
    );

    let generated = planner.generate(&requirement, options.date).await?;
    let template_note = if generated.synthesized {
        "synthesized"
    } else {
        "library"
    };
    println!(
        "Template: {} ({template_note}, score {})",
        generated.template_name, generated.template_score
    );
    for warning in &generated.warnings {
        warn!(
            section = warning.section.as_str(),
            wanted = warning.wanted,
            found = warning.found,
            "Section underfilled"
        );
    }
    display_workout(&generated.workout);

    if options.save {
        let saved = planner.save(generated.workout).await?;
        println!("\nSaved to {}.", saved.date);
    }
    Ok(())
}
