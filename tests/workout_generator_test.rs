// ABOUTME: Integration tests for template-driven workout generation
// ABOUTME: Covers duration handling, equipment and exclusion filters, levels and empty catalogs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use common::{create_test_planner, init_test_logging, monday};
use pierre_workout_planner::{
    errors::ErrorCode,
    intelligence::{
        workout_generator::MAX_REQUESTED_MINUTES, EquipmentProfile, InMemoryCatalog,
        WorkoutGenerator, WorkoutRequirement,
    },
    models::{DifficultyLevel, WorkoutOrigin},
};
use std::collections::HashSet;
use std::sync::Arc;

fn requirement(minutes: u32, focus: &str) -> WorkoutRequirement {
    WorkoutRequirement::new(
        minutes,
        focus,
        EquipmentProfile::Home,
        DifficultyLevel::Intermediate,
    )
}

#[tokio::test]
async fn test_generated_duration_matches_request() -> Result<()> {
    let planner = create_test_planner().await?;

    for minutes in [20, 45, 75] {
        let generated = planner
            .generate(&requirement(minutes, "full body"), monday())
            .await?;
        assert_eq!(generated.workout.duration_minutes, minutes);
        assert_eq!(generated.workout.date, monday());
        assert_eq!(generated.workout.origin, WorkoutOrigin::Ai);
        assert!(!generated.workout.exercises.is_empty());
    }
    Ok(())
}

#[tokio::test]
async fn test_duration_holds_at_boundaries_and_across_profiles() -> Result<()> {
    let planner = create_test_planner().await?;

    let cases = [
        (1, "full body", EquipmentProfile::Home),
        (MAX_REQUESTED_MINUTES, "full body", EquipmentProfile::Gym),
        (25, "hiit conditioning", EquipmentProfile::Minimal),
        (40, "legs", EquipmentProfile::Bodyweight),
        (MAX_REQUESTED_MINUTES, "something unusual", EquipmentProfile::Home),
    ];
    for (minutes, focus, equipment) in cases {
        let requirement =
            WorkoutRequirement::new(minutes, focus, equipment, DifficultyLevel::Intermediate);
        let generated = planner.generate(&requirement, monday()).await?;
        assert_eq!(
            generated.workout.duration_minutes, minutes,
            "{minutes} min, {focus}, {equipment:?}"
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_unmatched_focus_synthesizes_template() -> Result<()> {
    let planner = create_test_planner().await?;
    let generated = planner
        .generate(&requirement(MAX_REQUESTED_MINUTES, "something unusual"), monday())
        .await?;

    assert!(generated.synthesized);
    assert_eq!(generated.workout.duration_minutes, MAX_REQUESTED_MINUTES);
    assert!(!generated.workout.exercises.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_duration_above_limit_is_invalid() -> Result<()> {
    let planner = create_test_planner().await?;
    let err = planner
        .generate(&requirement(MAX_REQUESTED_MINUTES + 1, "full body"), monday())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    Ok(())
}

#[tokio::test]
async fn test_generated_exercises_are_unique() -> Result<()> {
    let planner = create_test_planner().await?;
    let generated = planner
        .generate(&requirement(60, "upper body"), monday())
        .await?;

    let ids: HashSet<&str> = generated
        .workout
        .exercises
        .iter()
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(ids.len(), generated.workout.exercises.len());
    Ok(())
}

#[tokio::test]
async fn test_empty_catalog_yields_empty_workout_with_warnings() -> Result<()> {
    init_test_logging();
    let generator = WorkoutGenerator::new(Arc::new(InMemoryCatalog::new(Vec::new())));

    let generated = generator
        .generate(&requirement(30, "legs"), monday())
        .await?;

    assert!(generated.workout.exercises.is_empty());
    assert_eq!(generated.workout.duration_minutes, 30);
    assert!(!generated.is_complete());
    assert!(!generated.warnings.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_excluded_exercises_never_appear() -> Result<()> {
    let planner = create_test_planner().await?;
    let excluded = vec!["goblet-squat".to_owned(), "Push-Up".to_owned()];
    let request = requirement(45, "full body").with_excluded(excluded);

    let generated = planner.generate(&request, monday()).await?;

    assert!(generated
        .workout
        .exercises
        .iter()
        .all(|e| e.id != "goblet-squat" && e.id != "push-up"));
    Ok(())
}

#[tokio::test]
async fn test_limitations_filter_contraindicated_exercises() -> Result<()> {
    let planner = create_test_planner().await?;
    let request = requirement(45, "legs").with_limitations(vec!["knee".to_owned()]);

    let generated = planner.generate(&request, monday()).await?;

    assert!(generated.workout.exercises.iter().all(|e| e
        .contraindications
        .iter()
        .all(|c| !c.to_lowercase().contains("knee"))));
    Ok(())
}

#[tokio::test]
async fn test_bodyweight_profile_uses_no_equipment() -> Result<()> {
    let planner = create_test_planner().await?;
    let request = WorkoutRequirement::new(
        40,
        "full body",
        EquipmentProfile::Bodyweight,
        DifficultyLevel::Intermediate,
    );

    let generated = planner.generate(&request, monday()).await?;

    assert!(!generated.workout.exercises.is_empty());
    assert!(generated.workout.exercises.iter().all(|e| e.is_bodyweight()));
    Ok(())
}

#[tokio::test]
async fn test_zero_minutes_is_rejected() -> Result<()> {
    let planner = create_test_planner().await?;
    let err = planner
        .generate(&requirement(0, "full body"), monday())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    Ok(())
}

#[tokio::test]
async fn test_beginner_rest_is_ninety_seconds() -> Result<()> {
    let planner = create_test_planner().await?;
    let request = WorkoutRequirement::new(
        30,
        "upper body",
        EquipmentProfile::Home,
        DifficultyLevel::Beginner,
    );

    let generated = planner.generate(&request, monday()).await?;

    assert!(generated
        .workout
        .exercises
        .iter()
        .all(|e| e.rest_seconds == 90));
    Ok(())
}

#[tokio::test]
async fn test_generation_does_not_touch_schedule() -> Result<()> {
    let planner = create_test_planner().await?;
    planner
        .generate(&requirement(30, "core"), monday())
        .await?;
    assert!(planner.get_by_date(monday()).await?.is_none());
    Ok(())
}
