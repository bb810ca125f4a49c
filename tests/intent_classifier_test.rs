// ABOUTME: Integration tests for rule-based intent classification
// ABOUTME: Checks intent kinds, confirmation flags and extracted entities for representative messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use common::{date, init_test_logging, monday, test_context};
use pierre_workout_planner::{
    conversation::{IntentClassifier, IntentEntities, IntentKind},
    intelligence::{EquipmentProfile, InMemoryCatalog},
    models::DifficultyLevel,
};

async fn classifier() -> Result<IntentClassifier> {
    init_test_logging();
    let catalog = InMemoryCatalog::with_default_library();
    Ok(IntentClassifier::from_catalog(&catalog).await?)
}

#[tokio::test]
async fn test_workout_query_needs_no_confirmation() -> Result<()> {
    let classifier = classifier().await?;
    let actions = classifier.classify("What's my workout today?", &test_context());

    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].kind, IntentKind::WorkoutQuery);
    assert!(!actions[0].requires_confirmation);
    assert_eq!(
        actions[0].entities,
        IntentEntities::WorkoutQuery { date: monday() }
    );
    Ok(())
}

#[tokio::test]
async fn test_rest_day_requires_confirmation() -> Result<()> {
    let classifier = classifier().await?;
    let actions = classifier.classify("Make today a rest day", &test_context());

    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].kind, IntentKind::RestDay);
    assert!(actions[0].requires_confirmation);
    assert_eq!(actions[0].entities, IntentEntities::RestDay { date: monday() });
    Ok(())
}

#[tokio::test]
async fn test_substitution_resolves_exercise_and_reason() -> Result<()> {
    let classifier = classifier().await?;
    let actions = classifier.classify(
        "Swap the goblet squat on wednesday because my knee hurts",
        &test_context(),
    );

    let substitution = actions
        .iter()
        .find(|a| a.kind == IntentKind::Substitution)
        .expect("substitution action");
    assert!(substitution.requires_confirmation);
    assert_eq!(
        substitution.entities,
        IntentEntities::Substitution {
            date: date(2025, 3, 5),
            exercise_id: Some("goblet-squat".to_owned()),
            exercise_query: Some("goblet squat".to_owned()),
            reason: Some("knee hurts".to_owned()),
        }
    );
    Ok(())
}

#[tokio::test]
async fn test_creation_extracts_parameters() -> Result<()> {
    let classifier = classifier().await?;
    let actions = classifier.classify(
        "Create a 30 minute upper body workout for a beginner with no equipment tomorrow",
        &test_context(),
    );

    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].kind, IntentKind::Creation);
    assert_eq!(
        actions[0].entities,
        IntentEntities::Creation {
            date: date(2025, 3, 4),
            duration_minutes: Some(30),
            focus: Some("upper body".to_owned()),
            equipment: Some(EquipmentProfile::Bodyweight),
            level: Some(DifficultyLevel::Beginner),
        }
    );
    Ok(())
}

#[tokio::test]
async fn test_move_with_two_dates() -> Result<()> {
    let classifier = classifier().await?;
    let actions = classifier.classify("Move wednesday's workout to thursday", &test_context());

    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].kind, IntentKind::Move);
    assert!(!actions[0].requires_confirmation);
    assert_eq!(
        actions[0].entities,
        IntentEntities::Move {
            from: Some(date(2025, 3, 5)),
            to: Some(date(2025, 3, 6)),
        }
    );
    Ok(())
}

#[tokio::test]
async fn test_move_with_single_possessive_date_names_the_source() -> Result<()> {
    let classifier = classifier().await?;

    for message in ["Postpone tomorrow's workout", "move tomorrow's workout"] {
        let actions = classifier.classify(message, &test_context());
        assert_eq!(actions.len(), 1, "{message}");
        assert_eq!(
            actions[0].entities,
            IntentEntities::Move {
                from: Some(date(2025, 3, 4)),
                to: None,
            },
            "{message}"
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_move_with_single_destination_date() -> Result<()> {
    let classifier = classifier().await?;
    let actions = classifier.classify("Push it to friday", &test_context());

    assert_eq!(
        actions[0].entities,
        IntentEntities::Move {
            from: Some(monday()),
            to: Some(date(2025, 3, 7)),
        }
    );
    Ok(())
}

#[tokio::test]
async fn test_move_without_target_leaves_destination_open() -> Result<()> {
    let classifier = classifier().await?;
    let actions = classifier.classify("Can we reschedule?", &test_context());

    assert_eq!(actions.len(), 1);
    assert_eq!(
        actions[0].entities,
        IntentEntities::Move {
            from: Some(monday()),
            to: None,
        }
    );
    Ok(())
}

#[tokio::test]
async fn test_compound_message_yields_every_matching_kind() -> Result<()> {
    let classifier = classifier().await?;
    let actions = classifier.classify(
        "Swap the burpees and move it to friday",
        &test_context(),
    );

    let kinds: Vec<IntentKind> = actions.iter().map(|a| a.kind).collect();
    assert_eq!(kinds, vec![IntentKind::Substitution, IntentKind::Move]);
    Ok(())
}

#[tokio::test]
async fn test_unrecognized_message_yields_nothing() -> Result<()> {
    let classifier = classifier().await?;
    assert!(classifier
        .classify("The weather is lovely", &test_context())
        .is_empty());
    Ok(())
}

#[tokio::test]
async fn test_catalog_names_are_indexed() -> Result<()> {
    let classifier = classifier().await?;
    assert!(classifier.indexed_names() > 0);
    Ok(())
}
