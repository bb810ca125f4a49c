// ABOUTME: End-to-end tests for chat messages flowing through classification, proposals and handlers
// ABOUTME: Exercises rest days, substitutions, generated workouts and moves against a seeded schedule
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use common::{create_seeded_planner, create_test_planner, date, test_context};
use pierre_workout_planner::{
    conversation::ActionResult, errors::ErrorCode, models::WorkoutOrigin,
};
use serde_json::Value;

/// Action tags offered by a proposal result
fn option_tags(result: &ActionResult) -> Vec<String> {
    result.data["options"]
        .as_array()
        .expect("options array")
        .iter()
        .map(|o| o["action_tag"].as_str().unwrap().to_owned())
        .collect()
}

#[tokio::test]
async fn test_query_reports_scheduled_workout() -> Result<()> {
    let planner = create_seeded_planner().await?;
    let mut ctx = test_context();

    let result = planner
        .handle_message(&mut ctx, "What's my workout today?")
        .await;

    assert!(result.success);
    assert!(result.message.contains("Upper Body Strength"));
    assert!(!result.awaits_confirmation());
    assert_eq!(ctx.last_referenced_date, Some(date(2025, 3, 3)));
    Ok(())
}

#[tokio::test]
async fn test_rest_day_proposal_then_confirm() -> Result<()> {
    let planner = create_seeded_planner().await?;
    let mut ctx = test_context();

    let proposal = planner
        .handle_message(&mut ctx, "Make wednesday a rest day")
        .await;
    assert!(proposal.success);
    let proposal_id = proposal.proposal_id().expect("proposal id").to_owned();
    assert_eq!(option_tags(&proposal), vec!["confirm_rest_day", "cancel"]);

    // Nothing changes until the option is chosen
    assert!(planner.get_by_date(date(2025, 3, 5)).await?.is_some());
    assert_eq!(planner.pending_confirmations(&ctx).len(), 1);

    let confirmed = planner
        .resolve_confirmation(&ctx, &proposal_id, "confirm_rest_day", Value::Null)
        .await;
    assert!(confirmed.success, "{}", confirmed.message);
    assert!(planner.get_by_date(date(2025, 3, 5)).await?.is_none());
    assert!(planner.pending_confirmations(&ctx).is_empty());

    let again = planner
        .resolve_confirmation(&ctx, &proposal_id, "confirm_rest_day", Value::Null)
        .await;
    assert!(!again.success);
    assert_eq!(again.error, Some(ErrorCode::ResourceNotFound));
    Ok(())
}

#[tokio::test]
async fn test_rest_day_cancel_leaves_schedule() -> Result<()> {
    let planner = create_seeded_planner().await?;
    let mut ctx = test_context();

    let proposal = planner
        .handle_message(&mut ctx, "Make wednesday a rest day")
        .await;
    let proposal_id = proposal.proposal_id().unwrap().to_owned();

    let cancelled = planner
        .resolve_confirmation(&ctx, &proposal_id, "cancel", Value::Null)
        .await;

    assert!(cancelled.success);
    assert!(planner.get_by_date(date(2025, 3, 5)).await?.is_some());
    assert!(planner.history().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_rest_day_on_empty_date_needs_no_proposal() -> Result<()> {
    let planner = create_seeded_planner().await?;
    let mut ctx = test_context();

    let result = planner
        .handle_message(&mut ctx, "Make sunday a rest day")
        .await;

    assert!(result.success);
    assert!(!result.awaits_confirmation());
    assert!(planner.pending_confirmations(&ctx).is_empty());
    Ok(())
}

#[tokio::test]
async fn test_substitution_proposal_then_confirm() -> Result<()> {
    let planner = create_seeded_planner().await?;
    let mut ctx = test_context();

    let proposal = planner
        .handle_message(&mut ctx, "Swap the goblet squat on wednesday")
        .await;
    assert!(proposal.success, "{}", proposal.message);
    let tags = option_tags(&proposal);
    assert_eq!(tags.last().map(String::as_str), Some("cancel"));
    let choice = tags
        .iter()
        .find(|t| t.starts_with("substitute_exercise:"))
        .expect("a substitute option")
        .clone();
    let replacement_id = choice.trim_start_matches("substitute_exercise:").to_owned();

    let confirmed = planner
        .resolve_confirmation(
            &ctx,
            proposal.proposal_id().unwrap(),
            &choice,
            Value::Null,
        )
        .await;
    assert!(confirmed.success, "{}", confirmed.message);

    let leg_day = planner.get_by_date(date(2025, 3, 5)).await?.unwrap();
    assert!(leg_day.exercise_position("goblet-squat").is_none());
    assert_eq!(leg_day.exercise_position(&replacement_id), Some(1));
    Ok(())
}

#[tokio::test]
async fn test_substitution_on_rest_day_fails() -> Result<()> {
    let planner = create_seeded_planner().await?;
    let mut ctx = test_context();

    let result = planner
        .handle_message(&mut ctx, "Swap the burpees on sunday")
        .await;

    assert!(!result.success);
    assert_eq!(result.error, Some(ErrorCode::ResourceNotFound));
    Ok(())
}

#[tokio::test]
async fn test_substitution_of_unscheduled_exercise_lists_current_ones() -> Result<()> {
    let planner = create_seeded_planner().await?;
    let mut ctx = test_context();

    let result = planner
        .handle_message(&mut ctx, "Replace the burpees on wednesday")
        .await;

    assert!(!result.success);
    let names = result.data["exercises"].as_array().unwrap();
    assert!(names.iter().any(|n| n == "Goblet Squat"));
    Ok(())
}

#[tokio::test]
async fn test_generated_workout_added_for_tomorrow() -> Result<()> {
    let planner = create_test_planner().await?;
    let mut ctx = test_context();

    let proposal = planner
        .handle_message(&mut ctx, "Create a 20 minute core workout")
        .await;
    assert!(proposal.success, "{}", proposal.message);
    assert_eq!(
        option_tags(&proposal),
        vec![
            "add_workout:today",
            "add_workout:tomorrow",
            "modify_workout",
            "cancel"
        ]
    );
    // Generation alone never writes to the schedule
    assert!(planner.get_by_date(date(2025, 3, 3)).await?.is_none());

    let added = planner
        .resolve_confirmation(
            &ctx,
            proposal.proposal_id().unwrap(),
            "add_workout:tomorrow",
            Value::Null,
        )
        .await;
    assert!(added.success, "{}", added.message);

    let saved = planner.get_by_date(date(2025, 3, 4)).await?.unwrap();
    assert_eq!(saved.duration_minutes, 20);
    assert_eq!(saved.origin, WorkoutOrigin::Ai);
    assert!(planner.get_by_date(date(2025, 3, 3)).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_move_to_occupied_day_swaps() -> Result<()> {
    let planner = create_seeded_planner().await?;
    let mut ctx = test_context();

    let result = planner
        .handle_message(&mut ctx, "Move wednesday's workout to thursday")
        .await;

    assert!(result.success, "{}", result.message);
    assert_eq!(result.data["swapped"], Value::Bool(true));
    assert_eq!(
        planner.get_by_date(date(2025, 3, 6)).await?.unwrap().title,
        "Leg Day"
    );
    assert_eq!(
        planner.get_by_date(date(2025, 3, 5)).await?.unwrap().title,
        "Yoga & Mobility"
    );
    Ok(())
}

#[tokio::test]
async fn test_move_without_destination_is_rejected() -> Result<()> {
    let planner = create_seeded_planner().await?;
    let mut ctx = test_context();

    let result = planner.handle_message(&mut ctx, "Can we reschedule?").await;

    assert!(!result.success);
    assert_eq!(result.error, Some(ErrorCode::InvalidInput));
    Ok(())
}

#[tokio::test]
async fn test_postpone_without_destination_changes_nothing() -> Result<()> {
    let planner = create_seeded_planner().await?;
    let mut ctx = test_context();

    let result = planner
        .handle_message(&mut ctx, "Postpone tomorrow's workout")
        .await;

    assert!(!result.success);
    assert_eq!(result.error, Some(ErrorCode::InvalidInput));
    assert_eq!(
        planner.get_by_date(date(2025, 3, 3)).await?.unwrap().title,
        "Upper Body Strength"
    );
    assert_eq!(
        planner.get_by_date(date(2025, 3, 4)).await?.unwrap().title,
        "HIIT Cardio"
    );
    assert!(planner.history().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_unrecognized_message() -> Result<()> {
    let planner = create_seeded_planner().await?;
    let mut ctx = test_context();

    let result = planner
        .handle_message(&mut ctx, "The weather is lovely")
        .await;

    assert!(!result.success);
    assert_eq!(result.error, Some(ErrorCode::InvalidInput));
    assert!(ctx.last_referenced_date.is_none());
    Ok(())
}
