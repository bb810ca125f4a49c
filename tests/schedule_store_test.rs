// ABOUTME: Integration tests for the date-keyed schedule store
// ABOUTME: Covers bootstrap, round-trips, move/swap, exercise edits, undo and persistence failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use chrono::{Datelike, Days, Weekday};
use common::{
    create_seeded_planner, create_test_planner, create_test_planner_with, date, library_exercise,
    memory_config, monday, sample_workout, FailingStore,
};
use pierre_workout_planner::{
    errors::ErrorCode,
    models::WorkoutType,
    schedule::{week_start, MutationKind},
};
use std::sync::Arc;

#[tokio::test]
async fn test_default_schedule_week_has_six_workouts_and_sunday_rest() -> Result<()> {
    let planner = create_test_planner().await?;
    let created = planner.initialize_default_schedule(monday()).await?;
    assert_eq!(created, 24);

    let start = week_start(monday());
    let end = start.checked_add_days(Days::new(6)).unwrap();
    let week = planner.get_range(start, end).await?;

    assert_eq!(week.len(), 6);
    assert!(week.iter().all(|w| w.date.weekday() != Weekday::Sun));
    assert!(planner.get_by_date(date(2025, 3, 9)).await?.is_none());

    let titles: Vec<&str> = week.iter().map(|w| w.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Upper Body Strength",
            "HIIT Cardio",
            "Leg Day",
            "Yoga & Mobility",
            "Full Body Strength",
            "Active Recovery",
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_initialize_default_schedule_is_idempotent() -> Result<()> {
    let planner = create_test_planner().await?;
    planner.initialize_default_schedule(monday()).await?;
    let first = planner.get_range(date(2025, 1, 1), date(2025, 12, 31)).await?;

    let second_count = planner.initialize_default_schedule(monday()).await?;
    let second = planner.get_range(date(2025, 1, 1), date(2025, 12, 31)).await?;

    assert_eq!(second_count, 0);
    assert_eq!(first, second);
    assert!(planner.history().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_save_then_get_round_trips() -> Result<()> {
    let planner = create_test_planner().await?;
    let workout = sample_workout(date(2025, 4, 1), "Tuesday Session");

    planner.save(workout.clone()).await?;
    let stored = planner.get_by_date(workout.date).await?.expect("saved workout");

    assert!(stored.same_content(&workout));
    Ok(())
}

#[tokio::test]
async fn test_move_to_empty_date() -> Result<()> {
    let planner = create_seeded_planner().await?;
    let wednesday = date(2025, 3, 5);
    let sunday = date(2025, 3, 9);
    let original = planner.get_by_date(wednesday).await?.unwrap();

    let outcome = planner.move_workout(wednesday, sunday).await?;

    assert!(!outcome.is_swap());
    assert!(planner.get_by_date(wednesday).await?.is_none());
    let moved = planner.get_by_date(sunday).await?.unwrap();
    assert_eq!(moved.id, original.id);
    assert_eq!(moved.title, "Leg Day");
    assert_eq!(moved.date, sunday);
    assert_eq!(moved.original_date, Some(wednesday));
    Ok(())
}

#[tokio::test]
async fn test_move_to_occupied_date_swaps() -> Result<()> {
    let planner = create_seeded_planner().await?;
    let wednesday = date(2025, 3, 5);
    let thursday = date(2025, 3, 6);
    let leg_day = planner.get_by_date(wednesday).await?.unwrap();
    let yoga = planner.get_by_date(thursday).await?.unwrap();

    let outcome = planner.move_workout(wednesday, thursday).await?;

    assert!(outcome.is_swap());
    let on_thursday = planner.get_by_date(thursday).await?.unwrap();
    let on_wednesday = planner.get_by_date(wednesday).await?.unwrap();
    assert_eq!(on_thursday.id, leg_day.id);
    assert_eq!(on_thursday.exercises, leg_day.exercises);
    assert_eq!(on_wednesday.id, yoga.id);
    assert_eq!(on_wednesday.date, wednesday);
    Ok(())
}

#[tokio::test]
async fn test_move_rejects_same_date_and_empty_source() -> Result<()> {
    let planner = create_seeded_planner().await?;

    let same = planner
        .move_workout(date(2025, 3, 5), date(2025, 3, 5))
        .await
        .unwrap_err();
    assert_eq!(same.code, ErrorCode::InvalidInput);

    let empty = planner
        .move_workout(date(2025, 3, 9), date(2025, 3, 10))
        .await
        .unwrap_err();
    assert_eq!(empty.code, ErrorCode::ResourceNotFound);
    Ok(())
}

#[tokio::test]
async fn test_exercise_edits_recompute_totals_with_floors() -> Result<()> {
    let planner = create_test_planner().await?;
    let day = date(2025, 4, 2);
    planner.save(sample_workout(day, "Edit Me")).await?;

    let added = planner
        .add_exercise(day, library_exercise("dumbbell-row"))
        .await?;
    assert_eq!(added.exercises.len(), 4);

    for id in ["push-up", "goblet-squat", "plank", "dumbbell-row"] {
        let updated = planner.remove_exercise(day, id).await?;
        assert!(updated.duration_minutes >= 10);
        assert!(updated.calories >= 50);
    }

    let empty = planner.get_by_date(day).await?.unwrap();
    assert!(empty.exercises.is_empty());
    assert_eq!(empty.duration_minutes, 10);
    assert_eq!(empty.calories, 50);
    Ok(())
}

#[tokio::test]
async fn test_replace_missing_exercise_is_invalid_mutation() -> Result<()> {
    let planner = create_test_planner().await?;
    let day = date(2025, 4, 3);
    planner.save(sample_workout(day, "Replace Target")).await?;

    let err = planner
        .replace_exercise(day, "burpee", library_exercise("jump-squat"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidMutation);

    let replaced = planner
        .replace_exercise(day, "plank", library_exercise("russian-twist"))
        .await?;
    assert!(replaced.exercise_position("russian-twist").is_some());
    assert!(replaced.exercise_position("plank").is_none());
    Ok(())
}

#[tokio::test]
async fn test_delete_rest_day_records_noop() -> Result<()> {
    let planner = create_test_planner().await?;
    assert!(planner.delete(date(2025, 4, 4)).await?.is_none());

    let history = planner.history().await?;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].kind, MutationKind::Delete);
    assert_eq!(history[0].dates(), vec![date(2025, 4, 4)]);

    // Undoing it leaves the date empty
    assert!(planner.undo_last().await?.is_some());
    assert!(planner.get_by_date(date(2025, 4, 4)).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_mark_completed_appends_notes() -> Result<()> {
    let planner = create_seeded_planner().await?;
    let friday = date(2025, 3, 7);

    planner.mark_completed(friday, Some("felt strong")).await?;
    let done = planner.mark_completed(friday, Some("  extra set  ")).await?;

    assert!(done.completed);
    assert_eq!(done.notes.as_deref(), Some("felt strong\nextra set"));

    let missing = planner.mark_completed(date(2025, 3, 9), None).await.unwrap_err();
    assert_eq!(missing.code, ErrorCode::ResourceNotFound);
    Ok(())
}

#[tokio::test]
async fn test_undo_reverts_move_swap() -> Result<()> {
    let planner = create_seeded_planner().await?;
    let wednesday = date(2025, 3, 5);
    let thursday = date(2025, 3, 6);
    let before_wed = planner.get_by_date(wednesday).await?.unwrap();
    let before_thu = planner.get_by_date(thursday).await?.unwrap();

    planner.move_workout(wednesday, thursday).await?;
    let record = planner.undo_last().await?.expect("a move to undo");

    assert_eq!(record.kind, MutationKind::Move);
    assert_eq!(planner.get_by_date(wednesday).await?, Some(before_wed));
    assert_eq!(planner.get_by_date(thursday).await?, Some(before_thu));
    assert!(planner.undo_last().await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_get_range_rejects_inverted_bounds() -> Result<()> {
    let planner = create_test_planner().await?;
    let err = planner
        .get_range(date(2025, 3, 10), date(2025, 3, 3))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    Ok(())
}

#[tokio::test]
async fn test_workout_stats_for_first_week() -> Result<()> {
    let planner = create_seeded_planner().await?;
    planner.mark_completed(date(2025, 3, 3), None).await?;
    planner.mark_completed(date(2025, 3, 4), None).await?;

    let stats = planner
        .get_workout_stats(Some(date(2025, 3, 3)), Some(date(2025, 3, 9)))
        .await?;

    assert_eq!(stats.total_workouts, 6);
    assert_eq!(stats.completed_workouts, 2);
    assert_eq!(stats.counts_by_type[&WorkoutType::Strength], 3);
    assert!((stats.weekly_average - 6.0).abs() < f64::EPSILON);
    Ok(())
}

#[tokio::test]
async fn test_concurrent_saves_do_not_lose_updates() -> Result<()> {
    let planner = Arc::new(create_test_planner().await?);

    let tasks: Vec<_> = (1..=10)
        .map(|day| {
            let planner = Arc::clone(&planner);
            tokio::spawn(async move {
                planner
                    .save(sample_workout(date(2025, 5, day), "Parallel"))
                    .await
            })
        })
        .collect();
    for task in tasks {
        task.await??;
    }

    let saved = planner.get_range(date(2025, 5, 1), date(2025, 5, 31)).await?;
    assert_eq!(saved.len(), 10);
    Ok(())
}

#[tokio::test]
async fn test_failed_write_leaves_schedule_unchanged() -> Result<()> {
    let store = Arc::new(FailingStore::new());
    let planner = create_test_planner_with(memory_config(), store.clone()).await?;
    planner.initialize_default_schedule(monday()).await?;
    let wednesday = date(2025, 3, 5);
    let before = planner.get_by_date(wednesday).await?;

    store.set_failing(true);
    let err = planner.delete(wednesday).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::StorageError);

    store.set_failing(false);
    assert_eq!(planner.get_by_date(wednesday).await?, before);

    // Retry succeeds once the store recovers
    assert!(planner.delete(wednesday).await?.is_some());
    Ok(())
}
