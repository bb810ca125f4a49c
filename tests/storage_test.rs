// ABOUTME: Integration tests for the key-value storage backends
// ABOUTME: Covers file persistence across reopen, key validation and schedule reload from disk
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use common::{create_test_planner_with, date, init_test_logging, memory_config, monday};
use pierre_workout_planner::{
    config::{PlannerConfig, StorageBackend},
    errors::ErrorCode,
    planner::WorkoutPlanner,
    storage::{create_store, FileStore, InMemoryStore, KeyValueStore},
};
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn test_file_store_round_trip_and_reopen() -> Result<()> {
    init_test_logging();
    let dir = TempDir::new()?;

    let store = FileStore::open(dir.path()).await?;
    assert!(store.get("workout_schedule").await?.is_none());
    store.set("workout_schedule", "{\"a\":1}".to_owned()).await?;
    store.set("workout_history", "[]".to_owned()).await?;

    let reopened = FileStore::open(dir.path()).await?;
    assert_eq!(
        reopened.get("workout_schedule").await?.as_deref(),
        Some("{\"a\":1}")
    );

    reopened
        .remove_many(&["workout_schedule", "workout_history", "never_written"])
        .await?;
    assert!(reopened.get("workout_schedule").await?.is_none());
    assert!(reopened.get("workout_history").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_file_store_rejects_path_like_keys() -> Result<()> {
    let dir = TempDir::new()?;
    let store = FileStore::open(dir.path()).await?;

    for key in ["", "../escape", "nested/key", "dot.key"] {
        let err = store.set(key, "x".to_owned()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput, "key {key:?}");
    }
    Ok(())
}

#[tokio::test]
async fn test_file_store_health_check() -> Result<()> {
    let dir = TempDir::new()?;
    let store = FileStore::open(dir.path().join("nested").join("planner")).await?;
    store.health_check().await?;
    assert_eq!(store.backend_name(), "file");
    Ok(())
}

#[tokio::test]
async fn test_in_memory_store_basics() -> Result<()> {
    let store = InMemoryStore::new();
    assert!(store.is_empty().await);

    store.set("k", "v1".to_owned()).await?;
    store.set("k", "v2".to_owned()).await?;
    assert_eq!(store.get("k").await?.as_deref(), Some("v2"));
    assert_eq!(store.len().await, 1);

    store.remove_many(&["k", "missing"]).await?;
    assert!(store.is_empty().await);
    Ok(())
}

#[tokio::test]
async fn test_schedule_survives_restart_on_file_backend() -> Result<()> {
    let dir = TempDir::new()?;
    let config = PlannerConfig {
        storage: StorageBackend::File,
        data_dir: dir.path().to_path_buf(),
        ..PlannerConfig::default()
    };

    {
        let planner = WorkoutPlanner::from_config(config.clone()).await?;
        planner.initialize_default_schedule(monday()).await?;
        planner.move_workout(date(2025, 3, 5), date(2025, 3, 9)).await?;
    }

    let restarted = WorkoutPlanner::from_config(config).await?;
    assert_eq!(restarted.initialize_default_schedule(monday()).await?, 0);
    assert!(restarted.get_by_date(date(2025, 3, 5)).await?.is_none());
    assert_eq!(
        restarted.get_by_date(date(2025, 3, 9)).await?.unwrap().title,
        "Leg Day"
    );
    assert_eq!(restarted.history().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_corrupt_schedule_is_a_serialization_error() -> Result<()> {
    let store = Arc::new(InMemoryStore::new());
    store
        .set("workout_schedule", "not json".to_owned())
        .await?;
    let planner = create_test_planner_with(memory_config(), store).await?;

    let err = planner.get_by_date(monday()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::SerializationError);
    Ok(())
}

#[tokio::test]
async fn test_create_store_honors_backend() -> Result<()> {
    let store = create_store(&memory_config()).await?;
    assert_eq!(store.backend_name(), "memory");
    Ok(())
}
