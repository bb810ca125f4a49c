// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, planner fixtures, and a store that can be told to fail writes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `pierre_workout_planner`

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use pierre_workout_planner::{
    config::{PlannerConfig, StorageBackend},
    conversation::ConversationContext,
    errors::{AppError, AppResult},
    intelligence::{catalog::default_exercise_library, ExerciseCatalog, InMemoryCatalog},
    models::{Exercise, Workout, WorkoutType},
    planner::WorkoutPlanner,
    storage::{InMemoryStore, KeyValueStore},
};
use std::env;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Once};
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // TEST_LOG raises verbosity; tests stay quiet at WARN otherwise
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Build a date, panicking on invalid input
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Monday 2025-03-03, the anchor date used across tests
pub fn monday() -> NaiveDate {
    date(2025, 3, 3)
}

/// Conversation context anchored on [`monday`]
pub fn test_context() -> ConversationContext {
    ConversationContext::new("test-session", monday())
}

/// Library exercise by id
pub fn library_exercise(id: &str) -> Exercise {
    default_exercise_library()
        .into_iter()
        .find(|e| e.id == id)
        .unwrap()
}

/// A small strength workout built from library exercises
pub fn sample_workout(on: NaiveDate, title: &str) -> Workout {
    Workout::new(title, on, WorkoutType::Strength).with_exercises(vec![
        library_exercise("push-up"),
        library_exercise("goblet-squat"),
        library_exercise("plank"),
    ])
}

/// In-memory planner configuration
pub fn memory_config() -> PlannerConfig {
    PlannerConfig {
        storage: StorageBackend::Memory,
        ..PlannerConfig::default()
    }
}

/// Planner over a fresh in-memory store and the default library
pub async fn create_test_planner() -> Result<WorkoutPlanner> {
    create_test_planner_with(memory_config(), Arc::new(InMemoryStore::new())).await
}

/// Planner over an explicit config and store
pub async fn create_test_planner_with(
    config: PlannerConfig,
    store: Arc<dyn KeyValueStore>,
) -> Result<WorkoutPlanner> {
    init_test_logging();
    let catalog: Arc<dyn ExerciseCatalog> = Arc::new(InMemoryCatalog::with_default_library());
    Ok(WorkoutPlanner::new(config, store, catalog).await?)
}

/// Planner with the default schedule seeded for the week of [`monday`]
pub async fn create_seeded_planner() -> Result<WorkoutPlanner> {
    let planner = create_test_planner().await?;
    planner.initialize_default_schedule(monday()).await?;
    Ok(planner)
}

/// Key-value store that fails writes on demand
#[derive(Default)]
pub struct FailingStore {
    inner: InMemoryStore,
    fail_writes: AtomicBool,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail (or succeed again)
    pub fn set_failing(&self, failing: bool) {
        self.fail_writes.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::storage("injected write failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String) -> AppResult<()> {
        self.check()?;
        self.inner.set(key, value).await
    }

    async fn remove_many(&self, keys: &[&str]) -> AppResult<()> {
        self.check()?;
        self.inner.remove_many(keys).await
    }

    async fn health_check(&self) -> AppResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}
