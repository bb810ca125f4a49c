// ABOUTME: WorkoutPlanner facade wiring storage, schedule, generator and conversation together
// ABOUTME: Exposes the query, mutation and conversational surface consumed by UI layers and the CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::PlannerConfig;
use crate::conversation::{
    builtin_handlers, ActionExecutor, ActionResult, ClassifiedAction, ConfirmationBroker,
    ConversationContext, IntentClassifier, ProposedAction,
};
use crate::errors::AppResult;
use crate::schedule::{MoveOutcome, MutationRecord, ScheduleStore, WorkoutStats};
use crate::storage::{create_store, KeyValueStore};
use chrono::NaiveDate;
use pierre_core::models::{Exercise, Workout};
use pierre_intelligence::{
    ExerciseCatalog, GeneratedWorkout, InMemoryCatalog, WorkoutGenerator, WorkoutRequirement,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Entry point for every planner operation
pub struct WorkoutPlanner {
    config: PlannerConfig,
    schedule: Arc<ScheduleStore>,
    generator: Arc<WorkoutGenerator>,
    executor: ActionExecutor,
}

impl WorkoutPlanner {
    /// Build a planner from configuration with the built-in exercise library
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the store cannot be opened
    pub async fn from_config(config: PlannerConfig) -> AppResult<Self> {
        config.validate()?;
        let store = create_store(&config).await?;
        let catalog: Arc<dyn ExerciseCatalog> = Arc::new(InMemoryCatalog::with_default_library());
        Self::new(config, store, catalog).await
    }

    /// Build a planner over explicit collaborators
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be read
    pub async fn new(
        config: PlannerConfig,
        store: Arc<dyn KeyValueStore>,
        catalog: Arc<dyn ExerciseCatalog>,
    ) -> AppResult<Self> {
        let schedule = Arc::new(ScheduleStore::new(store));
        let generator = Arc::new(WorkoutGenerator::new(Arc::clone(&catalog)));
        let classifier = IntentClassifier::from_catalog(catalog.as_ref()).await?;
        let handlers = builtin_handlers(&schedule, &catalog);
        let broker = Arc::new(ConfirmationBroker::new(handlers, &config.confirmation));
        let executor = ActionExecutor::new(
            Arc::clone(&schedule),
            Arc::clone(&generator),
            classifier,
            broker,
            config.generation.clone(),
        );

        info!(
            config = %config.summary(),
            backend = schedule.backing_store().backend_name(),
            "Workout planner ready"
        );
        Ok(Self {
            config,
            schedule,
            generator,
            executor,
        })
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Schedule store
    #[must_use]
    pub const fn schedule(&self) -> &Arc<ScheduleStore> {
        &self.schedule
    }

    /// Workout generator
    #[must_use]
    pub const fn generator(&self) -> &Arc<WorkoutGenerator> {
        &self.generator
    }

    /// Confirmation broker
    #[must_use]
    pub const fn broker(&self) -> &Arc<ConfirmationBroker> {
        self.executor.broker()
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Workout on `date`, `None` for a rest day
    ///
    /// # Errors
    ///
    /// Returns an error if the schedule cannot be read
    pub async fn get_by_date(&self, date: NaiveDate) -> AppResult<Option<Workout>> {
        self.schedule.get_by_date(date).await
    }

    /// Workouts in `start..=end`, ordered by date
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` when `start > end`, or an error if the schedule cannot be read
    pub async fn get_range(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<Workout>> {
        self.schedule.get_range(start, end).await
    }

    /// Statistics over an optional date range
    ///
    /// # Errors
    ///
    /// Returns an error if the schedule cannot be read
    pub async fn get_workout_stats(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> AppResult<WorkoutStats> {
        self.schedule.get_workout_stats(start, end).await
    }

    /// Mutation history, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be read
    pub async fn history(&self) -> AppResult<Vec<MutationRecord>> {
        self.schedule.history().await
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Store `workout` on its date
    ///
    /// # Errors
    ///
    /// Returns an error if the schedule cannot be persisted
    pub async fn save(&self, workout: Workout) -> AppResult<Workout> {
        self.schedule.save(workout).await
    }

    /// Remove the workout on `date`
    ///
    /// # Errors
    ///
    /// Returns an error if the schedule cannot be persisted
    pub async fn delete(&self, date: NaiveDate) -> AppResult<Option<Workout>> {
        self.schedule.delete(date).await
    }

    /// Move the workout on `from` to `to`, swapping if `to` is occupied
    ///
    /// # Errors
    ///
    /// See [`ScheduleStore::move_workout`]
    pub async fn move_workout(&self, from: NaiveDate, to: NaiveDate) -> AppResult<MoveOutcome> {
        self.schedule.move_workout(from, to).await
    }

    /// Replace one exercise in the workout on `date`
    ///
    /// # Errors
    ///
    /// See [`ScheduleStore::replace_exercise`]
    pub async fn replace_exercise(
        &self,
        date: NaiveDate,
        exercise_id: &str,
        replacement: Exercise,
    ) -> AppResult<Workout> {
        self.schedule
            .replace_exercise(date, exercise_id, replacement)
            .await
    }

    /// Append an exercise to the workout on `date`
    ///
    /// # Errors
    ///
    /// See [`ScheduleStore::add_exercise`]
    pub async fn add_exercise(&self, date: NaiveDate, exercise: Exercise) -> AppResult<Workout> {
        self.schedule.add_exercise(date, exercise).await
    }

    /// Remove an exercise from the workout on `date`
    ///
    /// # Errors
    ///
    /// See [`ScheduleStore::remove_exercise`]
    pub async fn remove_exercise(&self, date: NaiveDate, exercise_id: &str) -> AppResult<Workout> {
        self.schedule.remove_exercise(date, exercise_id).await
    }

    /// Mark the workout on `date` completed
    ///
    /// # Errors
    ///
    /// See [`ScheduleStore::mark_completed`]
    pub async fn mark_completed(&self, date: NaiveDate, notes: Option<&str>) -> AppResult<Workout> {
        self.schedule.mark_completed(date, notes).await
    }

    /// Populate four weeks of default workouts if the schedule is empty
    ///
    /// # Errors
    ///
    /// Returns an error if the schedule cannot be read or persisted
    pub async fn initialize_default_schedule(&self, today: NaiveDate) -> AppResult<usize> {
        self.schedule.initialize_default_schedule(today).await
    }

    /// Revert the newest mutation
    ///
    /// # Errors
    ///
    /// Returns an error if the schedule cannot be persisted
    pub async fn undo_last(&self) -> AppResult<Option<MutationRecord>> {
        self.schedule.undo_last().await
    }

    /// Remove all workouts and history
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be cleared
    pub async fn clear_all(&self) -> AppResult<()> {
        self.schedule.clear_all().await
    }

    // ========================================================================
    // Generation and conversation
    // ========================================================================

    /// Generate a workout without saving it
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` for an out-of-range requirement
    pub async fn generate(
        &self,
        requirement: &WorkoutRequirement,
        date: NaiveDate,
    ) -> AppResult<GeneratedWorkout> {
        self.generator.generate(requirement, date).await
    }

    /// Classify a message into candidate actions
    #[must_use]
    pub fn classify(&self, ctx: &ConversationContext, message: &str) -> Vec<ClassifiedAction> {
        self.executor.classify(ctx, message)
    }

    /// Execute one classified action
    pub async fn execute(
        &self,
        ctx: &mut ConversationContext,
        action: &ClassifiedAction,
    ) -> ActionResult {
        self.executor.execute(ctx, action).await
    }

    /// Classify and execute the best action for `message`
    pub async fn handle_message(&self, ctx: &mut ConversationContext, message: &str) -> ActionResult {
        self.executor.handle_message(ctx, message).await
    }

    /// Resolve a pending proposal with the chosen option
    pub async fn resolve_confirmation(
        &self,
        ctx: &ConversationContext,
        proposal_id: &str,
        action_tag: &str,
        data: Value,
    ) -> ActionResult {
        self.executor
            .resolve_confirmation(ctx, proposal_id, action_tag, data)
            .await
    }

    /// Proposals pending for the session, oldest first
    #[must_use]
    pub fn pending_confirmations(&self, ctx: &ConversationContext) -> Vec<ProposedAction> {
        self.broker().pending_for_session(&ctx.session_id)
    }
}
