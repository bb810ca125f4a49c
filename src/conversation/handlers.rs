// ABOUTME: Built-in confirmation handlers applying rest days, substitutions and generated workouts
// ABOUTME: Each handler answers one option action and writes through the schedule store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::confirmation::{ConfirmationHandler, ConfirmationRequest, HandlerRegistry, CANCEL_TAG};
use super::result::ActionResult;
use crate::errors::{AppError, AppResult};
use crate::schedule::ScheduleStore;
use async_trait::async_trait;
use chrono::NaiveDate;
use pierre_core::models::Workout;
use pierre_intelligence::ExerciseCatalog;
use serde_json::{json, Value};
use std::sync::Arc;

/// Confirms a rest day by deleting the workout on `date`
pub const CONFIRM_REST_DAY: &str = "confirm_rest_day";
/// Swaps an exercise for the catalog exercise named in the tag variant
pub const SUBSTITUTE_EXERCISE: &str = "substitute_exercise";
/// Saves the proposed generated workout on the option's `date`
pub const ADD_WORKOUT: &str = "add_workout";
/// Hands the proposed workout back for editing
pub const MODIFY_WORKOUT: &str = "modify_workout";

fn date_field(request: &ConfirmationRequest<'_>, key: &str) -> AppResult<NaiveDate> {
    let raw = request
        .field(key)
        .ok_or_else(|| AppError::invalid_input(format!("Confirmation is missing '{key}'")))?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| AppError::invalid_input(format!("Invalid date '{raw}': {e}")))
}

/// Deletes the workout on the proposal's date
pub struct ConfirmRestDayHandler {
    store: Arc<ScheduleStore>,
}

impl ConfirmRestDayHandler {
    /// Create the handler
    #[must_use]
    pub const fn new(store: Arc<ScheduleStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ConfirmationHandler for ConfirmRestDayHandler {
    fn action(&self) -> &'static str {
        CONFIRM_REST_DAY
    }

    async fn handle(&self, request: &ConfirmationRequest<'_>) -> AppResult<ActionResult> {
        let date = date_field(request, "date")?;
        let removed = self.store.delete(date).await?;
        let message = removed.as_ref().map_or_else(
            || format!("{date} was already a rest day."),
            |workout| format!("Done. {} is off your schedule; enjoy the rest on {date}.", workout.title),
        );
        Ok(ActionResult::ok(message)
            .with_data(json!({
                "date": date,
                "rest_day": true,
                "removed": removed.map(|w| w.title),
            }))
            .with_hints(json!({ "view": "rest_day", "refresh": ["schedule"] })))
    }
}

/// Dismisses a proposal without changes
pub struct CancelHandler;

#[async_trait]
impl ConfirmationHandler for CancelHandler {
    fn action(&self) -> &'static str {
        CANCEL_TAG
    }

    async fn handle(&self, request: &ConfirmationRequest<'_>) -> AppResult<ActionResult> {
        Ok(ActionResult::ok("No problem, nothing was changed.")
            .with_data(json!({ "cancelled": request.proposal.id }))
            .with_hints(json!({ "dismiss": true })))
    }
}

/// Replaces an exercise with the alternative named in the option tag
pub struct SubstituteExerciseHandler {
    store: Arc<ScheduleStore>,
    catalog: Arc<dyn ExerciseCatalog>,
}

impl SubstituteExerciseHandler {
    /// Create the handler
    #[must_use]
    pub fn new(store: Arc<ScheduleStore>, catalog: Arc<dyn ExerciseCatalog>) -> Self {
        Self { store, catalog }
    }
}

#[async_trait]
impl ConfirmationHandler for SubstituteExerciseHandler {
    fn action(&self) -> &'static str {
        SUBSTITUTE_EXERCISE
    }

    async fn handle(&self, request: &ConfirmationRequest<'_>) -> AppResult<ActionResult> {
        let date = date_field(request, "date")?;
        let exercise_id = request
            .field("exercise_id")
            .ok_or_else(|| AppError::invalid_input("Confirmation is missing 'exercise_id'"))?;
        let replacement_id = request
            .option
            .variant()
            .or_else(|| request.field("replacement_id"))
            .ok_or_else(|| AppError::invalid_input("No replacement exercise was chosen"))?;

        let replacement = self
            .catalog
            .get_by_id(replacement_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Exercise {replacement_id}"))
                    .with_resource_id(replacement_id)
            })?;
        let replacement_name = replacement.name.clone();
        let workout = self
            .store
            .replace_exercise(date, exercise_id, replacement)
            .await?;

        Ok(
            ActionResult::ok(format!("Swapped in {replacement_name} for {date}."))
                .with_data(json!({ "date": date, "workout": workout }))
                .with_hints(json!({ "view": "workout_card", "highlight": replacement_id })),
        )
    }
}

/// Saves the generated workout carried in the proposal context
pub struct AddWorkoutHandler {
    store: Arc<ScheduleStore>,
}

impl AddWorkoutHandler {
    /// Create the handler
    #[must_use]
    pub const fn new(store: Arc<ScheduleStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ConfirmationHandler for AddWorkoutHandler {
    fn action(&self) -> &'static str {
        ADD_WORKOUT
    }

    async fn handle(&self, request: &ConfirmationRequest<'_>) -> AppResult<ActionResult> {
        let date = date_field(request, "date")?;
        let proposed = request
            .proposal
            .context
            .get("workout")
            .cloned()
            .ok_or_else(|| AppError::invalid_input("Proposal carries no workout"))?;
        let mut workout: Workout = serde_json::from_value(proposed)?;
        workout.date = date;

        let replaced = self.store.get_by_date(date).await?.map(|w| w.title);
        let saved = self.store.save(workout).await?;
        let message = replaced.as_ref().map_or_else(
            || format!("Added {} to {date}.", saved.title),
            |previous| format!("Added {} to {date}, replacing {previous}.", saved.title),
        );
        Ok(ActionResult::ok(message)
            .with_data(json!({ "date": date, "workout": saved, "replaced": replaced }))
            .with_hints(json!({ "view": "workout_card", "refresh": ["schedule"] })))
    }
}

/// Returns the proposed workout to the UI for editing
pub struct ModifyWorkoutHandler;

#[async_trait]
impl ConfirmationHandler for ModifyWorkoutHandler {
    fn action(&self) -> &'static str {
        MODIFY_WORKOUT
    }

    async fn handle(&self, request: &ConfirmationRequest<'_>) -> AppResult<ActionResult> {
        let workout = request
            .proposal
            .context
            .get("workout")
            .cloned()
            .unwrap_or(Value::Null);
        Ok(ActionResult::ok(
            "Tell me what to change: duration, focus, equipment or level.",
        )
        .with_data(json!({ "workout": workout }))
        .with_hints(json!({ "view": "workout_editor" })))
    }
}

/// Registry holding every built-in handler
#[must_use]
pub fn builtin_handlers(
    store: &Arc<ScheduleStore>,
    catalog: &Arc<dyn ExerciseCatalog>,
) -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    registry.register(Arc::new(ConfirmRestDayHandler::new(Arc::clone(store))));
    registry.register(Arc::new(CancelHandler));
    registry.register(Arc::new(SubstituteExerciseHandler::new(
        Arc::clone(store),
        Arc::clone(catalog),
    )));
    registry.register(Arc::new(AddWorkoutHandler::new(Arc::clone(store))));
    registry.register(Arc::new(ModifyWorkoutHandler));
    registry
}
