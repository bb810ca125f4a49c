// ABOUTME: Action executor routing classified intents to the store, generator and confirmation broker
// ABOUTME: Queries and moves run directly; rest days, substitutions and new workouts become proposals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::confirmation::{ConfirmationBroker, ConfirmationOption, OptionStyle};
use super::context::ConversationContext;
use super::handlers::{ADD_WORKOUT, CONFIRM_REST_DAY, MODIFY_WORKOUT, SUBSTITUTE_EXERCISE};
use super::intent::{ClassifiedAction, IntentClassifier, IntentEntities};
use super::result::ActionResult;
use crate::config::GenerationDefaults;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::logging::PlannerLogger;
use crate::schedule::ScheduleStore;
use chrono::{Days, NaiveDate};
use pierre_core::models::{DifficultyLevel, Exercise, Workout};
use pierre_intelligence::{
    CatalogFilter, EquipmentProfile, ExerciseCatalog, WorkoutGenerator, WorkoutRequirement,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Focus used when a creation request names none
const DEFAULT_FOCUS: &str = "full body";

/// Routes classified actions and confirmation decisions
pub struct ActionExecutor {
    store: Arc<ScheduleStore>,
    generator: Arc<WorkoutGenerator>,
    classifier: IntentClassifier,
    broker: Arc<ConfirmationBroker>,
    defaults: GenerationDefaults,
}

impl ActionExecutor {
    /// Create an executor over the given collaborators
    #[must_use]
    pub const fn new(
        store: Arc<ScheduleStore>,
        generator: Arc<WorkoutGenerator>,
        classifier: IntentClassifier,
        broker: Arc<ConfirmationBroker>,
        defaults: GenerationDefaults,
    ) -> Self {
        Self {
            store,
            generator,
            classifier,
            broker,
            defaults,
        }
    }

    /// The confirmation broker proposals are stored in
    #[must_use]
    pub const fn broker(&self) -> &Arc<ConfirmationBroker> {
        &self.broker
    }

    fn catalog(&self) -> &Arc<dyn ExerciseCatalog> {
        self.generator.catalog()
    }

    /// Classify `message` into candidate actions
    #[must_use]
    pub fn classify(&self, ctx: &ConversationContext, message: &str) -> Vec<ClassifiedAction> {
        let actions = self.classifier.classify(message, ctx);
        let kinds: Vec<&str> = actions.iter().map(|a| a.kind.as_str()).collect();
        PlannerLogger::log_classification(&ctx.session_id, &kinds, message.len());
        actions
    }

    /// Classify `message` and execute the highest-confidence action
    ///
    /// Ties go to the earlier rule. A message matching no rule yields an
    /// "unrecognized" result.
    pub async fn handle_message(
        &self,
        ctx: &mut ConversationContext,
        message: &str,
    ) -> ActionResult {
        let actions = self.classify(ctx, message);
        let mut best: Option<&ClassifiedAction> = None;
        for action in &actions {
            if best.map_or(true, |b| action.confidence > b.confidence) {
                best = Some(action);
            }
        }
        match best {
            Some(action) => self.execute(ctx, action).await,
            None => ActionResult::unrecognized(),
        }
    }

    /// Execute one classified action
    ///
    /// Failures, including store errors, come back as failed results carrying
    /// the error kind.
    pub async fn execute(
        &self,
        ctx: &mut ConversationContext,
        action: &ClassifiedAction,
    ) -> ActionResult {
        let started = Instant::now();
        let result = match self.try_execute(ctx, action).await {
            Ok(result) => {
                if let Some(date) = action.entities.primary_date() {
                    ctx.remember_date(date);
                }
                result
            }
            Err(error) => ActionResult::from_error(&error),
        };
        PlannerLogger::log_action(
            action.kind.as_str(),
            result.success,
            started.elapsed().as_millis() as u64,
        );
        result
    }

    async fn try_execute(
        &self,
        ctx: &ConversationContext,
        action: &ClassifiedAction,
    ) -> AppResult<ActionResult> {
        match &action.entities {
            IntentEntities::WorkoutQuery { date } => self.query_workout(*date).await,
            IntentEntities::RestDay { date } => self.propose_rest_day(ctx, *date).await,
            IntentEntities::Substitution {
                date,
                exercise_id,
                exercise_query,
                reason,
            } => {
                self.propose_substitution(
                    ctx,
                    *date,
                    exercise_id.as_deref(),
                    exercise_query.as_deref(),
                    reason.as_deref(),
                )
                .await
            }
            IntentEntities::Creation {
                date,
                duration_minutes,
                focus,
                equipment,
                level,
            } => {
                let requirement = self.requirement_for(*duration_minutes, focus.as_deref(), *equipment, *level);
                self.propose_generated(ctx, *date, &requirement).await
            }
            IntentEntities::Move { from, to } => self.move_workout(*from, *to).await,
        }
    }

    /// Resolve a pending proposal for this session
    ///
    /// Unknown, foreign or expired proposals come back as failed results.
    pub async fn resolve_confirmation(
        &self,
        ctx: &ConversationContext,
        proposal_id: &str,
        action_tag: &str,
        data: Value,
    ) -> ActionResult {
        match self.broker.resolve(ctx, proposal_id, action_tag, data).await {
            Ok(outcome) => outcome.result,
            Err(error) => ActionResult::from_error(&error),
        }
    }

    async fn query_workout(&self, date: NaiveDate) -> AppResult<ActionResult> {
        let result = match self.store.get_by_date(date).await? {
            Some(workout) => ActionResult::ok(format!(
                "{date}: {} ({} exercises, {} min, ~{} kcal){}",
                workout.title,
                workout.exercises.len(),
                workout.duration_minutes,
                workout.calories,
                if workout.completed { " - completed" } else { "" }
            ))
            .with_data(json!({ "date": date, "workout": workout }))
            .with_hints(json!({ "view": "workout_card" })),
            None => ActionResult::ok(format!("{date} is a rest day. Nothing scheduled."))
                .with_data(json!({ "date": date, "rest_day": true }))
                .with_hints(json!({ "view": "rest_day" })),
        };
        Ok(result)
    }

    async fn propose_rest_day(
        &self,
        ctx: &ConversationContext,
        date: NaiveDate,
    ) -> AppResult<ActionResult> {
        let Some(workout) = self.store.get_by_date(date).await? else {
            return Ok(ActionResult::ok(format!("{date} is already a rest day."))
                .with_data(json!({ "date": date, "rest_day": true }))
                .with_hints(json!({ "view": "rest_day" })));
        };

        let prompt = format!(
            "Make {date} a rest day? This removes {} from your schedule.",
            workout.title
        );
        let options = vec![
            ConfirmationOption::new("Yes, rest day", CONFIRM_REST_DAY, OptionStyle::Destructive)
                .with_data(json!({ "date": date })),
            ConfirmationOption::cancel(),
        ];
        let context = json!({ "date": date, "workout_title": workout.title });
        self.proposal_result(ctx, prompt, options, context)
    }

    async fn propose_substitution(
        &self,
        ctx: &ConversationContext,
        date: NaiveDate,
        exercise_id: Option<&str>,
        exercise_query: Option<&str>,
        reason: Option<&str>,
    ) -> AppResult<ActionResult> {
        let workout = self.store.get_by_date(date).await?.ok_or_else(|| {
            AppError::not_found(format!("Workout on {date}")).with_resource_id(date.to_string())
        })?;

        let Some(target) = self
            .locate_exercise(&workout, exercise_id, exercise_query)
            .await?
        else {
            let names = workout.exercise_names();
            let message = if names.is_empty() {
                format!("Your {date} workout has no exercises to swap.")
            } else {
                format!(
                    "I couldn't find that exercise on {date}. Current exercises: {}.",
                    names.join(", ")
                )
            };
            return Ok(ActionResult::failure(message, ErrorCode::ResourceNotFound)
                .with_data(json!({ "date": date, "exercises": names })));
        };

        let alternatives = self.find_alternatives(&workout, &target, reason).await?;
        if alternatives.is_empty() {
            return Ok(ActionResult::failure(
                format!("I couldn't find an alternative to {}.", target.name),
                ErrorCode::ResourceNotFound,
            )
            .with_data(json!({ "date": date, "exercise_id": target.id })));
        }

        let mut options: Vec<ConfirmationOption> = alternatives
            .iter()
            .enumerate()
            .map(|(i, alternative)| {
                let style = if i == 0 {
                    OptionStyle::Primary
                } else {
                    OptionStyle::Secondary
                };
                ConfirmationOption::new(
                    alternative.name.clone(),
                    format!("{SUBSTITUTE_EXERCISE}:{}", alternative.id),
                    style,
                )
            })
            .collect();
        options.push(ConfirmationOption::cancel());

        let prompt = reason.map_or_else(
            || format!("Swap {} on {date} for one of these?", target.name),
            |reason| {
                format!(
                    "Swap {} on {date} for one of these (noted: {reason})?",
                    target.name
                )
            },
        );
        let context = json!({
            "date": date,
            "exercise_id": target.id,
            "exercise_name": target.name,
            "reason": reason,
        });
        self.proposal_result(ctx, prompt, options, context)
    }

    /// Find the workout exercise a message refers to
    ///
    /// Tries the indexed catalog id, then the raw phrase (and its singular),
    /// then the last word of the indexed exercise's name.
    async fn locate_exercise(
        &self,
        workout: &Workout,
        exercise_id: Option<&str>,
        exercise_query: Option<&str>,
    ) -> AppResult<Option<Exercise>> {
        if let Some(position) = exercise_id.and_then(|id| workout.exercise_position(id)) {
            return Ok(workout.exercises.get(position).cloned());
        }

        let mut fragments: Vec<String> = Vec::new();
        if let Some(query) = exercise_query {
            fragments.push(query.to_owned());
            for suffix in ["es", "s"] {
                if let Some(singular) = query.strip_suffix(suffix) {
                    fragments.push(singular.to_owned());
                }
            }
        }
        if let Some(id) = exercise_id {
            if let Some(exercise) = self.catalog().get_by_id(id).await? {
                if let Some(last) = exercise.name.split_whitespace().last() {
                    fragments.push(last.to_owned());
                }
            }
        }

        Ok(fragments
            .iter()
            .find_map(|fragment| workout.find_exercise_by_name(fragment))
            .cloned())
    }

    /// Catalog exercises working the same muscles, not already in the workout
    async fn find_alternatives(
        &self,
        workout: &Workout,
        target: &Exercise,
        reason: Option<&str>,
    ) -> AppResult<Vec<Exercise>> {
        let limit = self.defaults.substitution_alternatives.max(1);
        let exclude_injury: Vec<String> = reason.map(str::to_owned).into_iter().collect();
        let mut filter = CatalogFilter {
            muscle_groups: target.muscle_groups.clone(),
            category: Some(target.category),
            exclude_injury,
            ..CatalogFilter::default()
        };

        let usable = |pool: Vec<Exercise>| -> Vec<Exercise> {
            pool.into_iter()
                .filter(|e| e.id != target.id && workout.exercise_position(&e.id).is_none())
                .collect()
        };

        let mut candidates = usable(self.catalog().search("", &filter).await?);
        if candidates.is_empty() {
            debug!(exercise = %target.id, "Relaxing category for substitution");
            filter.category = None;
            candidates = usable(self.catalog().search("", &filter).await?);
        }

        // Easier movements first when the athlete gave a reason
        if reason.is_some() {
            candidates.sort_by_key(|e| e.difficulty);
        }
        candidates.truncate(limit);
        Ok(candidates)
    }

    fn requirement_for(
        &self,
        duration_minutes: Option<u32>,
        focus: Option<&str>,
        equipment: Option<EquipmentProfile>,
        level: Option<DifficultyLevel>,
    ) -> WorkoutRequirement {
        WorkoutRequirement::new(
            duration_minutes.unwrap_or(self.defaults.workout_minutes),
            focus.unwrap_or(DEFAULT_FOCUS),
            equipment.unwrap_or(self.defaults.equipment),
            level.unwrap_or(self.defaults.experience),
        )
    }

    async fn propose_generated(
        &self,
        ctx: &ConversationContext,
        date: NaiveDate,
        requirement: &WorkoutRequirement,
    ) -> AppResult<ActionResult> {
        let generated = self.generator.generate(requirement, date).await?;
        let workout = &generated.workout;
        let tomorrow = ctx
            .today
            .checked_add_days(Days::new(1))
            .ok_or_else(|| AppError::invalid_input("Date out of range"))?;

        let prompt = format!(
            "Here's {}: {} exercises, {} min, ~{} kcal. Add it to your schedule?",
            workout.title,
            workout.exercises.len(),
            workout.duration_minutes,
            workout.calories
        );
        let options = vec![
            ConfirmationOption::new(
                "Add for today",
                format!("{ADD_WORKOUT}:today"),
                OptionStyle::Primary,
            )
            .with_data(json!({ "date": ctx.today })),
            ConfirmationOption::new(
                "Add for tomorrow",
                format!("{ADD_WORKOUT}:tomorrow"),
                OptionStyle::Secondary,
            )
            .with_data(json!({ "date": tomorrow })),
            ConfirmationOption::new("Modify", MODIFY_WORKOUT, OptionStyle::Secondary),
            ConfirmationOption::cancel(),
        ];
        let context = json!({
            "date": date,
            "workout": workout,
            "template": generated.template_name,
            "synthesized": generated.synthesized,
            "warnings": generated.warnings,
        });
        self.proposal_result(ctx, prompt, options, context)
    }

    async fn move_workout(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> AppResult<ActionResult> {
        let (Some(from), Some(to)) = (from, to) else {
            return Err(AppError::invalid_input(
                "Tell me which day to move the workout to",
            ));
        };
        let outcome = self.store.move_workout(from, to).await?;
        let message = outcome.swapped.as_ref().map_or_else(
            || format!("Moved {} from {from} to {to}.", outcome.moved.title),
            |swapped| {
                format!(
                    "Swapped {} ({from}) with {} ({to}). {} is now on {to} and {} on {from}.",
                    outcome.moved.title, swapped.title, outcome.moved.title, swapped.title
                )
            },
        );
        Ok(ActionResult::ok(message)
            .with_data(json!({
                "from": from,
                "to": to,
                "swapped": outcome.is_swap(),
                "moved": outcome.moved,
                "displaced": outcome.swapped,
            }))
            .with_hints(json!({ "view": "schedule", "refresh": ["schedule"] })))
    }

    fn proposal_result(
        &self,
        ctx: &ConversationContext,
        prompt: String,
        options: Vec<ConfirmationOption>,
        context: Value,
    ) -> AppResult<ActionResult> {
        let proposal = self
            .broker
            .propose(&ctx.session_id, prompt, options, context, None)?;
        let mut data = proposal.to_json();
        if let (Value::Object(data), Value::Object(extra)) = (&mut data, &proposal.context) {
            for (key, value) in extra {
                data.entry(key.clone()).or_insert_with(|| value.clone());
            }
        }
        Ok(ActionResult::ok(proposal.prompt.clone())
            .with_data(data)
            .with_hints(json!({ "view": "confirmation" })))
    }
}
