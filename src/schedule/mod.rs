// ABOUTME: Date-keyed persistent schedule of workouts with move/swap and undo history
// ABOUTME: Serializes every read-modify-write behind a single-writer lock
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Schedule Store
//!
//! The schedule is a map from calendar date to at most one [`Workout`]. A date
//! with no entry is an implicit rest day.
//!
//! Every mutation loads the map, changes it in memory and writes it back while
//! holding the store's write lock, so two mutations can never interleave and
//! drop an update. The schedule key is the commit point: if writing it fails
//! the persisted state is unchanged and the call can be retried. The mutation
//! record is appended afterwards on a best-effort basis.

/// Default schedule bootstrap table
pub mod defaults;
/// Mutation records and undo snapshots
pub mod history;
/// Aggregate statistics
pub mod stats;

pub use defaults::week_start;
pub use history::{DateSnapshot, MutationKind, MutationRecord, ScheduleMap};
pub use stats::WorkoutStats;

use crate::errors::{AppError, AppResult};
use crate::logging::PlannerLogger;
use crate::storage::{get_json, set_json, KeyValueStore};
use chrono::NaiveDate;
use history::push_bounded;
use pierre_core::constants::storage_keys::{WORKOUT_HISTORY, WORKOUT_SCHEDULE};
use pierre_core::models::{Exercise, Workout};
use serde::{Deserialize, Serialize};
use std::mem;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Result of moving a workout between dates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// The moved workout, now on the destination date
    pub moved: Workout,
    /// The workout that occupied the destination, now on the source date
    pub swapped: Option<Workout>,
}

impl MoveOutcome {
    /// True when the destination was occupied and the entries were swapped
    #[must_use]
    pub const fn is_swap(&self) -> bool {
        self.swapped.is_some()
    }
}

/// Date-keyed persistent workout schedule
pub struct ScheduleStore {
    store: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl ScheduleStore {
    /// Create a schedule over `store`
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// The underlying key-value store
    #[must_use]
    pub fn backing_store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    async fn load(&self) -> AppResult<ScheduleMap> {
        Ok(get_json(self.store.as_ref(), WORKOUT_SCHEDULE)
            .await?
            .unwrap_or_default())
    }

    async fn load_history(&self) -> AppResult<Vec<MutationRecord>> {
        Ok(get_json(self.store.as_ref(), WORKOUT_HISTORY)
            .await?
            .unwrap_or_default())
    }

    /// Persist `schedule`, then append `record` to the history
    ///
    /// Callers must hold the write lock.
    async fn commit(&self, schedule: &ScheduleMap, record: MutationRecord) -> AppResult<()> {
        if let Err(e) = set_json(self.store.as_ref(), WORKOUT_SCHEDULE, schedule).await {
            PlannerLogger::log_mutation_failure(record.kind.as_str(), &e.to_string());
            return Err(e);
        }

        let dates: Vec<String> = record.dates().iter().map(ToString::to_string).collect();
        PlannerLogger::log_mutation(record.kind.as_str(), &dates, &record.summary);

        let appended = async {
            let mut history = self.load_history().await?;
            push_bounded(&mut history, record);
            set_json(self.store.as_ref(), WORKOUT_HISTORY, &history).await
        };
        if let Err(e) = appended.await {
            warn!(error = %e, "Schedule committed but mutation history was not updated");
        }
        Ok(())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Workout on `date`, or `None` for a rest day
    ///
    /// # Errors
    ///
    /// Returns an error if the schedule cannot be read
    pub async fn get_by_date(&self, date: NaiveDate) -> AppResult<Option<Workout>> {
        Ok(self.load().await?.remove(&date))
    }

    /// Workouts from `start` to `end` inclusive, ascending by date
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` when `start` is after `end`, or an error if the
    /// schedule cannot be read
    pub async fn get_range(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<Workout>> {
        if start > end {
            return Err(AppError::invalid_input(format!(
                "Range start {start} is after end {end}"
            )));
        }
        Ok(self
            .load()
            .await?
            .range(start..=end)
            .map(|(_, workout)| workout.clone())
            .collect())
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
        let schedule = self.load().await?;
        let workouts: Vec<Workout> = schedule
            .into_values()
            .filter(|w| start.map_or(true, |s| w.date >= s) && end.map_or(true, |e| w.date <= e))
            .collect();
        Ok(WorkoutStats::compute(&workouts, start, end))
    }

    /// Mutation records, newest last
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be read
    pub async fn history(&self) -> AppResult<Vec<MutationRecord>> {
        self.load_history().await
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Upsert `workout` at its date, overwriting any existing entry
    ///
    /// # Errors
    ///
    /// Returns an error if the schedule cannot be persisted
    pub async fn save(&self, mut workout: Workout) -> AppResult<Workout> {
        let _guard = self.write_lock.lock().await;
        let mut schedule = self.load().await?;

        let record = MutationRecord::capture(
            MutationKind::Save,
            format!("Saved '{}' on {}", workout.title, workout.date),
            &schedule,
            &[workout.date],
        );
        workout.touch();
        schedule.insert(workout.date, workout.clone());

        self.commit(&schedule, record).await?;
        Ok(workout)
    }

    /// Remove the workout on `date`, returning it
    ///
    /// Deleting a rest day changes nothing but is still recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if the schedule cannot be persisted
    pub async fn delete(&self, date: NaiveDate) -> AppResult<Option<Workout>> {
        let _guard = self.write_lock.lock().await;
        let mut schedule = self.load().await?;

        let record = MutationRecord::capture(
            MutationKind::Delete,
            format!("Cleared {date}"),
            &schedule,
            &[date],
        );
        let removed = schedule.remove(&date);
        if removed.is_none() {
            debug!(date = %date, "Delete of rest day recorded as a no-op");
        }

        self.commit(&schedule, record).await?;
        Ok(removed)
    }

    /// Move the workout on `from` to `to`, swapping if `to` is occupied
    ///
    /// Both entries keep an original-date marker so the swap can be explained
    /// later; no workout is ever overwritten.
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` for identical dates, `RESOURCE_NOT_FOUND` when
    /// `from` is empty, or an error if the schedule cannot be persisted
    pub async fn move_workout(&self, from: NaiveDate, to: NaiveDate) -> AppResult<MoveOutcome> {
        if from == to {
            return Err(AppError::invalid_input(format!(
                "Cannot move a workout onto its own date {from}"
            )));
        }

        let _guard = self.write_lock.lock().await;
        let mut schedule = self.load().await?;

        let record = MutationRecord::capture(
            MutationKind::Move,
            format!("Moved {from} to {to}"),
            &schedule,
            &[from, to],
        );

        let mut moved = schedule
            .remove(&from)
            .ok_or_else(|| AppError::not_found(format!("Workout on {from}")))?;
        let swapped = schedule.remove(&to).map(|mut other| {
            other.original_date = other.original_date.or(Some(to));
            other.date = from;
            other.touch();
            other
        });

        moved.original_date = moved.original_date.or(Some(from));
        moved.date = to;
        moved.touch();

        schedule.insert(to, moved.clone());
        if let Some(other) = &swapped {
            schedule.insert(from, other.clone());
        }

        self.commit(&schedule, record).await?;
        Ok(MoveOutcome { moved, swapped })
    }

    /// Substitute the exercise `exercise_id` on `date` with `replacement`
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` when `date` is a rest day,
    /// `INVALID_MUTATION` when the exercise is not in that workout, or an
    /// error if the schedule cannot be persisted
    pub async fn replace_exercise(
        &self,
        date: NaiveDate,
        exercise_id: &str,
        replacement: Exercise,
    ) -> AppResult<Workout> {
        self.mutate_workout(date, MutationKind::Replace, |workout| {
            let position = workout.exercise_position(exercise_id).ok_or_else(|| {
                AppError::invalid_mutation(format!(
                    "Exercise {exercise_id} is not part of the workout on {date}"
                ))
                .with_resource_id(exercise_id)
            })?;
            let previous = mem::replace(&mut workout.exercises[position], replacement);
            Ok(format!(
                "Replaced {} with {} on {date}",
                previous.name, workout.exercises[position].name
            ))
        })
        .await
    }

    /// Append `exercise` to the workout on `date`
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` when `date` is a rest day, or an error if
    /// the schedule cannot be persisted
    pub async fn add_exercise(&self, date: NaiveDate, exercise: Exercise) -> AppResult<Workout> {
        self.mutate_workout(date, MutationKind::AddExercise, |workout| {
            let summary = format!("Added {} on {date}", exercise.name);
            workout.exercises.push(exercise);
            Ok(summary)
        })
        .await
    }

    /// Remove the exercise `exercise_id` from the workout on `date`
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` when `date` is a rest day or the exercise
    /// is not in that workout, or an error if the schedule cannot be persisted
    pub async fn remove_exercise(&self, date: NaiveDate, exercise_id: &str) -> AppResult<Workout> {
        self.mutate_workout(date, MutationKind::RemoveExercise, |workout| {
            let position = workout.exercise_position(exercise_id).ok_or_else(|| {
                AppError::not_found(format!("Exercise {exercise_id} on {date}"))
                    .with_resource_id(exercise_id)
            })?;
            let removed = workout.exercises.remove(position);
            Ok(format!("Removed {} on {date}", removed.name))
        })
        .await
    }

    /// Mark the workout on `date` completed, appending `notes`
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` when `date` is a rest day, or an error if
    /// the schedule cannot be persisted
    pub async fn mark_completed(&self, date: NaiveDate, notes: Option<&str>) -> AppResult<Workout> {
        let _guard = self.write_lock.lock().await;
        let mut schedule = self.load().await?;

        let record = MutationRecord::capture(
            MutationKind::Complete,
            format!("Completed workout on {date}"),
            &schedule,
            &[date],
        );
        let workout = schedule
            .get_mut(&date)
            .ok_or_else(|| AppError::not_found(format!("Workout on {date}")))?;

        workout.completed = true;
        if let Some(notes) = notes.map(str::trim).filter(|n| !n.is_empty()) {
            workout.notes = Some(match workout.notes.take() {
                Some(existing) if !existing.is_empty() => format!("{existing}\n{notes}"),
                _ => notes.to_owned(),
            });
        }
        workout.touch();
        let updated = workout.clone();

        self.commit(&schedule, record).await?;
        Ok(updated)
    }

    /// Apply an exercise-list edit to the workout on `date` and recompute totals
    async fn mutate_workout<F>(
        &self,
        date: NaiveDate,
        kind: MutationKind,
        edit: F,
    ) -> AppResult<Workout>
    where
        F: FnOnce(&mut Workout) -> AppResult<String> + Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut schedule = self.load().await?;

        let snapshot = MutationRecord::capture(kind, String::new(), &schedule, &[date]);
        let workout = schedule
            .get_mut(&date)
            .ok_or_else(|| AppError::not_found(format!("Workout on {date}")))?;

        let summary = edit(workout)?;
        workout.recompute_totals();
        workout.touch();
        let updated = workout.clone();

        let record = MutationRecord {
            summary,
            ..snapshot
        };
        self.commit(&schedule, record).await?;
        Ok(updated)
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Seed four weeks of default workouts if the schedule is empty
    ///
    /// Returns the number of workouts created; an existing schedule is never
    /// touched. Bootstrap writes no history.
    ///
    /// # Errors
    ///
    /// Returns an error if the schedule cannot be read or persisted
    pub async fn initialize_default_schedule(&self, today: NaiveDate) -> AppResult<usize> {
        let _guard = self.write_lock.lock().await;
        if !self.load().await?.is_empty() {
            debug!("Schedule already populated, skipping bootstrap");
            return Ok(0);
        }

        let schedule = defaults::default_schedule(today);
        set_json(self.store.as_ref(), WORKOUT_SCHEDULE, &schedule).await?;
        info!(
            workouts = schedule.len(),
            week_start = %week_start(today),
            "Initialized default schedule"
        );
        Ok(schedule.len())
    }

    /// Revert the newest mutation, returning its record
    ///
    /// # Errors
    ///
    /// Returns an error if the schedule or history cannot be persisted
    pub async fn undo_last(&self) -> AppResult<Option<MutationRecord>> {
        let _guard = self.write_lock.lock().await;
        let mut history = self.load_history().await?;
        let Some(record) = history.pop() else {
            return Ok(None);
        };

        let mut schedule = self.load().await?;
        record.restore_into(&mut schedule);
        set_json(self.store.as_ref(), WORKOUT_SCHEDULE, &schedule).await?;

        if let Err(e) = set_json(self.store.as_ref(), WORKOUT_HISTORY, &history).await {
            warn!(error = %e, record = %record.id, "Undo applied but history was not trimmed");
        }
        info!(kind = %record.kind, summary = %record.summary, "Undid schedule mutation");
        Ok(Some(record))
    }

    /// Remove the schedule and its history
    ///
    /// # Errors
    ///
    /// Returns an error if the keys cannot be removed
    pub async fn clear_all(&self) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        self.store
            .remove_many(&[WORKOUT_SCHEDULE, WORKOUT_HISTORY])
            .await?;
        info!("Cleared schedule and mutation history");
        Ok(())
    }
}
