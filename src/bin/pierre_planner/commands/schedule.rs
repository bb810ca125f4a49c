// ABOUTME: Schedule commands for pierre-planner
// ABOUTME: Handles init, show, week, stats and undo against the planner facade
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{Days, NaiveDate};
use pierre_workout_planner::{errors::AppResult, planner::WorkoutPlanner, schedule::week_start};
use tracing::info;

use crate::helpers::display::{display_rest_day, display_stats, display_workout, display_workout_line};

/// Bootstrap the default schedule
pub async fn init(planner: &WorkoutPlanner, today: NaiveDate) -> AppResult<()> {
    let created = planner.initialize_default_schedule(today).await?;
    if created == 0 {
        println!("Schedule already has workouts; nothing to do.");
    } else {
        info!(created, "Default schedule created");
        println!(
            "Created {created} workouts starting the week of {}.",
            week_start(today)
        );
    }
    Ok(())
}

/// Print the workout on `date`
pub async fn show(planner: &WorkoutPlanner, date: NaiveDate) -> AppResult<()> {
    match planner.get_by_date(date).await? {
        Some(workout) => display_workout(&workout),
        None => display_rest_day(date),
    }
    Ok(())
}

/// Print the Monday-to-Sunday week containing `date`
pub async fn week(planner: &WorkoutPlanner, date: NaiveDate) -> AppResult<()> {
    let start = week_start(date);
    let end = start.checked_add_days(Days::new(6)).unwrap_or(start);
    let workouts = planner.get_range(start, end).await?;

    println!("Week of {start}");
    println!("{}", "=".repeat(60));
    for day in start.iter_days().take(7) {
        match workouts.iter().find(|w| w.date == day) {
            Some(workout) => display_workout_line(workout),
            None => println!("{}  Rest day", day.format("%a %Y-%m-%d")),
        }
    }
    Ok(())
}

/// Print statistics for an optional range
pub async fn stats(
    planner: &WorkoutPlanner,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> AppResult<()> {
    let stats = planner.get_workout_stats(start, end).await?;
    display_stats(&stats);
    Ok(())
}

/// Revert the newest mutation
pub async fn undo(planner: &WorkoutPlanner) -> AppResult<()> {
    match planner.undo_last().await? {
        Some(record) => println!("Undid: {}", record.summary),
        None => println!("Nothing to undo."),
    }
    Ok(())
}
