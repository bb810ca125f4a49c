// ABOUTME: Output formatting helpers for pierre-planner
// ABOUTME: Consistent display of workouts, statistics, action results and pending proposals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use pierre_workout_planner::{
    conversation::{ActionResult, ProposedAction},
    models::Workout,
    schedule::WorkoutStats,
};
use serde_json::Value;

/// Display a workout with its exercises
pub fn display_workout(workout: &Workout) {
    println!("\n{} ({})", workout.title, workout.date.format("%A %Y-%m-%d"));
    println!("{}", "=".repeat(60));
    println!(
        "   Type: {}   Level: {}   {} min   ~{} kcal{}",
        workout.workout_type.as_str(),
        workout.difficulty.as_str(),
        workout.duration_minutes,
        workout.calories,
        if workout.completed { "   Completed" } else { "" }
    );
    if !workout.description.is_empty() {
        println!("   {}", workout.description);
    }
    println!();
    for (i, exercise) in workout.exercises.iter().enumerate() {
        println!(
            "{:>2}. {:<28} {} x {:<6} rest {}s",
            i + 1,
            exercise.name,
            exercise.sets,
            exercise.reps.to_string(),
            exercise.rest_seconds
        );
    }
    if workout.exercises.is_empty() {
        println!("   (no exercises)");
    }
    if let Some(notes) = &workout.notes {
        println!("\nNotes: {notes}");
    }
}

/// Display a one-line summary for week views
pub fn display_workout_line(workout: &Workout) {
    println!(
        "{}  {:<24} {:>3} min {}",
        workout.date.format("%a %Y-%m-%d"),
        workout.title,
        workout.duration_minutes,
        if workout.completed { "done" } else { "" }
    );
}

/// Display a rest day
pub fn display_rest_day(date: NaiveDate) {
    println!("{} is a rest day.", date.format("%A %Y-%m-%d"));
}

/// Display schedule statistics
pub fn display_stats(stats: &WorkoutStats) {
    println!("Workouts:         {}", stats.total_workouts);
    println!(
        "Completed:        {} ({:.0}%)",
        stats.completed_workouts, stats.completion_rate_percent
    );
    println!("Total minutes:    {}", stats.total_duration);
    println!("Average minutes:  {:.1}", stats.average_duration);
    println!("Total calories:   {}", stats.total_calories);
    println!("Per week:         {:.1}", stats.weekly_average);
    for (workout_type, count) in &stats.counts_by_type {
        println!("  {:<14} {count}", workout_type.as_str());
    }
}

/// Display an action result, including any options awaiting confirmation
pub fn display_result(result: &ActionResult) {
    if result.success {
        println!("{}", result.message);
    } else {
        println!("Sorry: {}", result.message);
    }

    if let Some(proposal_id) = result.proposal_id() {
        if let Some(options) = result.data.get("options").and_then(Value::as_array) {
            for option in options {
                let label = option.get("label").and_then(Value::as_str).unwrap_or("");
                let tag = option
                    .get("action_tag")
                    .and_then(Value::as_str)
                    .unwrap_or("");
                println!("   [{label}]  /confirm {proposal_id} {tag}");
            }
        }
    }
}

/// Display pending proposals
pub fn display_pending(pending: &[ProposedAction]) {
    if pending.is_empty() {
        println!("No pending proposals.");
        return;
    }
    for proposal in pending {
        println!("{}  {}", proposal.id, proposal.prompt);
        for option in &proposal.options {
            println!("   [{}]  {}", option.label, option.action_tag);
        }
    }
}
