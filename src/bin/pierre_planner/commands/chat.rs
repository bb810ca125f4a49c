// ABOUTME: Interactive chat loop for pierre-planner
// ABOUTME: Sends each line to the planner and resolves proposals with /confirm <id> <tag>
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use pierre_workout_planner::{
    conversation::ConversationContext,
    errors::{AppError, AppResult},
    planner::WorkoutPlanner,
};
use serde_json::Value;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use uuid::Uuid;

use crate::helpers::display::{display_pending, display_result};

const HELP: &str = "Commands:
  /confirm <proposal-id> <option-tag>   resolve a pending proposal
  /pending                              list pending proposals
  /help                                 show this help
  /quit                                 leave the chat";

/// Run the chat loop until EOF or /quit
pub async fn run(planner: &WorkoutPlanner, today: NaiveDate) -> AppResult<()> {
    let mut ctx = ConversationContext::new(Uuid::new_v4().to_string(), today);
    let mut lines = BufReader::new(stdin()).lines();

    println!("Pierre planner chat. Ask about your workouts; /help for commands.");
    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| AppError::internal(format!("Failed to read input: {e}")))?
    {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut words = line.split_whitespace();
        match words.next() {
            Some("/quit" | "/exit") => break,
            Some("/help") => println!("{HELP}"),
            Some("/pending") => display_pending(&planner.pending_confirmations(&ctx)),
            Some("/confirm") => {
                let (Some(proposal_id), Some(tag)) = (words.next(), words.next()) else {
                    println!("Usage: /confirm <proposal-id> <option-tag>");
                    continue;
                };
                let result = planner
                    .resolve_confirmation(&ctx, proposal_id, tag, Value::Null)
                    .await;
                display_result(&result);
            }
            _ => {
                let result = planner.handle_message(&mut ctx, line).await;
                display_result(&result);
            }
        }
    }
    Ok(())
}
