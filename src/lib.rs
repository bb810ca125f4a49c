// ABOUTME: Main library entry point for the Pierre workout planner
// ABOUTME: Workout schedule store, conversational actions with confirmations, and workout generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// Crate-level attributes:
// - deny(unsafe_code): Zero-tolerance unsafe policy
#![deny(unsafe_code)]

//! # Pierre Workout Planner
//!
//! Plans, stores and edits a personal workout calendar, and turns chat
//! messages into schedule actions.
//!
//! ## Features
//!
//! - **Schedule store**: one workout per date, move/swap, exercise edits, undo
//! - **Workout generation**: template scoring over an exercise catalog
//!   (provided by the `pierre-intelligence` crate)
//! - **Conversation**: rule-based intent classification, with destructive or
//!   generative actions gated behind session-scoped confirmations
//!
//! ## Architecture
//!
//! - **Storage**: pluggable key-value persistence (file or memory)
//! - **Schedule**: date-keyed workouts, statistics and mutation history
//! - **Conversation**: classifier, confirmation broker, handlers, executor
//! - **Planner**: facade wiring everything from configuration
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pierre_workout_planner::config::PlannerConfig;
//! use pierre_workout_planner::conversation::ConversationContext;
//! use pierre_workout_planner::errors::AppResult;
//! use pierre_workout_planner::planner::WorkoutPlanner;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let planner = WorkoutPlanner::from_config(PlannerConfig::from_env()?).await?;
//!     let mut ctx = ConversationContext::new_session();
//!     planner.initialize_default_schedule(ctx.today).await?;
//!
//!     let reply = planner.handle_message(&mut ctx, "What's my workout today?").await;
//!     println!("{}", reply.message);
//!     Ok(())
//! }
//! ```

/// Environment-driven configuration
pub mod config;

/// Conversational layer: intents, confirmations, action execution
pub mod conversation;

/// Unified error handling re-exported from `pierre-core`
pub mod errors;

/// Structured logging setup and domain log helpers
pub mod logging;

/// Planner facade
pub mod planner;

/// Date-keyed workout schedule with undo history
pub mod schedule;

/// Key-value persistence boundary
pub mod storage;

pub use pierre_core::models;
pub use pierre_intelligence as intelligence;
