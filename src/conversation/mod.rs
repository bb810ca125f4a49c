// ABOUTME: Conversational layer turning chat messages into schedule queries and confirmed mutations
// ABOUTME: Wires the intent classifier, confirmation broker, handlers and action executor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Conversation
//!
//! Messages flow `classify -> execute -> (propose -> resolve)`:
//!
//! - [`IntentClassifier`] maps text to typed [`ClassifiedAction`]s
//! - [`ActionExecutor`] runs queries and moves directly and turns every other
//!   mutation into a [`ProposedAction`]
//! - [`ConfirmationBroker`] holds proposals per session until the athlete
//!   picks an option, then runs the registered handler
//!
//! All session state lives in the caller-owned [`ConversationContext`].

/// Session-scoped proposals and handler registry
pub mod confirmation;
/// Per-session context
pub mod context;
/// Heuristic entity extraction
pub mod entities;
/// Action routing
pub mod executor;
/// Built-in confirmation handlers
pub mod handlers;
/// Rule-based intent classification
pub mod intent;
/// Uniform action result
pub mod result;

pub use confirmation::{
    ConfirmationBroker, ConfirmationHandler, ConfirmationOption, ConfirmationOutcome,
    ConfirmationRequest, HandlerRegistry, OptionStyle, ProposalState, ProposedAction, CANCEL_TAG,
};
pub use context::ConversationContext;
pub use executor::ActionExecutor;
pub use handlers::builtin_handlers;
pub use intent::{ClassifiedAction, IntentClassifier, IntentEntities, IntentKind};
pub use result::ActionResult;
